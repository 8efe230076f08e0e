/// Entry point for the Mesos container catalog.
///
/// This binary locates the Mesos agent's container list, keeps a catalog of the
/// containers found there up to date and prints it as a JSON line on every change.
///
/// # Errors
///
/// Returns an error if the configuration taken from the environment is invalid.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug MESOS_DIR=/var/lib/mesos cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    mesos_catalog::run().await
}
