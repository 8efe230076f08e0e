//! Mesos Catalog: discovers Mesos containers from the agent's on-disk state.
//!
//! This library scans the Mesos agent's work directory for executor run directories,
//! keeps an in-memory catalog of the containers found there, derives their primary PID,
//! display name and cgroup path, and resolves human-typed container names to the
//! agent's hash-like executor ids. It only ever reads the filesystem.
use std::sync::{Arc, Mutex};

pub mod catalog;
pub mod cgroup;
pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod fsutil;
pub mod matching;
pub mod staleness;

// Mesos agent state layout:
//  <MESOS_DIR>/meta/slaves/latest/frameworks/<framework-id>/executors/<executor-id>/
//      runs/latest/pids/forked.pid   -> pid of the container's primary process
//
//  executor id: <seg>-<seg>-<display name>-<seg>-<seg>-<seg>-<seg>-<seg>
//
// check /proc/<pid>/cgroup for the container's cgroup
//  file format: <hierarchy-id>:<controller-list>:<cgroup-path>

/// Runs the discovery loop.
///
/// Locates the container list below `MESOS_DIR`, then on every tick re-scans it if it
/// changed, refreshes the values of every catalogued container and prints the catalog
/// as a JSON line whenever it differs from the previously printed one.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the blocking refresh task panics.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;
    log::debug!("Mesos state root: {}", config.mesos_dir.display());

    let engine = Arc::new(Mutex::new(engine::Engine::from_config(&config)));
    let catalog = Arc::new(catalog::Catalog::default());
    let mut last_snapshot: Option<catalog::Snapshot> = None;

    let mut interval = tokio::time::interval(config.poll_interval);
    loop {
        interval.tick().await;

        let engine = Arc::clone(&engine);
        let catalog = Arc::clone(&catalog);
        let snapshot = tokio::task::spawn_blocking(move || {
            let mut engine = match engine.lock() {
                Ok(engine) => engine,
                Err(poisoned) => poisoned.into_inner(),
            };
            let before = std::time::Instant::now();
            refresh_cycle(&mut *engine, &catalog);
            log::trace!(
                "refresh cycle took {} nanoseconds",
                before.elapsed().as_nanos()
            );
            catalog.snapshot()
        })
        .await?;

        if last_snapshot.as_ref() != Some(&snapshot) {
            println!("{}", snapshot.to_json()?);
            last_snapshot = Some(snapshot);
        }
    }
}

/// One polling step: (re)locate, re-scan if stale, then refresh every container's values.
fn refresh_cycle<L: cgroup::CgroupLookup>(
    engine: &mut engine::Engine<L>,
    catalog: &catalog::Catalog,
) {
    if engine.container_list().is_none() {
        engine.locate();
    }

    if engine.is_catalog_stale().is_changed() {
        catalog.begin_cycle();
        let summary = engine.refresh_catalog(catalog);
        let expired = catalog.expire_inactive();
        log::debug!(
            "catalog refreshed: added={} reactivated={} expired={}",
            summary.added,
            summary.reactivated,
            expired.len()
        );
    }

    catalog.refresh_values(engine);
}
