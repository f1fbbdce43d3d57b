//! Tracing setup.
//!
//! The engine emits `tracing` events under the `crq_schedule` target.
//! Hosts usually install their own subscriber; this helper installs an
//! env-filtered fmt subscriber (`RUST_LOG=crq_schedule=debug`) if none is set.

/// Installs a default subscriber unless one is already registered.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
