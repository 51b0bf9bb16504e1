// Library root for mnemo: exposes modules shared by the two binaries.

pub mod analyze;
pub mod cli;
pub mod collab;
pub mod config;
pub mod insights;
pub mod pipeline;
pub mod signal;
pub mod state;
pub mod tracker;
pub mod util;

/// Initialize stderr logging for the binaries, honoring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
