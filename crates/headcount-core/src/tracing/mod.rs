//! Observability: `tracing` with `EnvFilter`.

pub mod setup;

pub use setup::init_tracing;
