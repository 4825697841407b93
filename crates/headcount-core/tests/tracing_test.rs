//! Logging setup.

use std::sync::Mutex;

use headcount_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn accepts_per_crate_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("HEADCOUNT_LOG", "headcount_core=debug,headcount_storage=warn");
    init_tracing();
    std::env::remove_var("HEADCOUNT_LOG");
}

#[test]
fn invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("HEADCOUNT_LOG", "=[not a filter");
    init_tracing();
    std::env::remove_var("HEADCOUNT_LOG");
}

#[test]
fn repeated_init_is_harmless() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!("still logging");
}
