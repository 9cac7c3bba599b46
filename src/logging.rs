pub fn init_logging() {
    env_logger::init()
}

/// Variant for test binaries: captures output per test and tolerates
/// repeated initialization.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
