//! Shared capture of `log` output for unit tests.
//!
//! `logtest::Logger::start` installs a process-wide logger and may only run
//! once per test binary, so every test borrows the same instance. Tests using
//! it must be `#[serial]`.

use std::sync::OnceLock;

use logtest::Logger;
use parking_lot::{Mutex, MutexGuard};
use rstest::fixture;

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Borrow the shared logger with any earlier records discarded.
#[fixture]
pub fn captured_logs() -> MutexGuard<'static, Logger> {
    let mut logger = LOGGER.get_or_init(|| Mutex::new(Logger::start())).lock();
    while logger.pop().is_some() {}
    logger
}

/// Drain every captured warning, returning the messages in emission order.
pub fn drain_warnings(logger: &mut Logger) -> Vec<String> {
    let mut warnings = Vec::new();
    while let Some(record) = logger.pop() {
        if record.level() == log::Level::Warn {
            warnings.push(record.args().to_owned());
        }
    }
    warnings
}
