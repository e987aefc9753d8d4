//! Test logging
//!
//! `tracing` events are forwarded to `log` records, which `env_logger`
//! prints when `RUST_LOG` is set.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests, once per process
///
/// # Examples
///
/// ```
/// use inertia_test::logging::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
	});
}
