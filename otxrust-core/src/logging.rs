use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

/// Initializes `env_logger` for the current process.
///
/// Safe to call any number of times: only the first call has an effect, and a
/// logger installed by someone else is left in place.
pub fn init_logging() {
    LOGGER_INIT.call_once(|| {
        match env_logger::builder().is_test(cfg!(test)).try_init() {
            Ok(()) => log::debug!("env_logger initialized"),
            Err(e) => log::debug!("env_logger already initialized: {}", e),
        }
    });
}
