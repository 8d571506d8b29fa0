use log::LevelFilter;

/// Initialize the `env_logger` backend for the `log` facade.
///
/// The level is chosen by the caller; the sweep itself reads no environment
/// variables. Calling this more than once is harmless.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let initialized = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_secs()
        .format_target(true)
        .try_init()
        .is_ok();

    if initialized {
        log::info!("Logging initialized (verbose={})", verbose);
    }
}
