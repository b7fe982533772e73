//! Logger setup.
//!
//! Records are formatted as `[LEVEL target] message` and sent to the browser
//! console (wasm32) or stderr.

use log::LevelFilter;

use crate::error::Result;

/// Install the global logger at `level`.
///
/// Safe to call more than once. The dispatch itself passes every record and
/// verbosity is set through `log::set_max_level`, so a later call can raise
/// or lower the level.
pub fn init(level: LevelFilter) -> Result<()> {
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(LevelFilter::Trace)
        .chain(output());

    // Fails when a logger is already installed; keep that one.
    let _ = dispatch.apply();
    log::set_max_level(level);
    Ok(())
}

/// Install the logger at the level named in `config`.
pub fn init_from_config(config: &crate::config::StreamConfig) -> Result<()> {
    init(config.level_filter()?)
}

#[cfg(target_arch = "wasm32")]
fn output() -> fern::Output {
    fern::Output::call(|record| {
        let line = wasm_bindgen::JsValue::from_str(&record.args().to_string());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn output() -> fern::Output {
    std::io::stderr().into()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use log::{Level, Metadata};

    fn enabled(level: Level) -> bool {
        let metadata = Metadata::builder().level(level).target("streamplot").build();
        log::logger().enabled(&metadata)
    }

    #[test]
    fn test_init_twice_raises_level() {
        assert!(init(LevelFilter::Warn).is_ok());
        assert!(init(LevelFilter::Debug).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(enabled(Level::Debug));
    }
}
