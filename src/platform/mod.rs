//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging (console vs. stderr)
//! - Storage (LocalStorage on web, files on native)
//! - The JavaScript-facing widget API (web only)

pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod widget;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageBackend;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileBackend;
#[cfg(target_arch = "wasm32")]
pub use widget::TodoWidget;

/// Route `log` output to the browser console and panics to `console.error`
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    // Already initialized when several widgets share a page
    let _ = console_log::init_with_level(level);
}

/// Route `log` output to stderr; `RUST_LOG` overrides `level`
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: log::Level) {
    let env = env_logger::Env::default().default_filter_or(level.as_str());
    let _ = env_logger::Builder::from_env(env).try_init();
}
