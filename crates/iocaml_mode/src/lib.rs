//! Notebook integration for the `iocaml` highlighting mode.
//!
//! The host notebook passes itself in through [`NotebookHost`]; this crate
//! registers the scanner from [`iocaml_scanner`] as a mode, applies the
//! notebook defaults from [`NotebookConfig`], and defaults the notebook's
//! language metadata.

pub mod commands;
pub mod config;
mod error;
pub mod host;
pub mod metadata;
pub mod register;
pub mod render;

use std::sync::Once;

pub use config::NotebookConfig;
pub use error::{ConfigError, HostError, MetadataError, RegistrationError};
pub use host::{CellId, ModeDefinition, NotebookHost, PagerRendering, MIME_TYPE, MODE_NAME};
pub use metadata::{LanguageHint, NotebookMetadata};
pub use register::{on_app_initialized, on_notebook_loaded, register_mode};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=iocaml_mode=debug` or `RUST_LOG=iocaml_scanner=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
