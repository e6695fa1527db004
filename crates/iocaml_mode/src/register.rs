//! Wiring the scanner and notebook defaults into a host.
//!
//! Two lifecycle hooks, called by whatever bridges the host's events:
//!
//! - [`on_app_initialized`]: once per page load: tooltip delay, mode
//!   registration, default cell mode, pager rendering.
//! - [`on_notebook_loaded`]: once per notebook load: default the
//!   notebook's declared language.

use std::sync::Arc;

use iocaml_scanner::{Scanner, WordTable};

use crate::config::NotebookConfig;
use crate::error::RegistrationError;
use crate::host::{ModeDefinition, NotebookHost, MIME_TYPE, MODE_NAME};
use crate::metadata::{LanguageHint, NotebookMetadata};

/// Register the `iocaml` mode with `host` and switch every existing code
/// cell to it.
///
/// Cells are forced into the mode and re-highlighted explicitly: a host may
/// have rendered them before the mode existed.
pub fn register_mode<H>(host: &mut H, words: WordTable) -> Result<Arc<Scanner>, RegistrationError>
where
    H: NotebookHost + ?Sized,
{
    if words.keyword_count() == 0 {
        return Err(RegistrationError::EmptyKeywordSet);
    }
    if host.has_mode(MODE_NAME) {
        return Err(RegistrationError::DuplicateMode(MODE_NAME.to_owned()));
    }

    let scanner = Arc::new(Scanner::new(words));
    host.define_mode(ModeDefinition::iocaml(Arc::clone(&scanner)))?;
    host.define_mime(MIME_TYPE, MODE_NAME)?;
    tracing::debug!(mode = MODE_NAME, mime = MIME_TYPE, "mode registered");

    let cells = host.code_cells();
    for &cell in &cells {
        host.set_cell_mode(cell, MODE_NAME)?;
        host.rehighlight(cell);
    }
    tracing::debug!(count = cells.len(), "existing code cells switched to mode");

    Ok(scanner)
}

/// Apply `config` and register the mode with the default word tables.
pub fn on_app_initialized<H>(
    host: &mut H,
    config: &NotebookConfig,
) -> Result<Arc<Scanner>, RegistrationError>
where
    H: NotebookHost + ?Sized,
{
    host.set_tooltip_delay(config.tooltip_delay);
    let scanner = register_mode(host, WordTable::ocaml())?;
    host.set_default_cell_mode(&config.default_cell_mode);
    host.set_pager_rendering(config.pager);
    tracing::debug!(
        tooltip_delay_ms = config.tooltip_delay.as_millis(),
        default_cell_mode = %config.default_cell_mode,
        pager = ?config.pager,
        "notebook defaults applied"
    );
    Ok(scanner)
}

/// Default the notebook's language hint.
pub fn on_notebook_loaded(metadata: &mut NotebookMetadata, config: &NotebookConfig) -> LanguageHint {
    let hint = metadata.ensure_language(&config.default_language);
    match &hint {
        LanguageHint::Added(language) => {
            tracing::info!(%language, "added notebook language hint");
        }
        LanguageHint::AlreadySet(language) => {
            tracing::info!(%language, "notebook language already defined");
        }
    }
    hint
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
