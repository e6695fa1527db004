//! The host adapter: what a notebook must provide to receive the mode.
//!
//! Nothing here reaches for global objects. The host passes itself in as a
//! [`NotebookHost`], and receives a [`ModeDefinition`] it can drive with
//! its own rendering loop.

use std::sync::Arc;
use std::time::Duration;

use iocaml_scanner::{Cursor, ScanState, Scanner, BLOCK_COMMENT, LINE_COMMENT};

use crate::error::HostError;

/// Identifier the host uses to select this mode for a cell.
pub const MODE_NAME: &str = "iocaml";

/// MIME type mapped to [`MODE_NAME`].
pub const MIME_TYPE: &str = "text/x-iocaml";

/// Opaque handle for a notebook cell, assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

/// How the pager shows help text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PagerRendering {
    /// Text goes into a `<div>` as HTML, with URLs linked.
    #[default]
    Html,
    /// Text goes into a `<pre>` block verbatim.
    Preformatted,
}

/// Everything a host needs to highlight cells in this mode.
#[derive(Clone, Debug)]
pub struct ModeDefinition {
    name: &'static str,
    mime: &'static str,
    block_comment: Option<(&'static str, &'static str)>,
    line_comment: Option<&'static str>,
    scanner: Arc<Scanner>,
}

impl ModeDefinition {
    /// The `iocaml` mode backed by `scanner`.
    pub fn iocaml(scanner: Arc<Scanner>) -> Self {
        Self {
            name: MODE_NAME,
            mime: MIME_TYPE,
            block_comment: Some(BLOCK_COMMENT),
            line_comment: LINE_COMMENT,
            scanner,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Block comment start/end markers, for comment toggling and bracket
    /// matching.
    pub fn block_comment(&self) -> Option<(&'static str, &'static str)> {
        self.block_comment
    }

    /// Line comment marker. `None`: the language has no line comments.
    pub fn line_comment(&self) -> Option<&'static str> {
        self.line_comment
    }

    pub fn scanner(&self) -> &Arc<Scanner> {
        &self.scanner
    }

    /// Fresh per-cell state.
    pub fn start_state(&self) -> ScanState {
        self.scanner.start_state()
    }

    /// Scan one lexeme and return its style name, or `None` for text the
    /// host should leave unstyled.
    pub fn token(&self, cursor: &mut Cursor<'_>, state: &mut ScanState) -> Option<&'static str> {
        self.scanner.next_token(cursor, state).style()
    }
}

/// Operations a notebook host exposes to extensions.
///
/// Implemented by the host application (or a test double). Calls that the
/// host can refuse return [`HostError`].
pub trait NotebookHost {
    /// Register a highlighting mode under its name.
    fn define_mode(&mut self, mode: ModeDefinition) -> Result<(), HostError>;

    /// Returns `true` if a mode with this name is already registered.
    fn has_mode(&self, name: &str) -> bool;

    /// Map a MIME type to a registered mode.
    fn define_mime(&mut self, mime: &str, mode: &str) -> Result<(), HostError>;

    /// Code cells currently in the notebook, in display order.
    fn code_cells(&self) -> Vec<CellId>;

    /// Switch one cell to a mode.
    fn set_cell_mode(&mut self, cell: CellId, mode: &str) -> Result<(), HostError>;

    /// Re-run highlighting for one cell.
    fn rehighlight(&mut self, cell: CellId);

    /// Mode for cells created from now on.
    fn set_default_cell_mode(&mut self, mode: &str);

    /// Delay before a tooltip opens.
    fn set_tooltip_delay(&mut self, delay: Duration);

    /// How the pager renders text.
    fn set_pager_rendering(&mut self, rendering: PagerRendering);
}
