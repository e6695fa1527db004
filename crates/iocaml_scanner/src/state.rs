//! Scan state threaded by the caller between lines.
//!
//! Strings and block comments may span lines, so the scanner needs to know
//! which sub-scanner was active when the previous line ran out. That is the
//! whole of its memory: a [`Mode`] and, for comments, a nesting depth.

/// Sub-scanner active at the current position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Ordinary code.
    #[default]
    Base,
    /// Inside a string literal opened on this or an earlier line.
    InString,
    /// Inside a (possibly nested) block comment.
    InComment,
}

/// State carried across calls to the scanner for one source unit.
///
/// # Invariant
///
/// `mode == Mode::InComment` iff `comment_depth > 0`. All mutators below
/// keep this true, so a suspended state is always consistent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScanState {
    mode: Mode,
    comment_depth: u32,
}

impl ScanState {
    /// Fresh state: base mode, no open comments.
    pub const fn new() -> Self {
        Self {
            mode: Mode::Base,
            comment_depth: 0,
        }
    }

    /// Active sub-scanner.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of unclosed `(*` openers.
    #[inline]
    pub fn comment_depth(&self) -> u32 {
        self.comment_depth
    }

    /// Returns `true` when no string or comment is open.
    #[inline]
    pub fn is_base(&self) -> bool {
        self.mode == Mode::Base
    }

    /// Return to the fresh state, e.g. before re-tokenizing a whole cell.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` if the mode/depth invariant holds.
    pub fn is_consistent(&self) -> bool {
        (self.mode == Mode::InComment) == (self.comment_depth > 0)
    }

    pub(crate) fn enter_string(&mut self) {
        debug_assert!(self.is_base(), "string opened outside base mode");
        self.mode = Mode::InString;
    }

    pub(crate) fn leave_string(&mut self) {
        debug_assert_eq!(self.mode, Mode::InString);
        self.mode = Mode::Base;
    }

    /// Record one more `(*`. Switches to comment mode on the first one.
    pub(crate) fn open_comment(&mut self) {
        self.comment_depth = self.comment_depth.saturating_add(1);
        self.mode = Mode::InComment;
    }

    /// Record one `*)`. Switches back to base mode when the outermost
    /// comment closes.
    pub(crate) fn close_comment(&mut self) {
        debug_assert!(self.comment_depth > 0, "close_comment at depth 0");
        self.comment_depth = self.comment_depth.saturating_sub(1);
        if self.comment_depth == 0 {
            self.mode = Mode::Base;
        }
    }
}
