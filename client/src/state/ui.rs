//! Local UI chrome state (theme, sidebar, transient notices).
//!
//! DESIGN
//! ======
//! Keeps presentation concerns out of the page models so each page can stay
//! a fetch-and-render unit over its own state.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Severity of a transient banner notice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice notice-info",
            Self::Success => "notice notice-success",
            Self::Error => "notice notice-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Identifies this notice so a delayed dismiss does not clear a newer one.
    pub seq: u64,
}

/// UI state shared through context by the shell and pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_expanded: bool,
    pub notice: Option<Notice>,
    notice_seq: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self { dark_mode: false, sidebar_expanded: true, notice: None, notice_seq: 0 }
    }
}

impl UiState {
    /// Show a notice and return its sequence number for later dismissal.
    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        self.notice_seq += 1;
        self.notice = Some(Notice { kind, text: text.into(), seq: self.notice_seq });
        self.notice_seq
    }

    /// Clear the notice only if it is still the one identified by `seq`.
    pub fn dismiss(&mut self, seq: u64) {
        if self.notice.as_ref().is_some_and(|n| n.seq == seq) {
            self.notice = None;
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_expanded = !self.sidebar_expanded;
    }
}
