use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_light_with_sidebar_open() {
    let state = UiState::default();
    assert!(!state.dark_mode);
    assert!(state.sidebar_expanded);
    assert_eq!(state.notice, None);
}

#[test]
fn toggle_sidebar_flips() {
    let mut state = UiState::default();
    state.toggle_sidebar();
    assert!(!state.sidebar_expanded);
    state.toggle_sidebar();
    assert!(state.sidebar_expanded);
}

// =============================================================
// Notices
// =============================================================

#[test]
fn notify_replaces_previous_notice() {
    let mut state = UiState::default();
    let first = state.notify(NoticeKind::Info, "Saved draft");
    let second = state.notify(NoticeKind::Error, "Save failed");
    assert_ne!(first, second);
    let notice = state.notice.clone().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Save failed");
}

#[test]
fn stale_dismiss_keeps_newer_notice() {
    let mut state = UiState::default();
    let first = state.notify(NoticeKind::Success, "Project created");
    let second = state.notify(NoticeKind::Success, "Team saved");
    state.dismiss(first);
    assert!(state.notice.is_some());
    state.dismiss(second);
    assert!(state.notice.is_none());
}

#[test]
fn notice_kind_default_is_info() {
    assert_eq!(NoticeKind::default(), NoticeKind::Info);
    assert_eq!(NoticeKind::Error.css_class(), "notice notice-error");
}
