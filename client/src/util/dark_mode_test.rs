#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn preference_defaults_to_light_off_browser() {
    assert!(!read_preference());
}

#[test]
fn toggle_returns_flipped_flag() {
    assert!(toggle(false));
    assert!(!toggle(true));
}

#[test]
fn theme_names_match_stylesheet_selectors() {
    assert_eq!(theme_name(true), "dark");
    assert_eq!(theme_name(false), "light");
    apply(true);
}
