//! Application shell: sidebar navigation, theme toggle, notice banner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every routed page. Sidebar entries come from [`NAV_ITEMS`], the same
//! table `app.rs` registers routes for, so a page cannot exist without its
//! link or the reverse.

#[cfg(test)]
#[path = "nav_shell_test.rs"]
mod nav_shell_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::state::ui::UiState;
use crate::util::browser::{sleep_ms, spawn};

/// How long a notice stays on screen.
pub const NOTICE_TTL_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { href: "/", label: "Bench", icon: "◔" },
    NavItem { href: "/employees", label: "Employees", icon: "☺" },
    NavItem { href: "/projects", label: "Projects", icon: "▦" },
    NavItem { href: "/reports/allocation", label: "Allocation report", icon: "≡" },
    NavItem { href: "/talent-lab", label: "Talent lab", icon: "✦" },
    NavItem { href: "/documents", label: "Documents", icon: "⎘" },
];

/// `true` when `path` is `href` or nested below it. The root only matches itself.
#[must_use]
pub fn is_active(path: &str, href: &str) -> bool {
    let path = path.trim_end_matches('/');
    let href = href.trim_end_matches('/');
    if href.is_empty() {
        return path.is_empty();
    }
    path == href || path.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn NavShell(children: Children) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let location = use_location();

    // Auto-dismiss each notice; a newer notice outlives the older timer.
    Effect::new(move || {
        let Some(seq) = ui.with(|u| u.notice.as_ref().map(|n| n.seq)) else {
            return;
        };
        spawn(async move {
            sleep_ms(NOTICE_TTL_MS).await;
            ui.update(|u| u.dismiss(seq));
        });
    });

    let shell_class = move || {
        if ui.with(|u| u.sidebar_expanded) { "shell" } else { "shell shell--collapsed" }
    };

    view! {
        <div class=shell_class>
            <nav class="sidebar" aria-label="Main">
                <div class="sidebar__brand">
                    <button
                        class="btn sidebar__collapse"
                        title="Toggle sidebar"
                        on:click=move |_| ui.update(UiState::toggle_sidebar)
                    >
                        "☰"
                    </button>
                    <span class="sidebar__title">"BenchCraft"</span>
                </div>
                <ul class="sidebar__items">
                    {NAV_ITEMS
                        .iter()
                        .map(|item| {
                            let href = item.href;
                            let item_class = move || {
                                if is_active(&location.pathname.get(), href) {
                                    "sidebar__item sidebar__item--active"
                                } else {
                                    "sidebar__item"
                                }
                            };
                            view! {
                                <li class=item_class>
                                    <A href=href>
                                        <span class="sidebar__icon" aria-hidden="true">{item.icon}</span>
                                        <span class="sidebar__label">{item.label}</span>
                                    </A>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()}
                </ul>
                <button
                    class="btn sidebar__theme"
                    title="Toggle dark mode"
                    on:click=move |_| {
                        let next = crate::util::dark_mode::toggle(ui.get_untracked().dark_mode);
                        ui.update(|u| u.dark_mode = next);
                    }
                >
                    {move || if ui.get().dark_mode { "☀ Light" } else { "☾ Dark" }}
                </button>
            </nav>
            <main class="shell__main">
                {move || {
                    ui.get()
                        .notice
                        .map(|notice| {
                            let seq = notice.seq;
                            view! {
                                <div class=notice.kind.css_class() role="status">
                                    <span>{notice.text}</span>
                                    <button class="btn btn--ghost" on:click=move |_| ui.update(|u| u.dismiss(seq))>
                                        "×"
                                    </button>
                                </div>
                            }
                        })
                }}
                {children()}
            </main>
        </div>
    }
}
