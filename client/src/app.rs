//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_shell::NavShell;
use crate::pages::{
    allocation_report::AllocationReportPage, dashboard::DashboardPage, documents::DocumentsPage,
    employees::EmployeesPage, project_detail::ProjectDetailPage, projects::ProjectsPage, talent_lab::TalentLabPage,
};
use crate::state::ui::UiState;
use crate::util::dark_mode;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared UI context and the route table. Every route listed in
/// the sidebar's `NAV_ITEMS` has an entry here.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ui = RwSignal::new(UiState::default());
    provide_context(ui);

    // Theme is a browser preference; the server always renders light.
    Effect::new(move || {
        let dark = dark_mode::read_preference();
        dark_mode::apply(dark);
        ui.update(|u| u.dark_mode = dark);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/benchcraft-console.css"/>
        <Title text="BenchCraft"/>

        <Router>
            <NavShell>
                <Routes fallback=|| view! { <p class="page-error">"Page not found."</p> }>
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("employees") view=EmployeesPage/>
                    <Route path=StaticSegment("projects") view=ProjectsPage/>
                    <Route path=(StaticSegment("projects"), ParamSegment("id")) view=ProjectDetailPage/>
                    <Route path=(StaticSegment("reports"), StaticSegment("allocation")) view=AllocationReportPage/>
                    <Route path=StaticSegment("talent-lab") view=TalentLabPage/>
                    <Route path=StaticSegment("documents") view=DocumentsPage/>
                </Routes>
            </NavShell>
        </Router>
    }
}
