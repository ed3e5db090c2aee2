//! Project list, wizard launcher, and RFP prefill.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::file_uploader::FileUploader;
use crate::components::project_wizard::ProjectWizard;
use crate::net::api::fetch_projects;
use crate::net::types::{Project, ProjectStatus};
use crate::state::ui::{NoticeKind, UiState};
use crate::state::uploads::{UploadKind, UploadOutcome};
use crate::state::wizard::WizardState;
use crate::util::browser::spawn;
use crate::util::format::{money, or_dash};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();
    let projects = RwSignal::new(Vec::<Project>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let wizard = RwSignal::new(WizardState::default());
    let show_rfp = RwSignal::new(false);

    let refresh = move || {
        loading.set(true);
        spawn(async move {
            match fetch_projects().await {
                Ok(list) => {
                    projects.set(list.projects);
                    error.set(None);
                }
                Err(err) => {
                    leptos::logging::warn!("project list failed: {err}");
                    error.set(Some(err.user_message()));
                }
            }
            loading.set(false);
        });
    };
    refresh();

    // RFP parse results open the wizard (if closed) and fill the details step.
    let on_rfp = Callback::new(move |outcome: UploadOutcome| {
        let UploadOutcome::Rfp(response) = outcome else {
            return;
        };
        wizard.update(|w| {
            if !w.open {
                *w = WizardState::opened();
            }
            w.prefill_from_rfp(&response.project);
        });
        show_rfp.set(false);
    });

    let created_id = RwSignal::new(None::<i64>);
    Effect::new(move || {
        if let Some(id) = created_id.get() {
            created_id.set(None);
            navigate(&format!("/projects/{id}"), NavigateOptions::default());
        }
    });

    let on_created = Callback::new(move |project_id: Option<i64>| {
        ui.update(|u| {
            u.notify(NoticeKind::Success, "Project created");
        });
        match project_id {
            Some(id) => created_id.set(Some(id)),
            None => refresh(),
        }
    });

    view! {
        <div class="projects-page">
            <header class="page-header toolbar">
                <h1 class="page-header__title">"Projects"</h1>
                <span class="toolbar__spacer"></span>
                <button class="btn" on:click=move |_| show_rfp.update(|v| *v = !*v)>
                    "Start from RFP"
                </button>
                <button class="btn btn--primary" on:click=move |_| wizard.set(WizardState::opened())>
                    "+ New project"
                </button>
            </header>

            <Show when=move || show_rfp.get()>
                <div class="card">
                    <FileUploader kind=UploadKind::Rfp on_uploaded=on_rfp/>
                </div>
            </Show>

            {move || error.get().map(|message| view! { <p class="page-error" role="alert">{message}</p> })}

            <table class="table">
                <thead>
                    <tr>
                        <th>"Project"</th>
                        <th>"Client"</th>
                        <th>"Status"</th>
                        <th>"Start"</th>
                        <th>"End"</th>
                        <th>"Budget"</th>
                        <th>"Tech stack"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let list = projects.get();
                        if list.is_empty() {
                            let text = if loading.get() { "Loading projects…" } else { "No projects yet." };
                            return view! {
                                <tr>
                                    <td colspan="7" class="table__empty">{text}</td>
                                </tr>
                            }
                                .into_any();
                        }
                        list.into_iter()
                            .map(|p| {
                                let href = format!("/projects/{}", p.id);
                                view! {
                                    <tr>
                                        <td>
                                            <A href=href>{p.project_name}</A>
                                        </td>
                                        <td>{p.client_name}</td>
                                        <td>{p.status.map_or("—", ProjectStatus::label)}</td>
                                        <td>{or_dash(p.start_date.as_deref())}</td>
                                        <td>{or_dash(p.end_date.as_deref())}</td>
                                        <td>{p.budget_cap.map_or_else(|| "—".to_owned(), |b| money(b, "USD"))}</td>
                                        <td>{or_dash(p.tech_stack.as_deref())}</td>
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                </tbody>
            </table>

            <Show when=move || wizard.with(|w| w.open)>
                <ProjectWizard wizard=wizard on_created=on_created/>
            </Show>
        </div>
    }
}
