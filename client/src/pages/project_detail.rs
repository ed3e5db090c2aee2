//! Single project view with metrics, current team, and the team modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routed at `/projects/:id`. The project is re-fetched whenever the id
//! changes and after every successful team save; responses for an id the
//! page has already moved away from are dropped.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::team_modal::TeamModal;
use crate::net::api::fetch_project;
use crate::net::types::{ProjectDetailResponse, ProjectStatus};
use crate::state::ui::{NoticeKind, UiState};
use crate::util::browser::spawn;
use crate::util::dates::{is_on_or_before, today};
use crate::util::format::{money, or_dash, percent};

#[component]
pub fn ProjectDetailPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let params = use_params_map();
    let project_id = Memo::new(move |_| params.with(|p| p.get("id").and_then(|raw| raw.parse::<i64>().ok())));

    let detail = RwSignal::new(None::<ProjectDetailResponse>);
    let error = RwSignal::new(None::<String>);
    let show_team = RwSignal::new(false);

    let load = move |id: i64| {
        error.set(None);
        spawn(async move {
            let result = fetch_project(id).await;
            if project_id.get_untracked() != Some(id) {
                return;
            }
            match result {
                Ok(response) => detail.set(Some(response)),
                Err(err) => {
                    leptos::logging::warn!("project {id} fetch failed: {err}");
                    error.set(Some(err.user_message()));
                }
            }
        });
    };

    Effect::new(move || match project_id.get() {
        Some(id) => {
            detail.set(None);
            load(id);
        }
        None => error.set(Some("Unknown project".to_owned())),
    });

    let on_saved = Callback::new(move |()| {
        show_team.set(false);
        ui.update(|u| {
            u.notify(NoticeKind::Success, "Team updated");
        });
        if let Some(id) = project_id.get_untracked() {
            load(id);
        }
    });

    view! {
        <div class="project-page">
            <header class="page-header toolbar">
                <A href="/projects">"← Projects"</A>
                <h1 class="page-header__title">
                    {move || detail.with(|d| d.as_ref().map(|d| d.project.project_name.clone()).unwrap_or_default())}
                </h1>
                <span class="toolbar__spacer"></span>
                <button
                    class="btn btn--primary"
                    disabled=move || detail.with(Option::is_none)
                    on:click=move |_| show_team.set(true)
                >
                    "Manage team"
                </button>
            </header>

            {move || error.get().map(|message| view! { <p class="page-error" role="alert">{message}</p> })}

            {move || {
                let Some(ProjectDetailResponse { project, team, metrics }) = detail.get() else {
                    return view! { <p class="page-loading">"Loading project…"</p> }.into_any();
                };
                let now = today();
                let active_team: Vec<_> = team
                    .into_iter()
                    .filter(|a| !a.end_date.as_deref().is_some_and(|end| is_on_or_before(end, now)))
                    .collect();
                view! {
                    <section class="card project-page__details">
                        <dl class="review__details">
                            <dt>"Client"</dt>
                            <dd>{project.client_name}</dd>
                            <dt>"Type"</dt>
                            <dd>{or_dash(project.project_type.as_deref())}</dd>
                            <dt>"Status"</dt>
                            <dd>{project.status.map_or("—", ProjectStatus::label)}</dd>
                            <dt>"Probability"</dt>
                            <dd>{project.probability.map_or_else(|| "—".to_owned(), |p| format!("{p}%"))}</dd>
                            <dt>"Dates"</dt>
                            <dd>
                                {format!(
                                    "{} → {}",
                                    or_dash(project.start_date.as_deref()),
                                    or_dash(project.end_date.as_deref()),
                                )}
                            </dd>
                            <dt>"Budget"</dt>
                            <dd>{project.budget_cap.map_or_else(|| "—".to_owned(), |b| money(b, "USD"))}</dd>
                            <dt>"Tech stack"</dt>
                            <dd>{or_dash(project.tech_stack.as_deref())}</dd>
                        </dl>
                        <p class="project-page__description">{or_dash(project.description.as_deref())}</p>
                    </section>
                    {metrics
                        .map(|m| {
                            view! {
                                <section class="card project-page__metrics">
                                    <dl class="kpi-list">
                                        <dt>"Team size"</dt>
                                        <dd>{m.total_team_members}</dd>
                                        <dt>"Budget used"</dt>
                                        <dd>{money(m.budget_utilized, "USD")}</dd>
                                        <dt>"Budget left"</dt>
                                        <dd>{money(m.budget_remaining, "USD")}</dd>
                                        <dt>"Avg utilization"</dt>
                                        <dd>{percent(m.avg_utilization)}</dd>
                                    </dl>
                                </section>
                            }
                        })}
                    <section class="card">
                        <h2 class="card__title">"Team"</h2>
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Employee"</th>
                                    <th>"Role"</th>
                                    <th>"Start"</th>
                                    <th>"End"</th>
                                    <th>"Alloc %"</th>
                                    <th>"Billable %"</th>
                                    <th>"Trainee"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {active_team
                                    .into_iter()
                                    .map(|a| {
                                        view! {
                                            <tr>
                                                <td>{a.employee_name}</td>
                                                <td>{or_dash(a.role_name.as_deref())}</td>
                                                <td>{a.start_date}</td>
                                                <td>{or_dash(a.end_date.as_deref())}</td>
                                                <td>{a.allocation_percentage}</td>
                                                <td>{a.billable_percentage}</td>
                                                <td>{if a.is_trainee { "Yes" } else { "No" }}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    </section>
                }
                    .into_any()
            }}

            {move || {
                if !show_team.get() {
                    return None;
                }
                let id = project_id.get_untracked()?;
                let team = detail.with_untracked(|d| d.as_ref().map(|d| d.team.clone()))?;
                Some(view! {
                    <TeamModal
                        project_id=id
                        team=team
                        on_close=Callback::new(move |()| show_team.set(false))
                        on_saved=on_saved
                    />
                })
            }}
        </div>
    }
}
