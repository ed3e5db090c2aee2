//! Talent lab: AI training recommendations and skill-gap analysis.

use leptos::prelude::*;

use crate::components::field_error::FieldError;
use crate::net::api::{analyze_skill_gaps, fetch_employees, fetch_projects, fetch_training_recommendations};
use crate::net::types::{CourseRecommendation, Employee, Project};
use crate::state::talent::TalentLabState;
use crate::util::browser::spawn;
use crate::util::format::or_dash;
use crate::util::validation::FieldErrors;

fn course_link(course: String, link: Option<String>) -> impl IntoView {
    match link.filter(|l| !l.trim().is_empty()) {
        Some(href) => view! { <a href=href target="_blank" rel="noopener">{course}</a> }.into_any(),
        None => view! { <span>{course}</span> }.into_any(),
    }
}

#[component]
pub fn TalentLabPage() -> impl IntoView {
    let lab = RwSignal::new(TalentLabState::default());
    let employees = RwSignal::new(Vec::<Employee>::new());
    let projects = RwSignal::new(Vec::<Project>::new());
    let errors: Signal<FieldErrors> = Memo::new(move |_| lab.with(|l| l.errors.clone())).into();

    spawn(async move {
        let result = fetch_training_recommendations().await.map(|r| r.recommendations);
        lab.update(|l| l.set_recommendations(result));
    });
    spawn(async move {
        match fetch_employees(None, None, "").await {
            Ok(list) => employees.set(list.employees),
            Err(err) => leptos::logging::warn!("talent lab employee list failed: {err}"),
        }
    });
    spawn(async move {
        match fetch_projects().await {
            Ok(list) => projects.set(list.projects),
            Err(err) => leptos::logging::warn!("talent lab project list failed: {err}"),
        }
    });

    let on_analyze = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = lab.try_update(TalentLabState::begin_analysis).flatten() else {
            return;
        };
        spawn(async move {
            let result = analyze_skill_gaps(&request).await;
            lab.update(|l| l.finish_analysis(result));
        });
    };

    view! {
        <div class="talent-page">
            <header class="page-header toolbar">
                <h1 class="page-header__title">"Talent lab"</h1>
            </header>

            <section class="card">
                <h2 class="card__title">"Recommended training"</h2>
                {move || {
                    lab.with(|l| l.recommendations_error.clone())
                        .map(|message| view! { <p class="page-error" role="alert">{message}</p> })
                }}
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Employee"</th>
                            <th>"Skill"</th>
                            <th>"Course"</th>
                            <th>"Provider"</th>
                            <th>"Priority"</th>
                            <th>"Why"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            lab.with(|l| l.recommendations.clone())
                                .into_iter()
                                .map(|r| {
                                    view! {
                                        <tr>
                                            <td>{or_dash(r.employee_name.as_deref())}</td>
                                            <td>{r.skill}</td>
                                            <td>{course_link(r.course, r.link)}</td>
                                            <td>{or_dash(r.provider.as_deref())}</td>
                                            <td>{or_dash(r.priority.as_deref())}</td>
                                            <td>{or_dash(r.reason.as_deref())}</td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tbody>
                </table>
            </section>

            <section class="card">
                <h2 class="card__title">"Skill-gap analysis"</h2>
                <form class="form-grid" on:submit=on_analyze>
                    <label class="field">
                        <span class="field__label">"Employee"</span>
                        <select
                            prop:value=move || lab.with(|l| l.form.employee_id.map(|id| id.to_string()).unwrap_or_default())
                            on:change=move |ev| {
                                let id = event_target_value(&ev).parse::<i64>().ok();
                                lab.update(|l| l.form.employee_id = id);
                            }
                        >
                            <option value="">"Select employee"</option>
                            {move || {
                                employees
                                    .get()
                                    .into_iter()
                                    .map(|e| view! { <option value=e.id.to_string()>{e.full_name()}</option> })
                                    .collect::<Vec<_>>()
                            }}
                        </select>
                        <FieldError errors=errors key="employee_id"/>
                    </label>
                    <label class="field">
                        <span class="field__label">"Target project"</span>
                        <select
                            prop:value=move || lab.with(|l| l.form.project_id.map(|id| id.to_string()).unwrap_or_default())
                            on:change=move |ev| {
                                let id = event_target_value(&ev).parse::<i64>().ok();
                                lab.update(|l| l.form.project_id = id);
                            }
                        >
                            <option value="">"None"</option>
                            {move || {
                                projects
                                    .get()
                                    .into_iter()
                                    .map(|p| view! { <option value=p.id.to_string()>{p.project_name}</option> })
                                    .collect::<Vec<_>>()
                            }}
                        </select>
                    </label>
                    <label class="field field--wide">
                        <span class="field__label">"Target skills"</span>
                        <input
                            type="text"
                            placeholder="Kubernetes, Terraform"
                            prop:value=move || lab.with(|l| l.form.target_skills.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                lab.update(|l| l.form.target_skills = value);
                            }
                        />
                        <FieldError errors=errors key="target_skills"/>
                    </label>
                    <div class="dialog__actions">
                        <button class="btn btn--primary" type="submit" disabled=move || lab.with(|l| l.analyzing)>
                            {move || if lab.with(|l| l.analyzing) { "Analyzing…" } else { "Analyze" }}
                        </button>
                    </div>
                </form>

                {move || {
                    lab.with(|l| l.analysis_error.clone())
                        .map(|message| view! { <p class="page-error" role="alert">{message}</p> })
                }}

                <Show when=move || lab.with(|l| l.analysis.is_some())>
                    <div class="talent-page__results">
                        <h3>"Gaps"</h3>
                        <ul class="gap-list">
                            {move || {
                                lab.with(TalentLabState::ranked_gaps)
                                    .into_iter()
                                    .map(|gap| {
                                        let shortfall = gap.shortfall();
                                        let class = if shortfall == 0 { "gap gap--met" } else { "gap" };
                                        view! {
                                            <li class=class>
                                                <span class="gap__skill">{gap.skill}</span>
                                                <meter
                                                    min="0"
                                                    max="5"
                                                    value=gap.current_level.to_string()
                                                    title=format!("{} of {}", gap.current_level, gap.required_level)
                                                ></meter>
                                                <span class="gap__shortfall">
                                                    {if shortfall == 0 {
                                                        "met".to_owned()
                                                    } else {
                                                        format!("-{shortfall}")
                                                    }}
                                                </span>
                                            </li>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </ul>
                        <h3>"Suggested courses"</h3>
                        <ul>
                            {move || {
                                lab.with(|l| l.analysis.as_ref().map(|a| a.recommendations.clone()).unwrap_or_default())
                                    .into_iter()
                                    .map(|CourseRecommendation { course, provider, link }| {
                                        view! {
                                            <li>
                                                {course_link(course, link)}
                                                {provider.map(|p| view! { <span class="kpi-caption">{format!(" ({p})")}</span> })}
                                            </li>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </ul>
                    </div>
                </Show>
            </section>
        </div>
    }
}
