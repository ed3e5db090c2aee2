//! Allocation report: query form, sortable/filterable snapshot, totals.
//!
//! Sorting and filtering never hit the backend; they run over the last
//! snapshot held in `ReportState`.

use leptos::prelude::*;

use crate::components::field_error::FieldError;
use crate::net::api::{allocation_report_export_endpoint, fetch_allocation_report, fetch_projects};
use crate::net::types::{Project, ReportRow};
use crate::state::reports::{ReportLevel, ReportState, ReportType, ReportView, SortColumn, UtilizationStatus};
use crate::util::browser::spawn;
use crate::util::format::{group_thousands, or_dash, percent};
use crate::util::validation::FieldErrors;

fn cell(column: SortColumn, row: &ReportRow) -> String {
    match column {
        SortColumn::EmployeeName => row.employee_name.clone(),
        SortColumn::Email => row.email.clone(),
        SortColumn::Role => or_dash(row.role.as_deref()),
        SortColumn::ProjectName => or_dash(Some(&row.project_name)),
        SortColumn::ClientName => or_dash(Some(&row.client_name)),
        SortColumn::StartDate => or_dash(row.start_date.as_deref()),
        SortColumn::EndDate => or_dash(row.end_date.as_deref()),
        SortColumn::AllocationPercentage => percent(row.allocation_percentage),
        SortColumn::BillablePercentage => percent(row.billable_percentage),
        SortColumn::MonthlyHours => group_thousands(row.monthly_hours),
        SortColumn::BillableHours => group_thousands(row.billable_hours),
        SortColumn::HourlyRate => group_thousands(row.hourly_rate),
        SortColumn::MonthlyAmount => group_thousands(row.monthly_amount),
        SortColumn::Utilization => UtilizationStatus::of(row).label().to_owned(),
    }
}

fn optional(raw: String) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_owned())
}

#[component]
pub fn AllocationReportPage() -> impl IntoView {
    let state = RwSignal::new(ReportState::default());
    let projects = RwSignal::new(Vec::<Project>::new());
    let errors: Signal<FieldErrors> = Memo::new(move |_| state.with(|s| s.errors.clone())).into();

    spawn(async move {
        match fetch_projects().await {
            Ok(list) => projects.set(list.projects),
            Err(err) => leptos::logging::warn!("report project list failed: {err}"),
        }
    });

    let generate = move || {
        let Some((seq, query)) = state.try_update(ReportState::begin_fetch).flatten() else {
            return;
        };
        spawn(async move {
            let result = fetch_allocation_report(&query).await;
            if let Err(err) = &result {
                leptos::logging::warn!("allocation report failed: {err}");
            }
            state.try_update(|s| s.finish_fetch(seq, result));
        });
    };
    generate();

    let visible_rows = Memo::new(move |_| {
        state.with(|s| {
            s.report
                .as_ref()
                .map(|r| s.view.visible(&r.resources).into_iter().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="report-page">
            <header class="page-header toolbar">
                <h1 class="page-header__title">"Allocation report"</h1>
            </header>

            <form
                class="filters report-page__query"
                on:submit=move |ev| {
                    ev.prevent_default();
                    generate();
                }
            >
                <label class="field">
                    <span class="field__label">"Report"</span>
                    <select
                        prop:value=move || state.with(|s| s.query.report_type.as_str())
                        on:change=move |ev| {
                            if let Some(kind) = ReportType::parse(&event_target_value(&ev)) {
                                state.update(|s| s.query.report_type = kind);
                            }
                        }
                    >
                        {ReportType::ALL
                            .iter()
                            .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
                <label class="field">
                    <span class="field__label">"Level"</span>
                    <select
                        prop:value=move || state.with(|s| s.query.level.as_str())
                        on:change=move |ev| {
                            if let Some(level) = ReportLevel::parse(&event_target_value(&ev)) {
                                state.update(|s| {
                                    s.query.level = level;
                                    if level == ReportLevel::Overall {
                                        s.query.project_id = None;
                                    }
                                });
                            }
                        }
                    >
                        {ReportLevel::ALL
                            .iter()
                            .map(|l| view! { <option value=l.as_str()>{l.label()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
                <Show when=move || state.with(|s| s.query.level == ReportLevel::Project)>
                    <label class="field">
                        <span class="field__label">"Project"</span>
                        <select
                            prop:value=move || state.with(|s| s.query.project_id.map(|id| id.to_string()).unwrap_or_default())
                            on:change=move |ev| {
                                let id = event_target_value(&ev).parse::<i64>().ok();
                                state.update(|s| s.query.project_id = id);
                            }
                        >
                            <option value="">"Select project"</option>
                            {move || {
                                projects
                                    .get()
                                    .into_iter()
                                    .map(|p| view! { <option value=p.id.to_string()>{p.project_name}</option> })
                                    .collect::<Vec<_>>()
                            }}
                        </select>
                        <FieldError errors=errors key="project_id"/>
                    </label>
                </Show>
                <label class="field">
                    <span class="field__label">"From"</span>
                    <input
                        type="date"
                        prop:value=move || state.with(|s| s.query.start_date.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let value = optional(event_target_value(&ev));
                            state.update(|s| s.query.start_date = value);
                        }
                    />
                    <FieldError errors=errors key="start_date"/>
                </label>
                <label class="field">
                    <span class="field__label">"To"</span>
                    <input
                        type="date"
                        prop:value=move || state.with(|s| s.query.end_date.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let value = optional(event_target_value(&ev));
                            state.update(|s| s.query.end_date = value);
                        }
                    />
                    <FieldError errors=errors key="end_date"/>
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || state.with(|s| s.loading)>
                    {move || if state.with(|s| s.loading) { "Generating…" } else { "Generate" }}
                </button>
                {move || {
                    state
                        .with(|s| s.query.validate().is_empty().then(|| allocation_report_export_endpoint(&s.query)))
                        .map(|href| view! { <a class="btn" href=href download="">"Export to Excel"</a> })
                }}
            </form>

            {move || {
                state
                    .with(|s| s.error.clone())
                    .map(|message| view! { <p class="page-error" role="alert">{message}</p> })
            }}

            <Show when=move || state.with(|s| s.report.is_some())>
                {move || {
                    state
                        .with(|s| s.report.as_ref().map(|r| (r.summary.clone(), r.reporting_period.clone())))
                        .map(|(summary, period)| {
                            view! {
                                <section class="card report-page__summary">
                                    {period
                                        .map(|p| {
                                            view! {
                                                <p class="kpi-caption">{format!("{} → {}", p.start_date, p.end_date)}</p>
                                            }
                                        })}
                                    <dl class="kpi-list">
                                        <dt>"Resources"</dt>
                                        <dd>{summary.total_resources}</dd>
                                        <dt>"Monthly hours"</dt>
                                        <dd>{group_thousands(summary.total_monthly_hours)}</dd>
                                        <dt>"Billable hours"</dt>
                                        <dd>{group_thousands(summary.total_billable_hours)}</dd>
                                        <dt>"Monthly amount"</dt>
                                        <dd>{group_thousands(summary.total_monthly_amount)}</dd>
                                        <dt>"Avg allocation"</dt>
                                        <dd>{percent(summary.average_allocation_percentage)}</dd>
                                        <dt>"Avg billable"</dt>
                                        <dd>{percent(summary.average_billable_percentage)}</dd>
                                    </dl>
                                </section>
                            }
                        })
                }}

                <div class="filters">
                    <input
                        type="search"
                        placeholder="Filter by name, email, project, skill"
                        prop:value=move || state.with(|s| s.view.search.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            state.update(|s| s.view.search = text);
                        }
                    />
                    <select
                        on:change=move |ev| {
                            let status = UtilizationStatus::parse(&event_target_value(&ev));
                            state.update(|s| s.view.utilization = status);
                        }
                    >
                        <option value="">"All utilization"</option>
                        {UtilizationStatus::ALL
                            .iter()
                            .map(|u| view! { <option value=u.label()>{u.label()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </div>

                <div class="table-scroll">
                    <table class="table table--report">
                        <thead>
                            <tr>
                                {SortColumn::ALL
                                    .iter()
                                    .map(|&column| {
                                        let label = move || {
                                            state.with(|s| {
                                                if s.view.sort_by == column {
                                                    format!("{} {}", column.header(), s.view.direction.arrow())
                                                } else {
                                                    column.header().to_owned()
                                                }
                                            })
                                        };
                                        view! {
                                            <th
                                                class="table__sortable"
                                                on:click=move |_| state.update(|s| s.view.toggle_sort(column))
                                            >
                                                {label}
                                            </th>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                visible_rows
                                    .get()
                                    .into_iter()
                                    .map(|row| {
                                        let status_class = match UtilizationStatus::of(&row) {
                                            UtilizationStatus::UnderUtilized => "report-row report-row--under",
                                            UtilizationStatus::Optimal => "report-row",
                                            UtilizationStatus::OverAllocated => "report-row report-row--over",
                                        };
                                        view! {
                                            <tr class=status_class>
                                                {SortColumn::ALL
                                                    .iter()
                                                    .map(|&column| view! { <td>{cell(column, &row)}</td> })
                                                    .collect::<Vec<_>>()}
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                        <tfoot>
                            {move || {
                                let totals = visible_rows.with(|rows| ReportView::totals(&rows.iter().collect::<Vec<_>>()));
                                view! {
                                    <tr class="table__totals">
                                        <td colspan="9">{format!("{} rows shown", totals.rows)}</td>
                                        <td>{group_thousands(totals.monthly_hours)}</td>
                                        <td>{group_thousands(totals.billable_hours)}</td>
                                        <td></td>
                                        <td>{group_thousands(totals.monthly_amount)}</td>
                                        <td></td>
                                    </tr>
                                }
                            }}
                        </tfoot>
                    </table>
                </div>
            </Show>
        </div>
    }
}
