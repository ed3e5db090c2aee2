//! Employee directory with filters, debounced search, and per-row actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Filters are restored from `localStorage` on mount and saved whenever a
//! list request is issued. Each request is stamped by `DirectoryState`, so a
//! slow response to an older filter set never overwrites a newer one.

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::employee_modals::{EmployeeFormModal, RiskModal, SkillModal};
use crate::net::api::{delete_employee, fetch_employee, fetch_employees};
use crate::net::types::{Employee, EmployeeStatus, RoleLevel};
use crate::state::directory::{DirectoryFilters, DirectoryState, FILTER_STORAGE_KEY, SEARCH_DEBOUNCE_MS};
use crate::state::employee_forms::EmployeeForm;
use crate::state::ui::{NoticeKind, UiState};
use crate::util::browser::{sleep_ms, spawn};
use crate::util::format::{money, or_dash, percent};
use crate::util::ui_persistence::{load_json, save_json};

#[derive(Clone, Debug)]
enum Modal {
    Edit(EmployeeForm),
    Skill { id: i64, name: String },
    Risk { id: i64, name: String },
    Delete { id: i64, name: String },
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let filters = load_json::<DirectoryFilters>(FILTER_STORAGE_KEY).unwrap_or_default();
    let directory = RwSignal::new(DirectoryState::with_filters(filters));
    let modal = RwSignal::new(None::<Modal>);

    let refresh = move || {
        let Some((seq, filters)) = directory.try_update(DirectoryState::begin_fetch) else {
            return;
        };
        save_json(FILTER_STORAGE_KEY, &filters);
        spawn(async move {
            let result = fetch_employees(filters.status, filters.role_level, &filters.search).await;
            if let Err(err) = &result {
                leptos::logging::warn!("employee list failed: {err}");
            }
            directory.try_update(|d| d.finish_fetch(seq, result));
        });
    };
    refresh();

    let on_search = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        let Some(ticket) = directory.try_update(|d| d.set_search(&text)) else {
            return;
        };
        spawn(async move {
            sleep_ms(SEARCH_DEBOUNCE_MS).await;
            if directory.try_with_untracked(|d| d.search_settled(ticket)).unwrap_or(false) {
                refresh();
            }
        });
    };

    let close = Callback::new(move |()| modal.set(None));

    let on_form_saved = move |employee_id: Option<i64>| {
        modal.set(None);
        let Some(id) = employee_id else {
            ui.update(|u| {
                u.notify(NoticeKind::Success, "Employee added");
            });
            refresh();
            return;
        };
        ui.update(|u| {
            u.notify(NoticeKind::Success, "Employee updated");
        });
        spawn(async move {
            match fetch_employee(id).await {
                Ok(employee) => directory.update(|d| d.replace(employee)),
                Err(_) => refresh(),
            }
        });
    };

    let on_delete = move |id: i64, name: String| {
        modal.set(None);
        spawn(async move {
            match delete_employee(id).await {
                Ok(()) => {
                    directory.update(|d| d.remove(id));
                    ui.update(|u| {
                        u.notify(NoticeKind::Success, format!("{name} was removed"));
                    });
                }
                Err(err) => ui.update(|u| {
                    u.notify(NoticeKind::Error, err.user_message());
                }),
            }
        });
    };

    let employee_row = move |employee: Employee| {
        let id = employee.id;
        let name = employee.full_name();
        let form = EmployeeForm::from_employee(&employee);
        let (skill_name, risk_name, delete_name) = (name.clone(), name.clone(), name.clone());
        let status_class = match employee.status {
            Some(EmployeeStatus::Bench) => "badge badge--bench",
            Some(EmployeeStatus::Allocated) => "badge badge--ok",
            Some(EmployeeStatus::NoticePeriod) => "badge badge--warn",
            None => "badge",
        };
        let ctc = employee
            .ctc_monthly
            .map(|ctc| money(ctc, employee.currency.as_deref().unwrap_or("USD")));
        view! {
            <tr>
                <td>
                    <span class="directory__name">{name}</span>
                    <span class="directory__email">{employee.email.clone()}</span>
                </td>
                <td>{employee.role_level.map_or("—", RoleLevel::label)}</td>
                <td>
                    <span class=status_class>{employee.status.map_or("—", EmployeeStatus::label)}</span>
                </td>
                <td>{or_dash(employee.base_location.as_deref())}</td>
                <td>{employee.skills_count}</td>
                <td>{employee.current_allocation_percentage.map_or_else(|| "—".to_owned(), percent)}</td>
                <td>{or_dash(ctc.as_deref())}</td>
                <td class="directory__actions">
                    <button class="btn btn--ghost" on:click=move |_| modal.set(Some(Modal::Edit(form.clone())))>
                        "Edit"
                    </button>
                    <button
                        class="btn btn--ghost"
                        on:click=move |_| modal.set(Some(Modal::Skill { id, name: skill_name.clone() }))
                    >
                        "+ Skill"
                    </button>
                    <button
                        class="btn btn--ghost"
                        on:click=move |_| modal.set(Some(Modal::Risk { id, name: risk_name.clone() }))
                    >
                        "Flag risk"
                    </button>
                    <button
                        class="btn btn--ghost btn--danger-text"
                        on:click=move |_| modal.set(Some(Modal::Delete { id, name: delete_name.clone() }))
                    >
                        "Delete"
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="employees-page">
            <header class="page-header toolbar">
                <h1 class="page-header__title">"Employees"</h1>
                <span class="toolbar__spacer"></span>
                <button
                    class="btn btn--primary"
                    on:click=move |_| modal.set(Some(Modal::Edit(EmployeeForm::default())))
                >
                    "+ Add employee"
                </button>
            </header>

            <div class="filters">
                <input
                    class="filters__search"
                    type="search"
                    placeholder="Search name, email, skill"
                    prop:value=move || directory.with(|d| d.filters.search.clone())
                    on:input=on_search
                />
                <select
                    prop:value=move || directory.with(|d| d.filters.status.map_or("", EmployeeStatus::as_str))
                    on:change=move |ev| {
                        let status = EmployeeStatus::parse(&event_target_value(&ev));
                        directory.update(|d| d.set_status(status));
                        refresh();
                    }
                >
                    <option value="">"All statuses"</option>
                    {EmployeeStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <select
                    prop:value=move || directory.with(|d| d.filters.role_level.map_or("", RoleLevel::as_str))
                    on:change=move |ev| {
                        let level = RoleLevel::parse(&event_target_value(&ev));
                        directory.update(|d| d.set_role_level(level));
                        refresh();
                    }
                >
                    <option value="">"All levels"</option>
                    {RoleLevel::ALL
                        .iter()
                        .map(|l| view! { <option value=l.as_str()>{l.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <Show when=move || directory.with(|d| d.filters.is_filtered())>
                    <button
                        class="btn btn--ghost"
                        on:click=move |_| {
                            directory.update(DirectoryState::clear_filters);
                            refresh();
                        }
                    >
                        "Clear filters"
                    </button>
                </Show>
            </div>

            <ul class="status-chips">
                {move || {
                    directory
                        .with(DirectoryState::status_counts)
                        .into_iter()
                        .map(|(status, count)| view! { <li class="chip">{format!("{}: {count}", status.label())}</li> })
                        .collect::<Vec<_>>()
                }}
            </ul>

            {move || {
                directory
                    .with(|d| d.error.clone())
                    .map(|message| view! { <p class="page-error" role="alert">{message}</p> })
            }}

            <table class="table directory">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Level"</th>
                        <th>"Status"</th>
                        <th>"Location"</th>
                        <th>"Skills"</th>
                        <th>"Allocated"</th>
                        <th>"Monthly CTC"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let (loading, employees) = directory.with(|d| (d.loading, d.employees.clone()));
                        if employees.is_empty() {
                            let text = if loading { "Loading employees…" } else { "No employees match these filters." };
                            return view! {
                                <tr>
                                    <td colspan="8" class="table__empty">{text}</td>
                                </tr>
                            }
                                .into_any();
                        }
                        employees.into_iter().map(employee_row).collect::<Vec<_>>().into_any()
                    }}
                </tbody>
            </table>

            {move || {
                modal
                    .get()
                    .map(|current| match current {
                        Modal::Edit(form) => {
                            let employee_id = form.employee_id;
                            view! {
                                <EmployeeFormModal
                                    form=form
                                    on_close=close
                                    on_saved=Callback::new(move |()| on_form_saved(employee_id))
                                />
                            }
                                .into_any()
                        }
                        Modal::Skill { id, name } => {
                            view! {
                                <SkillModal
                                    employee_id=id
                                    employee_name=name
                                    on_close=close
                                    on_saved=Callback::new(move |()| {
                                        modal.set(None);
                                        ui.update(|u| {
                                            u.notify(NoticeKind::Success, "Skill added");
                                        });
                                        refresh();
                                    })
                                />
                            }
                                .into_any()
                        }
                        Modal::Risk { id, name } => {
                            view! {
                                <RiskModal
                                    employee_id=id
                                    employee_name=name
                                    on_close=close
                                    on_saved=Callback::new(move |()| {
                                        modal.set(None);
                                        ui.update(|u| {
                                            u.notify(NoticeKind::Success, "Risk raised");
                                        });
                                    })
                                />
                            }
                                .into_any()
                        }
                        Modal::Delete { id, name } => {
                            let message = format!("{name} will be permanently removed from the directory.");
                            view! {
                                <ConfirmDialog
                                    title="Delete employee?"
                                    message=message
                                    confirm_label="Delete"
                                    danger=true
                                    on_confirm=Callback::new(move |()| on_delete(id, name.clone()))
                                    on_cancel=close
                                />
                            }
                                .into_any()
                        }
                    })
            }}
        </div>
    }
}
