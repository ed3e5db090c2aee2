//! Four-step "new project" wizard modal.
//!
//! DESIGN
//! ======
//! All state lives in one `RwSignal<WizardState>` owned by the projects page;
//! this component only renders it and forwards edits. Step, error map, and row
//! counts are read through memos so typing into one field does not rebuild
//! the step and steal focus.

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::field_error::FieldError;
use crate::net::api::{create_project, fetch_employees, suggest_team};
use crate::net::types::{Employee, ProjectStatus};
use crate::state::roles::ROLE_CATALOGUE;
use crate::state::wizard::{
    AllocationDraft, PERCENT_FIELDS, ProjectDetailsForm, WizardState, WizardStep, normalize_tags,
};
use crate::util::browser::spawn;
use crate::util::format::{EMPTY, money, or_dash};
use crate::util::validation::{FieldErrors, parse_number};

type DetailGet = fn(&ProjectDetailsForm) -> &str;
type DetailSet = fn(&mut ProjectDetailsForm, String);

fn edit_row(wizard: RwSignal<WizardState>, index: usize, edit: impl FnOnce(&mut AllocationDraft)) {
    wizard.update(|w| {
        if let Some(row) = w.allocations.get_mut(index) {
            edit(row);
        }
    });
}

fn row_value<T: Default>(wizard: RwSignal<WizardState>, index: usize, read: impl FnOnce(&AllocationDraft) -> T) -> T {
    wizard.with(|w| w.allocations.get(index).map(read).unwrap_or_default())
}

#[component]
pub fn ProjectWizard(
    wizard: RwSignal<WizardState>,
    /// Runs after the backend accepted the project, with its id when returned.
    on_created: Callback<Option<i64>>,
) -> impl IntoView {
    let step = Memo::new(move |_| wizard.with(|w| w.step));
    let errors: Signal<FieldErrors> = Memo::new(move |_| wizard.with(|w| w.errors.clone())).into();
    let employees = RwSignal::new(Vec::<Employee>::new());

    spawn(async move {
        match fetch_employees(None, None, "").await {
            Ok(list) => employees.set(list.employees),
            Err(err) => leptos::logging::warn!("employee picker load failed: {err}"),
        }
    });

    let on_next = move |_| {
        wizard.update(|w| {
            w.advance();
        });
    };
    let on_back = move |_| {
        wizard.update(|w| {
            w.back();
        });
    };
    let on_submit = move |_| {
        let Some(payload) = wizard.try_update(WizardState::begin_submit).flatten() else {
            return;
        };
        spawn(async move {
            let result = create_project(&payload).await;
            let created = result.is_ok();
            if let Err(err) = &result {
                leptos::logging::warn!("project create failed: {err}");
            }
            let project_id = wizard.try_update(|w| w.finish_submit(result)).flatten();
            if created {
                on_created.run(project_id);
            }
        });
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| wizard.update(WizardState::request_cancel)>
            <div
                class="dialog dialog--wizard"
                role="dialog"
                aria-modal="true"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        ev.prevent_default();
                        wizard.update(WizardState::request_cancel);
                    }
                }
            >
                <h2>"New project"</h2>
                <ol class="wizard__steps">
                    {WizardStep::ALL
                        .iter()
                        .map(|&s| {
                            let class = move || {
                                let current = step.get();
                                if s == current {
                                    "wizard__step wizard__step--active"
                                } else if s.number() < current.number() {
                                    "wizard__step wizard__step--done"
                                } else {
                                    "wizard__step"
                                }
                            };
                            view! {
                                <li class=class>
                                    <span class="wizard__step-number">{s.number()}</span>
                                    <span>{s.title()}</span>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()}
                </ol>

                <div class="wizard__body">
                    {move || match step.get() {
                        WizardStep::Details => view! { <DetailsStep wizard=wizard errors=errors/> }.into_any(),
                        WizardStep::Structure => view! { <StructureStep wizard=wizard errors=errors/> }.into_any(),
                        WizardStep::Allotment => {
                            view! { <AllotmentStep wizard=wizard errors=errors employees=employees/> }.into_any()
                        }
                        WizardStep::Review => view! { <ReviewStep wizard=wizard/> }.into_any(),
                    }}
                </div>

                <FieldError errors=errors key="form"/>
                {move || {
                    wizard
                        .with(|w| w.submit_error.clone())
                        .map(|message| view! { <p class="dialog__error" role="alert">{message}</p> })
                }}

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| wizard.update(WizardState::request_cancel)>
                        "Cancel"
                    </button>
                    <Show when=move || step.get().prev().is_some()>
                        <button class="btn" on:click=on_back>"Back"</button>
                    </Show>
                    <Show
                        when=move || step.get() == WizardStep::Review
                        fallback=move || view! { <button class="btn btn--primary" on:click=on_next>"Next"</button> }
                    >
                        <button
                            class="btn btn--primary"
                            disabled=move || wizard.with(|w| w.submitting)
                            on:click=on_submit
                        >
                            {move || if wizard.with(|w| w.submitting) { "Creating…" } else { "Create project" }}
                        </button>
                    </Show>
                </div>
            </div>

            <Show when=move || wizard.with(|w| w.confirm_cancel)>
                <ConfirmDialog
                    title="Discard this project?"
                    message="Everything entered in the wizard will be lost."
                    confirm_label="Discard"
                    cancel_label="Keep editing"
                    danger=true
                    on_confirm=Callback::new(move |()| {
                        wizard.update(|w| {
                            w.confirm_cancel();
                        });
                    })
                    on_cancel=Callback::new(move |()| wizard.update(WizardState::keep_editing))
                />
            </Show>
        </div>
    }
}

// =============================================================================
// STEP 1: DETAILS
// =============================================================================

fn detail_field(
    wizard: RwSignal<WizardState>,
    errors: Signal<FieldErrors>,
    key: &'static str,
    label: &'static str,
    input_type: &'static str,
    get: DetailGet,
    set: DetailSet,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            <input
                type=input_type
                prop:value=move || wizard.with(|w| get(&w.details).to_owned())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    wizard.update(|w| set(&mut w.details, value));
                }
            />
            <FieldError errors=errors key=key/>
        </label>
    }
}

#[component]
fn DetailsStep(wizard: RwSignal<WizardState>, errors: Signal<FieldErrors>) -> impl IntoView {
    view! {
        <div class="form-grid">
            {detail_field(wizard, errors, "client_name", "Client", "text", |d| d.client_name.as_str(), |d, v| d.client_name = v)}
            {detail_field(wizard, errors, "project_name", "Project name", "text", |d| d.project_name.as_str(), |d, v| d.project_name = v)}
            {detail_field(wizard, errors, "project_type", "Project type", "text", |d| d.project_type.as_str(), |d, v| d.project_type = v)}
            <label class="field">
                <span class="field__label">"Status"</span>
                <select
                    prop:value=move || wizard.with(|w| w.details.status.as_str())
                    on:change=move |ev| {
                        if let Some(status) = ProjectStatus::parse(&event_target_value(&ev)) {
                            wizard.update(|w| w.details.status = status);
                        }
                    }
                >
                    {ProjectStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            {detail_field(wizard, errors, "start_date", "Start date", "date", |d| d.start_date.as_str(), |d, v| d.start_date = v)}
            {detail_field(wizard, errors, "end_date", "End date", "date", |d| d.end_date.as_str(), |d, v| d.end_date = v)}
            {detail_field(wizard, errors, "probability", "Win probability (%)", "number", |d| d.probability.as_str(), |d, v| d.probability = v)}
            {detail_field(wizard, errors, "budget_cap", "Budget cap", "number", |d| d.budget_cap.as_str(), |d, v| d.budget_cap = v)}
            <label class="field field--wide">
                <span class="field__label">"Tech stack"</span>
                <input
                    type="text"
                    placeholder="Rust, Postgres, React"
                    prop:value=move || wizard.with(|w| w.details.tech_stack.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        wizard.update(|w| w.details.tech_stack = value);
                    }
                    on:blur=move |_| wizard.update(|w| w.details.tech_stack = normalize_tags(&w.details.tech_stack))
                />
                <FieldError errors=errors key="tech_stack"/>
            </label>
            <label class="field field--wide">
                <span class="field__label">"Description"</span>
                <textarea
                    rows="4"
                    prop:value=move || wizard.with(|w| w.details.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        wizard.update(|w| w.details.description = value);
                    }
                ></textarea>
                <FieldError errors=errors key="description"/>
            </label>
        </div>
    }
}

// =============================================================================
// STEP 2: TEAM STRUCTURE
// =============================================================================

#[component]
fn StructureStep(wizard: RwSignal<WizardState>, errors: Signal<FieldErrors>) -> impl IntoView {
    let role_count = Memo::new(move |_| wizard.with(|w| w.roles.len()));

    let role_row = move |i: usize| {
        let role = move || wizard.with(|w| w.roles.get(i).cloned().unwrap_or_default());
        view! {
            <tr>
                <td>
                    <input
                        type="text"
                        list="role-catalogue"
                        placeholder="Role"
                        prop:value=move || role().role_name
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| {
                                if let Some(r) = w.roles.get_mut(i) {
                                    r.select_role(&value);
                                }
                            });
                        }
                    />
                    <FieldError errors=errors key=format!("roles.{i}.role_name")/>
                </td>
                <td>
                    <input
                        type="number"
                        min="1"
                        prop:value=move || {
                            let r = role();
                            r.rejected.text("required_count", r.required_count)
                        }
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            wizard.update(|w| {
                                if let Some(r) = w.roles.get_mut(i) {
                                    r.set_required_count(&raw);
                                }
                            });
                        }
                    />
                    <FieldError errors=errors key=format!("roles.{i}.required_count")/>
                </td>
                <td>
                    <input
                        type="number"
                        min="1"
                        max="100"
                        prop:value=move || {
                            let r = role();
                            r.rejected.text("utilization", r.utilization)
                        }
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            wizard.update(|w| {
                                if let Some(r) = w.roles.get_mut(i) {
                                    r.set_utilization(&raw);
                                }
                            });
                        }
                    />
                    <FieldError errors=errors key=format!("roles.{i}.utilization")/>
                </td>
                <td>
                    <button class="btn btn--ghost" title="Remove role" on:click=move |_| wizard.update(|w| w.remove_role(i))>
                        "×"
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <datalist id="role-catalogue">
            {ROLE_CATALOGUE.iter().map(|r| view! { <option value=r.name></option> }).collect::<Vec<_>>()}
        </datalist>
        <table class="table table--form">
            <thead>
                <tr>
                    <th>"Role"</th>
                    <th>"Headcount"</th>
                    <th>"Utilization %"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>{move || (0..role_count.get()).map(role_row).collect::<Vec<_>>()}</tbody>
        </table>
        <FieldError errors=errors key="roles"/>
        <button class="btn" on:click=move |_| wizard.update(WizardState::add_role)>"+ Add role"</button>
    }
}

// =============================================================================
// STEP 3: ALLOTMENT
// =============================================================================

#[component]
fn AllotmentStep(
    wizard: RwSignal<WizardState>,
    errors: Signal<FieldErrors>,
    employees: RwSignal<Vec<Employee>>,
) -> impl IntoView {
    let row_count = Memo::new(move |_| wizard.with(|w| w.allocations.len()));
    let role_names = Memo::new(move |_| {
        wizard.with(|w| w.roles.iter().map(|r| r.role_name.trim().to_owned()).filter(|n| !n.is_empty()).collect::<Vec<_>>())
    });

    let on_suggest = move |_| {
        let request = wizard
            .try_update(|w| {
                if w.suggesting {
                    return None;
                }
                let request = w.suggestion_request()?;
                w.suggesting = true;
                w.notice = None;
                Some(request)
            })
            .flatten();
        let Some(request) = request else {
            return;
        };
        spawn(async move {
            let result = suggest_team(&request).await.map(|r| r.suggestions);
            wizard.update(|w| w.apply_suggestions(result));
        });
    };

    let allocation_row = move |i: usize| {
        let key = move |field: &str| format!("allocations.{i}.{field}");
        let pct_input = move |field: &'static str| {
            view! {
                <td>
                    <input
                        type="number"
                        min="0"
                        max="100"
                        prop:value=move || row_value(wizard, i, |r| r.percentage_text(field))
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            edit_row(wizard, i, |r| r.set_percentage(field, &raw));
                        }
                    />
                    <FieldError errors=errors key=key(field)/>
                </td>
            }
        };
        view! {
            <tr>
                <td>
                    {move || row_value(wizard, i, |r| r.role_name.clone())}
                    {move || {
                        row_value(wizard, i, |r| r.rationale.clone())
                            .map(|why| {
                                let title = why.clone();
                                view! { <p class="wizard__rationale" title=title>{why}</p> }
                            })
                    }}
                </td>
                <td>
                    <select
                        prop:value=move || row_value(wizard, i, |r| r.employee_id.map(|id| id.to_string()).unwrap_or_default())
                        on:change=move |ev| {
                            let id = event_target_value(&ev).parse::<i64>().ok();
                            let name = id
                                .and_then(|id| employees.with(|list| list.iter().find(|e| e.id == id).map(Employee::full_name)))
                                .unwrap_or_default();
                            edit_row(wizard, i, |r| {
                                r.employee_id = id;
                                r.employee_name = name;
                                r.rationale = None;
                            });
                        }
                    >
                        <option value="">"Select employee"</option>
                        {move || {
                            let assigned = row_value(wizard, i, |r| r.employee_id.zip(Some(r.employee_name.clone())));
                            let mut options: Vec<(i64, String)> =
                                employees.with(|list| list.iter().map(|e| (e.id, e.full_name())).collect());
                            if let Some((id, name)) = assigned {
                                if !options.iter().any(|(known, _)| *known == id) {
                                    options.push((id, name));
                                }
                            }
                            options
                                .into_iter()
                                .map(|(id, name)| view! { <option value=id.to_string()>{name}</option> })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                    <FieldError errors=errors key=key("employee_id")/>
                </td>
                <td>
                    <input
                        type="date"
                        prop:value=move || row_value(wizard, i, |r| r.start_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_row(wizard, i, |r| r.start_date = value);
                        }
                    />
                    <FieldError errors=errors key=key("start_date")/>
                </td>
                <td>
                    <input
                        type="date"
                        prop:value=move || row_value(wizard, i, |r| r.end_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_row(wizard, i, |r| r.end_date = value);
                        }
                    />
                    <FieldError errors=errors key=key("end_date")/>
                </td>
                {PERCENT_FIELDS.into_iter().map(pct_input).collect::<Vec<_>>()}
                <td>
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        prop:value=move || row_value(wizard, i, |r| r.billing_rate.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_row(wizard, i, |r| r.billing_rate = value);
                        }
                    />
                    <FieldError errors=errors key=key("billing_rate")/>
                </td>
                <td>
                    <input
                        type="checkbox"
                        prop:checked=move || row_value(wizard, i, |r| r.is_trainee)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            edit_row(wizard, i, |r| {
                                r.is_trainee = checked;
                                if !checked {
                                    r.mentor_employee_id = None;
                                }
                            });
                        }
                    />
                </td>
                <td>
                    <Show when=move || row_value(wizard, i, |r| r.is_trainee)>
                        <select
                            prop:value=move || {
                                row_value(wizard, i, |r| r.mentor_employee_id.map(|id| id.to_string()).unwrap_or_default())
                            }
                            on:change=move |ev| {
                                let mentor = event_target_value(&ev).parse::<i64>().ok();
                                edit_row(wizard, i, |r| r.mentor_employee_id = mentor);
                            }
                        >
                            <option value="">"Select mentor"</option>
                            {move || {
                                let own = row_value(wizard, i, |r| r.employee_id);
                                wizard
                                    .with(WizardState::mentor_candidates)
                                    .into_iter()
                                    .filter(|(id, _)| Some(*id) != own)
                                    .map(|(id, name)| view! { <option value=id.to_string()>{name}</option> })
                                    .collect::<Vec<_>>()
                            }}
                        </select>
                    </Show>
                    <FieldError errors=errors key=key("mentor_employee_id")/>
                </td>
                <td>
                    <button
                        class="btn btn--ghost"
                        title="Remove row"
                        on:click=move |_| wizard.update(|w| w.remove_allocation_row(i))
                    >
                        "×"
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="wizard__toolbar">
            <button
                class="btn btn--accent"
                disabled=move || wizard.with(|w| w.suggesting)
                on:click=on_suggest
            >
                {move || if wizard.with(|w| w.suggesting) { "Asking AI…" } else { "✦ Suggest team" }}
            </button>
            {move || {
                wizard.with(|w| w.notice.clone()).map(|notice| view! { <span class="wizard__notice">{notice}</span> })
            }}
        </div>
        <div class="table-scroll">
            <table class="table table--form">
                <thead>
                    <tr>
                        <th>"Role"</th>
                        <th>"Employee"</th>
                        <th>"Start"</th>
                        <th>"End"</th>
                        <th>"Alloc %"</th>
                        <th>"Internal %"</th>
                        <th>"Billable %"</th>
                        <th>"Rate"</th>
                        <th>"Trainee"</th>
                        <th>"Mentor"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{move || (0..row_count.get()).map(allocation_row).collect::<Vec<_>>()}</tbody>
            </table>
        </div>
        <div class="wizard__add-rows">
            {move || {
                role_names
                    .get()
                    .into_iter()
                    .map(|name| {
                        let label = format!("+ {name}");
                        view! {
                            <button class="btn btn--ghost" on:click=move |_| wizard.update(|w| w.add_allocation_row(&name))>
                                {label}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

// =============================================================================
// STEP 4: REVIEW
// =============================================================================

#[component]
fn ReviewStep(wizard: RwSignal<WizardState>) -> impl IntoView {
    let snapshot = move || wizard.get();

    view! {
        {move || {
            let w = snapshot();
            let d = w.details;
            let budget = parse_number(&d.budget_cap).and_then(Result::ok).map(|b| money(b, "USD"));
            view! {
                <section class="review">
                    <h3>"Details"</h3>
                    <dl class="review__details">
                        <dt>"Client"</dt>
                        <dd>{d.client_name}</dd>
                        <dt>"Project"</dt>
                        <dd>{d.project_name}</dd>
                        <dt>"Type"</dt>
                        <dd>{or_dash(Some(&d.project_type))}</dd>
                        <dt>"Status"</dt>
                        <dd>{d.status.label()}</dd>
                        <dt>"Dates"</dt>
                        <dd>{format!("{} → {}", d.start_date, or_dash(Some(&d.end_date)))}</dd>
                        <dt>"Probability"</dt>
                        <dd>{or_dash(Some(&d.probability))}</dd>
                        <dt>"Budget"</dt>
                        <dd>{budget.unwrap_or_else(|| EMPTY.to_owned())}</dd>
                        <dt>"Tech stack"</dt>
                        <dd>{or_dash(Some(&d.tech_stack))}</dd>
                    </dl>
                    <h3>"Team structure"</h3>
                    <ul class="review__roles">
                        {w.roles
                            .into_iter()
                            .map(|r| {
                                view! {
                                    <li>{format!("{} × {} at {}%", r.required_count, r.role_name, r.utilization)}</li>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </ul>
                    <h3>"Assignments"</h3>
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Role"</th>
                                <th>"Employee"</th>
                                <th>"Alloc %"</th>
                                <th>"Billable %"</th>
                                <th>"Trainee"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {w.allocations
                                .into_iter()
                                .map(|a| {
                                    view! {
                                        <tr>
                                            <td>{a.role_name}</td>
                                            <td>{or_dash(Some(&a.employee_name))}</td>
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
        }}
    }
}
