//! Employee create/edit, add-skill, and raise-risk modals.
//!
//! Each modal owns its form signal, validates locally on submit, and only
//! calls `on_saved` once the backend accepted the request. Backend failures
//! stay inside the modal so nothing typed is lost.

use leptos::prelude::*;

use crate::components::field_error::FieldError;
use crate::net::api::{add_skill, create_employee, fetch_employees, fetch_projects, raise_risk, update_employee};
use crate::net::types::{Employee, EmployeeStatus, Project, RiskSeverity, RiskType, RoleLevel};
use crate::state::employee_forms::{EmployeeForm, MAX_PROFICIENCY, MIN_PROFICIENCY, RiskForm, SkillForm};
use crate::util::browser::spawn;
use crate::util::dates::today;
use crate::util::validation::FieldErrors;

/// Shared dialog chrome: backdrop, Escape to close, action row.
#[component]
fn ModalFrame(
    #[prop(into)] title: String,
    #[prop(into)] submit_label: String,
    busy: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    on_close: Callback<()>,
    on_submit: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog"
                role="dialog"
                aria-modal="true"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        ev.prevent_default();
                        on_close.run(());
                    }
                }
            >
                <h2>{title}</h2>
                <div class="form-grid">{children()}</div>
                {move || error.get().map(|message| view! { <p class="dialog__error" role="alert">{message}</p> })}
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| on_submit.run(())>
                        {move || if busy.get() { "Saving…".to_owned() } else { submit_label.clone() }}
                    </button>
                </div>
            </div>
        </div>
    }
}

// =============================================================================
// EMPLOYEE
// =============================================================================

#[component]
pub fn EmployeeFormModal(form: EmployeeForm, on_close: Callback<()>, on_saved: Callback<()>) -> impl IntoView {
    let title = if form.is_new() { "Add employee" } else { "Edit employee" };
    let form = RwSignal::new(form);
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        let payload = match current.to_payload() {
            Ok(payload) => payload,
            Err(found) => {
                errors.set(found);
                return;
            }
        };
        errors.set(FieldErrors::new());
        busy.set(true);
        error.set(None);
        spawn(async move {
            let result = match current.employee_id {
                Some(id) => update_employee(id, &payload).await,
                None => create_employee(&payload).await,
            };
            busy.set(false);
            match result {
                Ok(_) => on_saved.run(()),
                Err(err) => {
                    leptos::logging::warn!("employee save failed: {err}");
                    error.set(Some(err.user_message()));
                }
            }
        });
    });

    let text = move |key: &'static str, label: &'static str, input_type: &'static str, get: fn(&EmployeeForm) -> &str, set: fn(&mut EmployeeForm, String)| {
        view! {
            <label class="field">
                <span class="field__label">{label}</span>
                <input
                    type=input_type
                    prop:value=move || form.with(|f| get(f).to_owned())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
                <FieldError errors=errors key=key/>
            </label>
        }
    };

    view! {
        <ModalFrame title=title submit_label="Save" busy=busy error=error on_close=on_close on_submit=on_submit>
            {text("first_name", "First name", "text", |f| f.first_name.as_str(), |f, v| f.first_name = v)}
            {text("last_name", "Last name", "text", |f| f.last_name.as_str(), |f, v| f.last_name = v)}
            {text("email", "Email", "email", |f| f.email.as_str(), |f, v| f.email = v)}
            <label class="field">
                <span class="field__label">"Role level"</span>
                <select
                    prop:value=move || form.with(|f| f.role_level.as_str())
                    on:change=move |ev| {
                        if let Some(level) = RoleLevel::parse(&event_target_value(&ev)) {
                            form.update(|f| f.role_level = level);
                        }
                    }
                >
                    {RoleLevel::ALL
                        .iter()
                        .map(|l| view! { <option value=l.as_str()>{l.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            <label class="field">
                <span class="field__label">"Status"</span>
                <select
                    prop:value=move || form.with(|f| f.status.as_str())
                    on:change=move |ev| {
                        if let Some(status) = EmployeeStatus::parse(&event_target_value(&ev)) {
                            form.update(|f| f.status = status);
                        }
                    }
                >
                    {EmployeeStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            {text("ctc_monthly", "Monthly CTC", "number", |f| f.ctc_monthly.as_str(), |f, v| f.ctc_monthly = v)}
            {text("currency", "Currency", "text", |f| f.currency.as_str(), |f, v| f.currency = v)}
            {text("base_location", "Base location", "text", |f| f.base_location.as_str(), |f, v| f.base_location = v)}
            <label class="field field--inline">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.remote_pref)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        form.update(|f| f.remote_pref = checked);
                    }
                />
                <span>"Open to remote work"</span>
            </label>
            <label class="field field--wide">
                <span class="field__label">"Bio"</span>
                <textarea
                    rows="3"
                    prop:value=move || form.with(|f| f.bio_summary.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.bio_summary = value);
                    }
                ></textarea>
            </label>
        </ModalFrame>
    }
}

// =============================================================================
// SKILL
// =============================================================================

#[component]
pub fn SkillModal(
    employee_id: i64,
    #[prop(into)] employee_name: String,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(SkillForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let payload = match form.with_untracked(SkillForm::to_payload) {
            Ok(payload) => payload,
            Err(found) => {
                errors.set(found);
                return;
            }
        };
        errors.set(FieldErrors::new());
        busy.set(true);
        error.set(None);
        spawn(async move {
            let result = add_skill(employee_id, &payload).await;
            busy.set(false);
            match result {
                Ok(_) => on_saved.run(()),
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    });

    view! {
        <ModalFrame
            title=format!("Add skill for {employee_name}")
            submit_label="Add skill"
            busy=busy
            error=error
            on_close=on_close
            on_submit=on_submit
        >
            <label class="field">
                <span class="field__label">"Skill"</span>
                <input
                    type="text"
                    prop:value=move || form.with(|f| f.skill_name.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.skill_name = value);
                    }
                />
                <FieldError errors=errors key="skill_name"/>
            </label>
            <label class="field">
                <span class="field__label">"Proficiency"</span>
                <input
                    type="number"
                    min=MIN_PROFICIENCY.to_string()
                    max=MAX_PROFICIENCY.to_string()
                    prop:value=move || form.with(|f| f.proficiency.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.proficiency = value);
                    }
                />
                <FieldError errors=errors key="proficiency"/>
            </label>
            <label class="field">
                <span class="field__label">"Last used"</span>
                <input
                    type="date"
                    prop:value=move || form.with(|f| f.last_used.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.last_used = value);
                    }
                />
                <FieldError errors=errors key="last_used"/>
            </label>
            <label class="field field--inline">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.is_verified)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        form.update(|f| f.is_verified = checked);
                    }
                />
                <span>"Verified"</span>
            </label>
        </ModalFrame>
    }
}

// =============================================================================
// RISK
// =============================================================================

#[component]
pub fn RiskModal(
    employee_id: i64,
    #[prop(into)] employee_name: String,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(RiskForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let projects = RwSignal::new(Vec::<Project>::new());
    let owners = RwSignal::new(Vec::<Employee>::new());

    spawn(async move {
        match fetch_projects().await {
            Ok(list) => projects.set(list.projects),
            Err(err) => leptos::logging::warn!("risk modal project list failed: {err}"),
        }
    });
    spawn(async move {
        match fetch_employees(None, None, "").await {
            Ok(list) => owners.set(list.employees),
            Err(err) => leptos::logging::warn!("risk modal owner list failed: {err}"),
        }
    });

    let on_submit = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let payload = match form.with_untracked(|f| f.to_payload(today())) {
            Ok(payload) => payload,
            Err(found) => {
                errors.set(found);
                return;
            }
        };
        errors.set(FieldErrors::new());
        busy.set(true);
        error.set(None);
        spawn(async move {
            let result = raise_risk(employee_id, &payload).await;
            busy.set(false);
            match result {
                Ok(_) => on_saved.run(()),
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    });

    view! {
        <ModalFrame
            title=format!("Raise risk for {employee_name}")
            submit_label="Raise risk"
            busy=busy
            error=error
            on_close=on_close
            on_submit=on_submit
        >
            <label class="field">
                <span class="field__label">"Type"</span>
                <select
                    prop:value=move || form.with(|f| f.risk_type.as_str())
                    on:change=move |ev| {
                        if let Some(kind) = RiskType::parse(&event_target_value(&ev)) {
                            form.update(|f| f.risk_type = kind);
                        }
                    }
                >
                    {RiskType::ALL
                        .iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            <label class="field">
                <span class="field__label">"Severity"</span>
                <select
                    prop:value=move || form.with(|f| f.severity.as_str())
                    on:change=move |ev| {
                        if let Some(severity) = RiskSeverity::parse(&event_target_value(&ev)) {
                            form.update(|f| f.severity = severity);
                        }
                    }
                >
                    {RiskSeverity::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            <label class="field">
                <span class="field__label">"Project"</span>
                <select
                    prop:value=move || form.with(|f| f.project_id.map(|id| id.to_string()).unwrap_or_default())
                    on:change=move |ev| {
                        let project_id = event_target_value(&ev).parse::<i64>().ok();
                        form.update(|f| f.project_id = project_id);
                    }
                >
                    <option value="">"Not project-specific"</option>
                    {move || {
                        projects
                            .get()
                            .into_iter()
                            .map(|p| view! { <option value=p.id.to_string()>{p.project_name}</option> })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </label>
            <label class="field">
                <span class="field__label">"Target resolution"</span>
                <input
                    type="date"
                    prop:value=move || form.with(|f| f.target_resolution_date.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.target_resolution_date = value);
                    }
                />
                <FieldError errors=errors key="target_resolution_date"/>
            </label>
            <label class="field field--wide">
                <span class="field__label">"Description"</span>
                <textarea
                    rows="3"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.description = value);
                    }
                ></textarea>
                <FieldError errors=errors key="description"/>
            </label>
            <label class="field field--wide">
                <span class="field__label">"Mitigation plan"</span>
                <textarea
                    rows="2"
                    prop:value=move || form.with(|f| f.mitigation_plan.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.mitigation_plan = value);
                    }
                ></textarea>
            </label>
            <label class="field">
                <span class="field__label">"Mitigation owner"</span>
                <select
                    prop:value=move || {
                        form.with(|f| f.mitigation_owner_emp_id.map(|id| id.to_string()).unwrap_or_default())
                    }
                    on:change=move |ev| {
                        let owner = event_target_value(&ev).parse::<i64>().ok();
                        form.update(|f| f.mitigation_owner_emp_id = owner);
                    }
                >
                    <option value="">"Unassigned"</option>
                    {move || {
                        owners
                            .get()
                            .into_iter()
                            .map(|e| view! { <option value=e.id.to_string()>{e.full_name()}</option> })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </label>
        </ModalFrame>
    }
}
