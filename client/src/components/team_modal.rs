//! Team management modal for an existing project.
//!
//! Edits are validated locally at once; rows needing a backend conflict check
//! wait [`VALIDATION_DELAY_MS`] and then only fire if the row is still waiting
//! on the same check. Save stays disabled while any row is pending or invalid.

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::net::api::{check_allocation, fetch_employees, update_project_team};
use crate::net::types::{Allocation, Employee};
use crate::state::roles::ROLE_CATALOGUE;
use crate::state::team::{RowCheck, TeamEditor, VALIDATION_DELAY_MS, ValidationPlan};
use crate::state::wizard::{AllocationDraft, PERCENT_FIELDS};
use crate::util::browser::{sleep_ms, spawn};
use crate::util::dates::today;

fn run_plan(editor: RwSignal<TeamEditor>, plan: ValidationPlan) {
    let ValidationPlan::Remote { seq, request } = plan else {
        return;
    };
    spawn(async move {
        sleep_ms(VALIDATION_DELAY_MS).await;
        if !editor.try_with_untracked(|e| e.is_pending(seq)).unwrap_or(false) {
            return;
        }
        let result = check_allocation(&request).await;
        editor.try_update(|e| e.apply_validation_result(seq, result));
    });
}

fn edit_row(editor: RwSignal<TeamEditor>, index: usize, edit: impl FnOnce(&mut AllocationDraft)) {
    let plan = editor.try_update(|e| e.update_row(index, edit)).unwrap_or(ValidationPlan::Nothing);
    run_plan(editor, plan);
}

fn draft_value<T: Default>(editor: RwSignal<TeamEditor>, index: usize, read: impl FnOnce(&AllocationDraft) -> T) -> T {
    editor.with(|e| e.rows.get(index).map(|row| read(&row.draft)).unwrap_or_default())
}

#[component]
pub fn TeamModal(
    project_id: i64,
    team: Vec<Allocation>,
    on_close: Callback<()>,
    /// Runs after the backend accepted the new team.
    on_saved: Callback<()>,
) -> impl IntoView {
    let editor = RwSignal::new(TeamEditor::load(project_id, &team, today()));
    let employees = RwSignal::new(Vec::<Employee>::new());
    let new_role = RwSignal::new(String::new());
    let confirm_remove = RwSignal::new(None::<usize>);
    let row_count = Memo::new(move |_| editor.with(|e| e.rows.len()));

    spawn(async move {
        match fetch_employees(None, None, "").await {
            Ok(list) => employees.set(list.employees),
            Err(err) => leptos::logging::warn!("employee picker load failed: {err}"),
        }
    });

    let on_add = move |_| {
        let role = new_role.get_untracked();
        if role.trim().is_empty() {
            return;
        }
        editor.update(|e| e.add_row(&role, today()));
        new_role.set(String::new());
    };

    let remove_row = move |index: usize| {
        let discarded = editor.try_update(|e| e.discard_new_row(index)).unwrap_or(false);
        if !discarded {
            confirm_remove.set(Some(index));
        }
    };

    let on_save = move |_| {
        let Some(payload) = editor.try_update(TeamEditor::begin_save).flatten() else {
            return;
        };
        spawn(async move {
            let result = update_project_team(project_id, &payload).await;
            if let Err(err) = &result {
                leptos::logging::warn!("team update failed for project {project_id}: {err}");
            }
            if editor.try_update(|e| e.finish_save(result)).unwrap_or(false) {
                on_saved.run(());
            }
        });
    };

    let member_row = move |i: usize| {
        let check = move || editor.with(|e| e.rows.get(i).map(|row| row.check.clone()).unwrap_or_default());
        let removed = move || editor.with(|e| e.rows.get(i).is_some_and(|row| row.is_removed(today())));
        let pct_cell = move |field: &'static str| {
            view! {
                <td>
                    <input
                        type="number"
                        min="0"
                        max="100"
                        prop:value=move || draft_value(editor, i, |d| d.percentage_text(field))
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            edit_row(editor, i, |d| d.set_percentage(field, &raw));
                        }
                    />
                </td>
            }
        };
        view! {
            <tr class=move || if removed() { "team-row team-row--removed" } else { "team-row" }>
                <td>{move || draft_value(editor, i, |d| d.role_name.clone())}</td>
                <td>
                    <select
                        prop:value=move || draft_value(editor, i, |d| d.employee_id.map(|id| id.to_string()).unwrap_or_default())
                        on:change=move |ev| {
                            let id = event_target_value(&ev).parse::<i64>().ok();
                            let name = id
                                .and_then(|id| employees.with(|list| list.iter().find(|e| e.id == id).map(Employee::full_name)))
                                .unwrap_or_default();
                            edit_row(editor, i, |d| {
                                d.employee_id = id;
                                d.employee_name = name;
                            });
                        }
                    >
                        <option value="">"Select employee"</option>
                        {move || {
                            let assigned = draft_value(editor, i, |d| d.employee_id.zip(Some(d.employee_name.clone())));
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
                </td>
                <td>
                    <input
                        type="date"
                        prop:value=move || draft_value(editor, i, |d| d.start_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_row(editor, i, |d| d.start_date = value);
                        }
                    />
                </td>
                <td>
                    <input
                        type="date"
                        prop:value=move || draft_value(editor, i, |d| d.end_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_row(editor, i, |d| d.end_date = value);
                        }
                    />
                </td>
                {PERCENT_FIELDS.into_iter().map(pct_cell).collect::<Vec<_>>()}
                <td>
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        prop:value=move || draft_value(editor, i, |d| d.billing_rate.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_row(editor, i, |d| d.billing_rate = value);
                        }
                    />
                </td>
                <td>
                    <input
                        type="checkbox"
                        prop:checked=move || draft_value(editor, i, |d| d.is_trainee)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            edit_row(editor, i, |d| {
                                d.is_trainee = checked;
                                if !checked {
                                    d.mentor_employee_id = None;
                                }
                            });
                        }
                    />
                    <Show when=move || draft_value(editor, i, |d| d.is_trainee)>
                        <select
                            prop:value=move || {
                                draft_value(editor, i, |d| d.mentor_employee_id.map(|id| id.to_string()).unwrap_or_default())
                            }
                            on:change=move |ev| {
                                let mentor = event_target_value(&ev).parse::<i64>().ok();
                                edit_row(editor, i, |d| d.mentor_employee_id = mentor);
                            }
                        >
                            <option value="">"Mentor"</option>
                            {move || {
                                let own = draft_value(editor, i, |d| d.employee_id);
                                editor
                                    .with(TeamEditor::mentor_candidates)
                                    .into_iter()
                                    .filter(|(id, _)| Some(*id) != own)
                                    .map(|(id, name)| view! { <option value=id.to_string()>{name}</option> })
                                    .collect::<Vec<_>>()
                            }}
                        </select>
                    </Show>
                </td>
                <td class="team-row__status">
                    {move || match check() {
                        RowCheck::Idle => ().into_any(),
                        RowCheck::Pending(_) => view! { <span class="badge">"Checking…"</span> }.into_any(),
                        RowCheck::Valid => view! { <span class="badge badge--ok">"OK"</span> }.into_any(),
                        RowCheck::Invalid(message) => {
                            view! { <span class="field-error" role="alert">{message}</span> }.into_any()
                        }
                    }}
                </td>
                <td>
                    <Show
                        when=move || !removed()
                        fallback=|| view! { <span class="team-row__ended">"Ends today"</span> }
                    >
                        <button class="btn btn--ghost" title="Remove from team" on:click=move |_| remove_row(i)>
                            "×"
                        </button>
                    </Show>
                </td>
            </tr>
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--wide"
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
                <h2>"Manage team"</h2>
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
                                <th>"Check"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>{move || (0..row_count.get()).map(member_row).collect::<Vec<_>>()}</tbody>
                    </table>
                </div>

                <div class="team__add">
                    <datalist id="team-role-catalogue">
                        {ROLE_CATALOGUE.iter().map(|r| view! { <option value=r.name></option> }).collect::<Vec<_>>()}
                    </datalist>
                    <input
                        type="text"
                        list="team-role-catalogue"
                        placeholder="Role for new member"
                        prop:value=move || new_role.get()
                        on:input=move |ev| new_role.set(event_target_value(&ev))
                    />
                    <button class="btn" on:click=on_add disabled=move || new_role.with(|r| r.trim().is_empty())>
                        "+ Add member"
                    </button>
                </div>

                {move || {
                    editor
                        .with(|e| e.error.clone())
                        .map(|message| view! { <p class="dialog__error" role="alert">{message}</p> })
                }}

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button
                        class="btn btn--primary"
                        disabled=move || !editor.with(TeamEditor::can_save)
                        on:click=on_save
                    >
                        {move || if editor.with(|e| e.saving) { "Saving…" } else { "Save team" }}
                    </button>
                </div>
            </div>

            {move || {
                confirm_remove
                    .get()
                    .map(|index| {
                        let name = draft_value(editor, index, |d| d.employee_name.clone());
                        view! {
                            <ConfirmDialog
                                title="Remove team member?"
                                message=format!("{name} will be released from this project as of today.")
                                confirm_label="Remove"
                                danger=true
                                on_confirm=Callback::new(move |()| {
                                    confirm_remove.set(None);
                                    let plan = editor
                                        .try_update(|e| e.soft_remove(index, today()))
                                        .unwrap_or(ValidationPlan::Nothing);
                                    run_plan(editor, plan);
                                })
                                on_cancel=Callback::new(move |()| confirm_remove.set(None))
                            />
                        }
                    })
            }}
        </div>
    }
}
