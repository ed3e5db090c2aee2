//! Team management modal state for an existing project.
//!
//! DESIGN
//! ======
//! Every row edit returns a [`ValidationPlan`] telling the view what to do
//! next: nothing, show a local error, or run a delayed backend conflict
//! check. Remote checks are stamped with a sequence number; a result is
//! applied only if the row is still waiting on that exact number, so slow
//! responses to superseded edits are dropped instead of cancelled.
//!
//! Rows are never deleted once saved. Soft removal ends the allocation today
//! and the next load filters it out.

#[cfg(test)]
#[path = "team_test.rs"]
mod team_test;

use std::collections::HashSet;

use time::Date;

use crate::net::error::ApiError;
use crate::net::types::{Allocation, AllocationCheckRequest, AllocationCheckResponse, TeamUpdatePayload};
use crate::state::roles::profile_for;
use crate::state::wizard::{AllocationDraft, non_blank};
use crate::util::dates::{format_iso_date, is_on_or_before, parse_iso_date};
use crate::util::validation::{RejectedInputs, is_percentage, parse_number};

/// Delay between the last edit of a row and its conflict check.
pub const VALIDATION_DELAY_MS: u32 = 400;

/// Message used when the backend rejects without saying why.
const CONFLICT_FALLBACK: &str = "Allocation conflicts with this employee's other assignments";

const MENTOR_MISSING: &str = "Trainees need a mentor";
const MENTOR_NOT_ON_TEAM: &str = "Mentor must be a non-trainee member of this team";

// =============================================================================
// ROWS
// =============================================================================

/// Validation status of one row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RowCheck {
    /// Not yet checked (fresh or loaded as-is).
    #[default]
    Idle,
    /// Waiting on the backend check with this sequence number.
    Pending(u64),
    Valid,
    Invalid(String),
}

impl RowCheck {
    #[must_use]
    pub fn blocks_save(&self) -> bool {
        matches!(self, Self::Pending(_) | Self::Invalid(_))
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// What the view must do after a row changed.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationPlan {
    /// Nothing to check (no such row, or no employee chosen yet).
    Nothing,
    /// Accepted locally; no backend call.
    Valid,
    /// Rejected locally with this message; no backend call.
    LocalError(String),
    /// Wait [`VALIDATION_DELAY_MS`], then send `request` and apply under `seq`.
    Remote { seq: u64, request: AllocationCheckRequest },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TeamRow {
    /// Backend id; `None` for rows added in this session.
    pub id: Option<i64>,
    pub draft: AllocationDraft,
    pub check: RowCheck,
}

impl TeamRow {
    fn from_allocation(allocation: &Allocation) -> Self {
        Self {
            id: allocation.id,
            draft: AllocationDraft {
                role_name: allocation.role_name.clone().unwrap_or_default(),
                employee_id: Some(allocation.employee_id),
                employee_name: allocation.employee_name.clone(),
                start_date: allocation.start_date.clone(),
                end_date: allocation.end_date.clone().unwrap_or_default(),
                allocation_percentage: allocation.allocation_percentage,
                internal_allocation_percentage: allocation.internal_allocation_percentage,
                billable_percentage: allocation.billable_percentage,
                billing_rate: allocation.billing_rate.map(|r| r.to_string()).unwrap_or_default(),
                is_trainee: allocation.is_trainee,
                mentor_employee_id: allocation.mentoring_primary_emp_id,
                rationale: None,
                rejected: RejectedInputs::default(),
            },
            check: RowCheck::Idle,
        }
    }

    /// `true` once the row has been ended as of `today`.
    #[must_use]
    pub fn is_removed(&self, today: Date) -> bool {
        parse_iso_date(&self.draft.end_date) == Some(today)
    }

    /// Checks that need no backend round trip.
    fn local_error(&self) -> Option<String> {
        let draft = &self.draft;
        if !draft.rejected.is_empty() {
            return Some("Percentages must be whole numbers between 0 and 100".to_owned());
        }
        if [draft.allocation_percentage, draft.internal_allocation_percentage, draft.billable_percentage]
            .into_iter()
            .any(|p| !is_percentage(p))
        {
            return Some("Percentages must be between 0 and 100".to_owned());
        }
        let Some(start) = parse_iso_date(&draft.start_date) else {
            return Some("Start date is required".to_owned());
        };
        if !draft.end_date.trim().is_empty() {
            match parse_iso_date(&draft.end_date) {
                None => return Some("End date must be a valid date".to_owned()),
                Some(end) if end < start => return Some("End date must be on or after start date".to_owned()),
                Some(_) => {}
            }
        }
        match parse_number(&draft.billing_rate) {
            Some(Ok(rate)) if rate >= 0.0 => {}
            None => {}
            Some(_) => return Some("Billing rate must be a non-negative number".to_owned()),
        }
        None
    }
}

// =============================================================================
// EDITOR
// =============================================================================

/// Editable copy of a project's team.
#[derive(Clone, Debug, Default)]
pub struct TeamEditor {
    pub project_id: i64,
    pub rows: Vec<TeamRow>,
    pub saving: bool,
    pub error: Option<String>,
    next_seq: u64,
}

impl TeamEditor {
    /// Load the current team, dropping allocations that ended on or before `today`.
    #[must_use]
    pub fn load(project_id: i64, allocations: &[Allocation], today: Date) -> Self {
        let rows = allocations
            .iter()
            .filter(|a| !a.end_date.as_deref().is_some_and(|end| is_on_or_before(end, today)))
            .map(TeamRow::from_allocation)
            .collect();
        Self { project_id, rows, ..Self::default() }
    }

    /// Append an empty row starting `today` for `role_name`.
    pub fn add_row(&mut self, role_name: &str, today: Date) {
        let utilization = profile_for(role_name).default_utilization;
        self.rows.push(TeamRow {
            id: None,
            draft: AllocationDraft {
                role_name: role_name.trim().to_owned(),
                employee_id: None,
                employee_name: String::new(),
                start_date: format_iso_date(today),
                end_date: String::new(),
                allocation_percentage: utilization,
                internal_allocation_percentage: utilization,
                billable_percentage: 100,
                billing_rate: String::new(),
                is_trainee: false,
                mentor_employee_id: None,
                rationale: None,
                rejected: RejectedInputs::default(),
            },
            check: RowCheck::Idle,
        });
    }

    /// Drop a row added in this session. Saved rows can only be soft-removed.
    pub fn discard_new_row(&mut self, index: usize) -> bool {
        if self.rows.get(index).is_some_and(|row| row.id.is_none()) {
            self.rows.remove(index);
            self.sync_mentor_checks(None);
            return true;
        }
        false
    }

    /// Apply `edit` to one row and decide how to validate it.
    pub fn update_row(&mut self, index: usize, edit: impl FnOnce(&mut AllocationDraft)) -> ValidationPlan {
        let Some(row) = self.rows.get_mut(index) else {
            return ValidationPlan::Nothing;
        };
        edit(&mut row.draft);
        let plan = self.plan(index);
        self.sync_mentor_checks(Some(index));
        plan
    }

    /// End a row today. The row stays in the list and in the saved payload.
    ///
    /// A row that has not started yet is collapsed to a single day.
    pub fn soft_remove(&mut self, index: usize, today: Date) -> ValidationPlan {
        let today_iso = format_iso_date(today);
        self.update_row(index, |draft| {
            if parse_iso_date(&draft.start_date).is_some_and(|start| start > today) {
                draft.start_date.clone_from(&today_iso);
            }
            draft.end_date = today_iso;
        })
    }

    fn plan(&mut self, index: usize) -> ValidationPlan {
        let project_id = self.project_id;
        let mentor_error = self.mentor_error(index);
        let Some(row) = self.rows.get_mut(index) else {
            return ValidationPlan::Nothing;
        };

        if let Some(message) = row.local_error().or(mentor_error) {
            row.check = RowCheck::Invalid(message.clone());
            return ValidationPlan::LocalError(message);
        }
        let Some(employee_id) = row.draft.employee_id else {
            row.check = RowCheck::Idle;
            return ValidationPlan::Nothing;
        };
        if row.draft.internal_allocation_percentage == 0 {
            row.check = RowCheck::Valid;
            return ValidationPlan::Valid;
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        row.check = RowCheck::Pending(seq);
        ValidationPlan::Remote {
            seq,
            request: AllocationCheckRequest {
                employee_id,
                project_id: Some(project_id),
                internal_allocation_percentage: row.draft.internal_allocation_percentage,
                start_date: row.draft.start_date.trim().to_owned(),
                end_date: non_blank(&row.draft.end_date),
                exclude_allocation_id: row.id,
            },
        }
    }

    fn mentor_error(&self, index: usize) -> Option<String> {
        let row = self.rows.get(index)?;
        if !row.draft.is_trainee {
            return None;
        }
        let Some(mentor) = row.draft.mentor_employee_id else {
            return Some(MENTOR_MISSING.to_owned());
        };
        let valid = mentor != row.draft.employee_id.unwrap_or(-1)
            && self.mentor_candidates().iter().any(|(id, _)| *id == mentor);
        (!valid).then(|| MENTOR_NOT_ON_TEAM.to_owned())
    }

    /// Re-check the mentor of every trainee row other than `skip`.
    ///
    /// Editing or dropping one row can take a mentor off the team (new
    /// employee, now a trainee, discarded). Dependent trainees turn invalid;
    /// a trainee whose only problem was its mentor returns to `Idle` once the
    /// mentor is back.
    fn sync_mentor_checks(&mut self, skip: Option<usize>) {
        for index in 0..self.rows.len() {
            if Some(index) == skip {
                continue;
            }
            let mentor_error = self.mentor_error(index);
            let row = &mut self.rows[index];
            let next = match (mentor_error, &row.check) {
                (Some(message), RowCheck::Invalid(current)) if *current == message => None,
                (Some(message), _) => Some(RowCheck::Invalid(message)),
                (None, RowCheck::Invalid(current)) if current == MENTOR_MISSING || current == MENTOR_NOT_ON_TEAM => {
                    Some(RowCheck::Idle)
                }
                (None, _) => None,
            };
            if let Some(next) = next {
                row.check = next;
            }
        }
    }

    /// `true` while `seq` is still the awaited check of some row.
    #[must_use]
    pub fn is_pending(&self, seq: u64) -> bool {
        self.rows.iter().any(|row| row.check == RowCheck::Pending(seq))
    }

    /// Apply a backend check result. Returns `false` when the result is stale.
    pub fn apply_validation_result(&mut self, seq: u64, result: Result<AllocationCheckResponse, ApiError>) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.check == RowCheck::Pending(seq)) else {
            return false;
        };
        row.check = match result {
            Ok(response) if response.valid => RowCheck::Valid,
            Ok(response) => RowCheck::Invalid(response.message.unwrap_or_else(|| CONFLICT_FALLBACK.to_owned())),
            Err(err) => RowCheck::Invalid(format!("Could not validate: {}", err.user_message())),
        };
        true
    }

    /// Non-trainee rows with an employee, as `(id, name)` mentor choices.
    #[must_use]
    pub fn mentor_candidates(&self) -> Vec<(i64, String)> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|row| !row.draft.is_trainee)
            .filter_map(|row| row.draft.employee_id.map(|id| (id, row.draft.employee_name.clone())))
            .filter(|(id, _)| seen.insert(*id))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Save
    // ---------------------------------------------------------------------

    /// Save is allowed only when no row is pending, invalid, or unstaffed,
    /// and every trainee's mentor is a non-trainee on the team.
    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.saving
            && self.rows.iter().all(|row| !row.check.blocks_save() && row.draft.employee_id.is_some())
            && (0..self.rows.len()).all(|index| self.mentor_error(index).is_none())
    }

    /// Full replacement list of the project's allocations.
    #[must_use]
    pub fn payload(&self) -> Option<TeamUpdatePayload> {
        let allocations = self
            .rows
            .iter()
            .map(|row| {
                let mut allocation = row.draft.to_allocation()?;
                allocation.id = row.id;
                allocation.project_id = Some(self.project_id);
                Some(allocation)
            })
            .collect::<Option<Vec<_>>>()?;
        Some(TeamUpdatePayload { allocations })
    }

    /// Mark the editor busy and return the payload, if saving is allowed.
    pub fn begin_save(&mut self) -> Option<TeamUpdatePayload> {
        if !self.can_save() {
            return None;
        }
        let payload = self.payload()?;
        self.saving = true;
        self.error = None;
        Some(payload)
    }

    /// Returns `true` when the save succeeded and the modal may close.
    pub fn finish_save<T>(&mut self, result: Result<T, ApiError>) -> bool {
        self.saving = false;
        match result {
            Ok(_) => true,
            Err(err) => {
                self.error = Some(err.user_message());
                false
            }
        }
    }
}
