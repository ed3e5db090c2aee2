//! Project creation wizard state machine.
//!
//! DESIGN
//! ======
//! Four linear steps (details → structure → allotment → review). Forward
//! moves run the current step's guard and stay put with a field-keyed error
//! map on failure; backward moves never validate. Submission validates every
//! step again and builds one aggregate payload. All transitions are plain
//! methods so the whole flow is testable without a browser.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use std::collections::HashSet;

use crate::net::error::ApiError;
use crate::net::types::{
    Allocation, CreateProjectPayload, CreateProjectResponse, ProjectDetailsPayload, ProjectStatus, RfpProject,
    RoleRequirement, TeamSuggestion, TeamSuggestionRequest,
};
use crate::state::roles::{find_role, profile_for};
use crate::util::dates::{ends_before_start, parse_iso_date};
use crate::util::validation::{FieldErrors, RejectedInputs, is_percentage, parse_int, parse_number, trimmed_len};

/// Minimum trimmed description length accepted on the details step.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Shown when a percentage input holds a blank or non-integer value.
pub const WHOLE_PERCENT_MESSAGE: &str = "Must be a whole number 0–100";

// =============================================================================
// STEPS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Details,
    Structure,
    Allotment,
    Review,
}

impl WizardStep {
    pub const ALL: [Self; 4] = [Self::Details, Self::Structure, Self::Allotment, Self::Review];

    /// 1-based position shown in the step indicator.
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            Self::Details => 1,
            Self::Structure => 2,
            Self::Allotment => 3,
            Self::Review => 4,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Details => "Project details",
            Self::Structure => "Team structure",
            Self::Allotment => "Allocation",
            Self::Review => "Review",
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Details => Some(Self::Structure),
            Self::Structure => Some(Self::Allotment),
            Self::Allotment => Some(Self::Review),
            Self::Review => None,
        }
    }

    #[must_use]
    pub fn prev(self) -> Option<Self> {
        match self {
            Self::Details => None,
            Self::Structure => Some(Self::Details),
            Self::Allotment => Some(Self::Structure),
            Self::Review => Some(Self::Allotment),
        }
    }
}

// =============================================================================
// FORM MODELS
// =============================================================================

/// Step 1 inputs, kept as raw strings until validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectDetailsForm {
    pub client_name: String,
    pub project_name: String,
    pub project_type: String,
    pub start_date: String,
    pub end_date: String,
    pub status: ProjectStatus,
    pub probability: String,
    pub budget_cap: String,
    pub tech_stack: String,
    pub description: String,
}

impl ProjectDetailsForm {
    /// Guard for leaving the details step.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("client_name", &self.client_name, "Client name");
        errors.require("project_name", &self.project_name, "Project name");
        errors.require("project_type", &self.project_type, "Project type");
        errors.require("start_date", &self.start_date, "Start date");

        if !self.start_date.trim().is_empty() && parse_iso_date(&self.start_date).is_none() {
            errors.insert("start_date", "Start date must be a valid date");
        }
        if !self.end_date.trim().is_empty() {
            if parse_iso_date(&self.end_date).is_none() {
                errors.insert("end_date", "End date must be a valid date");
            } else if ends_before_start(&self.start_date, &self.end_date) {
                errors.insert("end_date", "End date must be on or after start date");
            }
        }

        if self.status == ProjectStatus::Pipeline {
            if self.probability.trim().is_empty() {
                errors.insert("probability", "Probability is required for pipeline projects");
            } else {
                match parse_int(&self.probability) {
                    Some(p) if is_percentage(p) => {}
                    Some(_) => errors.insert("probability", "Probability must be between 0 and 100"),
                    None => errors.insert("probability", "Probability must be a whole number"),
                }
            }
        }

        match parse_number(&self.budget_cap) {
            None => errors.insert("budget_cap", "Budget is required"),
            Some(Err(())) => errors.insert("budget_cap", "Budget must be a number"),
            Some(Ok(budget)) if budget < 0.0 => errors.insert("budget_cap", "Budget must be zero or greater"),
            Some(Ok(_)) => {}
        }

        match trimmed_len(&self.description) {
            0 => errors.insert("description", "Description is required"),
            n if n < MIN_DESCRIPTION_CHARS => errors.insert("description", "Minimum 10 characters required"),
            _ => {}
        }

        errors
    }

    /// Typed payload; `None` when any field would fail [`Self::validate`].
    #[must_use]
    pub fn to_payload(&self) -> Option<ProjectDetailsPayload> {
        if !self.validate().is_empty() {
            return None;
        }
        let budget_cap = parse_number(&self.budget_cap)?.ok()?;
        let probability = if self.status == ProjectStatus::Pipeline {
            Some(u8::try_from(parse_int(&self.probability)?).ok()?)
        } else {
            None
        };
        Some(ProjectDetailsPayload {
            client_name: self.client_name.trim().to_owned(),
            project_name: self.project_name.trim().to_owned(),
            project_type: self.project_type.trim().to_owned(),
            start_date: self.start_date.trim().to_owned(),
            end_date: non_blank(&self.end_date),
            status: self.status,
            probability,
            budget_cap,
            tech_stack: normalize_tags(&self.tech_stack),
            description: self.description.trim().to_owned(),
        })
    }
}

/// One role line on the structure step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleDraft {
    pub role_name: String,
    pub required_count: i32,
    pub utilization: i32,
    pub rejected: RejectedInputs,
}

impl Default for RoleDraft {
    fn default() -> Self {
        Self { role_name: String::new(), required_count: 1, utilization: 100, rejected: RejectedInputs::default() }
    }
}

impl RoleDraft {
    /// Set the role name; catalogue roles pre-fill their default utilization.
    pub fn select_role(&mut self, name: &str) {
        self.role_name = name.to_owned();
        if let Some(profile) = find_role(name) {
            self.utilization = profile.default_utilization;
        }
    }

    pub fn set_required_count(&mut self, raw: &str) {
        self.rejected.set_int("required_count", raw, &mut self.required_count);
    }

    pub fn set_utilization(&mut self, raw: &str) {
        self.rejected.set_int("utilization", raw, &mut self.utilization);
    }

    fn to_requirement(&self) -> RoleRequirement {
        RoleRequirement {
            role_name: self.role_name.trim().to_owned(),
            required_count: u32::try_from(self.required_count).unwrap_or(0),
            utilization_percentage: self.utilization,
        }
    }
}

/// One allocation row on the allotment step.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationDraft {
    pub role_name: String,
    pub employee_id: Option<i64>,
    pub employee_name: String,
    pub start_date: String,
    pub end_date: String,
    pub allocation_percentage: i32,
    pub internal_allocation_percentage: i32,
    pub billable_percentage: i32,
    pub billing_rate: String,
    pub is_trainee: bool,
    pub mentor_employee_id: Option<i64>,
    /// Why the AI picked this candidate, when the row came from a suggestion.
    pub rationale: Option<String>,
    pub rejected: RejectedInputs,
}

/// Field names of the three allocation percentages, in column order.
pub const PERCENT_FIELDS: [&str; 3] = ["allocation_percentage", "internal_allocation_percentage", "billable_percentage"];

impl AllocationDraft {
    fn blank(role: &RoleDraft, details: &ProjectDetailsForm) -> Self {
        Self {
            role_name: role.role_name.trim().to_owned(),
            employee_id: None,
            employee_name: String::new(),
            start_date: details.start_date.trim().to_owned(),
            end_date: details.end_date.trim().to_owned(),
            allocation_percentage: role.utilization,
            internal_allocation_percentage: role.utilization,
            billable_percentage: 100,
            billing_rate: String::new(),
            is_trainee: false,
            mentor_employee_id: None,
            rationale: None,
            rejected: RejectedInputs::default(),
        }
    }

    /// Set one of [`PERCENT_FIELDS`] from input text.
    pub fn set_percentage(&mut self, field: &'static str, raw: &str) {
        let slot = match field {
            "allocation_percentage" => &mut self.allocation_percentage,
            "internal_allocation_percentage" => &mut self.internal_allocation_percentage,
            "billable_percentage" => &mut self.billable_percentage,
            _ => return,
        };
        self.rejected.set_int(field, raw, slot);
    }

    #[must_use]
    pub fn percentage_text(&self, field: &str) -> String {
        let value = match field {
            "allocation_percentage" => self.allocation_percentage,
            "internal_allocation_percentage" => self.internal_allocation_percentage,
            "billable_percentage" => self.billable_percentage,
            _ => return String::new(),
        };
        self.rejected.text(field, value)
    }

    /// Wire form; `None` until an employee is chosen and every number parses.
    pub(crate) fn to_allocation(&self) -> Option<Allocation> {
        if !self.rejected.is_empty() {
            return None;
        }
        let billing_rate = match parse_number(&self.billing_rate) {
            None => None,
            Some(rate) => Some(rate.ok()?),
        };
        Some(Allocation {
            id: None,
            employee_id: self.employee_id?,
            employee_name: self.employee_name.clone(),
            project_id: None,
            role_name: non_blank(&self.role_name),
            start_date: self.start_date.trim().to_owned(),
            end_date: non_blank(&self.end_date),
            allocation_percentage: self.allocation_percentage,
            internal_allocation_percentage: self.internal_allocation_percentage,
            billable_percentage: self.billable_percentage,
            billing_rate,
            is_trainee: self.is_trainee,
            mentoring_primary_emp_id: if self.is_trainee { self.mentor_employee_id } else { None },
        })
    }
}

// =============================================================================
// WIZARD STATE
// =============================================================================

/// Complete wizard state, provided to the modal as one signal.
#[derive(Clone, Debug, Default)]
pub struct WizardState {
    pub open: bool,
    pub step: WizardStep,
    pub details: ProjectDetailsForm,
    pub roles: Vec<RoleDraft>,
    pub allocations: Vec<AllocationDraft>,
    pub errors: FieldErrors,
    pub submitting: bool,
    pub suggesting: bool,
    pub submit_error: Option<String>,
    pub notice: Option<String>,
    pub confirm_cancel: bool,
}

impl WizardState {
    /// Fresh, open wizard at the details step.
    #[must_use]
    pub fn opened() -> Self {
        Self { open: true, roles: vec![RoleDraft::default()], ..Self::default() }
    }

    // ---------------------------------------------------------------------
    // Guards
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn validate_structure(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.roles.is_empty() {
            errors.insert("roles", "Add at least one role");
        }
        let mut seen = HashSet::new();
        for (i, role) in self.roles.iter().enumerate() {
            let name = role.role_name.trim();
            if name.is_empty() {
                errors.insert(format!("roles.{i}.role_name"), "Role name is required");
            } else if !seen.insert(name.to_lowercase()) {
                errors.insert(format!("roles.{i}.role_name"), format!("Duplicate role: {name}"));
            }
            if role.rejected.contains("required_count") {
                errors.insert(format!("roles.{i}.required_count"), "Required count must be a whole number");
            } else if role.required_count < 1 {
                errors.insert(format!("roles.{i}.required_count"), "Required count must be at least 1");
            }
            let max = profile_for(name).max_utilization;
            if role.rejected.contains("utilization") {
                errors.insert(format!("roles.{i}.utilization"), format!("Utilization must be a whole number 1–{max}"));
            } else if role.utilization < 1 || role.utilization > max {
                errors.insert(format!("roles.{i}.utilization"), format!("Utilization must be between 1 and {max}%"));
            }
        }
        errors
    }

    #[must_use]
    pub fn validate_allocations(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mentors: HashSet<i64> = self
            .allocations
            .iter()
            .filter(|row| !row.is_trainee)
            .filter_map(|row| row.employee_id)
            .collect();

        for (i, row) in self.allocations.iter().enumerate() {
            let key = |field: &str| format!("allocations.{i}.{field}");
            if row.employee_id.is_none() {
                errors.insert(key("employee_id"), "Select an employee");
            }
            if row.start_date.trim().is_empty() {
                errors.insert(key("start_date"), "Start date is required");
            } else if parse_iso_date(&row.start_date).is_none() {
                errors.insert(key("start_date"), "Start date must be a valid date");
            }
            if !row.end_date.trim().is_empty() {
                if parse_iso_date(&row.end_date).is_none() {
                    errors.insert(key("end_date"), "End date must be a valid date");
                } else if ends_before_start(&row.start_date, &row.end_date) {
                    errors.insert(key("end_date"), "End date must be on or after start date");
                }
            }
            for (field, value) in [
                ("allocation_percentage", row.allocation_percentage),
                ("internal_allocation_percentage", row.internal_allocation_percentage),
                ("billable_percentage", row.billable_percentage),
            ] {
                if row.rejected.contains(field) {
                    errors.insert(key(field), WHOLE_PERCENT_MESSAGE);
                } else if !is_percentage(value) {
                    errors.insert(key(field), "Must be between 0 and 100");
                }
            }
            match parse_number(&row.billing_rate) {
                Some(Ok(rate)) if rate < 0.0 => errors.insert(key("billing_rate"), "Billing rate must be zero or greater"),
                Some(Err(())) => errors.insert(key("billing_rate"), "Billing rate must be a number"),
                _ => {}
            }
            if row.is_trainee {
                match row.mentor_employee_id {
                    None => errors.insert(key("mentor_employee_id"), "Trainees need a mentor"),
                    Some(mentor) if mentor == row.employee_id.unwrap_or(-1) || !mentors.contains(&mentor) => {
                        errors.insert(key("mentor_employee_id"), "Mentor must be a non-trainee member of this team");
                    }
                    Some(_) => {}
                }
            }
        }
        errors
    }

    fn guard(&self, step: WizardStep) -> FieldErrors {
        match step {
            WizardStep::Details => self.details.validate(),
            WizardStep::Structure => self.validate_structure(),
            WizardStep::Allotment => self.validate_allocations(),
            WizardStep::Review => FieldErrors::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    /// Move forward if the current step's guard passes.
    ///
    /// Returns `true` when the step changed. On failure the error map is
    /// replaced with the guard's errors and the step is unchanged.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.step.next() else {
            return false;
        };
        let errors = self.guard(self.step);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.errors = FieldErrors::new();
        self.step = next;
        if next == WizardStep::Allotment {
            self.ensure_allocation_rows();
        }
        true
    }

    /// Move back one step without validation.
    pub fn back(&mut self) -> bool {
        let Some(prev) = self.step.prev() else {
            return false;
        };
        self.errors = FieldErrors::new();
        self.step = prev;
        true
    }

    /// Generate empty rows per required headcount when no rows exist yet.
    pub fn ensure_allocation_rows(&mut self) {
        if self.allocations.is_empty() {
            self.allocations = self.blank_rows();
        }
    }

    /// One empty row per required headcount, in structure order.
    #[must_use]
    pub fn blank_rows(&self) -> Vec<AllocationDraft> {
        let details = &self.details;
        self.roles
            .iter()
            .flat_map(|role| {
                let count = usize::try_from(role.required_count).unwrap_or(0);
                std::iter::repeat_with(move || AllocationDraft::blank(role, details)).take(count)
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // Editing helpers
    // ---------------------------------------------------------------------

    pub fn add_role(&mut self) {
        self.roles.push(RoleDraft::default());
    }

    pub fn remove_role(&mut self, index: usize) {
        if index < self.roles.len() {
            self.roles.remove(index);
        }
    }

    /// Append an empty row for `role_name` (extra headcount beyond the plan).
    pub fn add_allocation_row(&mut self, role_name: &str) {
        let role = self
            .roles
            .iter()
            .find(|r| r.role_name.trim().eq_ignore_ascii_case(role_name.trim()))
            .cloned()
            .unwrap_or_else(|| RoleDraft { role_name: role_name.to_owned(), ..RoleDraft::default() });
        self.allocations.push(AllocationDraft::blank(&role, &self.details));
    }

    pub fn remove_allocation_row(&mut self, index: usize) {
        if index < self.allocations.len() {
            self.allocations.remove(index);
        }
    }

    /// Non-trainee rows with an assigned employee, as `(id, name)` choices.
    #[must_use]
    pub fn mentor_candidates(&self) -> Vec<(i64, String)> {
        let mut seen = HashSet::new();
        self.allocations
            .iter()
            .filter(|row| !row.is_trainee)
            .filter_map(|row| row.employee_id.map(|id| (id, row.employee_name.clone())))
            .filter(|(id, _)| seen.insert(*id))
            .collect()
    }

    /// Copy fields parsed from an RFP into the details step.
    pub fn prefill_from_rfp(&mut self, rfp: &RfpProject) {
        if let Some(name) = rfp.project_name.as_deref().filter(|s| !s.trim().is_empty()) {
            self.details.project_name = name.trim().to_owned();
        }
        if let Some(description) = rfp.description.as_deref().filter(|s| !s.trim().is_empty()) {
            self.details.description = description.trim().to_owned();
        }
        if !rfp.skills.is_empty() {
            self.details.tech_stack = normalize_tags(&rfp.skills.join(","));
        }
        if let Some(budget) = rfp.budget {
            self.details.budget_cap = budget.to_string();
        }
    }

    // ---------------------------------------------------------------------
    // AI suggestions
    // ---------------------------------------------------------------------

    /// Request body for the suggestion endpoint; `None` if details are invalid.
    #[must_use]
    pub fn suggestion_request(&self) -> Option<TeamSuggestionRequest> {
        Some(TeamSuggestionRequest {
            project: self.details.to_payload()?,
            team_structure: self.roles.iter().map(RoleDraft::to_requirement).collect(),
        })
    }

    /// Replace rows with backend suggestions, or fall back to empty rows.
    pub fn apply_suggestions(&mut self, result: Result<Vec<TeamSuggestion>, ApiError>) {
        self.suggesting = false;
        match result {
            Ok(suggestions) if !suggestions.is_empty() => {
                let count = suggestions.len();
                self.allocations = suggestions.iter().map(|s| self.row_from_suggestion(s)).collect();
                self.notice = Some(format!("Applied {count} suggested assignments."));
            }
            Ok(_) => {
                self.allocations = self.blank_rows();
                self.notice = Some("No suggestions were returned. Fill the team manually.".to_owned());
            }
            Err(err) => {
                self.allocations = self.blank_rows();
                self.notice = Some(format!("AI suggestions unavailable: {}", err.user_message()));
            }
        }
    }

    fn row_from_suggestion(&self, suggestion: &TeamSuggestion) -> AllocationDraft {
        let utilization = self
            .roles
            .iter()
            .find(|r| r.role_name.trim().eq_ignore_ascii_case(suggestion.role_name.trim()))
            .map_or(100, |r| r.utilization);
        let allocation = suggestion.allocation_percentage.unwrap_or(utilization);
        let default_billable = if suggestion.is_trainee { 0 } else { 100 };
        AllocationDraft {
            role_name: suggestion.role_name.clone(),
            employee_id: Some(suggestion.employee_id),
            employee_name: suggestion.employee_name.clone(),
            start_date: self.details.start_date.trim().to_owned(),
            end_date: self.details.end_date.trim().to_owned(),
            allocation_percentage: allocation,
            internal_allocation_percentage: allocation,
            billable_percentage: suggestion.billable_percentage.unwrap_or(default_billable),
            billing_rate: suggestion.billing_rate.map(|r| r.to_string()).unwrap_or_default(),
            is_trainee: suggestion.is_trainee,
            mentor_employee_id: suggestion.mentoring_primary_emp_id,
            rationale: suggestion.rationale.clone(),
            rejected: RejectedInputs::default(),
        }
    }

    // ---------------------------------------------------------------------
    // Submission & cancellation
    // ---------------------------------------------------------------------

    /// Validate every step and build the aggregate payload.
    ///
    /// # Errors
    ///
    /// Returns the combined error map of the first failing step.
    pub fn build_payload(&self) -> Result<CreateProjectPayload, FieldErrors> {
        for step in [WizardStep::Details, WizardStep::Structure, WizardStep::Allotment] {
            self.guard(step).into_result()?;
        }
        let mut invalid = FieldErrors::new();
        let project = self.details.to_payload();
        let allocations: Option<Vec<Allocation>> = self.allocations.iter().map(AllocationDraft::to_allocation).collect();
        match (project, allocations) {
            (Some(project), Some(allocations)) => Ok(CreateProjectPayload {
                project,
                team_structure: self.roles.iter().map(RoleDraft::to_requirement).collect(),
                allocations,
            }),
            _ => {
                invalid.insert("form", "Some fields could not be read; review each step");
                Err(invalid)
            }
        }
    }

    /// Mark the wizard busy and return the payload, unless already submitting.
    ///
    /// Validation failures jump back to the first failing step.
    pub fn begin_submit(&mut self) -> Option<CreateProjectPayload> {
        if self.submitting {
            return None;
        }
        match self.build_payload() {
            Ok(payload) => {
                self.submitting = true;
                self.submit_error = None;
                Some(payload)
            }
            Err(errors) => {
                self.step = [WizardStep::Details, WizardStep::Structure, WizardStep::Allotment]
                    .into_iter()
                    .find(|step| !self.guard(*step).is_empty())
                    .unwrap_or(self.step);
                self.errors = errors;
                None
            }
        }
    }

    /// Apply the backend's answer. Success clears everything and closes.
    ///
    /// Returns the created project id when the backend reported one.
    pub fn finish_submit(&mut self, result: Result<CreateProjectResponse, ApiError>) -> Option<i64> {
        match result {
            Ok(created) => {
                *self = Self::default();
                created.project_id()
            }
            Err(err) => {
                self.submitting = false;
                self.submit_error = Some(err.user_message());
                None
            }
        }
    }

    /// Ask for confirmation before discarding.
    pub fn request_cancel(&mut self) {
        self.confirm_cancel = true;
    }

    /// Dismiss the confirmation and keep editing.
    pub fn keep_editing(&mut self) {
        self.confirm_cancel = false;
    }

    /// Discard all entered data and close. No-op unless confirmation was requested.
    pub fn confirm_cancel(&mut self) -> bool {
        if !self.confirm_cancel {
            return false;
        }
        *self = Self::default();
        true
    }
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Trim, de-blank, and re-join comma-separated tags.
#[must_use]
pub fn normalize_tags(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
