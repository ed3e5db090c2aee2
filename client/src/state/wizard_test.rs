use super::*;
use crate::net::types::Project;
use crate::state::roles::ROLE_CATALOGUE;

// =============================================================
// Helpers
// =============================================================

fn valid_details() -> ProjectDetailsForm {
    ProjectDetailsForm {
        client_name: "Acme".to_owned(),
        project_name: "Atlas".to_owned(),
        project_type: "Fixed bid".to_owned(),
        start_date: "2026-11-01".to_owned(),
        end_date: "2027-04-30".to_owned(),
        status: ProjectStatus::Pipeline,
        probability: "60".to_owned(),
        budget_cap: "250000".to_owned(),
        tech_stack: "Rust, Postgres ,,".to_owned(),
        description: "Modernize the billing platform".to_owned(),
    }
}

fn role(name: &str, count: i32, utilization: i32) -> RoleDraft {
    RoleDraft { role_name: name.to_owned(), required_count: count, utilization, ..RoleDraft::default() }
}

fn wizard_at_allotment() -> WizardState {
    let mut wizard = WizardState::opened();
    wizard.details = valid_details();
    wizard.roles = vec![role("Developer", 2, 100), role("QA Engineer", 1, 50)];
    assert!(wizard.advance());
    assert!(wizard.advance());
    assert_eq!(wizard.step, WizardStep::Allotment);
    wizard
}

fn staff(row: &mut AllocationDraft, id: i64, name: &str) {
    row.employee_id = Some(id);
    row.employee_name = name.to_owned();
}

fn staffed_wizard() -> WizardState {
    let mut wizard = wizard_at_allotment();
    staff(&mut wizard.allocations[0], 1, "Asha Rao");
    staff(&mut wizard.allocations[1], 2, "Ben Ortiz");
    staff(&mut wizard.allocations[2], 3, "Chen Li");
    wizard
}

fn suggestion(role_name: &str, employee_id: i64) -> TeamSuggestion {
    TeamSuggestion {
        role_name: role_name.to_owned(),
        employee_id,
        employee_name: format!("Employee {employee_id}"),
        allocation_percentage: None,
        billable_percentage: None,
        billing_rate: Some(85.0),
        is_trainee: false,
        mentoring_primary_emp_id: None,
        match_score: Some(0.9),
        rationale: Some("Strong match".to_owned()),
    }
}

// =============================================================
// Steps
// =============================================================

#[test]
fn steps_are_linear() {
    assert_eq!(WizardStep::default(), WizardStep::Details);
    assert_eq!(WizardStep::Details.next(), Some(WizardStep::Structure));
    assert_eq!(WizardStep::Review.next(), None);
    assert_eq!(WizardStep::Details.prev(), None);
    assert_eq!(WizardStep::Review.prev(), Some(WizardStep::Allotment));
    let numbers: Vec<_> = WizardStep::ALL.iter().map(|s| s.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn opened_wizard_starts_on_details_with_one_blank_role() {
    let wizard = WizardState::opened();
    assert!(wizard.open);
    assert_eq!(wizard.step, WizardStep::Details);
    assert_eq!(wizard.roles, vec![RoleDraft::default()]);
    assert!(wizard.allocations.is_empty());
}

// =============================================================
// Step 1 guard
// =============================================================

#[test]
fn valid_details_pass_guard() {
    assert!(valid_details().validate().is_empty());
}

#[test]
fn nine_character_description_blocks_details_step() {
    let mut wizard = WizardState::opened();
    wizard.details = valid_details();
    wizard.details.description = "123456789".to_owned();

    assert!(!wizard.advance());
    assert_eq!(wizard.step, WizardStep::Details);
    assert_eq!(wizard.errors.len(), 1);
    assert!(wizard.errors.get("description").unwrap().contains("Minimum 10 characters"));
}

#[test]
fn ten_character_description_passes() {
    let mut details = valid_details();
    details.description = "  1234567890  ".to_owned();
    assert!(details.validate().is_empty());
}

#[test]
fn empty_details_produce_exact_error_map() {
    let details = ProjectDetailsForm::default();
    let errors = details.validate();
    let keys: Vec<_> = errors.keys().collect();
    assert_eq!(
        keys,
        vec!["budget_cap", "client_name", "description", "probability", "project_name", "project_type", "start_date"]
    );
    assert_eq!(errors.get("client_name"), Some("Client name is required"));
    assert_eq!(errors.get("budget_cap"), Some("Budget is required"));
    assert_eq!(errors.get("description"), Some("Description is required"));
}

#[test]
fn end_date_before_start_date_is_rejected() {
    let mut details = valid_details();
    details.end_date = "2026-10-31".to_owned();
    let errors = details.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("end_date"), Some("End date must be on or after start date"));
}

#[test]
fn end_date_equal_to_start_date_is_allowed() {
    let mut details = valid_details();
    details.end_date = details.start_date.clone();
    assert!(details.validate().is_empty());
}

#[test]
fn end_date_is_optional() {
    let mut details = valid_details();
    details.end_date.clear();
    assert!(details.validate().is_empty());
}

#[test]
fn probability_is_checked_only_for_pipeline_projects() {
    let mut details = valid_details();
    details.probability = "101".to_owned();
    assert_eq!(details.validate().get("probability"), Some("Probability must be between 0 and 100"));

    details.status = ProjectStatus::Active;
    assert!(details.validate().is_empty());
}

#[test]
fn probability_bounds_are_inclusive() {
    let mut details = valid_details();
    for value in ["0", "100"] {
        details.probability = value.to_owned();
        assert!(details.validate().is_empty(), "{value}");
    }
    details.probability = "-1".to_owned();
    assert!(details.validate().contains("probability"));
}

#[test]
fn negative_or_malformed_budget_is_rejected() {
    let mut details = valid_details();
    details.budget_cap = "-1".to_owned();
    assert_eq!(details.validate().get("budget_cap"), Some("Budget must be zero or greater"));
    details.budget_cap = "lots".to_owned();
    assert_eq!(details.validate().get("budget_cap"), Some("Budget must be a number"));
    details.budget_cap = "0".to_owned();
    assert!(details.validate().is_empty());
}

#[test]
fn details_payload_normalizes_fields() {
    let payload = valid_details().to_payload().unwrap();
    assert_eq!(payload.tech_stack, "Rust, Postgres");
    assert_eq!(payload.probability, Some(60));
    assert_eq!(payload.end_date.as_deref(), Some("2027-04-30"));
    assert!((payload.budget_cap - 250_000.0).abs() < f64::EPSILON);

    let mut active = valid_details();
    active.status = ProjectStatus::Active;
    active.probability.clear();
    assert_eq!(active.to_payload().unwrap().probability, None);
}

// =============================================================
// Step 2 guard & role table
// =============================================================

#[test]
fn selecting_catalogue_role_prefills_default_utilization() {
    for profile in ROLE_CATALOGUE {
        let mut draft = RoleDraft { utilization: 1, ..RoleDraft::default() };
        draft.select_role(profile.name);
        assert_eq!(draft.utilization, profile.default_utilization, "{}", profile.name);
        assert_eq!(draft.role_name, profile.name);
    }
}

#[test]
fn selecting_custom_role_keeps_current_utilization() {
    let mut draft = RoleDraft { utilization: 40, ..RoleDraft::default() };
    draft.select_role("Astronaut");
    assert_eq!(draft.utilization, 40);
}

#[test]
fn structure_guard_reports_blank_duplicate_and_bounds() {
    let mut wizard = WizardState::opened();
    wizard.details = valid_details();
    wizard.step = WizardStep::Structure;
    wizard.roles = vec![
        role("Developer", 2, 100),
        role(" developer ", 1, 100),
        role("", 0, 100),
        role("Scrum Master", 1, 75),
    ];

    assert!(!wizard.advance());
    assert_eq!(wizard.step, WizardStep::Structure);
    let keys: Vec<_> = wizard.errors.keys().collect();
    assert_eq!(
        keys,
        vec!["roles.1.role_name", "roles.2.required_count", "roles.2.role_name", "roles.3.utilization"]
    );
    assert_eq!(wizard.errors.get("roles.1.role_name"), Some("Duplicate role: developer"));
    assert_eq!(wizard.errors.get("roles.3.utilization"), Some("Utilization must be between 1 and 50%"));
    assert!(wizard.allocations.is_empty());
}

#[test]
fn structure_guard_requires_a_role() {
    let mut wizard = WizardState::opened();
    wizard.roles.clear();
    let errors = wizard.validate_structure();
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["roles"]);
}

#[test]
fn structure_guard_rejects_zero_utilization() {
    let mut wizard = WizardState::opened();
    wizard.roles = vec![role("Developer", 1, 0)];
    assert!(wizard.validate_structure().contains("roles.0.utilization"));
}

// =============================================================
// Step 3 row generation
// =============================================================

#[test]
fn entering_allotment_generates_rows_per_headcount() {
    let wizard = wizard_at_allotment();
    let developers = wizard.allocations.iter().filter(|r| r.role_name == "Developer").count();
    let qa = wizard.allocations.iter().filter(|r| r.role_name == "QA Engineer").count();
    assert_eq!(developers, 2);
    assert_eq!(qa, 1);
    assert_eq!(wizard.allocations.len(), 3);

    let qa_row = &wizard.allocations[2];
    assert_eq!(qa_row.employee_id, None);
    assert_eq!(qa_row.start_date, "2026-11-01");
    assert_eq!(qa_row.end_date, "2027-04-30");
    assert_eq!(qa_row.allocation_percentage, 50);
    assert_eq!(qa_row.internal_allocation_percentage, 50);
    assert_eq!(qa_row.billable_percentage, 100);
}

#[test]
fn reentering_allotment_keeps_existing_rows() {
    let mut wizard = wizard_at_allotment();
    staff(&mut wizard.allocations[0], 1, "Asha Rao");
    assert!(wizard.back());
    wizard.roles[0].required_count = 5;
    assert!(wizard.advance());
    assert_eq!(wizard.allocations.len(), 3);
    assert_eq!(wizard.allocations[0].employee_id, Some(1));
}

#[test]
fn back_never_validates_and_clears_errors() {
    let mut wizard = wizard_at_allotment();
    assert!(!wizard.advance());
    assert!(!wizard.errors.is_empty());
    assert!(wizard.back());
    assert_eq!(wizard.step, WizardStep::Structure);
    assert!(wizard.errors.is_empty());
}

#[test]
fn back_from_details_is_a_noop() {
    let mut wizard = WizardState::opened();
    assert!(!wizard.back());
    assert_eq!(wizard.step, WizardStep::Details);
}

// =============================================================
// Step 3 guard
// =============================================================

#[test]
fn allotment_guard_requires_employee_on_every_row() {
    let mut wizard = wizard_at_allotment();
    staff(&mut wizard.allocations[0], 1, "Asha Rao");
    assert!(!wizard.advance());
    let keys: Vec<_> = wizard.errors.keys().collect();
    assert_eq!(keys, vec!["allocations.1.employee_id", "allocations.2.employee_id"]);
}

#[test]
fn allotment_guard_checks_dates_and_percentages() {
    let mut wizard = staffed_wizard();
    wizard.allocations[0].start_date.clear();
    wizard.allocations[1].end_date = "2026-10-01".to_owned();
    wizard.allocations[2].billable_percentage = 120;
    let errors = wizard.validate_allocations();
    assert_eq!(errors.get("allocations.0.start_date"), Some("Start date is required"));
    assert_eq!(errors.get("allocations.1.end_date"), Some("End date must be on or after start date"));
    assert_eq!(errors.get("allocations.2.billable_percentage"), Some("Must be between 0 and 100"));
    assert_eq!(errors.len(), 3);
}

#[test]
fn blank_or_decimal_percentage_blocks_allotment() {
    let mut wizard = staffed_wizard();
    wizard.allocations[0].set_percentage("internal_allocation_percentage", "50.5");
    wizard.allocations[1].set_percentage("billable_percentage", "");
    assert_eq!(wizard.allocations[0].internal_allocation_percentage, 100);

    let errors = wizard.validate_allocations();
    assert_eq!(errors.get("allocations.0.internal_allocation_percentage"), Some(WHOLE_PERCENT_MESSAGE));
    assert_eq!(errors.get("allocations.1.billable_percentage"), Some(WHOLE_PERCENT_MESSAGE));
    assert!(!wizard.advance());

    wizard.allocations[0].set_percentage("internal_allocation_percentage", "50");
    wizard.allocations[1].set_percentage("billable_percentage", "0");
    assert!(wizard.validate_allocations().is_empty());
    assert_eq!(wizard.allocations[0].internal_allocation_percentage, 50);
}

#[test]
fn unparsed_role_numbers_are_reported_not_zeroed() {
    let mut wizard = WizardState::opened();
    wizard.roles = vec![role("Developer", 2, 100)];
    wizard.roles[0].set_required_count("1.5");
    wizard.roles[0].set_utilization("");
    assert_eq!(wizard.roles[0].required_count, 2);
    assert_eq!(wizard.roles[0].rejected.text("utilization", wizard.roles[0].utilization), "");

    let errors = wizard.validate_structure();
    assert_eq!(errors.get("roles.0.required_count"), Some("Required count must be a whole number"));
    assert_eq!(errors.get("roles.0.utilization"), Some("Utilization must be a whole number 1–100"));
}

#[test]
fn trainee_requires_non_trainee_mentor() {
    let mut wizard = staffed_wizard();
    wizard.allocations[2].is_trainee = true;
    assert_eq!(
        wizard.validate_allocations().get("allocations.2.mentor_employee_id"),
        Some("Trainees need a mentor")
    );

    wizard.allocations[1].is_trainee = true;
    wizard.allocations[1].mentor_employee_id = Some(1);
    wizard.allocations[2].mentor_employee_id = Some(2);
    let errors = wizard.validate_allocations();
    assert!(!errors.contains("allocations.1.mentor_employee_id"));
    assert_eq!(
        errors.get("allocations.2.mentor_employee_id"),
        Some("Mentor must be a non-trainee member of this team")
    );
}

#[test]
fn trainee_cannot_mentor_themselves() {
    let mut wizard = staffed_wizard();
    wizard.allocations[2].is_trainee = true;
    wizard.allocations[2].mentor_employee_id = Some(3);
    assert!(wizard.validate_allocations().contains("allocations.2.mentor_employee_id"));
}

#[test]
fn staffed_wizard_reaches_review() {
    let mut wizard = staffed_wizard();
    assert!(wizard.advance());
    assert_eq!(wizard.step, WizardStep::Review);
    assert!(!wizard.advance());
    assert_eq!(wizard.step, WizardStep::Review);
}

#[test]
fn mentor_candidates_exclude_trainees_and_blanks() {
    let mut wizard = wizard_at_allotment();
    staff(&mut wizard.allocations[0], 1, "Asha Rao");
    staff(&mut wizard.allocations[1], 2, "Ben Ortiz");
    wizard.allocations[1].is_trainee = true;
    assert_eq!(wizard.mentor_candidates(), vec![(1, "Asha Rao".to_owned())]);
}

#[test]
fn add_and_remove_rows() {
    let mut wizard = wizard_at_allotment();
    wizard.add_allocation_row("QA Engineer");
    assert_eq!(wizard.allocations.len(), 4);
    assert_eq!(wizard.allocations[3].allocation_percentage, 50);
    wizard.remove_allocation_row(0);
    wizard.remove_allocation_row(99);
    assert_eq!(wizard.allocations.len(), 3);
}

// =============================================================
// AI suggestions
// =============================================================

#[test]
fn suggestions_replace_rows() {
    let mut wizard = staffed_wizard();
    wizard.suggesting = true;
    let mut trainee = suggestion("Developer", 12);
    trainee.is_trainee = true;
    trainee.mentoring_primary_emp_id = Some(11);
    wizard.apply_suggestions(Ok(vec![suggestion("Developer", 11), trainee]));

    assert!(!wizard.suggesting);
    assert_eq!(wizard.allocations.len(), 2);
    assert_eq!(wizard.allocations[0].employee_id, Some(11));
    assert_eq!(wizard.allocations[0].allocation_percentage, 100);
    assert_eq!(wizard.allocations[0].billing_rate, "85");
    assert_eq!(wizard.allocations[1].billable_percentage, 0);
    assert_eq!(wizard.allocations[1].mentor_employee_id, Some(11));
    assert_eq!(wizard.notice.as_deref(), Some("Applied 2 suggested assignments."));
}

#[test]
fn failed_suggestions_fall_back_to_empty_rows() {
    let mut wizard = staffed_wizard();
    wizard.apply_suggestions(Err(ApiError::Network("offline".to_owned())));
    assert_eq!(wizard.allocations.len(), 3);
    assert!(wizard.allocations.iter().all(|row| row.employee_id.is_none()));
    assert!(wizard.notice.as_deref().unwrap().starts_with("AI suggestions unavailable"));
}

#[test]
fn empty_suggestions_fall_back_to_empty_rows() {
    let mut wizard = staffed_wizard();
    wizard.apply_suggestions(Ok(Vec::new()));
    assert_eq!(wizard.allocations.len(), 3);
    assert!(wizard.allocations.iter().all(|row| row.employee_id.is_none()));
}

#[test]
fn suggestion_request_carries_structure() {
    let wizard = wizard_at_allotment();
    let request = wizard.suggestion_request().unwrap();
    assert_eq!(request.project.project_name, "Atlas");
    assert_eq!(request.team_structure.len(), 2);
    assert_eq!(request.team_structure[1].utilization_percentage, 50);
}

// =============================================================
// Submission
// =============================================================

#[test]
fn build_payload_aggregates_all_steps() {
    let mut wizard = staffed_wizard();
    wizard.allocations[0].billing_rate = "90.5".to_owned();
    let payload = wizard.build_payload().unwrap();
    assert_eq!(payload.project.client_name, "Acme");
    assert_eq!(payload.team_structure[0].required_count, 2);
    assert_eq!(payload.allocations.len(), 3);
    assert_eq!(payload.allocations[0].billing_rate, Some(90.5));
    assert_eq!(payload.allocations[1].billing_rate, None);
    assert_eq!(payload.allocations[2].role_name.as_deref(), Some("QA Engineer"));
}

#[test]
fn begin_submit_is_exclusive() {
    let mut wizard = staffed_wizard();
    assert!(wizard.advance());
    assert!(wizard.begin_submit().is_some());
    assert!(wizard.submitting);
    assert!(wizard.begin_submit().is_none());
}

#[test]
fn begin_submit_with_invalid_state_jumps_to_failing_step() {
    let mut wizard = staffed_wizard();
    assert!(wizard.advance());
    wizard.details.client_name.clear();
    assert!(wizard.begin_submit().is_none());
    assert_eq!(wizard.step, WizardStep::Details);
    assert!(wizard.errors.contains("client_name"));
    assert!(!wizard.submitting);
}

#[test]
fn successful_submit_clears_and_closes() {
    let mut wizard = staffed_wizard();
    assert!(wizard.advance());
    wizard.begin_submit().unwrap();
    let response = CreateProjectResponse {
        project: Some(Project {
            id: 42,
            client_name: "Acme".to_owned(),
            project_name: "Atlas".to_owned(),
            project_type: None,
            description: None,
            budget_cap: None,
            start_date: None,
            end_date: None,
            status: None,
            probability: None,
            tech_stack: None,
        }),
        id: None,
        message: None,
    };
    assert_eq!(wizard.finish_submit(Ok(response)), Some(42));
    assert!(!wizard.open);
    assert_eq!(wizard.step, WizardStep::Details);
    assert!(wizard.allocations.is_empty());
    assert_eq!(wizard.details, ProjectDetailsForm::default());
}

#[test]
fn failed_submit_preserves_state_and_shows_backend_message() {
    let mut wizard = staffed_wizard();
    assert!(wizard.advance());
    wizard.begin_submit().unwrap();
    let err = ApiError::from_response(409, r#"{"error":"Total internal allocation for Asha Rao would be 150%"}"#);
    assert_eq!(wizard.finish_submit(Err(err)), None);
    assert!(wizard.open);
    assert!(!wizard.submitting);
    assert_eq!(wizard.step, WizardStep::Review);
    assert_eq!(wizard.allocations.len(), 3);
    assert_eq!(
        wizard.submit_error.as_deref(),
        Some("Total internal allocation for Asha Rao would be 150%")
    );
}

// =============================================================
// Cancellation & RFP prefill
// =============================================================

#[test]
fn cancel_requires_confirmation() {
    let mut wizard = staffed_wizard();
    assert!(!wizard.confirm_cancel());
    assert!(wizard.open);

    wizard.request_cancel();
    wizard.keep_editing();
    assert!(!wizard.confirm_cancel());
    assert_eq!(wizard.allocations.len(), 3);

    wizard.request_cancel();
    assert!(wizard.confirm_cancel());
    assert!(!wizard.open);
    assert!(wizard.allocations.is_empty());
}

#[test]
fn rfp_prefill_copies_known_fields() {
    let mut wizard = WizardState::opened();
    wizard.prefill_from_rfp(&RfpProject {
        project_name: Some("Claims Portal".to_owned()),
        description: Some("Rebuild the claims intake portal".to_owned()),
        skills: vec!["React".to_owned(), " Rust ".to_owned()],
        budget: Some(100_000.0),
        timeline: Some("6 months".to_owned()),
        domain: Some("IT".to_owned()),
    });
    assert_eq!(wizard.details.project_name, "Claims Portal");
    assert_eq!(wizard.details.tech_stack, "React, Rust");
    assert_eq!(wizard.details.budget_cap, "100000");
    assert!(wizard.details.client_name.is_empty());
}

#[test]
fn normalize_tags_drops_blanks() {
    assert_eq!(normalize_tags(" a, ,b,,c "), "a, b, c");
    assert_eq!(normalize_tags(""), "");
}
