use super::*;

fn gap(skill: &str, required: u8, current: u8) -> SkillGap {
    SkillGap { skill: skill.to_owned(), required_level: required, current_level: current }
}

#[test]
fn form_requires_employee_and_target() {
    let errors = SkillGapForm::default().validate();
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["employee_id", "target_skills"]);
}

#[test]
fn project_alone_is_a_valid_target() {
    let form = SkillGapForm { employee_id: Some(1), project_id: Some(4), target_skills: " , ".to_owned() };
    let request = form.to_request().unwrap();
    assert_eq!(request.project_id, Some(4));
    assert!(request.target_skills.is_empty());
}

#[test]
fn target_skills_are_split_and_trimmed() {
    let form = SkillGapForm { employee_id: Some(1), project_id: None, target_skills: "ML , Cloud,,".to_owned() };
    assert_eq!(form.to_request().unwrap().target_skills, vec!["ML", "Cloud"]);
}

#[test]
fn analysis_is_exclusive_and_records_errors() {
    let mut state = TalentLabState::default();
    assert!(state.begin_analysis().is_none());
    assert!(state.errors.contains("employee_id"));

    state.form = SkillGapForm { employee_id: Some(2), project_id: Some(3), target_skills: String::new() };
    assert!(state.begin_analysis().is_some());
    assert!(state.begin_analysis().is_none());

    state.finish_analysis(Err(ApiError::Network("down".to_owned())));
    assert!(!state.analyzing);
    assert!(state.analysis_error.is_some());
}

#[test]
fn gaps_rank_by_shortfall() {
    let mut state = TalentLabState::default();
    state.finish_analysis(Ok(SkillGapResponse {
        gaps: vec![gap("Cloud Computing", 3, 1), gap("Machine Learning", 4, 1), gap("Go", 2, 3)],
        recommendations: Vec::new(),
    }));
    let order: Vec<_> = state.ranked_gaps().into_iter().map(|g| g.skill).collect();
    assert_eq!(order, vec!["Machine Learning", "Cloud Computing", "Go"]);
}

#[test]
fn recommendation_failure_keeps_previous_list() {
    let mut state = TalentLabState::default();
    state.set_recommendations(Ok(vec![TrainingRecommendation {
        employee_id: Some(1),
        employee_name: Some("Asha".to_owned()),
        skill: "Rust".to_owned(),
        course: "Rustlings".to_owned(),
        provider: None,
        link: None,
        priority: Some("HIGH".to_owned()),
        reason: None,
    }]));
    state.set_recommendations(Err(ApiError::Server { status: 503, message: None }));
    assert_eq!(state.recommendations.len(), 1);
    assert_eq!(state.recommendations_error.as_deref(), Some("Request failed (status 503)"));
}
