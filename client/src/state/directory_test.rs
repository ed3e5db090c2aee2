use super::*;

fn employee(id: i64, first: &str, status: EmployeeStatus) -> Employee {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "first_name": first,
        "last_name": "Test",
        "email": format!("{}@example.com", first.to_lowercase()),
        "status": status,
    }))
    .unwrap()
}

fn list(employees: Vec<Employee>) -> EmployeeListResponse {
    EmployeeListResponse { count: employees.len(), employees }
}

#[test]
fn only_latest_search_ticket_settles() {
    let mut state = DirectoryState::default();
    let first = state.set_search("a");
    let second = state.set_search("an");
    assert!(!state.search_settled(first));
    assert!(state.search_settled(second));
    assert_eq!(state.filters.search, "an");
}

#[test]
fn clearing_filters_cancels_pending_search() {
    let mut state = DirectoryState::default();
    let ticket = state.set_search("ana");
    state.set_status(Some(EmployeeStatus::Bench));
    state.clear_filters();
    assert!(!state.search_settled(ticket));
    assert!(!state.filters.is_filtered());
}

#[test]
fn fetch_snapshot_carries_current_filters() {
    let mut state = DirectoryState::default();
    state.set_status(Some(EmployeeStatus::NoticePeriod));
    state.set_role_level(Some(RoleLevel::Lead));
    let (_, filters) = state.begin_fetch();
    assert_eq!(filters.status, Some(EmployeeStatus::NoticePeriod));
    assert_eq!(filters.role_level, Some(RoleLevel::Lead));
    assert!(state.loading);
}

#[test]
fn out_of_order_responses_keep_newest() {
    let mut state = DirectoryState::default();
    let (old, _) = state.begin_fetch();
    let (new, _) = state.begin_fetch();

    assert!(state.finish_fetch(new, Ok(list(vec![employee(2, "Ben", EmployeeStatus::Bench)]))));
    assert!(!state.finish_fetch(old, Ok(list(vec![employee(1, "Asha", EmployeeStatus::Allocated)]))));
    assert_eq!(state.employees.len(), 1);
    assert_eq!(state.employees[0].id, 2);
    assert!(!state.loading);
}

#[test]
fn failed_fetch_reports_generic_network_message() {
    let mut state = DirectoryState::default();
    let (seq, _) = state.begin_fetch();
    state.finish_fetch(seq, Err(ApiError::Network("offline".to_owned())));
    assert_eq!(state.error.as_deref(), Some(crate::net::error::NETWORK_ERROR_MESSAGE));
}

#[test]
fn replace_and_remove_keep_order() {
    let mut state = DirectoryState::default();
    let (seq, _) = state.begin_fetch();
    state.finish_fetch(
        seq,
        Ok(list(vec![
            employee(1, "Asha", EmployeeStatus::Bench),
            employee(2, "Ben", EmployeeStatus::Bench),
            employee(3, "Chen", EmployeeStatus::Allocated),
        ])),
    );
    state.replace(employee(2, "Benjamin", EmployeeStatus::Allocated));
    assert_eq!(state.employees[1].first_name, "Benjamin");
    state.remove(1);
    let ids: Vec<_> = state.employees.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(
        state.status_counts(),
        vec![(EmployeeStatus::Bench, 0), (EmployeeStatus::Allocated, 2), (EmployeeStatus::NoticePeriod, 0)]
    );
}

#[test]
fn filters_persist_as_json() {
    let filters = DirectoryFilters {
        status: Some(EmployeeStatus::Bench),
        role_level: Some(RoleLevel::Sr),
        search: "rust".to_owned(),
    };
    let raw = serde_json::to_string(&filters).unwrap();
    assert_eq!(raw, r#"{"status":"BENCH","role_level":"SR","search":"rust"}"#);
    let restored: DirectoryFilters = serde_json::from_str(r"{}").unwrap();
    assert_eq!(restored, DirectoryFilters::default());
}
