use super::*;
use crate::state::directory::{DirectoryFilters, FILTER_STORAGE_KEY};

#[test]
fn decode_reads_partial_filters() {
    let filters: DirectoryFilters = decode(r#"{"status":"BENCH"}"#).unwrap();
    assert_eq!(filters.status, Some(crate::net::types::EmployeeStatus::Bench));
    assert!(filters.search.is_empty());
}

#[test]
fn decode_treats_corrupt_json_as_absent() {
    assert_eq!(decode::<DirectoryFilters>("{not json"), None);
    assert_eq!(decode::<DirectoryFilters>(r#"{"status":"RETIRED"}"#), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn storage_is_absent_off_browser() {
    save_json(FILTER_STORAGE_KEY, &DirectoryFilters::default());
    assert_eq!(load_json::<DirectoryFilters>(FILTER_STORAGE_KEY), None);
}
