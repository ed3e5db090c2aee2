//! Employee directory list state: filters, debounced search, stale guard.
//!
//! Search keystrokes are debounced by ticket: each edit issues a new ticket
//! and only the ticket still current after [`SEARCH_DEBOUNCE_MS`] triggers a
//! fetch. Fetches are stamped separately so an older response that lands
//! after a newer one is ignored.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use serde::{Deserialize, Serialize};

use crate::net::error::ApiError;
use crate::net::types::{Employee, EmployeeListResponse, EmployeeStatus, RoleLevel};

/// Quiet period after the last search keystroke before fetching.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// `localStorage` key for the persisted filter choices.
pub const FILTER_STORAGE_KEY: &str = "benchcraft_directory_filters";

/// Filters sent as query parameters to the list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFilters {
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    #[serde(default)]
    pub role_level: Option<RoleLevel>,
    #[serde(default)]
    pub search: String,
}

impl DirectoryFilters {
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.status.is_some() || self.role_level.is_some() || !self.search.trim().is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct DirectoryState {
    pub filters: DirectoryFilters,
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub error: Option<String>,
    search_ticket: u64,
    request_seq: u64,
}

impl DirectoryState {
    /// Start from previously persisted filters.
    #[must_use]
    pub fn with_filters(filters: DirectoryFilters) -> Self {
        Self { filters, ..Self::default() }
    }

    /// Record new search text and return the debounce ticket for it.
    pub fn set_search(&mut self, text: &str) -> u64 {
        self.filters.search = text.to_owned();
        self.search_ticket += 1;
        self.search_ticket
    }

    /// `true` when no keystroke arrived since `ticket` was issued.
    #[must_use]
    pub fn search_settled(&self, ticket: u64) -> bool {
        ticket == self.search_ticket
    }

    pub fn set_status(&mut self, status: Option<EmployeeStatus>) {
        self.filters.status = status;
    }

    pub fn set_role_level(&mut self, role_level: Option<RoleLevel>) {
        self.filters.role_level = role_level;
    }

    pub fn clear_filters(&mut self) {
        self.filters = DirectoryFilters::default();
        self.search_ticket += 1;
    }

    /// Stamp a new list request and return its sequence and filters.
    pub fn begin_fetch(&mut self) -> (u64, DirectoryFilters) {
        self.request_seq += 1;
        self.loading = true;
        (self.request_seq, self.filters.clone())
    }

    /// Apply a list response. Returns `false` when a newer request superseded it.
    pub fn finish_fetch(&mut self, seq: u64, result: Result<EmployeeListResponse, ApiError>) -> bool {
        if seq != self.request_seq {
            return false;
        }
        self.loading = false;
        match result {
            Ok(list) => {
                self.employees = list.employees;
                self.error = None;
            }
            Err(err) => self.error = Some(err.user_message()),
        }
        true
    }

    /// Replace one employee after an edit, keeping list order.
    pub fn replace(&mut self, employee: Employee) {
        if let Some(slot) = self.employees.iter_mut().find(|e| e.id == employee.id) {
            *slot = employee;
        }
    }

    pub fn remove(&mut self, employee_id: i64) {
        self.employees.retain(|e| e.id != employee_id);
    }

    /// Employees per status in the current list, in [`EmployeeStatus::ALL`] order.
    #[must_use]
    pub fn status_counts(&self) -> Vec<(EmployeeStatus, usize)> {
        EmployeeStatus::ALL
            .into_iter()
            .map(|status| (status, self.employees.iter().filter(|e| e.status == Some(status)).count()))
            .collect()
    }
}
