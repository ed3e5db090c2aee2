//! Employee edit/create, skill, and risk modal forms.
//!
//! Each form keeps raw input strings, validates to a [`FieldErrors`] map, and
//! only then produces the typed request body.

#[cfg(test)]
#[path = "employee_forms_test.rs"]
mod employee_forms_test;

use time::Date;

use crate::net::types::{
    Employee, EmployeePayload, EmployeeStatus, RiskPayload, RiskSeverity, RiskType, RoleLevel, SkillPayload,
};
use crate::state::wizard::non_blank;
use crate::util::dates::parse_iso_date;
use crate::util::validation::{FieldErrors, parse_int, parse_number};

pub const MIN_PROFICIENCY: i32 = 1;
pub const MAX_PROFICIENCY: i32 = 5;

/// Currency used when the employee record carries none.
pub const DEFAULT_CURRENCY: &str = "USD";

// =============================================================================
// EMPLOYEE
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeForm {
    /// `None` when creating a new employee.
    pub employee_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_level: RoleLevel,
    pub status: EmployeeStatus,
    pub ctc_monthly: String,
    pub currency: String,
    pub base_location: String,
    pub remote_pref: bool,
    pub bio_summary: String,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            employee_id: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            role_level: RoleLevel::Mid,
            status: EmployeeStatus::Bench,
            ctc_monthly: String::new(),
            currency: DEFAULT_CURRENCY.to_owned(),
            base_location: String::new(),
            remote_pref: false,
            bio_summary: String::new(),
        }
    }
}

impl EmployeeForm {
    /// Pre-fill the edit modal from an existing record.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            employee_id: Some(employee.id),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            role_level: employee.role_level.unwrap_or(RoleLevel::Mid),
            status: employee.status.unwrap_or(EmployeeStatus::Bench),
            ctc_monthly: employee.ctc_monthly.map(|c| c.to_string()).unwrap_or_default(),
            currency: employee.currency.clone().unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            base_location: employee.base_location.clone().unwrap_or_default(),
            remote_pref: employee.remote_pref,
            bio_summary: employee.bio_summary.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.employee_id.is_none()
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("first_name", &self.first_name, "First name");
        errors.require("last_name", &self.last_name, "Last name");
        errors.require("email", &self.email, "Email");
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            errors.insert("email", "Enter a valid email address");
        }
        match parse_number(&self.ctc_monthly) {
            None => errors.insert("ctc_monthly", "Monthly CTC is required"),
            Some(Err(())) => errors.insert("ctc_monthly", "Monthly CTC must be a number"),
            Some(Ok(ctc)) if ctc < 0.0 => errors.insert("ctc_monthly", "Monthly CTC must be zero or greater"),
            Some(Ok(_)) => {}
        }
        errors
    }

    /// # Errors
    ///
    /// Returns the field errors when the form is invalid.
    pub fn to_payload(&self) -> Result<EmployeePayload, FieldErrors> {
        self.validate().into_result()?;
        let ctc_monthly = parse_number(&self.ctc_monthly).and_then(Result::ok).unwrap_or_default();
        Ok(EmployeePayload {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            role_level: self.role_level,
            status: self.status,
            ctc_monthly,
            currency: non_blank(&self.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            base_location: non_blank(&self.base_location),
            remote_pref: self.remote_pref,
            bio_summary: non_blank(&self.bio_summary),
        })
    }
}

// =============================================================================
// SKILL
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillForm {
    pub skill_name: String,
    pub proficiency: String,
    pub last_used: String,
    pub is_verified: bool,
}

impl Default for SkillForm {
    fn default() -> Self {
        Self { skill_name: String::new(), proficiency: "3".to_owned(), last_used: String::new(), is_verified: false }
    }
}

impl SkillForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("skill_name", &self.skill_name, "Skill name");
        match parse_int(&self.proficiency) {
            Some(p) if (MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&p) => {}
            _ => errors.insert(
                "proficiency",
                format!("Proficiency must be between {MIN_PROFICIENCY} and {MAX_PROFICIENCY}"),
            ),
        }
        if !self.last_used.trim().is_empty() && parse_iso_date(&self.last_used).is_none() {
            errors.insert("last_used", "Enter a valid date");
        }
        errors
    }

    /// # Errors
    ///
    /// Returns the field errors when the form is invalid.
    pub fn to_payload(&self) -> Result<SkillPayload, FieldErrors> {
        self.validate().into_result()?;
        let proficiency = parse_int(&self.proficiency).and_then(|p| u8::try_from(p).ok()).unwrap_or(1);
        Ok(SkillPayload {
            skill_name: self.skill_name.trim().to_owned(),
            proficiency,
            last_used: non_blank(&self.last_used),
            is_verified: self.is_verified,
        })
    }
}

// =============================================================================
// RISK
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiskForm {
    pub risk_type: RiskType,
    pub severity: RiskSeverity,
    pub description: String,
    pub project_id: Option<i64>,
    pub mitigation_plan: String,
    pub mitigation_owner_emp_id: Option<i64>,
    pub target_resolution_date: String,
}

impl Default for RiskForm {
    fn default() -> Self {
        Self {
            risk_type: RiskType::NoticePeriod,
            severity: RiskSeverity::Medium,
            description: String::new(),
            project_id: None,
            mitigation_plan: String::new(),
            mitigation_owner_emp_id: None,
            target_resolution_date: String::new(),
        }
    }
}

impl RiskForm {
    /// The target date, when given, may not lie before `today`.
    #[must_use]
    pub fn validate(&self, today: Date) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("description", &self.description, "Description");
        if !self.target_resolution_date.trim().is_empty() {
            match parse_iso_date(&self.target_resolution_date) {
                None => errors.insert("target_resolution_date", "Enter a valid date"),
                Some(date) if date < today => {
                    errors.insert("target_resolution_date", "Target date cannot be in the past");
                }
                Some(_) => {}
            }
        }
        errors
    }

    /// # Errors
    ///
    /// Returns the field errors when the form is invalid.
    pub fn to_payload(&self, today: Date) -> Result<RiskPayload, FieldErrors> {
        self.validate(today).into_result()?;
        Ok(RiskPayload {
            risk_type: self.risk_type,
            severity: self.severity,
            description: self.description.trim().to_owned(),
            project_id: self.project_id,
            mitigation_plan: non_blank(&self.mitigation_plan),
            mitigation_owner_emp_id: self.mitigation_owner_emp_id,
            target_resolution_date: non_blank(&self.target_resolution_date),
        })
    }
}
