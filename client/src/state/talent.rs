//! Talent lab: training recommendations and skill-gap analysis form.

#[cfg(test)]
#[path = "talent_test.rs"]
mod talent_test;

use crate::net::error::ApiError;
use crate::net::types::{SkillGap, SkillGapRequest, SkillGapResponse, TrainingRecommendation};
use crate::state::wizard::normalize_tags;
use crate::util::validation::FieldErrors;

/// Inputs of the gap-analysis form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillGapForm {
    pub employee_id: Option<i64>,
    pub project_id: Option<i64>,
    /// Comma-separated skill names.
    pub target_skills: String,
}

impl SkillGapForm {
    /// An employee is always required; the target comes from a project or
    /// an explicit skill list.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.employee_id.is_none() {
            errors.insert("employee_id", "Select an employee");
        }
        if self.project_id.is_none() && self.skills().is_empty() {
            errors.insert("target_skills", "Choose a project or list target skills");
        }
        errors
    }

    fn skills(&self) -> Vec<String> {
        let normalized = normalize_tags(&self.target_skills);
        if normalized.is_empty() {
            return Vec::new();
        }
        normalized.split(", ").map(str::to_owned).collect()
    }

    /// # Errors
    ///
    /// Returns the field errors when the form is invalid.
    pub fn to_request(&self) -> Result<SkillGapRequest, FieldErrors> {
        self.validate().into_result()?;
        Ok(SkillGapRequest { employee_id: self.employee_id, project_id: self.project_id, target_skills: self.skills() })
    }
}

#[derive(Clone, Debug, Default)]
pub struct TalentLabState {
    pub recommendations: Vec<TrainingRecommendation>,
    pub recommendations_error: Option<String>,
    pub form: SkillGapForm,
    pub errors: FieldErrors,
    pub analysis: Option<SkillGapResponse>,
    pub analysis_error: Option<String>,
    pub analyzing: bool,
}

impl TalentLabState {
    pub fn set_recommendations(&mut self, result: Result<Vec<TrainingRecommendation>, ApiError>) {
        match result {
            Ok(list) => {
                self.recommendations = list;
                self.recommendations_error = None;
            }
            Err(err) => self.recommendations_error = Some(err.user_message()),
        }
    }

    /// Validate and mark an analysis in flight; `None` if invalid or busy.
    pub fn begin_analysis(&mut self) -> Option<SkillGapRequest> {
        if self.analyzing {
            return None;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.errors = FieldErrors::new();
                self.analyzing = true;
                self.analysis_error = None;
                Some(request)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn finish_analysis(&mut self, result: Result<SkillGapResponse, ApiError>) {
        self.analyzing = false;
        match result {
            Ok(response) => self.analysis = Some(response),
            Err(err) => self.analysis_error = Some(err.user_message()),
        }
    }

    /// Gaps with the largest shortfall first.
    #[must_use]
    pub fn ranked_gaps(&self) -> Vec<SkillGap> {
        let mut gaps = self.analysis.as_ref().map(|a| a.gaps.clone()).unwrap_or_default();
        gaps.sort_by(|a, b| b.shortfall().cmp(&a.shortfall()).then_with(|| a.skill.cmp(&b.skill)));
        gaps
    }
}
