//! REST API helpers for communicating with the backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the same
//! origin; the host server forwards `/api/v1/*` to the backend.
//! Server-side (SSR): every call returns [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>` instead of panics so fetch failures stay
//! scoped to the form or page that triggered them. Nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    AllocationCheckRequest, AllocationCheckResponse, AllocationReport, CreateProjectPayload, CreateProjectResponse,
    Employee, EmployeeListResponse, EmployeePayload, EmployeeStatus, KpiResponse, ProjectDetailResponse,
    ProjectListResponse, RiskPayload, RoleLevel, SkillGapRequest, SkillGapResponse, SkillPayload,
    TeamSuggestionRequest, TeamSuggestionResponse, TeamUpdatePayload, TrainingRecommendationResponse,
};
use crate::state::reports::ReportQuery;

/// Path prefix of every backend route.
pub const API_BASE: &str = "/api/v1";

// =============================================================================
// ENDPOINTS
// =============================================================================

/// Append `key=value` pairs, skipping empty values, to `path`.
fn with_query(path: &str, pairs: &[(&str, Option<&str>)]) -> String {
    let query = pairs
        .iter()
        .filter_map(|(key, value)| {
            let value = value.map(str::trim).filter(|v| !v.is_empty())?;
            Some(format!("{key}={}", urlencoding::encode(value)))
        })
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() { path.to_owned() } else { format!("{path}?{query}") }
}

fn employees_endpoint(status: Option<EmployeeStatus>, role_level: Option<RoleLevel>, search: &str) -> String {
    with_query(
        &format!("{API_BASE}/employees/"),
        &[
            ("status", status.map(EmployeeStatus::as_str)),
            ("role_level", role_level.map(RoleLevel::as_str)),
            ("search", Some(search)),
        ],
    )
}

fn employee_endpoint(employee_id: i64) -> String {
    format!("{API_BASE}/employees/{employee_id}")
}

fn employee_skills_endpoint(employee_id: i64) -> String {
    format!("{API_BASE}/employees/{employee_id}/skills")
}

fn employee_risks_endpoint(employee_id: i64) -> String {
    format!("{API_BASE}/employees/{employee_id}/risks")
}

fn project_endpoint(project_id: i64) -> String {
    format!("{API_BASE}/projects/{project_id}")
}

fn project_team_endpoint(project_id: i64) -> String {
    format!("{API_BASE}/projects/{project_id}/team")
}

fn allocation_report_endpoint(query: &ReportQuery) -> String {
    report_query_endpoint("generate", query)
}

/// Spreadsheet download of the same report; used as a plain link target.
#[must_use]
pub fn allocation_report_export_endpoint(query: &ReportQuery) -> String {
    report_query_endpoint("export-excel", query)
}

fn report_query_endpoint(action: &str, query: &ReportQuery) -> String {
    let project_id = query.project_id.map(|id| id.to_string());
    with_query(
        &format!("{API_BASE}/allocation-reports/{action}"),
        &[
            ("report_type", Some(query.report_type.as_str())),
            ("level", Some(query.level.as_str())),
            ("project_id", project_id.as_deref()),
            ("start_date", query.start_date.as_deref()),
            ("end_date", query.end_date.as_deref()),
        ],
    )
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
async fn decode<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        leptos::logging::warn!("api error: {} {} -> {status}", resp.url(), body);
        return Err(ApiError::from_response(status, &body));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn get_json<T: DeserializeOwned>(url: String) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&url).send().await.map_err(network)?;
        decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(ApiError::Unavailable)
    }
}

#[derive(Clone, Copy)]
enum Method {
    Post,
    Put,
}

async fn send_json<B: Serialize, T: DeserializeOwned>(method: Method, url: String, body: &B) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = match method {
            Method::Post => gloo_net::http::Request::post(&url),
            Method::Put => gloo_net::http::Request::put(&url),
        };
        let resp = builder.json(body).map_err(network)?.send().await.map_err(network)?;
        decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, url, body);
        Err(ApiError::Unavailable)
    }
}

// =============================================================================
// EMPLOYEES
// =============================================================================

/// List employees from `GET /employees/` with optional filters.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn fetch_employees(
    status: Option<EmployeeStatus>,
    role_level: Option<RoleLevel>,
    search: &str,
) -> Result<EmployeeListResponse, ApiError> {
    get_json(employees_endpoint(status, role_level, search)).await
}

/// Fetch the full 360 view of one employee.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn fetch_employee(employee_id: i64) -> Result<Employee, ApiError> {
    get_json(employee_endpoint(employee_id)).await
}

/// Create an employee via `POST /employees/`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the backend rejects the payload.
pub async fn create_employee(payload: &EmployeePayload) -> Result<serde_json::Value, ApiError> {
    send_json(Method::Post, format!("{API_BASE}/employees/"), payload).await
}

/// Update an employee via `PUT /employees/{id}`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the backend rejects the payload.
pub async fn update_employee(employee_id: i64, payload: &EmployeePayload) -> Result<serde_json::Value, ApiError> {
    send_json(Method::Put, employee_endpoint(employee_id), payload).await
}

/// Delete an employee via `DELETE /employees/{id}`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn delete_employee(employee_id: i64) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&employee_endpoint(employee_id))
            .send()
            .await
            .map_err(network)?;
        decode::<serde_json::Value>(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = employee_id;
        Err(ApiError::Unavailable)
    }
}

/// Add (or update) a skill via `POST /employees/{id}/skills`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the backend rejects the skill.
pub async fn add_skill(employee_id: i64, payload: &SkillPayload) -> Result<serde_json::Value, ApiError> {
    send_json(Method::Post, employee_skills_endpoint(employee_id), payload).await
}

/// Raise a risk flag via `POST /employees/{id}/risks`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the backend rejects the risk.
pub async fn raise_risk(employee_id: i64, payload: &RiskPayload) -> Result<serde_json::Value, ApiError> {
    send_json(Method::Post, employee_risks_endpoint(employee_id), payload).await
}

// =============================================================================
// PROJECTS
// =============================================================================

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn fetch_projects() -> Result<ProjectListResponse, ApiError> {
    get_json(format!("{API_BASE}/projects")).await
}

/// Fetch a project with its team and metrics.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn fetch_project(project_id: i64) -> Result<ProjectDetailResponse, ApiError> {
    get_json(project_endpoint(project_id)).await
}

/// Submit the wizard's aggregate payload via `POST /projects`.
///
/// # Errors
///
/// Returns an [`ApiError`] carrying the backend's message when creation fails.
pub async fn create_project(payload: &CreateProjectPayload) -> Result<CreateProjectResponse, ApiError> {
    send_json(Method::Post, format!("{API_BASE}/projects"), payload).await
}

/// Replace a project's allocations via `PUT /projects/{id}/team`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the backend rejects the team.
pub async fn update_project_team(project_id: i64, payload: &TeamUpdatePayload) -> Result<serde_json::Value, ApiError> {
    send_json(Method::Put, project_team_endpoint(project_id), payload).await
}

/// Ask the backend whether one allocation conflicts with the employee's others.
///
/// # Errors
///
/// Returns an [`ApiError`] if the check itself could not be performed.
pub async fn check_allocation(request: &AllocationCheckRequest) -> Result<AllocationCheckResponse, ApiError> {
    send_json(Method::Post, format!("{API_BASE}/allocations/validate"), request).await
}

/// Request AI-generated candidate assignments for a draft project.
///
/// # Errors
///
/// Returns an [`ApiError`] if suggestion generation fails.
pub async fn suggest_team(request: &TeamSuggestionRequest) -> Result<TeamSuggestionResponse, ApiError> {
    send_json(Method::Post, format!("{API_BASE}/projects/suggest-team"), request).await
}

// =============================================================================
// TRAINING, DASHBOARDS, REPORTS
// =============================================================================

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn fetch_training_recommendations() -> Result<TrainingRecommendationResponse, ApiError> {
    get_json(format!("{API_BASE}/training/recommendations")).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the analysis request fails.
pub async fn analyze_skill_gaps(request: &SkillGapRequest) -> Result<SkillGapResponse, ApiError> {
    send_json(Method::Post, format!("{API_BASE}/training/gap-analysis"), request).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body does not decode.
pub async fn fetch_kpi() -> Result<KpiResponse, ApiError> {
    get_json(format!("{API_BASE}/kpi")).await
}

/// # Errors
///
/// Returns an [`ApiError`] if the report cannot be generated.
pub async fn fetch_allocation_report(query: &ReportQuery) -> Result<AllocationReport, ApiError> {
    get_json(allocation_report_endpoint(query)).await
}

// =============================================================================
// UPLOADS
// =============================================================================

/// Upload a single PDF as multipart field `file` to `endpoint`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the form cannot be built, the upload fails, or
/// the backend rejects the document.
#[cfg(feature = "hydrate")]
pub async fn upload_file<T: DeserializeOwned>(endpoint: &str, file: &web_sys::File) -> Result<T, ApiError> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::Network("could not build form".to_owned()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Network("could not attach file".to_owned()))?;
    let resp = gloo_net::http::Request::post(endpoint)
        .body(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    decode(resp).await
}
