//! Single-document upload state shared by the resume, certificate, and RFP
//! uploaders.
//!
//! DESIGN
//! ======
//! Files are checked locally (PDF only, bounded size) before any bytes leave
//! the browser. The backend answer is kept as a typed outcome per upload kind
//! and projected to label/value pairs for display.

#[cfg(test)]
#[path = "uploads_test.rs"]
mod uploads_test;

use crate::net::api::API_BASE;
use crate::net::error::ApiError;
use crate::net::types::{CertificateUploadResponse, ResumeUploadResponse, RfpUploadResponse};

/// Largest accepted document, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const PDF_MIME: &str = "application/pdf";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadKind {
    Resume,
    Certificate,
    Rfp,
}

impl UploadKind {
    #[must_use]
    pub fn endpoint(self) -> String {
        match self {
            Self::Resume => format!("{API_BASE}/documents/upload/resume"),
            Self::Certificate => format!("{API_BASE}/documents/upload/certificate"),
            Self::Rfp => format!("{API_BASE}/rfp/upload"),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::Certificate => "Certificate",
            Self::Rfp => "RFP document",
        }
    }
}

/// Reasons a file is rejected before upload.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FileRejection {
    #[error("Choose a file to upload")]
    Missing,
    #[error("Only PDF files are accepted")]
    NotPdf,
    #[error("File is too large ({size_mb:.1} MB); the limit is 10 MB")]
    TooLarge { size_mb: f64 },
}

/// Accept a file by `.pdf` extension or PDF MIME type, up to [`MAX_UPLOAD_BYTES`].
///
/// # Errors
///
/// Returns the [`FileRejection`] describing why the file cannot be sent.
pub fn check_file(name: &str, mime: &str, size: u64) -> Result<(), FileRejection> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FileRejection::Missing);
    }
    let is_pdf = name.to_ascii_lowercase().ends_with(".pdf") || mime.trim().eq_ignore_ascii_case(PDF_MIME);
    if !is_pdf {
        return Err(FileRejection::NotPdf);
    }
    if size > MAX_UPLOAD_BYTES {
        #[allow(clippy::cast_precision_loss)]
        let size_mb = size as f64 / (1024.0 * 1024.0);
        return Err(FileRejection::TooLarge { size_mb });
    }
    Ok(())
}

/// Parsed backend answer for one upload.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadOutcome {
    Resume(ResumeUploadResponse),
    Certificate(CertificateUploadResponse),
    Rfp(RfpUploadResponse),
}

impl UploadOutcome {
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::Resume(r) => &r.filename,
            Self::Certificate(c) => &c.filename,
            Self::Rfp(r) => &r.filename,
        }
    }

    /// Label/value pairs shown under the uploader.
    #[must_use]
    pub fn summary(&self) -> Vec<(String, String)> {
        match self {
            Self::Resume(resume) => summarize_json(&resume.parsed),
            Self::Certificate(response) => {
                let cert = &response.certificate;
                let mut rows = Vec::new();
                push_opt(&mut rows, "Issuer", cert.issuer.as_deref());
                push_opt(&mut rows, "Date", cert.date.as_deref());
                push_opt(&mut rows, "Skill", cert.skill.as_deref());
                rows.push(("Valid".to_owned(), if cert.valid { "Yes" } else { "No" }.to_owned()));
                rows
            }
            Self::Rfp(response) => {
                let project = &response.project;
                let mut rows = Vec::new();
                push_opt(&mut rows, "Project", project.project_name.as_deref());
                push_opt(&mut rows, "Domain", project.domain.as_deref());
                push_opt(&mut rows, "Timeline", project.timeline.as_deref());
                if let Some(budget) = project.budget {
                    rows.push(("Budget".to_owned(), format!("{budget:.0}")));
                }
                if !project.skills.is_empty() {
                    rows.push(("Skills".to_owned(), project.skills.join(", ")));
                }
                push_opt(&mut rows, "Description", project.description.as_deref());
                rows
            }
        }
    }
}

fn push_opt(rows: &mut Vec<(String, String)>, label: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        rows.push((label.to_owned(), value.to_owned()));
    }
}

/// Flatten a top-level JSON object to display pairs; nested values are joined.
#[must_use]
pub fn summarize_json(value: &serde_json::Value) -> Vec<(String, String)> {
    let Some(object) = value.as_object() else {
        return display_value(value).map(|v| vec![("Result".to_owned(), v)]).unwrap_or_default();
    };
    object
        .iter()
        .filter_map(|(key, value)| Some((humanize_key(key), display_value(value)?)))
        .collect()
}

fn display_value(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_value).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> =
                map.iter().filter_map(|(k, v)| Some(format!("{}: {}", humanize_key(k), display_value(v)?))).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
    }
}

/// `"years_of_experience"` → `"Years of experience"`.
#[must_use]
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Done(UploadOutcome),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadState {
    pub kind: UploadKind,
    pub selected: Option<String>,
    pub status: UploadStatus,
}

impl UploadState {
    #[must_use]
    pub fn new(kind: UploadKind) -> Self {
        Self { kind, selected: None, status: UploadStatus::Idle }
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    /// Check the chosen file; on success the state moves to `Uploading`.
    ///
    /// Returns `false` while another upload is running, or when the file is
    /// rejected (the status then carries the reason).
    pub fn begin(&mut self, name: &str, mime: &str, size: u64) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.selected = Some(name.to_owned()).filter(|n| !n.trim().is_empty());
        match check_file(name, mime, size) {
            Ok(()) => {
                self.status = UploadStatus::Uploading;
                true
            }
            Err(rejection) => {
                self.status = UploadStatus::Failed(rejection.to_string());
                false
            }
        }
    }

    pub fn finish(&mut self, result: Result<UploadOutcome, ApiError>) {
        self.status = match result {
            Ok(outcome) => UploadStatus::Done(outcome),
            Err(err) => UploadStatus::Failed(err.user_message()),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}
