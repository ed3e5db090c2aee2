use super::*;
use crate::net::types::{CertificateInfo, RfpProject};

#[test]
fn endpoints_match_backend_routes() {
    assert_eq!(UploadKind::Resume.endpoint(), "/api/v1/documents/upload/resume");
    assert_eq!(UploadKind::Certificate.endpoint(), "/api/v1/documents/upload/certificate");
    assert_eq!(UploadKind::Rfp.endpoint(), "/api/v1/rfp/upload");
}

// =============================================================
// File checks
// =============================================================

#[test]
fn pdf_accepted_by_extension_or_mime() {
    assert_eq!(check_file("CV.PDF", "", 1024), Ok(()));
    assert_eq!(check_file("scan", "application/pdf", 1024), Ok(()));
}

#[test]
fn non_pdf_rejected() {
    assert_eq!(check_file("cv.docx", "application/msword", 10), Err(FileRejection::NotPdf));
}

#[test]
fn missing_file_rejected() {
    assert_eq!(check_file("  ", PDF_MIME, 10), Err(FileRejection::Missing));
}

#[test]
fn size_limit_is_inclusive() {
    assert_eq!(check_file("a.pdf", PDF_MIME, MAX_UPLOAD_BYTES), Ok(()));
    let err = check_file("a.pdf", PDF_MIME, MAX_UPLOAD_BYTES + 1).unwrap_err();
    assert!(matches!(err, FileRejection::TooLarge { .. }));
    assert!(err.to_string().starts_with("File is too large (10.0 MB)"));
}

// =============================================================
// State transitions
// =============================================================

#[test]
fn rejected_file_never_enters_uploading() {
    let mut state = UploadState::new(UploadKind::Resume);
    assert!(!state.begin("photo.png", "image/png", 10));
    assert_eq!(state.status, UploadStatus::Failed("Only PDF files are accepted".to_owned()));
    assert_eq!(state.selected.as_deref(), Some("photo.png"));
}

#[test]
fn second_upload_waits_for_first() {
    let mut state = UploadState::new(UploadKind::Certificate);
    assert!(state.begin("aws.pdf", PDF_MIME, 10));
    assert!(state.is_uploading());
    assert!(!state.begin("gcp.pdf", PDF_MIME, 10));
    assert_eq!(state.selected.as_deref(), Some("aws.pdf"));
}

#[test]
fn backend_error_is_shown_verbatim() {
    let mut state = UploadState::new(UploadKind::Rfp);
    state.begin("rfp.pdf", PDF_MIME, 10);
    state.finish(Err(ApiError::from_response(400, r#"{"error":"No selected file"}"#)));
    assert_eq!(state.status, UploadStatus::Failed("No selected file".to_owned()));
    state.reset();
    assert_eq!(state, UploadState::new(UploadKind::Rfp));
}

// =============================================================
// Summaries
// =============================================================

#[test]
fn resume_summary_flattens_parsed_fields() {
    let outcome = UploadOutcome::Resume(ResumeUploadResponse {
        filename: "cv.pdf".to_owned(),
        parsed: serde_json::json!({
            "name": "Asha Rao",
            "skills": ["Rust", "SQL"],
            "years_of_experience": 7,
            "email": null,
        }),
    });
    assert_eq!(outcome.filename(), "cv.pdf");
    let summary = outcome.summary();
    assert!(summary.contains(&("Name".to_owned(), "Asha Rao".to_owned())));
    assert!(summary.contains(&("Skills".to_owned(), "Rust, SQL".to_owned())));
    assert!(summary.contains(&("Years of experience".to_owned(), "7".to_owned())));
    assert_eq!(summary.len(), 3);
}

#[test]
fn certificate_summary_lists_known_fields() {
    let outcome = UploadOutcome::Certificate(CertificateUploadResponse {
        filename: "aws.pdf".to_owned(),
        certificate: CertificateInfo {
            issuer: Some("AWS".to_owned()),
            date: None,
            skill: Some("Cloud".to_owned()),
            valid: true,
        },
    });
    assert_eq!(
        outcome.summary(),
        vec![
            ("Issuer".to_owned(), "AWS".to_owned()),
            ("Skill".to_owned(), "Cloud".to_owned()),
            ("Valid".to_owned(), "Yes".to_owned()),
        ]
    );
}

#[test]
fn rfp_summary_formats_budget_and_skills() {
    let outcome = UploadOutcome::Rfp(RfpUploadResponse {
        filename: "rfp.pdf".to_owned(),
        project: RfpProject {
            project_name: Some("Claims Portal".to_owned()),
            budget: Some(125_000.4),
            skills: vec!["React".to_owned(), "Rust".to_owned()],
            ..RfpProject::default()
        },
    });
    let summary = outcome.summary();
    assert_eq!(summary[0], ("Project".to_owned(), "Claims Portal".to_owned()));
    assert!(summary.contains(&("Budget".to_owned(), "125000".to_owned())));
    assert!(summary.contains(&("Skills".to_owned(), "React, Rust".to_owned())));
}

#[test]
fn humanize_key_capitalizes_first_word() {
    assert_eq!(humanize_key("years_of_experience"), "Years of experience");
    assert_eq!(humanize_key("e-mail"), "E mail");
    assert_eq!(humanize_key(""), "");
}
