//! Document intake: resume, certificate, and RFP parsing.

use leptos::prelude::*;

use crate::components::file_uploader::FileUploader;
use crate::state::ui::{NoticeKind, UiState};
use crate::state::uploads::{UploadKind, UploadOutcome};

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let on_uploaded = Callback::new(move |outcome: UploadOutcome| {
        ui.update(|u| {
            u.notify(NoticeKind::Success, format!("Parsed {}", outcome.filename()));
        });
    });

    view! {
        <div class="documents-page">
            <header class="page-header toolbar">
                <h1 class="page-header__title">"Documents"</h1>
            </header>
            <div class="documents-page__grid">
                {[UploadKind::Resume, UploadKind::Certificate, UploadKind::Rfp]
                    .into_iter()
                    .map(|kind| view! { <div class="card"><FileUploader kind=kind on_uploaded=on_uploaded/></div> })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}
