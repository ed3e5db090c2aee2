//! Single-file PDF uploader with parsed-result display.
//!
//! The chosen file is checked locally (type and size) before upload; the
//! parsed answer is listed as label/value rows under the picker.

use leptos::prelude::*;

use crate::state::uploads::{MAX_UPLOAD_BYTES, UploadKind, UploadOutcome, UploadState, UploadStatus};

#[component]
pub fn FileUploader(
    kind: UploadKind,
    /// Called with each successful outcome (the RFP uploader feeds the wizard).
    #[prop(optional)]
    on_uploaded: Option<Callback<UploadOutcome>>,
) -> impl IntoView {
    let state = RwSignal::new(UploadState::new(kind));

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as u64;
            if !state.try_update(|s| s.begin(&file.name(), &file.type_(), size)).unwrap_or(false) {
                return;
            }
            leptos::task::spawn_local(async move {
                let endpoint = kind.endpoint();
                let api = crate::net::api::upload_file;
                let outcome = match kind {
                    UploadKind::Resume => api(&endpoint, &file).await.map(UploadOutcome::Resume),
                    UploadKind::Certificate => api(&endpoint, &file).await.map(UploadOutcome::Certificate),
                    UploadKind::Rfp => api(&endpoint, &file).await.map(UploadOutcome::Rfp),
                };
                if let Err(err) = &outcome {
                    leptos::logging::warn!("{} upload failed: {err}", kind.title());
                }
                state.update(|s| s.finish(outcome.clone()));
                if let (Ok(outcome), Some(callback)) = (outcome, on_uploaded) {
                    callback.run(outcome);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, on_uploaded);
        }
    };

    let limit_mb = MAX_UPLOAD_BYTES / (1024 * 1024);

    view! {
        <section class="uploader">
            <h3 class="uploader__title">{kind.title()}</h3>
            <label class="uploader__picker">
                <input
                    type="file"
                    accept=".pdf,application/pdf"
                    disabled=move || state.with(UploadState::is_uploading)
                    on:change=on_change
                />
                <span class="uploader__hint">{format!("PDF only, up to {limit_mb} MB")}</span>
            </label>
            {move || {
                state
                    .with(|s| s.selected.clone())
                    .map(|name| view! { <p class="uploader__file">{name}</p> })
            }}
            {move || match state.get().status {
                UploadStatus::Idle => ().into_any(),
                UploadStatus::Uploading => view! { <p class="uploader__busy">"Uploading…"</p> }.into_any(),
                UploadStatus::Failed(message) => {
                    view! { <p class="uploader__error" role="alert">{message}</p> }.into_any()
                }
                UploadStatus::Done(outcome) => {
                    view! {
                        <dl class="uploader__result">
                            {outcome
                                .summary()
                                .into_iter()
                                .map(|(label, value)| view! { <dt>{label}</dt> <dd>{value}</dd> })
                                .collect::<Vec<_>>()}
                        </dl>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
