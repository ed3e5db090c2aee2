//! Inline validation message under a form field.

use leptos::prelude::*;

use crate::util::validation::FieldErrors;

/// Renders the message recorded for `key`, if any.
#[component]
pub fn FieldError(#[prop(into)] errors: Signal<FieldErrors>, #[prop(into)] key: String) -> impl IntoView {
    move || {
        errors.with(|e| e.get(&key).map(str::to_owned)).map(|message| {
            view! { <p class="field-error" role="alert">{message}</p> }
        })
    }
}
