//! Labeled form input with an inline error slot.

use leptos::prelude::*;

/// Text input bound to a signal, rendering its validation error (if any)
/// directly beneath the field.
#[component]
pub fn FormField(
    label: &'static str,
    value: RwSignal<String>,
    error: Signal<Option<&'static str>>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            <input
                class=move || {
                    if error.get().is_some() {
                        "form-field__input form-field__input--invalid"
                    } else {
                        "form-field__input"
                    }
                }
                type=input_type.unwrap_or("text")
                placeholder=placeholder.unwrap_or("")
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=move || error.get().is_some()>
                <span class="form-field__error">{move || error.get().unwrap_or_default()}</span>
            </Show>
        </label>
    }
}
