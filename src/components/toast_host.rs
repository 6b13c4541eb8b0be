//! Toast Host Component
//!
//! Fixed top-right stack that renders the store's toast queue.

use leptos::prelude::*;

use crate::feedback::css_seconds;
use crate::store::{store_is_fading, AppStore, UiStateStoreFields};

const STACK_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 9999; display: flex; flex-direction: column; gap: 8px;";
const SHOWN_STYLE: &str = "max-width: 300px; animation: slideIn 0.3s ease-out;";

/// Fade-out animation lasting `fade_ms`
pub fn fading_style(fade_ms: u32) -> String {
    format!("max-width: 300px; animation: fadeOut {} ease-out;", css_seconds(fade_ms))
}

/// Renders every queued toast; toasts leave when the store drops them
#[component]
pub fn ToastHost(store: AppStore, fade_ms: u32) -> impl IntoView {
    let fading = fading_style(fade_ms);
    view! {
        <div class="toast-stack" style=STACK_STYLE>
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let fading = fading.clone();
                    let class = toast.kind.class_name();
                    let message = toast.message;
                    let style = move || {
                        if store_is_fading(&store, id) { fading.clone() } else { SHOWN_STYLE.to_string() }
                    };
                    view! {
                        <div class=class role="alert" style=style>
                            {message}
                        </div>
                    }
                }
            />
        </div>
    }
}
