//! Error Banner Component
//!
//! Transient error message, dismissed after a few seconds.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, BannerMessage};

const AUTO_DISMISS_MS: u32 = 5_000;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_app_context();

    Effect::new(move |_| {
        let Some(seq) = ctx.error.with(|e| e.as_ref().map(|message| message.seq)) else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            // A newer message, even with the same text, gets its own full delay
            if ctx.error.with_untracked(|e| BannerMessage::still_showing(e.as_ref(), seq)) {
                ctx.dismiss_error();
            }
        });
    });

    view! {
        {move || ctx.error.get().map(|message| view! {
            <div class="insights-error" role="alert">
                <span>{message.text}</span>
                <button type="button" class="dismiss-btn" on:click=move |_| ctx.dismiss_error()>"×"</button>
            </div>
        })}
    }
}
