//! Toast Notification Component
//!
//! Shows the current notice: a title line and a description.

use leptos::*;

use crate::state::{GlobalState, Notice, NoticeVariant};

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let notice_signal = expect_context::<GlobalState>().notice;

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2">
            {move || notice_signal.get().map(|notice| view! {
                <ToastMessage notice=notice target=notice_signal />
            })}
        </div>
    }
}

#[component]
fn ToastMessage(notice: Notice, target: RwSignal<Option<Notice>>) -> impl IntoView {
    let bg_class = match notice.variant {
        NoticeVariant::Success => "bg-white border border-slate-200 text-slate-900",
        NoticeVariant::Destructive => "bg-red-600 text-white",
    };

    view! {
        <div
            role="status"
            class=format!(
                "w-80 px-4 py-3 rounded-lg shadow-lg transform transition-all duration-300 \
                 ease-out animate-slide-in {}",
                bg_class
            )
        >
            <div class="flex items-start justify-between">
                <div>
                    <p class="text-sm font-semibold">{notice.title}</p>
                    <p class="text-sm opacity-90">{notice.description}</p>
                </div>
                <button on:click=move |_| target.set(None) class="ml-4 text-sm opacity-70 hover:opacity-100">
                    "✕"
                </button>
            </div>
        </div>
    }
}
