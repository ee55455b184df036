//! Page building blocks

use leptos::*;

/// Title, subtitle, and optional actions on the right
#[component]
pub fn PageHeader(
    title: &'static str,
    subtitle: &'static str,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
            <div>
                <h1 class="text-3xl font-bold tracking-tight">{title}</h1>
                <p class="text-slate-500">{subtitle}</p>
            </div>
            {children.map(|children| view! {
                <div class="flex items-center gap-2">{children()}</div>
            })}
        </div>
    }
}

/// Search box bound to a signal
#[component]
pub fn SearchInput(
    value: RwSignal<String>,
    #[prop(default = "Search...")] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <input
            type="search"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
            class="w-full h-10 px-3 border border-slate-300 rounded-md bg-white
                   focus:border-primary focus:outline-none"
        />
    }
}

/// Placeholder shown when a list comes back empty
#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="col-span-full bg-slate-50 p-8 rounded-md text-center">
            <p class="text-slate-500">{message}</p>
        </div>
    }
}
