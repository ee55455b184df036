//! Placeholders shown while catalog or booking data is in flight.

use leptos::*;

/// Centered spinner with an optional caption
#[component]
pub fn Loading(#[prop(optional)] label: &'static str) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 gap-3 text-slate-500">
            <div class="loading-spinner w-8 h-8" />
            {(!label.is_empty()).then(|| view! { <p class="text-sm">{label}</p> })}
        </div>
    }
}

/// Stand-in for a facility or equipment card: image, title, subtitle, price bar
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow-sm border border-slate-200 overflow-hidden animate-pulse">
            <div class="h-40 bg-slate-200" />
            <div class="p-4 space-y-2">
                <div class="h-3 bg-slate-200 rounded-full w-1/4" />
                <div class="h-4 bg-slate-200 rounded w-2/3" />
                <div class="h-4 bg-slate-200 rounded w-1/2" />
            </div>
            <div class="h-12 border-t border-slate-100 bg-slate-50" />
        </div>
    }
}

/// `count` card skeletons, laid out by the surrounding grid
#[component]
pub fn CardGridSkeleton(#[prop(default = 3)] count: usize) -> impl IntoView {
    (0..count).map(|_| view! { <CardSkeleton /> }).collect_view()
}

/// Table or list rows
#[component]
pub fn ListSkeleton(#[prop(default = 3)] count: usize) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            {(0..count).map(|_| view! { <div class="bg-slate-200 rounded h-12" /> }).collect_view()}
        </div>
    }
}
