//! Navigation Component
//!
//! Header bar with the portal brand, the portal switch, and the link set
//! for the current portal mode.

use leptos::*;
use leptos_router::*;

use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let portal_mode = state.portal_mode;

    let toggle = move |_| state.toggle_portal();

    view! {
        <nav class="bg-white border-b border-slate-200">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-xl font-bold text-pharma-primary">
                            {move || portal_mode.get().brand()}
                        </span>
                    </A>

                    <div class="flex items-center space-x-1">
                        {move || {
                            portal_mode.get().nav_items().iter().map(|(href, label)| view! {
                                <NavLink href=*href label=*label />
                            }).collect_view()
                        }}
                    </div>

                    <button
                        on:click=toggle
                        class="px-4 py-2 border border-slate-300 rounded-lg text-sm font-medium
                               hover:bg-slate-100 transition-colors"
                    >
                        {move || format!("Switch to {}", match portal_mode.get() {
                            crate::state::PortalMode::Marketplace => "Pharma",
                            crate::state::PortalMode::Pharma => "Marketplace",
                        })}
                    </button>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-3 py-2 rounded-lg text-slate-600 hover:text-slate-900 hover:bg-slate-100 transition-colors"
            active_class="bg-primary text-primary-foreground"
        >
            {label}
        </A>
    }
}
