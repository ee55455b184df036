//! App root: global state, the live booking socket, routes, and chrome.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Nav, Toast};
use crate::pages::{
    Dashboard, EquipmentPage, Facilities, Hcps, Hospitals, MyBookings, Products, Settings,
    Tasks, Visits,
};
use crate::state::websocket::init_websocket;
use crate::state::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    let state = expect_context::<GlobalState>();
    init_websocket(state, &api::get_api_base());

    view! {
        <Router>
            <div class="min-h-screen bg-slate-50 text-slate-900 flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/hospitals" view=Hospitals />
                        <Route path="/facilities" view=Facilities />
                        <Route path="/equipment" view=EquipmentPage />
                        <Route path="/my-bookings" view=MyBookings />
                        <Route path="/hcps" view=Hcps />
                        <Route path="/visits" view=Visits />
                        <Route path="/tasks" view=Tasks />
                        <Route path="/products" view=Products />
                        <Route path="/settings" view=Settings />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />
                <Toast />
            </div>
        </Router>
    }
}

/// Footer showing live-update status
#[component]
fn Footer() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let ws_connected = state.ws_connected;
    let last_sync = state.last_sync;

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-white border-t border-slate-200 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || {
                        if ws_connected.get() {
                            view! {
                                <span class="flex items-center space-x-1 text-green-600">
                                    <span class="w-2 h-2 bg-green-500 rounded-full pulse" />
                                    <span>"Live updates on"</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="flex items-center space-x-1 text-red-500">
                                    <span class="w-2 h-2 bg-red-500 rounded-full" />
                                    <span>"Offline"</span>
                                </span>
                            }.into_view()
                        }
                    }}
                </div>

                <div class="text-slate-500">
                    {move || {
                        last_sync.get()
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| format!("Last booking update: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_default()
                    }}
                </div>
            </div>
        </footer>
    }
}

/// Unknown client-side route; the attempted path is logged to the console
#[component]
fn NotFound() -> impl IntoView {
    let path = use_location().pathname.get_untracked();
    web_sys::console::warn_1(&format!("No route for {}", path).into());

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-4xl font-bold mb-4">"404"</h1>
            <p class="text-xl text-slate-600 mb-2">"Oops! Page not found"</p>
            <p class="text-sm text-slate-400 mb-4 font-mono">{path}</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary text-primary-foreground rounded-lg font-medium transition-colors"
            >
                "Return to Home"
            </A>
        </div>
    }
}
