//! Settings Page
//!
//! API connection, live-update status, and booking export.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::state::GlobalState;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-slate-500 mt-1">"Configure your MedSpace connection"</p>
            </div>

            <ApiSettings />
            <DataManagement />
            <AboutSection />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let ws_connected = state.ws_connected;

    let api_url = create_rw_signal(api::get_api_base());
    let testing = create_rw_signal(false);
    let test_result = create_rw_signal(None::<Result<String, String>>);

    let test_connection = move |_| {
        testing.set(true);
        test_result.set(None);
        api::set_api_base(&api_url.get_untracked());

        spawn_local(async move {
            match api::check_health().await {
                Ok(health) => test_result.set(Some(Ok(health_summary(&health)))),
                Err(e) => test_result.set(Some(Err(e))),
            }
            testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get_untracked());
        state.show_success("API URL saved", "Reload the page to reconnect live updates.");
    };

    view! {
        <section class="bg-white rounded-lg shadow-sm p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-slate-500 mb-2">"MedSpace API URL"</label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| api_url.set(event_target_value(&ev))
                            class="flex-1 h-10 px-3 border border-slate-300 rounded-md"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 border border-slate-300 rounded-md disabled:opacity-50"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button on:click=save_url class="px-4 bg-primary text-primary-foreground rounded-md">
                            "Save"
                        </button>
                    </div>
                </div>

                <div class="flex items-center space-x-2 text-sm">
                    <span class="text-slate-500">"Status:"</span>
                    {move || match test_result.get() {
                        Some(Ok(detail)) => view! { <span class="text-green-600">{format!("✓ {}", detail)}</span> }.into_view(),
                        Some(Err(e)) => view! { <span class="text-red-600">{format!("✕ {}", e)}</span> }.into_view(),
                        None => view! { <span class="text-slate-400">"Not tested"</span> }.into_view(),
                    }}
                </div>

                <div class="flex items-center space-x-2 text-sm">
                    <span class="text-slate-500">"Live updates:"</span>
                    {move || if ws_connected.get() {
                        view! { <span class="text-green-600">"Connected"</span> }.into_view()
                    } else {
                        view! { <span class="text-red-600">"Disconnected"</span> }.into_view()
                    }}
                </div>
            </div>
        </section>
    }
}

fn health_summary(health: &api::HealthResponse) -> String {
    let stored = health
        .bookings
        .map(|n| format!(" · {} bookings", n))
        .unwrap_or_default();
    format!(
        "{} · storage {} ({}){} · v{} · up {}s",
        health.status, health.storage, health.backend, stored, health.version, health.uptime_seconds
    )
}

/// Suggested file name for an export
pub fn export_filename(format: &str, date: chrono::NaiveDate) -> String {
    format!("medspace-bookings-{}.{}", date.format("%Y-%m-%d"), format)
}

/// Hand text to the browser as a file download
fn download(filename: &str, data: String) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let blob = web_sys::Blob::new_with_str_sequence(&js_sys::Array::of1(&data.into()))
        .map_err(|e| format!("{:?}", e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "anchor element expected".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Booking export
#[component]
fn DataManagement() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let exporting = create_rw_signal(false);

    let export = move |format: &'static str| {
        let state = state.clone();
        move |_| {
            let state = state.clone();
            exporting.set(true);
            spawn_local(async move {
                let result = api::export_bookings(format).await.and_then(|data| {
                    download(&export_filename(format, chrono::Local::now().date_naive()), data)
                });
                match result {
                    Ok(()) => state.show_success("Export complete", &format!("Bookings exported as {}", format.to_uppercase())),
                    Err(e) => state.show_error("Export failed", &e),
                }
                exporting.set(false);
            });
        }
    };

    view! {
        <section class="bg-white rounded-lg shadow-sm p-6">
            <h2 class="text-xl font-semibold mb-4">"Data Management"</h2>
            <p class="text-sm text-slate-500 mb-4">"Download every booking, confirmed and cancelled."</p>
            <div class="flex gap-2">
                <button
                    on:click=export("csv")
                    disabled=move || exporting.get()
                    class="px-4 py-2 border border-slate-300 rounded-md disabled:opacity-50"
                >
                    "Export CSV"
                </button>
                <button
                    on:click=export("json")
                    disabled=move || exporting.get()
                    class="px-4 py-2 border border-slate-300 rounded-md disabled:opacity-50"
                >
                    "Export JSON"
                </button>
            </div>
        </section>
    }
}

#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-white rounded-lg shadow-sm p-6">
            <h2 class="text-xl font-semibold mb-4">"About MedSpace"</h2>
            <div class="space-y-4 text-slate-600">
                <p>
                    "MedSpace connects practitioners with unused hospital facilities and equipment, "
                    "and gives pharma sales reps one place for HCPs, visits, and follow-ups."
                </p>
                <p class="text-sm text-slate-400">{format!("Version {}", env!("CARGO_PKG_VERSION"))}</p>
            </div>
        </section>
    }
}
