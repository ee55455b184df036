//! Dashboard Page
//!
//! Marketplace landing page or pharma overview, depending on the portal mode.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Dashboard as DashboardData, Facility, FacilityQuery, Hcp};
use crate::components::{CardGridSkeleton, Loading};
use crate::state::{GlobalState, PortalMode};

/// Number of facilities in the featured row
const FEATURED_COUNT: usize = 3;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let portal_mode = state.portal_mode;

    view! {
        {move || match portal_mode.get() {
            PortalMode::Marketplace => view! { <MarketplaceHome /> }.into_view(),
            PortalMode::Pharma => view! { <PharmaOverview /> }.into_view(),
        }}
    }
}

#[component]
fn MarketplaceHome() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let query = create_rw_signal(String::new());
    let facility_type = create_rw_signal(String::new());
    let featured = create_rw_signal(None::<Vec<Facility>>);

    spawn_local(async move {
        match api::fetch_facilities(&FacilityQuery::default()).await {
            Ok(list) => featured.set(Some(list.into_iter().take(FEATURED_COUNT).collect())),
            Err(e) => {
                featured.set(Some(Vec::new()));
                state.show_error("Could not load facilities", &e);
            }
        }
    });

    let navigate = use_navigate();
    let search = {
        let navigate = navigate.clone();
        move |_| {
            let target = format!(
                "/facilities{}",
                api::query_string(&[("q", &query.get_untracked()), ("type", &facility_type.get_untracked())])
            );
            navigate(&target, Default::default());
        }
    };
    let go = move |path: &'static str| {
        let navigate = navigate.clone();
        move |_: ev::MouseEvent| navigate(path, Default::default())
    };
    let go_featured = go.clone();

    view! {
        <div class="space-y-6 animate-fade-in">
            <section class="space-y-2">
                <h1 class="text-3xl font-bold tracking-tight">"Welcome to MedSpace"</h1>
                <p class="text-slate-500">"Find and book medical facilities and equipment"</p>
            </section>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                <section class="col-span-full bg-white shadow-md rounded-lg p-6 space-y-4">
                    <div>
                        <h2 class="text-xl font-semibold">"Find What You Need"</h2>
                        <p class="text-slate-500 text-sm">"Search for facilities or equipment near you"</p>
                    </div>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <input
                            type="search"
                            placeholder="Enter location or specialty"
                            prop:value=move || query.get()
                            on:input=move |ev| query.set(event_target_value(&ev))
                            class="w-full h-10 px-3 border border-slate-300 rounded-md"
                        />
                        <select
                            prop:value=move || facility_type.get()
                            on:change=move |ev| facility_type.set(event_target_value(&ev))
                            class="w-full h-10 px-3 border border-slate-300 rounded-md bg-white"
                        >
                            <option value="">"Type of Facility"</option>
                            <option value="operating_room">"Operating Room"</option>
                            <option value="imaging">"Imaging Center"</option>
                            <option value="laboratory">"Laboratory"</option>
                            <option value="clinic">"Clinic Space"</option>
                        </select>
                        <button on:click=search class="w-full h-10 bg-primary text-primary-foreground rounded-md">
                            "Search Now"
                        </button>
                    </div>
                </section>

                <QuickLink
                    title="Available Facilities"
                    subtitle="Book entire spaces for procedures"
                    body="Access operating rooms, imaging centers, lab spaces and more."
                    action="Browse Facilities"
                    on_click=go("/facilities")
                />
                <QuickLink
                    title="Medical Equipment"
                    subtitle="Rent specialized equipment"
                    body="Find the latest diagnostic and treatment equipment from trusted hospitals."
                    action="Browse Equipment"
                    on_click=go("/equipment")
                />
                <QuickLink
                    title="My Schedule"
                    subtitle="View your upcoming bookings"
                    body="Manage your facility and equipment rentals in one place."
                    action="View Schedule"
                    on_click=go("/my-bookings")
                />
            </div>

            <section class="mt-8">
                <h2 class="text-2xl font-bold mb-4">"Featured Facilities"</h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    {move || match featured.get() {
                        None => view! { <CardGridSkeleton count=FEATURED_COUNT /> }.into_view(),
                        Some(list) => list.into_iter().map(|facility| {
                            let go_facilities = go_featured("/facilities");
                            view! {
                                <div class="rounded-lg overflow-hidden bg-white shadow-sm hover:shadow-md transition-all border border-slate-200">
                                    <img src=facility.image alt=facility.name.clone() class="h-40 w-full object-cover bg-slate-200" />
                                    <div class="p-4">
                                        <h3 class="font-semibold">{facility.name}</h3>
                                        <p class="text-sm text-slate-500">{facility.location}</p>
                                        <div class="mt-2 flex items-center justify-between">
                                            <span class="text-lg font-bold text-pharma-primary">{format!("${}/hr", facility.price)}</span>
                                            <button on:click=go_facilities class="px-3 py-1.5 border border-slate-300 rounded-md text-sm">
                                                "View Details"
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        }).collect_view(),
                    }}
                </div>
            </section>
        </div>
    }
}

#[component]
fn QuickLink<F>(
    title: &'static str,
    subtitle: &'static str,
    body: &'static str,
    action: &'static str,
    on_click: F,
) -> impl IntoView
where
    F: Fn(ev::MouseEvent) + 'static,
{
    view! {
        <section class="bg-white rounded-lg shadow-sm hover:shadow-md transition-shadow p-6 space-y-4">
            <div>
                <h2 class="text-lg font-semibold">{title}</h2>
                <p class="text-sm text-slate-500">{subtitle}</p>
            </div>
            <p>{body}</p>
            <button on:click=on_click class="w-full py-2 border border-slate-300 rounded-md">{action}</button>
        </section>
    }
}

#[component]
fn PharmaOverview() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let data = create_rw_signal(None::<(DashboardData, Vec<Hcp>)>);

    // Dashboard visits carry only the HCP id, so load names alongside
    spawn_local(async move {
        let summary = api::fetch_dashboard().await;
        let hcps = api::fetch_hcps("").await;
        match (summary, hcps) {
            (Ok(summary), Ok(hcps)) => data.set(Some((summary, hcps))),
            (Err(e), _) | (_, Err(e)) => state.show_error("Could not load dashboard", &e),
        }
    });

    view! {
        <div class="space-y-6 animate-fade-in">
            <section class="space-y-2">
                <h1 class="text-3xl font-bold tracking-tight">"Dashboard"</h1>
                <p class="text-slate-500">"Your HCP engagement at a glance"</p>
            </section>

            {move || match data.get() {
                None => view! { <Loading label="Loading sales overview" /> }.into_view(),
                Some((d, hcps)) => view! {
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <StatCard label="Healthcare Professionals" value=d.hcp_count.to_string() />
                        <StatCard label="Upcoming Visits" value=d.upcoming_visits.len().to_string() />
                        <StatCard label="Pending Tasks" value=d.pending_tasks.len().to_string() />
                        <StatCard label="Confirmed Bookings" value=d.bookings.confirmed.to_string() />
                    </div>

                    <div class="grid md:grid-cols-2 gap-6">
                        <section class="bg-white rounded-lg shadow-sm p-6">
                            <h2 class="text-lg font-semibold mb-4">"Upcoming Visits"</h2>
                            {d.upcoming_visits.iter().map(|v| {
                                let hcp = hcps.iter()
                                    .find(|h| h.id == v.hcp_id)
                                    .map(|h| h.name.clone())
                                    .unwrap_or_else(|| format!("HCP #{}", v.hcp_id));
                                view! {
                                    <div class="flex justify-between py-2 border-b last:border-0 text-sm">
                                        <span>{hcp}</span>
                                        <span class="text-slate-500">{v.date.clone()}</span>
                                    </div>
                                }
                            }).collect_view()}
                        </section>

                        <section class="bg-white rounded-lg shadow-sm p-6">
                            <h2 class="text-lg font-semibold mb-4">"Pending Tasks"</h2>
                            {d.pending_tasks.iter().map(|t| view! {
                                <div class="flex justify-between py-2 border-b last:border-0 text-sm">
                                    <span>{t.title.clone()}</span>
                                    <span class="text-slate-500 capitalize">{format!("{} · {}", t.priority, t.due_date)}</span>
                                </div>
                            }).collect_view()}
                        </section>
                    </div>

                    <section class="bg-white rounded-lg shadow-sm p-6">
                        <h2 class="text-lg font-semibold mb-4">"Top HCPs"</h2>
                        <table class="w-full text-sm">
                            <tbody>
                                {d.top_hcps.iter().map(|h| view! {
                                    <tr class="border-b last:border-0">
                                        <td class="py-2 font-medium">{h.name.clone()}</td>
                                        <td class="py-2">{h.specialty.clone()}</td>
                                        <td class="py-2">{h.organization.clone()}</td>
                                        <td class="py-2 text-right">{crate::pages::hcps::format_dollars(h.potential_value)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </section>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow-sm p-4">
            <p class="text-sm text-slate-500">{label}</p>
            <p class="text-2xl font-bold">{value}</p>
        </div>
    }
}
