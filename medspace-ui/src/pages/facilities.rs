//! Facilities Page
//!
//! Search bookable hospital spaces, view details, and start a booking.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Facility, FacilityQuery};
use crate::components::{CardGridSkeleton, EmptyState, PageHeader};
use crate::state::{selection, GlobalState, Selection};

/// Option values accepted by the `type` filter
const FACILITY_TYPES: &[(&str, &str)] = &[
    ("operating_room", "Operating Room"),
    ("imaging", "Imaging Center"),
    ("laboratory", "Laboratory"),
    ("procedure_room", "Procedure Room"),
    ("clinic", "Clinic Space"),
];

pub fn facility_type_label(value: &str) -> &str {
    FACILITY_TYPES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

/// Facilities page component
#[component]
pub fn Facilities() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let params = use_query_map().get_untracked();
    let initial = |key: &str| params.get(key).cloned().unwrap_or_default();

    let q = create_rw_signal(initial("q"));
    let facility_type = create_rw_signal(initial("type"));
    let location = create_rw_signal(initial("location"));
    let min_price = create_rw_signal(String::new());
    let max_price = create_rw_signal(String::new());

    let facilities = create_rw_signal(Vec::<Facility>::new());
    let loading = create_rw_signal(true);
    let details = create_rw_signal(None::<Facility>);

    create_effect(move |_| {
        let query = FacilityQuery {
            q: q.get(),
            facility_type: facility_type.get(),
            location: location.get(),
            min_price: min_price.get(),
            max_price: max_price.get(),
        };
        let state = state.clone();
        loading.set(true);

        spawn_local(async move {
            match api::fetch_facilities(&query).await {
                Ok(items) => facilities.set(items),
                Err(e) => state.show_error("Could not load facilities", &e),
            }
            loading.set(false);
        });
    });

    let navigate = use_navigate();
    let book = move |facility: Facility| {
        selection::store(&Selection::Facility(facility));
        navigate("/my-bookings", Default::default());
    };
    let book_from_list = book.clone();

    view! {
        <div class="space-y-6 animate-fade-in">
            <PageHeader title="Medical Facilities" subtitle="Find and book unused hospital facilities">
                // Filters and availability are not wired up yet
                <button class="px-3 py-1.5 border border-slate-300 rounded-md text-sm">"Filters"</button>
                <button class="px-3 py-1.5 border border-slate-300 rounded-md text-sm">"Availability"</button>
            </PageHeader>

            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <section class="md:col-span-1 bg-white rounded-lg shadow-sm p-6 space-y-4 h-fit">
                    <h2 class="text-lg font-semibold">"Search Facilities"</h2>

                    <div class="space-y-2">
                        <label class="text-sm font-medium">"Keyword"</label>
                        <input
                            type="search"
                            placeholder="Name, hospital, or feature"
                            prop:value=move || q.get()
                            on:input=move |ev| q.set(event_target_value(&ev))
                            class="w-full h-10 px-3 border border-slate-300 rounded-md"
                        />
                    </div>

                    <div class="space-y-2">
                        <label class="text-sm font-medium">"Facility Type"</label>
                        <select
                            prop:value=move || facility_type.get()
                            on:change=move |ev| facility_type.set(event_target_value(&ev))
                            class="w-full h-10 px-3 border border-slate-300 rounded-md bg-white"
                        >
                            <option value="">"All Types"</option>
                            {FACILITY_TYPES.iter().map(|(value, label)| view! {
                                <option value=*value>{*label}</option>
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="space-y-2">
                        <label class="text-sm font-medium">"Location"</label>
                        <input
                            type="text"
                            placeholder="City or state"
                            prop:value=move || location.get()
                            on:input=move |ev| location.set(event_target_value(&ev))
                            class="w-full h-10 px-3 border border-slate-300 rounded-md"
                        />
                    </div>

                    <div class="space-y-2">
                        <label class="text-sm font-medium">"Price Range ($/hr)"</label>
                        <div class="flex gap-2">
                            <input
                                type="number"
                                min="0"
                                placeholder="Min"
                                prop:value=move || min_price.get()
                                on:input=move |ev| min_price.set(event_target_value(&ev))
                                class="w-1/2 h-10 px-3 border border-slate-300 rounded-md"
                            />
                            <input
                                type="number"
                                min="0"
                                placeholder="Max"
                                prop:value=move || max_price.get()
                                on:input=move |ev| max_price.set(event_target_value(&ev))
                                class="w-1/2 h-10 px-3 border border-slate-300 rounded-md"
                            />
                        </div>
                    </div>
                </section>

                <section class="md:col-span-3 grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    {move || {
                        if loading.get() && facilities.get().is_empty() {
                            view! { <CardGridSkeleton count=3 /> }.into_view()
                        } else if facilities.get().is_empty() {
                            view! { <EmptyState message="No facilities match your search." /> }.into_view()
                        } else {
                            let book = book_from_list.clone();
                            facilities.get().into_iter().map(|facility| {
                                let book = book.clone();
                                let for_details = facility.clone();
                                let for_booking = facility.clone();
                                view! {
                                    <FacilityCard
                                        facility=facility
                                        on_details=move || details.set(Some(for_details.clone()))
                                        on_book=move || book(for_booking.clone())
                                    />
                                }
                            }).collect_view()
                        }
                    }}
                </section>
            </div>

            {move || details.get().map(|facility| {
                let book = book.clone();
                let for_booking = facility.clone();
                view! {
                    <FacilityDetails
                        facility=facility
                        on_close=move || details.set(None)
                        on_book=move || book(for_booking.clone())
                    />
                }
            })}
        </div>
    }
}

#[component]
fn FacilityCard<D, B>(facility: Facility, on_details: D, on_book: B) -> impl IntoView
where
    D: Fn() + 'static,
    B: Fn() + 'static,
{
    view! {
        <div class="rounded-lg overflow-hidden bg-white shadow-sm hover:shadow-md transition-all border border-slate-200 flex flex-col">
            <img src=facility.image.clone() alt=facility.name.clone() class="h-40 w-full object-cover bg-slate-200" />
            <div class="p-4 flex-1 space-y-2">
                <span class="text-xs bg-slate-100 px-2 py-0.5 rounded-full">
                    {facility_type_label(&facility.facility_type).to_string()}
                </span>
                <h3 class="font-semibold">{facility.name.clone()}</h3>
                <p class="text-sm text-slate-500">{facility.hospital.clone()}</p>
                <p class="text-sm text-slate-500">{facility.location.clone()}</p>
                <ul class="text-sm text-slate-600 list-disc pl-5">
                    {facility.features.iter().map(|f| view! { <li>{f.clone()}</li> }).collect_view()}
                </ul>
            </div>
            <div class="p-4 border-t border-slate-100 flex items-center justify-between">
                <span class="text-lg font-bold text-pharma-primary">{format!("${}/hr", facility.price)}</span>
                <div class="flex gap-2">
                    <button on:click=move |_| on_details() class="px-3 py-1.5 border border-slate-300 rounded-md text-sm">
                        "View Details"
                    </button>
                    <button on:click=move |_| on_book() class="px-3 py-1.5 bg-primary text-primary-foreground rounded-md text-sm">
                        "Book Now"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn FacilityDetails<C, B>(facility: Facility, on_close: C, on_book: B) -> impl IntoView
where
    C: Fn() + Clone + 'static,
    B: Fn() + 'static,
{
    let close = on_close.clone();

    view! {
        <div class="fixed inset-0 z-40 bg-black/50 flex items-center justify-center" on:click=move |_| close()>
            <div class="bg-white rounded-lg shadow-lg max-w-lg w-full p-6 space-y-4" on:click=|ev| ev.stop_propagation()>
                <div>
                    <h2 class="text-xl font-semibold">{facility.name.clone()}</h2>
                    <p class="text-slate-500">{format!("{} · {}", facility.hospital, facility.location)}</p>
                </div>
                <img src=facility.image.clone() alt=facility.name.clone() class="h-48 w-full object-cover rounded bg-slate-200" />
                <div class="grid grid-cols-2 gap-4 text-sm">
                    <div>
                        <p class="font-medium">"Type"</p>
                        <p>{facility_type_label(&facility.facility_type).to_string()}</p>
                    </div>
                    <div>
                        <p class="font-medium">"Price"</p>
                        <p>{format!("${}/hr", facility.price)}</p>
                    </div>
                </div>
                <div>
                    <p class="font-medium text-sm mb-1">"Features"</p>
                    <ul class="text-sm text-slate-600 list-disc pl-5">
                        {facility.features.iter().map(|f| view! { <li>{f.clone()}</li> }).collect_view()}
                    </ul>
                </div>
                <div class="flex justify-end gap-2 pt-2">
                    <button on:click=move |_| on_close() class="px-4 py-2 border border-slate-300 rounded-md">"Close"</button>
                    <button on:click=move |_| on_book() class="px-4 py-2 bg-primary text-primary-foreground rounded-md">"Book Now"</button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_type_label() {
        assert_eq!(facility_type_label("operating_room"), "Operating Room");
        assert_eq!(facility_type_label("clinic"), "Clinic Space");
        assert_eq!(facility_type_label("helipad"), "helipad");
    }
}
