//! Equipment Page
//!
//! Browse rentable medical equipment and start a rental.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Equipment, EquipmentQuery};
use crate::components::{CardGridSkeleton, EmptyState, PageHeader};
use crate::state::{selection, GlobalState, Selection};

const CATEGORIES: &[(&str, &str)] = &[
    ("diagnostic", "Diagnostic"),
    ("surgical", "Surgical"),
    ("imaging", "Imaging"),
    ("treatment", "Treatment"),
];

/// Equipment page component
#[component]
pub fn EquipmentPage() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let params = use_query_map().get_untracked();

    let q = create_rw_signal(params.get("q").cloned().unwrap_or_default());
    let category = create_rw_signal(params.get("category").cloned().unwrap_or_default());
    let location = create_rw_signal(String::new());

    let items = create_rw_signal(Vec::<Equipment>::new());
    let loading = create_rw_signal(true);
    let details = create_rw_signal(None::<Equipment>);

    create_effect(move |_| {
        let query = EquipmentQuery {
            q: q.get(),
            category: category.get(),
            location: location.get(),
        };
        let state = state.clone();
        loading.set(true);

        spawn_local(async move {
            match api::fetch_equipment(&query).await {
                Ok(list) => items.set(list),
                Err(e) => state.show_error("Could not load equipment", &e),
            }
            loading.set(false);
        });
    });

    let navigate = use_navigate();
    let rent = move |item: Equipment| {
        selection::store(&Selection::Equipment(item));
        navigate("/my-bookings", Default::default());
    };
    let rent_from_list = rent.clone();

    view! {
        <div class="space-y-6 animate-fade-in">
            <PageHeader title="Medical Equipment" subtitle="Rent specialized equipment from trusted hospitals" />

            <section class="bg-white rounded-lg shadow-sm p-4 grid grid-cols-1 md:grid-cols-3 gap-4">
                <input
                    type="search"
                    placeholder="Search equipment, hospitals, or features"
                    prop:value=move || q.get()
                    on:input=move |ev| q.set(event_target_value(&ev))
                    class="w-full h-10 px-3 border border-slate-300 rounded-md"
                />
                <select
                    prop:value=move || category.get()
                    on:change=move |ev| category.set(event_target_value(&ev))
                    class="w-full h-10 px-3 border border-slate-300 rounded-md bg-white"
                >
                    <option value="">"All Categories"</option>
                    {CATEGORIES.iter().map(|(value, label)| view! {
                        <option value=*value>{*label}</option>
                    }).collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Location"
                    prop:value=move || location.get()
                    on:input=move |ev| location.set(event_target_value(&ev))
                    class="w-full h-10 px-3 border border-slate-300 rounded-md"
                />
            </section>

            <section class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                {move || {
                    if loading.get() && items.get().is_empty() {
                        view! { <CardGridSkeleton count=3 /> }.into_view()
                    } else if items.get().is_empty() {
                        view! { <EmptyState message="No equipment matches your search." /> }.into_view()
                    } else {
                        let rent = rent_from_list.clone();
                        items.get().into_iter().map(|item| {
                            let rent = rent.clone();
                            let for_details = item.clone();
                            let for_rent = item.clone();
                            view! {
                                <EquipmentCard
                                    item=item
                                    on_details=move || details.set(Some(for_details.clone()))
                                    on_rent=move || rent(for_rent.clone())
                                />
                            }
                        }).collect_view()
                    }
                }}
            </section>

            {move || details.get().map(|item| {
                let rent = rent.clone();
                let for_rent = item.clone();
                view! {
                    <div class="fixed inset-0 z-40 bg-black/50 flex items-center justify-center" on:click=move |_| details.set(None)>
                        <div class="bg-white rounded-lg shadow-lg max-w-lg w-full p-6 space-y-4" on:click=|ev| ev.stop_propagation()>
                            <div>
                                <h2 class="text-xl font-semibold">{item.name.clone()}</h2>
                                <p class="text-slate-500">{format!("{} · {}", item.hospital, item.location)}</p>
                            </div>
                            <p class="text-sm text-slate-700">{item.description.clone()}</p>
                            <div class="grid grid-cols-3 gap-4 text-sm">
                                <div>
                                    <p class="font-medium">"Category"</p>
                                    <p class="capitalize">{item.category.clone()}</p>
                                </div>
                                <div>
                                    <p class="font-medium">"Price"</p>
                                    <p>{format!("${}/day", item.price)}</p>
                                </div>
                                <div>
                                    <p class="font-medium">"Availability"</p>
                                    <p>{item.availability.clone()}</p>
                                </div>
                            </div>
                            <ul class="text-sm text-slate-600 list-disc pl-5">
                                {item.features.iter().map(|f| view! { <li>{f.clone()}</li> }).collect_view()}
                            </ul>
                            <div class="flex justify-end gap-2 pt-2">
                                <button on:click=move |_| details.set(None) class="px-4 py-2 border border-slate-300 rounded-md">"Close"</button>
                                <button on:click=move |_| rent(for_rent.clone()) class="px-4 py-2 bg-primary text-primary-foreground rounded-md">"Rent Now"</button>
                            </div>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}

#[component]
fn EquipmentCard<D, R>(item: Equipment, on_details: D, on_rent: R) -> impl IntoView
where
    D: Fn() + 'static,
    R: Fn() + 'static,
{
    view! {
        <div class="rounded-lg overflow-hidden bg-white shadow-sm hover:shadow-md transition-all border border-slate-200 flex flex-col">
            <img src=item.image.clone() alt=item.name.clone() class="h-40 w-full object-cover bg-slate-200" />
            <div class="p-4 flex-1 space-y-2">
                <div class="flex items-center justify-between">
                    <span class="text-xs bg-slate-100 px-2 py-0.5 rounded-full capitalize">{item.category.clone()}</span>
                    <span class="text-xs text-slate-500">{item.availability.clone()}</span>
                </div>
                <h3 class="font-semibold">{item.name.clone()}</h3>
                <p class="text-sm text-slate-500">{format!("{}, {}", item.hospital, item.location)}</p>
            </div>
            <div class="p-4 border-t border-slate-100 flex items-center justify-between">
                <span class="text-lg font-bold text-pharma-primary">{format!("${}/day", item.price)}</span>
                <div class="flex gap-2">
                    <button on:click=move |_| on_details() class="px-3 py-1.5 border border-slate-300 rounded-md text-sm">
                        "View Details"
                    </button>
                    <button on:click=move |_| on_rent() class="px-3 py-1.5 bg-primary text-primary-foreground rounded-md text-sm">
                        "Rent Now"
                    </button>
                </div>
            </div>
        </div>
    }
}
