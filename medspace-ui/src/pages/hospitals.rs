//! Hospitals Page
//!
//! Partner hospitals with a link through to their facilities.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Hospital};
use crate::components::{EmptyState, ListSkeleton, PageHeader, SearchInput};
use crate::state::GlobalState;

/// City part of "San Francisco, CA"
pub fn city_of(location: &str) -> &str {
    location.split(',').next().unwrap_or(location).trim()
}

/// Hospitals page component
#[component]
pub fn Hospitals() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let query = create_rw_signal(String::new());
    let hospitals = create_rw_signal(Vec::<Hospital>::new());
    let loading = create_rw_signal(true);

    create_effect(move |_| {
        let q = query.get();
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_hospitals(&q).await {
                Ok(list) => hospitals.set(list),
                Err(e) => state.show_error("Could not load hospitals", &e),
            }
            loading.set(false);
        });
    });

    let navigate = use_navigate();

    view! {
        <div class="space-y-6 animate-fade-in">
            <PageHeader title="Partner Hospitals" subtitle="Hospitals offering facilities and equipment for rent" />

            <section class="bg-white rounded-lg shadow-sm p-6 space-y-4">
                <SearchInput value=query placeholder="Search hospitals by name or location" />

                {move || {
                    let list = hospitals.get();
                    if loading.get() {
                        view! { <ListSkeleton count=5 /> }.into_view()
                    } else if list.is_empty() {
                        view! { <EmptyState message="No hospitals match your search." /> }.into_view()
                    } else {
                        let navigate = navigate.clone();
                        view! {
                            <table class="w-full text-sm">
                                <thead>
                                    <tr class="text-left text-slate-500 border-b">
                                        <th class="py-2">"Hospital"</th>
                                        <th class="py-2">"Location"</th>
                                        <th class="py-2 text-center">"Available Facilities"</th>
                                        <th class="py-2 text-center">"Rating"</th>
                                        <th class="py-2 text-right"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list.into_iter().map(|hospital| {
                                        let navigate = navigate.clone();
                                        let target = format!(
                                            "/facilities?location={}",
                                            urlencoding::encode(city_of(&hospital.location))
                                        );
                                        view! {
                                            <tr class="border-b last:border-0">
                                                <td class="py-3 font-medium">{hospital.name}</td>
                                                <td class="py-3">{hospital.location}</td>
                                                <td class="py-3 text-center">{hospital.facilities_count}</td>
                                                <td class="py-3 text-center">
                                                    <span class="bg-green-100 text-green-800 px-2 py-0.5 rounded text-xs font-medium">
                                                        {format!("{:.1}/5.0", hospital.rating)}
                                                    </span>
                                                </td>
                                                <td class="py-3 text-right">
                                                    <button
                                                        on:click=move |_| navigate(&target, Default::default())
                                                        class="px-3 py-1.5 bg-primary text-primary-foreground rounded-md"
                                                    >
                                                        "View Facilities"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }.into_view()
                    }
                }}
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_of() {
        assert_eq!(city_of("San Francisco, CA"), "San Francisco");
        assert_eq!(city_of("Remote"), "Remote");
    }
}
