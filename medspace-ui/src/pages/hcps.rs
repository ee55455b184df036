//! Healthcare Professionals Page

use leptos::*;

use crate::api::{self, Hcp};
use crate::components::{EmptyState, ListSkeleton, PageHeader, SearchInput};
use crate::state::GlobalState;

/// Five stars, `rating` of them filled
pub fn star_row(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// "$1,250,000"
pub fn format_dollars(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}

#[component]
pub fn Hcps() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let query = create_rw_signal(String::new());
    let hcps = create_rw_signal(Vec::<Hcp>::new());
    let loading = create_rw_signal(true);

    create_effect(move |_| {
        let q = query.get();
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_hcps(&q).await {
                Ok(list) => hcps.set(list),
                Err(e) => state.show_error("Could not load HCPs", &e),
            }
            loading.set(false);
        });
    });

    view! {
        <div class="space-y-6 animate-fade-in">
            <PageHeader title="Healthcare Professionals" subtitle="Manage your HCP relationships" />

            <section class="bg-white rounded-lg shadow-sm p-6 space-y-4">
                <SearchInput value=query placeholder="Search by name, specialty, or organization" />

                {move || {
                    let list = hcps.get();
                    if loading.get() {
                        view! { <ListSkeleton count=5 /> }.into_view()
                    } else if list.is_empty() {
                        view! { <EmptyState message="No healthcare professionals found." /> }.into_view()
                    } else {
                        view! {
                            <table class="w-full text-sm">
                                <thead>
                                    <tr class="text-left text-slate-500 border-b">
                                        <th class="py-2">"Name"</th>
                                        <th class="py-2">"Specialty"</th>
                                        <th class="py-2">"Organization"</th>
                                        <th class="py-2">"Location"</th>
                                        <th class="py-2">"Rating"</th>
                                        <th class="py-2 text-right">"Value"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list.into_iter().map(|hcp| view! {
                                        <tr class="border-b last:border-0">
                                            <td class="py-3 font-medium">{hcp.name}</td>
                                            <td class="py-3">{hcp.specialty}</td>
                                            <td class="py-3">{hcp.organization}</td>
                                            <td class="py-3">{format!("{}, {}", hcp.city, hcp.state)}</td>
                                            <td class="py-3 text-pharma-warning">{star_row(hcp.rating)}</td>
                                            <td class="py-3 text-right">{format_dollars(hcp.potential_value)}</td>
                                        </tr>
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
    fn test_star_row() {
        assert_eq!(star_row(3), "★★★☆☆");
        assert_eq!(star_row(9), "★★★★★");
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0), "$0");
        assert_eq!(format_dollars(950), "$950");
        assert_eq!(format_dollars(125_000), "$125,000");
        assert_eq!(format_dollars(1_250_000), "$1,250,000");
    }
}
