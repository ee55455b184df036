//! Visits Page
//!
//! Sales visits joined with their HCP.

use leptos::*;

use crate::api::{self, Visit};
use crate::components::{EmptyState, ListSkeleton, PageHeader, SearchInput};
use crate::state::GlobalState;

/// Badge classes for a visit status
pub fn status_badge(status: &str) -> &'static str {
    match status {
        "completed" => "bg-green-100 text-green-800",
        "planned" => "bg-blue-100 text-blue-800",
        _ => "bg-red-100 text-red-800",
    }
}

/// Cut long notes to `max` characters plus an ellipsis
pub fn short_notes(notes: &str, max: usize) -> String {
    if notes.chars().count() > max {
        format!("{}...", notes.chars().take(max).collect::<String>())
    } else {
        notes.to_string()
    }
}

#[component]
pub fn Visits() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let query = create_rw_signal(String::new());
    let visits = create_rw_signal(Vec::<Visit>::new());
    let loading = create_rw_signal(true);

    create_effect(move |_| {
        let q = query.get();
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_visits(&q).await {
                Ok(list) => visits.set(list),
                Err(e) => state.show_error("Could not load visits", &e),
            }
            loading.set(false);
        });
    });

    view! {
        <div class="space-y-6 animate-fade-in">
            <PageHeader title="Visits" subtitle="Track your HCP visits and outcomes" />

            <section class="bg-white rounded-lg shadow-sm p-6 space-y-4">
                <SearchInput value=query placeholder="Search by HCP, organization, notes, or outcome" />

                {move || {
                    let list = visits.get();
                    if loading.get() {
                        view! { <ListSkeleton count=4 /> }.into_view()
                    } else if list.is_empty() {
                        view! { <EmptyState message="No visits found." /> }.into_view()
                    } else {
                        view! {
                            <table class="w-full text-sm">
                                <thead>
                                    <tr class="text-left text-slate-500 border-b">
                                        <th class="py-2">"Date"</th>
                                        <th class="py-2">"HCP"</th>
                                        <th class="py-2">"Organization"</th>
                                        <th class="py-2">"Status"</th>
                                        <th class="py-2">"Products Discussed"</th>
                                        <th class="py-2">"Notes"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list.into_iter().map(|visit| view! {
                                        <tr class="border-b last:border-0 align-top">
                                            <td class="py-3 whitespace-nowrap">{visit.date.clone()}</td>
                                            <td class="py-3 font-medium">{visit.hcp_name.clone()}</td>
                                            <td class="py-3">{visit.hcp_organization.clone()}</td>
                                            <td class="py-3">
                                                <span class=format!("px-2 py-0.5 rounded-full text-xs capitalize {}", status_badge(&visit.status))>
                                                    {visit.status.clone()}
                                                </span>
                                            </td>
                                            <td class="py-3">
                                                <div class="flex flex-wrap gap-1">
                                                    {visit.products_discussed.iter().map(|p| view! {
                                                        <span class="bg-slate-100 px-2 py-0.5 rounded text-xs">{p.clone()}</span>
                                                    }).collect_view()}
                                                </div>
                                            </td>
                                            <td class="py-3 text-slate-600">
                                                {short_notes(&visit.notes, 50)}
                                                {visit.follow_up_date.clone().map(|d| view! {
                                                    <div class="text-xs text-slate-400">{format!("Follow-up: {}", d)}</div>
                                                })}
                                            </td>
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
    fn test_short_notes() {
        assert_eq!(short_notes("Short note", 50), "Short note");
        assert_eq!(short_notes("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_status_badge() {
        assert!(status_badge("completed").contains("green"));
        assert!(status_badge("canceled").contains("red"));
    }
}
