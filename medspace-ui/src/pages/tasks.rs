//! Tasks Page
//!
//! Follow-up tasks with their due state and what they relate to.

use leptos::*;

use crate::api::{self, Task};
use crate::components::{EmptyState, ListSkeleton, PageHeader, SearchInput};
use crate::state::GlobalState;

pub fn priority_badge(priority: &str) -> &'static str {
    match priority {
        "high" => "bg-red-100 text-red-800",
        "medium" => "bg-yellow-100 text-yellow-800",
        _ => "bg-green-100 text-green-800",
    }
}

/// Text colour for the due date
pub fn due_class(due_state: &str) -> &'static str {
    match due_state {
        "overdue" => "text-red-600 font-medium",
        "due_soon" => "text-yellow-600 font-medium",
        _ => "",
    }
}

#[component]
pub fn Tasks() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let query = create_rw_signal(String::new());
    let tasks = create_rw_signal(Vec::<Task>::new());
    let loading = create_rw_signal(true);

    create_effect(move |_| {
        let q = query.get();
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_tasks(&q).await {
                Ok(list) => tasks.set(list),
                Err(e) => state.show_error("Could not load tasks", &e),
            }
            loading.set(false);
        });
    });

    view! {
        <div class="space-y-6 animate-fade-in">
            <PageHeader title="Tasks" subtitle="Manage your follow-ups and to-dos" />

            <section class="bg-white rounded-lg shadow-sm p-6 space-y-4">
                <SearchInput value=query placeholder="Search tasks" />

                {move || {
                    let list = tasks.get();
                    if loading.get() {
                        view! { <ListSkeleton count=5 /> }.into_view()
                    } else if list.is_empty() {
                        view! { <EmptyState message="No tasks found." /> }.into_view()
                    } else {
                        view! {
                            <table class="w-full text-sm">
                                <thead>
                                    <tr class="text-left text-slate-500 border-b">
                                        <th class="py-2">"Task"</th>
                                        <th class="py-2">"Due Date"</th>
                                        <th class="py-2">"Priority"</th>
                                        <th class="py-2">"Related To"</th>
                                        <th class="py-2">"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list.into_iter().map(|task| view! {
                                        <tr class="border-b last:border-0 align-top">
                                            <td class="py-3">
                                                <div class="font-medium">{task.title.clone()}</div>
                                                <div class="text-xs text-slate-500">{task.description.clone()}</div>
                                            </td>
                                            <td class=format!("py-3 whitespace-nowrap {}", due_class(&task.due_state))>
                                                {task.due_date.clone()}
                                            </td>
                                            <td class="py-3">
                                                <span class=format!("px-2 py-0.5 rounded-full text-xs capitalize {}", priority_badge(&task.priority))>
                                                    {task.priority.clone()}
                                                </span>
                                            </td>
                                            <td class="py-3">{task.related_name.clone()}</td>
                                            <td class="py-3 capitalize">{task.status.replace('-', " ")}</td>
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
