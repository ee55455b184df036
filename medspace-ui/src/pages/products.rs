//! Products Page
//!
//! Product portfolio with category tabs.

use leptos::*;

use crate::api::{self, Product};
use crate::components::{EmptyState, ListSkeleton, PageHeader, SearchInput};
use crate::state::GlobalState;

const ALL: &str = "all";

#[component]
pub fn Products() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let query = create_rw_signal(String::new());
    let category = create_rw_signal(ALL.to_string());
    let products = create_rw_signal(Vec::<Product>::new());
    let categories = create_rw_signal(Vec::<String>::new());
    let loading = create_rw_signal(true);

    create_effect(move |_| {
        let q = query.get();
        let c = category.get();
        let state = state.clone();
        spawn_local(async move {
            match api::fetch_products(&q, &c).await {
                Ok(list) => {
                    products.set(list.items);
                    categories.set(list.categories);
                }
                Err(e) => state.show_error("Could not load products", &e),
            }
            loading.set(false);
        });
    });

    let tab_class = move |name: &str| {
        let base = "px-3 py-1.5 rounded-md text-sm font-medium transition-colors";
        if category.get() == name {
            format!("{} bg-white shadow-sm", base)
        } else {
            format!("{} text-slate-500 hover:text-slate-900", base)
        }
    };

    view! {
        <div class="space-y-6 animate-fade-in">
            <PageHeader title="Products" subtitle="Your pharmaceutical product portfolio" />

            <div class="flex flex-col md:flex-row md:items-center gap-4">
                <div class="inline-flex bg-slate-100 p-1 rounded-lg gap-1">
                    <button on:click=move |_| category.set(ALL.to_string()) class=move || tab_class(ALL)>
                        "All Products"
                    </button>
                    {move || categories.get().into_iter().map(|name| {
                        let for_click = name.clone();
                        let for_class = name.clone();
                        view! {
                            <button
                                on:click=move |_| category.set(for_click.clone())
                                class=move || tab_class(&for_class)
                            >
                                {name}
                            </button>
                        }
                    }).collect_view()}
                </div>
                <div class="flex-1">
                    <SearchInput value=query placeholder="Search products" />
                </div>
            </div>

            <section class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                {move || {
                    let list = products.get();
                    if loading.get() {
                        view! { <ListSkeleton count=3 /> }.into_view()
                    } else if list.is_empty() {
                        view! { <EmptyState message="No products found." /> }.into_view()
                    } else {
                        list.into_iter().map(|product| view! {
                            <div class="bg-white rounded-lg shadow-sm p-5 space-y-3">
                                <div class="flex items-start justify-between">
                                    <h3 class="text-lg font-semibold">{product.name.clone()}</h3>
                                    <span class="text-xs bg-slate-100 px-2 py-0.5 rounded-full">{product.category.clone()}</span>
                                </div>
                                <p class="text-sm text-slate-600">{product.description.clone()}</p>
                                <div class="text-sm">
                                    <span class="font-medium">"Active ingredient: "</span>
                                    {product.active_ingredient.clone()}
                                </div>
                                <div class="flex flex-wrap gap-1">
                                    {product.indications.iter().map(|i| view! {
                                        <span class="bg-blue-50 text-blue-700 px-2 py-0.5 rounded text-xs">{i.clone()}</span>
                                    }).collect_view()}
                                </div>
                                <p class="text-xs text-slate-400">{format!("Launched {}", product.launch_date)}</p>
                            </div>
                        }).collect_view()
                    }
                }}
            </section>
        </div>
    }
}
