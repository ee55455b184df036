//! My Bookings Page
//!
//! Shows the booking form for the item picked with "Book Now" / "Rent Now"
//! and lists every booking with its status.

use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::*;

use crate::api::{self, Booking};
use crate::components::{ListSkeleton, PageHeader};
use crate::state::selection::{self, booking_request, missing_information, parse_duration};
use crate::state::{GlobalState, Selection};

const MISSING_TITLE: &str = "Missing information";
const MISSING_DESCRIPTION: &str = "Please fill out all required fields to complete your booking.";

/// My Bookings page component
#[component]
pub fn MyBookings() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let bookings = state.bookings;

    let current = create_rw_signal(selection::load());
    let loading = create_rw_signal(true);

    let state_for_load = state.clone();
    spawn_local(async move {
        match api::fetch_bookings().await {
            Ok(list) => bookings.set(list.bookings),
            Err(e) => state_for_load.show_error("Could not load bookings", &e),
        }
        loading.set(false);
    });

    let navigate = use_navigate();
    let navigate_equipment = navigate.clone();

    view! {
        <div class="space-y-6 animate-fade-in">
            <PageHeader title="My Bookings" subtitle="Manage your facility and equipment bookings" />

            {move || current.get().map(|item| view! { <BookingForm item=item current=current /> })}

            <section class="space-y-4">
                <h2 class="text-xl font-semibold">"Your Bookings"</h2>

                {move || {
                    let list = bookings.get();
                    if loading.get() && list.is_empty() {
                        view! { <ListSkeleton count=2 /> }.into_view()
                    } else if list.is_empty() {
                        let navigate = navigate.clone();
                        let navigate_equipment = navigate_equipment.clone();
                        view! {
                            <div class="bg-slate-50 p-8 rounded-md text-center">
                                <p class="text-slate-500">"You don't have any bookings yet."</p>
                                <div class="flex justify-center gap-4 mt-4">
                                    <button
                                        on:click=move |_| navigate("/facilities", Default::default())
                                        class="px-4 py-2 bg-primary text-primary-foreground rounded-md"
                                    >
                                        "Find a Facility"
                                    </button>
                                    <button
                                        on:click=move |_| navigate_equipment("/equipment", Default::default())
                                        class="px-4 py-2 bg-primary text-primary-foreground rounded-md"
                                    >
                                        "Find Equipment"
                                    </button>
                                </div>
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                {list.into_iter().map(|booking| view! { <BookingCard booking=booking /> }).collect_view()}
                            </div>
                        }.into_view()
                    }
                }}
            </section>
        </div>
    }
}

/// Date, time, and duration for the selected item
#[component]
fn BookingForm(item: Selection, current: RwSignal<Option<Selection>>) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let booking_date = create_rw_signal(String::new());
    let start_time = create_rw_signal(String::new());
    let duration = create_rw_signal(1u32);
    let submitting = create_rw_signal(false);

    let max = item.max_duration();
    let price = item.price();
    let title = format!("Book {}", item.name());
    let subtitle = if item.is_equipment() {
        "Complete your equipment rental details"
    } else {
        "Complete your facility booking details"
    };
    let kind_label = if item.is_equipment() { "Equipment" } else { "Facility" };
    let duration_label = format!("Duration ({})", item.duration_unit());
    let rate = format!("${}/{}", price, item.rate_unit());
    let (name, hospital, location) = (
        item.name().to_string(),
        item.hospital().to_string(),
        item.location().to_string(),
    );

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let selected = current.get_untracked();
        let date = booking_date.get_untracked();
        let time = start_time.get_untracked();
        if missing_information(selected.as_ref(), &date, &time) {
            state.show_error(MISSING_TITLE, MISSING_DESCRIPTION);
            return;
        }
        let Some(selected) = selected else {
            return;
        };

        let request = booking_request(&selected, &date, &time, duration.get_untracked());
        let state = state.clone();
        submitting.set(true);

        spawn_local(async move {
            match api::create_booking(&request).await {
                Ok(booking) => {
                    state.show_success(
                        "Booking confirmed",
                        &format!(
                            "You have successfully booked {} for {}",
                            booking.item_name, booking.booking_date
                        ),
                    );
                    state.apply_booking(booking);
                    selection::clear();
                    current.set(None);
                }
                Err(e) if e.is_missing_information() => {
                    state.show_error(MISSING_TITLE, MISSING_DESCRIPTION);
                }
                Err(e) => state.show_error("Booking failed", &e.message),
            }
            submitting.set(false);
        });
    };

    let cancel = move |_| {
        selection::clear();
        current.set(None);
    };

    view! {
        <section class="bg-white rounded-lg shadow-sm p-6">
            <h2 class="text-xl font-semibold">{title}</h2>
            <p class="text-slate-500 mb-4">{subtitle}</p>

            <form on:submit=submit class="space-y-4">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="space-y-2">
                        <label class="text-sm font-medium">{format!("{} Information", kind_label)}</label>
                        <div class="bg-slate-50 p-3 rounded-md">
                            <div class="font-medium">{name}</div>
                            <div class="text-sm text-slate-500 mt-1">{hospital}</div>
                            <div class="text-sm text-slate-500">{location}</div>
                            <div class="mt-2 text-sm font-medium">{rate}</div>
                        </div>
                    </div>

                    <div class="space-y-4">
                        <div>
                            <label class="text-sm font-medium">"Booking Date"</label>
                            <input
                                type="date"
                                required
                                prop:value=move || booking_date.get()
                                on:input=move |ev| booking_date.set(event_target_value(&ev))
                                class="mt-1 w-full h-10 px-3 border border-slate-300 rounded-md"
                            />
                        </div>
                        <div>
                            <label class="text-sm font-medium">"Start Time"</label>
                            <input
                                type="time"
                                required
                                prop:value=move || start_time.get()
                                on:input=move |ev| start_time.set(event_target_value(&ev))
                                class="mt-1 w-full h-10 px-3 border border-slate-300 rounded-md"
                            />
                        </div>
                        <div>
                            <label class="text-sm font-medium">{duration_label}</label>
                            <input
                                type="number"
                                min="1"
                                max=max.to_string()
                                prop:value=move || duration.get().to_string()
                                on:input=move |ev| duration.set(parse_duration(&event_target_value(&ev), max))
                                class="mt-1 w-full h-10 px-3 border border-slate-300 rounded-md"
                            />
                        </div>
                    </div>
                </div>

                <div class="flex justify-between items-center pt-4 border-t border-slate-100">
                    <div>
                        <p class="text-sm font-medium">"Total Price"</p>
                        <p class="text-xl font-bold">{move || format!("${}", u64::from(price) * u64::from(duration.get()))}</p>
                    </div>
                    <div class="flex gap-2">
                        <button type="button" on:click=cancel class="px-4 py-2 border border-slate-300 rounded-md">
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="px-4 py-2 bg-primary text-primary-foreground rounded-md disabled:opacity-50"
                        >
                            {move || if submitting.get() { "Booking..." } else { "Confirm Booking" }}
                        </button>
                    </div>
                </div>
            </form>
        </section>
    }
}

#[component]
fn BookingCard(booking: Booking) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let confirmed = booking.is_confirmed();
    let id = booking.id;

    let (stripe, badge) = if confirmed {
        ("bg-green-500", "bg-green-100 text-green-800")
    } else {
        ("bg-red-500", "bg-red-100 text-red-800")
    };

    let cancel = move |_| {
        let state = state.clone();
        spawn_local(async move {
            match api::cancel_booking(id).await {
                Ok(updated) => {
                    state.apply_booking(updated);
                    state.show_success("Booking cancelled", "Your booking has been cancelled successfully.");
                }
                Err(e) => state.show_error("Cancel failed", &e),
            }
        });
    };

    view! {
        <div class="overflow-hidden bg-white rounded-lg shadow-sm">
            <div class=format!("h-2 {}", stripe)></div>
            <div class="p-4 space-y-2">
                <div class="flex justify-between items-start">
                    <div>
                        <h3 class="text-base font-semibold">{booking.item_name.clone()}</h3>
                        <span class="text-xs bg-slate-100 px-2 py-0.5 rounded-full uppercase">{booking.kind.clone()}</span>
                    </div>
                    <span class=format!("px-2 py-1 text-xs rounded-full {}", badge)>{booking.status.clone()}</span>
                </div>
                <div class="flex flex-col text-sm text-slate-500">
                    <span>{booking.hospital_name.clone()}</span>
                    <span>{booking.location.clone()}</span>
                </div>
                <div>{booking.booking_date.clone()}</div>
                <div>{format!("{} ({})", booking.start_time, booking.duration_label())}</div>
                <div class="mt-2">
                    <p class="text-sm font-medium">"Total Price"</p>
                    <p class="font-bold">{format!("${}", booking.total_price)}</p>
                </div>
                {confirmed.then(|| view! {
                    <button
                        on:click=cancel
                        class="mt-2 px-3 py-1.5 border border-slate-300 rounded-md text-sm text-red-500 hover:text-red-700"
                    >
                        "Cancel Booking"
                    </button>
                })}
            </div>
        </div>
    }
}
