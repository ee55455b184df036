//! MedSpace Front End
//!
//! Marketplace and pharma sales portal built with Leptos (WASM).
//!
//! # Features
//!
//! - Browse hospitals, facilities, and equipment
//! - Book and cancel facility and equipment rentals
//! - Pharma portal: HCPs, visits, tasks, and products
//! - WebSocket live booking updates
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the MedSpace API over HTTP and WebSocket; the
//! item picked with "Book Now" or "Rent Now" travels to the booking form
//! through session storage.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
