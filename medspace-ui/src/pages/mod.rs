//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod equipment;
pub mod facilities;
pub mod hcps;
pub mod hospitals;
pub mod my_bookings;
pub mod products;
pub mod settings;
pub mod tasks;
pub mod visits;

pub use dashboard::Dashboard;
pub use equipment::EquipmentPage;
pub use facilities::Facilities;
pub use hcps::Hcps;
pub use hospitals::Hospitals;
pub use my_bookings::MyBookings;
pub use products::Products;
pub use settings::Settings;
pub use tasks::Tasks;
pub use visits::Visits;
