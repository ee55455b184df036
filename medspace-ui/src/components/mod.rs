//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod loading;
pub mod nav;
pub mod page_header;
pub mod toast;

pub use loading::{CardGridSkeleton, CardSkeleton, ListSkeleton, Loading};
pub use nav::Nav;
pub use page_header::{EmptyState, PageHeader, SearchInput};
pub use toast::Toast;
