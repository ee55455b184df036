//! Catalog search and ordering
//!
//! Every list view in MedSpace is driven by the same primitive: a
//! case-insensitive substring match against a fixed set of fields per record
//! type. On top of that sit the marketplace filters (type, location, price
//! band) and the dashboard orderings (upcoming visits, pending tasks, top HCPs).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::catalog::types::{
    Equipment, EquipmentCategory, Facility, FacilityType, Hcp, Hospital, Product, Task,
    TaskPriority, TaskStatus, Visit, VisitStatus,
};

/// Records that can be matched against a free-text query
pub trait Searchable {
    /// Fields the query is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// True if any searchable field contains the (already lowercased) needle
    fn matches_needle(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Hospital {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str()]
    }
}

impl Searchable for Facility {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.hospital.as_str(),
            self.location.as_str(),
            self.facility_type.label(),
        ];
        fields.extend(self.features.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Equipment {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.hospital.as_str(),
            self.location.as_str(),
            self.category.label(),
        ];
        fields.extend(self.features.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Hcp {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.specialty.as_str(),
            self.organization.as_str(),
            self.city.as_str(),
            self.state.as_str(),
        ]
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        let status = match self.status {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        };
        let priority = match self.priority {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        };
        vec![self.title.as_str(), self.description.as_str(), status, priority]
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.active_ingredient.as_str(),
        ]
    }
}

/// Normalize a query into a needle. `None` means "match everything".
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// True if `item` matches `query` (an empty query matches everything)
pub fn matches_query<T: Searchable>(item: &T, query: &str) -> bool {
    match normalize_query(query) {
        None => true,
        Some(needle) => item.matches_needle(&needle),
    }
}

/// Filter `items` by a free-text query, preserving order
pub fn search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    match normalize_query(query) {
        None => items.iter().collect(),
        Some(needle) => items.iter().filter(|item| item.matches_needle(&needle)).collect(),
    }
}

/// Case-insensitive substring test used by the location filters
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn price_in_band(price: u32, min: Option<u32>, max: Option<u32>) -> bool {
    min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
}

/// Marketplace filter for facilities
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FacilityFilter {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, rename = "type")]
    pub facility_type: Option<FacilityType>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
}

impl FacilityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the free-text query
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Builder method: restrict to one facility type
    pub fn facility_type(mut self, facility_type: FacilityType) -> Self {
        self.facility_type = Some(facility_type);
        self
    }

    /// Builder method: restrict to a location substring
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method: inclusive price band
    pub fn price_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Check if a facility matches every set criterion
    pub fn matches(&self, facility: &Facility) -> bool {
        if let Some(query) = &self.query {
            if !matches_query(facility, query) {
                return false;
            }
        }
        if let Some(facility_type) = self.facility_type {
            if facility.facility_type != facility_type {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains_ci(&facility.location, location) {
                return false;
            }
        }
        price_in_band(facility.price, self.min_price, self.max_price)
    }

    pub fn apply<'a>(&self, facilities: &'a [Facility]) -> Vec<&'a Facility> {
        facilities.iter().filter(|f| self.matches(f)).collect()
    }
}

/// Marketplace filter for equipment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EquipmentFilter {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<EquipmentCategory>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
}

impl EquipmentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: EquipmentCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn price_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn matches(&self, item: &Equipment) -> bool {
        if let Some(query) = &self.query {
            if !matches_query(item, query) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if item.category != category {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains_ci(&item.location, location) {
                return false;
            }
        }
        price_in_band(item.price, self.min_price, self.max_price)
    }

    pub fn apply<'a>(&self, items: &'a [Equipment]) -> Vec<&'a Equipment> {
        items.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Filter products by category tab. `"all"` selects everything.
pub fn filter_products_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    if category.eq_ignore_ascii_case("all") {
        products.iter().collect()
    } else {
        products.iter().filter(|p| p.category == category).collect()
    }
}

/// Unique product categories, in first-seen order
pub fn product_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

/// Planned visits, soonest first
pub fn upcoming_visits(visits: &[Visit], limit: usize) -> Vec<&Visit> {
    let mut planned: Vec<&Visit> = visits
        .iter()
        .filter(|v| v.status == VisitStatus::Planned)
        .collect();
    planned.sort_by_key(|v| v.date);
    planned.truncate(limit);
    planned
}

/// Open tasks ordered by due date, then priority (high first)
pub fn pending_tasks(tasks: &[Task], limit: usize) -> Vec<&Task> {
    let mut open: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .collect();
    open.sort_by_key(|t| (t.due_date, t.priority.rank()));
    open.truncate(limit);
    open
}

/// HCPs ordered by potential value, highest first
pub fn top_hcps(hcps: &[Hcp], limit: usize) -> Vec<&Hcp> {
    let mut ranked: Vec<&Hcp> = hcps.iter().collect();
    ranked.sort_by_key(|h| Reverse(h.potential_value));
    ranked.truncate(limit);
    ranked
}

/// How close a task is to its due date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    Overdue,
    DueSoon,
    Normal,
}

/// Classify a task against `today`: overdue if past due, due soon within two days.
/// Completed tasks are always `Normal`.
pub fn due_state(task: &Task, today: NaiveDate) -> DueState {
    if task.status == TaskStatus::Completed {
        return DueState::Normal;
    }
    let days_left = (task.due_date - today).num_days();
    if days_left < 0 {
        DueState::Overdue
    } else if days_left < 2 {
        DueState::DueSoon
    } else {
        DueState::Normal
    }
}

/// Shorten visit notes for cards
pub fn truncate_notes(notes: &str, max_chars: usize) -> String {
    if notes.chars().count() > max_chars {
        let head: String = notes.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        notes.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;

    #[test]
    fn test_empty_query_returns_everything() {
        let hcps = seed::hcps();
        assert_eq!(search(&hcps, "").len(), hcps.len());
        assert_eq!(search(&hcps, "   ").len(), hcps.len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let hcps = seed::hcps();
        let results = search(&hcps, "CARDIO");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Dr. Sarah Johnson");
    }

    #[test]
    fn test_search_is_sound_and_complete() {
        let facilities = seed::facilities();
        for query in ["room", "CA", "memorial", "lab", "x", "zzz", "Imaging"] {
            let needle = query.to_lowercase();
            let results = search(&facilities, query);

            // every result matches
            for facility in &results {
                assert!(facility
                    .search_fields()
                    .iter()
                    .any(|f| f.to_lowercase().contains(&needle)));
            }

            // nothing matching is omitted
            let expected = facilities
                .iter()
                .filter(|f| {
                    f.search_fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
                })
                .count();
            assert_eq!(results.len(), expected, "query {:?}", query);
        }
    }

    #[test]
    fn test_search_preserves_order() {
        let hospitals = seed::hospitals();
        let results = search(&hospitals, ", ca");
        let ids: Vec<u32> = results.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_task_search_matches_status_and_priority() {
        let tasks = seed::tasks();
        let high = search(&tasks, "high");
        assert!(high.iter().all(|t| t.priority == TaskPriority::High
            || t.title.to_lowercase().contains("high")
            || t.description.to_lowercase().contains("high")));
        assert!(!high.is_empty());
        let in_progress = search(&tasks, "in-progress");
        assert_eq!(in_progress.len(), 1);
    }

    #[test]
    fn test_facility_filter() {
        let facilities = seed::facilities();

        let imaging = FacilityFilter::new()
            .facility_type(FacilityType::Imaging)
            .apply(&facilities);
        assert_eq!(imaging.len(), 1);
        assert_eq!(imaging[0].id, 2);

        let mid_price = FacilityFilter::new()
            .price_range(Some(700), Some(1000))
            .apply(&facilities);
        let ids: Vec<u32> = mid_price.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);

        let san = FacilityFilter::new().location("san").apply(&facilities);
        assert_eq!(san.len(), 3);

        let none = FacilityFilter::new()
            .query("MRI")
            .location("Sacramento")
            .apply(&facilities);
        assert!(none.is_empty());
    }

    #[test]
    fn test_equipment_filter() {
        let items = seed::equipment();
        let diagnostic = EquipmentFilter::new()
            .category(EquipmentCategory::Diagnostic)
            .apply(&items);
        assert_eq!(diagnostic.len(), 2);

        let cheap = EquipmentFilter::new().price_range(None, Some(400)).apply(&items);
        let ids: Vec<u32> = cheap.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_product_categories() {
        let products = seed::products();
        let categories = product_categories(&products);
        assert_eq!(categories[0], "Cardiology");
        assert_eq!(
            categories.iter().filter(|c| c.as_str() == "Oncology").count(),
            1
        );
        assert_eq!(filter_products_by_category(&products, "all").len(), products.len());
        assert_eq!(filter_products_by_category(&products, "Oncology").len(), 2);
    }

    #[test]
    fn test_upcoming_visits_sorted_and_limited() {
        let visits = seed::visits();
        let upcoming = upcoming_visits(&visits, 4);
        assert_eq!(upcoming.len(), 4);
        assert!(upcoming.iter().all(|v| v.status == VisitStatus::Planned));
        assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_pending_tasks_order() {
        let tasks = seed::tasks();
        let pending = pending_tasks(&tasks, 4);
        assert_eq!(pending.len(), 4);
        assert!(pending.iter().all(|t| t.status != TaskStatus::Completed));
        // tasks 1 and 3 share a due date; high priority wins
        assert_eq!(pending[0].id, 1);
        assert_eq!(pending[1].id, 3);
    }

    #[test]
    fn test_top_hcps() {
        let hcps = seed::hcps();
        let top = top_hcps(&hcps, 3);
        let values: Vec<u64> = top.iter().map(|h| h.potential_value).collect();
        assert_eq!(values, vec![75_000, 50_000, 40_000]);
    }

    #[test]
    fn test_due_state() {
        let tasks = seed::tasks();
        let task = &tasks[0];
        let due = task.due_date;
        assert_eq!(due_state(task, due + chrono::Duration::days(1)), DueState::Overdue);
        assert_eq!(due_state(task, due), DueState::DueSoon);
        assert_eq!(due_state(task, due - chrono::Duration::days(1)), DueState::DueSoon);
        assert_eq!(due_state(task, due - chrono::Duration::days(5)), DueState::Normal);
    }

    #[test]
    fn test_completed_task_is_never_overdue() {
        let tasks = seed::tasks();
        let done = tasks
            .iter()
            .find(|t| t.status == TaskStatus::Completed)
            .unwrap();
        let due = done.due_date;

        assert_eq!(due_state(done, due + chrono::Duration::days(3)), DueState::Normal);
        assert_eq!(due_state(done, due), DueState::Normal);
    }

    #[test]
    fn test_truncate_notes() {
        assert_eq!(truncate_notes("short", 60), "short");
        let long = "a".repeat(70);
        let truncated = truncate_notes(&long, 60);
        assert_eq!(truncated.len(), 63);
        assert!(truncated.ends_with("..."));
    }
}
