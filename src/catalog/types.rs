//! Core record types for the MedSpace catalog
//!
//! Every type here is read-only for the lifetime of the process:
//! - `Hospital`, `Facility`, `Equipment`: the marketplace side
//! - `Hcp`, `Visit`, `Task`, `Product`: the pharma sales side
//!
//! JSON field names are camelCase so the records serialize the same way the
//! browser front end has always stored them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A partner hospital offering facilities and equipment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: u32,
    pub name: String,
    pub location: String,
    /// Number of facilities the hospital lists as available
    pub facilities_count: u32,
    /// Rating out of 5.0
    pub rating: f32,
}

/// Kind of bookable space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FacilityType {
    OperatingRoom,
    Imaging,
    Laboratory,
    ProcedureRoom,
    Clinic,
}

impl FacilityType {
    /// Get all facility types for iteration
    pub fn all() -> &'static [FacilityType] {
        &[
            FacilityType::OperatingRoom,
            FacilityType::Imaging,
            FacilityType::Laboratory,
            FacilityType::ProcedureRoom,
            FacilityType::Clinic,
        ]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FacilityType::OperatingRoom => "Operating Room",
            FacilityType::Imaging => "Imaging Center",
            FacilityType::Laboratory => "Laboratory",
            FacilityType::ProcedureRoom => "Procedure Room",
            FacilityType::Clinic => "Clinic Space",
        }
    }
}

impl std::fmt::Display for FacilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for FacilityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "operating_room" => Ok(FacilityType::OperatingRoom),
            "imaging" | "imaging_center" => Ok(FacilityType::Imaging),
            "laboratory" => Ok(FacilityType::Laboratory),
            "procedure_room" => Ok(FacilityType::ProcedureRoom),
            "clinic" | "clinic_space" => Ok(FacilityType::Clinic),
            _ => Err(format!(
                "Invalid facility type: {}. Use operating_room, imaging, laboratory, procedure_room, or clinic",
                s
            )),
        }
    }
}

/// A bookable hospital space, priced per hour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: u32,
    pub name: String,
    /// Name of the hospital that owns the space
    pub hospital: String,
    pub location: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    /// Hourly rate in whole dollars
    pub price: u32,
    pub image: String,
    pub features: Vec<String>,
}

/// Equipment classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentCategory {
    Diagnostic,
    Surgical,
    Imaging,
    Treatment,
}

impl EquipmentCategory {
    pub fn all() -> &'static [EquipmentCategory] {
        &[
            EquipmentCategory::Diagnostic,
            EquipmentCategory::Surgical,
            EquipmentCategory::Imaging,
            EquipmentCategory::Treatment,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EquipmentCategory::Diagnostic => "Diagnostic",
            EquipmentCategory::Surgical => "Surgical",
            EquipmentCategory::Imaging => "Imaging",
            EquipmentCategory::Treatment => "Treatment",
        }
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for EquipmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diagnostic" => Ok(EquipmentCategory::Diagnostic),
            "surgical" => Ok(EquipmentCategory::Surgical),
            "imaging" => Ok(EquipmentCategory::Imaging),
            "treatment" => Ok(EquipmentCategory::Treatment),
            _ => Err(format!(
                "Invalid equipment category: {}. Use diagnostic, surgical, imaging, or treatment",
                s
            )),
        }
    }
}

/// A rentable piece of equipment, priced per day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: u32,
    pub name: String,
    pub hospital: String,
    pub location: String,
    pub category: EquipmentCategory,
    /// Daily rate in whole dollars
    pub price: u32,
    pub image: String,
    pub features: Vec<String>,
    pub description: String,
    /// Free-form availability window, e.g. "24/7" or "Weekdays 8AM-6PM"
    pub availability: String,
}

/// A healthcare professional tracked by the sales team
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hcp {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub organization: String,
    pub city: String,
    pub state: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    /// Estimated yearly value in dollars
    pub potential_value: u64,
}

/// Visit lifecycle as recorded by the rep
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Planned,
    Completed,
    Canceled,
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisitStatus::Planned => write!(f, "planned"),
            VisitStatus::Completed => write!(f, "completed"),
            VisitStatus::Canceled => write!(f, "canceled"),
        }
    }
}

/// A sales visit to an HCP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: u32,
    pub date: NaiveDate,
    pub hcp_id: u32,
    pub products_discussed: Vec<String>,
    pub notes: String,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
    pub outcome: String,
    pub status: VisitStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    /// Sort rank: high first
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::High => 1,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 3,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::High => write!(f, "high"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// What a task refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RelatedKind {
    Hcp,
    Product,
    Visit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedTo {
    #[serde(rename = "type")]
    pub kind: RelatedKind,
    pub id: u32,
}

/// A to-do item on the rep's list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default)]
    pub related_to: Option<RelatedTo>,
}

/// A pharmaceutical product in the rep's portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub active_ingredient: String,
    pub indications: Vec<String>,
    pub launch_date: NaiveDate,
}
