use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestCategory {
    Adult,
    Child,
}

// Vazba importovaného hosta zpět na rezervaci, ze které vznikl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub reservation_id: i64,
    pub person_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub category: GuestCategory,
    pub nationality: Option<String>,
    pub paid: bool,
    // None = host sedí v nezasazených
    pub table: Option<i64>,
    pub provenance: Option<Provenance>,
}
