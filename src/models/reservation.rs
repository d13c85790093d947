use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Rezervace z externího rezervačního systému - čteme je pouze při importu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "contactName")]
    pub contact_name: String,
    #[serde(rename = "contactNationality", default)]
    pub contact_nationality: Option<String>,
    pub status: String,
    #[serde(default)]
    pub persons: Vec<ReservationPerson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationPerson {
    #[serde(rename = "type")]
    pub person_type: PersonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Adult,
    Child,
    Infant,
}

impl Reservation {
    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }
}
