use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Guest, GuestCategory, Provenance, Room};

// Dokument události tak, jak ho vrací a přijímá REST backend.
// Zasazení hosté jsou vnoření pod svým stolem, nezasazení leží
// v poli `guests` na úrovni události.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDocument {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "paidCount")]
    pub paid_count: u32,
    #[serde(rename = "freeCount")]
    pub free_count: u32,
    #[serde(default)]
    pub tables: Vec<TableDocument>,
    #[serde(default)]
    pub guests: Vec<GuestDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDocument {
    pub id: i64,
    #[serde(rename = "tableName")]
    pub table_name: String,
    pub room: Room,
    pub capacity: u32,
    #[serde(default)]
    pub guests: Vec<GuestDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestDocument {
    pub id: i64,
    pub name: String,
    pub category: GuestCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    pub paid: bool,
    #[serde(rename = "reservationId", default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<i64>,
    #[serde(rename = "personIndex", default, skip_serializing_if = "Option::is_none")]
    pub person_index: Option<u32>,
}

impl GuestDocument {
    // Dokument neukládá odkaz na stůl - ten je dán pozicí ve stromu
    pub fn into_guest(self, table: Option<i64>) -> Guest {
        let provenance = match (self.reservation_id, self.person_index) {
            (Some(reservation_id), Some(person_index)) => Some(Provenance {
                reservation_id,
                person_index,
            }),
            _ => None,
        };
        Guest {
            id: self.id,
            name: self.name,
            category: self.category,
            nationality: self.nationality,
            paid: self.paid,
            table,
            provenance,
        }
    }

    pub fn from_guest(guest: &Guest) -> Self {
        GuestDocument {
            id: guest.id,
            name: guest.name.clone(),
            category: guest.category,
            nationality: guest.nationality.clone(),
            paid: guest.paid,
            reservation_id: guest.provenance.map(|p| p.reservation_id),
            person_index: guest.provenance.map(|p| p.person_index),
        }
    }
}
