//! Porovnání počtů hostů - čistá projekce nad aktuálním stavem plánu.
//!
//! Událost nese dvě ručně zapsaná čísla (platící/neplatící) a vedle nich
//! se z příznaků hostů počítají skutečné součty. Obě řady čísel se
//! zobrazují vedle sebe a rozdíl se jen ohlásí, nikdy nevynucuje -
//! obsluha smí mít usazeno méně či více jmen, než kolik je účtováno.

use serde::Serialize;

use crate::models::Guest;

use super::plan::FloorPlan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    #[serde(rename = "computedPaid")]
    pub computed_paid: u32,
    #[serde(rename = "computedFree")]
    pub computed_free: u32,
    #[serde(rename = "manualPaid")]
    pub manual_paid: u32,
    #[serde(rename = "manualFree")]
    pub manual_free: u32,
    pub mismatch: bool,
}

impl FloorPlan {
    /// Spočítá oba páry součtů. Přepočítává se při každém čtení, nic se
    /// nikde necachuje ani nezapisuje zpět.
    pub fn reconciliation(&self) -> Reconciliation {
        let computed_paid = self.guests().iter().filter(|g| g.paid).count() as u32;
        let computed_free = self.guests().len() as u32 - computed_paid;

        Reconciliation {
            computed_paid,
            computed_free,
            manual_paid: self.paid_count,
            manual_free: self.free_count,
            mismatch: computed_paid != self.paid_count || computed_free != self.free_count,
        }
    }

    /// Národnosti zastoupené mezi nezasazenými hosty, pro filtr v panelu.
    pub fn unassigned_nationalities(&self) -> Vec<String> {
        let mut nationalities: Vec<String> = self
            .unassigned()
            .filter_map(|g| g.nationality.clone())
            .collect();
        nationalities.sort();
        nationalities.dedup();
        nationalities
    }

    /// Nezasazení hosté, volitelně zúžení na jednu národnost.
    /// None znamená "all" - bez filtru.
    pub fn unassigned_filtered(&self, nationality: Option<&str>) -> Vec<&Guest> {
        self.unassigned()
            .filter(|g| match nationality {
                Some(wanted) => g.nationality.as_deref() == Some(wanted),
                None => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GuestCategory, Room};
    use crate::floorplan::drop_target::DropTarget;
    use chrono::NaiveDate;

    fn plan() -> FloorPlan {
        FloorPlan {
            event_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            paid_count: 2,
            free_count: 1,
            tables: Vec::new(),
            guests: Vec::new(),
            table_seq: 0,
            guest_seq: 0,
        }
    }

    #[test]
    fn counts_cover_whole_roster_regardless_of_seating() {
        let mut plan = plan();
        let table = plan.create_table("Stůl".to_string(), Room::Roubenka, 4);
        let seated = plan.add_guest("A".to_string(), GuestCategory::Adult, None, true);
        plan.add_guest("B".to_string(), GuestCategory::Adult, None, true);
        plan.add_guest("C".to_string(), GuestCategory::Child, None, false);
        plan.move_guest(seated, DropTarget::OnTable(table));

        let view = plan.reconciliation();
        assert_eq!(view.computed_paid, 2);
        assert_eq!(view.computed_free, 1);
        assert_eq!(view.manual_paid, 2);
        assert_eq!(view.manual_free, 1);
        assert!(!view.mismatch);
    }

    #[test]
    fn mismatch_is_flagged_but_nothing_else_changes() {
        let mut plan = plan();
        plan.add_guest("A".to_string(), GuestCategory::Adult, None, true);

        let view = plan.reconciliation();
        assert!(view.mismatch);
        // ruční čísla zůstávají nedotčená
        assert_eq!(plan.paid_count, 2);
        assert_eq!(plan.free_count, 1);
    }

    #[test]
    fn nationality_facets_come_from_unassigned_only() {
        let mut plan = plan();
        let table = plan.create_table("Stůl".to_string(), Room::Roubenka, 4);
        let seated = plan.add_guest(
            "A".to_string(),
            GuestCategory::Adult,
            Some("fr".to_string()),
            true,
        );
        plan.move_guest(seated, DropTarget::OnTable(table));
        plan.add_guest("B".to_string(), GuestCategory::Adult, Some("de".to_string()), true);
        plan.add_guest("C".to_string(), GuestCategory::Adult, Some("cz".to_string()), true);
        plan.add_guest("D".to_string(), GuestCategory::Adult, Some("de".to_string()), true);
        plan.add_guest("E".to_string(), GuestCategory::Adult, None, false);

        assert_eq!(plan.unassigned_nationalities(), vec!["cz", "de"]);
        assert_eq!(plan.unassigned_filtered(Some("de")).len(), 2);
        // None = "all"
        assert_eq!(plan.unassigned_filtered(None).len(), 4);
    }
}
