//! Rozlišení cíle drag-and-drop operace.
//!
//! Vrstva tažení posílá jen surovou identitu prvku, na který host dopadl
//! ("table-3", "guest-7", "unassigned"). Tady se identita přeloží právě
//! jednou na typovaný cíl a teprve ten se předává do `move_guest` -
//! rozlišování cíle a samotná mutace tak zůstávají oddělené.

use super::plan::FloorPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    OnTable(i64),
    OnGuest(i64),
    OnUnassigned,
}

impl DropTarget {
    /// Přeloží surovou identitu cíle. Neznámá nebo rozbitá identita vrací
    /// None a tah se tiše zahodí - host zůstane, kde byl.
    pub fn resolve(plan: &FloorPlan, raw: &str) -> Option<DropTarget> {
        if raw == "unassigned" {
            return Some(DropTarget::OnUnassigned);
        }
        if let Some(id) = raw.strip_prefix("table-").and_then(|s| s.parse::<i64>().ok()) {
            return plan.table(id).map(|t| DropTarget::OnTable(t.id));
        }
        if let Some(id) = raw.strip_prefix("guest-").and_then(|s| s.parse::<i64>().ok()) {
            return plan.guest(id).map(|g| DropTarget::OnGuest(g.id));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GuestCategory, Room};
    use chrono::NaiveDate;

    fn plan() -> FloorPlan {
        let mut plan = FloorPlan {
            event_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            paid_count: 0,
            free_count: 0,
            tables: Vec::new(),
            guests: Vec::new(),
            table_seq: 0,
            guest_seq: 0,
        };
        plan.create_table("Stůl".to_string(), Room::Roubenka, 4);
        plan.add_guest("Host".to_string(), GuestCategory::Adult, None, false);
        plan
    }

    #[test]
    fn resolves_known_targets() {
        let plan = plan();
        assert_eq!(
            DropTarget::resolve(&plan, "table-1"),
            Some(DropTarget::OnTable(1))
        );
        assert_eq!(
            DropTarget::resolve(&plan, "guest-1"),
            Some(DropTarget::OnGuest(1))
        );
        assert_eq!(
            DropTarget::resolve(&plan, "unassigned"),
            Some(DropTarget::OnUnassigned)
        );
    }

    #[test]
    fn unknown_ids_do_not_resolve() {
        let plan = plan();
        assert_eq!(DropTarget::resolve(&plan, "table-99"), None);
        assert_eq!(DropTarget::resolve(&plan, "guest-99"), None);
    }

    #[test]
    fn garbage_does_not_resolve() {
        let plan = plan();
        assert_eq!(DropTarget::resolve(&plan, ""), None);
        assert_eq!(DropTarget::resolve(&plan, "table-"), None);
        assert_eq!(DropTarget::resolve(&plan, "table-abc"), None);
        assert_eq!(DropTarget::resolve(&plan, "sidebar"), None);
    }
}
