//! Import hostů z rezervačního systému.
//!
//! Z rezervací na den události se vyrábí noví hosté, vždy nezasazení.
//! Import je čistě aditivní: opakovaný import stejné rezervace vyrobí
//! duplicitní hosty a je na obsluze, aby přebytečné smazala. Záměrně se
//! nic nededuplikuje podle id rezervace.

use crate::models::{Guest, GuestCategory, PersonType, Provenance, Reservation};

use super::plan::FloorPlan;

impl FloorPlan {
    /// Vyrobí hosty ze všech rezervací spadajících na den události a vrátí
    /// jejich počet. Rezervace bez osob dostane jednoho dospělého hosta se
    /// jménem kontaktu; rezervace s N osobami dostane N hostů
    /// "<kontakt> - Osoba 1..N". Kojenec se pro účely hostů počítá jako dítě.
    pub fn import_reservations(&mut self, reservations: &[Reservation]) -> usize {
        let mut imported = 0;

        for reservation in reservations {
            if reservation.date != self.date {
                continue;
            }
            let paid = reservation.is_paid();

            if reservation.persons.is_empty() {
                let id = self.alloc_guest_id();
                self.guests.push(Guest {
                    id,
                    name: reservation.contact_name.clone(),
                    category: GuestCategory::Adult,
                    nationality: reservation.contact_nationality.clone(),
                    paid,
                    table: None,
                    provenance: Some(Provenance {
                        reservation_id: reservation.id,
                        person_index: 0,
                    }),
                });
                imported += 1;
                continue;
            }

            for (index, person) in reservation.persons.iter().enumerate() {
                let category = match person.person_type {
                    PersonType::Adult => GuestCategory::Adult,
                    // kojenci se v plánu nevedou zvlášť
                    PersonType::Child | PersonType::Infant => GuestCategory::Child,
                };
                let id = self.alloc_guest_id();
                self.guests.push(Guest {
                    id,
                    name: format!("{} - Osoba {}", reservation.contact_name, index + 1),
                    category,
                    nationality: reservation.contact_nationality.clone(),
                    paid,
                    table: None,
                    provenance: Some(Provenance {
                        reservation_id: reservation.id,
                        person_index: index as u32,
                    }),
                });
                imported += 1;
            }
        }

        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationPerson;
    use chrono::NaiveDate;

    fn event_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn empty_plan() -> FloorPlan {
        FloorPlan {
            event_id: 1,
            date: event_day(),
            paid_count: 0,
            free_count: 0,
            tables: Vec::new(),
            guests: Vec::new(),
            table_seq: 0,
            guest_seq: 0,
        }
    }

    fn person(person_type: PersonType) -> ReservationPerson {
        ReservationPerson {
            person_type,
            menu: None,
        }
    }

    fn reservation(id: i64, date: NaiveDate, persons: Vec<ReservationPerson>) -> Reservation {
        Reservation {
            id,
            date,
            contact_name: "Dvořák".to_string(),
            contact_nationality: Some("de".to_string()),
            status: "paid".to_string(),
            persons,
        }
    }

    #[test]
    fn reservation_with_persons_yields_numbered_guests() {
        // Scénář: jedna rezervace se třemi osobami na den události
        let mut plan = empty_plan();
        let reservations = vec![reservation(
            10,
            event_day(),
            vec![
                person(PersonType::Adult),
                person(PersonType::Child),
                person(PersonType::Infant),
            ],
        )];

        assert_eq!(plan.import_reservations(&reservations), 3);

        let names: Vec<&str> = plan.guests().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Dvořák - Osoba 1", "Dvořák - Osoba 2", "Dvořák - Osoba 3"]
        );
        assert!(plan.guests().iter().all(|g| g.table.is_none()));
        assert_eq!(plan.guests()[0].category, GuestCategory::Adult);
        // kojenec spadne pod dítě
        assert_eq!(plan.guests()[2].category, GuestCategory::Child);
        assert!(plan.guests().iter().all(|g| g.paid));
        assert_eq!(plan.guests()[1].provenance.unwrap().reservation_id, 10);
        assert_eq!(plan.guests()[1].provenance.unwrap().person_index, 1);
    }

    #[test]
    fn reservation_without_persons_yields_contact_guest() {
        let mut plan = empty_plan();
        let mut res = reservation(11, event_day(), vec![]);
        res.status = "created".to_string();

        assert_eq!(plan.import_reservations(&[res]), 1);

        let guest = &plan.guests()[0];
        assert_eq!(guest.name, "Dvořák");
        assert_eq!(guest.category, GuestCategory::Adult);
        assert_eq!(guest.nationality.as_deref(), Some("de"));
        assert!(!guest.paid);
    }

    #[test]
    fn other_days_are_ignored() {
        let mut plan = empty_plan();
        let other_day = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        let reservations = vec![
            reservation(12, other_day, vec![person(PersonType::Adult)]),
            reservation(13, event_day(), vec![person(PersonType::Adult)]),
        ];

        assert_eq!(plan.import_reservations(&reservations), 1);
        assert_eq!(plan.guests()[0].provenance.unwrap().reservation_id, 13);
    }

    #[test]
    fn repeated_import_duplicates_with_fresh_ids() {
        let mut plan = empty_plan();
        let reservations = vec![reservation(
            14,
            event_day(),
            vec![person(PersonType::Adult), person(PersonType::Adult)],
        )];

        assert_eq!(plan.import_reservations(&reservations), 2);
        assert_eq!(plan.import_reservations(&reservations), 2);

        let ids: Vec<i64> = plan.guests().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn no_matching_reservation_imports_nothing() {
        let mut plan = empty_plan();
        let other_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let reservations = vec![reservation(15, other_day, vec![])];
        assert_eq!(plan.import_reservations(&reservations), 0);
        assert!(plan.guests().is_empty());
    }
}
