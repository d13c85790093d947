//! plan.rs
//!
//! Jádro zasedacího pořádku - pracovní kopie stolů a hostů jedné události.
//!
//! Všechny operace jsou synchronní a pracují čistě nad stavem v paměti.
//! Síť se plánu dotkne jen dvakrát: při hydrataci z dokumentu události
//! a při uložení celého snímku zpět na backend. Mezi tím drží plán dvě
//! kolekce (stoly, hosté) a jediný vztah mezi nimi: volitelný odkaz
//! hosta na stůl. Odkaz smí ukazovat pouze na existující stůl - operace
//! to zajišťují konstrukcí, nikdy dodatečnou validací.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{
    EventDocument, Guest, GuestCategory, GuestDocument, Room, Table, TableDocument,
};

use super::drop_target::DropTarget;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FloorPlanError {
    #[error("table {0} does not exist")]
    TableNotFound(i64),
    #[error("guest {0} does not exist")]
    GuestNotFound(i64),
}

/// Pracovní kopie zasedacího pořádku jedné události.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    pub event_id: i64,
    pub date: NaiveDate,
    // Ručně vedené počty platících/neplatících - nezávislé na seznamu hostů
    pub paid_count: u32,
    pub free_count: u32,
    pub(crate) tables: Vec<Table>,
    pub(crate) guests: Vec<Guest>,
    // Nejvyšší dosud viděná id; nová id navazují a po smazání se nerecyklují
    pub(crate) table_seq: i64,
    pub(crate) guest_seq: i64,
}

impl FloorPlan {
    /// Postaví pracovní kopii z dokumentu události. Stav se vždy nahrazuje
    /// celý - nikdy se neslévá po položkách s předchozí kopií.
    pub fn hydrate(doc: EventDocument) -> Self {
        let mut tables = Vec::with_capacity(doc.tables.len());
        let mut guests = Vec::new();

        for table_doc in doc.tables {
            for guest_doc in table_doc.guests {
                guests.push(guest_doc.into_guest(Some(table_doc.id)));
            }
            tables.push(Table {
                id: table_doc.id,
                name: table_doc.table_name,
                room: table_doc.room,
                capacity: table_doc.capacity,
            });
        }
        for guest_doc in doc.guests {
            guests.push(guest_doc.into_guest(None));
        }

        let table_seq = tables.iter().map(|t: &Table| t.id).max().unwrap_or(0);
        let guest_seq = guests.iter().map(|g: &Guest| g.id).max().unwrap_or(0);

        FloorPlan {
            event_id: doc.id,
            date: doc.date,
            paid_count: doc.paid_count,
            free_count: doc.free_count,
            tables,
            guests,
            table_seq,
            guest_seq,
        }
    }

    /* ---------- čtení ---------- */

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn table(&self, id: i64) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn guest(&self, id: i64) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == id)
    }

    pub fn tables_in_room(&self, room: Room) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(move |t| t.room == room)
    }

    pub fn seated_at(&self, table_id: i64) -> impl Iterator<Item = &Guest> {
        self.guests.iter().filter(move |g| g.table == Some(table_id))
    }

    pub fn unassigned(&self) -> impl Iterator<Item = &Guest> {
        self.guests.iter().filter(|g| g.table.is_none())
    }

    /* ---------- operace se stoly ---------- */

    /// Založí nový stůl a vrátí jeho id. Id se přidělují lokálně jako
    /// max(dosud viděných) + 1, po smazání se nikdy nerecyklují.
    pub fn create_table(&mut self, name: String, room: Room, capacity: u32) -> i64 {
        let id = self.alloc_table_id();
        self.tables.push(Table {
            id,
            name,
            room,
            capacity,
        });
        id
    }

    /// Přepíše jméno/místnost/kapacitu stolu. Odkazy hostů zůstávají beze
    /// změny, i když se stůl přesune do jiné místnosti.
    pub fn update_table(
        &mut self,
        id: i64,
        name: String,
        room: Room,
        capacity: u32,
    ) -> Result<(), FloorPlanError> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(FloorPlanError::TableNotFound(id))?;
        table.name = name;
        table.room = room;
        table.capacity = capacity;
        Ok(())
    }

    /// Smaže stůl. Hosté u něj usazení se nemažou - každému se jen zruší
    /// odkaz a vrátí se mezi nezasazené. Vrací počet takto přesunutých
    /// hostů pro zpětnou vazbu obsluze.
    pub fn delete_table(&mut self, id: i64) -> Result<usize, FloorPlanError> {
        let index = self
            .tables
            .iter()
            .position(|t| t.id == id)
            .ok_or(FloorPlanError::TableNotFound(id))?;
        self.tables.remove(index);

        let mut displaced = 0;
        for guest in self.guests.iter_mut().filter(|g| g.table == Some(id)) {
            guest.table = None;
            displaced += 1;
        }
        Ok(displaced)
    }

    /* ---------- operace s hosty ---------- */

    /// Ručně přidaný host - vzniká vždy nezasazený, bez vazby na rezervaci.
    pub fn add_guest(
        &mut self,
        name: String,
        category: GuestCategory,
        nationality: Option<String>,
        paid: bool,
    ) -> i64 {
        let id = self.alloc_guest_id();
        self.guests.push(Guest {
            id,
            name,
            category,
            nationality,
            paid,
            table: None,
            provenance: None,
        });
        id
    }

    /// Primitivum pro drag-and-drop: přesadí hosta podle už rozlišeného
    /// cíle. Shození na jiného hosta znamená přesazení k jeho stolu.
    /// Vrací false, když přesun nejde provést - stav hosta se pak nemění.
    pub fn move_guest(&mut self, guest_id: i64, target: DropTarget) -> bool {
        let destination = match target {
            DropTarget::OnTable(table_id) => {
                if self.table(table_id).is_none() {
                    return false;
                }
                Some(table_id)
            }
            DropTarget::OnGuest(other_id) => match self.guest(other_id) {
                // cílový host bez stolu = shození do nezasazených
                Some(other) => other.table,
                None => return false,
            },
            DropTarget::OnUnassigned => None,
        };

        match self.guests.iter_mut().find(|g| g.id == guest_id) {
            Some(guest) => {
                guest.table = destination;
                true
            }
            None => false,
        }
    }

    /// Vysadí hosta od stolu (tlačítkem, ne tažením). Záznam hosta zůstává.
    pub fn unseat_guest(&mut self, guest_id: i64) -> Result<(), FloorPlanError> {
        let guest = self
            .guests
            .iter_mut()
            .find(|g| g.id == guest_id)
            .ok_or(FloorPlanError::GuestNotFound(guest_id))?;
        guest.table = None;
        Ok(())
    }

    /// Smaže záznam hosta úplně.
    pub fn delete_guest(&mut self, guest_id: i64) -> Result<(), FloorPlanError> {
        let index = self
            .guests
            .iter()
            .position(|g| g.id == guest_id)
            .ok_or(FloorPlanError::GuestNotFound(guest_id))?;
        self.guests.remove(index);
        Ok(())
    }

    /* ---------- serializace ---------- */

    /// Složí celý dokument události pro jediný ukládací PUT. Každý host
    /// se objeví právě jednou: buď vnořený pod svým stolem, nebo v poli
    /// nezasazených na úrovni události.
    pub fn to_document(&self) -> EventDocument {
        let tables = self
            .tables
            .iter()
            .map(|table| TableDocument {
                id: table.id,
                table_name: table.name.clone(),
                room: table.room,
                capacity: table.capacity,
                guests: self.seated_at(table.id).map(GuestDocument::from_guest).collect(),
            })
            .collect();

        EventDocument {
            id: self.event_id,
            date: self.date,
            paid_count: self.paid_count,
            free_count: self.free_count,
            tables,
            guests: self.unassigned().map(GuestDocument::from_guest).collect(),
        }
    }

    /* ---------- přidělování id ---------- */

    pub(crate) fn alloc_table_id(&mut self) -> i64 {
        self.table_seq += 1;
        self.table_seq
    }

    pub(crate) fn alloc_guest_id(&mut self) -> i64 {
        self.guest_seq += 1;
        self.guest_seq
    }
}
