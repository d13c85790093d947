//! Pracovní kopie zasedacích pořádků držené v paměti procesu.
//!
//! Jedna kopie na událost. Kopie vzniká hydratací ze serveru, všechny
//! úpravy probíhají lokálně a na server odchází až celý snímek při
//! uložení. Zámek se drží jen po dobu synchronní operace nad plánem,
//! nikdy přes await.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::plan::FloorPlan;

#[derive(Clone, Default)]
pub struct FloorPlanSessions {
    inner: Arc<RwLock<HashMap<i64, FloorPlan>>>,
}

impl FloorPlanSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event_id: i64) -> bool {
        self.inner.read().unwrap().contains_key(&event_id)
    }

    /// Nahradí pracovní kopii události vcelku - žádné slévání se starým stavem.
    pub fn replace(&self, plan: FloorPlan) {
        self.inner.write().unwrap().insert(plan.event_id, plan);
    }

    /// Zahodí pracovní kopii; příští čtení si stáhne čerstvý dokument ze serveru.
    pub fn invalidate(&self, event_id: i64) {
        self.inner.write().unwrap().remove(&event_id);
    }

    pub fn read<R>(&self, event_id: i64, f: impl FnOnce(&FloorPlan) -> R) -> Option<R> {
        self.inner.read().unwrap().get(&event_id).map(f)
    }

    pub fn write<R>(&self, event_id: i64, f: impl FnOnce(&mut FloorPlan) -> R) -> Option<R> {
        self.inner.write().unwrap().get_mut(&event_id).map(f)
    }
}
