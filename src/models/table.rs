use serde::{Deserialize, Serialize};

use crate::models::Room;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub name: String,
    pub room: Room,
    pub capacity: u32,
}
