use serde::{Deserialize, Serialize};

// Čtyři pevné prostory areálu - slouží jen k rozdělení stolů do záložek
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Room {
    Roubenka,
    Stodola,
    Salonek,
    Zahrada,
}

impl Room {
    pub const ALL: [Room; 4] = [Room::Roubenka, Room::Stodola, Room::Salonek, Room::Zahrada];

    pub fn as_str(&self) -> &'static str {
        match self {
            Room::Roubenka => "roubenka",
            Room::Stodola => "stodola",
            Room::Salonek => "salonek",
            Room::Zahrada => "zahrada",
        }
    }
}
