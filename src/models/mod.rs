pub mod event;
pub mod guest;
pub mod reservation;
pub mod room;
pub mod table;

pub use event::{EventDocument, GuestDocument, TableDocument};
pub use guest::{Guest, GuestCategory, Provenance};
pub use reservation::{PersonType, Reservation, ReservationPerson};
pub use room::Room;
pub use table::Table;
