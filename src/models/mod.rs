pub mod change;
pub mod room;
pub mod status;

pub use change::ChangeLogEntry;
pub use room::{LinenSchedule, Room, RoomView};
pub use status::DueStatus;
