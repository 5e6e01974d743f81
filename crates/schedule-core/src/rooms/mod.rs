//! Room allocation over a discrete day grid

pub mod registry;
pub mod room;

pub use registry::RoomRegistry;
pub use room::Room;
