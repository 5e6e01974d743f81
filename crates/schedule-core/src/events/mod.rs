//! Event records and the catalog that owns them

pub mod catalog;
pub mod event;

pub use catalog::EventCatalog;
pub use event::{EventRecord, EventStatus, Placement};
