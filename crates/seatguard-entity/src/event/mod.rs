//! Event (performance) entity and catalog read models.

pub mod model;
pub mod status;

pub use model::{Event, EventSummary, NewEvent};
pub use status::EventStatus;
