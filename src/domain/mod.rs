pub mod dates;
pub mod models;

pub use dates::{parse_event_date, parse_schedule_date};
pub use models::*;
