//! Typed parsers, one per page. Each reads a fixed set of CSS classes and
//! reports the first missing or malformed field as a `ParseError`.

pub mod details;
pub mod event;
mod html;
pub mod profile;
pub mod schedule;

pub use details::parse_history;
pub use event::parse_round_breakdown;
pub use profile::{parse_current_rating, parse_player_events};
pub use schedule::parse_schedule;
