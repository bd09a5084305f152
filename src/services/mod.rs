pub mod estimation;

pub use estimation::{EstimateRequest, EstimationService};
