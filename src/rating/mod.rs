pub mod estimator;
pub mod reconcile;
pub mod window;

pub use estimator::{Estimate, Estimator};
pub use reconcile::Reconciliation;
pub use window::EvaluationWindow;
