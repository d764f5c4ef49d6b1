mod engine;
mod error;
mod types;

pub use engine::project;
pub use error::{ProjectionError, ProjectionOutcome};
pub use types::{FI_TARGET_MULTIPLE, ProjectionResult, SimulationInputs, YearSnapshot};
