pub mod state;
pub mod telemetry_processor;

pub use state::{FleetState, SharedState};
