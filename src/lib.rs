/// Ring leader election simulator core
pub mod election;

// Re-export the types a host UI needs to drive the engine
pub use election::{Algorithm, LogCategory, LogEntry, Simulation, SimulationConfig, ValidationError};
