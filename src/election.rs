/// Core ring/node/message data structures
pub mod core;

/// Simulation configuration and validation
pub mod config;

/// Append-only execution log for visualization
pub mod events;

/// Simulation state and the step dispatcher
pub mod engine;

/// Le Lann step rule (unidirectional ring, no filtering)
pub mod lelann;

/// Chang-Roberts step rule (unidirectional ring, message filtering)
pub mod chang_roberts;

/// Franklin step rule (bidirectional ring, tournament elimination)
pub mod franklin;



// Re-export commonly used types for convenience
pub use config::{SimulationConfig, ValidationError};
pub use core::{Algorithm, Identity, Message, Node, NodeId, NodeState};
pub use engine::{NodeView, Simulation};
pub use events::{LogCategory, LogEntry};
