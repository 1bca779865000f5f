//! Dense statevector simulation: gates applied in place, Pauli expectations
//! read straight off the amplitudes.

pub mod api;
pub mod circuit;
pub mod gate;
pub mod pauli;
pub mod simulator;
pub mod state;
pub mod statevector_backend;

// Re-export key components for easier access from other crates.
pub use api::{SimError, Simulator};
pub use circuit::{BoundCircuit, CircuitTemplate, TemplateOp};
pub use gate::{Axis, GateOp};
pub use pauli::{Pauli, PauliTerm, expectation_of};
pub use simulator::apply_gate;
pub use state::{MAX_QUBITS, StateVector};
pub use statevector_backend::StatevectorSimulator;
