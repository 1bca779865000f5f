// src/api.rs
use std::time::Instant;

use crate::StateVector;
use crate::circuit::BoundCircuit;
use crate::pauli::PauliTerm;

/// A lightweight error enum so callers don't rely on simulator internals.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid qubit index {qubit}: register has {num_qubits} qubits")]
    InvalidQubitIndex { qubit: usize, num_qubits: usize },
    #[error("Parameter count mismatch: template has {expected} slots, got {actual} angles")]
    ParameterCountMismatch { expected: usize, actual: usize },
    #[error("Unsupported qubit count {requested}: supported range is {min}..={max}")]
    UnsupportedQubitCount { requested: usize, min: usize, max: usize },
    #[error("Computation aborted after {completed} of {total} gates")]
    ComputationAborted { completed: usize, total: usize },
    #[error("Qubit {0} appears more than once in one operation")]
    DuplicateQubit(usize),
    #[error("Basis state {index} is outside a {dimension}-dimensional register")]
    InvalidBasisState { index: usize, dimension: usize },
}

/// Everything a caller needs to drive one register through a circuit and read it out.
pub trait Simulator {
    /// Re-allocates the register for `num_qubits` qubits in |0...0⟩.
    fn reset(&mut self, num_qubits: usize) -> Result<(), SimError>;

    /// Moves the register to a single computational basis state.
    fn prepare_basis_state(&mut self, index: usize) -> Result<(), SimError>;

    /// Applies `circuit` to the current state. When a deadline is given it is
    /// checked between gates and expiry aborts the run.
    fn apply_circuit(
        &mut self,
        circuit: &BoundCircuit,
        deadline: Option<Instant>,
    ) -> Result<(), SimError>;

    fn statevector(&self) -> &StateVector;

    /// Non-destructive expectation ⟨ψ|P|ψ⟩ for a Pauli string, clamped to [-1, 1].
    fn expectation(&self, term: &PauliTerm) -> Result<f64, SimError>;

    /// Resets to the ground state of the circuit's register and runs it.
    fn run(&mut self, circuit: &BoundCircuit, deadline: Option<Instant>) -> Result<(), SimError> {
        self.reset(circuit.num_qubits())?;
        self.apply_circuit(circuit, deadline)
    }
}
