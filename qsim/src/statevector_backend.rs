// src/statevector_backend.rs
use std::time::Instant;

use tracing::trace;

use crate::StateVector;
use crate::api::{SimError, Simulator};
use crate::circuit::BoundCircuit;
use crate::pauli::{PauliTerm, expectation_of};
use crate::simulator::apply_gate;

/// Dense statevector backend. Owns its amplitudes exclusively; nothing is shared
/// between instances.
pub struct StatevectorSimulator {
    state: StateVector,
}

impl StatevectorSimulator {
    pub fn new(num_qubits: usize) -> Result<Self, SimError> {
        Ok(Self {
            state: StateVector::new(num_qubits)?,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits
    }

    pub fn into_statevector(self) -> StateVector {
        self.state
    }
}

impl Simulator for StatevectorSimulator {
    fn reset(&mut self, num_qubits: usize) -> Result<(), SimError> {
        if num_qubits == self.state.num_qubits {
            self.state.reset();
        } else {
            self.state = StateVector::new(num_qubits)?;
        }
        Ok(())
    }

    fn prepare_basis_state(&mut self, index: usize) -> Result<(), SimError> {
        self.state.set_basis_state(index)
    }

    fn apply_circuit(
        &mut self,
        circuit: &BoundCircuit,
        deadline: Option<Instant>,
    ) -> Result<(), SimError> {
        if circuit.num_qubits() > self.state.num_qubits {
            return Err(SimError::InvalidQubitIndex {
                qubit: circuit.num_qubits() - 1,
                num_qubits: self.state.num_qubits,
            });
        }
        let total = circuit.len();
        for (completed, gate) in circuit.gates().iter().enumerate() {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    trace!(completed, total, "deadline reached, aborting circuit");
                    return Err(SimError::ComputationAborted { completed, total });
                }
            }
            apply_gate(&mut self.state, gate)?;
        }
        Ok(())
    }

    fn statevector(&self) -> &StateVector {
        &self.state
    }

    fn expectation(&self, term: &PauliTerm) -> Result<f64, SimError> {
        expectation_of(&self.state, term)
    }
}
