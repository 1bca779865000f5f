use serde::Serialize;

use crate::api::SimError;
use crate::gate::{Axis, GateOp};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TemplateOp {
    Fixed(GateOp),
    /// A rotation whose angle is supplied at bind time; `slot` indexes the angle array.
    Slot { axis: Axis, qubit: usize, slot: usize },
}

/// A gate sequence with unbound rotation slots. Built once per topology and
/// bound many times.
#[derive(Debug, Clone)]
pub struct CircuitTemplate {
    num_qubits: usize,
    ops: Vec<TemplateOp>,
    slot_names: Vec<String>,
}

impl CircuitTemplate {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            ops: Vec::new(),
            slot_names: Vec::new(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn ops(&self) -> &[TemplateOp] {
        &self.ops
    }

    pub fn slot_count(&self) -> usize {
        self.slot_names.len()
    }

    pub fn slot_names(&self) -> &[String] {
        &self.slot_names
    }

    pub fn add_gate(&mut self, gate: GateOp) -> Result<(), SimError> {
        gate.validate(self.num_qubits)?;
        self.ops.push(TemplateOp::Fixed(gate));
        Ok(())
    }

    /// Appends a parameterized rotation and returns its slot index.
    pub fn add_rotation_slot(
        &mut self,
        axis: Axis,
        qubit: usize,
        name: impl Into<String>,
    ) -> Result<usize, SimError> {
        if qubit >= self.num_qubits {
            return Err(SimError::InvalidQubitIndex {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        let slot = self.slot_names.len();
        self.slot_names.push(name.into());
        self.ops.push(TemplateOp::Slot { axis, qubit, slot });
        Ok(slot)
    }

    pub fn bind(&self, angles: &[f64]) -> Result<BoundCircuit, SimError> {
        if angles.len() != self.slot_count() {
            return Err(SimError::ParameterCountMismatch {
                expected: self.slot_count(),
                actual: angles.len(),
            });
        }
        let gates = self
            .ops
            .iter()
            .map(|op| match *op {
                TemplateOp::Fixed(gate) => gate,
                TemplateOp::Slot { axis, qubit, slot } => GateOp::Rotation {
                    axis,
                    qubit,
                    theta: angles[slot],
                },
            })
            .collect();
        Ok(BoundCircuit {
            num_qubits: self.num_qubits,
            gates,
        })
    }
}

/// A fully bound gate list, ready for one execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundCircuit {
    num_qubits: usize,
    gates: Vec<GateOp>,
}

impl BoundCircuit {
    pub fn from_gates(num_qubits: usize, gates: Vec<GateOp>) -> Result<Self, SimError> {
        for gate in &gates {
            gate.validate(num_qubits)?;
        }
        Ok(Self { num_qubits, gates })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn gates(&self) -> &[GateOp] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn to_qasm(&self) -> String {
        let header = format!(
            "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[{}];",
            self.num_qubits
        );
        let mut lines = vec![header];
        lines.extend(self.gates.iter().map(GateOp::to_string));
        lines.push(String::new());
        lines.join("\n")
    }
}
