use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::SimError;

/// Rotation / measurement axis on the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The closed set of gates the statevector backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GateOp {
    Rotation { axis: Axis, qubit: usize, theta: f64 },
    Hadamard { qubit: usize },
    PhaseS { qubit: usize },
    PhaseT { qubit: usize },
    /// Pauli-X without a control; used to place a walker on its start position.
    Flip { qubit: usize },
    ControlledNot { control: usize, target: usize },
    ControlledPhase { control: usize, target: usize },
    Toffoli { control_a: usize, control_b: usize, target: usize },
}

impl GateOp {
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            GateOp::Rotation { qubit, .. }
            | GateOp::Hadamard { qubit }
            | GateOp::PhaseS { qubit }
            | GateOp::PhaseT { qubit }
            | GateOp::Flip { qubit } => vec![qubit],
            GateOp::ControlledNot { control, target }
            | GateOp::ControlledPhase { control, target } => vec![control, target],
            GateOp::Toffoli { control_a, control_b, target } => vec![control_a, control_b, target],
        }
    }

    /// Checks every referenced qubit against a register of `num_qubits`.
    pub fn validate(&self, num_qubits: usize) -> Result<(), SimError> {
        let qubits = self.qubits();
        for (i, &qubit) in qubits.iter().enumerate() {
            if qubit >= num_qubits {
                return Err(SimError::InvalidQubitIndex { qubit, num_qubits });
            }
            if qubits[..i].contains(&qubit) {
                return Err(SimError::DuplicateQubit(qubit));
            }
        }
        Ok(())
    }
}

/// OpenQASM 2.0 spelling of the gate, including the trailing semicolon.
impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GateOp::Rotation { axis, qubit, theta } => {
                let name = match axis {
                    Axis::X => "rx",
                    Axis::Y => "ry",
                    Axis::Z => "rz",
                };
                write!(f, "{}({}) q[{}];", name, theta, qubit)
            }
            GateOp::Hadamard { qubit } => write!(f, "h q[{}];", qubit),
            GateOp::PhaseS { qubit } => write!(f, "s q[{}];", qubit),
            GateOp::PhaseT { qubit } => write!(f, "t q[{}];", qubit),
            GateOp::Flip { qubit } => write!(f, "x q[{}];", qubit),
            GateOp::ControlledNot { control, target } => {
                write!(f, "cx q[{}],q[{}];", control, target)
            }
            GateOp::ControlledPhase { control, target } => {
                write!(f, "cz q[{}],q[{}];", control, target)
            }
            GateOp::Toffoli { control_a, control_b, target } => {
                write!(f, "ccx q[{}],q[{}],q[{}];", control_a, control_b, target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_out_of_range_and_repeated_qubits() {
        let cx = GateOp::ControlledNot { control: 0, target: 3 };
        assert_eq!(
            cx.validate(3),
            Err(SimError::InvalidQubitIndex { qubit: 3, num_qubits: 3 })
        );
        assert!(cx.validate(4).is_ok());

        let ccx = GateOp::Toffoli { control_a: 1, control_b: 2, target: 1 };
        assert_eq!(ccx.validate(3), Err(SimError::DuplicateQubit(1)));
    }

    #[test]
    fn test_qasm_spelling() {
        assert_eq!(GateOp::Hadamard { qubit: 2 }.to_string(), "h q[2];");
        assert_eq!(
            GateOp::Rotation { axis: Axis::Y, qubit: 0, theta: 0.5 }.to_string(),
            "ry(0.5) q[0];"
        );
        assert_eq!(
            GateOp::Toffoli { control_a: 0, control_b: 1, target: 2 }.to_string(),
            "ccx q[0],q[1],q[2];"
        );
    }
}
