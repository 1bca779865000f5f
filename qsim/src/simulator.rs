use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex;

use crate::api::SimError;
use crate::gate::{Axis, GateOp};
use crate::state::StateVector;

// custom type for gate matrices
pub type GateMatrix = [[Complex<f64>; 2]; 2];

pub const HADAMARD: GateMatrix = [
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

pub const PHASE_S: Complex<f64> = Complex::new(0.0, 1.0);

/// e^{iπ/4}
pub const PHASE_T: Complex<f64> = Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);

pub fn rotation_matrix(axis: Axis, theta: f64) -> GateMatrix {
    let c = theta * 0.5;
    let (ct, st) = (c.cos(), c.sin());
    match axis {
        // Rx(θ) = cos(θ/2) I - i sin(θ/2) X
        Axis::X => [
            [Complex::new(ct, 0.0), Complex::new(0.0, -st)],
            [Complex::new(0.0, -st), Complex::new(ct, 0.0)],
        ],
        // Ry(θ) = cos(θ/2) I - i sin(θ/2) Y  -> matrix is real
        Axis::Y => [
            [Complex::new(ct, 0.0), Complex::new(-st, 0.0)],
            [Complex::new(st, 0.0), Complex::new(ct, 0.0)],
        ],
        // Rz(θ) = diag(e^{-iθ/2}, e^{+iθ/2})
        Axis::Z => [
            [Complex::new(ct, -st), Complex::new(0.0, 0.0)],
            [Complex::new(0.0, 0.0), Complex::new(ct, st)],
        ],
    }
}

/// Applies one gate to `state` in place after checking its qubit indices.
pub fn apply_gate(state: &mut StateVector, gate: &GateOp) -> Result<(), SimError> {
    gate.validate(state.num_qubits)?;

    match *gate {
        GateOp::Rotation { axis, qubit, theta } => {
            state.apply_single_qubit_gate(&rotation_matrix(axis, theta), qubit)
        }
        GateOp::Hadamard { qubit } => state.apply_single_qubit_gate(&HADAMARD, qubit),
        GateOp::PhaseS { qubit } => state.apply_phase(1 << qubit, PHASE_S),
        GateOp::PhaseT { qubit } => state.apply_phase(1 << qubit, PHASE_T),
        GateOp::Flip { qubit } => state.apply_controlled_x(0, qubit),
        GateOp::ControlledNot { control, target } => {
            state.apply_controlled_x(1 << control, target)
        }
        GateOp::ControlledPhase { control, target } => {
            state.apply_phase((1 << control) | (1 << target), Complex::new(-1.0, 0.0))
        }
        GateOp::Toffoli { control_a, control_b, target } => {
            state.apply_controlled_x((1 << control_a) | (1 << control_b), target)
        }
    }
    Ok(())
}
