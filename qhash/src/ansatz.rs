//! Circuit templates the hasher binds its angles into.
//!
//! A layered template is a rotation layer per axis followed by a ring of
//! CNOTs whose span is set by the layer's shift. A walk template drives a
//! walker over qubits `1..n` with a coin on qubit 0.

use qsim::{Axis, CircuitTemplate, GateOp, MAX_QUBITS, SimError};

use crate::profile::{CircuitShape, HashProfile, ShiftSchedule};

/// Smallest register either template can be built on.
pub const MIN_QUBITS: usize = 2;

pub(crate) fn check_qubit_count(num_qubits: usize) -> Result<(), SimError> {
    if (MIN_QUBITS..=MAX_QUBITS).contains(&num_qubits) {
        Ok(())
    } else {
        Err(SimError::UnsupportedQubitCount {
            requested: num_qubits,
            min: MIN_QUBITS,
            max: MAX_QUBITS,
        })
    }
}

/// Reduces a raw shift into `1..num_qubits` so no CNOT targets its own control.
pub fn effective_shift(raw: usize, num_qubits: usize) -> Result<usize, SimError> {
    check_qubit_count(num_qubits)?;
    Ok((raw.max(1) - 1) % (num_qubits - 1) + 1)
}

/// Bit `index` of `block`, least significant bit of each byte first.
fn block_bit(block: &[u8], index: usize) -> bool {
    let bit = index % (block.len() * 8);
    (block[bit / 8] >> (bit % 8)) & 1 == 1
}

/// Builds the layered template.
///
/// When `entangler_block` is given, every (layer, qubit) pair reads one bit
/// of it and a set bit adds a controlled-Z along the same edge as that
/// qubit's CNOT.
pub fn build_layered_template(
    num_qubits: usize,
    layers: usize,
    rotation_axes: &[Axis],
    shift: ShiftSchedule,
    entangler_block: Option<&[u8]>,
) -> Result<CircuitTemplate, SimError> {
    check_qubit_count(num_qubits)?;
    let mut template = CircuitTemplate::new(num_qubits);
    for layer in 0..layers {
        for &axis in rotation_axes {
            let prefix = format!("theta_r{}", axis.to_string().to_lowercase());
            for qubit in 0..num_qubits {
                template.add_rotation_slot(axis, qubit, format!("{}_{}_{}", prefix, layer, qubit))?;
            }
        }

        let span = effective_shift(shift.raw_shift(layer), num_qubits)?;
        for control in 0..num_qubits {
            template.add_gate(GateOp::ControlledNot {
                control,
                target: (control + span) % num_qubits,
            })?;
        }

        if let Some(block) = entangler_block.filter(|b| !b.is_empty()) {
            for control in 0..num_qubits {
                if block_bit(block, layer * num_qubits + control) {
                    template.add_gate(GateOp::ControlledPhase {
                        control,
                        target: (control + span) % num_qubits,
                    })?;
                }
            }
        }
    }
    Ok(template)
}

/// Builds the coined walk: the walker starts mid-line, each step rotates the
/// coin and then shifts every position conditioned on it.
pub fn build_walk_template(num_qubits: usize, steps: usize) -> Result<CircuitTemplate, SimError> {
    check_qubit_count(num_qubits)?;
    let mut template = CircuitTemplate::new(num_qubits);
    let positions: Vec<usize> = (1..num_qubits).collect();
    if let Some(&start) = positions.get(positions.len() / 2) {
        template.add_gate(GateOp::Flip { qubit: start })?;
    }
    for step in 0..steps {
        template.add_rotation_slot(Axis::Y, 0, format!("coin_{}", step))?;
        for &position in positions.iter().rev() {
            template.add_gate(GateOp::ControlledNot {
                control: 0,
                target: position,
            })?;
        }
    }
    Ok(template)
}

/// True when the gate list changes with the block being hashed.
pub fn depends_on_block(profile: &HashProfile) -> bool {
    matches!(
        profile.shape,
        CircuitShape::Layered {
            input_entangler: true,
            ..
        }
    )
}

/// Builds the template a profile describes. `block` only matters for
/// profiles with the input entangler enabled.
pub fn build_template(profile: &HashProfile, block: &[u8]) -> Result<CircuitTemplate, SimError> {
    match &profile.shape {
        CircuitShape::Layered {
            layers,
            rotation_axes,
            shift,
            input_entangler,
        } => build_layered_template(
            profile.num_qubits,
            *layers,
            rotation_axes,
            *shift,
            input_entangler.then_some(block),
        ),
        CircuitShape::Walk { steps } => build_walk_template(profile.num_qubits, *steps),
    }
}
