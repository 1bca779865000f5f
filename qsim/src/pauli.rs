use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::SimError;
use crate::gate::Axis;
use crate::state::StateVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl From<Axis> for Pauli {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Pauli::X,
            Axis::Y => Pauli::Y,
            Axis::Z => Pauli::Z,
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A tensor product of single-qubit Paulis; qubits not listed are identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PauliTerm {
    pub operators: Vec<(usize, Pauli)>, // Vec of (qubit index, Pauli type)
}

impl PauliTerm {
    pub fn new() -> Self {
        PauliTerm {
            operators: Vec::new(),
        }
    }

    pub fn single(qubit: usize, pauli: Pauli) -> Self {
        Self::new().with_pauli(qubit, pauli)
    }

    pub fn with_pauli(mut self, qubit: usize, pauli: Pauli) -> Self {
        if pauli != Pauli::I {
            self.operators.push((qubit, pauli));
        }
        self
    }

    /// Splits the term into (flip mask, Y mask, Z mask).
    fn masks(&self, num_qubits: usize) -> Result<(usize, usize, usize), SimError> {
        let (mut x_mask, mut y_mask, mut z_mask) = (0usize, 0usize, 0usize);
        for &(qubit, pauli) in &self.operators {
            if qubit >= num_qubits {
                return Err(SimError::InvalidQubitIndex { qubit, num_qubits });
            }
            let bit = 1 << qubit;
            if (x_mask | y_mask | z_mask) & bit != 0 {
                return Err(SimError::DuplicateQubit(qubit));
            }
            match pauli {
                Pauli::I => {}
                Pauli::X => x_mask |= bit,
                Pauli::Y => y_mask |= bit,
                Pauli::Z => z_mask |= bit,
            }
        }
        Ok((x_mask | y_mask, y_mask, z_mask))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PauliTermParseError(pub String);

impl fmt::Display for PauliTermParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid Pauli operator '{}'", self.0)
    }
}

impl std::error::Error for PauliTermParseError {}

/// Parses the whitespace separated form `"Z0 X2"`.
impl FromStr for PauliTerm {
    type Err = PauliTermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut term = PauliTerm::new();

        for op in s.split_whitespace() {
            if op.len() < 2 || !op.is_char_boundary(1) {
                return Err(PauliTermParseError(op.to_string()));
            }
            let (pauli_char, qubit_idx_str) = op.split_at(1);
            let qubit_index = qubit_idx_str
                .parse::<usize>()
                .map_err(|_| PauliTermParseError(op.to_string()))?;

            let pauli = match pauli_char {
                "X" | "x" => Pauli::X,
                "Y" | "y" => Pauli::Y,
                "Z" | "z" => Pauli::Z,
                "I" | "i" => Pauli::I,
                _ => return Err(PauliTermParseError(op.to_string())),
            };
            term = term.with_pauli(qubit_index, pauli);
        }

        Ok(term)
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operators.is_empty() {
            return write!(f, "I");
        }
        for (i, (qubit, pauli)) in self.operators.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{}", pauli, qubit)?;
        }
        Ok(())
    }
}

/// ⟨ψ|P|ψ⟩ computed directly from the amplitudes, clamped to [-1, 1].
///
/// Diagonal terms are a signed sum of probabilities. Otherwise amplitude `j` is
/// paired with `j ^ flip` and weighted by the phase P picks up on |j⟩: a factor
/// of i per Y and a sign flip per Y or Z acting on a set bit.
pub fn expectation_of(state: &StateVector, term: &PauliTerm) -> Result<f64, SimError> {
    let (flip, y_mask, z_mask) = term.masks(state.num_qubits)?;
    let amplitudes = state.as_slice();
    let mut acc = 0.0;

    if flip == 0 {
        for (i, amp) in amplitudes.iter().enumerate() {
            let p = amp.re * amp.re + amp.im * amp.im;
            if (i & z_mask).count_ones() % 2 == 1 {
                acc -= p;
            } else {
                acc += p;
            }
        }
        return Ok(acc.clamp(-1.0, 1.0));
    }

    let y_power = y_mask.count_ones() % 4;
    let sign_mask = y_mask | z_mask;
    for (j, b) in amplitudes.iter().enumerate() {
        let a = amplitudes[j ^ flip];
        // conj(a) * b
        let re = a.re * b.re + a.im * b.im;
        let im = a.re * b.im - a.im * b.re;
        let mut value = match y_power {
            0 => re,
            1 => -im,
            2 => -re,
            _ => im,
        };
        if (j & sign_mask).count_ones() % 2 == 1 {
            value = -value;
        }
        acc += value;
    }
    Ok(acc.clamp(-1.0, 1.0))
}
