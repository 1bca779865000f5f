use num_complex::Complex;
use serde::Serialize;

use crate::api::SimError;

/// Largest register the dense backend will allocate (2^20 amplitudes, ~16 MiB).
pub const MAX_QUBITS: usize = 20;

#[derive(Serialize, Clone, Debug)]
pub struct StateVector {
    pub num_qubits: usize,
    #[serde(rename = "amplitudes")]
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    pub fn new(num_qubits: usize) -> Result<Self, SimError> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(SimError::UnsupportedQubitCount {
                requested: num_qubits,
                min: 1,
                max: MAX_QUBITS,
            });
        }
        let size = 1 << num_qubits; // 2^num_qubits
        let mut amplitudes = vec![Complex::new(0.0, 0.0); size];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// A register prepared in the computational basis state `index`.
    pub fn basis(num_qubits: usize, index: usize) -> Result<Self, SimError> {
        let mut state = Self::new(num_qubits)?;
        state.set_basis_state(index)?;
        Ok(state)
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Complex<f64>> {
        self.amplitudes.iter()
    }

    pub fn as_slice(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex::new(0.0, 0.0));
        self.amplitudes[0] = Complex::new(1.0, 0.0);
    }

    pub fn set_basis_state(&mut self, index: usize) -> Result<(), SimError> {
        if index >= self.amplitudes.len() {
            return Err(SimError::InvalidBasisState {
                index,
                dimension: self.amplitudes.len(),
            });
        }
        self.amplitudes.fill(Complex::new(0.0, 0.0));
        self.amplitudes[index] = Complex::new(1.0, 0.0);
        Ok(())
    }

    /// Σ|a_i|²; stays at 1 (up to rounding) under every unitary gate.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Applies a 2x2 matrix to every amplitude pair that differs only in `target_qubit`.
    pub fn apply_single_qubit_gate(
        &mut self,
        gate_matrix: &[[Complex<f64>; 2]; 2],
        target_qubit: usize,
    ) {
        let k = 1 << target_qubit;

        for i in 0..self.amplitudes.len() {
            if (i & k) == 0 {
                let j = i | k;
                let amp_i = self.amplitudes[i];
                let amp_j = self.amplitudes[j];

                self.amplitudes[i] = gate_matrix[0][0] * amp_i + gate_matrix[0][1] * amp_j;
                self.amplitudes[j] = gate_matrix[1][0] * amp_i + gate_matrix[1][1] * amp_j;
            }
        }
    }

    /// Swaps the pairs differing in `target_qubit` wherever every bit of
    /// `control_mask` is set. An empty mask is an unconditional X.
    pub fn apply_controlled_x(&mut self, control_mask: usize, target_qubit: usize) {
        let target_mask = 1 << target_qubit;

        for i in 0..self.amplitudes.len() {
            if (i & control_mask) == control_mask && (i & target_mask) == 0 {
                self.amplitudes.swap(i, i | target_mask);
            }
        }
    }

    /// Multiplies by `phase` every amplitude whose index has all bits of `mask` set.
    pub fn apply_phase(&mut self, mask: usize, phase: Complex<f64>) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask) == mask {
                *amp *= phase;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    #[test]
    fn test_state_vector_initialization() {
        let num_qubits = 3;
        let state = StateVector::new(num_qubits).unwrap();
        assert_eq!(state.num_qubits, num_qubits);
        assert_eq!(state.len(), 1 << num_qubits);
        assert!(approx_eq(state.as_slice()[0], Complex::new(1.0, 0.0)));
        for amp in state.iter().skip(1) {
            assert!(approx_eq(*amp, Complex::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_qubit_count_bounds() {
        assert_eq!(
            StateVector::new(0).unwrap_err(),
            SimError::UnsupportedQubitCount { requested: 0, min: 1, max: MAX_QUBITS }
        );
        assert!(matches!(
            StateVector::new(MAX_QUBITS + 1),
            Err(SimError::UnsupportedQubitCount { .. })
        ));
        assert_eq!(
            StateVector::new(0).unwrap_err().to_string(),
            "Unsupported qubit count 0: supported range is 1..=20"
        );
    }

    #[test]
    fn test_basis_state_preparation() {
        let state = StateVector::basis(3, 5).unwrap();
        assert!(approx_eq(state.as_slice()[5], Complex::new(1.0, 0.0)));
        assert!((state.norm_sqr() - 1.0).abs() < EPSILON);

        let mut state = StateVector::new(2).unwrap();
        assert_eq!(
            state.set_basis_state(4),
            Err(SimError::InvalidBasisState { index: 4, dimension: 4 })
        );
    }

    #[test]
    fn test_in_place_hadamard_keeps_norm() {
        let h = [
            [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
            [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
        ];
        let mut state = StateVector::new(2).unwrap();
        state.apply_single_qubit_gate(&h, 1);

        assert!(approx_eq(state.as_slice()[0], Complex::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(state.as_slice()[2], Complex::new(FRAC_1_SQRT_2, 0.0)));
        assert!((state.norm_sqr() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_controlled_x_respects_every_control_bit() {
        // |011⟩ -> Toffoli(0, 1 -> 2) -> |111⟩
        let mut state = StateVector::basis(3, 0b011).unwrap();
        state.apply_controlled_x(0b011, 2);
        assert!(approx_eq(state.as_slice()[0b111], Complex::new(1.0, 0.0)));

        // Only one control set: nothing happens.
        let mut state = StateVector::basis(3, 0b001).unwrap();
        state.apply_controlled_x(0b011, 2);
        assert!(approx_eq(state.as_slice()[0b001], Complex::new(1.0, 0.0)));

        // No controls: plain flip.
        let mut state = StateVector::new(3).unwrap();
        state.apply_controlled_x(0, 1);
        assert!(approx_eq(state.as_slice()[0b010], Complex::new(1.0, 0.0)));
    }

    #[test]
    fn test_phase_only_touches_masked_indices() {
        let mut state = StateVector::basis(2, 0b11).unwrap();
        state.apply_phase(0b10, Complex::new(0.0, 1.0));
        assert!(approx_eq(state.as_slice()[0b11], Complex::new(0.0, 1.0)));

        let mut state = StateVector::basis(2, 0b01).unwrap();
        state.apply_phase(0b10, Complex::new(0.0, 1.0));
        assert!(approx_eq(state.as_slice()[0b01], Complex::new(1.0, 0.0)));
    }
}
