use qsim::{Pauli, PauliTerm, SimError, Simulator};

use crate::profile::{HashProfile, Readout};

/// Observables sampled into the raw digest, qubit-major.
pub fn readout_terms(profile: &HashProfile) -> Vec<PauliTerm> {
    let qubits: Vec<usize> = profile.sampled_qubits().collect();
    let mut terms: Vec<PauliTerm> = qubits
        .iter()
        .flat_map(|&qubit| {
            profile
                .readout
                .axes()
                .iter()
                .map(move |&axis| PauliTerm::single(qubit, Pauli::from(axis)))
        })
        .collect();
    if profile.readout == Readout::ZxyPairwiseZz {
        for pair in qubits.chunks_exact(2) {
            terms.push(PauliTerm::single(pair[0], Pauli::Z).with_pauli(pair[1], Pauli::Z));
        }
    }
    terms
}

/// Maps an expectation in `[-1, 1]` onto `0..=255`, flooring.
pub fn expectation_to_byte(value: f64) -> u8 {
    let clamped = value.clamp(-1.0, 1.0);
    ((clamped + 1.0) / 2.0 * 255.0) as u8
}

/// Reads every term off the simulator's current state, one byte each.
pub fn extract_raw_digest<S: Simulator + ?Sized>(
    simulator: &S,
    terms: &[PauliTerm],
) -> Result<Vec<u8>, SimError> {
    terms
        .iter()
        .map(|term| simulator.expectation(term).map(expectation_to_byte))
        .collect()
}
