use std::borrow::Cow;
use std::time::Instant;

use qsim::{CircuitTemplate, PauliTerm, Simulator, StatevectorSimulator};
use tracing::{debug, debug_span, trace};

use crate::ansatz::{build_template, depends_on_block};
use crate::encoding::{chain_xor, derive_angles, normalize_block, split_blocks};
use crate::error::QHashError;
use crate::events::{BlockInfo, HashEvent, HashStartInfo, ResizeInfo};
use crate::output::resize_digest;
use crate::profile::{EmptyInputPolicy, HashProfile};
use crate::readout::{extract_raw_digest, readout_terms};

/// Digests byte strings under one fixed profile.
///
/// Immutable once built, so a single hasher can be shared across threads.
/// Every call allocates its own simulator and carries no state into the next.
#[derive(Debug, Clone)]
pub struct QHasher {
    profile: HashProfile,
    block_size: usize,
    /// Built once unless the gate list depends on the block.
    template: Option<CircuitTemplate>,
    terms: Vec<PauliTerm>,
}

struct BlockOutcome {
    raw_digest: Vec<u8>,
    gate_count: usize,
}

impl QHasher {
    pub fn new(profile: HashProfile) -> Result<Self, QHashError> {
        profile.validate()?;
        let template = if depends_on_block(&profile) {
            None
        } else {
            Some(build_template(&profile, &[])?)
        };
        let terms = readout_terms(&profile);
        debug!(
            num_qubits = profile.num_qubits,
            block_size = profile.block_size(),
            raw_digest_len = terms.len(),
            "hasher ready"
        );
        Ok(Self {
            block_size: profile.block_size(),
            profile,
            template,
            terms,
        })
    }

    /// Looks up a named preset and builds a hasher for it.
    pub fn from_preset(name: &str) -> Result<Self, QHashError> {
        let profile = HashProfile::preset(name)
            .ok_or_else(|| QHashError::InvalidProfile(format!("unknown preset '{}'", name)))?;
        Self::new(profile)
    }

    pub fn profile(&self) -> &HashProfile {
        &self.profile
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Bytes produced by one circuit execution before resizing.
    pub fn raw_digest_len(&self) -> usize {
        self.terms.len()
    }

    pub fn digest(&self, input: &[u8]) -> Result<Vec<u8>, QHashError> {
        self.run(input, None, None)
    }

    /// Like [`QHasher::digest`], but gives up with `ComputationAborted` once
    /// `deadline` passes. The clock is checked between gates.
    pub fn digest_before(&self, input: &[u8], deadline: Instant) -> Result<Vec<u8>, QHashError> {
        self.run(input, Some(deadline), None)
    }

    /// Digests `input` and records what happened to every block.
    pub fn digest_traced(&self, input: &[u8]) -> Result<(Vec<u8>, Vec<HashEvent>), QHashError> {
        let mut events = Vec::new();
        let digest = self.run(input, None, Some(&mut events))?;
        Ok((digest, events))
    }

    fn run(
        &self,
        input: &[u8],
        deadline: Option<Instant>,
        mut events: Option<&mut Vec<HashEvent>>,
    ) -> Result<Vec<u8>, QHashError> {
        let span = debug_span!("digest", input_len = input.len());
        let _enter = span.enter();

        let blocks = if input.is_empty() {
            match self.profile.empty_input {
                EmptyInputPolicy::Reject => return Err(QHashError::EmptyInput),
                EmptyInputPolicy::ZeroBlock => vec![normalize_block(input, self.block_size)?],
            }
        } else {
            split_blocks(input, self.block_size, self.profile.segmentation)?
        };

        if let Some(events) = events.as_deref_mut() {
            events.push(HashEvent::HashStart(HashStartInfo {
                input_len: input.len(),
                block_count: blocks.len(),
                block_size: self.block_size,
            }));
        }

        let mut chain: Option<Vec<u8>> = None;
        for (index, block) in blocks.iter().enumerate() {
            let effective = match &chain {
                Some(prev) => chain_xor(block, prev),
                None => block.clone(),
            };
            let outcome = self.hash_block(&effective, deadline)?;
            trace!(index, raw = ?outcome.raw_digest, "block digested");
            if let Some(events) = events.as_deref_mut() {
                events.push(HashEvent::BlockProcessed(BlockInfo {
                    index,
                    effective_input: effective,
                    gate_count: outcome.gate_count,
                    raw_digest: outcome.raw_digest.clone(),
                }));
            }
            chain = Some(outcome.raw_digest);
        }

        let raw = chain.unwrap_or_default();
        let output_len = self.profile.output_len(input.len());
        let digest = resize_digest(&raw, output_len, self.profile.feedback_stride);
        debug!(blocks = blocks.len(), raw_len = raw.len(), output_len, "digest complete");
        if let Some(events) = events {
            events.push(HashEvent::OutputResized(ResizeInfo {
                raw_len: raw.len(),
                output_len,
            }));
        }
        Ok(digest)
    }

    fn hash_block(
        &self,
        block: &[u8],
        deadline: Option<Instant>,
    ) -> Result<BlockOutcome, QHashError> {
        let template = match &self.template {
            Some(template) => Cow::Borrowed(template),
            None => Cow::Owned(build_template(&self.profile, block)?),
        };
        let angles = derive_angles(block, template.slot_count(), self.profile.quantization);
        let circuit = template.bind(&angles)?;

        let mut simulator = StatevectorSimulator::new(self.profile.num_qubits)?;
        simulator.apply_circuit(&circuit, deadline)?;
        let raw_digest = extract_raw_digest(&simulator, &self.terms)?;
        Ok(BlockOutcome {
            raw_digest,
            gate_count: circuit.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hasher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QHasher>();
    }

    #[test]
    fn test_golden_compact_digest() {
        let hasher = QHasher::new(HashProfile::compact()).unwrap();
        assert_eq!(
            hasher.digest(&[0x01]).unwrap(),
            vec![0x89, 0x84, 0x52, 0x74, 0x8a, 0xa4, 0x7a, 0x81]
        );
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let mut profile = HashProfile::standard();
        profile.feedback_stride = 2;
        assert!(matches!(
            QHasher::new(profile),
            Err(QHashError::InvalidProfile(_))
        ));
        assert!(matches!(
            QHasher::from_preset("nope"),
            Err(QHashError::InvalidProfile(_))
        ));

        let mut profile = HashProfile::compact();
        profile.num_qubits = 25;
        assert!(matches!(
            QHasher::new(profile),
            Err(QHashError::Simulation(qsim::SimError::UnsupportedQubitCount {
                requested: 25,
                ..
            }))
        ));
    }

    #[test]
    fn test_traced_matches_plain_digest() {
        let hasher = QHasher::new(HashProfile::compact()).unwrap();
        let input: Vec<u8> = (0..20).collect();
        let (digest, events) = hasher.digest_traced(&input).unwrap();
        assert_eq!(digest, hasher.digest(&input).unwrap());

        // start, three blocks, resize
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[0],
            HashEvent::HashStart(HashStartInfo {
                input_len: 20,
                block_count: 3,
                block_size: 8,
            })
        );
        match (&events[1], &events[2]) {
            (HashEvent::BlockProcessed(first), HashEvent::BlockProcessed(second)) => {
                assert_eq!(first.effective_input, (0..8).collect::<Vec<u8>>());
                let expected = chain_xor(&(8..16).collect::<Vec<u8>>(), &first.raw_digest);
                assert_eq!(second.effective_input, expected);
                // 8 rotations and 4 CNOTs
                assert_eq!(first.gate_count, 12);
            }
            other => panic!("unexpected events {:?}", other),
        }
        assert_eq!(
            events[4],
            HashEvent::OutputResized(ResizeInfo {
                raw_len: 8,
                output_len: 8,
            })
        );
    }

    #[test]
    fn test_entangled_profile_builds_per_block() {
        let hasher = QHasher::new(HashProfile::entangled()).unwrap();
        assert!(hasher.template.is_none());
        let (_, events) = hasher.digest_traced(&[0xFF; 4]).unwrap();
        match &events[1] {
            // 96 rotations and 32 CNOTs plus at least one controlled-Z
            HashEvent::BlockProcessed(info) => assert!(info.gate_count > 128),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
