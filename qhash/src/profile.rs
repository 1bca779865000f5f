use std::ops::Range;

use qsim::Axis;
use serde::{Deserialize, Serialize};

use crate::ansatz::check_qubit_count;
use crate::encoding::check_block_size;
use crate::error::QHashError;

/// Shift between a control qubit and its target in the ring entangler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShiftSchedule {
    Constant { shift: usize },
    /// Layer `l` uses shift `l + 1`.
    LayerDependent,
}

impl ShiftSchedule {
    /// Raw shift for a layer, before reduction into `1..num_qubits`.
    pub fn raw_shift(&self, layer: usize) -> usize {
        match *self {
            ShiftSchedule::Constant { shift } => shift,
            ShiftSchedule::LayerDependent => layer + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CircuitShape {
    /// Rotation layers followed by a ring of CNOTs.
    Layered {
        layers: usize,
        rotation_axes: Vec<Axis>,
        shift: ShiftSchedule,
        /// Adds a controlled-Z per (layer, qubit) gated by one bit of the block.
        #[serde(default)]
        input_entangler: bool,
    },
    /// Coin qubit 0 driving a walker over qubits `1..n`.
    Walk { steps: usize },
}

/// Which observables become digest bytes. Always qubit-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readout {
    Zx,
    Zxy,
    ZxyPairwiseZz,
}

impl Readout {
    pub fn axes(&self) -> &'static [Axis] {
        match self {
            Readout::Zx => &[Axis::Z, Axis::X],
            Readout::Zxy | Readout::ZxyPairwiseZz => &[Axis::Z, Axis::X, Axis::Y],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantization {
    /// 16-bit angle resolution, one block byte per slot.
    Continuous,
    /// Sixteen angles (multiples of π/8), one block nibble per slot.
    Nibble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputLength {
    Fixed { bytes: usize },
    MatchInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segmentation {
    /// Block-sized chunks, each chained to the previous block's digest.
    Chained {
        #[serde(default)]
        reverse_odd_blocks: bool,
    },
    /// The whole input XOR-folded into a single block.
    Folded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInputPolicy {
    #[default]
    Reject,
    /// Hash the all-zero block (a zero-length marker is all zeros too).
    ZeroBlock,
}

fn default_feedback_stride() -> usize {
    13
}

/// Fixed configuration of one hasher. Nothing here changes per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashProfile {
    pub num_qubits: usize,
    pub shape: CircuitShape,
    pub readout: Readout,
    pub quantization: Quantization,
    pub output: OutputLength,
    pub segmentation: Segmentation,
    #[serde(default = "default_feedback_stride")]
    pub feedback_stride: usize,
    #[serde(default)]
    pub empty_input: EmptyInputPolicy,
}

impl HashProfile {
    /// Four qubits, one Ry/Rz layer, ring shift 1, Z/X readout, 8-byte digest.
    pub fn compact() -> Self {
        Self {
            num_qubits: 4,
            shape: CircuitShape::Layered {
                layers: 1,
                rotation_axes: vec![Axis::Y, Axis::Z],
                shift: ShiftSchedule::Constant { shift: 1 },
                input_entangler: false,
            },
            readout: Readout::Zx,
            quantization: Quantization::Continuous,
            output: OutputLength::Fixed { bytes: 8 },
            segmentation: Segmentation::Chained {
                reverse_odd_blocks: false,
            },
            feedback_stride: default_feedback_stride(),
            empty_input: EmptyInputPolicy::Reject,
        }
    }

    /// Six qubits, three Ry/Rz/Rx layers with growing shift; output matches input length.
    pub fn standard() -> Self {
        Self {
            num_qubits: 6,
            shape: CircuitShape::Layered {
                layers: 3,
                rotation_axes: vec![Axis::Y, Axis::Z, Axis::X],
                shift: ShiftSchedule::LayerDependent,
                input_entangler: false,
            },
            readout: Readout::Zxy,
            quantization: Quantization::Continuous,
            output: OutputLength::MatchInput,
            segmentation: Segmentation::Chained {
                reverse_odd_blocks: true,
            },
            feedback_stride: default_feedback_stride(),
            empty_input: EmptyInputPolicy::Reject,
        }
    }

    /// Eight layers on four qubits with block-dependent controlled-Z gates.
    pub fn entangled() -> Self {
        Self {
            num_qubits: 4,
            shape: CircuitShape::Layered {
                layers: 8,
                rotation_axes: vec![Axis::Y, Axis::Z, Axis::X],
                shift: ShiftSchedule::Constant { shift: 1 },
                input_entangler: true,
            },
            readout: Readout::Zxy,
            quantization: Quantization::Continuous,
            output: OutputLength::MatchInput,
            segmentation: Segmentation::Chained {
                reverse_odd_blocks: true,
            },
            feedback_stride: default_feedback_stride(),
            empty_input: EmptyInputPolicy::Reject,
        }
    }

    /// Nibble-quantized angles, pairwise ZZ readout, folded 32-byte digest.
    pub fn quantized() -> Self {
        Self {
            num_qubits: 8,
            shape: CircuitShape::Layered {
                layers: 4,
                rotation_axes: vec![Axis::Y, Axis::Z, Axis::X],
                shift: ShiftSchedule::LayerDependent,
                input_entangler: false,
            },
            readout: Readout::ZxyPairwiseZz,
            quantization: Quantization::Nibble,
            output: OutputLength::Fixed { bytes: 32 },
            segmentation: Segmentation::Folded,
            feedback_stride: default_feedback_stride(),
            empty_input: EmptyInputPolicy::Reject,
        }
    }

    /// A 64-step coined walk over four position qubits.
    pub fn walk() -> Self {
        Self {
            num_qubits: 5,
            shape: CircuitShape::Walk { steps: 64 },
            readout: Readout::Zx,
            quantization: Quantization::Continuous,
            output: OutputLength::MatchInput,
            segmentation: Segmentation::Folded,
            feedback_stride: default_feedback_stride(),
            empty_input: EmptyInputPolicy::Reject,
        }
    }

    /// Looks up one of the named presets.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "compact" => Some(Self::compact()),
            "standard" => Some(Self::standard()),
            "entangled" => Some(Self::entangled()),
            "quantized" => Some(Self::quantized()),
            "walk" => Some(Self::walk()),
            _ => None,
        }
    }

    /// Parses and validates a JSON profile.
    pub fn from_json(json: &str) -> Result<Self, QHashError> {
        let profile: HashProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, QHashError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of rotation slots one circuit binds.
    pub fn slot_count(&self) -> usize {
        match &self.shape {
            CircuitShape::Layered {
                layers,
                rotation_axes,
                ..
            } => layers * rotation_axes.len() * self.num_qubits,
            CircuitShape::Walk { steps } => *steps,
        }
    }

    /// Bytes of input consumed by one circuit execution.
    pub fn block_size(&self) -> usize {
        let slots = self.slot_count();
        match self.quantization {
            Quantization::Continuous => slots,
            Quantization::Nibble => slots.div_ceil(2),
        }
    }

    /// Qubits whose observables are sampled into the digest.
    pub fn sampled_qubits(&self) -> Range<usize> {
        match self.shape {
            CircuitShape::Layered { .. } => 0..self.num_qubits,
            // qubit 0 is the coin
            CircuitShape::Walk { .. } => 1..self.num_qubits,
        }
    }

    pub fn output_len(&self, input_len: usize) -> usize {
        match self.output {
            OutputLength::Fixed { bytes } => bytes,
            OutputLength::MatchInput => input_len,
        }
    }

    pub fn validate(&self) -> Result<(), QHashError> {
        check_qubit_count(self.num_qubits)?;
        match &self.shape {
            CircuitShape::Layered {
                layers,
                rotation_axes,
                shift,
                ..
            } => {
                if *layers == 0 {
                    return Err(QHashError::InvalidProfile(
                        "a layered circuit needs at least one layer".to_string(),
                    ));
                }
                if rotation_axes.is_empty() {
                    return Err(QHashError::InvalidProfile(
                        "rotation_axes must not be empty".to_string(),
                    ));
                }
                for (i, axis) in rotation_axes.iter().enumerate() {
                    if rotation_axes[..i].contains(axis) {
                        return Err(QHashError::InvalidProfile(format!(
                            "rotation axis {} listed twice",
                            axis
                        )));
                    }
                }
                if let ShiftSchedule::Constant { shift: 0 } = shift {
                    return Err(QHashError::InvalidProfile(
                        "a constant shift must be at least 1".to_string(),
                    ));
                }
            }
            CircuitShape::Walk { steps } => {
                if *steps == 0 {
                    return Err(QHashError::InvalidProfile(
                        "a walk needs at least one step".to_string(),
                    ));
                }
            }
        }
        if let OutputLength::Fixed { bytes: 0 } = self.output {
            return Err(QHashError::InvalidProfile(
                "a fixed output must be at least one byte".to_string(),
            ));
        }
        if self.feedback_stride % 2 == 0 {
            return Err(QHashError::InvalidProfile(format!(
                "feedback_stride must be odd, got {}",
                self.feedback_stride
            )));
        }
        check_block_size(self.block_size())
    }
}

impl Default for HashProfile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim::{MAX_QUBITS, SimError};

    #[test]
    fn test_presets_are_valid() {
        for name in ["compact", "standard", "entangled", "quantized", "walk"] {
            let profile = HashProfile::preset(name).unwrap();
            assert!(profile.validate().is_ok(), "preset {} failed validation", name);
        }
        assert!(HashProfile::preset("sha256").is_none());
    }

    #[test]
    fn test_block_sizes() {
        assert_eq!(HashProfile::compact().block_size(), 8);
        assert_eq!(HashProfile::standard().block_size(), 54);
        assert_eq!(HashProfile::entangled().block_size(), 96);
        // 96 slots, two per byte
        assert_eq!(HashProfile::quantized().block_size(), 48);
        assert_eq!(HashProfile::walk().block_size(), 64);
        assert_eq!(HashProfile::walk().sampled_qubits(), 1..5);
    }

    #[test]
    fn test_profile_from_json() {
        let json = r#"{
            "num_qubits": 3,
            "shape": {
                "kind": "layered",
                "layers": 2,
                "rotation_axes": ["Y", "X"],
                "shift": { "kind": "layer_dependent" }
            },
            "readout": "zxy_pairwise_zz",
            "quantization": "nibble",
            "output": { "kind": "fixed", "bytes": 16 },
            "segmentation": { "kind": "chained", "reverse_odd_blocks": true }
        }"#;
        let profile = HashProfile::from_json(json).unwrap();
        assert_eq!(profile.num_qubits, 3);
        assert_eq!(profile.feedback_stride, 13);
        assert_eq!(profile.empty_input, EmptyInputPolicy::Reject);
        assert_eq!(profile.slot_count(), 12);
        assert_eq!(profile.block_size(), 6);
        assert_eq!(profile.output_len(100), 16);
        match profile.shape {
            CircuitShape::Layered { input_entangler, shift, .. } => {
                assert!(!input_entangler);
                assert_eq!(shift, ShiftSchedule::LayerDependent);
            }
            CircuitShape::Walk { .. } => panic!("expected a layered shape"),
        }
    }

    #[test]
    fn test_json_errors_surface() {
        assert!(matches!(
            HashProfile::from_json("{ \"num_qubits\": 4 }"),
            Err(QHashError::Profile(_))
        ));
    }

    #[test]
    fn test_validation_failures() {
        for num_qubits in [1, 21, 25] {
            let mut profile = HashProfile::compact();
            profile.num_qubits = num_qubits;
            let err = profile.validate().unwrap_err();
            assert!(
                matches!(
                    err,
                    QHashError::Simulation(SimError::UnsupportedQubitCount {
                        requested,
                        min: 2,
                        max: MAX_QUBITS,
                    }) if requested == num_qubits
                ),
                "unexpected error {:?}",
                err
            );
            assert!(err.to_string().contains("supported range is 2..=20"));
        }

        let mut profile = HashProfile::compact();
        profile.feedback_stride = 12;
        assert!(matches!(profile.validate(), Err(QHashError::InvalidProfile(_))));

        let mut profile = HashProfile::compact();
        profile.output = OutputLength::Fixed { bytes: 0 };
        assert!(matches!(profile.validate(), Err(QHashError::InvalidProfile(_))));

        let mut profile = HashProfile::compact();
        profile.shape = CircuitShape::Layered {
            layers: 1,
            rotation_axes: vec![Axis::Y, Axis::Y],
            shift: ShiftSchedule::Constant { shift: 1 },
            input_entangler: false,
        };
        assert!(matches!(profile.validate(), Err(QHashError::InvalidProfile(_))));

        // two qubits, one axis, nibble angles: a single-byte block
        let mut profile = HashProfile::compact();
        profile.num_qubits = 2;
        profile.quantization = Quantization::Nibble;
        profile.shape = CircuitShape::Layered {
            layers: 1,
            rotation_axes: vec![Axis::Y],
            shift: ShiftSchedule::Constant { shift: 1 },
            input_entangler: false,
        };
        assert!(matches!(
            profile.validate(),
            Err(QHashError::InvalidBlockSize { size: 1, .. })
        ));
    }
}
