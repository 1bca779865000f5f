//! Deterministic byte digests computed by simulating small parameterized
//! quantum circuits.
//!
//! Input is cut into blocks, each block sets the rotation angles of a
//! circuit, and Pauli expectations read off the final state become the digest
//! bytes. Multi-block input chains each block's digest into the next block.
//!
//! ```no_run
//! use qhash::{HashProfile, QHasher};
//!
//! let hasher = QHasher::new(HashProfile::standard())?;
//! let digest = hasher.digest(b"some bytes")?;
//! assert_eq!(digest.len(), 10);
//! # Ok::<(), qhash::QHashError>(())
//! ```

pub mod ansatz;
pub mod encoding;
pub mod error;
pub mod events;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod readout;

pub use ansatz::{
    MIN_QUBITS, build_layered_template, build_template, build_walk_template, effective_shift,
};
pub use encoding::{
    MAX_BLOCK_SIZE, MIN_BLOCK_SIZE, chain_xor, derive_angles, normalize_block, split_blocks,
};
pub use error::QHashError;
pub use events::{HashEvent, emit_event};
pub use output::resize_digest;
pub use pipeline::QHasher;
pub use profile::{
    CircuitShape, EmptyInputPolicy, HashProfile, OutputLength, Quantization, Readout,
    Segmentation, ShiftSchedule,
};
pub use readout::{expectation_to_byte, extract_raw_digest, readout_terms};
