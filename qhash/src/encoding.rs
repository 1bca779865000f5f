use std::f64::consts::{PI, TAU};

use crate::error::QHashError;
use crate::profile::{Quantization, Segmentation};

/// Room for the two-byte length marker.
pub const MIN_BLOCK_SIZE: usize = 2;
/// Largest block whose length marker still fits a `u16`.
pub const MAX_BLOCK_SIZE: usize = u16::MAX as usize;

const SPREAD: usize = 167;
const CROSS: usize = 59;
const SLOT_STEP: usize = 37;
const STRIDE: usize = 7;

/// Fits `data` to exactly `size` bytes.
///
/// Short input is zero-padded and its big-endian `u16` length is XORed into
/// the last two bytes, so `[1]` and `[1, 0]` land on different blocks. Long
/// input is XOR-folded modulo `size`.
pub fn normalize_block(data: &[u8], size: usize) -> Result<Vec<u8>, QHashError> {
    check_block_size(size)?;
    if data.len() == size {
        return Ok(data.to_vec());
    }
    let mut block = vec![0u8; size];
    if data.len() < size {
        block[..data.len()].copy_from_slice(data);
        let len = data.len() as u16;
        block[size - 2] ^= (len >> 8) as u8;
        block[size - 1] ^= len as u8;
    } else {
        for (i, &b) in data.iter().enumerate() {
            block[i % size] ^= b;
        }
    }
    Ok(block)
}

pub(crate) fn check_block_size(size: usize) -> Result<(), QHashError> {
    if (MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(QHashError::InvalidBlockSize {
            size,
            min: MIN_BLOCK_SIZE,
            max: MAX_BLOCK_SIZE,
        })
    }
}

/// XORs `prev` over `block`; bytes past the shorter operand come from the longer one.
pub fn chain_xor(block: &[u8], prev: &[u8]) -> Vec<u8> {
    let (long, short) = if block.len() >= prev.len() {
        (block, prev)
    } else {
        (prev, block)
    };
    let mut out = long.to_vec();
    for (o, &s) in out.iter_mut().zip(short) {
        *o ^= s;
    }
    out
}

/// Splits input into normalized blocks of `block_size` bytes.
pub fn split_blocks(
    input: &[u8],
    block_size: usize,
    segmentation: Segmentation,
) -> Result<Vec<Vec<u8>>, QHashError> {
    check_block_size(block_size)?;
    match segmentation {
        Segmentation::Folded => Ok(vec![normalize_block(input, block_size)?]),
        Segmentation::Chained { reverse_odd_blocks } => input
            .chunks(block_size)
            .enumerate()
            .map(|(index, chunk)| {
                let mut block = normalize_block(chunk, block_size)?;
                if reverse_odd_blocks && index % 2 == 1 {
                    block.reverse();
                }
                Ok(block)
            })
            .collect(),
    }
}

fn nibble(block: &[u8], index: usize) -> usize {
    let index = index % (block.len() * 2);
    ((block[index / 2] >> ((index % 2) * 4)) & 0x0F) as usize
}

/// Derives `count` rotation angles from a block.
///
/// Slot `j` mixes two block positions with its own index, so equal bytes in
/// different positions still yield different angles. Continuous angles take
/// 65536 values in `[0, 2π)`; nibble angles are multiples of `π/8`.
pub fn derive_angles(block: &[u8], count: usize, quantization: Quantization) -> Vec<f64> {
    if block.is_empty() {
        return vec![0.0; count];
    }
    let len = block.len();
    (0..count)
        .map(|j| match quantization {
            Quantization::Continuous => {
                let p = block[j % len] as usize;
                let q = block[(j * STRIDE + 3) % len] as usize;
                let hi = (p * SPREAD + q * CROSS + j * SLOT_STEP) % 256;
                let lo = (q * SPREAD + p * CROSS + j) % 256;
                ((hi << 8) | lo) as f64 * TAU / 65536.0
            }
            Quantization::Nibble => {
                let p = nibble(block, j);
                let q = nibble(block, j * STRIDE + 3);
                let step = (p * 11 + q * 5 + j * 3) % 16;
                step as f64 * PI / 8.0
            }
        })
        .collect()
}
