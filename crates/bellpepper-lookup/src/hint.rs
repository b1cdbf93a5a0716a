//! Out-of-circuit limb decomposition.
//!
//! The limbs computed here are untrusted witness data. They are bound to the
//! decomposed value only by the recomposition constraint emitted when range
//! checks are finalized, and to the limb range only by the lookup.

use ff::PrimeFieldBits;

use crate::error::{LookupError, Result};

/// Number of limbs of `limb_width` bits covering `bit_width` bits.
fn limb_count(bit_width: u64, limb_width: u64) -> u64 {
    bit_width / limb_width + u64::from(bit_width % limb_width != 0)
}

/// Decomposes `value` into `nb_outputs` little-endian limbs of `limb_width`
/// bits each, least significant limb first.
///
/// `nb_outputs` must equal `ceil(bit_width / limb_width)`. Bits of `value`
/// above `nb_outputs * limb_width` are dropped.
pub fn decompose<Scalar: PrimeFieldBits>(
    bit_width: u64,
    limb_width: u64,
    value: &Scalar,
    nb_outputs: usize,
) -> Result<Vec<Scalar>> {
    if bit_width == 0 {
        return Err(LookupError::InvalidHintInput(
            "bit width must be positive".into(),
        ));
    }
    if limb_width == 0 || limb_width > 64 {
        return Err(LookupError::InvalidHintInput(format!(
            "limb width {} must be in [1, 64]",
            limb_width
        )));
    }

    let expected = usize::try_from(limb_count(bit_width, limb_width)).map_err(|_| {
        LookupError::InvalidHintInput(format!("{} bits do not fit in memory", bit_width))
    })?;
    if nb_outputs != expected {
        return Err(LookupError::ArityMismatch {
            expected,
            got: nb_outputs,
        });
    }

    let bits: Vec<bool> = value.to_le_bits().into_iter().collect();
    let mut limbs: Vec<Scalar> = bits
        .chunks(limb_width as usize)
        .take(expected)
        .map(|chunk| {
            let limb = chunk
                .iter()
                .rev()
                .fold(0u64, |acc, bit| (acc << 1) | u64::from(*bit));
            Scalar::from(limb)
        })
        .collect();
    limbs.resize(expected, Scalar::ZERO);

    Ok(limbs)
}
