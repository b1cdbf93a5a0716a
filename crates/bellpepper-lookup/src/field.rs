//! Canonical encoding of field elements.
//!
//! Every exported artifact stores a field element as its canonical integer
//! representative in `[0, p)`, split into four 64-bit limbs, least significant
//! limb first, each limb little-endian. The conversion is driven by
//! [`PrimeFieldBits::to_le_bits`], which is always in the normal (not
//! Montgomery) domain regardless of how the field stores its elements.

use std::cmp::Ordering;
use std::io::{self, Read, Write};
use std::marker::PhantomData;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use ff::PrimeFieldBits;

use crate::error::{LookupError, Result};

pub const NUM_LIMBS: usize = 4;
/// Size in bytes of one encoded field element.
pub const ELEMENT_BYTES: usize = NUM_LIMBS * 8;

/// A field element in canonical form, as four little-endian 64-bit limbs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CanonicalElement(pub [u64; NUM_LIMBS]);

impl Ord for CanonicalElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for CanonicalElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl CanonicalElement {
    pub fn limbs(&self) -> &[u64; NUM_LIMBS] {
        &self.0
    }

    pub fn to_le_bytes(&self) -> [u8; ELEMENT_BYTES] {
        let mut bytes = [0u8; ELEMENT_BYTES];
        for (chunk, limb) in bytes.chunks_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for limb in self.0.iter() {
            writer.write_u64::<LittleEndian>(*limb)?;
        }

        Ok(())
    }

    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut limbs = [0u64; NUM_LIMBS];
        for limb in limbs.iter_mut() {
            *limb = reader.read_u64::<LittleEndian>()?;
        }

        Ok(CanonicalElement(limbs))
    }

    /// Maps the canonical form back into the field, rejecting values that are
    /// not strictly below the modulus.
    pub fn to_field<Scalar: PrimeFieldBits>(&self) -> Result<Scalar> {
        let codec = FieldCodec::<Scalar>::new()?;
        codec.check_bound(self)?;

        let shift = Scalar::from_u128(1u128 << 64);
        let mut acc = Scalar::ZERO;
        for limb in self.0.iter().rev() {
            acc *= shift;
            acc += Scalar::from(*limb);
        }

        Ok(acc)
    }
}

fn bits_to_limbs<I: IntoIterator<Item = bool>>(bits: I) -> Option<CanonicalElement> {
    let mut limbs = [0u64; NUM_LIMBS];
    for (i, bit) in bits.into_iter().enumerate() {
        if !bit {
            continue;
        }
        if i >= NUM_LIMBS * 64 {
            return None;
        }
        limbs[i / 64] |= 1u64 << (i % 64);
    }

    Some(CanonicalElement(limbs))
}

/// Converts field elements of `Scalar` to their canonical form, checking each
/// result against the field modulus.
#[derive(Debug, Clone, Copy)]
pub struct FieldCodec<Scalar: PrimeFieldBits> {
    modulus: CanonicalElement,
    _p: PhantomData<Scalar>,
}

impl<Scalar: PrimeFieldBits> FieldCodec<Scalar> {
    pub fn new() -> Result<Self> {
        if Scalar::NUM_BITS as usize > NUM_LIMBS * 64 {
            return Err(LookupError::UnsupportedField(Scalar::NUM_BITS));
        }
        let modulus = bits_to_limbs(Scalar::char_le_bits())
            .ok_or(LookupError::UnsupportedField(Scalar::NUM_BITS))?;

        Ok(FieldCodec {
            modulus,
            _p: PhantomData,
        })
    }

    pub fn modulus(&self) -> &CanonicalElement {
        &self.modulus
    }

    fn check_bound(&self, element: &CanonicalElement) -> Result<()> {
        if *element >= self.modulus {
            return Err(LookupError::FieldElementOutOfRange(format!(
                "{:x?} is not below modulus {:x?}",
                element.0, self.modulus.0
            )));
        }

        Ok(())
    }

    pub fn canonicalize(&self, value: &Scalar) -> Result<CanonicalElement> {
        let element = bits_to_limbs(value.to_le_bits()).ok_or_else(|| {
            LookupError::FieldElementOutOfRange("canonical form wider than 256 bits".into())
        })?;
        self.check_bound(&element)?;

        Ok(element)
    }

    pub fn write_element<W: Write>(&self, value: &Scalar, writer: W) -> Result<()> {
        self.canonicalize(value)?.write(writer)?;

        Ok(())
    }
}

/// Canonical form of a single element. Exporters handling many elements
/// should keep a [`FieldCodec`] around instead.
pub fn canonical_limbs<Scalar: PrimeFieldBits>(value: &Scalar) -> Result<CanonicalElement> {
    FieldCodec::new()?.canonicalize(value)
}
