//! Binary artifact layout.
//!
//! All integers are `u64` little-endian and every field element is a
//! [`CanonicalElement`](crate::field::CanonicalElement) of 32 bytes.
//!
//! ```text
//! sparse_row   := n, n × (variable_id, element)          ascending variable_id
//! constraint   := sparse_row A, sparse_row B, sparse_row C
//!
//! r1cs         := nb_constraints, nb_constraints × constraint
//! assignment   := nb_values, nb_values × element, nb_public
//! lookup       := table_size, table_size × (row, 0, 0),
//!                 nb_members, nb_members × constraint      B and C empty
//! ```
//!
//! The assignment omits the constant one at index 0, so `nb_values` is one
//! less than the number of variables. `nb_public` counts the constant.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use ff::PrimeFieldBits;
use log::debug;

use super::{check_witness, sparse_row, SparseRow};
use crate::error::Result;
use crate::field::FieldCodec;
use crate::range_check::Lookup;
use crate::util_cs::{ConstraintSystemView, Witness};

fn write_row<W: Write>(row: &SparseRow, writer: &mut W) -> Result<()> {
    writer.write_u64::<LittleEndian>(row.len() as u64)?;
    for (id, element) in row.iter() {
        writer.write_u64::<LittleEndian>(*id)?;
        element.write(&mut *writer)?;
    }

    Ok(())
}

/// Writes every constraint of `system`, in order.
pub fn write_r1cs<Scalar, S, W>(system: &S, mut writer: W) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    W: Write,
{
    let codec = FieldCodec::<Scalar>::new()?;
    let constraints = system.constraints();

    writer.write_u64::<LittleEndian>(constraints.len() as u64)?;
    for constraint in constraints {
        for expression in [&constraint.a, &constraint.b, &constraint.c] {
            write_row(&sparse_row(system, &codec, expression)?, &mut writer)?;
        }
    }
    debug!(
        "wrote {} constraints over {} variables",
        constraints.len(),
        system.num_variables()
    );

    Ok(())
}

/// Writes the assignment of every variable but the constant one, followed by
/// the number of public inputs.
pub fn write_witness<Scalar, S, W>(
    system: &S,
    witness: &Witness<Scalar>,
    mut writer: W,
) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    W: Write,
{
    check_witness(system, witness)?;
    let codec = FieldCodec::<Scalar>::new()?;

    let values = &witness.values[1..];
    writer.write_u64::<LittleEndian>(values.len() as u64)?;
    for value in values {
        codec.write_element(value, &mut writer)?;
    }
    writer.write_u64::<LittleEndian>(witness.num_public as u64)?;
    debug!(
        "wrote {} values, {} public",
        values.len(),
        witness.num_public
    );

    Ok(())
}

/// Writes the lookup table `0..table_size` followed by one row per member.
pub fn write_lookup<Scalar, S, W>(lookup: &Lookup, system: &S, mut writer: W) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    W: Write,
{
    let codec = FieldCodec::<Scalar>::new()?;

    writer.write_u64::<LittleEndian>(lookup.table_size() as u64)?;
    for row in 0..lookup.table_size() as u64 {
        writer.write_u64::<LittleEndian>(row)?;
        writer.write_u64::<LittleEndian>(0)?;
        writer.write_u64::<LittleEndian>(0)?;
    }

    let empty = SparseRow::new();
    writer.write_u64::<LittleEndian>(lookup.members().len() as u64)?;
    for member in lookup.members() {
        write_row(&sparse_row(system, &codec, member)?, &mut writer)?;
        write_row(&empty, &mut writer)?;
        write_row(&empty, &mut writer)?;
    }
    debug!(
        "wrote lookup table of {} rows, {} members",
        lookup.table_size(),
        lookup.members().len()
    );

    Ok(())
}
