//! JSON dump of the exported artifacts, for inspection.
//!
//! Field elements are written as decimal strings of their canonical integer.
//! Rows map variable ids to coefficients; the assignment omits the constant
//! one like the binary format does.

use std::collections::BTreeMap;
use std::io::Write;

use ff::PrimeFieldBits;
use log::{debug, info};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{check_witness, sparse_row, write_file, ExportPaths, SparseRow};
use crate::error::Result;
use crate::field::{CanonicalElement, FieldCodec};
use crate::range_check::Lookup;
use crate::util_cs::{ConstraintSystemView, Witness};

pub type RowJson = BTreeMap<u64, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintJson {
    pub a: RowJson,
    pub b: RowJson,
    pub c: RowJson,
}

pub type R1csJson = Vec<ConstraintJson>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentJson {
    pub variables: Vec<String>,
    /// Public inputs, the constant one included.
    pub primary_input_size: usize,
    pub auxiliary_input_size: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupJson {
    pub table: Vec<[String; 3]>,
    pub constraints: Vec<ConstraintJson>,
}

pub fn to_decimal(element: &CanonicalElement) -> String {
    BigUint::from_bytes_le(&element.to_le_bytes()).to_string()
}

fn row_json(row: SparseRow) -> RowJson {
    row.into_iter()
        .map(|(id, element)| (id, to_decimal(&element)))
        .collect()
}

pub fn r1cs_json<Scalar, S>(system: &S) -> Result<R1csJson>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
{
    let codec = FieldCodec::<Scalar>::new()?;
    system
        .constraints()
        .iter()
        .map(|constraint| -> Result<ConstraintJson> {
            Ok(ConstraintJson {
                a: row_json(sparse_row(system, &codec, &constraint.a)?),
                b: row_json(sparse_row(system, &codec, &constraint.b)?),
                c: row_json(sparse_row(system, &codec, &constraint.c)?),
            })
        })
        .collect()
}

pub fn assignment_json<Scalar, S>(system: &S, witness: &Witness<Scalar>) -> Result<AssignmentJson>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
{
    check_witness(system, witness)?;
    let codec = FieldCodec::<Scalar>::new()?;

    let variables = witness.values[1..]
        .iter()
        .map(|value| codec.canonicalize(value).map(|element| to_decimal(&element)))
        .collect::<Result<Vec<_>>>()?;

    Ok(AssignmentJson {
        variables,
        primary_input_size: witness.num_public,
        auxiliary_input_size: witness.len() - witness.num_public,
    })
}

pub fn lookup_json<Scalar, S>(lookup: &Lookup, system: &S) -> Result<LookupJson>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
{
    let codec = FieldCodec::<Scalar>::new()?;

    let table = (0..lookup.table_size())
        .map(|row| [row.to_string(), "0".to_string(), "0".to_string()])
        .collect();
    let constraints = lookup
        .members()
        .iter()
        .map(|member| -> Result<ConstraintJson> {
            Ok(ConstraintJson {
                a: row_json(sparse_row(system, &codec, member)?),
                ..Default::default()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LookupJson { table, constraints })
}

pub fn write_r1cs_json<Scalar, S, W>(system: &S, writer: W) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    W: Write,
{
    let r1cs = r1cs_json(system)?;
    debug!("dumping {} constraints", r1cs.len());
    serde_json::to_writer_pretty(writer, &r1cs)?;

    Ok(())
}

pub fn write_assignment_json<Scalar, S, W>(
    system: &S,
    witness: &Witness<Scalar>,
    writer: W,
) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    W: Write,
{
    let assignment = assignment_json(system, witness)?;
    debug!("dumping {} values", assignment.variables.len());
    serde_json::to_writer_pretty(writer, &assignment)?;

    Ok(())
}

pub fn write_lookup_json<Scalar, S, W>(lookup: &Lookup, system: &S, writer: W) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    W: Write,
{
    let lookup = lookup_json(lookup, system)?;
    debug!(
        "dumping lookup table of {} rows, {} members",
        lookup.table.len(),
        lookup.constraints.len()
    );
    serde_json::to_writer_pretty(writer, &lookup)?;

    Ok(())
}

/// Dumps the three artifacts next to each other. `paths` are used as given;
/// see [`ExportPaths::with_extension`].
pub fn export_all_json<Scalar, S>(
    system: &S,
    lookup: &Lookup,
    witness: &Witness<Scalar>,
    paths: &ExportPaths,
) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
{
    info!("dumping r1cs, assignment and lookup as JSON");
    write_file(&paths.r1cs, |writer| write_r1cs_json(system, writer))?;
    write_file(&paths.witness, |writer| {
        write_assignment_json(system, witness, writer)
    })?;
    write_file(&paths.lookup, |writer| {
        write_lookup_json(lookup, system, writer)
    })
}
