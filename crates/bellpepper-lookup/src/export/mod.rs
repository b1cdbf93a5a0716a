//! Export of a finished constraint system, its witness and its lookup to the
//! files read by the external prover.
//!
//! Three artifacts are written: the R1CS rows, the assignment and the lookup
//! table with its members. Every field element is written in canonical form,
//! see [`crate::field`]. The binary layout is in [`binary`]; [`json`] writes a
//! human readable dump of the same data.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ff::PrimeFieldBits;
use log::info;

use crate::error::{LookupError, Result};
use crate::field::{CanonicalElement, FieldCodec};
use crate::range_check::Lookup;
use crate::util_cs::{ConstraintSystemView, LinearExpression, Witness};

pub mod binary;
pub mod json;

pub use binary::{write_lookup, write_r1cs, write_witness};

/// Where the three artifacts are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPaths {
    pub r1cs: PathBuf,
    pub witness: PathBuf,
    pub lookup: PathBuf,
}

impl ExportPaths {
    pub const R1CS_FILE: &'static str = "r1cs.bin";
    pub const WITNESS_FILE: &'static str = "assignment.bin";
    pub const LOOKUP_FILE: &'static str = "lookup.bin";

    /// The default file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        ExportPaths {
            r1cs: dir.join(Self::R1CS_FILE),
            witness: dir.join(Self::WITNESS_FILE),
            lookup: dir.join(Self::LOOKUP_FILE),
        }
    }

    /// The same paths with their extension replaced, e.g. `r1cs.json` for the
    /// JSON dump.
    pub fn with_extension(&self, extension: &str) -> Self {
        ExportPaths {
            r1cs: self.r1cs.with_extension(extension),
            witness: self.witness.with_extension(extension),
            lookup: self.lookup.with_extension(extension),
        }
    }
}

/// A linear expression keyed by flat variable id, in canonical form.
pub(crate) type SparseRow = BTreeMap<u64, CanonicalElement>;

pub(crate) fn sparse_row<Scalar, S>(
    system: &S,
    codec: &FieldCodec<Scalar>,
    expression: &LinearExpression,
) -> Result<SparseRow>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
{
    let mut terms: BTreeMap<u64, Scalar> = BTreeMap::new();
    for term in expression.iter() {
        let id = system.variable_id(term.variable).ok_or_else(|| {
            LookupError::UnresolvableVariable(format!("{:?}", term.variable.get_unchecked()))
        })?;
        let coeff = system.coefficient(term.coeff).ok_or_else(|| {
            LookupError::UnresolvableVariable(format!("coefficient {}", term.coeff.0))
        })?;
        *terms.entry(id).or_insert(Scalar::ZERO) += coeff;
    }

    terms
        .into_iter()
        .map(|(id, coeff)| codec.canonicalize(&coeff).map(|element| (id, element)))
        .collect()
}

pub(crate) fn check_witness<Scalar, S>(system: &S, witness: &Witness<Scalar>) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
{
    if witness.len() != system.num_variables() {
        return Err(LookupError::WitnessMismatch(format!(
            "{} values for {} variables",
            witness.len(),
            system.num_variables()
        )));
    }
    if witness.num_public != system.num_inputs() {
        return Err(LookupError::WitnessMismatch(format!(
            "{} public values for {} inputs",
            witness.num_public,
            system.num_inputs()
        )));
    }
    if witness.values.first() != Some(&Scalar::ONE) {
        return Err(LookupError::WitnessMismatch(
            "first value must be the constant one".into(),
        ));
    }

    Ok(())
}

/// Creates `path`, runs `f` on a buffered writer and flushes it, so a failed
/// write is reported rather than lost on drop.
pub(crate) fn write_file<P, F>(path: P, f: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    f(&mut writer)?;
    writer.flush()?;

    Ok(())
}

pub fn export_r1cs<Scalar, S, P>(system: &S, path: P) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    P: AsRef<Path>,
{
    info!("writing r1cs to {}", path.as_ref().display());
    write_file(path, |writer| write_r1cs(system, writer))
}

pub fn export_witness<Scalar, S, P>(system: &S, witness: &Witness<Scalar>, path: P) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    P: AsRef<Path>,
{
    info!("writing assignment to {}", path.as_ref().display());
    write_file(path, |writer| write_witness(system, witness, writer))
}

pub fn export_lookup<Scalar, S, P>(lookup: &Lookup, system: &S, path: P) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
    P: AsRef<Path>,
{
    info!("writing lookup to {}", path.as_ref().display());
    write_file(path, |writer| write_lookup(lookup, system, writer))
}

/// Writes the three artifacts one after the other, stopping at the first
/// failure.
pub fn export_all<Scalar, S>(
    system: &S,
    lookup: &Lookup,
    witness: &Witness<Scalar>,
    paths: &ExportPaths,
) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar>,
{
    export_r1cs(system, &paths.r1cs)?;
    export_witness(system, witness, &paths.witness)?;
    export_lookup(lookup, system, &paths.lookup)
}

/// Writes the three artifacts concurrently. All of them are attempted; the
/// first error in r1cs, witness, lookup order is returned.
pub fn export_all_parallel<Scalar, S>(
    system: &S,
    lookup: &Lookup,
    witness: &Witness<Scalar>,
    paths: &ExportPaths,
) -> Result<()>
where
    Scalar: PrimeFieldBits,
    S: ConstraintSystemView<Scalar> + Sync,
{
    let (r1cs_written, (witness_written, lookup_written)) = rayon::join(
        || export_r1cs(system, &paths.r1cs),
        || {
            rayon::join(
                || export_witness(system, witness, &paths.witness),
                || export_lookup(lookup, system, &paths.lookup),
            )
        },
    );

    r1cs_written.and(witness_written).and(lookup_written)
}
