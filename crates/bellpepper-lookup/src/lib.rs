#![deny(missing_debug_implementations)]
//! `bellpepper-lookup` range checks values of a bellpepper circuit with a
//! lookup argument instead of bit decomposition, and exports the finished
//! constraint system, its witness and the lookup for an external prover.
//!
//! Range checks are requested while the circuit is synthesized and only
//! turned into constraints once the whole circuit is known: every checked
//! value is split into limbs of one common width, chosen to minimize the
//! total number of constraints, and each limb is claimed to be a row of the
//! table `[0, 2^width)`.
//!
//! # Example
//!
//! ```no_run
//! use bellpepper_core::{num::AllocatedNum, ConstraintSystem};
//! use bellpepper_lookup::{
//!     export::{export_all, ExportPaths},
//!     synthesize_with_lookup, LookupCircuit, R1csBuilder, RangeChecks, Result,
//! };
//! use blstrs::Scalar as Fr;
//!
//! /// Proves knowledge of a byte string.
//! struct Bytes(Vec<u8>);
//!
//! impl LookupCircuit<Fr> for Bytes {
//!     fn synthesize<CS: ConstraintSystem<Fr>>(
//!         self,
//!         cs: &mut CS,
//!         range_checks: &mut RangeChecks<Fr>,
//!     ) -> Result<()> {
//!         for (i, byte) in self.0.into_iter().enumerate() {
//!             let num = AllocatedNum::alloc(cs.namespace(|| format!("byte {}", i)), || {
//!                 Ok(Fr::from(u64::from(byte)))
//!             })?;
//!             range_checks.check(&num, 8)?;
//!         }
//!
//!         Ok(())
//!     }
//! }
//!
//! let mut cs = R1csBuilder::<Fr>::new();
//! let lookup = synthesize_with_lookup(Bytes(b"bellpepper".to_vec()), &mut cs)?;
//! assert!(cs.is_satisfied());
//!
//! let witness = cs.witness()?;
//! export_all(&cs, &lookup, &witness, &ExportPaths::in_dir("/tmp/bytes"))?;
//! # Ok::<(), bellpepper_lookup::LookupError>(())
//! ```

mod error;
pub use error::{LookupError, Result};
pub mod export;
pub mod field;
pub mod hint;
pub mod optimizer;
mod range_check;
pub use range_check::{
    synthesize_with_lookup, Lookup, LookupCircuit, RangeCheckCollector, RangeChecks,
    RANGE_CHECKS_NAMESPACE,
};
pub mod util_cs;
pub use util_cs::r1cs_cs::R1csBuilder;
pub use util_cs::{
    CoeffId, ConstraintSystemView, LinearExpression, LinearExpressionResolver, R1c, Term, Witness,
};

pub const BELLPEPPER_LOOKUP_VERSION: &str = env!("CARGO_PKG_VERSION");
