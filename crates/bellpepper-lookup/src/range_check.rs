//! Range checks by limb decomposition and table lookup.
//!
//! Instead of splitting every checked value into bits, values are split into
//! limbs of a common width and each limb is claimed to be a row of the table
//! `[0, 2^width)`. The claims are collected in a [`Lookup`] which is proven by
//! the backend's lookup argument.
//!
//! Checks are only collected while the circuit is synthesized. Nothing is
//! emitted until [`RangeChecks::finalize`] runs, because the limb width can
//! only be chosen once every request is known.
//!
//! ```ignore
//! let mut cs = R1csBuilder::<Scalar>::new();
//! let mut range_checks = RangeChecks::new();
//!
//! let a = AllocatedNum::alloc(cs.namespace(|| "a"), || Ok(Scalar::from(200)))?;
//! range_checks.check(&a, 8)?;
//!
//! let lookup = range_checks.finalize(&mut cs)?;
//! ```

use std::collections::BTreeMap;

use bellpepper_core::{
    num::AllocatedNum, ConstraintSystem, LinearCombination, SynthesisError, Variable,
};
use ff::PrimeFieldBits;
use log::{debug, info};

use crate::error::{LookupError, Result};
use crate::hint::decompose;
use crate::optimizer::{decomposition_size, optimal_limb_width};
use crate::util_cs::{LinearExpression, LinearExpressionResolver};

/// Root namespace holding the limbs and recomposition rows of a finalized
/// batch.
pub const RANGE_CHECKS_NAMESPACE: &str = "range checks";

/// The lookup claims produced by finalizing a batch of range checks.
///
/// Every member must evaluate to a row of the single-column table
/// `0..table_size`. Member order follows check order and is part of the
/// exported format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lookup {
    table_size: usize,
    members: Vec<LinearExpression>,
}

impl Lookup {
    pub(crate) fn new(limb_width: usize, members: Vec<LinearExpression>) -> Self {
        Lookup {
            table_size: 1 << limb_width,
            members,
        }
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    pub fn members(&self) -> &[LinearExpression] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.table_size == 0
    }

    /// Limb width the table was built for, `None` for an empty lookup.
    pub fn limb_width(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.table_size.trailing_zeros() as usize)
        }
    }
}

#[derive(Clone, Debug)]
struct CheckedVariable<Scalar> {
    variable: Variable,
    value: Option<Scalar>,
    bits: usize,
}

/// A pending batch of range checks.
///
/// Finalizing consumes the batch, so it can neither be extended afterwards
/// nor finalized twice.
#[derive(Clone, Debug)]
pub struct RangeChecks<Scalar: PrimeFieldBits> {
    collected: Vec<CheckedVariable<Scalar>>,
}

impl<Scalar: PrimeFieldBits> Default for RangeChecks<Scalar> {
    fn default() -> Self {
        RangeChecks { collected: vec![] }
    }
}

impl<Scalar: PrimeFieldBits> RangeChecks<Scalar> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    /// Requests that `num` fits in `bits` bits.
    pub fn check(&mut self, num: &AllocatedNum<Scalar>, bits: usize) -> Result<()> {
        self.check_variable(num.get_variable(), num.get_value(), bits)
    }

    /// Requests that `variable`, whose assignment is `value` when known, fits
    /// in `bits` bits.
    pub fn check_variable(
        &mut self,
        variable: Variable,
        value: Option<Scalar>,
        bits: usize,
    ) -> Result<()> {
        if bits == 0 || bits > Scalar::CAPACITY as usize {
            return Err(LookupError::InvalidBitWidth {
                bits,
                capacity: Scalar::CAPACITY,
            });
        }
        self.collected.push(CheckedVariable {
            variable,
            value,
            bits,
        });

        Ok(())
    }

    /// Decomposes every checked value into limbs, constrains the limbs to
    /// recompose to the value and returns the lookup claiming each limb is in
    /// range.
    ///
    /// Rows are emitted under the [`RANGE_CHECKS_NAMESPACE`] namespace, so a
    /// constraint system holds at most one finalized batch. Every check is
    /// validated and decomposed before the first row is emitted: on error
    /// `cs` is left as it was.
    pub fn finalize<CS>(self, cs: &mut CS) -> Result<Lookup>
    where
        CS: ConstraintSystem<Scalar> + LinearExpressionResolver<Scalar>,
    {
        if cs.contains_path(RANGE_CHECKS_NAMESPACE) {
            return Err(LookupError::AlreadyClosed);
        }
        if self.collected.is_empty() {
            debug!("no range checks collected");
            cs.push_namespace(|| RANGE_CHECKS_NAMESPACE);
            cs.pop_namespace();
            return Ok(Lookup::default());
        }
        info!("finalizing {} range checks", self.collected.len());

        let mut unique_bits = BTreeMap::new();
        for checked in self.collected.iter() {
            *unique_bits.entry(checked.bits).or_insert(0usize) += 1;
        }
        debug!("unique bits to range check: {:?}", unique_bits);

        for checked in self.collected.iter() {
            if cs.variable_id(checked.variable).is_none() {
                return Err(LookupError::UnresolvableVariable(format!(
                    "checked value {:?} was not allocated by this constraint system",
                    checked.variable
                )));
            }
        }

        // Values are either all known or, when only the shape is recorded,
        // all unknown.
        let known = self.collected.iter().filter(|c| c.value.is_some()).count();
        if known != self.collected.len() && (known > 0 || cs.has_witness()) {
            return Err(LookupError::Synthesis(SynthesisError::AssignmentMissing));
        }

        let bit_widths: Vec<usize> = self.collected.iter().map(|c| c.bits).collect();
        let limb_width = optimal_limb_width(&bit_widths);
        let base = Scalar::from(1u64 << limb_width);

        let limb_values = self
            .collected
            .iter()
            .map(|checked| {
                let nb_limbs = decomposition_size(checked.bits, limb_width);
                checked
                    .value
                    .map(|value| {
                        decompose(checked.bits as u64, limb_width as u64, &value, nb_limbs)
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut decomposed = Vec::new();
        {
            let mut cs = cs.namespace(|| RANGE_CHECKS_NAMESPACE);
            for (i, (checked, limbs)) in self.collected.iter().zip(limb_values).enumerate() {
                let mut cs = cs.namespace(|| format!("range check {}", i));

                let mut composed = LinearCombination::zero();
                let mut coeff = Scalar::ONE;
                for j in 0..decomposition_size(checked.bits, limb_width) {
                    let limb = cs.alloc(
                        || format!("limb {}", j),
                        || {
                            limbs
                                .as_ref()
                                .and_then(|limbs| limbs.get(j).copied())
                                .ok_or(SynthesisError::AssignmentMissing)
                        },
                    )?;
                    composed = composed + (coeff, limb);
                    coeff *= base;
                    decomposed.push(limb);
                }

                // The limbs are only range checked by the lookup; this binds
                // them to the value.
                cs.enforce(
                    || "recomposition",
                    |lc| lc + &composed - checked.variable,
                    |lc| lc + CS::one(),
                    |lc| lc,
                );
            }
        }
        debug!(
            "selected limb width {}, {} range checked values, {} lookup members",
            limb_width,
            self.collected.len(),
            decomposed.len()
        );

        let mut members = Vec::with_capacity(decomposed.len());
        for limb in decomposed {
            let lc = LinearCombination::zero() + limb;
            let member = cs.resolve(&lc).ok_or_else(|| {
                LookupError::UnresolvableVariable(format!("limb {:?} has no linear form", limb))
            })?;
            members.push(member);
        }

        Ok(Lookup::new(limb_width, members))
    }
}

#[derive(Debug)]
enum State<Scalar: PrimeFieldBits> {
    Open(RangeChecks<Scalar>),
    Closed(Lookup),
    Poisoned,
}

/// Range check collector with a runtime open/closed state, for callers which
/// cannot hand the pending [`RangeChecks`] over by value.
///
/// Finalizing is idempotent: later calls return the lookup built by the
/// first one.
#[derive(Debug)]
pub struct RangeCheckCollector<Scalar: PrimeFieldBits> {
    state: State<Scalar>,
}

impl<Scalar: PrimeFieldBits> Default for RangeCheckCollector<Scalar> {
    fn default() -> Self {
        RangeCheckCollector {
            state: State::Open(RangeChecks::new()),
        }
    }
}

impl<Scalar: PrimeFieldBits> RangeCheckCollector<Scalar> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        !matches!(self.state, State::Open(_))
    }

    pub fn check(&mut self, num: &AllocatedNum<Scalar>, bits: usize) -> Result<()> {
        match &mut self.state {
            State::Open(checks) => checks.check(num, bits),
            _ => Err(LookupError::AlreadyClosed),
        }
    }

    pub fn check_variable(
        &mut self,
        variable: Variable,
        value: Option<Scalar>,
        bits: usize,
    ) -> Result<()> {
        match &mut self.state {
            State::Open(checks) => checks.check_variable(variable, value, bits),
            _ => Err(LookupError::AlreadyClosed),
        }
    }

    /// Finalizes the collected checks on first call. A failed finalization
    /// poisons the collector.
    pub fn finalize<CS>(&mut self, cs: &mut CS) -> Result<&Lookup>
    where
        CS: ConstraintSystem<Scalar> + LinearExpressionResolver<Scalar>,
    {
        match std::mem::replace(&mut self.state, State::Poisoned) {
            State::Open(checks) => {
                let lookup = checks.finalize(cs)?;
                self.state = State::Closed(lookup);
            }
            other => self.state = other,
        }

        self.lookup()
    }

    pub fn lookup(&self) -> Result<&Lookup> {
        match &self.state {
            State::Open(_) => Err(LookupError::NotClosed),
            State::Closed(lookup) => Ok(lookup),
            State::Poisoned => Err(LookupError::Poisoned),
        }
    }
}

/// A circuit whose synthesis may request range checks.
pub trait LookupCircuit<Scalar: PrimeFieldBits> {
    fn synthesize<CS: ConstraintSystem<Scalar>>(
        self,
        cs: &mut CS,
        range_checks: &mut RangeChecks<Scalar>,
    ) -> Result<()>;
}

/// Synthesizes `circuit` into `cs`, then finalizes the range checks it
/// requested.
pub fn synthesize_with_lookup<Scalar, C, CS>(circuit: C, cs: &mut CS) -> Result<Lookup>
where
    Scalar: PrimeFieldBits,
    C: LookupCircuit<Scalar>,
    CS: ConstraintSystem<Scalar> + LinearExpressionResolver<Scalar>,
{
    let mut range_checks = RangeChecks::new();
    circuit.synthesize(cs, &mut range_checks)?;

    range_checks.finalize(cs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::constraint_cost;
    use crate::util_cs::r1cs_cs::R1csBuilder;
    use crate::util_cs::{ConstraintSystemView, Term};
    use bellpepper_core::Index;
    use blstrs::Scalar as Fr;
    use ff::{Field, PrimeField};

    fn alloc<CS: ConstraintSystem<Fr>>(cs: &mut CS, name: &str, value: u64) -> AllocatedNum<Fr> {
        AllocatedNum::alloc(cs.namespace(|| name), || Ok(Fr::from(value))).unwrap()
    }

    #[test]
    fn test_mixed_widths() {
        let mut cs = R1csBuilder::<Fr>::new();
        let a = alloc(&mut cs, "a", 200);
        let b = alloc(&mut cs, "b", 17);
        let c = alloc(&mut cs, "c", 0xbeef);

        let mut range_checks = RangeChecks::new();
        range_checks.check(&a, 8).unwrap();
        range_checks.check(&b, 8).unwrap();
        range_checks.check(&c, 16).unwrap();
        assert_eq!(range_checks.len(), 3);
        assert_eq!(cs.num_constraints(), 0);

        let lookup = range_checks.finalize(&mut cs).unwrap();

        // 2-bit limbs cost 4 + 16 + 4 = 24, 4-bit limbs 16 + 8 + 4 = 28.
        let bits = [8, 8, 16];
        assert!(constraint_cost(4, &bits) > constraint_cost(2, &bits));
        assert!(cs.is_satisfied());
        assert_eq!(cs.num_constraints(), 3);
        assert_eq!(lookup.table_size(), 4);
        assert_eq!(lookup.limb_width(), Some(2));
        assert_eq!(lookup.members().len(), 4 + 4 + 8);

        // Limbs are allocated after the three checked values, in check order.
        for (k, member) in lookup.members().iter().enumerate() {
            assert_eq!(member.len(), 1);
            let Term { variable, coeff } = member.0[0];
            assert_eq!(variable.get_unchecked(), Index::Aux(3 + k));
            assert_eq!(cs.coefficient(coeff), Some(&Fr::ONE));
        }

        let limb = |i: usize, j: usize| {
            let path = format!("range checks/range check {}/limb {}", i, j);
            cs.get(&path).unwrap()
        };
        // 200 = 0b11_00_10_00
        assert_eq!(limb(0, 1), Fr::from(2u64));
        assert_eq!(limb(0, 3), Fr::from(3u64));
        // 17 = 0b00_01_00_01
        assert_eq!(limb(1, 2), Fr::ONE);
        // 0xbeef = 0b10_11_11_10_11_10_11_11
        assert_eq!(limb(2, 0), Fr::from(3u64));
        assert_eq!(limb(2, 2), Fr::from(2u64));
        assert_eq!(limb(2, 7), Fr::from(2u64));
    }

    #[test]
    fn test_empty_batch() {
        let mut cs = R1csBuilder::<Fr>::new();
        let lookup = RangeChecks::new().finalize(&mut cs).unwrap();

        assert_eq!(lookup.table_size(), 0);
        assert!(lookup.members().is_empty());
        assert!(lookup.is_empty());
        assert_eq!(lookup.limb_width(), None);
        assert_eq!(cs.num_constraints(), 0);
        assert_eq!(cs.num_aux(), 0);
    }

    #[test]
    fn test_lookup_is_keyed_by_table_size() {
        let lookup = Lookup::new(3, vec![]);
        assert!(!lookup.is_empty());
        assert_eq!(lookup.table_size(), 8);
        assert_eq!(lookup.limb_width(), Some(3));

        assert!(Lookup::default().is_empty());
        assert_eq!(Lookup::default().limb_width(), None);
    }

    #[test]
    fn test_second_batch_is_rejected() {
        let mut cs = R1csBuilder::<Fr>::new();
        let a = alloc(&mut cs, "a", 9);

        let mut first = RangeChecks::new();
        first.check(&a, 4).unwrap();
        first.finalize(&mut cs).unwrap();
        let (constraints, aux) = (cs.num_constraints(), cs.num_aux());

        let mut second = RangeChecks::new();
        second.check(&a, 4).unwrap();
        assert!(matches!(
            second.finalize(&mut cs),
            Err(LookupError::AlreadyClosed)
        ));
        assert!(matches!(
            RangeChecks::new().finalize(&mut cs),
            Err(LookupError::AlreadyClosed)
        ));
        assert_eq!(cs.num_constraints(), constraints);
        assert_eq!(cs.num_aux(), aux);
        assert!(cs.is_satisfied());
    }

    #[test]
    fn test_empty_batch_reserves_namespace() {
        let mut cs = R1csBuilder::<Fr>::new();
        RangeChecks::new().finalize(&mut cs).unwrap();
        assert!(cs.contains_path(RANGE_CHECKS_NAMESPACE));

        let a = alloc(&mut cs, "a", 9);
        let mut range_checks = RangeChecks::new();
        range_checks.check(&a, 4).unwrap();
        assert!(matches!(
            range_checks.finalize(&mut cs),
            Err(LookupError::AlreadyClosed)
        ));
    }

    #[test]
    fn test_user_namespaces() {
        let mut cs = R1csBuilder::<Fr>::new();
        let a = {
            let mut cs = cs.namespace(|| "range check 0");
            alloc(&mut cs, "limb 0", 5)
        };
        let mut range_checks = RangeChecks::new();
        range_checks.check(&a, 3).unwrap();
        range_checks.finalize(&mut cs).unwrap();
        assert!(cs.is_satisfied());
        assert_eq!(cs.get("range check 0/limb 0/num"), Some(Fr::from(5u64)));
        let limb = cs.get("range checks/range check 0/limb 0");
        assert_eq!(limb, Some(Fr::ONE));

        let mut cs = R1csBuilder::<Fr>::new();
        let b = alloc(&mut cs, RANGE_CHECKS_NAMESPACE, 5);
        let mut range_checks = RangeChecks::new();
        range_checks.check(&b, 3).unwrap();
        assert!(matches!(
            range_checks.finalize(&mut cs),
            Err(LookupError::AlreadyClosed)
        ));
        assert_eq!(cs.num_constraints(), 0);
        assert_eq!(cs.num_aux(), 1);
    }

    #[test]
    fn test_missing_value_leaves_system_untouched() {
        let mut cs = R1csBuilder::<Fr>::new();
        let a = alloc(&mut cs, "a", 200);
        let b = alloc(&mut cs, "b", 17);

        let mut range_checks = RangeChecks::new();
        range_checks.check(&a, 8).unwrap();
        range_checks.check_variable(b.get_variable(), None, 8).unwrap();
        assert!(matches!(
            range_checks.finalize(&mut cs),
            Err(LookupError::Synthesis(SynthesisError::AssignmentMissing))
        ));
        assert_eq!(cs.num_constraints(), 0);
        assert_eq!(cs.num_aux(), 2);

        // Without any value, a builder keeping the witness fails the same way.
        let mut range_checks = RangeChecks::new();
        range_checks.check_variable(a.get_variable(), None, 8).unwrap();
        assert!(matches!(
            range_checks.finalize(&mut cs),
            Err(LookupError::Synthesis(SynthesisError::AssignmentMissing))
        ));
        assert_eq!(cs.num_constraints(), 0);
        assert_eq!(cs.num_aux(), 2);
        assert!(!cs.contains_path(RANGE_CHECKS_NAMESPACE));

        // Nothing was reserved, so a complete batch still goes through.
        let mut range_checks = RangeChecks::new();
        range_checks.check(&a, 8).unwrap();
        range_checks.check(&b, 8).unwrap();
        assert_eq!(range_checks.finalize(&mut cs).unwrap().members().len(), 8);
        assert!(cs.is_satisfied());
    }

    #[test]
    fn test_out_of_range_value_is_unsatisfied() {
        let mut cs = R1csBuilder::<Fr>::new();
        let a = alloc(&mut cs, "a", 300);

        let mut range_checks = RangeChecks::new();
        range_checks.check(&a, 8).unwrap();
        range_checks.finalize(&mut cs).unwrap();

        assert_eq!(
            cs.which_is_unsatisfied(),
            Some("range checks/range check 0/recomposition")
        );
    }

    #[test]
    fn test_tampered_limb_is_unsatisfied() {
        let mut cs = R1csBuilder::<Fr>::new();
        let a = alloc(&mut cs, "a", 77);

        let mut range_checks = RangeChecks::new();
        range_checks.check(&a, 7).unwrap();
        range_checks.finalize(&mut cs).unwrap();
        assert!(cs.is_satisfied());

        let path = "range checks/range check 0/limb 0";
        let limb = cs.get(path).unwrap();
        cs.set(path, limb + Fr::ONE);
        assert_eq!(
            cs.which_is_unsatisfied(),
            Some("range checks/range check 0/recomposition")
        );
    }

    #[test]
    fn test_wide_values() {
        let mut cs = R1csBuilder::<Fr>::new();
        let value = Fr::from_u128(u128::MAX) * Fr::from(0x1234u64);
        let a = AllocatedNum::alloc(cs.namespace(|| "a"), || Ok(value)).unwrap();
        let b = alloc(&mut cs, "b", 1);

        let mut range_checks = RangeChecks::new();
        range_checks.check(&a, 253).unwrap();
        range_checks.check(&b, 1).unwrap();
        let lookup = range_checks.finalize(&mut cs).unwrap();

        assert!(cs.is_satisfied());
        let width = lookup.limb_width().unwrap();
        assert_eq!(
            lookup.members().len(),
            decomposition_size(253, width) + decomposition_size(1, width)
        );
    }

    #[test]
    fn test_shape_matches_witness_synthesis() {
        fn synthesize(cs: &mut R1csBuilder<Fr>, value: Option<u64>) -> Lookup {
            let a = AllocatedNum::alloc(cs.namespace(|| "a"), || {
                value.map(Fr::from).ok_or(SynthesisError::AssignmentMissing)
            })
            .unwrap();

            let mut range_checks = RangeChecks::new();
            range_checks.check(&a, 32).unwrap();
            range_checks.finalize(cs).unwrap()
        }

        let mut shape = R1csBuilder::<Fr>::without_witness();
        let mut full = R1csBuilder::<Fr>::new();
        let shape_lookup = synthesize(&mut shape, None);
        let full_lookup = synthesize(&mut full, Some(0xdead_beef));

        assert!(full.is_satisfied());
        assert_eq!(shape_lookup, full_lookup);
        assert_eq!(shape.hash(), full.hash());
    }

    #[test]
    fn test_invalid_bit_width() {
        let mut cs = R1csBuilder::<Fr>::new();
        let a = alloc(&mut cs, "a", 1);

        let mut range_checks = RangeChecks::new();
        assert!(matches!(
            range_checks.check(&a, 0),
            Err(LookupError::InvalidBitWidth { bits: 0, .. })
        ));
        assert!(matches!(
            range_checks.check(&a, Fr::CAPACITY as usize + 1),
            Err(LookupError::InvalidBitWidth { .. })
        ));
        assert!(range_checks.check(&a, Fr::CAPACITY as usize).is_ok());
        assert_eq!(range_checks.len(), 1);
    }

    #[test]
    fn test_collector_finalizes_once() {
        let mut cs = R1csBuilder::<Fr>::new();
        let a = alloc(&mut cs, "a", 5);

        let mut collector = RangeCheckCollector::new();
        collector.check(&a, 3).unwrap();
        assert!(matches!(collector.lookup(), Err(LookupError::NotClosed)));
        assert!(!collector.is_closed());

        let first = collector.finalize(&mut cs).unwrap().clone();
        let constraints = cs.num_constraints();
        let second = collector.finalize(&mut cs).unwrap().clone();

        assert!(collector.is_closed());
        assert_eq!(first, second);
        assert_eq!(cs.num_constraints(), constraints);
        assert_eq!(collector.lookup().unwrap(), &first);
        assert!(matches!(
            collector.check(&a, 3),
            Err(LookupError::AlreadyClosed)
        ));
    }

    #[test]
    fn test_collector_empty_finalize() {
        let mut cs = R1csBuilder::<Fr>::new();
        let mut collector = RangeCheckCollector::<Fr>::new();

        assert!(collector.finalize(&mut cs).unwrap().is_empty());
        assert!(collector.finalize(&mut cs).unwrap().is_empty());
        assert!(matches!(
            collector.check_variable(R1csBuilder::<Fr>::one(), Some(Fr::ONE), 1),
            Err(LookupError::AlreadyClosed)
        ));
    }

    #[test]
    fn test_foreign_variable_poisons_collector() {
        let mut cs = R1csBuilder::<Fr>::new();
        let foreign = Variable::new_unchecked(Index::Aux(42));

        let mut collector = RangeCheckCollector::new();
        collector.check_variable(foreign, Some(Fr::ONE), 8).unwrap();

        assert!(matches!(
            collector.finalize(&mut cs),
            Err(LookupError::UnresolvableVariable(_))
        ));
        assert_eq!(cs.num_constraints(), 0);
        assert!(matches!(collector.lookup(), Err(LookupError::Poisoned)));
        assert!(matches!(collector.finalize(&mut cs), Err(LookupError::Poisoned)));
        assert!(matches!(
            collector.check_variable(foreign, None, 8),
            Err(LookupError::AlreadyClosed)
        ));
    }

    struct Bytes(Vec<u8>);

    impl LookupCircuit<Fr> for Bytes {
        fn synthesize<CS: ConstraintSystem<Fr>>(
            self,
            cs: &mut CS,
            range_checks: &mut RangeChecks<Fr>,
        ) -> Result<()> {
            for (i, byte) in self.0.into_iter().enumerate() {
                let num = AllocatedNum::alloc(cs.namespace(|| format!("byte {}", i)), || {
                    Ok(Fr::from(u64::from(byte)))
                })?;
                range_checks.check(&num, 8)?;
            }

            Ok(())
        }
    }

    #[test]
    fn test_lookup_circuit() {
        let mut cs = R1csBuilder::<Fr>::new();
        let lookup = synthesize_with_lookup(Bytes(vec![0, 1, 0x80, 0xff]), &mut cs).unwrap();

        assert!(cs.is_satisfied());
        assert_eq!(cs.num_constraints(), 4);
        let width = lookup.limb_width().unwrap();
        assert_eq!(width, optimal_limb_width(&[8, 8, 8, 8]));
        assert_eq!(lookup.members().len(), 4 * decomposition_size(8, width));
    }
}
