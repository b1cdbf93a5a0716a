//! The read side of a constraint system: what the range checker and the
//! exporters need from a builder once circuit construction is over.

use bellpepper_core::{LinearCombination, Variable};
use ff::PrimeField;

pub mod r1cs_cs;

/// Index into a builder's interned coefficient table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoeffId(pub usize);

/// One `coefficient * variable` term of a [`LinearExpression`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub variable: Variable,
    pub coeff: CoeffId,
}

/// A linear combination whose coefficients live in the builder's
/// coefficient table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearExpression(pub Vec<Term>);

impl LinearExpression {
    pub fn iter(&self) -> impl Iterator<Item = &Term> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A rank-1 constraint `A * B = C`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct R1c {
    pub a: LinearExpression,
    pub b: LinearExpression,
    pub c: LinearExpression,
}

/// A full assignment: public inputs (starting with the constant one) followed
/// by auxiliary variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<Scalar: PrimeField> {
    pub values: Vec<Scalar>,
    pub num_public: usize,
}

impl<Scalar: PrimeField> Witness<Scalar> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read-only view of a finished constraint system.
pub trait ConstraintSystemView<Scalar: PrimeField> {
    fn constraints(&self) -> &[R1c];
    fn coefficient(&self, id: CoeffId) -> Option<&Scalar>;
    /// Number of public inputs, including the constant one.
    fn num_inputs(&self) -> usize;
    fn num_aux(&self) -> usize;

    fn num_constraints(&self) -> usize {
        self.constraints().len()
    }

    fn num_variables(&self) -> usize {
        self.num_inputs() + self.num_aux()
    }

    /// Flat identifier of `var`: inputs are numbered first, auxiliary
    /// variables follow. `None` if `var` does not belong to this system.
    fn variable_id(&self, var: Variable) -> Option<u64>;

    /// Whether allocations were evaluated, i.e. a witness is available.
    fn has_witness(&self) -> bool;

    /// Whether a variable, constraint or namespace already lives at the
    /// annotation `path`.
    fn contains_path(&self, path: &str) -> bool;
}

/// Builders that can express a linear combination over their own variables
/// as a [`LinearExpression`].
pub trait LinearExpressionResolver<Scalar: PrimeField>: ConstraintSystemView<Scalar> {
    /// Returns `None` if `lc` refers to a variable this builder did not
    /// allocate.
    fn resolve(&mut self, lc: &LinearCombination<Scalar>) -> Option<LinearExpression>;
}
