//! A `ConstraintSystem` that records the shape of a circuit in exportable
//! form and, optionally, its assignment.

use std::collections::HashMap;
use std::fmt::Write;

use bellpepper_core::{ConstraintSystem, Index, LinearCombination, SynthesisError, Variable};
use blake2s_simd::{Params as Blake2sParams, State as Blake2sState};
use byteorder::{BigEndian, ByteOrder};
use ff::PrimeField;

use super::{
    CoeffId, ConstraintSystemView, LinearExpression, LinearExpressionResolver, R1c, Term, Witness,
};

#[derive(Debug)]
enum NamedObject {
    Constraint(usize),
    Var(Variable),
    Namespace,
}

/// Records constraints with interned coefficients, so they can be exported
/// as `(variable, coefficient id)` rows.
#[derive(Debug)]
pub struct R1csBuilder<Scalar: PrimeField> {
    named_objects: HashMap<String, NamedObject>,
    current_namespace: Vec<String>,
    constraints: Vec<R1c>,
    annotations: Vec<String>,
    coefficients: Vec<Scalar>,
    coefficient_ids: HashMap<Vec<u8>, CoeffId>,
    inputs: Vec<String>,
    aux: Vec<String>,
    // `None` when only the shape is recorded.
    input_assignment: Option<Vec<Scalar>>,
    aux_assignment: Option<Vec<Scalar>>,
}

impl<Scalar: PrimeField> Default for R1csBuilder<Scalar> {
    fn default() -> Self {
        Self::with_witness(true)
    }
}

impl<Scalar: PrimeField> R1csBuilder<Scalar> {
    /// A builder which evaluates every allocation and keeps the witness.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder which records the constraint system only. Allocation
    /// closures are never called.
    pub fn without_witness() -> Self {
        Self::with_witness(false)
    }

    fn with_witness(witness: bool) -> Self {
        let mut named_objects = HashMap::new();
        named_objects.insert("ONE".into(), NamedObject::Var(Self::one()));

        R1csBuilder {
            named_objects,
            current_namespace: vec![],
            constraints: vec![],
            annotations: vec![],
            coefficients: vec![],
            coefficient_ids: HashMap::new(),
            inputs: vec![String::from("ONE")],
            aux: vec![],
            input_assignment: witness.then(|| vec![Scalar::ONE]),
            aux_assignment: witness.then(Vec::new),
        }
    }

    /// Annotation path of the `i`-th constraint.
    pub fn annotation(&self, i: usize) -> Option<&str> {
        self.annotations.get(i).map(String::as_str)
    }

    pub fn num_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    /// The full assignment, inputs first.
    pub fn witness(&self) -> Result<Witness<Scalar>, SynthesisError> {
        match (&self.input_assignment, &self.aux_assignment) {
            (Some(inputs), Some(aux)) => Ok(Witness {
                values: inputs.iter().chain(aux.iter()).copied().collect(),
                num_public: inputs.len(),
            }),
            _ => Err(SynthesisError::AssignmentMissing),
        }
    }

    fn intern(&mut self, coeff: Scalar) -> CoeffId {
        let key = coeff.to_repr().as_ref().to_vec();
        if let Some(id) = self.coefficient_ids.get(&key) {
            return *id;
        }
        let id = CoeffId(self.coefficients.len());
        self.coefficients.push(coeff);
        self.coefficient_ids.insert(key, id);
        id
    }

    fn intern_lc(&mut self, lc: &LinearCombination<Scalar>) -> LinearExpression {
        let mut terms = Vec::with_capacity(lc.len());
        for (variable, coeff) in lc.iter() {
            // Cancelled terms are dropped to normalize the row.
            if coeff.is_zero().into() {
                continue;
            }
            let coeff = self.intern(*coeff);
            terms.push(Term { variable, coeff });
        }

        LinearExpression(terms)
    }

    fn value(&self, var: Variable) -> Option<Scalar> {
        match var.get_unchecked() {
            Index::Input(i) => self.input_assignment.as_ref()?.get(i).copied(),
            Index::Aux(i) => self.aux_assignment.as_ref()?.get(i).copied(),
        }
    }

    fn eval(&self, terms: &LinearExpression) -> Option<Scalar> {
        let mut acc = Scalar::ZERO;
        for term in terms.iter() {
            let value = self.value(term.variable)?;
            acc += value * self.coefficients.get(term.coeff.0)?;
        }

        Some(acc)
    }

    /// Path of the first unsatisfied constraint. Constraints that cannot be
    /// evaluated, because there is no witness, count as unsatisfied.
    pub fn which_is_unsatisfied(&self) -> Option<&str> {
        for (constraint, path) in self.constraints.iter().zip(self.annotations.iter()) {
            let satisfied = match (
                self.eval(&constraint.a),
                self.eval(&constraint.b),
                self.eval(&constraint.c),
            ) {
                (Some(a), Some(b), Some(c)) => a * b == c,
                _ => false,
            };

            if !satisfied {
                return Some(path.as_str());
            }
        }

        None
    }

    pub fn is_satisfied(&self) -> bool {
        self.which_is_unsatisfied().is_none()
    }

    /// Overrides the assigned value of the variable at `path`.
    pub fn set(&mut self, path: &str, to: Scalar) {
        let var = match self.named_objects.get(path) {
            Some(NamedObject::Var(v)) => *v,
            Some(e) => panic!(
                "tried to set path `{}` to value, but `{:?}` already exists there.",
                path, e
            ),
            None => panic!("no variable exists at path: {}", path),
        };
        let slot = match var.get_unchecked() {
            Index::Input(i) => self.input_assignment.as_mut().and_then(|v| v.get_mut(i)),
            Index::Aux(i) => self.aux_assignment.as_mut().and_then(|v| v.get_mut(i)),
        };
        match slot {
            Some(slot) => *slot = to,
            None => panic!("no assignment recorded for path: {}", path),
        }
    }

    pub fn get(&self, path: &str) -> Option<Scalar> {
        match self.named_objects.get(path) {
            Some(NamedObject::Var(v)) => self.value(*v),
            _ => None,
        }
    }

    pub fn pretty_print(&self) -> String {
        let mut s = String::new();

        let pp = |s: &mut String, lc: &LinearExpression| {
            s.push('(');
            for (i, term) in lc.iter().enumerate() {
                if i > 0 {
                    s.push_str(" + ");
                }
                if let Some(coeff) = self.coefficients.get(term.coeff.0) {
                    if *coeff != Scalar::ONE {
                        let _ = write!(s, "{:?} . ", coeff);
                    }
                }
                let _ = match term.variable.get_unchecked() {
                    Index::Input(i) => write!(s, "`{}`", self.inputs[i]),
                    Index::Aux(i) => write!(s, "`{}`", self.aux[i]),
                };
            }
            if lc.is_empty() {
                s.push('0');
            }
            s.push(')');
        };

        for (constraint, name) in self.constraints.iter().zip(self.annotations.iter()) {
            s.push('\n');
            let _ = write!(s, "{}: ", name);
            pp(&mut s, &constraint.a);
            s.push_str(" * ");
            pp(&mut s, &constraint.b);
            s.push_str(" = ");
            pp(&mut s, &constraint.c);
        }
        s.push('\n');

        s
    }

    /// BLAKE2s digest of the constraint system shape, hex encoded. Two
    /// syntheses of the same circuit hash equally whether or not they carried
    /// a witness.
    pub fn hash(&self) -> String {
        let mut h = Blake2sParams::new().hash_length(32).to_state();
        {
            let mut buf = [0u8; 24];

            BigEndian::write_u64(&mut buf[0..8], self.inputs.len() as u64);
            BigEndian::write_u64(&mut buf[8..16], self.aux.len() as u64);
            BigEndian::write_u64(&mut buf[16..24], self.constraints.len() as u64);
            h.update(&buf);
        }

        for constraint in &self.constraints {
            self.hash_expression(&constraint.a, &mut h);
            self.hash_expression(&constraint.b, &mut h);
            self.hash_expression(&constraint.c, &mut h);
        }

        let mut s = String::new();
        for b in h.finalize().as_ref() {
            let _ = write!(s, "{:02x}", b);
        }

        s
    }

    fn hash_expression(&self, terms: &LinearExpression, h: &mut Blake2sState) {
        let mut buf = [0u8; 9];
        BigEndian::write_u64(&mut buf[0..8], terms.len() as u64);
        h.update(&buf[0..8]);

        for term in terms.iter() {
            match term.variable.get_unchecked() {
                Index::Input(i) => {
                    buf[0] = b'I';
                    BigEndian::write_u64(&mut buf[1..9], i as u64);
                }
                Index::Aux(i) => {
                    buf[0] = b'A';
                    BigEndian::write_u64(&mut buf[1..9], i as u64);
                }
            }
            h.update(&buf);

            if let Some(coeff) = self.coefficients.get(term.coeff.0) {
                // Write as big-endian bytes.
                let mut bytes = coeff.to_repr();
                bytes.as_mut().reverse();
                h.update(bytes.as_ref());
            }
        }
    }

    fn set_named_obj(&mut self, path: String, to: NamedObject) {
        if self.named_objects.contains_key(&path) {
            panic!("tried to create object at existing path: {}", path);
        }

        self.named_objects.insert(path, to);
    }
}

impl<Scalar: PrimeField> ConstraintSystemView<Scalar> for R1csBuilder<Scalar> {
    fn constraints(&self) -> &[R1c] {
        &self.constraints
    }

    fn coefficient(&self, id: CoeffId) -> Option<&Scalar> {
        self.coefficients.get(id.0)
    }

    fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn num_aux(&self) -> usize {
        self.aux.len()
    }

    fn variable_id(&self, var: Variable) -> Option<u64> {
        match var.get_unchecked() {
            Index::Input(i) if i < self.inputs.len() => Some(i as u64),
            Index::Aux(i) if i < self.aux.len() => Some((self.inputs.len() + i) as u64),
            _ => None,
        }
    }

    fn has_witness(&self) -> bool {
        self.input_assignment.is_some()
    }

    fn contains_path(&self, path: &str) -> bool {
        self.named_objects.contains_key(path)
    }
}

impl<Scalar: PrimeField> LinearExpressionResolver<Scalar> for R1csBuilder<Scalar> {
    fn resolve(&mut self, lc: &LinearCombination<Scalar>) -> Option<LinearExpression> {
        if lc.iter().any(|(var, _)| self.variable_id(var).is_none()) {
            return None;
        }

        Some(self.intern_lc(lc))
    }
}

impl<Scalar: PrimeField> ConstraintSystem<Scalar> for R1csBuilder<Scalar> {
    type Root = Self;

    fn new() -> Self {
        R1csBuilder::default()
    }

    fn alloc<F, A, AR>(&mut self, annotation: A, f: F) -> Result<Variable, SynthesisError>
    where
        F: FnOnce() -> Result<Scalar, SynthesisError>,
        A: FnOnce() -> AR,
        AR: Into<String>,
    {
        if let Some(aux) = self.aux_assignment.as_mut() {
            aux.push(f()?);
        }
        let path = compute_path(&self.current_namespace, &annotation().into());
        let var = Variable::new_unchecked(Index::Aux(self.aux.len()));
        self.set_named_obj(path.clone(), NamedObject::Var(var));
        self.aux.push(path);

        Ok(var)
    }

    fn alloc_input<F, A, AR>(&mut self, annotation: A, f: F) -> Result<Variable, SynthesisError>
    where
        F: FnOnce() -> Result<Scalar, SynthesisError>,
        A: FnOnce() -> AR,
        AR: Into<String>,
    {
        if let Some(inputs) = self.input_assignment.as_mut() {
            inputs.push(f()?);
        }
        let path = compute_path(&self.current_namespace, &annotation().into());
        let var = Variable::new_unchecked(Index::Input(self.inputs.len()));
        self.set_named_obj(path.clone(), NamedObject::Var(var));
        self.inputs.push(path);

        Ok(var)
    }

    fn enforce<A, AR, LA, LB, LC>(&mut self, annotation: A, a: LA, b: LB, c: LC)
    where
        A: FnOnce() -> AR,
        AR: Into<String>,
        LA: FnOnce(LinearCombination<Scalar>) -> LinearCombination<Scalar>,
        LB: FnOnce(LinearCombination<Scalar>) -> LinearCombination<Scalar>,
        LC: FnOnce(LinearCombination<Scalar>) -> LinearCombination<Scalar>,
    {
        let path = compute_path(&self.current_namespace, &annotation().into());
        let index = self.constraints.len();
        self.set_named_obj(path.clone(), NamedObject::Constraint(index));

        let a = self.intern_lc(&a(LinearCombination::zero()));
        let b = self.intern_lc(&b(LinearCombination::zero()));
        let c = self.intern_lc(&c(LinearCombination::zero()));

        self.constraints.push(R1c { a, b, c });
        self.annotations.push(path);
    }

    fn push_namespace<NR, N>(&mut self, name_fn: N)
    where
        NR: Into<String>,
        N: FnOnce() -> NR,
    {
        let name = name_fn().into();
        let path = compute_path(&self.current_namespace, &name);
        self.set_named_obj(path, NamedObject::Namespace);
        self.current_namespace.push(name);
    }

    fn pop_namespace(&mut self) {
        assert!(self.current_namespace.pop().is_some());
    }

    fn get_root(&mut self) -> &mut Self::Root {
        self
    }
}

fn compute_path(ns: &[String], this: &str) -> String {
    if this.chars().any(|a| a == '/') {
        panic!("'/' is not allowed in names");
    }

    let mut name = ns.join("/");
    if !name.is_empty() {
        name.push('/');
    }
    name.push_str(this);

    name
}
