use std::io;

use bellpepper_core::SynthesisError;

/// Errors raised while collecting range checks or exporting a finished
/// constraint system.
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    /// A range check was requested after the collector was finalized, or the
    /// constraint system already holds a finalized batch.
    #[error("range checker already closed")]
    AlreadyClosed,
    /// The lookup was requested before the collector was finalized.
    #[error("range checker is not closed")]
    NotClosed,
    /// A previous finalization failed; the collector holds no lookup.
    #[error("range checker was poisoned by a failed finalization")]
    Poisoned,
    /// The decomposition hint was asked for the wrong number of limbs.
    #[error("need {expected} outputs to decompose, got {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("invalid decomposition hint input: {0}")]
    InvalidHintInput(String),
    #[error("cannot range check {bits} bits in a field of capacity {capacity}")]
    InvalidBitWidth { bits: usize, capacity: u32 },
    /// The witness does not belong to the exported constraint system.
    #[error("witness does not match constraint system: {0}")]
    WitnessMismatch(String),
    /// A canonical field element was not strictly below the modulus.
    #[error("field element out of range: {0}")]
    FieldElementOutOfRange(String),
    /// The field does not fit the 4x64-bit canonical layout.
    #[error("field of {0} bits does not fit in 4 limbs")]
    UnsupportedField(u32),
    /// A value or coefficient could not be resolved by the builder.
    #[error("unresolvable variable: {0}")]
    UnresolvableVariable(String),
    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("encountered an I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("encountered a JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
