//! Validation results that accumulate every error.
//!
//! The upload pipeline validates many independent inputs and has to
//! report all of their problems in one pass, so the error side of a
//! result is an ordered list of messages rather than a single failure.
//! `Result::map` and `Result::and_then` already cover chaining; the
//! combinators here add what std does not have: converting foreign
//! faults into messages ([`attempt`]), running pure checks
//! ([`validated`]), combining independent results while keeping every
//! error ([`All`]), and picking the first success among alternatives
//! ([`first_ok`]).

use std::fmt;

/// Ordered list of human-readable validation messages.
///
/// Insertion order is preserved and duplicates are kept, so an
/// aggregated report reads in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors(Vec<String>);

/// Result of a validation step: a value, or every message explaining
/// why there is none.
pub type Validated<T> = Result<T, Errors>;

impl Errors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A single-message error.
    pub fn one(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Appends all of `other`'s messages after the existing ones.
    pub fn merge(&mut self, other: Errors) {
        self.0.extend(other.0);
    }

    /// [`Errors::merge`] for builder-style call sites.
    pub fn merged(mut self, other: Errors) -> Self {
        self.merge(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Errors {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

impl std::error::Error for Errors {}

/// Runs a fallible operation, converting a fault into the validation
/// domain via `describe`. This is the only place foreign error types
/// cross into [`Errors`]; nothing propagates past it uncaught.
pub fn attempt<T, E, F, D>(op: F, describe: D) -> Validated<T>
where
    F: FnOnce() -> Result<T, E>,
    D: FnOnce(&E) -> String,
{
    op().map_err(|e| Errors::one(describe(&e)))
}

/// [`attempt`] for operations that must be awaited, like file reads.
pub async fn attempt_future<T, E, Fut, D>(fut: Fut, describe: D) -> Validated<T>
where
    Fut: std::future::Future<Output = Result<T, E>>,
    D: FnOnce(&E) -> String,
{
    fut.await.map_err(|e| Errors::one(describe(&e)))
}

/// Runs a pure check against `value`; any messages fail the result,
/// all of them kept in the order the check produced them.
pub fn validated<T, C>(value: T, check: C) -> Validated<T>
where
    C: FnOnce(&T) -> Vec<String>,
{
    let messages = check(&value);
    if messages.is_empty() {
        Ok(value)
    } else {
        Err(Errors::from(messages))
    }
}

pub trait ValidatedExt<T> {
    /// Runs a pure check on the `Ok` value. An existing error passes
    /// through unchanged and the check does not run.
    fn checked<C>(self, check: C) -> Validated<T>
    where
        C: FnOnce(&T) -> Vec<String>;
}

impl<T> ValidatedExt<T> for Validated<T> {
    fn checked<C>(self, check: C) -> Validated<T>
    where
        C: FnOnce(&T) -> Vec<String>,
    {
        self.and_then(|value| validated(value, check))
    }
}

/// First success among ordered alternatives.
///
/// Scans left to right and returns the first `Ok`, so earlier
/// alternatives take priority. When every alternative fails, the error
/// leads with `exhausted()` followed by each alternative's own
/// messages in scan order, keeping the full diagnosis available.
pub fn first_ok<T, I>(alternatives: I, exhausted: impl FnOnce() -> String) -> Validated<T>
where
    I: IntoIterator<Item = Validated<T>>,
{
    let mut collected = Errors::new();
    for alternative in alternatives {
        match alternative {
            Ok(value) => return Ok(value),
            Err(errors) => collected.merge(errors),
        }
    }
    Err(Errors::one(exhausted()).merged(collected))
}

/// Combines independent results into one.
///
/// Succeeds only when every element is `Ok`; otherwise the error
/// carries every failing element's messages in input order. This is
/// what keeps multi-field validation from stopping at the first
/// problem.
pub trait All {
    type Values;

    fn all(self) -> Validated<Self::Values>;
}

macro_rules! impl_all {
    ($(($ty:ident, $value:ident)),+) => {
        impl<$($ty),+> All for ($(Validated<$ty>,)+) {
            type Values = ($($ty,)+);

            fn all(self) -> Validated<Self::Values> {
                let ($($value,)+) = self;
                match ($($value,)+) {
                    ($(Ok($value),)+) => Ok(($($value,)+)),
                    ($($value,)+) => {
                        let mut errors = Errors::new();
                        $(
                            if let Err(e) = $value {
                                errors.merge(e);
                            }
                        )+
                        Err(errors)
                    }
                }
            }
        }
    };
}

impl_all!((A, a), (B, b));
impl_all!((A, a), (B, b), (C, c));
impl_all!((A, a), (B, b), (C, c), (D, d));
impl_all!((A, a), (B, b), (C, c), (D, d), (E, e));
