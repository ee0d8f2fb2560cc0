//! Core generator contract and the constant generator.

use std::fmt;
use std::sync::Arc;

use crate::error::DomainError;
use crate::rng::RandomSource;
use crate::shrink::Shrinks;
use crate::value::{GeneratedValue, Value};

/// Contract implemented by every generator.
///
/// A generator describes a domain of values. It can produce a random member
/// of that domain, decide whether a value belongs to it, and propose simpler
/// members of the domain starting from a given one.
pub trait Generator: fmt::Debug + Send + Sync {
    /// Label stamped on every value this generator produces
    fn name(&self) -> &'static str;

    /// Produce one value. `size` scales the range or length of the result;
    /// generators are free to ignore it.
    fn generate(&self, size: usize, rand: &mut dyn RandomSource) -> GeneratedValue;

    /// Whether `value` could have been produced by this generator
    fn contains(&self, value: &GeneratedValue) -> bool;

    /// Propose strictly simpler values of the domain, simplest first.
    ///
    /// Fails with [`DomainError`] when `value` is not contained.
    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError>;
}

/// Type-erased generator that can be shared between combinators and threads
pub type SharedGenerator = Arc<dyn Generator>;

/// Erase the concrete type of a generator
pub fn shared<G: Generator + 'static>(generator: G) -> SharedGenerator {
    Arc::new(generator)
}

impl<G: Generator + ?Sized> Generator for Arc<G> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn generate(&self, size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        (**self).generate(size, rand)
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        (**self).contains(value)
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        (**self).shrink(value)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn generate(&self, size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        (**self).generate(size, rand)
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        (**self).contains(value)
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        (**self).shrink(value)
    }
}

/// Reject values outside the generator's domain before shrinking them
pub(crate) fn ensure_contains<G: Generator + ?Sized>(
    generator: &G,
    value: &GeneratedValue,
) -> Result<(), DomainError> {
    if generator.contains(value) {
        Ok(())
    } else {
        tracing::warn!(
            generator = generator.name(),
            value = %value,
            "shrink requested for a value outside the domain"
        );
        Err(DomainError::new(generator.name(), value.value()))
    }
}

/// A generator whose domain is exactly one value
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantGenerator {
    value: Value,
}

impl ConstantGenerator {
    /// Create a new constant generator
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The fixed value
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Generator for ConstantGenerator {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn generate(&self, _size: usize, _rand: &mut dyn RandomSource) -> GeneratedValue {
        GeneratedValue::from_value(self.value.clone()).with_origin(self.name())
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        value.value() == &self.value
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        ensure_contains(self, value)?;
        // A constant value cannot be shrunk
        Ok(Shrinks::none())
    }
}
