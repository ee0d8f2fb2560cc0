//! Generators for homogeneous sequences of values.

use crate::error::{ConfigError, DomainError};
use crate::generator::{Generator, SharedGenerator, ensure_contains, shared};
use crate::rng::RandomSource;
use crate::shrink::Shrinks;
use crate::tuple::TupleGenerator;
use crate::value::GeneratedValue;

/// Fixed-length sequences of values from one element generator.
///
/// Shrinks like a tuple of `length` copies of the element generator.
#[derive(Debug, Clone)]
pub struct VectorGenerator {
    tuple: TupleGenerator,
}

impl VectorGenerator {
    /// Create a generator of sequences of exactly `length` elements
    pub fn new<G: Generator + 'static>(length: usize, element: G) -> Self {
        let element = shared(element);
        let generators = std::iter::repeat_n(element, length).collect();
        Self {
            tuple: TupleGenerator::from_generators(generators).labelled("vector"),
        }
    }

    /// Number of elements in every generated sequence
    pub fn len(&self) -> usize {
        self.tuple.arity()
    }

    /// Whether generated sequences are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Generator for VectorGenerator {
    fn name(&self) -> &'static str {
        self.tuple.name()
    }

    fn generate(&self, size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        self.tuple.generate(size, rand)
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        self.tuple.contains(value)
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        self.tuple.shrink(value)
    }
}

/// Variable-length sequences of values from one element generator
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    element: SharedGenerator,
    min_length: usize,
    max_length: Option<usize>,
}

impl SequenceGenerator {
    /// Sequences whose length is drawn from `[0, size]`
    pub fn new<G: Generator + 'static>(element: G) -> Self {
        Self {
            element: shared(element),
            min_length: 0,
            max_length: None,
        }
    }

    /// Restrict lengths to `[min_length, max_length]`
    pub fn with_length(mut self, min_length: usize, max_length: usize) -> Result<Self, ConfigError> {
        if min_length > max_length {
            return Err(ConfigError::InvalidLength {
                min: min_length,
                max: max_length,
            });
        }
        self.min_length = min_length;
        self.max_length = Some(max_length);
        Ok(self)
    }

    fn allows_length(&self, length: usize) -> bool {
        length >= self.min_length && self.max_length.is_none_or(|max| length <= max)
    }
}

impl Generator for SequenceGenerator {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn generate(&self, size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        let upper = self
            .max_length
            .map_or(size, |max| max.min(size))
            .max(self.min_length);
        let span = ((upper - self.min_length) as u64).saturating_add(1);
        let length = self.min_length + rand.below(span) as usize;

        let elements = (0..length)
            .map(|_| self.element.generate(size, rand))
            .collect();
        GeneratedValue::from_elements(elements, self.name())
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        let Some(items) = value.value().as_seq() else {
            return false;
        };
        self.allows_length(items.len())
            && items
                .iter()
                .all(|item| self.element.contains(&GeneratedValue::from_value(item.clone())))
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        ensure_contains(self, value)?;
        let elements = value
            .elements()
            .ok_or_else(|| DomainError::new(self.name(), value.value()))?;
        let mut candidates = Vec::new();

        // Remove one element, starting from the end
        if elements.len() > self.min_length {
            for index in (0..elements.len()).rev() {
                let mut shorter = elements.to_vec();
                shorter.remove(index);
                candidates.push(GeneratedValue::from_elements(shorter, self.name()));
            }
        }

        // Shrink exactly one element
        for (index, element) in elements.iter().enumerate() {
            for option in self.element.shrink(element)? {
                let mut replaced = elements.to_vec();
                replaced[index] = option;
                candidates.push(GeneratedValue::from_elements(replaced, self.name()));
            }
        }

        Ok(Shrinks::from_vec(candidates))
    }
}
