//! Fixed-arity tuple combinator and its combinatorial shrink search.
//!
//! Shrinking a tuple delegates to the element generators and then combines
//! their options: for every non-empty subset of the elements that can shrink,
//! and for every choice of one option per element in that subset, one
//! candidate tuple is produced with the remaining elements left untouched.
//! With `k` shrinkable elements that is up to `2^k - 1` subsets, so the
//! candidates are enumerated lazily by [`TupleShrinks`].

use std::sync::Arc;

use crate::error::DomainError;
use crate::generator::{ConstantGenerator, Generator, SharedGenerator, ensure_contains, shared};
use crate::rng::RandomSource;
use crate::shrink::Shrinks;
use crate::value::{GeneratedValue, Value};

/// One entry of a tuple description: a generator or a bare value.
///
/// Bare values are wrapped in a [`ConstantGenerator`] when the tuple is built.
#[derive(Debug, Clone)]
pub enum Element {
    Generator(SharedGenerator),
    Value(Value),
}

impl Element {
    fn into_generator(self) -> SharedGenerator {
        match self {
            Element::Generator(generator) => generator,
            Element::Value(value) => shared(ConstantGenerator::new(value)),
        }
    }
}

impl<G: Generator + 'static> From<G> for Element {
    fn from(generator: G) -> Self {
        Element::Generator(shared(generator))
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Element::Value(value)
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Element::Value(value.into())
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Element::Value(value.into())
    }
}

impl From<i32> for Element {
    fn from(value: i32) -> Self {
        Element::Value(value.into())
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element::Value(value.into())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Element::Value(value.into())
    }
}

/// Generator of fixed-length sequences, one element generator per position
#[derive(Debug, Clone)]
pub struct TupleGenerator {
    generators: Vec<SharedGenerator>,
    label: &'static str,
}

impl TupleGenerator {
    /// Build a tuple from generators and bare values
    pub fn new<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        Self::from_generators(
            elements
                .into_iter()
                .map(|element| element.into().into_generator())
                .collect(),
        )
    }

    /// Build a tuple from already shared generators
    pub fn from_generators(generators: Vec<SharedGenerator>) -> Self {
        Self {
            generators,
            label: "tuple",
        }
    }

    /// Stamp produced values and candidates with `label` instead of `tuple`
    pub(crate) fn labelled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Number of elements
    pub fn arity(&self) -> usize {
        self.generators.len()
    }
}

impl Generator for TupleGenerator {
    fn name(&self) -> &'static str {
        self.label
    }

    fn generate(&self, size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        let elements = self
            .generators
            .iter()
            .map(|generator| generator.generate(size, rand))
            .collect();
        GeneratedValue::from_elements(elements, self.label)
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        let Some(items) = value.value().as_seq() else {
            return false;
        };
        items.len() == self.generators.len()
            && self
                .generators
                .iter()
                .zip(items)
                .all(|(generator, item)| {
                    generator.contains(&GeneratedValue::from_value(item.clone()))
                })
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        ensure_contains(self, value)?;
        let elements = value
            .elements()
            .ok_or_else(|| DomainError::new(self.label, value.value()))?;

        let mut options = Vec::new();
        for (index, (generator, element)) in self.generators.iter().zip(elements.iter()).enumerate()
        {
            let shrunk: Vec<GeneratedValue> = generator.shrink(element)?.collect();
            if !shrunk.is_empty() {
                options.push(ElementOptions {
                    index,
                    candidates: shrunk,
                });
            }
        }

        tracing::trace!(
            generator = self.label,
            arity = self.generators.len(),
            shrinkable = options.len(),
            "enumerating tuple shrink candidates"
        );

        Ok(Shrinks::tuple(TupleShrinks::new(
            elements.into_owned(),
            options,
            self.label,
        )))
    }
}

/// Build a [`TupleGenerator`] from a mix of generators and bare values.
///
/// ```rust
/// use shrinkwrap::{IntegerGenerator, tuple};
///
/// let pair = tuple![IntegerGenerator::sized(), 42];
/// assert_eq!(pair.arity(), 2);
/// ```
#[macro_export]
macro_rules! tuple {
    ($($element:expr),* $(,)?) => {
        $crate::TupleGenerator::new(::std::vec::Vec::<$crate::Element>::from([
            $($crate::Element::from($element)),*
        ]))
    };
}

#[derive(Debug)]
struct ElementOptions {
    index: usize,
    candidates: Vec<GeneratedValue>,
}

/// Lazy enumeration of the candidates of one tuple shrink.
///
/// Subsets of the shrinkable positions are visited by increasing size, so
/// candidates changing a single element come first. Within a subset the
/// chosen options advance like the digits of a mixed-radix counter.
#[derive(Debug, Clone)]
pub struct TupleShrinks {
    originals: Arc<[GeneratedValue]>,
    options: Arc<[ElementOptions]>,
    label: &'static str,
    /// Bitmask over `options` of the positions being replaced; 0 when done
    subset: u64,
    /// Option index per position in `options`; only set bits are used
    choice: Vec<usize>,
    remaining: Option<usize>,
}

impl TupleShrinks {
    /// Positions beyond this many shrinkable elements are left untouched
    const MAX_SHRINKABLE: usize = 63;

    fn new(
        originals: Vec<GeneratedValue>,
        mut options: Vec<ElementOptions>,
        label: &'static str,
    ) -> Self {
        options.truncate(Self::MAX_SHRINKABLE);
        // Every element either keeps its value or takes one of its options
        let remaining = options
            .iter()
            .try_fold(1usize, |total, o| total.checked_mul(o.candidates.len() + 1))
            .map(|total| total - 1);
        let choice = vec![0; options.len()];
        let subset = if options.is_empty() { 0 } else { 1 };
        Self {
            originals: originals.into(),
            options: options.into(),
            label,
            subset,
            choice,
            remaining,
        }
    }

    fn limit(&self) -> u64 {
        1u64 << self.options.len()
    }

    fn build(&self) -> GeneratedValue {
        let mut elements = self.originals.to_vec();
        for (bit, option) in self.options.iter().enumerate() {
            if self.subset & (1 << bit) != 0 {
                elements[option.index] = option.candidates[self.choice[bit]].clone();
            }
        }
        GeneratedValue::from_elements(elements, self.label)
    }

    /// Move to the next option choice, or the next subset once exhausted
    fn advance(&mut self) {
        for bit in 0..self.options.len() {
            if self.subset & (1 << bit) == 0 {
                continue;
            }
            self.choice[bit] += 1;
            if self.choice[bit] < self.options[bit].candidates.len() {
                return;
            }
            self.choice[bit] = 0;
        }
        self.subset = next_subset(self.subset, self.limit());
    }
}

/// Next bitmask below `limit`: same population count in increasing order,
/// then the smallest mask with one more bit set. Returns 0 when exhausted.
fn next_subset(subset: u64, limit: u64) -> u64 {
    // Gosper's hack
    let lowest = subset & subset.wrapping_neg();
    let ripple = subset.wrapping_add(lowest);
    let next = if ripple == 0 {
        0
    } else {
        ripple | (((subset ^ ripple) >> 2) / lowest)
    };
    if next != 0 && next < limit {
        return next;
    }
    let ones = subset.count_ones() + 1;
    let wider = if ones >= 64 { u64::MAX } else { (1u64 << ones) - 1 };
    if wider < limit { wider } else { 0 }
}

impl Iterator for TupleShrinks {
    type Item = GeneratedValue;

    fn next(&mut self) -> Option<GeneratedValue> {
        if self.subset == 0 {
            return None;
        }
        let candidate = self.build();
        self.advance();
        self.remaining = self.remaining.map(|r| r.saturating_sub(1));
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (0, None),
        }
    }
}
