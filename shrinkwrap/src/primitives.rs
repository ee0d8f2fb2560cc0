//! Generators for scalar values.

use crate::error::{ConfigError, DomainError};
use crate::generator::{Generator, ensure_contains};
use crate::rng::RandomSource;
use crate::shrink::Shrinks;
use crate::value::{GeneratedValue, Value};

/// Generator for boolean values
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanGenerator;

impl Generator for BooleanGenerator {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn generate(&self, _size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        GeneratedValue::from_value(rand.below(2) == 1).with_origin(self.name())
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        value.value().as_bool().is_some()
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        ensure_contains(self, value)?;
        // false is the minimal element
        if value.value() == &Value::Bool(true) {
            Ok(Shrinks::one(
                GeneratedValue::from_value(false).with_origin(self.name()),
            ))
        } else {
            Ok(Shrinks::none())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntegerRange {
    /// Every integer; generation draws from `[-size, size]`
    Sized,
    /// Inclusive bounds; generation ignores size
    Bounded { min: i64, max: i64 },
}

/// Generator for integers, either size-scaled or bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerGenerator {
    range: IntegerRange,
}

impl IntegerGenerator {
    /// Any integer, drawn from `[-size, size]`
    pub fn sized() -> Self {
        Self {
            range: IntegerRange::Sized,
        }
    }

    /// Integers in the inclusive range `[min, max]`
    pub fn choose(min: i64, max: i64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidRange { min, max });
        }
        Ok(Self {
            range: IntegerRange::Bounded { min, max },
        })
    }

    /// The value shrinking moves towards: zero, or the bound nearest to it
    pub fn target(&self) -> i64 {
        match self.range {
            IntegerRange::Sized => 0,
            IntegerRange::Bounded { min, .. } if min > 0 => min,
            IntegerRange::Bounded { max, .. } if max < 0 => max,
            IntegerRange::Bounded { .. } => 0,
        }
    }

    fn in_range(&self, x: i64) -> bool {
        match self.range {
            IntegerRange::Sized => true,
            IntegerRange::Bounded { min, max } => (min..=max).contains(&x),
        }
    }
}

impl Default for IntegerGenerator {
    fn default() -> Self {
        Self::sized()
    }
}

impl Generator for IntegerGenerator {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn generate(&self, size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        let x = match self.range {
            IntegerRange::Sized => {
                let bound = i64::try_from(size).unwrap_or(i64::MAX);
                rand.between(-bound, bound)
            }
            IntegerRange::Bounded { min, max } => rand.between(min, max),
        };
        GeneratedValue::from_value(x).with_origin(self.name())
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        value.value().as_int().is_some_and(|x| self.in_range(x))
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        ensure_contains(self, value)?;
        let Some(x) = value.value().as_int() else {
            return Ok(Shrinks::none());
        };
        let target = self.target();
        if x == target {
            return Ok(Shrinks::none());
        }

        // Target first, then x minus 1/2, 1/4, ... of the distance to it
        let x = x as i128;
        let distance = x - target as i128;
        let mut candidates = vec![target as i128];
        let mut step = distance / 2;
        while step != 0 {
            candidates.push(x - step);
            step /= 2;
        }

        Ok(candidates
            .into_iter()
            .map(|c| GeneratedValue::from_value(c as i64).with_origin(self.name()))
            .collect())
    }
}

/// Generator for strings over an inclusive character range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringGenerator {
    lo: char,
    hi: char,
}

impl StringGenerator {
    /// Strings of printable ASCII characters
    pub fn new() -> Self {
        Self { lo: ' ', hi: '~' }
    }

    /// Strings of characters in `[lo, hi]`
    pub fn with_chars(lo: char, hi: char) -> Result<Self, ConfigError> {
        if lo > hi {
            return Err(ConfigError::InvalidCharRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    fn allows(&self, c: char) -> bool {
        (self.lo..=self.hi).contains(&c)
    }

    fn draw_char(&self, rand: &mut dyn RandomSource) -> char {
        let span = self.hi as u64 - self.lo as u64 + 1;
        let code = self.lo as u64 + rand.below(span);
        // Codes inside the surrogate block are not chars
        u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(self.lo)
    }
}

impl Default for StringGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for StringGenerator {
    fn name(&self) -> &'static str {
        "string"
    }

    fn generate(&self, size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        let length = rand.below((size as u64).saturating_add(1));
        let s: String = (0..length).map(|_| self.draw_char(rand)).collect();
        GeneratedValue::from_value(s).with_origin(self.name())
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        value
            .value()
            .as_str()
            .is_some_and(|s| s.chars().all(|c| self.allows(c)))
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        ensure_contains(self, value)?;
        let s = value.value().as_str().unwrap_or_default();

        // Drop the last character
        let mut chars = s.chars();
        if chars.next_back().is_none() {
            return Ok(Shrinks::none());
        }
        Ok(Shrinks::one(
            GeneratedValue::from_value(chars.as_str()).with_origin(self.name()),
        ))
    }
}

/// Generator choosing among a fixed list of values.
///
/// Earlier entries count as simpler: shrinking proposes every entry listed
/// before the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementsGenerator {
    values: Vec<Value>,
}

impl ElementsGenerator {
    /// Create a generator over `values`, which must not be empty
    pub fn new<I, V>(values: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(ConfigError::EmptyElements);
        }
        Ok(Self { values })
    }

    fn position(&self, value: &Value) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

impl Generator for ElementsGenerator {
    fn name(&self) -> &'static str {
        "elements"
    }

    fn generate(&self, _size: usize, rand: &mut dyn RandomSource) -> GeneratedValue {
        let index = rand.below(self.values.len() as u64) as usize;
        GeneratedValue::from_value(self.values[index].clone()).with_origin(self.name())
    }

    fn contains(&self, value: &GeneratedValue) -> bool {
        self.position(value.value()).is_some()
    }

    fn shrink(&self, value: &GeneratedValue) -> Result<Shrinks, DomainError> {
        ensure_contains(self, value)?;
        let index = self.position(value.value()).unwrap_or(0);
        Ok(self.values[..index]
            .iter()
            .map(|v| GeneratedValue::from_value(v.clone()).with_origin(self.name()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, create_seeded_source};

    fn ints(shrinks: Shrinks) -> Vec<i64> {
        shrinks.map(|c| c.value().as_int().unwrap()).collect()
    }

    #[test]
    fn test_boolean_generator() {
        let generator = BooleanGenerator;
        let mut source = ScriptedSource::new(vec![0, 1]);

        let first = generator.generate(0, &mut source);
        let second = generator.generate(10, &mut source);
        assert_eq!(first.value(), &Value::Bool(false));
        assert_eq!(second.value(), &Value::Bool(true));
        assert_eq!(second.origin(), Some("boolean"));
        assert!(generator.contains(&first));
        assert!(generator.contains(&second));
    }

    #[test]
    fn test_boolean_shrinks_to_false() {
        let generator = BooleanGenerator;

        let shrunk: Vec<_> = generator
            .shrink(&GeneratedValue::from_value(true))
            .unwrap()
            .collect();
        assert_eq!(shrunk.len(), 1);
        assert_eq!(shrunk[0].value(), &Value::Bool(false));

        assert_eq!(
            generator
                .shrink(&GeneratedValue::from_value(false))
                .unwrap()
                .count(),
            0
        );
    }

    #[test]
    fn test_boolean_rejects_non_booleans() {
        let error = BooleanGenerator
            .shrink(&GeneratedValue::from_value(10))
            .unwrap_err();
        assert_eq!(error.generator, "boolean");
    }

    #[test]
    fn test_sized_integer_generation() {
        let generator = IntegerGenerator::sized();
        let mut source = create_seeded_source(42);

        for size in 0..50 {
            let x = generator.generate(size, &mut source).value().as_int().unwrap();
            assert!(x.unsigned_abs() <= size as u64);
        }
        assert_eq!(
            generator.generate(0, &mut source).value(),
            &Value::Int(0)
        );
    }

    #[test]
    fn test_bounded_integer_generation_ignores_size() {
        let generator = IntegerGenerator::choose(10, 20).unwrap();
        let mut source = create_seeded_source(7);

        for size in [0, 1, 1000] {
            let generated = generator.generate(size, &mut source);
            assert!(generator.contains(&generated));
        }
    }

    #[test]
    fn test_invalid_integer_range() {
        assert_eq!(
            IntegerGenerator::choose(5, 1),
            Err(ConfigError::InvalidRange { min: 5, max: 1 })
        );
    }

    #[test]
    fn test_integer_shrink_towards_zero() {
        let generator = IntegerGenerator::sized();

        let shrunk = ints(generator.shrink(&GeneratedValue::from_value(100)).unwrap());
        assert_eq!(shrunk, vec![0, 50, 75, 88, 94, 97, 99]);

        let shrunk = ints(generator.shrink(&GeneratedValue::from_value(-7)).unwrap());
        assert_eq!(shrunk, vec![0, -4, -6]);

        assert_eq!(ints(generator.shrink(&GeneratedValue::from_value(1)).unwrap()), vec![0]);
        assert!(ints(generator.shrink(&GeneratedValue::from_value(0)).unwrap()).is_empty());
    }

    #[test]
    fn test_integer_shrink_towards_nearest_bound() {
        let positive = IntegerGenerator::choose(10, 20).unwrap();
        assert_eq!(positive.target(), 10);
        assert_eq!(
            ints(positive.shrink(&GeneratedValue::from_value(14)).unwrap()),
            vec![10, 12, 13]
        );

        let negative = IntegerGenerator::choose(-20, -10).unwrap();
        assert_eq!(negative.target(), -10);
        assert_eq!(
            ints(negative.shrink(&GeneratedValue::from_value(-12)).unwrap()),
            vec![-10, -11]
        );
    }

    #[test]
    fn test_integer_shrink_extremes() {
        let generator = IntegerGenerator::sized();
        for x in [i64::MIN, i64::MAX] {
            let candidates = ints(generator.shrink(&GeneratedValue::from_value(x)).unwrap());
            assert!(!candidates.is_empty());
            assert!(candidates.iter().all(|c| c.unsigned_abs() < x.unsigned_abs()));
        }
    }

    #[test]
    fn test_integer_domain_errors() {
        let generator = IntegerGenerator::choose(0, 100).unwrap();
        assert!(generator.shrink(&GeneratedValue::from_value(101)).is_err());
        assert!(generator.shrink(&GeneratedValue::from_value("12")).is_err());
        assert!(
            IntegerGenerator::sized()
                .shrink(&GeneratedValue::from_value(true))
                .is_err()
        );
    }

    #[test]
    fn test_string_generation() {
        let generator = StringGenerator::new();
        let mut source = create_seeded_source(3);

        for size in 0..30 {
            let generated = generator.generate(size, &mut source);
            let s = generated.value().as_str().unwrap();
            assert!(s.chars().count() <= size);
            assert!(generator.contains(&generated));
        }
    }

    #[test]
    fn test_string_custom_chars() {
        let generator = StringGenerator::with_chars('a', 'c').unwrap();
        assert!(generator.contains(&GeneratedValue::from_value("abcabc")));
        assert!(!generator.contains(&GeneratedValue::from_value("abd")));
        assert!(generator.contains(&GeneratedValue::from_value("")));

        assert_eq!(
            StringGenerator::with_chars('z', 'a'),
            Err(ConfigError::InvalidCharRange { lo: 'z', hi: 'a' })
        );
    }

    #[test]
    fn test_string_shrink_drops_last_char() {
        let generator = StringGenerator::new();

        let shrunk: Vec<_> = generator
            .shrink(&GeneratedValue::from_value("hello"))
            .unwrap()
            .collect();
        assert_eq!(shrunk.len(), 1);
        assert_eq!(shrunk[0].value(), &Value::from("hell"));

        assert_eq!(
            generator
                .shrink(&GeneratedValue::from_value(""))
                .unwrap()
                .count(),
            0
        );
        assert!(generator.shrink(&GeneratedValue::from_value(5)).is_err());
    }

    #[test]
    fn test_elements_generator() {
        let generator = ElementsGenerator::new(["a", "b", "c"]).unwrap();
        let mut source = ScriptedSource::new(vec![2]);

        let generated = generator.generate(0, &mut source);
        assert_eq!(generated.value(), &Value::from("c"));

        let shrunk: Vec<_> = generator
            .shrink(&generated)
            .unwrap()
            .map(|c| c.into_value())
            .collect();
        assert_eq!(shrunk, vec![Value::from("a"), Value::from("b")]);

        assert_eq!(
            generator
                .shrink(&GeneratedValue::from_value("a"))
                .unwrap()
                .count(),
            0
        );
        assert!(generator.shrink(&GeneratedValue::from_value("d")).is_err());
        assert_eq!(
            ElementsGenerator::new(Vec::<i64>::new()),
            Err(ConfigError::EmptyElements)
        );
    }
}
