//! Payloads and the generated values that carry them.

use std::borrow::Cow;
use std::fmt;

/// Payload of a generated value.
///
/// Scalars are `Bool`, `Int` and `Str`; composites are `Seq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    Seq(Vec<Value>),
}

impl Value {
    /// The boolean payload, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int`
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The string payload, if this is a `Str`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is a `Seq`
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this payload is a composite
    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

/// A value produced by a generator, or a shrink candidate derived from one.
///
/// Composite values remember the generated values of their elements
/// (`provenance`) so a combinator can shrink each element with its own
/// generator instead of re-deriving it from the flattened payload. Instances
/// are never mutated; shrinking always builds new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedValue {
    value: Value,
    provenance: Vec<GeneratedValue>,
    origin: Option<Cow<'static, str>>,
}

impl GeneratedValue {
    /// A bare payload with no provenance and no origin
    pub fn from_value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            provenance: Vec::new(),
            origin: None,
        }
    }

    /// A payload together with the element values that produced it.
    ///
    /// Provenance is stored as given. When it does not line up with the
    /// payload, [`GeneratedValue::elements`] ignores it.
    pub fn from_value_and_input(
        value: impl Into<Value>,
        provenance: Vec<GeneratedValue>,
        origin: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            value: value.into(),
            provenance,
            origin: Some(origin.into()),
        }
    }

    /// A composite whose payload is the sequence of the elements' payloads
    pub fn from_elements(
        elements: Vec<GeneratedValue>,
        origin: impl Into<Cow<'static, str>>,
    ) -> Self {
        let value = Value::Seq(elements.iter().map(|e| e.value.clone()).collect());
        Self {
            value,
            provenance: elements,
            origin: Some(origin.into()),
        }
    }

    /// Tag this value with the label of the generator that owns it
    pub fn with_origin(mut self, origin: impl Into<Cow<'static, str>>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// The payload
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume and return the payload
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Element values of a composite; empty for primitives
    pub fn provenance(&self) -> &[GeneratedValue] {
        &self.provenance
    }

    /// Label of the generator kind that produced this value
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// The element values of a composite payload.
    ///
    /// Recorded provenance is reused when it is consistent with the payload;
    /// otherwise each element is rebuilt as a bare value. Returns `None` for
    /// scalar payloads.
    pub fn elements(&self) -> Option<Cow<'_, [GeneratedValue]>> {
        let items = self.value.as_seq()?;
        let consistent = self.provenance.len() == items.len()
            && self
                .provenance
                .iter()
                .zip(items)
                .all(|(input, item)| &input.value == item);
        if consistent {
            Some(Cow::Borrowed(&self.provenance))
        } else {
            Some(Cow::Owned(
                items.iter().cloned().map(GeneratedValue::from_value).collect(),
            ))
        }
    }
}

impl fmt::Display for GeneratedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
