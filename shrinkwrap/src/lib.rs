//! # Shrinkwrap - Generation and Shrinking for Property-Based Testing
//!
//! Shrinkwrap is the engine underneath a property-based testing library. A
//! [`Generator`] describes a domain of values: it produces random members of
//! that domain, decides membership, and proposes simpler members when a
//! generated value makes a property fail. Generators compose: a
//! [`TupleGenerator`] shrinks every combination of its elements without
//! knowing how each element shrinks.
//!
//! ## Quick Start
//!
//! ```rust
//! use shrinkwrap::{Generator, IntegerGenerator, ShrinkEngine, StringGenerator, tuple};
//!
//! let generator = tuple![IntegerGenerator::choose(0, 100).unwrap(), StringGenerator::new()];
//! let mut source = shrinkwrap::create_seeded_source(42);
//!
//! // Generate a value
//! let generated = generator.generate(10, &mut source);
//! assert!(generator.contains(&generated));
//!
//! // Shrink a counterexample to "the number is below 50"
//! let failing = shrinkwrap::GeneratedValue::from_value(vec![
//!     shrinkwrap::Value::Int(87),
//!     shrinkwrap::Value::from("hello"),
//! ]);
//! let result = ShrinkEngine::new()
//!     .shrink(&generator, failing, |value| {
//!         value.as_seq().unwrap()[0].as_int().unwrap() < 50
//!     })
//!     .unwrap();
//! assert_eq!(result.minimal.value().to_string(), "[50, \"\"]");
//! ```

pub mod collections;
pub mod config;
pub mod error;
pub mod generator;
pub mod primitives;
pub mod rng;
pub mod shrink;
pub mod tuple;
pub mod value;

// Re-export the main public API
pub use collections::{SequenceGenerator, VectorGenerator};
pub use config::{GenerationConfig, ShrinkConfig};
pub use error::{ConfigError, DomainError};
pub use generator::{ConstantGenerator, Generator, SharedGenerator, shared};
pub use primitives::{BooleanGenerator, ElementsGenerator, IntegerGenerator, StringGenerator};
pub use rng::{
    DefaultRngProvider, RandomSource, RngProvider, RngSource, ScriptedSource, create_seeded_source,
    create_source,
};
pub use shrink::{ShrinkEngine, ShrinkResult, Shrinks};
pub use tuple::{Element, TupleGenerator, TupleShrinks};
pub use value::{GeneratedValue, Value};
