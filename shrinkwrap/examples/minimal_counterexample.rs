//! Minimal example: generate pairs until one breaks a property, then shrink it

use shrinkwrap::{
    GenerationConfig, Generator, IntegerGenerator, ShrinkEngine, StringGenerator,
    create_seeded_source, tuple,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // "the number never exceeds the length of the string"
    let generator = tuple![IntegerGenerator::choose(0, 50).unwrap(), StringGenerator::new()];
    let property = |value: &shrinkwrap::Value| {
        let items = value.as_seq().unwrap_or_default();
        match (items.first(), items.get(1)) {
            (Some(number), Some(text)) => {
                number.as_int().unwrap_or(0) <= text.as_str().map_or(0, |s| s.len() as i64)
            }
            _ => true,
        }
    };

    let config = GenerationConfig::default();
    let mut source = create_seeded_source(42);
    let failing = config
        .sizes()
        .map(|size| generator.generate(size, &mut source))
        .find(|generated| !property(generated.value()));

    let Some(failing) = failing else {
        println!("✓ Property passed! ({} tests)", config.iterations);
        return;
    };

    match ShrinkEngine::new().shrink(&generator, failing, property) {
        Ok(result) => println!(
            "✗ Failed: {} shrunk to {} in {} steps",
            result.original, result.minimal, result.shrink_steps
        ),
        Err(error) => println!("shrinking failed: {}", error),
    }
}
