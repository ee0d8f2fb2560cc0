//! Tuple combinator behaviour: arity, enumeration of element shrinks and the
//! constant-only terminal case.

use shrinkwrap::{
    ConstantGenerator, Element, GeneratedValue, Generator, IntegerGenerator, StringGenerator,
    TupleGenerator, Value, create_seeded_source, tuple,
};

fn tagged_pair(first: Value, second: Value, element_origin: &'static str) -> GeneratedValue {
    GeneratedValue::from_value_and_input(
        Value::Seq(vec![first.clone(), second.clone()]),
        vec![
            GeneratedValue::from_value(first).with_origin(element_origin),
            GeneratedValue::from_value(second).with_origin(element_origin),
        ],
        "tuple",
    )
}

#[test]
fn construct_with_generators() {
    let element = IntegerGenerator::choose(0, 100).unwrap();
    let generator = tuple![element, element];
    let mut source = create_seeded_source(10);

    let generated = generator.generate(10, &mut source);
    let items = generated.value().as_seq().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert!(element.contains(&GeneratedValue::from_value(item.clone())));
    }
}

#[test]
fn construct_with_non_generators() {
    let generator = TupleGenerator::new([42]);
    let mut source = create_seeded_source(10);

    let generated = generator.generate(10, &mut source);
    for item in generated.value().as_seq().unwrap() {
        assert!(ConstantGenerator::new(42).contains(&GeneratedValue::from_value(item.clone())));
    }
}

#[test]
fn construct_with_no_elements() {
    let generator = TupleGenerator::new(Vec::<Element>::new());
    let mut source = create_seeded_source(10);

    assert_eq!(generator.generate(10, &mut source).value(), &Value::Seq(vec![]));
    assert_eq!(generator.arity(), 0);
}

#[test]
fn contains_values_built_from_element_generations() {
    let element = IntegerGenerator::choose(0, 100).unwrap();
    let generator = tuple![element, element];
    let mut source = create_seeded_source(4);

    let raw = GeneratedValue::from_value(vec![
        element.generate(10, &mut source).into_value(),
        element.generate(10, &mut source).into_value(),
    ]);
    assert!(generator.contains(&raw));
}

#[test]
fn shrink_keeps_elements_in_domain() {
    let element = IntegerGenerator::choose(0, 100).unwrap();
    let generator = tuple![element, element];

    for seed in 0..20 {
        let mut source = create_seeded_source(seed);
        let generated = generator.generate(10, &mut source);
        let items = generated.value().as_seq().unwrap().to_vec();
        let original_sum = items[0].as_int().unwrap() + items[1].as_int().unwrap();

        for candidate in generator.shrink(&generated).unwrap() {
            let shrunk = candidate.value().as_seq().unwrap();
            for item in shrunk {
                assert!(element.contains(&GeneratedValue::from_value(item.clone())));
            }
            let sum = shrunk[0].as_int().unwrap() + shrunk[1].as_int().unwrap();
            assert!(sum <= original_sum);
        }
    }
}

#[test]
fn all_constant_tuple_is_terminal() {
    let generator = TupleGenerator::new([42, 42]);
    let mut source = create_seeded_source(1);

    let generated = generator.generate(10, &mut source);
    assert_eq!(generated.value(), &Value::from(vec![42, 42]));
    assert_eq!(generator.shrink(&generated).unwrap().count(), 0);
}

#[test]
fn shrinking_multiple_options_of_one_generator() {
    let generator = tuple![IntegerGenerator::sized()];
    let value = GeneratedValue::from_value_and_input(
        vec![100],
        vec![GeneratedValue::from_value(100).with_origin("integer")],
        "tuple",
    );

    let shrunk: Vec<_> = generator.shrink(&value).unwrap().collect();
    assert!(shrunk.len() > 1);
    for option in shrunk {
        assert_eq!(option.origin(), Some("tuple"));
        assert_eq!(option.value().as_seq().unwrap().len(), 1);
    }
}

#[test]
fn shrinking_two_single_option_generators_enumerates_three_shapes() {
    let generator = tuple![StringGenerator::new(), StringGenerator::new()];
    let value = tagged_pair(Value::from("hello"), Value::from("world"), "string");

    let shrunk: Vec<_> = generator.shrink(&value).unwrap().collect();
    // shrinking (a), (b) or (a and b)
    assert_eq!(shrunk.len(), 3);
    for option in &shrunk {
        assert_eq!(option.origin(), Some("tuple"));
        let items = option.value().as_seq().unwrap();
        assert_eq!(items.len(), 2);
        let elements_being_shrunk = items
            .iter()
            .filter(|item| item.as_str().unwrap().len() < 5)
            .count();
        assert!(elements_being_shrunk >= 1);
    }

    let shapes: Vec<_> = shrunk.into_iter().map(GeneratedValue::into_value).collect();
    assert_eq!(
        shapes,
        vec![
            Value::from(vec!["hell", "world"]),
            Value::from(vec!["hello", "worl"]),
            Value::from(vec!["hell", "worl"]),
        ]
    );
}

#[test]
fn shrinking_two_multiple_option_generators() {
    let generator = tuple![IntegerGenerator::sized(), IntegerGenerator::sized()];
    let value = tagged_pair(Value::Int(100), Value::Int(200), "integer");

    let shrunk: Vec<_> = generator.shrink(&value).unwrap().collect();
    assert!(shrunk.len() > 1);
    for option in shrunk {
        assert_eq!(option.origin(), Some("tuple"));
        let items = option.value().as_seq().unwrap();
        assert_eq!(items.len(), 2);
        assert_ne!(option.value(), &Value::from(vec![100, 200]));
        let elements_being_shrunk = usize::from(items[0].as_int().unwrap() < 100)
            + usize::from(items[1].as_int().unwrap() < 200);
        assert!(elements_being_shrunk >= 1);
    }
}

#[test]
fn shrinking_bounded_pair_near_maxima() {
    let generator = tuple![
        IntegerGenerator::choose(0, 100).unwrap(),
        IntegerGenerator::choose(0, 200).unwrap()
    ];
    let value = GeneratedValue::from_value(vec![100, 200]);

    let shrunk = generator.shrink(&value).unwrap();
    // 7 options for 100 and 8 for 200
    assert_eq!(shrunk.size_hint(), (71, Some(71)));

    let candidates: Vec<_> = shrunk.collect();
    assert_eq!(candidates.len(), 71);
    for candidate in candidates {
        assert!(generator.contains(&candidate));
        assert_ne!(candidate.value(), value.value());
        let items = candidate.value().as_seq().unwrap();
        let first = items[0].as_int().unwrap();
        let second = items[1].as_int().unwrap();
        assert!(first <= 100 && second <= 200);
        assert!(first < 100 || second < 200);
    }
}

#[test]
fn arity_is_preserved() {
    let generator = tuple![
        IntegerGenerator::sized(),
        StringGenerator::new(),
        "fixed",
        IntegerGenerator::choose(5, 50).unwrap()
    ];

    for seed in 0..10 {
        let mut source = create_seeded_source(seed);
        let generated = generator.generate(12, &mut source);
        for candidate in generator.shrink(&generated).unwrap() {
            assert_eq!(candidate.value().as_seq().unwrap().len(), 4);
            assert_eq!(candidate.provenance().len(), 4);
            assert_eq!(candidate.value().as_seq().unwrap()[2], Value::from("fixed"));
        }
    }
}

#[test]
fn raw_values_shrink_like_generated_ones() {
    let generator = tuple![IntegerGenerator::sized(), StringGenerator::new()];
    let mut source = create_seeded_source(31);

    let generated = generator.generate(10, &mut source);
    let raw = GeneratedValue::from_value(generated.value().clone());

    let from_generated: Vec<_> = generator
        .shrink(&generated)
        .unwrap()
        .map(GeneratedValue::into_value)
        .collect();
    let from_raw: Vec<_> = generator
        .shrink(&raw)
        .unwrap()
        .map(GeneratedValue::into_value)
        .collect();
    assert_eq!(from_generated, from_raw);
}

#[test]
fn many_shrinkable_elements_are_enumerated_lazily() {
    let elements: Vec<Element> = (0..40).map(|_| Element::from(IntegerGenerator::sized())).collect();
    let generator = TupleGenerator::new(elements);
    let value = GeneratedValue::from_value(vec![1; 40]);

    // 2^40 - 1 candidates; only the first few are ever built
    let mut shrinks = generator.shrink(&value).unwrap();
    assert_eq!(shrinks.size_hint(), ((1usize << 40) - 1, Some((1usize << 40) - 1)));

    let first: Vec<_> = shrinks.by_ref().take(41).collect();
    assert_eq!(first.len(), 41);
    for (i, candidate) in first.iter().take(40).enumerate() {
        let items = candidate.value().as_seq().unwrap();
        assert_eq!(items[i], Value::Int(0));
        assert_eq!(items.iter().filter(|v| **v == Value::Int(0)).count(), 1);
    }
    // First candidate changing two elements
    let pair = first[40].value().as_seq().unwrap();
    assert_eq!(&pair[..2], &[Value::Int(0), Value::Int(0)]);
}
