use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phonenumber_engine::PhoneNumberUtil;

mod common;

/// A mix of inputs: national and international forms, extensions, vanity
/// letters and a number that fails to parse.
fn setup_parsing_data() -> Vec<(&'static str, &'static str)> {
    vec![
        ("(650) 253-0000", "US"),
        ("+1 650 253 0000 ext. 1234", "GB"),
        ("+44 20 8765 4321", "GB"),
        ("020 8765 4321", "GB"),
        ("011 44 7912 345678", "US"),
        ("02 12345678", "IT"),
        ("1-800-FLOWERS", "US"),
        ("tel:2087654321;phone-context=+44", "ZZ"),
        ("not a number", "US"),
    ]
}

fn parsing_benchmark(c: &mut Criterion) {
    let phone_util = PhoneNumberUtil::new_for_metadata(common::bench_metadata());
    let numbers_to_parse = setup_parsing_data();

    let mut group = c.benchmark_group("Parsing");

    group.bench_function("parse()", |b| {
        b.iter(|| {
            for (number, region) in &numbers_to_parse {
                let _ = phone_util.parse(black_box(number), black_box(region));
            }
        })
    });

    group.bench_function("parse_and_keep_raw_input()", |b| {
        b.iter(|| {
            for (number, region) in &numbers_to_parse {
                let _ = phone_util.parse_and_keep_raw_input(black_box(number), black_box(region));
            }
        })
    });

    group.bench_function("is_valid_number()", |b| {
        let parsed: Vec<_> = numbers_to_parse
            .iter()
            .filter_map(|(number, region)| phone_util.parse(number, region).ok())
            .collect();
        b.iter(|| {
            for number in &parsed {
                black_box(phone_util.is_valid_number(black_box(number)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmark);
criterion_main!(benches);
