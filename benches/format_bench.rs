use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phonenumber_engine::{PhoneNumber, PhoneNumberFormat, PhoneNumberUtil};

mod common;

fn setup_numbers(phone_util: &PhoneNumberUtil) -> Vec<PhoneNumber> {
    [
        ("(650) 253-0000", "US"),
        ("+1 800 356 9377 ext. 1234", "US"),
        ("+44 20 8765 4321", "GB"),
        ("07912 345678", "GB"),
        ("02 12345678", "IT"),
        ("312 345 6789", "IT"),
    ]
    .iter()
    .map(|(number, region)| {
        phone_util
            .parse_and_keep_raw_input(number, region)
            .expect("benchmark numbers should parse")
    })
    .collect()
}

fn formatting_benchmark(c: &mut Criterion) {
    let phone_util = PhoneNumberUtil::new_for_metadata(common::bench_metadata());
    let numbers = setup_numbers(&phone_util);

    let mut group = c.benchmark_group("Formatting");

    for number_format in [
        PhoneNumberFormat::E164,
        PhoneNumberFormat::International,
        PhoneNumberFormat::National,
        PhoneNumberFormat::RFC3966,
    ] {
        group.bench_function(format!("format({:?})", number_format), |b| {
            b.iter(|| {
                for number in &numbers {
                    black_box(phone_util.format(black_box(number), black_box(number_format)));
                }
            })
        });
    }

    group.bench_function("format_out_of_country_calling_number(US)", |b| {
        b.iter(|| {
            for number in &numbers {
                black_box(phone_util.format_out_of_country_calling_number(black_box(number), "US"));
            }
        })
    });

    group.bench_function("format_in_original_format(GB)", |b| {
        b.iter(|| {
            for number in &numbers {
                black_box(phone_util.format_in_original_format(black_box(number), "GB"));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, formatting_benchmark);
criterion_main!(benches);
