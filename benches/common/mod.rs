//! Metadata shared by the benchmarks. Only a handful of regions, with
//! patterns close enough to real data to exercise the same code paths.

use phonenumber_engine::phonemetadata::{
    NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc,
};
use protobuf::MessageField;

fn desc(pattern: &str, possible_lengths: &[i32], local_only_lengths: &[i32]) -> MessageField<PhoneNumberDesc> {
    let mut desc = PhoneNumberDesc::new();
    desc.set_national_number_pattern(pattern.to_owned());
    desc.possible_length = possible_lengths.to_vec();
    desc.possible_length_local_only = local_only_lengths.to_vec();
    MessageField::some(desc)
}

fn number_format(pattern: &str, format: &str, leading_digits: &str, rule: &str) -> NumberFormat {
    let mut number_format = NumberFormat::new();
    number_format.set_pattern(pattern.to_owned());
    number_format.set_format(format.to_owned());
    number_format.leading_digits_pattern = vec![leading_digits.to_owned()];
    if !rule.is_empty() {
        number_format.set_national_prefix_formatting_rule(rule.to_owned());
    }
    number_format
}

fn region(id: &str, country_code: i32, international_prefix: &str, national_prefix: &str) -> PhoneMetadata {
    let mut metadata = PhoneMetadata::new();
    metadata.set_id(id.to_owned());
    metadata.set_country_code(country_code);
    metadata.set_international_prefix(international_prefix.to_owned());
    if !national_prefix.is_empty() {
        metadata.set_national_prefix(national_prefix.to_owned());
        metadata.set_national_prefix_for_parsing(national_prefix.to_owned());
    }
    metadata
}

pub fn bench_metadata() -> PhoneMetadataCollection {
    let mut us = region("US", 1, "011", "1");
    us.set_main_country_for_code(true);
    let geographic = "[2-9]\\d{9}";
    us.general_desc = desc(geographic, &[10], &[7]);
    us.fixed_line = desc(geographic, &[10], &[7]);
    us.mobile = desc(geographic, &[10], &[7]);
    us.toll_free = desc("8(?:00|33|44|55|66|77|88)[2-9]\\d{6}", &[10], &[]);
    us.number_format = vec![number_format("(\\d{3})(\\d{3})(\\d{4})", "($1) $2-$3", "[2-9]", "")];
    us.intl_number_format = vec![number_format("(\\d{3})(\\d{3})(\\d{4})", "$1-$2-$3", "[2-9]", "")];

    let mut gb = region("GB", 44, "00", "0");
    gb.general_desc = desc("[1-357-9]\\d{9}", &[10], &[]);
    gb.fixed_line = desc("[12]\\d{9}", &[10], &[]);
    gb.mobile = desc("7[1-57-9]\\d{8}", &[10], &[]);
    gb.number_format = vec![
        number_format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", "[1-3]", "$NP$FG"),
        number_format("(\\d{4})(\\d{6})", "$1 $2", "7", "$NP$FG"),
    ];

    let mut it = region("IT", 39, "00", "");
    it.general_desc = desc("0\\d{5,10}|3[0-8]\\d{7,10}", &[6, 7, 8, 9, 10, 11], &[]);
    it.fixed_line = desc("0\\d{5,10}", &[6, 7, 8, 9, 10, 11], &[]);
    it.mobile = desc("3[0-8]\\d{7,10}", &[9, 10, 11], &[]);
    it.number_format = vec![
        number_format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", "0[26]", ""),
        number_format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", "3", ""),
    ];

    let mut collection = PhoneMetadataCollection::new();
    collection.metadata = vec![us, gb, it];
    collection
}
