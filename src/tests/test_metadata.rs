//! Hand-written metadata the unit tests run against. The regions are cut down
//! to the ranges the tests need, so the patterns are intentionally simpler
//! than real-world data.

use protobuf::MessageField;

use crate::phonemetadata::{NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc};

fn desc_with_local_only(
    pattern: &str,
    possible_lengths: &[i32],
    local_only_lengths: &[i32],
    example_number: &str,
) -> MessageField<PhoneNumberDesc> {
    let mut desc = PhoneNumberDesc::new();
    desc.set_national_number_pattern(pattern.to_owned());
    desc.possible_length = possible_lengths.to_vec();
    desc.possible_length_local_only = local_only_lengths.to_vec();
    if !example_number.is_empty() {
        desc.set_example_number(example_number.to_owned());
    }
    MessageField::some(desc)
}

fn desc(pattern: &str, possible_lengths: &[i32], example_number: &str) -> MessageField<PhoneNumberDesc> {
    desc_with_local_only(pattern, possible_lengths, &[], example_number)
}

/// A type the region has no numbers of.
fn no_data() -> MessageField<PhoneNumberDesc> {
    let mut desc = PhoneNumberDesc::new();
    desc.possible_length = vec![-1];
    MessageField::some(desc)
}

fn number_format(
    pattern: &str,
    format: &str,
    leading_digits: &[&str],
    national_prefix_formatting_rule: &str,
) -> NumberFormat {
    let mut number_format = NumberFormat::new();
    number_format.set_pattern(pattern.to_owned());
    number_format.set_format(format.to_owned());
    number_format.leading_digits_pattern = leading_digits.iter().map(|l| l.to_string()).collect();
    if !national_prefix_formatting_rule.is_empty() {
        number_format.set_national_prefix_formatting_rule(national_prefix_formatting_rule.to_owned());
    }
    number_format
}

fn with_carrier_rule(mut number_format: NumberFormat, rule: &str) -> NumberFormat {
    number_format.set_domestic_carrier_code_formatting_rule(rule.to_owned());
    number_format
}

/// A region where every number type is explicitly unsupported, ready to
/// have the relevant types filled in.
fn region(id: &str, country_code: i32, international_prefix: &str) -> PhoneMetadata {
    let mut metadata = PhoneMetadata::new();
    metadata.set_id(id.to_owned());
    metadata.set_country_code(country_code);
    if !international_prefix.is_empty() {
        metadata.set_international_prefix(international_prefix.to_owned());
    }
    for desc in [
        &mut metadata.fixed_line,
        &mut metadata.mobile,
        &mut metadata.toll_free,
        &mut metadata.premium_rate,
        &mut metadata.shared_cost,
        &mut metadata.personal_number,
        &mut metadata.voip,
        &mut metadata.pager,
        &mut metadata.uan,
        &mut metadata.voicemail,
        &mut metadata.no_international_dialling,
    ] {
        *desc = no_data();
    }
    metadata
}

fn with_national_prefix(mut metadata: PhoneMetadata, national_prefix: &str) -> PhoneMetadata {
    metadata.set_national_prefix(national_prefix.to_owned());
    metadata.set_national_prefix_for_parsing(national_prefix.to_owned());
    metadata
}

fn us() -> PhoneMetadata {
    let mut us = with_national_prefix(region("US", 1, "011"), "1");
    us.set_main_country_for_code(true);
    us.set_preferred_extn_prefix(" extn. ".to_owned());
    us.set_mobile_number_portable_region(true);
    us.set_same_mobile_and_fixed_line_pattern(true);
    let geographic = "[13-689]\\d{9}|2[0-35-9]\\d{8}";
    us.general_desc = desc_with_local_only(geographic, &[10], &[7], "");
    us.fixed_line = desc_with_local_only(geographic, &[10], &[7], "2012345678");
    us.mobile = desc_with_local_only(geographic, &[10], &[7], "2012345678");
    us.toll_free = desc("8(?:00|66|77|88)\\d{7}", &[10], "8002345678");
    us.premium_rate = desc("900\\d{7}", &[10], "9002345678");
    us.no_international_dialling = desc("800\\d{7}", &[10], "8002345678");
    us.number_format = vec![
        number_format("(\\d{3})(\\d{4})", "$1 $2", &[], ""),
        number_format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", &[], ""),
    ];
    us.intl_number_format = vec![number_format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", &[], "")];
    us
}

fn bs() -> PhoneMetadata {
    let mut bs = with_national_prefix(region("BS", 1, "011"), "1");
    bs.set_leading_digits("242".to_owned());
    bs.general_desc = desc_with_local_only("(?:242|8(?:00|66|77|88)|900)\\d{7}", &[10], &[7], "");
    bs.fixed_line = desc_with_local_only("242[23]\\d{6}", &[10], &[7], "2423651234");
    bs.mobile = desc("2424\\d{6}", &[10], "2424123456");
    bs.toll_free = desc("8(?:00|66|77|88)\\d{7}", &[10], "8002123456");
    bs.premium_rate = desc("900\\d{7}", &[10], "9002123456");
    bs
}

fn gb() -> PhoneMetadata {
    let mut gb = with_national_prefix(region("GB", 44, "00"), "0");
    gb.general_desc = desc("\\d{10}", &[10], "");
    gb.fixed_line = desc("[1-6]\\d{9}", &[10], "1212345678");
    gb.mobile = desc("7[1-57-9]\\d{8}", &[10], "7123456789");
    gb.toll_free = desc("80\\d{8}", &[10], "8012345678");
    gb.premium_rate = desc("9[018]\\d{8}", &[10], "9187654321");
    gb.shared_cost = desc("8(?:4[3-5]|7[0-2])\\d{7}", &[10], "8431231234");
    gb.voip = desc("56\\d{8}", &[10], "5612345678");
    gb.personal_number = desc("70\\d{8}", &[10], "7031231234");
    gb.pager = desc("76\\d{8}", &[10], "7623456789");
    gb.uan = desc("55\\d{8}", &[10], "5512345678");
    gb.number_format = vec![
        number_format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", &["[1-59]|[78]0"], "($NP$FG)"),
        number_format("(\\d)(\\d{3})(\\d{3})(\\d{3})", "$1 $2 $3 $4", &["6"], "($NP$FG)"),
        number_format("(\\d{4})(\\d{3})(\\d{3})", "$1 $2 $3", &["7(?:[1-57-9]|62)"], "($NP$FG)"),
        number_format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", &["7[06]|8[47]"], "($NP$FG)"),
    ];
    gb
}

fn de() -> PhoneMetadata {
    let mut de = with_national_prefix(region("DE", 49, "00"), "0");
    de.general_desc = desc_with_local_only(
        "\\d{2,14}",
        &[4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
        &[2, 3],
        "",
    );
    de.fixed_line = desc_with_local_only(
        "(?:[24-6]\\d{2}|3[03-9]\\d|[789](?:0[2-9]|[1-9]\\d))\\d{1,8}",
        &[5, 6, 7, 8, 9, 10, 11],
        &[2, 3],
        "30123456",
    );
    de.mobile = desc("1(?:5\\d{9}|6[023]\\d{7,8}|7\\d{8,9})", &[10, 11], "15123456789");
    de.toll_free = desc("800\\d{7,11}", &[10, 11, 12, 13, 14], "8001234567");
    de.premium_rate = desc("900(?:[135]\\d{6}|9\\d{7})", &[10, 11], "9001234567");
    de.number_format = vec![
        number_format("(\\d{3})(\\d{3,4})(\\d{4})", "$1 $2 $3", &["900"], "$NP$FG"),
        number_format("(\\d{2})(\\d{4,11})", "$1/$2", &["[34]0|[68]9"], "$NP$FG"),
        number_format("(\\d{3})(\\d{3,11})", "$1 $2", &["2|3[3-9]|906|[4-9][1-9]1"], "$NP$FG"),
        number_format(
            "(\\d{4})(\\d{2,10})",
            "$1 $2",
            &["[4-6]|[7-9](?:\\d[1-9]|[1-9]\\d)"],
            "$NP$FG",
        ),
    ];
    de
}

fn it() -> PhoneMetadata {
    let mut it = region("IT", 39, "00");
    it.general_desc = desc("[0389]\\d{5,10}", &[6, 7, 8, 9, 10, 11], "");
    it.fixed_line = desc("0\\d{9,10}", &[10, 11], "0236618300");
    it.mobile = desc("3\\d{8,9}", &[9, 10], "345678901");
    it.toll_free = desc("80(?:0\\d{6}|3\\d{3})", &[6, 9], "803123");
    it.premium_rate = desc("89(?:2\\d{3}|9\\d{6})", &[6, 9], "892123");
    it.number_format = vec![
        number_format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", &["0[26]"], ""),
        number_format("(\\d{3})(\\d{3})(\\d{3,4})", "$1 $2 $3", &["3"], ""),
        number_format("(\\d{3})(\\d{4})(\\d{4})", "$1 $2 $3", &["0[13-57-9][0159]"], ""),
        number_format("(\\d{3})(\\d{3,6})", "$1 $2", &["0[13-57-9][0159]|8(?:03|9[29])"], ""),
    ];
    it
}

fn au() -> PhoneMetadata {
    let mut au = with_national_prefix(region("AU", 61, "001[14-689]"), "0");
    au.set_preferred_international_prefix("0011".to_owned());
    au.general_desc = desc("[1-578]\\d{5,9}", &[9, 10], "");
    au.fixed_line = desc("[2378]\\d{8}", &[9], "212345678");
    au.mobile = desc("4\\d{8}", &[9], "412345678");
    au.toll_free = desc("1800\\d{6}", &[10], "1800123456");
    au.premium_rate = desc("190[0126]\\d{6}", &[10], "1900123456");
    au.number_format = vec![
        number_format("(\\d{4})(\\d{3})(\\d{3})", "$1 $2 $3", &["1"], "$FG"),
        number_format("(\\d)(\\d{4})(\\d{4})", "$1 $2 $3", &["[2-478]"], "$NP$FG"),
    ];
    au
}

fn ar() -> PhoneMetadata {
    let mut ar = region("AR", 54, "00");
    ar.set_national_prefix("0".to_owned());
    ar.set_national_prefix_for_parsing("0?(?:(11|343|3715)15)?".to_owned());
    ar.set_national_prefix_transform_rule("9$1".to_owned());
    ar.general_desc = desc("[1-3689]\\d{9,10}", &[10, 11], "");
    ar.fixed_line = desc("[1-3]\\d{9}", &[10], "1123456789");
    ar.mobile = desc("9\\d{10}", &[11], "91123456789");
    ar.toll_free = desc("80\\d{8}", &[10], "8012345678");
    ar.premium_rate = desc("6(?:0\\d|10)\\d{7}", &[10], "6001234567");
    ar.number_format = vec![
        number_format("([68]\\d{2})(\\d{3})(\\d{4})", "$1-$2-$3", &["[68]"], "$NP$FG"),
        number_format("(9)(11)(\\d{4})(\\d{4})", "$2 15 $3-$4", &["911"], "$NP$FG"),
        number_format("(11)(\\d{4})(\\d{4})", "$1 $2-$3", &["1"], "$NP$FG"),
    ];
    ar.intl_number_format = vec![
        number_format("([68]\\d{2})(\\d{3})(\\d{4})", "$1-$2-$3", &["[68]"], ""),
        number_format("(9)(11)(\\d{4})(\\d{4})", "$1 $2 $3 $4", &["911"], ""),
        number_format("(11)(\\d{4})(\\d{4})", "$1 $2-$3", &["1"], ""),
    ];
    ar
}

fn br() -> PhoneMetadata {
    let mut br = region("BR", 55, "00(?:1[245]|2[1-35]|31|4[13]|[56]5|99)");
    br.set_national_prefix("0".to_owned());
    br.set_national_prefix_for_parsing("0(?:(1[245]|2[135]|[34]1)(\\d{10,11}))?".to_owned());
    br.set_national_prefix_transform_rule("$2".to_owned());
    br.general_desc = desc_with_local_only("[1-9]\\d{9,10}", &[10, 11], &[8, 9], "");
    br.fixed_line = desc_with_local_only("[1-9]{2}[2-5]\\d{7}", &[10], &[8], "1123456789");
    br.mobile = desc_with_local_only("[1-9]{2}9\\d{8}", &[11], &[9], "11961234567");
    br.number_format = vec![
        with_carrier_rule(
            number_format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2-$3", &["[1-9][1-9][2-5]"], "($FG)"),
            "$NP $CC ($FG)",
        ),
        with_carrier_rule(
            number_format("(\\d{2})(\\d{5})(\\d{4})", "$1 $2-$3", &["[1-9][1-9]9"], "($FG)"),
            "$NP $CC ($FG)",
        ),
    ];
    br
}

fn co() -> PhoneMetadata {
    let mut co = region("CO", 57, "00(?:4(?:[14]4|56)|[579])");
    co.set_national_prefix("0".to_owned());
    co.set_national_prefix_for_parsing("0([3579]|4(?:44|56))?".to_owned());
    co.general_desc = desc("(?:[13]\\d{0,3}|[24-8])\\d{7}", &[8, 10], "");
    co.fixed_line = desc("[124-8][2-9]\\d{6}", &[8], "12345678");
    co.mobile = desc("3(?:0[0-5]|1\\d|2[0-3]|5[01])\\d{7}", &[10], "3211234567");
    co.number_format = vec![
        with_carrier_rule(
            number_format("(\\d)(\\d{7})", "$1 $2", &["[14][2-9]|[25-8]"], "($FG)"),
            "$NP$CC $FG",
        ),
        number_format("(\\d{3})(\\d{7})", "$1 $2", &["3"], "$FG"),
    ];
    co
}

fn sg() -> PhoneMetadata {
    let mut sg = region("SG", 65, "0[0-3]\\d");
    sg.general_desc = desc("[36]\\d{7}|[17-9]\\d{7,10}", &[8, 10, 11], "");
    sg.fixed_line = desc("[36]\\d{7}", &[8], "61234567");
    sg.mobile = desc("[89]\\d{7}", &[8], "81234567");
    sg.toll_free = desc("1?800\\d{7}", &[10, 11], "18001234567");
    sg.premium_rate = desc("1900\\d{7}", &[11], "19001234567");
    sg.number_format = vec![
        number_format("(\\d{4})(\\d{4})", "$1 $2", &["[369]|8[1-9]"], ""),
        number_format("(\\d{4})(\\d{3})(\\d{4})", "$1 $2 $3", &["1[89]"], ""),
        number_format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", &["8"], ""),
    ];
    sg
}

/// International toll-free service.
fn non_geo_800() -> PhoneMetadata {
    let mut toll_free = region("001", 800, "");
    toll_free.general_desc = desc("\\d{8}", &[8], "");
    toll_free.toll_free = desc("\\d{8}", &[8], "12345678");
    toll_free.number_format = vec![number_format("(\\d{4})(\\d{4})", "$1 $2", &[], "")];
    toll_free
}

/// International premium-rate service.
fn non_geo_979() -> PhoneMetadata {
    let mut premium = region("001", 979, "");
    premium.general_desc = desc("\\d{9}", &[9], "");
    premium.premium_rate = desc("\\d{9}", &[9], "123456789");
    premium.number_format = vec![number_format("(\\d)(\\d{4})(\\d{4})", "$1 $2 $3", &[], "")];
    premium
}

pub fn metadata_collection() -> PhoneMetadataCollection {
    let mut collection = PhoneMetadataCollection::new();
    collection.metadata = vec![
        us(),
        bs(),
        gb(),
        de(),
        it(),
        au(),
        ar(),
        br(),
        co(),
        sg(),
        non_geo_800(),
        non_geo_979(),
    ];
    collection
}

fn short_region(id: &str, country_code: i32, general_pattern: &str, lengths: &[i32]) -> PhoneMetadata {
    let mut metadata = PhoneMetadata::new();
    metadata.set_id(id.to_owned());
    metadata.set_country_code(country_code);
    metadata.general_desc = desc(general_pattern, lengths, "");
    metadata
}

pub fn short_number_metadata_collection() -> PhoneMetadataCollection {
    let mut us = short_region("US", 1, "[1-9]\\d{2,5}", &[3, 4, 5, 6]);
    us.short_code = desc("112|611|911|2[0-4]\\d{3}|[4-9]\\d{4}|3\\d{5}", &[3, 5, 6], "611");
    us.toll_free = desc("112|911", &[3], "911");
    us.standard_rate = desc("2[0-4]\\d{3}", &[5], "21234");
    us.premium_rate = desc("[4-9]\\d{4}|3\\d{5}", &[5, 6], "54321");
    us.emergency = desc("112|911", &[3], "911");
    us.carrier_specific = desc("611", &[3], "611");
    us.sms_services = desc("4\\d{4}", &[5], "41234");

    let mut bs = short_region("BS", 1, "\\d{3}", &[3]);
    bs.short_code = desc("91[19]|211", &[3], "911");
    bs.toll_free = desc("91[19]", &[3], "911");
    bs.premium_rate = desc("211", &[3], "211");
    bs.emergency = desc("91[19]", &[3], "911");

    let mut gb = short_region("GB", 44, "[1-9]\\d{2,5}", &[3, 4, 5, 6]);
    gb.short_code = desc("1\\d{2,5}|999", &[3, 4, 5, 6], "150");
    gb.standard_rate = desc("15[05]", &[3], "150");
    gb.toll_free = desc("112|999", &[3], "999");
    gb.emergency = desc("112|999", &[3], "112");

    let mut br = short_region("BR", 55, "1\\d{2}|911", &[3]);
    br.short_code = desc("1(?:12|28|9[023])|911", &[3], "190");
    br.toll_free = desc("1(?:12|28|9[023])|911", &[3], "190");
    br.emergency = desc("1(?:12|28|9[023])|911", &[3], "190");

    let mut collection = PhoneMetadataCollection::new();
    collection.metadata = vec![us, bs, gb, br];
    collection
}
