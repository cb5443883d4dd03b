use std::sync::Arc;

use crate::{CallingCodeMap, PhoneNumber, PhoneNumberUtil, ShortNumberCost, ShortNumberInfo};

use super::{
    init_logger,
    region_code::RegionCode,
    test_metadata::{metadata_collection, short_number_metadata_collection},
};

fn get_short_info() -> ShortNumberInfo {
    init_logger();
    let calling_codes = Arc::new(CallingCodeMap::from_collection(&metadata_collection()));
    ShortNumberInfo::new_for_metadata(short_number_metadata_collection(), calling_codes)
}

fn short_number(country_code: i32, national_number: &str) -> PhoneNumber {
    let mut phone_number = PhoneNumber::new();
    phone_number.set_country_code(country_code);
    phone_number.set_national_number(national_number);
    phone_number
}

#[test]
fn supported_regions() {
    let short_info = get_short_info();
    let mut regions: Vec<_> = short_info.get_supported_regions().collect();
    regions.sort_unstable();
    assert_eq!(vec!["BR", "BS", "GB", "US"], regions);
}

#[test]
fn is_possible_short_number() {
    let short_info = get_short_info();
    assert!(short_info.is_possible_short_number_for_region(
        &short_number(1, "123456"),
        RegionCode::us()
    ));
    assert!(!short_info.is_possible_short_number_for_region(
        &short_number(1, "1234567"),
        RegionCode::us()
    ));
    assert!(!short_info.is_possible_short_number_for_region(
        &short_number(1, "1234"),
        RegionCode::bs()
    ));
    // The number has to belong to the region it is dialed from.
    assert!(!short_info.is_possible_short_number_for_region(
        &short_number(44, "123"),
        RegionCode::us()
    ));

    assert!(short_info.is_possible_short_number(&short_number(1, "1234")));
    assert!(!short_info.is_possible_short_number(&short_number(44, "12")));
    assert!(!short_info.is_possible_short_number(&short_number(49, "112")));
}

#[test]
fn is_valid_short_number() {
    let short_info = get_short_info();
    assert!(short_info.is_valid_short_number_for_region(&short_number(1, "911"), RegionCode::us()));
    assert!(short_info.is_valid_short_number_for_region(&short_number(1, "911"), RegionCode::bs()));
    assert!(short_info.is_valid_short_number_for_region(&short_number(1, "611"), RegionCode::us()));
    assert!(!short_info.is_valid_short_number_for_region(&short_number(1, "611"), RegionCode::bs()));
    assert!(short_info.is_valid_short_number_for_region(
        &short_number(1, "21234"),
        RegionCode::us()
    ));
    assert!(!short_info.is_valid_short_number_for_region(
        &short_number(1, "911"),
        RegionCode::gb()
    ));
    assert!(!short_info.is_valid_short_number_for_region(
        &short_number(49, "112"),
        RegionCode::de()
    ));

    assert!(short_info.is_valid_short_number(&short_number(1, "611")));
    assert!(!short_info.is_valid_short_number(&short_number(1, "711")));
    assert!(short_info.is_valid_short_number(&short_number(44, "150")));
}

#[test]
fn get_expected_cost_for_region() {
    let short_info = get_short_info();
    let cases = [
        ("21234", RegionCode::us(), ShortNumberCost::StandardRate),
        ("54321", RegionCode::us(), ShortNumberCost::PremiumRate),
        ("911", RegionCode::us(), ShortNumberCost::TollFree),
        ("211", RegionCode::bs(), ShortNumberCost::PremiumRate),
        ("211", RegionCode::us(), ShortNumberCost::UnknownCost),
        // Too long for any cost category.
        ("1234567", RegionCode::us(), ShortNumberCost::UnknownCost),
        ("911", RegionCode::gb(), ShortNumberCost::UnknownCost),
        ("911", RegionCode::zz(), ShortNumberCost::UnknownCost),
    ];
    for (national_number, region_code, expected) in cases {
        assert_eq!(
            expected,
            short_info.get_expected_cost_for_region(&short_number(1, national_number), region_code),
            "{national_number} dialed from {region_code}"
        );
    }
}

#[test]
fn get_expected_cost_for_region_outside_nanpa() {
    let short_info = get_short_info();
    assert_eq!(
        ShortNumberCost::TollFree,
        short_info.get_expected_cost_for_region(&short_number(44, "112"), RegionCode::gb())
    );
    assert_eq!(
        ShortNumberCost::TollFree,
        short_info.get_expected_cost_for_region(&short_number(55, "190"), RegionCode::br())
    );
}

#[test]
fn get_expected_cost_across_shared_calling_code() {
    let short_info = get_short_info();
    // Toll-free in both the US and the Bahamas.
    assert_eq!(
        ShortNumberCost::TollFree,
        short_info.get_expected_cost(&short_number(1, "911"))
    );
    // Premium in the Bahamas wins over unknown in the US.
    assert_eq!(
        ShortNumberCost::PremiumRate,
        short_info.get_expected_cost(&short_number(1, "211"))
    );
    // Standard rate in the US but unknown in the Bahamas.
    assert_eq!(
        ShortNumberCost::UnknownCost,
        short_info.get_expected_cost(&short_number(1, "21234"))
    );
    assert_eq!(
        ShortNumberCost::PremiumRate,
        short_info.get_expected_cost(&short_number(1, "54321"))
    );
    assert_eq!(
        ShortNumberCost::StandardRate,
        short_info.get_expected_cost(&short_number(44, "150"))
    );
    assert_eq!(
        ShortNumberCost::UnknownCost,
        short_info.get_expected_cost(&short_number(49, "112"))
    );
}

#[test]
fn connects_to_emergency_number() {
    let short_info = get_short_info();
    assert!(short_info.connects_to_emergency_number("911", RegionCode::us()));
    assert!(short_info.connects_to_emergency_number("112", RegionCode::us()));
    assert!(!short_info.connects_to_emergency_number("119", RegionCode::us()));
    // Formatting is ignored.
    assert!(short_info.connects_to_emergency_number("9-1-1", RegionCode::us()));
    // Trailing digits are tolerated in most regions.
    assert!(short_info.connects_to_emergency_number("9116666666", RegionCode::us()));
    assert!(short_info.connects_to_emergency_number("9990", RegionCode::gb()));
    // A leading plus never reaches emergency services.
    assert!(!short_info.connects_to_emergency_number("+911", RegionCode::us()));
    assert!(!short_info.connects_to_emergency_number("\u{FF0B}911", RegionCode::us()));

    assert!(short_info.connects_to_emergency_number("190", RegionCode::br()));
    // Brazilian emergency numbers have to be dialed exactly.
    assert!(!short_info.connects_to_emergency_number("1900", RegionCode::br()));

    // No emergency metadata.
    assert!(!short_info.connects_to_emergency_number("911", RegionCode::de()));
    assert!(!short_info.connects_to_emergency_number("911", RegionCode::zz()));
}

#[test]
fn is_emergency_number() {
    let short_info = get_short_info();
    assert!(short_info.is_emergency_number("911", RegionCode::us()));
    assert!(short_info.is_emergency_number("9 1 1", RegionCode::us()));
    assert!(!short_info.is_emergency_number("9116666666", RegionCode::us()));
    assert!(!short_info.is_emergency_number("+911", RegionCode::us()));
    assert!(short_info.is_emergency_number("999", RegionCode::gb()));
    assert!(!short_info.is_emergency_number("9990", RegionCode::gb()));
    assert!(short_info.is_emergency_number("911", RegionCode::br()));
    assert!(!short_info.is_emergency_number("999", RegionCode::bs()));
    assert!(!short_info.is_emergency_number("112", RegionCode::de()));
}

#[test]
fn is_carrier_specific() {
    let short_info = get_short_info();
    assert!(short_info.is_carrier_specific(&short_number(1, "611")));
    assert!(!short_info.is_carrier_specific(&short_number(1, "911")));
    assert!(!short_info.is_carrier_specific(&short_number(1, "711")));

    assert!(short_info.is_carrier_specific_for_region(&short_number(1, "611"), RegionCode::us()));
    assert!(!short_info.is_carrier_specific_for_region(&short_number(1, "611"), RegionCode::bs()));
    assert!(!short_info.is_carrier_specific_for_region(&short_number(44, "611"), RegionCode::us()));
}

#[test]
fn is_sms_service() {
    let short_info = get_short_info();
    assert!(short_info.is_sms_service_for_region(&short_number(1, "41234"), RegionCode::us()));
    assert!(!short_info.is_sms_service_for_region(&short_number(1, "41234"), RegionCode::bs()));
    assert!(!short_info.is_sms_service_for_region(&short_number(1, "21234"), RegionCode::us()));
}

#[test]
fn get_example_short_number() {
    let short_info = get_short_info();
    assert_eq!("611", short_info.get_example_short_number(RegionCode::us()));
    assert_eq!("150", short_info.get_example_short_number(RegionCode::gb()));
    assert_eq!("", short_info.get_example_short_number(RegionCode::zz()));
    assert_eq!("", short_info.get_example_short_number(RegionCode::de()));
}

#[test]
fn get_example_short_number_for_cost() {
    let short_info = get_short_info();
    let us = RegionCode::us();
    assert_eq!(
        "911",
        short_info.get_example_short_number_for_cost(us, ShortNumberCost::TollFree)
    );
    assert_eq!(
        "21234",
        short_info.get_example_short_number_for_cost(us, ShortNumberCost::StandardRate)
    );
    assert_eq!(
        "54321",
        short_info.get_example_short_number_for_cost(us, ShortNumberCost::PremiumRate)
    );
    assert_eq!(
        "",
        short_info.get_example_short_number_for_cost(us, ShortNumberCost::UnknownCost)
    );
    assert_eq!(
        "",
        short_info.get_example_short_number_for_cost(RegionCode::bs(), ShortNumberCost::StandardRate)
    );
    assert_eq!(
        "",
        short_info.get_example_short_number_for_cost(RegionCode::zz(), ShortNumberCost::TollFree)
    );
}

#[test]
fn example_numbers_match_their_own_cost() {
    let short_info = get_short_info();
    for cost in [
        ShortNumberCost::TollFree,
        ShortNumberCost::StandardRate,
        ShortNumberCost::PremiumRate,
    ] {
        let example = short_info.get_example_short_number_for_cost(RegionCode::us(), cost);
        let phone_number = short_number(1, &example);
        assert!(short_info.is_valid_short_number_for_region(&phone_number, RegionCode::us()));
        assert_eq!(
            cost,
            short_info.get_expected_cost_for_region(&phone_number, RegionCode::us())
        );
    }
}

#[test]
fn parsed_short_numbers() {
    let short_info = get_short_info();
    let phone_util = PhoneNumberUtil::new_for_metadata(metadata_collection());
    // Short numbers parse without a national prefix being stripped.
    let phone_number = phone_util.parse("611", RegionCode::us()).unwrap();
    assert_eq!(1, phone_number.country_code());
    assert!(short_info.is_valid_short_number_for_region(&phone_number, RegionCode::us()));
    assert!(short_info.is_carrier_specific(&phone_number));

    let phone_number = phone_util.parse("150", RegionCode::gb()).unwrap();
    assert_eq!(
        ShortNumberCost::StandardRate,
        short_info.get_expected_cost_for_region(&phone_number, RegionCode::gb())
    );
}
