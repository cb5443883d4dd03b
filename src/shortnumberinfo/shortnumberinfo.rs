// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use log::trace;

use super::ShortNumberCost;
use crate::{
    interfaces::{MatcherApi, MetadataSource},
    metadata::{CallingCodeMap, CollectionMetadataSource, MetadataCache},
    phonenumber::PhoneNumber,
    phonenumberutil::{
        helper_functions::normalize_digits_only, parsing::extract_possible_number,
        phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings, PhoneNumberUtil,
    },
    proto_gen::phonemetadata::{PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
    regex_based_matcher::RegexBasedMatcher,
};

/// In these countries, if extra digits are added to an emergency number, it
/// no longer connects to the emergency service.
const REGIONS_WHERE_EMERGENCY_NUMBERS_MUST_BE_EXACT: [&str; 3] = ["BR", "CL", "NI"];

/// Methods for getting information about short phone numbers, such as short
/// codes and emergency numbers. Note that most commercial short numbers are
/// not handled here, but by the [`PhoneNumberUtil`].
///
/// Short-number metadata is kept apart from the regular metadata, while the
/// table of calling codes is shared with the engine parsing the numbers.
pub struct ShortNumberInfo {
    matcher_api: Box<dyn MatcherApi>,
    reg_exps: PhoneNumberRegExpsAndMappings,
    calling_codes: Arc<CallingCodeMap>,
    metadata: MetadataCache,
}

impl ShortNumberInfo {
    /// Builds a classifier over a short-number metadata `source`.
    pub fn new(source: Arc<dyn MetadataSource>, calling_codes: Arc<CallingCodeMap>) -> Self {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        Self {
            matcher_api: Box::new(RegexBasedMatcher::new(reg_exps.regexp_cache.clone())),
            reg_exps,
            calling_codes,
            metadata: MetadataCache::new(source),
        }
    }

    /// Builds a classifier over an in-memory short-number collection, sharing
    /// the calling codes of a regular engine.
    pub fn new_for_metadata(
        collection: PhoneMetadataCollection,
        calling_codes: Arc<CallingCodeMap>,
    ) -> Self {
        Self::new(
            Arc::new(CollectionMetadataSource::from_collection(collection)),
            calling_codes,
        )
    }

    /// Returns the regions that have short-number metadata.
    pub fn get_supported_regions(&self) -> impl Iterator<Item = &str> {
        self.calling_codes
            .iter()
            .flat_map(|(_, regions)| regions.iter())
            .map(String::as_str)
            .filter(|region_code| self.metadata.for_region(region_code).is_some())
    }

    fn get_short_number_metadata_for_region(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        self.metadata.for_region(region_code)
    }

    /// Returns a list with the region codes that match the specific country
    /// calling code. For non-geographical country calling codes, the region
    /// code 001 is returned. Also, in the case of no region code being found,
    /// an empty list is returned.
    fn get_region_codes_for_country_code(&self, country_calling_code: i32) -> &[String] {
        self.calling_codes.region_codes_for(country_calling_code)
    }

    /// Helper method to check that the country calling code of the number
    /// matches the region it's being dialed from.
    fn region_dialing_from_matches_number(
        &self,
        phone_number: &PhoneNumber,
        region_dialing_from: &str,
    ) -> bool {
        self.get_region_codes_for_country_code(phone_number.country_code())
            .iter()
            .any(|region_code| region_code == region_dialing_from)
    }

    /// Check whether a short number is a possible number when dialed from the
    /// given region. This provides a more lenient check than
    /// [`Self::is_valid_short_number_for_region`].
    pub fn is_possible_short_number_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_dialing_from: &str,
    ) -> bool {
        if !self.region_dialing_from_matches_number(phone_number, region_dialing_from) {
            return false;
        }
        let Some(metadata) = self.get_short_number_metadata_for_region(region_dialing_from) else {
            return false;
        };
        let number_length = PhoneNumberUtil::get_national_significant_number(phone_number).len();
        metadata
            .general_desc
            .possible_length
            .contains(&(number_length as i32))
    }

    /// Check whether a short number is a possible number. If a country calling
    /// code is shared by multiple regions, this returns true if it's possible
    /// in any of them. This provides a more lenient check than
    /// [`Self::is_valid_short_number`].
    pub fn is_possible_short_number(&self, phone_number: &PhoneNumber) -> bool {
        let short_number_length =
            PhoneNumberUtil::get_national_significant_number(phone_number).len() as i32;
        self.get_region_codes_for_country_code(phone_number.country_code())
            .iter()
            .filter_map(|region_code| self.get_short_number_metadata_for_region(region_code))
            .any(|metadata| {
                metadata
                    .general_desc
                    .possible_length
                    .contains(&short_number_length)
            })
    }

    /// Tests whether a short number matches a valid pattern in a region. Note
    /// that this doesn't verify the number is actually in use, which is
    /// impossible to tell by just looking at the number itself.
    pub fn is_valid_short_number_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_dialing_from: &str,
    ) -> bool {
        if !self.region_dialing_from_matches_number(phone_number, region_dialing_from) {
            return false;
        }
        let Some(metadata) = self.get_short_number_metadata_for_region(region_dialing_from) else {
            return false;
        };
        let short_number = PhoneNumberUtil::get_national_significant_number(phone_number);
        if !self.matches_possible_number_and_national_number(&short_number, &metadata.general_desc) {
            return false;
        }
        self.matches_possible_number_and_national_number(&short_number, &metadata.short_code)
    }

    /// Tests whether a short number matches a valid pattern. If a country
    /// calling code is shared by multiple regions, this returns true if it's
    /// valid in any of them. Note that this doesn't verify the number is
    /// actually in use, which is impossible to tell by just looking at the
    /// number itself.
    pub fn is_valid_short_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_codes = self.get_region_codes_for_country_code(phone_number.country_code());
        let region_code = self.get_region_code_for_short_number_from_region_list(phone_number, region_codes);
        match region_code {
            // If a matching region had been found for the phone number from among
            // two or more regions, then we have already implicitly verified its
            // validity for that region.
            Some(_) if region_codes.len() > 1 => true,
            Some(region_code) => self.is_valid_short_number_for_region(phone_number, region_code),
            None => false,
        }
    }

    /// Gets the expected cost category of a short number when dialed from a
    /// region (however, nothing is implied about its validity). If it is
    /// important that the number is valid, then its validity must first be
    /// checked using [`Self::is_valid_short_number_for_region`]. Note that
    /// emergency numbers are always considered toll-free.
    ///
    /// Returns `UnknownCost` if the number does not match a cost category.
    /// Note that an invalid number may match any cost category.
    pub fn get_expected_cost_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_dialing_from: &str,
    ) -> ShortNumberCost {
        if !self.region_dialing_from_matches_number(phone_number, region_dialing_from) {
            return ShortNumberCost::UnknownCost;
        }
        // Note that region_dialing_from may be None, in which case metadata will
        // also be None.
        let Some(metadata) = self.get_short_number_metadata_for_region(region_dialing_from) else {
            return ShortNumberCost::UnknownCost;
        };
        let short_number = PhoneNumberUtil::get_national_significant_number(phone_number);

        // The possible lengths are not present for a particular sub-type if they
        // match the general description; for this reason, we check the possible
        // lengths against the general description first to allow an early exit
        // if possible.
        if !metadata
            .general_desc
            .possible_length
            .contains(&(short_number.len() as i32))
        {
            return ShortNumberCost::UnknownCost;
        }

        // The cost categories are tested in order of decreasing expense, since if
        // for some reason the patterns overlap the most expensive matching cost
        // category should be returned.
        if self.matches_possible_number_and_national_number(&short_number, &metadata.premium_rate) {
            trace!("Short number '{short_number}' is premium rate in {region_dialing_from}");
            return ShortNumberCost::PremiumRate;
        }
        if self.matches_possible_number_and_national_number(&short_number, &metadata.standard_rate) {
            return ShortNumberCost::StandardRate;
        }
        if self.matches_possible_number_and_national_number(&short_number, &metadata.toll_free) {
            return ShortNumberCost::TollFree;
        }
        if self.is_emergency_number(&short_number, region_dialing_from) {
            // Emergency numbers are implicitly toll-free.
            return ShortNumberCost::TollFree;
        }
        ShortNumberCost::UnknownCost
    }

    /// Gets the expected cost category of a short number (however, nothing is
    /// implied about its validity). If the country calling code is unique to a
    /// region, this method behaves exactly the same as
    /// [`Self::get_expected_cost_for_region`]. However, if the country calling
    /// code is shared by multiple regions, then it returns the highest cost in
    /// the sequence `PremiumRate`, `UnknownCost`, `StandardRate`, `TollFree`.
    /// The reason for the position of `UnknownCost` in this order is that if
    /// a number is `UnknownCost` in one region but `StandardRate` or
    /// `TollFree` in another, its expected cost cannot be estimated as one of
    /// the latter since it might be a `PremiumRate` number.
    ///
    /// For example, if a number is `StandardRate` in the US, but `TollFree`
    /// in Canada, the expected cost returned by this method will be
    /// `StandardRate`, since the NANPA countries share the same country calling
    /// code.
    pub fn get_expected_cost(&self, phone_number: &PhoneNumber) -> ShortNumberCost {
        let region_codes = self.get_region_codes_for_country_code(phone_number.country_code());
        match region_codes {
            [] => return ShortNumberCost::UnknownCost,
            [region_code] => return self.get_expected_cost_for_region(phone_number, region_code),
            _ => {}
        }
        let mut cost = ShortNumberCost::TollFree;
        for region_code in region_codes {
            match self.get_expected_cost_for_region(phone_number, region_code) {
                ShortNumberCost::PremiumRate => return ShortNumberCost::PremiumRate,
                ShortNumberCost::UnknownCost => cost = ShortNumberCost::UnknownCost,
                ShortNumberCost::StandardRate => {
                    if cost != ShortNumberCost::UnknownCost {
                        cost = ShortNumberCost::StandardRate;
                    }
                }
                // Do nothing.
                ShortNumberCost::TollFree => {}
            }
        }
        cost
    }

    /// Helper method to get the region code for a given phone number, from a
    /// list of possible region codes. If the list contains more than one
    /// region, the first region for which the number is valid is returned.
    fn get_region_code_for_short_number_from_region_list<'r>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &'r [String],
    ) -> Option<&'r str> {
        match region_codes {
            [] => return None,
            [region_code] => return Some(region_code.as_str()),
            _ => {}
        }
        let national_number = PhoneNumberUtil::get_national_significant_number(phone_number);
        region_codes
            .iter()
            .find(|region_code| {
                self.get_short_number_metadata_for_region(region_code)
                    .is_some_and(|metadata| {
                        self.matches_possible_number_and_national_number(
                            &national_number,
                            &metadata.short_code,
                        )
                    })
            })
            .map(String::as_str)
    }

    /// Gets a valid short number for the specified region. Returns an empty
    /// string when the metadata does not contain such information.
    pub fn get_example_short_number(&self, region_code: &str) -> String {
        self.get_short_number_metadata_for_region(region_code)
            .map(|metadata| metadata.short_code.example_number().to_owned())
            .unwrap_or_default()
    }

    /// Gets a valid short number for the specified cost category. Returns an
    /// empty string when the metadata does not contain such information, or
    /// the cost is `UnknownCost`.
    pub fn get_example_short_number_for_cost(
        &self,
        region_code: &str,
        cost: ShortNumberCost,
    ) -> String {
        let Some(metadata) = self.get_short_number_metadata_for_region(region_code) else {
            return String::new();
        };
        let desc = match cost {
            ShortNumberCost::TollFree => &metadata.toll_free,
            ShortNumberCost::StandardRate => &metadata.standard_rate,
            ShortNumberCost::PremiumRate => &metadata.premium_rate,
            // UnknownCost numbers are computed by the process of elimination
            // from the other cost categories.
            ShortNumberCost::UnknownCost => return String::new(),
        };
        desc.example_number().to_owned()
    }

    /// Returns true if the given number, exactly as dialed, might be used to
    /// connect to an emergency service in the given region.
    ///
    /// This method accepts a string, rather than a PhoneNumber, because it
    /// needs to distinguish cases such as "+1 911" and "911", where the former
    /// may not connect to an emergency service in all cases but the latter
    /// would. This method takes into account cases where the number might
    /// contain formatting, or might have additional digits appended (when it is
    /// okay to do that in the specified region).
    pub fn connects_to_emergency_number(&self, number: &str, region_code: &str) -> bool {
        self.matches_emergency_number_helper(number, region_code, true)
    }

    /// Returns true if the given number exactly matches an emergency service
    /// number in the given region.
    ///
    /// This method takes into account cases where the number might contain
    /// formatting, but doesn't allow additional digits to be appended. Note
    /// that `is_emergency_number(number, region)` implies
    /// `connects_to_emergency_number(number, region)`.
    pub fn is_emergency_number(&self, number: &str, region_code: &str) -> bool {
        self.matches_emergency_number_helper(number, region_code, false)
    }

    fn matches_emergency_number_helper(
        &self,
        number: &str,
        region_code: &str,
        allow_prefix_match: bool,
    ) -> bool {
        let Ok(possible_number) = extract_possible_number(&self.reg_exps, number) else {
            return false;
        };
        if self.reg_exps.plus_chars_pattern.is_match(possible_number) {
            // Returns false if the number starts with a plus sign. We don't believe
            // dialing the country code before emergency numbers (e.g. +1911) works,
            // but later, if that proves to work, we can add additional logic here to
            // handle it.
            return false;
        }
        let Some(metadata) = self.get_short_number_metadata_for_region(region_code) else {
            return false;
        };
        if metadata.emergency.is_none() {
            return false;
        }
        let normalized_number = normalize_digits_only(possible_number);
        let allow_prefix_match_for_region = allow_prefix_match
            && !REGIONS_WHERE_EMERGENCY_NUMBERS_MUST_BE_EXACT.contains(&region_code);
        self.matcher_api.match_national_number(
            &normalized_number,
            &metadata.emergency,
            allow_prefix_match_for_region,
        )
    }

    /// Given a valid short number, determines whether it is carrier-specific
    /// (however, nothing is implied about its validity). Carrier-specific
    /// numbers may connect to a different end-point, or not connect at all,
    /// depending on the user's carrier. If it is important that the number is
    /// valid, then its validity must first be checked using
    /// [`Self::is_valid_short_number`].
    pub fn is_carrier_specific(&self, phone_number: &PhoneNumber) -> bool {
        let region_codes = self.get_region_codes_for_country_code(phone_number.country_code());
        let Some(region_code) =
            self.get_region_code_for_short_number_from_region_list(phone_number, region_codes)
        else {
            return false;
        };
        let national_number = PhoneNumberUtil::get_national_significant_number(phone_number);
        self.get_short_number_metadata_for_region(region_code)
            .is_some_and(|metadata| {
                self.matches_possible_number_and_national_number(
                    &national_number,
                    &metadata.carrier_specific,
                )
            })
    }

    /// Given a valid short number, determines whether it is carrier-specific
    /// when dialed from the given region (however, nothing is implied about its
    /// validity). Returns false if the number doesn't match the region
    /// provided.
    pub fn is_carrier_specific_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_dialing_from: &str,
    ) -> bool {
        self.matches_desc_for_region(phone_number, region_dialing_from, |metadata| {
            &*metadata.carrier_specific
        })
    }

    /// Given a valid short number, determines whether it is an SMS service
    /// (however, nothing is implied about its validity). An SMS service is
    /// where the primary or only intended usage is to receive and/or send text
    /// messages (SMSs). This includes MMS as MMS numbers downgrade to SMS if
    /// the other party isn't MMS-capable. Returns false if the number doesn't
    /// match the region provided.
    pub fn is_sms_service_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_dialing_from: &str,
    ) -> bool {
        self.matches_desc_for_region(phone_number, region_dialing_from, |metadata| {
            &*metadata.sms_services
        })
    }

    fn matches_desc_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_dialing_from: &str,
        desc: impl FnOnce(&PhoneMetadata) -> &PhoneNumberDesc,
    ) -> bool {
        if !self.region_dialing_from_matches_number(phone_number, region_dialing_from) {
            return false;
        }
        let national_number = PhoneNumberUtil::get_national_significant_number(phone_number);
        self.get_short_number_metadata_for_region(region_dialing_from)
            .is_some_and(|metadata| {
                self.matches_possible_number_and_national_number(&national_number, desc(&metadata))
            })
    }

    /// Checks the possible lengths before running the pattern.
    fn matches_possible_number_and_national_number(
        &self,
        number: &str,
        number_desc: &PhoneNumberDesc,
    ) -> bool {
        if !number_desc.possible_length.is_empty()
            && !number_desc.possible_length.contains(&(number.len() as i32))
        {
            return false;
        }
        self.matcher_api
            .match_national_number(number, number_desc, false)
    }
}
