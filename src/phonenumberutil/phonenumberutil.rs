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

use std::{
    cmp::max,
    collections::HashSet,
    sync::Arc,
};

use log::{error, trace, warn};

use super::phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings;
use crate::{
    i18n,
    interfaces::{MatcherApi, MetadataSource},
    metadata::{CallingCodeMap, CollectionMetadataSource, MetadataCache},
    phonenumber::PhoneNumber,
    phonenumberutil::{
        errors::{GetExampleNumberError, ParseError, ValidationError},
        helper_constants::{MIN_LENGTH_FOR_NSN, NANPA_COUNTRY_CODE, PLUS_SIGN, REGION_CODE_FOR_NON_GEO_ENTITY},
        helper_functions::{
            get_number_desc_by_type, get_supported_types_for_metadata, test_number_length,
        },
        NumberLengthType, PhoneNumberFormat, PhoneNumberType,
    },
    proto_gen::phonemetadata::{PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
    regex_based_matcher::RegexBasedMatcher,
    regex_util::{RegexConsume, RegexFullMatch},
    regexp_cache::RegexPattern,
};

// Helper type for Result
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parses, formats and validates international phone numbers.
///
/// An instance owns its regular expression cache and a lazily filled view of
/// the metadata it was built from; it is `Send + Sync` and meant to be shared
/// (for example behind an `Arc`) by every thread that needs it.
pub struct PhoneNumberUtil {
    /// An API for validation checking.
    matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character mappings.
    pub(super) reg_exps: PhoneNumberRegExpsAndMappings,

    /// A mapping from a country calling code to the region codes which denote
    /// the regions represented by that country calling code. Note regions under
    /// NANPA share the country calling code 1 and Russia and Kazakhstan share the
    /// country calling code 7. The main country for a code is always listed
    /// first.
    calling_codes: Arc<CallingCodeMap>,

    /// The set of regions that share country calling code 1.
    nanpa_regions: HashSet<String>,

    /// Per-region and per non-geographical entity metadata, fetched on first
    /// use.
    metadata: MetadataCache,
}

impl PhoneNumberUtil {
    /// Builds an engine over `source`. `calling_codes` must list every region
    /// and non-geographical entity the source can answer for.
    pub fn new(source: Arc<dyn MetadataSource>, calling_codes: Arc<CallingCodeMap>) -> Self {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        let nanpa_regions = calling_codes
            .region_codes_for(NANPA_COUNTRY_CODE)
            .iter()
            .cloned()
            .collect();
        Self {
            matcher_api: Box::new(RegexBasedMatcher::new(reg_exps.regexp_cache.clone())),
            reg_exps,
            calling_codes,
            nanpa_regions,
            metadata: MetadataCache::new(source),
        }
    }

    /// Builds an engine over an in-memory metadata collection.
    pub fn new_for_metadata(collection: PhoneMetadataCollection) -> Self {
        let calling_codes = Arc::new(CallingCodeMap::from_collection(&collection));
        let source = Arc::new(CollectionMetadataSource::from_collection(collection));
        Self::new(source, calling_codes)
    }

    /// The calling code table this engine was built with.
    pub fn calling_codes(&self) -> &Arc<CallingCodeMap> {
        &self.calling_codes
    }

    /// Region codes (`"US"`, `"GB"`...) the library has metadata for. Entries for
    /// non-geographical entities are not included.
    pub fn get_supported_regions(&self) -> impl Iterator<Item = &str> {
        self.calling_codes
            .iter()
            .flat_map(|(_, regions)| regions.iter())
            .map(String::as_str)
            .filter(|region| *region != REGION_CODE_FOR_NON_GEO_ENTITY)
    }

    /// Country calling codes of the non-geographical entities, such as 800.
    pub fn get_supported_global_network_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.calling_codes
            .iter()
            .filter(|(_, regions)| {
                regions
                    .iter()
                    .any(|region| region == REGION_CODE_FOR_NON_GEO_ENTITY)
            })
            .map(|(code, _)| code)
    }

    /// Every country calling code the library has metadata for, geographical
    /// or not.
    pub fn get_supported_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.calling_codes.iter().map(|(code, _)| code)
    }

    /// Returns the types for a given region which the library has metadata for.
    /// Will not include [`PhoneNumberType::FixedLineOrMobile`] (if numbers in this
    /// region could be classified as that type, both fixed-line and mobile
    /// are present instead) nor [`PhoneNumberType::Unknown`].
    ///
    /// Returns `None` for unsupported regions.
    pub fn get_supported_types_for_region(
        &self,
        region_code: &str,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code provided: {region_code}");
            return None;
        };
        Some(get_supported_types_for_metadata(&metadata))
    }

    /// Same as [`Self::get_supported_types_for_region`] for a non-geographical
    /// entity.
    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.get_metadata_for_non_geographical_region(country_calling_code)
        else {
            warn!("Unknown country calling code for a non-geographical entity provided: {country_calling_code}");
            return None;
        };
        Some(get_supported_types_for_metadata(&metadata))
    }

    pub fn get_metadata_for_region(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        if region_code == REGION_CODE_FOR_NON_GEO_ENTITY {
            return None;
        }
        self.metadata.for_region(region_code)
    }

    pub fn get_metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<Arc<PhoneMetadata>> {
        if !self.calling_codes.contains(country_calling_code) {
            return None;
        }
        self.metadata.for_non_geo_region(country_calling_code)
    }

    pub(super) fn get_metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<Arc<PhoneMetadata>> {
        if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
            self.get_metadata_for_non_geographical_region(country_calling_code)
        } else {
            self.get_metadata_for_region(region_code)
        }
    }

    /// Checks whether a region code is one the library supports. `"001"` is
    /// not: non-geographical entities are addressed by calling code.
    pub fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.get_metadata_for_region(region_code).is_some()
    }

    pub fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.calling_codes.contains(country_calling_code)
    }

    /// Returns the region code that matches the specific country calling code. In
    /// the case of no region code being found, the unknown region code will be
    /// returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.calling_codes
            .main_region_for(country_calling_code)
            .unwrap_or(i18n::RegionCode::get_unknown())
    }

    /// Returns the region codes that matches the specific country calling code.
    /// The slice is empty for unknown codes.
    pub fn get_region_codes_for_country_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.calling_codes.region_codes_for(country_calling_code)
    }

    /// Returns the country calling code for a specific region, or 0 if the
    /// region is unknown or is `"001"`.
    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        match self.get_metadata_for_region(region_code) {
            Some(metadata) => metadata.country_code(),
            None => {
                warn!("Invalid or unknown region code provided: {region_code}");
                0
            }
        }
    }

    /// Returns the national dialling prefix for a specific region. For example,
    /// this would be `1` for the United States, and `0` for New Zealand. Set
    /// `strip_non_digits` to true to strip symbols like `~` (which indicates a
    /// wait for a dialling tone) from the prefix returned.
    ///
    /// Returns `None` if the region is unknown or has no national prefix.
    pub fn get_ndd_prefix_for_region(
        &self,
        region_code: &str,
        strip_non_digits: bool,
    ) -> Option<String> {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            warn!("Invalid or missing region code ({region_code}) provided.");
            return None;
        };
        let national_prefix = metadata.national_prefix();
        if national_prefix.is_empty() {
            return None;
        }
        if strip_non_digits {
            // Note: if any other non-numeric symbols are ever used in national
            // prefixes, these would have to be removed here as well.
            Some(national_prefix.replace('~', ""))
        } else {
            Some(national_prefix.to_owned())
        }
    }

    /// Checks if this region is a NANPA region.
    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }

    /// Returns true if the supplied region supports mobile number portability.
    /// Returns false for invalid, unknown or regions that don't support mobile
    /// number portability.
    pub fn is_mobile_number_portable_region(&self, region_code: &str) -> bool {
        match self.get_metadata_for_region(region_code) {
            Some(metadata) => metadata.mobile_number_portable_region(),
            None => {
                warn!("Invalid or unknown region code provided: {region_code}");
                false
            }
        }
    }

    /// Gets the national significant number of a phone number. Note a national
    /// significant number doesn't contain a national prefix or any formatting.
    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        // If leading zero(s) have been set, we prefix this now. Note this is not a
        // national prefix. Ensure the number of leading zeros is at least 0 so we
        // don't crash in the case of malicious input.
        let zeros_start = if phone_number.italian_leading_zero() {
            "0".repeat(max(phone_number.number_of_leading_zeros(), 0) as usize)
        } else {
            String::new()
        };
        fast_cat::concat_str!(&zeros_start, phone_number.national_number())
    }

    /// Gets the type of a valid phone number.
    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(phone_number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, &metadata)
    }

    /// Tests whether a phone number matches a valid pattern. Note this doesn't
    /// verify the number is actually in use, which is impossible to tell by just
    /// looking at a number itself.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        self.is_valid_number_for_region(phone_number, region_code)
    }

    /// Tests whether a phone number is valid for a certain region. Note this
    /// doesn't verify the number is actually in use. If the country calling code
    /// is not the same as the country calling code for the region, this
    /// immediately exits with false. After this, the specific number pattern
    /// rules for the region are examined. This is useful for determining for
    /// example whether a particular number is valid for Canada, rather than just
    /// a valid NANPA number.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if REGION_CODE_FOR_NON_GEO_ENTITY != region_code && country_code != metadata.country_code() {
            // Either the region code was invalid, or the country calling code for
            // this number does not match that of the region code.
            return false;
        }
        let national_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_number, &metadata) != PhoneNumberType::Unknown
    }

    /// Returns the region where a phone number is from. This could be used for
    /// geocoding at the region level. Only guarantees correct results for valid,
    /// full numbers (not short-codes, or invalid numbers).
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> &str {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.get_region_codes_for_country_calling_code(country_calling_code);
        match region_codes {
            [] => {
                trace!("Missing/invalid country calling code ({country_calling_code})");
                i18n::RegionCode::get_unknown()
            }
            [single] => single.as_str(),
            _ => self.get_region_code_for_number_from_region_list(phone_number, region_codes),
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &'b [String],
    ) -> &'b str {
        let national_number = Self::get_national_significant_number(phone_number);
        for code in region_codes {
            let Some(metadata) = self.get_metadata_for_region(code) else {
                continue;
            };
            if metadata.has_leading_digits() {
                if self.looking_at(metadata.leading_digits(), &national_number) {
                    return code;
                }
            } else if self.get_number_type_helper(&national_number, &metadata)
                != PhoneNumberType::Unknown
            {
                return code;
            }
        }
        i18n::RegionCode::get_unknown()
    }

    pub(super) fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, &metadata.general_desc) {
            trace!("Number '{national_number}' type unknown - doesn't match general national number pattern");
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, &metadata.premium_rate) {
            trace!("Number '{national_number}' is a premium number.");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, &metadata.toll_free) {
            trace!("Number '{national_number}' is a toll-free number.");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, &metadata.shared_cost) {
            trace!("Number '{national_number}' is a shared cost number.");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, &metadata.voip) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, &metadata.personal_number) {
            trace!("Number '{national_number}' is a personal number.");
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, &metadata.pager) {
            trace!("Number '{national_number}' is a pager number.");
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, &metadata.uan) {
            trace!("Number '{national_number}' is a UAN.");
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, &metadata.voicemail) {
            trace!("Number '{national_number}' is a voicemail number.");
            return PhoneNumberType::VoiceMail;
        }

        let is_fixed_line = self.is_number_matching_desc(national_number, &metadata.fixed_line);
        if is_fixed_line {
            if metadata.same_mobile_and_fixed_line_pattern() {
                trace!("Number '{national_number}': fixed-line and mobile patterns equal, number is fixed-line or mobile");
                return PhoneNumberType::FixedLineOrMobile;
            } else if self.is_number_matching_desc(national_number, &metadata.mobile) {
                trace!("Number '{national_number}': Fixed-line and mobile patterns differ, but number is still fixed-line or mobile");
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if certain
        // that the patterns for mobile and fixed line aren't the same.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, &metadata.mobile)
        {
            trace!("Number '{national_number}' is a mobile number.");
            return PhoneNumberType::Mobile;
        }
        trace!("Number '{national_number}' type unknown - doesn't match any specific number type pattern.");
        PhoneNumberType::Unknown
    }

    pub(super) fn is_number_matching_desc(
        &self,
        national_number: &str,
        number_desc: &PhoneNumberDesc,
    ) -> bool {
        // Check if any possible number lengths are present; if so, we use them to
        // avoid checking the validation pattern if they don't match. If they are
        // absent, this means they match the general description, which we have
        // already checked before checking a specific number type.
        let actual_length = national_number.chars().count() as i32;
        if !number_desc.possible_length.is_empty()
            && !number_desc.possible_length.contains(&actual_length)
        {
            return false;
        }
        self.matcher_api
            .match_national_number(national_number, number_desc, false)
    }

    pub(super) fn matches_national_number(
        &self,
        national_number: &str,
        number_desc: &PhoneNumberDesc,
    ) -> bool {
        self.matcher_api
            .match_national_number(national_number, number_desc, false)
    }

    /// Convenience wrapper around [`Self::is_possible_number_with_reason`].
    /// Instead of returning the reason for failure, this method returns true if
    /// the number is either a possible fully-qualified number (containing the
    /// area code and country code), or if the number could be a possible local
    /// number (with a country code, but missing an area code).
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Like [`Self::is_possible_number`] but only considers the lengths of the
    /// given type.
    pub fn is_possible_number_for_type(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> bool {
        self.is_possible_number_for_type_with_reason(phone_number, phone_number_type)
            .is_ok()
    }

    /// Check whether a phone number is a possible number. It provides a more
    /// lenient check than [`Self::is_valid_number`] in the following sense:
    ///
    /// 1. It only checks the length of phone numbers. In particular, it doesn't
    ///    check starting digits of the number.
    /// 2. For some numbers (particularly fixed-line), many regions have the
    ///    concept of area code, which together with subscriber number constitute
    ///    the national significant number. It is sometimes okay to dial only the
    ///    subscriber number when dialing in the same area. This function will
    ///    return [`NumberLengthType::IsPossibleLocalOnly`] if the subscriber-number-only
    ///    version is passed in.
    /// 3. This method first checks the country calling code. If it is invalid,
    ///    [`ValidationError::InvalidCountryCode`] is returned.
    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> std::result::Result<NumberLengthType, ValidationError> {
        self.is_possible_number_for_type_with_reason(phone_number, PhoneNumberType::Unknown)
    }

    pub fn is_possible_number_for_type_with_reason(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> std::result::Result<NumberLengthType, ValidationError> {
        let national_number = Self::get_national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Note: For regions that share a country calling code, like NANPA numbers,
        // we just use the rules from the default region (US in this case) since the
        // get_region_code_for_number will not work if the number is possible but
        // not valid. There is in fact one country calling code (290) where the
        // possible number pattern differs between various regions (Saint Helena
        // and Tristan da Cuñha), but this is handled by putting all possible
        // lengths for any country with this country calling code in the metadata
        // for the default region in this case.
        if !self.has_valid_country_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        // Metadata cannot be missing because the country calling code is valid.
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return Err(ValidationError::InvalidCountryCode);
        };
        test_number_length(&national_number, &metadata, phone_number_type)
    }

    /// Checks whether a phone number string is a possible number when dialled
    /// from `region_dialing_from`. Strings that can't be parsed are not
    /// possible.
    pub fn is_possible_number_for_string(&self, phone_number: &str, region_dialing_from: &str) -> bool {
        match self.parse(phone_number, region_dialing_from) {
            Ok(number) => self.is_possible_number(&number),
            Err(err) => {
                trace!("Could not parse {phone_number:?} as a possible number: {err}");
                false
            }
        }
    }

    /// Tests whether a phone number has a geographical association. It checks
    /// if the number is associated with a certain region in the country to which
    /// it belongs. Note that this doesn't verify if the number is actually in
    /// use.
    pub fn is_number_geographical(&self, phone_number: &PhoneNumber) -> bool {
        self.is_number_geographical_for_type(
            self.get_number_type(phone_number),
            phone_number.country_code(),
        )
    }

    /// Overload of [`Self::is_number_geographical`], since calculating the
    /// phone number type is expensive; if we have already done this, we don't
    /// want to do it again.
    pub fn is_number_geographical_for_type(
        &self,
        phone_number_type: PhoneNumberType,
        country_calling_code: i32,
    ) -> bool {
        matches!(
            phone_number_type,
            PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile
        ) || (self
            .reg_exps
            .geo_mobile_countries
            .contains(&country_calling_code)
            && phone_number_type == PhoneNumberType::Mobile)
    }

    /// Gets the length of the geographical area code from the national number
    /// of a phone number. Returns 0 when the number has no area code, which is
    /// the case for non-geographical numbers, numbers from regions that don't
    /// use area codes, and numbers the library can't classify.
    pub fn get_length_of_geographical_area_code(&self, phone_number: &PhoneNumber) -> usize {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return 0;
        };
        let country_calling_code = phone_number.country_code();
        // If a country doesn't use a national prefix, and this number doesn't have
        // an Italian leading zero, we assume it is a closed dialling plan with no
        // area codes.
        if !metadata.has_national_prefix()
            && !phone_number.italian_leading_zero()
            && !self
                .reg_exps
                .countries_without_national_prefix_with_area_codes
                .contains(&country_calling_code)
        {
            return 0;
        }
        let phone_number_type = self.get_number_type(phone_number);
        if phone_number_type == PhoneNumberType::Mobile
            // Note this is a rough heuristic; it doesn't cover Indonesia well, for
            // example, where area codes are present for some mobile phones but not
            // for others.
            && self
                .reg_exps
                .geo_mobile_countries_without_mobile_area_codes
                .contains(&country_calling_code)
        {
            return 0;
        }
        if !self.is_number_geographical_for_type(phone_number_type, country_calling_code) {
            return 0;
        }
        self.get_length_of_national_destination_code(phone_number)
    }

    /// Gets the length of the national destination code (NDC) from a phone
    /// number. The NDC is the digit group that follows the country calling code
    /// when the number is formatted internationally. Returns 0 if the formatted
    /// number has no separate NDC group.
    pub fn get_length_of_national_destination_code(&self, phone_number: &PhoneNumber) -> usize {
        let mut copied_number;
        let number_without_extension = if phone_number.has_extension() {
            // We don't want to alter the proto given to us, but we don't want to
            // include the extension when we format it, so we copy it and clear the
            // extension here.
            copied_number = phone_number.clone();
            copied_number.clear_extension();
            &copied_number
        } else {
            phone_number
        };
        let formatted_number = self.format(number_without_extension, PhoneNumberFormat::International);
        // The formatted number starts with "+COUNTRY_CODE " so the first digit
        // group is the country calling code and the second is the area code, if
        // it is not the last group.
        let digit_groups: Vec<&str> = self
            .reg_exps
            .capturing_ascii_digits_pattern
            .find_iter(&formatted_number)
            .map(|group| group.as_str())
            .collect();
        if digit_groups.len() <= 2 {
            return 0;
        }
        if self.get_number_type(phone_number) == PhoneNumberType::Mobile
            && self.get_country_mobile_token(phone_number.country_code()).is_some()
        {
            // For example Argentinian mobile numbers, when formatted in the
            // international format, are in the form of +54 9 NDC XXXX.... As a
            // result, we take the length of the third group (NDC) and add the
            // length of the mobile token, which also forms part of the national
            // significant number. This assumes that the mobile token is always
            // formatted separately from the rest of the phone number.
            return digit_groups[1].len() + digit_groups.get(2).map_or(0, |group| group.len());
        }
        digit_groups[1].len()
    }

    /// Returns the mobile token for the provided country calling code if it has
    /// one. A mobile token is a number inserted before the area code when
    /// dialing a mobile number from that country from abroad.
    pub fn get_country_mobile_token(&self, country_calling_code: i32) -> Option<char> {
        self.reg_exps
            .mobile_token_mappings
            .get(&country_calling_code)
            .copied()
    }

    /// Returns true if the number can be dialled from outside the region, or
    /// unknown. If the number can only be dialled from within the region,
    /// returns false. Does not check the number is a valid number. Note that,
    /// at the moment, this method does not handle short numbers (which are
    /// currently all presumed to not be diallable from outside their country).
    pub fn can_be_internationally_dialled(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            // Note numbers belonging to non-geographical entities (e.g. +800 numbers)
            // are always internationally diallable, and will be caught here.
            return true;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        !self.is_number_matching_desc(
            &national_significant_number,
            &metadata.no_international_dialling,
        )
    }

    /// Attempts to extract a valid number from a phone number that is too long
    /// to be valid, and resets the phone number with the valid version.
    ///
    /// Returns true if a valid phone number can be successfully extracted; in
    /// that case `phone_number` now holds it. Otherwise `phone_number` is left
    /// untouched.
    pub fn truncate_too_long_number(&self, phone_number: &mut PhoneNumber) -> bool {
        if self.is_valid_number(phone_number) {
            return true;
        }
        let mut number_copy = phone_number.clone();
        let mut national_number = phone_number.national_number().to_owned();
        loop {
            national_number.pop();
            if national_number.is_empty() {
                return false;
            }
            number_copy.set_national_number(national_number.as_str());
            if self.is_possible_number_with_reason(&number_copy) == Err(ValidationError::TooShort) {
                return false;
            }
            if self.is_valid_number(&number_copy) {
                break;
            }
        }
        phone_number.set_national_number(national_number);
        true
    }

    /// Gets a valid fixed-line number for the specified region.
    pub fn get_example_number(
        &self,
        region_code: &str,
    ) -> std::result::Result<PhoneNumber, GetExampleNumberError> {
        self.get_example_number_for_type_and_region_code(region_code, PhoneNumberType::FixedLine)
    }

    /// Gets an invalid number for the specified region. This is useful for unit
    /// testing purposes, where you want to test what will happen with an
    /// invalid number. Note that the number that is returned will always be
    /// able to be parsed and will have the correct country code. It may also be
    /// a valid *short* number/code for this region.
    pub fn get_invalid_example_number(
        &self,
        region_code: &str,
    ) -> std::result::Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({region_code}) provided.");
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        // We start off with a valid fixed-line number since every country supports
        // this. Alternatively we could start with a different number type, since
        // fixed-line numbers typically have a wide breadth of valid number ranges.
        let desc = get_number_desc_by_type(&metadata, PhoneNumberType::FixedLine);
        if !desc.has_example_number() {
            // This shouldn't happen; we have a test for this.
            return Err(GetExampleNumberError::NoExampleNumber);
        }
        let example_number = desc.example_number();
        // Try and make the number invalid. We do this by changing the length. We
        // try reducing the length of the number, since currently no region has a
        // number that is the same length as MIN_LENGTH_FOR_NSN. This is probably
        // quicker than making the number longer, which is another alternative. We
        // could also use the possible number pattern to extract the possible
        // lengths of the number to make this faster, but this method is only for
        // unit-testing so simplicity is preferred to performance. We don't want to
        // return a number that can't be parsed, so we check the number is long
        // enough. We try all possible lengths because phone number plans often
        // have overlapping prefixes so the number 123456 might be valid as a
        // fixed-line number, and 12345 as a mobile number. It would be faster to
        // loop in a different order, but we prefer numbers that look closer to
        // real numbers (and it gives us a variety of different lengths for the
        // resulting phone numbers - otherwise they would all be
        // MIN_LENGTH_FOR_NSN digits long.)
        for phone_number_length in (MIN_LENGTH_FOR_NSN..example_number.len()).rev() {
            let number_to_try = &example_number[..phone_number_length];
            match self.parse(number_to_try, region_code) {
                Ok(possibly_valid_number) if !self.is_valid_number(&possibly_valid_number) => {
                    return Ok(possibly_valid_number);
                }
                Ok(_) => {}
                Err(err) => trace!("Could not parse {number_to_try:?} as an invalid example: {err}"),
            }
        }
        // We have a test to check that this doesn't happen for any of our
        // supported regions.
        Err(GetExampleNumberError::CouldNotGetNumber)
    }

    /// Gets a valid number for the specified region and number type.
    pub fn get_example_number_for_type_and_region_code(
        &self,
        region_code: &str,
        phone_number_type: PhoneNumberType,
    ) -> std::result::Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({region_code}) provided.");
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        let desc = get_number_desc_by_type(&metadata, phone_number_type);
        if !desc.has_example_number() {
            return Err(GetExampleNumberError::NoExampleNumber);
        }
        self.parse(desc.example_number(), region_code)
            .map_err(|err| {
                error!("Error parsing example number ({phone_number_type:?}): {err}");
                GetExampleNumberError::FailedToParse(err)
            })
    }

    /// Gets a valid number for the specified number type (it may belong to any
    /// country). Regions are tried first, then non-geographical entities.
    pub fn get_example_number_for_type(
        &self,
        phone_number_type: PhoneNumberType,
    ) -> std::result::Result<PhoneNumber, GetExampleNumberError> {
        for region_code in self.get_supported_regions() {
            if let Ok(example_number) =
                self.get_example_number_for_type_and_region_code(region_code, phone_number_type)
            {
                return Ok(example_number);
            }
        }
        // If there wasn't an example number for a region, try the non-geographical
        // entities.
        for country_calling_code in self.get_supported_global_network_calling_codes() {
            let Some(metadata) = self.get_metadata_for_non_geographical_region(country_calling_code)
            else {
                continue;
            };
            let desc = get_number_desc_by_type(&metadata, phone_number_type);
            if desc.has_example_number() {
                return self.parse_non_geo_example(country_calling_code, desc.example_number());
            }
        }
        // There are no example numbers of this type for any country in the library.
        Err(GetExampleNumberError::CouldNotGetNumber)
    }

    /// Gets a valid number for the specified country calling code for a
    /// non-geographical entity.
    pub fn get_example_number_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> std::result::Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self.get_metadata_for_non_geographical_region(country_calling_code)
        else {
            warn!("Invalid or unknown country calling code provided: {country_calling_code}");
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        // For geographical entities, fixed-line data is always present. However,
        // for non-geographical entities, this is not the case, so we have to go
        // through different types to find the example number. We don't check
        // fixed-line or personal number since they aren't used by
        // non-geographical entities (if this changes, a unit-test will catch
        // this.)
        let descs = [
            &metadata.mobile,
            &metadata.toll_free,
            &metadata.shared_cost,
            &metadata.voip,
            &metadata.voicemail,
            &metadata.uan,
            &metadata.premium_rate,
        ];
        for desc in descs {
            if desc.has_example_number() {
                return self.parse_non_geo_example(country_calling_code, desc.example_number());
            }
        }
        Err(GetExampleNumberError::NoExampleNumber)
    }

    fn parse_non_geo_example(
        &self,
        country_calling_code: i32,
        example_number: &str,
    ) -> std::result::Result<PhoneNumber, GetExampleNumberError> {
        let mut buf = itoa::Buffer::new();
        let full_number = fast_cat::concat_str!(
            PLUS_SIGN,
            buf.format(country_calling_code),
            example_number
        );
        self.parse(&full_number, i18n::RegionCode::get_unknown())
            .map_err(|err| {
                error!("Error parsing example number {full_number:?}: {err}");
                GetExampleNumberError::FailedToParse(err)
            })
    }

    /// Compiles a metadata pattern through the shared cache. Patterns that
    /// don't compile are logged and treated as matching nothing.
    pub(super) fn metadata_regex(&self, pattern: &str) -> Option<Arc<RegexPattern>> {
        match self.reg_exps.regexp_cache.get_regex(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                error!("Invalid metadata pattern {pattern:?}: {err}");
                None
            }
        }
    }

    /// Prefix match of a metadata pattern against `text`.
    pub(super) fn looking_at(&self, pattern: &str, text: &str) -> bool {
        self.metadata_regex(pattern)
            .is_some_and(|regex| regex.matches_start(text))
    }

    /// Whole-input match of a metadata pattern against `text`.
    pub(super) fn full_match(&self, pattern: &str, text: &str) -> bool {
        self.metadata_regex(pattern)
            .is_some_and(|regex| regex.full_match(text))
    }
}
