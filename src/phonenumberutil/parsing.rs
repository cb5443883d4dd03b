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

use std::borrow::Cow;

use log::trace;

use super::{
    errors::{ExtractNumberError, NotANumberError, ParseError, ValidationError},
    helper_constants::{
        MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
        PLUS_SIGN, RFC3966_ISDN_SUBADDRESS, RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
    },
    helper_functions::{normalize_digits_only, normalize_helper, test_number_length_with_unknown_type},
    helper_types::{ExtractedCountryCode, PhoneNumberWithCountryCodeSource, StrippedNationalNumber},
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
    phonenumberutil::{PhoneNumberUtil, Result},
    NumberLengthType,
};
use crate::{
    phonenumber::{CountryCodeSource, PhoneNumber},
    proto_gen::phonemetadata::PhoneMetadata,
    regex_util::{RegexConsume, RegexMatcher},
};

/// Attempts to extract a possible number from the string passed in. This
/// currently strips all leading characters that cannot be used to start a
/// phone number. Characters that can be used to start a phone number are
/// defined in the valid_start_char_pattern. If none of these characters are
/// found in the number passed in, an error is returned. This function also
/// attempts to strip off any alternative extensions or endings if two or more
/// are present, such as in the case of: (530) 583-6985 x302/x2303. The second
/// extension here makes this actually two phone numbers, (530) 583-6985 x302
/// and (530) 583-6985 x2303. We remove the second extension so that the first
/// number is parsed correctly.
pub(crate) fn extract_possible_number<'a>(
    reg_exps: &PhoneNumberRegExpsAndMappings,
    phone_number: &'a str,
) -> std::result::Result<&'a str, ExtractNumberError> {
    let Some(start) = reg_exps.valid_start_char_pattern.find(phone_number) else {
        return Err(ExtractNumberError::NoValidStartCharacter);
    };
    let mut number = &phone_number[start.start()..];
    // Remove trailing non-alpha non-numerical characters.
    if let Some(trailing_chars) = reg_exps.unwanted_end_chars_pattern.find(number) {
        number = &number[..trailing_chars.start()];
    }
    // Check for extra numbers at the end.
    if let Some(second_number) = reg_exps.second_number_start_pattern.find(number) {
        number = &number[..second_number.start()];
    }
    Ok(number)
}

/// Checks to see if the string of characters could possibly be a phone number
/// at all. At the moment, checks to see that the string begins with at least 2
/// digits, ignoring any punctuation commonly found in phone numbers. This
/// method does not require the number to be normalized in advance - but does
/// assume that leading non-number symbols have been removed, such as by
/// [`extract_possible_number`].
pub(crate) fn is_viable_phone_number(
    reg_exps: &PhoneNumberRegExpsAndMappings,
    phone_number: &str,
) -> bool {
    if phone_number.chars().count() < MIN_LENGTH_FOR_NSN {
        return false;
    }
    reg_exps.valid_phone_number_pattern.is_match(phone_number)
}

impl PhoneNumberUtil {
    /// Parses a string and returns it as a phone number.
    ///
    /// This method will throw away the raw input the number was parsed from,
    /// the country code source and any carrier code; use
    /// [`Self::parse_and_keep_raw_input`] to keep them.
    ///
    /// `default_region` is the region the number is expected to be from when
    /// it is not written in international format (the country calling code
    /// can't be inferred). If the number is guaranteed to start with a `+`
    /// followed by the country calling code, `"ZZ"` or an empty string can be
    /// supplied.
    ///
    /// The number may be written with formatting, letters (`1-800-FLOWERS`),
    /// an extension (`ext. 1234`, `;ext=1234`, `x1234`...) or as an RFC3966
    /// `tel:` URI.
    pub fn parse(&self, number_to_parse: &str, default_region: &str) -> Result<PhoneNumber> {
        self.parse_helper(number_to_parse, default_region, false, true)
    }

    /// Parses a string and returns it as a phone number in proto buffer
    /// format, keeping the raw input, the country code source and any
    /// domestic carrier code found in the input.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber> {
        self.parse_helper(number_to_parse, default_region, true, true)
    }

    /// Parses a string and fills up the phone number. This method is the same
    /// as the public `parse` method, with the exception that it allows the
    /// default region to be unknown when `check_region` is false, in which case
    /// numbers without a country calling code are accepted with a country code
    /// of 0.
    pub(super) fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber> {
        // Counted in characters, see MAX_INPUT_STRING_LENGTH.
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            return Err(ParseError::TooLong);
        }

        let national_number = self.build_national_number_for_parsing(number_to_parse)?;

        if !is_viable_phone_number(&self.reg_exps, &national_number) {
            trace!("The string supplied did not seem to be a phone number '{national_number}'");
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        // Check the region supplied is valid, or that the extracted number starts
        // with some sort of + sign so the number's region can be determined.
        if check_region && !self.check_region_for_parsing(&national_number, default_region) {
            trace!("Missing or invalid default country.");
            return Err(ParseError::InvalidCountryCode);
        }

        let mut phone_number = PhoneNumber::new();
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse);
        }
        // Attempt to parse extension first, since it doesn't require
        // region-specific data and we want to have the non-normalised number here.
        let (national_number, extension) = self.maybe_strip_extension(&national_number);
        if let Some(extension) = extension {
            phone_number.set_extension(extension);
        }

        let mut region_metadata = self.get_metadata_for_region(default_region);
        // Check to see if the number is given in international format so we know
        // whether this number is from the default region or not.
        let extracted = match self.maybe_extract_country_code(national_number, region_metadata.as_deref())
        {
            Ok(extracted) => extracted,
            Err(ParseError::InvalidCountryCode) => {
                let Some(plus_chars) = self.reg_exps.plus_chars_pattern.find(national_number) else {
                    return Err(ParseError::InvalidCountryCode);
                };
                // Strip the plus-char, and try again.
                let extracted = self.maybe_extract_country_code(
                    &national_number[plus_chars.end()..],
                    region_metadata.as_deref(),
                )?;
                if extracted.country_code == 0 {
                    trace!("Could not interpret numbers after plus-sign.");
                    return Err(ParseError::InvalidCountryCode);
                }
                extracted
            }
            Err(err) => return Err(err),
        };

        let ExtractedCountryCode {
            mut country_code,
            country_code_source,
            national_number: mut normalized_national_number,
        } = extracted;
        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }

        if country_code != 0 {
            let phone_number_region = self.get_region_code_for_country_code(country_code);
            if phone_number_region != default_region {
                // Metadata can't be missing because the country calling code is valid.
                region_metadata =
                    self.get_metadata_for_region_or_calling_code(country_code, phone_number_region);
            }
        } else if let Some(metadata) = &region_metadata {
            // If no extracted country calling code, use the region supplied instead.
            // The national number is just the normalized version of the number we
            // were given to parse.
            country_code = metadata.country_code();
        } else if keep_raw_input {
            phone_number.clear_country_code_source();
        }
        phone_number.set_country_code(country_code);

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn);
        }

        if let Some(metadata) = &region_metadata {
            if let Some(StrippedNationalNumber {
                national_number: potential_national_number,
                carrier_code,
            }) = self.maybe_strip_national_prefix_and_carrier_code(&normalized_national_number, metadata)
            {
                // We require that the NSN remaining after stripping the national
                // prefix and carrier code be long enough to be a possible length for
                // the region. Otherwise, we don't do the stripping, since the original
                // number could be a valid short number.
                let validation_result =
                    test_number_length_with_unknown_type(&potential_national_number, metadata);
                if !matches!(
                    validation_result,
                    Ok(NumberLengthType::IsPossibleLocalOnly)
                        | Err(ValidationError::TooShort)
                        | Err(ValidationError::InvalidLength)
                ) {
                    normalized_national_number = potential_national_number;
                    if keep_raw_input {
                        if let Some(carrier_code) = carrier_code.filter(|code| !code.is_empty()) {
                            phone_number.set_preferred_domestic_carrier_code(carrier_code);
                        }
                    }
                }
            }
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn);
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            trace!("The string supplied is too long to be a phone number.");
            return Err(ParseError::TooLong);
        }
        Self::set_italian_leading_zeros_for_phone_number(
            &normalized_national_number,
            &mut phone_number,
        );
        let national_number = normalized_national_number.trim_start_matches('0');
        phone_number.set_national_number(if national_number.is_empty() {
            "0"
        } else {
            national_number
        });
        Ok(phone_number)
    }

    /// Converts number_to_parse to a form that we can parse and returns it if it
    /// is written in RFC3966; otherwise extracts a possible number out of it and
    /// returns it.
    fn build_national_number_for_parsing<'a>(
        &self,
        number_to_parse: &'a str,
    ) -> Result<Cow<'a, str>> {
        let mut national_number = match number_to_parse.find(RFC3966_PHONE_CONTEXT) {
            Some(index_of_phone_context) => {
                let phone_context = Self::extract_phone_context(number_to_parse, index_of_phone_context);
                if !self.is_phone_context_valid(phone_context) {
                    trace!("The phone-context value for phone number {number_to_parse} is invalid.");
                    return Err(NotANumberError::InvalidPhoneContext.into());
                }
                let mut national_number = String::with_capacity(number_to_parse.len());
                // If the phone context contains a phone number prefix, we need to
                // capture it, whereas domains will be ignored.
                if phone_context.starts_with(PLUS_SIGN) {
                    national_number.push_str(phone_context);
                }
                // Now append everything between the "tel:" prefix and the
                // phone-context. This should include the national number, an optional
                // extension or isdn-subaddress component. Note we also handle the case
                // when "tel:" is missing, as we have seen in some of the phone number
                // inputs. In that case, we append everything from the beginning.
                let index_of_national_number = number_to_parse
                    .find(RFC3966_PREFIX)
                    .map(|index| index + RFC3966_PREFIX.len())
                    .unwrap_or(0);
                if index_of_national_number < index_of_phone_context {
                    national_number
                        .push_str(&number_to_parse[index_of_national_number..index_of_phone_context]);
                }
                Cow::Owned(national_number)
            }
            // Extract a possible number from the string passed in (this strips
            // leading characters that could not be the start of a phone number.)
            None => Cow::Borrowed(extract_possible_number(&self.reg_exps, number_to_parse)?),
        };

        // Delete the isdn-subaddress and everything after it if it is present. Note
        // extension won't appear at the same time with isdn-subaddress according
        // to paragraph 5.3 of the RFC3966 spec.
        if let Some(index_of_isdn) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            if index_of_isdn > 0 {
                national_number = match national_number {
                    Cow::Borrowed(number) => Cow::Borrowed(&number[..index_of_isdn]),
                    Cow::Owned(mut number) => {
                        number.truncate(index_of_isdn);
                        Cow::Owned(number)
                    }
                };
            }
        }
        // If both phone context and isdn-subaddress are absent but other parameters
        // are present, the parameters are left in national_number. This is because
        // we are concerned about deleting content from a potential number string
        // when there is no strong evidence that the number is actually written in
        // RFC3966.
        Ok(national_number)
    }

    /// Extracts the value of the phone-context parameter of number_to_parse,
    /// following the syntax defined in RFC3966. An empty value means the
    /// parameter is present but empty.
    fn extract_phone_context(number_to_parse: &str, index_of_phone_context: usize) -> &str {
        let phone_context_start = index_of_phone_context + RFC3966_PHONE_CONTEXT.len();
        // If phone-context parameter is empty
        if phone_context_start >= number_to_parse.len() {
            return "";
        }
        let phone_context = &number_to_parse[phone_context_start..];
        // If phone-context is not the last parameter
        match phone_context.find(';') {
            Some(phone_context_end) => &phone_context[..phone_context_end],
            None => phone_context,
        }
    }

    /// Returns whether the value of phone-context follows the syntax defined in
    /// RFC3966.
    fn is_phone_context_valid(&self, phone_context: &str) -> bool {
        if phone_context.is_empty() {
            return false;
        }
        // Does phone-context value match pattern of global-number-digits or
        // domainname
        self.reg_exps
            .rfc3966_global_number_digits_pattern
            .is_match(phone_context)
            || self.reg_exps.rfc3966_domainname_pattern.is_match(phone_context)
    }

    /// Checks to see that the region code used is valid, or if it is not valid,
    /// that the number to parse starts with a + symbol so that we can attempt to
    /// infer the region from the number. Returns false if it cannot use the
    /// region provided and the region cannot be inferred.
    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        if self.is_valid_region_code(default_region) {
            return true;
        }
        // If the number is empty, we can't infer the region.
        !number_to_parse.is_empty() && self.reg_exps.plus_chars_pattern.is_match(number_to_parse)
    }

    /// A helper function to set the values related to leading zeros in a
    /// phone number.
    fn set_italian_leading_zeros_for_phone_number(
        national_number: &str,
        phone_number: &mut PhoneNumber,
    ) {
        if national_number.len() > 1 && national_number.starts_with('0') {
            phone_number.set_italian_leading_zero(true);
            // Note that if the national number is all "0"s, the last "0" is not
            // counted as a leading zero.
            let number_of_leading_zeros = national_number
                .bytes()
                .take(national_number.len() - 1)
                .take_while(|digit| *digit == b'0')
                .count();
            if number_of_leading_zeros != 1 {
                phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
            }
        }
    }

    /// Attempts to extract a possible number from the string passed in.
    /// See [`extract_possible_number`].
    pub fn extract_possible_number<'a>(
        &self,
        phone_number: &'a str,
    ) -> std::result::Result<&'a str, ExtractNumberError> {
        extract_possible_number(&self.reg_exps, phone_number)
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all.
    pub fn is_viable_phone_number(&self, phone_number: &str) -> bool {
        is_viable_phone_number(&self.reg_exps, phone_number)
    }

    /// Normalizes a string of characters representing a phone number. This
    /// performs the following conversions:
    ///   - Punctuation is stripped.
    ///   - For ALPHA/VANITY numbers:
    ///     - Letters are converted to their numeric representation on a
    ///       telephone keypad. The keypad used here is the one defined in ITU
    ///       Recommendation E.161. This is only done if there are 3 or more
    ///       letters in the number, to lessen the risk that such letters are
    ///       typos.
    ///   - For other numbers:
    ///     - Wide-ascii digits are converted to normal ASCII (European) digits.
    ///     - Arabic-Indic numerals are converted to European numerals.
    ///     - Spurious alpha characters are stripped.
    pub fn normalize(&self, phone_number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.is_match(phone_number) {
            let folded = dec_from_char::normalize_decimals(phone_number);
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, &folded)
        } else {
            normalize_digits_only(phone_number)
        }
    }

    /// Normalizes a string of characters representing a phone number. This
    /// converts wide-ascii and arabic-indic numerals to European numerals, and
    /// strips punctuation and alpha characters.
    pub fn normalize_digits_only(&self, phone_number: &str) -> String {
        normalize_digits_only(phone_number)
    }

    /// Normalizes a string of characters representing a phone number. This
    /// strips all characters which are not diallable on a mobile phone keypad
    /// (including all non-ASCII digits).
    pub fn normalize_diallable_chars_only(&self, phone_number: &str) -> String {
        normalize_helper(&self.reg_exps.diallable_char_mappings, true, phone_number)
    }

    /// Converts all alpha characters in a number to their respective digits on
    /// a keypad, but retains existing formatting.
    pub fn convert_alpha_characters_in_number(&self, phone_number: &str) -> String {
        normalize_helper(&self.reg_exps.alpha_phone_mappings, false, phone_number)
    }

    /// Checks if the number is a valid vanity (alpha) number such as 800
    /// MICROSOFT. A valid vanity number will start with at least 3 digits and
    /// will have three or more alpha characters. This does not do
    /// region-specific checks - to work out if this number is actually valid
    /// for a region, it should be parsed and methods such as
    /// [`Self::is_possible_number_with_reason`] and [`Self::is_valid_number`]
    /// should be used.
    pub fn is_alpha_number(&self, phone_number: &str) -> bool {
        if !self.is_viable_phone_number(phone_number) {
            // Number is too short, or doesn't match the basic phone number pattern.
            return false;
        }
        let (stripped_number, _) = self.maybe_strip_extension(phone_number);
        self.reg_exps
            .valid_alpha_phone_pattern
            .is_match(stripped_number)
    }

    /// Strips any extension (as in, the part of the number dialled after the
    /// call is connected, usually indicated with extn, ext, x or similar) from
    /// the end of the number, and returns the number without it together with
    /// the extension.
    pub fn maybe_strip_extension<'a>(&self, phone_number: &'a str) -> (&'a str, Option<&'a str>) {
        let mut matcher = RegexMatcher::new(&self.reg_exps.extn_pattern, phone_number);
        // If we find a potential extension, and the number preceding this is a
        // viable number, we assume it is an extension.
        if !matcher.find() {
            return (phone_number, None);
        }
        let Some(number) = matcher.prefix() else {
            return (phone_number, None);
        };
        if !self.is_viable_phone_number(number) {
            return (phone_number, None);
        }
        // The numbers are captured into groups in the regular expression. We go
        // through the capturing groups until we find one that captured some
        // digits.
        for group in 1..=matcher.group_count() {
            if let Some(extension) = matcher.group(group) {
                return (number, Some(extension));
            }
        }
        (phone_number, None)
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number provided, normalizes the resulting number, and indicates if an
    /// international prefix was present.
    ///
    /// `possible_idd_prefix` is the international direct dialing prefix from
    /// the region we think this number may be dialed in. Without one only the
    /// plus sign is recognized.
    pub fn maybe_strip_international_prefix_and_normalize<'a>(
        &self,
        phone_number: &'a str,
        possible_idd_prefix: Option<&str>,
    ) -> PhoneNumberWithCountryCodeSource<'a> {
        if phone_number.is_empty() {
            return PhoneNumberWithCountryCodeSource::new(
                Cow::Borrowed(phone_number),
                CountryCodeSource::FromDefaultCountry,
            );
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(plus_chars) = self.reg_exps.plus_chars_pattern.find(phone_number) {
            // Can now normalize the rest of the number since we've consumed the "+"
            // sign at the start.
            return PhoneNumberWithCountryCodeSource::new(
                Cow::Owned(self.normalize(&phone_number[plus_chars.end()..])),
                CountryCodeSource::FromPlusSign,
            );
        }
        // Attempt to parse the first digits as an international prefix.
        let normalized_number = self.normalize(phone_number);
        if let Some(idd_prefix) = possible_idd_prefix.filter(|prefix| !prefix.is_empty()) {
            if let Some(stripped) = self.parse_prefix_as_idd(idd_prefix, &normalized_number) {
                return PhoneNumberWithCountryCodeSource::new(
                    Cow::Owned(stripped.to_owned()),
                    CountryCodeSource::FromIdd,
                );
            }
        }
        PhoneNumberWithCountryCodeSource::new(
            Cow::Owned(normalized_number),
            CountryCodeSource::FromDefaultCountry,
        )
    }

    /// Strips the IDD from the start of the number if present. Helper function
    /// used by [`Self::maybe_strip_international_prefix_and_normalize`].
    fn parse_prefix_as_idd<'a>(&self, idd_prefix: &str, phone_number: &'a str) -> Option<&'a str> {
        let idd_pattern = self.metadata_regex(idd_prefix)?;
        let rest = idd_pattern.consume_start(phone_number)?;
        // Only strip this if the first digit after the match is not a 0, since
        // country calling codes cannot begin with 0.
        if let Some(first_digit) = self
            .reg_exps
            .capturing_digit_pattern
            .captures(rest)
            .and_then(|captures| captures.get(1))
        {
            if normalize_digits_only(first_digit.as_str()) == "0" {
                return None;
            }
        }
        Some(rest)
    }

    /// Tries to extract a country calling code from a number. Country calling
    /// codes are extracted in the following ways:
    ///   - by stripping the international dialing prefix of the region the
    ///     person is dialing from, if this is present in the number, and looking
    ///     at the next digits
    ///   - by stripping the '+' sign if present and then looking at the next
    ///     digits
    ///   - by comparing the start of the number and the country calling code of
    ///     the default region. If the number is not considered possible for the
    ///     numbering plan of the default region initially, but starts with the
    ///     country calling code of this region, validation will be reattempted
    ///     after stripping this country calling code. If this number is
    ///     considered a possible number, then the first digits will be
    ///     considered the country calling code and removed as such.
    ///
    /// A country code of 0 in the result means no country calling code was
    /// found; the national number is then the whole normalized input.
    ///
    /// Returns an error if the number starts with an international prefix but
    /// no valid country calling code follows it.
    pub fn maybe_extract_country_code(
        &self,
        phone_number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
    ) -> Result<ExtractedCountryCode> {
        if phone_number.is_empty() {
            return Ok(ExtractedCountryCode {
                country_code: 0,
                country_code_source: CountryCodeSource::Unspecified,
                national_number: String::new(),
            });
        }
        // Set the default prefix to be something that will never match if there
        // is no default region.
        let possible_country_idd_prefix =
            default_region_metadata.map(|metadata| metadata.international_prefix());

        let PhoneNumberWithCountryCodeSource {
            phone_number: full_number,
            country_code_source,
        } = self.maybe_strip_international_prefix_and_normalize(
            phone_number,
            possible_country_idd_prefix,
        );

        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                trace!("Phone number had an IDD, but after this was not long enough to be a viable phone number.");
                return Err(ParseError::TooShortAfterIdd);
            }
            return match self.extract_country_code(&full_number) {
                Some((country_code, national_number)) => Ok(ExtractedCountryCode {
                    country_code,
                    country_code_source,
                    national_number: national_number.to_owned(),
                }),
                // If this fails, they must be using a strange country calling code
                // that we don't recognize, or that doesn't exist.
                None => Err(ParseError::InvalidCountryCode),
            };
        }

        if let Some(metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling code for
            // the default region. If so, we remove the country calling code, and do
            // some checks on the validity of the number before and after.
            let default_country_code = metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_string = buf.format(default_country_code);
            if let Some(potential_national_number) =
                full_number.strip_prefix(default_country_code_string)
            {
                let general_desc = &metadata.general_desc;
                let potential_national_number = self
                    .maybe_strip_national_prefix_and_carrier_code(potential_national_number, metadata)
                    .map(|stripped| Cow::Owned(stripped.national_number))
                    .unwrap_or(Cow::Borrowed(potential_national_number));
                // If the number was not valid before but is valid now, or if it was
                // too long before, we consider the number with the country calling
                // code stripped to be a better result and keep that instead.
                if (!self.matches_national_number(&full_number, general_desc)
                    && self.matches_national_number(&potential_national_number, general_desc))
                    || test_number_length_with_unknown_type(&full_number, metadata)
                        == Err(ValidationError::TooLong)
                {
                    return Ok(ExtractedCountryCode {
                        country_code: default_country_code,
                        country_code_source: CountryCodeSource::FromNumberWithoutPlus,
                        national_number: potential_national_number.into_owned(),
                    });
                }
            }
        }
        // No country calling code present.
        Ok(ExtractedCountryCode {
            country_code: 0,
            country_code_source,
            national_number: full_number.into_owned(),
        })
    }

    /// Extracts country calling code from full_number, and returns it together
    /// with the rest of the number. It assumes that the leading plus sign or
    /// IDD has already been removed. Returns `None` if full_number doesn't
    /// start with a valid country calling code.
    pub(super) fn extract_country_code<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return None;
        }
        for i in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            let Ok(potential_country_code) = full_number[..i].parse::<i32>() else {
                return None;
            };
            if self.has_valid_country_calling_code(potential_country_code) {
                return Some((potential_country_code, &full_number[i..]));
            }
        }
        None
    }

    /// Strips any national prefix (such as 0, 1) present in the number
    /// provided.
    ///
    /// Returns `None` if no national prefix could be stripped, otherwise the
    /// remaining national number together with the carrier code captured by
    /// the prefix pattern, if any.
    pub fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        phone_number: &str,
        metadata: &PhoneMetadata,
    ) -> Option<StrippedNationalNumber> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if phone_number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length or with no national prefix
            // possible.
            return None;
        }
        // Attempt to parse the first digits as a national prefix.
        let prefix_pattern = self.metadata_regex(possible_national_prefix)?;
        let mut prefix_matcher = RegexMatcher::new(&prefix_pattern, phone_number);
        if !prefix_matcher.looking_at() {
            return None;
        }
        let general_desc = &metadata.general_desc;
        // Check if the original number is viable.
        let is_viable_original_number = self.matches_national_number(phone_number, general_desc);
        // prefix_matcher.group(num_of_groups) == None implies nothing was captured
        // by the capturing groups in possible_national_prefix; therefore, no
        // transformation is necessary, and we just remove the national prefix.
        let num_of_groups = prefix_matcher.group_count();
        let transform_rule = metadata.national_prefix_transform_rule();
        let last_group = prefix_matcher.group(num_of_groups);
        let remainder = prefix_matcher.remainder().unwrap_or_default();

        if transform_rule.is_empty() || last_group.is_none() {
            // If the original number was viable, and the resultant number is not,
            // we return.
            if is_viable_original_number && !self.matches_national_number(remainder, general_desc) {
                return None;
            }
            let carrier_code = if num_of_groups > 0 && last_group.is_some() {
                prefix_matcher.group(1).map(str::to_owned)
            } else {
                None
            };
            Some(StrippedNationalNumber {
                national_number: remainder.to_owned(),
                carrier_code,
            })
        } else {
            // Check that the resultant number is still viable. If not, return. Check
            // this by seeing if the resultant number is valid.
            let transformed_prefix = prefix_matcher.expand(transform_rule)?;
            let transformed_number = fast_cat::concat_str!(&transformed_prefix, remainder);
            if is_viable_original_number
                && !self.matches_national_number(&transformed_number, general_desc)
            {
                return None;
            }
            let carrier_code = if num_of_groups > 1 {
                prefix_matcher.group(1).map(str::to_owned)
            } else {
                None
            };
            Some(StrippedNationalNumber {
                national_number: transformed_number,
                carrier_code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_possible_number, is_viable_phone_number};
    use crate::phonenumberutil::{
        errors::ExtractNumberError,
        phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
    };

    #[test]
    fn extracts_possible_number() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        assert_eq!(Ok("0800-345-600"), extract_possible_number(&reg_exps, "Tel:0800-345-600"));
        assert_eq!(Ok("0800 FOR PIZZA"), extract_possible_number(&reg_exps, "Tel:0800 FOR PIZZA"));
        // Should not remove plus sign.
        assert_eq!(Ok("+800-345-600"), extract_possible_number(&reg_exps, "Tel:+800-345-600"));
        // Should recognise wide digits as possible start values.
        assert_eq!(
            Ok("\u{FF10}\u{FF12}\u{FF13}"),
            extract_possible_number(&reg_exps, "\u{FF10}\u{FF12}\u{FF13}")
        );
        // Dashes are not possible start values and should be removed.
        assert_eq!(
            Ok("\u{FF11}\u{FF12}\u{FF13}"),
            extract_possible_number(&reg_exps, "Num-\u{FF11}\u{FF12}\u{FF13}")
        );
        // If not possible number present, return an error.
        assert_eq!(
            Err(ExtractNumberError::NoValidStartCharacter),
            extract_possible_number(&reg_exps, "Num-....")
        );
        // Leading brackets are stripped - these are not used when parsing.
        assert_eq!(Ok("650) 253-0000"), extract_possible_number(&reg_exps, "(650) 253-0000"));
        // Trailing non-alpha-numeric characters should be removed.
        assert_eq!(Ok("650) 253-0000"), extract_possible_number(&reg_exps, "(650) 253-0000..- .."));
        assert_eq!(Ok("650) 253-0000"), extract_possible_number(&reg_exps, "(650) 253-0000."));
        // This case has a trailing RTL char.
        assert_eq!(
            Ok("650) 253-0000"),
            extract_possible_number(&reg_exps, "(650) 253-0000\u{200F}")
        );
    }

    #[test]
    fn second_number_is_dropped() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        assert_eq!(
            Ok("530) 583-6985 x302"),
            extract_possible_number(&reg_exps, "(530) 583-6985 x302/x2303")
        );
        assert_eq!(
            Ok("530) 583-6985 x302 "),
            extract_possible_number(&reg_exps, "(530) 583-6985 x302 \\ x2303")
        );
    }

    #[test]
    fn viable_phone_numbers() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        assert!(!is_viable_phone_number(&reg_exps, "1"));
        // Only one or two digits before strange non-possible punctuation.
        assert!(!is_viable_phone_number(&reg_exps, "1+1+1"));
        assert!(!is_viable_phone_number(&reg_exps, "80+0"));
        // Two digits is viable.
        assert!(is_viable_phone_number(&reg_exps, "00"));
        assert!(is_viable_phone_number(&reg_exps, "111"));
        // Alpha numbers.
        assert!(is_viable_phone_number(&reg_exps, "0800-4-pizza"));
        assert!(is_viable_phone_number(&reg_exps, "0800-4-PIZZA"));
        // We need at least three digits before any alpha characters.
        assert!(!is_viable_phone_number(&reg_exps, "08-PIZZA"));
        assert!(!is_viable_phone_number(&reg_exps, "8-PIZZA"));
        assert!(!is_viable_phone_number(&reg_exps, "12. March"));
        // Full-width digits are viable too.
        assert!(is_viable_phone_number(&reg_exps, "\u{FF11}\u{FF11}\u{FF11}"));
        assert!(is_viable_phone_number(&reg_exps, "1\u{FF11}1"));
    }
}
