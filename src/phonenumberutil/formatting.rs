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

use log::{trace, warn};

use super::{
    errors::ValidationError,
    helper_constants::{
        CARRIER_CODE_PLACEHOLDER, COLOMBIA_MOBILE_TO_FIXED_LINE_PREFIX, DEFAULT_EXTN_PREFIX,
        FIRST_GROUP_PLACEHOLDER, NANPA_COUNTRY_CODE, NATIONAL_PREFIX_PLACEHOLDER,
        REGION_CODE_FOR_NON_GEO_ENTITY, RFC3966_EXTN_PREFIX,
    },
    helper_functions::{
        normalize_digits_only, normalize_helper, prefix_number_with_country_calling_code,
        test_number_length_with_unknown_type,
    },
    phonenumberutil::PhoneNumberUtil,
    PhoneNumberFormat, PhoneNumberType,
};
use crate::{
    macros::owned_from_cow_or,
    phonenumber::{CountryCodeSource, PhoneNumber},
    proto_gen::phonemetadata::{NumberFormat, PhoneMetadata},
    regex_util::{to_regex_replacement, RegexConsume, RegexFullMatch, RegexMatcher},
};

/// Resolves the `$NP` and `$FG` placeholders of a national prefix formatting
/// rule (or of a carrier code formatting rule).
fn resolve_formatting_rule<'r>(rule: &'r str, national_prefix: &str) -> Cow<'r, str> {
    if !rule.contains('$') {
        return Cow::Borrowed(rule);
    }
    Cow::Owned(
        rule.replace(NATIONAL_PREFIX_PLACEHOLDER, national_prefix)
            .replace(FIRST_GROUP_PLACEHOLDER, "$1"),
    )
}

fn is_zero_national_number(phone_number: &PhoneNumber) -> bool {
    phone_number.national_number().bytes().all(|digit| digit == b'0')
}

impl PhoneNumberUtil {
    /// Formats a phone number in the specified format using default rules. Note
    /// that this does not promise to produce a phone number that the user can
    /// dial from where they are - although we do format in either NATIONAL or
    /// INTERNATIONAL format depending on what the client asks for, we do not
    /// currently support a more abbreviated format, such as for users in the
    /// same area who could potentially dial the number without area code.
    pub fn format<'a>(
        &self,
        phone_number: &'a PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> Cow<'a, str> {
        if is_zero_national_number(phone_number)
            && phone_number.has_raw_input()
            && !phone_number.raw_input().is_empty()
        {
            // Unparseable numbers that kept their raw input just use that.
            // This is the only case where a number can be formatted as E164 without a
            // leading '+' symbol (but the original number wasn't parseable anyway).
            return Cow::Borrowed(phone_number.raw_input());
        }
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if number_format == PhoneNumberFormat::E164 {
            // Early exit for E164 case (even if the country calling code is invalid)
            // since no formatting of the national number needs to be applied.
            // Extensions are not formatted.
            let mut formatted_number = national_significant_number;
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return Cow::Owned(formatted_number);
        }
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Cow::Owned(national_significant_number);
        }
        // Note here that all NANPA formatting rules are contained by US, so we use
        // that to format NANPA numbers. The same applies to Russian Fed regions -
        // rules are contained by Russia. French Indian Ocean country rules are
        // contained by Reunion.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        // Metadata cannot be missing because the country calling code is valid.
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Cow::Owned(national_significant_number);
        };
        let mut formatted_number = owned_from_cow_or!(
            self.format_nsn(&national_significant_number, &metadata, number_format),
            national_significant_number
        );
        Self::maybe_append_formatted_extension(
            phone_number,
            &metadata,
            number_format,
            &mut formatted_number,
        );
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Cow::Owned(formatted_number)
    }

    /// Formats a phone number in the specified format using client-defined
    /// formatting rules. Note that if the phone number has a country calling
    /// code of zero or an otherwise invalid country calling code, we cannot
    /// work out things like whether there should be a national prefix applied,
    /// or how to format extensions, so we return the national significant
    /// number with no formatting applied.
    pub fn format_by_pattern(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> String {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        // Note get_region_code_for_country_code() is used because formatting
        // information for regions which share a country calling code is contained
        // by only one region for performance reasons. For example, for NANPA
        // regions it will be contained in the metadata for US.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };

        let mut formatted_number = match self
            .choose_formatting_pattern_for_number(user_defined_formats, &national_significant_number)
        {
            Some(formatting_pattern) => {
                // Before we do a replacement of the national prefix pattern $NP with
                // the national prefix, we need to copy the rule so that subsequent
                // replacements for different numbers have the appropriate national
                // prefix.
                let mut num_format_copy = formatting_pattern.clone();
                let national_prefix_formatting_rule =
                    formatting_pattern.national_prefix_formatting_rule();
                if !national_prefix_formatting_rule.is_empty() {
                    let national_prefix = metadata.national_prefix();
                    if national_prefix.is_empty() {
                        // We don't want to have a rule for how to format the national
                        // prefix if there isn't one.
                        num_format_copy.clear_national_prefix_formatting_rule();
                    } else {
                        num_format_copy.set_national_prefix_formatting_rule(
                            resolve_formatting_rule(national_prefix_formatting_rule, national_prefix)
                                .into_owned(),
                        );
                    }
                }
                self.format_nsn_using_pattern(
                    &national_significant_number,
                    &num_format_copy,
                    number_format,
                    metadata.national_prefix(),
                )
                .into_owned()
            }
            None => national_significant_number,
        };
        Self::maybe_append_formatted_extension(
            phone_number,
            &metadata,
            number_format,
            &mut formatted_number,
        );
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        formatted_number
    }

    /// Formats a phone number in national format for dialing using the carrier
    /// as specified in the carrier_code. The carrier_code will always be used
    /// regardless of whether the phone number already has a preferred domestic
    /// carrier code stored. If carrier_code contains an empty string, return the
    /// number in national format without any carrier code.
    pub fn format_national_number_with_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        carrier_code: &str,
    ) -> String {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };

        let mut formatted_number = owned_from_cow_or!(
            self.format_nsn_with_carrier(
                &national_significant_number,
                &metadata,
                PhoneNumberFormat::National,
                Some(carrier_code),
            ),
            national_significant_number
        );
        Self::maybe_append_formatted_extension(
            phone_number,
            &metadata,
            PhoneNumberFormat::National,
            &mut formatted_number,
        );
        formatted_number
    }

    /// Formats a phone number in national format for dialing using the carrier
    /// as specified in the preferred_domestic_carrier_code field of the
    /// PhoneNumber object passed in. If that is missing, use the
    /// `fallback_carrier_code` passed in instead. If there is no
    /// preferred_domestic_carrier_code, and the `fallback_carrier_code`
    /// contains an empty string, return the number in national format without
    /// any carrier code.
    ///
    /// Use [`Self::format_national_number_with_carrier_code`] instead if the
    /// carrier code passed in should take precedence over the number's
    /// preferred_domestic_carrier_code when formatting.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> String {
        // Historically, we set this to an empty string when parsing with raw input
        // if none was found in the input string. However, this doesn't result in a
        // number we can dial. For this reason, we treat the empty string the same
        // as if it isn't set at all.
        let carrier_code = if !phone_number.preferred_domestic_carrier_code().is_empty() {
            phone_number.preferred_domestic_carrier_code()
        } else {
            fallback_carrier_code
        };
        self.format_national_number_with_carrier_code(phone_number, carrier_code)
    }

    /// Returns a number formatted in such a way that it can be dialed from a
    /// mobile phone in a specific region. If the number cannot be reached from
    /// the region (e.g. some countries block toll-free numbers from being called
    /// outside of the country), the method returns an empty string.
    pub fn format_number_for_mobile_dialing(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
        with_formatting: bool,
    ) -> String {
        let country_calling_code = phone_number.country_code();
        if !self.has_valid_country_calling_code(country_calling_code) {
            return phone_number.raw_input().to_owned();
        }

        // Clear the extension, as that part cannot normally be dialed together
        // with the main number.
        let mut number_no_extension = phone_number.clone();
        number_no_extension.clear_extension();
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let number_type = self.get_number_type(&number_no_extension);
        let is_valid_number = number_type != PhoneNumberType::Unknown;

        let formatted_number = if region_calling_from == region_code {
            let is_fixed_line_or_mobile = matches!(
                number_type,
                PhoneNumberType::FixedLine
                    | PhoneNumberType::Mobile
                    | PhoneNumberType::FixedLineOrMobile
            );
            // Carrier codes may be needed in some countries. We handle this here.
            if region_code == "CO" && number_type == PhoneNumberType::FixedLine {
                self.format_national_number_with_carrier_code(
                    &number_no_extension,
                    COLOMBIA_MOBILE_TO_FIXED_LINE_PREFIX,
                )
            } else if region_code == "BR" && is_fixed_line_or_mobile {
                // Historically, we set this to an empty string when parsing with raw
                // input if none was found in the input string. However, this doesn't
                // result in a number we can dial. For this reason, we treat the empty
                // string the same as if it isn't set at all.
                if !number_no_extension.preferred_domestic_carrier_code().is_empty() {
                    self.format_national_number_with_preferred_carrier_code(
                        &number_no_extension,
                        "",
                    )
                } else {
                    // Brazilian fixed line and mobile numbers need to be dialed with a
                    // carrier code when called within Brazil. Without that, most of the
                    // carriers won't connect the call. Because of that, we return an
                    // empty string here.
                    String::new()
                }
            } else if country_calling_code == NANPA_COUNTRY_CODE {
                // For NANPA countries, we output international format for numbers
                // that can be dialed internationally, since that always works, except
                // for numbers which might potentially be short numbers, which are
                // always dialled in national format.
                let is_possible_short_number = self
                    .get_metadata_for_region(region_calling_from)
                    .map(|metadata| {
                        let national_significant_number =
                            Self::get_national_significant_number(&number_no_extension);
                        test_number_length_with_unknown_type(&national_significant_number, &metadata)
                            == Err(ValidationError::TooShort)
                    })
                    .unwrap_or(false);
                if self.can_be_internationally_dialled(&number_no_extension)
                    && !is_possible_short_number
                {
                    self.format(&number_no_extension, PhoneNumberFormat::International)
                        .into_owned()
                } else {
                    self.format(&number_no_extension, PhoneNumberFormat::National)
                        .into_owned()
                }
            } else if (region_code == REGION_CODE_FOR_NON_GEO_ENTITY
                // MX fixed line and mobile numbers should always be formatted in
                // international format, even when dialed within MX. For national
                // format to work, a carrier code needs to be used, and the correct
                // carrier code depends on if the caller and callee are from the same
                // local area. It is trickier to get that to work correctly than
                // using international format, which is tested to work fine on all
                // carriers.
                // CL fixed line numbers need the national prefix when dialing in the
                // national format, but don't have it when used for display. The
                // reverse is true for mobile numbers. As a result, we output them in
                // the international format to make it work.
                // UZ mobile and fixed-line numbers have to be formatted in
                // international format or prefixed with special codes like 03, 04
                // (for fixed-line) and 05 (for mobile) for dialling successfully
                // from mobile devices. As we do not have complete information on
                // special codes and to be consistent with formatting across all
                // phone types we return the number in international format here.
                || (matches!(region_code, "MX" | "CL" | "UZ") && is_fixed_line_or_mobile))
                && self.can_be_internationally_dialled(&number_no_extension)
            {
                self.format(&number_no_extension, PhoneNumberFormat::International)
                    .into_owned()
            } else {
                self.format(&number_no_extension, PhoneNumberFormat::National)
                    .into_owned()
            }
        } else if is_valid_number && self.can_be_internationally_dialled(&number_no_extension) {
            // We assume that short numbers are not diallable from outside their
            // region, so if a number is not a valid regular length phone number, we
            // treat it as if it cannot be internationally dialled.
            let number_format = if with_formatting {
                PhoneNumberFormat::International
            } else {
                PhoneNumberFormat::E164
            };
            return self.format(&number_no_extension, number_format).into_owned();
        } else {
            String::new()
        };
        if with_formatting {
            formatted_number
        } else {
            self.normalize_diallable_chars_only(&formatted_number)
        }
    }

    /// Formats a phone number for out-of-country dialing purposes.
    ///
    /// Note that in this version, if the number was entered originally using
    /// alpha characters and this version of the number is stored in raw_input,
    /// this representation of the number will be used rather than the digit
    /// representation. Grouping information, as specified by characters such as
    /// "-" and " ", will be retained.
    ///
    /// Caveats:
    ///  - This will not produce good results if the country calling code is
    ///    both present in the raw input _and_ is the start of the national
    ///    number. This is not a problem in the regions which typically use alpha
    ///    numbers.
    ///  - This will also not produce good results if the raw input has any
    ///    grouping information within the first three digits of the national
    ///    number, and if the function needs to strip preceding digits/words in
    ///    the raw input before these digits. Normally people group the first
    ///    three digits together so this is not a huge problem - and will be fixed
    ///    if it proves to be so.
    pub fn format_out_of_country_calling_number(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> String {
        let Some(metadata_calling_from) = self.get_metadata_for_region(region_calling_from) else {
            warn!(
                "Trying to format number from invalid region {region_calling_from}. International formatting applied."
            );
            return self
                .format(phone_number, PhoneNumberFormat::International)
                .into_owned();
        };
        let country_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !self.has_valid_country_calling_code(country_code) {
            return national_significant_number;
        }
        if country_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(region_calling_from) {
                // For NANPA regions, return the national format for these regions but
                // prefix it with the country calling code.
                let national_format = self.format(phone_number, PhoneNumberFormat::National);
                let mut buf = itoa::Buffer::new();
                return fast_cat::concat_str!(buf.format(country_code), " ", &national_format);
            }
        } else if country_code == metadata_calling_from.country_code() {
            // If regions share a country calling code, the country calling code need
            // not be dialled. This also applies when dialling within a region, so
            // this if clause covers both these cases. Technically this is the case
            // for dialling from La Reunion to other overseas departments of France
            // (French Guiana, Martinique, Guadeloupe), but not vice versa - so we
            // don't cover this edge case for now and for those cases return the
            // version including country calling code. Details here:
            // http://www.petitfute.com/voyage/225-info-pratiques-reunion
            return self
                .format(phone_number, PhoneNumberFormat::National)
                .into_owned();
        }
        // Metadata cannot be None because we checked 'is_valid_region_code()' above.
        let international_prefix_for_formatting =
            self.international_prefix_for_formatting(&metadata_calling_from, true);

        let region_code = self.get_region_code_for_country_code(country_code);
        // Metadata cannot be None because the country calling code is valid.
        let Some(metadata_for_region) =
            self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return national_significant_number;
        };
        let mut formatted_number = owned_from_cow_or!(
            self.format_nsn(
                &national_significant_number,
                &metadata_for_region,
                PhoneNumberFormat::International,
            ),
            national_significant_number
        );
        Self::maybe_append_formatted_extension(
            phone_number,
            &metadata_for_region,
            PhoneNumberFormat::International,
            &mut formatted_number,
        );
        Self::prefix_with_international_prefix(
            country_code,
            international_prefix_for_formatting,
            &mut formatted_number,
        );
        formatted_number
    }

    /// Formats a phone number using the original phone number format (e.g.
    /// INTERNATIONAL or NATIONAL) that the number is parsed from, provided that
    /// the number has been parsed with
    /// [`parse_and_keep_raw_input`](Self::parse_and_keep_raw_input). Otherwise
    /// the number will be formatted in NATIONAL format.
    ///
    /// The original format is embedded in the country_code_source field of the
    /// PhoneNumber object passed in, which is only set when parsing keeps the
    /// raw input. When we don't have a formatting pattern for the number, the
    /// method falls back to returning the raw input.
    ///
    /// Note this method guarantees no digit will be inserted, removed or
    /// modified as a result of formatting.
    pub fn format_in_original_format<'a>(
        &self,
        phone_number: &'a PhoneNumber,
        region_calling_from: &str,
    ) -> Cow<'a, str> {
        if phone_number.has_raw_input() && !self.has_formatting_pattern_for_number(phone_number) {
            // We check if we have the formatting pattern because without that, we
            // might format the number as a group without national prefix.
            return Cow::Borrowed(phone_number.raw_input());
        }
        if !phone_number.has_country_code_source() {
            return self.format(phone_number, PhoneNumberFormat::National);
        }
        let formatted_number = match phone_number.country_code_source() {
            CountryCodeSource::FromPlusSign => {
                self.format(phone_number, PhoneNumberFormat::International)
            }
            CountryCodeSource::FromIdd => Cow::Owned(
                self.format_out_of_country_calling_number(phone_number, region_calling_from),
            ),
            CountryCodeSource::FromNumberWithoutPlus => {
                let international_format =
                    self.format(phone_number, PhoneNumberFormat::International);
                Cow::Owned(
                    international_format
                        .strip_prefix('+')
                        .unwrap_or(international_format.as_ref())
                        .to_owned(),
                )
            }
            CountryCodeSource::FromDefaultCountry | CountryCodeSource::Unspecified => {
                Cow::Owned(self.format_from_default_country(phone_number))
            }
        };
        // If no digit is inserted/removed/modified as a result of our formatting,
        // we return the formatted phone number; otherwise we return the raw input
        // the user entered.
        let raw_input = phone_number.raw_input();
        if !raw_input.is_empty() {
            let normalized_formatted_number = self.normalize_diallable_chars_only(&formatted_number);
            let normalized_raw_input = self.normalize_diallable_chars_only(raw_input);
            if normalized_formatted_number != normalized_raw_input {
                trace!("Formatting of '{raw_input}' changed its digits, returning raw input");
                return Cow::Borrowed(raw_input);
            }
        }
        formatted_number
    }

    /// Formats a number that was written without a country calling code,
    /// keeping the national prefix only when the user typed one.
    fn format_from_default_country(&self, phone_number: &PhoneNumber) -> String {
        let region_code = self.get_region_code_for_country_code(phone_number.country_code());
        // We strip non-digits from the NDD here, and from the raw input later,
        // so that we can compare them easily.
        let national_prefix = self.get_ndd_prefix_for_region(region_code, true);
        let national_format = self
            .format(phone_number, PhoneNumberFormat::National)
            .into_owned();
        let Some(national_prefix) = national_prefix.filter(|prefix| !prefix.is_empty()) else {
            // If the region doesn't have a national prefix at all, we can safely
            // return the national format without worrying about a national prefix
            // being added.
            return national_format;
        };
        // Otherwise, we check if the original number was entered with a national
        // prefix.
        if self.raw_input_contains_national_prefix(
            phone_number.raw_input(),
            &national_prefix,
            region_code,
        ) {
            // If so, we can safely return the national format.
            return national_format;
        }
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return national_format;
        };
        let national_number = Self::get_national_significant_number(phone_number);
        let Some(format_rule) =
            self.choose_formatting_pattern_for_number(&metadata.number_format, &national_number)
        else {
            // The optional formatting pattern cannot be found; return the national
            // format.
            return national_format;
        };
        // The format rule could still be chosen to be one without a national
        // prefix rule. This happens when the national prefix formatting rule
        // has the first group only or is absent.
        let candidate_national_prefix_rule =
            resolve_formatting_rule(format_rule.national_prefix_formatting_rule(), &national_prefix);
        // We assume that the first-group symbol will never be _before_ the
        // national prefix.
        let index_of_first_group = match candidate_national_prefix_rule.find("$1") {
            Some(index) if index > 0 => index,
            _ => return national_format,
        };
        let candidate_national_prefix =
            normalize_digits_only(&candidate_national_prefix_rule[..index_of_first_group]);
        if candidate_national_prefix.is_empty() {
            // National prefix not used when formatting this number.
            return national_format;
        }
        // Otherwise, remove the national prefix from the formatted number.
        let mut number_format_copy = format_rule.clone();
        number_format_copy.clear_national_prefix_formatting_rule();
        self.format_by_pattern(
            phone_number,
            PhoneNumberFormat::National,
            std::slice::from_ref(&number_format_copy),
        )
    }

    /// Check if raw_input, which is assumed to be in the national format, has a
    /// national prefix. The national prefix is assumed to be in digits-only
    /// form.
    fn raw_input_contains_national_prefix(
        &self,
        raw_input: &str,
        national_prefix: &str,
        region_code: &str,
    ) -> bool {
        let normalized_national_number = normalize_digits_only(raw_input);
        let Some(number_without_prefix) = normalized_national_number.strip_prefix(national_prefix)
        else {
            return false;
        };
        // Some Japanese numbers (e.g. 00777123) might be mistaken to contain the
        // national prefix when written without it (e.g. 0777123) if we just do
        // prefix matching. To tackle that, we check the validity of the number if
        // the assumed national prefix is removed (777123 won't be valid in
        // Japan).
        self.parse(number_without_prefix, region_code)
            .map(|number| self.is_valid_number(&number))
            .unwrap_or(false)
    }

    fn has_formatting_pattern_for_number(&self, phone_number: &PhoneNumber) -> bool {
        let country_calling_code = phone_number.country_code();
        let phone_number_region = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, phone_number_region)
        else {
            return false;
        };
        let national_number = Self::get_national_significant_number(phone_number);
        self.choose_formatting_pattern_for_number(&metadata.number_format, &national_number)
            .is_some()
    }

    /// Formats a phone number for out-of-country dialing purposes, keeping the
    /// alpha characters and the grouping of the raw input.
    ///
    /// Numbers without raw input are formatted exactly like
    /// [`Self::format_out_of_country_calling_number`] does.
    pub fn format_out_of_country_keeping_alpha_chars<'a>(
        &self,
        phone_number: &'a PhoneNumber,
        region_calling_from: &str,
    ) -> Cow<'a, str> {
        // If there is no raw input, then we can't keep alpha characters because
        // there aren't any. In this case, we return
        // format_out_of_country_calling_number.
        if phone_number.raw_input().is_empty() {
            return Cow::Owned(
                self.format_out_of_country_calling_number(phone_number, region_calling_from),
            );
        }
        let country_code = phone_number.country_code();
        if !self.has_valid_country_calling_code(country_code) {
            return Cow::Borrowed(phone_number.raw_input());
        }
        // Strip any prefix such as country calling code, IDD, that was present.
        // We do this by comparing the number in raw_input with the parsed number.
        // Normalize punctuation. We retain number grouping symbols such as " "
        // only.
        let normalized_raw_input = normalize_helper(
            &self.reg_exps.all_plus_number_grouping_symbols,
            true,
            phone_number.raw_input(),
        );
        // Now we trim everything before the first three digits in the parsed
        // number. We choose three because all valid alpha numbers have 3 digits
        // at the start - if it does not, then we don't trim anything at all.
        // Similarly, if the national number was less than three digits, we don't
        // trim anything at all.
        let national_number = Self::get_national_significant_number(phone_number);
        // Caller-built numbers may hold non-ASCII text, so the prefix is only
        // taken on a char boundary.
        let first_digits = national_number
            .get(..3)
            .filter(|_| national_number.len() > 3);
        let raw_input = match first_digits.and_then(|digits| normalized_raw_input.find(digits)) {
            Some(first_national_number_digit) => &normalized_raw_input[first_national_number_digit..],
            None => normalized_raw_input.as_str(),
        };

        let metadata_calling_from = self.get_metadata_for_region(region_calling_from);
        if country_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(region_calling_from) {
                let mut buf = itoa::Buffer::new();
                return Cow::Owned(fast_cat::concat_str!(buf.format(country_code), " ", raw_input));
            }
        } else if let Some(metadata) = metadata_calling_from
            .as_deref()
            .filter(|metadata| metadata.country_code() == country_code)
        {
            let Some(formatting_pattern) =
                self.choose_formatting_pattern_for_number(&metadata.number_format, &national_number)
            else {
                // If no pattern above is matched, we format the original input.
                return Cow::Owned(raw_input.to_owned());
            };
            let mut new_format = formatting_pattern.clone();
            // The first group is the first group of digits that the user wrote
            // together.
            new_format.set_pattern("(\\d+)(.*)".to_owned());
            // Here we just concatenate them back together after the national
            // prefix has been fixed.
            new_format.set_format("$1$2".to_owned());
            // Now we format using this pattern instead of the default pattern, but
            // with the national prefix prefixed if necessary.
            // This will not work in the cases where the pattern (and not the
            // leading digits) decide whether a national prefix needs to be used,
            // since we have overridden the pattern to match anything, but that is
            // not the case in the metadata to date.
            return Cow::Owned(
                self.format_nsn_using_pattern(
                    raw_input,
                    &new_format,
                    PhoneNumberFormat::National,
                    metadata.national_prefix(),
                )
                .into_owned(),
            );
        }

        // Invalid region entered as country-calling-from (so no metadata was
        // found for it) or the region chosen has multiple international dialling
        // prefixes.
        let international_prefix_for_formatting = match metadata_calling_from.as_deref() {
            Some(metadata) => self.international_prefix_for_formatting(metadata, false),
            None => {
                warn!(
                    "Trying to format number from invalid region {region_calling_from}. International formatting applied."
                );
                ""
            }
        };
        let mut formatted_number = raw_input.to_owned();
        let region_code = self.get_region_code_for_country_code(country_code);
        // Metadata cannot be None because the country calling code is valid.
        if let Some(metadata_for_region) =
            self.get_metadata_for_region_or_calling_code(country_code, region_code)
        {
            Self::maybe_append_formatted_extension(
                phone_number,
                &metadata_for_region,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
        }
        Self::prefix_with_international_prefix(
            country_code,
            international_prefix_for_formatting,
            &mut formatted_number,
        );
        Cow::Owned(formatted_number)
    }

    /// Picks the international prefix a region should be written with. Regions
    /// with several possible prefixes use their preferred one, if any. With
    /// `prefer_preferred` set, the preferred prefix wins even when the region
    /// has a single prefix.
    fn international_prefix_for_formatting<'m>(
        &self,
        metadata: &'m PhoneMetadata,
        prefer_preferred: bool,
    ) -> &'m str {
        let international_prefix = metadata.international_prefix();
        let has_single_prefix = self
            .reg_exps
            .single_international_prefix
            .full_match(international_prefix);
        if prefer_preferred && metadata.has_preferred_international_prefix() {
            metadata.preferred_international_prefix()
        } else if has_single_prefix {
            international_prefix
        } else {
            metadata.preferred_international_prefix()
        }
    }

    /// Writes `PREFIX CC ` in front of the number, or `+CC ` when there is no
    /// usable international prefix.
    fn prefix_with_international_prefix(
        country_code: i32,
        international_prefix: &str,
        formatted_number: &mut String,
    ) {
        if international_prefix.is_empty() {
            prefix_number_with_country_calling_code(
                country_code,
                PhoneNumberFormat::International,
                formatted_number,
            );
            return;
        }
        let mut buf = itoa::Buffer::new();
        *formatted_number = fast_cat::concat_str!(
            international_prefix,
            " ",
            buf.format(country_code),
            " ",
            formatted_number.as_str()
        );
    }

    /// Note in some regions, the national number can be written in two
    /// completely different ways depending on whether it forms part of the
    /// NATIONAL format or INTERNATIONAL format. The number_format parameter here
    /// is used to specify which format to use for those cases.
    pub(super) fn format_nsn<'b>(
        &self,
        national_number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Cow<'b, str> {
        self.format_nsn_with_carrier(national_number, metadata, number_format, None)
    }

    fn format_nsn_with_carrier<'b>(
        &self,
        national_number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        carrier_code: Option<&str>,
    ) -> Cow<'b, str> {
        // When the intl_number_formats exists, we use that to format national number
        // for the INTERNATIONAL format instead of using the number_formats.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        match self.choose_formatting_pattern_for_number(available_formats, national_number) {
            Some(formatting_pattern) => self.format_nsn_using_pattern_with_carrier(
                national_number,
                formatting_pattern,
                number_format,
                carrier_code,
                metadata.national_prefix(),
            ),
            None => Cow::Borrowed(national_number),
        }
    }

    pub(super) fn choose_formatting_pattern_for_number<'f>(
        &self,
        available_formats: &'f [NumberFormat],
        national_number: &str,
    ) -> Option<&'f NumberFormat> {
        available_formats.iter().find(|format| {
            // We always use the last leading_digits_pattern, as it is the most
            // detailed.
            let leading_digits_match = format
                .leading_digits_pattern
                .last()
                .map_or(true, |leading_digits| {
                    self.metadata_regex(leading_digits)
                        .is_some_and(|regex| regex.matches_start(national_number))
                });
            leading_digits_match && self.full_match(format.pattern(), national_number)
        })
    }

    /// Simple wrapper of [`Self::format_nsn_using_pattern_with_carrier`] for
    /// the common case of no carrier code.
    fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        national_prefix: &str,
    ) -> Cow<'b, str> {
        self.format_nsn_using_pattern_with_carrier(
            national_number,
            formatting_pattern,
            number_format,
            None,
            national_prefix,
        )
    }

    /// Note that carrier_code is optional - if None or an empty string, no
    /// carrier code replacement will take place.
    fn format_nsn_using_pattern_with_carrier<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: Option<&str>,
        national_prefix: &str,
    ) -> Cow<'b, str> {
        let Some(pattern_to_match) = self.metadata_regex(formatting_pattern.pattern()) else {
            return Cow::Borrowed(national_number);
        };
        let number_format_rule = formatting_pattern.format();
        let carrier_code = carrier_code.filter(|code| !code.is_empty());
        let carrier_code_formatting_rule = formatting_pattern.domestic_carrier_code_formatting_rule();
        let national_prefix_formatting_rule = formatting_pattern.national_prefix_formatting_rule();

        let number_format_rule = match (number_format, carrier_code) {
            (PhoneNumberFormat::National, Some(carrier_code))
                if !carrier_code_formatting_rule.is_empty() =>
            {
                // Replace the $CC in the formatting rule with the desired carrier code.
                let carrier_code_formatting_rule =
                    resolve_formatting_rule(carrier_code_formatting_rule, national_prefix)
                        .replace(CARRIER_CODE_PLACEHOLDER, carrier_code);
                // Now replace the $FG in the formatting rule with the first group and
                // the carrier code combined in the appropriate way.
                self.reg_exps.first_group_capturing_pattern.replacen(
                    number_format_rule,
                    1,
                    to_regex_replacement(&carrier_code_formatting_rule).as_ref(),
                )
            }
            // Use the national prefix formatting rule instead.
            (PhoneNumberFormat::National, _) if !national_prefix_formatting_rule.is_empty() => {
                // Apply the national_prefix_formatting_rule as the formatting_pattern
                // contains only information on how the national significant number
                // should be formatted at this point.
                let national_prefix_formatting_rule =
                    resolve_formatting_rule(national_prefix_formatting_rule, national_prefix);
                self.reg_exps.first_group_capturing_pattern.replacen(
                    number_format_rule,
                    1,
                    to_regex_replacement(&national_prefix_formatting_rule).as_ref(),
                )
            }
            _ => Cow::Borrowed(number_format_rule),
        };

        let formatted_national_number =
            RegexMatcher::new(&pattern_to_match, national_number).replace_all(&number_format_rule);

        if number_format != PhoneNumberFormat::RFC3966 {
            return formatted_national_number;
        }
        // First consume any leading punctuation, if any was present.
        let separator_pattern = &self.reg_exps.separator_pattern;
        let without_leading_separator = separator_pattern
            .consume_start(&formatted_national_number)
            .unwrap_or(formatted_national_number.as_ref());
        // Then replace all separators with a "-".
        Cow::Owned(
            separator_pattern
                .unanchored()
                .replace_all(without_leading_separator, "-")
                .into_owned(),
        )
    }

    /// Appends the formatted extension of a phone number to formatted_number,
    /// if the phone number had an extension specified.
    fn maybe_append_formatted_extension(
        phone_number: &PhoneNumber,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        formatted_number: &mut String,
    ) {
        if phone_number.extension().is_empty() {
            return;
        }
        let prefix = if number_format == PhoneNumberFormat::RFC3966 {
            RFC3966_EXTN_PREFIX
        } else if metadata.has_preferred_extn_prefix() {
            metadata.preferred_extn_prefix()
        } else {
            DEFAULT_EXTN_PREFIX
        };
        formatted_number.push_str(prefix);
        formatted_number.push_str(phone_number.extension());
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_formatting_rule;

    #[test]
    fn resolves_placeholders() {
        assert_eq!("0$1", resolve_formatting_rule("$NP$FG", "0"));
        assert_eq!("($1)", resolve_formatting_rule("($FG)", "0"));
        assert_eq!("$1", resolve_formatting_rule("$NP$FG", ""));
        assert_eq!("0 $CC ($1)", resolve_formatting_rule("$NP $CC ($FG)", "0"));
        assert_eq!("plain", resolve_formatting_rule("plain", "0"));
    }
}
