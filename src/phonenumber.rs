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

/// Where the country calling code of a parsed number came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountryCodeSource {
    /// Not set. Numbers created by [`parse`](crate::PhoneNumberUtil::parse)
    /// (rather than the raw-input keeping variant) always carry this value.
    #[default]
    Unspecified,
    /// The number started with a plus sign, e.g. `+1 650 253 0000`.
    FromPlusSign,
    /// The number started with the international dialing prefix of the
    /// default region, e.g. `011 1 650 253 0000` dialled from the US.
    FromIdd,
    /// The number started with the country calling code but without a plus
    /// sign or IDD, e.g. `1 650 253 0000` entered for the US.
    FromNumberWithoutPlus,
    /// The number carried no calling code and the default region was used.
    FromDefaultCountry,
}

/// A parsed telephone number.
///
/// Every optional field distinguishes "not set" from "set to an empty or
/// default value", mirroring a proto2 message. Use the `has_*` accessors when
/// that difference matters; the plain getters fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    country_code: Option<i32>,
    national_number: String,
    extension: Option<String>,
    italian_leading_zero: Option<bool>,
    number_of_leading_zeros: Option<i32>,
    raw_input: Option<String>,
    country_code_source: CountryCodeSource,
    preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn new() -> Self {
        Self::default()
    }

    /// E.164 country calling code, or 0 if unset.
    pub fn country_code(&self) -> i32 {
        self.country_code.unwrap_or(0)
    }

    pub fn has_country_code(&self) -> bool {
        self.country_code.is_some()
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = Some(country_code);
    }

    pub fn clear_country_code(&mut self) {
        self.country_code = None;
    }

    /// National number as decimal digits with the leading zeros removed.
    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    pub fn has_national_number(&self) -> bool {
        !self.national_number.is_empty()
    }

    pub fn set_national_number(&mut self, national_number: impl Into<String>) {
        self.national_number = national_number.into();
    }

    pub fn clear_national_number(&mut self) {
        self.national_number.clear();
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn set_extension(&mut self, extension: impl Into<String>) {
        self.extension = Some(extension.into());
    }

    pub fn clear_extension(&mut self) {
        self.extension = None;
    }

    /// Whether the national significant number starts with zeros that are part
    /// of the number (as in Italy) rather than a national prefix.
    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.unwrap_or(false)
    }

    pub fn has_italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.is_some()
    }

    pub fn set_italian_leading_zero(&mut self, value: bool) {
        self.italian_leading_zero = Some(value);
    }

    pub fn clear_italian_leading_zero(&mut self) {
        self.italian_leading_zero = None;
    }

    /// Only meaningful when [`Self::italian_leading_zero`] is true.
    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros.unwrap_or(1)
    }

    pub fn has_number_of_leading_zeros(&self) -> bool {
        self.number_of_leading_zeros.is_some()
    }

    pub fn set_number_of_leading_zeros(&mut self, value: i32) {
        self.number_of_leading_zeros = Some(value);
    }

    pub fn clear_number_of_leading_zeros(&mut self) {
        self.number_of_leading_zeros = None;
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or("")
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn set_raw_input(&mut self, raw_input: impl Into<String>) {
        self.raw_input = Some(raw_input.into());
    }

    pub fn clear_raw_input(&mut self) {
        self.raw_input = None;
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source
    }

    pub fn has_country_code_source(&self) -> bool {
        self.country_code_source != CountryCodeSource::Unspecified
    }

    pub fn set_country_code_source(&mut self, source: CountryCodeSource) {
        self.country_code_source = source;
    }

    pub fn clear_country_code_source(&mut self) {
        self.country_code_source = CountryCodeSource::Unspecified;
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code
            .as_deref()
            .unwrap_or("")
    }

    pub fn has_preferred_domestic_carrier_code(&self) -> bool {
        self.preferred_domestic_carrier_code.is_some()
    }

    pub fn set_preferred_domestic_carrier_code(&mut self, carrier_code: impl Into<String>) {
        self.preferred_domestic_carrier_code = Some(carrier_code.into());
    }

    pub fn clear_preferred_domestic_carrier_code(&mut self) {
        self.preferred_domestic_carrier_code = None;
    }

    /// Resets every field to its unset state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryCodeSource, PhoneNumber};

    #[test]
    fn unset_and_empty_are_different() {
        let mut number = PhoneNumber::new();
        assert!(!number.has_extension());
        assert_eq!("", number.extension());

        number.set_extension("");
        assert!(number.has_extension());
        assert_ne!(PhoneNumber::new(), number);

        number.clear_extension();
        assert_eq!(PhoneNumber::new(), number);
    }

    #[test]
    fn defaults() {
        let number = PhoneNumber::new();
        assert_eq!(0, number.country_code());
        assert_eq!(1, number.number_of_leading_zeros());
        assert!(!number.italian_leading_zero());
        assert_eq!(CountryCodeSource::Unspecified, number.country_code_source());
        assert!(!number.has_country_code_source());
    }
}
