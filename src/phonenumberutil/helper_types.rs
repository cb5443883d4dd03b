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

use crate::CountryCodeSource;

/// Result of stripping a plus sign or IDD off the start of a number.
#[derive(Debug)]
pub struct PhoneNumberWithCountryCodeSource<'a> {
    pub phone_number: Cow<'a, str>,
    pub country_code_source: CountryCodeSource,
}

impl<'a> PhoneNumberWithCountryCodeSource<'a> {
    pub fn new(phone_number: Cow<'a, str>, country_code_source: CountryCodeSource) -> Self {
        Self {
            phone_number,
            country_code_source,
        }
    }
}

/// Result of extracting a country calling code from the start of a number.
#[derive(Debug)]
pub struct ExtractedCountryCode {
    /// 0 if no calling code was found.
    pub country_code: i32,
    pub country_code_source: CountryCodeSource,
    /// Digits left after the calling code (and, for numbers written without a
    /// plus sign, the national prefix) were removed.
    pub national_number: String,
}

/// A national number with the national prefix and carrier code stripped.
#[derive(Debug, PartialEq, Eq)]
pub struct StrippedNationalNumber {
    pub national_number: String,
    pub carrier_code: Option<String>,
}
