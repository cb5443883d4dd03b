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

use thiserror::Error;

/// Why a string could not be turned into a [`PhoneNumber`](crate::PhoneNumber).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No calling code could be read from the text and the default region
    /// is missing or unknown.
    #[error("missing or unknown country calling code")]
    InvalidCountryCode,
    #[error("not a phone number: {0}")]
    NotANumber(#[from] NotANumberError),
    /// At most two digits followed the international dialing prefix.
    #[error("too few digits after the international dialing prefix")]
    TooShortAfterIdd,
    #[error("national significant number has fewer than 2 digits")]
    TooShortNsn,
    /// Either the raw input exceeds 250 characters or the national
    /// significant number exceeds 17 digits.
    #[error("input or national significant number is too long")]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotANumberError {
    #[error("text does not look like a phone number")]
    NotMatchedValidNumberPattern,
    /// The `phone-context` of an RFC3966 number is neither a global number
    /// nor a domain name.
    #[error("invalid phone-context parameter")]
    InvalidPhoneContext,
    #[error(transparent)]
    FailedToExtractNumber(#[from] ExtractNumberError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractNumberError {
    #[error("no '+' or digit to start the number from")]
    NoValidStartCharacter,
    #[error("extracted text is not a viable number")]
    NotANumber,
}

/// Why an example number could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetExampleNumberError {
    /// The example stored in the metadata failed to parse.
    #[error("example number failed to parse: {0}")]
    FailedToParse(#[from] ParseError),
    #[error("no example number in the metadata")]
    NoExampleNumber,
    /// The region has no numbers of the requested type.
    #[error("no number of the requested type")]
    CouldNotGetNumber,
    #[error("unknown region code")]
    InvalidRegionCode,
}

/// Failed outcome of a length check. The successful ones are
/// [`NumberLengthType`](super::NumberLengthType).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    #[error("unknown country calling code")]
    InvalidCountryCode,
    /// Shorter than every valid length.
    #[error("shorter than any valid number")]
    TooShort,
    /// Between the shortest and longest valid lengths without being one of
    /// them. Also returned when the region has no numbers of the requested
    /// type.
    #[error("not a valid length for the region")]
    InvalidLength,
    /// Longer than every valid length.
    #[error("longer than any valid number")]
    TooLong,
}

impl From<ExtractNumberError> for ParseError {
    fn from(value: ExtractNumberError) -> Self {
        NotANumberError::FailedToExtractNumber(value).into()
    }
}
