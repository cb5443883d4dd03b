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

//! Parsing, formatting, validation and matching of international phone
//! numbers.
//!
//! Everything is driven by metadata handed in at construction time, either
//! through a [`MetadataSource`] or as a [`phonemetadata::PhoneMetadataCollection`]:
//!
//! ```ignore
//! let util = PhoneNumberUtil::new_for_metadata(collection);
//! let number = util.parse("044 668 1800", "CH")?;
//! assert_eq!("+41446681800", util.format(&number, PhoneNumberFormat::E164));
//! ```

mod interfaces;
mod metadata;
/// This module is automatically generated from /resources/*.proto
mod proto_gen;
mod phonenumber;
mod phonenumberutil;
mod regexp_cache;
mod regex_based_matcher;
mod shortnumberinfo;
pub mod i18n;
pub(crate) mod regex_util;

/// Small macros for the places where a few lines of boilerplate would hide
/// what is going on.
mod macros;

#[cfg(test)]
mod tests;

pub use interfaces::MetadataSource;
pub use metadata::{CallingCodeMap, CollectionMetadataSource};
pub use phonenumber::{CountryCodeSource, PhoneNumber};
pub use phonenumberutil::{
    enums, errors, MatchType, NumberLengthType, PhoneNumberFormat, PhoneNumberType,
    PhoneNumberUtil,
};
pub use proto_gen::phonemetadata;
pub use regexp_cache::InvalidRegexError;
pub use shortnumberinfo::{ShortNumberCost, ShortNumberInfo};
