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

use strum::EnumIter;

/// Output style of [`PhoneNumberUtil::format`](super::PhoneNumberUtil::format).
///
/// Taking the number `+41 44 668 1800` as an example:
///
/// | Style | Output |
/// |---|---|
/// | `E164` | `+41446681800` |
/// | `International` | `+41 44 668 1800` |
/// | `National` | `044 668 1800` |
/// | `RFC3966` | `tel:+41-44-668-1800` |
///
/// `International` and `National` follow the grouping rules of the number's
/// region, so separators are not always spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// `+` followed by the calling code and the national significant number,
    /// with no separators. Extensions are never written.
    E164,
    International,
    /// Dialable from inside the region, national prefix included where the
    /// region's rules ask for one.
    National,
    /// A `tel:` URI with hyphens between groups and `;ext=` for extensions.
    RFC3966,
}

/// Category a number falls into according to its region's metadata.
///
/// Iterating over the variants (through [`strum::IntoEnumIterator`]) yields
/// them in declaration order, which is also the order supported types are
/// reported in.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    FixedLine,
    Mobile,
    /// The region uses the same ranges for landlines and mobiles, as the
    /// NANPA countries do, so the two cannot be told apart.
    FixedLineOrMobile,
    /// Free for the caller.
    TollFree,
    PremiumRate,
    /// The charge is split between caller and callee.
    SharedCost,
    VoIP,
    /// A number tied to a person and routed to whichever line they choose.
    PersonalNumber,
    Pager,
    /// Universal access number: one company-wide number routed to one of
    /// several offices.
    UAN,
    /// Direct access to a voicemail box.
    VoiceMail,
    /// Valid for neither of the above, or the region is unknown.
    Unknown,
}

/// How closely two numbers correspond, from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// One side could not be parsed.
    NotANumber,
    NoMatch,
    /// Same calling code (or at most one given) and one national number is a
    /// trailing part of the other, e.g. `6502530000` against `16502530000`.
    ShortNsnMatch,
    /// Same national number, but the calling code was only inferred on at
    /// least one side.
    NsnMatch,
    /// Calling code, national number, extension and leading zero all agree.
    ExactMatch,
}

/// Successful outcome of a length check. The failures live in
/// [`ValidationError`](super::errors::ValidationError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberLengthType {
    IsPossible,
    /// Only dialable inside a smaller area, typically with the area code
    /// left out.
    IsPossibleLocalOnly,
}
