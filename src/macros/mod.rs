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

/// Takes the `String` out of a `Cow<str>` produced by a formatting step, or
/// falls back to `$unchanged` when the step borrowed its input untouched.
///
/// Formatting helpers return `Cow::Borrowed` when nothing matched, so the
/// caller can keep the string it already owns instead of copying it.
macro_rules! owned_from_cow_or {
    ($cow:expr, $unchanged:expr) => {{
        match $cow {
            std::borrow::Cow::Owned(formatted) => formatted,
            std::borrow::Cow::Borrowed(_) => $unchanged,
        }
    }};
}

pub(crate) use owned_from_cow_or;
