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

use regex::{Captures, Match};

use crate::regexp_cache::RegexPattern;

pub trait RegexFullMatch {
    /// True when the pattern matches the whole input.
    fn full_match(&self, s: &str) -> bool;
}

pub trait RegexConsume {
    /// True when the pattern matches a prefix of the input.
    fn matches_start(&self, s: &str) -> bool {
        self.find_start(s).is_some()
    }

    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>>;
    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>>;

    /// Returns the part of `s` left after a match anchored at its start.
    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str> {
        self.find_start(s).map(|found| &s[found.end()..])
    }
}

impl RegexFullMatch for RegexPattern {
    fn full_match(&self, s: &str) -> bool {
        self.anchored_full().is_match(s)
    }
}

impl RegexConsume for RegexPattern {
    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>> {
        self.anchored_start().captures(s)
    }

    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>> {
        self.anchored_start().find(s)
    }
}

/// Rewrites a replacement template written with `$1`-style group references
/// (as found in metadata) into the `${1}` syntax of the `regex` crate.
///
/// A `$` that is not followed by a digit is kept as a literal dollar sign and
/// `\x` escapes the character `x`.
pub fn to_regex_replacement(template: &str) -> Cow<'_, str> {
    if !template.contains(['$', '\\']) {
        return Cow::Borrowed(template);
    }
    let mut converted = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    converted.push_str("${");
                    converted.push(*d);
                    converted.push('}');
                    chars.next();
                }
                _ => converted.push_str("$$"),
            },
            '\\' => match chars.next() {
                Some('$') => converted.push_str("$$"),
                Some(escaped) => converted.push(escaped),
                None => converted.push('\\'),
            },
            other => converted.push(other),
        }
    }
    Cow::Owned(converted)
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

fn byte_offset(text: &str, char_offset: usize) -> Option<usize> {
    if char_offset == 0 {
        return Some(0);
    }
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}

/// A stateful matcher over a single input that remembers its last match.
///
/// Offsets reported by [`RegexMatcher::start`] and [`RegexMatcher::end`] and
/// accepted by [`RegexMatcher::find_from`] are counted in Unicode code points,
/// never in bytes.
pub struct RegexMatcher<'r, 't> {
    pattern: &'r RegexPattern,
    text: &'t str,
    captures: Option<Captures<'t>>,
    // Byte position where the next `find` starts.
    search_from: usize,
}

impl<'r, 't> RegexMatcher<'r, 't> {
    pub fn new(pattern: &'r RegexPattern, text: &'t str) -> Self {
        Self {
            pattern,
            text,
            captures: None,
            search_from: 0,
        }
    }

    /// Attempts to match the entire input.
    pub fn matches(&mut self) -> bool {
        self.captures = self.pattern.anchored_full().captures(self.text);
        self.captures.is_some()
    }

    /// Attempts to match a prefix of the input.
    pub fn looking_at(&mut self) -> bool {
        self.captures = self.pattern.anchored_start().captures(self.text);
        self.captures.is_some()
    }

    /// Finds the next match after the previous one, or from the start of the
    /// input if nothing was found yet.
    pub fn find(&mut self) -> bool {
        if self.search_from > self.text.len() {
            self.captures = None;
            return false;
        }
        self.captures = self
            .pattern
            .unanchored()
            .captures_at(self.text, self.search_from);
        if let Some(whole) = self.captures.as_ref().and_then(|c| c.get(0)) {
            self.search_from = if whole.start() == whole.end() {
                // Step over one character so an empty match can't loop forever.
                self.text[whole.end()..]
                    .chars()
                    .next()
                    .map(|c| whole.end() + c.len_utf8())
                    .unwrap_or(self.text.len() + 1)
            } else {
                whole.end()
            };
            true
        } else {
            false
        }
    }

    /// Resets the matcher and finds the first match starting at the given
    /// code point offset.
    pub fn find_from(&mut self, offset: usize) -> bool {
        match byte_offset(self.text, offset) {
            Some(from) => {
                self.search_from = from;
                self.find()
            }
            None => {
                self.captures = None;
                false
            }
        }
    }

    /// Text captured by group `n` of the last match. Group 0 is the whole match.
    pub fn group(&self, n: usize) -> Option<&'t str> {
        self.captures
            .as_ref()
            .and_then(|c| c.get(n))
            .map(|m| m.as_str())
    }

    /// Number of capturing groups in the pattern, group 0 excluded.
    pub fn group_count(&self) -> usize {
        self.pattern.unanchored().captures_len() - 1
    }

    /// Code point offset of the start of the last match.
    pub fn start(&self) -> Option<usize> {
        self.whole_match()
            .map(|m| char_offset(self.text, m.start()))
    }

    /// Code point offset right after the end of the last match.
    pub fn end(&self) -> Option<usize> {
        self.whole_match().map(|m| char_offset(self.text, m.end()))
    }

    /// Input preceding the last match.
    pub fn prefix(&self) -> Option<&'t str> {
        self.whole_match().map(|m| &self.text[..m.start()])
    }

    /// Input following the last match.
    pub fn remainder(&self) -> Option<&'t str> {
        self.whole_match().map(|m| &self.text[m.end()..])
    }

    /// Expands a `$n` template against the groups of the last match.
    pub fn expand(&self, template: &str) -> Option<String> {
        let captures = self.captures.as_ref()?;
        let mut expanded = String::new();
        captures.expand(&to_regex_replacement(template), &mut expanded);
        Some(expanded)
    }

    /// Replaces the first match in the input with the `$n` template.
    pub fn replace_first(&self, template: &str) -> Cow<'t, str> {
        self.pattern
            .unanchored()
            .replacen(self.text, 1, to_regex_replacement(template).as_ref())
    }

    /// Replaces every match in the input with the `$n` template.
    pub fn replace_all(&self, template: &str) -> Cow<'t, str> {
        self.pattern
            .unanchored()
            .replace_all(self.text, to_regex_replacement(template).as_ref())
    }

    fn whole_match(&self) -> Option<Match<'t>> {
        self.captures.as_ref().and_then(|c| c.get(0))
    }
}

#[cfg(test)]
mod tests {
    use super::{to_regex_replacement, RegexConsume, RegexFullMatch, RegexMatcher};
    use crate::regexp_cache::RegexPattern;

    #[test]
    fn converts_group_references() {
        assert_eq!("${1} ${2}", to_regex_replacement("$1 $2"));
        assert_eq!("$$NP", to_regex_replacement("$NP"));
        assert_eq!("${1}9", to_regex_replacement("$19"));
        assert_eq!("plain", to_regex_replacement("plain"));
    }

    #[test]
    fn full_and_prefix_matching() {
        let pattern = RegexPattern::new(r"\d{3}").unwrap();
        assert!(pattern.full_match("123"));
        assert!(!pattern.full_match("1234"));
        assert!(pattern.matches_start("1234"));
        assert_eq!(Some("4"), pattern.consume_start("1234"));
        assert!(!pattern.matches_start("a123"));
    }

    #[test]
    fn offsets_are_in_code_points() {
        let pattern = RegexPattern::new(r"\d+").unwrap();
        let text = "\u{FF0B}\u{00E9}12 34";
        let mut matcher = RegexMatcher::new(&pattern, text);
        assert!(matcher.find());
        assert_eq!(Some(2), matcher.start());
        assert_eq!(Some(4), matcher.end());
        assert!(matcher.find());
        assert_eq!(Some("34"), matcher.group(0));
        assert_eq!(Some(5), matcher.start());
        assert!(!matcher.find());

        assert!(matcher.find_from(3));
        assert_eq!(Some("2"), matcher.group(0));
    }

    #[test]
    fn groups_and_replacement() {
        let pattern = RegexPattern::new(r"(\d{3})(\d{4})").unwrap();
        let mut matcher = RegexMatcher::new(&pattern, "2530000");
        assert!(matcher.matches());
        assert_eq!(2, matcher.group_count());
        assert_eq!(Some("253"), matcher.group(1));
        assert_eq!("253 0000", matcher.replace_first("$1 $2"));
        assert_eq!(Some("9-253".to_owned()), matcher.expand("9-$1"));
    }

    #[test]
    fn looking_at_exposes_remainder() {
        let pattern = RegexPattern::new("0(?:(11)15)?").unwrap();
        let mut matcher = RegexMatcher::new(&pattern, "0111587654321");
        assert!(matcher.looking_at());
        assert_eq!(Some("11"), matcher.group(1));
        assert_eq!(Some("87654321"), matcher.remainder());
        assert_eq!(Some(""), matcher.prefix());
    }
}
