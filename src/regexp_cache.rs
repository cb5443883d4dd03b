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

use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// A metadata pattern compiled in the three shapes the engine needs.
///
/// The `regex` crate has no notion of "match the whole input" or "match at
/// the start only", so instead of checking spans after the fact the pattern is
/// compiled once more with explicit anchors. This keeps the leftmost-first
/// alternation semantics of the metadata intact for every mode.
#[derive(Debug)]
pub struct RegexPattern {
    source: String,
    unanchored: Regex,
    looking_at: Regex,
    full: Regex,
}

impl RegexPattern {
    pub fn new(pattern: &str) -> Result<Self, InvalidRegexError> {
        Ok(Self {
            source: pattern.to_owned(),
            unanchored: Regex::new(pattern)?,
            looking_at: Regex::new(&fast_cat::concat_str!("^(?:", pattern, ")"))?,
            full: Regex::new(&fast_cat::concat_str!("^(?:", pattern, ")$"))?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Pattern usable for searching anywhere in the input.
    pub fn unanchored(&self) -> &Regex {
        &self.unanchored
    }

    /// Pattern anchored at the start of the input.
    pub fn anchored_start(&self) -> &Regex {
        &self.looking_at
    }

    /// Pattern anchored at both ends of the input.
    pub fn anchored_full(&self) -> &Regex {
        &self.full
    }
}

pub struct RegexCache {
    cache: DashMap<String, Arc<RegexPattern>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<RegexPattern>, InvalidRegexError> {
        if let Some(regex) = self.cache.get(pattern) {
            return Ok(regex.value().clone());
        }
        let entry = self
            .cache
            .entry(pattern.to_string())
            .or_try_insert_with(|| RegexPattern::new(pattern).map(Arc::new))?;
        Ok(entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::RegexCache;

    #[test]
    fn compiles_each_pattern_once() {
        let cache = RegexCache::with_capacity(4);
        let first = cache.get_regex(r"\d{3}").unwrap();
        let second = cache.get_regex(r"\d{3}").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(1, cache.len());
        assert_eq!(r"\d{3}", first.as_str());
    }

    #[test]
    fn invalid_pattern_is_reported_and_not_cached() {
        let cache = RegexCache::new();
        assert!(cache.get_regex("(unclosed").is_err());
        assert_eq!(0, cache.len());
    }

    #[test]
    fn anchored_variants_keep_alternation_order() {
        let cache = RegexCache::new();
        let pattern = cache.get_regex("1|12").unwrap();
        assert!(pattern.anchored_full().is_match("12"));
        assert_eq!(
            "1",
            pattern.anchored_start().find("123").unwrap().as_str()
        );
        assert!(!pattern.anchored_start().is_match("312"));
        assert!(pattern.unanchored().is_match("312"));
    }
}
