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

use std::collections::{HashMap, VecDeque};

use crate::{i18n::RegionCode, proto_gen::phonemetadata::PhoneMetadataCollection};

/// A mapping from a country calling code to the region codes which denote the
/// regions represented by that country calling code.
///
/// Note regions under NANPA share the country calling code 1 and Russia and
/// Kazakhstan share the country calling code 7. The main country for a code is
/// always first in its list, so under this map 1 is mapped to "US" first and 7
/// to "RU" first. Non-geographical entities are listed under `"001"`.
///
/// This is implemented as a sorted vector to achieve better performance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallingCodeMap {
    entries: Vec<(i32, Vec<String>)>,
}

impl CallingCodeMap {
    /// Builds the map from `(calling code, regions)` pairs. The regions of each
    /// pair must already be ordered with the main country first.
    pub fn new(entries: impl IntoIterator<Item = (i32, Vec<String>)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        // Sort all the pairs in ascending order according to country calling code.
        entries.sort_by_key(|(code, _)| *code);
        entries.dedup_by_key(|(code, _)| *code);
        Self { entries }
    }

    pub fn from_collection(collection: &PhoneMetadataCollection) -> Self {
        // Storing data in a temporary map to make it easier to find other regions
        // that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        for metadata in &collection.metadata {
            let region_code = metadata.id();
            if RegionCode::get_unknown() == region_code {
                continue;
            }
            let regions = country_calling_code_to_region_map
                .entry(metadata.country_code())
                .or_default();
            if metadata.main_country_for_code() {
                regions.push_front(region_code.to_owned());
            } else {
                regions.push_back(region_code.to_owned());
            }
        }
        Self::new(
            country_calling_code_to_region_map
                .into_iter()
                .map(|(code, regions)| (code, Vec::from(regions))),
        )
    }

    /// The region codes sharing `country_calling_code`, main country first.
    /// Empty if the calling code is unknown.
    pub fn region_codes_for(&self, country_calling_code: i32) -> &[String] {
        self.entries
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| self.entries[index].1.as_slice())
            .unwrap_or(&[])
    }

    /// The main region for the code, if the code is known.
    pub fn main_region_for(&self, country_calling_code: i32) -> Option<&str> {
        self.region_codes_for(country_calling_code)
            .first()
            .map(|region| region.as_str())
    }

    pub fn contains(&self, country_calling_code: i32) -> bool {
        self.entries
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    /// Iterates over the calling codes in ascending order together with their
    /// regions.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[String])> {
        self.entries
            .iter()
            .map(|(code, regions)| (*code, regions.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use protobuf::Message;

    use super::CallingCodeMap;
    use crate::proto_gen::phonemetadata::{PhoneMetadata, PhoneMetadataCollection};

    fn metadata(id: &str, code: i32, main: bool) -> PhoneMetadata {
        let mut metadata = PhoneMetadata::new();
        metadata.set_id(id.to_owned());
        metadata.set_country_code(code);
        metadata.set_main_country_for_code(main);
        metadata
    }

    #[test]
    fn main_country_comes_first() {
        let mut collection = PhoneMetadataCollection::new();
        collection.metadata.push(metadata("BS", 1, false));
        collection.metadata.push(metadata("GB", 44, false));
        collection.metadata.push(metadata("US", 1, true));
        collection.metadata.push(metadata("ZZ", 999, false));
        collection.metadata.push(metadata("001", 800, false));

        let map = CallingCodeMap::from_collection(&collection);
        assert_eq!(vec!["US".to_owned(), "BS".to_owned()], map.region_codes_for(1));
        assert_eq!(Some("GB"), map.main_region_for(44));
        assert_eq!(Some("001"), map.main_region_for(800));
        assert!(!map.contains(999));
        assert!(map.region_codes_for(2).is_empty());
        assert_eq!(
            vec![1, 44, 800],
            map.iter().map(|(code, _)| code).collect::<Vec<_>>()
        );
    }
}
