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

use crate::{interfaces::MetadataSource, proto_gen::phonemetadata::PhoneMetadata};

/// Lazily filled view over a [`MetadataSource`].
///
/// Each known key is fetched from the source once. Misses are not stored,
/// since region codes come straight from callers and the set of unknown
/// ones is unbounded.
pub(crate) struct MetadataCache {
    source: Arc<dyn MetadataSource>,
    regions: DashMap<String, Arc<PhoneMetadata>>,
    non_geo: DashMap<i32, Arc<PhoneMetadata>>,
}

impl MetadataCache {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self {
            source,
            regions: DashMap::with_capacity(64),
            non_geo: DashMap::new(),
        }
    }

    pub fn for_region(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        if let Some(cached) = self.regions.get(region_code) {
            return Some(cached.value().clone());
        }
        let metadata = self.source.metadata_for_region(region_code)?;
        let entry = self
            .regions
            .entry(region_code.to_owned())
            .or_insert_with(|| Arc::new(metadata));
        Some(entry.value().clone())
    }

    pub fn for_non_geo_region(&self, country_calling_code: i32) -> Option<Arc<PhoneMetadata>> {
        if let Some(cached) = self.non_geo.get(&country_calling_code) {
            return Some(cached.value().clone());
        }
        let metadata = self.source.metadata_for_non_geo_region(country_calling_code)?;
        let entry = self
            .non_geo
            .entry(country_calling_code)
            .or_insert_with(|| Arc::new(metadata));
        Some(entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::MetadataCache;
    use crate::{interfaces::MetadataSource, proto_gen::phonemetadata::PhoneMetadata};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl MetadataSource for CountingSource {
        fn metadata_for_region(&self, region_code: &str) -> Option<PhoneMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (region_code == "GB").then(|| {
                let mut metadata = PhoneMetadata::new();
                metadata.set_id("GB".to_owned());
                metadata
            })
        }

        fn metadata_for_non_geo_region(&self, _: i32) -> Option<PhoneMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    #[test]
    fn hits_are_cached() {
        let source = Arc::new(CountingSource::default());
        let cache = MetadataCache::new(source.clone());

        let first = cache.for_region("GB").unwrap();
        let second = cache.for_region("GB").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(1, source.calls.load(Ordering::SeqCst));
    }

    #[test]
    fn unknown_keys_are_not_stored() {
        let source = Arc::new(CountingSource::default());
        let cache = MetadataCache::new(source.clone());

        for i in 0..1_000 {
            assert!(cache.for_region(&format!("R{i}")).is_none());
        }
        assert!(cache.for_non_geo_region(800).is_none());
        assert!(cache.for_non_geo_region(800).is_none());
        assert!(cache.regions.is_empty());
        assert!(cache.non_geo.is_empty());
        assert_eq!(1_002, source.calls.load(Ordering::SeqCst));

        assert!(cache.for_region("GB").is_some());
        assert_eq!(1, cache.regions.len());
    }
}
