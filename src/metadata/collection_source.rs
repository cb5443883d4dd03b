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

use std::collections::HashMap;

use log::trace;
use protobuf::Message;

use crate::{
    i18n::RegionCode,
    interfaces::MetadataSource,
    phonenumberutil::helper_constants::REGION_CODE_FOR_NON_GEO_ENTITY,
    proto_gen::phonemetadata::{PhoneMetadata, PhoneMetadataCollection},
};

/// [`MetadataSource`] backed by an in-memory [`PhoneMetadataCollection`].
#[derive(Debug, Default)]
pub struct CollectionMetadataSource {
    /// A mapping from a region code to a PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// A mapping from a country calling code for a non-geographical entity to the
    /// PhoneMetadata for that country calling code. Examples of the country
    /// calling codes include 800 (International Toll Free Service) and 808
    /// (International Shared Cost Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,
}

impl CollectionMetadataSource {
    pub fn from_collection(collection: PhoneMetadataCollection) -> Self {
        let mut source = Self::default();
        for metadata in collection.metadata {
            let region_code = metadata.id().to_owned();
            if RegionCode::get_unknown() == region_code {
                continue;
            }
            if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
                source
                    .country_code_to_non_geographical_metadata_map
                    .insert(metadata.country_code(), metadata);
            } else {
                source
                    .region_to_metadata_map
                    .insert(region_code, metadata);
            }
        }
        trace!(
            "Loaded metadata for {} regions and {} non-geographical entities",
            source.region_to_metadata_map.len(),
            source.country_code_to_non_geographical_metadata_map.len()
        );
        source
    }

    /// Decodes a serialized [`PhoneMetadataCollection`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, protobuf::Error> {
        let collection = PhoneMetadataCollection::parse_from_bytes(bytes)?;
        Ok(Self::from_collection(collection))
    }
}

impl MetadataSource for CollectionMetadataSource {
    fn metadata_for_region(&self, region_code: &str) -> Option<PhoneMetadata> {
        self.region_to_metadata_map.get(region_code).cloned()
    }

    fn metadata_for_non_geo_region(&self, country_calling_code: i32) -> Option<PhoneMetadata> {
        self.country_code_to_non_geographical_metadata_map
            .get(&country_calling_code)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use protobuf::Message;

    use super::CollectionMetadataSource;
    use crate::{
        interfaces::MetadataSource,
        proto_gen::phonemetadata::{PhoneMetadata, PhoneMetadataCollection},
    };

    #[test]
    fn round_trips_through_bytes() {
        let mut collection = PhoneMetadataCollection::new();
        let mut de = PhoneMetadata::new();
        de.set_id("DE".to_owned());
        de.set_country_code(49);
        collection.metadata.push(de);
        let mut toll_free = PhoneMetadata::new();
        toll_free.set_id("001".to_owned());
        toll_free.set_country_code(800);
        collection.metadata.push(toll_free);

        let bytes = collection.write_to_bytes().unwrap();
        let source = CollectionMetadataSource::from_bytes(&bytes).unwrap();
        assert_eq!(49, source.metadata_for_region("DE").unwrap().country_code());
        assert!(source.metadata_for_region("001").is_none());
        assert_eq!("001", source.metadata_for_non_geo_region(800).unwrap().id());
        assert!(source.metadata_for_non_geo_region(49).is_none());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(CollectionMetadataSource::from_bytes(&[0xff, 0xff, 0xff]).is_err());
    }
}
