//! Cache key derivation.
//!
//! A key joins the namespace tag, the resource name, and the canonicalised
//! query string with `:`. Query pairs are decoded and sorted before being
//! re-serialised, so the same parameter set yields the same key regardless
//! of the order the caller sent it in, while any difference in resource or
//! parameters yields a distinct key.

use crate::resource::Resource;

/// Namespace tag prefixing every cache key.
const KEY_NAMESPACE: &str = "traffic";

/// Derive the cache key for a resource and its raw query string.
///
/// Deterministic: identical (resource, parameter set) pairs collide by
/// construction, which is what lets concurrent and repeated requests share
/// cache entries.
pub fn cache_key(resource: Resource, raw_query: Option<&str>) -> String {
    format!(
        "{KEY_NAMESPACE}:{}:{}",
        resource.name(),
        canonical_query(raw_query)
    )
}

/// Decode, sort, and re-encode the query pairs.
///
/// A query that does not decode as form pairs falls back to the raw string,
/// keeping the key deterministic even when canonicalisation is impossible.
fn canonical_query(raw_query: Option<&str>) -> String {
    let raw = match raw_query {
        Some(raw) if !raw.is_empty() => raw,
        _ => return String::new(),
    };
    let mut pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
        Ok(pairs) => pairs,
        Err(_) => return raw.to_string(),
    };
    pairs.sort();
    serde_urlencoded::to_string(&pairs).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_parameters_any_order_share_a_key() {
        let k1 = cache_key(Resource::CamerasWithinBounds, Some("minLat=1&maxLat=2"));
        let k2 = cache_key(Resource::CamerasWithinBounds, Some("maxLat=2&minLat=1"));
        assert_eq!(k1, k2);
    }

    #[test]
    fn differing_parameter_value_changes_the_key() {
        let k1 = cache_key(Resource::WaysByRegion, Some("region=north"));
        let k2 = cache_key(Resource::WaysByRegion, Some("region=south"));
        assert_ne!(k1, k2);
    }

    #[test]
    fn extra_parameter_changes_the_key() {
        let k1 = cache_key(Resource::RoadEventsAll, Some("lang=en"));
        let k2 = cache_key(Resource::RoadEventsAll, Some("lang=en&full=true"));
        assert_ne!(k1, k2);
    }

    #[test]
    fn differing_resource_changes_the_key() {
        let k1 = cache_key(Resource::CamerasAll, None);
        let k2 = cache_key(Resource::RegionsAll, None);
        assert_ne!(k1, k2);
    }

    #[test]
    fn missing_and_empty_query_are_equivalent() {
        let k1 = cache_key(Resource::RegionsAll, None);
        let k2 = cache_key(Resource::RegionsAll, Some(""));
        assert_eq!(k1, k2);
        assert_eq!(k1, "traffic:findRegionsAll:");
    }

    #[test]
    fn encoding_variants_of_the_same_value_share_a_key() {
        // '+' and '%20' both decode to a space
        let k1 = cache_key(Resource::JourneysAll, Some("name=a+b"));
        let k2 = cache_key(Resource::JourneysAll, Some("name=a%20b"));
        assert_eq!(k1, k2);
    }

    #[test]
    fn repeated_keys_are_preserved_in_the_key() {
        let k1 = cache_key(Resource::CamerasByRegion, Some("region=1&region=2"));
        let k2 = cache_key(Resource::CamerasByRegion, Some("region=1"));
        assert_ne!(k1, k2);
    }
}
