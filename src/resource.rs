//! Upstream resource whitelist.
//!
//! The upstream traffic API exposes a fixed set of read-only query
//! endpoints, addressed by name. The whitelist is baked into the binary:
//! a name outside it is rejected before any network activity happens.

use std::fmt;

/// One whitelisted upstream query endpoint.
///
/// A value can only be obtained through [`Resource::from_name`], so holding
/// one proves the name passed validation. Variants group into families
/// (cameras, road events, VMS signs, TIM signs, regions, ways, journeys)
/// with the query scopes the upstream supports for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    CamerasAll,
    CamerasWithinBounds,
    CamerasByRegion,
    CamerasByJourney,
    RoadEventsAll,
    RoadEventsWithinBounds,
    RoadEventsByRegion,
    RoadEventsByJourney,
    VmsSignsAll,
    VmsSignsWithinBounds,
    VmsSignsByRegion,
    VmsSignsByJourney,
    TimSignsAll,
    TimSignsWithinBounds,
    TimSignsByRegion,
    TimSignsByJourney,
    RegionsAll,
    WaysAll,
    WaysByRegion,
    JourneysAll,
}

impl Resource {
    /// Every whitelisted resource.
    pub const ALL: [Resource; 20] = [
        Resource::CamerasAll,
        Resource::CamerasWithinBounds,
        Resource::CamerasByRegion,
        Resource::CamerasByJourney,
        Resource::RoadEventsAll,
        Resource::RoadEventsWithinBounds,
        Resource::RoadEventsByRegion,
        Resource::RoadEventsByJourney,
        Resource::VmsSignsAll,
        Resource::VmsSignsWithinBounds,
        Resource::VmsSignsByRegion,
        Resource::VmsSignsByJourney,
        Resource::TimSignsAll,
        Resource::TimSignsWithinBounds,
        Resource::TimSignsByRegion,
        Resource::TimSignsByJourney,
        Resource::RegionsAll,
        Resource::WaysAll,
        Resource::WaysByRegion,
        Resource::JourneysAll,
    ];

    /// Validate a caller-supplied name against the whitelist.
    ///
    /// Matching is exact and case-sensitive; the names are upstream path
    /// segments, not free-form identifiers.
    pub fn from_name(name: &str) -> Option<Resource> {
        let resource = match name {
            "findCamerasAll" => Resource::CamerasAll,
            "findCamerasWithinBounds" => Resource::CamerasWithinBounds,
            "findCamerasByRegion" => Resource::CamerasByRegion,
            "findCamerasByJourney" => Resource::CamerasByJourney,
            "findRoadEventsAll" => Resource::RoadEventsAll,
            "findRoadEventsWithinBounds" => Resource::RoadEventsWithinBounds,
            "findRoadEventsByRegion" => Resource::RoadEventsByRegion,
            "findRoadEventsByJourney" => Resource::RoadEventsByJourney,
            "findVmsSignsAll" => Resource::VmsSignsAll,
            "findVmsSignsWithinBounds" => Resource::VmsSignsWithinBounds,
            "findVmsSignsByRegion" => Resource::VmsSignsByRegion,
            "findVmsSignsByJourney" => Resource::VmsSignsByJourney,
            "findTimSignsAll" => Resource::TimSignsAll,
            "findTimSignsWithinBounds" => Resource::TimSignsWithinBounds,
            "findTimSignsByRegion" => Resource::TimSignsByRegion,
            "findTimSignsByJourney" => Resource::TimSignsByJourney,
            "findRegionsAll" => Resource::RegionsAll,
            "findWaysAll" => Resource::WaysAll,
            "findWaysByRegion" => Resource::WaysByRegion,
            "findJourneysAll" => Resource::JourneysAll,
            _ => return None,
        };
        Some(resource)
    }

    /// Upstream path segment for this resource.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::CamerasAll => "findCamerasAll",
            Resource::CamerasWithinBounds => "findCamerasWithinBounds",
            Resource::CamerasByRegion => "findCamerasByRegion",
            Resource::CamerasByJourney => "findCamerasByJourney",
            Resource::RoadEventsAll => "findRoadEventsAll",
            Resource::RoadEventsWithinBounds => "findRoadEventsWithinBounds",
            Resource::RoadEventsByRegion => "findRoadEventsByRegion",
            Resource::RoadEventsByJourney => "findRoadEventsByJourney",
            Resource::VmsSignsAll => "findVmsSignsAll",
            Resource::VmsSignsWithinBounds => "findVmsSignsWithinBounds",
            Resource::VmsSignsByRegion => "findVmsSignsByRegion",
            Resource::VmsSignsByJourney => "findVmsSignsByJourney",
            Resource::TimSignsAll => "findTimSignsAll",
            Resource::TimSignsWithinBounds => "findTimSignsWithinBounds",
            Resource::TimSignsByRegion => "findTimSignsByRegion",
            Resource::TimSignsByJourney => "findTimSignsByJourney",
            Resource::RegionsAll => "findRegionsAll",
            Resource::WaysAll => "findWaysAll",
            Resource::WaysByRegion => "findWaysByRegion",
            Resource::JourneysAll => "findJourneysAll",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Resource::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown resource name: {name}")))
    }
}
