//! Named destinations for each emergency service, and the sum type which
//! covers both a preset destination and one entered manually

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::common::error::RoutingError;

/// Default coordinates offered when the user switches to manual entry
pub const DEFAULT_MANUAL_LAT: f64 = 30.3500;
pub const DEFAULT_MANUAL_LON: f64 = 78.0500;

/// A single named destination
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Destination {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const AMBULANCE_DESTINATIONS: [Destination; 5] = [
    Destination {
        name: "Max Hospital",
        lat: 30.3220,
        lon: 78.0280,
    },
    Destination {
        name: "Doon Hospital",
        lat: 30.3310,
        lon: 78.0400,
    },
    Destination {
        name: "Government Hospital",
        lat: 30.3450,
        lon: 78.0600,
    },
    Destination {
        name: "City Hospital",
        lat: 30.3600,
        lon: 78.0700,
    },
    Destination {
        name: "Health Care Center",
        lat: 30.3500,
        lon: 78.0500,
    },
];

const FIRE_BRIGADE_DESTINATIONS: [Destination; 3] = [
    Destination {
        name: "Fire Station 1",
        lat: 30.3260,
        lon: 78.0450,
    },
    Destination {
        name: "Fire Station 2",
        lat: 30.3380,
        lon: 78.0580,
    },
    Destination {
        name: "Emergency Fire Base",
        lat: 30.3480,
        lon: 78.0650,
    },
];

/// The emergency service a route is being planned for. Each service has its
/// own set of destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceType {
    #[default]
    Ambulance,
    FireBrigade,
}

impl FromStr for ServiceType {
    type Err = RoutingError;

    fn from_str(input: &str) -> Result<ServiceType, Self::Err> {
        match input {
            "ambulance" => Ok(ServiceType::Ambulance),
            "fire_brigade" => Ok(ServiceType::FireBrigade),
            other => Err(RoutingError::InvalidRequest(format!(
                "unknown service type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Ambulance => write!(f, "Ambulance"),
            ServiceType::FireBrigade => write!(f, "Fire Brigade"),
        }
    }
}

impl ServiceType {
    /// All of the preset destinations for this service, in display order
    pub fn destinations(&self) -> &'static [Destination] {
        match self {
            ServiceType::Ambulance => &AMBULANCE_DESTINATIONS,
            ServiceType::FireBrigade => &FIRE_BRIGADE_DESTINATIONS,
        }
    }

    /// Look up a preset destination by its exact name
    pub fn find_destination(&self, name: &str) -> Option<Destination> {
        self.destinations().iter().find(|dest| dest.name == name).copied()
    }
}

/// Where the user has asked to be routed to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestinationInput {
    Preset(Destination),
    Manual { lat: f64, lon: f64 },
}

impl DestinationInput {
    /// Latitude & longitude of the destination
    pub fn coords(&self) -> (f64, f64) {
        match self {
            DestinationInput::Preset(dest) => (dest.lat, dest.lon),
            DestinationInput::Manual { lat, lon } => (*lat, *lon),
        }
    }

    /// Human readable name for the destination, used to label the map
    /// marker
    pub fn label(&self) -> String {
        match self {
            DestinationInput::Preset(dest) => dest.name.to_string(),
            DestinationInput::Manual { lat, lon } => {
                format!("Manual Entry ({lat}, {lon})")
            }
        }
    }
}

impl Default for DestinationInput {
    fn default() -> Self {
        DestinationInput::Manual {
            lat: DEFAULT_MANUAL_LAT,
            lon: DEFAULT_MANUAL_LON,
        }
    }
}
