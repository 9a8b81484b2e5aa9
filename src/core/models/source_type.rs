//! Source type of a pushed message
//!
//! Identifies the kind of feed a batch came from. The name is part of every
//! derived message identifier and of each import profile.

use serde::{Deserialize, Serialize};

/// Kind of source a message was harvested from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// Twitter timeline data
    Twitter,
    /// Generic GeoJSON feature collections
    Geojson,
    /// FOSSASIA community API
    FossasiaApi,
    /// OpenWiFiMap node feeds
    Openwifimap,
    /// Community node lists
    NodeList,
    /// Netmon monitoring feeds
    Netmon,
    /// Freifunk node feeds
    FreifunkNode,
    /// Ninux community network feeds
    Ninux,
    /// Anything pushed without a more specific type
    #[default]
    Import,
}

impl SourceType {
    /// All known source types
    pub const ALL: [Self; 9] = [
        Self::Twitter,
        Self::Geojson,
        Self::FossasiaApi,
        Self::Openwifimap,
        Self::NodeList,
        Self::Netmon,
        Self::FreifunkNode,
        Self::Ninux,
        Self::Import,
    ];

    /// Canonical upper-case name used in identifiers and stored records
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Twitter => "TWITTER",
            Self::Geojson => "GEOJSON",
            Self::FossasiaApi => "FOSSASIA_API",
            Self::Openwifimap => "OPENWIFIMAP",
            Self::NodeList => "NODE_LIST",
            Self::Netmon => "NETMON",
            Self::FreifunkNode => "FREIFUNK_NODE",
            Self::Ninux => "NINUX",
            Self::Import => "IMPORT",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|t| t.name() == wanted).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|t| t.name()).collect();
            format!("Unknown source type: {s}. Use one of: {}", names.join(", "))
        })
    }
}
