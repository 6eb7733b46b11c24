//! Plot configuration documents.
//!
//! ```json
//! {
//!   "mode": "area",
//!   "gaps": "collapse",
//!   "points": [
//!     { "lat": "Lat 1", "lng": "Lon 1" },
//!     { "lat": "Lat 2", "lng": "Lon 2" },
//!     { "lat": "Lat 3", "lng": "Lon 3" }
//!   ]
//! }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Result, feature::{GapPolicy, PlotMode, PointConfigs}};

/// Latitude/longitude column names for one point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointColumns {
    pub lat: String,
    pub lng: String,
}

/// Everything needed to run a batch besides the rows themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub mode: PlotMode,
    #[serde(default)]
    pub gaps: GapPolicy,
    pub points: Vec<PointColumns>,
}

impl PlotConfig {
    /// Parse a configuration document.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Read a configuration document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read(path)?)
    }

    /// Point configurations in document order.
    pub fn point_configs(&self) -> Result<PointConfigs> {
        PointConfigs::from_columns(self.points.iter().map(|p| (p.lat.as_str(), p.lng.as_str())))
    }
}
