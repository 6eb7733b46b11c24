use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::{PlotError, Result}, geom::Coordinate};

use super::Row;

/// A feature always has room for at least this many configured points.
pub const MIN_POINTS: usize = 2;

/// Column bindings for one point: which columns hold its latitude and longitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointConfig {
    id: u32, // 1-based, sequential
    lat_column: Option<String>,
    lng_column: Option<String>,
}

impl PointConfig {
    fn new(id: u32) -> Self { Self { id, lat_column: None, lng_column: None } }

    #[inline] pub fn id(&self) -> u32 { self.id }

    #[inline] pub fn lat_column(&self) -> Option<&str> { self.lat_column.as_deref() }

    #[inline] pub fn lng_column(&self) -> Option<&str> { self.lng_column.as_deref() }

    /// True when both columns are assigned.
    #[inline] pub fn is_complete(&self) -> bool { self.lat_column.is_some() && self.lng_column.is_some() }
}

/// How rows with missing points are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Drop missing points and keep the rest in order, so later points shift
    /// into earlier slots.
    #[default]
    Collapse,
    /// Any missing configured point disqualifies the whole row.
    Strict,
}

impl FromStr for GapPolicy {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "collapse" => Ok(Self::Collapse),
            "strict" => Ok(Self::Strict),
            _ => Err(PlotError::Validation(format!("unknown gap policy '{s}', expected 'collapse' or 'strict'"))),
        }
    }
}

/// Ordered list of point configurations, never shorter than [`MIN_POINTS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointConfigs {
    configs: Vec<PointConfig>,
}

impl Default for PointConfigs {
    fn default() -> Self { Self::new() }
}

impl PointConfigs {
    /// Start with two unassigned points.
    pub fn new() -> Self {
        Self { configs: (1..=MIN_POINTS as u32).map(PointConfig::new).collect() }
    }

    /// Build from (latitude column, longitude column) pairs.
    pub fn from_columns<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let configs = pairs.into_iter()
            .zip(1..)
            .map(|((lat, lng), id)| PointConfig {
                id,
                lat_column: non_empty(lat.into()),
                lng_column: non_empty(lng.into()),
            })
            .collect::<Vec<_>>();

        if configs.len() < MIN_POINTS {
            return Err(PlotError::Validation(format!("at least {MIN_POINTS} points are required, got {}", configs.len())));
        }

        Ok(Self { configs })
    }

    #[inline] pub fn len(&self) -> usize { self.configs.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.configs.is_empty() }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &PointConfig> { self.configs.iter() }

    #[inline] pub fn get(&self, index: usize) -> Option<&PointConfig> { self.configs.get(index) }

    /// Append an unassigned point and return its id.
    pub fn add_point(&mut self) -> u32 {
        let id = self.configs.len() as u32 + 1;
        self.configs.push(PointConfig::new(id));
        id
    }

    /// Remove the last point. Rejected when only [`MIN_POINTS`] remain.
    pub fn remove_last_point(&mut self) -> Result<()> {
        if self.configs.len() <= MIN_POINTS {
            return Err(PlotError::Validation(format!("minimum {MIN_POINTS} points required")));
        }
        self.configs.pop();
        Ok(())
    }

    /// Assign the latitude column of the point at `index` (0-based).
    /// An empty column name unassigns it.
    pub fn set_lat_column(&mut self, index: usize, column: impl Into<String>) -> Result<()> {
        self.config_mut(index)?.lat_column = non_empty(column.into());
        Ok(())
    }

    /// Assign the longitude column of the point at `index` (0-based).
    /// An empty column name unassigns it.
    pub fn set_lng_column(&mut self, index: usize, column: impl Into<String>) -> Result<()> {
        self.config_mut(index)?.lng_column = non_empty(column.into());
        Ok(())
    }

    /// Check that every point has both columns assigned.
    pub fn validate(&self) -> Result<()> {
        let incomplete = self.configs.iter()
            .filter(|config| !config.is_complete())
            .map(|config| config.id.to_string())
            .collect::<Vec<_>>();

        if !incomplete.is_empty() {
            return Err(PlotError::Validation(format!(
                "select latitude and longitude columns for all points (missing: point {})",
                incomplete.join(", point ")
            )));
        }
        Ok(())
    }

    fn config_mut(&mut self, index: usize) -> Result<&mut PointConfig> {
        let len = self.configs.len();
        self.configs.get_mut(index)
            .ok_or_else(|| PlotError::Validation(format!("point index {index} out of range ({len} points)")))
    }
}

impl<'a> IntoIterator for &'a PointConfigs {
    type Item = &'a PointConfig;
    type IntoIter = std::slice::Iter<'a, PointConfig>;

    fn into_iter(self) -> Self::IntoIter { self.configs.iter() }
}

#[inline]
fn non_empty(column: String) -> Option<String> {
    (!column.is_empty()).then_some(column)
}

/// Parse a raw cell as a coordinate component.
///
/// Numbers are taken as is. Strings are read up to the end of their leading
/// number, so `"6.5244°"` and `"51.5 N"` keep their value. Anything else, and
/// any non-finite result, is missing.
pub fn parse_coordinate(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Parse the longest decimal prefix of `s` after leading whitespace.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) { i += 1 }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 { return None }

    // exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign { end = exp_end }
    }

    s[..end].parse().ok()
}

/// Extract the valid coordinates of a row, in point order.
///
/// A pair is valid when both components parse to finite numbers and neither is
/// exactly 0 (blank cells often coerce to 0). What happens to invalid pairs
/// depends on `policy`.
pub fn extract_points(row: &Row, configs: &PointConfigs, policy: GapPolicy) -> Vec<Coordinate> {
    let mut points = Vec::with_capacity(configs.len());

    for config in configs {
        let pair = config.lat_column().zip(config.lng_column())
            .and_then(|(lat_col, lng_col)| {
                let lat = parse_coordinate(row.get(lat_col))?;
                let lng = parse_coordinate(row.get(lng_col))?;
                (lat != 0.0 && lng != 0.0).then(|| Coordinate::new(lat, lng))
            });

        match (pair, policy) {
            (Some(point), _) => points.push(point),
            (None, GapPolicy::Collapse) => {}
            (None, GapPolicy::Strict) => return Vec::new(),
        }
    }

    points
}
