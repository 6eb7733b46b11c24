//! Flat attribute table export.

use std::collections::HashSet;

use polars::{frame::DataFrame, io::SerWriter, prelude::{Column, CsvWriter, NamedFrom, QuoteStyle}, series::Series};

use crate::{error::{PlotError, Result}, feature::{display_value, Feature}};

use super::ensure_not_empty;

/// Export one row per feature as CSV.
///
/// Measure columns adapt to the collection: area columns appear only if any
/// area feature exists, distance columns only if any path feature exists.
/// Measures that do not apply to a feature are left empty. `columns` are the
/// spreadsheet columns, written as quoted text with missing values empty.
pub fn to_attribute_csv(features: &[Feature], columns: &[String]) -> Result<String> {
    ensure_not_empty(features)?;

    let mut df = attribute_frame(features, columns)?;

    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_quote_style(QuoteStyle::NonNumeric)
        .finish(&mut df)?;

    String::from_utf8(buffer).map_err(|e| PlotError::Io(std::io::Error::other(e)))
}

/// Build the attribute table as a DataFrame.
fn attribute_frame(features: &[Feature], columns: &[String]) -> Result<DataFrame> {
    let has_areas = features.iter().any(Feature::is_area);
    let has_paths = features.iter().any(Feature::is_path);

    let mut frame: Vec<Column> = vec![
        Series::new("id".into(), features.iter().map(Feature::id).collect::<Vec<_>>()).into(),
        Series::new("type".into(), features.iter().map(|f| f.mode().as_str()).collect::<Vec<_>>()).into(),
    ];

    if has_areas {
        frame.push(measure("area_m2", features, |f| f.area_sq_meters(), 2));
        frame.push(measure("area_hectares", features, |f| f.hectares(), 4));
        frame.push(measure("area_sqkm", features, |f| f.sq_km(), 6));
    }

    if has_paths {
        frame.push(measure("total_distance_m", features, |f| f.total_distance_meters(), 2));
        frame.push(measure("total_distance_km", features, |f| f.total_distance_meters().map(|m| m / 1000.0), 3));
    }

    frame.push(Series::new("points".into(), features.iter().map(|f| f.points().len() as u32).collect::<Vec<_>>()).into());

    let mut used = frame.iter().map(|c| c.name().to_string()).collect::<HashSet<_>>();
    for column in columns {
        let values = features.iter()
            .map(|f| f.attributes().get(column).and_then(display_value).unwrap_or_default())
            .collect::<Vec<_>>();
        let name = unique_name(column, &mut used);
        frame.push(Series::new(name.as_str().into(), values).into());
    }

    Ok(DataFrame::new(frame)?)
}

/// A nullable measure column written with a fixed number of decimals, so
/// small values never fall back to scientific notation.
fn measure(name: &str, features: &[Feature], value: impl Fn(&Feature) -> Option<f64>, decimals: usize) -> Column {
    let values = features.iter()
        .map(|f| value(f).map(|v| format!("{v:.decimals$}")))
        .collect::<Vec<_>>();
    Series::new(name.into(), values).into()
}

/// Spreadsheet columns that clash with a generated column get a numeric suffix.
fn unique_name(column: &str, used: &mut HashSet<String>) -> String {
    let mut name = column.to_string();
    let mut suffix = 1;
    while used.contains(&name) {
        name = format!("{column}_{suffix}");
        suffix += 1;
    }
    used.insert(name.clone());
    name
}
