//! The plotting session: loaded rows, point configuration, the live feature
//! collection, and its edit history.

use tracing::info;

use crate::{
    config::PlotConfig,
    error::{PlotError, Result},
    export,
    feature::{run_batch, Feature, GapPolicy, PlotMode, PointConfigs, Row},
    history::History,
    io::Table,
    render::summary_line,
};

/// Outcome of one batch, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows that produced a feature.
    pub plotted: usize,
    /// Rows with too few valid points.
    pub skipped: usize,
    /// Features in the collection after the batch.
    pub total: usize,
}

/// Session state. Single writer: every mutation goes through `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: Table,
    points: PointConfigs,
    mode: PlotMode,
    gaps: GapPolicy,
    features: Vec<Feature>,
    history: History,
}

impl Session {
    pub fn new() -> Self { Self::default() }

    /// Replace the loaded rows and reset the point configuration to two
    /// unassigned points. Plotted features and history are kept.
    pub fn load(&mut self, table: Table) {
        info!(rows = table.rows.len(), columns = table.columns.len(), "loaded table");
        self.table = table;
        self.points = PointConfigs::new();
    }

    #[inline] pub fn rows(&self) -> &[Row] { &self.table.rows }

    #[inline] pub fn columns(&self) -> &[String] { &self.table.columns }

    #[inline] pub fn points(&self) -> &PointConfigs { &self.points }

    #[inline] pub fn mode(&self) -> PlotMode { self.mode }

    #[inline] pub fn gap_policy(&self) -> GapPolicy { self.gaps }

    #[inline] pub fn features(&self) -> &[Feature] { &self.features }

    #[inline] pub fn history(&self) -> &History { &self.history }

    #[inline] pub fn set_mode(&mut self, mode: PlotMode) { self.mode = mode }

    #[inline] pub fn set_gap_policy(&mut self, gaps: GapPolicy) { self.gaps = gaps }

    /// Append an unassigned point and return its id.
    pub fn add_point(&mut self) -> u32 { self.points.add_point() }

    /// Remove the last point; at least two always remain.
    pub fn remove_last_point(&mut self) -> Result<()> { self.points.remove_last_point() }

    /// Assign the latitude column of point `index` (0-based). Empty unassigns.
    pub fn set_lat_column(&mut self, index: usize, column: &str) -> Result<()> {
        self.check_column(column)?;
        self.points.set_lat_column(index, column)
    }

    /// Assign the longitude column of point `index` (0-based). Empty unassigns.
    pub fn set_lng_column(&mut self, index: usize, column: &str) -> Result<()> {
        self.check_column(column)?;
        self.points.set_lng_column(index, column)
    }

    /// Take mode, gap policy, and points from a configuration document.
    /// Nothing changes if any referenced column is unknown.
    pub fn apply_config(&mut self, config: &PlotConfig) -> Result<()> {
        for point in &config.points {
            self.check_column(&point.lat)?;
            self.check_column(&point.lng)?;
        }
        self.points = config.point_configs()?;
        self.mode = config.mode;
        self.gaps = config.gaps;
        Ok(())
    }

    /// Convert every loaded row and append the new features to the collection.
    ///
    /// Fails before touching anything if a point is missing a column.
    /// Otherwise the collection is captured into history first, so one undo
    /// reverts the whole batch.
    pub fn run_batch(&mut self) -> Result<BatchSummary> {
        let batch = run_batch(&self.table.rows, &self.points, self.mode, self.gaps)?;

        self.history.capture(&self.features);
        self.features.extend(batch.features);

        let summary = BatchSummary { plotted: batch.plotted, skipped: batch.skipped, total: self.features.len() };
        info!(mode = %self.mode, plotted = summary.plotted, skipped = summary.skipped, total = summary.total, "batch complete");
        Ok(summary)
    }

    /// Revert the last batch.
    pub fn undo(&mut self) -> Result<()> { self.history.undo(&mut self.features) }

    /// Re-apply the last undone batch.
    pub fn redo(&mut self) -> Result<()> { self.history.redo(&mut self.features) }

    /// Remove every feature and forget the history.
    pub fn clear(&mut self) {
        self.features.clear();
        self.history.clear();
        info!("cleared all features");
    }

    /// One summary line per feature, in collection order.
    pub fn summaries(&self) -> Vec<String> {
        self.features.iter().map(summary_line).collect()
    }

    pub fn export_kml(&self) -> Result<String> { export::to_kml(&self.features) }

    pub fn export_kmz(&self) -> Result<Vec<u8>> { export::to_kmz(&self.features) }

    pub fn export_geojson(&self) -> Result<serde_json::Value> { export::to_geojson(&self.features) }

    pub fn export_attribute_csv(&self) -> Result<String> {
        export::to_attribute_csv(&self.features, &self.table.columns)
    }

    pub fn export_bundle(&self) -> Result<Vec<u8>> {
        export::to_bundle(&self.features, &self.table.columns)
    }

    fn check_column(&self, column: &str) -> Result<()> {
        if column.is_empty() || self.table.columns.iter().any(|c| c == column) {
            Ok(())
        } else {
            Err(PlotError::Validation(format!("unknown column '{column}'")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_rows_csv_bytes;

    const CSV: &str = "\
name,lat1,lng1,lat2,lng2,lat3,lng3
North,10.0,10.0,10.0,10.01,10.01,10.01
Short,10.0,10.0,,,,
South,-5.0,30.0,-5.0,30.02,-5.02,30.02
";

    fn session() -> Session {
        let mut session = Session::new();
        session.load(read_rows_csv_bytes(CSV.as_bytes()).unwrap());
        session.add_point();
        for (i, n) in ["1", "2", "3"].iter().enumerate() {
            session.set_lat_column(i, &format!("lat{n}")).unwrap();
            session.set_lng_column(i, &format!("lng{n}")).unwrap();
        }
        session
    }

    #[test]
    fn batch_appends_and_reports() {
        let mut session = session();
        let summary = session.run_batch().unwrap();
        assert_eq!(summary, BatchSummary { plotted: 2, skipped: 1, total: 2 });

        let summary = session.run_batch().unwrap();
        assert_eq!(summary.total, 4);
        assert_eq!(session.history().undo_depth(), 2);
    }

    #[test]
    fn undo_and_redo_whole_batches() {
        let mut session = session();
        session.run_batch().unwrap();
        let after_first = session.features().to_vec();

        session.set_mode(PlotMode::Path);
        session.run_batch().unwrap();
        assert_eq!(session.features().len(), 4);

        session.undo().unwrap();
        assert_eq!(session.features(), &after_first[..]);

        session.redo().unwrap();
        assert_eq!(session.features().len(), 4);
        assert_eq!(session.features().iter().filter(|f| f.is_path()).count(), 2);
    }

    #[test]
    fn incomplete_configuration_leaves_state_untouched() {
        let mut session = session();
        session.run_batch().unwrap();
        session.add_point();

        assert!(matches!(session.run_batch(), Err(PlotError::Validation(_))));
        assert_eq!(session.features().len(), 2);
        assert_eq!(session.history().undo_depth(), 1);
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let mut session = session();
        assert!(matches!(session.set_lat_column(0, "elevation"), Err(PlotError::Validation(_))));
        session.set_lat_column(0, "").unwrap();
        assert_eq!(session.points().get(0).unwrap().lat_column(), None);
    }

    #[test]
    fn apply_config_is_all_or_nothing() {
        let mut session = session();
        let bad = PlotConfig::from_json(br#"{"mode": "distance", "points": [{"lat": "lat1", "lng": "lng1"}, {"lat": "x", "lng": "lng2"}]}"#).unwrap();
        assert!(session.apply_config(&bad).is_err());
        assert_eq!(session.mode(), PlotMode::Area);
        assert_eq!(session.points().len(), 3);

        let good = PlotConfig::from_json(br#"{"mode": "distance", "gaps": "strict", "points": [{"lat": "lat1", "lng": "lng1"}, {"lat": "lat2", "lng": "lng2"}]}"#).unwrap();
        session.apply_config(&good).unwrap();
        assert_eq!(session.mode(), PlotMode::Path);
        assert_eq!(session.gap_policy(), GapPolicy::Strict);
        assert_eq!(session.points().len(), 2);
    }

    #[test]
    fn clear_drops_features_and_history() {
        let mut session = session();
        session.run_batch().unwrap();
        session.clear();
        assert!(session.features().is_empty());
        assert!(matches!(session.undo(), Err(PlotError::EmptyHistory("undo"))));
    }

    #[test]
    fn loading_resets_points() {
        let mut session = session();
        session.load(read_rows_csv_bytes(b"a,b\n1,2\n").unwrap());
        assert_eq!(session.points().len(), 2);
        assert!(session.points().iter().all(|p| !p.is_complete()));
    }

    #[test]
    fn summaries_and_exports() {
        let mut session = session();
        assert!(matches!(session.export_kml(), Err(PlotError::EmptyExport)));
        assert!(matches!(session.export_bundle(), Err(PlotError::EmptyExport)));

        session.run_batch().unwrap();
        let summaries = session.summaries();
        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].starts_with("Area 1: 3 points"));
        assert!(summaries[1].starts_with("Area 3: 3 points"));

        assert!(session.export_kml().unwrap().contains("<name>Area 3</name>"));
        assert!(session.export_attribute_csv().unwrap().lines().next().unwrap().contains("name"));
    }
}
