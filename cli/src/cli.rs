use std::path::PathBuf;

use sheetplot::{GapPolicy, PlotMode, PointColumns};

/// Spreadsheet plotting CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "sheetplot", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Plot every row of a spreadsheet as an area or path and export the results
    Plot(PlotArgs),
}

#[derive(clap::Args, Debug)]
pub struct PlotArgs {
    /// Input spreadsheet (.csv or .json array of objects)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Point columns in order, e.g. --point "Lat 1:Lon 1" (repeat for each point)
    #[arg(short, long = "point", value_name = "LAT:LNG", value_parser = parse_point)]
    pub points: Vec<PointColumns>,

    /// JSON plot configuration (mode, gaps, points)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Feature type: area or distance
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<PlotMode>,

    /// Missing points: collapse (skip them) or strict (skip the row)
    #[arg(short, long, value_parser = parse_gaps)]
    pub gaps: Option<GapPolicy>,

    /// Write <stem>.kml
    #[arg(long)]
    pub kml: bool,

    /// Write <stem>.kmz
    #[arg(long)]
    pub kmz: bool,

    /// Write <stem>.zip with GeoJSON and attribute CSV
    #[arg(long)]
    pub bundle: bool,

    /// Write an SVG preview, <stem>.svg
    #[arg(long)]
    pub svg: bool,

    /// Output directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath, default_value = ".")]
    pub out_dir: PathBuf,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,
}

fn parse_point(s: &str) -> Result<PointColumns, String> {
    match s.split_once(':') {
        Some((lat, lng)) if !lat.is_empty() && !lng.is_empty() => {
            Ok(PointColumns { lat: lat.to_string(), lng: lng.to_string() })
        }
        _ => Err(format!("expected LAT:LNG column names, got '{s}'")),
    }
}

fn parse_mode(s: &str) -> Result<PlotMode, String> { s.parse().map_err(|e: sheetplot::PlotError| e.to_string()) }

fn parse_gaps(s: &str) -> Result<GapPolicy, String> { s.parse().map_err(|e: sheetplot::PlotError| e.to_string()) }

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_plot_arguments() {
        let cli = Cli::try_parse_from([
            "sheetplot", "-vv", "plot", "rows.csv",
            "--point", "Lat 1:Lon 1", "-p", "Lat 2:Lon 2",
            "--mode", "distance", "--kml", "--bundle",
        ]).unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Plot(args) = cli.command;
        assert_eq!(args.points.len(), 2);
        assert_eq!(args.points[1], PointColumns { lat: "Lat 2".into(), lng: "Lon 2".into() });
        assert_eq!(args.mode, Some(PlotMode::Path));
        assert!(args.kml && args.bundle && !args.kmz);
        assert_eq!(args.out_dir, PathBuf::from("."));
    }

    #[test]
    fn rejects_malformed_point() {
        assert!(parse_point("Lat 1").is_err());
        assert!(parse_point(":Lon 1").is_err());
        assert!(Cli::try_parse_from(["sheetplot", "plot", "rows.csv", "--gaps", "sometimes"]).is_err());
    }
}
