use std::path::Path;

use anyhow::{bail, Context, Result};
use sheetplot::{
    deliver, read_rows_csv, read_rows_json, DiskSink, LayerTable, PlotConfig, Session, SvgSurface, Table,
};

/// Width of the SVG preview in pixels.
const PREVIEW_WIDTH: f64 = 1200.0;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::PlotArgs) -> Result<()> {
    let stem = args.input.file_stem().and_then(|s| s.to_str()).unwrap_or("sheetplot");

    println!("[plot] loading rows from {}", args.input.display());
    let mut session = Session::new();
    session.load(read_table(&args.input)?);

    if let Some(path) = &args.config {
        let config = PlotConfig::read(path).with_context(|| format!("[plot] reading config {}", path.display()))?;
        session.apply_config(&config).context("[plot] applying config")?;
    }
    if !args.points.is_empty() {
        let config = PlotConfig { mode: session.mode(), gaps: session.gap_policy(), points: args.points.clone() };
        session.apply_config(&config).context("[plot] applying --point columns")?;
    }
    if let Some(mode) = args.mode { session.set_mode(mode) }
    if let Some(gaps) = args.gaps { session.set_gap_policy(gaps) }

    let summary = session.run_batch().context("[plot] batch rejected")?;
    println!("[plot] plotted {} {} features, skipped {} rows", summary.plotted, session.mode(), summary.skipped);
    if cli.verbose > 0 {
        for line in session.summaries() { println!("  {line}") }
    }

    let outputs = [
        (args.kml, format!("{stem}.kml")),
        (args.kmz, format!("{stem}.kmz")),
        (args.bundle, format!("{stem}.zip")),
        (args.svg, format!("{stem}.svg")),
    ];
    for (_, name) in outputs.iter().filter(|(wanted, _)| *wanted) {
        check_writable(&args.out_dir.join(name), args.force)?;
    }

    let mut sink = DiskSink::new(&args.out_dir);
    if args.kml {
        deliver(&mut sink, &outputs[0].1, session.export_kml()?.as_bytes())?;
    }
    if args.kmz {
        deliver(&mut sink, &outputs[1].1, &session.export_kmz()?)?;
    }
    if args.bundle {
        deliver(&mut sink, &outputs[2].1, &session.export_bundle()?)?;
    }
    if args.svg {
        let mut surface = SvgSurface::new();
        let mut layers = LayerTable::new();
        layers.sync_appended(&mut surface, session.features());
        layers.fit_bounds(&mut surface, session.features());
        let svg = surface.to_svg_string(PREVIEW_WIDTH).context("[plot] rendering preview")?;
        deliver(&mut sink, &outputs[3].1, svg.as_bytes())?;
    }

    for (_, name) in outputs.iter().filter(|(wanted, _)| *wanted) {
        println!("[plot] wrote {}", args.out_dir.join(name).display());
    }

    Ok(())
}

/// Load rows by file extension.
fn read_table(path: &Path) -> Result<Table> {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);
    let table = match extension.as_deref() {
        Some("csv") => read_rows_csv(path),
        Some("json") => read_rows_json(path),
        _ => bail!("[plot] unsupported input {}, expected .csv or .json", path.display()),
    };
    table.with_context(|| format!("[plot] reading {}", path.display()))
}

fn check_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("[plot] {} already exists (use --force to overwrite)", path.display());
    }
    Ok(())
}
