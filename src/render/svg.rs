//! SVG preview surface.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use geo::{BoundingRect, Coord, Geometry, LineString, Rect};

use crate::{error::{PlotError, Result}, geom::{fill_degenerate, union_rect}};

use super::MapSurface;

/// Projection function: lon/lat -> SVG coords (x,y)
type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// A map surface that collects drawn geometries and writes them as an SVG
/// preview. Handles are slot indices; removed slots stay empty.
#[derive(Debug, Default, Clone)]
pub struct SvgSurface {
    shapes: Vec<Option<(Geometry<f64>, String)>>,
    viewport: Option<Rect<f64>>,
}

impl MapSurface for SvgSurface {
    type Handle = usize;

    fn draw(&mut self, geometry: &Geometry<f64>, popup: &str) -> usize {
        self.shapes.push(Some((geometry.clone(), popup.to_string())));
        self.shapes.len() - 1
    }

    fn remove(&mut self, handle: usize) {
        if let Some(slot) = self.shapes.get_mut(handle) { *slot = None }
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        self.viewport = Some(bounds);
    }
}

impl SvgSurface {
    pub fn new() -> Self { Self::default() }

    /// Number of geometries currently displayed.
    pub fn len(&self) -> usize { self.shapes.iter().flatten().count() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Current viewport, if one was requested.
    pub fn viewport(&self) -> Option<Rect<f64>> { self.viewport }

    /// Write the preview to a file.
    pub fn write_svg(&self, path: &Path, width: f64) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer, width)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the preview as an SVG string.
    pub fn to_svg_string(&self, width: f64) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, width)?;
        String::from_utf8(buffer).map_err(|e| PlotError::Io(std::io::Error::other(e)))
    }

    /// Render to any writer. The viewport falls back to the extent of the
    /// displayed shapes when none was requested; a flat extent is widened.
    fn write_to<W: Write>(&self, writer: &mut W, width: f64) -> Result<()> {
        let bounds = self.viewport
            .or_else(|| self.shape_bounds())
            .map(fill_degenerate)
            .ok_or(PlotError::EmptyExport)?;

        // equirectangular: degrees stay square
        let scale = width / bounds.width();
        let height = (bounds.height() * scale).ceil().max(1.0);
        let origin = Coord { x: bounds.min().x, y: bounds.max().y };

        let project = move |c: &Coord<f64>| ((c.x - origin.x) * scale, (origin.y - c.y) * scale);

        write_svg_open(writer, width, height)?;

        for (geometry, popup) in self.shapes.iter().flatten() {
            let (tag, class, line) = match geometry {
                Geometry::Polygon(polygon) => ("polygon", "area", polygon.exterior()),
                Geometry::LineString(line) => ("polyline", "path", line),
                _ => continue,
            };
            writeln!(writer, r#"<{tag} class="{class}" points="{}"><title>{}</title></{tag}>"#,
                svg_points(line, &project), escape(popup))?;
        }

        writeln!(writer, "</svg>")?;
        Ok(())
    }

    fn shape_bounds(&self) -> Option<Rect<f64>> {
        self.shapes.iter().flatten()
            .filter_map(|(geometry, _)| geometry.bounding_rect())
            .reduce(union_rect)
    }
}

/// `x,y` pairs of a line in SVG space, space separated.
fn svg_points(line: &LineString<f64>, project: &Projection) -> String {
    line.coords()
        .map(|c| {
            let (x, y) = project(c);
            format!("{x:.3},{y:.3}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Document prologue: root element, white background, and feature styles.
fn write_svg_open<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#)?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    writeln!(writer, "<style>")?;
    writeln!(writer, "  .area {{ fill: #3498db; fill-opacity: 0.5; stroke: #3498db; stroke-width: 2; }}")?;
    writeln!(writer, "  .path {{ fill: none; stroke: #e74c3c; stroke-width: 3; }}")?;
    writeln!(writer, "</style>")?;
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
