//! Flattened footprint outlines in vector formats.
//!
//! These carry only the box footprint, `length x width` in millimeters. A
//! production dieline with flaps, tabs and score lines is out of scope.

use crate::artifact::ExportContext;
use crate::source::ExportSource;

/// Footprint size in millimeters (length, width).
pub fn footprint_mm(source: &ExportSource) -> (f64, f64) {
    (source.config.length * 10.0, source.config.width * 10.0)
}

/// PostScript-style Illustrator stub with a single closed rectangle path.
pub fn write_ai(source: &ExportSource, ctx: &ExportContext) -> String {
    let (w, h) = footprint_mm(source);
    let mut out = String::with_capacity(512);
    out.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
    out.push_str("%%Creator: packaging-configurator\n");
    out.push_str(&format!("%%Title: Box footprint {} x {} mm\n", w, h));
    out.push_str(&format!("%%CreationDate: {}\n", ctx.timestamp()));
    out.push_str(&format!(
        "%%BoundingBox: 0 0 {} {}\n",
        w.ceil() as i64,
        h.ceil() as i64
    ));
    out.push_str("%%EndComments\n");
    out.push_str("newpath\n");
    for (i, (x, y)) in corners(w, h).iter().enumerate() {
        let op = if i == 0 { "moveto" } else { "lineto" };
        out.push_str(&format!("{} {} {}\n", x, y, op));
    }
    out.push_str("closepath\n");
    out.push_str("0.5 setlinewidth\n");
    out.push_str("stroke\n");
    out.push_str("showpage\n");
    out.push_str("%%EOF\n");
    out
}

/// DXF with a header declaring millimeters and four LINE entities.
pub fn write_dxf(source: &ExportSource) -> String {
    let (w, h) = footprint_mm(source);
    let mut out = String::with_capacity(1024);

    group(&mut out, 0, "SECTION");
    group(&mut out, 2, "HEADER");
    group(&mut out, 9, "$ACADVER");
    group(&mut out, 1, "AC1009");
    group(&mut out, 9, "$INSUNITS");
    group(&mut out, 70, 4);
    group(&mut out, 0, "ENDSEC");

    group(&mut out, 0, "SECTION");
    group(&mut out, 2, "ENTITIES");
    let pts = corners(w, h);
    for i in 0..pts.len() {
        let (x0, y0) = pts[i];
        let (x1, y1) = pts[(i + 1) % pts.len()];
        group(&mut out, 0, "LINE");
        group(&mut out, 8, "CUT");
        group(&mut out, 10, format!("{:.6}", x0));
        group(&mut out, 20, format!("{:.6}", y0));
        group(&mut out, 30, "0.0");
        group(&mut out, 11, format!("{:.6}", x1));
        group(&mut out, 21, format!("{:.6}", y1));
        group(&mut out, 31, "0.0");
    }
    group(&mut out, 0, "ENDSEC");

    group(&mut out, 0, "EOF");
    out
}

fn corners(w: f64, h: f64) -> [(f64, f64); 4] {
    [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)]
}

/// One DXF group: code line, then value line.
fn group(out: &mut String, code: u16, value: impl std::fmt::Display) {
    out.push_str(&format!("{}\n{}\n", code, value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_types::BoxConfiguration;
    use chrono::{TimeZone, Utc};
    use shell_geometry::GeometryConfig;

    fn source() -> ExportSource {
        ExportSource::derive(&BoxConfiguration::default(), &GeometryConfig::default()).unwrap()
    }

    #[test]
    fn ai_rectangle_in_millimeters() {
        let ctx = ExportContext::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        let ai = write_ai(&source(), &ctx);
        assert!(ai.starts_with("%!PS-Adobe-3.0"));
        assert!(ai.contains("%%BoundingBox: 0 0 300 200"));
        assert!(ai.contains("300 200 lineto"));
        assert!(ai.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn dxf_has_four_closed_lines() {
        let dxf = write_dxf(&source());
        let lines: Vec<&str> = dxf.lines().collect();
        assert_eq!(lines.iter().filter(|l| **l == "LINE").count(), 4);
        assert!(dxf.contains("ENTITIES"));
        assert!(dxf.ends_with("0\nEOF\n"));
        // Last segment closes back at the origin.
        assert!(dxf.contains("11\n0.000000\n21\n0.000000\n"));
        assert!(dxf.contains("10\n300.000000\n20\n200.000000\n"));
    }
}
