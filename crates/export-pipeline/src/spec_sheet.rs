use box_types::Material;

use crate::artifact::ExportContext;
use crate::source::ExportSource;

pub const SHEET_TITLE: &str = "PACKAGING SPECIFICATION SHEET";

/// One labelled group of the specification sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSection {
    pub heading: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

/// Human-readable order summary; every configuration field appears once.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheet {
    pub generated: String,
    pub sections: Vec<SheetSection>,
}

impl SpecSheet {
    pub fn build(source: &ExportSource, ctx: &ExportContext) -> Self {
        let c = &source.config;
        let dims = &source.shells.dimensions;

        let order = SheetSection {
            heading: "ORDER DETAILS",
            rows: vec![
                (
                    "Dimensions",
                    format!("{} x {} x {} cm (L x W x H)", c.length, c.width, c.height),
                ),
                ("Wall Thickness", format!("{} mm", c.thickness)),
                ("Effective Wall", format!("{:.2} mm", dims.wall * 1000.0)),
                (
                    "Internal Size",
                    format!(
                        "{:.1} x {:.1} x {:.1} cm",
                        dims.inner_length() * 100.0,
                        dims.inner_width() * 100.0,
                        dims.inner_height() * 100.0
                    ),
                ),
                (
                    "Internal Volume",
                    format!("{:.2} L", dims.internal_volume_liters()),
                ),
                ("Material", material_label(&c.material)),
                ("Ply", source.ply_label().to_string()),
                ("Flute", c.active_flute().unwrap_or("n/a").to_string()),
                ("Paper Weight", format!("{} GSM", c.gsm)),
                ("Quantity", format!("{} units", c.quantity)),
                ("Minimum Order", format!("{} units", c.moq)),
            ],
        };

        let p = &c.printing;
        let text = p.rendered_text();
        let design = SheetSection {
            heading: "DESIGN FEATURES",
            rows: vec![
                ("Base Color", c.color.clone()),
                ("Printing", yes_no(p.enabled).to_string()),
                ("Printing Type", p.printing_type.to_string()),
                ("Print Colors", p.colors.to_string()),
                ("Coverage", p.coverage.to_string()),
                (
                    "Custom Text",
                    if text.is_empty() {
                        "None".to_string()
                    } else {
                        format!("\"{}\"", text)
                    },
                ),
            ],
        };

        let f = &c.finishing;
        let finishing = SheetSection {
            heading: "FINISHING OPTIONS",
            rows: vec![
                ("Lamination", yes_no(f.lamination).to_string()),
                ("UV Coating", yes_no(f.uv_coating).to_string()),
                ("Embossing", yes_no(f.embossing).to_string()),
                ("Foil Stamping", yes_no(f.foil_stamping).to_string()),
            ],
        };

        let requirements = c.custom_requirements.trim();
        let additional = SheetSection {
            heading: "ADDITIONAL REQUIREMENTS",
            rows: vec![(
                "Notes",
                if requirements.is_empty() {
                    "None".to_string()
                } else {
                    requirements.to_string()
                },
            )],
        };

        let delivery = SheetSection {
            heading: "DELIVERY",
            rows: vec![
                (
                    "Urgent Delivery",
                    if c.urgent_delivery {
                        "Yes (expedited)".to_string()
                    } else {
                        "No (standard)".to_string()
                    },
                ),
                ("Schema Version", c.version.clone()),
            ],
        };

        Self {
            generated: ctx.timestamp(),
            sections: vec![order, design, finishing, additional, delivery],
        }
    }

    /// Lines of the sheet, without trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![SHEET_TITLE.to_string(), format!("Generated: {}", self.generated)];
        for section in &self.sections {
            lines.push(String::new());
            lines.push(section.heading.to_string());
            for (label, value) in &section.rows {
                // Multi-line notes keep their line breaks, indented under the label.
                let mut value_lines = value.lines();
                let first = value_lines.next().unwrap_or("");
                lines.push(format!("  {:<18}{}", format!("{}:", label), first));
                for rest in value_lines {
                    lines.push(format!("  {:<18}{}", "", rest));
                }
            }
        }
        lines
    }

    pub fn to_text(&self) -> String {
        let mut out = self.lines().join("\n");
        out.push('\n');
        out
    }
}

/// Plain-text specification sheet.
pub fn write_spec_text(source: &ExportSource, ctx: &ExportContext) -> String {
    SpecSheet::build(source, ctx).to_text()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn material_label(material: &Material) -> String {
    match material {
        Material::Corrugated => "Corrugated".to_string(),
        Material::Kraft => "Kraft".to_string(),
        Material::Duplex => "Duplex".to_string(),
        Material::Art => "Art Paper".to_string(),
        Material::Other(name) => name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_types::BoxConfiguration;
    use chrono::{TimeZone, Utc};
    use shell_geometry::GeometryConfig;

    fn sheet(config: &BoxConfiguration) -> String {
        let source = ExportSource::derive(config, &GeometryConfig::default()).unwrap();
        let ctx = ExportContext::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        write_spec_text(&source, &ctx)
    }

    #[test]
    fn sections_in_order() {
        let text = sheet(&BoxConfiguration::default());
        let positions: Vec<usize> = [
            "ORDER DETAILS",
            "DESIGN FEATURES",
            "FINISHING OPTIONS",
            "ADDITIONAL REQUIREMENTS",
            "DELIVERY",
        ]
        .iter()
        .map(|h| text.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.starts_with(SHEET_TITLE));
        assert!(text.contains("Generated: 2024-05-01T12:00:00Z"));
    }

    #[test]
    fn derived_inner_size_is_listed() {
        let text = sheet(&BoxConfiguration::default());
        assert!(text.contains("Internal Size:    29.4 x 19.4 x 14.4 cm"));
        assert!(text.contains("Effective Wall:   3.00 mm"));
    }

    #[test]
    fn multi_line_notes_are_indented() {
        let config = BoxConfiguration {
            custom_requirements: "Food safe\nStackable".to_string(),
            ..BoxConfiguration::default()
        };
        let text = sheet(&config);
        assert!(text.contains("  Notes:            Food safe\n                    Stackable\n"));
    }
}
