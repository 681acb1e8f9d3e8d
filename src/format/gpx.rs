//! GPX output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::placement::PlacementReport;

/// GPX formatter - outputs one waypoint per placed tree
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, report: &PlacementReport) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="tree-scatter">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>tree-scatter placement {}</name>\n", report.id));
        gpx.push_str(&format!("    <time>{}</time>\n", report.timestamp));
        gpx.push_str("  </metadata>\n");

        for point in &report.result.placed {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                point.latitude, point.longitude
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&point.id)));
            gpx.push_str("    <sym>tree</sym>\n");
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

/// Escape XML special characters in caller-supplied text
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
