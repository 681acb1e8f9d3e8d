//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::placement::PlacementReport;

/// Text formatter - outputs a human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &PlacementReport) -> Result<String> {
        let request = &report.request;
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&format!("tree-scatter placement ({})\n", report.id));
        match &request.bounds {
            Some(b) => output.push_str(&format!(
                "Viewport: S {:.4} N {:.4} W {:.4} E {:.4}{}\n",
                b.south,
                b.north,
                b.west,
                b.east,
                if b.wraps() { " (crosses antimeridian)" } else { "" }
            )),
            None => output.push_str("Viewport: whole world\n"),
        }
        output.push_str(&format!("Minimum spacing: {}m\n", request.min_distance_meters));
        if !request.existing_points.is_empty() {
            output.push_str(&format!("Existing trees: {}\n", request.existing_points.len()));
        }
        output.push_str(&format!(
            "Placed {} of {} trees in {} attempts\n",
            result.placed.len(),
            request.count,
            result.attempts_used
        ));
        if report.is_short() {
            output.push_str("Attempt budget ran out before enough land was found\n");
        }

        if !result.placed.is_empty() {
            output.push_str("\nTrees:\n");
            for point in &result.placed {
                output.push_str(&format!(
                    "  {}: ({:.6}, {:.6})\n",
                    point.id, point.latitude, point.longitude
                ));
            }
        }

        Ok(output)
    }
}
