//! Output formatting and persistence for normalized feed data.
//!
//! Renders the object table, the summary line and the size histogram as
//! text, and exports displayed rows as JSON or CSV.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::normalize::{NOT_AVAILABLE, NearEarthObject};
use crate::stats::{AggregateSummary, Histogram};

const HAZARDOUS_YES: &str = "⚠️ Yes";
const HAZARDOUS_NO: &str = "✅ No";
const HEADERS: [&str; 6] = [
    "Name",
    "Size (m)",
    "Hazardous",
    "Speed (km/h)",
    "Miss Distance (km)",
    "Approach Date",
];

/// One table row, already formatted for display. Exports write these
/// strings as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "Hazardous")]
    pub hazardous: String,
    #[serde(rename = "Speed")]
    pub speed: String,
    #[serde(rename = "Distance")]
    pub distance: String,
    #[serde(rename = "Approach Date")]
    pub approach_date: String,
}

impl From<&NearEarthObject> for DisplayRow {
    fn from(o: &NearEarthObject) -> Self {
        DisplayRow {
            name: o.name.clone(),
            size: format!("{:.2}", o.estimated_diameter_m),
            hazardous: (if o.is_hazardous { HAZARDOUS_YES } else { HAZARDOUS_NO }).to_string(),
            speed: with_thousands(o.relative_velocity_kph),
            distance: with_thousands(o.miss_distance_km),
            approach_date: o.approach_date.clone(),
        }
    }
}

impl DisplayRow {
    fn cells(&self) -> [&str; 6] {
        [
            &self.name,
            &self.size,
            &self.hazardous,
            &self.speed,
            &self.distance,
            &self.approach_date,
        ]
    }
}

pub fn display_rows(objects: &[NearEarthObject]) -> Vec<DisplayRow> {
    objects.iter().map(DisplayRow::from).collect()
}

/// Rounds to a whole number and groups digits by thousands: `1234567.8`
/// becomes `"1,234,568"`.
pub fn with_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value.is_sign_negative() && grouped != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Fixed-width text table with a header row.
pub fn render_table(rows: &[DisplayRow]) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 6]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(HEADERS);
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.cells()));
        out.push('\n');
    }
    out
}

/// `Largest: ...` / `Fastest: ...` style labels plus the two counters.
pub fn render_summary(summary: &AggregateSummary) -> String {
    let largest = summary
        .largest
        .as_ref()
        .map(|o| format!("{} ({:.2}m)", o.name, o.estimated_diameter_m))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let fastest = summary
        .fastest
        .as_ref()
        .map(|o| format!("{} ({} km/h)", o.name, with_thousands(o.relative_velocity_kph)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    format!(
        "Total Asteroids: {}  |  Potentially Hazardous: {}  |  Largest: {}  |  Fastest: {}",
        summary.total_count, summary.hazardous_count, largest, fastest
    )
}

/// Horizontal bar chart of the diameter distribution, scaled so the fullest
/// bin spans `bar_width` characters.
pub fn render_histogram(histogram: Option<&Histogram>, bar_width: usize) -> String {
    let Some(histogram) = histogram else {
        return "No data to display\n".to_string();
    };

    let peak = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    let labels: Vec<String> = histogram
        .bins()
        .map(|(lo, hi, _)| format!("{lo:.2} - {hi:.2}"))
        .collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::from("Asteroid Size Distribution (diameter, meters)\n");
    for (label, (_, _, count)) in labels.iter().zip(histogram.bins()) {
        let bar = "#".repeat(count * bar_width / peak);
        out.push_str(&format!("{label:>label_width$} | {bar} {count}\n"));
    }
    out
}

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &AggregateSummary) {
    debug!("{:#?}", summary);
}

/// Machine-readable form of one fetch: the summary plus every displayed row.
#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a AggregateSummary,
    objects: &'a [DisplayRow],
}

/// Renders the summary and rows as pretty-printed JSON, for `--json`.
pub fn render_json(summary: &AggregateSummary, rows: &[DisplayRow]) -> Result<String> {
    let report = JsonReport {
        summary,
        objects: rows,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Writes displayed rows to `path`, replacing any existing file.
///
/// A `.csv` extension selects CSV with a header row; anything else gets a
/// pretty-printed JSON array.
pub fn export_rows(path: &Path, rows: &[DisplayRow]) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    debug!(path = %path.display(), rows = rows.len(), is_csv, "Exporting rows");

    let file = File::create(path)
        .with_context(|| format!("failed to create export file '{}'", path.display()))?;

    if is_csv {
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    } else {
        serde_json::to_writer_pretty(file, rows)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn object(name: &str, hazardous: bool, diameter: f64, speed: f64) -> NearEarthObject {
        NearEarthObject {
            name: name.to_string(),
            estimated_diameter_m: diameter,
            is_hazardous: hazardous,
            relative_velocity_kph: speed,
            miss_distance_km: 45_678_901.4,
            approach_date: "2024-Jan-05".to_string(),
        }
    }

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0.0), "0");
        assert_eq!(with_thousands(999.4), "999");
        assert_eq!(with_thousands(1000.0), "1,000");
        assert_eq!(with_thousands(1_234_567.8), "1,234,568");
        assert_eq!(with_thousands(-12_345.0), "-12,345");
    }

    #[test]
    fn test_display_row_formatting() {
        let row = DisplayRow::from(&object("(2024 AA)", true, 123.456, 54321.9));

        assert_eq!(row.name, "(2024 AA)");
        assert_eq!(row.size, "123.46");
        assert_eq!(row.hazardous, HAZARDOUS_YES);
        assert_eq!(row.speed, "54,322");
        assert_eq!(row.distance, "45,678,901");
        assert_eq!(row.approach_date, "2024-Jan-05");
    }

    #[test]
    fn test_summary_with_objects() {
        let objects = vec![object("(big)", false, 50.0, 10000.0)];
        let summary = AggregateSummary::from_objects(4, &objects);

        assert_eq!(
            render_summary(&summary),
            "Total Asteroids: 4  |  Potentially Hazardous: 0  |  Largest: (big) (50.00m)  |  Fastest: (big) (10,000 km/h)"
        );
    }

    #[test]
    fn test_summary_without_objects_reads_not_available() {
        let summary = AggregateSummary::from_objects(4, &[]);
        let text = render_summary(&summary);

        assert!(text.contains("Largest: N/A"));
        assert!(text.contains("Fastest: N/A"));
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let rows = display_rows(&[object("(a)", false, 1.0, 1.0), object("(b)", true, 2.0, 2.0)]);
        let table = render_table(&rows);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[2].starts_with("(a)"));
        assert!(lines[3].starts_with("(b)"));
    }

    #[test]
    fn test_histogram_without_data() {
        assert_eq!(render_histogram(None, 20), "No data to display\n");
    }

    #[test]
    fn test_histogram_bars_scale_to_peak() {
        let histogram = Histogram::from_values(&[0.0, 1.0, 1.0, 4.0], 2).unwrap();
        let text = render_histogram(Some(&histogram), 10);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("########## 3"));
        assert!(lines[2].ends_with("##### 1") || lines[2].ends_with("### 1"));
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&AggregateSummary::default());
    }

    #[test]
    fn test_render_json_includes_summary_and_rows() {
        let objects = vec![object("(2024 AA)", true, 50.0, 10000.0)];
        let summary = AggregateSummary::from_objects(3, &objects);
        let rows = display_rows(&objects);

        let text = render_json(&summary, &rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed["summary"]["total_count"], 3);
        assert_eq!(parsed["summary"]["hazardous_count"], 1);
        assert_eq!(parsed["summary"]["largest"]["name"], "(2024 AA)");
        assert_eq!(parsed["objects"][0]["Speed"], "10,000");
    }

    #[test]
    fn test_render_json_empty_summary_has_null_objects() {
        let summary = AggregateSummary::from_objects(0, &[]);
        let parsed: serde_json::Value =
            serde_json::from_str(&render_json(&summary, &[]).unwrap()).unwrap();

        assert!(parsed["summary"]["largest"].is_null());
        assert_eq!(parsed["objects"], serde_json::json!([]));
    }

    #[test]
    fn test_export_json_uses_display_keys() {
        let path = temp_path("neo_tracker_test_export.json");
        let _ = fs::remove_file(&path);

        let rows = display_rows(&[object("(2024 AA)", false, 50.0, 10000.0)]);
        export_rows(Path::new(&path), &rows).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let first = &written[0];
        assert_eq!(first["Name"], "(2024 AA)");
        assert_eq!(first["Size"], "50.00");
        assert_eq!(first["Hazardous"], HAZARDOUS_NO);
        assert_eq!(first["Speed"], "10,000");
        assert_eq!(first["Approach Date"], "2024-Jan-05");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_csv_writes_header_once() {
        let path = temp_path("neo_tracker_test_export.csv");
        let _ = fs::remove_file(&path);

        let rows = display_rows(&[object("(a)", false, 1.0, 1.0), object("(b)", true, 2.0, 2.0)]);
        export_rows(Path::new(&path), &rows).unwrap();
        export_rows(Path::new(&path), &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // overwritten, not appended: 1 header + 2 rows
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name,Size,Hazardous"));

        fs::remove_file(&path).unwrap();
    }
}
