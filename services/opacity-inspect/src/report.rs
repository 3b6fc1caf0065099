//! Text and JSON rendering of catalogs, summaries and queries.

use std::ops::Range;

use opacity_table::{ClampReport, MoleculeCatalog, OpacityTable, TableSummary};
use serde::Serialize;

/// One discovered molecule folder.
#[derive(Debug, Serialize)]
pub struct CatalogLine {
    pub molecule: String,
    pub folder: String,
    pub tier: String,
}

pub fn catalog_lines(catalog: &MoleculeCatalog) -> Vec<CatalogLine> {
    catalog
        .iter()
        .map(|entry| CatalogLine {
            molecule: entry.name.clone(),
            folder: entry.folder_name().to_string(),
            tier: format!("{:?}", entry.tier),
        })
        .collect()
}

/// Cross sections at one (pressure, temperature) point.
#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub molecule: String,
    /// Pa
    pub pressure: f64,
    /// K
    pub temperature: f64,
    pub clamp: ClampReport,
    pub g_points: usize,
    pub wavenumbers: Vec<f64>,
    pub values: Vec<f64>,
}

impl QueryReport {
    pub fn new(
        table: &OpacityTable,
        pressure: f64,
        temperature: f64,
        window: Option<(f64, f64)>,
    ) -> Self {
        let sample = table.sample(pressure, temperature);
        let g = sample.g_points;
        let range: Range<usize> = match window {
            Some((lo, hi)) => table.spectral_window(lo, hi),
            None => 0..table.wavenumber_grid().len(),
        };

        Self {
            molecule: table.molecule_name().to_string(),
            pressure,
            temperature,
            clamp: sample.clamp,
            g_points: g,
            wavenumbers: table.wavenumber_grid()[range.clone()].to_vec(),
            values: sample.values[range.start * g..range.end * g].to_vec(),
        }
    }
}

/// Everything printed for one run.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub format: String,
    pub directory: String,
    pub molecules: Vec<CatalogLine>,
    pub tables: Vec<TableSummary>,
    pub queries: Vec<QueryReport>,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} opacities in {}\n", self.format, self.directory));
        for line in &self.molecules {
            out.push_str(&format!("  {:<10} {:<24} {}\n", line.molecule, line.folder, line.tier));
        }

        for table in &self.tables {
            out.push_str(&format!(
                "\n{} ({})\n  pressure    {} samples, {:.3e} .. {:.3e} Pa\n  temperature {} samples, {} .. {} K\n  wavenumber  {} bins",
                table.molecule,
                table.format,
                table.pressures,
                table.pressure_range.0,
                table.pressure_range.1,
                table.temperatures,
                table.temperature_range.0,
                table.temperature_range.1,
                table.wavenumbers,
            ));
            if let Some((lo, hi)) = table.wavenumber_range {
                out.push_str(&format!(", {:.3} .. {:.3} cm-1", lo, hi));
            }
            out.push_str(&format!("\n  g-points    {}\n", table.g_points));
        }

        for query in &self.queries {
            out.push_str(&format!(
                "\n{} at {:.3e} Pa, {} K",
                query.molecule, query.pressure, query.temperature
            ));
            if query.clamp.is_clamped() {
                out.push_str(&format!(" (clamped: {:?})", query.clamp));
            }
            out.push('\n');
            for (i, wn) in query.wavenumbers.iter().enumerate() {
                let bin = &query.values[i * query.g_points..(i + 1) * query.g_points];
                let cells: Vec<String> = bin.iter().map(|v| format!("{:.4e}", v)).collect();
                out.push_str(&format!("  {:>12.4} {}\n", wn, cells.join(" ")));
            }
        }

        out
    }
}
