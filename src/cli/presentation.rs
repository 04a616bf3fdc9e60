//! CLI presentation: text and JSON renderings of command results.

use crate::document::{GateCollection, Map, MapDocument};
use crate::error::ApiError;
use crate::generator::VariantGenerator;
use crate::naming::deformat;
use crate::objective::{ObjectiveTimes, TimeInt32};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Result of generating one source map
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub source: PathBuf,
    /// Output root, `None` for dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_root: Option<PathBuf>,
    pub variants: Vec<String>,
    /// Files from earlier maps of the same run that this map replaced
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overwritten: Vec<PathBuf>,
}

pub fn format_generate_text(reports: &[GenerateReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let target = match &report.output_root {
            Some(root) => format!("written to {}", root.display()),
            None => "dry run".to_string(),
        };
        out.push_str(&format!(
            "{}: {} variant(s), {}\n",
            report.source.display(),
            report.variants.len(),
            target
        ));
        for variant in &report.variants {
            out.push_str(&format!("  {}\n", variant));
        }
        if !report.overwritten.is_empty() {
            out.push_str(&format!(
                "  overwrote {} variant(s) of an earlier map with the same name\n",
                report.overwritten.len()
            ));
        }
    }
    let total: usize = reports.iter().map(|r| r.variants.len()).sum();
    out.push_str(&format!("{} map(s), {} variant(s)", reports.len(), total));
    out
}

pub fn format_generate_json(reports: &[GenerateReport]) -> Result<String, ApiError> {
    to_json(&reports)
}

/// One gate identifier found in a map
#[derive(Debug, Clone, Serialize)]
pub struct GateRow {
    pub collection: String,
    pub identifier: String,
    pub environment: String,
}

/// Summary of a map as the generator sees it
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub map_uid: String,
    pub map_name: String,
    pub plain_name: String,
    pub player_model: Option<String>,
    pub default_vehicle: String,
    pub supported: bool,
    pub locked: bool,
    pub objectives: ObjectiveTimes,
    pub gates: Vec<GateRow>,
    pub planned_vehicles: Vec<String>,
}

impl InspectReport {
    pub fn build(map: &Map, generator: &VariantGenerator) -> Self {
        let gates = generator.gates();
        let mut rows = Vec::new();
        for collection in GateCollection::ALL {
            for identifier in map.identifiers(collection) {
                if let Some(env) = gates.environment_of(identifier) {
                    rows.push(GateRow {
                        collection: collection.to_string(),
                        identifier: identifier.to_string(),
                        environment: env.to_string(),
                    });
                }
            }
        }

        Self {
            map_uid: map.map_uid.clone(),
            map_name: map.map_name.clone(),
            plain_name: deformat(&map.map_name),
            player_model: map.player_model.as_ref().map(|m| m.id.clone()),
            default_vehicle: generator.default_vehicle(map),
            supported: map.is_supported_family(),
            locked: map.password.is_some(),
            objectives: map.objectives,
            gates: rows,
            planned_vehicles: generator
                .planned_vehicles(map)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

fn time_cell(time: Option<TimeInt32>) -> String {
    time.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_inspect_text(report: &InspectReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Name:      {}\n", report.plain_name));
    out.push_str(&format!("UID:       {}\n", report.map_uid));
    out.push_str(&format!(
        "Vehicle:   {}{}\n",
        report.default_vehicle,
        if report.player_model.is_none() {
            " (not set)"
        } else {
            ""
        }
    ));
    out.push_str(&format!(
        "Supported: {}\n",
        if report.supported { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "Locked:    {}\n",
        if report.locked { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "Medals:    author {} / gold {} / silver {} / bronze {}\n",
        time_cell(report.objectives.author),
        time_cell(report.objectives.gold),
        time_cell(report.objectives.silver),
        time_cell(report.objectives.bronze)
    ));

    if report.gates.is_empty() {
        out.push_str("Gates:     none\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Collection", "Identifier", "Environment"]);
        for gate in &report.gates {
            table.add_row(vec![&gate.collection, &gate.identifier, &gate.environment]);
        }
        out.push_str(&format!("{}\n", table));
    }

    out.push_str(&format!(
        "Variants:  {}",
        if report.planned_vehicles.is_empty() {
            "none".to_string()
        } else {
            report.planned_vehicles.join(", ")
        }
    ));
    out
}

pub fn format_inspect_json(report: &InspectReport) -> Result<String, ApiError> {
    to_json(report)
}

/// Vehicle table row with its configured inclusion
#[derive(Debug, Clone, Serialize)]
pub struct VehicleRow {
    pub vehicle: String,
    pub environment: Option<String>,
    pub included: bool,
}

fn vehicle_rows(generator: &VariantGenerator) -> Vec<VehicleRow> {
    generator
        .table()
        .entries()
        .iter()
        .map(|entry| VehicleRow {
            vehicle: entry.vehicle.to_string(),
            environment: entry.environment.map(str::to_string),
            included: generator.options().includes(entry.vehicle),
        })
        .collect()
}

pub fn format_vehicles_text(generator: &VariantGenerator) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Vehicle", "Environment", "Included"]);
    for row in vehicle_rows(generator) {
        let included = if row.included {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        table.add_row(vec![
            row.vehicle,
            row.environment.unwrap_or_else(|| "(original gates)".to_string()),
            included,
        ]);
    }
    format!(
        "{}\nGate keyword: {}, fallback vehicle: {}",
        table,
        generator.table().gate_keyword(),
        generator.table().default_vehicle()
    )
}

pub fn format_vehicles_json(generator: &VariantGenerator) -> Result<String, ApiError> {
    to_json(&vehicle_rows(generator))
}
