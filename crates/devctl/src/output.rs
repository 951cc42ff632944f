//! Rendering for the `--output` formats.
//!
//! Device listings go through [`render_devices`]; `config show` goes
//! through [`render_config`]. Tables are built with `tabled`,
//! structured formats serialize through serde, and `plain` emits one
//! serial number per line for scripting.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use devctl_config::Config;
use devctl_core::{DeviceRecord, DeviceStatus};

use crate::cli::{ColorMode, OutputFormat};

/// Whether escape codes should go to stdout.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Never => false,
        ColorMode::Always => true,
        ColorMode::Auto => std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal(),
    }
}

// ── Device listings ─────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "SN")]
    sn: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl DeviceRow {
    fn new(record: &DeviceRecord, color: bool) -> Self {
        Self {
            sn: record.sn.clone(),
            device_type: record.device_type.clone(),
            vendor: record.vendor_name.clone(),
            model: record.product_model.clone(),
            status: paint_status(record.status, color),
            created: record
                .create_time
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        }
    }
}

fn paint_status(status: DeviceStatus, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    match status {
        DeviceStatus::Activated => status.green().to_string(),
        DeviceStatus::Inactivated => status.yellow().to_string(),
        DeviceStatus::Disabled => status.red().to_string(),
        DeviceStatus::Scrapped => status.dimmed().to_string(),
    }
}

/// Render one page of device records in the chosen format.
pub fn render_devices(format: &OutputFormat, devices: &[DeviceRecord], color: bool) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<DeviceRow> =
                devices.iter().map(|d| DeviceRow::new(d, color)).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => to_json(devices, true),
        OutputFormat::JsonCompact => to_json(devices, false),
        OutputFormat::Yaml => to_yaml(devices),
        OutputFormat::Plain => devices
            .iter()
            .map(|d| d.sn.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Render the resolved configuration for `config show`.
///
/// There is no tabular shape for nested profiles, so the table and
/// plain formats fall back to the Debug representation.
pub fn render_config(format: &OutputFormat, cfg: &Config) -> String {
    match format {
        OutputFormat::Table | OutputFormat::Plain => format!("{cfg:#?}"),
        OutputFormat::Json => to_json(cfg, true),
        OutputFormat::JsonCompact => to_json(cfg, false),
        OutputFormat::Yaml => to_yaml(cfg),
    }
}

// ── Writing ─────────────────────────────────────────────────────────

/// Print rendered output to stdout unless quiet or empty.
pub fn print_output(rendered: &str, quiet: bool) {
    if quiet || rendered.is_empty() {
        return;
    }
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{rendered}");
}

fn to_json<T: serde::Serialize + ?Sized>(data: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    };
    result.expect("output types serialize to JSON")
}

fn to_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("output types serialize to YAML")
}
