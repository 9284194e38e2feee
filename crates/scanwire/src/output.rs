use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use scanwire_align::Alignment;
use scanwire_codec::{Point, Profile};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line, including every point.
    Json,
    /// Summary table.
    Table,
    /// One summary line.
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ProfileOutput<'a> {
    label: &'a str,
    source: &'a str,
    point_count: usize,
    points: Vec<[f64; 2]>,
    timestamp: String,
}

#[derive(Serialize)]
struct AlignmentOutput<'a> {
    source: &'a str,
    point_count: usize,
    iterations: usize,
    stop: &'a str,
    timestamp: String,
}

pub fn print_profile(profile: &Profile, source: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ProfileOutput {
                label: &profile.label,
                source,
                point_count: profile.len(),
                points: profile.points.iter().map(|&p| p.into()).collect(),
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["LABEL", "POINTS", "FIRST", "LAST", "SOURCE"])
                .add_row(vec![
                    display_label(&profile.label).to_string(),
                    profile.len().to_string(),
                    point_preview(profile.points.first()),
                    point_preview(profile.points.last()),
                    source.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "label={} points={} first={} last={} source={}",
                display_label(&profile.label),
                profile.len(),
                point_preview(profile.points.first()),
                point_preview(profile.points.last()),
                source
            );
        }
    }
}

pub fn print_alignment(alignment: &Alignment, source: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = AlignmentOutput {
                source,
                point_count: alignment.points.len(),
                iterations: alignment.iterations,
                stop: alignment.stop.as_str(),
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["POINTS", "ITERATIONS", "STOP", "SOURCE"])
                .add_row(vec![
                    alignment.points.len().to_string(),
                    alignment.iterations.to_string(),
                    alignment.stop.as_str().to_string(),
                    source.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "aligned points={} iterations={} stop={} source={}",
                alignment.points.len(),
                alignment.iterations,
                alignment.stop.as_str(),
                source
            );
        }
    }
}

fn display_label(label: &str) -> &str {
    if label.is_empty() {
        "-"
    } else {
        label
    }
}

fn point_preview(point: Option<&Point>) -> String {
    match point {
        Some(p) => format!("({}, {})", p.x, p.y),
        None => "-".to_string(),
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
