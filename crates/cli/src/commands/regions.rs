//! regions command - Show where releases go

use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use rf_core::{REGIONS, target::bucket_name};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct RegionEntry {
    region: &'static str,
    bucket: String,
}

fn entries() -> Vec<RegionEntry> {
    REGIONS
        .iter()
        .map(|&region| RegionEntry {
            region,
            bucket: bucket_name(region),
        })
        .collect()
}

/// Execute the regions command
pub fn execute(output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let entries = entries();

    if formatter.is_json() {
        formatter.json(&entries);
        return ExitCode::Success;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["#", "Region", "Bucket"]);
    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), entry.region.to_string(), entry.bucket.clone()]);
    }
    formatter.println(&table.to_string());

    ExitCode::Success
}
