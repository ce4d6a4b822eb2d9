use crate::model::{Analysis, UsageReport};
use log::{error, info};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Serialize)]
struct UsageDocument<'a> {
    entities: &'a [Analysis],
    usage: &'a [UsageReport],
}

pub fn export_report_to_json(
    entities: &[Analysis],
    usage: &[UsageReport],
    output_path: &Path,
) -> io::Result<()> {
    info!(
        "Exporting {} entities and {} usage entries to JSON: {:?}",
        entities.len(),
        usage.len(),
        output_path
    );

    let document = UsageDocument { entities, usage };
    let json = match serde_json::to_string_pretty(&document) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize report to JSON: {}", e);
            return Err(io::Error::new(io::ErrorKind::Other, e));
        }
    };

    match fs::write(output_path, &json) {
        Ok(_) => {
            info!(
                "Successfully wrote {} bytes to {:?}",
                json.len(),
                output_path
            );
            Ok(())
        }
        Err(e) => {
            error!("Failed to write JSON to file {:?}: {}", output_path, e);
            Err(e)
        }
    }
}
