//! The index build pipeline behind `candela build`.
//!
//! Takes the JSON record manifest a site generator emits and produces the
//! XML index document the browser widget fetches. Kept in the library so
//! the whole pipeline is testable without spawning the binary.

use std::fs;
use std::path::Path;

use crate::index::{parse_index, write_index};
use crate::types::SearchRecord;

/// Build the index file at `output` from the JSON manifest at `input`.
///
/// The manifest is a JSON array of records:
/// `[{"title": ..., "content": ..., "url": ...}, ...]`. Parent directories
/// of `output` are created as needed.
pub fn run_build(input: &str, output: &str) -> Result<(), String> {
    // 1. Read the manifest
    let json =
        fs::read_to_string(input).map_err(|e| format!("Failed to read {}: {}", input, e))?;
    let records: Vec<SearchRecord> =
        serde_json::from_str(&json).map_err(|e| format!("Invalid manifest JSON: {}", e))?;

    // 2. Serialize the index
    let xml = write_index(&records);

    // 3. Verify: the emitted document must parse back to the exact records
    // it was built from.
    let reparsed = parse_index(&xml).map_err(|e| format!("Emitted index does not parse: {}", e))?;
    if reparsed != records {
        return Err(format!(
            "Emitted index does not round-trip ({} records in, {} out)",
            records.len(),
            reparsed.len()
        ));
    }

    // 4. Write the output file
    if let Some(parent) = Path::new(output)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }
    fs::write(output, &xml).map_err(|e| format!("Failed to write {}: {}", output, e))?;

    eprintln!("  ✓ Created {} ({} bytes)", output, xml.len());
    eprintln!("✅ Indexed {} records", records.len());
    Ok(())
}
