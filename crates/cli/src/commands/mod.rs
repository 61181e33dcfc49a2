//! Subcommand implementations.

use std::io::{self, Read, Write};
use std::path::Path;

use volume_discount_core::VolumeDiscount;

pub mod configure;
pub mod definition;
pub mod preview;
pub mod run;
pub mod validate;

/// Read a whole file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path)
}

fn read_promotion(path: &Path) -> Result<VolumeDiscount, Box<dyn std::error::Error>> {
    let content = read_input(path)?;
    let promotion: VolumeDiscount = serde_json::from_str(&content)
        .map_err(|e| format!("{} is not a promotion: {e}", path.display()))?;
    tracing::debug!(
        title = %promotion.title,
        tiers = promotion.discount_values.len(),
        "loaded promotion"
    );
    Ok(promotion)
}

/// Write one line to stdout. Logs go to stderr.
fn emit(line: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")
}
