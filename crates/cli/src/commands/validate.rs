//! Check a promotion before it is saved.

use std::path::Path;

use tracing::{info, warn};

/// Validate the promotion at `path`, printing one problem per line.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the promotion has
/// problems.
pub fn execute(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let promotion = super::read_promotion(path)?;
    let errors = promotion.validation_errors();

    if errors.is_empty() {
        info!(title = %promotion.title, "promotion is valid");
        super::emit("ok")?;
        return Ok(());
    }

    for error in &errors {
        warn!(%error, "promotion problem");
        super::emit(&error.to_string())?;
    }
    Err(format!("{} has {} problem(s)", path.display(), errors.len()).into())
}
