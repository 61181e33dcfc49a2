//! Execute the function locally over a JSON input, like the platform's
//! function runner.
//!
//! # Usage
//!
//! ```bash
//! vd-cli run --input cart.json
//! shopify app function run-input | vd-cli run --emission every-qualifying-tier
//! ```

use std::path::Path;

use tracing::info;
use volume_discount_function::{EmissionMode, EvaluatorOptions};

/// Run the function over the input at `path` (`-` for stdin) and print the
/// result JSON.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a valid function
/// input.
pub fn execute(path: &Path, emission: EmissionMode) -> Result<(), Box<dyn std::error::Error>> {
    let input = super::read_input(path)?;
    let output = volume_discount_function::run_json(&input, EvaluatorOptions { emission })?;

    info!(path = %path.display(), %emission, "function run complete");
    super::emit(&output)?;
    Ok(())
}
