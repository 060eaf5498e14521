//! Run configuration: prompt and form-mapping files plus the scratch dir.

use std::fs;
use std::path::Path;

use formfill_domain::FormMappingSet;
use formfill_pipeline::PromptSet;
use tracing::debug;

use crate::error::{CliError, Result};

/// File name of the form mapping configuration inside the config dir.
pub const FORM_MAPPINGS_FILE: &str = "form_mappings.toml";
/// File name of the prompt configuration inside the config dir.
pub const PROMPTS_FILE: &str = "prompts.toml";

/// Load the form mappings from `<config_dir>/form_mappings.toml`.
pub fn load_form_mappings(config_dir: &Path) -> Result<FormMappingSet> {
    let path = config_dir.join(FORM_MAPPINGS_FILE);
    let raw = fs::read_to_string(&path)
        .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
    Ok(toml::from_str(&raw)?)
}

/// Load the prompt set from `<config_dir>/prompts.toml`.
pub fn load_prompts(config_dir: &Path) -> Result<PromptSet> {
    let path = config_dir.join(PROMPTS_FILE);
    let raw = fs::read_to_string(&path)
        .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
    PromptSet::from_toml_str(&raw)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}

/// Create the scratch directory if needed and clear out leftover files.
pub fn prepare_temp_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    cleanup_temp_dir(dir)
}

/// Remove files directly inside the scratch directory, leaving the directory
/// itself and any subdirectories alone.
pub fn cleanup_temp_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            debug!(path = %entry.path().display(), "removing scratch file");
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
