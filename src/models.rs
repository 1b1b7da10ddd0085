//! Writing the default sampler profiles.

use crate::error::PipelineError;
use std::fs;
use std::path::{Path, PathBuf};
use synth_core::{StorageLayout, SynthError};
use synth_sampler::{LedgerProfile, ProcessorProfile};
use tracing::info;

/// Profiles touched by [`init_models`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelsInit {
    pub written: Vec<PathBuf>,
    /// Existing profiles left alone because `force` was not set.
    pub kept: Vec<PathBuf>,
}

/// Write the default processor and ledger profiles into the models directory.
///
/// Existing files are only replaced when `force` is set.
pub fn init_models(layout: &StorageLayout, force: bool) -> Result<ModelsInit, PipelineError> {
    fs::create_dir_all(&layout.models_dir)
        .map_err(|e| SynthError::io(&layout.models_dir, e))?;

    let mut result = ModelsInit::default();
    let profiles = [
        (layout.processor_model(), ProcessorProfile::default().to_yaml()?),
        (layout.ledger_model(), LedgerProfile::default().to_yaml()?),
    ];

    for (path, yaml) in profiles {
        if path.exists() && !force {
            info!("Keeping existing profile: {}", path.display());
            result.kept.push(path);
            continue;
        }
        write_profile(&path, &yaml)?;
        info!("Wrote profile: {}", path.display());
        result.written.push(path);
    }
    Ok(result)
}

fn write_profile(path: &Path, yaml: &str) -> Result<(), SynthError> {
    fs::write(path, yaml).map_err(|e| SynthError::io(path, e))
}
