//! Analyze and validate manifests

use std::path::PathBuf;

use anyhow::Context;

use aspectweave::adapters::toml::load_paths;
use aspectweave::analysis;
use aspectweave::output::{AnalysisResult, OutputMode};

fn run_analysis(paths: &[PathBuf]) -> anyhow::Result<AnalysisResult> {
    let model = load_paths(paths).context("Failed to load manifests")?;
    let (result, _) = analysis::analyze(model).context("Registration failed")?;
    Ok(result)
}

/// Print the interception plan for every component
pub fn analyze(paths: &[PathBuf], mode: OutputMode) -> anyhow::Result<()> {
    run_analysis(paths)?.render(mode);
    Ok(())
}

/// Print the interception plan and fail if anything was left out
pub fn validate(paths: &[PathBuf], mode: OutputMode) -> anyhow::Result<()> {
    let result = run_analysis(paths)?;
    result.render(mode);

    if !result.passed {
        anyhow::bail!("{} warning(s) during registration", result.warning_count);
    }
    Ok(())
}
