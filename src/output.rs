//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::RegistrationWarning;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of analysing a set of manifests
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    /// Whether the analysis produced no warnings
    pub passed: bool,
    /// Number of components registered
    pub components_analyzed: usize,
    /// Number of components that need a proxy
    pub proxied: usize,
    /// Total warnings across components
    pub warning_count: usize,
    /// Per-component results, in registration order
    pub components: Vec<ComponentReport>,
}

/// What registration decided for one component
#[derive(Debug, Serialize)]
pub struct ComponentReport {
    /// Implementation type
    pub implementation: String,
    /// Whether instances must be proxied
    pub proxy_required: bool,
    /// Intercepted methods with their chains
    pub methods: Vec<InterceptedMethod>,
    /// Non-fatal problems
    pub warnings: Vec<RegistrationWarning>,
}

/// One intercepted method and the advice wrapped around it
#[derive(Debug, Serialize)]
pub struct InterceptedMethod {
    /// Method identity, e.g. `Save(System.Int32)`
    pub method: String,
    /// Advice identifiers, outermost first
    pub chain: Vec<String>,
}

impl AnalysisResult {
    /// Summarise component reports
    #[must_use]
    pub fn new(components: Vec<ComponentReport>) -> Self {
        let warning_count = components.iter().map(|c| c.warnings.len()).sum();
        Self {
            passed: warning_count == 0,
            components_analyzed: components.len(),
            proxied: components.iter().filter(|c| c.proxy_required).count(),
            warning_count,
            components,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.components.is_empty() {
            println!("No components registered.");
            return;
        }

        println!("Analyzed {} component(s)\n", self.components_analyzed);

        for component in &self.components {
            if component.proxy_required {
                println!("{} {}", component.implementation.bold(), "[proxy]".green());
            } else {
                println!("{} {}", component.implementation.bold(), "[no proxy]".dimmed());
            }
            for m in &component.methods {
                if m.chain.is_empty() {
                    println!("  {}  (no chain)", m.method);
                } else {
                    println!("  {}  -> {}", m.method, m.chain.join(" -> "));
                }
            }
            for w in &component.warnings {
                println!("  {} {w}", "warning:".yellow());
            }
            println!();
        }

        println!("{} proxied, {} warning(s)", self.proxied, self.warning_count);
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
