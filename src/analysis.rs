//! Whole-model analysis
//!
//! Runs a [`WeaveModel`] through a registrar the way a component container
//! would at bootstrap, then reads the frozen chain table back into reports.

use crate::adapters::toml::WeaveModel;
use crate::core::models::{MethodKey, RegistrationError, RegistrationReport};
use crate::core::ports::ComponentListener;
use crate::core::services::{AopRegistrar, FrozenInterceptors};
use crate::output::{AnalysisResult, ComponentReport, InterceptedMethod};

/// Register every component of `model` and summarise the outcome
///
/// Global aspects are registered first, then components in declaration
/// order. A fatal registration error aborts the analysis.
pub fn analyze(model: WeaveModel) -> Result<(AnalysisResult, FrozenInterceptors), RegistrationError> {
    let WeaveModel {
        components,
        bindings,
        advices,
        aspects,
        config,
        ..
    } = model;

    let mut registrar = AopRegistrar::new(advices, bindings, config);
    for aspect in aspects {
        registrar.register_aspect(aspect);
    }

    let mut reports = Vec::with_capacity(components.len());
    for mut metadata in components {
        reports.push(registrar.on_metadata_registered(&mut metadata)?);
    }

    let table = registrar.freeze();
    let components = reports.into_iter().map(|r| component_report(r, &table)).collect();
    Ok((AnalysisResult::new(components), table))
}

fn component_report(report: RegistrationReport, table: &FrozenInterceptors) -> ComponentReport {
    let methods = report
        .intercepted_methods
        .iter()
        .map(|identity| {
            let key = MethodKey::new(&report.implementation, identity.clone());
            let chain = table
                .get(&key)
                .map(|c| c.advice_ids().iter().map(ToString::to_string).collect())
                .unwrap_or_default();
            InterceptedMethod {
                method: identity.to_string(),
                chain,
            }
        })
        .collect();

    ComponentReport {
        implementation: report.implementation,
        proxy_required: report.proxy_required,
        methods,
        warnings: report.warnings,
    }
}
