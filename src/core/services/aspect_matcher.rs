//! Aspect matcher - selects the aspects that apply to a type

use std::sync::Arc;

use crate::core::models::{AspectDescriptor, PointCut, SelectorError, TypeDescriptor};

/// Select the aspects whose target selector accepts `implementation`
///
/// Order follows `aspects`. The first selector error aborts the match.
pub fn match_aspects(
    implementation: &TypeDescriptor,
    aspects: &[Arc<AspectDescriptor>],
) -> Result<Vec<Arc<AspectDescriptor>>, SelectorError> {
    let mut matched = Vec::new();
    for aspect in aspects {
        if aspect.target().accepts(implementation)? {
            matched.push(Arc::clone(aspect));
        }
    }
    Ok(matched)
}

/// Distinct pointcuts of a set of aspects, in first-seen order
///
/// Pointcuts are compared by value: the same pattern with the same advice
/// list contributes once, whichever aspects declare it.
#[must_use]
pub fn distinct_pointcuts(aspects: &[Arc<AspectDescriptor>]) -> Vec<&PointCut> {
    let mut distinct: Vec<&PointCut> = Vec::new();
    for pointcut in aspects.iter().flat_map(|a| a.pointcuts()) {
        if !distinct.contains(&pointcut) {
            distinct.push(pointcut);
        }
    }
    distinct
}
