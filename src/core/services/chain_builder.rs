//! Interceptor chain builder - turns join points into committed chains
//!
//! Resolves each advice identifier once per registration pass, assembles
//! one chain per matched method, and commits it unless the method already
//! has one.

use std::collections::HashMap;

use log::{debug, warn};

use super::join_point::JoinPoint;
use crate::core::models::{AdviceId, MethodKey, RegistrationWarning, TypeDescriptor};
use crate::core::ports::{
    AdviceError, AdviceFactory, BoundInterceptor, InterceptorChain, InterceptorRepository,
};

/// Memo of advice resolutions for one registration pass
///
/// Each identifier is resolved at most once; every chain built with the
/// same cache shares the same instance. Failures are memoised too.
#[derive(Debug, Default)]
pub struct AdviceCache {
    index: HashMap<AdviceId, usize>,
    entries: Vec<Result<BoundInterceptor, AdviceError>>,
}

impl AdviceCache {
    /// Empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an advice, constructing it on first use
    pub fn resolve(
        &mut self,
        advice: &AdviceId,
        factory: &dyn AdviceFactory,
    ) -> Result<BoundInterceptor, AdviceError> {
        if let Some(&slot) = self.index.get(advice) {
            return self.entries[slot].clone();
        }
        let resolved = factory
            .create(advice)
            .map(|interceptor| BoundInterceptor::new(advice.clone(), interceptor));
        self.index.insert(advice.clone(), self.entries.len());
        self.entries.push(resolved.clone());
        resolved
    }

    /// A previously resolved advice, if it resolved successfully
    #[must_use]
    pub fn get(&self, advice: &AdviceId) -> Option<&BoundInterceptor> {
        self.index.get(advice).and_then(|&slot| self.entries[slot].as_ref().ok())
    }

    /// Successfully resolved advice, in resolution order
    #[must_use]
    pub fn resolved(&self) -> Vec<BoundInterceptor> {
        self.entries.iter().filter_map(|r| r.as_ref().ok().cloned()).collect()
    }
}

/// What a chain-building pass did
#[derive(Debug, Default)]
pub struct ChainBuildOutcome {
    /// Methods whose chain was committed by this pass
    pub committed: Vec<MethodKey>,
    /// Methods that already had a chain and were left alone
    pub skipped: Vec<MethodKey>,
    /// Advice that could not be resolved
    pub warnings: Vec<RegistrationWarning>,
}

/// Build and commit interceptor chains for the join points of one type
///
/// For every matched method without an existing chain, the advice of each
/// matching pointcut is appended in pointcut order, then advice order.
/// Advice is only resolved for methods that get a chain built. Advice that
/// fails to resolve is left out and reported once as a warning; a chain
/// left empty by such failures is not committed.
pub fn build_chains(
    implementation: &TypeDescriptor,
    join_points: &[JoinPoint<'_>],
    factory: &dyn AdviceFactory,
    cache: &mut AdviceCache,
    repository: &mut dyn InterceptorRepository,
) -> ChainBuildOutcome {
    let mut outcome = ChainBuildOutcome::default();

    for join_point in join_points {
        let key = MethodKey::new(implementation.full_name(), join_point.identity());
        if repository.contains(&key) {
            debug!("{key}: chain already committed, skipping");
            outcome.skipped.push(key);
            continue;
        }

        let mut links: Vec<BoundInterceptor> = Vec::new();
        for advice in join_point.pointcuts.iter().flat_map(|pc| pc.advices()) {
            let first_sight = !cache.index.contains_key(advice);
            match cache.resolve(advice, factory) {
                Ok(link) => links.push(link),
                Err(err) if first_sight => {
                    warn!("{}: leaving out advice '{advice}': {err}", implementation.full_name());
                    outcome.warnings.push(RegistrationWarning::AdviceUnavailable {
                        type_name: implementation.full_name().to_string(),
                        advice: advice.clone(),
                        reason: err.to_string(),
                    });
                }
                Err(_) => {}
            }
        }

        if links.is_empty() {
            debug!("{key}: no advice resolved, nothing to commit");
            continue;
        }

        debug!("{key}: committing chain of {}", links.len());
        if repository.commit(InterceptorChain::new(key.clone(), links)) {
            outcome.committed.push(key);
        } else {
            outcome.skipped.push(key);
        }
    }

    outcome
}
