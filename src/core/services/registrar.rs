//! Registration orchestrator - analyzes each registered component
//!
//! [`AopRegistrar`] is the bootstrap-phase context: it owns the aspect and
//! interceptor repositories, the binding table and the advice factory. A
//! component container calls it once per component; when bootstrap ends it
//! is frozen into the read-only table the dispatch layer uses.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use aspectweave::advice::{AdviceRegistry, LoggingInterceptor};
//! use aspectweave::config::WeaveConfig;
//! use aspectweave::core::models::{BindingTable, ComponentMetadata, MethodBinding, MethodDescriptor, TypeDescriptor};
//! use aspectweave::core::ports::ComponentListener;
//! use aspectweave::core::services::AopRegistrar;
//!
//! let advices = AdviceRegistry::builder()
//!     .register("audit", || Ok(Arc::new(LoggingInterceptor::new("audit"))))
//!     .build();
//! let bindings = BindingTable::new().bind_method("App.Foo", MethodBinding::new("Save", ["audit"]));
//! let mut registrar = AopRegistrar::new(advices, bindings, WeaveConfig::default());
//!
//! let foo = TypeDescriptor::new("App.Foo")
//!     .with_method(MethodDescriptor::new("Save", "System.Void").param("System.Int32"));
//! let mut metadata = ComponentMetadata::new(Arc::new(foo));
//! let report = registrar.on_metadata_registered(&mut metadata).unwrap();
//!
//! assert!(metadata.proxy_required());
//! assert_eq!(report.intercepted_methods[0].to_string(), "Save(System.Int32)");
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use super::aspect_matcher::{distinct_pointcuts, match_aspects};
use super::chain_builder::{AdviceCache, build_chains};
use super::dispatch::FrozenInterceptors;
use super::join_point::{candidate_methods, match_join_points};
use crate::adapters::memory::{InMemoryAspectRepository, InMemoryInterceptorRepository};
use crate::config::WeaveConfig;
use crate::core::models::{
    AspectDescriptor, BindingTable, ComponentMetadata, INTERCEPTORS_KEY, METHODS_KEY,
    MethodIdentity, MethodKey, MethodSignaturePattern, ModelError, PROXY_KEY, PointCut, PropertyValue,
    RegistrationError, RegistrationReport, RegistrationWarning, TargetSelector, TypeBindings,
    TypeDescriptor,
};
use crate::core::ports::{
    AdviceFactory, AspectRepository, BoundInterceptor, ComponentListener, InterceptorRepository,
};

/// Bootstrap-phase interception context and component listener
pub struct AopRegistrar<A = InMemoryAspectRepository, I = InMemoryInterceptorRepository> {
    aspects: A,
    interceptors: I,
    advices: Box<dyn AdviceFactory>,
    bindings: BindingTable,
    config: WeaveConfig,
}

impl AopRegistrar {
    /// Registrar backed by in-memory repositories
    pub fn new(
        advices: impl AdviceFactory + 'static,
        bindings: BindingTable,
        config: WeaveConfig,
    ) -> Self {
        Self::with_repositories(
            InMemoryAspectRepository::new(),
            InMemoryInterceptorRepository::new(),
            advices,
            bindings,
            config,
        )
    }
}

impl<A: AspectRepository, I: InterceptorRepository> AopRegistrar<A, I> {
    /// Registrar backed by caller-supplied repositories
    pub fn with_repositories(
        aspects: A,
        interceptors: I,
        advices: impl AdviceFactory + 'static,
        bindings: BindingTable,
        config: WeaveConfig,
    ) -> Self {
        Self {
            aspects,
            interceptors,
            advices: Box::new(advices),
            bindings,
            config,
        }
    }

    /// Register an aspect that is not tied to a single bound type
    pub fn register_aspect(&mut self, aspect: AspectDescriptor) {
        debug!("registering aspect targeting {}", aspect.target());
        self.aspects.register(aspect);
    }

    /// The aspect repository
    pub const fn aspects(&self) -> &A {
        &self.aspects
    }

    /// The interceptor repository
    pub const fn interceptors(&self) -> &I {
        &self.interceptors
    }

    /// End the bootstrap phase, producing the call-time chain table
    pub fn freeze(self) -> FrozenInterceptors {
        FrozenInterceptors::new(self.interceptors.chains())
    }

    /// Turn the binding-table entries for a type into an aspect
    fn declared_aspect(
        &self,
        implementation: &TypeDescriptor,
        warnings: &mut Vec<RegistrationWarning>,
    ) -> Result<Option<AspectDescriptor>, RegistrationError> {
        let Some(bindings) = self.bindings.get(implementation.full_name()) else {
            return Ok(None);
        };
        let invalid = |source: ModelError| RegistrationError::InvalidBinding {
            type_name: implementation.full_name().to_string(),
            source,
        };

        let mut pointcuts = Vec::new();
        if !bindings.advices.is_empty() {
            pointcuts.push(self.type_level_pointcut(bindings).map_err(invalid)?);
        }

        let declared = candidate_methods(implementation, &[]);
        for binding in &bindings.methods {
            let selected: Vec<_> = declared.iter().map(|c| c.method).filter(|m| binding.selects(m)).collect();
            if selected.is_empty() {
                let warning = RegistrationWarning::UnmatchedBinding {
                    type_name: implementation.full_name().to_string(),
                    method: binding.name.clone(),
                };
                warn!("{warning}");
                warnings.push(warning);
                continue;
            }
            for method in selected {
                let signature = MethodSignaturePattern::for_method(method);
                pointcuts.push(PointCut::new(signature, binding.advices.clone()).map_err(invalid)?);
            }
        }

        if pointcuts.is_empty() {
            return Ok(None);
        }
        let target = TargetSelector::Single(implementation.full_name().to_string());
        AspectDescriptor::new(target, pointcuts).map(Some).map_err(invalid)
    }

    /// Distinct interceptor instances of the committed chains for `methods`
    fn chain_instances(&self, type_name: &str, methods: &[MethodIdentity]) -> Vec<BoundInterceptor> {
        let mut instances: Vec<BoundInterceptor> = Vec::new();
        for identity in methods {
            let key = MethodKey::new(type_name, identity.clone());
            let Some(chain) = self.interceptors.get(&key) else {
                continue;
            };
            for link in chain.links() {
                if !instances.iter().any(|known| known.same_instance(link)) {
                    instances.push(link.clone());
                }
            }
        }
        instances
    }

    fn type_level_pointcut(&self, bindings: &TypeBindings) -> Result<PointCut, ModelError> {
        let depth = bindings.depth.unwrap_or_else(|| self.config.type_level_depth());
        let signature = MethodSignaturePattern::type_level(depth).with_access(self.config.type_level_access());
        PointCut::new(signature, bindings.advices.clone())
    }
}

impl<A: AspectRepository, I: InterceptorRepository> ComponentListener for AopRegistrar<A, I> {
    fn on_metadata_registered(
        &mut self,
        metadata: &mut ComponentMetadata,
    ) -> Result<RegistrationReport, RegistrationError> {
        let implementation = Arc::clone(metadata.implementation());
        let contracts = metadata.contracts().to_vec();
        let type_name = implementation.full_name();
        let mut warnings = Vec::new();

        if let Some(aspect) = self.declared_aspect(&implementation, &mut warnings)? {
            self.register_aspect(aspect);
        }

        let all = self.aspects.aspects();
        let matched = match_aspects(&implementation, &all)?;
        let pointcuts = distinct_pointcuts(&matched);
        let candidates = candidate_methods(&implementation, &contracts);
        let join_points = match_join_points(&implementation, &candidates, &pointcuts);

        if join_points.is_empty() {
            debug!("{type_name}: no join points, no proxy required");
            metadata.extended_properties.insert(PROXY_KEY.to_string(), PropertyValue::Bool(false));
            return Ok(RegistrationReport::not_intercepted(type_name, warnings));
        }

        let mut cache = AdviceCache::new();
        let outcome = build_chains(
            &implementation,
            &join_points,
            &*self.advices,
            &mut cache,
            &mut self.interceptors,
        );
        warnings.extend(outcome.warnings);

        let mut methods: Vec<MethodIdentity> = Vec::new();
        for jp in &join_points {
            let identity = jp.identity();
            if !methods.contains(&identity) {
                methods.push(identity);
            }
        }

        info!(
            "{type_name}: {} intercepted method(s), {} chain(s) committed",
            methods.len(),
            outcome.committed.len()
        );

        let interceptors = self.chain_instances(type_name, &methods);
        let props = &mut metadata.extended_properties;
        props.insert(PROXY_KEY.to_string(), PropertyValue::Bool(true));
        props.insert(INTERCEPTORS_KEY.to_string(), PropertyValue::Interceptors(interceptors));
        props.insert(METHODS_KEY.to_string(), PropertyValue::Methods(methods.clone()));

        Ok(RegistrationReport {
            implementation: type_name.to_string(),
            proxy_required: true,
            intercepted_methods: methods,
            committed: outcome.committed,
            skipped: outcome.skipped,
            warnings,
        })
    }
}

impl<A, I> std::fmt::Debug for AopRegistrar<A, I>
where
    A: std::fmt::Debug,
    I: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AopRegistrar")
            .field("aspects", &self.aspects)
            .field("interceptors", &self.interceptors)
            .field("bindings", &self.bindings)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
