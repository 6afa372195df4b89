//! Manifest loader
//!
//! Resolves the declarations of one or more manifests into domain models:
//! a shared type graph, component metadata, the binding table, an advice
//! registry and global aspects.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use super::ManifestError;
use super::manifest::{
    AdviceEntry, AspectEntry, BindingEntry, Manifest, PointcutEntry, TypeEntry, find_manifests,
    load_file,
};
use crate::advice::{AdviceRegistry, DenyInterceptor, LoggingInterceptor};
use crate::config::WeaveConfig;
use crate::core::models::{
    AccessMask, AspectDescriptor, BindingTable, ComponentMetadata, Depth, MethodBinding,
    MethodDescriptor, MethodSignaturePattern, ModelError, PointCut, TargetSelector, TypeDescriptor,
};

/// Everything a manifest set describes, ready for registration
#[derive(Debug)]
pub struct WeaveModel {
    /// Resolved types by full name
    pub types: BTreeMap<String, Arc<TypeDescriptor>>,
    /// Components, in registration order
    pub components: Vec<ComponentMetadata>,
    /// Interception bindings
    pub bindings: BindingTable,
    /// Advice factories
    pub advices: AdviceRegistry,
    /// Global aspects
    pub aspects: Vec<AspectDescriptor>,
    /// Weaving settings
    pub config: WeaveConfig,
}

impl WeaveModel {
    /// Resolve a (merged) manifest
    pub fn from_manifest(manifest: Manifest) -> Result<Self, ManifestError> {
        let types = resolve_types(&manifest.types)?;
        let lookup = |owner: &str, name: &str| {
            types.get(name).cloned().ok_or_else(|| ManifestError::UnknownType {
                owner: owner.to_string(),
                reference: name.to_string(),
            })
        };

        let mut components = Vec::with_capacity(manifest.components.len());
        for entry in &manifest.components {
            let owner = format!("component {}", entry.implementation);
            let mut metadata = ComponentMetadata::new(lookup(&owner, &entry.implementation)?);
            for contract in &entry.contracts {
                metadata = metadata.with_contract(lookup(&owner, contract)?);
            }
            components.push(metadata);
        }

        let mut bindings = BindingTable::new();
        for entry in &manifest.bindings {
            lookup("binding", &entry.type_name)?;
            bindings = bind(bindings, entry);
        }

        let aspects = manifest
            .aspects
            .iter()
            .map(build_aspect)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "resolved {} type(s), {} component(s), {} binding(s), {} aspect(s)",
            types.len(),
            components.len(),
            bindings.len(),
            aspects.len()
        );

        Ok(Self {
            advices: build_advices(&manifest.advices),
            config: WeaveConfig {
                weaving: manifest.weaving.unwrap_or_default(),
            },
            types,
            components,
            bindings,
            aspects,
        })
    }
}

/// Load, merge and resolve every manifest under `paths`
pub fn load_paths(paths: &[PathBuf]) -> Result<WeaveModel, ManifestError> {
    let mut merged = Manifest::default();
    for path in paths {
        for file in find_manifests(path) {
            debug!("loading manifest {}", file.display());
            merged.merge(load_file(&file)?);
        }
    }
    WeaveModel::from_manifest(merged)
}

fn resolve_types(entries: &[TypeEntry]) -> Result<BTreeMap<String, Arc<TypeDescriptor>>, ManifestError> {
    let mut by_name: HashMap<&str, &TypeEntry> = HashMap::new();
    for entry in entries {
        if by_name.insert(entry.name.as_str(), entry).is_some() {
            return Err(ManifestError::DuplicateType(entry.name.clone()));
        }
    }

    let mut resolver = TypeResolver {
        entries: by_name,
        built: BTreeMap::new(),
        visiting: HashSet::new(),
    };
    for entry in entries {
        resolver.resolve(&entry.name, "manifest")?;
    }
    Ok(resolver.built)
}

/// Builds types depth-first so bases and interfaces exist before their users
struct TypeResolver<'m> {
    entries: HashMap<&'m str, &'m TypeEntry>,
    built: BTreeMap<String, Arc<TypeDescriptor>>,
    visiting: HashSet<&'m str>,
}

impl<'m> TypeResolver<'m> {
    fn resolve(&mut self, name: &str, owner: &str) -> Result<Arc<TypeDescriptor>, ManifestError> {
        if let Some(ty) = self.built.get(name) {
            return Ok(Arc::clone(ty));
        }
        let entry: &'m TypeEntry =
            self.entries.get(name).copied().ok_or_else(|| ManifestError::UnknownType {
                owner: owner.to_string(),
                reference: name.to_string(),
            })?;
        if !self.visiting.insert(entry.name.as_str()) {
            return Err(ManifestError::Cycle(entry.name.clone()));
        }

        let owner = format!("type {}", entry.name);
        let mut ty = TypeDescriptor::new(&entry.name);
        if let Some(base) = &entry.base {
            ty = ty.with_base(self.resolve(base, &owner)?);
        }
        for interface in &entry.interfaces {
            ty = ty.with_interface(self.resolve(interface, &owner)?);
        }
        for method in &entry.methods {
            let mut descriptor = MethodDescriptor::new(&method.name, &method.returns).access(method.access);
            for param in &method.params {
                descriptor = descriptor.param(param);
            }
            ty = ty.with_method(descriptor);
        }

        self.visiting.remove(entry.name.as_str());
        let ty = Arc::new(ty);
        self.built.insert(entry.name.clone(), Arc::clone(&ty));
        Ok(ty)
    }
}

fn bind(mut table: BindingTable, entry: &BindingEntry) -> BindingTable {
    table = table.bind_type(&entry.type_name, entry.advices.iter().map(String::as_str));
    if let Some(depth) = entry.depth {
        table = table.with_depth(&entry.type_name, Depth::Levels(depth));
    }
    for method in &entry.methods {
        let mut binding = MethodBinding::new(&method.name, method.advices.iter().map(String::as_str));
        if let Some(params) = &method.params {
            binding = binding.with_parameters(params);
        }
        table.insert_method(&entry.type_name, binding);
    }
    table
}

fn build_aspect(entry: &AspectEntry) -> Result<AspectDescriptor, ManifestError> {
    let context = format!("aspect '{}'", entry.target);
    let invalid = |source: ModelError| ManifestError::Model {
        context: context.clone(),
        source,
    };

    let target = TargetSelector::parse(&entry.target).map_err(invalid)?;
    let pointcuts = entry
        .pointcuts
        .iter()
        .map(|pc| build_pointcut(pc).map_err(invalid))
        .collect::<Result<Vec<_>, _>>()?;
    AspectDescriptor::new(target, pointcuts).map_err(invalid)
}

fn build_pointcut(entry: &PointcutEntry) -> Result<PointCut, ModelError> {
    let mut signature = MethodSignaturePattern::any()
        .with_kind(entry.kind)
        .with_depth(Depth::from(entry.depth));
    if let Some(method) = &entry.method {
        signature = signature.named(method);
    }
    if let Some(returns) = &entry.returns {
        signature = signature.returning(returns);
    }
    if let Some(params) = &entry.params {
        signature = signature.with_parameters(params);
    }
    if let Some(access) = &entry.access {
        signature = signature.with_access(access.iter().copied().collect::<AccessMask>());
    }
    PointCut::new(signature, entry.advices.iter().map(String::as_str))
}

fn build_advices(entries: &[AdviceEntry]) -> AdviceRegistry {
    let mut builder = AdviceRegistry::builder();
    for entry in entries {
        builder = match entry.kind.as_str() {
            "logging" => {
                let label = entry.label.clone().unwrap_or_else(|| entry.id.clone());
                builder.register(entry.id.as_str(), move || Ok(Arc::new(LoggingInterceptor::new(label.clone()))))
            },
            "deny" => {
                let reason = entry.reason.clone().unwrap_or_else(|| "denied".to_string());
                builder.register(entry.id.as_str(), move || Ok(Arc::new(DenyInterceptor::new(reason.clone()))))
            },
            other => {
                let kind = other.to_string();
                builder.register_shared(entry.id.as_str(), move || Err(format!("unknown advice kind '{kind}'")))
            },
        };
    }
    builder.build()
}
