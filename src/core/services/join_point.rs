//! Join-point matcher - evaluates pointcuts against a type's methods
//!
//! Pure logic: enumerate the candidate methods of a component once, then
//! pair every candidate with every pointcut whose signature matches it.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use log::debug;

use super::signature::matches_at_level;
use crate::core::models::{MethodDescriptor, MethodIdentity, PointCut, TypeDescriptor};

/// An interceptable method and its distance from the implementation type
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// The method
    pub method: &'a MethodDescriptor,
    /// Hierarchy level of the declaring type: 0 for the implementation,
    /// 1 for its base, direct interfaces and exposed contracts, and so on
    pub level: u32,
}

impl Candidate<'_> {
    /// Identity of the method
    #[must_use]
    pub fn identity(&self) -> MethodIdentity {
        self.method.identity()
    }
}

/// A method together with every pointcut that matched it
#[derive(Debug, Clone)]
pub struct JoinPoint<'a> {
    /// The matched method
    pub method: &'a MethodDescriptor,
    /// Matching pointcuts, in the order they were supplied
    pub pointcuts: Vec<&'a PointCut>,
}

impl JoinPoint<'_> {
    /// Identity of the matched method
    #[must_use]
    pub fn identity(&self) -> MethodIdentity {
        self.method.identity()
    }
}

/// Collect the interceptable methods of a component
///
/// Enumeration order, with the first declaration of each
/// [`MethodIdentity`] kept:
///
/// 1. methods declared on the implementation type
/// 2. methods of each base type, nearest first
/// 3. methods of every interface in the hierarchy, breadth first
/// 4. methods of every exposed contract and its super-interfaces
///
/// Each candidate carries the shortest distance to its declaring type,
/// counting an exposed contract as one level away. Private and internal
/// methods are never candidates.
#[must_use]
pub fn candidate_methods<'a>(
    implementation: &'a TypeDescriptor,
    contracts: &'a [Arc<TypeDescriptor>],
) -> Vec<Candidate<'a>> {
    let mut types: Vec<&'a TypeDescriptor> = Vec::new();

    let mut current = Some(implementation);
    while let Some(ty) = current {
        types.push(ty);
        current = ty.base();
    }

    let mut queue: VecDeque<&'a TypeDescriptor> = types
        .iter()
        .flat_map(|&ty| ty.interfaces().iter().map(|i| &**i))
        .chain(contracts.iter().map(|c| &**c))
        .collect();
    let mut visited: HashSet<&str> = types.iter().map(|&ty| ty.full_name()).collect();
    while let Some(interface) = queue.pop_front() {
        if !visited.insert(interface.full_name()) {
            continue;
        }
        types.push(interface);
        queue.extend(interface.interfaces().iter().map(|i| &**i));
    }

    let levels = hierarchy_levels(implementation, contracts);
    let mut seen: HashSet<MethodIdentity> = HashSet::new();
    types
        .into_iter()
        .flat_map(|ty| {
            let level = levels.get(ty.full_name()).copied().unwrap_or_default();
            ty.methods().iter().map(move |method| Candidate { method, level })
        })
        .filter(|c| c.method.access.is_interceptable())
        .filter(|c| seen.insert(c.identity()))
        .collect()
}

/// Shortest distance from the implementation to every type it reaches
fn hierarchy_levels<'a>(
    implementation: &'a TypeDescriptor,
    contracts: &'a [Arc<TypeDescriptor>],
) -> HashMap<&'a str, u32> {
    let mut levels: HashMap<&'a str, u32> = HashMap::new();
    let mut queue: VecDeque<(&'a TypeDescriptor, u32)> = std::iter::once((implementation, 0))
        .chain(contracts.iter().map(|c| (&**c, 1)))
        .collect();
    while let Some((ty, level)) = queue.pop_front() {
        let Entry::Vacant(slot) = levels.entry(ty.full_name()) else {
            continue;
        };
        slot.insert(level);
        if let Some(base) = ty.base() {
            queue.push_back((base, level + 1));
        }
        queue.extend(ty.interfaces().iter().map(|i| (&**i, level + 1)));
    }
    levels
}

/// Match pointcuts against candidate methods
///
/// Returns one [`JoinPoint`] per candidate matched by at least one pointcut,
/// carrying every matching pointcut. Result order follows candidate order.
#[must_use]
pub fn match_join_points<'a>(
    implementation: &TypeDescriptor,
    candidates: &[Candidate<'a>],
    pointcuts: &[&'a PointCut],
) -> Vec<JoinPoint<'a>> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let matched: Vec<&'a PointCut> = pointcuts
                .iter()
                .copied()
                .filter(|pc| matches_at_level(pc.signature(), candidate.method, Some(candidate.level)))
                .collect();
            if matched.is_empty() {
                None
            } else {
                debug!(
                    "{}::{} matched {} pointcut(s)",
                    implementation.full_name(),
                    candidate.identity(),
                    matched.len()
                );
                Some(JoinPoint {
                    method: candidate.method,
                    pointcuts: matched,
                })
            }
        })
        .collect()
}
