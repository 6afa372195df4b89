//! Business logic services
//!
//! Pure orchestration logic over the domain models. Nothing here performs
//! I/O; every service operates on data passed in and returns results.
//!
//! - [`signature`] - match one signature pattern against one method
//! - [`join_point`] - enumerate candidate methods and pair them with pointcuts
//! - [`aspect_matcher`] - select the aspects that apply to a type
//! - [`chain_builder`] - resolve advice and commit interceptor chains
//! - [`registrar`] - the per-component registration entry point
//! - [`dispatch`] - run chains around real calls after bootstrap

pub mod aspect_matcher;
pub mod chain_builder;
pub mod dispatch;
pub mod join_point;
pub mod registrar;
pub mod signature;

pub use aspect_matcher::{distinct_pointcuts, match_aspects};
pub use chain_builder::{AdviceCache, ChainBuildOutcome, build_chains};
pub use dispatch::{Dispatcher, FrozenInterceptors, invoke_chain};
pub use join_point::{Candidate, JoinPoint, candidate_methods, match_join_points};
pub use registrar::AopRegistrar;
pub use signature::{matches_at_level, matches_signature};
