//! Candidate resolution: one pure resolver per completion kind, dispatched
//! from a closed table keyed by the detected context, all reading the same
//! frozen snapshot.

use std::panic::{AssertUnwindSafe, catch_unwind};

use rayon::prelude::*;
use semantics::{MemberId, SemanticModel, Site, Subst, SymbolKind, Ty, TypeId};

use crate::CompletionConfig;
use crate::cancel::CancellationToken;
use crate::context::{AnalyzedContext, ContextKind};

mod conversion;
mod explicit_interface;
mod extension;
mod initializer;
mod naming;
mod overrides;

/// Tag identifying how a candidate was produced; drives category, sort
/// grouping, and commit synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateTag {
    UserConversion,
    LiftedConversion,
    NumericConversion,
    EnumConversion,
    Override,
    ExplicitInterfaceMember,
    ExtensionMethod,
    InitializerMember,
    NameSuggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    User,
    Numeric,
    Enum,
}

#[derive(Debug, Clone)]
pub struct ConversionCandidate {
    pub kind: ConversionKind,
    pub lifted: bool,
    pub source: Ty,
    pub target: Ty,
    /// Backing operator for user-defined conversions.
    pub member: Option<MemberId>,
}

#[derive(Debug, Clone)]
pub struct OverrideCandidate {
    pub member: MemberId,
    /// Nearest declaring type in the base chain.
    pub declaring: TypeId,
    /// Rewrites the declaring type's parameters into the current type's.
    pub subst: Subst,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct ExplicitImplCandidate {
    pub member: MemberId,
    pub interface: TypeId,
}

#[derive(Debug, Clone)]
pub struct ExtensionCandidate {
    pub member: MemberId,
    pub container: TypeId,
    /// Namespace to import on commit when the container is not in scope.
    pub requires_import: Option<String>,
    /// Additional same-signature overloads collapsed into this item.
    pub extra_overloads: usize,
}

#[derive(Debug, Clone)]
pub struct InitializerCandidate {
    pub member: MemberId,
}

#[derive(Debug, Clone)]
pub struct NameCandidate {
    pub text: String,
    pub symbol_kind: SymbolKind,
}

/// A resolved completion candidate: the originating symbol (if any) plus
/// kind-specific metadata.
#[derive(Debug, Clone)]
pub enum SymbolCandidate {
    Conversion(ConversionCandidate),
    Override(OverrideCandidate),
    ExplicitInterface(ExplicitImplCandidate),
    Extension(ExtensionCandidate),
    Initializer(InitializerCandidate),
    Name(NameCandidate),
}

impl SymbolCandidate {
    pub fn tag(&self) -> CandidateTag {
        match self {
            SymbolCandidate::Conversion(c) => match (c.kind, c.lifted) {
                (ConversionKind::User, true) => CandidateTag::LiftedConversion,
                (ConversionKind::User, false) => CandidateTag::UserConversion,
                (ConversionKind::Numeric, _) => CandidateTag::NumericConversion,
                (ConversionKind::Enum, _) => CandidateTag::EnumConversion,
            },
            SymbolCandidate::Override(_) => CandidateTag::Override,
            SymbolCandidate::ExplicitInterface(_) => CandidateTag::ExplicitInterfaceMember,
            SymbolCandidate::Extension(_) => CandidateTag::ExtensionMethod,
            SymbolCandidate::Initializer(_) => CandidateTag::InitializerMember,
            SymbolCandidate::Name(_) => CandidateTag::NameSuggestion,
        }
    }

    /// The backing member, for accessibility and browsability filtering.
    pub fn member(&self) -> Option<MemberId> {
        match self {
            SymbolCandidate::Conversion(c) => c.member,
            SymbolCandidate::Override(c) => Some(c.member),
            SymbolCandidate::ExplicitInterface(c) => Some(c.member),
            SymbolCandidate::Extension(c) => Some(c.member),
            SymbolCandidate::Initializer(c) => Some(c.member),
            SymbolCandidate::Name(_) => None,
        }
    }
}

/// Everything a resolver may read; shared by all resolvers of one session.
pub(crate) struct ResolveInput<'a> {
    pub cursor: u32,
    pub ctx: &'a AnalyzedContext,
    pub model: &'a SemanticModel,
    pub config: &'a CompletionConfig,
    pub site: Site,
    pub cancel: &'a CancellationToken,
}

type Resolver = fn(&ResolveInput<'_>) -> Vec<SymbolCandidate>;

/// Closed dispatch table: which resolvers run for which context.
fn resolvers_for(kind: &ContextKind) -> &'static [(&'static str, Resolver)] {
    match kind {
        ContextKind::MemberAccess(_) => &[
            ("conversion", conversion::resolve),
            ("extension", extension::resolve),
        ],
        ContextKind::OverrideDecl(_) => &[("override", overrides::resolve)],
        ContextKind::ExplicitInterface(_) => &[("explicit-interface", explicit_interface::resolve)],
        ContextKind::InitializerMember(_) => &[("initializer", initializer::resolve)],
        ContextKind::DeclarationName(_) => &[("name-suggestion", naming::resolve)],
        ContextKind::None => &[],
    }
}

/// Runs every applicable resolver concurrently against the frozen snapshot
/// and concatenates their outputs in table order, so the result is
/// deterministic regardless of scheduling.
pub(crate) fn run_resolvers(input: &ResolveInput<'_>) -> Vec<SymbolCandidate> {
    let table = resolvers_for(&input.ctx.kind);

    let per_resolver: Vec<Vec<SymbolCandidate>> = table
        .par_iter()
        .map(|(name, resolver)| {
            if input.cancel.is_cancelled() {
                return Vec::new();
            }
            // A failing resolver degrades to empty; siblings are unaffected.
            match catch_unwind(AssertUnwindSafe(|| resolver(input))) {
                Ok(candidates) => {
                    tracing::debug!(resolver = *name, count = candidates.len(), "resolved");
                    candidates
                }
                Err(_) => {
                    tracing::warn!(resolver = *name, "resolver panicked; dropping its candidates");
                    Vec::new()
                }
            }
        })
        .collect();

    per_resolver.into_iter().flatten().collect()
}
