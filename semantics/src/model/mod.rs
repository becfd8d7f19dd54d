//! Symbol and type model consumed by the completion engine.
//!
//! Everything here is a frozen, read-only description of a compilation:
//! assemblies, type definitions, members, and their signatures. The engine
//! never mutates the model; one model instance outlives many completion
//! sessions.

use serde::{Deserialize, Serialize};

use crate::span::Span;

pub mod conversions;
pub mod naming;
mod types;

pub use types::{GenericOwner, NumericKind, Subst, Ty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssemblyId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub name: String,
    /// Assemblies granted access to this assembly's internal members.
    pub internals_visible_to: Vec<AssemblyId>,
}

/// Declared accessibility of a member or type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

/// Where a completion site stands relative to a member's declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteRelation {
    InsideDeclaringType,
    SameAssembly,
    GrantedAssembly,
    Elsewhere,
}

/// Declarative accessibility rule table: which site relations may see a
/// member of the given declared accessibility.
const ACCESS_RULES: &[(Accessibility, &[SiteRelation])] = &[
    (
        Accessibility::Public,
        &[
            SiteRelation::InsideDeclaringType,
            SiteRelation::SameAssembly,
            SiteRelation::GrantedAssembly,
            SiteRelation::Elsewhere,
        ],
    ),
    (
        Accessibility::Internal,
        &[
            SiteRelation::InsideDeclaringType,
            SiteRelation::SameAssembly,
            SiteRelation::GrantedAssembly,
        ],
    ),
    (
        Accessibility::ProtectedInternal,
        &[
            SiteRelation::InsideDeclaringType,
            SiteRelation::SameAssembly,
            SiteRelation::GrantedAssembly,
        ],
    ),
    (Accessibility::Protected, &[SiteRelation::InsideDeclaringType]),
    (
        Accessibility::PrivateProtected,
        &[SiteRelation::InsideDeclaringType],
    ),
    (Accessibility::Private, &[SiteRelation::InsideDeclaringType]),
];

/// Modifier keyword table for stub synthesis; order is emission order.
const ACCESS_KEYWORDS: &[(Accessibility, &[&str])] = &[
    (Accessibility::Public, &["public"]),
    (Accessibility::Internal, &["internal"]),
    (Accessibility::Protected, &["protected"]),
    (Accessibility::ProtectedInternal, &["protected", "internal"]),
    (Accessibility::PrivateProtected, &["private", "protected"]),
    (Accessibility::Private, &["private"]),
];

impl Accessibility {
    pub fn allows(self, relation: SiteRelation) -> bool {
        ACCESS_RULES
            .iter()
            .find(|(access, _)| *access == self)
            .is_some_and(|(_, relations)| relations.contains(&relation))
    }

    /// The modifier keywords that spell this accessibility in source.
    pub fn keywords(self) -> &'static [&'static str] {
        ACCESS_KEYWORDS
            .iter()
            .find(|(access, _)| *access == self)
            .map(|(_, words)| *words)
            .unwrap_or(&[])
    }
}

/// Editor-visibility attribute on a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Browsability {
    #[default]
    Always,
    Never,
    Advanced,
}

/// Declaration-site symbol kinds used by naming styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SymbolKind {
    Field,
    Property,
    Parameter,
    Local,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TypeKind {
    Class { is_sealed: bool, is_static: bool },
    Struct,
    Interface,
    Enum { underlying: NumericKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDef {
    pub name: String,
    /// Constraint types; a `Param` constraint chains to another parameter.
    pub constraints: Vec<Ty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    /// Dotted namespace, empty for the global namespace.
    pub namespace: String,
    pub assembly: AssemblyId,
    pub accessibility: Accessibility,
    pub kind: TypeKind,
    pub type_params: Vec<TypeParamDef>,
    /// Base class as an instantiated reference, `None` for roots/interfaces.
    pub base: Option<Ty>,
    pub interfaces: Vec<Ty>,
    pub members: Vec<MemberId>,
    /// Lexical container for nested types (nested interface qualifiers).
    pub containing: Option<TypeId>,
    /// Body span when the type is declared in the current file.
    pub body_span: Option<Span>,
}

impl TypeDef {
    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    pub fn is_static_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class { is_static: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MemberKind {
    Method,
    Property { has_getter: bool, has_setter: bool },
    Indexer { has_getter: bool, has_setter: bool },
    Event,
    Field { is_readonly: bool },
    Constructor,
    Conversion { implicit: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_abstract: bool,
    pub is_override: bool,
    pub is_sealed: bool,
    pub is_required: bool,
    pub is_extension: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
    /// Attribute types applied to the parameter; dropped from synthesized
    /// stubs when inaccessible from the implementing site.
    pub attrs: Vec<TypeId>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            attrs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub container: TypeId,
    pub kind: MemberKind,
    pub accessibility: Accessibility,
    pub modifiers: Modifiers,
    pub browsability: Browsability,
    pub type_params: Vec<TypeParamDef>,
    pub params: Vec<Param>,
    /// Return type; property/field type; conversion target.
    pub ret: Ty,
    /// Set on accessor methods to the property/event that owns them.
    pub associated_with: Option<MemberId>,
    pub doc: Option<String>,
}

impl Member {
    /// True for members the override walk may offer: instance virtual,
    /// abstract, or an unsealed override.
    pub fn is_overridable(&self) -> bool {
        if self.modifiers.is_static || self.modifiers.is_sealed {
            return false;
        }
        self.modifiers.is_virtual || self.modifiers.is_abstract || self.modifiers.is_override
    }

    /// True for well-shaped conversion operators: static, one parameter,
    /// non-void result. Anything else merely resembles the operator pattern.
    pub fn is_well_shaped_conversion(&self) -> bool {
        matches!(self.kind, MemberKind::Conversion { .. })
            && self.modifiers.is_static
            && self.params.len() == 1
            && self.ret != Ty::Void
    }
}
