//! Read-only oracle facade over the symbol model.
//!
//! [`SemanticModel`] answers the queries the completion engine needs:
//! expression classification, enclosing-type lookup, base-chain walking with
//! generic substitution, accessibility, scope bindings, and type display.
//! One model is frozen per completion session; nothing here mutates after
//! construction.

use rustc_hash::FxHashMap;

use crate::model::{
    Assembly, AssemblyId, GenericOwner, Member, MemberId, NumericKind, SiteRelation, Subst, Ty,
    TypeDef, TypeId, TypeKind,
};
use crate::span::Span;

/// Defensive cap on base-chain walks; hierarchies are acyclic by language
/// rule but the model is caller-supplied.
const MAX_BASE_DEPTH: usize = 32;

/// Classification of a receiver expression's text.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprClass {
    /// A value expression with a resolvable type.
    Value(Ty),
    /// A type name (static access, never conversion completion).
    TypeName(TypeId),
    /// A namespace name.
    Namespace,
}

/// A name bound in some scope, visible throughout `extent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeBinding {
    pub name: String,
    pub extent: Span,
}

/// The position a completion runs from: its assembly and enclosing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub assembly: AssemblyId,
    pub enclosing_type: Option<TypeId>,
}

#[derive(Debug, Clone, Default)]
pub struct SemanticModel {
    assemblies: Vec<Assembly>,
    types: Vec<TypeDef>,
    members: Vec<Member>,
    current_assembly: AssemblyId,
    expr_classes: FxHashMap<String, ExprClass>,
    scopes: Vec<ScopeBinding>,
}

impl SemanticModel {
    /// A model with a single current assembly.
    pub fn new() -> Self {
        let mut model = Self::default();
        model.current_assembly = model.add_assembly("current");
        model
    }

    // ---- construction (tests and hosts populate the frozen model) ----

    pub fn add_assembly(&mut self, name: impl Into<String>) -> AssemblyId {
        self.assemblies.push(Assembly {
            name: name.into(),
            internals_visible_to: Vec::new(),
        });
        AssemblyId(self.assemblies.len() as u32 - 1)
    }

    pub fn grant_internals(&mut self, from: AssemblyId, to: AssemblyId) {
        if let Some(assembly) = self.assemblies.get_mut(from.0 as usize) {
            assembly.internals_visible_to.push(to);
        }
    }

    pub fn add_type(&mut self, def: TypeDef) -> TypeId {
        self.types.push(def);
        TypeId(self.types.len() as u32 - 1)
    }

    /// Swaps in a revised definition; used to wire base links after the
    /// referenced ids exist.
    pub fn replace_type(&mut self, id: TypeId, def: TypeDef) {
        if let Some(slot) = self.types.get_mut(id.0 as usize) {
            *slot = def;
        }
    }

    /// Adds a member and records it on its container.
    pub fn add_member(&mut self, member: Member) -> MemberId {
        let container = member.container;
        self.members.push(member);
        let id = MemberId(self.members.len() as u32 - 1);
        if let Some(def) = self.types.get_mut(container.0 as usize) {
            def.members.push(id);
        }
        id
    }

    /// Swaps in a revised member; used to wire constraints that reference
    /// the member's own id.
    pub fn replace_member(&mut self, id: MemberId, member: Member) {
        if let Some(slot) = self.members.get_mut(id.0 as usize) {
            *slot = member;
        }
    }

    pub fn classify(&mut self, expr: impl Into<String>, class: ExprClass) {
        self.expr_classes.insert(expr.into(), class);
    }

    pub fn bind_name(&mut self, name: impl Into<String>, extent: Span) {
        self.scopes.push(ScopeBinding {
            name: name.into(),
            extent,
        });
    }

    pub fn current_assembly(&self) -> AssemblyId {
        self.current_assembly
    }

    // ---- lookups ----

    pub fn type_def(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.0 as usize)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.types.len() as u32).map(TypeId)
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id.0 as usize)
    }

    pub fn assembly(&self, id: AssemblyId) -> Option<&Assembly> {
        self.assemblies.get(id.0 as usize)
    }

    pub fn direct_members(&self, id: TypeId) -> impl Iterator<Item = (MemberId, &Member)> {
        self.type_def(id)
            .map(|def| def.members.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|member_id| self.member(*member_id).map(|m| (*member_id, m)))
    }

    /// All static-class containers declaring extension methods, in id order.
    pub fn extension_containers(&self) -> Vec<TypeId> {
        (0..self.types.len() as u32)
            .map(TypeId)
            .filter(|id| {
                self.type_def(*id).is_some_and(TypeDef::is_static_class)
                    && self
                        .direct_members(*id)
                        .any(|(_, m)| m.modifiers.is_extension)
            })
            .collect()
    }

    /// Classifies a receiver expression by its trimmed source text.
    pub fn classify_expr(&self, text: &str) -> Option<&ExprClass> {
        self.expr_classes.get(text.trim())
    }

    /// Resolves a dotted type path (`Outer.Inner`, `Ns.Name`, simple name).
    pub fn resolve_type_path(&self, path: &str) -> Option<TypeId> {
        let path = path.trim();
        // Exact qualified or simple-name match first.
        for (idx, def) in self.types.iter().enumerate() {
            if self.qualified_name(TypeId(idx as u32)) == path || def.name == path {
                return Some(TypeId(idx as u32));
            }
        }
        // Nested path: resolve the head, then walk `containing` links.
        let mut segments = path.split('.');
        let head = segments.next()?;
        let mut current = self
            .types
            .iter()
            .position(|def| def.name == head)
            .map(|idx| TypeId(idx as u32))?;
        for segment in segments {
            current = (0..self.types.len() as u32).map(TypeId).find(|id| {
                self.type_def(*id)
                    .is_some_and(|def| def.containing == Some(current) && def.name == segment)
            })?;
        }
        Some(current)
    }

    /// Resolves a type reference's source text, including predefined-type
    /// keywords and `?`/`[]` suffixes, into a [`Ty`].
    pub fn resolve_type_text(&self, text: &str) -> Option<Ty> {
        let mut text = text.trim();
        let mut array = false;
        let mut nullable = false;
        while let Some(stripped) = text.strip_suffix("[]") {
            array = true;
            text = stripped.trim_end();
        }
        if let Some(stripped) = text.strip_suffix('?') {
            nullable = true;
            text = stripped.trim_end();
        }

        let core = NumericKind::ALL
            .into_iter()
            .find(|kind| kind.keyword() == text)
            .map(Ty::Numeric)
            .or_else(|| match text {
                "bool" => Some(Ty::Bool),
                "string" => Some(Ty::String),
                "object" => Some(Ty::Object),
                _ => None,
            })
            .or_else(|| self.resolve_type_path(text).map(Ty::named))?;

        let mut ty = core;
        if nullable {
            ty = Ty::nullable(ty);
        }
        if array {
            ty = Ty::array(ty);
        }
        Some(ty)
    }

    /// The innermost type whose declared body contains `offset`.
    pub fn enclosing_type_at(&self, offset: u32) -> Option<TypeId> {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, def)| def.body_span.is_some_and(|span| span.touches(offset)))
            .min_by_key(|(_, def)| def.body_span.map(|span| span.len()).unwrap_or(u32::MAX))
            .map(|(idx, _)| TypeId(idx as u32))
    }

    pub fn site_at(&self, offset: u32) -> Site {
        Site {
            assembly: self.current_assembly,
            enclosing_type: self.enclosing_type_at(offset),
        }
    }

    /// Names textually visible at `offset` under normal scoping rules.
    pub fn bindings_visible_at(&self, offset: u32) -> Vec<&str> {
        self.scopes
            .iter()
            .filter(|binding| binding.extent.touches(offset))
            .map(|binding| binding.name.as_str())
            .collect()
    }

    // ---- inheritance ----

    /// The type and its base classes, nearest first, each paired with the
    /// substitution rewriting that declaration's type parameters into the
    /// walk origin's type arguments.
    pub fn base_chain(&self, origin: TypeId) -> Vec<(TypeId, Subst)> {
        let mut chain = Vec::new();
        let mut current = Some((origin, Subst::identity()));

        while let Some((id, subst)) = current.take() {
            if chain.len() >= MAX_BASE_DEPTH {
                tracing::warn!(type_id = id.0, "base chain exceeds depth cap; truncating");
                break;
            }
            let Some(def) = self.type_def(id) else { break };
            chain.push((id, subst.clone()));

            if let Some(Ty::Named(base_id, args)) = &def.base {
                let next = Subst::for_args(GenericOwner::Type(*base_id), args, &subst);
                current = Some((*base_id, next));
            }
        }
        chain
    }

    pub fn type_param_name(&self, owner: GenericOwner, index: u32) -> Option<&str> {
        let params = match owner {
            GenericOwner::Type(id) => &self.type_def(id)?.type_params,
            GenericOwner::Member(id) => &self.member(id)?.type_params,
        };
        params.get(index as usize).map(|p| p.name.as_str())
    }

    pub fn type_param_constraints(&self, owner: GenericOwner, index: u32) -> &[Ty] {
        let params = match owner {
            GenericOwner::Type(id) => self.type_def(id).map(|def| &def.type_params),
            GenericOwner::Member(id) => self.member(id).map(|m| &m.type_params),
        };
        params
            .and_then(|params| params.get(index as usize))
            .map(|p| p.constraints.as_slice())
            .unwrap_or(&[])
    }

    /// The instantiated ancestors of `ty` (itself, base classes, and
    /// implemented interfaces), for structural supertype tests.
    pub fn ancestors(&self, ty: &Ty) -> Vec<Ty> {
        let Ty::Named(origin, args) = ty else {
            return vec![ty.clone()];
        };
        let origin_subst = Subst::for_args(GenericOwner::Type(*origin), args, &Subst::identity());

        let mut out = Vec::new();
        for (id, chain_subst) in self.base_chain(*origin) {
            let Some(def) = self.type_def(id) else { continue };
            let instantiated_args: Vec<Ty> = (0..def.type_params.len() as u32)
                .map(|i| {
                    let slot = Ty::Param(GenericOwner::Type(id), i);
                    origin_subst.apply(&chain_subst.apply(&slot))
                })
                .collect();
            out.push(Ty::Named(id, instantiated_args));
            for iface in &def.interfaces {
                out.push(origin_subst.apply(&chain_subst.apply(iface)));
            }
        }
        out
    }

    /// Structural enumerable test: arrays qualify; named types qualify when
    /// they (or a base) expose a zero-parameter, non-void
    /// enumerator-producing member or implement an enumerable-named
    /// interface. `string` deliberately does not qualify.
    pub fn is_collection_shaped(&self, ty: &Ty) -> bool {
        match ty {
            Ty::Array(_) => true,
            Ty::String => false,
            Ty::Nullable(inner) => self.is_collection_shaped(inner),
            Ty::Named(id, _) => self.base_chain(*id).iter().any(|(type_id, _)| {
                let Some(def) = self.type_def(*type_id) else {
                    return false;
                };
                let structural = self.direct_members(*type_id).any(|(_, m)| {
                    m.name == "GetEnumerator"
                        && m.params.is_empty()
                        && m.ret != Ty::Void
                        && !m.modifiers.is_static
                });
                let nominal = def.interfaces.iter().any(|iface| {
                    iface
                        .named_def()
                        .and_then(|iface_id| self.type_def(iface_id))
                        .is_some_and(|iface_def| iface_def.name.starts_with("IEnumerable"))
                });
                structural || nominal
            }),
            _ => false,
        }
    }

    // ---- accessibility ----

    pub fn relation(&self, site: Site, container: TypeId, declaring_assembly: AssemblyId) -> SiteRelation {
        // The site counts as inside the declaring type from the type itself
        // and from types derived from it (override sites in subclasses).
        if let Some(enclosing) = site.enclosing_type
            && self.base_chain(enclosing).iter().any(|(id, _)| *id == container)
        {
            return SiteRelation::InsideDeclaringType;
        }
        if site.assembly == declaring_assembly {
            return SiteRelation::SameAssembly;
        }
        let granted = self
            .assembly(declaring_assembly)
            .is_some_and(|assembly| assembly.internals_visible_to.contains(&site.assembly));
        if granted {
            return SiteRelation::GrantedAssembly;
        }
        SiteRelation::Elsewhere
    }

    pub fn accessible_from(&self, site: Site, member_id: MemberId) -> bool {
        let Some(member) = self.member(member_id) else {
            return false;
        };
        let Some(container) = self.type_def(member.container) else {
            return false;
        };
        member
            .accessibility
            .allows(self.relation(site, member.container, container.assembly))
    }

    pub fn type_accessible_from(&self, site: Site, id: TypeId) -> bool {
        let Some(def) = self.type_def(id) else {
            return false;
        };
        def.accessibility
            .allows(self.relation(site, id, def.assembly))
    }

    // ---- display ----

    pub fn qualified_name(&self, id: TypeId) -> String {
        let Some(def) = self.type_def(id) else {
            return String::new();
        };
        if let Some(containing) = def.containing {
            return format!("{}.{}", self.qualified_name(containing), def.name);
        }
        if def.namespace.is_empty() {
            def.name.clone()
        } else {
            format!("{}.{}", def.namespace, def.name)
        }
    }

    /// Minimal unambiguous spelling of a named type: the simple name unless
    /// another definition shares it.
    fn minimal_type_name(&self, id: TypeId) -> String {
        let Some(def) = self.type_def(id) else {
            return String::new();
        };
        let ambiguous = self
            .types
            .iter()
            .enumerate()
            .any(|(idx, other)| idx as u32 != id.0 && other.name == def.name);
        if ambiguous {
            self.qualified_name(id)
        } else {
            def.name.clone()
        }
    }

    /// Display text for a type using minimal qualification.
    pub fn display_ty(&self, ty: &Ty) -> String {
        match ty {
            Ty::Numeric(kind) => kind.keyword().to_string(),
            Ty::Bool => "bool".to_string(),
            Ty::String => "string".to_string(),
            Ty::Object => "object".to_string(),
            Ty::Void => "void".to_string(),
            Ty::Unknown => "?".to_string(),
            Ty::Nullable(inner) => format!("{}?", self.display_ty(inner)),
            Ty::Array(element) => format!("{}[]", self.display_ty(element)),
            Ty::Param(owner, index) => self
                .type_param_name(*owner, *index)
                .unwrap_or("?")
                .to_string(),
            Ty::Named(id, args) => {
                let name = self.minimal_type_name(*id);
                if args.is_empty() {
                    name
                } else {
                    let rendered: Vec<String> =
                        args.iter().map(|arg| self.display_ty(arg)).collect();
                    format!("{}<{}>", name, rendered.join(", "))
                }
            }
        }
    }

    /// True when `ty` is (or wraps) a value type, for nullable lifting.
    pub fn is_value_ty(&self, ty: &Ty) -> bool {
        match ty {
            Ty::Numeric(_) | Ty::Bool => true,
            Ty::Named(id, _) => self.type_def(*id).is_some_and(TypeDef::is_value_type),
            Ty::Nullable(_) => false,
            _ => false,
        }
    }

    /// The underlying integral kind when `ty` is an enum.
    pub fn enum_underlying(&self, ty: &Ty) -> Option<NumericKind> {
        let id = ty.named_def()?;
        match &self.type_def(id)?.kind {
            TypeKind::Enum { underlying } => Some(*underlying),
            _ => None,
        }
    }
}
