//! Type shapes: built-in scalars, named types, generics, nullable and array
//! wrappers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{MemberId, TypeId};

/// The built-in numeric scalar kinds participating in conversion completion:
/// signed/unsigned integrals of four sizes plus `char`, `float`, `double`,
/// and `decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NumericKind {
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Char,
    Float,
    Double,
    Decimal,
}

impl NumericKind {
    pub const ALL: [NumericKind; 12] = [
        NumericKind::SByte,
        NumericKind::Byte,
        NumericKind::Short,
        NumericKind::UShort,
        NumericKind::Int,
        NumericKind::UInt,
        NumericKind::Long,
        NumericKind::ULong,
        NumericKind::Char,
        NumericKind::Float,
        NumericKind::Double,
        NumericKind::Decimal,
    ];

    /// The language keyword spelling used for display text.
    pub fn keyword(self) -> &'static str {
        match self {
            NumericKind::SByte => "sbyte",
            NumericKind::Byte => "byte",
            NumericKind::Short => "short",
            NumericKind::UShort => "ushort",
            NumericKind::Int => "int",
            NumericKind::UInt => "uint",
            NumericKind::Long => "long",
            NumericKind::ULong => "ulong",
            NumericKind::Char => "char",
            NumericKind::Float => "float",
            NumericKind::Double => "double",
            NumericKind::Decimal => "decimal",
        }
    }

    pub fn is_integral(self) -> bool {
        !matches!(
            self,
            NumericKind::Float | NumericKind::Double | NumericKind::Decimal
        )
    }
}

/// Owner of a type-parameter slot: a generic type or a generic method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GenericOwner {
    Type(TypeId),
    Member(MemberId),
}

/// A type reference. Named types carry their type arguments; open generics
/// reference their parameters through `Param`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Ty {
    Numeric(NumericKind),
    Bool,
    String,
    Object,
    Void,
    Named(TypeId, Vec<Ty>),
    Param(GenericOwner, u32),
    Nullable(Box<Ty>),
    Array(Box<Ty>),
    Unknown,
}

impl Ty {
    pub fn named(id: TypeId) -> Self {
        Ty::Named(id, Vec::new())
    }

    pub fn nullable(inner: Ty) -> Self {
        Ty::Nullable(Box::new(inner))
    }

    pub fn array(element: Ty) -> Self {
        Ty::Array(Box::new(element))
    }

    /// The named definition this type refers to, through nullable wrappers.
    pub fn named_def(&self) -> Option<TypeId> {
        match self {
            Ty::Named(id, _) => Some(*id),
            Ty::Nullable(inner) => inner.named_def(),
            _ => None,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Ty::Nullable(_))
    }
}

/// Substitution of type parameters by concrete types.
///
/// Keys are `(owner, index)` slots; composing along a base chain rewrites the
/// values of the outer substitution through the inner one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subst {
    map: FxHashMap<(GenericOwner, u32), Ty>,
}

impl Subst {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, owner: GenericOwner, index: u32, ty: Ty) {
        self.map.insert((owner, index), ty);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn lookup(&self, owner: GenericOwner, index: u32) -> Option<&Ty> {
        self.map.get(&(owner, index))
    }

    /// Applies the substitution to `ty`, leaving unmapped parameters as-is.
    pub fn apply(&self, ty: &Ty) -> Ty {
        match ty {
            Ty::Param(owner, index) => self
                .lookup(*owner, *index)
                .cloned()
                .unwrap_or_else(|| ty.clone()),
            Ty::Named(id, args) => {
                Ty::Named(*id, args.iter().map(|arg| self.apply(arg)).collect())
            }
            Ty::Nullable(inner) => Ty::nullable(self.apply(inner)),
            Ty::Array(element) => Ty::array(self.apply(element)),
            other => other.clone(),
        }
    }

    /// Builds the substitution mapping `owner`'s parameter slots to `args`,
    /// rewriting each argument through `outer` first.
    pub fn for_args(owner: GenericOwner, args: &[Ty], outer: &Subst) -> Self {
        let mut subst = Subst::identity();
        for (index, arg) in args.iter().enumerate() {
            subst.insert(owner, index as u32, outer.apply(arg));
        }
        subst
    }
}
