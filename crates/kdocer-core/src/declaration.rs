//! Declaration descriptors: the structural input to skeleton generation.

/// A `fun` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    /// Value parameter names, in declaration order
    pub params: Vec<String>,
    /// Explicit, non-`Unit` return type present
    pub returns_value: bool,
}

/// A `class`, `interface` or `object` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Type parameter names, in declaration order
    pub type_params: Vec<String>,
}

/// A `val` / `var` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: String,
}

/// Every declaration kind a skeleton can be generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Function(FunctionDecl),
    Type(TypeDecl),
    Property(PropertyDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Function(f) => &f.name,
            Declaration::Type(t) => &t.name,
            Declaration::Property(p) => &p.name,
        }
    }

    /// Short kind label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Function(_) => "function",
            Declaration::Type(_) => "type",
            Declaration::Property(_) => "property",
        }
    }
}

/// What owns a doc block, as reported by a [`DeclarationIntrospector`].
///
/// [`DeclarationIntrospector`]: crate::controller::DeclarationIntrospector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Supported(Declaration),
    /// A declaration exists but no skeleton applies (`typealias`, `init`, ...)
    Unsupported { kind: String },
}
