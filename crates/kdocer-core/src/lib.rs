//! KDoc skeleton generation.
//!
//! Given a declaration's name and shape, produce the body of its
//! documentation comment:
//!
//! ```
//! use kdocer_core::{Declaration, FunctionDecl, SkeletonGenerator};
//!
//! let decl = Declaration::Function(FunctionDecl {
//!     name: "calculateTotal".to_string(),
//!     params: vec!["a".to_string(), "b".to_string()],
//!     returns_value: true,
//! });
//! assert_eq!(
//!     decl.generate(),
//!     "* Calculate total\n* @param a\n* @param b\n* @return"
//! );
//! ```
//!
//! [`controller::EnterHandler`] wires generation into an editor's Enter key
//! through [`TextBuffer`] and a language-specific
//! [`controller::DeclarationIntrospector`].

pub mod block;
pub mod buffer;
pub mod controller;
pub mod declaration;
pub mod error;
pub mod generator;
pub mod phrase;
pub mod rewrite;
pub mod tags;

pub use block::DocumentationBlock;
pub use buffer::{TextBuffer, WriteTransaction};
pub use controller::{Applied, DeclarationIntrospector, EnterHandler, EnterSettings, Outcome};
pub use declaration::{Declaration, FunctionDecl, Owner, PropertyDecl, TypeDecl};
pub use error::{EditError, PassThrough};
pub use generator::SkeletonGenerator;
pub use phrase::to_phrase;
pub use rewrite::{DocBlockRewriter, DocSpan, IndentingRewriter};
