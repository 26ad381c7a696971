//! Skeleton generators, one per declaration kind.
//!
//! Output is the body of a doc block: `* `-prefixed lines joined with `\n`,
//! summary first, then `@param` lines in declaration order, then `@return`.

use crate::declaration::{Declaration, FunctionDecl, PropertyDecl, TypeDecl};
use crate::phrase::to_phrase;
use crate::tags::{build_tag_lines, LF, PARAM, RETURN};

/// Produces the doc block body for a declaration.
pub trait SkeletonGenerator {
    fn generate(&self) -> String;
}

/// `* {phrase}`. Kept even when the phrase is empty so a block always opens
/// with exactly one summary line.
fn summary_line(name: &str) -> String {
    format!("* {}", to_phrase(name))
}

/// Append `section` as new lines unless it is empty.
fn push_section(out: &mut String, section: &str) {
    if !section.is_empty() {
        out.push_str(LF);
        out.push_str(section);
    }
}

impl SkeletonGenerator for FunctionDecl {
    fn generate(&self) -> String {
        let mut out = summary_line(&self.name);
        push_section(&mut out, &build_tag_lines(PARAM, &self.params));
        if self.returns_value {
            push_section(&mut out, &format!("* {}", RETURN));
        }
        out
    }
}

impl SkeletonGenerator for TypeDecl {
    fn generate(&self) -> String {
        let mut out = summary_line(&self.name);
        push_section(&mut out, &build_tag_lines(PARAM, &self.type_params));
        out
    }
}

impl SkeletonGenerator for PropertyDecl {
    fn generate(&self) -> String {
        summary_line(&self.name)
    }
}

impl SkeletonGenerator for Declaration {
    fn generate(&self) -> String {
        match self {
            Declaration::Function(f) => f.generate(),
            Declaration::Type(t) => t.generate(),
            Declaration::Property(p) => p.generate(),
        }
    }
}
