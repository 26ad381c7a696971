//! Tag line formatting shared by every skeleton generator.

/// Line separator for generated blocks.
pub const LF: &str = "\n";

/// Parameter tag. Also reused for class type parameters.
pub const PARAM: &str = "@param";

/// Return value tag.
pub const RETURN: &str = "@return";

/// Build one `* {keyword} {name}` line per name, in order.
///
/// Names are used verbatim, never phrased. No trailing newline; an empty
/// sequence yields an empty string.
pub fn build_tag_lines<I, S>(keyword: &str, names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| format!("* {} {}", keyword, name.as_ref()))
        .collect::<Vec<_>>()
        .join(LF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_name() {
        assert_eq!(
            build_tag_lines(PARAM, ["a", "b"]),
            "* @param a\n* @param b"
        );
    }

    #[test]
    fn names_are_verbatim() {
        assert_eq!(build_tag_lines(PARAM, ["userName"]), "* @param userName");
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(build_tag_lines(PARAM, Vec::<String>::new()), "");
    }

    #[test]
    fn custom_keyword() {
        assert_eq!(build_tag_lines("@author", ["me"]), "* @author me");
    }
}
