//! Kotlin declaration introspection.
//!
//! Resolves the declaration a doc comment documents by reading the header
//! that follows it, without a full parse:
//! - annotations (`@Deprecated("x")`, `@file:JvmName(...)`) and comments are skipped
//! - the header ends at the first top-level `{`, `=`, `;`, `}`, or at a
//!   top-level line break once a declaration keyword was seen
//! - `fun` → name, value parameter names, non-`Unit` return type
//! - `class` / `interface` / `object` → name, type parameter names
//! - `val` / `var` → name

use kdocer_core::{
    Declaration, DeclarationIntrospector, DocSpan, FunctionDecl, Owner, PropertyDecl, TypeDecl,
};
use regex::Regex;
use std::sync::LazyLock;

/// Modifiers, then the declaration keyword.
static RE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<mods>(?:[a-z]+\s+)*?)",
        r"(?P<kw>fun\s+interface|fun|class|interface|object|val|var",
        r"|typealias|constructor|init)\b\s*",
    ))
    .unwrap()
});

static RE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(fun|class|interface|object|val|var|typealias|constructor|init)\b").unwrap()
});

/// Leading identifier or backtick-quoted name.
static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:`([^`]*)`|([\p{L}\p{N}_]+))").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct KotlinIntrospector;

impl DeclarationIntrospector for KotlinIntrospector {
    fn owner(&self, text: &str, span: DocSpan) -> Option<Owner> {
        let header = read_header(text.get(span.end..)?);
        classify(&header)
    }
}

/// Collect the declaration header that starts in `src`, annotations and
/// comments removed.
pub fn read_header(src: &str) -> String {
    let mut out = String::new();
    let mut stack: Vec<char> = Vec::new();
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '@' => {
                skip_annotation(&mut chars);
                out.push(' ');
                continue;
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
                continue;
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
                out.push(' ');
                continue;
            }
            '"' | '\'' => {
                out.push(c);
                while let Some(n) = chars.next() {
                    out.push(n);
                    if n == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if n == c {
                        break;
                    }
                }
                continue;
            }
            '-' if chars.peek() == Some(&'>') => {
                chars.next();
                out.push_str("->");
                continue;
            }
            '{' | '}' | '=' | ';' if stack.is_empty() => break,
            '\n' if stack.is_empty() && RE_KEYWORD.is_match(&out) => break,
            '(' | '[' | '{' | '<' => stack.push(c),
            ')' | ']' | '}' => {
                let open = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                while let Some(top) = stack.pop() {
                    if top == open {
                        break;
                    }
                }
            }
            '>' if stack.last() == Some(&'<') => {
                stack.pop();
            }
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Skip an annotation's name (`Foo`, `a.b.Foo`, `get:Foo`) and its
/// argument list, if any.
fn skip_annotation<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) {
    while chars
        .peek()
        .is_some_and(|&c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':'))
    {
        chars.next();
    }
    if chars.peek() != Some(&'(') {
        return;
    }
    let mut depth = 0;
    for c in chars.by_ref() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
}

/// Decide what a header declares.
pub fn classify(header: &str) -> Option<Owner> {
    let header = header.split_whitespace().collect::<Vec<_>>().join(" ");
    let caps = RE_DECL.captures(&header)?;
    let mods = caps.name("mods").map_or("", |m| m.as_str());
    let keyword = caps.name("kw").map_or("", |m| m.as_str());
    let rest = &header[caps.get(0).map_or(0, |m| m.end())..];

    let declaration = match keyword {
        "fun" => Declaration::Function(parse_function(rest)),
        "val" | "var" => Declaration::Property(parse_property(rest)?),
        "object" => {
            let default = if mods.split_whitespace().any(|m| m == "companion") {
                "Companion"
            } else {
                ""
            };
            Declaration::Type(parse_type(rest, default))
        }
        "typealias" | "constructor" | "init" => {
            return Some(Owner::Unsupported {
                kind: keyword.to_string(),
            })
        }
        // class, interface, fun interface
        _ => Declaration::Type(parse_type(rest, "")),
    };
    Some(Owner::Supported(declaration))
}

fn parse_function(s: &str) -> FunctionDecl {
    let s = skip_type_params(s);
    let (head, rest) = match find_top_level(s, '(') {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    };

    let (params, tail) = match group_end(rest, '(', ')') {
        Some(end) => (
            split_top_level(&rest[1..end - 1])
                .into_iter()
                .map(declared_name)
                .collect(),
            &rest[end..],
        ),
        None => (Vec::new(), ""),
    };

    let returns_value = tail
        .trim_start()
        .strip_prefix(':')
        .map(|t| t.split(" where ").next().unwrap_or(t).trim())
        .is_some_and(|t| !t.is_empty() && t != "Unit");

    FunctionDecl {
        name: simple_name(head),
        params,
        returns_value,
    }
}

fn parse_type(s: &str, default_name: &str) -> TypeDecl {
    let (name, rest) = match RE_NAME.captures(s) {
        Some(caps) => {
            let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            (name, s[caps.get(0).map_or(0, |m| m.end())..].trim_start())
        }
        None => ("", s),
    };

    let type_params = match group_end(rest, '<', '>') {
        Some(end) if rest.starts_with('<') => split_top_level(&rest[1..end - 1])
            .into_iter()
            .map(declared_name)
            .collect(),
        _ => Vec::new(),
    };

    let name = if name.is_empty() { default_name } else { name };
    TypeDecl {
        name: name.to_string(),
        type_params,
    }
}

/// `None` for destructuring declarations, which have no single name.
fn parse_property(s: &str) -> Option<PropertyDecl> {
    let s = skip_type_params(s);
    if s.starts_with('(') {
        return None;
    }
    let head = match find_top_level(s, ':') {
        Some(i) => &s[..i],
        None => s,
    };
    // `val x by lazy`, `val x get() = ...`
    let head = match find_top_level(head.trim(), ' ') {
        Some(i) => &head.trim()[..i],
        None => head,
    };
    Some(PropertyDecl {
        name: simple_name(head),
    })
}

/// Drop a leading `<...>` type parameter list.
fn skip_type_params(s: &str) -> &str {
    let s = s.trim_start();
    if s.starts_with('<') {
        if let Some(end) = group_end(s, '<', '>') {
            return s[end..].trim_start();
        }
    }
    s
}

/// Name from a possibly receiver-qualified head: `List<T>.second` → `second`.
fn simple_name(head: &str) -> String {
    let head = head.trim();
    if let Some(inner) = head.strip_suffix('`') {
        if let Some(open) = inner.rfind('`') {
            return inner[open + 1..].to_string();
        }
    }
    let mut depth = 0i32;
    let mut last_dot = None;
    let mut prev = '\0';
    for (i, c) in head.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            ')' => depth -= 1,
            '>' if prev != '-' => depth -= 1,
            '.' if depth == 0 => last_dot = Some(i),
            _ => {}
        }
        prev = c;
    }
    match last_dot {
        Some(i) => head[i + 1..].trim().to_string(),
        None => head.to_string(),
    }
}

/// Name of a parameter or type parameter: the last word before `:`, so
/// `vararg items: Int` → `items`, `out T : Any` → `T`.
fn declared_name(decl: &str) -> String {
    let before = decl.split_once(':').map_or(decl, |(b, _)| b).trim();
    if let Some(inner) = before.strip_suffix('`') {
        if let Some(open) = inner.rfind('`') {
            return inner[open + 1..].to_string();
        }
    }
    before
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .to_string()
}

/// Char indices of `s` outside string, char and backtick literals.
fn code_chars(s: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    s.char_indices().filter(move |&(_, c)| {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' && q != '`' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            return false;
        }
        if matches!(c, '"' | '\'' | '`') {
            quote = Some(c);
            return false;
        }
        true
    })
}

/// Position of `target` outside any `<...>` or `(...)` group.
fn find_top_level(s: &str, target: char) -> Option<usize> {
    let mut depth = 0i32;
    let mut prev = '\0';
    for (i, c) in code_chars(s) {
        if c == target && depth == 0 {
            return Some(i);
        }
        match c {
            '<' | '(' => depth += 1,
            ')' => depth -= 1,
            '>' if prev != '-' => depth -= 1,
            _ => {}
        }
        prev = c;
    }
    None
}

/// Byte index just past the group opened by the first char of `s`.
fn group_end(s: &str, open: char, close: char) -> Option<usize> {
    if !s.starts_with(open) {
        return None;
    }
    let mut depth = 0i32;
    let mut prev = '\0';
    for (i, c) in code_chars(s) {
        if c == open {
            depth += 1;
        } else if c == close && !(close == '>' && prev == '-') {
            depth -= 1;
            if depth == 0 {
                return Some(i + c.len_utf8());
            }
        }
        prev = c;
    }
    None
}

/// Split on commas that are not nested in brackets.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut prev = '\0';
    for (i, c) in code_chars(s) {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '>' if prev != '-' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&s[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
