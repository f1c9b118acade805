//! Utility functions for LaTeX to HTML conversion
//!
//! This module contains pure utility functions that don't depend on converter state.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STRUCTURAL_MARKER_RE: Regex = Regex::new(r"\\(?:begin\{|end\{|item\b)").unwrap();
}

// =============================================================================
// Line Splitting
// =============================================================================

/// Split a document into trimmed, non-empty logical lines.
///
/// Comments are removed first. A `\begin{`, `\end{` or `\item` that does not
/// start its physical line starts a new logical line, so a whole list written
/// on one line still goes through the state machine item by item.
pub fn split_lines(input: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in input.lines() {
        let raw = strip_comment(raw);
        let mut start = 0;
        for m in STRUCTURAL_MARKER_RE.find_iter(raw) {
            let pos = m.start();
            if pos == 0 || raw[..pos].ends_with('\\') {
                continue;
            }
            push_trimmed(&mut lines, &raw[start..pos]);
            start = pos;
        }
        push_trimmed(&mut lines, &raw[start..]);
    }
    lines
}

fn push_trimmed(lines: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        lines.push(segment.to_string());
    }
}

/// Commands whose braced argument is a URL, where `%` is literal
const URL_COMMANDS: &[&str] = &["\\url", "\\href"];

/// Cut a line at its first unescaped `%`.
///
/// A `%` inside the URL argument of `\url{..}` or `\href{..}{..}` is kept.
pub fn strip_comment(line: &str) -> &str {
    let mut i = 0;
    while let Some(ch) = line[i..].chars().next() {
        match ch {
            '%' => return &line[..i],
            '\\' => {
                if let Some(end) = url_argument_end(&line[i..]) {
                    i += end;
                    continue;
                }
                // The escaped character never starts a comment
                i += 1;
                if let Some(next) = line[i..].chars().next() {
                    i += next.len_utf8();
                }
            }
            _ => i += ch.len_utf8(),
        }
    }
    line
}

/// Length of a leading `\url{..}` or `\href{..}` up to the end of the URL
fn url_argument_end(s: &str) -> Option<usize> {
    URL_COMMANDS.iter().find_map(|command| {
        let (_, tail) = braced_argument(s.strip_prefix(*command)?)?;
        Some(s.len() - tail.len())
    })
}

// =============================================================================
// Brace Scanning
// =============================================================================

/// Split a leading `{...}` group off `s`.
///
/// Returns the inner text and the remainder after the closing brace. Escaped
/// braces (`\{`, `\}`) do not count towards nesting. Returns `None` if `s` does
/// not start with `{` or the group never closes.
pub fn braced_argument(s: &str) -> Option<(&str, &str)> {
    if !s.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], &s[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Skip a leading `[...]` optional argument, if any
pub fn skip_optional_argument(s: &str) -> &str {
    if s.starts_with('[') {
        if let Some(end) = s.find(']') {
            return &s[end + 1..];
        }
    }
    s
}

/// Extract the first braced argument of `\name` at the start of `line`.
///
/// `name` may include a trailing `*` (e.g. `section*`). The argument must be
/// non-empty; `\section{}` yields `None`.
pub fn command_argument<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix('\\')?.strip_prefix(name)?;
    let (arg, _) = braced_argument(rest)?;
    if arg.is_empty() {
        None
    } else {
        Some(arg)
    }
}

/// Check whether `line` starts with the control word `\name`.
///
/// The character after the name must not be a letter, so `\item` does not
/// match `\itemsep`.
pub fn starts_with_command(line: &str, name: &str) -> bool {
    match line.strip_prefix('\\').and_then(|r| r.strip_prefix(name)) {
        Some(rest) => !rest.starts_with(|c: char| c.is_ascii_alphabetic()),
        None => false,
    }
}

/// Check whether `line` starts with `\begin{env}`
pub fn is_begin(line: &str, env: &str) -> bool {
    environment_marker(line, "begin") == Some(env)
}

/// Check whether `line` starts with `\end{env}`
pub fn is_end(line: &str, env: &str) -> bool {
    environment_marker(line, "end") == Some(env)
}

/// Name of the environment in a leading `\begin{...}` or `\end{...}`
pub fn environment_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix('\\')?.strip_prefix(marker)?;
    let (name, _) = braced_argument(rest)?;
    Some(name)
}

// =============================================================================
// Command Rewriting
// =============================================================================

/// Rewrite every `\name{arg1}...{argN}` in `text` using `render`.
///
/// Arguments are brace-balanced, so nested groups stay intact. Occurrences with
/// missing or unbalanced arguments are left untouched. An optional `[...]`
/// argument directly after the name is skipped.
pub fn replace_command<F>(text: &str, name: &str, argc: usize, render: F) -> String
where
    F: Fn(&[&str]) -> String,
{
    let needle = format!("\\{}", name);
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(&needle) {
        let after_name = &rest[pos + needle.len()..];
        if after_name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            // A longer control word such as `\textbfx`
            out.push_str(&rest[..pos + needle.len()]);
            rest = after_name;
            continue;
        }

        let mut args = Vec::with_capacity(argc);
        let mut tail = skip_optional_argument(after_name);
        for _ in 0..argc {
            match braced_argument(tail) {
                Some((arg, remainder)) => {
                    args.push(arg);
                    tail = remainder;
                }
                None => break,
            }
        }

        if args.len() == argc {
            out.push_str(&rest[..pos]);
            out.push_str(&render(&args));
            rest = tail;
        } else {
            out.push_str(&rest[..pos + needle.len()]);
            rest = after_name;
        }
    }

    out.push_str(rest);
    out
}

/// Remove every remaining control word together with an optional `*`, an
/// optional `[...]` and a single braced argument.
///
/// Control symbols such as `\&` or `\\` are not control words and are kept.
pub fn strip_control_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());

        if name_len == 0 {
            // Control symbol: keep the backslash and the following character
            let sym_len = after.chars().next().map(char::len_utf8).unwrap_or(0);
            out.push('\\');
            out.push_str(&after[..sym_len]);
            rest = &after[sym_len..];
            continue;
        }

        let mut tail = &after[name_len..];
        tail = tail.strip_prefix('*').unwrap_or(tail);
        tail = skip_optional_argument(tail);
        if let Some((_, remainder)) = braced_argument(tail) {
            tail = remainder;
        }
        rest = tail;
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lines_trims_and_drops_blank() {
        assert_eq!(
            split_lines("  \\section{A}  \n\n\r\n text \r\n"),
            vec!["\\section{A}", "text"]
        );
    }

    #[test]
    fn test_split_lines_breaks_before_structure() {
        assert_eq!(
            split_lines("\\begin{itemize} \\item A \\item B \\end{itemize}"),
            vec!["\\begin{itemize}", "\\item A", "\\item B", "\\end{itemize}"]
        );
        // \itemsep is not an item, and a line break before "item" is not a command
        assert_eq!(split_lines("x \\itemsep y"), vec!["x \\itemsep y"]);
        assert_eq!(split_lines("a \\\\item b"), vec!["a \\\\item b"]);
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("text % note"), "text ");
        assert_eq!(strip_comment("50\\% off"), "50\\% off");
        assert_eq!(strip_comment("a \\\\% note"), "a \\\\");
        assert_eq!(strip_comment("% whole line"), "");
    }

    #[test]
    fn test_strip_comment_keeps_url_percent() {
        assert_eq!(
            strip_comment("See \\url{https://x.org/a%20b} now. % note"),
            "See \\url{https://x.org/a%20b} now. "
        );
        assert_eq!(
            strip_comment("\\href{https://x.org/%7Eme}{home} % note"),
            "\\href{https://x.org/%7Eme}{home} "
        );
        // Other commands get no special treatment
        assert_eq!(strip_comment("\\urlstyle{same}%x"), "\\urlstyle{same}");
        assert_eq!(strip_comment("\\textbf{50%}"), "\\textbf{50");
        // An unterminated URL argument falls back to the plain rule
        assert_eq!(strip_comment("\\url{a%b"), "\\url{a");
    }

    #[test]
    fn test_braced_argument() {
        assert_eq!(braced_argument("{abc} rest"), Some(("abc", " rest")));
        assert_eq!(braced_argument("{a{b}c}"), Some(("a{b}c", "")));
        assert_eq!(braced_argument("{a\\}b}x"), Some(("a\\}b", "x")));
        assert_eq!(braced_argument("{open"), None);
        assert_eq!(braced_argument("abc"), None);
    }

    #[test]
    fn test_command_argument() {
        assert_eq!(command_argument("\\section{Intro}", "section"), Some("Intro"));
        assert_eq!(
            command_argument("\\section{The \\emph{Core}} trailing", "section"),
            Some("The \\emph{Core}")
        );
        assert_eq!(command_argument("\\section*{Refs}", "section"), None);
        assert_eq!(command_argument("\\section*{Refs}", "section*"), Some("Refs"));
        assert_eq!(command_argument("\\section{}", "section"), None);
    }

    #[test]
    fn test_starts_with_command() {
        assert!(starts_with_command("\\item A", "item"));
        assert!(starts_with_command("\\item[a)] A", "item"));
        assert!(!starts_with_command("\\itemsep 2pt", "item"));
        assert!(!starts_with_command("item", "item"));
    }

    #[test]
    fn test_environment_markers() {
        assert!(is_begin("\\begin{itemize}", "itemize"));
        assert!(is_end("\\end{tabular}", "tabular"));
        assert!(!is_begin("\\begin{itemize}", "enumerate"));
        assert_eq!(environment_marker("\\begin{figure}[h]", "begin"), Some("figure"));
    }

    #[test]
    fn test_replace_command_nested() {
        let out = replace_command("a \\x{b {c} d} e", "x", 1, |args| format!("[{}]", args[0]));
        assert_eq!(out, "a [b {c} d] e");
    }

    #[test]
    fn test_replace_command_two_args() {
        let out = replace_command("\\frac{1}{2} and \\frac{3}", "frac", 2, |args| {
            format!("({})/({})", args[0], args[1])
        });
        assert_eq!(out, "(1)/(2) and \\frac{3}");
    }

    #[test]
    fn test_replace_command_respects_word_boundary() {
        let out = replace_command("\\emphx{a} \\emph{b}", "emph", 1, |args| args[0].to_string());
        assert_eq!(out, "\\emphx{a} b");
    }

    #[test]
    fn test_strip_control_words() {
        assert_eq!(strip_control_words("a \\label{x} b"), "a  b");
        assert_eq!(strip_control_words("\\noindent text"), " text");
        assert_eq!(strip_control_words("\\textsc{a {b}} c"), " c");
        assert_eq!(strip_control_words("50\\% off \\& more"), "50\\% off \\& more");
        assert_eq!(strip_control_words("\\vspace*{1em}x"), "x");
    }
}
