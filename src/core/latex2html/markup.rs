//! Inline command processing
//!
//! Turns one fragment of LaTeX text into HTML-safe text by running an ordered
//! list of pure steps ([`INLINE_PIPELINE`]). The order is a contract:
//!
//! 1. formatting (`\textbf`, `\emph`, ...)
//! 2. citations
//! 3. links
//! 4. inline math
//! 5. symbols
//! 6. fractions
//! 7. layout commands (booktabs rules, setspace)
//! 8. colors
//! 9. column-spec artifacts
//! 10. remaining control words
//! 11. escaped special characters
//! 12. HTML escaping
//!
//! Citations, math and symbols must run before the catch-all in step 10, and
//! escaping must run last. Markup generated by earlier steps uses the sentinel
//! characters [`TAG_OPEN`] and [`TAG_CLOSE`] instead of angle brackets, so the
//! final step escapes literal source text only and then materializes the tags.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::utils::{replace_command, strip_control_words};
use crate::data::colors::css_color;
use crate::data::constants::{CITATION_LINK_STYLE, MONOSPACE_STYLE, URL_LINK_STYLE};
use crate::data::symbols::lookup_symbol;

/// Stands in for `<` in generated markup until the escaping step
pub const TAG_OPEN: char = '\u{E000}';
/// Stands in for `>` in generated markup until the escaping step
pub const TAG_CLOSE: char = '\u{E001}';

lazy_static! {
    static ref CITE_RE: Regex =
        Regex::new(r"\\cite[pt]?(?:\[[^\]]*\])*\{([^}]+)\}").unwrap();
    static ref URL_RE: Regex = Regex::new(r"\\url\{([^}]+)\}").unwrap();
    static ref HREF_RE: Regex = Regex::new(r"\\href\{([^}]+)\}\{([^}]+)\}").unwrap();
    static ref PAREN_MATH_RE: Regex = Regex::new(r"\\\((.*?[^\\])\\\)").unwrap();
    static ref SYMBOL_RE: Regex = Regex::new(r"\\([a-zA-Z]+)").unwrap();
    static ref LAYOUT_RE: Regex = Regex::new(
        r"\\(?:toprule|midrule|bottomrule|onehalfspacing|doublespacing|singlespacing)\b"
    )
    .unwrap();
    static ref COLUMN_ARTIFACT_RE: Regex = Regex::new(r"\{@\{\}[^}]*@\{\}\}").unwrap();
    static ref SPECIAL_RE: Regex = Regex::new(r"\\(\\|[&%$#_{}])").unwrap();
}

/// One named step of the inline pipeline
#[derive(Clone, Copy)]
pub struct InlineStep {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The inline pipeline, in the order it must run
pub static INLINE_PIPELINE: &[InlineStep] = &[
    InlineStep {
        name: "sanitize",
        apply: strip_sentinels,
    },
    InlineStep {
        name: "formatting",
        apply: apply_formatting,
    },
    InlineStep {
        name: "citations",
        apply: apply_citations,
    },
    InlineStep {
        name: "links",
        apply: apply_links,
    },
    InlineStep {
        name: "inline_math",
        apply: apply_inline_math,
    },
    InlineStep {
        name: "symbols",
        apply: apply_symbols,
    },
    InlineStep {
        name: "fractions",
        apply: apply_fractions,
    },
    InlineStep {
        name: "layout_commands",
        apply: remove_layout_commands,
    },
    InlineStep {
        name: "colors",
        apply: apply_colors,
    },
    InlineStep {
        name: "column_artifacts",
        apply: remove_column_artifacts,
    },
    InlineStep {
        name: "unknown_commands",
        apply: remove_unknown_commands,
    },
    InlineStep {
        name: "escaped_specials",
        apply: unescape_specials,
    },
    InlineStep {
        name: "html_escape",
        apply: escape_html,
    },
];

/// Convert one LaTeX text fragment into trimmed, HTML-safe text
pub fn process_inline_commands(text: &str) -> String {
    let out = INLINE_PIPELINE
        .iter()
        .fold(text.to_string(), |acc, step| (step.apply)(&acc));
    out.trim().to_string()
}

/// Build an element with sentinel brackets. Attribute values are quoted.
pub fn element(tag: &str, attrs: &[(&str, &str)], body: &str) -> String {
    let mut out = String::new();
    out.push(TAG_OPEN);
    out.push_str(tag);
    for (key, value) in attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
    out.push(TAG_CLOSE);
    out.push_str(body);
    out.push(TAG_OPEN);
    out.push('/');
    out.push_str(tag);
    out.push(TAG_CLOSE);
    out
}

// =============================================================================
// Pipeline steps
// =============================================================================

/// Drop sentinel characters that appear in the source itself
pub fn strip_sentinels(text: &str) -> String {
    text.replace([TAG_OPEN, TAG_CLOSE], "")
}

/// `\textbf`, `\textit`, `\emph`, `\underline`, `\texttt`, `\textsuperscript`,
/// `\textsubscript` → inline tags. Nested formatting is handled recursively.
pub fn apply_formatting(text: &str) -> String {
    const FORMATS: &[(&str, &str, Option<&str>)] = &[
        ("textbf", "strong", None),
        ("textit", "em", None),
        ("emph", "em", None),
        ("underline", "u", None),
        ("texttt", "code", Some(MONOSPACE_STYLE)),
        ("textsuperscript", "sup", None),
        ("textsubscript", "sub", None),
    ];

    FORMATS
        .iter()
        .fold(text.to_string(), |acc, &(command, tag, style)| {
            replace_command(&acc, command, 1, |args| {
                let inner = apply_formatting(args[0]);
                if inner.trim().is_empty() {
                    return String::new();
                }
                match style {
                    Some(style) => element(tag, &[("style", style)], &inner),
                    None => element(tag, &[], &inner),
                }
            })
        })
}

/// `\cite{k}`, `\citep{k}`, `\citet{k}` → one anchor per key, linking to `#key`
pub fn apply_citations(text: &str) -> String {
    CITE_RE
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(|key| {
                    let href = format!("#{}", key);
                    element(
                        "a",
                        &[("href", &href), ("style", CITATION_LINK_STYLE)],
                        &format!("[{}]", key),
                    )
                })
                .collect::<Vec<_>>()
                .join(", ")
        })
        .to_string()
}

/// `\url{u}` and `\href{u}{text}` → anchors
pub fn apply_links(text: &str) -> String {
    let text = URL_RE.replace_all(text, |caps: &Captures| {
        element(
            "a",
            &[("href", &caps[1]), ("style", URL_LINK_STYLE)],
            &caps[1],
        )
    });
    HREF_RE
        .replace_all(&text, |caps: &Captures| {
            element(
                "a",
                &[("href", &caps[1]), ("style", URL_LINK_STYLE)],
                &caps[2],
            )
        })
        .to_string()
}

/// `\( ... \)` and `$ ... $` → `<span class="math-inline">`
///
/// The math text itself is not rewritten here; later steps still substitute
/// symbols and fractions inside it.
pub fn apply_inline_math(text: &str) -> String {
    let text = PAREN_MATH_RE.replace_all(text, |caps: &Captures| {
        element("span", &[("class", "math-inline")], &caps[1])
    });
    wrap_dollar_math(&text)
}

/// Wrap each `$ ... $` pair; a `$` preceded by `\` is literal
fn wrap_dollar_math(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(open) = find_unescaped_dollar(bytes, pos) {
        // Math needs at least one character, so `$$` is not an empty span
        let Some(close) = find_unescaped_dollar(bytes, open + 2) else {
            break;
        };
        out.push_str(&text[pos..open]);
        out.push_str(&element("span", &[("class", "math-inline")], &text[open + 1..close]));
        pos = close + 1;
    }

    out.push_str(&text[pos..]);
    out
}

fn find_unescaped_dollar(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&i| bytes[i] == b'$' && (i == 0 || bytes[i - 1] != b'\\'))
}

/// Greek letters and operators → Unicode. Unknown control words are kept.
pub fn apply_symbols(text: &str) -> String {
    SYMBOL_RE
        .replace_all(text, |caps: &Captures| match lookup_symbol(&caps[1]) {
            Some(symbol) => symbol.to_string(),
            None => caps[0].to_string(),
        })
        .to_string()
}

/// `\frac{a}{b}` → `(a)/(b)`
pub fn apply_fractions(text: &str) -> String {
    replace_command(text, "frac", 2, |args| {
        format!("({})/({})", apply_fractions(args[0]), apply_fractions(args[1]))
    })
}

/// booktabs rules and setspace switches have no preview equivalent
pub fn remove_layout_commands(text: &str) -> String {
    LAYOUT_RE.replace_all(text, "").to_string()
}

/// `\color{c}{text}` and `\textcolor{c}{text}` → colored span
pub fn apply_colors(text: &str) -> String {
    let render = |args: &[&str]| {
        let style = format!("color: {};", css_color(args[0]));
        element("span", &[("style", &style)], &apply_colors(args[1]))
    };
    let text = replace_command(text, "textcolor", 2, render);
    replace_command(&text, "color", 2, render)
}

/// Column-spec leftovers such as `{@{}lr@{}}`
pub fn remove_column_artifacts(text: &str) -> String {
    COLUMN_ARTIFACT_RE.replace_all(text, "").to_string()
}

/// Any remaining `\command` (and its argument) is dropped
pub fn remove_unknown_commands(text: &str) -> String {
    strip_control_words(text)
}

/// `\& \% \$ \# \_ \{ \}` → literal characters, `\\` → space
pub fn unescape_specials(text: &str) -> String {
    SPECIAL_RE
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "\\" => " ".to_string(),
            "&" => "&amp;".to_string(),
            other => other.to_string(),
        })
        .to_string()
}

/// Escape `<` and `>` from the source, then turn sentinels into real tags
pub fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace(TAG_OPEN, "<")
        .replace(TAG_CLOSE, ">")
}
