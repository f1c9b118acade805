//! Integration tests for texpreview document conversion

use pretty_assertions::assert_eq;
use texpreview::{
    apply_preview_styles, latex_to_html, latex_to_html_with_diagnostics,
    latex_to_html_with_options, try_latex_to_html, ConversionError, HtmlOptions,
};

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Opening and closing tags of every container the converter emits
fn assert_balanced(html: &str) {
    for (open, close) in [
        ("<div", "</div>"),
        ("<ul", "</ul>"),
        ("<ol", "</ol>"),
        ("<table", "</table>"),
        ("<li", "</li>"),
        ("<p", "</p>"),
    ] {
        assert_eq!(
            count(html, open),
            count(html, close),
            "unbalanced {} in {}",
            open,
            html
        );
    }
}

const FULL_DOCUMENT: &str = r"\documentclass{article}
\usepackage{booktabs}
\title{On Things}
\author{A. Author}
\date{2024}
\begin{document}
\maketitle
\begin{abstract}
We study things.
\end{abstract}
\section{Introduction}
Text with \cite{key1}.
\begin{itemize}
\item First
\item Second
\end{itemize}
\begin{table}
\centering
\begin{tabular}{lc}
\toprule
Name & Value \\
\midrule
x & 1 \\
\bottomrule
\end{tabular}
\end{table}
\begin{equation}
E = mc^2
\end{equation}
\begin{figure}
\includegraphics{plot.png}
\caption{A plot}
\end{figure}
\section*{References}
\bibitem{key1} A. Author. Things. 2020.
\end{document}";

// ============================================================================
// Document Scenarios
// ============================================================================

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_and_paragraph() {
        let html = latex_to_html("\\section{Intro}\nHello \\textbf{world}.");
        assert_eq!(
            html,
            "<h2 style=\"font-size: 1.4rem; font-weight: bold; margin-top: 1.5rem; margin-bottom: 0.5rem;\">Intro</h2><div><p style=\"margin-bottom: 1rem;\">Hello <strong>world</strong>.</p></div>"
        );
    }

    #[test]
    fn test_itemize_on_separate_lines() {
        let html = latex_to_html("\\begin{itemize}\n\\item A\n\\item B\n\\end{itemize}");
        assert_eq!(
            html,
            "<ul style=\"margin-left: 2rem; margin-bottom: 1rem;\"><li>A</li><li>B</li></ul>"
        );
    }

    #[test]
    fn test_itemize_on_one_line() {
        let one_line = latex_to_html("\\begin{itemize}\\item A\\item B\\end{itemize}");
        let separate = latex_to_html("\\begin{itemize}\n\\item A\n\\item B\n\\end{itemize}");
        assert_eq!(one_line, separate);
    }

    #[test]
    fn test_enumerate() {
        let html = latex_to_html("\\begin{enumerate}\n\\item one\n\\end{enumerate}");
        assert!(html.starts_with("<ol "));
        assert!(html.ends_with("<li>one</li></ol>"));
    }

    #[test]
    fn test_tabular_header_and_data() {
        let html = latex_to_html("\\begin{tabular}{lc}\nA & B \\\\\nC & D \\\\\n\\end{tabular}");
        let rows: Vec<&str> = html.split("<tr>").skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains(">A</th>") && rows[0].contains(">B</th>"));
        assert!(rows[1].contains(">C</td>") && rows[1].contains(">D</td>"));
        assert!(!rows[1].contains("<th"));
    }

    #[test]
    fn test_empty_input_gives_fallback() {
        let html = latex_to_html("");
        assert_eq!(
            html,
            "<p>No previewable content found. Please copy the LaTeX code and compile it in <a href=\"https://www.overleaf.com\" target=\"_blank\" class=\"text-blue-600 hover:underline\">Overleaf</a>.</p>"
        );
    }

    #[test]
    fn test_text_outside_sections_is_discarded() {
        assert_eq!(latex_to_html("Loose text"), latex_to_html(""));
    }

    #[test]
    fn test_full_document() {
        let html = latex_to_html(FULL_DOCUMENT);
        assert!(html.starts_with("<div style=\"text-align: center; margin-bottom: 2rem;\"><h1"));
        assert!(html.contains(">On Things</h1>"));
        assert!(html.contains(">A. Author</p>"));
        assert!(html.contains("<strong>Abstract:</strong> <p"));
        assert!(html.contains("We study things."));
        assert!(html.contains(">Introduction</h2>"));
        assert!(html.contains("<a href=\"#key1\" style=\"color: #0000FF;\">[key1]</a>"));
        assert!(html.contains("<li>First</li><li>Second</li>"));
        assert!(html.contains(">Name</th>"));
        assert!(html.contains(">1</td>"));
        assert!(html.contains("<span class=\"math-display-content\">E = mc^2</span>"));
        assert!(html.contains("<figcaption"));
        assert!(html.contains(">A plot</figcaption>"));
        assert!(html.contains("<div class=\"references\">"));
        assert!(html.contains("<li id=\"key1\" style=\"margin-bottom: 0.5rem;\">A. Author. Things. 2020.</li>"));
        assert!(html.ends_with("</ul></div>"));
        assert!(!html.contains("documentclass"));
        assert!(!html.contains("toprule"));
        assert_balanced(&html);
    }

    #[test]
    fn test_full_document_has_no_warnings() {
        let output = latex_to_html_with_diagnostics(FULL_DOCUMENT, &HtmlOptions::default());
        assert!(output.warnings.is_empty(), "{:?}", output.warnings);
    }

    #[test]
    fn test_title_without_maketitle_is_hidden() {
        let html = latex_to_html("\\title{Hidden}\n\\section{A}");
        assert!(!html.contains("Hidden"));
    }

    #[test]
    fn test_subsection() {
        let html = latex_to_html("\\section{A}\n\\subsection{The \\emph{Details}}");
        assert!(html.contains(">The <em>Details</em></h3>"));
    }

    #[test]
    fn test_comments_are_ignored() {
        let html = latex_to_html("\\section{A} % heading\n% a full comment line\nCost is 5\\% here.");
        assert!(!html.contains("heading"));
        assert!(!html.contains("comment"));
        assert!(html.contains("Cost is 5% here."));
    }

    #[test]
    fn test_percent_in_url_is_not_a_comment() {
        let html = latex_to_html("\\section{A}\nSee \\url{https://x.org/a%20b} now. % note");
        assert!(html.contains(
            "See <a href=\"https://x.org/a%20b\" style=\"color: #000099;\">https://x.org/a%20b</a> now."
        ));
        assert!(!html.contains("note"));
    }
}

// ============================================================================
// Structural Properties
// ============================================================================

mod structure {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_balanced_with_closers() {
        assert_balanced(&latex_to_html(FULL_DOCUMENT));
    }

    #[test]
    fn test_balanced_without_closers() {
        let input = "\\begin{abstract}\nSummary\n\\section{A}\n\\begin{itemize}\n\\item x\n\\begin{tabular}{ll}\na & b \\\\\n\\begin{equation}\ny\n\\begin{figure}\n\\caption{c}";
        let output = latex_to_html_with_diagnostics(input, &HtmlOptions::default());
        assert_balanced(&output.content);
        // tabular, itemize, equation, figure and abstract were never closed
        assert_eq!(output.warnings.len(), 5);
        assert!(output.warnings.iter().all(|w| w.suggestion.is_some()));
    }

    #[test]
    fn test_unclosed_references_are_closed_once() {
        let html = latex_to_html("\\section*{References}\n\\bibitem{a} First.");
        assert!(html.ends_with("</li></ul></div>"));
        assert_balanced(&html);
    }

    #[test]
    fn test_new_section_closes_references() {
        let html = latex_to_html(
            "\\section*{references}\n\\bibitem{a} First.\n\\section{Appendix}\nMore.",
        );
        assert!(html.contains("</li></ul></div><h2"));
        assert!(html.ends_with("More.</p></div>"));
        assert_balanced(&html);
    }

    #[test]
    fn test_new_section_flushes_table_and_list() {
        let html = latex_to_html(
            "\\section{A}\n\\begin{tabular}{l}\nx \\\\\n\\section{B}\n\\begin{itemize}\n\\item y\n\\section{C}",
        );
        assert!(html.contains("</table></div><h2"));
        assert!(html.contains("</ul></div><h2"));
        assert_balanced(&html);
    }

    #[test]
    fn test_nested_lists() {
        let html = latex_to_html(
            "\\begin{enumerate}\n\\item a\n\\begin{itemize}\n\\item b\n\\end{itemize}\n\\item c\n\\end{enumerate}",
        );
        assert!(html.starts_with("<ol"));
        assert!(html.contains("<li>a<ul"));
        assert!(html.contains("<li>b</li></ul></li><li>c</li></ol>"));
        assert_balanced(&html);
    }

    #[test]
    fn test_nested_list_left_open() {
        let html = latex_to_html("\\begin{itemize}\n\\item a\n\\begin{itemize}\n\\item b");
        assert_eq!(count(&html, "<ul"), 2);
        assert_balanced(&html);
    }

    #[test]
    fn test_list_left_open_stays_in_section() {
        let open = latex_to_html("\\section{A}\n\\begin{itemize}\n\\item x");
        assert!(open.ends_with("<li>x</li></ul></div>"));

        let switched = latex_to_html("\\section{A}\n\\begin{itemize}\n\\item x\n\\section{B}");
        assert!(switched.starts_with(&open));
    }
}

// ============================================================================
// Tables
// ============================================================================

mod tables {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rows_conform_to_column_count() {
        let html = latex_to_html(
            "\\begin{tabular}{|l|c|r|}\nA & B \\\\\n1 & 2 & 3 & 4 \\\\\nx \\\\\n\\end{tabular}",
        );
        let rows: Vec<&str> = html.split("<tr>").skip(1).collect();
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(count(row, "<th ") + count(row, "<td "), 3, "{}", row);
        }
        assert!(!html.contains(">4</td>"));
    }

    #[test]
    fn test_escaped_ampersand_and_braces_stay_in_cell() {
        let html = latex_to_html(
            "\\begin{tabular}{ll}\nR\\&D & \\textbf{x & y} \\\\\nz & w \\\\\n\\end{tabular}",
        );
        assert!(html.contains(">R&amp;D</th>"));
        assert!(html.contains("><strong>x & y</strong></th>"));
        assert_eq!(count(&html, "<th "), 2);
    }

    #[test]
    fn test_empty_cells_render_as_nbsp() {
        let html = latex_to_html("\\begin{tabular}{lll}\na & & c \\\\\n\\end{tabular}");
        assert!(html.contains(">&nbsp;</th>"));
    }

    #[test]
    fn test_unconstrained_table_float() {
        let html = latex_to_html("\\begin{table}\na & b & c \\\\\n\\end{table}");
        assert_eq!(count(&html, "<th "), 3);
    }

    #[test]
    fn test_overlong_row_warns() {
        let output = latex_to_html_with_diagnostics(
            "\\begin{tabular}{l}\na & b \\\\\n\\end{tabular}",
            &HtmlOptions::default(),
        );
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].line, Some(2));
    }

    #[test]
    fn test_unbalanced_row_lenient_and_strict() {
        let input = "\\begin{tabular}{ll}\na & \\textbf{b & c\n\\end{tabular}";

        let output = latex_to_html_with_diagnostics(input, &HtmlOptions::default());
        assert!(output.content.contains(">a</th>"));
        assert_eq!(output.warnings.len(), 1);

        let err = try_latex_to_html(input, &HtmlOptions::strict()).unwrap_err();
        assert!(matches!(err, ConversionError::ParseError { line: Some(2), .. }));
    }

    #[test]
    fn test_overflowing_column_spec() {
        let output = latex_to_html_with_diagnostics(
            "\\begin{tabular}{*{18446744073709551615}{*{2}{c}}}\nA & B \\\\\nx & y \\\\\n\\end{tabular}",
            &HtmlOptions::default(),
        );
        assert!(!output.content.contains("Internal error"));
        assert_eq!(count(&output.content, "<th "), 2);
        assert_eq!(count(&output.content, "<td "), 2);
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].message.contains("unconstrained"));
    }

    #[test]
    fn test_huge_column_count_is_not_padded() {
        let output = latex_to_html_with_diagnostics(
            "\\begin{tabular}{*{300000}{c}}\nA & B \\\\\n\\end{tabular}",
            &HtmlOptions::default(),
        );
        assert_eq!(count(&output.content, "<th "), 2);
        assert!(output.content.len() < 4096, "{} bytes", output.content.len());
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].line, Some(1));
    }
}

// ============================================================================
// Inline Markup
// ============================================================================

mod inline {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str) -> String {
        let html = latex_to_html(&format!("\\section{{S}}\n{}", text));
        let start = html.find("<p style=\"margin-bottom: 1rem;\">").expect("paragraph");
        let body = &html[start + "<p style=\"margin-bottom: 1rem;\">".len()..];
        body[..body.find("</p>").expect("closing tag")].to_string()
    }

    #[test]
    fn test_unknown_commands_disappear() {
        let text = paragraph("Before \\unknowncmd{arg} after \\foo done");
        assert!(!text.contains("unknowncmd"));
        assert!(!text.contains("arg"));
        assert!(!text.contains("foo"));
        assert!(text.starts_with("Before"));
        assert!(text.contains("after"));
        assert!(text.ends_with("done"));
    }

    #[test]
    fn test_literal_markup_is_escaped() {
        assert_eq!(
            paragraph("a < b and <script> \\textbf{c}"),
            "a &lt; b and &lt;script&gt; <strong>c</strong>"
        );
    }

    #[test]
    fn test_inline_math_symbols_and_fractions() {
        assert_eq!(
            paragraph("Let $\\alpha + \\frac{1}{2}$ hold."),
            "Let <span class=\"math-inline\">α + (1)/(2)</span> hold."
        );
    }

    #[test]
    fn test_adjacent_inline_math() {
        assert_eq!(
            paragraph("$a$$b$"),
            "<span class=\"math-inline\">a</span><span class=\"math-inline\">b</span>"
        );
    }

    #[test]
    fn test_nested_formatting() {
        assert_eq!(
            paragraph("\\textbf{bold \\emph{both}}"),
            "<strong>bold <em>both</em></strong>"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            paragraph("\\href{https://a.org}{site}"),
            "<a href=\"https://a.org\" style=\"color: #000099;\">site</a>"
        );
    }

    #[test]
    fn test_textcolor() {
        assert_eq!(
            paragraph("\\textcolor{red}{alert}"),
            "<span style=\"color: red;\">alert</span>"
        );
    }

    #[test]
    fn test_multiple_citations() {
        let text = paragraph("See \\citep{a, b}.");
        assert!(text.contains("href=\"#a\""));
        assert!(text.contains("href=\"#b\""));
    }

    #[test]
    fn test_empty_items_dropped() {
        let html = latex_to_html(
            "\\begin{itemize}\n\\item\n\\item \\textbf{}\n\\item kept\n\\end{itemize}",
        );
        assert_eq!(count(&html, "<li>"), 1);
        assert!(html.contains("<li>kept</li>"));
    }
}

// ============================================================================
// Errors and Options
// ============================================================================

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strict_error_template() {
        let html = latex_to_html_with_options("\\section{A}\n\\end{figure}", &HtmlOptions::strict());
        assert!(html.starts_with("<p style=\"color: #e53e3e; text-align: center;"));
        assert!(html.contains(
            "Error parsing LaTeX: Parse error at line 2: \\end{figure} without \\begin{figure}."
        ));
        assert!(html.contains(">Overleaf</a>.</p>"));
    }

    #[test]
    fn test_lenient_stray_end_warns() {
        let output = latex_to_html_with_diagnostics(
            "\\section{A}\n\\end{enumerate}\ntext",
            &HtmlOptions::default(),
        );
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].message.contains("enumerate"));
        assert!(output.content.contains(">text</p>"));
    }

    #[test]
    fn test_mismatched_list_end() {
        let input = "\\begin{itemize}\n\\item a\n\\end{enumerate}";
        let output = latex_to_html_with_diagnostics(input, &HtmlOptions::default());
        assert!(output.content.starts_with("<ul"));
        assert_eq!(output.warnings.len(), 1);
        assert!(try_latex_to_html(input, &HtmlOptions::strict()).is_err());
    }

    #[test]
    fn test_compile_url_option() {
        let options = HtmlOptions::new().with_compile_url("https://tex.example.org/\"x");
        let html = latex_to_html_with_options("", &options);
        assert!(html.contains("href=\"https://tex.example.org/%22x\""));
    }

    #[test]
    fn test_try_returns_fallback_for_empty() {
        let output = try_latex_to_html("\\documentclass{article}", &HtmlOptions::default())
            .expect("conversion");
        assert!(output.content.starts_with("<p>No previewable content found."));
    }

    #[test]
    fn test_preview_styles_wrap() {
        let page = apply_preview_styles(&latex_to_html("\\section{A}"));
        assert!(page.starts_with("<div style=\"font-family: 'Times New Roman'"));
        assert_balanced(&page);
    }
}
