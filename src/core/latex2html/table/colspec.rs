//! Column specification parsing for `\begin{tabular}{...}`

use crate::core::latex2html::utils::braced_argument;

/// Widest table whose rows are padded and truncated to the declared count
pub const MAX_TABLE_COLUMNS: usize = 64;

/// Count the columns declared by a tabular column specification.
///
/// `l`, `c`, `r`, `S`, `X` count once; `p{..}`, `m{..}`, `b{..}` count once and
/// skip their width; `*{n}{spec}` repeats `spec` n times. Rules (`|`), spacing
/// and `@{..}`, `!{..}`, `>{..}`, `<{..}` decorations don't count.
///
/// The count saturates at `usize::MAX` instead of overflowing.
pub fn count_columns(spec: &str) -> usize {
    let mut count: usize = 0;
    let mut rest = spec;

    while let Some(ch) = rest.chars().next() {
        rest = &rest[ch.len_utf8()..];
        match ch {
            'l' | 'c' | 'r' | 'S' | 'X' => count = count.saturating_add(1),
            'p' | 'm' | 'b' => {
                count = count.saturating_add(1);
                if let Some((_, tail)) = braced_argument(rest) {
                    rest = tail;
                }
            }
            '@' | '!' | '>' | '<' => {
                if let Some((_, tail)) = braced_argument(rest) {
                    rest = tail;
                }
            }
            '*' => {
                let Some((times, tail)) = braced_argument(rest) else {
                    continue;
                };
                let Some((inner, tail)) = braced_argument(tail) else {
                    rest = tail;
                    continue;
                };
                let times: usize = times.trim().parse().unwrap_or(0);
                count = count.saturating_add(times.saturating_mul(count_columns(inner)));
                rest = tail;
            }
            _ => {}
        }
    }

    count
}
