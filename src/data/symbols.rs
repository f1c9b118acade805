//! Math symbol mappings for the amsmath/amssymb subset
//!
//! Keys are command names without the leading backslash. Lookups are exact, so
//! `\intercal` never turns into `∫cal`.

use phf::phf_map;

/// Greek letters (lowercase, variants and uppercase)
pub static GREEK_LETTERS: phf::Map<&'static str, &'static str> = phf_map! {
    "alpha" => "α",
    "beta" => "β",
    "gamma" => "γ",
    "delta" => "δ",
    "epsilon" => "ϵ",
    "varepsilon" => "ε",
    "zeta" => "ζ",
    "eta" => "η",
    "theta" => "θ",
    "vartheta" => "ϑ",
    "iota" => "ι",
    "kappa" => "κ",
    "lambda" => "λ",
    "mu" => "μ",
    "nu" => "ν",
    "xi" => "ξ",
    "pi" => "π",
    "varpi" => "ϖ",
    "rho" => "ρ",
    "varrho" => "ϱ",
    "sigma" => "σ",
    "varsigma" => "ς",
    "tau" => "τ",
    "upsilon" => "υ",
    "phi" => "ϕ",
    "varphi" => "φ",
    "chi" => "χ",
    "psi" => "ψ",
    "omega" => "ω",

    "Gamma" => "Γ",
    "Delta" => "Δ",
    "Theta" => "Θ",
    "Lambda" => "Λ",
    "Xi" => "Ξ",
    "Pi" => "Π",
    "Sigma" => "Σ",
    "Upsilon" => "Υ",
    "Phi" => "Φ",
    "Psi" => "Ψ",
    "Omega" => "Ω",
};

/// Operators, relations, arrows and miscellaneous math symbols
pub static MATH_SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    // Big operators
    "sum" => "∑",
    "prod" => "∏",
    "coprod" => "∐",
    "int" => "∫",
    "iint" => "∬",
    "iiint" => "∭",
    "oint" => "∮",
    "bigcup" => "⋃",
    "bigcap" => "⋂",

    // Binary operators
    "pm" => "±",
    "mp" => "∓",
    "times" => "×",
    "div" => "÷",
    "cdot" => "·",
    "ast" => "∗",
    "circ" => "∘",
    "bullet" => "•",
    "oplus" => "⊕",
    "otimes" => "⊗",
    "cup" => "∪",
    "cap" => "∩",
    "wedge" => "∧",
    "vee" => "∨",
    "setminus" => "∖",

    // Relations
    "leq" => "≤",
    "le" => "≤",
    "geq" => "≥",
    "ge" => "≥",
    "neq" => "≠",
    "ne" => "≠",
    "approx" => "≈",
    "equiv" => "≡",
    "sim" => "∼",
    "simeq" => "≃",
    "cong" => "≅",
    "propto" => "∝",
    "ll" => "≪",
    "gg" => "≫",
    "in" => "∈",
    "notin" => "∉",
    "ni" => "∋",
    "subset" => "⊂",
    "subseteq" => "⊆",
    "supset" => "⊃",
    "supseteq" => "⊇",
    "perp" => "⊥",
    "parallel" => "∥",
    "mid" => "∣",

    // Arrows
    "to" => "→",
    "rightarrow" => "→",
    "leftarrow" => "←",
    "leftrightarrow" => "↔",
    "Rightarrow" => "⇒",
    "Leftarrow" => "⇐",
    "Leftrightarrow" => "⇔",
    "implies" => "⟹",
    "iff" => "⟺",
    "mapsto" => "↦",
    "uparrow" => "↑",
    "downarrow" => "↓",

    // Miscellaneous
    "infty" => "∞",
    "partial" => "∂",
    "nabla" => "∇",
    "forall" => "∀",
    "exists" => "∃",
    "nexists" => "∄",
    "emptyset" => "∅",
    "varnothing" => "∅",
    "neg" => "¬",
    "angle" => "∠",
    "triangle" => "△",
    "hbar" => "ℏ",
    "ell" => "ℓ",
    "Re" => "ℜ",
    "Im" => "ℑ",
    "aleph" => "ℵ",
    "prime" => "′",
    "degree" => "°",
    "therefore" => "∴",
    "because" => "∵",
    "ldots" => "…",
    "cdots" => "⋯",
    "vdots" => "⋮",
    "ddots" => "⋱",
    "dots" => "…",
    "langle" => "⟨",
    "rangle" => "⟩",
    "checkmark" => "✓",
};

/// Look up the Unicode replacement for a symbol command name
#[inline]
pub fn lookup_symbol(name: &str) -> Option<&'static str> {
    GREEK_LETTERS
        .get(name)
        .or_else(|| MATH_SYMBOLS.get(name))
        .copied()
}
