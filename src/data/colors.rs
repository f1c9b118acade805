//! Color support for the xcolor package
//! Maps xcolor color names to CSS colors for inline `style` attributes

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Named colors from xcolor (base names and dvipsnames)
    pub static ref NAMED_COLORS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();

        // Basic colors
        m.insert("black", "black");
        m.insert("white", "white");
        m.insert("red", "red");
        m.insert("green", "green");
        m.insert("blue", "blue");
        m.insert("yellow", "yellow");
        m.insert("cyan", "cyan");
        m.insert("magenta", "magenta");
        m.insert("orange", "orange");
        m.insert("purple", "purple");
        m.insert("pink", "pink");
        m.insert("brown", "brown");
        m.insert("gray", "gray");
        m.insert("grey", "gray");
        m.insert("darkgray", "#404040");
        m.insert("lightgray", "#BFBFBF");
        m.insert("lime", "#BFFF00");
        m.insert("olive", "olive");
        m.insert("teal", "teal");
        m.insert("violet", "#800080");

        // dvipsnames
        m.insert("Apricot", "#FBB982");
        m.insert("Aquamarine", "#00B5BE");
        m.insert("Bittersweet", "#C04F17");
        m.insert("BlueGreen", "#00B5BE");
        m.insert("BlueViolet", "#473992");
        m.insert("BrickRed", "#B6321C");
        m.insert("Brown", "#792500");
        m.insert("BurntOrange", "#F7921D");
        m.insert("CadetBlue", "#74729A");
        m.insert("Cerulean", "#00A2E3");
        m.insert("CornflowerBlue", "#41B0E4");
        m.insert("Dandelion", "#FDBC42");
        m.insert("DarkOrchid", "#A4538A");
        m.insert("Emerald", "#00A99D");
        m.insert("ForestGreen", "#009B55");
        m.insert("Goldenrod", "#FFDF42");
        m.insert("JungleGreen", "#00A99A");
        m.insert("LimeGreen", "#8DC73E");
        m.insert("Mahogany", "#A9341F");
        m.insert("Maroon", "#AF3235");
        m.insert("MidnightBlue", "#006795");
        m.insert("NavyBlue", "#006EB8");
        m.insert("OliveGreen", "#3C8031");
        m.insert("OrangeRed", "#ED135A");
        m.insert("Plum", "#92268F");
        m.insert("RawSienna", "#974006");
        m.insert("RedOrange", "#F26035");
        m.insert("RoyalBlue", "#0071BC");
        m.insert("RoyalPurple", "#613F99");
        m.insert("Salmon", "#F69289");
        m.insert("SeaGreen", "#3FBC9D");
        m.insert("Sepia", "#671800");
        m.insert("SkyBlue", "#46C5DD");
        m.insert("TealBlue", "#00AEB3");
        m.insert("Turquoise", "#00B4CE");
        m.insert("Violet", "#58429B");
        m.insert("WildStrawberry", "#EE2967");
        m.insert("YellowOrange", "#FAA21A");

        m
    };

    /// A bare CSS color keyword such as `crimson`
    static ref CSS_KEYWORD_RE: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();

    /// A hex color such as `#1a2b3c` or `#abc`
    static ref CSS_HEX_RE: Regex = Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap();
}

/// Resolve an xcolor color expression to a value safe for a CSS `color:` property
///
/// Mixed expressions like `red!50!black` keep their base color. Anything that is
/// neither a known name, a plain keyword, nor a hex color becomes `inherit`.
pub fn css_color(spec: &str) -> String {
    let base = spec.trim().split('!').next().unwrap_or("").trim();

    if let Some(css) = NAMED_COLORS.get(base) {
        return css.to_string();
    }
    if CSS_KEYWORD_RE.is_match(base) || CSS_HEX_RE.is_match(base) {
        return base.to_string();
    }
    "inherit".to_string()
}
