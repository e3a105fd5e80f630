//! Formatting styles and their default profiles

use kotlinize_syntax::KotlinSource;
use serde::{Deserialize, Serialize};

/// Style-kind identifiers under which a source unit binds styles
pub const BLANK_LINES: &str = "blank-lines";
pub const SPACES: &str = "spaces";
pub const WRAPPING_AND_BRACES: &str = "wrapping-and-braces";
pub const TABS_AND_INDENTS: &str = "tabs-and-indents";
pub const OTHER: &str = "other";

/// How many consecutive blank lines survive normalisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankLinesStyle {
    /// Between top-level declarations
    pub keep_maximum_in_declarations: usize,
    /// Inside function bodies
    pub keep_maximum_in_code: usize,
}

impl Default for BlankLinesStyle {
    fn default() -> Self {
        intellij::blank_lines()
    }
}

/// Spacing around tokens and operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacesStyle {
    pub before_comma: bool,
    pub after_comma: bool,
    /// `=` and the compound assignment operators
    pub around_assignment: bool,
    /// `==`, `!=`, `===`, `!==`
    pub around_equality: bool,
    /// `&&`, `||`
    pub around_logical: bool,
    /// `+ - * / %` where the operator is provably binary
    pub around_arithmetic: bool,
    /// `->` in lambdas and `when` entries
    pub around_lambda_arrow: bool,
    /// `?:`
    pub around_elvis: bool,
    /// Declaration colons: `name: Type`
    pub before_colon_in_declaration: bool,
    pub after_colon_in_declaration: bool,
}

impl Default for SpacesStyle {
    fn default() -> Self {
        intellij::spaces()
    }
}

/// Brace and keyword placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappingAndBracesStyle {
    pub space_before_left_brace: bool,
    pub else_on_new_line: bool,
    pub catch_on_new_line: bool,
    pub finally_on_new_line: bool,
}

impl Default for WrappingAndBracesStyle {
    fn default() -> Self {
        intellij::wrapping_and_braces()
    }
}

/// Indentation character and widths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabsAndIndentsStyle {
    pub use_tab_character: bool,
    pub tab_size: usize,
    pub indent_size: usize,
    /// Extra columns for wrapped expressions and unclosed groups
    pub continuation_indent: usize,
}

impl Default for TabsAndIndentsStyle {
    fn default() -> Self {
        intellij::tabs_and_indents()
    }
}

/// Preferences that fit no other bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherStyle {
    pub use_trailing_comma: bool,
}

impl Default for OtherStyle {
    fn default() -> Self {
        intellij::other()
    }
}

/// The stock IntelliJ profiles, used whenever a unit binds no style of a
/// given kind
pub mod intellij {
    use super::*;

    pub fn blank_lines() -> BlankLinesStyle {
        BlankLinesStyle {
            keep_maximum_in_declarations: 2,
            keep_maximum_in_code: 2,
        }
    }

    pub fn spaces() -> SpacesStyle {
        SpacesStyle {
            before_comma: false,
            after_comma: true,
            around_assignment: true,
            around_equality: true,
            around_logical: true,
            around_arithmetic: true,
            around_lambda_arrow: true,
            around_elvis: true,
            before_colon_in_declaration: false,
            after_colon_in_declaration: true,
        }
    }

    pub fn wrapping_and_braces() -> WrappingAndBracesStyle {
        WrappingAndBracesStyle {
            space_before_left_brace: true,
            else_on_new_line: false,
            catch_on_new_line: false,
            finally_on_new_line: false,
        }
    }

    pub fn tabs_and_indents() -> TabsAndIndentsStyle {
        TabsAndIndentsStyle {
            use_tab_character: false,
            tab_size: 4,
            indent_size: 4,
            continuation_indent: 8,
        }
    }

    pub fn other() -> OtherStyle {
        OtherStyle {
            use_trailing_comma: true,
        }
    }
}

/// All styles for one source unit, resolved in a single lookup
///
/// Each kind falls back to its IntelliJ profile when the unit has no
/// binding; resolution depends only on the unit's style bundle.
#[derive(Debug, Clone)]
pub struct Styles {
    pub blank_lines: BlankLinesStyle,
    pub spaces: SpacesStyle,
    pub wrapping_and_braces: WrappingAndBracesStyle,
    pub tabs_and_indents: TabsAndIndentsStyle,
    pub other: OtherStyle,
}

impl Styles {
    pub fn from(unit: &KotlinSource) -> Self {
        let styles = unit.styles();
        Self {
            blank_lines: styles
                .get::<BlankLinesStyle>(BLANK_LINES)
                .cloned()
                .unwrap_or_else(intellij::blank_lines),
            spaces: styles
                .get::<SpacesStyle>(SPACES)
                .cloned()
                .unwrap_or_else(intellij::spaces),
            wrapping_and_braces: styles
                .get::<WrappingAndBracesStyle>(WRAPPING_AND_BRACES)
                .cloned()
                .unwrap_or_else(intellij::wrapping_and_braces),
            tabs_and_indents: styles
                .get::<TabsAndIndentsStyle>(TABS_AND_INDENTS)
                .cloned()
                .unwrap_or_else(intellij::tabs_and_indents),
            other: styles
                .get::<OtherStyle>(OTHER)
                .cloned()
                .unwrap_or_else(intellij::other),
        }
    }
}
