//! Whole-file auto-formatting for Kotlin sources

use kotlinize_core::{
    apply_edits, Edit, ExecutionContext, Recipe, RecipeError, SourceTree, Span, TreeVisitor,
};
use kotlinize_syntax::KotlinSource;

use crate::passes::{
    BlankLines, FormatPass, NormalizeTabsOrSpaces, RemoveTrailingWhitespace, Spaces,
    TabsAndIndents, TrailingComma, WrappingAndBraces,
};
use crate::styles::Styles;

/// Runs the full formatting pipeline over an entire Kotlin source unit
///
/// Styles are resolved once per unit, each falling back to the IntelliJ
/// profile, and the passes run in a fixed order, every pass consuming the
/// previous pass's output. Trees of any other kind pass through untouched,
/// so the visitor is safe to hand arbitrary sources.
pub struct AutoFormat {
    stop_after: Option<Span>,
}

impl AutoFormat {
    pub fn new() -> Self {
        Self { stop_after: None }
    }

    /// Format only up to the marked node; passes stop changing sites that
    /// begin after it
    pub fn with_stop_after(stop_after: Span) -> Self {
        Self {
            stop_after: Some(stop_after),
        }
    }

    /// Format `unit`, returning the new text
    pub fn format(
        &self,
        unit: &KotlinSource,
        ctx: &ExecutionContext,
    ) -> Result<String, RecipeError> {
        let styles = Styles::from(unit);
        let passes: [Box<dyn FormatPass>; 7] = [
            Box::new(RemoveTrailingWhitespace),
            Box::new(BlankLines::new(styles.blank_lines)),
            Box::new(Spaces::new(styles.spaces)),
            Box::new(WrappingAndBraces::new(styles.wrapping_and_braces)),
            Box::new(NormalizeTabsOrSpaces::new(styles.tabs_and_indents.clone())),
            Box::new(TabsAndIndents::new(styles.tabs_and_indents)),
            Box::new(TrailingComma::new(styles.other)),
        ];

        let mut current = KotlinSource::parse(unit.printed())
            .map_err(|e| RecipeError::Parse(e.to_string()))?;

        for pass in &passes {
            ctx.check_cancelled()?;
            let edits = pass.check(&current, self.stop_after);
            if edits.is_empty() {
                continue;
            }
            let next = apply_edits(current.printed(), &edits)?;
            current =
                KotlinSource::parse(next).map_err(|e| RecipeError::Parse(e.to_string()))?;
        }

        Ok(current.printed().to_string())
    }
}

impl Default for AutoFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeVisitor for AutoFormat {
    fn visit(
        &mut self,
        tree: &dyn SourceTree,
        ctx: &mut ExecutionContext,
    ) -> Result<Vec<Edit>, RecipeError> {
        let Some(unit) = tree.as_any().downcast_ref::<KotlinSource>() else {
            return Ok(Vec::new());
        };

        let formatted = self.format(unit, ctx)?;
        if formatted == unit.printed() {
            return Ok(Vec::new());
        }
        Ok(vec![Edit::new(
            Span::new(0, unit.printed().len()),
            formatted,
            "Auto-format whole file",
        )])
    }
}

/// The formatting pipeline packaged as a recipe
pub struct FormatKotlinSources;

impl Recipe for FormatKotlinSources {
    fn display_name(&self) -> &'static str {
        "Format Kotlin sources"
    }

    fn description(&self) -> &'static str {
        "Applies the whole-file formatting pipeline to Kotlin source files."
    }

    fn visitor(&self) -> Box<dyn TreeVisitor> {
        Box::new(AutoFormat::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kotlinize_core::StyleSet;
    use kotlinize_syntax::MavenDocument;

    fn format(source: &str) -> String {
        let unit = KotlinSource::parse(source).unwrap();
        AutoFormat::new()
            .format(&unit, &ExecutionContext::new())
            .unwrap()
    }

    #[test]
    fn test_formatted_file_is_fixed_point() {
        let source = "fun main() {\n    val xs = listOf(\n        1,\n        2,\n    )\n    println(xs)\n}\n";
        assert_eq!(format(source), source);
    }

    #[test]
    fn test_messy_file_normalised() {
        let source = "fun main() {\n\tval xs = listOf(\n\t\t1,\n\t\t2\n\t)   \n}\n";
        assert_eq!(
            format(source),
            "fun main() {\n    val xs = listOf(\n        1,\n        2,\n    )\n}\n"
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        let source = "fun f(){\nval a=1\n\n\n\n\nreturn a\n}\n";
        let once = format(source);
        assert_eq!(format(&once), once);
    }

    #[test]
    fn test_bound_styles_drive_passes() {
        let styles = StyleSet::new().with(
            crate::styles::OTHER,
            crate::styles::OtherStyle {
                use_trailing_comma: false,
            },
        );
        let unit = KotlinSource::parse("val xs = listOf(\n    1\n)\n")
            .unwrap()
            .with_styles(styles);
        let out = AutoFormat::new()
            .format(&unit, &ExecutionContext::new())
            .unwrap();
        assert_eq!(out, "val xs = listOf(\n    1\n)\n");
    }

    #[test]
    fn test_non_kotlin_tree_passes_through() {
        let pom = MavenDocument::parse("<project><build>   </build></project>").unwrap();
        let mut ctx = ExecutionContext::new();
        let edits = AutoFormat::new().visit(&pom, &mut ctx).unwrap();
        assert!(edits.is_empty());
    }

    #[test]
    fn test_visitor_emits_single_whole_file_edit() {
        let unit = KotlinSource::parse("val a=1\n").unwrap();
        let mut ctx = ExecutionContext::new();
        let edits = AutoFormat::new().visit(&unit, &mut ctx).unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].span, Span::new(0, 8));
        assert_eq!(edits[0].replacement, "val a = 1\n");
    }

    #[test]
    fn test_cancellation_aborts_pipeline() {
        let unit = KotlinSource::parse("val a=1\n").unwrap();
        let ctx = ExecutionContext::new();
        ctx.cancellation_flag()
            .store(true, std::sync::atomic::Ordering::Relaxed);
        let result = AutoFormat::new().format(&unit, &ctx);
        assert!(matches!(result, Err(RecipeError::Cancelled)));
    }

    #[test]
    fn test_stop_after_leaves_tail_unformatted() {
        let source = "val a=1\nval b=2\n";
        let unit = KotlinSource::parse(source).unwrap();
        // marker covering only the first declaration
        let formatter = AutoFormat::with_stop_after(Span::new(0, 7));
        let out = formatter.format(&unit, &ExecutionContext::new()).unwrap();
        assert_eq!(out, "val a = 1\nval b=2\n");
    }
}
