//! Deferred insertion of a child element into an XML tag

use kotlinize_core::{Edit, ExecutionContext, RecipeError, SourceTree, Span, TreeVisitor};
use kotlinize_syntax::xml::{detect_indent_unit, Document, Tag};
use kotlinize_syntax::MavenDocument;

/// Appends an element snippet at the end of a tag's children
///
/// The parent is re-located by its path from the root on every visit, so
/// the visitor composes through the deferred queue: each insertion sees
/// the tree the previous one produced. A missing parent is a silent no-op.
pub struct AddToTagVisitor {
    path: Vec<String>,
    snippet: String,
}

impl AddToTagVisitor {
    pub fn new(
        path: impl IntoIterator<Item = impl Into<String>>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            snippet: snippet.into(),
        }
    }
}

impl TreeVisitor for AddToTagVisitor {
    fn visit(
        &mut self,
        tree: &dyn SourceTree,
        _ctx: &mut ExecutionContext,
    ) -> Result<Vec<Edit>, RecipeError> {
        let Some(doc) = tree.as_any().downcast_ref::<MavenDocument>() else {
            return Ok(Vec::new());
        };

        Document::parse(&self.snippet)
            .map_err(|e| RecipeError::Parse(format!("invalid element snippet: {e}")))?;

        let mut parent = &doc.document().root;
        for name in &self.path {
            match parent.child(name) {
                Some(tag) => parent = tag,
                None => return Ok(Vec::new()),
            }
        }

        Ok(vec![insert_edit(doc.printed(), parent, &self.snippet)])
    }
}

fn insert_edit(source: &str, parent: &Tag, snippet: &str) -> Edit {
    let parent_indent = line_indent(source, parent.span.start);
    let child_indent = match parent.tags().last() {
        Some(last) => line_indent(source, last.span.start).to_string(),
        None => format!("{}{}", parent_indent, " ".repeat(detect_indent_unit(source))),
    };
    let message = format!("Append child element to <{}>", parent.name);

    if parent.self_closing {
        // expand `<tag .../>` into an open/close pair around the new child
        let open = parent.span.slice(source);
        let stem = open.strip_suffix("/>").unwrap_or(open).trim_end();
        let replacement = format!(
            "{stem}>\n{child_indent}{snippet}\n{parent_indent}</{}>",
            parent.name
        );
        return Edit::new(parent.span, replacement, message);
    }

    let insert_at = parent.last_content_end();
    match parent.close_span {
        // replace the whitespace run before the closing tag so the close
        // lands on its own, correctly indented line
        Some(close) if source[insert_at..close.start].trim().is_empty() => Edit::new(
            Span::new(insert_at, close.start),
            format!("\n{child_indent}{snippet}\n{parent_indent}"),
            message,
        ),
        _ => Edit::insert(insert_at, format!("\n{child_indent}{snippet}"), message),
    }
}

/// Leading whitespace of the line containing `offset`
fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let rest = &source[line_start..];
    let ws_len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    &rest[..ws_len.min(offset - line_start)]
}
