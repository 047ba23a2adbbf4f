use askama::Template;

use super::{GenerationContext, WriteOutcome, Writer};
use crate::generator::templates::{normalize_snippet, DalMethodTemplateData};
use crate::naming;
use crate::source_model::SourceDocument;

/// Adds the page's fetch method to the shared DAL class
///
/// Methods are kept in alphabetical order; a method that sorts after every
/// existing member goes at the end of the class body.
pub struct DalWriter;

impl Writer for DalWriter {
    fn name(&self) -> &'static str {
        "dal"
    }

    fn write(&self, ctx: &GenerationContext<'_>) -> anyhow::Result<WriteOutcome> {
        let path = ctx.layout.dal_file();
        let method = naming::dal_method_name(ctx.config);
        let mut doc = SourceDocument::load(&path)?;

        if doc.declares(&method) {
            return Ok(WriteOutcome::skipped(format!(
                "DAL method {method} already exists in {}; skipping DAL update",
                path.display()
            )));
        }

        let Some(class) = doc.class_section(None) else {
            return Ok(WriteOutcome::skipped(format!(
                "No DAL class found in {}; add {method} manually",
                path.display()
            )));
        };

        let snippet = normalize_snippet(&DalMethodTemplateData::from_context(ctx).render()?);
        let (offset, text) = match class.successor(&method) {
            Some(next) => (next.span.start, format!("{snippet}\n")),
            None if class.entries.is_empty() => (class.body.start, snippet),
            None => (class.sorted_insert_offset(&method), format!("\n{snippet}")),
        };
        doc.insert_at(offset, &text);
        doc.save()?;

        tracing::info!(method = %method, class = %class.title, path = %path.display(), "Added DAL method");
        Ok(WriteOutcome {
            files: vec![path],
            warnings: Vec::new(),
        })
    }
}
