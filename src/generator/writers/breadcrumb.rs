use super::{GenerationContext, WriteOutcome, Writer};
use crate::generator::templates::render_breadcrumb_entry;
use crate::naming;
use crate::source_model::SourceDocument;

/// Header of the section holding plain `{ label, href }` entries
pub const STATIC_SECTION: &str = "Static Routes";
/// Header of the section holding `(param) => ({ label, href })` entries
pub const DYNAMIC_SECTION: &str = "Dynamic Route Functions";

const SECTIONS: &[&str] = &[STATIC_SECTION, DYNAMIC_SECTION];

/// Adds the page's entry to the shared breadcrumb builder
///
/// Pages without route params go to the static section, the rest to the
/// dynamic one. Both sections stay alphabetically ordered.
pub struct BreadcrumbWriter;

impl Writer for BreadcrumbWriter {
    fn name(&self) -> &'static str {
        "breadcrumb"
    }

    fn write(&self, ctx: &GenerationContext<'_>) -> anyhow::Result<WriteOutcome> {
        let path = ctx.layout.breadcrumb_file();
        let key = naming::breadcrumb_key(ctx.config);
        let mut doc = SourceDocument::load(&path)?;

        if doc.declares(&key) {
            return Ok(WriteOutcome::skipped(format!(
                "Breadcrumb {key} already exists in {}; skipping breadcrumb update",
                path.display()
            )));
        }

        let section_title = if ctx.config.has_route_params() {
            DYNAMIC_SECTION
        } else {
            STATIC_SECTION
        };
        let Some(section) = doc.comment_section(section_title, SECTIONS) else {
            return Ok(WriteOutcome::skipped(format!(
                "Section \"// {section_title}\" not found in {}; add breadcrumb {key} manually",
                path.display()
            )));
        };

        let entry = render_breadcrumb_entry(ctx.config)?;
        doc.insert_at(section.sorted_insert_offset(&key), &entry);
        doc.save()?;

        tracing::info!(key = %key, section = section_title, path = %path.display(), "Added breadcrumb");
        Ok(WriteOutcome {
            files: vec![path],
            warnings: Vec::new(),
        })
    }
}
