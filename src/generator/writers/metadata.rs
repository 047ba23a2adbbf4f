use askama::Template;

use super::{GenerationContext, WriteOutcome, Writer};
use crate::generator::templates::{normalize_snippet, MetadataTemplateData};
use crate::naming;
use crate::source_model::SourceDocument;

/// Module specifier the aggregator re-exports the helpers from
const METADATA_MODULE: &str = "./metadata";

/// Appends the page's metadata helper and re-exports it
///
/// The re-export is best effort: if the aggregator has no
/// `export { ... } from "./metadata"` block the helper is still written and
/// the run carries a warning asking for the export to be added by hand.
pub struct MetadataWriter;

impl Writer for MetadataWriter {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn write(&self, ctx: &GenerationContext<'_>) -> anyhow::Result<WriteOutcome> {
        let path = ctx.layout.metadata_file();
        let function = naming::metadata_function_name(ctx.config);
        let mut doc = SourceDocument::load(&path)?;

        if doc.declares(&function) {
            return Ok(WriteOutcome::skipped(format!(
                "Metadata function {function} already exists in {}; skipping metadata update",
                path.display()
            )));
        }

        let snippet = normalize_snippet(&MetadataTemplateData::from_context(ctx).render()?);
        doc.append(&snippet);
        doc.save()?;
        tracing::info!(function = %function, path = %path.display(), "Added metadata helper");

        let mut outcome = WriteOutcome {
            files: vec![path],
            warnings: Vec::new(),
        };
        outcome.merge(update_exports(ctx, &function)?);
        Ok(outcome)
    }
}

fn update_exports(ctx: &GenerationContext<'_>, function: &str) -> anyhow::Result<WriteOutcome> {
    let path = ctx.layout.metadata_exports_file();
    let manual = format!("export {{ {function} }} from \"{METADATA_MODULE}\"");

    if !path.exists() {
        return Ok(WriteOutcome::skipped(format!(
            "Metadata exports file {} not found; add `{manual}` manually",
            path.display()
        )));
    }
    let mut doc = SourceDocument::load(&path)?;

    if doc.reexports_all(METADATA_MODULE) {
        tracing::debug!(function, "Metadata module is re-exported wholesale");
        return Ok(WriteOutcome::default());
    }

    let Some(mut exports) = doc.export_list(METADATA_MODULE) else {
        return Ok(WriteOutcome::skipped(format!(
            "Could not find the metadata export block in {}; add `{manual}` manually",
            path.display()
        )));
    };
    if exports.contains(function) {
        tracing::debug!(function, "Metadata helper already exported");
        return Ok(WriteOutcome::default());
    }

    exports.insert(function);
    doc.replace_range(exports.span.clone(), &exports.render());
    doc.save()?;
    tracing::info!(function, path = %path.display(), "Exported metadata helper");
    Ok(WriteOutcome {
        files: vec![path],
        warnings: Vec::new(),
    })
}
