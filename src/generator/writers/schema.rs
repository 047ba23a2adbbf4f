use askama::Template;

use super::{write_new_file, GenerationContext, WriteOutcome, Writer};
use crate::analyzer::analyze_schema;
use crate::generator::templates::SchemaTemplateData;
use crate::naming;

/// Emits the page's UI params schema (`<key>-page-params.ts`)
pub struct SchemaWriter;

impl Writer for SchemaWriter {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn write(&self, ctx: &GenerationContext<'_>) -> anyhow::Result<WriteOutcome> {
        let path = ctx
            .layout
            .ui_schemas_dir()
            .join(naming::schema_file_name(ctx.config_key));
        if path.exists() {
            return Ok(WriteOutcome::skipped(format!(
                "Schema already exists at {}; skipping schema generation",
                path.display()
            )));
        }

        let pagination_style = if ctx.config.schemas.params.is_empty() {
            None
        } else {
            analyze_schema(&ctx.layout.resolve(&ctx.config.schemas.params))
                .pagination_type
                .map(|t| t.to_string())
        };
        let rendered = SchemaTemplateData::from_context(ctx, pagination_style).render()?;
        write_new_file(&path, &rendered)?;
        Ok(WriteOutcome {
            files: vec![path],
            warnings: Vec::new(),
        })
    }
}
