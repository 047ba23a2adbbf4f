use askama::Template;

use super::{write_new_file, GenerationContext, WriteOutcome, Writer};
use crate::generator::templates::ComponentTemplateData;
use crate::naming;

/// Emits the placeholder content component under the route's category directory
pub struct ComponentWriter;

impl Writer for ComponentWriter {
    fn name(&self) -> &'static str {
        "component"
    }

    fn write(&self, ctx: &GenerationContext<'_>) -> anyhow::Result<WriteOutcome> {
        let path = ctx
            .layout
            .components_dir()
            .join(naming::category(&ctx.config.route.path))
            .join(naming::component_file_name(ctx.config));
        if path.exists() {
            return Ok(WriteOutcome::skipped(format!(
                "Component {} already exists at {}; skipping component generation",
                naming::component_name(ctx.config),
                path.display()
            )));
        }

        let rendered = ComponentTemplateData::from_context(ctx).render()?;
        write_new_file(&path, &rendered)?;
        Ok(WriteOutcome {
            files: vec![path],
            warnings: Vec::new(),
        })
    }
}
