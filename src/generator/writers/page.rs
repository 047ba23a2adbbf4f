use askama::Template;

use super::{write_new_file, GenerationContext, WriteOutcome, Writer};
use crate::generator::templates::{LoadingTemplateData, NotFoundTemplateData, PageTemplateData};

/// Emits the route handler files for a page
///
/// `page.tsx` and `loading.tsx` always; `not-found.tsx` for detail and
/// nested-detail pages. An existing `page.tsx` means the route was already
/// generated and the whole step is skipped.
pub struct PageWriter;

impl Writer for PageWriter {
    fn name(&self) -> &'static str {
        "page"
    }

    fn write(&self, ctx: &GenerationContext<'_>) -> anyhow::Result<WriteOutcome> {
        let route_dir = ctx.layout.route_dir(&ctx.config.route.path);
        let page_path = route_dir.join("page.tsx");
        if page_path.exists() {
            return Ok(WriteOutcome::skipped(format!(
                "Page already exists at {}; skipping page generation",
                page_path.display()
            )));
        }

        let mut outcome = WriteOutcome::default();
        let mut files = vec![
            (page_path, PageTemplateData::from_context(ctx).render()?),
            (
                route_dir.join("loading.tsx"),
                LoadingTemplateData::from_context(ctx).render()?,
            ),
        ];
        if ctx.config.page.page_type.has_route_params() {
            files.push((
                route_dir.join("not-found.tsx"),
                NotFoundTemplateData::from_context(ctx).render()?,
            ));
        }

        for (path, contents) in files {
            if write_new_file(&path, &contents)? {
                outcome.files.push(path);
            } else {
                outcome.warnings.push(format!(
                    "{} already exists; left untouched",
                    path.display()
                ));
            }
        }
        Ok(outcome)
    }
}
