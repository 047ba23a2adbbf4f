//! # Writers
//!
//! Each writer emits or mutates one category of generated artifact. Writers
//! never overwrite: when the target file (or the named entity inside a shared
//! file) already exists, the writer touches nothing and explains the skip in
//! its warnings.
//!
//! | Writer | Target | Kind |
//! |---|---|---|
//! | [`PageWriter`] | `page.tsx`, `loading.tsx`, `not-found.tsx` | new files |
//! | [`SchemaWriter`] | `<key>-page-params.ts` | new file |
//! | [`ComponentWriter`] | `<category>/<title>-content.tsx` | new file |
//! | [`DalWriter`] | DAL class method | shared file |
//! | [`BreadcrumbWriter`] | breadcrumb builder entry | shared file |
//! | [`MetadataWriter`] | metadata helper + re-export | shared files |

mod breadcrumb;
mod component;
mod dal;
mod metadata;
mod page;
mod schema;

pub use breadcrumb::{BreadcrumbWriter, DYNAMIC_SECTION, STATIC_SECTION};
pub use component::ComponentWriter;
pub use dal::DalWriter;
pub use metadata::MetadataWriter;
pub use page::PageWriter;
pub use schema::SchemaWriter;

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PageConfig;
use crate::layout::ProjectLayout;

/// Everything a writer needs for one generation run
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub config: &'a PageConfig,
    pub config_key: &'a str,
    pub layout: &'a ProjectLayout,
}

/// Files a writer touched and the advisories it raised
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl WriteOutcome {
    /// A skipped step: no files, one warning.
    pub fn skipped(warning: impl Into<String>) -> Self {
        WriteOutcome {
            files: Vec::new(),
            warnings: vec![warning.into()],
        }
    }

    pub fn merge(&mut self, other: WriteOutcome) {
        self.files.extend(other.files);
        self.warnings.extend(other.warnings);
    }
}

/// One step of the generation pipeline
pub trait Writer {
    /// Short name used in logs (`page`, `dal`, ...)
    fn name(&self) -> &'static str;

    /// Create or update this writer's artifacts.
    ///
    /// Conflicts are reported as warnings; errors are reserved for I/O and
    /// rendering failures, which abort the run with earlier writes left in place.
    fn write(&self, ctx: &GenerationContext<'_>) -> anyhow::Result<WriteOutcome>;
}

/// The six writers in pipeline order.
pub fn default_writers() -> Vec<Box<dyn Writer>> {
    vec![
        Box::new(PageWriter),
        Box::new(SchemaWriter),
        Box::new(ComponentWriter),
        Box::new(DalWriter),
        Box::new(BreadcrumbWriter),
        Box::new(MetadataWriter),
    ]
}

/// Write a brand-new file, creating parent directories.
///
/// Returns `Ok(false)` without touching anything when `path` already exists.
pub(crate) fn write_new_file(path: &Path, contents: &str) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Created file");
    Ok(true)
}
