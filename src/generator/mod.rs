//! # Generator Module
//!
//! Scaffolds the infrastructure for one dashboard page from a [`PageConfig`].
//!
//! ## Pipeline
//!
//! ```text
//! PageConfig → validate_config → page → schema → component → DAL → breadcrumb → metadata
//! ```
//!
//! 1. **Validation** - every rule in [`validate_config`] runs; any failure aborts
//!    the run before a single file is written
//! 2. **Writers** - run unconditionally in the fixed order above; each one
//!    skips (with a warning) rather than overwrite an existing artifact
//! 3. **Aggregation** - touched files and warnings are concatenated in writer order
//!
//! The pipeline is not transactional. If a writer fails with an I/O error, the
//! files written by earlier writers stay on disk and the error propagates to
//! the caller.
//!
//! ## Generated Structure
//!
//! ```text
//! src/
//! ├── app/mailchimp/reports/[id]/opens/
//! │   ├── page.tsx            # Route handler
//! │   ├── loading.tsx         # Skeleton
//! │   └── not-found.tsx       # detail / nested-detail only
//! ├── schemas/ui/
//! │   └── report-opens-page-params.ts
//! ├── components/mailchimp/reports/
//! │   └── campaign-opens-content.tsx
//! ├── dal/mailchimp.dal.ts                      # + fetch method
//! └── utils/
//!     ├── breadcrumbs/breadcrumb-builder.ts     # + breadcrumb entry
//!     └── mailchimp/metadata.ts, index.ts       # + metadata helper, re-export
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagegen::generator::generate_page_from_config;
//! use pagegen::layout::ProjectLayout;
//! use pagegen::registry::get_page_config;
//!
//! let layout = ProjectLayout::load(".")?;
//! let config = get_page_config("report-opens").unwrap();
//! let result = generate_page_from_config(config, "report-opens", &layout)?;
//! for file in &result.files {
//!     println!("{}", file.display());
//! }
//! ```

mod derive;
mod templates;
pub mod writers;

pub use derive::{
    derive_breadcrumb_label, derive_breadcrumb_parent, derive_features, derive_page_config,
    derive_page_type, GeneratePageRequest, PageConfigOverrides,
};
pub use templates::{import_alias, or_na, ts_string, NOT_AVAILABLE};
pub use writers::{default_writers, GenerationContext, WriteOutcome, Writer};

use serde::Serialize;
use std::path::PathBuf;

use crate::analyzer::analyze_schema;
use crate::config::PageConfig;
use crate::layout::ProjectLayout;
use crate::validator::validate_config;

/// Outcome of one generation run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Every file created or modified, in writer order
    pub files: Vec<PathBuf>,
    /// Skips and manual follow-ups
    pub warnings: Vec<String>,
    pub config: PageConfig,
    pub config_key: String,
}

/// Failure of a generation run
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The config failed validation; nothing was written
    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
    /// A writer failed; files from earlier writers remain on disk
    #[error("{writer} writer failed: {source:#}")]
    Write {
        writer: &'static str,
        source: anyhow::Error,
    },
}

/// Validate `config` and run all writers.
pub fn generate_page_from_config(
    config: &PageConfig,
    config_key: &str,
    layout: &ProjectLayout,
) -> Result<GenerationResult, GenerateError> {
    generate_with_writers(config, config_key, layout, &default_writers())
}

/// [`generate_page_from_config`] with an explicit writer sequence.
pub fn generate_with_writers(
    config: &PageConfig,
    config_key: &str,
    layout: &ProjectLayout,
    writers: &[Box<dyn Writer>],
) -> Result<GenerationResult, GenerateError> {
    let errors = validate_config(config, layout);
    if !errors.is_empty() {
        tracing::warn!(config_key, errors = errors.len(), "Config validation failed");
        return Err(GenerateError::Validation(errors));
    }

    tracing::info!(
        config_key,
        route = %config.route.path,
        page_type = %config.page.page_type,
        "Generating page"
    );

    let ctx = GenerationContext {
        config,
        config_key,
        layout,
    };
    let mut aggregate = WriteOutcome::default();
    for writer in writers {
        let outcome = writer
            .write(&ctx)
            .map_err(|source| GenerateError::Write {
                writer: writer.name(),
                source,
            })?;
        tracing::debug!(
            writer = writer.name(),
            files = outcome.files.len(),
            warnings = outcome.warnings.len(),
            "Writer finished"
        );
        aggregate.merge(outcome);
    }

    Ok(GenerationResult {
        files: aggregate.files,
        warnings: aggregate.warnings,
        config: config.clone(),
        config_key: config_key.to_string(),
    })
}

/// Derive a full config from minimal input, then generate it.
pub fn generate_page(
    request: &GeneratePageRequest,
    layout: &ProjectLayout,
) -> Result<GenerationResult, GenerateError> {
    let analysis = analyze_schema(&layout.resolve(&request.params_schema));
    tracing::debug!(?analysis, schema = %request.params_schema, "Analyzed params schema");
    let (config_key, config) = derive_page_config(request, &analysis);
    generate_page_from_config(&config, &config_key, layout)
}
