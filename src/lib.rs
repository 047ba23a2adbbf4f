//! # pagegen
//!
//! **pagegen** scaffolds dashboard pages for a Next.js app that fronts the
//! Mailchimp Marketing API. Given a page description (route, API endpoint,
//! schemas, page shape) it writes the route handler files, a UI params
//! schema, a content component, and splices the matching entries into the
//! project's shared DAL, breadcrumb and metadata modules.
//!
//! ## Architecture
//!
//! - **[`config`]** - the [`PageConfig`](config::PageConfig) data model
//! - **[`registry`]** - built-in configs keyed by short names (`report-clicks`)
//! - **[`layout`]** - where generated files live, optionally from `pagegen.toml`
//! - **[`analyzer`]** - pattern-based inspection of API params schemas
//! - **[`validator`]** - structural checks and the pre-flight file plan
//! - **[`source_model`]** - sections and declarations of shared TypeScript files
//! - **[`generator`]** - askama templates, the six writers, orchestration
//! - **[`naming`]** - every derived identifier and file name
//! - **[`cli`]** - the `pagegen` command line, interactive and scripted
//! - **[`logging`]** - `tracing-subscriber` setup for the binary
//!
//! ### Generation Flow
//!
//! ```text
//! CLI ─► registry / prompts / derive ─► PageConfig
//!                                          │
//!                                          ▼
//!                                   validate_config ──► errors: abort, nothing written
//!                                          │
//!                                          ▼
//!        page → schema → component → DAL → breadcrumb → metadata
//!                                          │
//!                                          ▼
//!                          GenerationResult { files, warnings }
//! ```
//!
//! Writers never overwrite. An artifact that already exists is skipped and
//! reported as a warning, so running the same config twice is safe.
//!
//! ## Quick Start
//!
//! ```bash
//! # Generate a registered page
//! pagegen from-config report-clicks
//!
//! # Walk through a new page interactively
//! pagegen generate
//!
//! # Derive everything from a route and an endpoint
//! pagegen quick \
//!     --route '/mailchimp/reports/[id]/opens' \
//!     --endpoint '/reports/{campaign_id}/open-details' \
//!     --params-schema src/schemas/mailchimp/reports/open-details-params.schema.ts \
//!     --response-schema src/schemas/mailchimp/reports/open-details-success.schema.ts
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod generator;
pub mod layout;
pub mod logging;
pub mod naming;
pub mod registry;
pub mod source_model;
pub mod validator;

pub use config::PageConfig;
pub use generator::{
    generate_page, generate_page_from_config, GenerateError, GeneratePageRequest,
    GenerationResult,
};
pub use layout::ProjectLayout;
