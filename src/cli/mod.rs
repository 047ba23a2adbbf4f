//! # CLI Module
//!
//! Command-line front-ends for the page generator. Both flows collect or look
//! up a [`PageConfig`](crate::config::PageConfig) and hand it to
//! [`generate_page_from_config`](crate::generator::generate_page_from_config);
//! they add no generation logic of their own.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Walk through a new page interactively:
//!
//! ```bash
//! pagegen generate
//! ```
//!
//! Steps: schema selection, route, API, UI, validation, review, safety check,
//! generation. Ctrl-C, Ctrl-D or declining a confirmation cancels the run and
//! exits 0 without writing anything.
//!
//! ### `from-config`
//!
//! Generate a registered page without prompting:
//!
//! ```bash
//! pagegen from-config report-clicks
//! ```
//!
//! A missing or unknown key prints usage plus the registered keys and exits 1.
//!
//! ### `list`, `check`, `analyze`, `quick`
//!
//! ```bash
//! pagegen list                          # registered keys
//! pagegen check report-clicks           # validation + file plan, writes nothing
//! pagegen analyze src/schemas/mailchimp/reports/click-details-params.schema.ts
//! pagegen quick --route '/mailchimp/lists/[id]/members' \
//!     --endpoint '/lists/{list_id}/members' \
//!     --params-schema src/schemas/mailchimp/lists/members-params.schema.ts \
//!     --response-schema src/schemas/mailchimp/lists/members-success.schema.ts
//! ```
//!
//! ## Global Options
//!
//! - `--root <DIR>` - project root (env `PAGEGEN_ROOT`, default: current directory)
//! - `--registry <FILE>` - YAML map of extra page configs layered over the built-ins
//! - `-v, --verbose` - debug logging
//!
//! ## Exit Codes
//!
//! `0` on success or user cancellation, `1` on any validation or generation failure.

mod commands;
mod interactive;
mod report;


pub use commands::{run, run_cli, Cli, Commands};
pub use interactive::{
    run_interactive, InteractiveOutcome, PromptError, Prompter, ReadlinePrompter, ScriptedPrompter,
};
