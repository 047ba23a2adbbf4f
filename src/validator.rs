//! # Config Validator
//!
//! Structural checks run before any file is written. Every rule is evaluated
//! independently and contributes its own message, so one pass reports every
//! problem with a config:
//!
//! 1. **Schema files** - each configured schema path must exist
//! 2. **Route prefix** - `route.path` must start with `/mailchimp/`
//! 3. **Param count** - `[name]` groups in the path must match `route.params`
//! 4. **List pages** - no route params
//! 5. **Detail pages** - exactly one param, path depth at most 3
//! 6. **Nested-detail pages** - path depth greater than 3
//! 7. **Endpoint** - `api.endpoint` must start with `/`
//! 8. **Nested-detail breadcrumbs** - `ui.breadcrumbs.parent` must be set
//!
//! [`check_files_will_be_generated`] is the matching dry run: it predicts what
//! each writer will create or touch without writing anything.

use serde::Serialize;
use std::path::PathBuf;

use crate::config::{PageConfig, PageType, ROUTE_PREFIX};
use crate::layout::ProjectLayout;
use crate::naming;

/// Validate a config, returning one message per failed rule (empty = valid).
pub fn validate_config(config: &PageConfig, layout: &ProjectLayout) -> Vec<String> {
    let mut errors = Vec::new();

    check_schema_files(config, layout, &mut errors);

    let path = &config.route.path;
    if !path.starts_with(ROUTE_PREFIX) {
        errors.push(format!(
            "Route path must start with {ROUTE_PREFIX} (got: {path})"
        ));
    }

    let bracket_count = naming::bracket_params(path).len();
    let param_count = config.route.params.len();
    if bracket_count != param_count {
        errors.push(format!(
            "Route path has {bracket_count} dynamic segment(s) but {param_count} route param(s) were provided"
        ));
    }

    let depth = naming::route_depth(path);
    match config.page.page_type {
        PageType::List => {
            if param_count > 0 {
                errors.push(format!(
                    "List pages cannot have route params (found: {})",
                    config.route.params.join(", ")
                ));
            }
        }
        PageType::Detail => {
            if param_count != 1 {
                errors.push(format!(
                    "Detail pages require exactly one route param (found {param_count})"
                ));
            }
            if depth > 3 {
                errors.push(format!(
                    "Detail pages must be at most 3 segments deep (found depth {depth}); use nested-detail"
                ));
            }
        }
        PageType::NestedDetail => {
            if depth <= 3 {
                errors.push(format!(
                    "Nested-detail pages must be more than 3 segments deep (found depth {depth})"
                ));
            }
        }
    }

    if !config.api.endpoint.starts_with('/') {
        errors.push(format!(
            "API endpoint must start with '/' (got: {})",
            config.api.endpoint
        ));
    }

    if config.page.page_type == PageType::NestedDetail
        && config
            .ui
            .breadcrumbs
            .parent
            .as_deref()
            .is_none_or(str::is_empty)
    {
        errors.push("Nested-detail pages must set ui.breadcrumbs.parent".to_string());
    }

    errors
}

fn check_schema_files(config: &PageConfig, layout: &ProjectLayout, errors: &mut Vec<String>) {
    let schemas = [
        ("Params", Some(config.schemas.params.as_str())),
        ("Response", Some(config.schemas.response.as_str())),
        ("Error", config.schemas.error.as_deref()),
    ];
    for (label, path) in schemas {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            continue;
        };
        if !layout.resolve(path).exists() {
            errors.push(format!("{label} schema file not found: {path}"));
        }
    }
}

/// Predicted effect of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePlan {
    pub will_create: Vec<PathBuf>,
    pub will_modify: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl FilePlan {
    fn new_file(&mut self, path: PathBuf) {
        if path.exists() {
            self.warnings.push(format!(
                "{} already exists and will be skipped",
                path.display()
            ));
            self.will_modify.push(path);
        } else {
            self.will_create.push(path);
        }
    }

    fn shared_file(&mut self, path: PathBuf) {
        if !path.exists() {
            self.warnings.push(format!(
                "{} does not exist; generation will fail at this step",
                path.display()
            ));
        }
        self.will_modify.push(path);
    }
}

/// Predict which files a run for `config_key` will create or modify.
///
/// Only existence checks are performed; nothing is written.
pub fn check_files_will_be_generated(
    config: &PageConfig,
    config_key: &str,
    layout: &ProjectLayout,
) -> FilePlan {
    let mut plan = FilePlan::default();

    let route_dir = layout.route_dir(&config.route.path);
    plan.new_file(route_dir.join("page.tsx"));
    plan.new_file(route_dir.join("loading.tsx"));
    if config.page.page_type.has_route_params() {
        plan.new_file(route_dir.join("not-found.tsx"));
    }

    plan.new_file(
        layout
            .ui_schemas_dir()
            .join(naming::schema_file_name(config_key)),
    );
    plan.new_file(
        layout
            .components_dir()
            .join(naming::category(&config.route.path))
            .join(naming::component_file_name(config)),
    );

    plan.shared_file(layout.dal_file());
    plan.shared_file(layout.breadcrumb_file());
    plan.shared_file(layout.metadata_file());
    plan.shared_file(layout.metadata_exports_file());

    plan
}
