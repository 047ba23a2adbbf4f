//! # Schema Analyzer
//!
//! Best-effort inspection of an API parameter schema's raw source text. No
//! parsing happens here: the analyzer matches field-name patterns (`count:`,
//! `campaign_id:`, `sort_field:` ...) and infers what kind of page the schema
//! backs.
//!
//! A schema that cannot be read yields [`SchemaAnalysis::default`], so callers
//! can always fall back to their own defaults.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::config::HttpMethod;

/// Pagination convention of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaginationType {
    /// Mailchimp-style `count` + `offset`
    #[serde(rename = "count-offset")]
    CountOffset,
    /// `page` + `perPage` (or `per_page`)
    #[serde(rename = "page-perPage")]
    PagePerPage,
}

impl fmt::Display for PaginationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationType::CountOffset => f.write_str("count-offset"),
            PaginationType::PagePerPage => f.write_str("page-perPage"),
        }
    }
}

/// What the analyzer found in a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAnalysis {
    pub has_pagination: bool,
    pub pagination_type: Option<PaginationType>,
    /// `*_id` fields, deduplicated, in order of first appearance
    pub path_params: Vec<String>,
    pub has_filters: bool,
    pub has_sorting: bool,
    pub has_date_filters: bool,
    pub suggested_method: HttpMethod,
}

const PAGINATION_FIELDS: &[&str] = &["count", "offset", "page", "perPage", "per_page", "limit"];

const FILTER_FIELDS: &[&str] = &[
    "status",
    "type",
    "fields",
    "exclude_fields",
    "folder_id",
    "segment_id",
    "interest_category_id",
    "member_status",
    "vip_only",
];

const SORT_FIELDS: &[&str] = &["sort_field", "sort_dir", "sortField", "sortDirection", "sortBy"];

const DATE_FILTER_FIELDS: &[&str] = &[
    "since_send_time",
    "before_send_time",
    "since_create_time",
    "before_create_time",
    "since_last_changed",
    "before_last_changed",
    "since_timestamp_opt",
    "before_timestamp_opt",
    "since_date_created",
    "before_date_created",
];

const BODY_FIELDS: &[&str] = &["body", "data", "settings", "payload"];

static PATH_PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(\w+_id):").expect("path param regex")
});

/// Whether `source` declares `field` (i.e. contains `field:` at a word boundary).
fn has_field(source: &str, field: &str) -> bool {
    source.match_indices(field).any(|(idx, _)| {
        let before_ok = source[..idx]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        let after = source[idx + field.len()..].trim_start_matches([' ', '\t', '?']);
        before_ok && after.starts_with(':')
    })
}

fn has_any_field(source: &str, fields: &[&str]) -> bool {
    fields.iter().any(|f| has_field(source, f))
}

/// Analyze a schema file on disk.
///
/// Read failures are logged and produce the zeroed analysis.
pub fn analyze_schema(path: &Path) -> SchemaAnalysis {
    match std::fs::read_to_string(path) {
        Ok(source) => analyze_schema_source(&source),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read schema, using empty analysis");
            SchemaAnalysis::default()
        }
    }
}

/// Analyze schema source text.
pub fn analyze_schema_source(source: &str) -> SchemaAnalysis {
    let has_pagination = has_any_field(source, PAGINATION_FIELDS);

    let pagination_type = if has_field(source, "count") && has_field(source, "offset") {
        Some(PaginationType::CountOffset)
    } else if has_field(source, "page")
        && (has_field(source, "perPage") || has_field(source, "per_page"))
    {
        Some(PaginationType::PagePerPage)
    } else {
        None
    };

    let mut seen = HashSet::new();
    let path_params = PATH_PARAM_RE
        .captures_iter(source)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .filter(|name| seen.insert(name.clone()))
        .collect();

    let has_body = has_any_field(source, BODY_FIELDS);
    let suggested_method = if has_field(source, "status") && has_body {
        HttpMethod::Patch
    } else if has_field(source, "name") && has_body {
        HttpMethod::Post
    } else if has_body {
        HttpMethod::Post
    } else {
        HttpMethod::Get
    };

    SchemaAnalysis {
        has_pagination,
        pagination_type,
        path_params,
        has_filters: has_any_field(source, FILTER_FIELDS),
        has_sorting: has_any_field(source, SORT_FIELDS),
        has_date_filters: has_any_field(source, DATE_FILTER_FIELDS),
        suggested_method,
    }
}
