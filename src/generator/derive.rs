//! Derivation of a full [`PageConfig`] from minimal input
//!
//! Every derived field is a pure function of the route path, the endpoint and
//! the params schema analysis, and every one of them can be pinned through
//! [`PageConfigOverrides`].

use serde::{Deserialize, Serialize};

use crate::analyzer::SchemaAnalysis;
use crate::config::{
    ApiConfig, BreadcrumbConfig, HttpMethod, PageConfig, PageMeta, PageType, RouteConfig,
    SchemaPaths, UiConfig,
};
use crate::naming;

/// Minimal input for [`generate_page`](super::generate_page)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePageRequest {
    /// API params schema, relative to the project root
    pub params_schema: String,
    /// API response schema, relative to the project root
    pub response_schema: String,
    #[serde(default)]
    pub error_schema: Option<String>,
    /// Dashboard route, e.g. `/mailchimp/reports/[id]/clicks`
    pub route_path: String,
    /// Mailchimp endpoint, e.g. `/reports/{campaign_id}/click-details`
    pub api_endpoint: String,
    #[serde(default)]
    pub overrides: PageConfigOverrides,
}

/// Per-field overrides for derived values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfigOverrides {
    pub config_key: Option<String>,
    pub page_type: Option<PageType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub method: Option<HttpMethod>,
    pub dal_method: Option<String>,
    pub has_pagination: Option<bool>,
    pub breadcrumb_label: Option<String>,
    pub breadcrumb_parent: Option<String>,
    pub features: Option<Vec<String>>,
}

/// Page type implied by a route: no params → list, one param within three
/// segments → detail, anything deeper → nested-detail.
pub fn derive_page_type(route_path: &str) -> PageType {
    let params = naming::bracket_params(route_path).len();
    let depth = naming::route_depth(route_path);
    match params {
        0 => PageType::List,
        1 if depth <= 3 => PageType::Detail,
        _ => PageType::NestedDetail,
    }
}

/// Breadcrumb label: the last static segment, humanized (`open-details` → `Open Details`).
pub fn derive_breadcrumb_label(route_path: &str) -> String {
    naming::static_segments(route_path)
        .last()
        .map(|s| naming::humanize_segment(s))
        .unwrap_or_else(|| "Mailchimp".to_string())
}

/// Breadcrumb parent key.
///
/// Lists hang off `mailchimp`, details off their collection (`reports`), and
/// nested details off the detail page of the first resource (`reportDetail`).
pub fn derive_breadcrumb_parent(route_path: &str, page_type: PageType) -> Option<String> {
    let statics = naming::static_segments(route_path);
    let resource = statics.get(1)?;
    match page_type {
        PageType::List if statics.len() > 2 => Some(naming::title_to_camel(resource)),
        PageType::List => Some("mailchimp".to_string()),
        PageType::Detail => Some(naming::title_to_camel(resource)),
        PageType::NestedDetail => Some(format!(
            "{}Detail",
            naming::title_to_camel(&naming::singularize(resource))
        )),
    }
}

/// Feature tags from the page shape and schema capabilities.
pub fn derive_features(page_type: PageType, has_pagination: bool, analysis: &SchemaAnalysis) -> Vec<String> {
    let mut features = Vec::new();
    match page_type {
        PageType::List => features.push("data-table"),
        PageType::Detail | PageType::NestedDetail => features.push("detail-view"),
    }
    if has_pagination {
        features.push("pagination");
    }
    if analysis.has_filters {
        features.push("filters");
    }
    if analysis.has_sorting {
        features.push("sorting");
    }
    if analysis.has_date_filters {
        features.push("date-range");
    }
    if page_type != PageType::List {
        features.push("not-found");
    }
    features.into_iter().map(str::to_string).collect()
}

/// Build the config key and full [`PageConfig`] for a request.
pub fn derive_page_config(
    request: &GeneratePageRequest,
    analysis: &SchemaAnalysis,
) -> (String, PageConfig) {
    let overrides = &request.overrides;
    let route_path = request.route_path.as_str();

    let config_key = overrides
        .config_key
        .clone()
        .unwrap_or_else(|| naming::derive_config_key(route_path));
    let page_type = overrides
        .page_type
        .unwrap_or_else(|| derive_page_type(route_path));
    let title = overrides
        .title
        .clone()
        .unwrap_or_else(|| naming::humanize_segment(&config_key));
    let description = overrides
        .description
        .clone()
        .unwrap_or_else(|| format!("View {}", title.to_lowercase()));
    let has_pagination = overrides.has_pagination.unwrap_or(analysis.has_pagination);
    let features = overrides
        .features
        .clone()
        .unwrap_or_else(|| derive_features(page_type, has_pagination, analysis));

    let config = PageConfig {
        schemas: SchemaPaths {
            params: request.params_schema.clone(),
            response: request.response_schema.clone(),
            error: request.error_schema.clone(),
        },
        route: RouteConfig {
            path: request.route_path.clone(),
            params: naming::bracket_params(route_path),
        },
        api: ApiConfig {
            endpoint: request.api_endpoint.clone(),
            method: overrides.method.unwrap_or(analysis.suggested_method),
            dal_method: overrides.dal_method.clone(),
        },
        page: PageMeta {
            page_type,
            title,
            description,
            features,
        },
        ui: UiConfig {
            has_pagination,
            breadcrumbs: BreadcrumbConfig {
                label: overrides
                    .breadcrumb_label
                    .clone()
                    .unwrap_or_else(|| derive_breadcrumb_label(route_path)),
                parent: overrides
                    .breadcrumb_parent
                    .clone()
                    .or_else(|| derive_breadcrumb_parent(route_path, page_type)),
            },
        },
    };
    (config_key, config)
}
