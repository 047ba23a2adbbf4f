//! # Page Configuration Model
//!
//! [`PageConfig`] is the declarative description of one generated page. It is
//! either looked up from the [registry](crate::registry) by key or synthesized by
//! [`generate_page`](crate::generator::generate_page), consumed once by the
//! generator, and discarded.
//!
//! Configs serialize with camelCase keys, so a YAML registry overlay reads like
//! the dashboard's own config literals:
//!
//! ```yaml
//! report-clicks:
//!   schemas:
//!     params: src/schemas/mailchimp/reports/click-details-params.schema.ts
//!     response: src/schemas/mailchimp/reports/click-details-success.schema.ts
//!   route:
//!     path: /mailchimp/reports/[id]/clicks
//!     params: [id]
//!   api:
//!     endpoint: /reports/{campaign_id}/click-details
//!     method: GET
//!   page:
//!     type: nested-detail
//!     title: Click Details
//!     description: Member click activity for a campaign
//!     features: [pagination]
//!   ui:
//!     hasPagination: true
//!     breadcrumbs:
//!       label: Clicks
//!       parent: reportDetail
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed prefix every generated route lives under.
pub const ROUTE_PREFIX: &str = "/mailchimp/";

/// Schema source files a page is built from. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SchemaPaths {
    /// Request parameter schema (query + path params)
    pub params: String,
    /// Success response schema
    pub response: String,
    /// Error response schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Dashboard route for the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RouteConfig {
    /// Route path, e.g. `/mailchimp/reports/[id]/opens`
    pub path: String,
    /// Names of the bracketed segments, in path order
    #[serde(default)]
    pub params: Vec<String>,
}

/// HTTP method of the upstream API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Patch,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown HTTP method: {s}"))
    }
}

/// Upstream Mailchimp API call backing the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Mailchimp endpoint, e.g. `/reports/{campaign_id}/open-details`
    pub endpoint: String,
    #[serde(default)]
    pub method: HttpMethod,
    /// Explicit DAL method name; derived from the endpoint when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dal_method: Option<String>,
}

/// Shape of the generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    #[default]
    List,
    Detail,
    NestedDetail,
}

impl PageType {
    pub const ALL: [PageType; 3] = [PageType::List, PageType::Detail, PageType::NestedDetail];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::List => "list",
            PageType::Detail => "detail",
            PageType::NestedDetail => "nested-detail",
        }
    }

    /// Whether routes of this type take a dynamic segment.
    pub fn has_route_params(&self) -> bool {
        !matches!(self, PageType::List)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| anyhow::anyhow!("unknown page type: {s}"))
    }
}

/// Page metadata rendered into the generated files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageMeta {
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Breadcrumb entry for the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BreadcrumbConfig {
    pub label: String,
    /// Key of the parent breadcrumb; required for nested-detail pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// UI options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default)]
    pub has_pagination: bool,
    pub breadcrumbs: BreadcrumbConfig,
}

/// Declarative description of one generated page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageConfig {
    pub schemas: SchemaPaths,
    pub route: RouteConfig,
    pub api: ApiConfig,
    pub page: PageMeta,
    pub ui: UiConfig,
}

impl PageConfig {
    /// Whether the route has any dynamic segment.
    pub fn has_route_params(&self) -> bool {
        !self.route.params.is_empty()
    }

    /// First route param, or `id` for pages that have none.
    pub fn primary_param(&self) -> &str {
        self.route.params.first().map(String::as_str).unwrap_or("id")
    }
}
