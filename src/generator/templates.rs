use askama::Template;

use super::writers::GenerationContext;
use crate::config::{HttpMethod, PageConfig, PageType};
use crate::naming;

/// Placeholder rendered for optional fields the config leaves empty
pub const NOT_AVAILABLE: &str = "N/A";

/// Rows shown by the list loading skeleton
const SKELETON_ROWS: usize = 5;

/// Default `perPage` for generated pagination schemas
const DEFAULT_PAGE_SIZE: usize = 10;

/// Quote `s` as a TypeScript string literal.
pub fn ts_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.replace('"', "\\\"")))
}

/// `s`, or [`NOT_AVAILABLE`] when it is blank.
pub fn or_na(s: &str) -> String {
    if s.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        s.to_string()
    }
}

/// Turn a project-relative `src/...` directory into its `@/...` import alias.
pub fn import_alias(dir: &str) -> String {
    let trimmed = dir.trim_start_matches("./").trim_end_matches('/');
    match trimmed.strip_prefix("src/") {
        Some(rest) => format!("@/{rest}"),
        None => format!("@/{trimmed}"),
    }
}

/// Placeholder names in an endpoint (`/reports/{campaign_id}` → `["campaign_id"]`).
pub fn endpoint_placeholders(endpoint: &str) -> Vec<String> {
    naming::route_segments(endpoint)
        .into_iter()
        .filter(|s| naming::is_dynamic_segment(s))
        .map(|s| s.trim_matches(['{', '}', '[', ']', ':']).to_string())
        .collect()
}

fn ts_ident(placeholder: &str) -> String {
    naming::title_to_camel(placeholder)
}

/// Endpoint as a JS template literal body (`/reports/${campaignId}`).
fn endpoint_template(endpoint: &str) -> String {
    endpoint
        .split('/')
        .map(|segment| {
            if naming::is_dynamic_segment(segment) {
                let name = segment.trim_matches(['{', '}', '[', ']', ':']);
                format!("${{{}}}", ts_ident(name))
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Route path as a JS template literal body (`/mailchimp/reports/${id}`).
fn route_template(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            Some(name) => format!("${{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn breadcrumb_label(config: &PageConfig) -> String {
    if config.ui.breadcrumbs.label.trim().is_empty() {
        config.page.title.clone()
    } else {
        config.ui.breadcrumbs.label.clone()
    }
}

/// Arguments the page passes to its DAL method.
///
/// Route params map positionally onto endpoint placeholders; GET calls also
/// receive the parsed query.
fn dal_call_args(config: &PageConfig) -> String {
    let placeholders = endpoint_placeholders(&config.api.endpoint).len();
    let mut args: Vec<String> = config
        .route
        .params
        .iter()
        .take(placeholders)
        .cloned()
        .collect();
    if config.api.method == HttpMethod::Get {
        args.push("query".to_string());
    }
    args.join(", ")
}

/// `page.tsx`: dispatches to the list / detail / nested-detail sub-template
#[derive(Template)]
#[template(path = "page.tsx.txt", escape = "none")]
pub struct PageTemplateData {
    pub config_key: String,
    pub title: String,
    pub title_literal: String,
    pub description: String,
    pub description_literal: String,
    pub page_type: String,
    pub is_list: bool,
    pub is_detail: bool,
    pub method: String,
    pub endpoint: String,
    pub params_schema: String,
    pub response_schema: String,
    pub error_schema: String,
    pub features: String,
    pub component_name: String,
    pub component_import: String,
    pub dal_method: String,
    pub dal_call_args: String,
    pub metadata_fn: String,
    pub schema_const: String,
    pub schema_import: String,
    pub has_pagination: bool,
    pub params_type: String,
    pub primary_param: String,
    pub route_params_joined: String,
    pub breadcrumb_key: String,
    pub parent: String,
    pub has_parent: bool,
}

impl PageTemplateData {
    pub fn from_context(ctx: &GenerationContext<'_>) -> Self {
        let config = ctx.config;
        let layout = &ctx.layout.config;
        let parent = config.ui.breadcrumbs.parent.clone().unwrap_or_default();
        let params_type = format!(
            "{{ {} }}",
            config
                .route
                .params
                .iter()
                .map(|p| format!("{p}: string"))
                .collect::<Vec<_>>()
                .join("; ")
        );
        PageTemplateData {
            config_key: ctx.config_key.to_string(),
            title: config.page.title.clone(),
            title_literal: ts_string(&config.page.title),
            description: or_na(&config.page.description),
            description_literal: ts_string(&config.page.description),
            page_type: config.page.page_type.to_string(),
            is_list: config.page.page_type == PageType::List,
            is_detail: config.page.page_type == PageType::Detail,
            method: config.api.method.to_string(),
            endpoint: config.api.endpoint.clone(),
            params_schema: or_na(&config.schemas.params),
            response_schema: or_na(&config.schemas.response),
            error_schema: or_na(config.schemas.error.as_deref().unwrap_or_default()),
            features: or_na(&config.page.features.join(", ")),
            component_name: naming::component_name(config),
            component_import: format!(
                "{}/{}",
                layout.components_alias.trim_end_matches('/'),
                naming::component_import_path(config)
            ),
            dal_method: naming::dal_method_name(config),
            dal_call_args: dal_call_args(config),
            metadata_fn: naming::metadata_function_name(config),
            schema_const: naming::schema_const_name(ctx.config_key),
            schema_import: format!(
                "{}/{}-page-params",
                import_alias(&layout.ui_schemas_dir),
                ctx.config_key
            ),
            has_pagination: config.ui.has_pagination,
            params_type,
            primary_param: config.primary_param().to_string(),
            route_params_joined: config.route.params.join(", "),
            breadcrumb_key: naming::breadcrumb_key(config),
            has_parent: !parent.is_empty(),
            parent,
        }
    }
}

/// `loading.tsx`
#[derive(Template)]
#[template(path = "loading.tsx.txt", escape = "none")]
pub struct LoadingTemplateData {
    pub title: String,
    pub loading_label_literal: String,
    pub is_list: bool,
    pub skeleton_rows: usize,
}

impl LoadingTemplateData {
    pub fn from_context(ctx: &GenerationContext<'_>) -> Self {
        let config = ctx.config;
        LoadingTemplateData {
            title: config.page.title.clone(),
            loading_label_literal: ts_string(&format!("Loading {}", config.page.title)),
            is_list: config.page.page_type == PageType::List,
            skeleton_rows: SKELETON_ROWS,
        }
    }
}

/// `not-found.tsx` for pages keyed by a route param
#[derive(Template)]
#[template(path = "not_found.tsx.txt", escape = "none")]
pub struct NotFoundTemplateData {
    pub resource_label: String,
    pub not_found_title_literal: String,
    pub not_found_message_literal: String,
    pub back_href_literal: String,
    pub back_label: String,
}

impl NotFoundTemplateData {
    pub fn from_context(ctx: &GenerationContext<'_>) -> Self {
        let config = ctx.config;
        let resource = naming::static_segments(&config.route.path)
            .get(1)
            .map(|s| naming::singularize(s))
            .unwrap_or_else(|| "resource".to_string());
        let resource_label = naming::humanize_segment(&resource);
        let back_href = naming::static_segments(&config.route.path)
            .iter()
            .take(2)
            .fold(String::new(), |acc, s| format!("{acc}/{s}"));
        let back_label = naming::static_segments(&config.route.path)
            .get(1)
            .map(|s| naming::humanize_segment(s))
            .unwrap_or_else(|| "Mailchimp".to_string());
        NotFoundTemplateData {
            not_found_title_literal: ts_string(&format!("{resource_label} not found")),
            not_found_message_literal: ts_string(&format!(
                "The {} you are looking for does not exist or is no longer available.",
                resource_label.to_lowercase()
            )),
            back_href_literal: ts_string(&back_href),
            back_label,
            resource_label,
        }
    }
}

/// `<key>-page-params.ts`
#[derive(Template)]
#[template(path = "schema.ts.txt", escape = "none")]
pub struct SchemaTemplateData {
    pub title: String,
    pub route_path: String,
    pub params_schema: String,
    pub pagination_style: String,
    pub schema_const: String,
    pub schema_type: String,
    pub route_params: Vec<String>,
    pub has_pagination: bool,
    pub default_page_size: usize,
}

impl SchemaTemplateData {
    pub fn from_context(ctx: &GenerationContext<'_>, pagination_style: Option<String>) -> Self {
        let config = ctx.config;
        SchemaTemplateData {
            title: config.page.title.clone(),
            route_path: config.route.path.clone(),
            params_schema: or_na(&config.schemas.params),
            pagination_style: pagination_style.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            schema_const: naming::schema_const_name(ctx.config_key),
            schema_type: naming::kebab_to_pascal(&format!("{}-page-params", ctx.config_key)),
            route_params: config.route.params.clone(),
            has_pagination: config.ui.has_pagination,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Placeholder content component
#[derive(Template)]
#[template(path = "component.tsx.txt", escape = "none")]
pub struct ComponentTemplateData {
    pub title: String,
    pub title_literal: String,
    pub description: String,
    pub route_path: String,
    pub component_name: String,
    pub route_params: Vec<String>,
    pub has_pagination: bool,
}

impl ComponentTemplateData {
    pub fn from_context(ctx: &GenerationContext<'_>) -> Self {
        let config = ctx.config;
        ComponentTemplateData {
            title: config.page.title.clone(),
            title_literal: ts_string(&config.page.title),
            description: or_na(&config.page.description),
            route_path: config.route.path.clone(),
            component_name: naming::component_name(config),
            route_params: config.route.params.clone(),
            has_pagination: config.ui.has_pagination,
        }
    }
}

/// DAL class method snippet
#[derive(Template)]
#[template(path = "dal_method.ts.txt", escape = "none")]
pub struct DalMethodTemplateData {
    pub title: String,
    pub method: String,
    pub endpoint: String,
    pub dal_method: String,
    pub signature: String,
    pub endpoint_template: String,
    pub has_extra_arg: bool,
    pub extra_arg: String,
}

impl DalMethodTemplateData {
    pub fn from_context(ctx: &GenerationContext<'_>) -> Self {
        let config = ctx.config;
        let mut params: Vec<String> = endpoint_placeholders(&config.api.endpoint)
            .iter()
            .map(|p| format!("{}: string", ts_ident(p)))
            .collect();
        let extra_arg = match config.api.method {
            HttpMethod::Get => Some(("params", "params?: Record<string, unknown>")),
            HttpMethod::Delete => None,
            _ => Some(("body", "body?: unknown")),
        };
        if let Some((_, decl)) = extra_arg {
            params.push(decl.to_string());
        }
        DalMethodTemplateData {
            title: config.page.title.clone(),
            method: config.api.method.to_string(),
            endpoint: config.api.endpoint.clone(),
            dal_method: naming::dal_method_name(config),
            signature: params.join(", "),
            endpoint_template: endpoint_template(&config.api.endpoint),
            has_extra_arg: extra_arg.is_some(),
            extra_arg: extra_arg.map(|(name, _)| name.to_string()).unwrap_or_default(),
        }
    }
}

/// Static breadcrumb entry (`key: { label, href },`)
#[derive(Template)]
#[template(path = "breadcrumb_static.ts.txt", escape = "none")]
pub struct StaticBreadcrumbTemplateData {
    pub key: String,
    pub label_literal: String,
    pub href_literal: String,
}

/// Dynamic breadcrumb entry (`key: (id: string) => ({ ... }),`)
#[derive(Template)]
#[template(path = "breadcrumb_dynamic.ts.txt", escape = "none")]
pub struct DynamicBreadcrumbTemplateData {
    pub key: String,
    pub signature: String,
    pub label_literal: String,
    pub href_template: String,
}

/// Render the breadcrumb entry for a page, static or dynamic by its route params.
pub fn render_breadcrumb_entry(config: &PageConfig) -> anyhow::Result<String> {
    let key = naming::breadcrumb_key(config);
    let label_literal = ts_string(&breadcrumb_label(config));
    let rendered = if config.has_route_params() {
        DynamicBreadcrumbTemplateData {
            key,
            signature: config
                .route
                .params
                .iter()
                .map(|p| format!("{p}: string"))
                .collect::<Vec<_>>()
                .join(", "),
            label_literal,
            href_template: route_template(&config.route.path),
        }
        .render()?
    } else {
        StaticBreadcrumbTemplateData {
            key,
            label_literal,
            href_literal: ts_string(&config.route.path),
        }
        .render()?
    };
    Ok(normalize_snippet(&rendered))
}

/// Metadata helper function
#[derive(Template)]
#[template(path = "metadata.ts.txt", escape = "none")]
pub struct MetadataTemplateData {
    pub title: String,
    pub route_path: String,
    pub function_name: String,
    pub signature: String,
    pub title_literal: String,
    pub description_literal: String,
}

impl MetadataTemplateData {
    pub fn from_context(ctx: &GenerationContext<'_>) -> Self {
        let config = ctx.config;
        MetadataTemplateData {
            title: config.page.title.clone(),
            route_path: config.route.path.clone(),
            function_name: naming::metadata_function_name(config),
            signature: config
                .route
                .params
                .iter()
                .map(|p| format!("{p}?: string"))
                .collect::<Vec<_>>()
                .join(", "),
            title_literal: ts_string(&format!("{} | Mailchimp", config.page.title)),
            description_literal: ts_string(&or_na(&config.page.description)),
        }
    }
}

/// Trim trailing blank lines and end with exactly one newline.
pub fn normalize_snippet(rendered: &str) -> String {
    format!("{}\n", rendered.trim_end())
}
