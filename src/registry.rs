//! # Page Config Registry
//!
//! Compile-time map from config keys to [`PageConfig`] literals. This is what
//! `pagegen from-config <key>` looks up and what other scripts rely on through
//! [`get_page_config`], [`has_page_config`] and [`get_page_config_keys`].
//!
//! Scripted runs can layer extra configs on top with a YAML file
//! ([`Registry::with_overlay_file`]); the built-in map itself is never written.

use anyhow::Context;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{
    ApiConfig, BreadcrumbConfig, HttpMethod, PageConfig, PageMeta, PageType, RouteConfig,
    SchemaPaths, UiConfig,
};

struct Entry {
    key: &'static str,
    schema_dir: &'static str,
    schema_stem: &'static str,
    route: &'static str,
    params: &'static [&'static str],
    endpoint: &'static str,
    page_type: PageType,
    title: &'static str,
    description: &'static str,
    features: &'static [&'static str],
    has_pagination: bool,
    label: &'static str,
    parent: Option<&'static str>,
}

impl Entry {
    fn build(&self) -> PageConfig {
        let schema = |suffix: &str| {
            format!(
                "src/schemas/mailchimp/{}/{}-{suffix}.schema.ts",
                self.schema_dir, self.schema_stem
            )
        };
        PageConfig {
            schemas: SchemaPaths {
                params: schema("params"),
                response: schema("success"),
                error: Some(schema("error")),
            },
            route: RouteConfig {
                path: self.route.to_string(),
                params: self.params.iter().map(|p| p.to_string()).collect(),
            },
            api: ApiConfig {
                endpoint: self.endpoint.to_string(),
                method: HttpMethod::Get,
                dal_method: None,
            },
            page: PageMeta {
                page_type: self.page_type,
                title: self.title.to_string(),
                description: self.description.to_string(),
                features: self.features.iter().map(|f| f.to_string()).collect(),
            },
            ui: UiConfig {
                has_pagination: self.has_pagination,
                breadcrumbs: BreadcrumbConfig {
                    label: self.label.to_string(),
                    parent: self.parent.map(str::to_string),
                },
            },
        }
    }
}

const ENTRIES: &[Entry] = &[
    Entry {
        key: "lists",
        schema_dir: "lists",
        schema_stem: "lists",
        route: "/mailchimp/lists",
        params: &[],
        endpoint: "/lists",
        page_type: PageType::List,
        title: "Lists",
        description: "All audiences in the connected Mailchimp account",
        features: &["data-table", "pagination", "sorting", "date-range"],
        has_pagination: true,
        label: "Lists",
        parent: Some("mailchimp"),
    },
    Entry {
        key: "list-detail",
        schema_dir: "lists",
        schema_stem: "list",
        route: "/mailchimp/lists/[id]",
        params: &["id"],
        endpoint: "/lists/{list_id}",
        page_type: PageType::Detail,
        title: "List Detail",
        description: "Stats, settings and contact info for a single audience",
        features: &["detail-view", "not-found"],
        has_pagination: false,
        label: "List",
        parent: Some("lists"),
    },
    Entry {
        key: "list-members",
        schema_dir: "lists",
        schema_stem: "members",
        route: "/mailchimp/lists/[id]/members",
        params: &["id"],
        endpoint: "/lists/{list_id}/members",
        page_type: PageType::NestedDetail,
        title: "List Members",
        description: "Members subscribed to an audience",
        features: &["detail-view", "pagination", "filters", "not-found"],
        has_pagination: true,
        label: "Members",
        parent: Some("listDetail"),
    },
    Entry {
        key: "reports",
        schema_dir: "reports",
        schema_stem: "reports",
        route: "/mailchimp/reports",
        params: &[],
        endpoint: "/reports",
        page_type: PageType::List,
        title: "Reports",
        description: "Performance reports for sent campaigns",
        features: &["data-table", "pagination", "filters", "date-range"],
        has_pagination: true,
        label: "Reports",
        parent: Some("mailchimp"),
    },
    Entry {
        key: "report-detail",
        schema_dir: "reports",
        schema_stem: "report",
        route: "/mailchimp/reports/[id]",
        params: &["id"],
        endpoint: "/reports/{campaign_id}",
        page_type: PageType::Detail,
        title: "Report Detail",
        description: "Opens, clicks and delivery stats for a campaign",
        features: &["detail-view", "not-found"],
        has_pagination: false,
        label: "Report",
        parent: Some("reports"),
    },
    Entry {
        key: "report-opens",
        schema_dir: "reports",
        schema_stem: "open-details",
        route: "/mailchimp/reports/[id]/opens",
        params: &["id"],
        endpoint: "/reports/{campaign_id}/open-details",
        page_type: PageType::NestedDetail,
        title: "Campaign Opens",
        description: "Members who opened a campaign",
        features: &["detail-view", "pagination", "date-range", "not-found"],
        has_pagination: true,
        label: "Opens",
        parent: Some("reportDetail"),
    },
    Entry {
        key: "report-clicks",
        schema_dir: "reports",
        schema_stem: "click-details",
        route: "/mailchimp/reports/[id]/clicks",
        params: &["id"],
        endpoint: "/reports/{campaign_id}/click-details",
        page_type: PageType::NestedDetail,
        title: "Click Details",
        description: "Links clicked in a campaign",
        features: &["detail-view", "pagination", "not-found"],
        has_pagination: true,
        label: "Clicks",
        parent: Some("reportDetail"),
    },
    Entry {
        key: "report-unsubscribes",
        schema_dir: "reports",
        schema_stem: "unsubscribes",
        route: "/mailchimp/reports/[id]/unsubscribes",
        params: &["id"],
        endpoint: "/reports/{campaign_id}/unsubscribed",
        page_type: PageType::NestedDetail,
        title: "Campaign Unsubscribes",
        description: "Members who unsubscribed from a campaign",
        features: &["detail-view", "pagination", "not-found"],
        has_pagination: true,
        label: "Unsubscribes",
        parent: Some("reportDetail"),
    },
];

static PAGE_CONFIGS: Lazy<BTreeMap<&'static str, PageConfig>> =
    Lazy::new(|| ENTRIES.iter().map(|e| (e.key, e.build())).collect());

/// The built-in registry.
pub fn page_configs() -> &'static BTreeMap<&'static str, PageConfig> {
    &PAGE_CONFIGS
}

pub fn get_page_config(key: &str) -> Option<&'static PageConfig> {
    PAGE_CONFIGS.get(key)
}

pub fn has_page_config(key: &str) -> bool {
    PAGE_CONFIGS.contains_key(key)
}

/// Registered keys, sorted.
pub fn get_page_config_keys() -> Vec<&'static str> {
    PAGE_CONFIGS.keys().copied().collect()
}

/// Built-in configs plus any overlay entries
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<String, PageConfig>,
}

impl Registry {
    /// Registry containing only the built-in configs.
    pub fn builtin() -> Self {
        Registry {
            entries: PAGE_CONFIGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    /// Layer the `key: PageConfig` map in a YAML file over the built-ins.
    ///
    /// Overlay keys replace built-in keys of the same name.
    pub fn with_overlay_file(mut self, path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry overlay: {}", path.display()))?;
        let overlay: BTreeMap<String, PageConfig> = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse registry overlay: {}", path.display()))?;
        tracing::debug!(path = %path.display(), entries = overlay.len(), "Loaded registry overlay");
        self.entries.extend(overlay);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&PageConfig> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert!(has_page_config("report-opens"));
        assert!(!has_page_config("nope"));
        let config = get_page_config("report-opens").unwrap();
        assert_eq!(config.page.page_type, PageType::NestedDetail);
        assert_eq!(config.ui.breadcrumbs.parent.as_deref(), Some("reportDetail"));
    }

    #[test]
    fn test_keys_are_sorted() {
        let keys = get_page_config_keys();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert!(keys.contains(&"lists"));
    }

    #[test]
    fn test_builtin_configs_are_structurally_consistent() {
        for (key, config) in page_configs() {
            let brackets = crate::naming::bracket_params(&config.route.path);
            assert_eq!(brackets, config.route.params, "{key}");
            assert!(config.route.path.starts_with(crate::config::ROUTE_PREFIX), "{key}");
        }
    }

    #[test]
    fn test_parents_name_generated_breadcrumbs() {
        let generated: Vec<String> = page_configs()
            .values()
            .map(crate::naming::breadcrumb_key)
            .collect();
        for (key, config) in page_configs() {
            let Some(parent) = config.ui.breadcrumbs.parent.as_deref() else {
                continue;
            };
            assert!(
                parent == "mailchimp" || generated.iter().any(|g| g == parent),
                "{key}: parent {parent} is not generated by any entry ({generated:?})"
            );
        }
    }

    #[test]
    fn test_breadcrumb_keys_are_unique() {
        let mut keys: Vec<String> = page_configs()
            .values()
            .map(crate::naming::breadcrumb_key)
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_overlay_replaces_and_adds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yaml");
        let mut custom = get_page_config("lists").unwrap().clone();
        custom.page.title = "Custom Lists".to_string();
        let overlay: BTreeMap<&str, PageConfig> =
            [("lists", custom.clone()), ("lists-copy", custom)].into_iter().collect();
        std::fs::write(&path, serde_yaml::to_string(&overlay).unwrap()).unwrap();

        let registry = Registry::builtin().with_overlay_file(&path).unwrap();
        assert_eq!(registry.get("lists").unwrap().page.title, "Custom Lists");
        assert!(registry.contains("lists-copy"));
        assert!(registry.contains("report-clicks"));
    }
}
