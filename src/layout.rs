//! Project layout configuration for page generation
//!
//! Writers resolve every target through a [`ProjectLayout`]. The defaults match
//! the dashboard repository; a project can override any of them with a
//! `pagegen.toml` at its root:
//!
//! ```toml
//! app_dir = "src/app"
//! dal_file = "src/dal/mailchimp.dal.ts"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional layout override file at the project root.
pub const LAYOUT_FILE: &str = "pagegen.toml";

/// Directory and file conventions the writers depend on, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Next.js app router directory; page routes mirror `route.path` below it
    pub app_dir: String,
    /// Directory for generated `<key>-page-params.ts` UI schemas
    pub ui_schemas_dir: String,
    /// Directory searched by the interactive flow for API schemas
    pub api_schemas_dir: String,
    /// Root of the component tree; components go in `<components_dir>/<category>/`
    pub components_dir: String,
    /// Import alias prefix for components (`@/components/mailchimp`)
    pub components_alias: String,
    /// Shared DAL file
    pub dal_file: String,
    /// Shared breadcrumb builder file
    pub breadcrumb_file: String,
    /// Shared metadata helpers file
    pub metadata_file: String,
    /// Aggregator that re-exports the metadata helpers
    pub metadata_exports_file: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            app_dir: "src/app".to_string(),
            ui_schemas_dir: "src/schemas/ui".to_string(),
            api_schemas_dir: "src/schemas/mailchimp".to_string(),
            components_dir: "src/components/mailchimp".to_string(),
            components_alias: "@/components/mailchimp".to_string(),
            dal_file: "src/dal/mailchimp.dal.ts".to_string(),
            breadcrumb_file: "src/utils/breadcrumbs/breadcrumb-builder.ts".to_string(),
            metadata_file: "src/utils/mailchimp/metadata.ts".to_string(),
            metadata_exports_file: "src/utils/mailchimp/index.ts".to_string(),
        }
    }
}

/// A [`LayoutConfig`] anchored at a project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub config: LayoutConfig,
}

impl ProjectLayout {
    /// Layout with default conventions at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectLayout {
            root: root.into(),
            config: LayoutConfig::default(),
        }
    }

    /// Load the layout for `root`, applying `pagegen.toml` when present.
    pub fn load(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        let config = load_layout_config(&root.join(LAYOUT_FILE))?.unwrap_or_default();
        Ok(ProjectLayout { root, config })
    }

    /// Resolve a project-relative path.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Directory holding the route's `page.tsx`.
    pub fn route_dir(&self, route_path: &str) -> PathBuf {
        self.resolve(&self.config.app_dir)
            .join(route_path.trim_start_matches('/'))
    }

    pub fn ui_schemas_dir(&self) -> PathBuf {
        self.resolve(&self.config.ui_schemas_dir)
    }

    pub fn api_schemas_dir(&self) -> PathBuf {
        self.resolve(&self.config.api_schemas_dir)
    }

    pub fn components_dir(&self) -> PathBuf {
        self.resolve(&self.config.components_dir)
    }

    pub fn dal_file(&self) -> PathBuf {
        self.resolve(&self.config.dal_file)
    }

    pub fn breadcrumb_file(&self) -> PathBuf {
        self.resolve(&self.config.breadcrumb_file)
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.resolve(&self.config.metadata_file)
    }

    pub fn metadata_exports_file(&self) -> PathBuf {
        self.resolve(&self.config.metadata_exports_file)
    }
}

/// Load a layout override file
///
/// Returns `Ok(None)` if the file doesn't exist (not an error), `Err` if it
/// exists but fails to parse.
pub fn load_layout_config(path: &Path) -> anyhow::Result<Option<LayoutConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout config: {}", path.display()))?;
    let config: LayoutConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse layout config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded layout overrides");
    Ok(Some(config))
}
