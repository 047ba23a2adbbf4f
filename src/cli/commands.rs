use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::interactive::{run_interactive, ReadlinePrompter};
use super::report;
use crate::analyzer::analyze_schema;
use crate::config::{HttpMethod, PageType};
use crate::generator::{
    generate_page, generate_page_from_config, GeneratePageRequest, PageConfigOverrides,
};
use crate::layout::ProjectLayout;
use crate::logging::{self, LogFormat};
use crate::registry::Registry;
use crate::validator::{check_files_will_be_generated, validate_config};

/// Command-line interface for the page generator
#[derive(Parser, Debug)]
#[command(name = "pagegen")]
#[command(version, about = "Scaffold Mailchimp dashboard pages from page configs", long_about = None)]
pub struct Cli {
    /// Project root containing `src/` (default: current directory)
    #[arg(long, global = true, env = "PAGEGEN_ROOT")]
    pub root: Option<PathBuf>,

    /// YAML file of extra page configs, keyed like the built-in registry
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively describe and generate a new page
    Generate,
    /// Generate a page from a registered config key
    FromConfig {
        /// Registry key, e.g. `report-clicks`
        key: Option<String>,
    },
    /// List registered config keys
    List,
    /// Validate a registered config and show which files a run would touch
    Check {
        /// Registry key
        key: String,
    },
    /// Show what the analyzer infers from a params schema
    Analyze {
        /// Schema path, relative to the project root
        schema: PathBuf,

        /// Print the analysis as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Derive a config from a route and an endpoint, then generate it
    Quick {
        /// Dashboard route, e.g. `/mailchimp/reports/[id]/clicks`
        #[arg(long)]
        route: String,

        /// Mailchimp API endpoint, e.g. `/reports/{campaign_id}/click-details`
        #[arg(long)]
        endpoint: String,

        /// API params schema path
        #[arg(long)]
        params_schema: String,

        /// API response schema path
        #[arg(long)]
        response_schema: String,

        /// API error schema path
        #[arg(long)]
        error_schema: Option<String>,

        /// Config key (default: derived from the route)
        #[arg(long)]
        key: Option<String>,

        /// Page title (default: derived from the key)
        #[arg(long)]
        title: Option<String>,

        /// Page description
        #[arg(long)]
        description: Option<String>,

        /// list, detail or nested-detail (default: derived from the route)
        #[arg(long = "type")]
        page_type: Option<String>,

        /// HTTP method (default: inferred from the params schema)
        #[arg(long)]
        method: Option<String>,

        /// DAL method name (default: derived from the endpoint)
        #[arg(long)]
        dal_method: Option<String>,

        /// Breadcrumb label
        #[arg(long)]
        breadcrumb_label: Option<String>,

        /// Parent breadcrumb key
        #[arg(long)]
        breadcrumb_parent: Option<String>,
    },
}

/// Parse the process arguments, set up logging and execute the command.
pub fn run_cli() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose, LogFormat::from_env()) {
        eprintln!("Warning: {e:#}");
    }
    run(cli)
}

/// Execute a parsed command line.
///
/// Errors are printed here; the return value is the process exit code.
pub fn run(cli: Cli) -> ExitCode {
    match dispatch(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli) -> anyhow::Result<ExitCode> {
    let layout = load_layout(cli.root.as_deref())?;
    let registry = load_registry(cli.registry.as_deref())?;
    tracing::debug!(root = %layout.root.display(), "Using project root");

    match &cli.command {
        Commands::Generate => {
            let mut prompter = ReadlinePrompter::new()?;
            Ok(run_interactive(&layout, &registry, &mut prompter)?.exit_code())
        }
        Commands::FromConfig { key } => Ok(from_config(key.as_deref(), &layout, &registry)),
        Commands::List => {
            list_configs(&registry);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { key } => Ok(check_config(key, &layout, &registry)),
        Commands::Analyze { schema, json } => analyze(schema, *json, &layout),
        Commands::Quick {
            route,
            endpoint,
            params_schema,
            response_schema,
            error_schema,
            key,
            title,
            description,
            page_type,
            method,
            dal_method,
            breadcrumb_label,
            breadcrumb_parent,
        } => {
            let overrides = PageConfigOverrides {
                config_key: key.clone(),
                page_type: page_type
                    .as_deref()
                    .map(str::parse::<PageType>)
                    .transpose()?,
                title: title.clone(),
                description: description.clone(),
                method: method
                    .as_deref()
                    .map(str::parse::<HttpMethod>)
                    .transpose()?,
                dal_method: dal_method.clone(),
                breadcrumb_label: breadcrumb_label.clone(),
                breadcrumb_parent: breadcrumb_parent.clone(),
                ..PageConfigOverrides::default()
            };
            let request = GeneratePageRequest {
                params_schema: params_schema.clone(),
                response_schema: response_schema.clone(),
                error_schema: error_schema.clone(),
                route_path: route.clone(),
                api_endpoint: endpoint.clone(),
                overrides,
            };
            println!("🚀 Generating page for route: {route}");
            Ok(match generate_page(&request, &layout) {
                Ok(result) => {
                    report::print_generation_result(&result);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    report::print_generate_error(&e);
                    ExitCode::FAILURE
                }
            })
        }
    }
}

/// Layout anchored at an absolute root, so reported paths are absolute too.
pub(crate) fn load_layout(root: Option<&Path>) -> anyhow::Result<ProjectLayout> {
    let root = match root {
        Some(root) => std::path::absolute(root)
            .with_context(|| format!("Failed to resolve project root {}", root.display()))?,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    ProjectLayout::load(root)
}

fn load_registry(overlay: Option<&Path>) -> anyhow::Result<Registry> {
    let registry = Registry::builtin();
    match overlay {
        Some(path) => registry.with_overlay_file(path),
        None => Ok(registry),
    }
}

fn print_usage(registry: &Registry) {
    eprintln!("Usage: pagegen from-config <config-key>");
    eprintln!("\nAvailable config keys:");
    for key in registry.keys() {
        eprintln!("   - {key}");
    }
}

fn from_config(key: Option<&str>, layout: &ProjectLayout, registry: &Registry) -> ExitCode {
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        eprintln!("❌ Missing config key\n");
        print_usage(registry);
        return ExitCode::FAILURE;
    };
    let Some(config) = registry.get(key) else {
        eprintln!("❌ Unknown config key: {key}\n");
        print_usage(registry);
        return ExitCode::FAILURE;
    };

    println!("🚀 Generating page from config: {key}");
    match generate_page_from_config(config, key, layout) {
        Ok(result) => {
            report::print_generation_result(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report::print_generate_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn list_configs(registry: &Registry) {
    println!("📋 Registered page configs:");
    for key in registry.keys() {
        if let Some(config) = registry.get(key) {
            println!(
                "   {key:<24} {:<14} {}",
                config.page.page_type, config.route.path
            );
        }
    }
}

fn check_config(key: &str, layout: &ProjectLayout, registry: &Registry) -> ExitCode {
    let Some(config) = registry.get(key) else {
        eprintln!("❌ Unknown config key: {key}\n");
        print_usage(registry);
        return ExitCode::FAILURE;
    };

    println!("🔍 Checking config: {key}");
    let errors = validate_config(config, layout);
    let plan = check_files_will_be_generated(config, key, layout);
    report::print_file_plan(&plan);

    if errors.is_empty() {
        println!("\n✅ Config is valid");
        ExitCode::SUCCESS
    } else {
        report::print_validation_errors(&errors);
        ExitCode::FAILURE
    }
}

fn analyze(schema: &Path, json: bool, layout: &ProjectLayout) -> anyhow::Result<ExitCode> {
    let path = layout.resolve(schema);
    if !path.exists() {
        anyhow::bail!("Schema file not found: {}", path.display());
    }
    let analysis = analyze_schema(&path);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("🔍 Schema analysis: {}", schema.display());
        report::print_analysis(&analysis);
    }
    Ok(ExitCode::SUCCESS)
}
