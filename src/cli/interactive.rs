//! Interactive `pagegen generate` flow
//!
//! Prompts go through the [`Prompter`] trait so the whole flow can be driven
//! by a [`ScriptedPrompter`] in tests; the binary uses [`ReadlinePrompter`].

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use std::path::Path;
use std::process::ExitCode;
use walkdir::WalkDir;

use super::report;
use crate::analyzer::{analyze_schema, SchemaAnalysis};
use crate::config::{
    ApiConfig, BreadcrumbConfig, HttpMethod, PageConfig, PageMeta, PageType, RouteConfig,
    SchemaPaths, UiConfig, ROUTE_PREFIX,
};
use crate::generator::{
    derive_breadcrumb_label, derive_breadcrumb_parent, derive_features, derive_page_type,
    generate_page_from_config,
};
use crate::layout::ProjectLayout;
use crate::naming;
use crate::registry::Registry;
use crate::validator::{check_files_will_be_generated, validate_config};

/// Why a prompt produced no answer
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Ctrl-C, Ctrl-D, or end of scripted input
    #[error("cancelled by user")]
    Cancelled,
    #[error("terminal error: {0}")]
    Terminal(#[from] ReadlineError),
}

/// Source of answers for the interactive flow
pub trait Prompter {
    /// Read one raw line of input.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Free-text input; an empty answer takes `default` when given.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        let shown = match default {
            Some(d) if !d.is_empty() => format!("{prompt} [{d}]: "),
            _ => format!("{prompt}: "),
        };
        let answer = self.read_line(&shown)?.trim().to_string();
        Ok(match default {
            Some(d) if answer.is_empty() => d.to_string(),
            _ => answer,
        })
    }

    /// Pick one of `choices` by number or exact text.
    fn select(
        &mut self,
        prompt: &str,
        choices: &[String],
        default: usize,
    ) -> Result<usize, PromptError> {
        println!("{prompt}");
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}) {choice}", i + 1);
        }
        let default_answer = (default + 1).to_string();
        loop {
            let answer = self.input("Choice", Some(&default_answer))?;
            if let Ok(n) = answer.parse::<usize>() {
                if (1..=choices.len()).contains(&n) {
                    return Ok(n - 1);
                }
            }
            if let Some(i) = choices.iter().position(|c| *c == answer) {
                return Ok(i);
            }
            println!("  Enter a number between 1 and {}", choices.len());
        }
    }

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let answer = self.read_line(&format!("{prompt} [{hint}]: "))?;
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("  Please answer y or n"),
            }
        }
    }
}

/// Terminal prompter backed by rustyline
pub struct ReadlinePrompter {
    editor: DefaultEditor,
}

impl ReadlinePrompter {
    pub fn new() -> anyhow::Result<Self> {
        Ok(ReadlinePrompter {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompter for ReadlinePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        tracing::debug!(error = %e, "Could not record prompt history");
                    }
                }
                Ok(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(PromptError::Cancelled)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Prompter that replays canned answers; running out counts as cancellation
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        let answer = self.answers.pop_front().ok_or(PromptError::Cancelled)?;
        println!("{prompt}{answer}");
        Ok(answer)
    }
}

/// How an interactive run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveOutcome {
    Generated,
    /// The user backed out; nothing was written
    Cancelled,
    /// Validation or generation failed
    Failed,
}

impl InteractiveOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            InteractiveOutcome::Failed => ExitCode::FAILURE,
            InteractiveOutcome::Generated | InteractiveOutcome::Cancelled => ExitCode::SUCCESS,
        }
    }
}

/// Run the interactive flow.
///
/// Cancellation at any prompt ends the run cleanly and writes nothing.
pub fn run_interactive(
    layout: &ProjectLayout,
    registry: &Registry,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<InteractiveOutcome> {
    match interactive_flow(layout, registry, prompter) {
        Ok(outcome) => Ok(outcome),
        Err(FlowError::Prompt(PromptError::Cancelled)) => {
            println!("\n👋 Cancelled; no files were written");
            Ok(InteractiveOutcome::Cancelled)
        }
        Err(FlowError::Prompt(e)) => Err(e.into()),
        Err(FlowError::Other(e)) => Err(e),
    }
}

#[derive(Debug)]
enum FlowError {
    Prompt(PromptError),
    Other(anyhow::Error),
}

impl From<PromptError> for FlowError {
    fn from(e: PromptError) -> Self {
        FlowError::Prompt(e)
    }
}

impl From<anyhow::Error> for FlowError {
    fn from(e: anyhow::Error) -> Self {
        FlowError::Other(e)
    }
}

fn interactive_flow(
    layout: &ProjectLayout,
    registry: &Registry,
    prompter: &mut dyn Prompter,
) -> Result<InteractiveOutcome, FlowError> {
    println!("🧩 Page generator\n");

    println!("Step 1/4: Schemas");
    let schemas = prompt_schemas(layout, prompter)?;
    let analysis = analyze_schema(&layout.resolve(&schemas.params));
    println!("\n🔍 Params schema analysis:");
    report::print_analysis(&analysis);

    println!("\nStep 2/4: Route");
    let route = prompt_route(&schemas.params, prompter)?;
    let page_type = prompt_page_type(&route.path, prompter)?;

    println!("\nStep 3/4: API");
    let api = prompt_api(&analysis, prompter)?;

    println!("\nStep 4/4: Page & UI");
    let default_key = naming::derive_config_key(&route.path);
    let mut config_key = prompter.input("Config key", Some(&default_key))?;
    while registry.contains(&config_key) {
        println!("  `{config_key}` is already registered; choose another key");
        config_key = prompter.input("Config key", None)?;
    }
    let title = prompter.input("Page title", Some(&naming::humanize_segment(&config_key)))?;
    let description = prompter.input(
        "Description",
        Some(&format!("View {}", title.to_lowercase())),
    )?;
    let ui = prompt_ui(&route.path, page_type, &analysis, prompter)?;
    let features = derive_features(page_type, ui.has_pagination, &analysis);

    let mut config = PageConfig {
        schemas,
        route,
        api,
        page: PageMeta {
            page_type,
            title,
            description,
            features,
        },
        ui,
    };
    let derived_dal = naming::dal_method_name(&config);
    let dal_method = prompter.input("DAL method name", Some(&derived_dal))?;
    if dal_method != derived_dal {
        config.api.dal_method = Some(dal_method);
    }

    let errors = validate_config(&config, layout);
    if !errors.is_empty() {
        report::print_validation_errors(&errors);
        return Ok(InteractiveOutcome::Failed);
    }

    println!("\n📝 Review:\n");
    println!("{}", report::config_yaml(&config_key, &config)?);
    if !prompter.confirm("Generate this page?", true)? {
        return Err(PromptError::Cancelled.into());
    }

    let plan = check_files_will_be_generated(&config, &config_key, layout);
    report::print_file_plan(&plan);
    if !plan.warnings.is_empty() && !prompter.confirm("\nContinue anyway?", false)? {
        return Err(PromptError::Cancelled.into());
    }

    match generate_page_from_config(&config, &config_key, layout) {
        Ok(result) => {
            report::print_generation_result(&result);
            println!(
                "\n💡 This config was not saved to the registry. To regenerate it later, add it to \
                 the registry or a --registry file:\n"
            );
            println!("{}", report::config_yaml(&config_key, &config)?);
            Ok(InteractiveOutcome::Generated)
        }
        Err(e) => {
            report::print_generate_error(&e);
            Ok(InteractiveOutcome::Failed)
        }
    }
}

const MANUAL_ENTRY: &str = "Enter a path manually";

fn prompt_schemas(
    layout: &ProjectLayout,
    prompter: &mut dyn Prompter,
) -> Result<SchemaPaths, PromptError> {
    let candidates = find_params_schemas(layout);
    let params = if candidates.is_empty() {
        println!(
            "  No params schemas found under {}",
            layout.config.api_schemas_dir
        );
        prompter.input("Params schema path", None)?
    } else {
        let mut choices = candidates.clone();
        choices.push(MANUAL_ENTRY.to_string());
        let picked = prompter.select("Params schema:", &choices, 0)?;
        match candidates.get(picked) {
            Some(path) => path.clone(),
            None => prompter.input("Params schema path", None)?,
        }
    };

    let response_default = sibling_schema(layout, &params, "success");
    let response = prompter.input("Response schema path", response_default.as_deref())?;

    let error_default = sibling_schema(layout, &params, "error");
    let error = prompter.input("Error schema path (blank for none)", error_default.as_deref())?;

    Ok(SchemaPaths {
        params,
        response,
        error: Some(error).filter(|e| !e.is_empty()),
    })
}

/// Params schemas under the API schema dir, project-relative, sorted.
pub(crate) fn find_params_schemas(layout: &ProjectLayout) -> Vec<String> {
    let mut found: Vec<String> = WalkDir::new(layout.api_schemas_dir())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            name.ends_with(".ts") && name.contains("params")
        })
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(&layout.root)
                .ok()
                .map(relative_display)
        })
        .collect();
    found.sort();
    found
}

fn relative_display(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `x-params.schema.ts` → `x-<kind>.schema.ts`, if that file exists.
fn sibling_schema(layout: &ProjectLayout, params: &str, kind: &str) -> Option<String> {
    let candidate = params.replacen("-params.", &format!("-{kind}."), 1);
    (candidate != params && layout.resolve(&candidate).exists()).then_some(candidate)
}

fn prompt_route(
    params_schema: &str,
    prompter: &mut dyn Prompter,
) -> Result<RouteConfig, PromptError> {
    let default = default_route(params_schema);
    let path = prompter.input("Route path", default.as_deref())?;
    let params = naming::bracket_params(&path);
    if !params.is_empty() {
        println!("  Route params: {}", params.join(", "));
    }
    Ok(RouteConfig { path, params })
}

/// `/mailchimp/<dir>` for a schema stored in `.../<dir>/<file>`.
fn default_route(params_schema: &str) -> Option<String> {
    let mut parts = params_schema.rsplit('/');
    parts.next()?;
    let dir = parts.next()?;
    Some(format!("{ROUTE_PREFIX}{dir}"))
}

fn prompt_page_type(route_path: &str, prompter: &mut dyn Prompter) -> Result<PageType, PromptError> {
    let derived = derive_page_type(route_path);
    let choices: Vec<String> = PageType::ALL.iter().map(|t| t.to_string()).collect();
    let default = PageType::ALL.iter().position(|t| *t == derived).unwrap_or(0);
    let picked = prompter.select("Page type:", &choices, default)?;
    Ok(PageType::ALL.get(picked).copied().unwrap_or(derived))
}

fn prompt_api(
    analysis: &SchemaAnalysis,
    prompter: &mut dyn Prompter,
) -> Result<ApiConfig, PromptError> {
    let endpoint = prompter.input("Mailchimp API endpoint (e.g. /lists/{list_id})", None)?;
    let choices: Vec<String> = HttpMethod::ALL.iter().map(|m| m.to_string()).collect();
    let default = HttpMethod::ALL
        .iter()
        .position(|m| *m == analysis.suggested_method)
        .unwrap_or(0);
    let picked = prompter.select("HTTP method:", &choices, default)?;
    Ok(ApiConfig {
        endpoint,
        method: HttpMethod::ALL
            .get(picked)
            .copied()
            .unwrap_or(analysis.suggested_method),
        dal_method: None,
    })
}

fn prompt_ui(
    route_path: &str,
    page_type: PageType,
    analysis: &SchemaAnalysis,
    prompter: &mut dyn Prompter,
) -> Result<UiConfig, PromptError> {
    let has_pagination = prompter.confirm("Paginated?", analysis.has_pagination)?;
    let label = prompter.input(
        "Breadcrumb label",
        Some(&derive_breadcrumb_label(route_path)),
    )?;
    let derived_parent = derive_breadcrumb_parent(route_path, page_type).unwrap_or_default();
    let parent = prompter.input("Parent breadcrumb key (blank for none)", Some(&derived_parent))?;
    Ok(UiConfig {
        has_pagination,
        breadcrumbs: BreadcrumbConfig {
            label,
            parent: Some(parent).filter(|p| !p.is_empty()),
        },
    })
}
