//! User-facing output for generation runs

use crate::analyzer::SchemaAnalysis;
use crate::config::PageConfig;
use crate::generator::{GenerateError, GenerationResult};
use crate::validator::FilePlan;

pub(crate) fn print_generation_result(result: &GenerationResult) {
    println!("\n✅ Generated page: {}", result.config_key);
    println!("   Route: {}", result.config.route.path);

    if result.files.is_empty() {
        println!("\n📁 No files were created or modified");
    } else {
        println!("\n📁 Files created or modified ({}):", result.files.len());
        for file in &result.files {
            println!("   - {}", file.display());
        }
    }

    if !result.warnings.is_empty() {
        println!("\n⚠️  Warnings ({}):", result.warnings.len());
        for warning in &result.warnings {
            println!("   - {warning}");
        }
    }
}

pub(crate) fn print_generate_error(err: &GenerateError) {
    match err {
        GenerateError::Validation(errors) => print_validation_errors(errors),
        GenerateError::Write { .. } => {
            eprintln!("\n❌ Generation failed: {err}");
            eprintln!("   Files written by earlier steps were left in place.");
        }
    }
}

pub(crate) fn print_validation_errors(errors: &[String]) {
    eprintln!("\n❌ Config validation failed ({} error(s)):", errors.len());
    for error in errors {
        eprintln!("   - {error}");
    }
}

pub(crate) fn print_file_plan(plan: &FilePlan) {
    if !plan.will_create.is_empty() {
        println!("\n🆕 Will create:");
        for path in &plan.will_create {
            println!("   - {}", path.display());
        }
    }
    if !plan.will_modify.is_empty() {
        println!("\n✏️  Will modify:");
        for path in &plan.will_modify {
            println!("   - {}", path.display());
        }
    }
    if !plan.warnings.is_empty() {
        println!("\n⚠️  Warnings:");
        for warning in &plan.warnings {
            println!("   - {warning}");
        }
    }
}

pub(crate) fn print_analysis(analysis: &SchemaAnalysis) {
    let flag = |b: bool| if b { "yes" } else { "no" };
    println!("   Pagination:    {}", flag(analysis.has_pagination));
    if let Some(kind) = analysis.pagination_type {
        println!("   Style:         {kind}");
    }
    if !analysis.path_params.is_empty() {
        println!("   Path params:   {}", analysis.path_params.join(", "));
    }
    println!("   Filters:       {}", flag(analysis.has_filters));
    println!("   Sorting:       {}", flag(analysis.has_sorting));
    println!("   Date filters:  {}", flag(analysis.has_date_filters));
    println!("   Method:        {}", analysis.suggested_method);
}

/// YAML for a config, keyed by its registry key.
pub(crate) fn config_yaml(config_key: &str, config: &PageConfig) -> anyhow::Result<String> {
    let mut map = std::collections::BTreeMap::new();
    map.insert(config_key, config);
    Ok(serde_yaml::to_string(&map)?)
}
