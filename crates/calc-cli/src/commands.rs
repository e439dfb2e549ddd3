//! Subcommand implementations
//!
//! Each command returns its rendered output instead of printing, so the
//! binary decides where it goes and tests can inspect it.

use crate::cli::{CliCommand, Invocation, SearchArgs};
use anyhow::Context;
use calc_catalog::{Catalog, CatalogError, InMemoryTemplateRepository};
use calc_session::{CalculationSession, StudioConfig};
use calc_template::{CalculationTemplate, ParameterKind, TemplateId, TemplateParameter};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// Rendered output of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    /// `false` when the command ran but its answer is negative (invalid values)
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Load configuration: the given file, or defaults
///
/// # Errors
/// Unreadable or invalid configuration files.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<StudioConfig> {
    match path {
        Some(path) => StudioConfig::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(StudioConfig::default()),
    }
}

/// Run one invocation
///
/// # Errors
/// Configuration and catalog loading failures, unknown template ids and
/// parameter names.
pub async fn run(invocation: &Invocation) -> anyhow::Result<CommandOutput> {
    let config = load_config(invocation.config_path.as_deref())?;

    match &invocation.command {
        CliCommand::Config => Ok(CommandOutput::ok(config.to_toml_string()?)),
        CliCommand::Search(args) => {
            let catalog = open_catalog(invocation, &config)?;
            search(catalog, args, invocation.json).await
        }
        CliCommand::Show { id } => {
            let catalog = open_catalog(invocation, &config)?;
            show(&catalog, &TemplateId::new(id.as_str()), invocation.json).await
        }
        CliCommand::Validate { id, assignments } => {
            let catalog = open_catalog(invocation, &config)?;
            let template = catalog.open_template(&TemplateId::new(id.as_str())).await?;
            validate(template, &config, assignments, invocation.json)
        }
        CliCommand::Trending { limit } => {
            let mut catalog = open_catalog(invocation, &config)?;
            catalog.refresh().await?;
            let templates = catalog.trending(*limit);
            render_list(&templates, invocation.json)
        }
    }
}

fn open_catalog(invocation: &Invocation, config: &StudioConfig) -> anyhow::Result<Catalog> {
    let path = invocation
        .catalog_path
        .as_deref()
        .context("this command needs a catalog file (--catalog <FILE>)")?;
    let repository = InMemoryTemplateRepository::from_path(path)
        .with_context(|| format!("loading catalog from {}", path.display()))?;
    Ok(Catalog::new(Arc::new(repository), config.catalog.clone()))
}

async fn search(mut catalog: Catalog, args: &SearchArgs, json: bool) -> anyhow::Result<CommandOutput> {
    if let Some(query) = &args.query {
        catalog.set_search_term(query.as_str());
    }
    catalog.set_category(args.category.clone());
    catalog.set_difficulty(args.difficulty);
    if let Some(sort_by) = args.sort_by {
        catalog.set_sort(sort_by);
    }
    catalog.set_show_only_favorites(args.favorites);
    if args.include_unverified {
        catalog.set_show_only_verified(false);
    }
    catalog.refresh().await?;

    let results = catalog.results();
    tracing::debug!(matched = results.len(), filters = ?catalog.filters(), "search finished");
    render_list(&results, json)
}

async fn show(catalog: &Catalog, id: &TemplateId, json: bool) -> anyhow::Result<CommandOutput> {
    let template = match catalog.open_template(id).await {
        Ok(template) => template,
        Err(e @ CatalogError::NotFound(_)) => {
            return Err(anyhow::Error::new(e).context("check the id with `calc search`"));
        }
        Err(e) => return Err(e.into()),
    };
    if json {
        return Ok(CommandOutput::ok(serde_json::to_string_pretty(template.as_ref())?));
    }

    let mut out = String::new();
    writeln!(out, "{} ({})", template.name, template.id)?;
    writeln!(
        out,
        "category: {}{}",
        template.category,
        template
            .subcategory
            .as_ref()
            .map(|s| format!(" / {s}"))
            .unwrap_or_default()
    )?;
    writeln!(out, "difficulty: {}", template.difficulty)?;
    if !template.nec_reference.is_empty() {
        writeln!(out, "reference: {}", template.nec_reference)?;
    }
    if !template.description.is_empty() {
        writeln!(out, "\n{}", template.description)?;
    }
    writeln!(out, "\nparameters:")?;
    for param in &template.parameters {
        writeln!(out, "  {}", describe_parameter(param))?;
    }
    Ok(CommandOutput::ok(out))
}

fn validate(
    template: Arc<CalculationTemplate>,
    config: &StudioConfig,
    assignments: &[(String, String)],
    json: bool,
) -> anyhow::Result<CommandOutput> {
    let mut session = CalculationSession::new(template, config.session.clone());
    session.begin()?;
    for (name, raw) in assignments {
        session
            .set_input(name, raw)
            .with_context(|| format!("setting {name}"))?;
    }

    let validation = session.validation();
    let text = if json {
        serde_json::to_string_pretty(validation)?
    } else if validation.is_valid() {
        "valid\n".to_string()
    } else {
        let mut out = String::new();
        for (name, message) in validation.errors() {
            writeln!(out, "{name}: {message}")?;
        }
        out
    };
    Ok(CommandOutput {
        text,
        success: validation.is_valid(),
    })
}

fn render_list(templates: &[CalculationTemplate], json: bool) -> anyhow::Result<CommandOutput> {
    if json {
        return Ok(CommandOutput::ok(serde_json::to_string_pretty(templates)?));
    }
    let mut out = String::new();
    for t in templates {
        let mut flags = String::new();
        if t.is_verified {
            flags.push('V');
        }
        if t.is_favorite {
            flags.push('*');
        }
        if t.is_trending {
            flags.push('^');
        }
        writeln!(
            out,
            "{:<16} {:<36} {:<14} {:<12} {:>6} {:>4.1} {}",
            t.id.as_str(),
            t.name,
            t.category,
            t.difficulty.as_str(),
            t.usage_count,
            t.average_rating,
            flags
        )?;
    }
    if templates.is_empty() {
        out.push_str("no templates match\n");
    }
    Ok(CommandOutput::ok(out))
}

fn describe_parameter(param: &TemplateParameter) -> String {
    let mut line = format!("{} ({}", param.name, param.parameter_type().as_str());
    if param.required {
        line.push_str(", required");
    }
    if !param.is_input() {
        line.push_str(", output");
    }
    line.push(')');

    match &param.kind {
        ParameterKind::Number { min, max } => match (min, max) {
            (Some(min), Some(max)) => line.push_str(&format!(" [{min}..{max}]")),
            (Some(min), None) => line.push_str(&format!(" [>= {min}]")),
            (None, Some(max)) => line.push_str(&format!(" [<= {max}]")),
            (None, None) => {}
        },
        ParameterKind::Select { options } => line.push_str(&format!(" {{{}}}", options.join("|"))),
        ParameterKind::Text { .. } | ParameterKind::Boolean => {}
    }
    if let Some(unit) = &param.unit {
        line.push_str(&format!(" {unit}"));
    }
    if let Some(default) = &param.default_value {
        line.push_str(&format!(" = {default}"));
    }
    line.push_str(&format!(": {}", param.label));
    line
}
