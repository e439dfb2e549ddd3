//! Command-line definition

use anyhow::Context;
use calc_catalog::SortBy;
use calc_template::Difficulty;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Options of `calc search`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchArgs {
    pub query: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub sort_by: Option<SortBy>,
    pub favorites: bool,
    pub include_unverified: bool,
}

/// Subcommand with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Search(SearchArgs),
    Show { id: String },
    Validate { id: String, assignments: Vec<(String, String)> },
    Trending { limit: Option<usize> },
    Config,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub verbose: bool,
    pub json: bool,
    pub log_format: LogFormat,
    pub command: CliCommand,
}

pub fn build_cli() -> Command {
    Command::new("calc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search calculation templates and check parameter values")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Catalog file (JSON, or YAML by extension)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print results as JSON"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Log line format on stderr"),
        )
        .subcommand(
            Command::new("search")
                .about("Search and filter the catalog")
                .arg(Arg::new("query").help("Search term (accent-insensitive)"))
                .arg(Arg::new("category").long("category").help("Exact category"))
                .arg(
                    Arg::new("difficulty")
                        .long("difficulty")
                        .value_parser(["basic", "intermediate", "advanced"])
                        .help("Exact difficulty"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["popular", "rating", "trending", "recent", "name"])
                        .help("Sort criterion"),
                )
                .arg(
                    Arg::new("favorites")
                        .long("favorites")
                        .action(ArgAction::SetTrue)
                        .help("Only favorites"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include unverified templates"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show a template and its parameters")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate parameter values against a template")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("set")
                        .long("set")
                        .short('s')
                        .action(ArgAction::Append)
                        .value_parser(parse_assignment)
                        .help("Parameter value as name=value"),
                ),
        )
        .subcommand(
            Command::new("trending")
                .about("List trending templates")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Number of templates (default from config)"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective configuration"))
}

/// Split `name=value`; the value may be empty or contain `=`
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{s}'")),
    }
}

impl Invocation {
    /// Read parsed matches
    ///
    /// # Errors
    /// Only on values clap let through but the domain types reject.
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let command = match matches.subcommand() {
            Some(("search", args)) => CliCommand::Search(SearchArgs {
                query: args.get_one::<String>("query").cloned(),
                category: args.get_one::<String>("category").cloned(),
                difficulty: args
                    .get_one::<String>("difficulty")
                    .map(|d| d.parse::<Difficulty>())
                    .transpose()
                    .map_err(anyhow::Error::msg)?,
                sort_by: args
                    .get_one::<String>("sort")
                    .map(|s| s.parse::<SortBy>())
                    .transpose()
                    .map_err(anyhow::Error::msg)?,
                favorites: args.get_flag("favorites"),
                include_unverified: args.get_flag("all"),
            }),
            Some(("show", args)) => CliCommand::Show {
                id: required(args, "id")?,
            },
            Some(("validate", args)) => CliCommand::Validate {
                id: required(args, "id")?,
                assignments: args
                    .get_many::<(String, String)>("set")
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default(),
            },
            Some(("trending", args)) => CliCommand::Trending {
                limit: args.get_one::<usize>("limit").copied(),
            },
            Some(("config", _)) => CliCommand::Config,
            other => anyhow::bail!("unknown command: {:?}", other.map(|(name, _)| name)),
        };

        let log_format = match matches.get_one::<String>("log-format").map(String::as_str) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            config_path: matches.get_one::<PathBuf>("config").cloned(),
            catalog_path: matches.get_one::<PathBuf>("catalog").cloned(),
            verbose: matches.get_flag("verbose"),
            json: matches.get_flag("json"),
            log_format,
            command,
        })
    }

    /// Parse from an argument list (first item is the program name)
    ///
    /// # Errors
    /// Usage errors from clap and the same errors as [`Self::from_matches`].
    pub fn try_parse_from<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = build_cli().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }
}

fn required(args: &ArgMatches, name: &str) -> anyhow::Result<String> {
    args.get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing argument <{name}>"))
}
