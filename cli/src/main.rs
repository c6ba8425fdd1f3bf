use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use testable_statements_parser::config::SpecRegistry;
use testable_statements_parser::error::GenerationError;
use testable_statements_parser::generate::{GenerateConfig, generate_fixtures};
use testable_statements_parser::render::{OutputFormat, format_fixtures};
use testable_statements_parser::report::SkippedSection;
use testable_statements_parser::segmenter::ParseOptions;
use testable_statements_parser::parse_fixtures;
use testable_statements_parser::source::DocumentSource;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "make-tests")]
#[command(about = "Generate accessibility test fixtures from wiki testable statements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build fixtures from a wiki page and write them as HTML documents.
    Generate(GenerateArgs),
    /// Parse wiki text and print the fixtures without writing anything.
    Parse(ParseArgs),
    /// List the known specs.
    Specs(SpecsArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Known spec to generate (see `make-tests specs`).
    #[arg(long, conflicts_with_all = ["source", "title"])]
    spec: Option<String>,
    /// Local file holding the wiki text.
    #[arg(long, conflicts_with = "title")]
    source: Option<PathBuf>,
    /// Wiki page title to fetch.
    #[arg(long)]
    title: Option<String>,
    /// Existing directory to write fixtures into.
    #[arg(long)]
    dest: PathBuf,
    /// YAML file with additional or overriding known specs.
    #[arg(long)]
    config: Option<PathBuf>,
    /// MediaWiki API endpoint.
    #[arg(long)]
    wiki_api: Option<String>,
    /// Base URL for `Reference:` fragments.
    #[arg(long)]
    spec_url: Option<String>,
    /// Template wrapping each example; `%code%` marks where the code goes.
    #[arg(long)]
    fragment: Option<String>,
    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep indented "if given" caption lines in example code.
    #[arg(long)]
    keep_captions: bool,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Wiki text file (default: stdin).
    #[arg(long)]
    source: Option<PathBuf>,
    /// Base URL for `Reference:` fragments.
    #[arg(long)]
    spec_url: Option<String>,
    /// Template wrapping each example; `%code%` marks where the code goes.
    #[arg(long)]
    fragment: Option<String>,
    /// Keep indented "if given" caption lines in example code.
    #[arg(long)]
    keep_captions: bool,
    /// Also list sections that were skipped.
    #[arg(long)]
    with_report: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct SpecsArgs {
    /// YAML file with additional or overriding known specs.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Parse(args) => run_parse(args),
        Command::Specs(args) => run_specs(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn parse_options(spec_url: Option<String>, keep_captions: bool) -> ParseOptions {
    ParseOptions {
        spec_url,
        skip_if_given_captions: !keep_captions,
    }
}

fn load_registry(config: Option<&PathBuf>) -> Result<SpecRegistry, String> {
    SpecRegistry::load_with_builtins(config.map(PathBuf::as_path)).map_err(|err| match config {
        Some(path) => format!("Failed to load '{}': {err}", path.display()),
        None => err.to_string(),
    })
}

// ---------------------------------------------------------------------------
// generate command
// ---------------------------------------------------------------------------

fn generate_config(args: &GenerateArgs) -> Result<GenerateConfig, String> {
    let registry = load_registry(args.config.as_ref())?;
    let wiki_api = args
        .wiki_api
        .clone()
        .unwrap_or_else(|| registry.wiki_api().to_string());

    let mut config = if let Some(name) = &args.spec {
        let spec = registry.require(name).map_err(|err| err.to_string())?;
        GenerateConfig::for_spec(spec, &wiki_api, &args.dest)
    } else if let Some(path) = &args.source {
        GenerateConfig::new(DocumentSource::File(path.clone()), &args.dest)
    } else if let Some(page) = &args.title {
        let source = DocumentSource::Wiki {
            api_url: wiki_api,
            page: page.clone(),
        };
        GenerateConfig::new(source, &args.dest)
    } else {
        return Err(GenerationError::NoInputSource.to_string());
    };

    if let Some(url) = &args.spec_url {
        config.parse.spec_url = Some(url.clone());
    }
    if let Some(fragment) = &args.fragment {
        config.code_fragment = Some(fragment.clone());
    }
    config.parse.skip_if_given_captions = !args.keep_captions;
    Ok(config)
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let config = generate_config(&args)?;
    let report = generate_fixtures(&config).map_err(|err| err.to_string())?;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("Failed to serialize report: {err}"))?;
        fs::write(path, json)
            .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
        info!(path = %path.display(), "Wrote run report");
    }

    eprintln!("{report}");
    for failure in &report.write_failures {
        eprintln!("  {}: {}", failure.file.display(), failure.error);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// parse command
// ---------------------------------------------------------------------------

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let source = match &args.source {
        Some(path) => DocumentSource::File(path.clone()),
        None => DocumentSource::Stdin,
    };
    let text = source
        .load()
        .map_err(|err| format!("Failed to read {}: {err}", source.describe()))?;

    let options = parse_options(args.spec_url, args.keep_captions);
    let run = parse_fixtures(&text, &options, args.fragment.as_deref());

    if !args.with_report {
        let output = format_fixtures(&run.fixtures, args.format).map_err(|err| err.to_string())?;
        println!("{output}");
        return Ok(());
    }

    #[derive(serde::Serialize)]
    struct ParseOutput<'a> {
        fixtures: &'a [testable_statements_core::TestFixture],
        skipped: &'a [SkippedSection],
    }

    let output = ParseOutput {
        fixtures: &run.fixtures,
        skipped: &run.skipped,
    };
    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&output)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        OutputFormat::Yaml => serde_yaml::to_string(&output)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
    };
    println!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// specs command
// ---------------------------------------------------------------------------

fn run_specs(args: SpecsArgs) -> Result<(), String> {
    let registry = load_registry(args.config.as_ref())?;
    for spec in &registry.specs {
        println!("{}\t{}\t{}", spec.name, spec.title, spec.spec_url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_args(extra: &[&str]) -> GenerateArgs {
        let mut argv = vec!["make-tests", "generate", "--dest", "out"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).expect("arguments should parse").command {
            Command::Generate(args) => args,
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_known_spec_resolves_to_wiki_source() {
        let config = generate_config(&generate_args(&["--spec", "aria11"])).unwrap();
        assert_eq!(config.spec_name.as_deref(), Some("aria11"));
        assert_eq!(
            config.source,
            DocumentSource::wiki("ARIA_1.1_Testable_Statements")
        );
        assert!(config.parse.skip_if_given_captions);
    }

    #[test]
    fn test_flags_override_known_spec() {
        let config = generate_config(&generate_args(&[
            "--spec",
            "svg",
            "--spec-url",
            "https://w3c.github.io/svg-aam/",
            "--wiki-api",
            "http://localhost:8080/api.php",
            "--keep-captions",
        ]))
        .unwrap();
        assert_eq!(
            config.parse.spec_url.as_deref(),
            Some("https://w3c.github.io/svg-aam/")
        );
        assert!(config.code_fragment.is_some());
        assert!(!config.parse.skip_if_given_captions);
        assert!(matches!(
            config.source,
            DocumentSource::Wiki { ref api_url, .. } if api_url == "http://localhost:8080/api.php"
        ));
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let err = generate_config(&generate_args(&[])).unwrap_err();
        assert_eq!(err, "no input source specified");
    }

    #[test]
    fn test_unknown_spec_is_an_error() {
        let err = generate_config(&generate_args(&["--spec", "nope"])).unwrap_err();
        assert!(err.contains("unknown spec 'nope'"));
    }

    #[test]
    fn test_spec_and_source_conflict() {
        let parsed = Cli::try_parse_from([
            "make-tests", "generate", "--dest", "out", "--spec", "aria11", "--source", "a.wiki",
        ]);
        assert!(parsed.is_err());
    }
}
