use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swadapt_core::config::{self, CONFIG_FILE_NAME, SwadaptConfig};
use swadapt_core::parse::parameter::Parameter;
use swadapt_core::parse::{self, Format, spec::SpecDocument};
use swadapt_core::transform::{self, ResolvedOperation};
use swadapt_python::generator::{check_parameter_names, class_name};

#[derive(Parser)]
#[command(
    name = "swadapt",
    about = "Generate a Python client adapter from a Swagger/OpenAPI spec",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the adapter module
    Generate {
        /// Path of the Python file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Path to the Swagger/OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        swagger: PathBuf,
    },

    /// Validate a spec and every operationId in it
    Validate {
        /// Path to the Swagger/OpenAPI document
        #[arg(short, long)]
        swagger: PathBuf,
    },

    /// Show how every operation will be named and called
    Inspect {
        /// Path to the Swagger/OpenAPI document
        #[arg(short, long)]
        swagger: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swadapt configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { output, swagger } => cmd_generate(&output, &swagger),

        Commands::Validate { swagger } => cmd_validate(&swagger),

        Commands::Inspect { swagger, format } => cmd_inspect(&swagger, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swadapt", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load `.swadapt.yaml` from the current directory, falling back to defaults.
fn load_config() -> Result<SwadaptConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))?;
    if cfg.is_some() {
        log::info!("using {}", config_path.display());
    }
    Ok(cfg.unwrap_or_default())
}

fn load_spec(path: &Path) -> Result<SpecDocument> {
    let content = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let doc = parse::load(&content, Format::from_path(path))
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(doc)
}

fn cmd_generate(output: &Path, swagger: &Path) -> Result<()> {
    let cfg = load_config()?;
    eprintln!("Generating {} → {}", swagger.display(), output.display());
    let count = swadapt_python::generate_file(swagger, output, &cfg)
        .with_context(|| format!("failed to generate {}", output.display()))?;
    eprintln!("  wrote {} methods to {}", count, output.display());
    Ok(())
}

fn cmd_validate(swagger: &Path) -> Result<()> {
    let doc = load_spec(swagger)?;
    eprintln!(
        "Valid {} spec: {}",
        doc.spec_version.as_deref().unwrap_or("(unversioned)"),
        doc.info.title
    );
    if let Some(version) = &doc.info.version {
        eprintln!("  Version: {version}");
    }
    eprintln!("  Paths: {}", doc.paths.len());

    // Also validate that every operation resolves to a method name
    let operations = transform::resolve_all(&doc)?;
    check_parameter_names(&operations)?;
    eprintln!("  Operations: {}", operations.len());
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(swagger: &Path, format: InspectFormat) -> Result<()> {
    let cfg = load_config()?;
    let doc = load_spec(swagger)?;
    let operations = transform::resolve_all(&doc)?;

    let summary = build_inspect_summary(&doc, &cfg, &operations);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(
    doc: &SpecDocument,
    cfg: &SwadaptConfig,
    operations: &[ResolvedOperation<'_>],
) -> serde_json::Value {
    let operations: Vec<serde_json::Value> = operations
        .iter()
        .map(|op| {
            serde_json::json!({
                "operation_id": op.operation_id,
                "method": op.operation.method.as_str(),
                "path": op.operation.path,
                "tag": op.tag,
                "name": op.name,
                "positional": param_names(&op.groups.positional),
                "keyword": param_names(&op.groups.keyword),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": doc.info.title,
            "version": doc.info.version,
        },
        "class_name": class_name(doc, cfg),
        "operations": operations,
    })
}

fn param_names<'a>(params: &[&'a Parameter]) -> Vec<&'a str> {
    params.iter().map(|p| p.name.as_str()).collect()
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
