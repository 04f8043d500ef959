use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use wg_codegen::EntryPointResolver;
use wg_codegen::config::{self, CONFIG_FILE_NAME};

#[derive(Parser)]
#[command(
    name = "wg-entry",
    about = "Resolve the entry point of a WunderGraph application",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entry point, generating the application wrapper if needed
    Resolve {
        /// WunderGraph project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output format
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    /// Generate the application wrapper regardless of the config style
    Generate {
        /// WunderGraph project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Report which entry point would be used without writing anything
    Check {
        /// WunderGraph project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Initialize a new wg-entry configuration
    Init {
        /// WunderGraph project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Overwrite existing files
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
enum OutputFormat {
    Plain,
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { dir, format } => cmd_resolve(&dir, format),

        Commands::Generate { dir } => cmd_generate(&dir),

        Commands::Check { dir } => cmd_check(&dir),

        Commands::Init { dir, force } => cmd_init(&dir, force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "wg-entry", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Build a resolver from the project's config file, falling back to the default layout.
fn load_resolver(dir: &Path) -> Result<EntryPointResolver> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?.unwrap_or_default();
    log::debug!("using layout {:?}", cfg);
    Ok(EntryPointResolver::new(cfg))
}

fn cmd_resolve(dir: &Path, format: OutputFormat) -> Result<()> {
    let resolver = load_resolver(dir)?;
    let entry_point = resolver
        .resolve(dir)
        .with_context(|| format!("failed to resolve entry point in {}", dir.display()))?;

    match format {
        OutputFormat::Plain => {
            if entry_point.is_generated() {
                eprintln!("  wrote {}", entry_point.path().display());
            }
            println!("{}", entry_point.path().display());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entry_point)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&entry_point)?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

fn cmd_generate(dir: &Path) -> Result<()> {
    let resolver = load_resolver(dir)?;
    let path = resolver
        .generate(dir)
        .with_context(|| format!("failed to generate entry point in {}", dir.display()))?;

    eprintln!("  wrote {}", path.display());
    eprintln!("\nThe generated file should not be edited manually; changes will be overwritten.");
    println!("{}", path.display());
    Ok(())
}

fn cmd_check(dir: &Path) -> Result<()> {
    let resolver = load_resolver(dir)?;
    let legacy = resolver.legacy_path(dir);
    let application = resolver.detect(dir)?;
    let server = resolver.has_server_config(dir)?;

    eprintln!("Config: {}", legacy.display());
    eprintln!("  Application config: {}", if application { "yes" } else { "no" });
    eprintln!(
        "  Server config ({}): {}",
        resolver.config().server_file,
        if server { "yes" } else { "no" }
    );

    let entry_point = check_entry_point(&resolver, dir, application);
    println!("Entry point: {}", entry_point);
    Ok(())
}

/// The `check` result line: where the entry point is, without writing it.
fn check_entry_point(resolver: &EntryPointResolver, dir: &Path, application: bool) -> String {
    if application {
        format!("{} (generated)", resolver.application_path(dir).display())
    } else {
        resolver.legacy_path(dir).display().to_string()
    }
}

fn cmd_init(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
