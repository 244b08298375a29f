use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fenced_matter_config::Config;
use fenced_matter_mdast::{Node, format, from_markdown, to_markdown};
use fenced_matter_syntax::{MatterConfig, MatterEntry, Registry, parse};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Parse and print markdown documents with front matter
#[derive(Debug, Parser)]
#[command(name = "fenced-matter", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/fenced-matter/config.toml)
    #[arg(long, global = true, env = "FENCED_MATTER_CONFIG")]
    config: Option<PathBuf>,

    /// Matter preset to recognize; repeat for several. Overrides the config file
    #[arg(long = "matter", value_name = "NAME", global = true)]
    matter: Vec<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the document tree as JSON
    Parse {
        /// Markdown file, or `-` for stdin
        file: PathBuf,
    },

    /// Read a JSON document tree and print it as markdown
    Render {
        /// JSON file, or `-` for stdin
        file: PathBuf,
    },

    /// Parse a document and print it back out
    Fmt {
        /// Markdown file, or `-` for stdin
        file: PathBuf,
    },

    /// Print the lossless syntax tree
    Cst {
        /// Markdown file, or `-` for stdin
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let registry = registry(cli.config.as_deref(), &cli.matter)?;

    match cli.command {
        Command::Parse { file } => {
            let tree = from_markdown(&read_input(&file)?, &registry);
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        Command::Render { file } => {
            let tree: Node = serde_json::from_str(&read_input(&file)?)
                .with_context(|| format!("'{}' is not a document tree", file.display()))?;
            print!("{}", to_markdown(&tree, &registry)?);
        }
        Command::Fmt { file } => {
            print!("{}", format(&read_input(&file)?, &registry)?);
        }
        Command::Cst { file } => {
            let source = read_input(&file)?;
            print!("{:#?}", parse(&source, &registry).syntax_node());
        }
    }

    Ok(())
}

/// Resolve the matter kinds to use: `--matter` presets win, then the config
/// file, then the default `yaml` kind.
fn registry(config_path: Option<&Path>, presets: &[String]) -> Result<Registry> {
    if !presets.is_empty() {
        let matter = MatterConfig::Kinds(
            presets
                .iter()
                .map(|name| MatterEntry::Preset(name.clone()))
                .collect(),
        );
        return Registry::new(Some(&matter)).context("invalid --matter");
    }

    let config = match config_path {
        Some(path) => {
            let path = Config::expand_path(path)
                .with_context(|| format!("cannot expand config path '{}'", path.display()))?;
            let config = Config::load_from_path(&path)?;
            if config.is_none() {
                anyhow::bail!("config file '{}' does not exist", path.display());
            }
            config
        }
        None => Config::load()?,
    };

    match config {
        Some(config) => Ok(config.registry()?),
        None => {
            log::debug!(
                "no config at {}, using default matter",
                Config::config_path().display()
            );
            Ok(Registry::default())
        }
    }
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read '{}'", file.display()))
}
