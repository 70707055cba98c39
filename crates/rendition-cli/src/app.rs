//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use rendition_ast::Syntax;
use rendition_core::config::{ReferenceSettings, Settings};
use rendition_core::reference::ResourceReferenceParser;
use rendition_core::{ParserRegistry, RendererRegistry};
use rendition_transform::{
    MacroRegistry, TransformationContext, TransformationManager, TransformationRegistry,
};

#[derive(Parser)]
#[command(name = "rendition")]
#[command(author, version, about = "Render document trees as event streams", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON document tree as event/1.0 text
    Events {
        /// Input JSON tree
        input: PathBuf,

        /// Run the configured transformations before rendering
        #[arg(short, long)]
        transform: bool,

        /// Configuration file (default: rendition.toml next to the input)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a raw link or image reference
    Reference {
        /// Raw reference text
        raw: String,

        /// Resolve as an image reference (resolves the same in every wiki mode)
        #[arg(long)]
        image: bool,

        /// Resolve links without a wiki document space (no effect with --image)
        #[arg(long)]
        no_wiki: bool,

        /// Configuration file (default: rendition.toml in the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a syntax id and show what handles it
    Syntax {
        /// Syntax id, as <id>/<version>
        id: String,
    },
}

/// Run the CLI application
///
/// Parses arguments, installs the stderr log subscriber and dispatches to
/// the matching command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Events {
            input,
            transform,
            config,
            output,
        } => {
            events_command(&input, transform, config.as_deref(), output.as_deref())?;
        }
        Commands::Reference {
            raw,
            image,
            no_wiki,
            config,
        } => {
            reference_command(&raw, image, no_wiki, config.as_deref())?;
        }
        Commands::Syntax { id } => {
            syntax_command(&id)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Settings from `config`, or from `rendition.toml` in `dir`
fn load_settings(config: Option<&Path>, dir: &Path) -> Result<Settings> {
    match config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Settings::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => Settings::load_from_dir(dir)
            .with_context(|| format!("Failed to load config from: {}", dir.display())),
    }
}

/// Parse the JSON tree at `input`, optionally transform it, and render it
/// as `event/1.0` text
pub fn render_events(input: &Path, transform: bool, config: Option<&Path>) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input: {}", input.display()))?;

    let parser = ParserRegistry::with_defaults().parser(&Syntax::json_1_0().to_id_string())?;
    let mut tree = parser
        .parse(&source)
        .with_context(|| format!("Failed to parse tree: {}", input.display()))?;

    if transform {
        let dir = match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let settings = load_settings(config, dir)?;
        let manager = TransformationRegistry::with_defaults(MacroRegistry::new())
            .build_manager(&settings.transformations)
            .context("Invalid transformation settings")?;
        debug!("Transformations: {:?}", manager.names());

        let context = TransformationContext::for_syntax(parser.syntax())
            .with_target_syntax(Syntax::event_1_0())
            .with_id(input.display().to_string())
            .with_restricted(settings.transformations.restricted)
            .with_snapshot(&tree);
        manager
            .perform_transformations(&mut tree, &context)
            .with_context(|| format!("Failed to transform: {}", input.display()))?;
    }

    let renderer =
        RendererRegistry::with_defaults().renderer(&Syntax::event_1_0().to_id_string())?;
    let events = renderer
        .render_to_string(&tree)
        .context("Failed to render events")?;
    Ok(events)
}

/// Execute the events command
pub fn events_command(
    input: &Path,
    transform: bool,
    config: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    info!("Rendering events: {}", input.display());
    let events = render_events(input, transform, config)?;

    match output {
        Some(path) => {
            fs::write(path, &events)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", events),
    }
    Ok(())
}

/// Textual form of `raw` resolved as a link (or image) reference
///
/// Only link resolution depends on the wiki mode of `settings`.
pub fn resolve_reference(raw: &str, image: bool, settings: &ReferenceSettings) -> String {
    if image {
        settings.image_parser().parse(raw).to_string()
    } else {
        settings.link_parser().parse(raw).to_string()
    }
}

/// Execute the reference command
pub fn reference_command(
    raw: &str,
    image: bool,
    no_wiki: bool,
    config: Option<&Path>,
) -> Result<()> {
    let mut settings = load_settings(config, Path::new("."))?.references;
    if no_wiki {
        settings.wiki_mode = false;
    }
    println!("{}", resolve_reference(raw, image, &settings));
    Ok(())
}

/// Description of a syntax id: its canonical form, name, and whether a
/// parser or renderer is registered for it
pub fn describe_syntax(id: &str) -> Result<String> {
    let syntax = Syntax::parse(id).with_context(|| format!("Invalid syntax id: {}", id))?;
    let id_string = syntax.to_id_string();
    let yes_no = |present: bool| if present { "yes" } else { "no" };

    Ok(format!(
        "{}\nname: {}\nparser: {}\nrenderer: {}",
        id_string,
        syntax.syntax_type().name(),
        yes_no(ParserRegistry::with_defaults().contains(&id_string)),
        yes_no(RendererRegistry::with_defaults().contains(&id_string)),
    ))
}

/// Execute the syntax command
pub fn syntax_command(id: &str) -> Result<()> {
    println!("{}", describe_syntax(id)?);
    Ok(())
}
