use anyhow::{bail, Context as AnyhowContext, Result};
use clap::Parser;
use reorder_engine::{find_config, Config, Section};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod discover;
mod flags;
mod init;
mod process;

use discover::{discover_files, Excludes};
use flags::{ModeFlag, OutputMode};

#[derive(Parser)]
#[command(name = "go-reorder")]
#[command(about = "Reorder declarations in Go source files", long_about = None)]
#[command(version)]
struct Cli {
    /// Write result to source file instead of stdout
    #[arg(short, long)]
    write: bool,

    /// Check if files are properly ordered (exit 1 if not)
    #[arg(short, long)]
    check: bool,

    /// Display diff instead of reordered source
    #[arg(short, long)]
    diff: bool,

    /// Show config and processing details
    #[arg(short, long)]
    verbose: bool,

    /// Create a default .go-reorder.toml config file
    #[arg(long)]
    init: bool,

    /// List available section names for config
    #[arg(long)]
    list_sections: bool,

    /// Path to config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Behavior mode, overriding the config file
    #[arg(long, value_enum)]
    mode: Option<ModeFlag>,

    /// Exclude files matching pattern (can be repeated)
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Files or directories to process ("-" alone reads stdin)
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if cli.list_sections {
        let mut out = io::stdout().lock();
        writeln!(out, "Available sections for config:")?;
        for section in Section::ALL {
            writeln!(out, "  {section}")?;
        }
        return Ok(());
    }

    if cli.init {
        init::write_default_config(Path::new("."))?;
        println!("Created {}", reorder_engine::CONFIG_FILE_NAME);
        return Ok(());
    }

    if cli.paths.is_empty() {
        bail!("no files specified");
    }

    if let [only] = cli.paths.as_slice() {
        if only == Path::new("-") {
            let config = load_explicit_config(&cli)?.unwrap_or_default();
            let config = with_mode_override(config, cli.mode);
            return process::process_stdin(
                &config,
                &mut io::stdin().lock(),
                &mut io::stdout().lock(),
            );
        }
    }

    let excludes = Excludes::new(&cli.exclude)?;
    let mut files = Vec::new();
    for path in &cli.paths {
        files.extend(discover_files(path, &excludes).context("Error discovering files")?);
    }
    if files.is_empty() {
        bail!("no Go files found");
    }

    let (config, source) = match load_explicit_config(&cli)? {
        Some(config) => (config, cli.config.clone()),
        None => discover_config(&files[0])?,
    };
    let config = with_mode_override(config, cli.mode);

    match &source {
        Some(path) => log::info!("config: {}", path.display()),
        None => log::info!("config: using defaults"),
    }
    log::info!("mode: {}", config.behavior.mode);
    log::info!("files: {}", files.len());

    let output = OutputMode::from_flags(cli.write, cli.check, cli.diff);
    let mut out = io::stdout().lock();
    let mut changed_files = Vec::new();
    for file in &files {
        let changed = process::process_file(file, &config, output, &mut out)
            .with_context(|| format!("Error processing {}", file.display()))?;
        if changed {
            changed_files.push(file);
        }
    }
    out.flush()?;

    if output == OutputMode::Check && !changed_files.is_empty() {
        for file in changed_files {
            eprintln!("{}", file.display());
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Config named by `--config`, which must exist
fn load_explicit_config(cli: &Cli) -> Result<Option<Config>> {
    let Some(path) = &cli.config else {
        return Ok(None);
    };
    if !path.exists() {
        bail!("config file not found: {}", path.display());
    }
    let config = Config::load(path).context("Error loading config")?;
    Ok(Some(config))
}

/// Look for a config next to the first file or in its ancestors
fn discover_config(first_file: &Path) -> Result<(Config, Option<PathBuf>)> {
    let dir = match first_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let dir = dir.canonicalize().unwrap_or(dir);

    match find_config(&dir) {
        Some(path) => {
            let config = Config::load(&path).context("Error loading config")?;
            Ok((config, Some(path)))
        }
        None => Ok((Config::default(), None)),
    }
}

fn with_mode_override(mut config: Config, mode: Option<ModeFlag>) -> Config {
    if let Some(mode) = mode {
        config.behavior.mode = mode.as_domain();
    }
    config
}
