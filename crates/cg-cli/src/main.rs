#![forbid(unsafe_code)]

//! cgraph - draw colored graphs from indentation outlines.
//!
//! # Commands
//!
//! - `render`: Write the Graphviz description and lay it out with `dot`
//! - `parse`: Output the parsed document as JSON for tooling/debugging
//! - `validate`: Report outline warnings and errors
//! - `watch`: Re-render on file change (requires `watch` feature)

mod config;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Command as Process;
use std::time::Instant;

use anyhow::{Context, Result};
use cg_core::OutlineError;
use cg_parser::{ParseResult, parse_evidence_json, parse_with_config};
use cg_render_dot::render_dot_with_config;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CliConfig;

/// cgraph - draw colored graphs from indentation outlines.
#[derive(Debug, Parser)]
#[command(
    name = "cgraph",
    version,
    about = "Generate colored graphs from indented outline descriptions",
    long_about = "Turns an indented outline into a colored Graphviz graph.\n\n\
        Each line reads `<color> <name>`; indentation (4 spaces or a tab per level)\n\
        nests a line under the nearest shallower line above it. An optional first\n\
        line `[name:color, ...]` declares symbolic colors."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML file with [outline] and [render] settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render an outline to a Graphviz description and image.
    Render {
        /// Graph description file, or "-" for stdin.
        input: String,

        /// Output file base name (no extension)
        #[arg(short, long)]
        output: Option<String>,

        /// Graphviz output format; "gv" or "dot" skips the layout step
        #[arg(short, long, default_value = "pdf")]
        format: String,

        /// Open the generated file
        #[arg(long)]
        view: bool,
    },

    /// Parse an outline and output the document as JSON.
    Parse {
        /// Graph description file, or "-" for stdin.
        input: String,

        /// Output the full document (default is a summary)
        #[arg(long)]
        full: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate an outline and report diagnostics.
    Validate {
        /// Graph description file, or "-" for stdin.
        input: String,

        /// Output as JSON (structured diagnostics)
        #[arg(long)]
        json: bool,

        /// Exit with non-zero status on warnings (not just errors)
        #[arg(long)]
        strict: bool,
    },

    /// Watch a file and re-render on changes (requires `watch` feature).
    #[cfg(feature = "watch")]
    Watch {
        /// Graph description file to watch.
        input: String,

        /// Output file base name (no extension)
        #[arg(short, long)]
        output: Option<String>,

        /// Graphviz output format
        #[arg(short, long, default_value = "pdf")]
        format: String,

        /// Open the generated file after each render
        #[arg(long)]
        view: bool,
    },
}

/// Files produced by one render.
#[derive(Debug)]
struct RenderArtifacts {
    description: PathBuf,
    image: Option<PathBuf>,
}

/// Result of validating an outline.
#[derive(Debug, Serialize)]
struct ValidateResult {
    valid: bool,
    subgraph_count: usize,
    node_count: usize,
    edge_count: usize,
    warnings: Vec<ValidationWarning>,
    errors: Vec<ValidationError>,
}

#[derive(Debug, Serialize)]
struct ValidationWarning {
    code: String,
    message: String,
    line: usize,
}

#[derive(Debug, Serialize)]
struct ValidationError {
    code: String,
    message: String,
    line: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Render {
            input,
            output,
            format,
            view,
        } => cmd_render(&input, output.as_deref(), &format, view, &config),

        Command::Parse {
            input,
            full,
            pretty,
        } => cmd_parse(&input, full, pretty, &config),

        Command::Validate {
            input,
            json,
            strict,
        } => cmd_validate(&input, json, strict, &config),

        #[cfg(feature = "watch")]
        Command::Watch {
            input,
            output,
            format,
            view,
        } => cmd_watch(&input, output.as_deref(), &format, view, &config),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_writer(io::stderr)
        .try_init();
}

fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read file: {input}"))
    }
}

fn load_and_parse(input: &str, config: &CliConfig) -> Result<ParseResult> {
    let source = load_input(input)?;
    let parsed = parse_with_config(&source, &config.outline)
        .with_context(|| format!("Failed to parse outline: {input}"))?;

    debug!(
        "Parsed: subgraphs={}, nodes={}, edges={}, warnings={}",
        parsed.document.subgraphs.len(),
        parsed.document.node_count(),
        parsed.document.edge_count(),
        parsed.warnings.len()
    );

    Ok(parsed)
}

// =============================================================================
// Command: render
// =============================================================================

fn cmd_render(
    input: &str,
    output: Option<&str>,
    format: &str,
    view: bool,
    config: &CliConfig,
) -> Result<()> {
    let artifacts = render_once(input, output, format, config)?;
    if view {
        open_viewer(artifacts.image.as_deref().unwrap_or(&artifacts.description))?;
    }
    Ok(())
}

/// Runs the whole pipeline once: read, parse, write DOT, lay out.
fn render_once(
    input: &str,
    output: Option<&str>,
    format: &str,
    config: &CliConfig,
) -> Result<RenderArtifacts> {
    let total_start = Instant::now();

    let parsed = load_and_parse(input, config)?;
    for warning in &parsed.warnings {
        warn!("Parse warning: {warning}");
    }

    let dot = render_dot_with_config(&parsed.document, &config.render);

    let base = output.unwrap_or("graph");
    let description = PathBuf::from(format!("{base}.gv"));
    std::fs::write(&description, &dot)
        .with_context(|| format!("Failed to write to: {}", description.display()))?;
    info!("Wrote graph description to: {}", description.display());

    let image = if is_description_format(format) {
        None
    } else {
        let image = PathBuf::from(format!("{base}.{format}"));
        run_graphviz(&config.dot_command, &description, format, &image)?;
        info!("Wrote {format} output to: {}", image.display());
        Some(image)
    };

    info!(
        "Rendered {} subgraphs, {} nodes, {} edges in {:.2}ms",
        parsed.document.subgraphs.len(),
        parsed.document.node_count(),
        parsed.document.edge_count(),
        total_start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(RenderArtifacts { description, image })
}

fn is_description_format(format: &str) -> bool {
    matches!(format.to_ascii_lowercase().as_str(), "gv" | "dot")
}

fn run_graphviz(dot_command: &str, description: &Path, format: &str, image: &Path) -> Result<()> {
    let status = Process::new(dot_command)
        .arg(format!("-T{format}"))
        .arg(description)
        .arg("-o")
        .arg(image)
        .status()
        .with_context(|| format!("Failed to run Graphviz '{dot_command}'; is it installed?"))?;

    if !status.success() {
        anyhow::bail!("Graphviz '{dot_command}' exited with {status} while producing {format}");
    }
    Ok(())
}

fn open_viewer(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    Process::new("open").arg(path).spawn()?;

    #[cfg(target_os = "linux")]
    Process::new("xdg-open").arg(path).spawn()?;

    #[cfg(target_os = "windows")]
    Process::new("cmd")
        .args(["/c", "start", ""])
        .arg(path)
        .spawn()?;

    Ok(())
}

// =============================================================================
// Command: parse
// =============================================================================

fn cmd_parse(input: &str, full: bool, pretty: bool, config: &CliConfig) -> Result<()> {
    let parsed = load_and_parse(input, config)?;

    let output = if full {
        if pretty {
            serde_json::to_string_pretty(&parsed.document)?
        } else {
            serde_json::to_string(&parsed.document)?
        }
    } else if pretty {
        let value: serde_json::Value = serde_json::from_str(&parse_evidence_json(&parsed))?;
        serde_json::to_string_pretty(&value)?
    } else {
        parse_evidence_json(&parsed)
    };

    println!("{output}");

    for warning in &parsed.warnings {
        warn!("Parse warning: {warning}");
    }

    Ok(())
}

// =============================================================================
// Command: validate
// =============================================================================

fn cmd_validate(input: &str, json_output: bool, strict: bool, config: &CliConfig) -> Result<()> {
    let source = load_input(input)?;
    let result = validate_source(&source, strict, config);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if result.valid {
            println!("✓ Valid outline");
        } else {
            println!("✗ Invalid outline");
        }

        println!("  Subgraphs: {}", result.subgraph_count);
        println!("  Nodes:     {}", result.node_count);
        println!("  Edges:     {}", result.edge_count);

        if !result.errors.is_empty() {
            println!("\nErrors:");
            for err in &result.errors {
                let location = err.line.map(|l| format!(" (line {l})")).unwrap_or_default();
                println!("  [{}] {}{}", err.code, err.message, location);
            }
        }

        if !result.warnings.is_empty() {
            println!("\nWarnings:");
            for warn in &result.warnings {
                println!("  [{}] line {}: {}", warn.code, warn.line, warn.message);
            }
        }
    }

    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}

fn validate_source(source: &str, strict: bool, config: &CliConfig) -> ValidateResult {
    let parsed = match parse_with_config(source, &config.outline) {
        Ok(parsed) => parsed,
        Err(error) => return failed_validation(&error),
    };

    let warnings: Vec<ValidationWarning> = parsed
        .warnings
        .iter()
        .map(|warning| ValidationWarning {
            code: warning.code.as_str().to_string(),
            message: warning.message.clone(),
            line: warning.line,
        })
        .collect();

    let mut errors = Vec::new();
    if parsed.document.subgraphs.is_empty() {
        errors.push(ValidationError {
            code: "outline/error/empty".to_string(),
            message: "Outline has no graph lines".to_string(),
            line: None,
        });
    }

    ValidateResult {
        valid: errors.is_empty() && (!strict || warnings.is_empty()),
        subgraph_count: parsed.document.subgraphs.len(),
        node_count: parsed.document.node_count(),
        edge_count: parsed.document.edge_count(),
        warnings,
        errors,
    }
}

fn failed_validation(error: &OutlineError) -> ValidateResult {
    ValidateResult {
        valid: false,
        subgraph_count: 0,
        node_count: 0,
        edge_count: 0,
        warnings: Vec::new(),
        errors: vec![ValidationError {
            code: error.code().as_str().to_string(),
            message: error.to_string(),
            line: Some(error.line()),
        }],
    }
}

// =============================================================================
// Command: watch (optional feature)
// =============================================================================

#[cfg(feature = "watch")]
fn cmd_watch(
    input: &str,
    output: Option<&str>,
    format: &str,
    view: bool,
    config: &CliConfig,
) -> Result<()> {
    use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
    use std::sync::mpsc::channel;
    use std::time::Duration;

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("File not found: {input}");
    }
    let target = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {input}"))?;
    // Editors that save by rename replace the inode, so the directory is watched.
    let directory = target.parent().unwrap_or_else(|| Path::new("."));

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    watcher.watch(directory, RecursiveMode::NonRecursive)?;
    debug!("Watching directory {} for {}", directory.display(), target.display());

    println!("Watching {input} for changes... (Ctrl+C to stop)");

    // Initial render
    if let Err(e) = cmd_render(input, output, format, view, config) {
        eprintln!("Initial render failed: {e:#}");
    }

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(Ok(event)) => {
                if !is_rerender_event(&event, &target) {
                    continue;
                }

                // Debounce rapid events
                std::thread::sleep(Duration::from_millis(100));
                while rx.try_recv().is_ok() {}

                info!("Change detected in {input}, re-rendering");
                if let Err(e) = cmd_render(input, output, format, view, config) {
                    eprintln!("Render error: {e:#}");
                }
            }
            Ok(Err(e)) => {
                eprintln!("Watch error: {e}");
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Whether a directory event means `target` now has new content.
///
/// Writes, creations and renames onto the target count; a rename away from
/// it does not.
#[cfg(feature = "watch")]
fn is_rerender_event(event: &notify::Event, target: &Path) -> bool {
    use notify::EventKind;
    use notify::event::{ModifyKind, RenameMode};

    match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => false,
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            event.paths.get(1).is_some_and(|to| to == target)
        }
        EventKind::Modify(_) | EventKind::Create(_) => {
            event.paths.iter().any(|changed| changed == target)
        }
        _ => false,
    }
}
