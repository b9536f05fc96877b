//! # stockclip
//!
//! Load a stock list, remap it to the import layout and copy it as TSV.

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use stockclip_cli::repl::{Command, HELP};
use stockclip_cli::{
    App, AppError, Clipboard, CommandClipboard, FsFileSource, LoadOutcome, StdoutClipboard,
};
use tracing_subscriber::EnvFilter;

type Session = App<FsFileSource, Box<dyn Clipboard>>;

/// stockclip - Stock list to clipboard converter
#[derive(Parser)]
#[command(name = "stockclip")]
#[command(author, version, about = "Convert stock lists to tab-separated clipboard text", long_about = None)]
struct Cli {
    /// File to load (.csv, .xlsx or .xls)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Extract the required columns after loading
    #[arg(short = 'x', long)]
    extract: bool,

    /// Copy the extracted data (or the loaded file) to the clipboard
    #[arg(short, long)]
    copy: bool,

    /// Copy the loaded file to the clipboard, ignoring extraction
    #[arg(long, conflicts_with = "copy")]
    copy_full: bool,

    /// Print clipboard text to stdout instead of using the system clipboard
    #[arg(long)]
    stdout: bool,

    /// Command that receives clipboard text on stdin (ignored with --stdout)
    #[arg(long, env = "STOCKCLIP_CLIPBOARD_CMD", value_name = "CMD")]
    clipboard_cmd: Option<String>,

    /// Start REPL mode
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let clipboard = clipboard_from_cli(&cli)?;
    let mut app = App::new(FsFileSource, clipboard);

    if cli.interactive {
        if let Some(file) = &cli.file {
            if let Err(e) = load(&mut app, file).await {
                alert(&e);
            }
        }
        run_repl(&mut app).await
    } else if let Some(file) = &cli.file {
        run_once(&mut app, &cli, file).await
    } else {
        // No arguments - show help
        Cli::parse_from(["stockclip", "--help"]);
        Ok(())
    }
}

fn clipboard_from_cli(cli: &Cli) -> Result<Box<dyn Clipboard>> {
    if cli.stdout {
        return Ok(Box::new(StdoutClipboard));
    }
    match cli.clipboard_cmd.as_deref() {
        Some(command_line) => match CommandClipboard::parse(command_line) {
            Some(clipboard) => Ok(Box::new(clipboard)),
            None => bail!("--clipboard-cmd must not be empty"),
        },
        None => Ok(Box::new(CommandClipboard::platform_default())),
    }
}

/// Load FILE, then run the requested actions in button order.
async fn run_once(app: &mut Session, cli: &Cli, file: &Path) -> Result<()> {
    let result = async {
        if load(app, file).await? == LoadOutcome::Ignored {
            return Ok(());
        }
        if cli.extract {
            app.extract()?;
            show_preview(app);
        }
        if cli.copy {
            app.copy().await?;
            show_status(app);
        } else if cli.copy_full {
            app.copy_full().await?;
            show_status(app);
        }
        Ok::<(), AppError>(())
    }
    .await;

    if let Err(e) = result {
        alert(&e);
        std::process::exit(1);
    }
    Ok(())
}

async fn load(app: &mut Session, file: &Path) -> Result<LoadOutcome, AppError> {
    let outcome = app.load(file).await?;
    if let LoadOutcome::Loaded { rows, columns } = outcome {
        eprintln!(
            "{} {} ({rows} rows, {columns} columns)",
            "Loaded".cyan().bold(),
            file.display()
        );
        show_preview(app);
    }
    Ok(outcome)
}

/// Run the REPL.
async fn run_repl(app: &mut Session) -> Result<()> {
    println!(
        "{} {} - Interactive Mode",
        "stockclip".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "Type {} for help, {} to exit\n",
        ":help".yellow(),
        ":quit".yellow()
    );

    let mut rl = DefaultEditor::new()?;
    let history_path = dirs_history_path();

    // Load history if available
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = "stockclip> ".green().bold().to_string();

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                // Add to history
                let _ = rl.add_history_entry(line);

                let command = match Command::parse(line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{} {e}", "Error:".red().bold());
                        continue;
                    }
                };

                match command {
                    Command::Quit => break,
                    Command::Help => println!("{HELP}"),
                    command => {
                        if let Err(e) = dispatch(app, command).await {
                            alert(&e);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                println!("{} {e}", "Error:".red().bold());
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Run one session action and show its visible effects.
async fn dispatch(app: &mut Session, command: Command) -> Result<(), AppError> {
    match command {
        Command::Load(path) => {
            load(app, &path).await?;
        }
        Command::Extract => {
            let rows = app.extract()?;
            println!("{} {rows} rows", "Extracted".cyan().bold());
            show_preview(app);
        }
        Command::Copy => {
            app.copy().await?;
            show_status(app);
        }
        Command::CopyFull => {
            app.copy_full().await?;
            show_status(app);
        }
        Command::Clear => {
            app.clear();
            println!("{}", "Cleared".cyan().bold());
        }
        Command::Preview => {
            if app.preview().is_empty() {
                println!("{}", "(nothing loaded)".dimmed());
            } else {
                show_preview(app);
            }
        }
        Command::Status => {
            let file = app
                .selected_file()
                .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
            println!("file:      {file}");
            println!("rows:      {}", app.raw().map_or(0, |d| d.len()));
            println!("extracted: {}", app.extracted().map_or(0, |d| d.len()));
            println!(
                "copy:      {}",
                if app.is_copy_enabled() { "enabled" } else { "disabled" }
            );
            show_status(app);
        }
        Command::Help | Command::Quit => {}
    }
    Ok(())
}

// Session output goes to stderr so `--stdout` leaves clean TSV on stdout.
fn show_preview(app: &Session) {
    if !app.preview().is_empty() {
        eprintln!("{}", app.preview());
    }
}

fn show_status(app: &Session) {
    if !app.status().is_empty() {
        eprintln!("{}", app.status().green());
    }
}

fn alert(error: &AppError) {
    eprintln!("{} {error}", "Alert:".red().bold());
}

/// Get the history file path.
fn dirs_history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|mut p| {
        p.push("stockclip");
        let _ = std::fs::create_dir_all(&p);
        p.push("history.txt");
        p
    })
}
