// minic: lexer, parser and type checker for a small C-like language

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};
use simple_logger::SimpleLogger;

use minic::config::{
    Config, DEFAULT_ANNOTATED_FILE, DEFAULT_SYMBOLS_FILE, DEFAULT_TOKENS_FILE, DEFAULT_TREE_FILE,
};
use minic::pipeline::{compile_with_sink, Compilation, Stage};
use minic::report;
use minic::ui::App;

#[derive(Parser)]
#[command(name = "minic", version, about = "Front end for a small C-like teaching language")]
struct Cli {
    /// More log output: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tokenize a file and print the token report
    Lex(RunArgs),
    /// Parse a file and print the syntax tree
    Parse(RunArgs),
    /// Type check a file and print the symbol table
    Check(RunArgs),
    /// Check a file and browse the results in the terminal UI
    View(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Source file
    file: PathBuf,

    /// Directory for the artifact files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Do not write artifact files
    #[arg(long)]
    no_artifacts: bool,

    #[arg(long, default_value = DEFAULT_TOKENS_FILE)]
    tokens_file: String,

    #[arg(long, default_value = DEFAULT_TREE_FILE)]
    tree_file: String,

    #[arg(long, default_value = DEFAULT_ANNOTATED_FILE)]
    annotated_file: String,

    #[arg(long, default_value = DEFAULT_SYMBOLS_FILE)]
    symbols_file: String,
}

impl RunArgs {
    fn config(&self) -> Config {
        Config {
            output_dir: self.out_dir.clone(),
            tokens_file: self.tokens_file.clone(),
            tree_file: self.tree_file.clone(),
            annotated_file: self.annotated_file.clone(),
            symbols_file: self.symbols_file.clone(),
            write_artifacts: !self.no_artifacts,
        }
    }
}

fn init_logging(verbose: u8) -> Result<(), log::SetLoggerError> {
    let logger = SimpleLogger::new().with_level(LevelFilter::Warn).env();
    let logger = match verbose {
        0 => logger,
        1 => logger.with_level(LevelFilter::Info),
        2 => logger.with_level(LevelFilter::Debug),
        _ => logger.with_level(LevelFilter::Trace),
    };
    logger.init()
}

fn read_source(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path.display(), e);
            eprintln!("Usage: minic <lex|parse|check|view> <file>");
            process::exit(1);
        }
    }
}

/// Compile `args.file` up to `stage`, printing diagnostics to stderr as they arrive
fn run_stage(args: &RunArgs, stage: Stage) -> Result<Compilation, Box<dyn std::error::Error>> {
    let source = read_source(&args.file);
    info!("compiling {}", args.file.display());

    let compilation = compile_with_sink(&source, stage, |diagnostic| eprintln!("{}", diagnostic));
    report::write_artifacts(&args.config(), &compilation)?;

    Ok(compilation)
}

fn run_view(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_source(&args.file);
    let compilation = compile_with_sink(&source, Stage::Check, |_| {});
    report::write_artifacts(&args.config(), &compilation)?;

    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(compilation, source, file_name);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The UI owns the terminal, so it runs without a logger
    if !matches!(cli.command, Command::View(_)) {
        init_logging(cli.verbose)?;
    }

    let compilation = match &cli.command {
        Command::Lex(args) => {
            let compilation = run_stage(args, Stage::Lex)?;
            report::write_tokens(&mut io::stdout().lock(), &compilation.tokens)?;
            compilation
        }
        Command::Parse(args) => {
            let compilation = run_stage(args, Stage::Parse)?;
            if let Some(tree) = compilation.syntax_tree() {
                let mut out = io::stdout().lock();
                report::write_tree(&mut out, &tree)?;
                out.flush()?;
            }
            compilation
        }
        Command::Check(args) => {
            let compilation = run_stage(args, Stage::Check)?;
            if let Some(analysis) = compilation.analysis.as_ref() {
                report::write_symbols(&mut io::stdout().lock(), &analysis.symbols)?;
            }
            compilation
        }
        Command::View(args) => return run_view(args),
    };

    if !compilation.is_clean() {
        eprintln!("{} problem(s) found", compilation.diagnostics.len());
        process::exit(1);
    }

    Ok(())
}
