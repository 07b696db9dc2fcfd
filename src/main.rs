//! Purpose: `culvert` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, streams command output to stdout.
//! Invariants: Content goes to stdout; diagnostics and logs go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::aot::Shell;
use serde_json::{json, Map, Value};
use tracing_subscriber::EnvFilter;

use culvert::api::{
    chain, close_quietly, copy, read_lines, read_to_string, read_to_string_lossy, to_exit_code,
    write_line, write_str, Error, ErrorKind,
};

#[derive(Parser)]
#[command(
    name = "culvert",
    version,
    about = "Stream plumbing: concatenate, split, and slurp byte streams",
    arg_required_else_help = true,
    after_help = r#"EXAMPLES
  $ culvert cat notes.txt todo.txt
  $ culvert cat --count < big.bin
  $ culvert lines --json access.log
  $ culvert slurp --lossy mixed-encoding.txt

  $ culvert <command> --help"#
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ColorMode::Auto,
        help = "Color diagnostics: auto, always, never"
    )]
    color: ColorMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Concatenate files (or stdin) to stdout",
        after_help = r#"EXAMPLES
  $ culvert cat a.txt b.txt
  $ culvert cat < notes.txt
  $ culvert cat --count big.bin      # {"bytes":N} instead of content"#
    )]
    Cat {
        #[arg(value_hint = ValueHint::FilePath)]
        paths: Vec<PathBuf>,
        #[arg(long, help = "Discard content and report the total byte count as JSON")]
        count: bool,
    },
    #[command(
        about = "Split a file (or stdin) into lines",
        after_help = r#"EXAMPLES
  $ culvert lines access.log
  $ culvert lines --json access.log  # ["line 1","line 2",...]"#
    )]
    Lines {
        #[arg(value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
        #[arg(long, help = "Emit one JSON array instead of one line per row")]
        json: bool,
    },
    #[command(
        about = "Read a whole file (or stdin) as UTF-8 and print it",
        after_help = r#"EXAMPLES
  $ culvert slurp notes.txt
  $ culvert slurp --lossy mixed.txt  # U+FFFD instead of a Decode error"#
    )]
    Slurp {
        #[arg(value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
        #[arg(long, help = "Replace invalid UTF-8 instead of failing")]
        lossy: bool,
    },
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let color_mode = cli.color;
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            let err = add_not_found_hint(err);
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Cat { paths, count } => run_cat(&paths, count),
        Command::Lines { path, json } => run_lines(path.as_deref(), json),
        Command::Slurp { path, lossy } => run_slurp(path.as_deref(), lossy),
        Command::Completions { shell } => {
            clap_complete::aot::generate(shell, &mut Cli::command(), "culvert", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_cat(paths: &[PathBuf], count: bool) -> Result<(), Error> {
    if count {
        let mut sink = io::sink();
        let total = drain_inputs(paths, &mut sink)?;
        let mut out = io::stdout().lock();
        return write_line(&json!({ "bytes": total }).to_string(), &mut out);
    }
    let mut out = io::stdout().lock();
    drain_inputs(paths, &mut out)?;
    Ok(())
}

fn drain_inputs<W: Write>(paths: &[PathBuf], out: &mut W) -> Result<u64, Error> {
    if paths.is_empty() {
        let mut stdin = io::stdin().lock();
        return copy(&mut stdin, out);
    }
    let mut total = 0u64;
    for path in paths {
        let mut file = open_file(path)?;
        total += copy(&mut file, out).map_err(|err| err.with_path(path))?;
        close_quietly(file);
    }
    Ok(total)
}

fn run_lines(path: Option<&Path>, json: bool) -> Result<(), Error> {
    let lines = match path {
        Some(path) => read_lines(open_file(path)?).map_err(|err| err.with_path(path))?,
        None => read_lines(io::stdin().lock())?,
    };
    let mut out = io::stdout().lock();
    if json {
        let encoded = serde_json::to_string(&lines).map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("failed to encode lines as JSON")
                .with_source(err)
        })?;
        return write_line(&encoded, &mut out);
    }
    for line in &lines {
        write_line(line, &mut out)?;
    }
    Ok(())
}

fn run_slurp(path: Option<&Path>, lossy: bool) -> Result<(), Error> {
    let text = match (path, lossy) {
        (Some(path), false) => read_to_string(open_file(path)?).map_err(|err| err.with_path(path))?,
        (Some(path), true) => {
            read_to_string_lossy(open_file(path)?).map_err(|err| err.with_path(path))?
        }
        (None, false) => read_to_string(io::stdin().lock())?,
        (None, true) => read_to_string_lossy(io::stdin().lock())?,
    };
    let mut out = io::stdout().lock();
    write_str(&text, &mut out)
}

fn open_file(path: &Path) -> Result<File, Error> {
    File::open(path)
        .map_err(|err| Error::from_io(err).with_message("cannot open input").with_path(path))
}

fn add_not_found_hint(err: Error) -> Error {
    if err.kind() == ErrorKind::NotFound && err.hint().is_none() {
        return err.with_hint("Check the input path; pass no path to read from stdin.");
    }
    err
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Decode => "invalid encoding".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    chain(err).skip(1).map(|cause| cause.to_string()).collect()
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color),
        error_message(err)
    ));
    for cause in error_causes(err) {
        lines.push(format!("  caused by: {cause}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("  path: {}", path.display()));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!("  hint: {hint}"));
    }
    lines.join("\n")
}

fn colorize_label(label: &str, enabled: bool) -> String {
    if !enabled {
        return label.to_string();
    }
    format!("\u{1b}[31m{label}\u{1b}[0m")
}
