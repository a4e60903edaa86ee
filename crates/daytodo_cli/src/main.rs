use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use daytodo_cli::cli::{Cli, collect_overrides};
use daytodo_cli::session::Session;
use daytodo_core::config::{load_config_with_fallback, merge_overrides, palette_for_theme};
use daytodo_core::day_selector::{Clock, DaySelector};
use daytodo_core::error::AppError;
use daytodo_core::storage::{FileStore, KeyValueStore, Persistence, store_dir};
use daytodo_core::task_store::TaskStore;
use std::io::{self, BufRead};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

enum Parsed {
    Cli(Cli),
    Printed,
}

fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

/// Help and version requests are printed here rather than reported as errors.
fn parse_args<I, T>(args: I) -> Result<Parsed, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Parsed::Cli(cli)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            Ok(Parsed::Printed)
        }
        Err(err) => Err(normalize_parse_error(err)),
    }
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::validation("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
    json: bool,
) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    let stdout = io::stdout();

    loop {
        input.clear();
        let bytes = stdin_lock.read_line(&mut input)?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("daytodo".to_string());
        argv.extend(args);

        let cli = match parse_args(argv) {
            Ok(Parsed::Cli(cli)) => cli,
            Ok(Parsed::Printed) => continue,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        let Some(command) = cli.command else {
            continue;
        };

        if let Err(err) = session.run(command, json || cli.json, &mut stdout.lock()) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let overrides = collect_overrides(&cli.config_override).map_err(AppError::validation)?;
    let loaded = load_config_with_fallback();
    let config = merge_overrides(&loaded.config, &overrides);

    init_tracing(config.log_filter.as_deref());
    if let Some(err) = loaded.error {
        warn!(error = %err, "ignoring unreadable config file");
    }

    let dir = store_dir(config.store_dir.as_deref())?;
    let store = TaskStore::open(Persistence::new(FileStore::new(dir)));
    let mut session = Session::new(
        store,
        DaySelector::system(),
        palette_for_theme(config.theme.as_deref()),
    );

    match cli.command {
        Some(command) => session.run(command, cli.json, &mut io::stdout().lock()),
        None => run_interactive(&mut session, cli.json),
    }
}

fn main() {
    let cli = match parse_args(std::env::args_os()) {
        Ok(Parsed::Cli(cli)) => cli,
        Ok(Parsed::Printed) => return,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
