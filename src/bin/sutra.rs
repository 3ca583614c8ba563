//! Command-line interface for sutra
//! Compiles `.skt` programs to JavaScript and runs them in a sandboxed runtime.
//!
//! Usage:
//!   sutra run `<path>`                        - Compile and execute a program
//!   sutra compile `<path>` [--format js|json]  - Print the generated JavaScript
//!
//! Global flags: `-v`/`-vv`/`-vvv` for more logging, `--quiet` for errors only,
//! `--config <file>` to layer a configuration file over `sutra.toml`, `--loop-tracking
//! block-stack|counter` to override `compile.loop_tracking`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use sutra::sutra::config::{Loader, SutraConfig, PROJECT_FILE};
use sutra::sutra::loader::{LoaderError, SourceLoader};
use sutra::sutra::runtime::{NodeSandbox, RuntimeError, Sandbox, StdoutSink};
use sutra::Compiler;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Load(#[from] LoaderError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn cli() -> Command {
    Command::new("sutra")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile and run sutra programs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase logging verbosity (-v, -vv, -vvv)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Configuration file layered over the defaults and sutra.toml")
                .global(true),
        )
        .arg(
            Arg::new("loop-tracking")
                .long("loop-tracking")
                .help("How break/continue placement is checked")
                .value_parser(["block-stack", "counter"])
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Compile a program and execute it")
                .arg(
                    Arg::new("path")
                        .help("Path to the .skt file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("compile")
                .about("Print the JavaScript generated for a program")
                .arg(
                    Arg::new("path")
                        .help("Path to the .skt file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["js", "json"])
                        .default_value("js"),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    setup_logging(
        matches.get_count("verbose"),
        matches.get_flag("quiet"),
    );

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let loader = load_source(required(run_matches, "path"), &config);
            if let Err(e) = handle_run_command(&loader, &config) {
                eprintln!("Error: {}", user_message(&e, &config));
                std::process::exit(1);
            }
        }
        Some(("compile", compile_matches)) => {
            let loader = load_source(required(compile_matches, "path"), &config);
            let format = required(compile_matches, "format");
            if let Err(e) = handle_compile_command(&loader, format, &config) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        _ => unreachable!(),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(matches: &ArgMatches) -> Result<SutraConfig, CliError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader = loader.with_environment();
    if let Some(tracking) = matches.get_one::<String>("loop-tracking") {
        loader = loader.set_override("compile.loop_tracking", tracking.as_str())?;
    }
    Ok(loader.build()?)
}

/// File checks report their own message and never go through [`user_message`].
fn load_source(path: &str, config: &SutraConfig) -> SourceLoader {
    SourceLoader::from_path(path, &config.source.extension).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

/// Runtime syntax errors and compile errors alike collapse to a generic message when they
/// carry the configured marker.
fn user_message(error: &CliError, config: &SutraConfig) -> String {
    let message = error.to_string();
    let marker = &config.runtime.invalid_syntax_marker;
    if !marker.is_empty() && message.contains(marker.as_str()) {
        "Invalid Sutra syntax.".to_string()
    } else {
        message
    }
}

/// Handle the run command
fn handle_run_command(loader: &SourceLoader, config: &SutraConfig) -> Result<(), CliError> {
    let program = loader.compile_with(&Compiler::new(config.compile))?;

    let sandbox = NodeSandbox::from_config(&config.runtime);
    sandbox.execute(&program, &mut StdoutSink)?;
    Ok(())
}

/// Handle the compile command
fn handle_compile_command(
    loader: &SourceLoader,
    format: &str,
    config: &SutraConfig,
) -> Result<(), CliError> {
    let compiled = loader.compile_with(&Compiler::new(config.compile));

    match (format, compiled) {
        ("json", Ok(program)) => {
            println!("{}", serde_json::to_string_pretty(&json!({ "program": program }))?);
        }
        ("json", Err(LoaderError::Compile(error))) => {
            println!("{}", serde_json::to_string_pretty(&json!({ "error": error }))?);
            std::process::exit(1);
        }
        (_, Ok(program)) => println!("{}", program),
        (_, Err(error)) => return Err(error.into()),
    }
    Ok(())
}
