use std::env;
use std::io;
use std::path::PathBuf;

use kaiwa_core::state::ChatSession;

mod config;
mod logging;
mod repl;
mod replay;
mod ui;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tui,
    Repl,
    Replay,
}

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    mode: Mode,
    config: Option<PathBuf>,
}

enum Parsed {
    Run(CliArgs),
    Help,
    Version,
}

fn parse_args(args: Vec<String>) -> Result<Parsed, Box<dyn std::error::Error>> {
    let mut mode = None;
    let mut config = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" | "help" => return Ok(Parsed::Help),
            "--version" | "-V" | "version" => return Ok(Parsed::Version),
            "--config" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--config requires a path".into());
                };
                config = Some(PathBuf::from(value));
                i += 2;
                continue;
            }
            "tui" | "repl" | "replay" if mode.is_some() => {
                return Err(format!("unexpected command: {}", args[i]).into());
            }
            "tui" => mode = Some(Mode::Tui),
            "repl" => mode = Some(Mode::Repl),
            "replay" => mode = Some(Mode::Replay),
            other => return Err(format!("unsupported argument: {other}").into()),
        }
        i += 1;
    }
    Ok(Parsed::Run(CliArgs {
        mode: mode.unwrap_or(Mode::Tui),
        config,
    }))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args(env::args().skip(1).collect())? {
        Parsed::Help => {
            print_help();
            return Ok(());
        }
        Parsed::Version => {
            println!("kaiwa {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    match args.mode {
        Mode::Tui => {
            if let Some(path) = logging::init_file() {
                eprintln!("logging to {}", path.display());
            }
        }
        Mode::Repl | Mode::Replay => logging::init_stderr(),
    }

    let config = config::load_config(args.config.as_deref())?;
    let mut session = ChatSession::new(config);
    tracing::info!(mode = ?args.mode, "starting session");

    match args.mode {
        Mode::Tui => ui::run(&mut session),
        Mode::Repl => Ok(repl::run(&mut session, io::stdin().lock(), io::stdout().lock())?),
        Mode::Replay => {
            replay::replay(&mut session, io::stdin().lock(), io::stdout().lock())?;
            Ok(())
        }
    }
}

fn print_help() {
    println!(
        "kaiwa {}\n\n\
         Usage: kaiwa [COMMAND] [--config <path>]\n\n\
         Commands:\n  \
           tui      Full-screen chat (default)\n  \
           repl     Line-by-line chat on stdin/stdout\n  \
           replay   Read one message per line, print JSON lines\n\n\
         Options:\n  \
           --config <path>  Config file (default: <config dir>/kaiwa/config.toml)\n  \
           -h, --help       Show this help\n  \
           -V, --version    Show version\n\n\
         Environment:\n  \
           KAIWA_LOG        Log filter, e.g. kaiwa=debug",
        env!("CARGO_PKG_VERSION")
    );
}
