use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use patient_board_core::commands::{CommandTable, Dispatched};
use patient_board_core::render::HtmlRowRenderer;
use patient_board_core::{Board, BoardConfig};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;
mod view;

use input::{parse_line, Input, HELP};
use view::{Format, TerminalView};

#[derive(Parser)]
#[command(name = "patient-board")]
#[command(about = "Edit a board of patient records from the terminal", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "PATIENT_BOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Start with an empty board
    #[arg(long)]
    no_seed: bool,

    /// Print rows as HTML markup instead of text
    #[arg(long)]
    html: bool,
}

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "patient_board_core=info,patient_board_cli=info";

/// Ask a yes/no question on the terminal. Anything but yes is no.
fn confirm(stdin: &io::Stdin, prompt: &str) -> bool {
    print!("{prompt} [s/N] ");
    let _ = io::stdout().flush();
    let mut answer = String::new();
    match stdin.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes"),
        Err(_) => false,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BoardConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BoardConfig::default(),
    };
    if cli.no_seed {
        config.seed_sample_data = false;
    }
    info!(seed = config.seed_sample_data, "starting board");

    let format = if cli.html { Format::Html } else { Format::Text };
    let view = TerminalView::new(io::stdout(), format, HtmlRowRenderer::new(config.sizing));
    let mut board = Board::new(config, view);
    let table = CommandTable::standard();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match parse_line(&line) {
            Ok(Input::Empty) => {}
            Ok(Input::Quit) => break,
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::List) => board.render_all(),
            Ok(Input::Action { name, args }) => {
                match table.dispatch(&mut board, name, &args, &mut |prompt: &str| {
                    confirm(&stdin, prompt)
                }) {
                    Ok(Dispatched::AttachmentIgnored(_)) => {
                        println!("attachments are not supported")
                    }
                    Ok(outcome) => debug!(?outcome, "done"),
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(usage) => eprintln!("{usage}"),
        }
    }

    Ok(())
}
