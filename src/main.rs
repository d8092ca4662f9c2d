//! Interactive terminal shim for the jokebox controller.
//!
//! Reads commands from stdin, forwards them to the controller, and re-renders
//! the view model whenever it changes. Plain text lines are treated as
//! keystroke-driven search input (debounced); lines starting with `:` are
//! commands.
//!
//! ## Usage
//!
//! ```bash
//! jokebox --config ./jokebox.toml --language fr
//! jokebox --data-dir /tmp/jokebox --log-level debug
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `<text>` | Type into the search box (searched after the quiet period) |
//! | `:search <q>` | Search immediately |
//! | `:retry` | Re-issue the current search |
//! | `:lang <en\|fr>` | Switch request language |
//! | `:add` | Open the submission dialog |
//! | `:kind <single\|twopart>` | Switch the draft's kind |
//! | `:text`, `:setup`, `:delivery <value>` | Edit a draft field |
//! | `:submit` | Submit the draft |
//! | `:close`, `:esc`, `:backdrop` | Close the dialog |
//! | `:tab`, `:shift-tab` | Move focus inside the dialog |
//! | `:back`, `:forward`, `:go <location>` | Navigate history |
//! | `:rm <id>` | Remove one of your jokes |
//! | `:dismiss` | Dismiss the notification |
//! | `:quit` | Exit |

use anyhow::Context;
use clap::Parser;
use jokebox::app::Key;
use jokebox::domain::{DraftField, JokeKind};
use jokebox::infrastructure::{ElementId, FocusHost, FocusTarget, Location, MemoryHistory, VirtualDocument};
use jokebox::observability::init_tracing;
use jokebox::{Config, Controller, Language};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Page element standing in for the search box.
const SEARCH_INPUT: ElementId = ElementId(1);

const RENDER_WIDTH: usize = 72;

/// Search jokes and keep your own, from the terminal.
#[derive(Parser, Debug)]
#[command(name = "jokebox", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the local store and log file.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `jokebox=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Joke language (`en` or `fr`).
    #[arg(long)]
    language: Option<String>,

    /// Initial location, e.g. `/?addJoke=true` to start with the dialog open.
    #[arg(long, default_value = "/")]
    location: String,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(Config, Location)> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(level) = self.log_level {
            config.log_level = Some(level);
        }
        if let Some(code) = self.language {
            config.language = Language::from_code(&code)
                .with_context(|| format!("unsupported language `{code}`"))?;
        }

        Ok((config, Location::parse(&self.location)))
    }
}

enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, location) = Cli::parse().into_config()?;
    init_tracing(&config);

    let mut document = VirtualDocument::default();
    document.attach(SEARCH_INPUT);
    document.focus(FocusTarget::Page(SEARCH_INPUT));

    let mut controller = jokebox::initialize(
        &config,
        Box::new(document.clone()),
        Box::new(MemoryHistory::new(location)),
    )
    .context("starting controller")?;

    let mut view = controller.subscribe();
    jokebox::ui::render(&view.borrow_and_update(), RENDER_WIDTH);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                if matches!(run_command(&mut controller, &document, line.trim_end()), Flow::Quit) {
                    break;
                }
            }
            () = controller.step() => {}
        }

        if view.has_changed().unwrap_or(false) {
            jokebox::ui::render(&view.borrow_and_update(), RENDER_WIDTH);
        }
    }

    controller.teardown();
    Ok(())
}

fn run_command(controller: &mut Controller, document: &VirtualDocument, line: &str) -> Flow {
    let Some(command) = line.strip_prefix(':') else {
        controller.input_query(line);
        return Flow::Continue;
    };

    let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "quit" | "q" => return Flow::Quit,
        "search" => controller.search(arg),
        "retry" => controller.retry(),
        "lang" => match Language::from_code(arg) {
            Some(language) => controller.set_language(language),
            None => eprintln!("unknown language `{arg}`"),
        },
        "add" => controller.open_dialog(),
        "close" => controller.close_dialog(),
        "esc" => {
            controller.press_key(Key::Escape);
        }
        "backdrop" => controller.backdrop_click(true),
        "tab" | "shift-tab" => {
            let shift = name == "shift-tab";
            if !controller.press_key(Key::Tab { shift }) {
                eprintln!("focus: {:?}", document.active());
            }
        }
        "kind" => match arg {
            "single" => controller.select_kind(JokeKind::Single),
            "twopart" => controller.select_kind(JokeKind::TwoPart),
            other => eprintln!("unknown kind `{other}`"),
        },
        "text" => controller.update_draft(DraftField::Text, arg),
        "setup" => controller.update_draft(DraftField::Setup, arg),
        "delivery" => controller.update_draft(DraftField::Delivery, arg),
        "submit" => controller.submit(),
        "back" => {
            controller.navigate_back();
        }
        "forward" => {
            controller.navigate_forward();
        }
        "go" => controller.navigate_to(Location::parse(arg)),
        "rm" => match arg.parse::<u64>() {
            Ok(id) if controller.remove_local_joke(id) => {}
            _ => eprintln!("no local joke with id `{arg}`"),
        },
        "dismiss" => controller.dismiss_notification(),
        other => eprintln!("unknown command `:{other}`"),
    }
    Flow::Continue
}
