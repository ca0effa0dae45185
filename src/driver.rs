//! Headless line-oriented driver.
//!
//! Stands in for the rendering layer: reads one command per line, feeds it
//! to the flow controller and prints flow events and snapshots as JSON
//! lines on stdout.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use sw_app::{FlowController, FlowError, FlowSnapshot};
use sw_core::ports::FlowEventPort;
use sw_core::{ActivityOutcome, FlowPhase, PageInput, PageSnapshot, RequestCode};
use sw_infra::ReadinessGate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
    #[error("invalid argument {value:?} for {command}")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Back,
    Jump(String),
    Result(RequestCode, ActivityOutcome),
    Toggle(String, bool),
    Refresh,
    RadioReady,
    Finish,
    State,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let command = match name {
            "next" => Command::Next,
            "back" => Command::Back,
            "jump" => Command::Jump(required(parts.next(), "jump")?.to_string()),
            "result" => {
                let code = required(parts.next(), "result")?;
                let code = code
                    .parse::<i32>()
                    .map_err(|_| invalid("result", code))?;
                let outcome = match required(parts.next(), "result")? {
                    "ok" => ActivityOutcome::Ok,
                    "canceled" | "cancelled" => ActivityOutcome::Canceled,
                    "failed" => ActivityOutcome::Failed,
                    other => return Err(invalid("result", other)),
                };
                Command::Result(RequestCode(code), outcome)
            }
            "toggle" => {
                let key = required(parts.next(), "toggle")?.to_string();
                let checked = match required(parts.next(), "toggle")? {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    other => return Err(invalid("toggle", other)),
                };
                Command::Toggle(key, checked)
            }
            "refresh" => Command::Refresh,
            "radio-ready" => Command::RadioReady,
            "finish" => Command::Finish,
            "state" => Command::State,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(value: Option<&'a str>, command: &'static str) -> Result<&'a str, CommandError> {
    value.ok_or(CommandError::MissingArgument(command))
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum DriverEvent<'a> {
    PageLoaded { page: &'a PageSnapshot },
    PageTreeChanged,
    Finish,
    Snapshot { snapshot: &'a FlowSnapshot },
    Input { key: &'a str, handled: bool },
    Error { message: String },
}

/// Prints flow events as JSON lines.
pub struct JsonEvents {
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonEvents {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn emit(&self, event: &DriverEvent<'_>) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "failed to encode driver event");
                return;
            }
        };
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(err) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!(error = %err, "failed to write driver event");
        }
    }
}

#[async_trait]
impl FlowEventPort for JsonEvents {
    async fn on_page_loaded(&self, page: PageSnapshot) {
        self.emit(&DriverEvent::PageLoaded { page: &page });
    }

    async fn on_page_tree_changed(&self) {
        self.emit(&DriverEvent::PageTreeChanged);
    }

    async fn on_finish(&self) {
        self.emit(&DriverEvent::Finish);
    }
}

/// Feeds commands from `input` into `controller` until the flow finishes,
/// `quit` is read or input ends.
pub async fn run_driver<R>(
    controller: &FlowController,
    radio: &ReadinessGate,
    input: R,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let replies = JsonEvents::stdout();
    let snapshot = controller.start().await?;
    replies.emit(&DriverEvent::Snapshot {
        snapshot: &snapshot,
    });

    let mut lines = input.lines();
    while controller.phase().await != FlowPhase::Finished {
        let Some(line) = lines.next_line().await? else {
            debug!("driver input closed");
            break;
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                replies.emit(&DriverEvent::Error {
                    message: err.to_string(),
                });
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(err) = execute(controller, radio, command, &replies).await {
            replies.emit(&DriverEvent::Error {
                message: err.to_string(),
            });
        }
    }
    Ok(())
}

async fn execute(
    controller: &FlowController,
    radio: &ReadinessGate,
    command: Command,
    replies: &JsonEvents,
) -> Result<(), FlowError> {
    let snapshot = match command {
        Command::Next => controller.next_page().await?,
        Command::Back => controller.previous_page().await?,
        Command::Jump(key) => controller.set_current_page(key).await?,
        Command::Result(code, outcome) => {
            match controller.deliver_activity_result(code, outcome).await? {
                Some(snapshot) => snapshot,
                None => controller.snapshot().await,
            }
        }
        Command::Toggle(setting, checked) => {
            return send_input(controller, PageInput::SetToggle { key: setting, checked }, replies)
                .await
        }
        Command::Refresh => return send_input(controller, PageInput::Refresh, replies).await,
        Command::RadioReady => {
            radio.mark_ready();
            controller.snapshot().await
        }
        Command::Finish => controller.finish_setup().await?,
        Command::State | Command::Quit => controller.snapshot().await,
    };
    replies.emit(&DriverEvent::Snapshot {
        snapshot: &snapshot,
    });
    Ok(())
}

async fn send_input(
    controller: &FlowController,
    input: PageInput,
    replies: &JsonEvents,
) -> Result<(), FlowError> {
    let Some(page) = controller.current_page().await else {
        return Ok(());
    };
    let handled = controller.page_input(page.key.clone(), input).await?;
    replies.emit(&DriverEvent::Input {
        key: page.key.as_str(),
        handled,
    });
    Ok(())
}
