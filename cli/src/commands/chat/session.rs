//! # Chat Session Loop
//!
//! File: cli/src/commands/chat/session.rs
//! Author: Christi Mahu
//!
//! The read/submit/print loop behind `parley chat`. It is generic over its input and
//! output so tests can drive it with in-memory buffers.
//!
//! Replies go to the output as `<Label>: <text>`. While the persona is composing, a
//! typing indicator is written to stderr, but only for interactive sessions so
//! scripted output stays clean.
//!
use crate::core::error::Result;
use crate::engine::controller::ConversationController;
use anyhow::Context;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

const HELP_TEXT: &str = "Commands:
  /clear    start over
  /export   save the transcript
  /history  show the transcript
  /help     show this list
  /quit     leave (also /exit)
Start a message with // to send it with a single leading /.";

/// Settings that do not belong to the conversation itself.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub export_dir: PathBuf,
    /// Show the prompt and typing indicator.
    pub interactive: bool,
}

/// A parsed line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Say(&'a str),
    Clear,
    Export,
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

/// Only a lone `/word` is a command. `//text` sends `/text`, and a line such as
/// `/shrug hi` is sent as typed.
fn parse_line(line: &str) -> Line<'_> {
    let start = line.trim_start();
    if start.starts_with("//") {
        return Line::Say(&start[1..]);
    }
    let trimmed = start.trim_end();
    if !trimmed.starts_with('/') || trimmed.contains(char::is_whitespace) {
        return Line::Say(line);
    }
    match trimmed {
        "/clear" => Line::Clear,
        "/export" => Line::Export,
        "/history" => Line::History,
        "/help" => Line::Help,
        "/quit" | "/exit" => Line::Quit,
        other => Line::Unknown(other),
    }
}

async fn say<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output
        .write_all(format!("{}\n", text).as_bytes())
        .await
        .context("Failed to write to output")?;
    output.flush().await.context("Failed to flush output")?;
    Ok(())
}

/// # Run Chat Session (`run`)
///
/// Greets the user, then reads lines from `input` until `/quit` or end of input.
///
/// ## Arguments
///
/// * `controller`: The conversation to drive.
/// * `input`: Source of user lines.
/// * `output`: Where greetings, replies and command feedback are written.
/// * `settings`: Export directory and interactivity.
///
/// ## Returns
///
/// * `Result<()>` - Errors only when reading input, writing output or saving an
///   export fails.
pub async fn run<R, W>(
    controller: &mut ConversationController,
    input: R,
    output: &mut W,
    settings: &SessionSettings,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let label = controller.persona().label.clone();
    let greeting = controller.persona().greeting.clone();
    say(output, &format!("{}: {}", label, greeting)).await?;

    let mut lines = input.lines();
    loop {
        if settings.interactive {
            output.write_all(b"You: ").await?;
            output.flush().await?;
        }
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            debug!("End of input, closing session");
            break;
        };

        match parse_line(&line) {
            Line::Quit => {
                say(output, &format!("{}: Goodbye!", label)).await?;
                break;
            }
            Line::Clear => {
                controller.clear().await;
                say(output, "(conversation cleared)").await?;
                say(output, &format!("{}: {}", label, greeting)).await?;
            }
            Line::Export => {
                let transcript = controller.export().await;
                let path = transcript.write_to(&settings.export_dir)?;
                say(output, &format!("Transcript saved to {}", path.display())).await?;
            }
            Line::History => {
                let transcript = controller.export().await;
                say(output, &transcript.contents).await?;
            }
            Line::Help => say(output, HELP_TEXT).await?,
            Line::Unknown(command) => {
                warn!("Unknown session command: {}", command);
                say(
                    output,
                    &format!("Unknown command '{}'. Type /help for a list of commands.", command),
                )
                .await?;
            }
            Line::Say(text) => {
                controller.set_input(text);
                if !controller.can_send().await || !controller.send().await {
                    continue;
                }
                if settings.interactive {
                    eprintln!("{} is typing...", label);
                }
                controller.wait_for_reply().await?;
                let messages = controller.messages().await;
                if let Some(reply) = messages.last().filter(|m| m.is_bot()) {
                    say(output, &format!("{}: {}", label, reply.text())).await?;
                }
            }
        }
    }
    Ok(())
}
