//! Interactive emotion picker.

use std::future::Future;
use std::io::{self, BufRead, Write};

use face::{Emotion, Envelope};
use tokio::sync::mpsc;

use crate::transport::{Transport, TransportError};

/// Parsed operator input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Exit,
    Emotion(Emotion),
    NotANumber,
    OutOfRange,
}

/// Why the menu loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuExit {
    Chosen,
    EndOfInput,
    Interrupted,
}

#[must_use]
pub fn parse_choice(input: &str) -> Choice {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Choice::NotANumber;
    }
    // All digits, so the only parse failure is overflow.
    let Ok(index) = input.parse::<usize>() else {
        return Choice::OutOfRange;
    };
    if index == 0 {
        return Choice::Exit;
    }
    Emotion::from_menu_index(index).map_or(Choice::OutOfRange, Choice::Emotion)
}

/// Read lines on a dedicated thread so the menu can race input against
/// Ctrl-C. Bytes that are not UTF-8 are replaced rather than rejected, so a
/// garbled line is just another invalid choice. The channel closes at end
/// of input or on an I/O error.
pub fn spawn_line_reader<R>(mut reader: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => return,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']).to_owned();
                    if tx.blocking_send(line).is_err() {
                        return;
                    }
                }
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => {
                    tracing::warn!(%error, "input read failed");
                    return;
                }
            }
        }
    });
    rx
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "AI Face Test CLI")?;
    writeln!(out, "Select an emotion to send to the display:")?;
    for (i, emotion) in Emotion::ALL.iter().enumerate() {
        writeln!(out, "  {}. {} {}", i + 1, emotion.name(), emotion.glyph())?;
    }
    writeln!(out, "  0. Exit")?;
    write!(out, "Choice: ")?;
    out.flush()
}

/// Run the menu until the operator exits, input ends, or `shutdown`
/// resolves while waiting for input.
///
/// # Errors
///
/// Only failures writing to `out`. Transport failures are reported inline.
pub async fn run_menu<W, S>(
    lines: &mut mpsc::Receiver<String>,
    transport: &Transport,
    out: &mut W,
    shutdown: S,
) -> io::Result<MenuExit>
where
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        print_menu(out)?;

        // An interrupt that landed during a send wins over buffered input.
        let line = tokio::select! {
            biased;
            () = &mut shutdown => {
                writeln!(out, "\nExiting.")?;
                return Ok(MenuExit::Interrupted);
            }
            line = lines.recv() => line,
        };
        let Some(line) = line else {
            writeln!(out, "\nExiting.")?;
            return Ok(MenuExit::EndOfInput);
        };

        match parse_choice(&line) {
            Choice::Exit => return Ok(MenuExit::Chosen),
            Choice::NotANumber => writeln!(out, "Please enter a number.")?,
            Choice::OutOfRange => writeln!(out, "Unknown choice")?,
            Choice::Emotion(emotion) => send_emotion(emotion, transport, out).await?,
        }
    }
}

/// Build and deliver one envelope. Transport failures become a single
/// operator-facing line.
///
/// # Errors
///
/// Only failures writing to `out`.
pub async fn send_emotion<W: Write>(
    emotion: Emotion,
    transport: &Transport,
    out: &mut W,
) -> io::Result<()> {
    let envelope = Envelope::apply_mutations(emotion);
    match transport.deliver(&envelope, out).await {
        Ok(delivery) => {
            tracing::debug!(%emotion, replied = delivery.reply.is_some(), "delivered");
        }
        Err(TransportError::Output(error)) => return Err(error),
        Err(error) => {
            tracing::debug!(%emotion, %error, "delivery failed");
            writeln!(out, "WebSocket error: {error}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;
