use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};

use crate::commands::{Flow, Session};

const PROMPT: &str = "tasklet> ";

/// Reads commands from `input` until `quit` or end of input. The prompt is
/// only written when a person is typing.
#[tracing::instrument(skip_all)]
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    prompt: bool,
) -> anyhow::Result<()> {
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "{PROMPT}").context("failed writing prompt")?;
            out.flush().context("failed flushing prompt")?;
        }

        let Some(line) = lines.next() else {
            debug!("end of input");
            if prompt {
                writeln!(out).context("failed writing to output")?;
            }
            break;
        };
        let line = line.context("failed reading command")?;

        if session.execute_line(&line, out)? == Flow::Quit {
            info!("quit requested");
            break;
        }
    }

    Ok(())
}
