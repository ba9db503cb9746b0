//! The interactive form loop.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use super::input::{parse_line, Input, HELP};
use crate::clock::Clock;
use crate::error::Result;
use crate::render::render_view;
use crate::session::{Event, Session};

const PROMPT: &str = "ageform> ";

/// Drive `session` from `input` until it ends or the user quits.
///
/// Rejected input is reported on `output` and the loop continues; only I/O
/// and export failures end the loop with an error.
///
/// # Errors
///
/// Returns an error if reading input, writing output, or saving a download
/// fails.
pub fn run_interactive<C, R, W>(
    session: &mut Session<C>,
    input: R,
    mut output: W,
    export_dir: &Path,
) -> Result<()>
where
    C: Clock,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Personal Information & Exact Age")?;
    writeln!(output, "Type 'help' for a list of commands.")?;
    writeln!(output)?;
    write!(output, "{}", render_view(&session.current_view()))?;

    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(%line, "rejected input");
                writeln!(output, "error: {err}")?;
                continue;
            }
        };

        match parsed {
            Input::Empty => {}
            Input::Quit => break,
            Input::Help => writeln!(output, "{HELP}")?,
            Input::Show => write!(output, "{}", render_view(&session.current_view()))?,
            Input::Event(event) => {
                let submitting = matches!(event, Event::Submit);
                match session.handle(event) {
                    Ok(view) => {
                        if submitting {
                            if let Some(record) = view.records.last() {
                                writeln!(
                                    output,
                                    "Submitted: {} ({})",
                                    record.name, record.exact_age
                                )?;
                            }
                        }
                        write!(output, "{}", render_view(&view))?;
                    }
                    Err(err) if err.is_input_error() => writeln!(output, "error: {err}")?,
                    Err(err) => return Err(err),
                }
            }
            Input::Download(dir) => {
                let view = session.handle(Event::Download)?;
                match view.download {
                    Some(file) => {
                        let path = file.save_in(dir.as_deref().unwrap_or(export_dir))?;
                        writeln!(
                            output,
                            "Saved {} record(s) to {} ({})",
                            view.records.len(),
                            path.display(),
                            file.mime_type
                        )?;
                    }
                    None => writeln!(output, "Nothing to download yet; submit a record first.")?,
                }
            }
        }
    }

    let stats = session.stats();
    if stats.warnings > 0 {
        warn!("{} marital status conflict(s) were corrected", stats.warnings);
    }
    info!("Session ended with {} record(s)", stats.submitted);
    Ok(())
}
