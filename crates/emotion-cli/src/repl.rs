//! Line-oriented terminal session.
//!
//! The selected page persists between lines like a sidebar menu. Lines
//! starting with `:` are commands; anything else on Home is submitted to
//! the classifier.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::app::{Interaction, Page, Session};
use crate::display::write_screen;
use crate::render::render;

const HELP: &str = "\
Commands:
  :home      go to Home (type text there to classify it)
  :monitor   go to Monitor
  :about     go to About
  :help      show this list
  :quit      end the session";

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(Page),
    Submit(String),
    Rerun,
    Help,
    Quit,
}

/// Interpret one line in the context of the current page.
pub fn parse_line(line: &str, current: Page) -> Command {
    match line.trim() {
        ":home" => return Command::Select(Page::Home),
        ":monitor" => return Command::Select(Page::Monitor),
        ":about" => return Command::Select(Page::About),
        ":help" => return Command::Help,
        ":quit" => return Command::Quit,
        _ => {}
    }
    match current {
        Page::Home => Command::Submit(line.to_string()),
        Page::Monitor | Page::About => Command::Rerun,
    }
}

/// Drive a session until `:quit` or end of input.
pub fn run(
    session: &mut Session<'_>,
    start: Page,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    let mut page = start;
    show(session, &Interaction::visit(page), &mut out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "[{page}] > ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);

        let interaction = match parse_line(line, page) {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Select(next) => {
                page = next;
                Interaction::visit(page)
            }
            Command::Submit(text) => Interaction::submit(text),
            Command::Rerun => Interaction::visit(page),
        };
        debug!(page = page.name(), "interaction");
        show(session, &interaction, &mut out)?;
    }
    Ok(())
}

fn show(session: &mut Session<'_>, interaction: &Interaction, out: &mut impl Write) -> Result<()> {
    let view = session.step(interaction);
    write_screen(out, &render(&view))?;
    Ok(())
}
