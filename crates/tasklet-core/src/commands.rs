use std::io::Write;

use anyhow::Context;
use tasklet_shared::{AddOutcome, InputBuffer, TaskId, TaskStore, ThemeController};
use tracing::{debug, instrument, warn};

use crate::render::{Renderer, escape_control};
use crate::theme::TerminalThemeSink;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add", "done", "toggle", "delete", "list", "theme", "help", "quit", "exit",
    ]
}

/// Exact names win; otherwise a prefix must match exactly one command.
pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    /// One-based position as shown by `list`.
    Toggle(usize),
    Delete(usize),
    List,
    Theme,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Unknown(String),
    BadPosition(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command: {}", escape_control(word)),
            Self::BadPosition(word) => {
                write!(f, "expected a task number, got: {}", escape_control(word))
            }
        }
    }
}

impl Command {
    /// `Ok(None)` for a blank line. Text after `add` is kept verbatim past
    /// the single separator character.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.find(char::is_whitespace) {
            Some(idx) => {
                let sep_len = line[idx..].chars().next().map_or(1, char::len_utf8);
                (&line[..idx], &line[idx + sep_len..])
            }
            None => (line, ""),
        };

        let known = known_command_names();
        let command = expand_command_abbrev(word, &known)
            .ok_or_else(|| ParseError::Unknown(word.to_string()))?;

        let parsed = match command {
            "add" => Self::Add(rest.to_string()),
            "done" | "toggle" => Self::Toggle(parse_position(rest)?),
            "delete" => Self::Delete(parse_position(rest)?),
            "list" => Self::List,
            "theme" => Self::Theme,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(parsed))
    }
}

fn parse_position(raw: &str) -> Result<usize, ParseError> {
    let raw = raw.trim();
    match raw.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(ParseError::BadPosition(raw.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything one terminal session owns.
#[derive(Debug)]
pub struct Session {
    pub store: TaskStore,
    pub input: InputBuffer,
    pub theme: ThemeController<TerminalThemeSink>,
    renderer: Renderer,
}

impl Session {
    pub fn new(theme: ThemeController<TerminalThemeSink>, renderer: Renderer) -> Self {
        Self {
            store: TaskStore::new(),
            input: InputBuffer::new(),
            theme,
            renderer,
        }
    }

    /// Parse problems are reported to `out` and never end the session.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<Flow> {
        match Command::parse(line) {
            Ok(Some(command)) => self.dispatch(command, out),
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                debug!(%err, line, "rejected shell line");
                writeln!(out, "{err}").context("failed writing to output")?;
                Ok(Flow::Continue)
            }
        }
    }

    #[instrument(skip(self, out))]
    pub fn dispatch<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<Flow> {
        match command {
            Command::Add(text) => {
                self.input.set(text);
                if let AddOutcome::Added(id) = self.input.submit(&mut self.store) {
                    debug!(%id, "task added from shell");
                    self.print_list(out)?;
                }
            }
            Command::Toggle(position) => {
                let Some(id) = self.resolve(position) else {
                    return self.missing(position, out);
                };
                if let Err(err) = self.store.toggle_complete(id) {
                    warn!(%err, position, "toggle target vanished");
                    return self.missing(position, out);
                }
                self.print_list(out)?;
            }
            Command::Delete(position) => {
                let Some(id) = self.resolve(position) else {
                    return self.missing(position, out);
                };
                if let Err(err) = self.store.delete(id) {
                    warn!(%err, position, "delete target vanished");
                    return self.missing(position, out);
                }
                self.print_list(out)?;
            }
            Command::List => self.print_list(out)?,
            Command::Theme => {
                let theme = self.theme.toggle();
                writeln!(out, "theme: {theme}").context("failed writing to output")?;
            }
            Command::Help => write_help(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn resolve(&self, position: usize) -> Option<TaskId> {
        position
            .checked_sub(1)
            .and_then(|idx| self.store.id_at(idx))
    }

    fn print_list<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        self.renderer
            .print_tasks(out, &self.store, self.theme.sink().palette())
            .context("failed rendering tasks")
    }

    fn missing<W: Write>(&self, position: usize, out: &mut W) -> anyhow::Result<Flow> {
        writeln!(out, "no task at position {position}").context("failed writing to output")?;
        Ok(Flow::Continue)
    }
}

fn write_help<W: Write>(out: &mut W) -> anyhow::Result<()> {
    let lines = [
        ("add <text>", "add a task"),
        ("done <n>", "toggle completion of task n (alias: toggle)"),
        ("delete <n>", "delete task n"),
        ("list", "show all tasks"),
        ("theme", "switch between light and dark"),
        ("help", "show this summary"),
        ("quit", "leave (alias: exit)"),
    ];
    for (usage, about) in lines {
        writeln!(out, "  {usage:<12} {about}").context("failed writing to output")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Command, ParseError, expand_command_abbrev, known_command_names};

    #[test]
    fn abbreviations_must_be_unique() {
        let known = known_command_names();
        assert_eq!(expand_command_abbrev("a", &known), Some("add"));
        assert_eq!(expand_command_abbrev("do", &known), Some("done"));
        assert_eq!(expand_command_abbrev("del", &known), Some("delete"));
        assert_eq!(expand_command_abbrev("d", &known), None);
        assert_eq!(expand_command_abbrev("t", &known), None);
        assert_eq!(expand_command_abbrev("th", &known), Some("theme"));
    }

    #[test]
    fn add_keeps_text_verbatim() {
        assert_eq!(
            Command::parse("add   buy milk  "),
            Ok(Some(Command::Add("  buy milk  ".to_string())))
        );
        assert_eq!(
            Command::parse("add"),
            Ok(Some(Command::Add(String::new())))
        );
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(Command::parse("done 2"), Ok(Some(Command::Toggle(2))));
        assert_eq!(Command::parse("toggle 1"), Ok(Some(Command::Toggle(1))));
        assert_eq!(Command::parse("del 3 "), Ok(Some(Command::Delete(3))));
        assert_eq!(
            Command::parse("done 0"),
            Err(ParseError::BadPosition("0".to_string()))
        );
        assert_eq!(
            Command::parse("delete x"),
            Err(ParseError::BadPosition("x".to_string()))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(
            Command::parse("frobnicate"),
            Err(ParseError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn only_quit_and_exit_end_the_session() {
        for name in known_command_names() {
            let parsed = Command::parse(&format!("{name} 1"));
            let quits = parsed == Ok(Some(Command::Quit));
            assert_eq!(quits, matches!(name, "quit" | "exit"), "{name}");
            assert!(parsed.is_ok(), "{name}: {parsed:?}");
        }
    }

    #[test]
    fn error_words_are_escaped() {
        let err = Command::parse("\x1b[31m").unwrap_err();
        assert_eq!(err.to_string(), "unknown command: \\u{1b}[31m");
    }
}
