use std::io::Write;

use tasklet_shared::{Task, TaskStore, Theme};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

/// ANSI SGR codes for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header: &'static str,
    pub position: &'static str,
    pub text: &'static str,
    pub done: &'static str,
    pub muted: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        header: "1;30",
        position: "34",
        text: "30",
        done: "9;37",
        muted: "37",
    };

    pub const DARK: Palette = Palette {
        header: "1;97",
        position: "93",
        text: "97",
        done: "9;90",
        muted: "90",
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// `color` in the config enables ANSI, but only when `is_terminal` holds.
    pub fn new(cfg: &Config, is_terminal: bool) -> anyhow::Result<Self> {
        let color = cfg.get_bool("color")?.unwrap_or(true);
        Ok(Self {
            color: color && is_terminal,
        })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip_all, fields(len = store.len()))]
    pub fn print_tasks<W: Write>(
        &self,
        out: &mut W,
        store: &TaskStore,
        palette: &Palette,
    ) -> anyhow::Result<()> {
        if store.is_empty() {
            writeln!(out, "{}", self.paint("No tasks.", palette.muted))?;
            return Ok(());
        }

        let headers = ["#", "Done", "Task"]
            .iter()
            .map(|h| self.paint(h, palette.header))
            .collect();

        let rows = store
            .tasks()
            .iter()
            .enumerate()
            .map(|(idx, task)| self.task_row(idx + 1, task, palette))
            .collect();

        write_table(&mut *out, headers, rows)?;

        let summary = format!(
            "{} remaining, {} done",
            store.remaining_count(),
            store.completed_count()
        );
        writeln!(out, "{}", self.paint(&summary, palette.muted))?;
        Ok(())
    }

    fn task_row(&self, position: usize, task: &Task, palette: &Palette) -> Vec<String> {
        let (mark, text_code) = if task.completed {
            ("[x]", palette.done)
        } else {
            ("[ ]", palette.text)
        };

        vec![
            self.paint(&position.to_string(), palette.position),
            mark.to_string(),
            self.paint(&escape_control(task.text()), text_code),
        ]
    }

    pub fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| visible_width(h)).collect();

    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(visible_width(cell));
        }
    }

    write_row(&mut writer, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut writer, &rule, &widths)?;

    for row in &rows {
        write_row(&mut writer, row, &widths)?;
    }

    Ok(())
}

fn write_row<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> anyhow::Result<()> {
    let last = cells.len().saturating_sub(1);
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if idx == last {
            write!(writer, "{cell}")?;
        } else {
            let padding = width.saturating_sub(visible_width(cell));
            write!(writer, "{cell}{} ", " ".repeat(padding))?;
        }
    }
    writeln!(writer)?;
    Ok(())
}

/// Control characters are shown as Rust escapes so user text can never
/// emit terminal sequences of its own.
pub fn escape_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    out
}

fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
