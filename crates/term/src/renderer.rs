//! TerminalRenderer: flushes a canvas to a real terminal.
//!
//! Only cells that changed since the previous frame are rewritten, grouped
//! into horizontal runs. A missing or differently sized previous frame
//! triggers a full redraw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Canvas, Glyph, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    previous: Option<Canvas>,
    scratch: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            previous: None,
            scratch: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch.queue(terminal::EnterAlternateScreen)?;
        self.scratch.queue(cursor::Hide)?;
        self.scratch.queue(terminal::DisableLineWrap)?;
        self.flush_scratch()?;
        self.previous = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch.queue(ResetColor)?;
        self.scratch.queue(SetAttribute(Attribute::Reset))?;
        self.scratch.queue(terminal::EnableLineWrap)?;
        self.scratch.queue(cursor::Show)?;
        self.scratch.queue(terminal::LeaveAlternateScreen)?;
        self.flush_scratch()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force a full redraw on the next `present` (after a resize, say).
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Draw `canvas`, then swap it with the previous frame.
    ///
    /// Callers keep one canvas and pass it in every frame; after the call it
    /// holds stale contents and must be redrawn before the next present.
    pub fn present(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.scratch.clear();
        encode_rows_into(self.previous.as_ref(), canvas, &mut self.scratch)?;
        if !self.scratch.is_empty() {
            self.flush_scratch()?;
        }

        match self.previous.as_mut() {
            Some(prev) => std::mem::swap(prev, canvas),
            None => self.previous = Some(canvas.clone()),
        }
        Ok(())
    }

    fn flush_scratch(&mut self) -> Result<()> {
        self.stdout.write_all(&self.scratch)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// Returns the number of runs written; zero means nothing changed and `out`
/// was left untouched.
pub fn encode_rows_into(prev: Option<&Canvas>, next: &Canvas, out: &mut Vec<u8>) -> Result<usize> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current: Option<Glyph> = None;
    let mut runs = 0;
    for y in 0..next.height() {
        let row = next.row(y);
        let old = prev.map(|p| p.row(y));
        for (start, len) in changed_runs(old, row) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for glyph in &row[start..start + len] {
                if current.map_or(true, |c| !same_style(c, *glyph)) {
                    apply_style_into(out, *glyph)?;
                    current = Some(*glyph);
                }
                out.queue(Print(glyph.ch))?;
            }
            runs += 1;
        }
    }

    if current.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(runs)
}

fn same_style(a: Glyph, b: Glyph) -> bool {
    a.fg == b.fg && a.bg == b.bg && a.bold == b.bold
}

fn apply_style_into(out: &mut Vec<u8>, glyph: Glyph) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(glyph.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(glyph.bg)))?;
    if glyph.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// (start, len) of every run of differing cells in a row. With no previous
/// row the whole row is one run.
fn changed_runs(old: Option<&[Glyph]>, new: &[Glyph]) -> Vec<(usize, usize)> {
    let Some(old) = old else {
        return if new.is_empty() {
            Vec::new()
        } else {
            vec![(0, new.len())]
        };
    };

    let mut runs = Vec::new();
    let mut x = 0;
    while x < new.len() {
        if old.get(x) == Some(&new[x]) {
            x += 1;
            continue;
        }
        let start = x;
        while x < new.len() && old.get(x) != Some(&new[x]) {
            x += 1;
        }
        runs.push((start, x - start));
    }
    runs
}
