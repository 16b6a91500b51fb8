//! # ANSI Output
//!
//! Commands often colour their output. This module splits raw output into
//! lines of styled runs so escape sequences never count as visible text:
//!
//! ```text
//! "\x1b[1;31mred\x1b[0m ok"  ──▶  [Run("red", bold+red), Run(" ok", plain)]
//! ```
//!
//! SGR (`ESC [ ... m`) is interpreted; every other control or escape
//! sequence is dropped. Tabs expand to the next multiple of eight columns.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vte::{Params, Parser, Perform};

const TAB_STOP: usize = 8;

/// A terminal colour as the command asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    /// Palette index: 0-7 normal, 8-15 bright, 16-255 extended.
    Indexed(u8),
    Rgb(u8, u8, u8),
}

/// Text attributes in effect for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sgr {
    pub fg: Option<Colour>,
    pub bg: Option<Colour>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reversed: bool,
}

/// Consecutive characters sharing one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub sgr: Sgr,
}

pub type StyledLine = Vec<Run>;

/// Split `content` into styled lines. Always returns at least one line.
pub fn parse(content: &str) -> Vec<StyledLine> {
    let mut collector = Collector::default();
    let mut parser = Parser::new();
    for byte in content.bytes() {
        parser.advance(&mut collector, byte);
    }
    collector.finish()
}

/// Visible columns of a parsed line.
pub fn line_width(line: &StyledLine) -> usize {
    line.iter().map(|run| run.text.width()).sum()
}

#[derive(Default)]
struct Collector {
    lines: Vec<StyledLine>,
    current: StyledLine,
    column: usize,
    sgr: Sgr,
}

impl Collector {
    fn push_char(&mut self, c: char) {
        match self.current.last_mut() {
            Some(run) if run.sgr == self.sgr => run.text.push(c),
            _ => self.current.push(Run {
                text: c.to_string(),
                sgr: self.sgr,
            }),
        }
        self.column += c.width().unwrap_or(0);
    }

    fn new_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.column = 0;
    }

    fn finish(mut self) -> Vec<StyledLine> {
        self.lines.push(self.current);
        self.lines
    }

    fn apply_sgr(&mut self, params: &Params) {
        if params.is_empty() {
            self.sgr = Sgr::default();
            return;
        }

        let mut iter = params.iter();
        while let Some(param) = iter.next() {
            let Some(&code) = param.first() else {
                continue;
            };
            match code {
                0 => self.sgr = Sgr::default(),
                1 => self.sgr.bold = true,
                2 => self.sgr.dim = true,
                3 => self.sgr.italic = true,
                4 => self.sgr.underline = true,
                7 => self.sgr.reversed = true,
                22 => {
                    self.sgr.bold = false;
                    self.sgr.dim = false;
                }
                23 => self.sgr.italic = false,
                24 => self.sgr.underline = false,
                27 => self.sgr.reversed = false,
                30..=37 => self.sgr.fg = Some(Colour::Indexed((code - 30) as u8)),
                38 => self.sgr.fg = extended_colour(param, &mut iter),
                39 => self.sgr.fg = None,
                40..=47 => self.sgr.bg = Some(Colour::Indexed((code - 40) as u8)),
                48 => self.sgr.bg = extended_colour(param, &mut iter),
                49 => self.sgr.bg = None,
                90..=97 => self.sgr.fg = Some(Colour::Indexed((code - 90 + 8) as u8)),
                100..=107 => self.sgr.bg = Some(Colour::Indexed((code - 100 + 8) as u8)),
                _ => {}
            }
        }
    }
}

/// Read a 256-colour (`5;n`) or truecolour (`2;r;g;b`) argument, in either
/// the colon form (one parameter) or the semicolon form (the following
/// parameters).
fn extended_colour<'a>(
    param: &[u16],
    rest: &mut impl Iterator<Item = &'a [u16]>,
) -> Option<Colour> {
    let args: Vec<u16> = if param.len() > 1 {
        param[1..].to_vec()
    } else {
        let mode = rest.next().and_then(|p| p.first().copied());
        let count = match mode {
            Some(5) => 1,
            Some(2) => 3,
            _ => return None,
        };
        mode.into_iter()
            .chain(rest.take(count).filter_map(|p| p.first().copied()))
            .collect()
    };

    let byte = |v: u16| u8::try_from(v).ok();
    match args.as_slice() {
        [5, n, ..] => byte(*n).map(Colour::Indexed),
        // The colon form may carry a colour-space id before the components.
        [2, .., r, g, b] => Some(Colour::Rgb(byte(*r)?, byte(*g)?, byte(*b)?)),
        _ => None,
    }
}

impl Perform for Collector {
    fn print(&mut self, c: char) {
        self.push_char(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            b'\t' => {
                let spaces = TAB_STOP - self.column % TAB_STOP;
                for _ in 0..spaces {
                    self.push_char(' ');
                }
            }
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, _intermediates: &[u8], ignore: bool, action: char) {
        if action == 'm' && !ignore {
            self.apply_sgr(params);
        }
    }
}
