//! # Layout Engine
//!
//! Pure sizing math for the three horizontal bands of the screen:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            Header (layer title)          │  HEADER_HEIGHT
//! ├──────────────────────────────────────────┤
//! │                                          │
//! │   Viewport (active layer's output)       │  content_height()
//! │                                          │
//! ├──────────────────────────────────────────┤
//! │ a Profil  x XP  q Quitter  L English     │  FOOTER_HEIGHT
//! └──────────────────────────────────────────┘
//! ```
//!
//! Widths are terminal columns, measured with `unicode-width` so CJK and
//! other double-width characters count as two. Output widths skip ANSI
//! escape sequences.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::ansi;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;
/// Columns reserved for the key in each menu block.
pub const KEY_WIDTH: u16 = 2;

const ELLIPSIS: char = '…';

/// A key → label cell in the menu strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBlock {
    pub key: String,
    pub label: String,
}

impl MenuBlock {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Height left for the viewport once header and footer are drawn.
pub fn content_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT)
}

/// Split `total` columns across `count` blocks. The first `total % count`
/// blocks get one extra column, so the widths always sum to `total`.
pub fn block_widths(total: u16, count: usize) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }
    let total = usize::from(total);
    let base = total / count;
    let remainder = total % count;
    (0..count)
        .map(|i| (base + usize::from(i < remainder)) as u16)
        .collect()
}

/// Split a block's width into (key columns, label columns).
pub fn split_block(width: u16) -> (u16, u16) {
    let key_width = KEY_WIDTH.min(width);
    (key_width, width - key_width)
}

/// Label text as drawn in a block: one leading space, cut to fit.
pub fn block_label(label: &str, width: u16) -> String {
    if label.is_empty() {
        return String::new();
    }
    truncate_with_ellipsis(&format!(" {label}"), width)
}

/// Cut `text` to at most `width` columns, ending in `…` when anything was
/// dropped.
pub fn truncate_with_ellipsis(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if width == 0 {
        return String::new();
    }
    if text.width() <= width {
        return text.to_string();
    }

    let budget = width - ELLIPSIS.width().unwrap_or(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Right-align `text` in `width` columns.
pub fn pad_left(text: &str, width: u16) -> String {
    let gap = usize::from(width).saturating_sub(text.width());
    format!("{}{}", " ".repeat(gap), text)
}

/// Left-align `text` in `width` columns.
pub fn pad_right(text: &str, width: u16) -> String {
    let gap = usize::from(width).saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(gap))
}

/// True if any line of `content` is wider than `width`. A zero width
/// never overflows.
pub fn has_horizontal_overflow(content: &str, width: u16) -> bool {
    if width == 0 {
        return false;
    }
    max_line_width(content) > usize::from(width)
}

/// Widest line of `content`, in visible columns.
pub fn max_line_width(content: &str) -> usize {
    ansi::parse(content)
        .iter()
        .map(ansi::line_width)
        .max()
        .unwrap_or(0)
}

/// Number of lines the viewport has to show for `content`.
pub fn line_count(content: &str) -> usize {
    content.split('\n').count()
}
