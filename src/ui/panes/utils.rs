//! Helpers shared by the panes

use crate::parser::lexer::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders},
};

/// Bordered block with the focus colour applied
pub(crate) fn pane_block<'a>(title: impl Into<Line<'a>>, is_focused: bool) -> Block<'a> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title.into())
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least 1
pub(crate) fn inner_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `offset` so the last page is never scrolled past
pub(crate) fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}

/// Smallest offset that keeps row `index` on screen
pub(crate) fn scroll_to(offset: usize, index: usize, visible: usize) -> usize {
    if index < offset {
        index
    } else if index >= offset + visible {
        index + 1 - visible
    } else {
        offset
    }
}

/// Colour for a token in the source and token panes
pub(crate) fn token_style(kind: &TokenKind) -> Style {
    let fg = match kind {
        TokenKind::Keyword(keyword) if keyword.as_type().is_some() => DEFAULT_THEME.type_name,
        TokenKind::Keyword(_) | TokenKind::LogicalOp(_) => {
            return Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        }
        TokenKind::IntLiteral(_) | TokenKind::FloatLiteral(_) => DEFAULT_THEME.number,
        TokenKind::ArithOp(_)
        | TokenKind::RelOp(_)
        | TokenKind::Assign
        | TokenKind::Equality => DEFAULT_THEME.operator,
        TokenKind::Symbol(_) => DEFAULT_THEME.primary,
        TokenKind::Comment => DEFAULT_THEME.comment,
        TokenKind::Error(_) => {
            return Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::UNDERLINED)
        }
        TokenKind::Ident | TokenKind::Eof => DEFAULT_THEME.fg,
    };
    Style::default().fg(fg)
}
