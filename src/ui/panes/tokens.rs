//! Token list rendering

use super::utils::{clamp_scroll, inner_height, token_style};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, List, ListItem},
    Frame,
};

fn token_line(token: &Token) -> Line<'static> {
    let position = format!(
        "{:>4}:{:<4} ",
        token.location.line, token.location.column
    );
    let lexeme = token.lexeme.escape_debug().to_string();

    let mut spans = vec![
        Span::styled(position, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("{:<20} ", token.kind.category()),
            Style::default().fg(DEFAULT_THEME.fg),
        ),
        Span::styled(lexeme, token_style(&token.kind)),
    ];

    if let Some(error) = token.as_error() {
        spans.push(Span::styled(
            format!("  ({})", error.kind),
            Style::default().fg(DEFAULT_THEME.error),
        ));
    }

    Line::from(spans)
}

/// Render the token stream, end marker excluded
pub fn render_tokens(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    tokens: &[Token],
    scroll_offset: &mut usize,
) {
    let lines: Vec<Line> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(token_line)
        .collect();

    let visible_height = inner_height(area);
    *scroll_offset = clamp_scroll(*scroll_offset, lines.len(), visible_height);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
