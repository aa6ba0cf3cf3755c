//! Source code pane rendering
//!
//! Highlighting comes from the lexer's own token stream, so the colours
//! always agree with how the program was actually tokenized. Lines with a
//! diagnostic get a marker in the gutter, and the line of the selected
//! diagnostic is highlighted.

use super::utils::{clamp_scroll, inner_height, pane_block, scroll_to, token_style};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::BTreeSet;

/// Split `source` into lines of styled spans using `tokens`
pub(crate) fn highlight<'t>(source: &str, tokens: &[Token]) -> Vec<Vec<Span<'t>>> {
    let lines: Vec<Vec<char>> = source.lines().map(|l| l.chars().collect()).collect();
    let mut styles: Vec<Vec<Style>> = lines
        .iter()
        .map(|l| vec![Style::default().fg(DEFAULT_THEME.fg); l.len()])
        .collect();

    for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
        let style = token_style(&token.kind);
        let mut line = token.location.line.saturating_sub(1);
        let mut column = token.location.column.saturating_sub(1);

        for ch in token.lexeme.chars() {
            if ch == '\n' {
                line += 1;
                column = 0;
                continue;
            }
            if let Some(slot) = styles.get_mut(line).and_then(|row| row.get_mut(column)) {
                *slot = style;
            }
            column += 1;
        }
    }

    lines
        .iter()
        .zip(styles)
        .map(|(chars, styles)| {
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_style = Style::default();

            for (&ch, style) in chars.iter().zip(styles) {
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push(ch);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            spans
        })
        .collect()
}

/// Render the source code pane.
///
/// With `follow_selection` set the view scrolls so `selected_line` is visible.
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    tokens: &[Token],
    error_lines: &BTreeSet<usize>,
    selected_line: Option<usize>,
    follow_selection: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source Code ", is_focused);
    let highlighted = highlight(source_code, tokens);
    let visible_height = inner_height(area);

    if let Some(line) = selected_line.filter(|l| follow_selection && *l > 0) {
        *scroll_offset = scroll_to(*scroll_offset, line - 1, visible_height);
    }
    *scroll_offset = clamp_scroll(*scroll_offset, highlighted.len(), visible_height);

    let visible_lines: Vec<Line> = highlighted
        .into_iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, spans)| {
            let line_num = idx + 1;
            let has_error = error_lines.contains(&line_num);
            let is_selected = selected_line == Some(line_num);

            let marker = if has_error { "●" } else { " " };
            let num_style = if has_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let gutter = format!("{}{:4} ", marker, line_num);
            let mut line_spans = vec![Span::styled(gutter, num_style)];
            if is_selected {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                line_spans.extend(spans.into_iter().map(|s| {
                    let style = s.style.patch(bg);
                    s.style(style)
                }));
            } else {
                line_spans.extend(spans);
            }

            Line::from(line_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn texts(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_groups_tokens() {
        let source = "main {\n  int a; // note\n}";
        let tokens = Lexer::new(source).tokenize();
        let lines = highlight(source, &tokens);

        assert_eq!(lines.len(), 3);
        assert_eq!(texts(&lines[0]), vec!["main", " ", "{"]);
        assert_eq!(texts(&lines[1]).last().map(String::as_str), Some("// note"));
        assert_eq!(lines[1][1].style, token_style(&tokens[2].kind));
    }

    #[test]
    fn test_highlight_block_comment_spans_lines() {
        let source = "/* a\nb */ main";
        let tokens = Lexer::new(source).tokenize();
        let lines = highlight(source, &tokens);

        let comment = token_style(&TokenKind::Comment);
        assert_eq!(lines[1][0].content, "b */");
        assert_eq!(lines[1][0].style, comment);
    }
}
