//! Diagnostics pane rendering

use super::utils::{clamp_scroll, inner_height, pane_block, scroll_to};
use crate::pipeline::{Diagnostic, Stage};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

fn stage_tag(stage: Stage) -> (&'static str, Color) {
    match stage {
        Stage::Lex => (" LEX ", DEFAULT_THEME.secondary),
        Stage::Parse => (" SYN ", DEFAULT_THEME.error),
        Stage::Check => (" SEM ", DEFAULT_THEME.primary),
    }
}

/// Render the diagnostic list with `selected` highlighted
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &[Diagnostic],
    selected: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Diagnostics ({}) ", diagnostics.len());
    let block = pane_block(title, is_focused);

    if diagnostics.is_empty() {
        let paragraph = Paragraph::new("No problems found")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = inner_height(area);
    if let Some(index) = selected {
        *scroll_offset = scroll_to(*scroll_offset, index, visible_height);
    }
    *scroll_offset = clamp_scroll(*scroll_offset, diagnostics.len(), visible_height);

    let items: Vec<ListItem> = diagnostics
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, diagnostic)| {
            let (tag, color) = stage_tag(diagnostic.stage());
            let mut text_style = Style::default().fg(DEFAULT_THEME.fg);
            if selected == Some(idx) {
                text_style = text_style
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(tag, Style::default().bg(color).fg(Color::Black)),
                Span::raw(" "),
                Span::styled(diagnostic.to_string(), text_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
