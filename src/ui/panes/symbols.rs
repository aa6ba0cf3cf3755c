//! Symbol table rendering

use crate::semantic::symbols::SymbolTable;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph, Row, Table},
    Frame,
};

use super::utils::{clamp_scroll, inner_height};

pub fn render_symbols(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    symbols: Option<&SymbolTable>,
    scroll_offset: &mut usize,
) {
    let Some(symbols) = symbols.filter(|s| !s.is_empty()) else {
        let paragraph = Paragraph::new("(no symbols)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    // header row takes one line
    let visible_height = inner_height(area).saturating_sub(1).max(1);
    *scroll_offset = clamp_scroll(*scroll_offset, symbols.len(), visible_height);

    let header = Row::new(["register", "name", "type", "value", "lines"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = symbols
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|symbol| {
            let value = symbol
                .value
                .map_or_else(|| "-".to_string(), |v| v.to_string());
            let lines = symbol
                .lines
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Row::new([
                symbol.register.to_string(),
                symbol.name.clone(),
                symbol.ty.to_string(),
                value,
                lines,
            ])
            .style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Min(8),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
