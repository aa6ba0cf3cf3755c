//! Tree rendering for the syntax tree and annotated tree views
//!
//! The tree is flattened into rows with box-drawing guides. Typed nodes show
//! `: type` and, when known, `= value`; unresolved nodes are drawn in the
//! error colour.

use super::utils::{clamp_scroll, inner_height};
use crate::parser::ast::Type;
use crate::semantic::tree::TreeNode;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph},
    Frame,
};

/// One visible row of a flattened tree
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TreeRow {
    pub guide: String,
    pub label: String,
    pub annotation: Option<String>,
    pub is_error: bool,
}

pub(crate) fn flatten(tree: &TreeNode) -> Vec<TreeRow> {
    let mut rows = Vec::with_capacity(tree.size());
    push_rows(tree, String::new(), None, &mut rows);
    rows
}

fn push_rows(node: &TreeNode, prefix: String, is_last: Option<bool>, rows: &mut Vec<TreeRow>) {
    let guide = match is_last {
        None => String::new(),
        Some(true) => format!("{}└─ ", prefix),
        Some(false) => format!("{}├─ ", prefix),
    };

    let annotation = node.ty.map(|ty| match node.value {
        Some(value) => format!(": {} = {}", ty, value),
        None => format!(": {}", ty),
    });

    rows.push(TreeRow {
        guide,
        label: node.label.clone(),
        annotation,
        is_error: node.ty == Some(Type::Error),
    });

    let child_prefix = match is_last {
        None => prefix,
        Some(true) => format!("{}   ", prefix),
        Some(false) => format!("{}│  ", prefix),
    };

    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        push_rows(child, child_prefix.clone(), Some(i + 1 == count), rows);
    }
}

fn row_line(row: TreeRow) -> Line<'static> {
    let label_style = if row.is_error {
        Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    let mut spans = vec![
        Span::styled(row.guide, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(row.label, label_style),
    ];
    if let Some(annotation) = row.annotation {
        let color = if row.is_error {
            DEFAULT_THEME.error
        } else {
            DEFAULT_THEME.type_name
        };
        spans.push(Span::styled(annotation, Style::default().fg(color)));
    }
    Line::from(spans)
}

/// Render a tree, or `empty_message` when there is none
pub fn render_tree(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    tree: Option<&TreeNode>,
    empty_message: &str,
    scroll_offset: &mut usize,
) {
    let Some(tree) = tree else {
        let paragraph = Paragraph::new(empty_message.to_string())
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let rows = flatten(tree);
    let visible_height = inner_height(area);
    *scroll_offset = clamp_scroll(*scroll_offset, rows.len(), visible_height);

    let items: Vec<ListItem> = rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|row| ListItem::new(row_line(row)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
