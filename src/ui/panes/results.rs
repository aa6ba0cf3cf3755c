//! Results pane: one tab per artifact

use super::utils::pane_block;
use super::{render_symbols, render_tokens, render_tree};
use crate::pipeline::Compilation;
use crate::semantic::tree::TreeNode;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Artifact shown in the results pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView {
    Tokens,
    SyntaxTree,
    AnnotatedTree,
    Symbols,
}

impl ResultView {
    pub const ALL: [ResultView; 4] = [
        ResultView::Tokens,
        ResultView::SyntaxTree,
        ResultView::AnnotatedTree,
        ResultView::Symbols,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ResultView::Tokens => "Tokens",
            ResultView::SyntaxTree => "Syntax Tree",
            ResultView::AnnotatedTree => "Annotated Tree",
            ResultView::Symbols => "Symbols",
        }
    }

    fn index(self) -> usize {
        match self {
            ResultView::Tokens => 0,
            ResultView::SyntaxTree => 1,
            ResultView::AnnotatedTree => 2,
            ResultView::Symbols => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// View bound to a number key, `'1'` for the first tab
    pub fn from_key(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

fn tab_title(active: ResultView) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, view) in ResultView::ALL.into_iter().enumerate() {
        let style = if view == active {
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, view.title()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

pub fn render_results_pane(
    frame: &mut Frame,
    area: Rect,
    compilation: &Compilation,
    syntax_tree: Option<&TreeNode>,
    view: ResultView,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(tab_title(view), is_focused);
    let failed = compilation.syntax_error().is_some();

    match view {
        ResultView::Tokens => {
            render_tokens(frame, area, block, &compilation.tokens, scroll_offset)
        }
        ResultView::SyntaxTree => {
            let message = if failed {
                "(no tree: syntax error)"
            } else {
                "(not parsed)"
            };
            render_tree(frame, area, block, syntax_tree, message, scroll_offset)
        }
        ResultView::AnnotatedTree => {
            let message = if failed {
                "(no tree: syntax error)"
            } else {
                "(not checked)"
            };
            let tree = compilation.analysis.as_ref().map(|a| &a.tree);
            render_tree(frame, area, block, tree, message, scroll_offset)
        }
        ResultView::Symbols => {
            let symbols = compilation.analysis.as_ref().map(|a| &a.symbols);
            render_symbols(frame, area, block, symbols, scroll_offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle() {
        assert_eq!(ResultView::Symbols.next(), ResultView::Tokens);
        assert_eq!(ResultView::Tokens.prev(), ResultView::Symbols);
        assert_eq!(ResultView::from_key('3'), Some(ResultView::AnnotatedTree));
        assert_eq!(ResultView::from_key('0'), None);
        assert_eq!(ResultView::from_key('5'), None);
    }
}
