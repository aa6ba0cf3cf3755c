//! Main TUI application state and logic

use crate::pipeline::Compilation;
use crate::semantic::tree::TreeNode;
use crate::ui::panes::{self, ResultView, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Diagnostics,
    Results,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> diagnostics -> results)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Results,
            FocusedPane::Results => FocusedPane::Source,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Results,
            FocusedPane::Diagnostics => FocusedPane::Source,
            FocusedPane::Results => FocusedPane::Diagnostics,
        }
    }
}

/// The main application state
pub struct App {
    pub compilation: Compilation,
    pub source_code: String,
    pub file_name: String,

    /// Syntax tree document, built once
    syntax_tree: Option<TreeNode>,
    /// Lines carrying at least one diagnostic
    error_lines: BTreeSet<usize>,

    pub focused_pane: FocusedPane,
    pub result_view: ResultView,

    /// Index into the diagnostics list
    pub selected_diagnostic: Option<usize>,
    /// Scroll the source pane to the selected line on the next frame
    follow_selection: bool,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub diagnostics_scroll: usize,
    pub results_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    pub fn new(compilation: Compilation, source_code: String, file_name: String) -> Self {
        let syntax_tree = compilation.syntax_tree();
        let error_lines = compilation.diagnostics.iter().map(|d| d.line()).collect();
        let selected_diagnostic = (!compilation.diagnostics.is_empty()).then_some(0);
        let status_message = match compilation.diagnostics.len() {
            0 => "Ready!".to_string(),
            n => format!("{} diagnostic(s)", n),
        };

        App {
            compilation,
            source_code,
            file_name,
            syntax_tree,
            error_lines,
            focused_pane: FocusedPane::Source,
            result_view: ResultView::Tokens,
            selected_diagnostic,
            follow_selection: selected_diagnostic.is_some(),
            source_scroll: 0,
            diagnostics_scroll: 0,
            results_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn selected_line(&self) -> Option<usize> {
        self.selected_diagnostic
            .and_then(|i| self.compilation.diagnostics.get(i))
            .map(|d| d.line())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let selected_line = self.selected_line();
        let follow = std::mem::take(&mut self.follow_selection);

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            &self.compilation.tokens,
            &self.error_lines,
            selected_line,
            follow,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.compilation.diagnostics,
            self.selected_diagnostic,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        panes::render_results_pane(
            frame,
            columns[1],
            &self.compilation,
            self.syntax_tree.as_ref(),
            self.result_view,
            self.focused_pane == FocusedPane::Results,
            &mut self.results_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                file_name: &self.file_name,
                message: &self.status_message,
                error_count: self.compilation.diagnostics.len(),
                syntax_failed: self.compilation.syntax_error().is_some(),
            },
        );
    }

    fn set_view(&mut self, view: ResultView) {
        if view != self.result_view {
            self.result_view = view;
            self.results_scroll = 0;
        }
        self.status_message = format!("Showing {}", view.title());
    }

    /// Select the next or previous diagnostic, wrapping around
    fn step_diagnostic(&mut self, forward: bool) {
        let count = self.compilation.diagnostics.len();
        if count == 0 {
            self.status_message = "No diagnostics".to_string();
            return;
        }

        let next = match self.selected_diagnostic {
            None => 0,
            Some(i) if forward => (i + 1) % count,
            Some(i) => (i + count - 1) % count,
        };
        self.selected_diagnostic = Some(next);
        self.follow_selection = true;
        self.status_message = format!("Diagnostic {}/{}", next + 1, count);
    }

    fn scroll(&mut self, up: bool, amount: usize) {
        if self.focused_pane == FocusedPane::Diagnostics {
            // the list scrolls by moving the selection
            for _ in 0..amount.min(self.compilation.diagnostics.len()) {
                self.step_diagnostic(!up);
            }
            return;
        }

        let offset = if self.focused_pane == FocusedPane::Source {
            &mut self.source_scroll
        } else {
            &mut self.results_scroll
        };

        *offset = if up {
            offset.saturating_sub(amount)
        } else {
            offset.saturating_add(amount)
        };
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(view) = ResultView::from_key(c) {
                    self.set_view(view);
                }
            }
            KeyCode::Left => self.set_view(self.result_view.prev()),
            KeyCode::Right => self.set_view(self.result_view.next()),
            KeyCode::Char('n') => self.step_diagnostic(true),
            KeyCode::Char('p') => self.step_diagnostic(false),
            KeyCode::Up => self.scroll(true, 1),
            KeyCode::Down => self.scroll(false, 1),
            KeyCode::PageUp => self.scroll(true, 10),
            KeyCode::PageDown => self.scroll(false, 10),
            KeyCode::Home => match self.focused_pane {
                FocusedPane::Source => self.source_scroll = 0,
                FocusedPane::Results => self.results_scroll = 0,
                FocusedPane::Diagnostics => {
                    if !self.compilation.diagnostics.is_empty() {
                        self.selected_diagnostic = Some(0);
                        self.follow_selection = true;
                    }
                }
            },
            KeyCode::End => match self.focused_pane {
                // offsets are clamped on the next render
                FocusedPane::Source => self.source_scroll = usize::MAX,
                FocusedPane::Results => self.results_scroll = usize::MAX,
                FocusedPane::Diagnostics => {
                    let count = self.compilation.diagnostics.len();
                    self.selected_diagnostic = count.checked_sub(1);
                    self.follow_selection = true;
                }
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compile;
    use crossterm::event::KeyModifiers;

    fn app(source: &str) -> App {
        App::new(compile(source), source.to_string(), "test.mc".to_string())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycle() {
        let mut app = app("main { }");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Diagnostics);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Results);
    }

    #[test]
    fn test_diagnostic_selection_wraps() {
        let mut app = app("main {\n x = 1;\n y = 2;\n}");
        assert_eq!(app.selected_line(), Some(2));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_line(), Some(3));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_line(), Some(2));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.selected_diagnostic, Some(1));
    }

    #[test]
    fn test_view_switching_resets_scroll() {
        let mut app = app("main { int a; }");
        app.results_scroll = 7;
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.result_view, ResultView::Symbols);
        assert_eq!(app.results_scroll, 0);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.result_view, ResultView::Tokens);
    }

    #[test]
    fn test_quit() {
        let mut app = app("main { }");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
