//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! A read-only browser over one compilation run:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, diagnostic selection
//! - **[`panes`]**: render functions for each visible pane (source, diagnostics,
//!   results tabs, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Construct an [`App`] from a [`Compilation`] and call [`App::run`] to start
//! the event loop.
//!
//! [`Compilation`]: crate::pipeline::Compilation
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
