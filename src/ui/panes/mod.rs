//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: source text highlighted from the token stream, with diagnostic markers
//! - [`diagnostics`]: lexical, syntax and semantic problems in report order
//! - [`results`]: tabbed view over the artifacts ([`tokens`], [`tree`], [`symbols`])
//! - [`status`]: status bar with keybindings and run summary
//! - `utils`: shared block, scrolling and token colour helpers
//!
//! Each pane exports a primary `render_*` function; scroll offsets are owned
//! by the [`App`](crate::ui::App) and clamped here on every frame.

mod utils;

pub mod diagnostics;
pub mod results;
pub mod source;
pub mod status;
pub mod symbols;
pub mod tokens;
pub mod tree;

pub use diagnostics::render_diagnostics_pane;
pub use results::{render_results_pane, ResultView};
pub use source::render_source_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use symbols::render_symbols;
pub use tokens::render_tokens;
pub use tree::render_tree;
