//! Reusable widget components.

pub mod status;
pub mod syntax;
pub mod tree;

pub use status::StatusIndicator;
pub use syntax::{colorize, colorize_line, CodeLine, Segment, SyntaxHighlighter, TokenKind};
pub use tree::{flatten, FileTreeState, TreeItem, TreeSignal, TreeStyle, TreeWidget};
