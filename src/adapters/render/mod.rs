//! Rendering adapters for the dashboard refresh loop.
//!
//! - `TerminalRenderer` - Plain-text report on stdout
//! - `SnapshotRenderer` - Latest state, served by the operator API
//! - `FanoutRenderer` - Sends each cycle to several renderers

mod fanout;
mod format;
mod snapshot;
mod terminal;

pub use fanout::FanoutRenderer;
pub use format::{money, percent};
pub use snapshot::SnapshotRenderer;
pub use terminal::{render_text, TerminalRenderer};
