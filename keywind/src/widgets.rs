//! Pure render components: data in, styled lines out.

pub mod graph;
pub mod heatmap;
pub mod progress;

pub use graph::wpm_graph;
pub use heatmap::{counts_from_keystrokes, keyboard_heatmap};
pub use progress::{progress_spans, stats_bar};
