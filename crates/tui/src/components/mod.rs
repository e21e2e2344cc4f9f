//! UI building blocks shared across rendering and state modules.

/// Query line with the clear affordance and loader.
pub mod prompt;
/// Row layout and line construction for the results panel.
pub mod results;
/// Scrollbar for the results viewport.
pub mod scrollbar;

pub use prompt::{PromptContext, render_prompt};
pub use results::{ResultsContext, render_results};
pub use scrollbar::{ScrollMetrics, point_in_rect, render_scrollbar};
