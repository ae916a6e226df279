// src/structure/mod.rs

// Declare submodules
pub mod channel;
pub mod classifier;
pub mod context;
pub mod swings;
pub mod trendlines;

// Export the pipeline stages
pub use channel::channel_context;
pub use classifier::classify;
pub use context::overall_bias;
pub use swings::{find_swings, SwingDetector};
pub use trendlines::{project_lines, slope_between};
