//! pop-client - Viewer library for popchart
//!
//! Fetches the allowlisted dataset once, drives the year selection and
//! playback state machine, and turns the selected year into a bar chart
//! specification that can be drawn in a terminal or handed to Chart.js.

pub mod chart;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod playback;
pub mod render;
pub mod state;

pub use chart::{build_chart, BarDataset, ChartData, ChartSpec, PALETTE};
pub use dataset::Dataset;
pub use error::{ClientError, ClientResult};
pub use fetch::Fetcher;
pub use playback::{PlaybackController, Tick, TickReceiver};
pub use render::{render_state, RenderOptions};
pub use state::{ReadyState, ViewState};
