//! Logging setup and terminal rendering.

mod logging;
pub mod report;

pub use logging::setup_logging;
pub use report::{
    render_banner, render_candles, render_indices, render_prediction, render_quote_board,
    write_candles_csv, write_indices_csv, write_prediction_csv,
};
