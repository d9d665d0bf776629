//! Quote providers and persisted dashboard state.

mod finnhub;
mod scripted;
mod search;
mod store;

pub use finnhub::{FinnhubConfig, FinnhubProvider};
pub use scripted::{ScriptedProvider, ScriptedResponse};
pub use search::search_symbols;
pub use store::{SymbolStore, TICKER_KEY};
