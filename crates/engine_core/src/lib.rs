pub mod adapter;
pub mod error;
pub mod notation;
pub mod relay;
pub mod time_budget;

pub use adapter::*;
pub use error::EngineError;
pub use notation::*;
pub use relay::*;
pub use time_budget::*;

// The board/move model is shakmaty's; adapters only need these names.
pub use shakmaty::{Chess, Color, Move, Position};
