mod boardgame;

pub use boardgame::{GameDetail, GameSummary};
