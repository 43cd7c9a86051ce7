pub mod ranking;

pub use ranking::{RankingKind, RankingSource};
