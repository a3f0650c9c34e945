mod match_v5;
mod player;

pub use match_v5::MatchIdQuery;
