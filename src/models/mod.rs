pub mod debt;
pub mod jornada;
pub mod leaderboard;
pub mod score;
pub mod translation;
pub mod update;
