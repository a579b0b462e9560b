pub mod document;
pub mod player;
pub mod team;
pub mod tournament;
