pub mod board;
pub mod config;
pub mod constants;
pub mod maze;
pub mod movement;
pub mod net;
pub mod player;
pub mod protocol;
pub mod render;
pub mod seed;
pub mod sync;
