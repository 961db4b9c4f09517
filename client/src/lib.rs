pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod net;
pub mod run;
pub mod session;
