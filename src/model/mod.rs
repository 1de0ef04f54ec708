pub mod board;
pub mod card;
pub mod config;

pub use board::*;
pub use card::*;
pub use config::*;
