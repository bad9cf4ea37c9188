pub mod config;
pub mod controller;
pub mod locate;

pub use config::*;
pub use controller::*;
pub use locate::*;
