pub mod cli;
pub mod io;
pub mod verify;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
