pub mod board;
pub mod difficulty;
pub mod driver;
pub mod error;
pub mod events;
pub mod records;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod timer;
