pub mod config;
pub mod logging;

pub mod duration;
pub mod error;
pub mod hosts;
pub mod privilege;
pub mod scheduler;
pub mod validate;
