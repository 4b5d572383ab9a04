mod command;
mod day;
mod id;

pub use command::*;
pub use day::*;
pub use id::*;
