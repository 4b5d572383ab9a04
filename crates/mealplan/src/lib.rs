mod plan;
mod slot;
mod template;
mod types;
mod week;

pub use plan::*;
pub use slot::*;
pub use template::*;
pub use types::*;
pub use week::*;
