mod request;
mod target;

pub use request::*;
pub use target::*;
