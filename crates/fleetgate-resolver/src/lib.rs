mod registry;
mod rewrite;

pub use registry::*;
pub use rewrite::*;
