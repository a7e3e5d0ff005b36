pub mod middlewares;
pub mod router;
mod utils;

pub use router::router;
