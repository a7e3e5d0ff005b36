pub mod proto;
mod session;
mod transport;

pub use session::*;
pub use transport::*;
