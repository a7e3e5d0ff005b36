mod forwarder;
mod identity;
mod response;

pub use forwarder::*;
pub use identity::*;
pub use response::*;
