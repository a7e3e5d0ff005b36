mod oracle;
mod services;
mod trace;

pub use oracle::*;
pub use services::*;
pub use trace::*;
