mod developer_jwt;
mod signer;

pub use developer_jwt::*;
pub use signer::*;
