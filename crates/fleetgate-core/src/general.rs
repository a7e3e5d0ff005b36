use std::future::Future;

use crate::{Error, Oracle};

pub trait GeneralResolver {
    /// Exact, case sensitive lookup. Never touches the network.
    fn resolve(&self, oracle_id: &str) -> Result<&Oracle, Error>;

    fn oracles(&self) -> &[Oracle];
}

pub trait GeneralTokenSource {
    /// Returns a credential that stays valid for at least the cache safety margin.
    fn token(&self) -> impl Future<Output = Result<String, Error>> + Send;

    /// Mints a new credential regardless of the cached one.
    fn refresh(&self) -> impl Future<Output = Result<String, Error>> + Send;
}
