use std::{collections::HashSet, sync::Arc};

use fleetgate_core::{Config, Error, GeneralResolver, Oracle, RegistryError};

/// Oracles loaded at startup. Read only for the life of the process.
#[derive(Debug, Clone)]
pub struct OracleRegistry(Arc<Vec<Oracle>>);

impl OracleRegistry {
    pub fn new(oracles: Vec<Oracle>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for oracle in &oracles {
            if !is_url_safe(&oracle.id) {
                return Err(RegistryError::InvalidOracleId(oracle.id.clone()));
            }
            if !seen.insert(oracle.id.as_str()) {
                return Err(RegistryError::DuplicateOracle(oracle.id.clone()));
            }
        }
        tracing::info!(
            oracles = ?oracles.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(),
            "oracle registry loaded"
        );
        Ok(Self(Arc::new(oracles)))
    }

    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        Self::new(config.oracles.iter().map(Oracle::from).collect())
    }
}

impl GeneralResolver for OracleRegistry {
    fn resolve(&self, oracle_id: &str) -> Result<&Oracle, Error> {
        self.0
            .iter()
            .find(|oracle| oracle.id == oracle_id)
            .ok_or_else(|| Error::UnknownOracle(oracle_id.to_string()))
    }

    fn oracles(&self) -> &[Oracle] {
        &self.0
    }
}

// unreserved characters of RFC 3986
fn is_url_safe(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'))
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn oracle(id: &str) -> Oracle {
        Oracle {
            id: id.to_string(),
            name: format!("{id} oracle"),
            base_url: Url::parse(&format!("https://{id}-upstream")).unwrap(),
            use_pending_mode: false,
        }
    }

    #[test]
    fn resolves_exact_id() {
        let registry = OracleRegistry::new(vec![oracle("motorq"), oracle("smartcar")]).unwrap();
        let found = registry.resolve("smartcar").unwrap();
        assert_eq!(found.base_url.as_str(), "https://smartcar-upstream/");
        assert_eq!(registry.oracles().len(), 2);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = OracleRegistry::new(vec![oracle("motorq")]).unwrap();
        let err = registry.resolve("MotorQ").unwrap_err();
        assert!(matches!(err, Error::UnknownOracle(id) if id == "MotorQ"));
    }

    #[test]
    fn unknown_and_empty_ids_are_rejected() {
        let registry = OracleRegistry::new(vec![oracle("motorq")]).unwrap();
        assert!(matches!(
            registry.resolve("unknown"),
            Err(Error::UnknownOracle(_))
        ));
        assert!(matches!(registry.resolve(""), Err(Error::UnknownOracle(_))));
    }

    #[test]
    fn duplicate_ids_fail_startup() {
        let err = OracleRegistry::new(vec![oracle("motorq"), oracle("motorq")]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateOracle(id) if id == "motorq"));
    }

    #[test]
    fn ids_must_be_url_safe() {
        for id in ["", "a/b", "a b", "a?b", "caf\u{e9}"] {
            let mut bad = oracle("x");
            bad.id = id.to_string();
            assert!(matches!(
                OracleRegistry::new(vec![bad]),
                Err(RegistryError::InvalidOracleId(_))
            ));
        }
    }

    #[test]
    fn empty_registry_is_allowed() {
        let registry = OracleRegistry::new(Vec::new()).unwrap();
        assert!(registry.oracles().is_empty());
    }
}
