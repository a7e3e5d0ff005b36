use fleetgate_core::MintError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use p256::{elliptic_curve::sec1::ToEncodedPoint, pkcs8::EncodePrivateKey, SecretKey};
use serde::Serialize;

/// Claims of a developer token. `iss` and `sub` are both the client id.
#[derive(Debug, Clone, Serialize)]
pub struct DeveloperClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// P-256 key pair that lives for exactly one mint.
pub struct EphemeralKey {
    encoding: EncodingKey,
    kid: String,
}

impl EphemeralKey {
    pub fn generate() -> Result<Self, MintError> {
        let secret = SecretKey::from_slice(&rand::random::<[u8; 32]>())
            .map_err(|_| MintError::KeyGeneration)?;
        let kid = hex::encode(secret.public_key().to_encoded_point(true).as_bytes());
        let der = secret
            .to_pkcs8_der()
            .map_err(|_| MintError::KeyGeneration)?;
        Ok(Self {
            encoding: EncodingKey::from_ec_der(der.as_bytes()),
            kid,
        })
    }

    /// Hex of the SEC1 compressed public key. Used as `kid` and registered upstream.
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Compact ES256 JWS with header `{alg, typ, kid}`.
    pub fn sign(&self, claims: &DeveloperClaims) -> Result<String, MintError> {
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.kid.clone());
        Ok(jsonwebtoken::encode(&header, claims, &self.encoding)?)
    }
}

pub fn generate_jti() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}
