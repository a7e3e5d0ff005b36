use fleetgate_core::{Error, Error400};
use http::{header, StatusCode};
use serde::Serialize;
use serde_json::json;
use url::Url;

use crate::RelayedResponse;

const VEHICLE_BY_TOKEN_ID: &str = r#"query VehicleByTokenId($tokenId: Int!) {
  vehicle(tokenId: $tokenId) {
    id
    owner
    sacds(first: 20) { nodes { grantee permissions } }
    earnings { totalTokens }
    mintedAt
    syntheticDevice { connection { name address } }
    definition { id make model year }
  }
}"#;

const VEHICLES_BY_OWNER: &str = r#"query VehiclesByOwner($first: Int!, $after: String, $owner: Address!) {
  vehicles(first: $first, after: $after, filterBy: { owner: $owner }) {
    nodes {
      owner
      tokenId
      aftermarketDevice { serial owner }
      syntheticDevice { tokenId connection { name } }
      definition { make model year }
    }
    pageInfo { startCursor endCursor hasNextPage hasPreviousPage }
  }
}"#;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

/// GraphQL client for the identity API. Values travel as variables, never spliced into the query.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    api_url: Url,
}

impl IdentityClient {
    pub fn new(client: reqwest::Client, api_url: Url) -> Self {
        Self { client, api_url }
    }

    pub async fn vehicle_by_token_id(&self, token_id: &str) -> Result<RelayedResponse, Error> {
        let token_id: u64 = token_id
            .parse()
            .map_err(|_| Error400::InvalidTokenId(token_id.to_string()))?;
        self.query(VEHICLE_BY_TOKEN_ID, json!({ "tokenId": token_id }))
            .await
    }

    pub async fn vehicles_by_owner(
        &self,
        wallet: &str,
        first: Option<u32>,
        after: Option<&str>,
    ) -> Result<RelayedResponse, Error> {
        if !is_wallet_address(wallet) {
            return Err(Error400::InvalidWallet(wallet.to_string()).into());
        }
        let first = first.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let after = after.filter(|cursor| !cursor.is_empty());
        self.query(
            VEHICLES_BY_OWNER,
            json!({ "first": first, "after": after, "owner": wallet }),
        )
        .await
    }

    async fn query(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<RelayedResponse, Error> {
        let response = self
            .client
            .post(self.api_url.clone())
            .header(header::ACCEPT, "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|source| Error::UpstreamUnreachable {
                target: self.api_url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            tracing::warn!(target = %self.api_url, "identity api rejected query");
            return Err(Error400::UpstreamRejected.into());
        }
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| Error::ResponseRead {
                target: self.api_url.clone(),
                source,
            })?;
        Ok(RelayedResponse {
            status,
            headers,
            body,
        })
    }
}

/// `0x` followed by 40 hex digits.
pub fn is_wallet_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;

    use super::*;

    const WALLET: &str = "0x1aB2c3D4e5F60718293a4b5c6d7e8f9012345678";

    fn client(server: &MockServer) -> IdentityClient {
        IdentityClient::new(
            reqwest::Client::new(),
            Url::parse(&server.url("/query")).unwrap(),
        )
    }

    #[test]
    fn wallet_validation() {
        assert!(is_wallet_address(WALLET));
        assert!(!is_wallet_address("1aB2c3D4e5F60718293a4b5c6d7e8f9012345678"));
        assert!(!is_wallet_address("0x1aB2"));
        assert!(!is_wallet_address("0xZZB2c3D4e5F60718293a4b5c6d7e8f9012345678"));
    }

    #[tokio::test]
    async fn vehicle_query_sends_token_id_as_variable() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/query")
                    .json_body_partial(r#"{"variables": {"tokenId": 42}}"#);
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"data":{"vehicle":{"id":"42"}}}"#);
            })
            .await;

        let relayed = client(&server).vehicle_by_token_id("42").await.unwrap();
        assert_eq!(relayed.status, StatusCode::OK);
        assert_eq!(&relayed.body[..], br#"{"data":{"vehicle":{"id":"42"}}}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_numeric_token_id_never_reaches_upstream() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let err = client(&server)
            .vehicle_by_token_id("1) { owner } #")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::BadRequest(Error400::InvalidTokenId(_))
        ));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn owner_query_pages_with_defaults() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST).json_body_partial(format!(
                    r#"{{"variables": {{"first": 20, "after": null, "owner": "{WALLET}"}}}}"#
                ));
                then.status(200).body(r#"{"data":{"vehicles":{"nodes":[]}}}"#);
            })
            .await;

        client(&server)
            .vehicles_by_owner(WALLET, None, Some(""))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_bad_request_is_a_client_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.any_request();
                then.status(400).body("bad query");
            })
            .await;

        let err = client(&server)
            .vehicles_by_owner(WALLET, Some(500), Some("cursor"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(Error400::UpstreamRejected)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
