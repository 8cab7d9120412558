//! Simulations API client
//!
//! Every operation performs exactly one HTTP round trip. The `*_and_expect_*`
//! variants issue the same request as their plain counterpart but hand back
//! the decoded error body as a value, so a test can assert on it directly.
//!
//! # Error Handling
//!
//! Plain operations map error responses as follows:
//! - 404 -> `ApiError::NotFound`
//! - 409 -> `ApiError::Conflict`
//! - 422 -> `ApiError::UnprocessableEntity`
//! - Other -> `ClientError::UnexpectedStatus`, or `ClientError::UnsuccessfulStatus`
//!   for calls that accept any 2xx
//!
//! Expect variants return `ClientError::UnexpectedStatus` whenever the status
//! differs from the one they expect.

use domain_simulation::{
    ApiError, ConflictError, NotFoundError, Simulation, UnprocessableEntityError,
};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Client for the `simulations` resource
#[derive(Debug, Clone)]
pub struct SimulationsClient {
    http: Client,
    simulations_url: Url,
}

impl SimulationsClient {
    /// Creates a client for the API described by `config`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if the configured URL cannot
    /// carry a path, or a transport error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let raw = config.simulations_url();
        let simulations_url = Url::parse(&raw)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        if simulations_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(raw));
        }

        let http = Client::builder().build()?;

        Ok(Self {
            http,
            simulations_url,
        })
    }

    /// Creates a client from `SIMULATIONS_API_*` environment variables
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// URL of the simulations collection
    pub fn simulations_url(&self) -> &Url {
        &self.simulations_url
    }

    /// Fetches the simulation stored under `cpf`
    pub async fn get_simulation_by_social_security_number(
        &self,
        cpf: &str,
    ) -> Result<Simulation, ClientError> {
        self.execute(self.http.get(self.resource_url(cpf)))
            .await?
            .expect_status(StatusCode::OK)?
            .decode()
    }

    /// Fetches a CPF that is expected not to exist and returns the 404 body
    pub async fn get_simulation_by_social_security_number_and_expect_not_found(
        &self,
        cpf: &str,
    ) -> Result<NotFoundError, ClientError> {
        self.execute(self.http.get(self.resource_url(cpf)))
            .await?
            .expect_error(StatusCode::NOT_FOUND)
    }

    /// Lists the simulations whose name matches `name`
    pub async fn get_simulation_by_name(&self, name: &str) -> Result<Vec<Simulation>, ClientError> {
        self.execute(self.name_query(name))
            .await?
            .expect_status(StatusCode::OK)?
            .decode()
    }

    /// Filters by a name that is expected to match nothing and returns the 404 body
    pub async fn get_simulation_by_name_and_expect_not_found(
        &self,
        name: &str,
    ) -> Result<NotFoundError, ClientError> {
        self.execute(self.name_query(name))
            .await?
            .expect_error(StatusCode::NOT_FOUND)
    }

    /// Lists every simulation known to the API
    pub async fn get_all_simulations(&self) -> Result<Vec<Simulation>, ClientError> {
        self.execute(self.http.get(self.simulations_url.clone()))
            .await?
            .expect_status(StatusCode::OK)?
            .decode()
    }

    /// Creates a simulation and returns the response headers
    ///
    /// The `Location` header points at the new resource.
    pub async fn create_new_simulation(
        &self,
        simulation: &Simulation,
    ) -> Result<HeaderMap, ClientError> {
        let response = self
            .execute(self.http.post(self.simulations_url.clone()).json(simulation))
            .await?
            .expect_status(StatusCode::CREATED)?;

        Ok(response.headers)
    }

    /// Replaces the simulation stored under `cpf` and returns the stored result
    pub async fn update_simulation(
        &self,
        cpf: &str,
        simulation: &Simulation,
    ) -> Result<Simulation, ClientError> {
        self.execute(self.update_request(cpf, simulation))
            .await?
            .expect_status(StatusCode::OK)?
            .decode()
    }

    /// Updates `cpf` with a payload whose CPF belongs to another record and
    /// returns the 409 body
    ///
    /// Takes the target CPF like `update_simulation`, so the request is the
    /// same one the plain call would send. Passing one existing record's CPF
    /// with another existing record as the payload reproduces the conflict.
    pub async fn update_simulation_and_expect_conflict(
        &self,
        cpf: &str,
        simulation: &Simulation,
    ) -> Result<ConflictError, ClientError> {
        self.execute(self.update_request(cpf, simulation))
            .await?
            .expect_error(StatusCode::CONFLICT)
    }

    /// Updates a CPF that is expected not to exist and returns the 404 body
    pub async fn update_simulation_and_expect_not_found(
        &self,
        cpf: &str,
        simulation: &Simulation,
    ) -> Result<NotFoundError, ClientError> {
        self.execute(self.update_request(cpf, simulation))
            .await?
            .expect_error(StatusCode::NOT_FOUND)
    }

    /// Sends an invalid payload to its own CPF and returns the 422 body
    pub async fn update_simulation_and_expect_unprocessable_entity(
        &self,
        simulation: &Simulation,
    ) -> Result<UnprocessableEntityError, ClientError> {
        self.execute(self.update_request(&simulation.cpf, simulation))
            .await?
            .expect_error(StatusCode::UNPROCESSABLE_ENTITY)
    }

    /// Deletes the simulation stored under `cpf`
    pub async fn delete_simulation(&self, cpf: &str) -> Result<(), ClientError> {
        self.execute(self.http.delete(self.resource_url(cpf)))
            .await?
            .expect_success()?;
        Ok(())
    }

    /// Deletes a CPF that is expected not to exist and returns the 404 body
    pub async fn delete_simulation_and_expect_not_found(
        &self,
        cpf: &str,
    ) -> Result<NotFoundError, ClientError> {
        self.execute(self.http.delete(self.resource_url(cpf)))
            .await?
            .expect_error(StatusCode::NOT_FOUND)
    }

    fn resource_url(&self, cpf: &str) -> Url {
        let mut url = self.simulations_url.clone();
        // `new` rejects URLs that cannot be a base, so this always succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(cpf);
        }
        url
    }

    fn name_query(&self, name: &str) -> RequestBuilder {
        self.http
            .get(self.simulations_url.clone())
            .query(&[("name", name)])
    }

    fn update_request(&self, cpf: &str, simulation: &Simulation) -> RequestBuilder {
        self.http.put(self.resource_url(cpf)).json(simulation)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<RawResponse, ClientError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().to_string();

        tracing::debug!(%method, %url, "Sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        tracing::debug!(%method, %url, status = status.as_u16(), "Received response");
        tracing::trace!(%body, "Response body");

        Ok(RawResponse {
            method,
            url,
            status,
            headers,
            body,
        })
    }
}

/// A fully read response
struct RawResponse {
    method: Method,
    url: String,
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl RawResponse {
    fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|source| ClientError::Decode {
            url: self.url.clone(),
            source,
        })
    }

    /// Passes the response through when it carries `expected`
    fn expect_status(self, expected: StatusCode) -> Result<Self, ClientError> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(self.into_failure(Some(expected)))
        }
    }

    /// Passes any 2xx response through
    fn expect_success(self) -> Result<Self, ClientError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(self.into_failure(None))
        }
    }

    /// Decodes the body as the error class `expected` stands for
    fn expect_error<E: DeserializeOwned>(self, expected: StatusCode) -> Result<E, ClientError> {
        if self.status != expected {
            return Err(self.into_unexpected(Some(expected)));
        }
        self.decode()
    }

    /// `expected` is `None` when any 2xx would have been accepted
    fn into_failure(self, expected: Option<StatusCode>) -> ClientError {
        let api_error = match self.status {
            StatusCode::NOT_FOUND => self.decode::<NotFoundError>().map(ApiError::from),
            StatusCode::CONFLICT => self.decode::<ConflictError>().map(ApiError::from),
            StatusCode::UNPROCESSABLE_ENTITY => {
                self.decode::<UnprocessableEntityError>().map(ApiError::from)
            }
            _ => return self.into_unexpected(expected),
        };

        match api_error {
            Ok(error) => ClientError::Api(error),
            Err(_) => self.into_unexpected(expected),
        }
    }

    fn into_unexpected(self, expected: Option<StatusCode>) -> ClientError {
        tracing::warn!(
            method = %self.method,
            url = %self.url,
            expected = ?expected.map(|status| status.as_u16()),
            actual = self.status.as_u16(),
            "Unexpected response status"
        );

        match expected {
            Some(expected) => ClientError::UnexpectedStatus {
                method: self.method,
                url: self.url,
                expected,
                actual: self.status,
                body: self.body,
            },
            None => ClientError::UnsuccessfulStatus {
                method: self.method,
                url: self.url,
                actual: self.status,
                body: self.body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> SimulationsClient {
        SimulationsClient::new(ClientConfig::with_base_url(base_url)).unwrap()
    }

    fn raw(status: StatusCode, body: &str) -> RawResponse {
        RawResponse {
            method: Method::GET,
            url: "http://localhost:8088/api/v1/simulations".to_string(),
            status,
            headers: HeaderMap::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_resource_url_encodes_cpf_segment() {
        let client = client("http://localhost:8088");
        assert_eq!(
            client.resource_url("66414919004").as_str(),
            "http://localhost:8088/api/v1/simulations/66414919004"
        );
        assert_eq!(
            client.resource_url("a b/c").as_str(),
            "http://localhost:8088/api/v1/simulations/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = SimulationsClient::new(ClientConfig::with_base_url("not a url"));
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_failure_maps_known_error_classes() {
        let error = raw(StatusCode::CONFLICT, r#"{"message": "CPF already exists"}"#)
            .expect_status(StatusCode::OK)
            .err()
            .unwrap();

        match error {
            ClientError::Api(ApiError::Conflict(conflict)) => {
                assert_eq!(conflict.message(), "CPF already exists");
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_with_undecodable_body_is_unexpected_status() {
        let error = raw(StatusCode::NOT_FOUND, "<html>not here</html>")
            .expect_status(StatusCode::OK)
            .err()
            .unwrap();

        assert!(matches!(
            error,
            ClientError::UnexpectedStatus { actual: StatusCode::NOT_FOUND, .. }
        ));
    }

    #[test]
    fn test_expect_error_rejects_other_status() {
        let result = raw(StatusCode::OK, "[]").expect_error::<NotFoundError>(StatusCode::NOT_FOUND);

        assert!(matches!(
            result,
            Err(ClientError::UnexpectedStatus {
                expected: StatusCode::NOT_FOUND,
                actual: StatusCode::OK,
                ..
            })
        ));
    }

    #[test]
    fn test_expect_success_accepts_any_2xx() {
        assert!(raw(StatusCode::NO_CONTENT, "").expect_success().is_ok());
        assert!(raw(StatusCode::OK, "").expect_success().is_ok());
    }

    #[test]
    fn test_expect_success_reports_unsuccessful_status() {
        let error = raw(StatusCode::INTERNAL_SERVER_ERROR, "boom")
            .expect_success()
            .err()
            .unwrap();

        assert!(matches!(
            error,
            ClientError::UnsuccessfulStatus { actual: StatusCode::INTERNAL_SERVER_ERROR, .. }
        ));
    }

    #[test]
    fn test_expect_success_still_maps_known_error_classes() {
        let error = raw(StatusCode::NOT_FOUND, r#"{"message": "CPF 1 not found"}"#)
            .expect_success()
            .err()
            .unwrap();

        assert!(matches!(error, ClientError::Api(ApiError::NotFound(_))));
    }

    #[test]
    fn test_decodes_empty_list() {
        let simulations = raw(StatusCode::OK, "[]").decode::<Vec<Simulation>>().unwrap();
        assert!(simulations.is_empty());
    }

    #[test]
    fn test_decode_error_names_url() {
        let error = raw(StatusCode::OK, "{").decode::<Vec<Simulation>>().unwrap_err();
        assert!(error
            .to_string()
            .starts_with("Failed to decode response from http://localhost:8088/api/v1/simulations"));
    }
}
