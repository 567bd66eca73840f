use crate::config::ScreeningConfig;
use crate::errors::ScreeningError;
use crate::models::{ScreeningRequest, ScreeningResult};
use crate::services::ServiceType;
use crate::validation::{remote_failure, require_non_empty};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use std::fmt;
use url::Url;

/// Client for the identity screening API.
///
/// Holds the bearer token for its whole lifetime, as a header value marked
/// sensitive. Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct ScreeningClient {
    client: reqwest::Client,
    endpoint: Url,
    authorization: HeaderValue,
    strict_parsing: bool,
}

impl ScreeningClient {
    /// Creates a client for the production endpoint.
    ///
    /// # Arguments
    ///
    /// * `token` - The API token for authentication. Must not be empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ScreeningError> {
        Self::from_config(ScreeningConfig::new(token))
    }

    /// Creates a client from a full configuration.
    pub fn from_config(config: ScreeningConfig) -> Result<Self, ScreeningError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ScreeningError::Config(format!("Failed to create screening client: {}", e))
        })?;

        Self::with_http_client(config, client)
    }

    /// Creates a client that sends requests through the given `reqwest::Client`.
    ///
    /// The configured timeout is ignored; the supplied client's own settings apply.
    pub fn with_http_client(
        config: ScreeningConfig,
        client: reqwest::Client,
    ) -> Result<Self, ScreeningError> {
        if config.token.trim().is_empty() {
            return Err(ScreeningError::Config("token can't be empty".to_string()));
        }
        let endpoint = config.endpoint_url().map_err(ScreeningError::Config)?;
        let authorization = bearer_header(&config.token)?;

        Ok(Self {
            client,
            endpoint,
            authorization,
            strict_parsing: config.strict_parsing,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Sends a screening request and returns one result per requested service.
    ///
    /// The HTTP status is not inspected: the body is decoded the same way
    /// for every status. Mistyped fields decode to their defaults without
    /// discarding the result they belong to. A body that is not a JSON array
    /// yields an empty list, and an element that is not an object yields a
    /// default result; with strict parsing both return `ScreeningError::Parse`.
    pub async fn screen(
        &self,
        request: &ScreeningRequest,
    ) -> Result<Vec<ScreeningResult>, ScreeningError> {
        let services: Vec<&str> = request.services.iter().map(|s| s.name()).collect();
        tracing::info!(services = ?services, "Sending screening request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(status = %status, bytes = body.len(), "Screening response received");

        let elements = match serde_json::from_slice::<Vec<serde_json::Value>>(&body) {
            Ok(elements) => elements,
            Err(e) if self.strict_parsing => {
                return Err(ScreeningError::Parse {
                    status: status.as_u16(),
                    source: e,
                })
            }
            Err(e) => {
                tracing::warn!(status = %status, "Discarding undecodable screening response: {}", e);
                return Ok(Vec::new());
            }
        };

        let mut results = Vec::with_capacity(elements.len());
        for element in elements {
            match serde_json::from_value::<ScreeningResult>(element) {
                Ok(result) => results.push(result),
                Err(e) if self.strict_parsing => {
                    return Err(ScreeningError::Parse {
                        status: status.as_u16(),
                        source: e,
                    })
                }
                Err(e) => {
                    tracing::warn!(
                        status = %status,
                        "Undecodable screening result replaced by default: {}",
                        e
                    );
                    results.push(ScreeningResult::default());
                }
            }
        }

        tracing::debug!(count = results.len(), "Screening results decoded");
        Ok(results)
    }

    /// Verifies a driver's license against the issuing state's records.
    ///
    /// A failure whose message says the state is not yet supported is
    /// returned as a result, not an error; check
    /// [`ScreeningResult::is_unsupported_state`] to detect it.
    pub async fn screen_dl(
        &self,
        state: &str,
        license_number: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<ScreeningResult, ScreeningError> {
        require_non_empty(&[state, license_number, first_name, last_name])?;

        let request = ScreeningRequest {
            state: Some(state.to_string()),
            driver_license_number: Some(license_number.to_string()),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            ..ScreeningRequest::new([ServiceType::DriversLicense])
        };

        let result = self.first_result(&request).await?;
        if result.is_unsupported_state() {
            tracing::warn!(state = state, "Driver's license verification not available for state");
            return Ok(result);
        }
        match remote_failure(&result) {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }

    /// Runs an identity fraud check on a name and postal address.
    pub async fn screen_identi_fraud(
        &self,
        first_name: &str,
        last_name: &str,
        address: &str,
        city: &str,
        state: &str,
        zip: &str,
    ) -> Result<ScreeningResult, ScreeningError> {
        require_non_empty(&[first_name, last_name, address, city, state, zip])?;

        let request = ScreeningRequest {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            address: Some(address.to_string()),
            city: Some(city.to_string()),
            state: Some(state.to_string()),
            zip: Some(zip.to_string()),
            ..ScreeningRequest::new([ServiceType::IdentiFraud])
        };

        let result = self.first_result(&request).await?;
        match remote_failure(&result) {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }

    pub async fn screen_sex_offender(
        &self,
        first_name: &str,
        last_name: &str,
        dob: &str,
    ) -> Result<Vec<ScreeningResult>, ScreeningError> {
        self.screen_person(ServiceType::SexOffender, first_name, last_name, dob)
            .await
    }

    pub async fn screen_crime_record(
        &self,
        first_name: &str,
        last_name: &str,
        dob: &str,
    ) -> Result<Vec<ScreeningResult>, ScreeningError> {
        self.screen_person(ServiceType::CrimeRecord, first_name, last_name, dob)
            .await
    }

    pub async fn screen_pep(
        &self,
        first_name: &str,
        last_name: &str,
        dob: &str,
    ) -> Result<Vec<ScreeningResult>, ScreeningError> {
        self.screen_person(ServiceType::Pep, first_name, last_name, dob)
            .await
    }

    pub async fn screen_ofac(
        &self,
        first_name: &str,
        last_name: &str,
        dob: &str,
    ) -> Result<Vec<ScreeningResult>, ScreeningError> {
        self.screen_person(ServiceType::Ofac, first_name, last_name, dob)
            .await
    }

    pub async fn screen_every_politician(
        &self,
        first_name: &str,
        last_name: &str,
        dob: &str,
    ) -> Result<Vec<ScreeningResult>, ScreeningError> {
        self.screen_person(ServiceType::EveryPolitician, first_name, last_name, dob)
            .await
    }

    /// Name and date-of-birth lookup shared by the list-based services.
    ///
    /// Results are returned as-is; callers check each `success` flag.
    async fn screen_person(
        &self,
        service: ServiceType,
        first_name: &str,
        last_name: &str,
        dob: &str,
    ) -> Result<Vec<ScreeningResult>, ScreeningError> {
        require_non_empty(&[first_name, last_name, dob])?;

        let request = ScreeningRequest {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            date_of_births: Some(dob.to_string()),
            ..ScreeningRequest::new([service])
        };

        self.screen(&request).await
    }

    async fn first_result(
        &self,
        request: &ScreeningRequest,
    ) -> Result<ScreeningResult, ScreeningError> {
        self.screen(request)
            .await?
            .into_iter()
            .next()
            .ok_or(ScreeningError::EmptyResponse)
    }
}

/// Builds the `Authorization` header, flagged so transports never print it.
fn bearer_header(token: &str) -> Result<HeaderValue, ScreeningError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
        ScreeningError::Config("token contains characters not allowed in a header".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

impl fmt::Debug for ScreeningClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreeningClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"[REDACTED]")
            .field("strict_parsing", &self.strict_parsing)
            .finish()
    }
}
