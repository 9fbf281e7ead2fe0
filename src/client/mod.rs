//! Client layer: orchestrates transport calls and maps HTTP outcomes to errors.

mod error;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    ApiKey, BalanceResponse, MessageId, MessageStatusResponse, MessageText, PhoneNormalizer,
    ProfileResponse, SendSms, SendSmsResponse, SenderId,
};

pub use error::{ConfigurationError, ErrorKind, NetworkError, NotifyAfricaError};

const DEFAULT_BASE_URL: &str = "https://api.notify.africa/v2";
const DEFAULT_PROFILE_PATH: &str = "api/profile";
const DEFAULT_BALANCE_PATH: &str = "api/balance";
const DEFAULT_SEND_PATH: &str = "api/sms/send";
const DEFAULT_STATUS_PATH: &str = "api/sms/status";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const JSON_CONTENT_TYPE: &str = "application/json";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    headers: Vec<(&'static str, String)>,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, NetworkError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, NetworkError>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(request.url),
                HttpMethod::Post => self.client.post(request.url),
            };
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(network_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(network_error)?;
            Ok(HttpResponse { status, body })
        })
    }
}

fn network_error(err: reqwest::Error) -> NetworkError {
    if err.is_timeout() {
        NetworkError::Timeout(Box::new(err))
    } else {
        NetworkError::Connection(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EndpointPaths {
    profile: String,
    balance: String,
    send: String,
    status: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE_PATH.to_owned(),
            balance: DEFAULT_BALANCE_PATH.to_owned(),
            send: DEFAULT_SEND_PATH.to_owned(),
            status: DEFAULT_STATUS_PATH.to_owned(),
        }
    }
}

impl EndpointPaths {
    fn resolve(&self, base_url: &str) -> Result<Endpoints, ConfigurationError> {
        let base = parse_base_url(base_url)?;
        Ok(Endpoints {
            profile: join_path(&base, &self.profile)?,
            balance: join_path(&base, &self.balance)?,
            send: join_path(&base, &self.send)?,
            status: join_path(&base, &self.status)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoints {
    profile: Url,
    balance: Url,
    send: Url,
    status: Url,
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigurationError> {
    let raw = raw.trim();
    let mut url = Url::parse(raw).map_err(|source| ConfigurationError::BaseUrl {
        url: raw.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigurationError::UnsupportedBaseUrl {
            url: raw.to_owned(),
        });
    }
    // Relative joins replace the last segment unless the base ends with `/`.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn join_path(base: &Url, path: &str) -> Result<Url, ConfigurationError> {
    base.join(path.trim().trim_start_matches('/'))
        .map_err(|source| ConfigurationError::EndpointPath {
            path: path.to_owned(),
            source,
        })
}

/// Builder for [`NotifyAfricaClient`].
///
/// Credentials are validated in [`NotifyAfricaClientBuilder::build`], so a
/// misconfigured client fails before any request can be issued.
#[derive(Clone)]
pub struct NotifyAfricaClientBuilder {
    api_key: String,
    sender_id: String,
    base_url: String,
    paths: EndpointPaths,
    timeout: Duration,
    user_agent: Option<String>,
    normalizer: PhoneNormalizer,
}

impl fmt::Debug for NotifyAfricaClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyAfricaClientBuilder")
            .field("sender_id", &self.sender_id)
            .field("base_url", &self.base_url)
            .field("paths", &self.paths)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}

impl NotifyAfricaClientBuilder {
    /// Create a builder with the default base URL, endpoint paths and a 10 second timeout.
    pub fn new(api_key: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sender_id: sender_id.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            paths: EndpointPaths::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            normalizer: PhoneNormalizer::default(),
        }
    }

    /// Override the API base URL (`https://api.notify.africa/v2` by default).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the profile endpoint path, relative to the base URL.
    pub fn profile_path(mut self, path: impl Into<String>) -> Self {
        self.paths.profile = path.into();
        self
    }

    /// Override the balance endpoint path, relative to the base URL.
    pub fn balance_path(mut self, path: impl Into<String>) -> Self {
        self.paths.balance = path.into();
        self
    }

    /// Override the send endpoint path, relative to the base URL.
    pub fn send_path(mut self, path: impl Into<String>) -> Self {
        self.paths.send = path.into();
        self
    }

    /// Override the message status endpoint path, relative to the base URL.
    ///
    /// The message id is appended as a final path segment.
    pub fn status_path(mut self, path: impl Into<String>) -> Self {
        self.paths.status = path.into();
        self
    }

    /// Set the timeout applied to each request as a whole.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the normalizer used for recipients of [`NotifyAfricaClient::send_sms`].
    pub fn normalizer(mut self, normalizer: PhoneNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Build a [`NotifyAfricaClient`].
    pub fn build(self) -> Result<NotifyAfricaClient, NotifyAfricaError> {
        let api_key = ApiKey::new(self.api_key).map_err(ConfigurationError::from)?;
        let sender_id = SenderId::new(self.sender_id).map_err(ConfigurationError::from)?;
        let endpoints = self.paths.resolve(&self.base_url)?;

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| ConfigurationError::HttpClient(Box::new(err)))?;

        Ok(NotifyAfricaClient {
            api_key,
            sender_id,
            endpoints,
            normalizer: self.normalizer,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Notify Africa client.
///
/// Holds immutable credentials and a shared HTTP client, so clones are cheap and
/// may be used concurrently. Each method issues at most one request and never
/// retries. Every request carries `Authorization: Bearer <api_key>` and JSON
/// `Content-Type`/`Accept` headers.
pub struct NotifyAfricaClient {
    api_key: ApiKey,
    sender_id: SenderId,
    endpoints: Endpoints,
    normalizer: PhoneNormalizer,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for NotifyAfricaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyAfricaClient")
            .field("sender_id", &self.sender_id)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl NotifyAfricaClient {
    /// Create a client using the default base URL and endpoint paths.
    ///
    /// Fails with [`NotifyAfricaError::Configuration`] if either value is empty.
    /// For more customization, use [`NotifyAfricaClient::builder`].
    pub fn new(
        api_key: impl Into<String>,
        sender_id: impl Into<String>,
    ) -> Result<Self, NotifyAfricaError> {
        NotifyAfricaClientBuilder::new(api_key, sender_id).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(
        api_key: impl Into<String>,
        sender_id: impl Into<String>,
    ) -> NotifyAfricaClientBuilder {
        NotifyAfricaClientBuilder::new(api_key, sender_id)
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    /// Send `message` to every recipient.
    ///
    /// All recipients are normalized first; if any of them is invalid the call
    /// fails with [`NotifyAfricaError::Validation`] naming the first offending
    /// input and no request is sent.
    pub async fn send_sms<I, S>(
        &self,
        recipients: I,
        message: impl Into<String>,
    ) -> Result<SendSmsResponse, NotifyAfricaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let recipients = self.normalizer.validate_many(recipients)?;
        let message = MessageText::new(message)?;
        self.send(SendSms::new(recipients, message)?).await
    }

    /// Send an already validated request, using this client's sender id.
    pub async fn send(&self, request: SendSms) -> Result<SendSmsResponse, NotifyAfricaError> {
        let body = crate::transport::encode_send_sms_body(&request, &self.sender_id);
        tracing::debug!(
            recipients = request.recipients().len(),
            sender_id = self.sender_id.as_str(),
            "sending SMS"
        );

        let response = self
            .execute(HttpMethod::Post, self.endpoints.send.clone(), Some(body))
            .await?;

        crate::transport::decode_send_sms_json_response(
            &request,
            &self.normalizer,
            &response.body,
        )
            .map_err(|err| response_format(&response, err))
    }

    /// Fetch the account profile.
    pub async fn get_profile(&self) -> Result<ProfileResponse, NotifyAfricaError> {
        let response = self
            .execute(HttpMethod::Get, self.endpoints.profile.clone(), None)
            .await?;

        crate::transport::decode_profile_json_response(&response.body)
            .map_err(|err| response_format(&response, err))
    }

    /// Fetch the remaining SMS credit balance.
    ///
    /// A 2xx response without a numeric balance is reported as
    /// [`NotifyAfricaError::ResponseFormat`].
    pub async fn get_balance(&self) -> Result<BalanceResponse, NotifyAfricaError> {
        let response = self
            .execute(HttpMethod::Get, self.endpoints.balance.clone(), None)
            .await?;

        crate::transport::decode_balance_json_response(&response.body)
            .map_err(|err| response_format(&response, err))
    }

    /// Look up the delivery status of a previously sent message.
    pub async fn get_message_status(
        &self,
        message_id: &MessageId,
    ) -> Result<MessageStatusResponse, NotifyAfricaError> {
        let mut url = self.endpoints.status.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigurationError::UnsupportedBaseUrl {
                url: self.endpoints.status.to_string(),
            })?
            .pop_if_empty()
            .push(message_id.as_str());

        let response = self.execute(HttpMethod::Get, url, None).await?;

        crate::transport::decode_message_status_json_response(message_id, &response.body)
            .map_err(|err| response_format(&response, err))
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", self.api_key.bearer()),
            ("Content-Type", JSON_CONTENT_TYPE.to_owned()),
            ("Accept", JSON_CONTENT_TYPE.to_owned()),
        ]
    }

    async fn execute(
        &self,
        method: HttpMethod,
        url: Url,
        body: Option<String>,
    ) -> Result<HttpResponse, NotifyAfricaError> {
        tracing::debug!(?method, %url, "notify africa request");
        let request = HttpRequest {
            method,
            url,
            headers: self.headers(),
            body,
        };

        let response = self.http.execute(request).await.map_err(|err| {
            tracing::debug!(error = %err, "notify africa request failed");
            NotifyAfricaError::Network(err)
        })?;
        tracing::debug!(status = response.status, "notify africa response");

        match error::error_for_status(response.status, &response.body) {
            Some(err) => Err(err),
            None => Ok(response),
        }
    }
}

fn response_format<E>(response: &HttpResponse, source: E) -> NotifyAfricaError
where
    E: StdError + Send + Sync + 'static,
{
    NotifyAfricaError::ResponseFormat {
        status: response.status,
        body: response.body.clone(),
        source: Box::new(source),
    }
}
