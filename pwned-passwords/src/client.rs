use std::time::Duration;

use tracing::{Instrument, Span, debug, info, info_span, instrument};

use crate::api::Api;
use crate::config::Config;
use crate::digest::PasswordDigest;
use crate::error::Error;
use crate::range::{RangeBucket, parse_range_body};

/// Queries the Pwned Passwords API.
///
/// Each call issues exactly one request and nothing is cached between calls.
/// Failures are returned as-is; retrying is left to the caller.
#[derive(Debug, Clone)]
pub struct Client {
    api: Api,
    span: Span,
}

impl Client {
    pub fn new(config: Config) -> Result<Self, Error> {
        let span = info_span!("pwned_passwords", base_url = %config.base_url);
        Ok(Self { api: Api::new(config)?, span })
    }

    /// Client for the public API with no request timeout.
    pub fn default_client() -> Result<Self, Error> {
        Self::new(Config::default())
    }

    pub fn config(&self) -> &Config {
        self.api.config()
    }

    /// Fetches every suffix sharing `digest`'s 5-character prefix.
    ///
    /// Only the prefix is sent to the service.
    pub async fn range(&self, digest: &PasswordDigest) -> Result<RangeBucket, Error> {
        self.fetch_range(digest.prefix()).instrument(self.span.clone()).await
    }

    async fn fetch_range(&self, prefix: &str) -> Result<RangeBucket, Error> {
        let body = self.api.request("range", prefix).await?;
        let bucket = parse_range_body(prefix, &body)?;
        debug!(prefix, entries = bucket.len(), "parsed range response");
        Ok(bucket)
    }

    /// Breach count for `digest` via a range query, 0 when absent.
    ///
    /// A 404 for the prefix bucket is also reported as 0.
    pub async fn check(&self, digest: &PasswordDigest) -> Result<u64, Error> {
        let count = match self.range(digest).await {
            Ok(bucket) => bucket.count_for(digest),
            Err(Error::PasswordNotFound) => 0,
            Err(e) => return Err(e),
        };
        self.span.in_scope(|| {
            if count == 0 {
                info!("no entry found");
            } else {
                info!(count, "entry found");
            }
        });
        Ok(count)
    }

    /// Breach count for `digest` via the full-hash endpoint.
    ///
    /// This sends the whole digest to the service. A 404 means the digest is
    /// not in the corpus and is reported as 0.
    pub async fn search(&self, digest: &PasswordDigest) -> Result<u64, Error> {
        self.fetch_count(digest).instrument(self.span.clone()).await
    }

    async fn fetch_count(&self, digest: &PasswordDigest) -> Result<u64, Error> {
        let body = match self.api.request("pwnedpassword", digest.as_str()).await {
            Ok(body) => body,
            Err(Error::PasswordNotFound) => {
                info!("no password found");
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let body = body.trim();
        let count = body
            .parse::<u64>()
            .map_err(|e| Error::MalformedResponse(format!("invalid count {body:?}: {e}")))?;
        info!(count, "password found");
        Ok(count)
    }

    /// Normalizes `value` and checks it, by range query when `anonymous`,
    /// otherwise by full-hash search.
    #[instrument(level = "debug", skip(self, value))]
    pub async fn check_password(
        &self,
        value: &str,
        plain_text: bool,
        anonymous: bool,
    ) -> Result<u64, Error> {
        let digest = PasswordDigest::normalize(value, plain_text);
        if anonymous {
            self.check(&digest).await
        } else {
            self.search(&digest).await
        }
    }
}

/// One-shot check against the public API. See [`Client::check_password`].
pub async fn check_password(
    value: &str,
    plain_text: bool,
    anonymous: bool,
    timeout: Option<Duration>,
) -> Result<u64, Error> {
    let client = Client::new(Config::default().with_timeout(timeout))?;
    client.check_password(value, plain_text, anonymous).await
}

/// One-shot full-hash search against the public API.
pub async fn search(value: &str, plain_text: bool, timeout: Option<Duration>) -> Result<u64, Error> {
    let client = Client::new(Config::default().with_timeout(timeout))?;
    client.search(&PasswordDigest::normalize(value, plain_text)).await
}

/// One-shot range query against the public API.
pub async fn range(
    value: &str,
    plain_text: bool,
    timeout: Option<Duration>,
) -> Result<RangeBucket, Error> {
    let client = Client::new(Config::default().with_timeout(timeout))?;
    client.range(&PasswordDigest::normalize(value, plain_text)).await
}
