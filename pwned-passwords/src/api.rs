use reqwest::header::RETRY_AFTER;
use tracing::debug;

use crate::config::Config;
use crate::error::Error;

/// Shared request path for every endpoint: URL building, headers, status
/// mapping and body decoding.
#[derive(Debug, Clone)]
pub(crate) struct Api {
    http: reqwest::Client,
    config: Config,
}

impl Api {
    pub(crate) fn new(config: Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(Error::Network)?;
        Ok(Self { http, config })
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// `{base_url}/{component}/{component}...`
    pub(crate) fn url(&self, components: &[&str]) -> String {
        let mut url = self.config.base_url.clone();
        for component in components {
            url.push('/');
            url.push_str(component);
        }
        url
    }

    /// Issues a GET for `{base_url}/{path}/{value}` and returns the decoded body.
    pub(crate) async fn request(&self, path: &str, value: &str) -> Result<String, Error> {
        let url = self.url(&[path, value]);
        debug!(%url, "sending request");

        let mut request = self.http.get(&url);
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }
        if self.config.add_padding {
            request = request.header("Add-Padding", "true");
        }

        let response = request.send().await.map_err(|e| transport_error(&url, e))?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let message = status.canonical_reason().unwrap_or("unknown status");
            debug!(status = status.as_u16(), message, "service returned an error");
            return Err(Error::from_status(status.as_u16(), message, retry_after));
        }

        let bytes = response.bytes().await.map_err(|e| transport_error(&url, e))?;
        decode_body(&bytes)
    }
}

/// Decodes a UTF-8 body, dropping a leading byte-order mark.
pub(crate) fn decode_body(bytes: &[u8]) -> Result<String, Error> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| Error::MalformedResponse(format!("body is not valid UTF-8: {e}")))
}

fn transport_error(url: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout { url: url.to_string() }
    } else {
        Error::Network(err)
    }
}
