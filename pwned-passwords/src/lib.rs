//! Checks passwords against the [Pwned Passwords](https://haveibeenpwned.com/Passwords)
//! breach corpus without revealing them.
//!
//! A password is hashed with SHA-1 locally. Only the first 5 hex characters of
//! the digest are sent to `GET /range/{prefix}`; the service answers with every
//! suffix it knows for that prefix, and the remaining 35 characters are matched
//! on this side. The service learns the bucket, never the password.
//!
//! # Example
//!
//! ```no_run
//! use pwned_passwords::{Client, Config, PasswordDigest};
//!
//! # async fn run() -> Result<(), pwned_passwords::Error> {
//! let client = Client::new(Config::default())?;
//! let digest = PasswordDigest::normalize("123123", true);
//! let count = client.check(&digest).await?;
//! if count > 0 {
//!     println!("seen {count} times in breaches");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A non-anonymous mode, [`Client::search`], sends the full digest to
//! `GET /pwnedpassword/{digest}`. It exists for compatibility only.

mod api;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod range;

pub use client::{Client, check_password, range, search};
pub use config::{API_URL_ENV, Config, DEFAULT_API_URL, DEFAULT_CLIENT_NAME};
pub use digest::{
    DIGEST_HEX_LEN, PREFIX_LEN, PasswordDigest, SUFFIX_LEN, looks_like_sha1, normalize,
};
pub use error::{Error, ServiceErrorKind};
pub use range::{RangeBucket, parse_range_body};
