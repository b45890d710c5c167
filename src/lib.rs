//! An in-process error-reporting client for web applications.
//!
//! When a request handler blows up, this crate turns the error into a
//! structured *notice* — error class and message, backtrace, request and
//! session snapshots, environment variables — scrubs sensitive values out
//! of it and posts it to a collector endpoint. Delivery is best-effort:
//! one blocking POST with short timeouts, no retries, and failures are
//! logged rather than propagated into the host application's own error
//! handling.
//!
//! # Usage
//!
//! Configure the client once at startup and keep the [`Notifier`] around
//! for the life of the process:
//!
//! ```rust,no_run
//! use faultline::{Config, Notifier};
//!
//! let config = Config::new("0123456789abcdef")
//!     .with_host("errors.example.com")
//!     .with_secure(true)
//!     .with_param_filter("credit_card");
//! let notifier = Notifier::new(config);
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
//! notifier.notify(&error);
//! ```
//!
//! # Framework integration
//!
//! Automatic capture hooks into the host framework through an explicit
//! extension point: implement [`RequestContext`] on your framework's
//! request handle and call [`Notifier::capture`] from a middleware or
//! error handler wherever an otherwise-unhandled error would surface to
//! the end user.
//!
//! ```rust,no_run
//! use faultline::{Config, Notifier, RequestContext};
//! use serde_json::Value;
//! use std::collections::BTreeMap;
//!
//! struct WebContext;
//!
//! impl RequestContext for WebContext {
//!     fn params(&self) -> BTreeMap<String, Value> {
//!         BTreeMap::new()
//!     }
//!     fn root_path(&self) -> String {
//!         "/srv/app".into()
//!     }
//!     fn protocol(&self) -> String {
//!         "https".into()
//!     }
//!     fn host(&self) -> String {
//!         "app.example.com".into()
//!     }
//!     fn request_uri(&self) -> String {
//!         "/orders/42".into()
//!     }
//!     fn session_key(&self) -> String {
//!         String::new()
//!     }
//!     fn session_data(&self) -> BTreeMap<String, Value> {
//!         BTreeMap::new()
//!     }
//!     fn public_environment(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let notifier = Notifier::new(Config::new("0123456789abcdef"));
//! let context = WebContext;
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
//! notifier.capture(&error, &context);
//! ```
//!
//! Errors whose type is on the configured ignore list — by default the
//! expected failures of a web application, like record-not-found and
//! routing errors — are suppressed on the capture path. A manual
//! [`Notifier::notify`] call always delivers, even for ignored types.
#![deny(missing_docs, unreachable_pub, missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

mod backtrace;
mod config;
mod context;
mod error;
mod http_client;
mod ignore;
mod models;
mod notifier;
mod uploader;

pub use config::{BacktraceFilter, Config};
pub use context::RequestContext;
pub use error::Error;
pub use http_client::{HttpClient, HttpError};
pub use ignore::IgnoreList;
pub use models::{Notice, NoticeFields, Request, Session, FILTERED};
pub use notifier::Notifier;
