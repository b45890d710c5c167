use serde_json::Value;
use std::collections::BTreeMap;

/// The contract a host web framework fulfils for automatic error capture.
///
/// Implement this on whatever request handle your framework gives you and
/// register a middleware (or error handler) that calls
/// [`Notifier::capture`](crate::Notifier::capture) wherever an otherwise
/// unhandled error would surface to the end user.
pub trait RequestContext {
    /// The framework's parsed request parameters. Values may be nested
    /// mappings.
    fn params(&self) -> BTreeMap<String, Value>;

    /// Absolute application root directory.
    fn root_path(&self) -> String;

    /// Request scheme, `"http"` or `"https"`.
    fn protocol(&self) -> String;

    /// Host the request was addressed to.
    fn host(&self) -> String;

    /// Path and query of the request.
    fn request_uri(&self) -> String;

    /// Absolute URL of the request, reconstructed from scheme, host and
    /// request URI.
    fn url(&self) -> String {
        format!("{}://{}{}", self.protocol(), self.host(), self.request_uri())
    }

    /// The framework's session identifier.
    fn session_key(&self) -> String;

    /// The raw session data store, as an opaque snapshot.
    fn session_data(&self) -> BTreeMap<String, Value>;

    /// Whether this deployment is public. Local development and test
    /// environments return false, which suppresses delivery entirely for
    /// the capture and in-context notification paths.
    fn public_environment(&self) -> bool;
}
