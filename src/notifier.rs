use crate::{
    ignore::short_type_name,
    models::{Notice, NoticeFields},
    uploader, Config, HttpClient, RequestContext,
};
use std::{
    any::type_name,
    error::Error as StdError,
    fmt::{self, Debug},
};

/// The reporting client: a [`Config`] plus the HTTP client used to deliver
/// notices.
///
/// Construct one at the application's composition root and share it with
/// every request worker. All entry points are `&self`; a notice is built
/// and delivered entirely on the calling thread, so concurrent errors in
/// different workers never interact.
pub struct Notifier<C = ureq::Agent> {
    config: Config,
    client: C,
}

impl Notifier<ureq::Agent> {
    /// Create a notifier delivering through a [`ureq::Agent`] with the
    /// configured connect and read timeouts.
    pub fn new(config: Config) -> Self {
        let client = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout())
            .timeout_read(config.read_timeout())
            .build();
        Self { config, client }
    }
}

impl<C: HttpClient> Notifier<C> {
    /// Create a notifier delivering through the given client.
    pub fn with_client(config: Config, client: C) -> Self {
        Self { config, client }
    }

    /// The configuration this notifier was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Automatic interception entry point, meant to be called from the host
    /// framework's unhandled-error hook.
    ///
    /// The notice is suppressed when the error's type is on the ignore list
    /// or the context is not a public deployment.
    pub fn capture<E>(&self, error: &E, context: &dyn RequestContext)
    where
        E: StdError + 'static,
    {
        if self.config.ignore().is_ignored::<E>() {
            log::debug!(
                "not reporting ignored error type {}",
                short_type_name(type_name::<E>())
            );
            return;
        }
        if !context.public_environment() {
            log::debug!("not reporting from a non-public environment");
            return;
        }
        self.deliver(Notice::from_error(&self.config, error, Some(context)));
    }

    /// Report an error manually, outside any framework context.
    ///
    /// Bypasses the ignore list: an error type that automatic interception
    /// would suppress is still delivered when reported this way.
    pub fn notify<E: StdError>(&self, error: &E) {
        self.deliver(Notice::from_error(&self.config, error, None));
    }

    /// Report an error manually from within a request, attaching the
    /// request and session snapshots. Bypasses the ignore list but still
    /// respects the public-environment check.
    pub fn notify_in_context<E: StdError>(&self, error: &E, context: &dyn RequestContext) {
        if !context.public_environment() {
            log::debug!("not reporting from a non-public environment");
            return;
        }
        self.deliver(Notice::from_error(&self.config, error, Some(context)));
    }

    /// Report a notice built from explicit fields instead of an error
    /// value.
    pub fn notify_fields(&self, fields: NoticeFields) {
        self.deliver(Notice::from_fields(&self.config, fields));
    }

    // Failures are logged and swallowed: reporting must never interfere
    // with the host application's own error handling.
    fn deliver(&self, notice: Notice) {
        if let Err(err) = uploader::send(&self.client, &self.config, &notice) {
            log::error!("delivering notice failed with {err}");
        }
    }
}

impl<C: Debug> Debug for Notifier<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("config", &self.config)
            .field("client", &self.client)
            .finish()
    }
}
