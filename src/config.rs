use crate::{error::Error, ignore::IgnoreList};
use std::{
    env,
    fmt::{self, Debug},
    path::PathBuf,
    time::Duration,
};

pub(crate) const DEFAULT_HOST: &str = "collect.faultline.dev";
const PROJECT_ROOT_MARKER: &str = "[PROJECT_ROOT]";
const CARGO_HOME_MARKER: &str = "[CARGO_HOME]";

/// A line-rewriting transform applied to every backtrace frame.
pub type BacktraceFilter = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Settings for one reporting client.
///
/// Build a `Config` once at startup and hand it to
/// [`Notifier::new`](crate::Notifier::new); the notifier owns it for the
/// life of the process and treats it as read-only from then on. There is no
/// ambient global to mutate, so reconfiguration while requests are in
/// flight cannot happen by accident.
///
/// ```
/// use faultline::Config;
///
/// let config = Config::new("0123456789abcdef")
///     .with_host("errors.example.com")
///     .with_secure(true)
///     .with_param_filter("credit_card");
/// ```
pub struct Config {
    api_key: String,
    host: String,
    port: Option<u16>,
    secure: bool,
    project_root: Option<PathBuf>,
    ignore: IgnoreList,
    param_filters: Vec<String>,
    environment_filters: Vec<String>,
    backtrace_filters: Vec<BacktraceFilter>,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl Config {
    /// Create a configuration with the given API key and defaults for
    /// everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: DEFAULT_HOST.into(),
            port: None,
            secure: false,
            project_root: None,
            ignore: IgnoreList::default(),
            param_filters: vec!["password".into()],
            environment_filters: Vec::new(),
            backtrace_filters: Vec::new(),
            connect_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(5),
        }
    }

    /// Create a configuration from `FAULTLINE_*` environment variables.
    ///
    /// `FAULTLINE_API_KEY` is required; `FAULTLINE_HOST`, `FAULTLINE_PORT`
    /// and `FAULTLINE_SECURE` override their defaults when present.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Config::new(env::var("FAULTLINE_API_KEY")?);
        if let Ok(host) = env::var("FAULTLINE_HOST") {
            config = config.with_host(host);
        }
        if let Ok(port) = env::var("FAULTLINE_PORT") {
            match port.parse() {
                Ok(port) => config = config.with_port(port),
                Err(_) => log::warn!("FAULTLINE_PORT is not a port number: {port}"),
            }
        }
        if let Ok(secure) = env::var("FAULTLINE_SECURE") {
            config = config.with_secure(secure == "1" || secure.eq_ignore_ascii_case("true"));
        }
        Ok(config)
    }

    /// Set the collector host to connect to.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the collector port. When unset the port follows the scheme: 443
    /// for https, 80 for http.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Use https instead of http.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the application root directory. Backtrace lines have this prefix
    /// replaced with `[PROJECT_ROOT]`.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// Ignore an error type on the automatic interception path.
    pub fn with_ignored_type<E: 'static>(mut self) -> Self {
        self.ignore.ignore_type::<E>();
        self
    }

    /// Ignore an error type by name on the automatic interception path.
    pub fn with_ignored_name(mut self, name: impl Into<String>) -> Self {
        self.ignore.ignore_name(name);
        self
    }

    /// Replace the ignore list wholesale with the given type names. Types
    /// ignored by default are no longer ignored afterwards.
    pub fn with_ignore_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.replace(names);
        self
    }

    /// Add a pattern matched against request parameter keys. Matching
    /// parameters have their values redacted before delivery.
    pub fn with_param_filter(mut self, pattern: impl Into<String>) -> Self {
        self.param_filters.push(pattern.into());
        self
    }

    /// Add a pattern matched against environment variable keys. Matching
    /// variables have their values redacted before delivery.
    pub fn with_environment_filter(mut self, pattern: impl Into<String>) -> Self {
        self.environment_filters.push(pattern.into());
        self
    }

    /// Append a backtrace filter. Filters run against every backtrace line
    /// in registration order, after the built-in path rewrites.
    pub fn with_backtrace_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.backtrace_filters.push(Box::new(filter));
        self
    }

    /// Set the connection timeout for deliveries.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout for deliveries.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// The configured API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The collector host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The collector port, following the scheme when unset.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(if self.secure { 443 } else { 80 })
    }

    /// `"https"` or `"http"`.
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// The application root directory, if set.
    pub fn project_root(&self) -> Option<&PathBuf> {
        self.project_root.as_ref()
    }

    /// The collector endpoint notices are posted to.
    pub fn endpoint(&self) -> Result<http::Uri, Error> {
        format!("{}://{}:{}/notices/", self.scheme(), self.host, self.port())
            .parse()
            .map_err(Error::InvalidEndpoint)
    }

    /// The current ignore list.
    pub fn ignore(&self) -> &IgnoreList {
        &self.ignore
    }

    /// Mutable access to the ignore list.
    pub fn ignore_mut(&mut self) -> &mut IgnoreList {
        &mut self.ignore
    }

    /// Patterns matched against request parameter keys.
    pub fn param_filters(&self) -> &[String] {
        &self.param_filters
    }

    /// Mutable access to the parameter filter patterns.
    pub fn param_filters_mut(&mut self) -> &mut Vec<String> {
        &mut self.param_filters
    }

    /// Patterns matched against environment variable keys.
    pub fn environment_filters(&self) -> &[String] {
        &self.environment_filters
    }

    /// Mutable access to the environment filter patterns.
    pub fn environment_filters_mut(&mut self) -> &mut Vec<String> {
        &mut self.environment_filters
    }

    /// The connection timeout for deliveries.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// The read timeout for deliveries.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Run one backtrace line through the built-in rewrites and every
    /// registered filter, in order.
    pub(crate) fn filter_line(&self, line: &str) -> String {
        let mut line = line.to_owned();
        if let Some(root) = &self.project_root {
            line = line.replace(root.to_string_lossy().as_ref(), PROJECT_ROOT_MARKER);
        }
        if let Some(stripped) = line.strip_prefix("./") {
            line = stripped.to_owned();
        }
        if let Some(cargo) = cargo_home() {
            line = line.replace(cargo.to_string_lossy().as_ref(), CARGO_HOME_MARKER);
        }
        self.backtrace_filters
            .iter()
            .fold(line, |line, filter| filter(&line))
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // api_key intentionally left out.
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("project_root", &self.project_root)
            .field("ignore", &self.ignore)
            .field("param_filters", &self.param_filters)
            .field("environment_filters", &self.environment_filters)
            .field("backtrace_filters", &self.backtrace_filters.len())
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

fn cargo_home() -> Option<PathBuf> {
    env::var_os("CARGO_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".cargo")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(false, None, 80 ; "insecure default")]
    #[test_case(true, None, 443 ; "secure default")]
    #[test_case(false, Some(8080), 8080 ; "explicit wins")]
    #[test_case(true, Some(8080), 8080 ; "explicit wins over secure")]
    fn port_follows_scheme(secure: bool, port: Option<u16>, expected: u16) {
        let mut config = Config::new("key").with_secure(secure);
        if let Some(port) = port {
            config = config.with_port(port);
        }
        assert_eq!(expected, config.port());
    }

    #[test]
    fn endpoint_formats_scheme_host_and_port() {
        let config = Config::new("key").with_host("errors.example.com").with_secure(true);
        assert_eq!(
            "https://errors.example.com:443/notices/",
            config.endpoint().unwrap().to_string()
        );
    }

    #[test]
    fn host_defaults_when_unset() {
        assert_eq!(DEFAULT_HOST, Config::new("key").host());
    }

    #[test]
    fn filter_line_rewrites_project_root() {
        let config = Config::new("key").with_project_root("/srv/app");
        assert_eq!(
            "[PROJECT_ROOT]/src/main.rs:10",
            config.filter_line("/srv/app/src/main.rs:10")
        );
    }

    #[test]
    fn filter_line_strips_leading_dot_slash() {
        let config = Config::new("key");
        assert_eq!("src/main.rs:10", config.filter_line("./src/main.rs:10"));
    }

    #[test]
    fn registered_filters_run_in_order_after_builtins() {
        let config = Config::new("key")
            .with_backtrace_filter(|line| format!("{line}a"))
            .with_backtrace_filter(|line| format!("{line}b"));
        assert_eq!("lineab", config.filter_line("./line"));
    }

    #[test]
    fn debug_does_not_leak_api_key() {
        let config = Config::new("sekrit-key");
        assert!(!format!("{config:?}").contains("sekrit-key"));
    }
}
