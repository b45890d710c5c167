use crate::{
    backtrace,
    ignore::short_type_name,
    models::{scrub, Request, Session},
    Config, RequestContext,
};
use serde::Serialize;
use std::{any::type_name, collections::BTreeMap, error::Error as StdError};

const DEFAULT_MESSAGE: &str = "Notification";

/// Caller-supplied fields for a programmatic notice.
///
/// Anything left `None` falls back to its default: a `"Notification"`
/// message, the call stack at construction time, empty request and session
/// snapshots and the current process environment.
#[derive(Debug, Clone, Default)]
pub struct NoticeFields {
    /// Error type name. When set, `error_message` is prefixed with it.
    pub error_class: Option<String>,
    /// The message to report.
    pub error_message: Option<String>,
    /// Backtrace lines, either pre-split or one unsplit block.
    pub backtrace: Option<Vec<String>>,
    /// Request snapshot.
    pub request: Option<Request>,
    /// Session snapshot.
    pub session: Option<Session>,
    /// Environment variables to report.
    pub environment: Option<BTreeMap<String, String>>,
}

/// The canonical error report delivered to the collector.
///
/// A notice is built once, normalized and scrubbed before anything outside
/// this crate can observe it, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    /// API key identifying the reporting project.
    pub api_key: String,
    /// Unqualified type name of the error; empty for field-built notices
    /// without one.
    pub error_class: String,
    /// `"<error_class>: <message>"` when a class is known, the raw message
    /// otherwise.
    pub error_message: String,
    /// One entry per stack frame, post-filter.
    pub backtrace: Vec<String>,
    /// Snapshot of the triggering HTTP request.
    pub request: Request,
    /// Snapshot of the triggering user session.
    pub session: Session,
    /// Environment variables, post-redaction.
    pub environment: BTreeMap<String, String>,
}

impl Notice {
    /// Build a notice from a raised error, capturing the call stack at the
    /// point of this call. Request and session snapshots come from the
    /// framework context when one is present.
    pub fn from_error<E: StdError>(
        config: &Config,
        error: &E,
        context: Option<&dyn RequestContext>,
    ) -> Self {
        let error_class = short_type_name(type_name::<E>()).to_owned();
        let error_message = format!("{error_class}: {error}");
        let request = context.map(Request::from_context).unwrap_or_default();
        let session = context.map(Session::from_context).unwrap_or_default();
        Self::finish(
            config,
            error_class,
            error_message,
            backtrace::capture(),
            request,
            session,
            environment_snapshot(),
        )
    }

    /// Build a notice from caller-supplied fields merged over defaults.
    pub fn from_fields(config: &Config, fields: NoticeFields) -> Self {
        let message = fields
            .error_message
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_owned());
        let (error_class, error_message) = match fields.error_class {
            Some(class) => {
                let message = format!("{class}: {message}");
                (class, message)
            }
            None => (String::new(), message),
        };
        Self::finish(
            config,
            error_class,
            error_message,
            fields.backtrace.unwrap_or_else(backtrace::capture),
            fields.request.unwrap_or_default(),
            fields.session.unwrap_or_default(),
            fields.environment.unwrap_or_else(environment_snapshot),
        )
    }

    // Normalization and redaction happen here, before the notice exists as
    // a value anyone could observe.
    fn finish(
        config: &Config,
        error_class: String,
        error_message: String,
        raw_backtrace: Vec<String>,
        mut request: Request,
        session: Session,
        mut environment: BTreeMap<String, String>,
    ) -> Self {
        let backtrace = backtrace::normalize(raw_backtrace, config);
        scrub(&mut request.params, config.param_filters());
        scrub(&mut environment, config.environment_filters());
        Self {
            api_key: config.api_key().to_owned(),
            error_class,
            error_message,
            backtrace,
            request,
            session,
            environment,
        }
    }
}

pub(crate) fn environment_snapshot() -> BTreeMap<String, String> {
    std::env::vars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FILTERED;
    use serde_json::Value;
    use std::fmt;

    #[derive(Debug)]
    struct RuntimeError;

    impl fmt::Display for RuntimeError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "boom")
        }
    }

    impl StdError for RuntimeError {}

    #[test]
    fn from_error_without_context_uses_empty_snapshots() {
        let config = Config::new("key");
        let snapshot = environment_snapshot();
        let notice = Notice::from_error(&config, &RuntimeError, None);
        assert_eq!("RuntimeError", notice.error_class);
        assert_eq!("RuntimeError: boom", notice.error_message);
        assert_eq!(Request::default(), notice.request);
        assert_eq!(Session::default(), notice.session);
        assert_eq!(snapshot, notice.environment);
        assert!(!notice.backtrace.is_empty());
    }

    #[test]
    fn from_fields_without_class_keeps_raw_message_and_backtrace() {
        let config = Config::new("key");
        let notice = Notice::from_fields(
            &config,
            NoticeFields {
                error_message: Some("123".to_owned()),
                backtrace: Some(vec!["a".to_owned(), "b".to_owned()]),
                ..Default::default()
            },
        );
        assert_eq!("", notice.error_class);
        assert_eq!("123", notice.error_message);
        assert_eq!(vec!["a".to_owned(), "b".to_owned()], notice.backtrace);
    }

    #[test]
    fn from_fields_with_class_prefixes_the_message() {
        let config = Config::new("key");
        let notice = Notice::from_fields(
            &config,
            NoticeFields {
                error_class: Some("FooError".to_owned()),
                error_message: Some("oops".to_owned()),
                ..Default::default()
            },
        );
        assert_eq!("FooError", notice.error_class);
        assert_eq!("FooError: oops", notice.error_message);
    }

    #[test]
    fn from_fields_merges_defaults() {
        let config = Config::new("key");
        let notice = Notice::from_fields(&config, NoticeFields::default());
        assert_eq!("key", notice.api_key);
        assert_eq!("Notification", notice.error_message);
        assert_eq!(Request::default(), notice.request);
        assert_eq!(Session::default(), notice.session);
        assert!(!notice.backtrace.is_empty());
        assert!(!notice.environment.is_empty());
    }

    #[test]
    fn params_are_scrubbed_with_the_default_filter() {
        let config = Config::new("key");
        let request = Request {
            params: [
                ("password".to_owned(), Value::from("12345")),
                ("name".to_owned(), Value::from("dave")),
            ]
            .into(),
            ..Default::default()
        };
        let notice = Notice::from_fields(
            &config,
            NoticeFields {
                request: Some(request),
                ..Default::default()
            },
        );
        assert_eq!(Value::from(FILTERED), notice.request.params["password"]);
        assert_eq!(Value::from("dave"), notice.request.params["name"]);
    }

    #[test]
    fn environment_is_scrubbed_with_configured_filters() {
        let config = Config::new("key").with_environment_filter("SECRET");
        let environment = BTreeMap::from([
            ("SECRET_TOKEN".to_owned(), "hunter2".to_owned()),
            ("LANG".to_owned(), "C".to_owned()),
        ]);
        let notice = Notice::from_fields(
            &config,
            NoticeFields {
                environment: Some(environment),
                ..Default::default()
            },
        );
        assert_eq!(FILTERED, notice.environment["SECRET_TOKEN"]);
        assert_eq!("C", notice.environment["LANG"]);
    }

    #[test]
    fn field_backtraces_are_normalized() {
        let config = Config::new("key").with_project_root("/srv/app");
        let notice = Notice::from_fields(
            &config,
            NoticeFields {
                backtrace: Some(vec!["/srv/app/src/a.rs:1\n ./b.rs:2".to_owned()]),
                ..Default::default()
            },
        );
        assert_eq!(
            vec!["[PROJECT_ROOT]/src/a.rs:1".to_owned(), "b.rs:2".to_owned()],
            notice.backtrace
        );
    }
}
