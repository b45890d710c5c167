use crate::RequestContext;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Snapshot of the HTTP request a notice was raised in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Request {
    /// Parsed request parameters; values may be nested mappings.
    pub params: BTreeMap<String, Value>,
    /// Absolute application root directory, used for path shortening on the
    /// collector side.
    pub root_path: String,
    /// Absolute URL of the request.
    pub url: String,
}

impl Request {
    pub(crate) fn from_context(context: &dyn RequestContext) -> Self {
        Self {
            params: context.params(),
            root_path: context.root_path(),
            url: context.url(),
        }
    }
}
