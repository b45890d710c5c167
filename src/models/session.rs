use crate::RequestContext;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Snapshot of the user session a notice was raised in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    /// The framework's session identifier.
    pub key: String,
    /// The raw session data store.
    pub data: BTreeMap<String, Value>,
}

impl Session {
    pub(crate) fn from_context(context: &dyn RequestContext) -> Self {
        Self {
            key: context.session_key(),
            data: context.session_data(),
        }
    }
}
