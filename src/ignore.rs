use std::{
    any::{type_name, TypeId},
    collections::HashSet,
};

/// Error type names that never trigger an automatic report: the "expected"
/// failures of a request-handling application.
const IGNORE_DEFAULT: [&str; 4] = [
    "RecordNotFound",
    "RoutingError",
    "InvalidAuthenticityToken",
    "TamperedWithCookie",
];

/// The set of error types suppressed on the automatic interception path.
///
/// An entry matches either by type identity or by type name. The name check
/// is the safety net: across crate or dynamic-library boundaries a type may
/// not compare identical even when it is semantically the same type. Manual
/// notification bypasses this list entirely.
#[derive(Debug, Clone)]
pub struct IgnoreList {
    types: HashSet<TypeId>,
    names: HashSet<String>,
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self {
            types: HashSet::new(),
            names: IGNORE_DEFAULT.iter().map(|name| (*name).to_owned()).collect(),
        }
    }
}

impl IgnoreList {
    /// An ignore list with no entries, not even the defaults.
    pub fn empty() -> Self {
        Self {
            types: HashSet::new(),
            names: HashSet::new(),
        }
    }

    /// Ignore `E`, matching by type identity and by name.
    pub fn ignore_type<E: 'static>(&mut self) {
        self.types.insert(TypeId::of::<E>());
        self.names.insert(type_name::<E>().to_owned());
    }

    /// Ignore a type by its name. Both fully-qualified names
    /// (`app::errors::RecordNotFound`) and bare names (`RecordNotFound`)
    /// match.
    pub fn ignore_name(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Replace the list wholesale with the given names, dropping every
    /// previous entry including the defaults.
    pub fn replace<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.clear();
        self.names = names.into_iter().map(Into::into).collect();
    }

    /// Whether errors of type `E` are suppressed on the automatic path.
    pub fn is_ignored<E: 'static>(&self) -> bool {
        if self.types.contains(&TypeId::of::<E>()) {
            return true;
        }
        let full = type_name::<E>();
        self.names.contains(full) || self.names.contains(short_type_name(full))
    }
}

/// The unqualified name of a type: module path and generic parameters
/// stripped from `std::any::type_name` output.
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
