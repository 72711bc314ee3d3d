use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::kind::ErrorKind;

/// Lookup table from server-declared `error.type` strings to error kinds
///
/// Built once and never mutated afterwards, so a single instance can be
/// shared across tasks behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct ExceptionRegistry {
    kinds: HashMap<String, ErrorKind>,
}

impl ExceptionRegistry {
    /// Registry knowing every identifier the engine emits
    pub fn standard() -> Self {
        ErrorKind::iter()
            .filter(|kind| kind.is_server_declared())
            .map(|kind| (kind.as_str(), kind))
            .collect()
    }

    /// Registry that recognizes nothing, so every failure is generic
    pub fn empty() -> Self {
        Self { kinds: HashMap::new() }
    }

    /// Add or replace an entry
    #[must_use]
    pub fn with(mut self, type_key: impl Into<String>, kind: ErrorKind) -> Self {
        self.kinds.insert(type_key.into(), kind);
        self
    }

    /// Find the kind registered for `type_key`
    pub fn lookup(&self, type_key: &str) -> Option<ErrorKind> {
        self.kinds.get(type_key).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for ExceptionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl<K: Into<String>> FromIterator<(K, ErrorKind)> for ExceptionRegistry {
    fn from_iter<I: IntoIterator<Item = (K, ErrorKind)>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().map(|(key, kind)| (key.into(), kind)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_knows_every_server_kind() {
        let registry = ExceptionRegistry::standard();

        for (key, kind) in [
            ("conflicting_entity", ErrorKind::ConflictingEntity),
            ("entity_not_found", ErrorKind::EntityNotFound),
            ("permission_denied", ErrorKind::PermissionDenied),
            ("procedure_invocation", ErrorKind::ProcedureInvocation),
            ("unauthorized", ErrorKind::Unauthorized),
            ("validation", ErrorKind::Validation),
            ("bad_request", ErrorKind::BadRequest),
            ("on_action_error", ErrorKind::OnAction),
            ("server_error", ErrorKind::ServerError),
        ] {
            assert_eq!(registry.lookup(key), Some(kind), "{key}");
        }

        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn generic_is_not_registered() {
        let registry = ExceptionRegistry::standard();
        assert_eq!(registry.lookup("papiea_exception"), None);
        assert_eq!(registry.lookup("made_up"), None);
    }

    #[test]
    fn custom_registry() {
        let registry = ExceptionRegistry::empty().with("gone", ErrorKind::EntityNotFound);
        assert_eq!(registry.lookup("gone"), Some(ErrorKind::EntityNotFound));
        assert_eq!(registry.lookup("entity_not_found"), None);
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExceptionRegistry>();
    }
}
