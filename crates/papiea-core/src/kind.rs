use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Discriminator for every error a Papiea server can report
///
/// The string forms are the `error.type` identifiers emitted by the engine
/// and must match them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, IntoStaticStr, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Spec with this version already exists
    ConflictingEntity,
    /// Entity not found on Papiea
    EntityNotFound,
    /// Token does not grant access rights for the operation
    PermissionDenied,
    /// Procedure handler failed
    ProcedureInvocation,
    /// No auth token in the `Authorization` header
    Unauthorized,
    /// Entity spec or status failed validation
    Validation,
    /// Malformed request
    BadRequest,
    /// An on-create, on-delete or intent handler failed
    #[strum(serialize = "on_action_error")]
    OnAction,
    /// Something went wrong inside Papiea
    ServerError,
    /// Fallback for bodies that carry no recognizable error type
    #[strum(serialize = "papiea_exception")]
    Generic,
}

impl ErrorKind {
    /// Whether servers declare this kind by name
    ///
    /// `Generic` is only ever produced locally, so it is never registered.
    pub const fn is_server_declared(self) -> bool {
        !matches!(self, Self::Generic)
    }

    /// Wire identifier of this kind
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
