#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("key cannot be nil")]
    NilKey,

    #[error("key not found")]
    NotFound,

    #[error("cannot order {lhs} against {rhs}")]
    Incomparable {
        lhs: &'static str,
        rhs: &'static str,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
