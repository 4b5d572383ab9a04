#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0}")]
    User(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Messages that can be shown to the person using the planner as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Validate(_)
                | Error::User(_)
                | Error::NotFound(_)
                | Error::ConfirmationRequired(_)
        )
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<sqlx_migrator::Error> for Error {
    fn from(value: sqlx_migrator::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! user {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::User(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::User(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::User(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! not_found {
    ($($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($($arg)*)))
    };
}

/// Gate for destructive actions: clearing the plan or the list, and
/// overwriting live state from a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    #[default]
    Pending,
    Confirmed,
}

impl Confirmation {
    pub fn from_flag(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Pending
        }
    }

    pub fn require(self, action: impl Into<String>) -> Result<()> {
        match self {
            Confirmation::Confirmed => Ok(()),
            Confirmation::Pending => Err(Error::ConfirmationRequired(action.into())),
        }
    }
}
