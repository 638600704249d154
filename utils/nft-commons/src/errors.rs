use super::*;

/// The custom errors the registry can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Token has no recorded owner (Error code: -4).
    NotFound,
    /// Token ID is already minted (Error code: -5).
    AlreadyExists,
    /// Sender is neither the owner, an operator of the owner nor the approved
    /// spender of the token (Error code: -6).
    Unauthorized,
    /// The null address was given where an account is required, or the token
    /// ID is out of range (Error code: -7).
    InvalidArgument,
    /// Receiving contract is missing the hook, rejected the token or returned
    /// a wrong acknowledgment (Error code: -8).
    UnsafeRecipient,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}
