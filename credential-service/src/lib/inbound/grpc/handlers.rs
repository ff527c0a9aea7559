use tonic::Status;

use crate::domain::account::errors::CredentialError;

pub mod login;
pub mod register;
pub mod verify_token;

impl From<CredentialError> for Status {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidUsername(_) | CredentialError::InvalidPassword(_) => {
                Status::invalid_argument(err.to_string())
            }
            CredentialError::AlreadyExists(_) => Status::already_exists(err.to_string()),
            CredentialError::NotFound(_) => Status::not_found(err.to_string()),
            // Wrong password is reported as a bad argument, not as an auth failure.
            CredentialError::InvalidCredentials => Status::invalid_argument(err.to_string()),
            CredentialError::Unauthenticated(_) | CredentialError::Malformed(_) => {
                Status::unauthenticated(err.to_string())
            }
            CredentialError::Database(_) | CredentialError::Internal(_) => {
                Status::internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;
    use crate::domain::account::errors::UsernameError;

    #[test]
    fn test_error_codes() {
        let cases = [
            (CredentialError::from(UsernameError::Empty), Code::InvalidArgument),
            (CredentialError::AlreadyExists("alice".to_string()), Code::AlreadyExists),
            (CredentialError::NotFound("alice".to_string()), Code::NotFound),
            (CredentialError::InvalidCredentials, Code::InvalidArgument),
            (CredentialError::Unauthenticated("bad signature".to_string()), Code::Unauthenticated),
            (CredentialError::Malformed("not a jwt".to_string()), Code::Unauthenticated),
            (CredentialError::Database("timeout".to_string()), Code::Internal),
            (CredentialError::Internal("missing sub".to_string()), Code::Internal),
        ];

        for (error, code) in cases {
            assert_eq!(Status::from(error).code(), code);
        }
    }
}
