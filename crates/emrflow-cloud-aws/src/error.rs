//! AWS client error types

use aws_sdk_emr::error::{DisplayErrorContext, SdkError};
use emrflow_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Invalid {field}: {message}")]
    InvalidRequest { field: String, message: String },

    #[error("AWS SDK error: {0}")]
    Sdk(String),
}

impl<E, R> From<SdkError<E, R>> for AwsError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    fn from(err: SdkError<E, R>) -> Self {
        AwsError::Sdk(DisplayErrorContext(&err).to_string())
    }
}

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::InvalidRequest { field, message } => CloudError::InvalidField {
                field,
                reason: message,
            },
            AwsError::Sdk(message) => CloudError::ApiError(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
