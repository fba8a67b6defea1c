use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// loan terms that cannot be priced (non-positive principal or tenure)
    #[error("invalid loan terms: {message}")]
    InvalidTerms {
        message: String,
    },

    /// out-of-domain input to fee or risk calculations
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("request outside product range: {message}")]
    OutOfProductRange {
        message: String,
    },

    #[error("repayment already settled: installment {sequence_number}")]
    AlreadyPaid {
        sequence_number: u32,
    },

    #[error("payment below amount payable: payable {payable}, provided {provided}")]
    InsufficientPayment {
        payable: Money,
        provided: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_terms(message: impl Into<String>) -> Self {
        EngineError::InvalidTerms {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
