use super::Error;

/// Error when the interpreter fails to evaluate a mapping expression.
///
/// This occurs when:
/// - A script is malformed (unterminated `${`)
/// - A multi-valued variable is interpolated into text
/// - A custom interpreter raises while running a script
///
/// A script that merely references an absent variable is not an error; it
/// evaluates to null.
#[derive(Debug)]
pub(super) struct ExpressionEvaluationFailed {
    message: Box<str>,
}

impl std::error::Error for ExpressionEvaluationFailed {}

impl core::fmt::Display for ExpressionEvaluationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "expression evaluation failed: {}", self.message)
    }
}

impl Error {
    /// Creates an expression evaluation failed error.
    pub fn expression_evaluation_failed(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ExpressionEvaluationFailed(
            ExpressionEvaluationFailed {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an expression evaluation failure.
    pub fn is_expression_evaluation_failed(&self) -> bool {
        matches!(
            self.root().kind(),
            super::ErrorKind::ExpressionEvaluationFailed(_)
        )
    }
}
