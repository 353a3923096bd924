use std::fmt;

/// Error returned by route table mutations and expression parsing.
///
/// A request that matches no route is not an error; `Router::route` reports
/// it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The route expression does not conform to the
    /// `Fn("arg"[, "arg2"]) && ...` grammar: bad token, unknown function,
    /// wrong arity, a non-string argument, or an empty matcher argument.
    ExpressionSyntax(String),
    /// A `<...>` pattern inside a matcher argument names an unsupported
    /// type or carries the wrong number of parameters.
    PatternSyntax(String),
    /// A `*Regexp` matcher received an invalid regular expression.
    RegexSyntax {
        /// The expression that failed to compile.
        expr: String,
        /// The regex engine's description of the failure.
        reason: String,
    },
    /// `add` was called with an expression that is already registered.
    DuplicateRoute(String),
    /// Merging or chaining compiled matchers violated an internal
    /// invariant. The route table is rolled back to its prior state.
    CompileFailure(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::ExpressionSyntax(msg) => {
                write!(f, "invalid route expression: {}", msg)
            }
            RouteError::PatternSyntax(msg) => write!(f, "invalid pattern: {}", msg),
            RouteError::RegexSyntax { expr, reason } => {
                write!(f, "bad regular expression: {}: {}", expr, reason)
            }
            RouteError::DuplicateRoute(expr) => {
                write!(f, "expression '{}' already exists", expr)
            }
            RouteError::CompileFailure(msg) => {
                write!(f, "failed to compile route table: {}", msg)
            }
        }
    }
}

impl std::error::Error for RouteError {}
