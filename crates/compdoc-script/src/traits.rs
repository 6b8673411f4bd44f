//! Trait definitions for script transpilers.

/// Errors that can occur while turning a snippet into a script tag.
#[derive(Debug, thiserror::Error)]
pub enum TranspileError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Transform error: {0}")]
    TransformError(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),
}

impl TranspileError {
    /// Join a list of diagnostics into a single parse error.
    pub fn parse<I, D>(diagnostics: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: std::fmt::Display,
    {
        Self::ParseError(join(diagnostics))
    }

    /// Join a list of diagnostics into a single transform error.
    pub fn transform<I, D>(diagnostics: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: std::fmt::Display,
    {
        Self::TransformError(join(diagnostics))
    }
}

fn join<I, D>(diagnostics: I) -> String
where
    I: IntoIterator<Item = D>,
    D: std::fmt::Display,
{
    diagnostics
        .into_iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A JavaScript/JSX to browser JavaScript compiler.
pub trait Transpile: Send + Sync {
    /// Transpiler identifier (e.g., "oxc")
    fn name(&self) -> &'static str;

    /// Compile `source` to plain JavaScript. ES imports may remain in the output.
    fn transpile(&self, source: &str) -> Result<String, TranspileError>;
}
