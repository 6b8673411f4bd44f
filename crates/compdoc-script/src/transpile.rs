//! oxc-backed JSX transpiler.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{HelperLoaderMode, JsxRuntime, TransformOptions, Transformer};

use crate::helpers::inline_helpers;
use crate::traits::{Transpile, TranspileError};

/// Default compilation target.
pub const DEFAULT_TARGET: &str = "es2015";

/// Transpiles JSX to broadly compatible JavaScript with oxc.
///
/// JSX is compiled with the classic runtime (`React.createElement`), so the
/// output relies on a global `React` rather than an injected import. Helpers
/// needed by down-levelled syntax are defined inline at the top of the output.
#[derive(Debug, Clone)]
pub struct OxcTranspiler {
    target: String,
}

impl OxcTranspiler {
    /// Create a transpiler for the default target.
    pub fn new() -> Self {
        Self::with_target(DEFAULT_TARGET)
    }

    /// Create a transpiler for an explicit target such as `es2017` or `chrome80`.
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    fn options(&self) -> Result<TransformOptions, TranspileError> {
        let mut options = TransformOptions::from_target(&self.target)
            .map_err(|e| TranspileError::InvalidTarget(format!("{}: {}", self.target, e)))?;
        options.jsx.runtime = JsxRuntime::Classic;
        options.helper_loader.mode = HelperLoaderMode::External;
        Ok(options)
    }
}

impl Default for OxcTranspiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpile for OxcTranspiler {
    fn name(&self) -> &'static str {
        "oxc"
    }

    fn transpile(&self, source: &str) -> Result<String, TranspileError> {
        let options = self.options()?;
        let allocator = Allocator::default();

        let parsed = Parser::new(&allocator, source, SourceType::jsx()).parse();
        if parsed.panicked || !parsed.errors.is_empty() {
            return Err(TranspileError::parse(parsed.errors));
        }
        let mut program = parsed.program;

        let semantic = SemanticBuilder::new().build(&program);
        if !semantic.errors.is_empty() {
            return Err(TranspileError::parse(semantic.errors));
        }
        let scoping = semantic.semantic.into_scoping();

        let transformed = Transformer::new(&allocator, Path::new("inline.jsx"), &options)
            .build_with_scoping(scoping, &mut program);
        if !transformed.errors.is_empty() {
            return Err(TranspileError::transform(transformed.errors));
        }

        inline_helpers(&Codegen::new().build(&program).code)
    }
}
