//! Script tag embedding.

use crate::imports::lower_imports;
use crate::traits::{Transpile, TranspileError};
use crate::transpile::OxcTranspiler;

/// Turns JavaScript/JSX snippets into inline `<script>` tags.
pub struct ScriptEmbedder {
    transpiler: Box<dyn Transpile>,
}

impl ScriptEmbedder {
    /// Create an embedder backed by the default oxc transpiler.
    pub fn new() -> Self {
        Self::with_transpiler(OxcTranspiler::new())
    }

    /// Create an embedder backed by a specific transpiler.
    pub fn with_transpiler(transpiler: impl Transpile + 'static) -> Self {
        Self {
            transpiler: Box::new(transpiler),
        }
    }

    /// Name of the underlying transpiler.
    pub fn transpiler_name(&self) -> &'static str {
        self.transpiler.name()
    }

    /// Transpile `source` and wrap it in a script tag.
    ///
    /// With `wrap` set the code runs inside `(function(){ ... })()` so its
    /// top-level declarations stay out of the page's global scope.
    pub fn embed(&self, source: &str, wrap: bool) -> Result<String, TranspileError> {
        let source = lower_imports(source)?;
        let compiled = self.transpiler.transpile(&source)?;
        let compiled = compiled.trim_end().replace("</script", "<\\/script");

        Ok(if wrap {
            format!("<script>(function(){{{}}})()</script>", compiled)
        } else {
            format!("<script>{}</script>", compiled)
        })
    }
}

impl Default for ScriptEmbedder {
    fn default() -> Self {
        Self::new()
    }
}
