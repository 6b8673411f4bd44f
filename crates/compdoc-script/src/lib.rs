//! Inline script embedding for component docs.
//!
//! Demo code and the page-level control script are written as JSX with ES module
//! imports. This crate lowers the imports to `require` bindings, transpiles the
//! result with oxc, defines the helpers the output calls and wraps it in a
//! `<script>` tag that the docs site can inject as-is.

pub mod demo;
pub mod embed;
pub mod helpers;
pub mod imports;
pub mod traits;
pub mod transpile;

pub use demo::{demo_render_source, global_control_source, DEFAULT_GLOBAL_CONTROL};
pub use embed::ScriptEmbedder;
pub use helpers::inline_helpers;
pub use imports::lower_imports;
pub use traits::{Transpile, TranspileError};
pub use transpile::OxcTranspiler;
