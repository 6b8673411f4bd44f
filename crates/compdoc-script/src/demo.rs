//! Script sources for demo previews and the page-level controls.

use crate::imports::lower_imports;
use crate::traits::TranspileError;

/// Page-level control script injected with every component API page.
///
/// Sets up the registries that demo render scripts push into and a helper
/// the docs site calls while switching between preview and live-edit modes.
pub const DEFAULT_GLOBAL_CONTROL: &str = r#"import { Loading, Message } from '@alifd/next';

window.loadingRenderScript = function (loading, showMessage = true) {
    const mount = document.getElementById('demo-loading-state');
    const live = window.localStorage.liveDemo === 'true';
    try {
        if (loading) {
            ReactDOM.render(<Loading visible fullScreen />, mount);
            return;
        }
        ReactDOM.unmountComponentAtNode(mount);
        if (showMessage) {
            Message.success(live
                ? '切换到在线编辑模式成功，点击代码区域即可编辑预览。'
                : '切换到预览模式成功，代码展示为只读模式。');
        }
    } catch (e) {
        Message.error(live
            ? '切换到在线编辑模式失败，请联系管理员。'
            : '切换到预览模式失败，请联系管理员。');
    }
};

window.demoNames = [];
window.renderFuncs = [];
"#;

/// Build the global control source: the base script followed by an optional
/// project snippet.
pub fn global_control_source(base: &str, extra: Option<&str>) -> String {
    match extra {
        Some(extra) if !extra.trim().is_empty() => format!("{}\n{}\n", base, extra),
        _ => base.to_string(),
    }
}

/// Build the render script source of one demo.
///
/// The demo code is registered under `name`; the docs site later calls the
/// pushed function with the element to render into as `mountNode`.
pub fn demo_render_source(name: &str, code: &str) -> Result<String, TranspileError> {
    let body = lower_imports(code)?;
    let name = serde_json::Value::String(name.to_string());

    Ok(format!(
        "window.demoNames.push({name});\nwindow.renderFuncs.push(function (mountNode) {{\n{body}\n}});\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_demo_code_in_render_function() {
        let source = demo_render_source(
            "basicUsage",
            "import { Button } from '@alifd/next';\nReactDOM.render(<Button />, mountNode);",
        )
        .unwrap();

        assert!(source.starts_with("window.demoNames.push(\"basicUsage\");"));
        assert!(source.contains("window.renderFuncs.push(function (mountNode) {"));
        assert!(source.contains("var Button = _import0[\"Button\"];"));
        assert!(!source.contains("import {"));
        assert!(source.trim_end().ends_with("});"));
    }

    #[test]
    fn appends_extra_global_control() {
        let source = global_control_source("base();", Some("extra();"));
        assert_eq!(source, "base();\nextra();\n");

        assert_eq!(global_control_source("base();", Some("  ")), "base();");
        assert_eq!(global_control_source("base();", None), "base();");
    }

    #[test]
    fn default_control_initialises_registries() {
        assert!(DEFAULT_GLOBAL_CONTROL.contains("window.demoNames = [];"));
        assert!(DEFAULT_GLOBAL_CONTROL.contains("window.renderFuncs = [];"));
    }

    #[test]
    fn default_control_uses_localized_messages() {
        assert!(DEFAULT_GLOBAL_CONTROL.contains("切换到在线编辑模式成功，点击代码区域即可编辑预览。"));
        assert!(DEFAULT_GLOBAL_CONTROL.contains("切换到预览模式成功，代码展示为只读模式。"));
        assert!(DEFAULT_GLOBAL_CONTROL.contains("切换到在线编辑模式失败，请联系管理员。"));
        assert!(DEFAULT_GLOBAL_CONTROL.contains("切换到预览模式失败，请联系管理员。"));
    }
}
