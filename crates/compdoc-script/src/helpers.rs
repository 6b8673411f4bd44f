//! Inline definitions of the transform helpers referenced by compiled code.
//!
//! The transpiler emits helper calls as `babelHelpers.<name>(...)`. Demo
//! scripts run as plain inline scripts with no module loader, so the helpers
//! a script uses are defined in front of it:
//!
//! ```text
//! var babelHelpers = (function () {
//!   function _defineProperty(e, r, t) { ... }
//!   return { defineProperty: _defineProperty };
//! })();
//! ```

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::traits::TranspileError;

/// Global object the transpiler reads helpers from.
pub const HELPER_OBJECT: &str = "babelHelpers";

static HELPER_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bbabelHelpers\.([A-Za-z_$][\w$]*)").expect("Invalid helper reference regex")
});

struct HelperSource {
    /// Name used after `babelHelpers.`, or an internal name for dependencies
    name: &'static str,
    /// Function the definition declares
    function: &'static str,
    requires: &'static [&'static str],
    source: &'static str,
}

const HELPERS: &[HelperSource] = &[
    HelperSource {
        name: "toPrimitive",
        function: "_toPrimitive",
        requires: &[],
        source: r#"function _toPrimitive(t, r) {
  if ("object" != typeof t || !t) return t;
  var e = t[Symbol.toPrimitive];
  if (void 0 !== e) {
    var i = e.call(t, r || "default");
    if ("object" != typeof i) return i;
    throw new TypeError("@@toPrimitive must return a primitive value.");
  }
  return ("string" === r ? String : Number)(t);
}"#,
    },
    HelperSource {
        name: "toPropertyKey",
        function: "_toPropertyKey",
        requires: &["toPrimitive"],
        source: r#"function _toPropertyKey(t) {
  var i = _toPrimitive(t, "string");
  return "symbol" == typeof i ? i : i + "";
}"#,
    },
    HelperSource {
        name: "defineProperty",
        function: "_defineProperty",
        requires: &["toPropertyKey"],
        source: r#"function _defineProperty(e, r, t) {
  return (r = _toPropertyKey(r)) in e ? Object.defineProperty(e, r, { value: t, enumerable: !0, configurable: !0, writable: !0 }) : e[r] = t, e;
}"#,
    },
    HelperSource {
        name: "ownKeys",
        function: "_ownKeys",
        requires: &[],
        source: r#"function _ownKeys(e, r) {
  var t = Object.keys(e);
  if (Object.getOwnPropertySymbols) {
    var o = Object.getOwnPropertySymbols(e);
    r && (o = o.filter(function (r) { return Object.getOwnPropertyDescriptor(e, r).enumerable; })), t.push.apply(t, o);
  }
  return t;
}"#,
    },
    HelperSource {
        name: "objectSpread2",
        function: "_objectSpread2",
        requires: &["ownKeys", "defineProperty"],
        source: r#"function _objectSpread2(e) {
  for (var r = 1; r < arguments.length; r++) {
    var t = null != arguments[r] ? arguments[r] : {};
    r % 2 ? _ownKeys(Object(t), !0).forEach(function (r) { _defineProperty(e, r, t[r]); }) : Object.getOwnPropertyDescriptors ? Object.defineProperties(e, Object.getOwnPropertyDescriptors(t)) : _ownKeys(Object(t)).forEach(function (r) { Object.defineProperty(e, r, Object.getOwnPropertyDescriptor(t, r)); });
  }
  return e;
}"#,
    },
    HelperSource {
        name: "extends",
        function: "_extends",
        requires: &[],
        source: r#"function _extends() {
  return _extends = Object.assign ? Object.assign.bind() : function (n) {
    for (var e = 1; e < arguments.length; e++) {
      var t = arguments[e];
      for (var r in t) ({}).hasOwnProperty.call(t, r) && (n[r] = t[r]);
    }
    return n;
  }, _extends.apply(null, arguments);
}"#,
    },
    HelperSource {
        name: "objectWithoutPropertiesLoose",
        function: "_objectWithoutPropertiesLoose",
        requires: &[],
        source: r#"function _objectWithoutPropertiesLoose(r, e) {
  if (null == r) return {};
  var t = {};
  for (var n in r) if ({}.hasOwnProperty.call(r, n)) {
    if (-1 !== e.indexOf(n)) continue;
    t[n] = r[n];
  }
  return t;
}"#,
    },
    HelperSource {
        name: "objectWithoutProperties",
        function: "_objectWithoutProperties",
        requires: &["objectWithoutPropertiesLoose"],
        source: r#"function _objectWithoutProperties(e, t) {
  if (null == e) return {};
  var o, r, i = _objectWithoutPropertiesLoose(e, t);
  if (Object.getOwnPropertySymbols) {
    var n = Object.getOwnPropertySymbols(e);
    for (r = 0; r < n.length; r++) o = n[r], -1 === t.indexOf(o) && {}.propertyIsEnumerable.call(e, o) && (i[o] = e[o]);
  }
  return i;
}"#,
    },
    HelperSource {
        name: "objectDestructuringEmpty",
        function: "_objectDestructuringEmpty",
        requires: &[],
        source: r#"function _objectDestructuringEmpty(t) {
  if (null == t) throw new TypeError("Cannot destructure " + t);
}"#,
    },
    HelperSource {
        name: "asyncGeneratorStep",
        function: "_asyncGeneratorStep",
        requires: &[],
        source: r#"function _asyncGeneratorStep(n, t, e, r, o, a, c) {
  try {
    var i = n[a](c), u = i.value;
  } catch (n) {
    return void e(n);
  }
  i.done ? t(u) : Promise.resolve(u).then(r, o);
}"#,
    },
    HelperSource {
        name: "asyncToGenerator",
        function: "_asyncToGenerator",
        requires: &["asyncGeneratorStep"],
        source: r#"function _asyncToGenerator(n) {
  return function () {
    var t = this, e = arguments;
    return new Promise(function (r, o) {
      var a = n.apply(t, e);
      function _next(n) { _asyncGeneratorStep(a, r, o, _next, _throw, "next", n); }
      function _throw(n) { _asyncGeneratorStep(a, r, o, _next, _throw, "throw", n); }
      _next(void 0);
    });
  };
}"#,
    },
    HelperSource {
        name: "checkPrivateRedeclaration",
        function: "_checkPrivateRedeclaration",
        requires: &[],
        source: r#"function _checkPrivateRedeclaration(e, t) {
  if (t.has(e)) throw new TypeError("Cannot initialize the same private elements twice on an object");
}"#,
    },
    HelperSource {
        name: "classPrivateFieldInitSpec",
        function: "_classPrivateFieldInitSpec",
        requires: &["checkPrivateRedeclaration"],
        source: r#"function _classPrivateFieldInitSpec(e, t, a) {
  _checkPrivateRedeclaration(e, t), t.set(e, a);
}"#,
    },
    HelperSource {
        name: "classPrivateMethodInitSpec",
        function: "_classPrivateMethodInitSpec",
        requires: &["checkPrivateRedeclaration"],
        source: r#"function _classPrivateMethodInitSpec(e, a) {
  _checkPrivateRedeclaration(e, a), a.add(e);
}"#,
    },
    HelperSource {
        name: "assertClassBrand",
        function: "_assertClassBrand",
        requires: &[],
        source: r#"function _assertClassBrand(e, t, n) {
  if ("function" == typeof e ? e === t : e.has(t)) return arguments.length < 3 ? t : n;
  throw new TypeError("Private element is not present on this object");
}"#,
    },
    HelperSource {
        name: "classPrivateFieldGet2",
        function: "_classPrivateFieldGet2",
        requires: &["assertClassBrand"],
        source: r#"function _classPrivateFieldGet2(s, a) {
  return s.get(_assertClassBrand(s, a));
}"#,
    },
    HelperSource {
        name: "classPrivateFieldSet2",
        function: "_classPrivateFieldSet2",
        requires: &["assertClassBrand"],
        source: r#"function _classPrivateFieldSet2(s, a, r) {
  return s.set(_assertClassBrand(s, a), r), r;
}"#,
    },
    HelperSource {
        name: "toSetter",
        function: "_toSetter",
        requires: &[],
        source: r#"function _toSetter(t, e, n) {
  e || (e = []);
  var r = e.length++;
  return Object.defineProperty({}, "_", {
    set: function (o) { e[r] = o, t.apply(n, e); }
  });
}"#,
    },
    HelperSource {
        name: "classPrivateFieldLooseKey",
        function: "_classPrivateFieldLooseKey",
        requires: &[],
        source: r#"function _classPrivateFieldLooseKey(e) {
  _classPrivateFieldLooseKey.id = (_classPrivateFieldLooseKey.id || 0) + 1;
  return "__private_" + _classPrivateFieldLooseKey.id + "_" + e;
}"#,
    },
    HelperSource {
        name: "classPrivateFieldLooseBase",
        function: "_classPrivateFieldLooseBase",
        requires: &[],
        source: r#"function _classPrivateFieldLooseBase(e, t) {
  if (!{}.hasOwnProperty.call(e, t)) throw new TypeError("attempted to use private field on non-instance");
  return e;
}"#,
    },
    HelperSource {
        name: "readOnlyError",
        function: "_readOnlyError",
        requires: &[],
        source: r#"function _readOnlyError(r) {
  throw new TypeError('"' + r + '" is read-only');
}"#,
    },
    HelperSource {
        name: "writeOnlyError",
        function: "_writeOnlyError",
        requires: &[],
        source: r#"function _writeOnlyError(r) {
  throw new TypeError('"' + r + '" is write-only');
}"#,
    },
    HelperSource {
        name: "checkInRHS",
        function: "_checkInRHS",
        requires: &[],
        source: r#"function _checkInRHS(e) {
  if (Object(e) !== e) throw TypeError("right-hand side of 'in' should be an object, got " + (null !== e ? typeof e : "null"));
  return e;
}"#,
    },
    HelperSource {
        name: "getPrototypeOf",
        function: "_getPrototypeOf",
        requires: &[],
        source: r#"function _getPrototypeOf(t) {
  return _getPrototypeOf = Object.setPrototypeOf ? Object.getPrototypeOf.bind() : function (t) {
    return t.__proto__ || Object.getPrototypeOf(t);
  }, _getPrototypeOf(t);
}"#,
    },
    HelperSource {
        name: "superPropBase",
        function: "_superPropBase",
        requires: &["getPrototypeOf"],
        source: r#"function _superPropBase(t, o) {
  for (; !{}.hasOwnProperty.call(t, o) && null !== (t = _getPrototypeOf(t)););
  return t;
}"#,
    },
    HelperSource {
        name: "get",
        function: "_get",
        requires: &["superPropBase"],
        source: r#"function _get() {
  return _get = "undefined" != typeof Reflect && Reflect.get ? Reflect.get.bind() : function (e, t, r) {
    var p = _superPropBase(e, t);
    if (p) {
      var n = Object.getOwnPropertyDescriptor(p, t);
      return n.get ? n.get.call(arguments.length < 3 ? e : r) : n.value;
    }
  }, _get.apply(null, arguments);
}"#,
    },
    HelperSource {
        name: "superPropGet",
        function: "_superPropGet",
        requires: &["get", "getPrototypeOf"],
        source: r#"function _superPropGet(t, o, e, r) {
  var p = _get(_getPrototypeOf(1 & r ? t.prototype : t), o, e);
  return 2 & r && "function" == typeof p ? function (t) { return p.apply(e, t); } : p;
}"#,
    },
    HelperSource {
        name: "reflectSet",
        function: "_reflectSet",
        requires: &["superPropBase", "defineProperty"],
        source: r#"function _reflectSet(e, r, t, o) {
  return _reflectSet = "undefined" != typeof Reflect && Reflect.set ? Reflect.set : function (e, r, t, o) {
    var f, i = _superPropBase(e, r);
    if (i) {
      if ((f = Object.getOwnPropertyDescriptor(i, r)).set) return f.set.call(o, t), !0;
      if (!f.writable) return !1;
    }
    if (f = Object.getOwnPropertyDescriptor(o, r)) {
      if (!f.writable) return !1;
      f.value = t, Object.defineProperty(o, r, f);
    } else _defineProperty(o, r, t);
    return !0;
  }, _reflectSet(e, r, t, o);
}"#,
    },
    HelperSource {
        name: "set",
        function: "_set",
        requires: &["reflectSet"],
        source: r#"function _set(e, r, t, o, f) {
  if (!_reflectSet(e, r, t, o || e) && f) throw new TypeError("failed to set property");
  return t;
}"#,
    },
    HelperSource {
        name: "superPropSet",
        function: "_superPropSet",
        requires: &["set", "getPrototypeOf"],
        source: r#"function _superPropSet(t, e, o, r, p, f) {
  return _set(_getPrototypeOf(f ? t.prototype : t), e, o, r, p);
}"#,
    },
];

fn lookup(name: &str) -> Option<&'static HelperSource> {
    HELPERS.iter().find(|h| h.name == name)
}

/// Names of the helpers `code` references, sorted.
pub fn referenced_helpers(code: &str) -> BTreeSet<&str> {
    HELPER_REF_RE
        .captures_iter(code)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Prepend definitions of every helper `code` references.
///
/// Code without helper references is returned unchanged. A helper with no
/// inline definition (async generators, decorators, `using`) is an error, so
/// no script ships with an unresolved reference.
pub fn inline_helpers(code: &str) -> Result<String, TranspileError> {
    let used = referenced_helpers(code);
    if used.is_empty() {
        return Ok(code.to_string());
    }

    let mut roots = Vec::new();
    for name in &used {
        let helper = lookup(name).ok_or_else(|| {
            TranspileError::TransformError(format!("no inline definition for helper '{}'", name))
        })?;
        roots.push(helper);
    }

    // Dependencies before dependents, each once.
    let mut ordered = Vec::new();
    for helper in roots.iter().copied() {
        push_with_requires(helper, &mut ordered);
    }

    let mut out = format!("var {} = (function () {{\n", HELPER_OBJECT);
    for helper in &ordered {
        out.push_str(helper.source);
        out.push('\n');
    }
    let exports: Vec<String> = roots
        .iter()
        .map(|h| format!("{}: {}", h.name, h.function))
        .collect();
    out.push_str(&format!("return {{ {} }};\n}})();\n", exports.join(", ")));
    out.push_str(code);
    Ok(out)
}

fn push_with_requires(helper: &'static HelperSource, ordered: &mut Vec<&'static HelperSource>) {
    if ordered.iter().any(|h| h.name == helper.name) {
        return;
    }
    for dep in helper.requires {
        if let Some(dep) = lookup(dep) {
            push_with_requires(dep, ordered);
        }
    }
    ordered.push(helper);
}
