//! Settings read from the `VARDUMP` environment variable.
//!
//! The variable holds comma-separated `name=value` items, for example
//! `VARDUMP=diagram=1,indent=4,glyphs=ascii`. Items that do not contain
//! exactly one `=` are skipped, and a later item overrides an earlier one
//! with the same name.
//!
//! | Name      | Effect on [`DumpStyle::from_env`]                        |
//! |-----------|----------------------------------------------------------|
//! | `pretty`  | `pretty_format`, as `1`/`true`/`yes`/`on` or the opposite |
//! | `diagram` | `enable_diagram`, same values as `pretty`                 |
//! | `indent`  | indent unit: a number of spaces, or `tab`                 |
//! | `head`    | `diagram_head_length`                                     |
//! | `glyphs`  | `ascii` or `unicode`                                      |
//!
//! Unrecognized values leave the corresponding option untouched.

use alloc::{borrow::Cow, string::String};
use std::sync::OnceLock;

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use crate::{DiagramGlyphs, DumpStyle};

/// Name of the environment variable.
pub const ENV_VAR: &str = "VARDUMP";

/// Parsed `name=value` items.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    items: HashMap<String, String, FxBuildHasher>,
}

impl Settings {
    /// Parses a raw settings string.
    ///
    /// ```
    /// use vardump::config::Settings;
    ///
    /// let settings = Settings::parse("a=1,broken,b=x=y,a=2");
    /// assert_eq!(settings.get("a"), Some("2"));
    /// assert_eq!(settings.get("b"), None);
    /// assert_eq!(settings.len(), 1);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut items = HashMap::default();
        for item in raw.split(',') {
            let mut parts = item.split('=');
            let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next())
            else {
                continue;
            };
            items.insert(String::from(name), String::from(value));
        }
        Self { items }
    }

    /// The settings of this process, parsed once on first use.
    pub fn from_env() -> &'static Self {
        static SETTINGS: OnceLock<Settings> = OnceLock::new();

        SETTINGS.get_or_init(|| match std::env::var_os(ENV_VAR) {
            Some(raw) => Self::parse(&raw.to_string_lossy()),
            None => Self::default(),
        })
    }

    /// The value of `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(String::as_str)
    }

    /// The value of `name`, or `default` when it is not set.
    #[must_use]
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The value of `name` in the process settings, or `default`.
///
/// ```
/// assert_eq!(vardump::config::setting("surely_not_set", "fallback"), "fallback");
/// ```
#[must_use]
pub fn setting(name: &str, default: &'static str) -> &'static str {
    Settings::from_env().get_or(name, default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_indent(value: &str) -> Option<Cow<'static, str>> {
    if value.eq_ignore_ascii_case("tab") {
        return Some(Cow::Borrowed("\t"));
    }
    let spaces: usize = value.parse().ok()?;
    Some(Cow::Owned(" ".repeat(spaces)))
}

impl DumpStyle {
    /// [`DumpStyle::PRINT`] with the overrides found in `settings`.
    ///
    /// ```
    /// use vardump::{DumpStyle, config::Settings};
    ///
    /// let style = DumpStyle::from_settings(&Settings::parse("indent=4,diagram=on"));
    /// assert_eq!(style.indent_unit, "    ");
    /// assert!(style.enable_diagram);
    /// ```
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let mut style = Self::PRINT;

        if let Some(pretty) = settings.get("pretty").and_then(parse_bool) {
            style.pretty_format = pretty;
        }
        if let Some(diagram) = settings.get("diagram").and_then(parse_bool) {
            style.enable_diagram = diagram;
        }
        if let Some(indent) = settings.get("indent").and_then(parse_indent) {
            style.indent_unit = indent;
        }
        if let Some(head) = settings.get("head").and_then(|v| v.parse().ok()) {
            style.diagram_head_length = head;
        }
        match settings.get("glyphs") {
            Some(v) if v.eq_ignore_ascii_case("ascii") => style.diagram_glyphs = DiagramGlyphs::ASCII,
            Some(v) if v.eq_ignore_ascii_case("unicode") => {
                style.diagram_glyphs = DiagramGlyphs::UNICODE;
            }
            _ => {}
        }

        style
    }

    /// [`DumpStyle::from_settings`] applied to the `VARDUMP` variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_settings(Settings::from_env())
    }
}
