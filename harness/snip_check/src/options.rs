//! Recognized checker options and their defaults.

use snip_diagnostic::HarnessError;
use snip_ir::{OptionValue, Overlay};

/// Value kind an option accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Str,
}

impl OptionKind {
    fn accepts(self, value: &OptionValue) -> bool {
        matches!(
            (self, value),
            (OptionKind::Bool, OptionValue::Bool(_)) | (OptionKind::Str, OptionValue::Str(_))
        )
    }

    fn describe(self) -> &'static str {
        match self {
            OptionKind::Bool => "a boolean",
            OptionKind::Str => "a string",
        }
    }
}

/// Options a snippet overlay may set.
pub const KNOWN_OPTIONS: &[(&str, OptionKind)] = &[
    ("allowJs", OptionKind::Bool),
    ("checkJs", OptionKind::Bool),
    ("esModuleInterop", OptionKind::Bool),
    ("exactOptionalPropertyTypes", OptionKind::Bool),
    ("experimentalDecorators", OptionKind::Bool),
    ("jsx", OptionKind::Str),
    ("module", OptionKind::Str),
    ("moduleResolution", OptionKind::Str),
    ("noEmit", OptionKind::Bool),
    ("noImplicitAny", OptionKind::Bool),
    ("noImplicitReturns", OptionKind::Bool),
    ("noImplicitThis", OptionKind::Bool),
    ("noUncheckedIndexedAccess", OptionKind::Bool),
    ("skipLibCheck", OptionKind::Bool),
    ("strict", OptionKind::Bool),
    ("strictFunctionTypes", OptionKind::Bool),
    ("strictNullChecks", OptionKind::Bool),
    ("strictPropertyInitialization", OptionKind::Bool),
    ("target", OptionKind::Str),
];

/// Kind of a recognized option, or `None` if the name is unknown.
pub fn option_kind(name: &str) -> Option<OptionKind> {
    KNOWN_OPTIONS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, kind)| *kind)
}

fn validate(overlay: &Overlay) -> Result<(), HarnessError> {
    for (name, value) in overlay.iter() {
        let Some(kind) = option_kind(name) else {
            return Err(HarnessError::invocation(format!(
                "unrecognized checker option `{name}`"
            )));
        };
        if !kind.accepts(value) {
            return Err(HarnessError::invocation(format!(
                "checker option `{name}` expects {}, found {value}",
                kind.describe()
            )));
        }
    }
    Ok(())
}

/// A complete set of checker options.
///
/// The run-wide base is built once and never mutated while snippets are
/// being checked; each snippet gets its own copy via
/// [`CompilerOptions::with_overlay`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerOptions {
    values: Overlay,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions::defaults()
    }
}

impl CompilerOptions {
    /// Strict-mode defaults matching how the book's examples are written.
    pub fn defaults() -> Self {
        let values = Overlay::new()
            .with("strict", OptionValue::Bool(true))
            .with("noEmit", OptionValue::Bool(true))
            .with("skipLibCheck", OptionValue::Bool(true))
            .with("target", OptionValue::Str("es2022".to_string()))
            .with("module", OptionValue::Str("esnext".to_string()));
        CompilerOptions { values }
    }

    /// Validate `overlay` and merge it in, overlay values winning.
    ///
    /// Nothing is applied if any entry is invalid.
    pub fn apply(&mut self, overlay: &Overlay) -> Result<(), HarnessError> {
        validate(overlay)?;
        for (name, value) in overlay.iter() {
            self.values.set(name, value.clone());
        }
        Ok(())
    }

    /// A copy of these options with `overlay` applied. `self` is untouched.
    pub fn with_overlay(&self, overlay: Option<&Overlay>) -> Result<CompilerOptions, HarnessError> {
        let mut options = self.clone();
        if let Some(overlay) = overlay {
            options.apply(overlay)?;
        }
        Ok(options)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Set an option without validation, for values the checker itself
    /// requires.
    pub(crate) fn set(&mut self, name: &str, value: OptionValue) {
        self.values.set(name, value);
    }

    /// Whether a boolean option is set to `true`.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_bool) == Some(true)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> + '_ {
        self.values.iter()
    }

    /// The `compilerOptions` object of a generated `tsconfig.json`.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .values
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    OptionValue::Bool(b) => serde_json::Value::Bool(*b),
                    OptionValue::Str(s) => serde_json::Value::String(s.clone()),
                };
                (name.to_string(), value)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}
