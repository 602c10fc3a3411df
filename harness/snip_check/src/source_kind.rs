use std::path::Path;

/// Language a snippet is written in, taken from its file extension.
///
/// `tsc` decides how to check a file by its name, so the generated
/// project keeps the snippet's extension.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SourceKind {
    #[default]
    Ts,
    Tsx,
    Js,
}

impl SourceKind {
    /// Kind for `path`, or `None` if it is not a snippet file.
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        match path.extension()?.to_str()? {
            "ts" => Some(SourceKind::Ts),
            "tsx" => Some(SourceKind::Tsx),
            "js" => Some(SourceKind::Js),
            _ => None,
        }
    }

    /// File name the snippet gets inside a generated project.
    pub fn file_name(self) -> &'static str {
        match self {
            SourceKind::Ts => "snippet.ts",
            SourceKind::Tsx => "snippet.tsx",
            SourceKind::Js => "snippet.js",
        }
    }

    pub fn is_js(self) -> bool {
        self == SourceKind::Js
    }
}
