//! Attachment filenames
//!
//! Client-supplied names are reduced to a safe ASCII subset before they touch
//! the filesystem, then prefixed with a unique token so two uploads with the
//! same name never share a path.

use serde::Serialize;
use std::fmt;

/// Name used when nothing survives sanitization
const FALLBACK_NAME: &str = "attachment";

/// Longest sanitized client name kept in a stored filename
const MAX_CLIENT_NAME_LEN: usize = 200;

const WINDOWS_DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Reduce a client filename to something safe to join onto the upload directory.
///
/// Path separators become word breaks, whitespace runs collapse to `_`,
/// anything outside `[A-Za-z0-9_.-]` is dropped, runs of dots collapse to one
/// and leading/trailing dots and underscores are trimmed. The result never
/// contains a path component.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let mut cleaned = String::with_capacity(joined.len());
    for c in joined.chars().filter(|c| is_safe_char(*c)) {
        if c == '.' && cleaned.ends_with('.') {
            continue;
        }
        cleaned.push(c);
    }
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let stem = trimmed.split('.').next().unwrap_or_default().to_ascii_uppercase();
    if WINDOWS_DEVICE_NAMES.contains(&stem.as_str()) {
        return format!("_{trimmed}");
    }

    trimmed.to_string()
}

/// Name of an attachment as written inside the upload directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StoredFilename(String);

impl StoredFilename {
    /// Build the on-disk name for an upload: `<unique>_<sanitized client name>`
    ///
    /// Overlong client names keep their tail so the extension survives.
    pub fn generate(unique: impl fmt::Display, client_name: &str) -> Self {
        let safe = secure_filename(client_name);
        let tail = &safe[safe.len().saturating_sub(MAX_CLIENT_NAME_LEN)..];
        Self(format!("{unique}_{tail}"))
    }

    /// Accept a name coming back from a URL only if it could have been produced by `generate`
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= 255
            && raw.chars().all(is_safe_char)
            && !raw.starts_with('.')
            && !raw.contains("..");

        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoredFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoredFilename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
