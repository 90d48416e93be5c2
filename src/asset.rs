use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tracing::warn;

pub const DEFAULT_LOGO_HEIGHT: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "snake_case")]
pub enum ImageSource {
    /// Network or `data:` reference, passed through unchanged.
    Remote(String),
    /// Local file inlined as a `data:` URI.
    Embedded(String),
    Placeholder,
}

impl ImageSource {
    pub fn as_src(&self) -> &str {
        match self {
            Self::Remote(src) | Self::Embedded(src) => src,
            Self::Placeholder => "",
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// A logo that could not be read. Rendering goes on with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetResolutionWarning {
    pub logo_ref: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub source: ImageSource,
    pub warning: Option<AssetResolutionWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct AssetResolver {
    base_dir: Option<PathBuf>,
}

impl AssetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative local references are looked up under `dir`.
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    pub fn resolve(&self, logo_ref: &str) -> Resolved {
        let trimmed = logo_ref.trim();
        if trimmed.is_empty() {
            return Resolved {
                source: ImageSource::Placeholder,
                warning: None,
            };
        }
        if is_remote(trimmed) {
            return Resolved {
                source: ImageSource::Remote(trimmed.to_string()),
                warning: None,
            };
        }

        let path = self.local_path(trimmed);
        match fs::read(&path) {
            Ok(bytes) => Resolved {
                source: ImageSource::Embedded(data_uri(&path, &bytes)),
                warning: None,
            },
            Err(err) => {
                warn!(logo_ref = trimmed, path = %path.display(), "logo unreadable: {err}");
                Resolved {
                    source: ImageSource::Placeholder,
                    warning: Some(AssetResolutionWarning {
                        logo_ref: trimmed.to_string(),
                        reason: format!("{}: {err}", path.display()),
                    }),
                }
            }
        }
    }

    fn local_path(&self, logo_ref: &str) -> PathBuf {
        let raw = logo_ref.strip_prefix("file://").unwrap_or(logo_ref);
        let path = Path::new(raw);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn is_remote(logo_ref: &str) -> bool {
    let lower = logo_ref.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
}

fn data_uri(path: &Path, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(path), STANDARD.encode(bytes))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// `<img>` fragment for a logo column. Placeholders render as an empty string.
pub fn logo_html(source: &ImageSource, height: u32) -> String {
    if source.is_placeholder() {
        return String::new();
    }
    format!(
        r#"<img src="{}" height="{height}">"#,
        escape_attr(source.as_src())
    )
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
