use std::path::{Path, PathBuf};

/// Output path for a clip captioned `text`.
///
/// An explicit `output` is returned unchanged. Otherwise the text is reduced to word characters,
/// whitespace and hyphens, trimmed, whitespace runs become single hyphens, and `.mp4` is appended.
pub fn generate_output_filename(text: &str, output: Option<&Path>) -> PathBuf {
    if let Some(output) = output {
        return output.to_path_buf();
    }
    let safe: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    let stem = safe.split_whitespace().collect::<Vec<_>>().join("-");
    PathBuf::from(format!("{stem}.mp4"))
}
