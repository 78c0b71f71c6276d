//! Utility functions shared across the crate.

use std::path::PathBuf;

/// Get the user's config directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// Extract the file extension from a filename or path, lowercased, without
/// the dot. Returns an empty string when there is none.
pub fn file_extension(path: &str) -> String {
    match path.rfind('.') {
        Some(idx) if idx + 1 < path.len() => path[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Filename without its extension.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Trim every entry and drop empty or whitespace-only strings.
pub fn clean_string_array(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("document.pdf"), "pdf");
        assert_eq!(file_extension("archive.tar.GZ"), "gz");
        assert_eq!(file_extension("no_extension"), "");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("document.pdf"), "document");
        assert_eq!(file_stem("no_extension"), "no_extension");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn test_clean_string_array() {
        let input = vec![
            "hello".to_string(),
            String::new(),
            "  ".to_string(),
            " world ".to_string(),
        ];
        assert_eq!(clean_string_array(&input), vec!["hello", "world"]);
    }

    #[test]
    fn test_clean_string_array_all_blank() {
        let input = vec![String::new(), "   ".to_string()];
        assert!(clean_string_array(&input).is_empty());
    }
}
