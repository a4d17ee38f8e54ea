#![allow(dead_code)]

//! Cross-platform artifact naming. The exported file is named from the
//! document owner's display name, so whatever the user typed has to become
//! a legal filename on Windows, macOS and Linux.

const MAX_STEM_LEN: usize = 120;

/// Windows reserved device names; a bare match gets a leading underscore.
const RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitizes a display name into a filename stem. Empty or unusable input
/// falls back to `resume`.
pub fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Leading/trailing spaces and dots are problematic on Windows.
    let mut stem: &str = cleaned.trim_matches(|c| c == ' ' || c == '.');

    if stem.chars().count() > MAX_STEM_LEN {
        let end = stem
            .char_indices()
            .nth(MAX_STEM_LEN)
            .map(|(i, _)| i)
            .unwrap_or(stem.len());
        stem = &stem[..end];
    }

    if stem.is_empty() {
        return "resume".to_string();
    }
    if RESERVED.iter().any(|r| stem.eq_ignore_ascii_case(r)) {
        return format!("_{stem}");
    }
    stem.to_string()
}
