//! Path handling: `~` expansion and the output naming convention.

use std::path::PathBuf;

/// Expands a leading `~` or `~/` to the user's home directory.
///
/// Anything else (including `~user` forms) is passed through unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Output filename: `{methodArgOrBicubic}_scaled_{scale}x_{inputPath}`,
/// relative to the current working directory.
///
/// Two deliberate quirks of the convention, kept for compatibility:
/// the input path string is embedded as given (not just its basename), and
/// the method token is the raw `--method` argument even when policy
/// resolution fell back to bicubic for an unrecognized name.
pub fn output_name(method_arg: Option<&str>, scale: u32, input_path: &str) -> String {
    format!(
        "{}_scaled_{}x_{}",
        method_arg.unwrap_or("bicubic"),
        scale,
        input_path
    )
}
