//! Filename rules
//!
//! Pure helpers used between upload and move:
//! - [`capitalize_and_clean`] collapses whitespace into camelCase and adds a
//!   missing extension
//! - [`extension_of`] derives the extension of the originally selected file
//! - [`is_invalid_filename`] flags names with whitespace or no extension
//! - [`suggest_directory`] picks a saved directory matching an extension

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Whitespace run followed by a single letter: the letter starts a new word.
static WORD_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+(\p{L})").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());

/// At least one character, a literal dot, at least one character.
static HAS_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+\..+$").unwrap());

/// Message shown before moving a file under a name flagged by [`is_invalid_filename`]
pub const INVALID_FILENAME_WARNING: &str = "The current filename seems to be invalid \
     (spaces or no extension). Are you sure you want to save it like this?";

/// Collapses whitespace into camelCase and appends a fallback extension
///
/// 1. Every whitespace run followed by a letter is removed and the letter
///    is upper-cased (`"my file name"` becomes `"myFileName"`).
/// 2. Any remaining whitespace is removed.
/// 3. If the result has no `name.ext` shape and the fallback extension is
///    non-empty after the same whitespace collapse, `.` + extension is
///    appended.
///
/// Applying it twice gives the same result as applying it once whenever the
/// name is not blank.
///
/// # Examples
///
/// ```
/// use simpleupload_core::domain::filename::capitalize_and_clean;
///
/// assert_eq!(capitalize_and_clean("my file name.txt", None), "myFileName.txt");
/// assert_eq!(capitalize_and_clean("report", Some("pdf")), "report.pdf");
/// ```
pub fn capitalize_and_clean(name: &str, fallback_extension: Option<&str>) -> String {
    let mut cleaned = collapse_whitespace(name);

    if !has_extension(&cleaned) {
        let ext = fallback_extension.map(collapse_whitespace).unwrap_or_default();
        if !ext.is_empty() {
            cleaned.push('.');
            cleaned.push_str(&ext);
        }
    }

    cleaned
}

fn collapse_whitespace(text: &str) -> String {
    let camel = WORD_BREAK.replace_all(text, |caps: &Captures| caps[1].to_uppercase());
    WHITESPACE.replace_all(&camel, "").into_owned()
}

/// Returns the extension of `name`, i.e. the part after the last `.`
///
/// A name without a dot has no extension. A trailing dot (`"archive."`)
/// also yields `None`.
pub fn extension_of(name: &str) -> Option<&str> {
    if !name.contains('.') {
        return None;
    }
    name.rsplit('.').next().filter(|ext| !ext.is_empty())
}

/// Returns true if `name` matches `something.ext`
pub fn has_extension(name: &str) -> bool {
    HAS_EXTENSION.is_match(name)
}

/// Returns true if a non-empty `name` contains whitespace or has no extension
///
/// Empty names are never flagged here; moving requires a non-empty name
/// and rejects it separately.
pub fn is_invalid_filename(name: &str) -> bool {
    !name.is_empty() && (!has_extension(name) || WHITESPACE.is_match(name))
}

/// Picks the saved directory that best matches `extension`
///
/// Directories are scanned in list order. An entry equal to the extension
/// always becomes the suggestion, replacing an earlier substring match.
/// An entry that merely contains the extension is only taken while no
/// suggestion exists yet.
pub fn suggest_directory(dirs: &[String], extension: &str) -> Option<String> {
    if extension.is_empty() {
        return None;
    }

    let mut suggestion: Option<&String> = None;
    for dir in dirs {
        if dir == extension || (suggestion.is_none() && dir.contains(extension)) {
            suggestion = Some(dir);
        }
    }
    suggestion.cloned()
}
