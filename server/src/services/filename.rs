//! Upload filename checks and sanitization.

use regex::Regex;
use std::sync::LazyLock;

/// Extensions accepted by the upload endpoint (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

static RE_UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

/// True if the text after the last `.` is an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    filename.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    })
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// Non-ASCII characters are dropped, path separators become spaces,
/// whitespace runs become `_`, anything outside `[A-Za-z0-9_.-]` is removed
/// and leading/trailing `.`/`_` are stripped. The result may be empty.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename.chars().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    RE_UNSAFE_CHARS
        .replace_all(&joined, "")
        .trim_matches(['.', '_'])
        .to_string()
}

/// True for a bare file name that cannot escape its directory.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_file_checks_last_extension() {
        assert!(allowed_file("photo.png"));
        assert!(allowed_file("photo.JPG"));
        assert!(allowed_file("archive.tar.jpeg"));
        assert!(allowed_file("anim.gif"));
        assert!(!allowed_file("photo.png.exe"));
        assert!(!allowed_file("photo.bmp"));
        assert!(!allowed_file("png"));
        assert!(!allowed_file(""));
    }

    #[test]
    fn secure_filename_joins_whitespace() {
        assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
    }

    #[test]
    fn secure_filename_flattens_paths() {
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("..\\..\\boot.ini"), "boot.ini");
    }

    #[test]
    fn secure_filename_drops_unsafe_characters() {
        assert_eq!(secure_filename("we<ird>|na*me?.png"), "weirdname.png");
        assert_eq!(secure_filename("zdjęcie.png"), "zdjcie.png");
        assert_eq!(secure_filename("._hidden.png_"), "hidden.png");
    }

    #[test]
    fn secure_filename_can_be_empty() {
        assert_eq!(secure_filename("..."), "");
        assert_eq!(secure_filename("日本"), "");
    }

    #[test]
    fn plain_names_only() {
        assert!(is_plain_name("abc_merged.png"));
        assert!(!is_plain_name(""));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name("../secret.png"));
        assert!(!is_plain_name("dir\\file.png"));
    }
}
