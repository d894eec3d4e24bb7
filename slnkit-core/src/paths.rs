//! Path normalisation between platform paths and the document form.
//!
//! Every path stored in a solution document is relative to the solution
//! directory and uses forward slashes, e.g. `libA/libA.proj`. All helpers are
//! lexical; none of them touch the filesystem.

use std::path::{Component, Path, PathBuf};

/// Converts a path to document form: `/` separators, no `.` segments.
pub fn to_document_path(path: impl AsRef<Path>) -> String {
    let raw = path.as_ref().to_string_lossy().replace('\\', "/");
    let absolute = raw.starts_with('/');
    let segments: Vec<&str> = raw
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Document form of a stored reference with `.` and `..` collapsed, so two
/// spellings of the same path compare equal.
pub fn canonical_reference(reference: &str) -> String {
    to_document_path(normalize(&to_platform_path(reference)))
}

/// Converts a document-form path to a native path.
pub fn to_platform_path(document_path: &str) -> PathBuf {
    let unified = document_path.replace('\\', "/");
    let mut path = if unified.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };
    for segment in unified.split('/').filter(|s| !s.is_empty() && *s != ".") {
        path.push(segment);
    }
    path
}

/// Collapses `.` and `..` segments. Leading `..` of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// Path of `target` relative to the directory `base`.
///
/// Returns `target` unchanged when the two have no common root (e.g. two
/// Windows drives), and `.` when they are the same path.
pub fn make_relative(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);
    if base.has_root() != target.has_root() {
        return target;
    }

    let base_parts: Vec<_> = base.components().collect();
    let target_parts: Vec<_> = target.components().collect();
    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if base.has_root() && common == 0 {
        return target;
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

/// Extension of a reference without the leading dot.
pub fn extension_of(reference: &str) -> Option<String> {
    to_platform_path(reference)
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tmp/../app/app.proj", "app/app.proj")]
    #[case("./a/./b/../c.proj", "a/c.proj")]
    #[case("..\\shared\\x.proj", "../shared/x.proj")]
    #[case("libA/libA.proj", "libA/libA.proj")]
    fn canonical_reference_collapses_dots(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(canonical_reference(input), expected);
    }

    #[rstest]
    #[case("libA/libA.proj", "libA/libA.proj")]
    #[case("libA\\libA.proj", "libA/libA.proj")]
    #[case("./app//app.proj", "app/app.proj")]
    #[case("../shared/x.proj", "../shared/x.proj")]
    fn document_path_form(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_document_path(input), expected);
    }

    #[test]
    fn platform_path_from_document() {
        let p = to_platform_path("libA/src/libA.proj");
        assert_eq!(p, Path::new("libA").join("src").join("libA.proj"));
    }

    #[test]
    fn normalize_collapses_segments() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("../x/../y")), PathBuf::from("../y"));
    }

    #[rstest]
    #[case("/work/sln", "/work/sln/libA/libA.proj", "libA/libA.proj")]
    #[case("/work/sln", "/work/shared/x.proj", "../shared/x.proj")]
    #[case("/work/sln/", "/work/sln/app.proj", "app.proj")]
    fn relative_paths(#[case] base: &str, #[case] target: &str, #[case] expected: &str) {
        let rel = make_relative(Path::new(base), Path::new(target));
        assert_eq!(to_document_path(&rel), expected);
    }

    #[test]
    fn relative_to_itself_is_dot() {
        let rel = make_relative(Path::new("/work/sln"), Path::new("/work/sln"));
        assert_eq!(rel, PathBuf::from("."));
    }

    #[test]
    fn extension_without_dot() {
        assert_eq!(extension_of("app/app.proj").as_deref(), Some("proj"));
        assert_eq!(extension_of("Makefile"), None);
    }
}
