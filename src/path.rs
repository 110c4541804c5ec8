/// Convert native path separators to `/`.
///
/// Rule patterns and diagnostic paths both go through this before they are
/// compared, so `src\main.c` and `src/main.c` name the same file.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_become_slashes() {
        assert_eq!(normalize(r"C:\dir\file.cpp"), "C:/dir/file.cpp");
    }

    #[test]
    fn test_forward_slashes_untouched() {
        assert_eq!(normalize("src/lib/a.c"), "src/lib/a.c");
        assert_eq!(normalize(""), "");
    }
}
