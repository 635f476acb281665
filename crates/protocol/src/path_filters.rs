/// Check whether a project-relative path should be scanned.
///
/// The path must end in one of `suffixes` and must not fall under any entry
/// of `exclude`. Exclusion entries are path prefixes matched on whole
/// components, or glob patterns when they contain `*` or `?`.
pub fn path_allowed(rel_path: &str, suffixes: &[String], exclude: &[String]) -> bool {
    let rel_path = rel_path.replace('\\', "/");

    if !suffixes
        .iter()
        .map(|s| s.trim())
        .any(|s| !s.is_empty() && rel_path.ends_with(s))
    {
        return false;
    }

    !is_excluded(&rel_path, exclude)
}

pub fn is_excluded(rel_path: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|entry| {
        let normalized = normalize_filter_path(entry);
        if normalized.is_empty() {
            return false;
        }
        if normalized.contains('*') || normalized.contains('?') {
            return glob::Pattern::new(&normalized)
                .map(|p| p.matches(rel_path))
                .unwrap_or(false);
        }
        path_prefix_matches_normalized(&normalized, rel_path)
    })
}

/// Project-relative form of a configured path: `/`-separated, no leading `./`
pub fn normalize_filter_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while value.starts_with("./") {
        value = value[2..].to_string();
    }
    let value = value.trim_matches('/');
    if value == "." {
        return String::new();
    }
    value.to_string()
}

fn path_prefix_matches_normalized(prefix: &str, path: &str) -> bool {
    if path == prefix {
        return true;
    }

    if !path.starts_with(prefix) {
        return false;
    }

    path.as_bytes().get(prefix.len()) == Some(&b'/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn suffix_is_required() {
        let suffixes = strings(&[".module.css", ".tsx"]);
        assert!(path_allowed("ui/src/a.module.css", &suffixes, &[]));
        assert!(path_allowed("ui/src/A.tsx", &suffixes, &[]));
        assert!(!path_allowed("ui/src/plain.css", &suffixes, &[]));
        assert!(!path_allowed("ui/src/a.ts", &suffixes, &[]));
    }

    #[test]
    fn exclusion_is_prefix_match_on_components() {
        let suffixes = strings(&[".module.css"]);
        let exclude = strings(&["ui/src/styles/globals.module.css", "./ui/src/legacy/"]);
        assert!(!path_allowed("ui/src/styles/globals.module.css", &suffixes, &exclude));
        assert!(!path_allowed("ui/src/legacy/old.module.css", &suffixes, &exclude));
        assert!(path_allowed("ui/src/legacy2/new.module.css", &suffixes, &exclude));
    }

    #[test]
    fn exclusion_supports_globs() {
        let suffixes = strings(&[".tsx"]);
        let exclude = strings(&["ui/src/**/*.stories.tsx"]);
        assert!(!path_allowed("ui/src/a/Button.stories.tsx", &suffixes, &exclude));
        assert!(path_allowed("ui/src/a/Button.tsx", &suffixes, &exclude));
    }

    #[test]
    fn windows_separators_are_normalized() {
        let suffixes = strings(&[".tsx"]);
        let exclude = strings(&["ui\\src\\gen"]);
        assert!(!path_allowed("ui\\src\\gen\\A.tsx", &suffixes, &exclude));
    }

    #[test]
    fn filter_paths_are_normalized() {
        assert_eq!(normalize_filter_path(" ./ui\\src/gen/ "), "ui/src/gen");
        assert_eq!(normalize_filter_path("././ui/"), "ui");
        assert_eq!(normalize_filter_path("."), "");
        assert_eq!(normalize_filter_path("/"), "");
    }

    #[test]
    fn blank_entries_are_ignored() {
        let suffixes = strings(&["", " "]);
        assert!(!path_allowed("a.tsx", &suffixes, &[]));
        assert!(!is_excluded("a.tsx", &strings(&["", "."])));
    }
}
