use crate::config::{ProjectPaths, TintConfig};
use ignore::WalkBuilder;
use std::path::PathBuf;
use tint_protocol::path_filters::path_allowed;

/// A file selected for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub path: PathBuf,
    /// Project-relative, `/`-separated
    pub rel_path: String,
}

/// Walk the source root (.gitignore aware, hidden files skipped) and keep
/// files matching the configured suffixes and exclusions, sorted by path.
pub(crate) fn discover(paths: &ProjectPaths, config: &TintConfig) -> Vec<Target> {
    let mut targets = Vec::new();

    let mut builder = WalkBuilder::new(&paths.source_root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false);

    for result in builder.build() {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                let path = entry.path();
                let rel_path = paths.relative(path);
                if !path_allowed(&rel_path, &config.suffixes, &config.exclude) {
                    continue;
                }
                targets.push(Target {
                    path: path.to_path_buf(),
                    rel_path,
                });
            }
            Err(e) => log::warn!("Failed to read entry: {e}"),
        }
    }

    targets.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    log::info!("Found {} files to scan", targets.len());
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn selects_by_suffix_and_exclusion() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let styles = root.join("ui/src/styles");
        fs::create_dir_all(&styles).unwrap();
        fs::create_dir_all(root.join("ui/src/components/.cache")).unwrap();

        for rel in [
            "ui/src/components/Button.tsx",
            "ui/src/components/Button.module.css",
            "ui/src/components/button.ts",
            "ui/src/components/.cache/Stale.tsx",
            "ui/src/styles/globals.css",
            "ui/src/styles/legacy.module.css",
            "ui/src/App.tsx",
        ] {
            fs::write(root.join(rel), "").unwrap();
        }

        let config = TintConfig {
            exclude: vec!["ui/src/styles/legacy.module.css".to_string()],
            ..TintConfig::default()
        };
        let paths = ProjectPaths::resolve(root, &config);
        let found: Vec<_> = discover(&paths, &config)
            .into_iter()
            .map(|t| t.rel_path)
            .collect();

        assert_eq!(
            found,
            vec![
                "ui/src/App.tsx",
                "ui/src/components/Button.module.css",
                "ui/src/components/Button.tsx",
            ]
        );
    }

    #[test]
    fn gitignored_files_are_skipped() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("ui/src/gen")).unwrap();
        fs::write(root.join("ui/src/.gitignore"), "gen/\n").unwrap();
        fs::write(root.join("ui/src/gen/Out.tsx"), "").unwrap();
        fs::write(root.join("ui/src/In.tsx"), "").unwrap();

        let config = TintConfig::default();
        let paths = ProjectPaths::resolve(root, &config);
        let found: Vec<_> = discover(&paths, &config)
            .into_iter()
            .map(|t| t.rel_path)
            .collect();
        assert_eq!(found, vec!["ui/src/In.tsx"]);
    }
}
