use crate::pipeline::ChangedFile;
use similar::TextDiff;
use std::collections::BTreeMap;

/// Placeholder written instead of an empty patch
pub const NO_CHANGES: &str = "# No source-file changes detected.\n";

const CONTEXT_LINES: usize = 3;

/// Unified diff of every changed file, in path order
#[must_use]
pub fn render_patch(changed: &BTreeMap<String, ChangedFile>) -> String {
    let mut out = String::new();
    for (path, file) in changed {
        let diff = TextDiff::from_lines(&file.original, &file.rewritten);
        let chunk = diff
            .unified_diff()
            .context_radius(CONTEXT_LINES)
            .header(path, path)
            .to_string();
        if chunk.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&chunk);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    if out.is_empty() {
        return NO_CHANGES.to_string();
    }
    out
}
