use crate::config::TintConfig;
use std::collections::{BTreeMap, BTreeSet};
use tint_protocol::{
    ColorMap, MappingRow, OccurrenceRow, ReportMeta, ReportScope, REPORT_SCHEMA_VERSION,
};
use tint_rewrite::RunOutcome;
use tint_tokens::{Assignment, TokenNaming, TokenSource};

fn token_and_source(assignment: &Assignment, color: &str) -> (String, TokenSource) {
    (
        assignment.token_for(color).unwrap_or_default().to_string(),
        assignment
            .source_of(color)
            .unwrap_or(TokenSource::Generated),
    )
}

pub(crate) fn build_color_map(mode: &str, config: &TintConfig, outcome: &RunOutcome) -> ColorMap {
    let assignment = &outcome.assignment;

    let mappings = assignment
        .order
        .iter()
        .map(|color| {
            let (token, source) = token_and_source(assignment, color);
            MappingRow {
                normalized: color.clone(),
                token,
                source,
                occurrences: assignment.frequency.get(color).copied().unwrap_or(0),
            }
        })
        .collect();

    let mut occurrences: Vec<OccurrenceRow> = outcome
        .occurrences
        .iter()
        .map(|occ| {
            let (token, source) = token_and_source(assignment, &occ.normalized);
            OccurrenceRow {
                file: occ.file_path.clone(),
                line: occ.line,
                column: occ.column,
                raw: occ.raw.clone(),
                normalized: occ.normalized.clone(),
                context: occ.context.to_string(),
                token,
                source,
            }
        })
        .collect();
    occurrences.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.line.cmp(&b.line))
            .then(a.column.cmp(&b.column))
    });

    let mut excluded = config.exclude.clone();
    excluded.sort();

    ColorMap {
        meta: ReportMeta {
            schema_version: REPORT_SCHEMA_VERSION,
            mode: mode.to_string(),
            scope: ReportScope {
                root: config.source_root.clone(),
                suffixes: config.suffixes.clone(),
                excluded,
            },
            files_scanned: outcome.files_scanned,
            matches: outcome.occurrences.len(),
            unique_colors: assignment.unique_count(),
            reused_tokens: assignment.reused_count(),
            new_tokens: assignment.generated_count(),
        },
        mappings,
        occurrences,
    }
}

pub(crate) fn render_markdown(mode: &str, outcome: &RunOutcome, naming: &TokenNaming) -> String {
    let assignment = &outcome.assignment;
    let reference = |color: &str| naming.reference(assignment.token_for(color).unwrap_or_default());

    let mut raw_variants: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut raw_to_normalized: BTreeMap<&str, &str> = BTreeMap::new();
    for occ in &outcome.occurrences {
        raw_to_normalized.insert(&occ.raw, &occ.normalized);
        raw_variants.entry(&occ.normalized).or_default().insert(&occ.raw);
    }

    let mut md = String::new();
    md.push_str("# Color Tokenization Report\n\n");
    md.push_str("## Summary\n");
    md.push_str(&format!("- Mode: `{mode}`\n"));
    md.push_str(&format!("- Files scanned: `{}`\n", outcome.files_scanned));
    md.push_str(&format!(
        "- Files with matches: `{}`\n",
        outcome.files_with_matches()
    ));
    md.push_str(&format!(
        "- Total color matches: `{}`\n",
        outcome.occurrences.len()
    ));
    md.push_str(&format!(
        "- Unique normalized colors: `{}`\n",
        assignment.unique_count()
    ));
    md.push_str(&format!(
        "- Reused existing tokens: `{}`\n",
        assignment.reused_count()
    ));
    md.push_str(&format!(
        "- New generated tokens: `{}`\n\n",
        assignment.generated_count()
    ));

    md.push_str("## Top Colors\n\n");
    md.push_str("| Normalized | Occurrences | Replacement | Source |\n");
    md.push_str("|---|---:|---|---|\n");
    for color in &assignment.order {
        md.push_str(&format!(
            "| `{}` | {} | `{}` | {} |\n",
            color,
            assignment.frequency.get(color).copied().unwrap_or(0),
            reference(color),
            source_label(assignment, color),
        ));
    }

    md.push_str("\n## Literal Mapping\n\n");
    let mut raws: Vec<(&str, &str)> = raw_to_normalized.into_iter().collect();
    raws.sort_by(|a, b| {
        a.1.cmp(b.1)
            .then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase()))
            .then_with(|| a.0.cmp(b.0))
    });
    for (raw, normalized) in raws {
        md.push_str(&format!("- `{raw}` -> `{}`\n", reference(normalized)));
    }

    md.push_str("\n## Normalized Mapping\n\n");
    md.push_str("| Normalized | Raw Samples | Replacement | Source |\n");
    md.push_str("|---|---|---|---|\n");
    for color in &assignment.order {
        let mut samples: Vec<&str> = raw_variants
            .get(color.as_str())
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        samples.sort_by_key(|s| s.to_lowercase());
        let samples = samples
            .iter()
            .map(|s| format!("`{s}`"))
            .collect::<Vec<_>>()
            .join(", ");
        md.push_str(&format!(
            "| `{}` | {} | `{}` | {} |\n",
            color,
            samples,
            reference(color),
            source_label(assignment, color),
        ));
    }

    md
}

fn source_label(assignment: &Assignment, color: &str) -> &'static str {
    assignment
        .source_of(color)
        .map(TokenSource::as_str)
        .unwrap_or("unknown")
}
