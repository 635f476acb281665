use crate::config::{ProjectPaths, TintConfig};
use crate::discovery::{discover, Target};
use crate::flags::Mode;
use crate::report::{build_color_map, render_markdown};
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tint_protocol::ColorMap;
use tint_rewrite::{Codemod, RunOutcome, ScannedFile, SourceFile};
use tint_tokens::{parse_root_tokens, render_generated_file, render_palette, TokenFile};

/// What a run computed and which files it wrote
pub(crate) struct Execution {
    pub mode: Mode,
    pub outcome: RunOutcome,
    pub color_map: ColorMap,
    /// `(label, project-relative path)` of every artifact written, in write order
    pub artifacts: Vec<(&'static str, String)>,
    pub source_writes: usize,
}

impl Execution {
    pub(crate) fn summary_lines(&self) -> Vec<String> {
        let meta = &self.color_map.meta;
        let mut lines = vec![format!(
            "[{}] scanned={} matches={} unique={} reused={} new={}",
            self.mode.as_str(),
            meta.files_scanned,
            meta.matches,
            meta.unique_colors,
            meta.reused_tokens,
            meta.new_tokens
        )];
        for (label, path) in &self.artifacts {
            lines.push(format!("{label}={path}"));
        }
        match self.mode {
            Mode::Report => {}
            Mode::DryRun => lines.push("source_writes=0 (preview mode)".to_string()),
            Mode::Apply => lines.push(format!("source_writes={}", self.source_writes)),
        }
        lines
    }
}

pub(crate) async fn execute(root: &Path, config: &TintConfig, mode: Mode) -> Result<Execution> {
    let paths = ProjectPaths::resolve(root, config);

    if !paths.source_root.is_dir() {
        bail!("missing source root at {}", paths.source_root.display());
    }
    if !paths.token_file.is_file() {
        bail!("missing token file at {}", paths.token_file.display());
    }

    let token_text = tokio::fs::read_to_string(&paths.token_file)
        .await
        .with_context(|| format!("Failed to read {}", paths.token_file.display()))?;
    let token_file = TokenFile::parse(&token_text);

    let codemod = Arc::new(Codemod::new(&config.scanner, config.naming.clone())?);

    let targets = {
        let paths = paths.clone();
        let config = config.clone();
        tokio::task::spawn_blocking(move || discover(&paths, &config))
            .await
            .context("File discovery task failed")?
    };

    let scanned = scan_targets(targets, Arc::clone(&codemod), mode.writes_sources()).await?;
    let outcome = codemod.finish(scanned, &token_file)?;

    let color_map = build_color_map(mode.as_str(), config, &outcome);
    let mut artifacts = Vec::new();

    let json = color_map
        .to_json_pretty()
        .context("Failed to serialize color map")?;
    write_text(&paths.report_json, &json).await?;
    artifacts.push(("report_json", paths.relative(&paths.report_json)));

    let markdown = render_markdown(mode.as_str(), &outcome, codemod.naming());
    write_text(&paths.report_md, &markdown).await?;
    artifacts.push(("report_md", paths.relative(&paths.report_md)));

    if mode.writes_preview() {
        write_text(&paths.report_patch, &outcome.render_patch()).await?;
        artifacts.push(("patch_preview", paths.relative(&paths.report_patch)));

        let generated = render_generated_file(&outcome.assignment.generated);
        write_text(&paths.generated_token_file, &generated).await?;
        artifacts.push((
            "generated_tokens",
            paths.relative(&paths.generated_token_file),
        ));
    }

    let mut source_writes = 0;
    if mode.writes_sources() {
        for (rel_path, changed) in &outcome.changed {
            write_text(&root.join(rel_path), &changed.rewritten).await?;
            source_writes += 1;
        }

        let updated = outcome.updated_token_file(&token_text);
        if updated != token_text {
            write_text(&paths.token_file, &updated).await?;
            artifacts.push(("token_file", paths.relative(&paths.token_file)));
        }

        if let Some(palette_path) = &paths.palette_file {
            let prefix = config.naming.prefix.as_str();
            let minted: BTreeMap<String, String> = parse_root_tokens(&updated)
                .into_iter()
                .filter(|token| token.identifier.starts_with(prefix))
                .map(|token| (token.identifier, token.value))
                .collect();
            let palette = render_palette(&minted, &config.naming)?;
            write_text(palette_path, &palette).await?;
            artifacts.push(("palette", paths.relative(palette_path)));
        }
    }

    Ok(Execution {
        mode,
        outcome,
        color_map,
        artifacts,
        source_writes,
    })
}

/// Read and scan targets in small concurrent batches.
///
/// Results are unordered here; [`Codemod::finish`] orders them by path.
/// With `strict`, a file that cannot be read fails the run instead of being
/// skipped, so sources are never rewritten from a partial scan.
async fn scan_targets(
    targets: Vec<Target>,
    codemod: Arc<Codemod>,
    strict: bool,
) -> Result<Vec<ScannedFile>> {
    let max_concurrent = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(2, 8);

    let mut scanned = Vec::with_capacity(targets.len());
    for batch in targets.chunks(max_concurrent) {
        let mut tasks = Vec::with_capacity(batch.len());
        for target in batch {
            let target = target.clone();
            let codemod = Arc::clone(&codemod);
            tasks.push(tokio::spawn(async move { scan_target(target, codemod).await }));
        }

        for task in tasks {
            match task.await {
                Ok(Ok(file)) => scanned.push(file),
                Ok(Err(e)) if strict => return Err(e),
                Ok(Err(e)) => log::warn!("Skipping file: {e:#}"),
                Err(e) if strict => return Err(e).context("Scan task panicked"),
                Err(e) => log::warn!("Scan task panicked: {e}"),
            }
        }
    }
    Ok(scanned)
}

async fn scan_target(target: Target, codemod: Arc<Codemod>) -> Result<ScannedFile> {
    let text = tokio::fs::read_to_string(&target.path)
        .await
        .with_context(|| format!("Failed to read {}", target.rel_path))?;
    let source = SourceFile::new(target.rel_path, text);
    tokio::task::spawn_blocking(move || codemod.scan_file(source))
        .await
        .context("Scan task failed")
}

async fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
