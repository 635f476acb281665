use crate::engine::rewrite;
use crate::error::{Result, RewriteError};
use crate::patch;
use std::collections::BTreeMap;
use tint_scanner::{Extractor, FileKind, Occurrence, ScannerConfig};
use tint_tokens::{assign, insert_into_root, Assignment, TokenFile, TokenNaming};

/// One input file, as handed over by discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Project-relative, `/`-separated path
    pub path: String,
    pub text: String,
    pub kind: FileKind,
}

impl SourceFile {
    /// Build a source file, deriving its kind from the path
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let path = path.into();
        let kind = FileKind::from_path(&path);
        Self {
            path,
            text: text.into(),
            kind,
        }
    }
}

/// Result of the scan phase for one file
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: String,
    pub text: String,
    pub occurrences: Vec<Occurrence>,
}

/// Text of a file before and after rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub original: String,
    pub rewritten: String,
}

/// Everything one run computed
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub files_scanned: usize,

    /// All occurrences, by path then by span
    pub occurrences: Vec<Occurrence>,

    pub assignment: Assignment,

    /// Files whose rewritten text differs from the original, by path
    pub changed: BTreeMap<String, ChangedFile>,
}

impl RunOutcome {
    pub fn render_patch(&self) -> String {
        patch::render_patch(&self.changed)
    }

    /// Token file text with this run's minted declarations inserted
    pub fn updated_token_file(&self, token_text: &str) -> String {
        insert_into_root(token_text, &self.assignment.generated)
    }

    /// Number of distinct files with at least one occurrence
    pub fn files_with_matches(&self) -> usize {
        let mut count = 0;
        let mut last: Option<&str> = None;
        for occ in &self.occurrences {
            if last != Some(occ.file_path.as_str()) {
                count += 1;
                last = Some(occ.file_path.as_str());
            }
        }
        count
    }
}

/// The scan, assign and rewrite phases over a set of files.
///
/// Scanning is a pure function of one file and may run in any order or in
/// parallel; [`Codemod::finish`] is the barrier that orders the results by
/// path before any identifier is minted.
#[derive(Debug, Clone)]
pub struct Codemod {
    extractor: Extractor,
    naming: TokenNaming,
}

impl Codemod {
    pub fn new(scanner: &ScannerConfig, naming: TokenNaming) -> Result<Self> {
        naming.validate()?;
        Ok(Self {
            extractor: Extractor::new(scanner)?,
            naming,
        })
    }

    pub fn naming(&self) -> &TokenNaming {
        &self.naming
    }

    pub fn scan_file(&self, file: SourceFile) -> ScannedFile {
        let occurrences = self.extractor.scan(&file.path, &file.text, file.kind);
        ScannedFile {
            path: file.path,
            text: file.text,
            occurrences,
        }
    }

    /// Assign tokens across all scanned files and rewrite each of them.
    /// A path scanned twice is rejected.
    pub fn finish<I>(&self, scanned: I, token_file: &TokenFile) -> Result<RunOutcome>
    where
        I: IntoIterator<Item = ScannedFile>,
    {
        let mut by_path: BTreeMap<String, ScannedFile> = BTreeMap::new();
        for file in scanned {
            if by_path.contains_key(&file.path) {
                return Err(RewriteError::DuplicatePath { path: file.path });
            }
            by_path.insert(file.path.clone(), file);
        }
        let files_scanned = by_path.len();

        let assignment = assign(
            by_path.values().flat_map(|file| file.occurrences.iter()),
            &token_file.index,
            &token_file.reserved,
            &self.naming,
        );
        assignment.verify(&token_file.reserved)?;

        let mut changed = BTreeMap::new();
        let mut occurrences = Vec::new();
        for (path, file) in by_path {
            let rewritten = rewrite(
                &file.text,
                &file.occurrences,
                &assignment.color_to_token,
                &self.naming,
            )?;
            if rewritten != file.text {
                changed.insert(
                    path,
                    ChangedFile {
                        original: file.text,
                        rewritten,
                    },
                );
            }
            occurrences.extend(file.occurrences);
        }

        log::info!(
            "Scanned {files_scanned} files: {} literals, {} colors, {} files changed",
            occurrences.len(),
            assignment.unique_count(),
            changed.len()
        );

        Ok(RunOutcome {
            files_scanned,
            occurrences,
            assignment,
            changed,
        })
    }

    /// Run every phase sequentially
    pub fn run<I>(&self, files: I, token_file_text: &str) -> Result<RunOutcome>
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let token_file = TokenFile::parse(token_file_text);
        let scanned: Vec<ScannedFile> = files.into_iter().map(|f| self.scan_file(f)).collect();
        self.finish(scanned, &token_file)
    }
}
