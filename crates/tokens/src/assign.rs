use crate::error::{Result, TokenError};
use crate::index::ExistingTokenIndex;
use crate::naming::TokenNaming;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tint_scanner::Occurrence;

/// Where a color's token comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    /// Declared in the token file before this run
    Existing,
    /// Minted by this run
    Generated,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::Generated => "generated",
        }
    }
}

/// Run-wide color to token mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    /// Distinct colors by descending frequency, then ascending color text
    pub order: Vec<String>,

    pub frequency: BTreeMap<String, usize>,

    pub color_to_token: BTreeMap<String, String>,

    pub color_source: BTreeMap<String, TokenSource>,

    /// Minted identifier -> color, the only part persisted to the token file
    pub generated: BTreeMap<String, String>,
}

impl Assignment {
    #[must_use]
    pub fn token_for(&self, color: &str) -> Option<&str> {
        self.color_to_token.get(color).map(String::as_str)
    }

    #[must_use]
    pub fn source_of(&self, color: &str) -> Option<TokenSource> {
        self.color_source.get(color).copied()
    }

    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn reused_count(&self) -> usize {
        self.color_source
            .values()
            .filter(|source| **source == TokenSource::Existing)
            .count()
    }

    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    /// Re-check the minting invariants after the fact.
    ///
    /// Minted identifiers must be disjoint from `reserved` and from each other,
    /// and every generated color must have a declaration to persist.
    pub fn verify(&self, reserved: &BTreeSet<String>) -> Result<()> {
        let mut minted = BTreeSet::new();
        for (color, source) in &self.color_source {
            if *source != TokenSource::Generated {
                continue;
            }
            let Some(identifier) = self.color_to_token.get(color) else {
                return Err(TokenError::MissingDeclaration {
                    color: color.clone(),
                });
            };
            if reserved.contains(identifier) || !minted.insert(identifier.clone()) {
                return Err(TokenError::IdentifierCollision {
                    identifier: identifier.clone(),
                });
            }
            if self.generated.get(identifier) != Some(color) {
                return Err(TokenError::MissingDeclaration {
                    color: color.clone(),
                });
            }
        }
        if minted.len() != self.generated.len() {
            if let Some(stray) = self.generated.keys().find(|id| !minted.contains(*id)) {
                return Err(TokenError::IdentifierCollision {
                    identifier: stray.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Map every distinct normalized color to a token identifier.
///
/// Colors already in `index` keep their declared identifier. The rest get
/// sequential identifiers from suffix 0, skipping anything in `reserved`.
/// Ordering depends only on the occurrence multiset, never on input order.
#[must_use]
pub fn assign<'a, I>(
    occurrences: I,
    index: &ExistingTokenIndex,
    reserved: &BTreeSet<String>,
    naming: &TokenNaming,
) -> Assignment
where
    I: IntoIterator<Item = &'a Occurrence>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for occurrence in occurrences {
        *counts.entry(occurrence.normalized.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut assignment = Assignment::default();
    let mut next_suffix = 0usize;

    for (color, count) in ranked {
        assignment.order.push(color.to_string());
        assignment.frequency.insert(color.to_string(), count);

        if let Some(identifier) = index.get(color) {
            assignment
                .color_to_token
                .insert(color.to_string(), identifier.to_string());
            assignment
                .color_source
                .insert(color.to_string(), TokenSource::Existing);
            continue;
        }

        let identifier = loop {
            let candidate = naming.identifier(next_suffix);
            next_suffix += 1;
            if !reserved.contains(&candidate) && !assignment.generated.contains_key(&candidate) {
                break candidate;
            }
            log::debug!("Skipping reserved identifier {candidate}");
        };

        assignment
            .color_to_token
            .insert(color.to_string(), identifier.clone());
        assignment
            .color_source
            .insert(color.to_string(), TokenSource::Generated);
        assignment.generated.insert(identifier, color.to_string());
    }

    log::debug!(
        "Assigned {} colors: {} reused, {} minted",
        assignment.unique_count(),
        assignment.reused_count(),
        assignment.generated_count()
    );
    assignment
}
