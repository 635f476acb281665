use pretty_assertions::assert_eq;
use tint_scanner::{Extractor, FileKind, Occurrence, ScannerConfig};
use tint_tokens::{assign, insert_into_root, TokenFile, TokenNaming, TokenSource};

const TOKENS: &str = ":root {
  --c-bg: #ffffff;
  --c-ink: #111;
  --c-raw-000: rgb(1, 2, 3);
  --c-link: var(--c-ink);
}
";

fn scan_all(files: &[(&str, &str)]) -> Vec<Occurrence> {
    let extractor = Extractor::new(&ScannerConfig::default()).unwrap();
    files
        .iter()
        .flat_map(|(path, text)| extractor.scan(path, text, FileKind::from_path(path)))
        .collect()
}

fn sources() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "ui/src/a.module.css",
            ".a { color: #FFFFFF; background: #f00; border-color: #F00; }",
        ),
        (
            "ui/src/b.module.css",
            ".b { color: #abc; outline-color: #111111; }",
        ),
        (
            "ui/src/C.tsx",
            r##"export const C = () => <path fill="#ff0000" stroke="#ABC" />;"##,
        ),
    ]
}

#[test]
fn existing_tokens_take_priority_over_minting() {
    let token_file = TokenFile::parse(TOKENS);
    let occurrences = scan_all(&sources());
    let assignment = assign(
        &occurrences,
        &token_file.index,
        &token_file.reserved,
        &TokenNaming::default(),
    );

    assert_eq!(assignment.token_for("#ffffff"), Some("--c-bg"));
    assert_eq!(assignment.token_for("#111111"), Some("--c-ink"));
    assert_eq!(assignment.source_of("#111111"), Some(TokenSource::Existing));
    assert!(assignment
        .generated
        .values()
        .all(|color| color != "#ffffff" && color != "#111111"));
    assignment.verify(&token_file.reserved).unwrap();
}

#[test]
fn minted_identifiers_skip_declared_ones() {
    let token_file = TokenFile::parse(TOKENS);
    let occurrences = scan_all(&sources());
    let assignment = assign(
        &occurrences,
        &token_file.index,
        &token_file.reserved,
        &TokenNaming::default(),
    );

    // #ff0000 appears three times, #aabbcc twice
    assert_eq!(assignment.order[0], "#ff0000");
    assert_eq!(assignment.token_for("#ff0000"), Some("--c-raw-001"));
    assert_eq!(assignment.token_for("#aabbcc"), Some("--c-raw-002"));
    assert_eq!(assignment.generated_count(), 2);
}

#[test]
fn file_order_does_not_change_the_mapping() {
    let token_file = TokenFile::parse(TOKENS);
    let naming = TokenNaming::default();

    let forward = scan_all(&sources());
    let mut reversed_sources = sources();
    reversed_sources.reverse();
    let backward = scan_all(&reversed_sources);

    assert_eq!(
        assign(&forward, &token_file.index, &token_file.reserved, &naming),
        assign(&backward, &token_file.index, &token_file.reserved, &naming)
    );
}

#[test]
fn inserted_tokens_are_reused_on_the_next_run() {
    let naming = TokenNaming::default();
    let occurrences = scan_all(&sources());

    let first_file = TokenFile::parse(TOKENS);
    let first = assign(&occurrences, &first_file.index, &first_file.reserved, &naming);

    let updated = insert_into_root(TOKENS, &first.generated);
    let second_file = TokenFile::parse(&updated);
    let second = assign(&occurrences, &second_file.index, &second_file.reserved, &naming);

    assert_eq!(second.generated_count(), 0);
    assert_eq!(second.color_to_token, first.color_to_token);
}
