//! Emitters for minted tokens: the standalone generated file, in-place
//! insertion into the token file, and the companion palette module.

use crate::error::{Result, TokenError};
use crate::naming::TokenNaming;
use crate::root_scope::{declared_identifiers, find_root_block};
use std::collections::BTreeMap;

const GENERATED_HEADER: &str = "/**
 * @generated by tint
 * Merge these tokens into the token file when ready.
 */
";

fn push_declarations(out: &mut String, generated: &BTreeMap<String, String>) {
    for (identifier, color) in generated {
        out.push_str(&format!("  {identifier}: {color};\n"));
    }
}

/// Standalone `:root` block of minted tokens, sorted by identifier
#[must_use]
pub fn render_generated_file(generated: &BTreeMap<String, String>) -> String {
    let mut out = String::from(GENERATED_HEADER);
    out.push_str("\n:root {\n");
    push_declarations(&mut out, generated);
    out.push_str("}\n");
    out
}

/// Token file text with minted declarations added to its root block.
///
/// Declarations go right before the closing brace of the first `:root` block.
/// Without one, a new block is appended. Identifiers the file already declares
/// are left alone, so inserting the same set twice changes nothing.
#[must_use]
pub fn insert_into_root(token_text: &str, generated: &BTreeMap<String, String>) -> String {
    let declared = declared_identifiers(token_text);
    let pending: BTreeMap<String, String> = generated
        .iter()
        .filter(|(identifier, _)| !declared.contains(*identifier))
        .map(|(identifier, color)| (identifier.clone(), color.clone()))
        .collect();
    if pending.is_empty() {
        return token_text.to_string();
    }

    let mut out = String::with_capacity(token_text.len() + pending.len() * 32);
    match find_root_block(token_text) {
        Some((open, close)) => {
            let body_end = token_text[..close].trim_end().len();
            if body_end > open + 1 && !token_text[..body_end].ends_with([';', '{']) {
                // Terminate an unterminated last declaration before appending
                out.push_str(&token_text[..body_end]);
                out.push(';');
                out.push_str(token_text[body_end..close].trim_end_matches([' ', '\t']));
            } else {
                out.push_str(token_text[..close].trim_end_matches([' ', '\t']));
            }
            if !out.ends_with('\n') {
                out.push('\n');
            }
            push_declarations(&mut out, &pending);
            out.push_str(&token_text[close..]);
        }
        None => {
            log::debug!("Token file has no :root block, appending one");
            out.push_str(token_text);
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(":root {\n");
            push_declarations(&mut out, &pending);
            out.push_str("}\n");
        }
    }
    out
}

/// CommonJS palette module mapping each minted token to its reference
pub fn render_palette(
    generated: &BTreeMap<String, String>,
    naming: &TokenNaming,
) -> Result<String> {
    let palette: BTreeMap<&str, String> = generated
        .keys()
        .map(|identifier| (naming.palette_key(identifier), naming.reference(identifier)))
        .collect();
    let body = serde_json::to_string_pretty(&palette)
        .map_err(|err| TokenError::Palette(err.to_string()))?;
    Ok(format!("// @generated by tint\nmodule.exports = {body};\n"))
}
