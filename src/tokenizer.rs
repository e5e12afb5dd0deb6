//! Argument tokenizer for the `extraArgs` configuration value.
//!
//! Splits on unquoted whitespace. A `"` toggles quoting and is dropped from
//! the emitted token; an unterminated quote runs to the end of the input.

/// Split `raw` into arguments, honoring `"`-quoted spans.
///
/// Runs of whitespace collapse, so empty or all-whitespace input yields an
/// empty vector. Quote characters are stripped, never emitted.
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in raw.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

// ============================================================================
// Tests
// ============================================================================
