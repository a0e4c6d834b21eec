//! Windowing over provider sequences: turning raw strings into the fixed
//! length-m symbol windows the engines scan.

use crate::alphabet::Symbol;

/// All length-`len` contiguous windows of `seq`, as parsed symbol slices.
/// A window that contains any byte outside `{A,C,T,G}` is skipped rather
/// than surfaced as an error -- this is the documented, deterministic
/// input-contract policy for this implementation (see SPEC_FULL.md §7).
/// Sequences shorter than `len` contribute no windows.
pub fn subsequences(seq: &str, len: usize) -> Vec<Vec<Symbol>> {
    if len == 0 || seq.len() < len {
        return Vec::new();
    }
    let bytes = seq.as_bytes();
    let n = bytes.len();
    let mut out = Vec::with_capacity(n - len + 1);
    for start in 0..=(n - len) {
        let window = &bytes[start..start + len];
        if let Some(symbols) =
            window.iter().map(|&b| Symbol::try_from(b).ok()).collect()
        {
            out.push(symbols);
        }
    }
    out
}

/// Like `subsequences`, but pairs each surviving window with its true
/// starting offset in `seq` -- needed wherever offsets are compared across
/// windows (the Position engine's adjacency join), since `subsequences`
/// silently drops windows touching an invalid byte and a plain `enumerate`
/// over its output would renumber past the gap.
pub fn subsequences_with_offset(seq: &str, len: usize) -> Vec<(usize, Vec<Symbol>)> {
    if len == 0 || seq.len() < len {
        return Vec::new();
    }
    let bytes = seq.as_bytes();
    let n = bytes.len();
    let mut out = Vec::with_capacity(n - len + 1);
    for start in 0..=(n - len) {
        let window = &bytes[start..start + len];
        if let Some(symbols) =
            window.iter().map(|&b| Symbol::try_from(b).ok()).collect()
        {
            out.push((start, symbols));
        }
    }
    out
}
