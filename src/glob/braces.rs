// src/glob/braces.rs

//! Brace alternation: `ab{c,d}` is evaluated as `abc` and `abd`.

/// Expand every `{a,b,...}` group (nested groups included) into the list of
/// concrete patterns, in order of appearance.
///
/// Returns `None` when a `{` is never closed; such a pattern matches nothing.
/// Escaped braces and commas (`\{`, `\,`) are left untouched.
pub fn expand_braces(pattern: &str) -> Option<Vec<String>> {
    let Some(open) = find_open(pattern) else {
        return Some(vec![pattern.to_string()]);
    };
    let (close, commas) = find_close(pattern, open)?;

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    let mut expanded = Vec::new();
    let mut start = open + 1;
    for end in commas.into_iter().chain(std::iter::once(close)) {
        let alternative = &pattern[start..end];
        expanded.extend(expand_braces(&format!("{prefix}{alternative}{suffix}"))?);
        start = end + 1;
    }
    Some(expanded)
}

fn find_open(pattern: &str) -> Option<usize> {
    grouping_chars(pattern, 0)
        .into_iter()
        .find(|&(_, c)| c == '{')
        .map(|(i, _)| i)
}

/// Find the `}` matching the `{` at `open`, plus the byte offsets of the
/// top-level commas in between.
fn find_close(pattern: &str, open: usize) -> Option<(usize, Vec<usize>)> {
    let mut depth = 0usize;
    let mut commas = Vec::new();

    for (i, c) in grouping_chars(pattern, open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((i, commas));
                }
            }
            ',' if depth == 1 => commas.push(i),
            _ => {}
        }
    }
    None
}

/// Characters from `from` onwards that can take part in grouping, with
/// their byte offsets. Escaped characters and the bodies of `[...]`
/// classes are skipped; an unterminated `[` is kept as an ordinary char.
fn grouping_chars(pattern: &str, from: usize) -> Vec<(usize, char)> {
    let mut out = Vec::new();
    let mut chars = pattern[from..]
        .char_indices()
        .map(|(offset, c)| (from + offset, c))
        .peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' => match class_end(pattern, i) {
                Some(end) => while chars.next_if(|&(j, _)| j <= end).is_some() {},
                None => out.push((i, c)),
            },
            _ => out.push((i, c)),
        }
    }
    out
}

/// Byte offset of the `]` closing the class opened at `open`.
fn class_end(pattern: &str, open: usize) -> Option<usize> {
    let mut escaped = false;
    for (offset, c) in pattern[open + 1..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            ']' => return Some(open + 1 + offset),
            _ => {}
        }
    }
    None
}
