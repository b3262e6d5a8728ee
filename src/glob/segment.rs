// src/glob/segment.rs

//! Matching of a single path segment (no separators) against one pattern
//! segment.
//!
//! Supported syntax: `?`, `*`, `[...]` classes with ranges, `^` negation and
//! `\` escapes, and `\` escapes outside classes. A malformed segment (an
//! unterminated or empty class, a dangling `\`, a bare `-` or `]` inside a
//! class) never matches anything.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    /// `?`
    Any,
    /// `*` (consecutive stars are collapsed into one).
    Star,
    Class {
        negated: bool,
        ranges: Vec<(char, char)>,
    },
}

impl Token {
    fn matches_char(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::Any => c != '/',
            Token::Star => false,
            Token::Class { negated, ranges } => {
                c != '/' && ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi) != *negated
            }
        }
    }
}

/// A compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    tokens: Vec<Token>,
}

impl Segment {
    /// Compile a segment; `None` if it is malformed.
    pub fn parse(pattern: &str) -> Option<Segment> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '*' => {
                    if tokens.last() != Some(&Token::Star) {
                        tokens.push(Token::Star);
                    }
                    i += 1;
                }
                '?' => {
                    tokens.push(Token::Any);
                    i += 1;
                }
                '\\' => {
                    let c = *chars.get(i + 1)?;
                    tokens.push(Token::Literal(c));
                    i += 2;
                }
                '[' => {
                    let (class, next) = parse_class(&chars, i + 1)?;
                    tokens.push(class);
                    i = next;
                }
                c => {
                    tokens.push(Token::Literal(c));
                    i += 1;
                }
            }
        }

        Some(Segment { tokens })
    }

    /// The unescaped text of the segment if it contains no wildcards.
    pub fn literal(&self) -> Option<String> {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Literal(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Whether `name` matches this segment in full.
    pub fn is_match(&self, name: &str) -> bool {
        let name: Vec<char> = name.chars().collect();
        let tokens = &self.tokens;

        let (mut t, mut n) = (0, 0);
        // Last star seen: (token index of the star, name index it resumed at).
        let mut backtrack: Option<(usize, usize)> = None;

        while n < name.len() {
            match tokens.get(t) {
                Some(Token::Star) => {
                    backtrack = Some((t, n));
                    t += 1;
                    continue;
                }
                Some(tok) if tok.matches_char(name[n]) => {
                    t += 1;
                    n += 1;
                    continue;
                }
                _ => {}
            }
            match backtrack {
                Some((star, resume)) if name[resume] != '/' => {
                    backtrack = Some((star, resume + 1));
                    t = star + 1;
                    n = resume + 1;
                }
                _ => return false,
            }
        }

        tokens[t..].iter().all(|tok| *tok == Token::Star)
    }
}

/// Parse a class body starting just after `[`. Returns the token and the
/// index just past the closing `]`.
fn parse_class(chars: &[char], start: usize) -> Option<(Token, usize)> {
    let mut i = start;
    let negated = chars.get(i) == Some(&'^');
    if negated {
        i += 1;
    }

    let mut ranges = Vec::new();
    loop {
        if chars.get(i) == Some(&']') && !ranges.is_empty() {
            return Some((Token::Class { negated, ranges }, i + 1));
        }
        let lo = class_char(chars, &mut i)?;
        let hi = if chars.get(i) == Some(&'-') {
            i += 1;
            class_char(chars, &mut i)?
        } else {
            lo
        };
        ranges.push((lo, hi));
    }
}

/// Read one (possibly escaped) class member. A bare `-` or `]` here is a
/// syntax error, as is running off the end of the pattern.
fn class_char(chars: &[char], i: &mut usize) -> Option<char> {
    let mut c = *chars.get(*i)?;
    if c == '-' || c == ']' {
        return None;
    }
    if c == '\\' {
        *i += 1;
        c = *chars.get(*i)?;
    }
    *i += 1;
    if *i >= chars.len() {
        return None;
    }
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, name: &str) -> bool {
        Segment::parse(pattern).is_some_and(|s| s.is_match(name))
    }

    #[test]
    fn stars_and_question_marks() {
        assert!(matches("abc", "abc"));
        assert!(matches("*", "abc"));
        assert!(matches("*c", "abc"));
        assert!(matches("a*", "axbxcxdxe"));
        assert!(matches("a*b?c*x", "abxbbxdbxebxczzx"));
        assert!(!matches("a*b?c*x", "abxbbxdbxebxczzy"));
        assert!(matches("*x", "xxx"));
        assert!(matches("abc**", "abc"));
        assert!(matches("**abc", "abc"));
        assert!(!matches("a?b", "a/b"));
        assert!(!matches("a*b", "a/b"));
    }

    #[test]
    fn classes_and_ranges() {
        assert!(matches("ab[c]", "abc"));
        assert!(matches("ab[b-d]", "abc"));
        assert!(!matches("ab[e-g]", "abc"));
        assert!(!matches("ab[^c]", "abc"));
        assert!(!matches("ab[^b-d]", "abc"));
        assert!(matches("ab[^e-g]", "abc"));
        for c in ['e', 'f', 'g'] {
            assert!(!matches("[^e-g]", &c.to_string()));
        }
        assert!(matches("[a-ζ]*", "α"));
        assert!(!matches("*[a-ζ]", "A"));
    }

    #[test]
    fn escapes_inside_classes() {
        assert!(matches("[\\]a]", "]"));
        assert!(matches("[\\-]", "-"));
        assert!(matches("[x\\-]", "x"));
        assert!(matches("[x\\-]", "-"));
        assert!(!matches("[x\\-]", "z"));
        assert!(matches("[\\-x]", "x"));
        assert!(matches("[\\-x]", "-"));
        assert!(!matches("[\\-x]", "a"));
    }

    #[test]
    fn malformed_segments_never_match() {
        for pattern in [
            "[]a]", "[-]", "[x-]", "[-x]", "\\", "[a-b-c]", "[", "[^", "[^bc", "a[",
        ] {
            assert!(Segment::parse(pattern).is_none(), "{pattern} should be rejected");
        }
        assert!(!matches("[]a]", "]"));
        assert!(!matches("a[", "ab"));
    }

    #[test]
    fn escaped_wildcards_are_literal() {
        assert!(!matches("a\\*b", "ab"));
        assert!(matches("a\\*b", "a*b"));
        assert_eq!(
            Segment::parse("a\\*b").and_then(|s| s.literal()),
            Some("a*b".to_string())
        );
        assert_eq!(Segment::parse("a*").and_then(|s| s.literal()), None);
    }
}
