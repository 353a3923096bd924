use crate::error::RouteError;
use crate::iter::CharIter;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::fmt;

/// Matches `<TYPE:NAME>` (or the `<NAME>` shorthand) at the head of a
/// pattern string. Byte-oriented so a multi-byte literal never splits a
/// string slice.
static RE_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new("^<([^>]+)>").expect("param regex"));

/// Named greedy consumer attached to a trie node. Names participate in
/// node equality only; the consumed value is not surfaced to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Pattern {
    /// `<string:name>`: consumes up to the dimension separator.
    Str(String),
    /// `<path:name>`: consumes to the end of the input.
    Path(String),
    /// `<int:name>`: consumes a digit run ended by the separator or the
    /// end of input; anything else rejects and restores the cursor.
    Int(String),
}

impl Pattern {
    /// On success the cursor sits immediately after the consumed value,
    /// never past the terminating separator. On failure the cursor is
    /// byte-for-byte where it was on entry.
    pub(crate) fn matches(&self, it: &mut CharIter) -> bool {
        match self {
            Pattern::Str(_) => {
                while let Some((c, sep)) = it.next() {
                    if c == sep {
                        it.push_back();
                        break;
                    }
                }
                true
            }
            Pattern::Path(_) => {
                while it.next().is_some() {}
                true
            }
            Pattern::Int(_) => match_int(it),
        }
    }
}

fn match_int(it: &mut CharIter) -> bool {
    // Counts consumed digits so a rejection can rewind them all, plus the
    // byte that caused it, even across a dimension crossing.
    let mut consumed = 0;
    loop {
        let (c, sep) = match it.next() {
            Some(next) => next,
            None => return true,
        };
        if !c.is_ascii_digit() {
            if c == sep {
                it.push_back();
                return true;
            }
            for _ in 0..=consumed {
                it.push_back();
            }
            return false;
        }
        consumed += 1;
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Str(name) => write!(f, "<string:{}>", name),
            Pattern::Path(name) => write!(f, "<path:{}>", name),
            Pattern::Int(name) => write!(f, "<int:{}>", name),
        }
    }
}

/// Scans for a pattern matcher at the head of `rest`. `Ok(None)` means no
/// well-formed `<...>` starts here and the byte is literal; a well-formed
/// pattern with a bad type or parameter list is an error. Returns the
/// matcher together with the number of bytes it occupies in the source.
pub(crate) fn parse_pattern(rest: &[u8]) -> Result<Option<(Pattern, usize)>, RouteError> {
    if rest.first() != Some(&b'<') {
        return Ok(None);
    }
    let caps = match RE_PARAM.captures(rest) {
        Some(caps) => caps,
        None => return Ok(None),
    };
    let consumed = caps[0].len();
    let inner = String::from_utf8_lossy(&caps[1]).into_owned();
    let values: Vec<&str> = inner.split(':').collect();

    // `<param>` is shorthand for `<string:param>`.
    let (kind, args) = if values.len() == 1 {
        ("string", &values[..])
    } else {
        (values[0], &values[1..])
    };
    if args.len() != 1 {
        return Err(RouteError::PatternSyntax(format!(
            "expected a single parameter - the variable name, got: {}",
            args.join(":")
        )));
    }
    let name = args[0].to_owned();
    let pattern = match kind {
        "string" => Pattern::Str(name),
        "path" => Pattern::Path(name),
        "int" => Pattern::Int(name),
        other => {
            return Err(RouteError::PatternSyntax(format!(
                "unsupported matcher: {}",
                other
            )))
        }
    };
    Ok(Some((pattern, consumed)))
}
