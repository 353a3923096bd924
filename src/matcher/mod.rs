//! Matchers compiled from route expressions.
//!
//! Every route expression compiles to one top-level [`Matcher`]: a trie, a
//! regular expression, or an and-matcher joining the two kinds. Tries over
//! equivalent mappers merge into a single trie during route-table
//! compilation; tries joined by `&&` chain into one trie spanning several
//! request dimensions. Regexp and and-matchers never merge or chain, so
//! each stays a separate entry in the compiled list.

mod pattern;
mod regexp;
mod trie;

pub(crate) use self::regexp::RegexpMatcher;
pub(crate) use self::trie::Trie;

use crate::error::RouteError;
use crate::mapper::Mapper;
use crate::request::Request;
use std::sync::Arc;

/// Terminal payload holder. Merged tries share one `RouteMatch` per route,
/// so every leaf accepting the same expression reports the same result.
pub(crate) struct RouteMatch<P> {
    pub(crate) payload: P,
}

/// Shared handle to a route's match result.
pub(crate) type MatchRef<P> = Arc<RouteMatch<P>>;

pub(crate) fn new_match<P>(payload: P) -> MatchRef<P> {
    Arc::new(RouteMatch { payload })
}

/// A compiled top-level matcher.
pub(crate) enum Matcher<P> {
    Trie(Trie<P>),
    Regexp(RegexpMatcher<P>),
    And(Box<Matcher<P>>, Box<Matcher<P>>),
}

impl<P> Matcher<P> {
    pub(crate) fn matches<R: Request>(&self, req: &R) -> Option<MatchRef<P>> {
        match self {
            Matcher::Trie(t) => t.matches(req),
            Matcher::Regexp(m) => m.matches(req),
            Matcher::And(a, b) => {
                a.matches(req)?;
                b.matches(req)
            }
        }
    }

    /// AND-composition. Two tries fuse across the dimension boundary into
    /// one chained trie; any other pairing evaluates both sides against
    /// the request.
    pub(crate) fn and(a: Matcher<P>, b: Matcher<P>) -> Result<Matcher<P>, RouteError> {
        match (a, b) {
            (Matcher::Trie(x), Matcher::Trie(y)) => Ok(Matcher::Trie(x.chain(y)?)),
            (a, b) => Ok(Matcher::And(Box::new(a), Box::new(b))),
        }
    }

    pub(crate) fn can_merge(&self, other: &Matcher<P>) -> bool {
        match (self, other) {
            (Matcher::Trie(a), Matcher::Trie(b)) => a.can_merge(b),
            _ => false,
        }
    }

    pub(crate) fn merge(self, other: Matcher<P>) -> Result<Matcher<P>, RouteError> {
        match (self, other) {
            (Matcher::Trie(a), Matcher::Trie(b)) => Ok(Matcher::Trie(a.merge(b)?)),
            _ => Err(RouteError::CompileFailure(
                "only trie matchers can merge".to_owned(),
            )),
        }
    }
}

// Primitive matcher factories, one per expression function.

pub(crate) fn host_trie<P>(host: &str, result: MatchRef<P>) -> Result<Matcher<P>, RouteError> {
    Ok(Matcher::Trie(Trie::parse(
        &host.to_lowercase(),
        Mapper::Host,
        result,
    )?))
}

pub(crate) fn host_regexp<P>(host: &str, result: MatchRef<P>) -> Result<Matcher<P>, RouteError> {
    Ok(Matcher::Regexp(RegexpMatcher::new(
        &host.to_lowercase(),
        Mapper::Host,
        result,
    )?))
}

pub(crate) fn method_trie<P>(method: &str, result: MatchRef<P>) -> Result<Matcher<P>, RouteError> {
    Ok(Matcher::Trie(Trie::parse(method, Mapper::Method, result)?))
}

pub(crate) fn method_regexp<P>(
    method: &str,
    result: MatchRef<P>,
) -> Result<Matcher<P>, RouteError> {
    Ok(Matcher::Regexp(RegexpMatcher::new(
        method,
        Mapper::Method,
        result,
    )?))
}

pub(crate) fn path_trie<P>(path: &str, result: MatchRef<P>) -> Result<Matcher<P>, RouteError> {
    Ok(Matcher::Trie(Trie::parse(path, Mapper::Path, result)?))
}

pub(crate) fn path_regexp<P>(path: &str, result: MatchRef<P>) -> Result<Matcher<P>, RouteError> {
    Ok(Matcher::Regexp(RegexpMatcher::new(
        path,
        Mapper::Path,
        result,
    )?))
}

pub(crate) fn header_trie<P>(
    name: &str,
    value: &str,
    result: MatchRef<P>,
) -> Result<Matcher<P>, RouteError> {
    Ok(Matcher::Trie(Trie::parse(
        value,
        Mapper::Header(name.to_owned()),
        result,
    )?))
}

pub(crate) fn header_regexp<P>(
    name: &str,
    value: &str,
    result: MatchRef<P>,
) -> Result<Matcher<P>, RouteError> {
    Ok(Matcher::Regexp(RegexpMatcher::new(
        value,
        Mapper::Header(name.to_owned()),
        result,
    )?))
}
