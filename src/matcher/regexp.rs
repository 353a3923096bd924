use crate::error::RouteError;
use crate::mapper::Mapper;
use crate::request::Request;
use regex::Regex;

use super::MatchRef;

/// Regular-expression matcher over a single mapper. Opaque leaf: it never
/// merges with or chains into other matchers.
pub(crate) struct RegexpMatcher<P> {
    mapper: Mapper,
    expr: Regex,
    result: MatchRef<P>,
}

impl<P> RegexpMatcher<P> {
    pub(crate) fn new(
        expr: &str,
        mapper: Mapper,
        result: MatchRef<P>,
    ) -> Result<RegexpMatcher<P>, RouteError> {
        let compiled = Regex::new(expr).map_err(|err| RouteError::RegexSyntax {
            expr: expr.to_owned(),
            reason: err.to_string(),
        })?;
        Ok(RegexpMatcher {
            mapper,
            expr: compiled,
            result,
        })
    }

    pub(crate) fn matches<R: Request>(&self, req: &R) -> Option<MatchRef<P>> {
        if self.expr.is_match(&self.mapper.map_request(req)) {
            Some(self.result.clone())
        } else {
            None
        }
    }
}
