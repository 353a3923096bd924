use crate::error::RouteError;
use crate::matcher::{self, MatchRef, Matcher};
use crate::parse::parse;
use crate::request::Request;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Expression-keyed route table with payloads of type `P`.
///
/// Every mutation recompiles the table: expressions are sorted in reverse
/// lexicographic order, parsed, and adjacent structurally compatible tries
/// are merged, producing a minimal ordered matcher list. A thousand
/// `Method(...) && Path(...)` routes typically compile into one trie.
///
/// The table is safe to share across threads (`&self` methods throughout);
/// `route` takes the read side of the internal lock, mutations the write
/// side. A failing mutation leaves both the route map and the compiled
/// list exactly as they were.
///
/// # Example
///
/// ```
/// use routrie::Router;
///
/// let router: Router<&str> = Router::new();
/// router.add(r#"Method("GET") && Path("/v1/users/<id>")"#, "users")?;
///
/// let req = http::Request::builder()
///     .method("GET")
///     .uri("/v1/users/42")
///     .body(())
///     .unwrap();
/// assert_eq!(router.route(&req)?, Some("users"));
/// # Ok::<(), routrie::RouteError>(())
/// ```
pub struct Router<P> {
    inner: RwLock<Inner<P>>,
}

struct Inner<P> {
    routes: HashMap<String, MatchRef<P>>,
    compiled: Vec<Matcher<P>>,
}

impl<P> Router<P> {
    pub fn new() -> Router<P> {
        Router {
            inner: RwLock::new(Inner {
                routes: HashMap::new(),
                compiled: Vec::new(),
            }),
        }
    }

    /// Returns the payload bound to `expr`, without matching a request.
    #[must_use]
    pub fn get(&self, expr: &str) -> Option<P>
    where
        P: Clone,
    {
        let inner = self.inner.read().unwrap();
        inner.routes.get(expr).map(|m| m.payload.clone())
    }

    /// Registers a route. Fails if `expr` is malformed or already present;
    /// use [`upsert`](Router::upsert) to replace an existing route.
    pub fn add(&self, expr: &str, payload: P) -> Result<(), RouteError> {
        let mut inner = self.inner.write().unwrap();
        if inner.routes.contains_key(expr) {
            return Err(RouteError::DuplicateRoute(expr.to_owned()));
        }
        let result = matcher::new_match(payload);
        parse(expr, &result)?;
        inner.routes.insert(expr.to_owned(), result);
        if let Err(err) = inner.recompile() {
            inner.routes.remove(expr);
            return Err(err);
        }
        debug!(expr, "route added");
        Ok(())
    }

    /// Replaces or inserts the route for `expr`.
    pub fn upsert(&self, expr: &str, payload: P) -> Result<(), RouteError> {
        let mut inner = self.inner.write().unwrap();
        let result = matcher::new_match(payload);
        parse(expr, &result)?;
        let prev = inner.routes.insert(expr.to_owned(), result);
        if let Err(err) = inner.recompile() {
            match prev {
                Some(prev) => inner.routes.insert(expr.to_owned(), prev),
                None => inner.routes.remove(expr),
            };
            return Err(err);
        }
        debug!(expr, "route upserted");
        Ok(())
    }

    /// Removes the route for `expr`. A no-op when the expression is not
    /// registered.
    pub fn remove(&self, expr: &str) -> Result<(), RouteError> {
        let mut inner = self.inner.write().unwrap();
        let prev = match inner.routes.remove(expr) {
            Some(prev) => prev,
            None => return Ok(()),
        };
        if let Err(err) = inner.recompile() {
            inner.routes.insert(expr.to_owned(), prev);
            return Err(err);
        }
        debug!(expr, "route removed");
        Ok(())
    }

    /// Replaces the whole table in one step. The new set is parsed and
    /// compiled before the live table is touched, so a failure leaves the
    /// previous routes serving.
    pub fn init(&self, routes: HashMap<String, P>) -> Result<(), RouteError> {
        let mut candidate = Inner {
            routes: HashMap::with_capacity(routes.len()),
            compiled: Vec::new(),
        };
        for (expr, payload) in routes {
            let result = matcher::new_match(payload);
            parse(&expr, &result)?;
            candidate.routes.insert(expr, result);
        }
        candidate.recompile()?;

        let mut inner = self.inner.write().unwrap();
        *inner = candidate;
        debug!(routes = inner.routes.len(), "route table initialized");
        Ok(())
    }

    /// Matches a request against the compiled table. The first matcher in
    /// compiled order wins; `Ok(None)` means no route matched.
    pub fn route<R: Request>(&self, req: &R) -> Result<Option<P>, RouteError>
    where
        P: Clone,
    {
        let inner = self.inner.read().unwrap();
        for m in &inner.compiled {
            if let Some(result) = m.matches(req) {
                debug!(method = req.method(), uri = req.raw_uri(), "route matched");
                return Ok(Some(result.payload.clone()));
            }
        }
        debug!(method = req.method(), uri = req.raw_uri(), "no route matched");
        Ok(None)
    }

    /// Number of compiled top-level matchers. Mergeable tries collapse, so
    /// this is usually far below the number of routes; regexp and mixed
    /// matchers stay separate entries.
    #[must_use]
    pub fn matcher_count(&self) -> usize {
        self.inner.read().unwrap().compiled.len()
    }
}

impl<P> Default for Router<P> {
    fn default() -> Router<P> {
        Router::new()
    }
}

impl<P> Inner<P> {
    /// Rebuilds the compiled matcher list. Reverse lexicographic ordering
    /// puts longer paths in front of their prefixes within a common stem;
    /// that is deliberate policy, not a general specificity measure.
    fn recompile(&mut self) -> Result<(), RouteError> {
        let mut entries: Vec<(&String, &MatchRef<P>)> = self.routes.iter().collect();
        entries.sort_by(|a, b| b.0.cmp(a.0));

        let mut compiled: Vec<Matcher<P>> = Vec::new();
        for (expr, result) in entries {
            let matcher = parse(expr, result)?;
            match compiled.pop() {
                Some(last) if last.can_merge(&matcher) => compiled.push(last.merge(matcher)?),
                Some(last) => {
                    compiled.push(last);
                    compiled.push(matcher);
                }
                None => compiled.push(matcher),
            }
        }
        debug!(
            matchers = compiled.len(),
            routes = self.routes.len(),
            "route table compiled"
        );
        self.compiled = compiled;
        Ok(())
    }
}
