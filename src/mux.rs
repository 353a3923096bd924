use crate::error::RouteError;
use crate::parse::is_valid;
use crate::request::Request;
use crate::router::Router;
use std::collections::HashMap;

/// Facade over [`Router`] for embedding in a server: rewrites expression
/// aliases at registration time and falls back to a default handler when
/// no route matches.
///
/// The handler type stays opaque, so the facade works whether handlers are
/// trait objects, function pointers or plain identifiers.
pub struct Mux<H> {
    router: Router<H>,
    aliases: Vec<Alias>,
    not_found: Option<H>,
}

struct Alias {
    from: String,
    to: String,
}

impl<H> Mux<H> {
    pub fn new() -> Mux<H> {
        Mux {
            router: Router::new(),
            aliases: Vec::new(),
            not_found: None,
        }
    }

    /// Registers an alias: every expression registered afterwards has all
    /// occurrences of `from` replaced with `to`. Aliases apply in
    /// insertion order, so a later alias rewrites the output of an
    /// earlier one.
    pub fn add_alias(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.aliases.push(Alias {
            from: from.into(),
            to: to.into(),
        });
    }

    fn apply_aliases(&self, expr: &str) -> String {
        let mut expr = expr.to_owned();
        for alias in &self.aliases {
            expr = expr.replace(&alias.from, &alias.to);
        }
        expr
    }

    /// Binds a handler to a route expression, replacing any previous one.
    pub fn handle(&self, expr: &str, handler: H) -> Result<(), RouteError> {
        self.router.upsert(&self.apply_aliases(expr), handler)
    }

    /// Removes the route registered for `expr`.
    pub fn remove(&self, expr: &str) -> Result<(), RouteError> {
        self.router.remove(&self.apply_aliases(expr))
    }

    /// Loads a whole handler table at once, replacing the previous one
    /// atomically. Useful at startup to avoid recompiling per route.
    pub fn init_handlers(&self, handlers: HashMap<String, H>) -> Result<(), RouteError> {
        if self.aliases.is_empty() {
            return self.router.init(handlers);
        }
        let mut rewritten = HashMap::with_capacity(handlers.len());
        for (expr, handler) in handlers {
            rewritten.insert(self.apply_aliases(&expr), handler);
        }
        self.router.init(rewritten)
    }

    /// Sets the handler served when no route matches.
    pub fn set_not_found(&mut self, handler: H) {
        self.not_found = Some(handler);
    }

    #[must_use]
    pub fn not_found(&self) -> Option<&H> {
        self.not_found.as_ref()
    }

    /// The underlying route table.
    #[must_use]
    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    /// Returns true when `expr` is a well-formed route expression.
    /// Validation checks the expression as given; aliases only apply when
    /// a route is registered.
    #[must_use]
    pub fn is_valid(&self, expr: &str) -> bool {
        is_valid(expr)
    }
}

impl<H: Clone> Mux<H> {
    /// Routes the request, falling back to the not-found handler. `None`
    /// only when nothing matched and no not-found handler is set.
    pub fn serve<R: Request>(&self, req: &R) -> Option<H> {
        match self.router.route(req) {
            Ok(Some(handler)) => Some(handler),
            Ok(None) | Err(_) => self.not_found.clone(),
        }
    }
}

impl<H> Default for Mux<H> {
    fn default() -> Mux<H> {
        Mux::new()
    }
}
