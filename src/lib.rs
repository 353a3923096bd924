//! Expression-based HTTP request routing.
//!
//! `routrie` matches requests by hostname, method, path and headers. Routes
//! are written in a small expression language and bound to an arbitrary
//! payload, typically a handler:
//!
//! ```text
//! Matcher("value")          // trie-based matching on a literal
//! Matcher("<string>.value") // trie-based matching with a named parameter
//! MatcherRegexp(".*value")  // regexp-based matching
//! ```
//!
//! The matcher functions:
//!
//! ```text
//! Host("<subdomain>.localhost")                   HostRegexp(".*localhost")
//! Path("/hello/<value>")                          PathRegexp("/hello/.*")
//! Method("GET")                                   MethodRegexp("POST|PUT")
//! Header("Content-Type", "application/<subtype>") HeaderRegexp("Content-Type", "application/.*")
//! ```
//!
//! Matchers combine with `&&`:
//!
//! ```text
//! Host("localhost") && Method("POST") && Path("/v1")
//! ```
//!
//! Trie-based matchers joined by `&&` compile into a single trie spanning
//! the request dimensions, and compatible tries from different routes are
//! merged during compilation. The two routes
//!
//! ```text
//! Host("localhost") && Method("POST") && Path("/v1")
//! Host("localhost") && Method("GET") && Path("/v2")
//! ```
//!
//! share one compiled trie, so matching cost grows with request size, not
//! route count. A regexp matcher anywhere in a route keeps that route out
//! of the merged trie and it is evaluated separately.
//!
//! Pattern parameters inside trie strings follow `<type:name>` with types
//! `string` (up to the next separator), `int` (a digit run) and `path` (to
//! the end of input); `<name>` is shorthand for `<string:name>`. Parameters
//! constrain matching but captured values are not surfaced.
//!
//! # Example
//!
//! ```
//! use routrie::Router;
//!
//! let router: Router<&str> = Router::new();
//! router.add(r#"Host("localhost") && Method("POST") && Path("/v1")"#, "api-v1")?;
//! router.add(r#"Path("/static/<path:rest>")"#, "static")?;
//!
//! let req = http::Request::builder()
//!     .method("POST")
//!     .uri("/v1")
//!     .header("Host", "localhost")
//!     .body(())
//!     .unwrap();
//! assert_eq!(router.route(&req)?, Some("api-v1"));
//! # Ok::<(), routrie::RouteError>(())
//! ```

mod error;
mod iter;
mod mapper;
mod matcher;
mod mux;
mod parse;
mod request;
mod router;

pub use crate::error::RouteError;
pub use crate::mux::Mux;
pub use crate::parse::is_valid;
pub use crate::request::Request;
pub use crate::router::Router;
