//! # Router Module
//!
//! The route table: expression-keyed storage of payloads plus the compiled
//! matcher list requests are evaluated against.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: after every mutation the full expression set is
//!    re-parsed and compiled. Expressions are ordered reverse
//!    lexicographically and adjacent structurally compatible tries are
//!    merged, so large groups of similar routes collapse into a single
//!    trie.
//!
//! 2. **Matching**: an incoming request walks the compiled matchers in
//!    order; the first match returns its payload.
//!
//! Readers and writers share a readers-writer lock. Matching takes the
//! read side, so any number of requests route concurrently; mutations are
//! serialized and publish the recompiled list atomically. A mutation that
//! fails to compile rolls the table back and keeps the previous compiled
//! list live.

mod core;

pub use self::core::Router;
