use crate::error::RouteError;
use crate::iter::CharIter;
use crate::mapper::Mapper;
use crate::request::Request;
use std::fmt;

use super::pattern::{parse_pattern, Pattern};
use super::MatchRef;

/// Trie matcher over one request dimension, or several once chained.
///
/// Parsing turns a pattern string into a single-child chain of nodes, one
/// per literal byte or `<...>` pattern matcher. `merge` superimposes two
/// tries over equivalent mappers into one; `chain` concatenates two tries
/// across a dimension boundary. Both build new trees; evaluation treats a
/// trie as immutable.
pub(crate) struct Trie<P> {
    root: TrieNode<P>,
    pub(super) mapper: Mapper,
}

impl<P> Trie<P> {
    pub(crate) fn parse(
        expression: &str,
        mapper: Mapper,
        result: MatchRef<P>,
    ) -> Result<Trie<P>, RouteError> {
        if expression.is_empty() {
            return Err(RouteError::ExpressionSyntax(
                "empty matcher expression".to_owned(),
            ));
        }
        let mut root = TrieNode::new(NodeKind::Root);
        root.parse_expression(expression.as_bytes(), &result)?;
        Ok(Trie { root, mapper })
    }

    pub(crate) fn matches<R: Request>(&self, req: &R) -> Option<MatchRef<P>> {
        let mut it = self.mapper.new_iter(req);
        self.root.search(&mut it).cloned()
    }

    pub(crate) fn can_merge(&self, other: &Trie<P>) -> bool {
        self.mapper.equivalent(&other.mapper).is_some()
    }

    /// Structural union of two tries over equivalent mappers. The receiver
    /// is the accumulating side: on identical paths its match wins.
    pub(crate) fn merge(self, other: Trie<P>) -> Result<Trie<P>, RouteError> {
        let mapper = self.mapper.equivalent(&other.mapper).ok_or_else(|| {
            RouteError::CompileFailure("cannot merge tries over different mappers".to_owned())
        })?;
        Ok(Trie {
            root: self.root.merge(other.root),
            mapper,
        })
    }

    /// Concatenates the accepting path of `self` with the root of `other`,
    /// crossing into the next dimension. The combined trie matches over
    /// the sequence of both mappers.
    pub(crate) fn chain(mut self, other: Trie<P>) -> Result<Trie<P>, RouteError> {
        let node = self.root.find_match_node_mut().ok_or_else(|| {
            RouteError::CompileFailure("trie has no match node to chain through".to_owned())
        })?;
        node.matches.clear();
        node.children = vec![other.root];
        self.root.relabel();
        Ok(Trie {
            root: self.root,
            mapper: Mapper::seq(self.mapper, other.mapper),
        })
    }
}

impl<P> fmt::Debug for Trie<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.dump(f, 0)
    }
}

struct TrieNode<P> {
    /// Dimension index. Every node up through the end of dimension k
    /// carries k; chaining relabels the combined tree.
    level: usize,
    kind: NodeKind,
    children: Vec<TrieNode<P>>,
    /// Non-empty marks a node terminal for at least one expression. The
    /// first entry wins when merged routes collide on the same path.
    matches: Vec<MatchRef<P>>,
}

/// A node matches a single literal byte, runs a pattern matcher, or is a
/// root that consumes nothing.
enum NodeKind {
    Root,
    Char(u8),
    Pattern(Pattern),
}

impl<P> TrieNode<P> {
    fn new(kind: NodeKind) -> TrieNode<P> {
        TrieNode {
            level: 0,
            kind,
            children: Vec::new(),
            matches: Vec::new(),
        }
    }

    fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }

    /// Builds the single-child chain for the remainder of a pattern
    /// string; the final node receives the match.
    fn parse_expression(&mut self, rest: &[u8], m: &MatchRef<P>) -> Result<(), RouteError> {
        if rest.is_empty() {
            self.matches = vec![m.clone()];
            return Ok(());
        }
        let (kind, consumed) = match parse_pattern(rest)? {
            Some((pattern, consumed)) => (NodeKind::Pattern(pattern), consumed),
            None => (NodeKind::Char(rest[0]), 1),
        };
        let mut child = TrieNode::new(kind);
        child.parse_expression(&rest[consumed..], m)?;
        self.children = vec![child];
        Ok(())
    }

    fn find_match_node_mut(&mut self) -> Option<&mut TrieNode<P>> {
        if !self.matches.is_empty() {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_match_node_mut())
    }

    /// Recomputes dimension labels from this root after a chain: embedded
    /// roots open the next dimension, other nodes inherit their parent's,
    /// and recursion stops at match nodes.
    fn relabel(&mut self) {
        self.level = 0;
        for c in &mut self.children {
            c.relabel_from(0);
        }
    }

    fn relabel_from(&mut self, mut level: usize) {
        if self.is_root() {
            level += 1;
        }
        self.level = level;
        if !self.matches.is_empty() {
            return;
        }
        for c in &mut self.children {
            c.relabel_from(level);
        }
    }

    /// Nodes merge when they sit on the same dimension and match the same
    /// byte or carry equal pattern matchers.
    fn mergeable(&self, other: &TrieNode<P>) -> bool {
        if self.level != other.level {
            return false;
        }
        match (&self.kind, &other.kind) {
            (NodeKind::Root, NodeKind::Root) => true,
            (NodeKind::Char(a), NodeKind::Char(b)) => a == b,
            (NodeKind::Pattern(a), NodeKind::Pattern(b)) => a == b,
            _ => false,
        }
    }

    /// Child order after a merge decides which route wins an ambiguity:
    /// merged pairs first, then the receiver's unmerged children, then the
    /// other side's.
    fn merge(self, other: TrieNode<P>) -> TrieNode<P> {
        let mut children = Vec::with_capacity(self.children.len());
        let mut unmerged = Vec::new();
        let mut rest = other.children;
        for c in self.children {
            match rest.iter().position(|o| c.mergeable(o)) {
                Some(idx) => {
                    let o = rest.remove(idx);
                    children.push(c.merge(o));
                }
                None => unmerged.push(c),
            }
        }
        children.extend(unmerged);
        children.extend(rest);

        let mut matches = self.matches;
        matches.extend(other.matches);
        TrieNode {
            level: self.level,
            kind: self.kind,
            children,
            matches,
        }
    }

    /// Consumes this node's portion of the input. A literal mismatch
    /// pushes the byte back so sibling branches see an untouched cursor.
    fn match_node(&self, it: &mut CharIter) -> bool {
        if it.level() != self.level {
            return false;
        }
        match &self.kind {
            NodeKind::Root => true,
            NodeKind::Pattern(p) => p.matches(it),
            NodeKind::Char(c) => match it.next() {
                None => false,
                Some((b, _)) if b == *c => true,
                Some(_) => {
                    it.push_back();
                    false
                }
            },
        }
    }

    fn search(&self, it: &mut CharIter) -> Option<&MatchRef<P>> {
        if !self.match_node(it) {
            return None;
        }

        if !self.matches.is_empty() && it.is_end() {
            return self.matches.first();
        }

        for c in &self.children {
            let p = it.position();
            if let Some(m) = c.search(it) {
                return Some(m);
            }
            it.set_position(p);
        }

        // The route terminates in this dimension but the cursor has moved
        // into a chained dimension no child could consume.
        if !self.matches.is_empty() && it.level() > self.level {
            return self.matches.first();
        }

        None
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:1$}", "", depth)?;
        let tag = if self.matches.is_empty() {
            "node"
        } else {
            "match"
        };
        match &self.kind {
            NodeKind::Root => writeln!(f, "root({})", self.level)?,
            NodeKind::Char(c) => writeln!(f, "{}({}:{})", tag, self.level, char::from(*c))?,
            NodeKind::Pattern(p) => writeln!(f, "{}({}:{})", tag, self.level, p)?,
        }
        for c in &self.children {
            c.dump(f, depth + 1)?;
        }
        Ok(())
    }
}
