use crate::iter::{CharIter, SepVec, SeqVec};
use crate::request::{raw_path, Request};
use smallvec::smallvec;

pub(crate) const PATH_SEP: u8 = b'/';
pub(crate) const DOMAIN_SEP: u8 = b'.';
pub(crate) const HEADER_SEP: u8 = b'/';
pub(crate) const METHOD_SEP: u8 = b' ';

/// Extracts one matchable string (and the separator that structures it)
/// from a request. Each mapper is one matching dimension; chained tries
/// match over a `Seq` of them.
#[derive(Clone, Debug)]
pub(crate) enum Mapper {
    Method,
    Host,
    Path,
    Header(String),
    Seq(Vec<Mapper>),
}

impl Mapper {
    /// Concatenates two mappers into a sequence, flattening nested ones so
    /// a repeatedly chained trie keeps a flat dimension list.
    pub(crate) fn seq(a: Mapper, b: Mapper) -> Mapper {
        let mut out = Vec::new();
        for m in [a, b] {
            match m {
                Mapper::Seq(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        Mapper::Seq(out)
    }

    pub(crate) fn separator(&self) -> u8 {
        match self {
            Mapper::Method => METHOD_SEP,
            Mapper::Host => DOMAIN_SEP,
            Mapper::Path => PATH_SEP,
            Mapper::Header(_) => HEADER_SEP,
            Mapper::Seq(ms) => ms.first().map_or(PATH_SEP, Mapper::separator),
        }
    }

    pub(crate) fn map_request<R: Request>(&self, req: &R) -> String {
        match self {
            Mapper::Method => req.method().to_owned(),
            Mapper::Host => host_of(req),
            Mapper::Path => raw_path(req),
            Mapper::Header(name) => req.header(name).unwrap_or("").to_owned(),
            Mapper::Seq(ms) => ms.iter().map(|m| m.map_request(req)).collect(),
        }
    }

    /// Builds the matching cursor for a request, one string per dimension.
    pub(crate) fn new_iter<R: Request>(&self, req: &R) -> CharIter {
        match self {
            Mapper::Seq(ms) => {
                let seq: SeqVec = ms.iter().map(|m| m.map_request(req)).collect();
                let sep: SepVec = ms.iter().map(Mapper::separator).collect();
                CharIter::new(seq, sep)
            }
            _ => CharIter::new(smallvec![self.map_request(req)], smallvec![self.separator()]),
        }
    }

    /// Two mappers are equivalent when they read the same dimensions; for
    /// sequences the shorter may be an element-wise prefix of the longer.
    /// Returns the mapper a merged trie should keep, which is the longer of
    /// the two sequences.
    pub(crate) fn equivalent(&self, other: &Mapper) -> Option<Mapper> {
        match (self, other) {
            (Mapper::Method, Mapper::Method)
            | (Mapper::Host, Mapper::Host)
            | (Mapper::Path, Mapper::Path) => Some(self.clone()),
            (Mapper::Header(a), Mapper::Header(b)) if a == b => Some(self.clone()),
            (Mapper::Seq(a), Mapper::Seq(b)) => {
                let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
                for (s, l) in short.iter().zip(long.iter()) {
                    s.equivalent(l)?;
                }
                Some(Mapper::Seq(long.clone()))
            }
            _ => None,
        }
    }
}

/// Lowercased hostname with any port suffix stripped.
fn host_of<R: Request>(req: &R) -> String {
    let mut host = req.host().to_lowercase();
    if let Some(colon) = host.find(':') {
        host.truncate(colon);
    }
    host
}
