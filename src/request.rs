use http::Uri;

/// Read-only view of an HTTP request, covering exactly the dimensions the
/// matchers can reach. The router never mutates a request.
///
/// A blanket implementation is provided for [`http::Request`], which is the
/// representation most servers already hold. Implement the trait directly to
/// route a custom request type without converting it.
pub trait Request {
    /// Request method, matched as-is (`GET`, `POST`, ...).
    fn method(&self) -> &str;

    /// Hostname as given, possibly carrying a `:port` suffix. Matching is
    /// case-insensitive and ignores the port.
    fn host(&self) -> &str;

    /// The percent-encoded request target. Path matching operates on the
    /// encoded form, so `/a%2Fb` and `/a/b` are different paths.
    fn raw_uri(&self) -> &str;

    /// Decoded path used as a fallback when `raw_uri` cannot be parsed.
    fn path(&self) -> &str;

    /// First value of the named header; name lookup is case-insensitive.
    /// Additional values of a repeated header are not consulted.
    fn header(&self, name: &str) -> Option<&str>;
}

impl<B> Request for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn host(&self) -> &str {
        // The Host header wins over the URI authority: HTTP/1.1 carries the
        // hostname there, and HTTP/2 `:authority` lands in the same map.
        if let Some(host) = self
            .headers()
            .get(http::header::HOST)
            .and_then(|v| v.to_str().ok())
        {
            return host;
        }
        self.uri().authority().map(|a| a.as_str()).unwrap_or("")
    }

    fn raw_uri(&self) -> &str {
        self.uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }
}

/// Extracts the percent-encoded path of the request target with the query
/// stripped. A target that fails to parse falls back to the decoded path;
/// an empty path maps to `/`.
pub(crate) fn raw_path<R: Request>(req: &R) -> String {
    let path = match req.raw_uri().parse::<Uri>() {
        Ok(uri) => uri.path().to_owned(),
        Err(_) => req.path().to_owned(),
    };
    if path.is_empty() {
        "/".to_owned()
    } else {
        path
    }
}
