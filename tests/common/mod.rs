#![allow(dead_code)]

/// Builds a request for routing tests. Empty `method` defaults to GET and
/// an empty `host` leaves the Host header unset.
pub fn request(
    method: &str,
    uri: &str,
    host: &str,
    headers: &[(&str, &str)],
) -> http::Request<()> {
    let method = if method.is_empty() { "GET" } else { method };
    let mut builder = http::Request::builder().method(method).uri(uri);
    if !host.is_empty() {
        builder = builder.header("Host", host);
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(()).expect("request builds")
}

pub fn get(uri: &str) -> http::Request<()> {
    request("GET", uri, "", &[])
}
