mod common;

use common::{get, request};
use routrie::{RouteError, Router};
use std::collections::HashMap;

#[test]
fn empty_operations_succeed() {
    let router: Router<&str> = Router::new();

    assert_eq!(router.get("bla"), None);
    assert!(router.remove("bla").is_ok());
    assert_eq!(router.route(&get("/blabla")).expect("routes"), None);
}

#[test]
fn crud_roundtrip() {
    let router: Router<&str> = Router::new();
    let expr = r#"Path("/r1")"#;

    router.add(expr, "m").expect("adds");
    assert_eq!(router.get(expr), Some("m"));
    router.remove(expr).expect("removes");
    assert_eq!(router.get(expr), None);
    assert_eq!(router.route(&get("/r1")).expect("routes"), None);
}

#[test]
fn adding_the_same_expression_twice_fails() {
    let router: Router<&str> = Router::new();
    let expr = r#"Path("/r1")"#;

    router.add(expr, "m").expect("adds");
    assert_eq!(
        router.add(expr, "m"),
        Err(RouteError::DuplicateRoute(expr.to_owned()))
    );

    // The failure must not disturb the live table.
    assert_eq!(router.route(&get("/r1")).expect("routes"), Some("m"));
}

#[test]
fn a_bad_expression_leaves_existing_routes_intact() {
    let router: Router<&str> = Router::new();

    router.add(r#"Path("/r1")"#, "m").expect("adds");
    assert!(router.add("blabla", "other").is_err());
    assert!(router.add(r#"Path("")"#, "other").is_err());

    assert_eq!(router.route(&get("/r1")).expect("routes"), Some("m"));
    assert_eq!(router.get("blabla"), None);
}

#[test]
fn upsert_replaces_the_payload() {
    let router: Router<&str> = Router::new();
    let expr = r#"Path("/r1")"#;

    router.upsert(expr, "m1").expect("inserts");
    router.upsert(expr, "m2").expect("replaces");
    assert!(router.upsert(r#"Path"/r1")"#, "m2").is_err());

    assert_eq!(router.route(&get("/r1")).expect("routes"), Some("m2"));
}

#[test]
fn remove_is_idempotent() {
    let router: Router<&str> = Router::new();
    let expr = r#"Path("/r1")"#;

    router.add(expr, "m").expect("adds");
    router.remove(expr).expect("removes");
    router.remove(expr).expect("still ok");
    assert_eq!(router.route(&get("/r1")).expect("routes"), None);
}

#[test]
fn routing_is_deterministic() {
    let router: Router<&str> = Router::new();
    router.add(r#"Path("/r/<id>")"#, "a").expect("adds");
    router.add(r#"Path("/r/fixed")"#, "b").expect("adds");

    let first = router.route(&get("/r/fixed")).expect("routes");
    for _ in 0..16 {
        assert_eq!(router.route(&get("/r/fixed")).expect("routes"), first);
    }
}

#[test]
fn init_replaces_the_table_atomically() {
    let router: Router<&str> = Router::new();
    router.add(r#"Path("/old")"#, "old").expect("adds");

    let mut routes = HashMap::new();
    routes.insert(r#"Path("/new1")"#.to_owned(), "n1");
    routes.insert(r#"Path("/new2")"#.to_owned(), "n2");
    router.init(routes).expect("initializes");

    assert_eq!(router.route(&get("/old")).expect("routes"), None);
    assert_eq!(router.route(&get("/new1")).expect("routes"), Some("n1"));
    assert_eq!(router.route(&get("/new2")).expect("routes"), Some("n2"));

    // A bad batch leaves the current table serving.
    let mut bad = HashMap::new();
    bad.insert(r#"Path("/other")"#.to_owned(), "o");
    bad.insert("garbage".to_owned(), "g");
    assert!(router.init(bad).is_err());
    assert_eq!(router.route(&get("/new1")).expect("routes"), Some("n1"));
    assert_eq!(router.route(&get("/other")).expect("routes"), None);
}

#[test]
fn hostname_matching_is_case_insensitive() {
    let router: Router<&str> = Router::new();
    router
        .add(r#"Host("Example.Com") && Path("/p")"#, "m")
        .expect("adds");

    let req = request("GET", "/p", "EXAMPLE.COM", &[]);
    assert_eq!(router.route(&req).expect("routes"), Some("m"));
}

#[test]
fn host_ports_are_stripped() {
    let router: Router<&str> = Router::new();
    router.add(r#"Host("h1") && Path("/p")"#, "m").expect("adds");

    let req = request("GET", "/p", "h1:8080", &[]);
    assert_eq!(router.route(&req).expect("routes"), Some("m"));
}

#[test]
fn int_parameters_reject_trailing_garbage() {
    let router: Router<&str> = Router::new();
    router
        .add(r#"Path("/v<int:version>/domains/<string:name>")"#, "int")
        .expect("adds");
    router
        .add(r#"Path("/<string:version>/domains/<string:name>")"#, "str")
        .expect("adds");

    assert_eq!(
        router.route(&get("/v42/domains/d1")).expect("routes"),
        Some("int")
    );
    assert_eq!(
        router.route(&get("/v42abc/domains/d1")).expect("routes"),
        Some("str")
    );
}

#[test]
fn encoded_paths_match_their_encoded_form() {
    let router: Router<&str> = Router::new();
    router.add(r#"Path("/helloworld%2F")"#, "m").expect("adds");

    assert_eq!(
        router.route(&get("/helloworld%2F?q=b")).expect("routes"),
        Some("m")
    );
    assert_eq!(router.route(&get("/helloworld/")).expect("routes"), None);
}

#[test]
fn first_header_value_wins() {
    let router: Router<&str> = Router::new();
    router
        .add(r#"Header("Accept", "application/json")"#, "json")
        .expect("adds");

    let matching = request(
        "GET",
        "/",
        "",
        &[("Accept", "application/json"), ("Accept", "text/plain")],
    );
    assert_eq!(router.route(&matching).expect("routes"), Some("json"));

    let second_only = request(
        "GET",
        "/",
        "",
        &[("Accept", "text/plain"), ("Accept", "application/json")],
    );
    assert_eq!(router.route(&second_only).expect("routes"), None);
}

/// GitHub-style API corpus: every method+path route compiles into the one
/// merged trie and resolves back to its own payload.
#[test]
fn github_api_corpus() {
    let specs: &[(&str, &str)] = &[
        ("GET", "/authorizations"),
        ("GET", "/authorizations/<id>"),
        ("POST", "/authorizations"),
        ("DELETE", "/authorizations/<id>"),
        ("GET", "/applications/<client_id>/tokens/<access_token>"),
        ("DELETE", "/applications/<client_id>/tokens"),
        ("DELETE", "/applications/<client_id>/tokens/<access_token>"),
        ("GET", "/events"),
        ("GET", "/repos/<owner>/<repo>/events"),
        ("GET", "/networks/<owner>/<repo>/events"),
        ("GET", "/orgs/<org>/events"),
        ("GET", "/users/<user>/received_events"),
        ("GET", "/users/<user>/received_events/public"),
        ("GET", "/users/<user>/events"),
        ("GET", "/users/<user>/events/public"),
        ("GET", "/users/<user>/events/orgs/<org>"),
        ("GET", "/feeds"),
        ("GET", "/notifications"),
        ("GET", "/repos/<owner>/<repo>/notifications"),
        ("PUT", "/notifications"),
        ("PUT", "/repos/<owner>/<repo>/notifications"),
        ("GET", "/notifications/threads/<id>"),
        ("GET", "/notifications/threads/<id>/subscription"),
        ("PUT", "/notifications/threads/<id>/subscription"),
        ("DELETE", "/notifications/threads/<id>/subscription"),
        ("GET", "/repos/<owner>/<repo>/stargazers"),
        ("GET", "/users/<user>/starred"),
        ("GET", "/user/starred"),
        ("GET", "/user/starred/<owner>/<repo>"),
        ("PUT", "/user/starred/<owner>/<repo>"),
        ("DELETE", "/user/starred/<owner>/<repo>"),
        ("GET", "/repos/<owner>/<repo>/subscribers"),
        ("GET", "/users/<user>/subscriptions"),
        ("GET", "/user/subscriptions"),
        ("GET", "/repos/<owner>/<repo>/subscription"),
        ("PUT", "/repos/<owner>/<repo>/subscription"),
        ("DELETE", "/repos/<owner>/<repo>/subscription"),
        ("GET", "/users/<user>/gists"),
        ("GET", "/gists"),
        ("GET", "/gists/<id>"),
        ("POST", "/gists"),
        ("PUT", "/gists/<id>/star"),
        ("DELETE", "/gists/<id>/star"),
        ("GET", "/gists/<id>/star"),
        ("POST", "/gists/<id>/forks"),
        ("DELETE", "/gists/<id>"),
        ("GET", "/repos/<owner>/<repo>/git/blobs/<sha>"),
        ("POST", "/repos/<owner>/<repo>/git/blobs"),
        ("GET", "/repos/<owner>/<repo>/git/commits/<sha>"),
        ("POST", "/repos/<owner>/<repo>/git/commits"),
        ("GET", "/repos/<owner>/<repo>/git/refs"),
        ("POST", "/repos/<owner>/<repo>/git/refs"),
        ("GET", "/repos/<owner>/<repo>/git/tags/<sha>"),
        ("POST", "/repos/<owner>/<repo>/git/tags"),
        ("GET", "/repos/<owner>/<repo>/git/trees/<sha>"),
        ("POST", "/repos/<owner>/<repo>/git/trees"),
        ("GET", "/issues"),
        ("GET", "/user/issues"),
        ("GET", "/orgs/<org>/issues"),
        ("GET", "/repos/<owner>/<repo>/issues"),
        ("GET", "/repos/<owner>/<repo>/issues/<number>"),
        ("POST", "/repos/<owner>/<repo>/issues"),
        ("GET", "/repos/<owner>/<repo>/assignees"),
        ("GET", "/repos/<owner>/<repo>/assignees/<assignee>"),
        ("GET", "/repos/<owner>/<repo>/issues/<number>/comments"),
        ("POST", "/repos/<owner>/<repo>/issues/<number>/comments"),
        ("GET", "/repos/<owner>/<repo>/issues/<number>/events"),
        ("GET", "/repos/<owner>/<repo>/labels"),
        ("GET", "/repos/<owner>/<repo>/labels/<name>"),
        ("POST", "/repos/<owner>/<repo>/labels"),
        ("DELETE", "/repos/<owner>/<repo>/labels/<name>"),
        ("GET", "/repos/<owner>/<repo>/issues/<number>/labels"),
        ("POST", "/repos/<owner>/<repo>/issues/<number>/labels"),
        ("DELETE", "/repos/<owner>/<repo>/issues/<number>/labels/<name>"),
        ("PUT", "/repos/<owner>/<repo>/issues/<number>/labels"),
        ("DELETE", "/repos/<owner>/<repo>/issues/<number>/labels"),
        ("GET", "/repos/<owner>/<repo>/milestones/<number>/labels"),
        ("GET", "/repos/<owner>/<repo>/milestones"),
        ("GET", "/repos/<owner>/<repo>/milestones/<number>"),
        ("POST", "/repos/<owner>/<repo>/milestones"),
        ("DELETE", "/repos/<owner>/<repo>/milestones/<number>"),
        ("GET", "/emojis"),
        ("GET", "/gitignore/templates"),
        ("GET", "/gitignore/templates/<name>"),
        ("POST", "/markdown"),
        ("POST", "/markdown/raw"),
        ("GET", "/meta"),
        ("GET", "/rate_limit"),
        ("GET", "/users/<user>/orgs"),
        ("GET", "/user/orgs"),
        ("GET", "/orgs/<org>"),
        ("GET", "/orgs/<org>/members"),
        ("GET", "/orgs/<org>/members/<user>"),
        ("DELETE", "/orgs/<org>/members/<user>"),
        ("GET", "/orgs/<org>/public_members"),
        ("GET", "/orgs/<org>/public_members/<user>"),
        ("PUT", "/orgs/<org>/public_members/<user>"),
        ("DELETE", "/orgs/<org>/public_members/<user>"),
        ("GET", "/orgs/<org>/teams"),
        ("GET", "/teams/<id>"),
        ("POST", "/orgs/<org>/teams"),
        ("DELETE", "/teams/<id>"),
        ("GET", "/teams/<id>/members"),
        ("GET", "/teams/<id>/members/<user>"),
        ("PUT", "/teams/<id>/members/<user>"),
        ("DELETE", "/teams/<id>/members/<user>"),
        ("GET", "/teams/<id>/repos"),
        ("GET", "/teams/<id>/repos/<owner>/<repo>"),
        ("PUT", "/teams/<id>/repos/<owner>/<repo>"),
        ("DELETE", "/teams/<id>/repos/<owner>/<repo>"),
        ("GET", "/user/teams"),
        ("GET", "/repos/<owner>/<repo>/pulls"),
        ("GET", "/repos/<owner>/<repo>/pulls/<number>"),
        ("POST", "/repos/<owner>/<repo>/pulls"),
        ("GET", "/repos/<owner>/<repo>/pulls/<number>/commits"),
        ("GET", "/repos/<owner>/<repo>/pulls/<number>/files"),
        ("GET", "/repos/<owner>/<repo>/pulls/<number>/merge"),
        ("PUT", "/repos/<owner>/<repo>/pulls/<number>/merge"),
        ("GET", "/repos/<owner>/<repo>/pulls/<number>/comments"),
        ("PUT", "/repos/<owner>/<repo>/pulls/<number>/comments"),
        ("GET", "/user/repos"),
        ("GET", "/users/<user>/repos"),
        ("GET", "/orgs/<org>/repos"),
        ("GET", "/repositories"),
        ("POST", "/user/repos"),
        ("POST", "/orgs/<org>/repos"),
        ("GET", "/repos/<owner>/<repo>"),
        ("GET", "/repos/<owner>/<repo>/contributors"),
        ("GET", "/repos/<owner>/<repo>/languages"),
        ("GET", "/repos/<owner>/<repo>/teams"),
        ("GET", "/repos/<owner>/<repo>/tags"),
        ("GET", "/repos/<owner>/<repo>/branches"),
        ("GET", "/repos/<owner>/<repo>/branches/<branch>"),
        ("DELETE", "/repos/<owner>/<repo>"),
        ("GET", "/repos/<owner>/<repo>/collaborators"),
        ("GET", "/repos/<owner>/<repo>/collaborators/<user>"),
        ("PUT", "/repos/<owner>/<repo>/collaborators/<user>"),
        ("DELETE", "/repos/<owner>/<repo>/collaborators/<user>"),
        ("GET", "/repos/<owner>/<repo>/comments"),
        ("GET", "/repos/<owner>/<repo>/commits/<sha>/comments"),
        ("POST", "/repos/<owner>/<repo>/commits/<sha>/comments"),
        ("GET", "/repos/<owner>/<repo>/comments/<id>"),
        ("DELETE", "/repos/<owner>/<repo>/comments/<id>"),
        ("GET", "/repos/<owner>/<repo>/commits"),
        ("GET", "/repos/<owner>/<repo>/commits/<sha>"),
        ("GET", "/repos/<owner>/<repo>/readme"),
        ("GET", "/repos/<owner>/<repo>/keys"),
        ("GET", "/repos/<owner>/<repo>/keys/<id>"),
        ("POST", "/repos/<owner>/<repo>/keys"),
        ("DELETE", "/repos/<owner>/<repo>/keys/<id>"),
        ("GET", "/repos/<owner>/<repo>/downloads"),
        ("GET", "/repos/<owner>/<repo>/downloads/<id>"),
        ("DELETE", "/repos/<owner>/<repo>/downloads/<id>"),
        ("GET", "/repos/<owner>/<repo>/forks"),
        ("POST", "/repos/<owner>/<repo>/forks"),
        ("GET", "/repos/<owner>/<repo>/hooks"),
        ("GET", "/repos/<owner>/<repo>/hooks/<id>"),
        ("POST", "/repos/<owner>/<repo>/hooks"),
        ("POST", "/repos/<owner>/<repo>/hooks/<id>/tests"),
        ("DELETE", "/repos/<owner>/<repo>/hooks/<id>"),
        ("POST", "/repos/<owner>/<repo>/merges"),
        ("GET", "/repos/<owner>/<repo>/releases"),
        ("GET", "/repos/<owner>/<repo>/releases/<id>"),
        ("POST", "/repos/<owner>/<repo>/releases"),
        ("DELETE", "/repos/<owner>/<repo>/releases/<id>"),
        ("GET", "/repos/<owner>/<repo>/releases/<id>/assets"),
        ("GET", "/repos/<owner>/<repo>/stats/contributors"),
        ("GET", "/repos/<owner>/<repo>/stats/commit_activity"),
        ("GET", "/repos/<owner>/<repo>/stats/code_frequency"),
        ("GET", "/repos/<owner>/<repo>/stats/participation"),
        ("GET", "/repos/<owner>/<repo>/stats/punch_card"),
        ("GET", "/repos/<owner>/<repo>/statuses/<ref>"),
        ("POST", "/repos/<owner>/<repo>/statuses/<ref>"),
        ("GET", "/search/repositories"),
        ("GET", "/search/code"),
        ("GET", "/search/issues"),
        ("GET", "/search/users"),
        ("GET", "/legacy/issues/search/<owner>/<repository>/<state>/<keyword>"),
        ("GET", "/legacy/repos/search/<keyword>"),
        ("GET", "/legacy/user/search/<keyword>"),
        ("GET", "/legacy/user/email/<email>"),
        ("GET", "/users/<user>"),
        ("GET", "/user"),
        ("GET", "/users"),
        ("GET", "/user/emails"),
        ("POST", "/user/emails"),
        ("DELETE", "/user/emails"),
        ("GET", "/users/<user>/followers"),
        ("GET", "/user/followers"),
        ("GET", "/users/<user>/following"),
        ("GET", "/user/following"),
        ("GET", "/user/following/<user>"),
        ("GET", "/users/<user>/following/<target_user>"),
        ("PUT", "/user/following/<user>"),
        ("DELETE", "/user/following/<user>"),
        ("GET", "/users/<user>/keys"),
        ("GET", "/user/keys"),
        ("GET", "/user/keys/<id>"),
        ("POST", "/user/keys"),
        ("DELETE", "/user/keys/<id>"),
    ];

    let router: Router<String> = Router::new();
    for (method, path) in specs {
        let expr = format!(r#"Method("{}") && Path("{}")"#, method, path);
        router.add(&expr, expr.clone()).expect("route adds");
    }
    assert_eq!(router.matcher_count(), 1);

    for (method, path) in specs {
        let expr = format!(r#"Method("{}") && Path("{}")"#, method, path);
        // Parameters accept their own placeholder text as a value.
        let concrete = path.replace('<', "p-").replace('>', "");
        let out = router
            .route(&request(method, &concrete, "", &[]))
            .expect("routes");
        assert_eq!(out, Some(expr), "{} {}", method, path);
    }
}
