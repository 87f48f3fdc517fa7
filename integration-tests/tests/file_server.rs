use integration_tests::harness::TestServer;
use pretty_assertions::assert_eq;
use reqwest::{Method, StatusCode, header};

//-----------------------------------------------------------------------------
// Files
//-----------------------------------------------------------------------------
#[test]
fn serves_file_below_prefix() {
    let srv = TestServer::start("basic");

    let res = srv.get("/test/css/style.css").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/css"
    );
    assert_eq!(
        res.headers()[header::CACHE_CONTROL].to_str().unwrap(),
        "public, max-age=3600"
    );
    assert!(res.headers().contains_key(header::LAST_MODIFIED));
    assert_eq!(res.text().unwrap(), "body { color: red }");
}

#[test]
fn mount_root_serves_index() {
    let srv = TestServer::start("basic");

    let res = srv.get("/test/").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().unwrap(), "<h1>home</h1>");
}

#[test]
fn missing_file_is_not_found() {
    let srv = TestServer::start("basic");

    let res = srv.get("/test/nofile.js").send().unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().unwrap(), "Cannot open file or Directory");
}

#[test]
fn head_reports_length_without_body() {
    let srv = TestServer::start("basic");

    let res = srv.head("/test/css/style.css").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_LENGTH].to_str().unwrap(),
        "19"
    );
    assert!(!res.headers().contains_key(header::CACHE_CONTROL));
    assert_eq!(res.bytes().unwrap().len(), 0);
}

#[test]
fn other_methods_are_not_served() {
    let srv = TestServer::start("basic");

    let res = srv
        .request(Method::POST, "/test/index.html")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[test]
fn unmounted_path_is_not_found() {
    let srv = TestServer::start("basic");

    let res = srv.get("/elsewhere/index.html").send().unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

//-----------------------------------------------------------------------------
// Directories
//-----------------------------------------------------------------------------
#[test]
fn directory_without_index_is_forbidden() {
    let srv = TestServer::start("basic");

    let res = srv.get("/test/img/").send().unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[test]
fn browse_mount_lists_directory() {
    let srv = TestServer::start("basic");

    let res = srv.get("/dir/img/").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/html"
    );
    let body = res.text().unwrap();
    let parent = body.find("href=\"/dir/img/..\"").unwrap();
    let fiber = body.find(">fiber.png<").unwrap();
    let gopher = body.find(">gopher.png<").unwrap();
    assert!(parent < fiber && fiber < gopher, "unexpected listing: {body}");
    assert!(body.contains("file, 4 bytes"));
}

#[test]
fn directory_with_index_serves_it_even_when_browsing() {
    let srv = TestServer::start("basic");

    let res = srv.get("/dir/").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().unwrap(), "<h1>home</h1>");
}

//-----------------------------------------------------------------------------
// Mount options
//-----------------------------------------------------------------------------
#[test]
fn not_found_file_serves_entry_point() {
    let srv = TestServer::start("basic");

    let res = srv.get("/spa/some/client/route").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().unwrap(), "<h1>home</h1>");
}

#[test]
fn path_prefix_remaps_lookup() {
    let srv = TestServer::start("basic");

    let res = srv.get("/prefix/fiber.png").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "image/png"
    );
    assert_eq!(res.bytes().unwrap().as_ref(), b"\x89PNG");
}

#[test]
fn token_mount_rejects_missing_token() {
    let srv = TestServer::start("basic");

    let res = srv.get("/private/index.html").send().unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.text().unwrap(), "Authorize Fail!");
}

#[test]
fn token_mount_accepts_matching_token() {
    let srv = TestServer::start("basic");

    let res = srv
        .get("/private/index.html")
        .header("token", "123")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().unwrap(), "<h1>home</h1>");
}
