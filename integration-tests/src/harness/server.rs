use std::net::TcpStream;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use staticfs::build_pingora_server;
use staticfs_core::config::StaticfsConfig;

use crate::harness::{events, init_test_tracing};

/// Handle to a running staticfs test server.
pub struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    /// Start a staticfs instance from a TOML fixture under `fixtures/config`.
    ///
    /// The listen port is allocated dynamically and mount roots are resolved
    /// against the fixtures directory, so servers can run in parallel.
    pub fn start(fixture: &str) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        let listen_port = free_port();

        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixture_file = fixtures.join("config").join(format!("{fixture}.toml"));

        assert!(
            fixture_file.exists(),
            "fixture config does not exist: {:?}",
            fixture_file
        );

        let text = std::fs::read_to_string(&fixture_file).expect("failed to read fixture config");
        let mut cfg = StaticfsConfig::parse(&text).expect("failed to parse fixture config");

        // Patch config in memory.
        cfg.listen = format!("127.0.0.1:{listen_port}");
        for mount in &mut cfg.mounts {
            mount.root = fixtures.join(&mount.root);
        }
        cfg.validate().expect("fixture config is invalid");

        let server = build_pingora_server(&cfg).expect("failed to build staticfs server");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("failed to build client");

        Self { base_url, client }
    }

    /// Convenience helper for GET requests.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn head(&self, path: &str) -> RequestBuilder {
        self.request(Method::HEAD, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
