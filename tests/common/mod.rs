// Shared helpers for integration tests.
//
// Provides on-disk install trees, gzip tarball builders, and a one-shot
// HTTP server so each integration test can run against an isolated
// environment without repeating boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fs::File;
use std::io::{BufRead as _, BufReader, Write as _};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use flate2::Compression;
use flate2::write::GzEncoder;

use toolstrap::config::HttpConfig;
use toolstrap::fetch::Fetcher;

/// Create an empty file at `path`, creating its parent directories.
pub fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().expect("path has parent")).expect("create parents");
    std::fs::write(path, "").expect("write file");
}

/// Write a gzip-compressed tarball at `path` holding `entries`.
pub fn write_tgz(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).expect("append entry");
    }
    builder
        .into_inner()
        .expect("finish tar")
        .finish()
        .expect("finish gzip");
}

/// A fetcher whose HTTP client ignores proxy variables from the environment.
pub fn direct_fetcher() -> Fetcher {
    Fetcher::from_config(&HttpConfig {
        connect_timeout_secs: 5,
        timeout_secs: 10,
        use_env_proxy: false,
        ..HttpConfig::default()
    })
}

/// A loopback HTTP server that answers exactly one request with a canned
/// response and then closes the connection.
pub struct OneShotServer {
    /// Base URL, e.g. `http://127.0.0.1:4000`.
    pub base: String,
    handle: JoinHandle<()>,
}

impl OneShotServer {
    /// Serve `body` with `status`, advertising `content_length` bytes.
    pub fn start(status: &str, content_length: usize, body: &[u8]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {content_length}\r\nConnection: close\r\n\r\n"
        );
        let body = body.to_vec();

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut line = String::new();
            while reader.read_line(&mut line).expect("read request") > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            stream.write_all(head.as_bytes()).expect("write head");
            let _ = stream.write_all(&body);
            let _ = stream.flush();
        });
        Self { base, handle }
    }

    /// Serve `body` in full with `200 OK`.
    pub fn ok(body: &[u8]) -> Self {
        Self::start("200 OK", body.len(), body)
    }

    /// URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    /// Wait for the server thread to finish.
    pub fn join(self) {
        self.handle.join().expect("server thread");
    }
}

/// Directory entries of `dir`, sorted by file name.
pub fn entries(dir: &Path) -> Vec<PathBuf> {
    let mut names: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").path())
        .collect();
    names.sort();
    names
}

