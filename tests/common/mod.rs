//! A throwaway HTTP/1.1 server for driving the real fetcher.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use linklabel::config::Config;
use linklabel::fetcher::{FetchConfig, HttpFetcher};
use linklabel::TitleResolver;

pub enum Reply {
    /// 200 with an HTML body
    Html(String),
    /// Any status with an HTML body
    Status(u16, String),
    /// Redirect status with a Location header
    Redirect(u16, String),
    /// Bytes written verbatim
    Raw(Vec<u8>),
    /// Read the request and never answer
    Hang,
}

type Route = dyn Fn(&str) -> Reply + Send + Sync;

pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn start<F>(route: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let route: Arc<Route> = Arc::new(route);

        let log = requests.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let route = route.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    serve(socket, route, log).await;
                });
            }
        });

        Self { addr, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn serve(mut socket: TcpStream, route: Arc<Route>, log: Arc<Mutex<Vec<String>>>) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&head).into_owned();
    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(head);

    let reply = match (*route)(&path) {
        Reply::Html(body) => response(200, &[("Content-Type", "text/html")], body.as_bytes()),
        Reply::Status(code, body) => response(code, &[("Content-Type", "text/html")], body.as_bytes()),
        Reply::Redirect(code, location) => response(code, &[("Location", location.as_str())], b""),
        Reply::Raw(bytes) => bytes,
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            return;
        }
    };

    // The client may hang up early, e.g. once it has read enough of the body
    let _ = socket.write_all(&reply).await;
    let _ = socket.shutdown().await;
}

pub fn response(code: u16, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut out = format!("HTTP/1.1 {} Test\r\n", code);
    for (name, value) in headers {
        out.push_str(&format!("{}: {}\r\n", name, value));
    }
    out.push_str(&format!("Content-Length: {}\r\nConnection: close\r\n\r\n", body.len()));

    let mut bytes = out.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

/// Fetch settings suitable for loopback servers.
pub fn local_fetch_config() -> FetchConfig {
    FetchConfig {
        timeout_secs: 1,
        system_proxy: false,
        ..Default::default()
    }
}

pub fn local_fetcher() -> HttpFetcher {
    HttpFetcher::new(&local_fetch_config()).unwrap()
}

pub fn local_resolver() -> TitleResolver {
    let config = Config {
        fetch: local_fetch_config(),
        ..Default::default()
    };
    TitleResolver::from_config(&config).unwrap()
}

/// A loopback address with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
