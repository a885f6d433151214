#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use chrono::{DateTime, Local};
use url::Url;

use pkgdock_core::catalog::UnifiedPackage;
use pkgdock_core::config::RegistryUrls;
use pkgdock_core::registry::Transport;
use pkgdock_core::view::PackageView;

pub const UNITY_URL: &str = "https://unity.example/packages.json";
pub const VERDACCIO_URL: &str = "https://npm.example/-/verdaccio/data/packages";

pub fn urls() -> RegistryUrls {
    RegistryUrls::new(UNITY_URL, VERDACCIO_URL)
}

/// Transport answering from a fixed table of canned responses.
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: HashMap<String, Result<String, String>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn fail(mut self, url: &str, reason: &str) -> Self {
        self.responses.insert(url.to_string(), Err(reason.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &Url) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());
        // Let the other request make progress before answering.
        tokio::task::yield_now().await;

        match self.responses.get(url.as_str()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(reason)) => anyhow::bail!("{}", reason),
            None => anyhow::bail!("HTTP 404 Not Found from {}", url),
        }
    }
}

/// Everything the presenter asked the view to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Display(Vec<String>),
    Empty(String),
    Details(Option<String>),
    LastUpdate,
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub last_update: Option<DateTime<Local>>,
}

impl RecordingView {
    /// Display names from the most recent list render.
    pub fn last_list(&self) -> Option<&[String]> {
        self.calls.iter().rev().find_map(|call| match call {
            ViewCall::Display(names) => Some(names.as_slice()),
            _ => None,
        })
    }

    pub fn last_call(&self) -> Option<&ViewCall> {
        self.calls.last()
    }
}

impl PackageView for RecordingView {
    fn display_packages(&mut self, packages: &[&UnifiedPackage]) {
        self.calls.push(ViewCall::Display(
            packages.iter().map(|p| p.display_name().to_string()).collect(),
        ));
    }

    fn show_empty_message(&mut self, message: &str) {
        self.calls.push(ViewCall::Empty(message.to_string()));
    }

    fn update_details(&mut self, package: Option<&UnifiedPackage>) {
        self.calls
            .push(ViewCall::Details(package.map(|p| p.name().to_string())));
    }

    fn set_last_update_time(&mut self, time: DateTime<Local>) {
        self.last_update = Some(time);
        self.calls.push(ViewCall::LastUpdate);
    }
}

/// Bare JSON array as served by the Unity registry.
#[derive(Debug, Default)]
pub struct UnityBody(Vec<serde_json::Value>);

impl UnityBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(mut self, name: &str, display: &str, versions: &[&str]) -> Self {
        let versions: serde_json::Map<String, serde_json::Value> = versions
            .iter()
            .map(|v| {
                (
                    v.to_string(),
                    serde_json::Value::String(format!("https://cdn.example/{name}-{v}.tgz")),
                )
            })
            .collect();
        self.0.push(serde_json::json!({
            "name": name,
            "displayName": display,
            "description": format!("{display} for Unity"),
            "versions": versions,
        }));
        self
    }

    pub fn build(&self) -> String {
        serde_json::Value::Array(self.0.clone()).to_string()
    }
}

/// Bare JSON array as served by Verdaccio's search endpoint.
#[derive(Debug, Default)]
pub struct VerdaccioBody(Vec<serde_json::Value>);

impl VerdaccioBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(mut self, name: &str, display: &str, version: &str) -> Self {
        self.0.push(serde_json::json!({
            "name": name,
            "displayName": display,
            "description": format!("{display} from Verdaccio"),
            "version": version,
        }));
        self
    }

    pub fn build(&self) -> String {
        serde_json::Value::Array(self.0.clone()).to_string()
    }
}

/// Serve one canned HTTP response on a loopback port and return its URL.
pub fn serve_once(status: &str, body: &str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(&stream);
        let mut line = String::new();
        // Drain the request head before answering.
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    Url::parse(&format!("http://127.0.0.1:{port}/packages")).unwrap()
}
