// ABOUTME: Test doubles for the orchestrator's HTTP, version-control and clock seams.
// ABOUTME: Each double is cheaply cloneable so tests keep a handle after injection.

#![allow(dead_code)]

use async_trait::async_trait;
use mapdeploy::config::{Config, Secrets, Token};
use mapdeploy::deploy::Orchestrator;
use mapdeploy::http::{HttpClient, HttpError, HttpRequest, HttpResponse};
use mapdeploy::output::{Output, OutputBuffer, OutputMode};
use mapdeploy::poll::Clock;
use mapdeploy::vcs::{CommandOutput, VersionControl};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

type Reply = Result<HttpResponse, HttpError>;

/// Scripted HTTP client keyed by exact URL.
///
/// Replies for a URL are consumed in order; the last one repeats.
/// Unscripted URLs fail with a connection error.
#[derive(Clone, Default)]
pub struct FakeHttp {
    replies: Arc<Mutex<HashMap<String, VecDeque<Reply>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl FakeHttp {
    pub fn reply(&self, url: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn ok(&self, url: &str, body: &str) -> &Self {
        self.reply(url, Ok(HttpResponse::new(200, body)))
    }

    pub fn status(&self, url: &str, status: u16) -> &Self {
        self.reply(url, Ok(HttpResponse::new(status, "")))
    }

    pub fn timeout(&self, url: &str) -> &Self {
        self.reply(url, Err(HttpError::Timeout(Duration::from_secs(10))))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.url == url)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().push(request.clone());

        let mut replies = self.replies.lock();
        match replies.get_mut(&request.url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().expect("queue is not empty"),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(HttpError::Connect(format!("no route to {}", request.url))),
        }
    }
}

/// Version control double that records calls and returns scripted results.
#[derive(Clone)]
pub struct RecordingVcs {
    events: Arc<Mutex<Vec<String>>>,
    stage_results: Arc<Mutex<VecDeque<bool>>>,
    commit_ok: bool,
    push_ok: bool,
    marker: Option<PathBuf>,
}

impl Default for RecordingVcs {
    fn default() -> Self {
        Self {
            events: Arc::default(),
            stage_results: Arc::default(),
            commit_ok: true,
            push_ok: true,
            marker: None,
        }
    }
}

impl RecordingVcs {
    /// Record whether `marker` exists each time something is staged.
    pub fn watching_marker(mut self, marker: PathBuf) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Results for successive stage calls; unlisted calls succeed.
    pub fn stage_results(self, results: &[bool]) -> Self {
        self.stage_results.lock().extend(results.iter().copied());
        self
    }

    pub fn failing_commit(mut self) -> Self {
        self.commit_ok = false;
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.push_ok = false;
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn result(ok: bool, stderr: &str) -> CommandOutput {
        if ok {
            CommandOutput::ok()
        } else {
            CommandOutput::failed(Some(1), stderr)
        }
    }
}

#[async_trait]
impl VersionControl for RecordingVcs {
    async fn stage(&self, cwd: &Path, pathspec: &str) -> CommandOutput {
        let marker = match &self.marker {
            Some(path) => format!(" marker={}", path.exists()),
            None => String::new(),
        };
        self.events.lock().push(format!(
            "stage {} {}{}",
            cwd.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            pathspec,
            marker
        ));
        let ok = self.stage_results.lock().pop_front().unwrap_or(true);
        Self::result(ok, "fatal: pathspec did not match")
    }

    async fn commit(&self, _cwd: &Path, message: &str) -> CommandOutput {
        self.events.lock().push(format!("commit {message}"));
        Self::result(self.commit_ok, "nothing to commit")
    }

    async fn push(&self, _cwd: &Path, remote: &str, branch: &str) -> CommandOutput {
        self.events.lock().push(format!("push {remote} {branch}"));
        Self::result(self.push_ok, "rejected: non-fast-forward")
    }
}

/// Clock that records requested sleeps and returns immediately.
#[derive(Clone, Default)]
pub struct RecordingClock {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingClock {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

#[async_trait]
impl Clock for RecordingClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
    }
}

/// Default config rooted at `project_root`.
pub fn config_at(project_root: &Path) -> Config {
    let mut config = Config::default();
    config.project_root = project_root.to_path_buf();
    config
}

pub fn secrets(backend: Option<&str>, database: Option<&str>) -> Secrets {
    Secrets {
        backend_token: backend.map(Token::new),
        database_token: database.map(Token::new),
    }
}

/// Test harness bundling an orchestrator with handles to its doubles.
pub struct Harness {
    pub orchestrator: Orchestrator<FakeHttp, RecordingVcs, RecordingClock>,
    pub http: FakeHttp,
    pub vcs: RecordingVcs,
    pub clock: RecordingClock,
    pub output: OutputBuffer,
}

impl Harness {
    pub fn new(config: Config, secrets: Secrets, http: FakeHttp, vcs: RecordingVcs) -> Self {
        let clock = RecordingClock::default();
        let (output, buffer) = Output::buffered(OutputMode::Plain);
        let orchestrator = Orchestrator::new(
            config,
            secrets,
            http.clone(),
            vcs.clone(),
            clock.clone(),
            output,
        );
        Self {
            orchestrator,
            http,
            vcs,
            clock,
            output: buffer,
        }
    }
}
