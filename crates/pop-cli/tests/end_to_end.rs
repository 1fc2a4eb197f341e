//! End-to-end tests: CSV -> store -> GET /population -> viewer

use pop_api::ApiState;
use pop_client::{Fetcher, PlaybackController, ViewState};
use pop_core::{PopulationRecord, DEFAULT_COUNTRIES};
use pop_db::{load_csv, DuckDbBackend, PopulationStore};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

const FIXTURE: &str = "tests/fixtures/population.csv";

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(FIXTURE)
}

/// The popchart binary, isolated from any ambient POPCHART_* settings
fn popchart(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_popchart"));
    cmd.current_dir(dir);
    for var in [
        "POPCHART_CONFIG",
        "POPCHART_DATABASE",
        "POPCHART_CSV_PATH",
        "POPCHART_HOST",
        "POPCHART_PORT",
        "POPCHART_API_URL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// A running `popchart serve`, killed when dropped
struct ServeProcess {
    child: Child,
    base: String,
}

impl ServeProcess {
    fn start(dir: &Path, args: &[&str]) -> Self {
        let port = free_port();
        let child = popchart(dir)
            .arg("serve")
            .args(["--host", "127.0.0.1", "--port", &port.to_string()])
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        Self {
            child,
            base: format!("http://127.0.0.1:{port}"),
        }
    }

    /// Poll until the service returns `expected` records
    async fn wait_for_records(&mut self, expected: usize) -> Vec<PopulationRecord> {
        let fetcher = Fetcher::new(&self.base);
        for _ in 0..200 {
            if let Some(status) = self.child.try_wait().unwrap() {
                panic!("serve exited early: {status}");
            }
            if let Ok(records) = fetcher.fetch().await {
                if records.len() == expected {
                    return records;
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("{} never returned {expected} records", self.base);
    }
}

impl Drop for ServeProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

async fn serve_fixture() -> String {
    let store: Arc<dyn PopulationStore> = Arc::new(DuckDbBackend::in_memory().unwrap());
    let summary = load_csv(store.as_ref(), Path::new(FIXTURE)).await.unwrap();
    assert_eq!(summary.rows, 6);

    let countries = DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect();
    let state = Arc::new(ApiState::new(store, countries));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(pop_api::serve(listener, state));
    format!("http://{addr}")
}

/// The USA/Brazil 2000-2001 scenario, through every component
#[tokio::test]
async fn test_example_scenario() {
    let base = serve_fixture().await;

    // Germany is stored but outside the allowlist
    let mut records = Fetcher::new(&base).fetch().await.unwrap();
    records.sort_by(|a, b| (a.year, &a.country).cmp(&(b.year, &b.country)));
    assert_eq!(
        records,
        vec![
            PopulationRecord::new(2000, "Brazil", 174_000_000),
            PopulationRecord::new(2000, "USA", 282_000_000),
            PopulationRecord::new(2001, "Brazil", 177_000_000),
            PopulationRecord::new(2001, "USA", 285_000_000),
        ]
    );

    let (mut controller, mut ticks) = PlaybackController::new(Duration::from_millis(20));
    controller.on_loaded(Fetcher::new(&base).load().await);

    let ready = controller.state().ready().unwrap();
    assert_eq!(ready.dataset().years(), &[2000, 2001]);
    assert_eq!(ready.selected_year(), 2000);
    let chart = ready.chart();
    assert_eq!(chart.data.labels, vec!["USA", "Brazil"]);
    assert_eq!(chart.data.datasets[0].data, vec![282_000_000, 174_000_000]);

    controller.toggle_play();
    let tick = ticks.recv().await.unwrap();
    assert_eq!(controller.on_tick(tick), Some(2001));

    let chart = controller.state().ready().unwrap().chart();
    assert_eq!(chart.data.labels, vec!["USA", "Brazil"]);
    assert_eq!(chart.data.datasets[0].data, vec![285_000_000, 177_000_000]);

    controller.toggle_play();
    assert!(!controller.has_timer());
}

#[tokio::test]
async fn test_empty_store_puts_viewer_in_error_state() {
    let store: Arc<dyn PopulationStore> = Arc::new(DuckDbBackend::in_memory().unwrap());
    let state = Arc::new(ApiState::new(store, vec!["USA".to_string()]));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(pop_api::serve(listener, state));

    let (mut controller, _ticks) = PlaybackController::new(Duration::from_millis(20));
    controller.on_loaded(Fetcher::new(&format!("http://{addr}")).load().await);

    match controller.state() {
        ViewState::Error { message } => assert!(message.contains("No data available")),
        other => panic!("expected error state, got {other:?}"),
    }
}

#[test]
fn test_ingest_command_appends_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("population.duckdb");

    let run = || {
        popchart(dir.path())
            .arg("ingest")
            .arg("--database")
            .arg(&database)
            .arg("--csv-path")
            .arg(fixture_path())
            .output()
            .unwrap()
    };

    let first = run();
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert!(String::from_utf8_lossy(&first.stdout).contains("Loaded 6 rows"));

    let second = run();
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stdout).contains("(12 rows stored)"));
}

#[test]
fn test_ingest_command_fails_on_missing_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output = popchart(dir.path())
        .args(["ingest", "--database", ":memory:", "--csv-path", "missing.csv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.csv"));
}

#[test]
fn test_serve_exits_when_ingestion_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "Year,Country,Population\n2000,Brazil,oops\n").unwrap();

    let output = popchart(dir.path())
        .arg("serve")
        .args(["--host", "127.0.0.1", "--port", &free_port().to_string()])
        .args(["--database", ":memory:"])
        .arg("--csv-path")
        .arg(&csv)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad.csv"), "{stderr}");
    assert!(stderr.contains("[D005] Malformed CSV row"), "{stderr}");
}

#[tokio::test]
async fn test_serve_ingests_and_answers_with_allowlisted_rows() {
    let dir = tempfile::tempdir().unwrap();
    let csv = fixture_path();
    let mut server = ServeProcess::start(
        dir.path(),
        &["--database", ":memory:", "--csv-path", csv.to_str().unwrap()],
    );

    let mut records = server.wait_for_records(4).await;
    records.sort_by(|a, b| (a.year, &a.country).cmp(&(b.year, &b.country)));
    assert!(records.iter().all(|r| r.country != "Germany"));
    assert_eq!(records[0], PopulationRecord::new(2000, "Brazil", 174_000_000));
    assert_eq!(records[3], PopulationRecord::new(2001, "USA", 285_000_000));

    let response = reqwest::Client::new()
        .get(format!("{}/population", server.base))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_serve_skip_ingest_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("population.duckdb");
    let seeded = popchart(dir.path())
        .arg("ingest")
        .arg("--database")
        .arg(&database)
        .arg("--csv-path")
        .arg(fixture_path())
        .output()
        .unwrap();
    assert!(seeded.status.success());

    // The CSV path does not exist, so serving only works if it is never read
    let mut server = ServeProcess::start(
        dir.path(),
        &[
            "--skip-ingest",
            "--database",
            database.to_str().unwrap(),
            "--csv-path",
            "missing.csv",
        ],
    );
    server.wait_for_records(4).await;
    drop(server);

    let store = DuckDbBackend::from_path(&database).unwrap();
    assert_eq!(store.count().await.unwrap(), 6);
}

#[test]
fn test_view_reports_unreachable_service() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("http://127.0.0.1:{}", free_port());
    let output = popchart(dir.path())
        .args(["view", "--no-color", "--url", &url])
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("Failed to load {url}/population")),
        "{stderr}"
    );
}
