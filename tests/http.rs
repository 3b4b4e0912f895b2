use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("jelly_journey_http_{}_{}", std::process::id(), nanos));
    std::fs::create_dir_all(&path).expect("create data dir");
    path
}

/// Two phases of two days each: half = 2, total = 4.
fn write_small_catalog(dir: &PathBuf) -> PathBuf {
    let path = dir.join("phases.json");
    let phases = json!([
        { "id": 1, "name": "Detox Phase", "days": 2, "tips": ["Drink water."] },
        { "id": 2, "name": "Adaptation Phase", "days": 2 }
    ]);
    std::fs::write(&path, phases.to_string()).expect("write catalog");
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/summary")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let phases_path = write_small_catalog(&data_dir);
    let child = Command::new(env!("CARGO_BIN_EXE_jelly_journey"))
        .env("PORT", port.to_string())
        .env("APP_DATA_DIR", &data_dir)
        .env("APP_PHASES_PATH", &phases_path)
        .env("RUST_LOG", "info")
        .env_remove("GEMINI_API_KEY")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post_json(client: &Client, url: String, body: Value) -> Value {
    let response = client.post(url).json(&body).send().await.unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn toggle(client: &Client, server: &TestServer, phase: u32, day: u32) -> Value {
    post_json(
        client,
        format!("{}/api/days/{phase}/{day}/toggle", server.base_url),
        Value::Null,
    )
    .await
}

async fn reset(client: &Client, server: &TestServer) -> Value {
    post_json(client, format!("{}/api/reset", server.base_url), Value::Null).await
}

#[tokio::test]
async fn http_toggle_walk_fires_milestones_in_order() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server).await;

    let first = toggle(&client, &server, 1, 1).await;
    assert_eq!(first["milestone"], json!({ "kind": "ordinary_progress" }));
    assert_eq!(first["cue"], "completion");
    assert!(first["celebration"].is_null());

    let second = toggle(&client, &server, 1, 2).await;
    assert_eq!(second["milestone"], json!({ "kind": "phase_complete", "phase_id": 1 }));
    assert_eq!(second["celebration"]["title"], "Detox Phase Complete!");
    assert_eq!(second["cue"], "milestone");

    let third = toggle(&client, &server, 2, 1).await;
    assert_eq!(third["milestone"], json!({ "kind": "ordinary_progress" }));

    let last = toggle(&client, &server, 2, 2).await;
    assert_eq!(last["milestone"], json!({ "kind": "phase_complete", "phase_id": 2 }));
    assert_eq!(last["summary"]["global_progress"], 100.0);
    assert_eq!(last["summary"]["journey_complete"], true);

    let off = toggle(&client, &server, 2, 2).await;
    assert!(off["milestone"].is_null());
    assert_eq!(off["day"]["completed"], false);
    assert_eq!(off["summary"]["total_completed"], 3);
}

#[tokio::test]
async fn http_save_day_normalizes_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server).await;

    let saved = post_json(
        &client,
        format!("{}/api/days/2/1", server.base_url),
        json!({ "weight": "not a number", "note": "   " }),
    )
    .await;
    assert_eq!(saved["day"]["key"], "2-1");
    assert_eq!(saved["day"]["completed"], true);
    assert!(saved["day"]["weight"].is_null());
    assert!(saved["day"]["note"].is_null());
    assert!(saved["day"]["timestamp"].is_string());

    post_json(
        &client,
        format!("{}/api/days/1/2", server.base_url),
        json!({ "weight": "71.5", "note": " sleepy " }),
    )
    .await;
    let summary: Value = client
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let series = summary["weight_series"].as_array().unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0]["label"], "P1:D2");
    assert_eq!(series[0]["weight"], 71.5);
    assert_eq!(series[0]["note"], "sleepy");
}

#[tokio::test]
async fn http_goal_ignores_invalid_values() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server).await;

    let put_goal = |value: Value| {
        let client = client.clone();
        let url = format!("{}/api/goal", server.base_url);
        async move {
            let response = client.put(url).json(&json!({ "value": value })).send().await.unwrap();
            assert!(response.status().is_success());
            response.json::<Value>().await.unwrap()
        }
    };

    assert_eq!(put_goal(json!("70")).await["goal_weight"], 70.0);
    assert_eq!(put_goal(json!(-5)).await["goal_weight"], 70.0);
    assert_eq!(put_goal(json!("abc")).await["goal_weight"], 70.0);
    let summary = put_goal(json!(68.5)).await;
    assert_eq!(summary["goal_weight"], 68.5);
    assert_eq!(summary["chart_bounds"], json!({ "min": 66.5, "max": 70.5 }));

    let cleared = reset(&client, &server).await;
    assert!(cleared["goal_weight"].is_null());
    assert_eq!(cleared["global_progress"], 0.0);
}

#[tokio::test]
async fn http_rejects_days_outside_catalog() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for path in ["/api/days/1/3/toggle", "/api/days/3/1/toggle", "/api/days/1/0/toggle"] {
        let response = client
            .post(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn http_motivation_falls_back_without_key() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/api/motivation?phase=2", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["phase_name"], "Adaptation Phase");
    assert_eq!(
        body["message"],
        "Don't wobble! Keep going! (Configure API Key for AI tips)"
    );
}

#[tokio::test]
async fn http_index_renders_active_phase() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = client
        .get(format!("{}/?phase=1", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Detox Phase"));
    assert!(html.contains("Drink water."));
    assert!(html.contains(r#"action="/days/1/2/toggle""#));
}
