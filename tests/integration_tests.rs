//! Integration tests for the logging facade
//!
//! These tests verify:
//! - Log injection prevention
//! - Attribute encoding in each output format
//! - Flattening and group prefixes in the colorized format
//! - File sink ownership and release
//! - Request contexts
//! - Thread safety

use logfacade::handlers::strip_ansi;
use logfacade::{new, new_with_closer, with_logger, with_request_id, Attr, Config, Context, FieldValue};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn file_config(path: &Path, format: &str) -> Config {
    Config::new()
        .with_format(format)
        .with_output(path.to_string_lossy())
        .with_add_source(false)
        .with_timezone("UTC")
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(String::from)
        .collect()
}

fn decode(line: &str) -> serde_json::Value {
    serde_json::from_str(&strip_ansi(line)).expect("line is JSON")
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");

    let logger = new(&file_config(&log_file, "text")).expect("Failed to create logger");

    // Try to inject fake log entries with newlines
    let malicious_message = "User login\nlevel=ERROR msg=\"Fake error injected\"\nContinuation";
    logger.info(malicious_message, []);
    logger.close().expect("Failed to close");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("\\n"));

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
}

#[test]
fn test_json_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("round_trip.jsonl");
    let logger = new(&file_config(&log_file, "json")).unwrap();

    logger.info(
        "User logged in",
        [
            Attr::new("user_id", 12345),
            Attr::new("username", "alice"),
            Attr::new("success", true),
            Attr::new("ratio", 0.25),
            Attr::new("tags", vec!["a", "b"]),
        ],
    );
    logger.close().unwrap();

    let lines = read_lines(&log_file);
    let parsed = decode(&lines[0]);
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["msg"], "User logged in");
    assert_eq!(parsed["user_id"], 12345);
    assert_eq!(parsed["username"], "alice");
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["ratio"], 0.25);
    assert_eq!(parsed["tags"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_json_does_not_flatten() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("nested.jsonl");
    let logger = new(&file_config(&log_file, "json")).unwrap();

    logger.info(
        "nested",
        [Attr::new("meta", FieldValue::map([("region", "eu"), ("zone", "b")]))],
    );
    logger.close().unwrap();

    let parsed = decode(&read_lines(&log_file)[0]);
    assert_eq!(parsed["meta"]["region"], "eu");
    assert!(parsed.get("meta.region").is_none());
}

#[test]
fn test_colorized_flattens_json_string() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("color.log");
    let logger = new(&file_config(&log_file, "color")).unwrap();

    logger.info("payload", [Attr::new("body", r#"{"user":"alice","age":30}"#)]);
    logger.close().unwrap();

    let lines = read_lines(&log_file);
    assert!(lines[0].contains("\x1b[32mINFO\x1b[0m"));

    let parsed = decode(&lines[0]);
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["body.user"], "alice");
    assert_eq!(parsed["body.age"], "30");
}

#[test]
fn test_colorized_flattens_records() {
    #[derive(Serialize)]
    struct Order {
        id: u64,
        #[serde(rename = "total_cents")]
        total: i64,
        customer: Customer,
        #[serde(skip)]
        #[allow(dead_code)]
        audit_token: String,
    }

    #[derive(Serialize)]
    struct Customer {
        name: String,
        vip: bool,
    }

    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("record.log");
    let logger = new(&file_config(&log_file, "colored")).unwrap();

    let order = Order {
        id: 9,
        total: 1999,
        customer: Customer {
            name: "bob".to_string(),
            vip: true,
        },
        audit_token: "secret".to_string(),
    };
    logger.warn("order placed", [Attr::record("order", &order)]);
    logger.close().unwrap();

    let line = strip_ansi(&read_lines(&log_file)[0]);
    let parsed = decode(&line);
    assert_eq!(parsed["order.id"], "9");
    assert_eq!(parsed["order.total_cents"], "1999");
    assert_eq!(parsed["order.customer.name"], "bob");
    assert_eq!(parsed["order.customer.vip"], "true");
    assert!(!line.contains("audit_token"));

    // Declaration order is kept
    let id = line.find("order.id").unwrap();
    let total = line.find("order.total_cents").unwrap();
    let name = line.find("order.customer.name").unwrap();
    assert!(id < total && total < name);
}

#[test]
fn test_group_prefixes() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("groups.log");
    let logger = new(&file_config(&log_file, "color")).unwrap();

    logger.with_group("request").info("m", [Attr::new("method", "GET")]);
    logger
        .with_group("a")
        .with_group("b")
        .info("m", [Attr::new("x", 1)]);
    logger.close().unwrap();

    let lines = read_lines(&log_file);
    assert_eq!(decode(&lines[0])["request.method"], "GET");
    assert_eq!(decode(&lines[1])["a.b.x"], "1");
}

#[test]
fn test_text_format_groups_and_values() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("text.log");
    let logger = new(&file_config(&log_file, "text").with_time_format("datetime")).unwrap();

    logger
        .with_attrs([Attr::new("service", "api")])
        .with_group("http")
        .error("request failed", [Attr::new("status", 502)]);
    logger.close().unwrap();

    let line = &read_lines(&log_file)[0];
    assert!(line.starts_with("time=\""));
    assert!(line.contains("level=ERROR msg=\"request failed\" service=api http.status=502"));
}

#[test]
fn test_level_filtering() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("levels.log");
    let logger = new(&file_config(&log_file, "json").with_level("WARNING")).unwrap();

    logger.debug("Debug message", []);
    logger.info("Info message", []);
    logger.warn("Warn message", []);
    logger.error("Error message", []);
    logger.close().unwrap();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert_eq!(decode(&lines[0])["level"], "WARN");
    assert_eq!(decode(&lines[1])["level"], "ERROR");
}

#[test]
fn test_add_source_records_call_site() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("source.log");
    let logger = new(&file_config(&log_file, "json").with_add_source(true)).unwrap();

    let line = line!() + 1;
    logger.info("here", []);
    logger.close().unwrap();

    let parsed = decode(&read_lines(&log_file)[0]);
    let source = parsed["source"].as_str().unwrap();
    assert!(source.ends_with(&format!("integration_tests.rs:{}", line)), "{}", source);
}

#[test]
fn test_time_format_and_timezone() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("time.log");
    let cfg = file_config(&log_file, "json")
        .with_time_format("rfc3339")
        .with_timezone("+05:30");
    let logger = new(&cfg).unwrap();

    logger.info("tick", []);
    logger.close().unwrap();

    let parsed = decode(&read_lines(&log_file)[0]);
    let time = parsed["time"].as_str().unwrap();
    assert!(time.ends_with("+05:30"), "{}", time);
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
}

#[test]
fn test_unreadable_timezone_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("tz.log");
    let logger = new(&file_config(&log_file, "json").with_timezone("+é1")).unwrap();

    logger.info("tick", []);
    logger.close().unwrap();

    assert_eq!(decode(&read_lines(&log_file)[0])["msg"], "tick");
}

#[test]
fn test_unix_time_is_numeric_in_json() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("unix.log");
    let logger = new(&file_config(&log_file, "json").with_time_format("unixms")).unwrap();

    logger.info("tick", []);
    logger.close().unwrap();

    let parsed = decode(&read_lines(&log_file)[0]);
    assert!(parsed["time"].as_i64().unwrap() > 1_600_000_000_000);
}

#[test]
fn test_close_releases_file_for_new_logger() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("reopen.log");

    let (first, closer) = new_with_closer(&file_config(&log_file, "json")).unwrap();
    first.info("first", []);
    closer.close().unwrap();

    // Writes after close are dropped, not surfaced
    first.info("dropped", []);

    let (second, closer) = new_with_closer(&file_config(&log_file, "json")).unwrap();
    second.info("second", []);
    closer.close().unwrap();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert_eq!(decode(&lines[0])["msg"], "first");
    assert_eq!(decode(&lines[1])["msg"], "second");
}

#[test]
fn test_close_without_file_sink_is_noop() {
    let (logger, closer) = new_with_closer(&Config::new().with_output("stderr")).unwrap();
    assert!(closer.close().is_ok());
    assert!(logger.close().is_ok());
}

#[test]
fn test_request_context() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("ctx.log");
    let logger = new(&file_config(&log_file, "json")).unwrap();

    let ctx = with_logger(&Context::background(), logger.clone());
    let req_ctx = with_request_id(&ctx, "req-7");
    logfacade::from_context(&req_ctx).info("handled", [Attr::new("status", 200)]);
    logfacade::from_context(&ctx).info("plain", []);
    logger.close().unwrap();

    let lines = read_lines(&log_file);
    let first = decode(&lines[0]);
    assert_eq!(first["request_id"], "req-7");
    assert_eq!(first["status"], 200);
    assert!(decode(&lines[1]).get("request_id").is_none());
}

#[test]
fn test_log_error_uses_context_logger() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("errors.log");
    let logger = new(&file_config(&log_file, "json")).unwrap();
    let ctx = with_logger(&Context::background(), logger.clone());

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timeout");
    let returned = logfacade::log_error(&ctx, "fetch failed", err, [Attr::new("attempt", 3)]);
    logger.close().unwrap();

    assert_eq!(returned.kind(), std::io::ErrorKind::TimedOut);
    let parsed = decode(&read_lines(&log_file)[0]);
    assert_eq!(parsed["level"], "ERROR");
    assert_eq!(parsed["msg"], "fetch failed");
    assert_eq!(parsed["error"], "upstream timeout");
    assert_eq!(parsed["attempt"], 3);
}

#[test]
fn test_concurrent_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent_test.log");

    let logger = Arc::new(new(&file_config(&log_file, "json")).unwrap());

    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger_clone = Arc::clone(&logger);
        let handle = std::thread::spawn(move || {
            let scoped = logger_clone.with_attrs([Attr::new("thread", thread_id)]);
            for i in 0..10 {
                scoped.info(format!("Thread {} - Message {}", thread_id, i), [Attr::new("i", i)]);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.close().unwrap();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 50, "Should have 50 log entries from 5 threads * 10 messages");
    for line in lines {
        let parsed = decode(&line);
        assert!(parsed["thread"].is_number());
    }
}
