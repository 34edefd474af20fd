//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Lines from many threads are never interleaved or lost
//! - Multi-line payload blocks stay contiguous
//! - Caller and message lines stay together

use rust_trace_logger::filters::{redact, TypeSchema};
use rust_trace_logger::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 250;

struct Token;
struct SessionPayload;

fn shared_logger(dir: &TempDir, console: MemoryConsole) -> Arc<Logger> {
    let logger = Logger::builder()
        .configuration(LoggerConfiguration::new().with_directory(dir.path()))
        .console(console)
        .schema(TypeSchema::of::<SessionPayload>().marked::<Token>("token"))
        .filter::<Token, _>(redact("***"))
        .build()
        .expect("Failed to create logger");
    Arc::new(logger)
}

fn read_lines(logger: &Logger) -> Vec<String> {
    std::fs::read_to_string(logger.log_file_path())
        .expect("Failed to read log file")
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every thread's messages arrive whole and exactly once.
#[test]
fn test_concurrent_lines_are_whole() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let console = MemoryConsole::new();
    let logger = shared_logger(&temp_dir, console.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.log_information(
                        OutputFlags::SUPPRESS_LEADING_NEWLINE,
                        format!("thread {} message {}", t, i),
                        None,
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = read_lines(&logger);
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);

    let mut seen = HashSet::new();
    for line in &lines {
        let (_, body) = line
            .split_once(" [Information]: ")
            .unwrap_or_else(|| panic!("malformed line: {:?}", line));
        assert!(seen.insert(body.to_string()), "duplicate line: {:?}", line);
    }
    for t in 0..THREADS {
        for i in 0..MESSAGES_PER_THREAD {
            assert!(seen.contains(&format!("thread {} message {}", t, i)));
        }
    }

    assert_eq!(console.lines().len(), THREADS * MESSAGES_PER_THREAD);
    assert_eq!(
        logger.metrics().messages_written(),
        (THREADS * MESSAGES_PER_THREAD) as u64
    );
}

/// Pretty-printed payloads span several lines; each block must stay intact.
#[test]
fn test_concurrent_payload_blocks_stay_contiguous() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = shared_logger(&temp_dir, MemoryConsole::new());
    let per_thread = 50;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..per_thread {
                    let raw = format!(r#"{{"thread":{},"seq":{},"token":"t-{}"}}"#, t, i, i);
                    logger.log_http_payload::<SessionPayload>(
                        OutputFlags::SUPPRESS_CONSOLE | OutputFlags::SUPPRESS_LEADING_NEWLINE,
                        Direction::Received,
                        RequestKind::Get,
                        &raw,
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    // tag line, "{", three members, "}"
    let lines = read_lines(&logger);
    assert_eq!(lines.len(), THREADS * per_thread * 6);

    let mut seen = HashSet::new();
    for block in lines.chunks(6) {
        assert!(
            block[0].ends_with("[Debug]: [Received](Get): "),
            "unexpected tag line: {:?}",
            block[0]
        );
        let body: Value =
            serde_json::from_str(&block[1..].join("\n")).expect("payload block is valid JSON");
        assert_eq!(body["token"], "***");
        let key = (body["thread"].as_u64().unwrap(), body["seq"].as_u64().unwrap());
        assert!(seen.insert(key));
    }
    assert_eq!(seen.len(), THREADS * per_thread);
}

/// A caller line is always directly followed by its own message.
#[test]
fn test_caller_lines_stay_with_messages() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = shared_logger(&temp_dir, MemoryConsole::new());
    let per_thread = 100;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let site = CallerContext::new(format!("worker_{}", t), "src/worker.rs", 7);
                for i in 0..per_thread {
                    logger.log_warning(
                        OutputFlags::SUPPRESS_CONSOLE,
                        format!("worker_{} step {}", t, i),
                        Some(&site),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = read_lines(&logger);
    assert_eq!(lines.len(), THREADS * per_thread * 2);

    for pair in lines.chunks(2) {
        let (_, caller) = pair[0].split_once(" [Caller]: ").expect("caller line");
        let (_, message) = pair[1].split_once(" [Warning]: ").expect("message line");
        let worker = caller.split("()").next().unwrap();
        assert!(
            message.starts_with(&format!("{} step", worker)),
            "{:?} followed by {:?}",
            caller,
            message
        );
    }
}
