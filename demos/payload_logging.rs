//! Payload logging example
//!
//! Demonstrates per-run log files, caller lines and redaction of HTTP
//! payloads through field markers.
//!
//! Run with: cargo run --example payload_logging

use rust_trace_logger::filters::{redact, remove, TypeSchema};
use rust_trace_logger::prelude::*;
use rust_trace_logger::{caller, information};
use serde::Serialize;
use serde_json::Value;

/// Marks fields whose value must never reach the log.
struct Sensitive;
/// Marks fields that are only noise in the log.
struct Omit;
/// Marks e-mail fields; only the domain is kept.
struct Email;

#[derive(Serialize)]
struct LoginRequest {
    username: String,
    password: String,
    #[serde(rename = "contactEmail")]
    contact_email: String,
    device_fingerprint: String,
}

impl Annotated for LoginRequest {
    fn schema() -> TypeSchema {
        TypeSchema::of::<LoginRequest>()
            .field("username", &[])
            .marked::<Sensitive>("password")
            .renamed_field("contact_email", "contactEmail", &[MarkerId::of::<Email>()])
            .marked::<Omit>("device_fingerprint")
    }
}

fn mask_email(field: &FieldDescriptor, doc: &mut JsonDocument) {
    let masked = match doc.get_field(field.json_name()) {
        Some(Value::String(address)) => match address.split_once('@') {
            Some((_, domain)) => format!("***@{}", domain),
            None => "***".to_string(),
        },
        _ => return,
    };
    doc.replace_field(field.json_name(), Value::String(masked));
}

fn main() -> Result<()> {
    println!("=== Rust Trace Logger - Payload Logging Example ===\n");

    let logger = Logger::builder()
        .configuration(
            LoggerConfiguration::new()
                .with_directory("logs")
                .with_max_files(5)
                .with_threshold(LogLevel::Debug),
        )
        .filter::<Sensitive, _>(redact("***"))
        .filter::<Omit, _>(remove())
        .filter::<Email, _>(mask_email)
        .annotated::<LoginRequest>()
        .build()?;

    println!("Logging to {}\n", logger.log_file_path().display());

    println!("1. Plain messages:");
    information!(logger, "Service starting, pid {}", std::process::id());
    logger.log_warning(OutputFlags::NONE, "Cache is cold", Some(&caller!()));

    println!("\n2. A redacted payload:");
    let request = LoginRequest {
        username: "ada".to_string(),
        password: "correct horse battery staple".to_string(),
        contact_email: "ada@example.com".to_string(),
        device_fingerprint: "f0:9a:33:c1".to_string(),
    };
    logger.log_http_payload::<LoginRequest>(
        OutputFlags::NONE,
        Direction::Sent,
        RequestKind::Post,
        &serde_json::to_string(&request)?,
    );

    println!("\n3. A malformed payload:");
    logger.log_http_payload::<LoginRequest>(
        OutputFlags::NONE,
        Direction::Received,
        RequestKind::Post,
        "{\"token\": ",
    );

    println!("\n4. An error with its cause:");
    let err = std::fs::read_to_string("does/not/exist.toml")
        .map_err(|e| LoggerError::io_operation("read settings", "does/not/exist.toml", e));
    if let Err(e) = err {
        logger.log_exception(OutputFlags::NONE, &e, Some(&caller!()));
    }

    println!(
        "\nMetrics: {} written, {} suppressed, {} payloads dropped",
        logger.metrics().messages_written(),
        logger.metrics().messages_suppressed(),
        logger.metrics().payloads_dropped(),
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
