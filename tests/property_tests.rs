//! Property-based tests for rust_trace_logger using proptest

use proptest::prelude::*;
use rust_trace_logger::filters::{redact, TypeSchema};
use rust_trace_logger::prelude::*;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn message_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Error),
        Just(LogLevel::Warning),
        Just(LogLevel::Information),
        Just(LogLevel::Debug),
    ]
}

fn any_flags() -> impl Strategy<Value = OutputFlags> {
    (0u8..8).prop_map(OutputFlags::from_bits_truncate)
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that gating agrees with the numeric order
    #[test]
    fn test_log_level_gating_matches_order(level in any_level(), threshold in any_level()) {
        prop_assert_eq!(level.is_enabled(threshold), (level as u8) <= (threshold as u8));
    }

    /// Test that a threshold of None gates everything out
    #[test]
    fn test_none_threshold_gates_all(level in message_level()) {
        prop_assert!(!level.is_enabled(LogLevel::None));
        prop_assert!(level.is_enabled(LogLevel::Debug));
    }
}

// ============================================================================
// OutputFlags Tests
// ============================================================================

proptest! {
    /// Test that a union contains both operands
    #[test]
    fn test_flags_union_contains_parts(a in any_flags(), b in any_flags()) {
        let both = a | b;
        prop_assert!(both.contains(a));
        prop_assert!(both.contains(b));
        prop_assert_eq!(both.bits(), a.bits() | b.bits());
    }

    /// Test that NONE is the identity and contained everywhere
    #[test]
    fn test_flags_none_identity(a in any_flags()) {
        prop_assert_eq!(a | OutputFlags::NONE, a);
        prop_assert!(a.contains(OutputFlags::NONE));
    }

    /// Test that unknown bits are dropped
    #[test]
    fn test_flags_truncate(bits in any::<u8>()) {
        prop_assert_eq!(OutputFlags::from_bits_truncate(bits).bits(), bits & 0b111);
    }
}

// ============================================================================
// Logger gating Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Test that a message reaches the file exactly when its level passes the threshold
    #[test]
    fn test_message_written_iff_enabled(level in any_level(), threshold in any_level()) {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::builder()
            .configuration(
                LoggerConfiguration::new()
                    .with_directory(temp_dir.path())
                    .with_threshold(threshold),
            )
            .console(MemoryConsole::new())
            .build()
            .unwrap();

        logger.log(OutputFlags::SUPPRESS_CONSOLE, level, "gated message", None);

        let content = std::fs::read_to_string(logger.log_file_path()).unwrap();
        let expected = format!("[{}]: gated message", level);
        let enabled = level != LogLevel::None && level <= threshold;
        prop_assert_eq!(content.contains(&expected), enabled);
    }

    /// Test that redaction touches only the marked member
    #[test]
    fn test_redaction_preserves_other_members(
        members in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8),
        secret in ".*",
    ) {
        struct Hidden;
        struct Form;

        let temp_dir = TempDir::new().unwrap();
        let console = MemoryConsole::new();
        let logger = Logger::builder()
            .configuration(LoggerConfiguration::new().with_directory(temp_dir.path()))
            .console(console.clone())
            .schema(TypeSchema::of::<Form>().marked::<Hidden>("SECRET"))
            .filter::<Hidden, _>(redact("***"))
            .build()
            .unwrap();

        let mut object: Map<String, Value> =
            members.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
        object.insert("SECRET".to_string(), json!(secret));
        let raw = Value::Object(object.clone()).to_string();

        logger.log_http_payload::<Form>(
            OutputFlags::SUPPRESS_FILE,
            Direction::Sent,
            RequestKind::Post,
            &raw,
        );

        let captured = console.lines();
        prop_assert_eq!(captured.len(), 1);
        let text = &captured[0].text;
        let start = text.find('{').unwrap();
        let logged: Value = serde_json::from_str(&text[start..]).unwrap();

        object.insert("SECRET".to_string(), json!("***"));
        prop_assert_eq!(logged, Value::Object(object));
    }
}
