//! Failure behaviour: malformed input, handler rejection, transport errors,
//! and the user-facing messages for each.
//!
//! Every failure is terminal. These tests pin how many handler calls
//! happened before the failure and which error category came back.

use std::io::{self, BufReader, ErrorKind};

use insta::assert_snapshot;
use jstream_decoder::{DecodeError, DecodeOptions, ErrorCategory, decode, decode_with_options};
use jstream_tests::FailingReader;
use jstream_wire::WireError;

/// Decode `input`, returning the error and the records seen before it.
fn decode_err(input: &[u8]) -> (DecodeError, Vec<String>) {
    let mut seen = Vec::new();
    let err = decode(input, |record| {
        seen.push(record.to_string());
        Ok::<_, io::Error>(())
    })
    .expect_err("input should be rejected");
    (err, seen)
}

// ── Malformed leading token ───────────────────────────────────────────────────

#[test]
fn leading_byte_must_open_array_or_object() {
    let inputs: [&[u8]; 7] = [b"x", b"\"str\"", b"42", b"true", b"]", b"}", b",[1]"];
    for input in inputs {
        let (err, seen) = decode_err(input);
        assert!(
            matches!(err, DecodeError::UnexpectedByte { offset: 0, .. }),
            "input {:?} gave {err:?}",
            String::from_utf8_lossy(input)
        );
        assert_eq!(err.category(), ErrorCategory::Malformed);
        assert!(seen.is_empty());
    }
}

#[test]
fn leading_whitespace_is_skipped_before_classifying() {
    let (err, seen) = decode_err(b"  \n  nope");
    assert!(matches!(
        err,
        DecodeError::UnexpectedByte {
            byte: b'n',
            offset: 5
        }
    ));
    assert!(seen.is_empty());
}

#[test]
fn unexpected_byte_message() {
    let (err, _) = decode_err(b"xyz");
    assert_snapshot!(err.to_string(), @"expected an array or an object at offset 0, found byte 0x78");
}

// ── Trailing content ──────────────────────────────────────────────────────────

#[test]
fn trailing_garbage_fails_after_dispatching_earlier_records() {
    let (err, seen) = decode_err(b"[1,2] garbage");
    assert!(matches!(
        err,
        DecodeError::UnexpectedByte {
            byte: b'g',
            offset: 6
        }
    ));
    assert_eq!(seen, ["1", "2"]);
}

#[test]
fn stray_closing_bracket_after_structure() {
    let (err, seen) = decode_err(br#"{"a":1}]"#);
    assert!(matches!(err, DecodeError::UnexpectedByte { byte: b']', .. }));
    assert_eq!(seen, [r#"{"a":1}"#]);
}

#[test]
fn trailing_scalar_after_object() {
    let (err, seen) = decode_err(br#"{"a":1} 5"#);
    assert!(err.is_malformed());
    assert_eq!(seen.len(), 1);
}

// ── Structure inside a container ──────────────────────────────────────────────

#[test]
fn unterminated_array() {
    let (err, seen) = decode_err(b"[1, 2");
    assert!(matches!(err, DecodeError::Wire(WireError::UnexpectedEof { .. })));
    assert_eq!(seen, ["1", "2"]);
}

#[test]
fn unterminated_object() {
    let (err, seen) = decode_err(br#"{"a": [1, 2"#);
    assert!(matches!(err, DecodeError::Wire(WireError::UnexpectedEof { .. })));
    assert!(seen.is_empty());
}

#[test]
fn missing_comma_message() {
    let (err, seen) = decode_err(b"[1 2]");
    assert_snapshot!(err.to_string(), @"unexpected byte 0x32 at offset 3, expected ',' or ']'");
    assert_eq!(seen, ["1"]);
}

#[test]
fn mismatched_brackets_message() {
    let (err, _) = decode_err(br#"[{"a":[1}]"#);
    assert_snapshot!(err.to_string(), @"mismatched closing byte 0x7d at offset 8");
}

#[test]
fn invalid_element_syntax_is_reported() {
    let (err, seen) = decode_err(br#"[{"ok":1}, {"bad":01}]"#);
    assert!(matches!(err, DecodeError::InvalidRecord { offset: 11, .. }));
    assert_eq!(err.category(), ErrorCategory::Malformed);
    assert_eq!(seen, [r#"{"ok":1}"#]);
}

#[test]
fn object_with_unquoted_key_is_rejected() {
    let (err, seen) = decode_err(b"{a:1}");
    assert!(matches!(err, DecodeError::InvalidRecord { offset: 0, .. }));
    assert!(seen.is_empty());
}

#[test]
fn record_size_limit() {
    let options = DecodeOptions::default().with_max_record_len(16);
    let input = br#"[{"small":1}, {"large":"0123456789abcdef"}]"#;
    let mut seen = 0;
    let err = decode_with_options(&input[..], options, |_| {
        seen += 1;
        Ok::<_, io::Error>(())
    })
    .unwrap_err();

    assert_eq!(seen, 1);
    assert_snapshot!(err.to_string(), @"record at offset 14 exceeds the 16-byte limit");
}

// ── Handler failure ───────────────────────────────────────────────────────────

#[test]
fn handler_failure_on_second_of_three() {
    let mut calls = 0;
    let err = decode(&br#"["A","B","C"]"#[..], |_| {
        calls += 1;
        if calls == 2 {
            Err(io::Error::other("B rejected"))
        } else {
            Ok(())
        }
    })
    .unwrap_err();

    assert_eq!(calls, 2);
    assert_eq!(err.category(), ErrorCategory::Handler);
    assert_snapshot!(err.to_string(), @"handler rejected record 1: B rejected");
}

#[test]
fn element_after_handler_failure_is_never_decoded() {
    // The third element is invalid; reaching it would turn the error into
    // a syntax error instead of the handler's.
    let mut calls = 0;
    let err = decode(&b"[1,2,@@@"[..], |_| {
        calls += 1;
        if calls == 2 { Err("stop") } else { Ok(()) }
    })
    .unwrap_err();

    assert_eq!(calls, 2);
    assert!(matches!(err, DecodeError::Handler { index: 1, .. }));
}

#[test]
fn handler_error_source_is_preserved() {
    #[derive(Debug)]
    struct Marker;

    impl std::fmt::Display for Marker {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("marker")
        }
    }
    impl std::error::Error for Marker {}

    let err = decode(&b"{}"[..], |_| Err(Marker)).unwrap_err();
    let DecodeError::Handler { source, .. } = err else {
        panic!("expected a handler error");
    };
    assert!(source.downcast_ref::<Marker>().is_some());
}

// ── Transport failure ─────────────────────────────────────────────────────────

#[test]
fn read_error_before_first_byte() {
    let reader = BufReader::new(FailingReader::new(b"[1]", 0, ErrorKind::PermissionDenied));
    let err = decode(reader, |_| Ok::<_, io::Error>(())).unwrap_err();
    assert!(matches!(err, DecodeError::Io(ref e) if e.kind() == ErrorKind::PermissionDenied));
    assert_eq!(err.category(), ErrorCategory::Io);
}

#[test]
fn read_error_mid_stream_keeps_earlier_records() {
    let input = br#"[{"a":1},{"b":2},{"c":3}]"#;
    // Fail inside the second element.
    let reader = BufReader::with_capacity(4, FailingReader::new(input, 12, ErrorKind::BrokenPipe));

    let mut seen = Vec::new();
    let err = decode(reader, |record| {
        seen.push(record.to_string());
        Ok::<_, io::Error>(())
    })
    .unwrap_err();

    assert!(matches!(err, DecodeError::Io(ref e) if e.kind() == ErrorKind::BrokenPipe));
    assert_eq!(seen, [r#"{"a":1}"#]);
}

#[test]
fn read_error_at_boundary() {
    // The stream is complete but the source fails instead of reporting EOF.
    let reader = BufReader::new(FailingReader::new(b"{}", 2, ErrorKind::TimedOut));
    let mut calls = 0;
    let err = decode(reader, |_| {
        calls += 1;
        Ok::<_, io::Error>(())
    })
    .unwrap_err();

    assert_eq!(calls, 1);
    assert_eq!(err.category(), ErrorCategory::Io);
}
