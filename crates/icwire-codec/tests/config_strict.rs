#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use icwire_codec::config;
use icwire_core::payload::UnknownValues;
use icwire_core::registry::ConflictPolicy;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
codec:
  max_frame_bytez: 4096 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.codec.max_frame_bytes, 4 * 1024 * 1024);
    assert_eq!(cfg.registry.on_conflict, ConflictPolicy::Reject);
    assert_eq!(cfg.registry.unknown_values, UnknownValues::Reject);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
codec:
  max_frame_bytes: 65536
registry:
  on_conflict: replace
  unknown_values: ignore
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.codec.max_frame_bytes, 65536);
    assert_eq!(cfg.registry.on_conflict, ConflictPolicy::Replace);
    assert_eq!(cfg.registry.unknown_values, UnknownValues::Ignore);
}

#[test]
fn bad_version_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn out_of_range_frame_limit_rejected() {
    let bad = r#"
version: 1
codec:
  max_frame_bytes: 16
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}

#[test]
fn unknown_policy_rejected() {
    let bad = r#"
version: 1
registry:
  on_conflict: merge
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}

#[test]
fn missing_file_reported() {
    let err = config::load_from_file("does-not-exist.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}
