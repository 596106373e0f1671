//! Loading `quill.toml` and running with the loaded options

use super::harness::*;
use quill_engine::frontend::checker::RedeclarationPolicy;
use quill_engine::{CheckerOptions, ConfigError, VmOptions};
use std::io::Write;

const CONFIG: &str = r#"
[check]
entry-point = "start"
switch-redeclaration = "rebind"
parallel = true

[vm]
max-call-depth = 64
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_options_from_file_drive_compilation() {
    let file = write_config(CONFIG);
    let options = CheckerOptions::from_file(file.path()).unwrap();
    assert_eq!(options.entry_point, "start");
    assert_eq!(options.switch_redeclaration, RedeclarationPolicy::Rebind);
    assert!(options.parallel);

    let program = program(
        class("Main")
            .method(method("start", Type::Void, vec![print(call(&["other"], vec![]))]))
            .method(method("other", Type::Int, vec![ret(int(8))])),
    );
    expect_output_with(&program, options, &["8"]);
}

#[test]
fn test_vm_options_from_same_file() {
    let options = VmOptions::from_toml_str(CONFIG).unwrap();
    assert_eq!(options.max_call_depth, 64);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = CheckerOptions::from_file(&dir.path().join("quill.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}

#[test]
fn test_entry_point_must_exist() {
    let options = CheckerOptions {
        entry_point: "start".to_string(),
        ..CheckerOptions::default()
    };
    let err = expect_semantic_error_with(&main_only(vec![]), options);
    assert!(matches!(
        err,
        quill_engine::SemanticError::MissingEntryPoint { ref name, .. } if name == "start"
    ));
}
