//! End-to-end editing scenarios driven through the public session API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cocoon_kickstart::core::export::bash_script;
use cocoon_kickstart::models::{SeedNode, SuggestionKind, ValueType};
use cocoon_kickstart::utils::word_range_at;
use cocoon_kickstart::{ExportStyle, NodeId, NodeType, Pane, Session, StorageOptions, Suggestion};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn complete_at_end(session: &mut Session, line: &str) -> Vec<Suggestion> {
    let caret = line.chars().count();
    session.complete(line, caret, word_range_at(line, caret))
}

fn id_of(session: &Session, name: &str) -> NodeId {
    let snapshot = session.snapshot();
    let mut found = None;
    snapshot.root().walk(&mut |node| {
        if found.is_none() && node.name == name {
            found = Some(node.id);
        }
    });
    found.unwrap_or_else(|| panic!("no node named {name}"))
}

#[test]
fn test_variable_completion_in_run_line() {
    init_tracing();
    let mut session = Session::default();
    let suggestions = complete_at_end(&mut session, "    run: echo \"${");

    let expected = [
        ("${config.app}", ValueType::Object),
        ("${config.app.name}", ValueType::String),
        ("${config.app.version}", ValueType::String),
    ];
    for (label, value_type) in expected {
        let suggestion = suggestions
            .iter()
            .find(|s| s.label == label)
            .unwrap_or_else(|| panic!("missing {label}"));
        assert_eq!(suggestion.kind, SuggestionKind::Variable);
        assert_eq!(suggestion.detail.as_deref(), Some(value_type.as_str()));
        assert!(suggestion.sort_key.as_deref().unwrap().starts_with("0_"));
    }

    let name = suggestions
        .iter()
        .find(|s| s.label == "${config.app.name}")
        .unwrap();
    assert_eq!(name.insert_text, "config.app.name");
}

#[test]
fn test_run_line_completion_is_command_table() {
    init_tracing();
    let mut session = Session::default();
    let suggestions = complete_at_end(&mut session, "    run: ");

    let labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, cocoon_kickstart::core::completion::SHELL_COMMANDS);
    assert!(suggestions.iter().all(|s| s.kind == SuggestionKind::Function));
    assert!(!suggestions.iter().any(|s| s.label.starts_with("${")));
}

#[test]
fn test_export_literal_script() {
    init_tracing();
    let session = Session::new(
        vec![
            SeedNode::file("main.yaml", "blocks:\n  - run: echo hi\n"),
            SeedNode::dir("storage", vec![SeedNode::file("paths.yaml", "")]),
        ],
        StorageOptions::default(),
    );

    let expected = [
        "mkdir -p \"storage\"",
        "cat > \"main.yaml\" << 'EOF'\nblocks:\n  - run: echo hi\n\nEOF",
        "cat > \"storage/paths.yaml\" << 'EOF'\n\nEOF",
    ]
    .join("\n");
    assert_eq!(session.export(ExportStyle::Newline), expected);
}

#[test]
fn test_remove_directory_clears_selected_child() {
    init_tracing();
    let mut session = Session::default();
    let config = id_of(&session, "config.yaml");
    let main = id_of(&session, "main.yaml");

    session.select(config);
    session.toggle_split();
    session.select(main);
    assert_eq!(session.selection().primary(), Some(config));
    assert_eq!(session.selection().secondary(), Some(main));

    session.remove(id_of(&session, "storage")).unwrap();
    assert_eq!(session.selection().primary(), None);
    assert_eq!(session.selection().secondary(), Some(main));
}

#[test]
fn test_split_view_pane_routing() {
    init_tracing();
    let mut session = Session::new(
        vec![
            SeedNode::file("main.yaml", "a"),
            SeedNode::file("second.yaml", "b"),
            SeedNode::file("third.yaml", "c"),
        ],
        StorageOptions::default(),
    );
    let (f1, f2, f3) = (
        id_of(&session, "main.yaml"),
        id_of(&session, "second.yaml"),
        id_of(&session, "third.yaml"),
    );
    assert!(!session.selection().split_view());
    assert_eq!(session.selection().primary(), Some(f1));

    session.toggle_split();
    assert!(session.selection().split_view());
    assert_eq!(session.selection().active_pane(), Pane::Secondary);
    assert_eq!(session.selection().secondary(), None);

    session.select(f2);
    assert_eq!(session.selection().secondary(), Some(f2));
    assert_eq!(session.selection().primary(), Some(f1));

    session.set_active_pane(Pane::Primary);
    session.select(f3);
    assert_eq!(session.selection().primary(), Some(f3));
    assert_eq!(session.selection().secondary(), Some(f2));
}

#[test]
fn test_curl_wrapper_decodes_to_bash_script() {
    init_tracing();
    let session = Session::default();
    let wrapped = session.export(ExportStyle::Curl);

    let payload = wrapped
        .strip_prefix("echo \"")
        .and_then(|rest| rest.strip_suffix("\" | base64 -d | bash"))
        .expect("curl wrapper shape");
    let decoded = STANDARD.decode(payload).unwrap();
    assert_eq!(STANDARD.encode(&decoded), payload);

    let script = String::from_utf8(decoded).unwrap();
    assert_eq!(script, bash_script(&session.snapshot()));
    assert!(script.starts_with("#!/bin/bash\n# "));
}

#[test]
fn test_editing_session_end_to_end() {
    init_tracing();
    let mut session = Session::default();
    let storage = id_of(&session, "storage");

    let file = session.insert(storage, NodeType::File).unwrap();
    assert_eq!(session.snapshot().find(file).unwrap().name, "newfile.yaml");
    session.rename(file, "hosts.yaml").unwrap();
    session.select(file);
    assert!(session.update_pane(Pane::Primary, "edge:\n  ip: 10.9.9.9\n").unwrap());

    let labels: Vec<String> = complete_at_end(&mut session, "run: ssh ${h")
        .into_iter()
        .map(|s| s.label)
        .collect();
    assert!(labels.contains(&"${hosts.edge.ip}".to_string()));

    let script = session.export(ExportStyle::AmpAmp);
    assert!(script.contains("cat > \"storage/hosts.yaml\" <<< \"edge:\n  ip: 10.9.9.9\n\""));
}
