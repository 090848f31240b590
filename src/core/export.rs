//! Shell script export of a workspace snapshot.
//!
//! The script recreates the tree under the current directory, without the
//! root directory itself. Directories come first (`mkdir -p`), then every
//! file, both depth-first in stored child order.
//!
//! File contents can be written two ways:
//! - [`Quoting::HereDoc`] - a quoted here-document, content copied verbatim
//! - [`Quoting::Escaped`] - a double-quoted here-string with `\`, `"`, `$`
//!   and `` ` `` backslash-escaped (the legacy clone command form)
//!
//! Both forms write the content followed by a newline. Output depends only
//! on the snapshot, so equal trees always export to identical bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::config::{HEREDOC_SENTINEL, export};
use crate::core::Snapshot;
use crate::models::Node;

// =============================================================================
// Options
// =============================================================================

/// How file contents are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    HereDoc,
    Escaped,
}

/// How commands are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    /// One command per line (script form)
    Newline,
    /// `cmd && cmd` (single clone command)
    AndThen,
}

impl Joiner {
    fn separator(self) -> &'static str {
        match self {
            Self::Newline => "\n",
            Self::AndThen => " && ",
        }
    }
}

/// Export formats offered to the clipboard/download host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStyle {
    /// Here-documents, one command per line
    Newline,
    /// Escaped here-strings joined with `&&`
    AmpAmp,
    /// Self-extracting `echo <base64> | base64 -d | bash`
    Curl,
}

// =============================================================================
// Public API
// =============================================================================

/// Export `snapshot` in the given style.
pub fn export_script(snapshot: &Snapshot, style: ExportStyle) -> String {
    match style {
        ExportStyle::Newline => encode(snapshot, Joiner::Newline, Quoting::HereDoc),
        ExportStyle::AmpAmp => encode(snapshot, Joiner::AndThen, Quoting::Escaped),
        ExportStyle::Curl => wrap_base64(&bash_script(snapshot)),
    }
}

/// Join the reconstruction commands for `snapshot`.
///
/// With [`Joiner::AndThen`] every here-document body is moved below the
/// single command line, in command order, so each terminator stays on a
/// line of its own.
pub fn encode(snapshot: &Snapshot, joiner: Joiner, quoting: Quoting) -> String {
    let steps = steps(snapshot, quoting);
    match joiner {
        Joiner::Newline => steps
            .iter()
            .map(Step::render)
            .collect::<Vec<_>>()
            .join(joiner.separator()),
        Joiner::AndThen => {
            let line = steps
                .iter()
                .map(|step| step.line.as_str())
                .collect::<Vec<_>>()
                .join(joiner.separator());
            let bodies: Vec<&str> = steps
                .iter()
                .filter_map(|step| step.here_doc.as_deref())
                .collect();
            if bodies.is_empty() {
                line
            } else {
                format!("{}\n{}", line, bodies.join("\n"))
            }
        }
    }
}

/// Reconstruction commands in execution order, each with its own
/// here-document body if it has one.
pub fn commands(snapshot: &Snapshot, quoting: Quoting) -> Vec<String> {
    steps(snapshot, quoting).iter().map(Step::render).collect()
}

/// Standalone bash script: shebang, setup, newline-joined body, closing echoes.
pub fn bash_script(snapshot: &Snapshot) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(export::SHEBANG.to_string());
    lines.extend(export::SETUP_COMMENTS.iter().map(|s| s.to_string()));
    lines.push(export::SETUP_COMMAND.to_string());
    lines.push(String::new());
    lines.extend(commands(snapshot, Quoting::HereDoc));
    lines.push(String::new());
    lines.extend(export::TRAILING_ECHOES.iter().map(|s| s.to_string()));

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// Wrap a script as a single command that decodes and runs it.
pub fn wrap_base64(script: &str) -> String {
    format!("echo \"{}\" | base64 -d | bash", STANDARD.encode(script.as_bytes()))
}

/// Backslash-escape `\`, `"`, `$` and `` ` `` for a double-quoted shell word.
pub fn escape_double_quoted(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`")
}

// =============================================================================
// Command Builders
// =============================================================================

/// One shell command: the command line and the here-document body
/// (content plus terminator) that follows it, if any.
struct Step {
    line: String,
    here_doc: Option<String>,
}

impl Step {
    fn render(&self) -> String {
        match &self.here_doc {
            Some(body) => format!("{}\n{}", self.line, body),
            None => self.line.clone(),
        }
    }
}

fn steps(snapshot: &Snapshot, quoting: Quoting) -> Vec<Step> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for child in snapshot.root().children() {
        collect(child, "", &mut dirs, &mut files);
    }

    let mut out: Vec<Step> = dirs.iter().map(|path| mkdir_step(path)).collect();
    out.extend(
        files
            .iter()
            .map(|(path, content)| write_step(path, content, quoting)),
    );
    out
}

fn collect<'a>(
    node: &'a Node,
    parent: &str,
    dirs: &mut Vec<String>,
    files: &mut Vec<(String, &'a str)>,
) {
    let path = if parent.is_empty() {
        node.name.clone()
    } else {
        format!("{}/{}", parent, node.name)
    };

    match node.content() {
        Some(content) => files.push((path, content)),
        None => {
            dirs.push(path.clone());
            for child in node.children() {
                collect(child, &path, dirs, files);
            }
        }
    }
}

fn mkdir_step(path: &str) -> Step {
    Step {
        line: format!("mkdir -p \"{}\"", escape_double_quoted(path)),
        here_doc: None,
    }
}

fn write_step(path: &str, content: &str, quoting: Quoting) -> Step {
    let target = escape_double_quoted(path);
    match quoting {
        Quoting::HereDoc => {
            let sentinel = sentinel_for(content);
            Step {
                line: format!("cat > \"{}\" << '{}'", target, sentinel),
                here_doc: Some(format!("{}\n{}", content, sentinel)),
            }
        }
        Quoting::Escaped => Step {
            line: format!(
                "cat > \"{}\" <<< \"{}\"",
                target,
                escape_double_quoted(content)
            ),
            here_doc: None,
        },
    }
}

/// `EOF`, or `EOF_n` with the smallest `n` no content line equals.
fn sentinel_for(content: &str) -> String {
    let clashes = |candidate: &str| content.lines().any(|line| line == candidate);
    if !clashes(HEREDOC_SENTINEL) {
        return HEREDOC_SENTINEL.to_string();
    }
    (1..)
        .map(|n| format!("{}_{}", HEREDOC_SENTINEL, n))
        .find(|candidate| !clashes(candidate))
        .unwrap_or_else(|| HEREDOC_SENTINEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Workspace;
    use crate::models::SeedNode;

    fn snapshot(seed: Vec<SeedNode>) -> Snapshot {
        Workspace::new(seed).snapshot()
    }

    #[test]
    fn test_directories_precede_files() {
        let snap = snapshot(vec![
            SeedNode::file("main.yaml", "blocks:\n  - run: echo hi\n"),
            SeedNode::dir("storage", vec![SeedNode::file("paths.yaml", "")]),
        ]);
        assert_eq!(
            export_script(&snap, ExportStyle::Newline),
            "mkdir -p \"storage\"\n\
             cat > \"main.yaml\" << 'EOF'\nblocks:\n  - run: echo hi\n\nEOF\n\
             cat > \"storage/paths.yaml\" << 'EOF'\n\nEOF"
        );
    }

    #[test]
    fn test_nested_directories_in_depth_first_order() {
        let snap = snapshot(vec![
            SeedNode::dir(
                "a",
                vec![SeedNode::dir("b", vec![]), SeedNode::file("f", "x")],
            ),
            SeedNode::dir("c", vec![]),
        ]);
        let cmds = commands(&snap, Quoting::HereDoc);
        assert_eq!(cmds[0], "mkdir -p \"a\"");
        assert_eq!(cmds[1], "mkdir -p \"a/b\"");
        assert_eq!(cmds[2], "mkdir -p \"c\"");
        assert_eq!(cmds[3], "cat > \"a/f\" << 'EOF'\nx\nEOF");
    }

    #[test]
    fn test_empty_directory_single_mkdir() {
        let snap = snapshot(vec![SeedNode::dir("empty", vec![])]);
        assert_eq!(
            export_script(&snap, ExportStyle::Newline),
            "mkdir -p \"empty\""
        );
    }

    #[test]
    fn test_empty_workspace() {
        let snap = Workspace::empty().snapshot();
        assert_eq!(export_script(&snap, ExportStyle::Newline), "");
        assert_eq!(export_script(&snap, ExportStyle::AmpAmp), "");
    }

    #[test]
    fn test_escaped_form() {
        let snap = snapshot(vec![
            SeedNode::dir("storage", vec![]),
            SeedNode::file("run.yaml", "run: echo \"${HOME}\" `date` \\n"),
        ]);
        assert_eq!(
            export_script(&snap, ExportStyle::AmpAmp),
            "mkdir -p \"storage\" && cat > \"run.yaml\" <<< \"run: echo \\\"\\${HOME}\\\" \\`date\\` \\\\n\""
        );
    }

    #[test]
    fn test_chained_here_docs_follow_command_line() {
        let snap = snapshot(vec![
            SeedNode::file("main.yaml", "blocks: []"),
            SeedNode::dir("storage", vec![SeedNode::file("paths.yaml", "p: 1\nEOF")]),
        ]);
        assert_eq!(
            encode(&snap, Joiner::AndThen, Quoting::HereDoc),
            "mkdir -p \"storage\" && cat > \"main.yaml\" << 'EOF' && \
             cat > \"storage/paths.yaml\" << 'EOF_1'\n\
             blocks: []\nEOF\n\
             p: 1\nEOF\nEOF_1"
        );
    }

    #[test]
    fn test_escape_order() {
        assert_eq!(escape_double_quoted(r#"\"$`"#), r#"\\\"\$\`"#);
        assert_eq!(escape_double_quoted("plain"), "plain");
    }

    #[test]
    fn test_sentinel_avoids_content_lines() {
        assert_eq!(sentinel_for("a\nb"), "EOF");
        assert_eq!(sentinel_for("a\nEOF\nb"), "EOF_1");
        assert_eq!(sentinel_for("EOF\nEOF_1"), "EOF_2");
        assert_eq!(sentinel_for("  EOF"), "EOF");
    }

    #[test]
    fn test_bash_script_shape() {
        let snap = snapshot(vec![SeedNode::file("main.yaml", "x")]);
        let script = bash_script(&snap);
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("\nset -e\n"));
        assert!(script.contains("cat > \"main.yaml\" << 'EOF'\nx\nEOF\n"));
        assert!(script.ends_with("echo \"Edit main.yaml to start your workflow.\"\n"));
    }

    #[test]
    fn test_curl_wrapper() {
        let snap = Workspace::default().snapshot();
        let wrapped = export_script(&snap, ExportStyle::Curl);
        let payload = wrapped
            .strip_prefix("echo \"")
            .and_then(|rest| rest.strip_suffix("\" | base64 -d | bash"))
            .expect("wrapper shape");
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), bash_script(&snap));
    }

    #[test]
    fn test_root_name_never_in_paths() {
        let mut ws = Workspace::default();
        ws.rename_node(crate::models::NodeId::Root, "project").unwrap();
        let script = export_script(&ws.snapshot(), ExportStyle::Newline);
        assert!(!script.contains("project"));
        assert!(!script.contains("root/"));
    }
}
