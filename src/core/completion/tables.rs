//! Fixed completion tables for the workflow language.

use crate::models::SuggestionKind;

/// A workflow keyword with its snippet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyword {
    pub label: &'static str,
    pub kind: SuggestionKind,
    pub insert_text: &'static str,
    pub documentation: &'static str,
    pub detail: &'static str,
}

/// Keywords offered outside `${` and `run:` contexts, in display order.
pub const KEYWORDS: &[Keyword] = &[
    Keyword {
        label: "blocks",
        kind: SuggestionKind::Keyword,
        insert_text: "blocks:\n  - ",
        documentation: "Root element for Cocoon workflow",
        detail: "Workflow container",
    },
    Keyword {
        label: "name",
        kind: SuggestionKind::Property,
        insert_text: "name: \"\"",
        documentation: "Block name (optional)",
        detail: "Block identifier",
    },
    Keyword {
        label: "description",
        kind: SuggestionKind::Property,
        insert_text: "description: \"\"",
        documentation: "Block description (optional)",
        detail: "Block documentation",
    },
    Keyword {
        label: "run",
        kind: SuggestionKind::Property,
        insert_text: "run: ",
        documentation: "Shell command(s) to execute",
        detail: "Execute command",
    },
    Keyword {
        label: "parallel",
        kind: SuggestionKind::Keyword,
        insert_text: "parallel:\n  - name: \"\"\n    run: ",
        documentation: "Execute blocks in parallel",
        detail: "Parallel execution",
    },
    Keyword {
        label: "for",
        kind: SuggestionKind::Keyword,
        insert_text: "for:\n  individual: item\n  in: ${}\n  run: ",
        documentation: "Loop iteration over list",
        detail: "Loop comprehension",
    },
    Keyword {
        label: "run-remotely",
        kind: SuggestionKind::Keyword,
        insert_text: "run-remotely:\n  ip: \n  user: \n  pass: \n  run: \n  log-into: ",
        documentation: "Execute command on remote server via SSH",
        detail: "SSH remote execution",
    },
    Keyword {
        label: "individual",
        kind: SuggestionKind::Property,
        insert_text: "individual: ",
        documentation: "Loop variable name",
        detail: "For loop variable",
    },
    Keyword {
        label: "in",
        kind: SuggestionKind::Property,
        insert_text: "in: ${}",
        documentation: "List to iterate over",
        detail: "Loop source",
    },
    Keyword {
        label: "ip",
        kind: SuggestionKind::Property,
        insert_text: "ip: ",
        documentation: "Remote server IP address",
        detail: "SSH host",
    },
    Keyword {
        label: "user",
        kind: SuggestionKind::Property,
        insert_text: "user: ",
        documentation: "SSH username",
        detail: "SSH authentication",
    },
    Keyword {
        label: "pass",
        kind: SuggestionKind::Property,
        insert_text: "pass: ",
        documentation: "SSH password",
        detail: "SSH authentication",
    },
    Keyword {
        label: "log-into",
        kind: SuggestionKind::Property,
        insert_text: "log-into: ",
        documentation: "Log file path for remote execution output",
        detail: "Remote execution logging",
    },
];

/// Shell commands offered after `run:`, in display order.
pub const SHELL_COMMANDS: &[&str] = &[
    "ls", "cd", "pwd", "mkdir", "rmdir", "rm", "cp", "mv", "cat", "echo", "grep", "find", "sed",
    "awk", "sort", "uniq", "wc", "head", "tail", "chmod", "chown", "touch", "tar", "zip", "unzip",
    "gzip", "gunzip", "ps", "top", "kill", "df", "du", "free", "which", "wget", "curl", "ssh",
    "scp", "rsync", "ping", "netstat", "ifconfig", "ip", "hostname", "uptime", "whoami", "sudo",
    "apt", "apt-get", "yum", "dnf", "systemctl", "service", "journalctl", "export", "env",
    "source", "alias", "history", "man", "git", "docker", "npm", "node", "python", "pip", "make",
    "vim", "nano", "less", "more",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_labels() {
        let labels: Vec<_> = KEYWORDS.iter().map(|k| k.label).collect();
        assert_eq!(
            labels,
            vec![
                "blocks", "name", "description", "run", "parallel", "for", "run-remotely",
                "individual", "in", "ip", "user", "pass", "log-into",
            ]
        );
    }

    #[test]
    fn test_shell_commands_unique() {
        let mut seen = std::collections::HashSet::new();
        assert!(SHELL_COMMANDS.iter().all(|cmd| seen.insert(*cmd)));
        assert_eq!(SHELL_COMMANDS.len(), 71);
        assert_eq!(SHELL_COMMANDS.first(), Some(&"ls"));
        assert_eq!(SHELL_COMMANDS.last(), Some(&"more"));
    }
}
