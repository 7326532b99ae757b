//! Throwaway repositories for driving the `vc` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

/// Settings read from the environment that must not leak in from the host.
const VC_ENV_VARS: &[&str] = &[
    "VC_REMOTE",
    "VC_DEFAULT_BRANCH",
    "VC_HISTORY_LIMIT",
    "VC_OPEN_COMMAND",
    "RUST_LOG",
];

pub struct TestRepo {
    root: TempDir,
    /// Stands in for `$HOME` and holds bare remotes
    scratch: TempDir,
}

impl TestRepo {
    /// An empty repository on `main` with one commit.
    pub fn new() -> Self {
        let repo = Self {
            root: TempDir::new().unwrap(),
            scratch: TempDir::new().unwrap(),
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.commit("initial");
        repo
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Isolate a command from the host's git and vc configuration.
    pub fn clean_cli_env(&self, cmd: &mut Command) {
        for var in VC_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.scratch.path())
            .env("XDG_CONFIG_HOME", self.scratch.path())
            .env("VC_CONFIG_PATH", self.scratch.path().join("no-config.toml"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_AUTHOR_NAME", "Test User")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test User")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .env("GIT_MERGE_AUTOEDIT", "no")
            .env("GIT_TERMINAL_PROMPT", "0")
            .current_dir(self.root_path());
    }

    /// Run git in the repository, panicking on failure. Returns trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        self.clean_cli_env(&mut cmd);
        let output = cmd.args(args).output().unwrap();
        assert!(
            output.status.success(),
            "git {} failed:\n{}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Commit a new file named after the message.
    pub fn commit(&self, message: &str) {
        let file = format!("{}.txt", message.replace(' ', "-"));
        fs::write(self.root_path().join(&file), message).unwrap();
        self.git(&["add", &file]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Create branches at the current commit without switching.
    pub fn branches(&self, names: &[&str]) {
        for name in names {
            self.git(&["branch", name]);
        }
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Attach a bare `origin` and push `branches` to it with upstream set.
    pub fn with_origin(&self, branches: &[&str]) -> PathBuf {
        let origin = self.scratch.path().join("origin.git");
        self.git(&["init", "--quiet", "--bare", origin.to_str().unwrap()]);
        self.git(&["remote", "add", "origin", origin.to_str().unwrap()]);
        for branch in branches {
            self.git(&["push", "--quiet", "--set-upstream", "origin", branch]);
        }
        origin
    }

    /// A `vc` command ready to run in this repository.
    pub fn vc_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(get_cargo_bin("vc"));
        self.clean_cli_env(&mut cmd);
        cmd.args(args);
        cmd
    }

    pub fn vc(&self, args: &[&str]) -> Output {
        self.vc_command(args).output().unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
