//! End-to-end tests for the pkgup CLI
//!
//! These tests verify:
//! - Report and command streams of a check run
//! - JSON output schema
//! - Exit codes for success, per-item errors and fatal errors
//! - The sign and vercmp commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn pkgup() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pkgup"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Test system with a package database and an index
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("pkg")).unwrap();
        Self { dir }
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("pkg")
    }

    fn index(&self) -> PathBuf {
        self.dir.path().join("index.pkgup")
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn install(&self, name: &str, contents: &str) -> &Self {
        let entry = self.db().join(name);
        fs::create_dir(&entry).unwrap();
        fs::write(entry.join("+CONTENTS"), contents).unwrap();
        self
    }

    fn write_index(&self, text: &str) -> &Self {
        fs::write(self.index(), text).unwrap();
        self
    }

    fn check(&self) -> Command {
        let mut cmd = pkgup();
        cmd.arg("--pkg-db").arg(self.db()).arg("--index").arg(self.index());
        cmd
    }
}

fn sample_fixture() -> Fixture {
    let fixture = Fixture::new();
    fixture
        .install("curl-8.4.0", "@name curl-8.4.0\n@comment pkgpath=net/curl\n")
        .install(
            "vim-9.0.2100-gtk3",
            "@name vim-9.0.2100-gtk3\n@comment pkgpath=editors/vim,gtk3\n",
        )
        .install("zsh-5.9", "@name zsh-5.9\n@comment pkgpath=shells/zsh\n")
        .write_index(
            "2024-01-15T10:30:00Z\n\
             curl-8.5.0.tgz curl-8.5.0,0 net/curl\n\
             vim-9.0.2136-gtk3.tgz vim-9.0.2136-gtk3,0 editors/vim\n\
             vim-9.0.2136-no_x11.tgz vim-9.0.2136-no_x11,0 editors/vim\n\
             zsh-5.9.tgz zsh-5.9,0 shells/zsh\n",
        );
    fixture
}

mod check_command {
    use super::*;

    #[test]
    fn test_upgrades_report_and_command() {
        let fixture = sample_fixture();
        fixture
            .check()
            .assert()
            .success()
            .stdout("pkg_add -u curl vim\n")
            .stderr(predicate::str::contains("curl-8.4.0->8.5.0\n"))
            .stderr(predicate::str::contains(
                "vim-9.0.2100-gtk3->9.0.2136-gtk3\n",
            ))
            .stderr(predicate::str::contains("to upgrade:"));
    }

    #[test]
    fn test_snapshot_flag() {
        let fixture = sample_fixture();
        fixture
            .check()
            .arg("-s")
            .assert()
            .success()
            .stdout("pkg_add -u -Dsnap curl vim\n");
    }

    #[test]
    fn test_exclude_flag() {
        let fixture = sample_fixture();
        fixture
            .check()
            .args(["--exclude", "vim"])
            .assert()
            .success()
            .stdout("pkg_add -u curl\n");
    }

    #[test]
    fn test_up_to_date() {
        let fixture = Fixture::new();
        fixture
            .install("zsh-5.9", "@name zsh-5.9\n")
            .write_index("zsh-5.9.tgz zsh-5.9,0\n");
        fixture
            .check()
            .assert()
            .success()
            .stdout("")
            .stderr(predicate::str::contains("up to date"));
    }

    #[test]
    fn test_cron_mode_is_silent_when_up_to_date() {
        let fixture = Fixture::new();
        fixture
            .install("zsh-5.9", "@name zsh-5.9\n")
            .write_index("zsh-5.9.tgz zsh-5.9,0\n");
        fixture
            .check()
            .arg("-c")
            .assert()
            .success()
            .stdout("")
            .stderr("");
    }

    #[test]
    fn test_json_output() {
        let fixture = sample_fixture();
        let output = fixture.check().arg("--json").output().unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["command"], "pkg_add -u curl vim");
        assert_eq!(json["summary"]["upgrades"], 2);
        assert_eq!(json["summary"]["up_to_date"], 1);
        assert_eq!(json["outcomes"][0]["type"], "upgrade");
        assert_eq!(json["outcomes"][0]["reason"], "version_bump");
    }

    #[test]
    fn test_per_item_errors_exit_code() {
        let fixture = Fixture::new();
        fixture
            .install("zsh-5.9", "@name zsh-5.9\n")
            .install("not-a-package", "@name not-a-package\n")
            .write_index("zsh-5.9.tgz zsh-5.9,0\n");
        fixture
            .check()
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not-a-package"));
    }

    #[test]
    fn test_missing_index_exit_code() {
        let fixture = Fixture::new();
        fixture
            .check()
            .assert()
            .code(1)
            .stderr(predicate::str::contains("index file not found"));
    }

    #[test]
    fn test_missing_index_option() {
        pkgup()
            .assert()
            .code(1)
            .stderr(predicate::str::contains("missing option: index"));
    }

    #[test]
    fn test_config_file() {
        let fixture = sample_fixture();
        let config = fixture.path().join("pkgup.toml");
        fs::write(
            &config,
            format!(
                "pkg-db = {:?}\nindex = {:?}\nonly = [\"curl\"]\n",
                fixture.db().display().to_string(),
                fixture.index().display().to_string()
            ),
        )
        .unwrap();

        pkgup()
            .arg("--config")
            .arg(&config)
            .assert()
            .success()
            .stdout("pkg_add -u curl\n");
    }

    #[test]
    fn test_stale_index_warning() {
        let fixture = sample_fixture();
        let signify = fixture.path().join("quirks.sig");
        fs::write(&signify, "date=2024-01-20T00:00:00Z\n").unwrap();

        fixture
            .check()
            .arg("--signify")
            .arg(&signify)
            .assert()
            .success()
            .stderr(predicate::str::contains("older than packages on configured mirror"));
    }
}

mod sign_command {
    use super::*;

    #[test]
    fn test_sign_plain() {
        let fixture = Fixture::new();
        fixture.install("curl-8.5.0", "@name curl-8.5.0\n@comment pkgpath=net/curl\n@wantlib c.97.1\n");

        pkgup()
            .arg("sign")
            .arg(fixture.db().join("curl-8.5.0/+CONTENTS"))
            .assert()
            .success()
            .stdout("curl-8.5.0.tgz curl-8.5.0,0,c.97.1 net/curl\n");
    }

    #[test]
    fn test_sign_digest_with_header() {
        let fixture = Fixture::new();
        fixture.install("curl-8.5.0", "@name curl-8.5.0\n@comment pkgpath=net/curl\n");
        let signify = fixture.path().join("quirks.sig");
        fs::write(&signify, "untrusted comment: x\ndate=2024-01-14T03:10:41Z\n").unwrap();

        let output = pkgup()
            .arg("sign")
            .arg("--digest")
            .arg("--signify")
            .arg(&signify)
            .arg(fixture.db().join("curl-8.5.0/+CONTENTS"))
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines[0], "2024-01-14T03:10:41Z");
        assert!(lines[1].starts_with("curl-8.5.0.tgz "));
        assert!(lines[1].ends_with(" net/curl"));
        assert!(!lines[1].contains(','));
    }

    #[test]
    fn test_sign_then_check_is_up_to_date() {
        let fixture = Fixture::new();
        fixture.install("zsh-5.9", "@name zsh-5.9\n@comment pkgpath=shells/zsh\n@wantlib c.97.1\n");

        let output = pkgup()
            .args(["sign", "--digest"])
            .arg(fixture.db().join("zsh-5.9/+CONTENTS"))
            .output()
            .unwrap();
        fs::write(fixture.index(), &output.stdout).unwrap();

        fixture
            .check()
            .assert()
            .success()
            .stdout("")
            .stderr(predicate::str::contains("up to date"));
    }

    #[test]
    fn test_sign_missing_file() {
        pkgup()
            .args(["sign", "/nonexistent/+CONTENTS"])
            .assert()
            .code(2);
    }
}

mod vercmp_command {
    use super::*;

    #[test]
    fn test_vercmp() {
        pkgup()
            .args(["vercmp", "1.0rc1", "1.0"])
            .assert()
            .success()
            .stdout("1.0rc1 < 1.0\n");

        pkgup()
            .args(["vercmp", "1.01", "1.1"])
            .assert()
            .success()
            .stdout("1.01 = 1.1\n");

        pkgup()
            .args(["vercmp", "1.14.7p0v3", "1.14.7v3"])
            .assert()
            .success()
            .stdout("1.14.7p0v3 > 1.14.7v3\n");
    }
}
