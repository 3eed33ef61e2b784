// Integration tests for the `netnudge` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ADDRESS_BOOK: &str = "\
First Name,Last Name,Email,Mobile Phone,Company,Labels
Jane,Doe,jane@x.com,,Initech,* myContacts ::: Work
Kim,Park,,+15550001111,,Family
";

const CONNECTIONS: &str = "\
First Name,Last Name,URL,Email Address,Company,Position
Jane,Doe,https://linkedin.com/in/jane,jane@x.com,Initech,CTO
Kim,Park,https://linkedin.com/in/kim,,,Analyst
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("netnudge.toml"), "[output]\n").unwrap();
        fs::write(dir.path().join("contacts.csv"), ADDRESS_BOOK).unwrap();
        fs::write(dir.path().join("Connections.csv"), CONNECTIONS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn netnudge(&self, extra: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_netnudge"));
        cmd.env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.path("netnudge.toml"))
            .args(extra);
        cmd.output().expect("run netnudge")
    }

    fn match_args(&self) -> Vec<String> {
        vec![
            "match".to_string(),
            "-p".to_string(),
            arg(&self.path("contacts.csv")),
            "-s".to_string(),
            arg(&self.path("Connections.csv")),
        ]
    }
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn log_file_receives_run_logs() {
    let fixture = Fixture::new();
    let log_path = fixture.path("logs").join("netnudge.log");
    fs::create_dir_all(log_path.parent().unwrap()).unwrap();

    let mut args = vec!["--log-file-path".to_string(), arg(&log_path)];
    args.extend(fixture.match_args());
    args.push("--dry-run".to_string());
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = fixture.netnudge(&args);
    assert!(output.status.success(), "exit code was {:?}", output.status);

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("contact linking finished"), "log was: {log:?}");
    // The file layer is plain text.
    assert!(!log.contains('\u{1b}'));
}

#[test]
fn group_filter_limits_primary_contacts() {
    let fixture = Fixture::new();
    let out_path = fixture.path("outreach.csv");

    let mut args = fixture.match_args();
    args.extend(["--group".to_string(), "WORK".to_string()]);
    args.extend(["-o".to_string(), arg(&out_path)]);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = fixture.netnudge(&args);
    assert!(output.status.success(), "exit code was {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 1 primary contacts"), "stdout was: {stdout}");
    assert!(stdout.contains("Matched: 1 high, 0 medium, 1 unmatched"));

    let sheet = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = sheet.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Jane Doe,Initech,"));
    assert!(lines[1].ends_with(",LinkedIn,High,,FALSE"));
    // Kim's address-book entry was filtered out; only the connection remains.
    assert_eq!(
        lines[2],
        "Kim Park,,,,https://linkedin.com/in/kim,LinkedIn,N/A,,FALSE"
    );
}

#[test]
fn missing_primary_exits_with_error() {
    let fixture = Fixture::new();
    let output = fixture.netnudge(&[
        "match",
        "-p",
        &arg(&fixture.path("nope.csv")),
        "-s",
        &arg(&fixture.path("Connections.csv")),
        "--dry-run",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope.csv"), "stderr was: {stderr}");
}
