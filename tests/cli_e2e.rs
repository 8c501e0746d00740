//! End-to-end CLI tests for linepack.
//!
//! These tests run the actual binary against transcripts in a temporary
//! directory and check the files and progress lines it produces.
//!
//! # Test Categories
//!
//! - **Basic functionality**: Default directories and progress output
//! - **Output formats**: JSONL, JSON and CSV generation
//! - **Heuristics**: Presets and config files
//! - **Filters**: Date and user filtering
//! - **Error handling**: Missing inputs and unreadable files
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const ROXY: &str = "\
[LINE] ロキシーとのトーク履歴
保存日時：2026/01/10 12:00

2026.01.09 金曜日
01:54 ロキシー こんばんは
明日の予定は？
01:55 ユキ 画像
01:56 ユキ 来週のライブ
18:30 開場

2026.01.10 土曜日
09:00 ユキ おはよう
09:01 ロキシーが退出しました
";

const GROUP: &str = "\
2026.01.11 日曜日
12:00 村上 よろしく
12:01 たなか🌸 画像
";

const ENGLISH: &str = "\
2030.01.01 Wednesday
09:00 Bob hello
there
09:05 Bob Image
";

/// Creates a working directory with a `targets/` folder of transcripts.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    let targets = dir.path().join("targets");
    fs::create_dir(&targets).unwrap();

    fs::write(targets.join("roxy.txt"), ROXY).unwrap();
    fs::write(targets.join("group.txt"), GROUP).unwrap();
    fs::write(targets.join("notes.md"), "not a transcript").unwrap();

    dir
}

fn linepack_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::from_std(std::process::Command::new(env!("CARGO_BIN_EXE_linepack")));
    cmd.current_dir(dir.path());
    cmd
}

fn read_lines(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_default_directories() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Processing: targets/group.txt"))
            .stdout(predicate::str::contains("Processing: targets/roxy.txt"))
            .stdout(predicate::str::contains(
                "  -> Output: output/roxy.jsonl (4 messages, 1 excluded)",
            ))
            .stdout(predicate::str::contains(
                "  -> Output: output/group.jsonl (1 messages, 1 excluded)",
            ))
            .stdout(predicate::str::contains(
                "\nTotal: 5 messages parsed from 2 files (2 excluded)",
            ));

        assert!(dir.path().join("output/roxy.jsonl").exists());
        assert!(dir.path().join("output/group.jsonl").exists());
        assert!(!dir.path().join("output/notes.jsonl").exists());
    }

    #[test]
    fn test_files_processed_in_name_order() {
        let dir = setup_fixtures();

        let output = linepack_cmd(&dir).output().unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();

        let group = stdout.find("group.txt").unwrap();
        let roxy = stdout.find("roxy.txt").unwrap();
        assert!(group < roxy);
    }

    #[test]
    fn test_jsonl_records() {
        let dir = setup_fixtures();
        linepack_cmd(&dir).assert().success();

        let records = read_lines(&dir.path().join("output/roxy.jsonl"));
        assert_eq!(records.len(), 4);

        assert_eq!(
            records[0],
            serde_json::json!({
                "date": "2026.01.09",
                "day": "金曜日",
                "time": "01:54",
                "user": "ロキシー",
                "message": "こんばんは\n明日の予定は？"
            })
        );
        assert_eq!(records[1]["message"], "来週のライブ\n18:30 開場");
        assert_eq!(records[3]["user"], "ロキシー");
        assert_eq!(records[3]["message"], "が退出しました");
    }

    #[test]
    fn test_json_keys_in_order_and_utf8() {
        let dir = setup_fixtures();
        linepack_cmd(&dir).assert().success();

        let content = fs::read_to_string(dir.path().join("output/group.jsonl")).unwrap();
        assert_eq!(
            content,
            "{\"date\":\"2026.01.11\",\"day\":\"日曜日\",\"time\":\"12:00\",\"user\":\"村上\",\"message\":\"よろしく\"}\n"
        );
    }

    #[test]
    fn test_explicit_file_and_output_dir() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .args(["targets/roxy.txt", "-o", "parsed/nested"])
            .assert()
            .success()
            .stdout(predicate::str::contains("parsed from 1 files"));

        assert!(dir.path().join("parsed/nested/roxy.jsonl").exists());
    }

    #[test]
    fn test_quiet_flag() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .arg("-q")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        assert!(dir.path().join("output/roxy.jsonl").exists());
    }

    #[test]
    fn test_rerun_overwrites_output() {
        let dir = setup_fixtures();
        linepack_cmd(&dir).assert().success();
        linepack_cmd(&dir).assert().success();

        assert_eq!(read_lines(&dir.path().join("output/roxy.jsonl")).len(), 4);
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_json_format() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .args(["-f", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("output/roxy.json "));

        let content = fs::read_to_string(dir.path().join("output/roxy.json")).unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_csv_format() {
        let dir = setup_fixtures();

        linepack_cmd(&dir).args(["-f", "csv"]).assert().success();

        let content = fs::read_to_string(dir.path().join("output/group.csv")).unwrap();
        assert_eq!(
            content,
            "date,day,time,user,message\n2026.01.11,日曜日,12:00,村上,よろしく\n"
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .args(["-f", "xml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }
}

// ============================================================================
// Heuristics Tests
// ============================================================================

mod heuristics {
    use super::*;

    #[test]
    fn test_english_preset() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bob.txt"), ENGLISH).unwrap();

        linepack_cmd(&dir)
            .args(["bob.txt", "--preset", "english"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(1 messages, 1 excluded)"));

        let records = read_lines(&dir.path().join("output/bob.jsonl"));
        assert_eq!(records[0]["day"], "Wednesday");
        assert_eq!(records[0]["message"], "hello\nthere");
    }

    #[test]
    fn test_japanese_preset_on_english_export() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bob.txt"), ENGLISH).unwrap();

        linepack_cmd(&dir).arg("bob.txt").assert().success();

        let records = read_lines(&dir.path().join("output/bob.jsonl"));
        assert_eq!(records.len(), 2);
        assert!(records[0]["date"].is_null());
        assert!(records[0]["day"].is_null());
    }

    #[test]
    fn test_config_file() {
        let dir = setup_fixtures();
        fs::write(
            dir.path().join("heuristics.json"),
            r#"{"body_keywords": ["開演"]}"#,
        )
        .unwrap();

        linepack_cmd(&dir)
            .args(["targets/roxy.txt", "--config", "heuristics.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(5 messages, 1 excluded)"));

        // Without 開場 as a keyword the schedule line becomes its own message.
        let records = read_lines(&dir.path().join("output/roxy.jsonl"));
        assert_eq!(records[2]["user"], "開場");
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = setup_fixtures();
        fs::write(dir.path().join("bad.json"), r#"{"media_placeholder": " "}"#).unwrap();

        linepack_cmd(&dir)
            .args(["--config", "bad.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("media_placeholder"));
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_after_filter() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .args(["targets/roxy.txt", "--after", "2026-01-10"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(2 messages, 1 excluded)"));

        let records = read_lines(&dir.path().join("output/roxy.jsonl"));
        assert!(records.iter().all(|r| r["date"] == "2026.01.10"));
    }

    #[test]
    fn test_before_and_from_filters() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .args(["targets/roxy.txt", "--before", "2026-01-09", "--from", "ユキ"])
            .assert()
            .success();

        let records = read_lines(&dir.path().join("output/roxy.jsonl"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["message"], "来週のライブ\n18:30 開場");
    }

    #[test]
    fn test_invalid_date() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .args(["--after", "2026/01/10"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid date"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_targets_directory() {
        let dir = tempdir().unwrap();

        linepack_cmd(&dir)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("targets"));

        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_no_transcripts() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("targets")).unwrap();
        fs::write(dir.path().join("targets/readme.md"), "hi").unwrap();

        linepack_cmd(&dir)
            .assert()
            .success()
            .stderr(predicate::str::contains("Warning: no .txt files found"))
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn test_missing_input_file() {
        let dir = setup_fixtures();

        linepack_cmd(&dir)
            .arg("nope.txt")
            .assert()
            .failure()
            .stderr(predicate::str::contains("nope.txt"));
    }

    #[test]
    fn test_invalid_utf8_file_does_not_stop_batch() {
        let dir = setup_fixtures();
        fs::write(dir.path().join("targets/broken.txt"), b"10:00 A \xff\xfe\n").unwrap();

        linepack_cmd(&dir)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error processing targets/broken.txt"))
            .stdout(predicate::str::contains("Processing: targets/roxy.txt"))
            .stdout(predicate::str::contains("parsed from 3 files"));

        assert!(dir.path().join("output/roxy.jsonl").exists());
        assert!(dir.path().join("output/group.jsonl").exists());
    }

    #[test]
    fn test_empty_transcript() {
        let dir = setup_fixtures();
        fs::write(dir.path().join("targets/empty.txt"), "").unwrap();

        linepack_cmd(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "  -> Output: output/empty.jsonl (0 messages, 0 excluded)",
            ));

        let content = fs::read_to_string(dir.path().join("output/empty.jsonl")).unwrap();
        assert!(content.is_empty());
    }
}
