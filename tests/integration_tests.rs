use batchmover::cli::{Args, RunError, TestMode, run_cli};
use batchmover::{ConfigError, ManifestError, MoveStatus, ValidationError};
/// Integration tests for batchmover
///
/// These tests drive complete runs against temporary folders, answering the
/// interactive questions from scripted input.
///
/// Test categories:
/// 1. Live batching
/// 2. Test (dry-run) mode
/// 3. Manifest handling
/// 4. Settings from flags and config files
/// 5. Error scenarios
use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary folder holding a manifest and media files.
struct TestFixture {
    temp_dir: TempDir,
    /// Holds an empty config file kept outside the batched folder.
    config_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(config_dir.path().join("config.toml"), "").expect("Failed to write config");
        TestFixture {
            temp_dir,
            config_dir,
        }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn create_text_file(&self, name: &str, content: &str) {
        let mut file = File::create(self.path().join(name)).expect("Failed to create file");
        file.write_all(content.as_bytes())
            .expect("Failed to write file content");
    }

    /// Create empty media files.
    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_text_file(name, "data");
        }
    }

    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_dir(), "Directory should exist: {}", path.display());
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_file_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "File should not exist: {}", path.display());
    }

    /// Count directories in the test folder (non-recursive).
    fn count_dirs(&self) -> usize {
        fs::read_dir(self.path())
            .expect("Failed to read directory")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .count()
    }

    /// Count files directly inside a sub-folder.
    fn count_files_in(&self, rel_path: &str) -> usize {
        fs::read_dir(self.path().join(rel_path))
            .expect("Failed to read directory")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .count()
    }

    /// Arguments with an explicit empty config, so no user config applies.
    fn args(&self, test_mode: TestMode) -> Args {
        Args {
            folder_path: Some(self.path().to_path_buf()),
            test_mode,
            config: Some(self.config_dir.path().join("config.toml")),
            ..Default::default()
        }
    }

    /// Arguments that let the folder's `.batchmoverrc.toml` be found. The
    /// local file takes precedence over any config in the home directory.
    fn local_config_args(&self, test_mode: TestMode) -> Args {
        Args {
            config: None,
            ..self.args(test_mode)
        }
    }
}

/// Runs with the given answers: batch size, column, header, extension.
fn run(args: &Args, answers: &str) -> Result<batchmover::RunReport, RunError> {
    run_cli(args, Cursor::new(answers.as_bytes().to_vec()), Vec::new())
}

// ============================================================================
// Test Suite 1: Live Batching
// ============================================================================

#[test]
fn test_missing_file_is_skipped_with_warning() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\nb\nc\n");
    fixture.create_files(&["a.jpg", "b.jpg"]);

    let report = run(&fixture.args(TestMode::Off), "2\na\nn\njpg\n").expect("Run failed");

    fixture.assert_file_exists("batch_1/a.jpg");
    fixture.assert_file_exists("batch_1/b.jpg");
    fixture.assert_dir_exists("batch_2");
    assert_eq!(fixture.count_files_in("batch_2"), 0);
    fixture.assert_file_not_exists("a.jpg");

    assert_eq!(report.batch_count, 2);
    assert_eq!(report.counts.moved, 2);
    assert_eq!(report.counts.missing, 1);
    let missing: Vec<_> = report
        .records
        .iter()
        .filter(|r| r.status == MoveStatus::Missing)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].file_name, "c.jpg");
    assert_eq!(missing[0].batch, 2);
}

#[test]
fn test_batches_fill_in_manifest_order() {
    let fixture = TestFixture::new();
    let names: Vec<String> = (1..=7).map(|i| format!("IMG_{:03}", i)).collect();
    fixture.create_text_file("manifest.csv", &format!("{}\n", names.join("\n")));
    for name in &names {
        fixture.create_text_file(&format!("{}.png", name), "png");
    }

    let report = run(&fixture.args(TestMode::Off), "3\nA\nN\npng\n").expect("Run failed");

    assert_eq!(report.batch_count, 3);
    assert_eq!(fixture.count_files_in("batch_1"), 3);
    assert_eq!(fixture.count_files_in("batch_2"), 3);
    assert_eq!(fixture.count_files_in("batch_3"), 1);
    fixture.assert_file_exists("batch_1/IMG_001.png");
    fixture.assert_file_exists("batch_2/IMG_004.png");
    fixture.assert_file_exists("batch_3/IMG_007.png");

    let ordinals: Vec<usize> = report.records.iter().map(|r| r.batch).collect();
    assert_eq!(ordinals, vec![1, 1, 1, 2, 2, 2, 3]);
}

#[test]
fn test_only_named_files_with_extension_move() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\nb\n");
    fixture.create_files(&["a.jpg", "a.raw", "b.jpg", "unlisted.jpg"]);

    run(&fixture.args(TestMode::Off), "10\na\nn\njpg\n").expect("Run failed");

    fixture.assert_file_exists("batch_1/a.jpg");
    fixture.assert_file_exists("batch_1/b.jpg");
    fixture.assert_file_exists("a.raw");
    fixture.assert_file_exists("unlisted.jpg");
    fixture.assert_file_exists("list.csv");
}

#[test]
fn test_existing_destination_is_not_overwritten() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\n");
    fixture.create_text_file("a.jpg", "new");
    fs::create_dir(fixture.path().join("batch_1")).unwrap();
    fixture.create_text_file("batch_1/a.jpg", "old");

    let report = run(&fixture.args(TestMode::Off), "1\na\nn\njpg\n").expect("Run failed");

    assert!(report.has_failures());
    assert!(matches!(report.records[0].status, MoveStatus::Failed { .. }));
    assert_eq!(
        fs::read_to_string(fixture.path().join("batch_1/a.jpg")).unwrap(),
        "old"
    );
    fixture.assert_file_exists("a.jpg");
}

// ============================================================================
// Test Suite 2: Test Mode
// ============================================================================

#[test]
fn test_test_mode_doesnt_move_files() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\nb\nc\n");
    fixture.create_files(&["a.jpg", "b.jpg", "c.jpg"]);

    let report = run(&fixture.args(TestMode::On), "2\na\nn\njpg\n").expect("Run failed");

    fixture.assert_file_exists("a.jpg");
    fixture.assert_file_exists("b.jpg");
    fixture.assert_file_exists("c.jpg");
    assert_eq!(fixture.count_dirs(), 0, "Test mode should not create directories");
    assert_eq!(report.counts.would_move, 3);
    assert_eq!(report.batch_count, 2);
}

#[test]
fn test_test_mode_reports_same_mapping_as_live() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\nb\nc\nd\ne\n");
    fixture.create_files(&["a.jpg", "b.jpg", "d.jpg", "e.jpg"]);

    let mapping = |report: &batchmover::RunReport| -> Vec<(String, usize, PathBuf)> {
        report
            .records
            .iter()
            .map(|r| (r.name.clone(), r.batch, r.destination.clone()))
            .collect()
    };

    let dry = run(&fixture.args(TestMode::On), "2\na\nn\njpg\n").expect("Dry run failed");
    let live = run(&fixture.args(TestMode::Off), "2\na\nn\njpg\n").expect("Live run failed");

    assert_eq!(mapping(&dry), mapping(&live));
    assert_eq!(dry.counts.would_move, live.counts.moved);
    assert_eq!(dry.counts.missing, live.counts.missing);
    fixture.assert_file_exists("batch_3/e.jpg");
}

// ============================================================================
// Test Suite 3: Manifest Handling
// ============================================================================

#[test]
fn test_header_row_is_skipped() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "id,file\n1,a\n2,b\n");
    fixture.create_files(&["file.jpg", "a.jpg", "b.jpg"]);

    let report = run(&fixture.args(TestMode::Off), "5\nB\ny\njpg\n").expect("Run failed");

    assert_eq!(report.counts.total(), 2);
    fixture.assert_file_exists("file.jpg");
    fixture.assert_file_exists("batch_1/a.jpg");
}

#[test]
fn test_header_row_is_included_when_answered_no() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "file\na\n");
    fixture.create_files(&["file.jpg", "a.jpg"]);

    let report = run(&fixture.args(TestMode::Off), "5\na\nn\njpg\n").expect("Run failed");

    assert_eq!(report.counts.moved, 2);
    fixture.assert_file_exists("batch_1/file.jpg");
}

#[test]
fn test_empty_cells_are_skipped() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a,1\n,2\nb,3\n");
    fixture.create_files(&["a.jpg", "b.jpg"]);

    let report = run(&fixture.args(TestMode::On), "1\na\nn\njpg\n").expect("Run failed");

    assert_eq!(report.counts.total(), 2);
    assert_eq!(report.counts.missing, 0);
    assert_eq!(report.batch_count, 2);
}

#[test]
fn test_short_row_fails_run() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a,x\nb\n");

    let result = run(&fixture.args(TestMode::On), "1\nb\nn\njpg\n");

    assert!(matches!(
        result,
        Err(RunError::Manifest(ManifestError::ColumnOutOfRange { row: 1, .. }))
    ));
}

#[test]
fn test_missing_manifest_fails_run() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.jpg"]);

    let result = run(&fixture.args(TestMode::On), "1\na\nn\njpg\n");

    assert!(matches!(
        result,
        Err(RunError::Manifest(ManifestError::NotFound { .. }))
    ));
}

#[test]
fn test_hidden_csv_is_not_a_manifest() {
    let fixture = TestFixture::new();
    fixture.create_text_file(".list.csv", "a\n");

    let result = run(&fixture.args(TestMode::On), "1\na\nn\njpg\n");

    assert!(matches!(
        result,
        Err(RunError::Manifest(ManifestError::NotFound { .. }))
    ));
}

// ============================================================================
// Test Suite 4: Settings From Flags and Config
// ============================================================================

#[test]
fn test_flags_answer_every_question() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "name\na\nb\n");
    fixture.create_files(&["a.tif", "b.tif"]);

    let args = Args {
        batch_size: Some(1),
        column: Some("a".to_string()),
        header: Some("y".to_string()),
        extension: Some(".tif".to_string()),
        ..fixture.args(TestMode::Off)
    };

    // No scripted answers: any prompt would fail.
    let report = run(&args, "").expect("Run failed");

    assert_eq!(report.batch_count, 2);
    fixture.assert_file_exists("batch_1/a.tif");
    fixture.assert_file_exists("batch_2/b.tif");
}

#[test]
fn test_local_config_file() {
    let fixture = TestFixture::new();
    fixture.create_text_file(
        ".batchmoverrc.toml",
        r#"
[batch]
size = 2
folder_prefix = "set_"

[manifest]
column = "A"
has_header = false
pattern = "*.txt"

[files]
extension = "mp3"
"#,
    );
    fixture.create_text_file("tracks.txt", "one\ntwo\nthree\n");
    fixture.create_files(&["one.mp3", "two.mp3", "three.mp3"]);

    let report = run(&fixture.local_config_args(TestMode::Off), "").expect("Run failed");

    assert_eq!(report.batch_count, 2);
    fixture.assert_file_exists("set_1/one.mp3");
    fixture.assert_file_exists("set_1/two.mp3");
    fixture.assert_file_exists("set_2/three.mp3");
}

#[test]
fn test_explicit_config_and_partial_prompts() {
    let fixture = TestFixture::new();
    let config_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = config_dir.path().join("batch.toml");
    fs::write(&config_path, "[files]\nextension = \"jpg\"\n").unwrap();

    fixture.create_text_file("list.csv", "a\n");
    fixture.create_files(&["a.jpg"]);

    let args = Args {
        config: Some(config_path),
        ..fixture.args(TestMode::Off)
    };

    // Extension comes from the config; the other three are prompted.
    run(&args, "4\na\nn\n").expect("Run failed");

    fixture.assert_file_exists("batch_1/a.jpg");
}

#[test]
fn test_report_is_written() {
    let fixture = TestFixture::new();
    let report_dir = TempDir::new().expect("Failed to create temp directory");
    let report_path = report_dir.path().join("run.json");

    fixture.create_text_file("list.csv", "a\nb\n");
    fixture.create_files(&["a.jpg"]);

    let args = Args {
        report: Some(report_path.clone()),
        ..fixture.args(TestMode::On)
    };
    run(&args, "1\na\nn\njpg\n").expect("Run failed");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["settings"]["dry_run"], true);
    assert_eq!(json["counts"]["would_move"], 1);
    assert_eq!(json["counts"]["missing"], 1);
    assert_eq!(json["records"][1]["folder"], "batch_2");
}

// ============================================================================
// Test Suite 5: Error Scenarios
// ============================================================================

#[test]
fn test_nonexistent_folder() {
    let args = Args {
        folder_path: Some(PathBuf::from("/non/existent/folder")),
        ..Default::default()
    };

    let result = run(&args, "");

    assert!(matches!(
        result,
        Err(RunError::Config(ConfigError::FolderNotFound(_)))
    ));
}

#[test]
fn test_batch_size_out_of_range() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\n");

    let result = run(&fixture.args(TestMode::On), "501\n");

    assert!(matches!(
        result,
        Err(RunError::Validation(ValidationError::BatchSizeOutOfRange(501)))
    ));
}

#[test]
fn test_invalid_column_letter() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\n");

    let result = run(&fixture.args(TestMode::On), "5\n7\n");

    assert!(matches!(
        result,
        Err(RunError::Validation(ValidationError::InvalidColumn(_)))
    ));
}

#[test]
fn test_invalid_header_answer() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\n");

    let result = run(&fixture.args(TestMode::On), "5\na\nmaybe\n");

    assert!(matches!(
        result,
        Err(RunError::Validation(ValidationError::InvalidAnswer(_)))
    ));
}

#[test]
fn test_empty_extension() {
    let fixture = TestFixture::new();
    fixture.create_text_file("list.csv", "a\n");
    fixture.create_files(&["a"]);

    let result = run(&fixture.args(TestMode::Off), "5\na\nn\n\n");

    assert!(matches!(
        result,
        Err(RunError::Config(ConfigError::EmptyExtension))
    ));
    fixture.assert_file_exists("a");
    assert_eq!(fixture.count_dirs(), 0);
}

#[test]
fn test_invalid_manifest_pattern_in_config() {
    let fixture = TestFixture::new();
    fixture.create_text_file(".batchmoverrc.toml", "[manifest]\npattern = \"[*.csv\"\n");

    let result = run(&fixture.local_config_args(TestMode::On), "");

    assert!(matches!(
        result,
        Err(RunError::Config(ConfigError::InvalidGlobPattern(_)))
    ));
}

#[test]
fn test_folder_prefix_outside_folder_is_rejected() {
    let parent = TempDir::new().expect("Failed to create temp directory");
    let folder = parent.path().join("photos");
    fs::create_dir(&folder).unwrap();
    fs::write(
        folder.join(".batchmoverrc.toml"),
        "[batch]\nfolder_prefix = \"../escaped_\"\n",
    )
    .unwrap();
    fs::write(folder.join("list.csv"), "a\n").unwrap();
    fs::write(folder.join("a.jpg"), "data").unwrap();

    let args = Args {
        folder_path: Some(folder.clone()),
        test_mode: TestMode::Off,
        ..Default::default()
    };
    let result = run(&args, "1\na\nn\njpg\n");

    assert!(matches!(
        result,
        Err(RunError::Config(ConfigError::InvalidFolderPrefix(_)))
    ));
    assert!(folder.join("a.jpg").is_file());
    assert!(!parent.path().join("escaped_1").exists());
}
