// Integration tests for proxylauncher. The launch flow is driven end to end
// with fake collaborators so no dialog, editor, or target process is started.

use anyhow::{anyhow, Result};
use clap::Parser;
use proxylauncher::window::NoWindowConcept;
use proxylauncher::*;
use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// ============================================================================
// Fakes
// ============================================================================

/// Probe that answers with a fixed value for every path.
struct FixedProbe(bool);

impl FileProbe for FixedProbe {
    fn is_file(&self, _path: &Path) -> bool {
        self.0
    }
}

/// Probe that treats the config file as real and the target as present.
struct ConfigAndTargetProbe {
    config: PathBuf,
    target: PathBuf,
}

impl FileProbe for ConfigAndTargetProbe {
    fn is_file(&self, path: &Path) -> bool {
        path == self.config || path == self.target
    }
}

#[derive(Default)]
struct RecordingNotifier {
    errors: RefCell<Vec<String>>,
    infos: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }
}

struct FakeSpawner {
    result: fn() -> Result<i32>,
    plans: RefCell<Vec<LaunchPlan>>,
}

impl FakeSpawner {
    fn exiting_with(result: fn() -> Result<i32>) -> Self {
        Self {
            result,
            plans: RefCell::new(Vec::new()),
        }
    }
}

impl ProcessSpawner for FakeSpawner {
    fn run(&self, plan: &LaunchPlan, _window: &dyn WindowVisibility) -> Result<i32> {
        self.plans.borrow_mut().push(plan.clone());
        (self.result)()
    }
}

#[derive(Default)]
struct RecordingEditor {
    opened: RefCell<Vec<PathBuf>>,
    fail: bool,
}

impl Editor for RecordingEditor {
    fn open(&self, path: &Path) -> Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        if self.fail {
            Err(anyhow!("no editor available"))
        } else {
            Ok(())
        }
    }
}

fn write_config(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("proxylauncher.cfg");
    std::fs::write(&path, text).unwrap();
    path
}

fn strings(items: &[&str]) -> Vec<OsString> {
    items.iter().map(OsString::from).collect()
}

// ============================================================================
// Launch Flow
// ============================================================================

#[test]
fn launch_merges_arguments_and_resolves_relative_target() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(
        dir.path(),
        "target = \"bin/app.exe\"\nextraArgs = --a \"b c\"\nextraArgsOrder = before\nhideTarget = yes\n",
    );
    let probe = ConfigAndTargetProbe {
        config: config_path.clone(),
        target: dir.path().join("bin/app.exe"),
    };
    let spawner = FakeSpawner::exiting_with(|| Ok(0));
    let notifier = RecordingNotifier::default();
    let editor = RecordingEditor::default();

    let launcher = Launcher::new(&probe, &spawner, &notifier, &editor, &NoWindowConcept);
    let outcome = launcher.run(&config_path, &strings(&["--c"]));

    assert_eq!(outcome, Outcome::Exited(0));
    assert!(notifier.errors.borrow().is_empty());
    let plans = spawner.plans.borrow();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].target, dir.path().join("bin/app.exe"));
    assert_eq!(plans[0].args, strings(&["--a", "b c", "--c"]));
    assert!(plans[0].hide_window);
}

#[test]
fn target_exit_code_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), "target=app.exe\n");
    let spawner = FakeSpawner::exiting_with(|| Ok(42));
    let notifier = RecordingNotifier::default();
    let editor = RecordingEditor::default();

    let probe = FixedProbe(true);
    let launcher = Launcher::new(&probe, &spawner, &notifier, &editor, &NoWindowConcept);
    let outcome = launcher.run(&config_path, &[]);

    assert_eq!(outcome, Outcome::Exited(42));
    assert_eq!(outcome.exit_code(), 42);
}

#[test]
fn missing_config_creates_default_and_opens_editor() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("proxylauncher.cfg");
    let spawner = FakeSpawner::exiting_with(|| Ok(0));
    let notifier = RecordingNotifier::default();
    let editor = RecordingEditor::default();

    let launcher = Launcher::new(&FsProbe, &spawner, &notifier, &editor, &NoWindowConcept);
    let outcome = launcher.run(&config_path, &strings(&["ignored"]));

    assert_eq!(outcome, Outcome::ConfigCreated);
    assert_eq!(outcome.exit_code(), 0);
    assert!(config_path.exists(), "default config should be written");
    assert_eq!(*editor.opened.borrow(), vec![config_path.clone()]);
    assert_eq!(notifier.infos.borrow().len(), 1);
    assert!(notifier.infos.borrow()[0].contains("default configuration has been created"));
    assert!(spawner.plans.borrow().is_empty(), "target must not run");

    // The untouched template is not launchable yet.
    let err = parse_config_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingTarget));
}

#[test]
fn editor_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("proxylauncher.cfg");
    let spawner = FakeSpawner::exiting_with(|| Ok(0));
    let notifier = RecordingNotifier::default();
    let editor = RecordingEditor {
        fail: true,
        ..Default::default()
    };

    let launcher = Launcher::new(&FsProbe, &spawner, &notifier, &editor, &NoWindowConcept);
    let outcome = launcher.run(&config_path, &[]);

    assert_eq!(outcome, Outcome::Failed);
    let errors = notifier.errors.borrow();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Failed to open new default configuration file"));
    assert!(notifier.infos.borrow().is_empty());
}

#[test]
fn default_config_write_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("no-such-dir").join("proxylauncher.cfg");
    let spawner = FakeSpawner::exiting_with(|| Ok(0));
    let notifier = RecordingNotifier::default();
    let editor = RecordingEditor::default();

    let launcher = Launcher::new(&FsProbe, &spawner, &notifier, &editor, &NoWindowConcept);
    let outcome = launcher.run(&config_path, &[]);

    assert_eq!(outcome, Outcome::Failed);
    assert!(notifier.errors.borrow()[0].starts_with("Failed to create default configuration file"));
    assert!(editor.opened.borrow().is_empty());
}

#[test]
fn parse_error_is_reported_and_nothing_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), "target=a.exe\ntarget=b.exe\n");
    let spawner = FakeSpawner::exiting_with(|| Ok(0));
    let notifier = RecordingNotifier::default();
    let editor = RecordingEditor::default();

    let probe = FixedProbe(true);
    let launcher = Launcher::new(&probe, &spawner, &notifier, &editor, &NoWindowConcept);
    let outcome = launcher.run(&config_path, &[]);

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(outcome.exit_code(), 1);
    let errors = notifier.errors.borrow();
    assert!(errors[0].contains("error parsing config file"));
    assert!(errors[0].contains("duplicate key in config: target"));
    assert!(spawner.plans.borrow().is_empty());
}

#[test]
fn missing_target_executable_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), "target=missing.exe\n");
    let spawner = FakeSpawner::exiting_with(|| Ok(0));
    let notifier = RecordingNotifier::default();
    let editor = RecordingEditor::default();

    let launcher = Launcher::new(&FsProbe, &spawner, &notifier, &editor, &NoWindowConcept);
    let outcome = launcher.run(&config_path, &[]);

    assert_eq!(outcome, Outcome::Failed);
    assert!(notifier.errors.borrow()[0].contains("target executable not found"));
    assert!(spawner.plans.borrow().is_empty());
}

#[test]
fn spawn_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path(), "target=app.exe\n");
    let spawner = FakeSpawner::exiting_with(|| {
        Err(anyhow!("permission denied").context("failed to execute target"))
    });
    let notifier = RecordingNotifier::default();
    let editor = RecordingEditor::default();

    let probe = FixedProbe(true);
    let launcher = Launcher::new(&probe, &spawner, &notifier, &editor, &NoWindowConcept);
    let outcome = launcher.run(&config_path, &[]);

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(
        notifier.errors.borrow()[0],
        "failed to execute target: permission denied"
    );
}

// ============================================================================
// Config Loading
// ============================================================================

#[test]
fn load_config_reads_file_and_checks_target() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.exe"), b"dummy executable").unwrap();
    let config_path = write_config(
        dir.path(),
        "target = \"app.exe\"\nextraArgs = \"--verbose\"\nextraArgsOrder = \"after\"\nhideTarget = true\n",
    );

    let config = load_config(&config_path, &FsProbe).unwrap();
    assert_eq!(
        config,
        ConfigRecord {
            target: "app.exe".into(),
            extra_args: "--verbose".into(),
            extra_args_order: Some(ExtraArgsOrder::After),
            hide_target: true,
        }
    );
}

#[test]
fn load_config_missing_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("nonexistent.cfg"), &FixedProbe(true)).unwrap_err();
    assert!(matches!(err, ConfigError::SourceUnreadable { .. }));
    assert!(err.to_string().contains("opening config file"));
}

#[test]
fn load_config_rejects_directory_target() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("tooldir")).unwrap();
    let config_path = write_config(dir.path(), "target=tooldir\n");

    let err = load_config(&config_path, &FsProbe).unwrap_err();
    assert!(matches!(err, ConfigError::TargetNotFound(ref p) if p == &dir.path().join("tooldir")));
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn cli_forwards_hyphenated_arguments_verbatim() {
    let cli =
        Cli::try_parse_from(["proxylauncher", "--verbose", "-x", "file.txt", "--help"]).unwrap();
    assert_eq!(cli.config, None);
    assert_eq!(cli.args, strings(&["--verbose", "-x", "file.txt", "--help"]));
}

#[test]
fn cli_accepts_leading_config_override() {
    let cli = Cli::try_parse_from([
        "proxylauncher",
        "--proxylauncher-config",
        "/tmp/custom.cfg",
        "run",
        "--fast",
    ])
    .unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/custom.cfg")));
    assert_eq!(cli.args, strings(&["run", "--fast"]));
}

#[cfg(unix)]
#[test]
fn cli_forwards_non_utf8_arguments() {
    use std::os::unix::ffi::OsStringExt;

    let raw = OsString::from_vec(vec![0x66, 0x6f, 0xff]);
    let cli = Cli::try_parse_from([OsString::from("proxylauncher"), raw.clone()]).unwrap();
    assert_eq!(cli.args, vec![raw]);
}

#[test]
fn cli_with_no_arguments() {
    let cli = Cli::try_parse_from(["proxylauncher"]).unwrap();
    assert!(cli.config.is_none());
    assert!(cli.args.is_empty());
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn core_functions_run_in_parallel() {
    let handles: Vec<_> = (0..16)
        .map(|i| {
            std::thread::spawn(move || {
                let text =
                    format!("target=app{i}.exe\nextraArgs=\"--n {i}\"\nextraArgsOrder=after\n");
                let config = parse_config_str(&text).unwrap();
                plan(&config, &[OsString::from(format!("r{i}"))], Path::new("/base")).args
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = strings(&[format!("r{i}").as_str(), "--n", i.to_string().as_str()]);
        assert_eq!(handle.join().unwrap(), expected);
    }
}
