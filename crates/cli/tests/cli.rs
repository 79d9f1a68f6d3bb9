use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const UNORDERED: &str = "package demo\n\nfunc helper() {}\n\nfunc main() {}\n";
const ORDERED: &str = "package demo\n\nfunc main() {}\n\nfunc helper() {}\n";
const WITH_CONST: &str = "package demo\n\nconst Version = \"1.0\"\n\nfunc main() {}\n";

#[allow(deprecated)]
fn go_reorder(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("go-reorder").expect("binary");
    cmd.current_dir(workdir).env_remove("RUST_LOG");
    cmd
}

/// Temp module root so config discovery never escapes the test directory
fn module() -> TempDir {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("go.mod"), "module example.com/demo\n").unwrap();
    temp
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn cli_prints_reordered_file_to_stdout() {
    let temp = module();
    write(temp.path(), "demo.go", UNORDERED);

    go_reorder(temp.path())
        .arg("demo.go")
        .assert()
        .success()
        .stdout(ORDERED);
    assert_eq!(fs::read_to_string(temp.path().join("demo.go")).unwrap(), UNORDERED);
}

#[test]
fn cli_write_rewrites_and_lists_file() {
    let temp = module();
    write(temp.path(), "demo.go", UNORDERED);

    go_reorder(temp.path())
        .args(["-w", "demo.go"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("demo.go"));
    assert_eq!(fs::read_to_string(temp.path().join("demo.go")).unwrap(), ORDERED);
}

#[test]
fn cli_check_exit_codes() {
    let temp = module();
    write(temp.path(), "ordered.go", ORDERED);
    write(temp.path(), "unordered.go", UNORDERED);

    go_reorder(temp.path())
        .args(["--check", "ordered.go"])
        .assert()
        .success()
        .stdout("");

    go_reorder(temp.path())
        .args(["-c", "."])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("unordered.go").and(predicate::str::contains("ordered.go")));

    assert_eq!(fs::read_to_string(temp.path().join("unordered.go")).unwrap(), UNORDERED);
}

#[test]
fn cli_diff_shows_unified_diff() {
    let temp = module();
    write(temp.path(), "demo.go", UNORDERED);
    write(temp.path(), "clean.go", ORDERED);

    go_reorder(temp.path())
        .args(["--diff", "."])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--- ")
                .and(predicate::str::contains("+++ "))
                .and(predicate::str::contains("@@"))
                .and(predicate::str::contains("demo.go"))
                .and(predicate::str::contains("clean.go").not()),
        );
}

#[test]
fn cli_accepts_several_paths() {
    let temp = module();
    write(temp.path(), "a.go", UNORDERED);
    write(temp.path(), "b.go", UNORDERED);
    write(temp.path(), "pkg/c.go", UNORDERED);
    write(temp.path(), "untouched.go", UNORDERED);

    go_reorder(temp.path())
        .args(["-w", "a.go", "b.go", "pkg"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("a.go")
                .and(predicate::str::contains("b.go"))
                .and(predicate::str::contains("c.go")),
        );

    for rel in ["a.go", "b.go", "pkg/c.go"] {
        assert_eq!(fs::read_to_string(temp.path().join(rel)).unwrap(), ORDERED, "{rel}");
    }
    assert_eq!(fs::read_to_string(temp.path().join("untouched.go")).unwrap(), UNORDERED);
}

#[test]
fn cli_check_over_several_files() {
    let temp = module();
    write(temp.path(), "clean.go", ORDERED);
    write(temp.path(), "messy.go", UNORDERED);

    go_reorder(temp.path())
        .args(["--check", "clean.go", "messy.go"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("messy.go").and(predicate::str::contains("clean.go").not()));
}

#[test]
fn cli_walks_directories_recursively() {
    let temp = module();
    write(temp.path(), "a.go", UNORDERED);
    write(temp.path(), "pkg/inner/b.go", UNORDERED);
    write(temp.path(), "README.md", "# demo\n");

    go_reorder(temp.path())
        .args(["-w", "."])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp.path().join("a.go")).unwrap(), ORDERED);
    assert_eq!(fs::read_to_string(temp.path().join("pkg/inner/b.go")).unwrap(), ORDERED);
    assert_eq!(fs::read_to_string(temp.path().join("README.md")).unwrap(), "# demo\n");
}

#[test]
fn cli_exclude_patterns() {
    let temp = module();
    write(temp.path(), "a.go", UNORDERED);
    write(temp.path(), "a_test.go", UNORDERED);
    write(temp.path(), "vendor/lib/c.go", UNORDERED);

    go_reorder(temp.path())
        .args(["-w", "--exclude", "*_test.go", "--exclude", "vendor/**", "."])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp.path().join("a.go")).unwrap(), ORDERED);
    assert_eq!(fs::read_to_string(temp.path().join("a_test.go")).unwrap(), UNORDERED);
    assert_eq!(fs::read_to_string(temp.path().join("vendor/lib/c.go")).unwrap(), UNORDERED);
}

#[test]
fn cli_explicit_config_drop_mode() {
    let temp = module();
    write(temp.path(), "demo.go", WITH_CONST);
    write(
        temp.path(),
        "custom.toml",
        "[sections]\norder = [\"imports\", \"main\"]\n\n[behavior]\nmode = \"drop\"\n",
    );

    go_reorder(temp.path())
        .args(["--config", "custom.toml", "demo.go"])
        .assert()
        .success()
        .stdout("package demo\n\nfunc main() {}\n");
}

#[test]
fn cli_mode_flag_overrides_config() {
    let temp = module();
    write(temp.path(), "demo.go", WITH_CONST);
    write(
        temp.path(),
        ".go-reorder.toml",
        "[sections]\norder = [\"main\"]\n\n[behavior]\nmode = \"strict\"\n",
    );

    go_reorder(temp.path())
        .arg("demo.go")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exported_consts"));

    go_reorder(temp.path())
        .args(["--mode", "append", "demo.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version = \"1.0\""));
}

#[test]
fn cli_discovers_config_from_parent_directory() {
    let temp = module();
    write(temp.path(), "pkg/demo.go", WITH_CONST);
    write(
        temp.path(),
        ".go-reorder.toml",
        "[sections]\norder = [\"main\"]\n\n[behavior]\nmode = \"drop\"\n",
    );

    go_reorder(temp.path())
        .args(["-v", "pkg/demo.go"])
        .assert()
        .success()
        .stdout("package demo\n\nfunc main() {}\n")
        .stderr(
            predicate::str::contains(".go-reorder.toml")
                .and(predicate::str::contains("mode: drop"))
                .and(predicate::str::contains("files: 1")),
        );
}

#[test]
fn cli_verbose_reports_defaults() {
    let temp = module();
    write(temp.path(), "demo.go", ORDERED);

    go_reorder(temp.path())
        .args(["--verbose", "demo.go"])
        .assert()
        .success()
        .stderr(predicate::str::contains("config: using defaults").and(predicate::str::contains("mode: strict")));
}

#[test]
fn cli_missing_config_is_an_error() {
    let temp = module();
    write(temp.path(), "demo.go", UNORDERED);

    go_reorder(temp.path())
        .args(["--config", "nope.toml", "demo.go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn cli_invalid_mode_is_rejected() {
    let temp = module();
    write(temp.path(), "demo.go", UNORDERED);

    go_reorder(temp.path())
        .args(["--mode", "sideways", "demo.go"])
        .assert()
        .failure();
}

#[test]
fn cli_requires_a_path() {
    let temp = module();
    go_reorder(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no files specified"));
}

#[test]
fn cli_reports_when_no_go_files() {
    let temp = module();
    write(temp.path(), "notes.txt", "hello\n");

    go_reorder(temp.path())
        .arg(".")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no Go files found"));
}

#[test]
fn cli_reports_parse_errors() {
    let temp = module();
    write(temp.path(), "broken.go", "package demo\n\nfunc 123InvalidName() {}\n");

    go_reorder(temp.path())
        .arg("broken.go")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.go"));
}

#[test]
fn cli_reads_stdin() {
    let temp = module();
    go_reorder(temp.path())
        .arg("-")
        .write_stdin(UNORDERED)
        .assert()
        .success()
        .stdout(ORDERED);
}

#[test]
fn cli_stdin_honors_mode_flag() {
    let temp = module();
    write(
        temp.path(),
        "only-main.toml",
        "[sections]\norder = [\"main\"]\n",
    );

    go_reorder(temp.path())
        .args(["--config", "only-main.toml", "-"])
        .write_stdin(WITH_CONST)
        .assert()
        .failure();

    go_reorder(temp.path())
        .args(["--config", "only-main.toml", "--mode", "drop", "-"])
        .write_stdin(WITH_CONST)
        .assert()
        .success()
        .stdout("package demo\n\nfunc main() {}\n");
}

#[test]
fn cli_lists_sections() {
    let temp = module();
    go_reorder(temp.path())
        .arg("--list-sections")
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("Available sections for config:\n  imports\n  main\n  init\n")
                .and(predicate::str::ends_with("  unexported_funcs\n  uncategorized\n")),
        );
}

#[test]
fn cli_init_creates_config_once() {
    let temp = module();

    go_reorder(temp.path())
        .arg("--init")
        .assert()
        .success()
        .stdout("Created .go-reorder.toml\n");
    let content = fs::read_to_string(temp.path().join(".go-reorder.toml")).unwrap();
    assert!(content.contains("mode = \"strict\""));
    assert!(content.contains("enum_layout"));

    go_reorder(temp.path())
        .arg("--init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
