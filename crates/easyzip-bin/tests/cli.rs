use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn easyzip() -> Command {
    Command::cargo_bin("easyzip").unwrap()
}

fn entry_names(archive_path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(std::fs::File::open(archive_path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn zip_then_unzip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let proj = temp_dir.path().join("proj");
    std::fs::create_dir_all(proj.join("sub")).unwrap();
    std::fs::write(proj.join("a.txt"), "alpha").unwrap();
    std::fs::write(proj.join("sub").join("b.txt"), "beta").unwrap();
    let archive = temp_dir.path().join("out.zip");
    let dest = temp_dir.path().join("dest");

    easyzip()
        .arg("zip")
        .arg(&proj)
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("add: "));
    assert_eq!(entry_names(&archive), vec!["proj/a.txt", "proj/sub/b.txt"]);

    easyzip()
        .arg("unzip")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(dest.join("proj").join("a.txt")).unwrap(),
        "alpha"
    );
    assert_eq!(
        std::fs::read_to_string(dest.join("proj").join("sub").join("b.txt")).unwrap(),
        "beta"
    );
}

#[test]
fn zipfiles_quiet() {
    let temp_dir = tempfile::tempdir().unwrap();
    let a = temp_dir.path().join("a.txt");
    let dir1 = temp_dir.path().join("dir1");
    std::fs::write(&a, "a").unwrap();
    std::fs::create_dir(&dir1).unwrap();
    std::fs::write(dir1.join("c.txt"), "c").unwrap();
    let archive = temp_dir.path().join("out.zip");

    easyzip()
        .args(["--quiet", "--compression", "stored", "zipfiles"])
        .arg(&archive)
        .arg(&a)
        .arg(&dir1)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(entry_names(&archive), vec!["a.txt", "dir1/c.txt"]);
}

#[test]
fn missing_arguments_exit_with_one() {
    easyzip()
        .arg("zip")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    easyzip().assert().code(1);
}

#[test]
fn failure_exits_nonzero_and_removes_destination() {
    let temp_dir = tempfile::tempdir().unwrap();
    let archive = temp_dir.path().join("out.zip");

    easyzip()
        .arg("zipfiles")
        .arg(&archive)
        .arg(temp_dir.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!archive.exists());
}

#[test]
fn unzip_of_garbage_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let bogus = temp_dir.path().join("bogus.zip");
    std::fs::write(&bogus, "not a zip").unwrap();

    easyzip()
        .arg("unzip")
        .arg(&bogus)
        .arg(temp_dir.path().join("dest"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open zip archive"));
}

#[test]
fn failure_never_removes_the_working_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("keep.txt"), "keep").unwrap();
    std::fs::write(temp_dir.path().join("bogus.zip"), "not a zip").unwrap();

    easyzip()
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "warn")
        .args(["unzip", "bogus.zip", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "not removing . because it contains the working directory",
        ));

    assert!(temp_dir.path().join("keep.txt").exists());
}
