//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BANK: &str = r#"{
  "title": "Smoke Test",
  "questions": [
    {"type": "mcq", "question": "2 + 2?", "points": 1, "options": ["3", "4", "5"], "correctAnswer": 1},
    {"type": "fill", "question": "Capital of France?", "points": 2, "correctAnswers": ["Paris"]},
    {"type": "multiple", "question": "Pick the primes", "points": 4, "options": ["2", "4", "5", "9"], "correctAnswers": [0, 2]}
  ]
}"#;

fn quizrun(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizrun").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("QUIZRUN_QUESTIONS")
        .env_remove("RUST_LOG");
    cmd
}

fn dir_with_bank() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bank.json"), BANK).unwrap();
    dir
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    quizrun(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive terminal quiz runner"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    quizrun(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizrun"));
}

#[test]
fn validate_valid_bank() {
    let dir = dir_with_bank();
    quizrun(&dir)
        .args(["validate", "--questions", "bank.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Smoke Test (3 questions, 7 points)"))
        .stdout(predicate::str::contains("All questions valid"));
}

#[test]
fn validate_reports_invalid_records() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.json"),
        r#"{"questions": [
            {"type": "mcq", "question": "ok?", "points": 1, "options": ["a", "b"], "correctAnswer": 0},
            {"type": "mcq", "question": "broken", "points": 1, "options": ["a"], "correctAnswer": 3}
        ]}"#,
    )
    .unwrap();

    quizrun(&dir)
        .args(["validate", "--questions", "bad.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("1 invalid question(s)"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    quizrun(&dir)
        .args(["validate", "--questions", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizrun(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizrun.toml"))
        .stdout(predicate::str::contains("Created questions.json"));

    assert!(dir.path().join("quizrun.toml").exists());
    assert!(dir.path().join("questions.json").exists());

    quizrun(&dir)
        .args(["validate", "--questions", "questions.json"])
        .assert()
        .success();
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizrun(&dir).arg("init").assert().success();

    quizrun(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn scripted_run_saves_report() {
    let dir = dir_with_bank();

    // 2+2 right, France wrong, primes partially right: 1 + 0 + (2 - 0.5) * 4 / 2 = 4
    quizrun(&dir)
        .args([
            "run",
            "--questions",
            "bank.json",
            "--no-shuffle",
            "--format",
            "json",
            "--output",
            "out",
        ])
        .write_stdin("2\nc\nn\na Lyon\nc\nn\n1 3 2\nc\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 3"))
        .stdout(predicate::str::contains("Wrong! Correct answer: Paris"))
        .stdout(predicate::str::contains(
            "Wrong selections result in penalty",
        ))
        .stdout(predicate::str::contains("Your Score: 4/7 (57.14%)"));

    let saved: Vec<_> = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(saved.len(), 1);

    quizrun(&dir)
        .args(["summary", "--report"])
        .arg(&saved[0])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your Score: 4/7 (57.14%)"))
        .stdout(predicate::str::contains("Capital of France?"));
}

#[test]
fn next_requires_check() {
    let dir = dir_with_bank();

    quizrun(&dir)
        .args(["run", "--questions", "bank.json", "--no-shuffle"])
        .write_stdin("n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("please check your answer first"))
        .stdout(predicate::str::contains("Quiz abandoned."));
}

#[test]
fn falls_back_to_embedded_bank() {
    let dir = TempDir::new().unwrap();

    quizrun(&dir)
        .args(["run", "--seed", "7"])
        .write_stdin("s\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Basics"))
        .stdout(predicate::str::contains("Your Score: 0/11 (0.00%)"));
}

#[test]
fn unusable_sources_fail_with_guidance() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("quizrun.toml"),
        "[[sources]]\ntype = \"file\"\npath = \"missing.json\"\n",
    )
    .unwrap();

    quizrun(&dir)
        .arg("run")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("quizrun init"))
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn summary_nonexistent_report() {
    let dir = TempDir::new().unwrap();
    quizrun(&dir)
        .args(["summary", "--report", "no_such_file.json"])
        .assert()
        .failure();
}
