//! End-to-end tests that run the compiled `calc-patch` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const COMPONENT: &str = r#"const translations = {
  en: {
    title: "Tip Calculator"
  },
  es: {
    title: "Calculadora de Propinas"
  }
};

export default function TipCalculator() {
  const [results, setResults] = useState(null);
  return (
    <div>
      {/* Results */}
      <p>{results}</p>
    </div>
  );
}
"#;

fn calc_patch() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("calc-patch"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn components() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("TipCalculator.tsx"), COMPONENT).unwrap();
    fs::write(
        dir.path().join("Broken.tsx"),
        "const t = {\n  en: {\n    title: \"x\"\n",
    )
    .unwrap();
    dir
}

#[test]
fn help_lists_commands() {
    calc_patch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("translate"));
}

#[test]
fn no_command_prints_hint() {
    calc_patch()
        .assert()
        .success()
        .stdout(predicate::str::contains("calc-patch --help"));
}

#[test]
fn recipes_lists_builtins() {
    calc_patch()
        .arg("recipes")
        .assert()
        .success()
        .stdout(predicate::str::contains("recalculate"))
        .stdout(predicate::str::contains("repair-recalculate"));
}

#[test]
fn apply_patches_and_reports_failures_without_failing() {
    let dir = components();

    calc_patch()
        .arg("apply")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Modified: TipCalculator.tsx"))
        .stdout(predicate::str::contains("Errored: Broken.tsx"));

    let patched = fs::read_to_string(dir.path().join("TipCalculator.tsx")).unwrap();
    assert!(patched.contains("recalculate: \"🔄 Recalcular\""));
    assert!(patched.contains("{t.recalculate}"));
}

#[test]
fn dry_run_leaves_files_alone() {
    let dir = components();

    calc_patch()
        .args(["apply", "--dry-run"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("would modify"));

    let content = fs::read_to_string(dir.path().join("TipCalculator.tsx")).unwrap();
    assert_eq!(content, COMPONENT);
}

#[test]
fn unknown_builtin_is_an_error() {
    let dir = components();

    calc_patch()
        .arg("apply")
        .arg(dir.path())
        .args(["--builtin", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown built-in recipe"));
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();

    calc_patch()
        .arg("repair")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn translate_rewrites_content() {
    let dir = TempDir::new().unwrap();
    let content = "{\n  \"es\": {\n    \"calculatorComponent\": {\n      \"output\": {\n        \"label\": \"Monthly Payment\"\n      }\n    }\n  }\n}\n";
    fs::write(dir.path().join("loan.json"), content).unwrap();

    calc_patch()
        .arg("translate")
        .arg(dir.path())
        .args(["--lang", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Modified: loan.json"));

    let translated = fs::read_to_string(dir.path().join("loan.json")).unwrap();
    assert!(!translated.contains("Monthly Payment"));
}

#[test]
fn translate_rejects_unknown_language() {
    let dir = TempDir::new().unwrap();

    calc_patch()
        .arg("translate")
        .arg(dir.path())
        .args(["--lang", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xx"));
}

const ENGLISH_COPY: &str = "{\n  \"en\": {\n    \"calculatorComponent\": {\n      \"output\": {\n        \"label\": \"Monthly Payment\"\n      }\n    }\n  },\n  \"es\": {\n    \"calculatorComponent\": {\n      \"output\": {\n        \"label\": \"Monthly Payment\"\n      }\n    }\n  }\n}\n";

#[test]
fn translate_check_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("loan.json"), ENGLISH_COPY).unwrap();

    calc_patch()
        .arg("translate")
        .arg(dir.path())
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("untranslated es label(s): Monthly Payment"))
        .stdout(predicate::str::contains("Untranslated: loan.json"));

    let content = fs::read_to_string(dir.path().join("loan.json")).unwrap();
    assert_eq!(content, ENGLISH_COPY);
}

#[test]
fn translate_seed_adds_missing_sections() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("loan.json"), ENGLISH_COPY).unwrap();

    calc_patch()
        .arg("translate")
        .arg(dir.path())
        .args(["--seed", "--lang", "nl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added nl section from en"));

    let content = fs::read_to_string(dir.path().join("loan.json")).unwrap();
    assert!(content.contains("\"nl\": {"));
    assert!(content.contains("Maandelijkse betaling"));
}
