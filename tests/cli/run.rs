use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, SCENARIO_BASE};

#[test]
fn test_run_applies_every_stage() -> Result<()> {
    let test = CliTest::with_project(SCENARIO_BASE, "t('x.y')")?;

    let output = test.run(&["run"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("==> dedup"));
    assert!(output.stdout.contains("  x.y → a.b  \"Hello\""));
    assert!(output.stdout.contains("Rewrote 1 reference(s) in 1 file(s):"));
    assert!(output.stdout.contains("Pruned 1 unused key(s) from 1 catalog(s):"));
    assert!(output.stdout.contains("  - en: +1 added, -0 removed"));
    assert!(output.stdout.contains("✓ no-broken-references"));
    assert!(output.stdout.contains("✓ map-consistent"));

    assert_eq!(test.read_file("src/app.tsx")?, "t('a.b')");
    assert_eq!(test.read_catalog("pt")?, "{\n  \"a.b\": \"Hello\"\n}\n");
    assert_eq!(test.read_catalog("en")?, "{\n  \"a.b\": \"TODO\"\n}\n");
    assert_eq!(
        test.read_file("refactor_map.json")?,
        "{\n  \"x.y\": \"a.b\"\n}\n"
    );
    assert_eq!(
        test.read_file("refactor.log")?,
        "src/app.tsx:0 | t('x.y') → t('a.b')\n"
    );
    assert_eq!(test.read_file("prune.log")?, "pt:c | \"TODO\"\n");
    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<()> {
    let test = CliTest::with_project(SCENARIO_BASE, "t('x.y')")?;
    assert_eq!(test.run(&["run"])?.code, Some(0));
    let base = test.read_catalog("pt")?;
    let log = test.read_file("refactor.log")?;

    let output = test.run(&["run"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("No duplicate texts in the base catalog"));
    assert!(output.stdout.contains("Every catalog key is referenced"));
    assert!(
        output
            .stdout
            .contains("Dependent catalogs already match the base catalog")
    );
    assert_eq!(test.read_catalog("pt")?, base);
    assert_eq!(test.read_file("refactor.log")?, log);
    Ok(())
}

#[test]
fn test_run_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_project(SCENARIO_BASE, "t('x.y')")?;

    let output = test.run(&["run", "--dry-run"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Dry run: nothing was written."));
    assert_eq!(test.read_file("src/app.tsx")?, "t('x.y')");
    assert_eq!(test.read_catalog("pt")?, SCENARIO_BASE);
    assert!(!test.exists("refactor_map.json"));
    assert!(!test.exists("refactor.log"));
    assert!(!test.exists("prune.log"));
    assert!(!test.exists("src/config/translations/en.json"));
    Ok(())
}

#[test]
fn test_run_fails_on_broken_reference() -> Result<()> {
    let test = CliTest::with_project(r#"{"a.b": "Hello"}"#, "t('a.b');\nt('no.such.key');\n")?;

    let output = test.run(&["run"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("✘ no-broken-references"));
    assert!(
        output
            .stdout
            .contains("error: \"no.such.key\"  broken-reference")
    );
    assert!(output.stdout.contains("--> src/app.tsx:2:1"));
    Ok(())
}

#[test]
fn test_run_with_empty_base_is_an_error() -> Result<()> {
    let test = CliTest::with_project("{}", "t('a.b')")?;

    let output = test.run(&["run"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Error: base catalog 'pt' is empty"));
    assert!(!test.exists("src/config/translations/en.json"));
    Ok(())
}

#[test]
fn test_run_with_corrupt_catalog_is_an_error() -> Result<()> {
    let test = CliTest::with_project(r#"{"a": {"nested": "no"}}"#, "t('a')")?;

    let output = test.run(&["run"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("corrupt catalog"));
    Ok(())
}

#[test]
fn test_root_flag_selects_project() -> Result<()> {
    let test = CliTest::with_project(SCENARIO_BASE, "t('x.y')")?;
    let root = test.root().to_string_lossy().to_string();

    let output = test
        .command()
        .current_dir(std::env::temp_dir())
        .args(["validate", "--root", &root])
        .output()?;

    // Duplicates are still present before any run
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✘ no-duplicates"));
    Ok(())
}
