use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_prune_removes_unreferenced_keys_everywhere() -> Result<()> {
    let test = CliTest::with_project(r#"{"used": "Usado", "unused": "Sem uso"}"#, "t('used')")?;
    test.write_catalog("en", r#"{"used": "Used", "unused": "Unused"}"#)?;

    let output = test.run(&["prune"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Pruned 1 unused key(s) from 2 catalog(s):"));
    assert!(output.stdout.contains("  - en: 1 key(s)"));
    assert!(output.stdout.contains("  - pt: 1 key(s)"));
    assert_eq!(test.read_catalog("pt")?, "{\n  \"used\": \"Usado\"\n}\n");
    assert_eq!(test.read_catalog("en")?, "{\n  \"used\": \"Used\"\n}\n");
    assert_eq!(
        test.read_file("prune.log")?,
        "pt:unused | \"Sem uso\"\nen:unused | \"Unused\"\n"
    );
    Ok(())
}

#[test]
fn test_sync_fills_placeholders_and_drops_extras() -> Result<()> {
    let test = CliTest::with_project(r#"{"b": "Bê", "a": "Á"}"#, "")?;
    test.write_catalog("en", r#"{"a": "A", "stale": "Stale"}"#)?;

    let output = test.run(&["sync"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("  - en: +1 added, -1 removed"));
    assert_eq!(
        test.read_catalog("en")?,
        "{\n  \"a\": \"A\",\n  \"b\": \"TODO\"\n}\n"
    );
    Ok(())
}

#[test]
fn test_sync_dry_run_keeps_files() -> Result<()> {
    let test = CliTest::with_project(r#"{"a": "Á"}"#, "")?;
    test.write_catalog("en", "{}")?;

    let output = test.run(&["sync", "--dry-run"])?;

    assert!(output.stdout.contains("Would synchronize 1 catalog(s):"));
    assert_eq!(test.read_catalog("en")?, "{}");
    Ok(())
}

#[test]
fn test_validate_passes_on_consistent_project() -> Result<()> {
    let test = CliTest::with_project(r#"{"a": "Á"}"#, "t('a')")?;
    test.write_catalog("en", r#"{"a": "A"}"#)?;

    let output = test.run(&["validate"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("✓ no-duplicates"));
    assert!(output.stdout.contains("(skipped: no refactor map artifact)"));
    Ok(())
}

#[test]
fn test_validate_reports_leftover_duplicate() -> Result<()> {
    let test = CliTest::with_project(r#"{"a": "Á"}"#, "t('a')")?;
    test.write_catalog("en", r#"{"a": "A", "old": "Old"}"#)?;
    test.write_file("refactor_map.json", r#"{"old": "a"}"#)?;

    let output = test.run(&["validate"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("✘ duplicates-removed"));
    assert!(
        output
            .stdout
            .contains("error: \"old\"  leftover-duplicate")
    );
    Ok(())
}

#[test]
fn test_missing_base_catalog_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keyfoldrc.json", r#"{ "baseLocale": "de" }"#)?;
    test.write_catalog("pt", r#"{"a": "Á"}"#)?;

    let output = test.run(&["validate"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("base catalog 'de' not found"));
    Ok(())
}

#[test]
fn test_base_locale_flag_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_catalog("de", r#"{"a": "Ä"}"#)?;
    test.write_file("src/app.ts", "t('a')")?;

    let output = test.run(&["validate", "--base-locale", "de"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    Ok(())
}
