use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_add_inserts_and_updates_entries() -> Result<()> {
    let test = CliTest::with_project(r#"{"a": "Á"}"#, "")?;
    test.write_catalog("en", r#"{"a": "A"}"#)?;
    test.write_file(
        "entries.json",
        r#"{
            "pt": {"b": "Bê", "a": "Á!"},
            "en": {"b": "B"},
            "fr": {"b": "Bé"}
        }"#,
    )?;

    let output = test.run(&["add", "entries.json"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("warning: no catalog for locale 'fr', entries skipped"));
    assert!(output.stdout.contains("Applied 3 entry(ies) from entries.json:"));
    assert!(output.stdout.contains("  - pt: 1 added, 1 updated"));
    assert_eq!(
        test.read_catalog("pt")?,
        "{\n  \"a\": \"Á!\",\n  \"b\": \"Bê\"\n}\n"
    );
    assert_eq!(
        test.read_catalog("en")?,
        "{\n  \"a\": \"A\",\n  \"b\": \"B\"\n}\n"
    );
    assert!(!test.exists("src/config/translations/fr.json"));
    Ok(())
}

#[test]
fn test_add_rejects_malformed_entries() -> Result<()> {
    let test = CliTest::with_project(r#"{"a": "Á"}"#, "")?;
    test.write_file("entries.json", r#"{"pt": ["not", "a", "map"]}"#)?;

    let output = test.run(&["add", "entries.json"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to parse entries file"));
    Ok(())
}

#[test]
fn test_add_skips_empty_keys() -> Result<()> {
    let test = CliTest::with_project(r#"{"a": "Á"}"#, "t('a')")?;
    test.write_file("entries.json", r#"{"pt": {"": "x", "b": "Bê"}}"#)?;

    let output = test.run(&["add", "entries.json"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("warning: empty key for locale 'pt', entry skipped"));
    assert_eq!(
        test.read_catalog("pt")?,
        "{\n  \"a\": \"Á\",\n  \"b\": \"Bê\"\n}\n"
    );
    // Later stages can still load the catalog
    assert_eq!(test.run(&["validate"])?.code, Some(0));
    Ok(())
}
