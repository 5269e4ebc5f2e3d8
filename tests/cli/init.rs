use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_writes_default_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created"));
    let config: Value = serde_json::from_str(&test.read_file(".keyfoldrc.json")?)?;
    assert_eq!(config["baseLocale"], "pt");
    assert_eq!(config["catalogDir"], "./src/config/translations");
    assert_eq!(config["placeholder"], "TODO");
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keyfoldrc.json", "{}")?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains(".keyfoldrc.json already exists"));
    assert_eq!(test.read_file(".keyfoldrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&[])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Usage: keyfold"));
    Ok(())
}
