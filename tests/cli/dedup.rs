use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, SCENARIO_BASE};

#[test]
fn test_dedup_dry_run_previews_merge() -> Result<()> {
    let test = CliTest::with_project(SCENARIO_BASE, "t('x.y')")?;

    let output = test.run(&["dedup", "--dry-run"])?;

    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("Would merge 1 duplicate key(s) into 1 canonical key(s):")
    );
    assert!(output.stdout.contains("Would rewrite 1 reference(s) in 1 file(s):"));
    assert!(output.stdout.contains("  src/app.tsx:0  t('x.y') → t('a.b')"));
    assert!(output.stdout.contains("Run without --dry-run to apply these changes."));
    assert_eq!(test.read_file("src/app.tsx")?, "t('x.y')");
    assert!(!test.exists("refactor_map.json"));
    Ok(())
}

#[test]
fn test_dedup_keeps_quotes_and_call_form() -> Result<()> {
    let test = CliTest::with_project(
        r#"{"common.save": "Salvar", "form.submit.save": "Salvar"}"#,
        "$t(\"form.submit.save\");\nthis.i18n.t('form.submit.save');\nt('form.submit.saved');\n",
    )?;

    let output = test.run(&["dedup"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(
        test.read_file("src/app.tsx")?,
        "$t(\"common.save\");\nthis.i18n.t('common.save');\nt('form.submit.saved');\n"
    );
    assert_eq!(
        test.read_catalog("pt")?,
        "{\n  \"common.save\": \"Salvar\"\n}\n"
    );
    Ok(())
}

#[test]
fn test_dedup_prefers_non_technical_canonical() -> Result<()> {
    let test = CliTest::with_project(
        r#"{"close": "Fechar", "modal.close": "Fechar"}"#,
        "t('close')",
    )?;

    let output = test.run(&["dedup"])?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        test.read_file("refactor_map.json")?,
        "{\n  \"close\": \"modal.close\"\n}\n"
    );
    assert_eq!(test.read_file("src/app.tsx")?, "t('modal.close')");
    Ok(())
}
