use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;

mod tools;

const CATALOG_DIR: &str = "src/config/translations";

/// Test fixture for MCP integration tests
///
/// Manages a temporary project with a catalog directory and source files
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        fs::create_dir_all(project_root.join(CATALOG_DIR))?;
        fs::create_dir_all(project_root.join(".git"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with locale catalogs
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_catalogs(vec![
    ///     ("pt", json!({"home.title": "Início"})),
    ///     ("en", json!({"home.title": "Home"})),
    /// ])?;
    /// ```
    pub fn with_catalogs(locales: Vec<(&str, Value)>) -> Result<Self> {
        let fixture = Self::new()?;
        for (locale, content) in locales {
            fixture.write_catalog(locale, &content)?;
        }
        Ok(fixture)
    }

    /// Write a catalog file to <catalog dir>/<locale>.json
    pub fn write_catalog(&self, locale: &str, content: &Value) -> Result<()> {
        let path = self.catalog_path(locale);
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for locale: {}", locale))?;
        fs::write(&path, format!("{}\n", json_str))
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
        Ok(())
    }

    pub fn read_catalog(&self, locale: &str) -> Result<Value> {
        let path = self.catalog_path(locale);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
    }

    /// Write a source file relative to the project root
    pub fn write_source(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write source file: {}", path.display()))?;
        Ok(())
    }

    pub fn read_source(&self, relative_path: &str) -> Result<String> {
        let path = self.project_root.join(relative_path);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))
    }

    /// Write a .keyfoldrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".keyfoldrc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    pub fn root_path(&self) -> &Path {
        &self.project_root
    }

    fn catalog_path(&self, locale: &str) -> PathBuf {
        self.project_root
            .join(CATALOG_DIR)
            .join(format!("{}.json", locale))
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// Base catalog with a duplicate pair, one dependent lagging behind and a
/// source file referencing the duplicate.
pub fn fixture_with_duplicates() -> Result<McpTestFixture> {
    let fixture = McpTestFixture::with_catalogs(vec![
        (
            "pt",
            json!({
                "common.save": "Salvar",
                "form.submit.save": "Salvar",
                "home.title": "Início",
                "legacy.unused": "Antigo"
            }),
        ),
        (
            "en",
            json!({
                "common.save": "Save",
                "form.submit.save": "Save"
            }),
        ),
    ])?;
    fixture.write_source(
        "src/app.tsx",
        "export const App = () => (\n  <button>{t('form.submit.save')}</button>\n);\nt('home.title');\nt('common.save');\n",
    )?;
    Ok(fixture)
}

/// Consistent project with many referenced keys, for pagination.
pub fn fixture_with_many_keys(count: usize) -> Result<McpTestFixture> {
    let mut catalog = serde_json::Map::new();
    let mut source = String::new();
    for i in 0..count {
        let key = format!("page.item{:02}", i);
        catalog.insert(key.clone(), Value::String(format!("Item {}", i)));
        source.push_str(&format!("t('{}');\n", key));
    }
    let fixture = McpTestFixture::with_catalogs(vec![("pt", Value::Object(catalog))])?;
    fixture.write_source("src/page.ts", &source)?;
    Ok(fixture)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a scan result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
