use keyfold::mcp::{
    KeyfoldMcpServer,
    types::{GetConfigParams, GetLocalesParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = KeyfoldMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["baseLocale"], "pt");
    assert_eq!(json_result["config"]["catalogDir"], "./src/config/translations");
    assert_eq!(json_result["config"]["functionName"], "t");
    assert!(json_result["config"]["technicalKeys"].is_array());
}

#[tokio::test]
async fn test_get_config_from_keyfoldrc() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "catalogDir": "locales",
            "baseLocale": "en",
            "placeholder": "FIXME"
        }))
        .unwrap();

    let server = KeyfoldMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["catalogDir"], "locales");
    assert_eq!(json_result["config"]["baseLocale"], "en");
    assert_eq!(json_result["config"]["placeholder"], "FIXME");
}

#[tokio::test]
async fn test_get_config_invalid_file_is_an_error() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "functionName": "not an identifier" }))
        .unwrap();

    let server = KeyfoldMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    assert!(server.get_config(params).await.is_err());
}

// ============================================================================
// get_locales tests
// ============================================================================

#[tokio::test]
async fn test_get_locales_lists_catalogs() {
    let fixture = McpTestFixture::with_catalogs(vec![
        ("pt", json!({"home.title": "Início", "home.body": "Corpo"})),
        ("en", json!({"home.title": "Home"})),
    ])
    .unwrap();

    let server = KeyfoldMcpServer::new();
    let params = Parameters(GetLocalesParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_locales(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["baseLocale"], "pt");
    assert_eq!(json_result["catalogDir"], "src/config/translations");
    let locales = json_result["locales"].as_array().unwrap();
    assert_eq!(locales.len(), 2);
    assert_eq!(locales[0]["locale"], "en");
    assert_eq!(locales[0]["keyCount"], 1);
    assert_eq!(locales[0]["isBase"], false);
    assert_eq!(locales[1]["locale"], "pt");
    assert_eq!(locales[1]["keyCount"], 2);
    assert_eq!(locales[1]["isBase"], true);
    assert_eq!(locales[1]["filePath"], "src/config/translations/pt.json");
}
