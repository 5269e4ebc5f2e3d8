use keyfold::mcp::{
    KeyfoldMcpServer,
    types::{FindDuplicatesParams, ScanUsageParams},
};
use rmcp::handler::server::wrapper::Parameters;

use crate::{
    assert_pagination, extract_tool_result_json, fixture_with_duplicates, fixture_with_many_keys,
};

// ============================================================================
// scan_usage tests
// ============================================================================

#[tokio::test]
async fn test_scan_usage_reports_call_sites() {
    let fixture = fixture_with_duplicates().unwrap();
    fixture.write_source("src/extra.ts", "t('home.title');\nt('not.declared');\n").unwrap();

    let server = KeyfoldMcpServer::new();
    let params = Parameters(ScanUsageParams {
        project_root_path: fixture.root(),
        limit: None,
        offset: None,
    });

    let result = server.scan_usage(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["filesScanned"], 2);
    assert_eq!(json_result["totalKeys"], 4);
    assert_eq!(json_result["totalOccurrences"], 5);
    assert_eq!(json_result["undeclaredCount"], 1);

    let items = json_result["items"].as_array().unwrap();
    // Most referenced first
    assert_eq!(items[0]["key"], "home.title");
    assert_eq!(items[0]["count"], 2);
    assert_eq!(items[0]["declared"], true);

    let undeclared = items.iter().find(|i| i["key"] == "not.declared").unwrap();
    assert_eq!(undeclared["declared"], false);
    assert_eq!(undeclared["occurrences"][0]["filePath"], "src/extra.ts");
    assert_eq!(undeclared["occurrences"][0]["line"], 2);
    assert_eq!(undeclared["occurrences"][0]["col"], 1);

    let submit = items.iter().find(|i| i["key"] == "form.submit.save").unwrap();
    assert_eq!(submit["occurrences"][0]["line"], 2);
    assert_eq!(submit["occurrences"][0]["col"], 12);
    assert_pagination(&json_result, 0, 50, false);
}

#[tokio::test]
async fn test_scan_usage_pagination() {
    let fixture = fixture_with_many_keys(30).unwrap();
    let server = KeyfoldMcpServer::new();

    let params = Parameters(ScanUsageParams {
        project_root_path: fixture.root(),
        limit: Some(10),
        offset: Some(0),
    });
    let first = extract_tool_result_json(&server.scan_usage(params).await.unwrap());
    assert_eq!(first["totalKeys"], 30);
    assert_eq!(first["items"].as_array().unwrap().len(), 10);
    assert_eq!(first["items"][0]["key"], "page.item00");
    assert_pagination(&first, 0, 10, true);

    let params = Parameters(ScanUsageParams {
        project_root_path: fixture.root(),
        limit: Some(10),
        offset: Some(25),
    });
    let last = extract_tool_result_json(&server.scan_usage(params).await.unwrap());
    assert_eq!(last["items"].as_array().unwrap().len(), 5);
    assert_pagination(&last, 25, 10, false);
}

#[tokio::test]
async fn test_scan_usage_limit_is_capped() {
    let fixture = fixture_with_many_keys(3).unwrap();
    let server = KeyfoldMcpServer::new();

    let params = Parameters(ScanUsageParams {
        project_root_path: fixture.root(),
        limit: Some(500),
        offset: None,
    });
    let result = extract_tool_result_json(&server.scan_usage(params).await.unwrap());
    assert_pagination(&result, 0, 100, false);
}

// ============================================================================
// find_duplicates tests
// ============================================================================

#[tokio::test]
async fn test_find_duplicates_previews_groups() {
    let fixture = fixture_with_duplicates().unwrap();
    let server = KeyfoldMcpServer::new();

    let params = Parameters(FindDuplicatesParams {
        project_root_path: fixture.root(),
    });
    let result = extract_tool_result_json(&server.find_duplicates(params).await.unwrap());

    assert_eq!(result["baseLocale"], "pt");
    assert_eq!(result["totalGroups"], 1);
    assert_eq!(result["totalDuplicates"], 1);
    assert_eq!(result["groups"][0]["text"], "Salvar");
    assert_eq!(result["groups"][0]["canonical"], "common.save");
    assert_eq!(result["groups"][0]["duplicates"][0], "form.submit.save");

    // Read-only
    assert_eq!(
        fixture.read_source("src/app.tsx").unwrap().matches("form.submit.save").count(),
        1
    );
    assert!(!fixture.root_path().join("refactor_map.json").exists());
}

#[tokio::test]
async fn test_find_duplicates_on_empty_base_is_an_error() {
    let fixture = crate::McpTestFixture::with_catalogs(vec![("pt", serde_json::json!({}))]).unwrap();
    let server = KeyfoldMcpServer::new();

    let params = Parameters(FindDuplicatesParams {
        project_root_path: fixture.root(),
    });
    assert!(server.find_duplicates(params).await.is_err());
}
