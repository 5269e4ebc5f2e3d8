use keyfold::mcp::{
    KeyfoldMcpServer,
    types::{RunPipelineParams, ValidateParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{extract_tool_result_json, fixture_with_duplicates};

// ============================================================================
// validate tests
// ============================================================================

#[tokio::test]
async fn test_validate_reports_failed_checks() {
    let fixture = fixture_with_duplicates().unwrap();
    fixture.write_source("src/broken.ts", "t('no.such.key');\n").unwrap();
    let server = KeyfoldMcpServer::new();

    let params = Parameters(ValidateParams {
        project_root_path: fixture.root(),
    });
    let result = extract_tool_result_json(&server.validate(params).await.unwrap());

    assert_eq!(result["passed"], false);
    let checks = result["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 4);

    assert_eq!(checks[0]["name"], "no-duplicates");
    assert_eq!(checks[0]["passed"], false);
    assert_eq!(checks[0]["issues"][0]["rule"], "duplicate-text");
    assert_eq!(checks[0]["issues"][0]["message"], "Salvar");

    assert_eq!(checks[1]["name"], "duplicates-removed");
    assert_eq!(checks[1]["skipped"], "no refactor map artifact");

    assert_eq!(checks[2]["name"], "no-broken-references");
    let issue = &checks[2]["issues"][0];
    assert_eq!(issue["rule"], "broken-reference");
    assert_eq!(issue["severity"], "error");
    assert_eq!(issue["message"], "no.such.key");
    assert_eq!(issue["filePath"], "src/broken.ts");
    assert_eq!(issue["line"], 1);
}

// ============================================================================
// run_pipeline tests
// ============================================================================

#[tokio::test]
async fn test_run_pipeline_defaults_to_dry_run() {
    let fixture = fixture_with_duplicates().unwrap();
    let server = KeyfoldMcpServer::new();

    let params = Parameters(RunPipelineParams {
        project_root_path: fixture.root(),
        apply: None,
    });
    let result = extract_tool_result_json(&server.run_pipeline(params).await.unwrap());

    assert_eq!(result["dryRun"], true);
    assert_eq!(result["passed"], true);
    assert_eq!(result["merged"][0]["canonical"], "common.save");
    assert_eq!(result["referencesRewritten"], 1);
    assert_eq!(result["retainedDuplicates"], json!([]));
    // The duplicate is still declared by the dependent until pruned there
    assert_eq!(
        result["prunedKeys"],
        json!(["legacy.unused", "form.submit.save"])
    );
    assert_eq!(result["written"], json!([]));

    // Nothing on disk changed
    assert!(
        fixture
            .read_source("src/app.tsx")
            .unwrap()
            .contains("t('form.submit.save')")
    );
    assert_eq!(
        fixture.read_catalog("pt").unwrap()["legacy.unused"],
        "Antigo"
    );
}

#[tokio::test]
async fn test_run_pipeline_apply_writes_changes() {
    let fixture = fixture_with_duplicates().unwrap();
    let server = KeyfoldMcpServer::new();

    let params = Parameters(RunPipelineParams {
        project_root_path: fixture.root(),
        apply: Some(true),
    });
    let result = extract_tool_result_json(&server.run_pipeline(params).await.unwrap());

    assert_eq!(result["dryRun"], false);
    assert_eq!(result["passed"], true);
    assert_eq!(result["validation"]["passed"], true);
    assert_eq!(result["filesChanged"], json!(["src/app.tsx"]));

    assert_eq!(
        fixture.read_catalog("pt").unwrap(),
        json!({"common.save": "Salvar", "home.title": "Início"})
    );
    assert_eq!(
        fixture.read_catalog("en").unwrap(),
        json!({"common.save": "Save", "home.title": "TODO"})
    );
    assert!(
        fixture
            .read_source("src/app.tsx")
            .unwrap()
            .contains("{t('common.save')}</button>")
    );

    // A second run finds nothing left to do
    let params = Parameters(ValidateParams {
        project_root_path: fixture.root(),
    });
    let validation = extract_tool_result_json(&server.validate(params).await.unwrap());
    assert_eq!(validation["passed"], true);
}
