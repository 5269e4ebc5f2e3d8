use std::path::PathBuf;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    cli::{CommonArgs, commands::helper::load_project},
    config::load_config,
    core::{Canonicalizer, Pipeline, Workspace},
};

use super::types::{
    ConfigDto, ConfigValues, DuplicateGroupItem, DuplicatesResult, FindDuplicatesParams,
    GetConfigParams, GetLocalesParams, LocaleInfo, LocalesResult, OccurrenceItem, Pagination,
    RunPipelineParams, RunPipelineResult, ScanUsageParams, SyncItem, UsageItem, UsageScanResult,
    ValidateParams, ValidationResult,
};

#[derive(Clone)]
pub struct KeyfoldMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for KeyfoldMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl KeyfoldMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current keyfold configuration
    #[tool(description = "Get the keyfold configuration of a project.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = PathBuf::from(&params.0.project_root_path);

        let result = load_config(&path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file(),
            config: ConfigValues::from(result.config),
        };

        json_result(&config_dto)
    }

    /// Get the catalog files and their key counts
    #[tool(description = "Get the locale catalogs of a project with their file paths and key counts.")]
    pub async fn get_locales(
        &self,
        params: Parameters<GetLocalesParams>,
    ) -> Result<CallToolResult, McpError> {
        let workspace = workspace_for(&params.0.project_root_path)?;
        let store = workspace.catalog_store();

        let locale_names = store
            .discover_locales()
            .map_err(internal("Failed to list catalogs"))?;

        let mut locales = Vec::with_capacity(locale_names.len());
        for locale in locale_names {
            let catalog = store.load(&locale).map_err(internal("Failed to read catalog"))?;
            locales.push(LocaleInfo {
                file_path: workspace.display_path(&store.path_for(&locale)),
                key_count: catalog.len(),
                is_base: locale == workspace.base_locale,
                locale,
            });
        }

        json_result(&LocalesResult {
            catalog_dir: workspace.display_path(store.dir()),
            base_locale: workspace.base_locale.clone(),
            locales,
        })
    }

    /// Scan the source tree for key references
    #[tool(
        description = "Scan source files for translation calls. Returns referenced keys with their call sites, most referenced first. Paginated."
    )]
    pub async fn scan_usage(
        &self,
        params: Parameters<ScanUsageParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.0.limit.map(|v| v as usize).unwrap_or(50).min(100);
        let offset = params.0.offset.map(|v| v as usize).unwrap_or(0);
        let workspace = workspace_for(&params.0.project_root_path)?;
        let pipeline = Pipeline::new(&workspace, true);

        let catalogs = pipeline.load_catalogs().map_err(internal("Failed to load catalogs"))?;
        let sources = pipeline.scan();

        let mut all_items: Vec<UsageItem> = sources
            .index
            .iter()
            .map(|(key, occurrences)| UsageItem {
                key: key.to_string(),
                declared: catalogs.base.contains_key(key),
                count: occurrences.len(),
                occurrences: occurrences
                    .iter()
                    .map(|o| OccurrenceItem {
                        file_path: o.file.clone(),
                        line: o.line,
                        col: o.col,
                    })
                    .collect(),
            })
            .collect();
        all_items.sort_by(|a, b| b.count.cmp(&a.count));

        let total_keys = all_items.len();
        let undeclared_count = all_items.iter().filter(|i| !i.declared).count();

        let paginated: Vec<UsageItem> = all_items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + paginated.len() < total_keys;

        json_result(&UsageScanResult {
            files_scanned: sources.files_scanned,
            total_keys,
            total_occurrences: sources.index.total_occurrences(),
            undeclared_count,
            items: paginated,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Preview the refactor map without touching any file
    #[tool(
        description = "Find base catalog keys sharing the same display text. Returns each group with the canonical key the others would be merged into. Read-only."
    )]
    pub async fn find_duplicates(
        &self,
        params: Parameters<FindDuplicatesParams>,
    ) -> Result<CallToolResult, McpError> {
        let workspace = workspace_for(&params.0.project_root_path)?;
        let base = workspace
            .catalog_store()
            .load(&workspace.base_locale)
            .map_err(internal("Failed to load base catalog"))?;

        let groups = Canonicalizer::new(&workspace)
            .groups(&base)
            .map_err(internal("Failed to group duplicates"))?;

        json_result(&DuplicatesResult {
            base_locale: workspace.base_locale.clone(),
            total_groups: groups.len(),
            total_duplicates: groups.iter().map(|g| g.duplicates.len()).sum(),
            groups: groups.iter().map(DuplicateGroupItem::from).collect(),
        })
    }

    /// Run the consistency checks on the current state
    #[tool(
        description = "Validate catalogs, source references and the persisted refactor map. Read-only."
    )]
    pub async fn validate(
        &self,
        params: Parameters<ValidateParams>,
    ) -> Result<CallToolResult, McpError> {
        let workspace = workspace_for(&params.0.project_root_path)?;
        let pipeline = Pipeline::new(&workspace, true);

        let catalogs = pipeline.load_catalogs().map_err(internal("Failed to load catalogs"))?;
        let sources = pipeline.scan();
        let map = pipeline
            .load_refactor_map()
            .map_err(internal("Failed to load refactor map"))?;
        let report = pipeline.check(&catalogs, &sources.index, map.as_ref());

        json_result(&ValidationResult::from(&report))
    }

    /// Run every stage of the pipeline
    #[tool(
        description = "Run scan, dedup, prune, sync and validate. Dry run unless apply is true."
    )]
    pub async fn run_pipeline(
        &self,
        params: Parameters<RunPipelineParams>,
    ) -> Result<CallToolResult, McpError> {
        let dry_run = !params.0.apply.unwrap_or(false);
        let workspace = workspace_for(&params.0.project_root_path)?;

        let report = Pipeline::new(&workspace, dry_run)
            .run()
            .map_err(internal("Pipeline failed"))?;

        json_result(&RunPipelineResult {
            dry_run: report.dry_run,
            passed: report.passed(),
            files_scanned: report.files_scanned,
            keys_referenced: report.keys_referenced,
            merged: report
                .dedup
                .groups
                .iter()
                .map(DuplicateGroupItem::from)
                .collect(),
            references_rewritten: report.dedup.replacements.len(),
            files_changed: report.dedup.files_changed.clone(),
            retained_duplicates: report.dedup.retained.clone(),
            pruned_keys: report.prune.unused.clone(),
            synced: report
                .sync
                .locales
                .iter()
                .map(|(locale, change)| {
                    (
                        locale.clone(),
                        SyncItem {
                            added: change.added.len(),
                            removed: change.removed.len(),
                        },
                    )
                })
                .collect(),
            validation: ValidationResult::from(&report.validation),
            written: report.written.clone(),
            skipped_files: report.warnings.len(),
        })
    }
}

fn workspace_for(project_root_path: &str) -> Result<Workspace, McpError> {
    let common = CommonArgs {
        root: Some(PathBuf::from(project_root_path)),
        ..Default::default()
    };
    load_project(&common)
        .map(|project| project.workspace)
        .map_err(|e| McpError::internal_error(format!("Failed to load project: {:#}", e), None))
}

fn internal<E: std::fmt::Display>(context: &'static str) -> impl Fn(E) -> McpError {
    move |e| McpError::internal_error(format!("{}: {}", context, e), None)
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for KeyfoldMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Keyfold MCP keeps translation catalogs and the source references to them consistent.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. get_locales - Get catalog files and their key counts\n\
                 3. scan_usage - Get referenced keys and their call sites (paginated)\n\
                 4. find_duplicates - Preview which keys would be merged\n\
                 5. validate - Run the consistency checks\n\
                 6. run_pipeline - Run every stage (dry run unless apply is true)\n\n\
                 Recommended Workflow:\n\
                 1. Use validate to see what is inconsistent\n\
                 2. Use find_duplicates and run_pipeline without apply to preview changes\n\
                 3. Run run_pipeline with apply=true, then validate again"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = KeyfoldMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
