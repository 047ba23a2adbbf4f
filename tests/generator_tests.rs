mod common;

use common::fixture::Project;
use pagegen::config::PageType;
use pagegen::generator::{generate_page, generate_page_from_config, GeneratePageRequest};
use pagegen::registry::get_page_config;
use pagegen::GenerateError;

const CLICKS_ROUTE_DIR: &str = "src/app/mailchimp/reports/[id]/clicks";

#[test]
fn test_nested_detail_end_to_end() {
    let project = Project::new();
    let config = get_page_config("report-clicks").unwrap();
    assert_eq!(config.page.page_type, PageType::NestedDetail);
    assert!(config.ui.has_pagination);

    let result = generate_page_from_config(config, "report-clicks", &project.layout).unwrap();

    let relative: Vec<String> = result
        .files
        .iter()
        .map(|f| {
            f.strip_prefix(project.root())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(
        relative,
        vec![
            format!("{CLICKS_ROUTE_DIR}/page.tsx"),
            format!("{CLICKS_ROUTE_DIR}/loading.tsx"),
            format!("{CLICKS_ROUTE_DIR}/not-found.tsx"),
            "src/schemas/ui/report-clicks-page-params.ts".to_string(),
            "src/components/mailchimp/reports/click-details-content.tsx".to_string(),
            "src/dal/mailchimp.dal.ts".to_string(),
            "src/utils/breadcrumbs/breadcrumb-builder.ts".to_string(),
            "src/utils/mailchimp/metadata.ts".to_string(),
            "src/utils/mailchimp/index.ts".to_string(),
        ]
    );
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    for file in &result.files {
        assert!(file.is_absolute());
        assert!(file.exists());
    }
}

#[test]
fn test_nested_detail_page_contents() {
    let project = Project::new();
    let config = get_page_config("report-clicks").unwrap();
    generate_page_from_config(config, "report-clicks", &project.layout).unwrap();

    let page = project.read(&format!("{CLICKS_ROUTE_DIR}/page.tsx"));
    assert!(page.contains("import { notFound } from \"next/navigation\";"));
    assert!(page.contains(
        "import { ClickDetailsContent } from \"@/components/mailchimp/reports/click-details-content\";"
    ));
    assert!(page.contains(
        "import { reportClicksPageParams } from \"@/schemas/ui/report-clicks-page-params\";"
    ));
    assert!(page.contains("mailchimpDAL.fetchReportClickDetails(id, query)"));
    assert!(page.contains("bc.reportDetail(id), bc.clickDetails(id)"));
    assert!(page.contains("Config: report-clicks (nested-detail)"));

    let not_found = project.read(&format!("{CLICKS_ROUTE_DIR}/not-found.tsx"));
    assert!(not_found.contains("Report not found"));
    assert!(not_found.contains("href={ \"/mailchimp/reports\" }"));

    let schema = project.read("src/schemas/ui/report-clicks-page-params.ts");
    assert!(schema.contains("export const reportClicksPageParams = z.object({"));
    assert!(schema.contains("Pagination style: count-offset"));
    assert!(schema.contains("perPage: z.coerce.number()"));
}

#[test]
fn test_list_page_has_no_not_found() {
    let project = Project::new();
    let config = get_page_config("lists").unwrap();

    let result = generate_page_from_config(config, "lists", &project.layout).unwrap();

    assert!(project.exists("src/app/mailchimp/lists/page.tsx"));
    assert!(project.exists("src/app/mailchimp/lists/loading.tsx"));
    assert!(!project.exists("src/app/mailchimp/lists/not-found.tsx"));
    let page = project.read("src/app/mailchimp/lists/page.tsx");
    assert!(page.contains("export const metadata = generateListsMetadata();"));
    assert!(!page.contains("notFound"));
    // fetchLists is already in the fixture DAL
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("DAL method fetchLists already exists")));
}

#[test]
fn test_regeneration_is_idempotent() {
    let project = Project::new();
    let config = get_page_config("report-clicks").unwrap();

    let first = generate_page_from_config(config, "report-clicks", &project.layout).unwrap();
    assert_eq!(first.files.len(), 9);
    let after_first = project.snapshot();

    let second = generate_page_from_config(config, "report-clicks", &project.layout).unwrap();

    assert!(second.files.is_empty(), "{:?}", second.files);
    assert_eq!(second.warnings.len(), 6, "{:?}", second.warnings);
    for writer_hint in ["Page", "Schema", "Component", "DAL method", "Breadcrumb", "Metadata function"] {
        assert!(
            second.warnings.iter().any(|w| w.starts_with(writer_hint)),
            "no skip warning for {writer_hint}: {:?}",
            second.warnings
        );
    }
    assert!(second.warnings.iter().all(|w| w.contains("already exists")));
    assert_eq!(project.snapshot(), after_first);
}

#[test]
fn test_shared_files_stay_sorted() {
    let project = Project::new();
    let config = get_page_config("report-clicks").unwrap();
    generate_page_from_config(config, "report-clicks", &project.layout).unwrap();

    let dal = project.read("src/dal/mailchimp.dal.ts");
    let lists = dal.find("async fetchLists(").unwrap();
    let clicks = dal.find("async fetchReportClickDetails(").unwrap();
    let reports = dal.find("async fetchReports(").unwrap();
    assert!(lists < clicks && clicks < reports);
    assert!(dal.contains(
        "return this.request(\"GET\", `/reports/${campaignId}/click-details`, params);"
    ));
    // the existing doc comment still sits directly above fetchReports
    assert!(dal.contains("   * Campaign Reports\n   * GET /reports\n   */\n  async fetchReports("));

    let breadcrumbs = project.read("src/utils/breadcrumbs/breadcrumb-builder.ts");
    let click_entry = breadcrumbs.find("clickDetails: (id: string) => ({").unwrap();
    let report_entry = breadcrumbs.find("reportDetail: (id: string) => ({").unwrap();
    assert!(click_entry < report_entry);
    assert!(breadcrumbs.contains("href: `/mailchimp/reports/${id}/clicks`,"));

    let metadata = project.read("src/utils/mailchimp/metadata.ts");
    assert!(metadata.contains("export function generateClickDetailsMetadata(id?: string): Metadata {"));
    assert!(metadata.contains("title: \"Click Details | Mailchimp\","));

    let exports = project.read("src/utils/mailchimp/index.ts");
    assert!(exports.contains(
        "export {\n  generateCampaignReportsMetadata,\n  generateClickDetailsMetadata,\n} from \"./metadata\";"
    ));
    assert!(exports.contains("export * from \"./formatters\";"));
}

#[test]
fn test_static_breadcrumb_for_list_page() {
    let project = Project::new();
    let config = get_page_config("lists").unwrap();
    generate_page_from_config(config, "lists", &project.layout).unwrap();

    let breadcrumbs = project.read("src/utils/breadcrumbs/breadcrumb-builder.ts");
    assert!(breadcrumbs.contains(
        "  home: { label: \"Home\", href: \"/\" },\n  lists: { label: \"Lists\", href: \"/mailchimp/lists\" },\n  mailchimp: {"
    ));
}

#[test]
fn test_whole_registry_links_parent_breadcrumbs() {
    let project = Project::new();
    for (key, config) in pagegen::registry::page_configs() {
        generate_page_from_config(config, key, &project.layout).unwrap();
    }

    let breadcrumbs = project.read("src/utils/breadcrumbs/breadcrumb-builder.ts");
    assert!(breadcrumbs.contains("  listDetail: (id: string) => ({"));
    assert!(breadcrumbs.contains("  lists: { label: \"Lists\", href: \"/mailchimp/lists\" },"));
    // the fixture's `reports` and `reportDetail` entries are reused, not duplicated
    assert_eq!(breadcrumbs.matches("href: \"/mailchimp/reports\"").count(), 1);
    assert_eq!(breadcrumbs.matches("href: `/mailchimp/reports/${id}`").count(), 1);

    let members = project.read("src/app/mailchimp/lists/[id]/members/page.tsx");
    assert!(members.contains("bc.listDetail(id), bc.listMembers(id)"));
}

#[test]
fn test_missing_export_block_degrades_to_warning() {
    let project = Project::new();
    project.write("src/utils/mailchimp/index.ts", "export * from \"./formatters\";\n");
    let config = get_page_config("report-opens").unwrap();

    let result = generate_page_from_config(config, "report-opens", &project.layout).unwrap();

    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("Could not find the metadata export block")));
    assert!(project
        .read("src/utils/mailchimp/metadata.ts")
        .contains("generateCampaignOpensMetadata"));
    assert_eq!(
        project.read("src/utils/mailchimp/index.ts"),
        "export * from \"./formatters\";\n"
    );
}

#[test]
fn test_wholesale_reexport_needs_no_update() {
    let project = Project::new();
    project.write("src/utils/mailchimp/index.ts", "export * from \"./metadata\";\n");
    let config = get_page_config("report-opens").unwrap();

    let result = generate_page_from_config(config, "report-opens", &project.layout).unwrap();

    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert!(!result
        .files
        .contains(&project.layout.metadata_exports_file()));
}

#[test]
fn test_missing_dal_class_degrades_to_warning() {
    let project = Project::new();
    project.write("src/dal/mailchimp.dal.ts", "export const placeholder = 1;\n");
    let config = get_page_config("report-opens").unwrap();

    let result = generate_page_from_config(config, "report-opens", &project.layout).unwrap();

    assert!(result.warnings.iter().any(|w| w.contains("No DAL class found")));
    assert!(!result.files.contains(&project.layout.dal_file()));
}

#[test]
fn test_validation_error_lists_every_failure() {
    let project = Project::new();
    let mut config = get_page_config("report-clicks").unwrap().clone();
    config.route.params.clear();
    config.api.endpoint = "reports".to_string();
    config.ui.breadcrumbs.parent = None;
    let before = project.snapshot();

    let err = generate_page_from_config(&config, "report-clicks", &project.layout).unwrap_err();

    let GenerateError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.len(), 3, "{errors:?}");
    let message = err.to_string();
    assert!(message.contains("dynamic segment"));
    assert!(message.contains("API endpoint"));
    assert!(message.contains("ui.breadcrumbs.parent"));
    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_generate_page_with_overrides() {
    let project = Project::new();
    let request = GeneratePageRequest {
        params_schema: "src/schemas/mailchimp/lists/members-params.schema.ts".to_string(),
        response_schema: "src/schemas/mailchimp/lists/members-success.schema.ts".to_string(),
        error_schema: None,
        route_path: "/mailchimp/lists/[id]/members".to_string(),
        api_endpoint: "/lists/{list_id}/members".to_string(),
        overrides: pagegen::generator::PageConfigOverrides {
            title: Some("Audience Members".to_string()),
            ..Default::default()
        },
    };

    let result = generate_page(&request, &project.layout).unwrap();

    assert_eq!(result.config_key, "list-members");
    assert_eq!(result.config.page.title, "Audience Members");
    assert_eq!(result.config.ui.breadcrumbs.parent.as_deref(), Some("listDetail"));
    assert!(project.exists("src/components/mailchimp/lists/audience-members-content.tsx"));
    assert!(project
        .read("src/dal/mailchimp.dal.ts")
        .contains("async fetchListMembers(listId: string, params?: Record<string, unknown>)"));
}
