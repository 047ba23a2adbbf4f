mod common;

use common::fixture::{Project, PAGINATED_PARAMS};
use pagegen::analyzer::{analyze_schema, PaginationType, SchemaAnalysis};
use pagegen::config::HttpMethod;
use pagegen::naming::derive_config_key;

#[test]
fn test_fixture_params_schema() {
    let project = Project::bare();
    project.write("schemas/clicks-params.schema.ts", PAGINATED_PARAMS);

    let analysis = analyze_schema(&project.path("schemas/clicks-params.schema.ts"));

    assert!(analysis.has_pagination);
    assert_eq!(analysis.pagination_type, Some(PaginationType::CountOffset));
    assert_eq!(analysis.path_params, vec!["campaign_id"]);
    assert!(analysis.has_filters);
    assert!(!analysis.has_sorting);
    assert!(!analysis.has_date_filters);
    assert_eq!(analysis.suggested_method, HttpMethod::Get);
}

#[test]
fn test_page_style_pagination_from_file() {
    let project = Project::bare();
    project.write(
        "schemas/members-params.schema.ts",
        "export const params = z.object({\n  list_id: z.string(),\n  page: z.number(),\n  per_page: z.number(),\n  sortBy: z.string().optional(),\n  since_last_changed: z.string().optional(),\n});\n",
    );

    let analysis = analyze_schema(&project.path("schemas/members-params.schema.ts"));

    assert_eq!(analysis.pagination_type, Some(PaginationType::PagePerPage));
    assert_eq!(analysis.path_params, vec!["list_id"]);
    assert!(analysis.has_sorting);
    assert!(analysis.has_date_filters);
    assert!(!analysis.has_filters);
}

#[test]
fn test_lone_limit_from_file() {
    let project = Project::bare();
    project.write("schemas/limit.schema.ts", "limit: z.number().optional(),\n");

    let analysis = analyze_schema(&project.path("schemas/limit.schema.ts"));

    assert!(analysis.has_pagination);
    assert!(analysis.pagination_type.is_none());
}

#[test]
fn test_write_schema_suggests_mutation() {
    let project = Project::bare();
    project.write(
        "schemas/update-member.schema.ts",
        "status: z.enum([\"subscribed\", \"unsubscribed\"]),\nbody: z.object({}),\n",
    );

    let analysis = analyze_schema(&project.path("schemas/update-member.schema.ts"));

    assert_eq!(analysis.suggested_method, HttpMethod::Patch);
    assert!(!analysis.has_pagination);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let project = Project::bare();
    let analysis = analyze_schema(&project.path("schemas/nope.schema.ts"));
    assert_eq!(analysis, SchemaAnalysis::default());
    assert_eq!(analysis.suggested_method, HttpMethod::Get);
    assert!(analysis.path_params.is_empty());
}

#[test]
fn test_analysis_serializes_camel_case() {
    let analysis = pagegen::analyzer::analyze_schema_source(PAGINATED_PARAMS);
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["hasPagination"], true);
    assert_eq!(json["paginationType"], "count-offset");
    assert_eq!(json["pathParams"][0], "campaign_id");
}

#[test]
fn test_config_key_derivation() {
    let cases = [
        ("/mailchimp/lists", "lists"),
        ("/mailchimp/reports", "reports"),
        ("/mailchimp/lists/[id]", "list-detail"),
        ("/mailchimp/reports/[id]", "report-detail"),
        ("/mailchimp/reports/[id]/clicks", "report-clicks"),
        ("/mailchimp/lists/[id]/members", "list-members"),
        ("/mailchimp/lists/[id]/segments/[segment_id]", "list-segment-detail"),
    ];
    for (route, expected) in cases {
        assert_eq!(derive_config_key(route), expected, "route {route}");
    }
}
