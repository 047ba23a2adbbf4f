//! # Naming Module
//!
//! Every entity name the generator emits (component, DAL method, breadcrumb key,
//! metadata function, schema type, config key) is derived here, so all writers
//! agree on the same identifier for the same page.
//!
//! ## Case conversions
//!
//! | Function            | Input              | Output            |
//! |---------------------|--------------------|-------------------|
//! | [`kebab_to_pascal`] | `open-details`     | `OpenDetails`     |
//! | [`title_to_pascal`] | `Campaign Opens`   | `CampaignOpens`   |
//! | [`title_to_camel`]  | `Campaign Opens`   | `campaignOpens`   |
//! | [`to_kebab`]        | `Campaign Opens`   | `campaign-opens`  |
//!
//! ## Route helpers
//!
//! Routes look like `/mailchimp/reports/[id]/clicks`. Segments wrapped in
//! brackets are dynamic; everything else is static.

use convert_case::{Case, Casing};

use crate::config::PageConfig;

/// Join the alphanumeric runs of `s` with single spaces.
///
/// Punctuation (`/`, `&`, `.`, brackets) never reaches an identifier; case and
/// acronym boundaries are left to `convert_case`.
fn normalize(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `open-details` → `OpenDetails`
pub fn kebab_to_pascal(s: &str) -> String {
    normalize(s).to_case(Case::Pascal)
}

/// `Campaign Opens` → `CampaignOpens`, `API Keys` → `ApiKeys`
pub fn title_to_pascal(s: &str) -> String {
    normalize(s).to_case(Case::Pascal)
}

/// `Campaign Opens` → `campaignOpens`, `API Keys` → `apiKeys`
pub fn title_to_camel(s: &str) -> String {
    normalize(s).to_case(Case::Camel)
}

/// `Campaign Opens` → `campaign-opens`, `HTTPStatus` → `http-status`
pub fn to_kebab(s: &str) -> String {
    normalize(s).to_case(Case::Kebab)
}

/// Naive English singular used for resource names (`reports` → `report`).
pub fn singularize(s: &str) -> String {
    if let Some(stem) = s.strip_suffix("ies") {
        format!("{stem}y")
    } else if s.ends_with("ss") {
        s.to_string()
    } else if let Some(stem) = s.strip_suffix('s') {
        stem.to_string()
    } else {
        s.to_string()
    }
}

/// `open-details` → `Open Details`
pub fn humanize_segment(segment: &str) -> String {
    normalize(segment).to_case(Case::Title)
}

/// Whether a route or endpoint segment is a placeholder.
///
/// Accepts the Next.js form (`[id]`), the OpenAPI form (`{campaign_id}`) and
/// the express form (`:id`).
pub fn is_dynamic_segment(segment: &str) -> bool {
    (segment.starts_with('[') && segment.ends_with(']'))
        || (segment.starts_with('{') && segment.ends_with('}'))
        || segment.starts_with(':')
}

/// Non-empty `/`-separated segments of a route path.
pub fn route_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Segments of a route path that are not placeholders.
pub fn static_segments(path: &str) -> Vec<&str> {
    route_segments(path)
        .into_iter()
        .filter(|s| !is_dynamic_segment(s))
        .collect()
}

/// Number of segments in a route path (`/mailchimp/reports/[id]` → 3).
pub fn route_depth(path: &str) -> usize {
    route_segments(path).len()
}

/// Names of the `[name]` groups in a route path, in order.
pub fn bracket_params(path: &str) -> Vec<String> {
    route_segments(path)
        .into_iter()
        .filter_map(|s| s.strip_prefix('[').and_then(|s| s.strip_suffix(']')))
        .map(str::to_string)
        .collect()
}

/// Derive a registry key from a route path.
///
/// The leading `mailchimp` segment is dropped. A lone top-level resource keeps
/// its plural name; deeper routes singularize the parent resource and append
/// the child, with `-detail` for routes ending on a placeholder.
///
/// ```
/// use pagegen::naming::derive_config_key;
///
/// assert_eq!(derive_config_key("/mailchimp/lists"), "lists");
/// assert_eq!(derive_config_key("/mailchimp/reports/[id]/clicks"), "report-clicks");
/// assert_eq!(derive_config_key("/mailchimp/lists/[id]"), "list-detail");
/// ```
pub fn derive_config_key(route_path: &str) -> String {
    let segments: Vec<&str> = route_segments(route_path)
        .into_iter()
        .skip_while(|s| *s == "mailchimp")
        .collect();
    let statics: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|s| !is_dynamic_segment(s))
        .collect();
    let ends_dynamic = segments.last().is_some_and(|s| is_dynamic_segment(s));

    match statics.as_slice() {
        [] => "mailchimp".to_string(),
        [only] if !ends_dynamic => to_kebab(only),
        [only] => format!("{}-detail", to_kebab(&singularize(only))),
        [first, rest @ ..] => {
            let mut parts = vec![to_kebab(&singularize(first))];
            if ends_dynamic {
                if let Some((last, middle)) = rest.split_last() {
                    parts.extend(middle.iter().map(|s| to_kebab(s)));
                    parts.push(to_kebab(&singularize(last)));
                }
                parts.push("detail".to_string());
            } else {
                parts.extend(rest.iter().map(|s| to_kebab(s)));
            }
            parts.join("-")
        }
    }
}

/// Component identifier rendered by the page (`CampaignOpensContent`).
pub fn component_name(config: &PageConfig) -> String {
    format!("{}Content", title_to_pascal(&config.page.title))
}

/// Component file name (`campaign-opens-content.tsx`).
pub fn component_file_name(config: &PageConfig) -> String {
    format!("{}-content.tsx", to_kebab(&config.page.title))
}

/// Component module path relative to the components root, without extension.
pub fn component_import_path(config: &PageConfig) -> String {
    format!(
        "{}/{}-content",
        category(&config.route.path),
        to_kebab(&config.page.title)
    )
}

/// Component category: the route's second segment (`reports`).
pub fn category(route_path: &str) -> String {
    route_segments(route_path)
        .get(1)
        .map(|s| to_kebab(s))
        .unwrap_or_else(|| "general".to_string())
}

/// DAL method name for a page.
///
/// Uses `api.dal_method` when the config sets one, otherwise `fetch` followed
/// by the endpoint's static segments, singularizing each segment that is
/// followed by a placeholder (`/reports/{id}/open-details` →
/// `fetchReportOpenDetails`).
pub fn dal_method_name(config: &PageConfig) -> String {
    if let Some(name) = config.api.dal_method.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    let segments = route_segments(&config.api.endpoint);
    let mut name = String::from("fetch");
    for (i, segment) in segments.iter().enumerate() {
        if is_dynamic_segment(segment) {
            continue;
        }
        let followed_by_param = segments
            .get(i + 1)
            .is_some_and(|next| is_dynamic_segment(next));
        if followed_by_param {
            name.push_str(&kebab_to_pascal(&singularize(segment)));
        } else {
            name.push_str(&kebab_to_pascal(segment));
        }
    }
    name
}

/// Breadcrumb builder key (`campaignOpens`).
pub fn breadcrumb_key(config: &PageConfig) -> String {
    title_to_camel(&config.page.title)
}

/// Metadata helper function (`generateCampaignOpensMetadata`).
pub fn metadata_function_name(config: &PageConfig) -> String {
    format!("generate{}Metadata", title_to_pascal(&config.page.title))
}

/// Base name of the generated zod schema (`reportClicksPageParams`).
pub fn schema_const_name(config_key: &str) -> String {
    format!("{}PageParams", title_to_camel(config_key))
}

/// File name of the generated UI params schema.
pub fn schema_file_name(config_key: &str) -> String {
    format!("{config_key}-page-params.ts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(kebab_to_pascal("open-details"), "OpenDetails");
        assert_eq!(kebab_to_pascal("email_activity"), "EmailActivity");
        assert_eq!(title_to_pascal("Campaign Opens"), "CampaignOpens");
        assert_eq!(title_to_camel("Campaign Opens"), "campaignOpens");
        assert_eq!(title_to_camel("report-clicks"), "reportClicks");
        assert_eq!(to_kebab("Campaign Opens"), "campaign-opens");
        assert_eq!(to_kebab("openDetails"), "open-details");
        assert_eq!(title_to_camel(""), "");
    }

    #[test]
    fn test_acronyms_get_one_spelling() {
        assert_eq!(title_to_camel("API Keys"), "apiKeys");
        assert_eq!(title_to_pascal("API Keys"), "ApiKeys");
        assert_eq!(to_kebab("API Keys"), "api-keys");
        assert_eq!(to_kebab("HTTPStatus"), "http-status");
        assert_eq!(title_to_camel("Opens & Clicks"), "opensClicks");
        assert_eq!(humanize_segment("abuse-reports"), "Abuse Reports");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("reports"), "report");
        assert_eq!(singularize("activities"), "activity");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("growth"), "growth");
    }

    #[test]
    fn test_route_helpers() {
        let path = "/mailchimp/reports/[id]/opens";
        assert_eq!(route_depth(path), 4);
        assert_eq!(bracket_params(path), vec!["id"]);
        assert_eq!(static_segments(path), vec!["mailchimp", "reports", "opens"]);
        assert_eq!(category(path), "reports");
        assert_eq!(humanize_segment("open-details"), "Open Details");
    }

    #[test]
    fn test_derive_config_key() {
        assert_eq!(derive_config_key("/mailchimp/reports/[id]/clicks"), "report-clicks");
        assert_eq!(derive_config_key("/mailchimp/lists"), "lists");
        assert_eq!(derive_config_key("/mailchimp/lists/[id]"), "list-detail");
        assert_eq!(
            derive_config_key("/mailchimp/reports/[id]/open-details"),
            "report-open-details"
        );
        assert_eq!(
            derive_config_key("/mailchimp/lists/[id]/members/[member_id]"),
            "list-member-detail"
        );
    }
}
