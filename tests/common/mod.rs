#![allow(dead_code)]

pub mod fixture {
    use pagegen::layout::ProjectLayout;
    use pagegen::registry::page_configs;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    pub const DAL: &str = r#"import { MailchimpClient } from "./mailchimp-client";

export class MailchimpDAL {
  constructor(private client: MailchimpClient) {}

  /**
   * Audiences
   * GET /lists
   */
  async fetchLists(params?: Record<string, unknown>) {
    return this.request("GET", `/lists`, params);
  }

  /**
   * Campaign Reports
   * GET /reports
   */
  async fetchReports(params?: Record<string, unknown>) {
    return this.request("GET", `/reports`, params);
  }

  private async request(method: string, path: string, payload?: unknown) {
    if (!this.client) {
      throw new Error("client not configured");
    }
    return this.client.call(method, path, payload);
  }
}

export const mailchimpDAL = new MailchimpDAL(new MailchimpClient());
"#;

    pub const BREADCRUMBS: &str = r#"export const bc = {
  // Static Routes
  home: { label: "Home", href: "/" },
  mailchimp: { label: "Mailchimp", href: "/mailchimp" },
  reports: { label: "Reports", href: "/mailchimp/reports" },

  // Dynamic Route Functions
  reportDetail: (id: string) => ({
    label: "Report",
    href: `/mailchimp/reports/${id}`,
  }),
};
"#;

    pub const METADATA: &str = r#"import type { Metadata } from "next";

export function generateCampaignReportsMetadata(): Metadata {
  return {
    title: "Campaign Reports | Mailchimp",
    description: "Performance reports for sent campaigns",
  };
}
"#;

    pub const METADATA_EXPORTS: &str = r#"export { generateCampaignReportsMetadata } from "./metadata";
export * from "./formatters";
"#;

    pub const PAGINATED_PARAMS: &str = r#"import { z } from "zod";

export const paramsSchema = z.object({
  campaign_id: z.string(),
  fields: z.array(z.string()).optional(),
  count: z.number().optional(),
  offset: z.number().optional(),
  since: z.string().optional(),
});
"#;

    pub const RESPONSE: &str = r#"import { z } from "zod";

export const responseSchema = z.object({
  total_items: z.number(),
});
"#;

    /// A throwaway dashboard project with the shared files the writers edit
    pub struct Project {
        pub dir: TempDir,
        pub layout: ProjectLayout,
    }

    impl Project {
        /// Shared files plus every schema the built-in registry references.
        pub fn new() -> Self {
            let project = Self::bare();
            project.write("src/dal/mailchimp.dal.ts", DAL);
            project.write("src/utils/breadcrumbs/breadcrumb-builder.ts", BREADCRUMBS);
            project.write("src/utils/mailchimp/metadata.ts", METADATA);
            project.write("src/utils/mailchimp/index.ts", METADATA_EXPORTS);
            for config in page_configs().values() {
                project.write(&config.schemas.params, PAGINATED_PARAMS);
                project.write(&config.schemas.response, RESPONSE);
                if let Some(error) = &config.schemas.error {
                    project.write(error, "export const errorSchema = {};\n");
                }
            }
            project
        }

        /// An empty project root.
        pub fn bare() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let layout = ProjectLayout::new(dir.path());
            Project { dir, layout }
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn path(&self, relative: &str) -> PathBuf {
            self.dir.path().join(relative)
        }

        pub fn write(&self, relative: &str, contents: &str) {
            let path = self.path(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, contents).unwrap();
        }

        pub fn read(&self, relative: &str) -> String {
            fs::read_to_string(self.path(relative)).unwrap()
        }

        pub fn exists(&self, relative: &str) -> bool {
            self.path(relative).exists()
        }

        /// Snapshot of every file under the root, for no-change assertions.
        pub fn snapshot(&self) -> Vec<(PathBuf, String)> {
            let mut files: Vec<(PathBuf, String)> = walkdir::WalkDir::new(self.root())
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| {
                    let contents = fs::read_to_string(e.path()).unwrap_or_default();
                    (e.path().to_path_buf(), contents)
                })
                .collect();
            files.sort();
            files
        }
    }
}
