//! Details command: fetch one record's details.

use clap::Args;
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputSink, Result};
use crate::client::DirectoryClient;

/// Arguments for the details command.
#[derive(Args, Debug)]
pub struct DetailsArgs {
    /// Id of the record to look up.
    pub id: String,

    #[command(flatten)]
    pub output: OutputSink,
}

#[derive(Serialize)]
struct DetailsOutput {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
}

impl DetailsArgs {
    pub async fn run(self, client: &dyn DirectoryClient, global: &GlobalArgs) -> Result<()> {
        let details = client.fetch_details(&self.id).await?;

        let rendered = if global.json {
            let out = DetailsOutput {
                id: self.id,
                parent_id: details.parent_id,
            };
            let mut json =
                serde_json::to_string_pretty(&out).map_err(crate::cli::args::ArgsError::from)?;
            json.push('\n');
            json
        } else {
            match details.parent_id {
                Some(parent) => format!("{}\tparent: {}\n", self.id, parent),
                None => format!("{}\tparent: (root)\n", self.id),
            }
        };
        self.output.write_str(&rendered).await?;

        Ok(())
    }
}
