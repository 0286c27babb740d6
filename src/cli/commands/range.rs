//! Range retrieval command.

use clap::Args;

use crate::cli::{GlobalArgs, OutputSink, Result};
use crate::query::RangeSearchService;
use crate::record::LeafRecord;
use crate::walk::RangeRequest;

/// Arguments for the range command.
#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Id of the first record in the range (inclusive).
    pub from: String,

    /// Id of the last record in the range (inclusive).
    pub to: String,

    /// Expand container records into their item-level leaves.
    #[arg(long = "include-items")]
    pub include_items: bool,

    #[command(flatten)]
    pub output: OutputSink,
}

impl RangeArgs {
    pub async fn run(self, service: &RangeSearchService, global: &GlobalArgs) -> Result<()> {
        let request = RangeRequest {
            from: self.from,
            to: self.to,
            include_items: self.include_items,
        };

        let leaves = service.run_range(&request).await?;

        let rendered = if global.json {
            render_json(&leaves)?
        } else {
            render_plain(&leaves)
        };
        self.output.write_str(&rendered).await?;

        Ok(())
    }
}

/// One leaf per line as JSON (JSONL).
fn render_json(leaves: &[LeafRecord]) -> Result<String> {
    let mut out = String::new();
    for leaf in leaves {
        out.push_str(&serde_json::to_string(leaf).map_err(crate::cli::args::ArgsError::from)?);
        out.push('\n');
    }
    Ok(out)
}

/// One leaf per line as "reference<TAB>description".
fn render_plain(leaves: &[LeafRecord]) -> String {
    let mut out = String::new();
    for leaf in leaves {
        out.push_str(&leaf.citable_reference);
        out.push('\t');
        out.push_str(&leaf.description);
        out.push('\n');
    }
    out
}
