//! Print what a conversion of one page would produce.
//!
//! The output is the run report as pretty JSON: the entry artifact, every
//! dependency artifact keyed by output path, and the diagnostics.
//!
//! ```bash
//! wxport inspect src/pages/index/index.wxml | jq '.result.deps | keys'
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::CliConfig;
use crate::config::ConvertOptions;
use crate::core::WxportError;
use crate::parser::MarkupParser;
use crate::resolver::{RunReport, convert_page};
use crate::utils::fs::{LocalFs, absolutize};

/// Command to resolve a page and dump the report.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Page to resolve.
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,
}

impl InspectCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let options = config.load_options()?;
        options.validate()?;

        let report = self.report(&options, &cwd)?;
        let json = serde_json::to_string_pretty(&report).map_err(WxportError::from)?;
        println!("{json}");
        Ok(())
    }

    pub fn report(&self, options: &ConvertOptions, cwd: &Path) -> Result<RunReport> {
        let page = absolutize(cwd, &self.page);
        let parser = MarkupParser::new()?;
        convert_page(&LocalFs, &parser, options, &page)
            .with_context(|| format!("Failed to inspect {}", page.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ProjectFixture;

    #[test]
    fn test_report_serializes_deps_by_output_path() {
        let fixture = ProjectFixture::sample().unwrap();
        let cmd = InspectCommand {
            page: PathBuf::from("src/pages/index/index.wxml"),
        };

        let report = cmd.report(&fixture.options(), fixture.root()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        let card = fixture.path("dist/common/card.axml");
        assert!(json["result"]["deps"].get(&*card.to_string_lossy()).is_some());
        assert!(json["result"]["entry"].is_object());
        assert_eq!(json["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn test_report_lists_missing_page() {
        let fixture = ProjectFixture::new().unwrap();
        let cmd = InspectCommand {
            page: PathBuf::from("src/none.wxml"),
        };

        let report = cmd.report(&fixture.options(), fixture.root()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["diagnostics"][0]["kind"], "missing-file");
    }
}
