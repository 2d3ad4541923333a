//! The `materio suggest` command: runs the pipeline and renders the result.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use materio_core::gateway::openai::{GatewayConfig, OpenAiGateway};
use materio_core::pipeline::{Mode, Pipeline, ProjectSuggestions};
use materio_core::record::{ImageRef, MaterialRecordSet};

use crate::config::MaterioConfig;
use crate::export;

/// Options collected from the CLI for one suggestion run.
#[derive(Debug)]
pub struct SuggestArgs {
    pub description: String,
    pub detailed: bool,
    pub csv: Option<PathBuf>,
    pub model: Option<String>,
    pub image_concurrency: Option<usize>,
}

/// Execute the suggest command end to end.
pub async fn run_suggest(cli_api_key: Option<&str>, args: SuggestArgs) -> Result<()> {
    let resolved = MaterioConfig::resolve(
        cli_api_key,
        args.model.as_deref(),
        args.image_concurrency,
    )?;

    let gateway_config =
        GatewayConfig::new(resolved.api_key).with_base_url(resolved.base_url);
    let gateway = OpenAiGateway::new(gateway_config)?;
    let pipeline = Pipeline::new(Arc::new(gateway), resolved.pipeline);

    let mode = if args.detailed {
        Mode::Detailed
    } else {
        Mode::Brief
    };

    // Stage-level failures (validation, summarize, fetch) carry distinct
    // user-facing messages and propagate here verbatim.
    let suggestions = pipeline.submit(&args.description, mode).await?;

    let mut stdout = std::io::stdout().lock();
    render(&mut stdout, &suggestions)?;

    if let Some(path) = &args.csv {
        export::write_csv_file(&suggestions.records, path)?;
        writeln!(
            stdout,
            "Exported {} records to {}",
            suggestions.records.len(),
            path.display()
        )?;
    }

    Ok(())
}

/// Render the summary and each record to the given writer.
fn render<W: Write>(out: &mut W, suggestions: &ProjectSuggestions) -> std::io::Result<()> {
    // The summary is displayed as-is, whitespace included.
    writeln!(out, "Summarized project description:{}", suggestions.summary)?;
    writeln!(out)?;

    if suggestions.records.is_empty() {
        writeln!(out, "No material records could be parsed from the response.")?;
        return Ok(());
    }

    render_records(out, &suggestions.records)
}

fn render_records<W: Write>(out: &mut W, records: &MaterialRecordSet) -> std::io::Result<()> {
    for record in records {
        writeln!(out, "## {}", record.name)?;
        writeln!(out, "Properties: {}", record.properties)?;
        writeln!(out, "Pros: {}", record.pros)?;
        writeln!(out, "Cons: {}", record.cons)?;
        match &record.image {
            ImageRef::Url(url) => writeln!(out, "Image: {url}")?,
            ImageRef::Unavailable => writeln!(out, "Image: no image available")?,
        }
        writeln!(out, "---")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use materio_core::record::MaterialRecord;

    fn suggestions_with(records: Vec<MaterialRecord>) -> ProjectSuggestions {
        ProjectSuggestions {
            summary: " A lightweight chassis.".to_string(),
            records: records.into_iter().collect(),
        }
    }

    #[test]
    fn render_shows_summary_verbatim() {
        let mut out = Vec::new();
        render(&mut out, &suggestions_with(vec![])).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(
            text.starts_with("Summarized project description: A lightweight chassis.\n"),
            "got: {text}"
        );
    }

    #[test]
    fn render_notes_empty_record_set() {
        let mut out = Vec::new();
        render(&mut out, &suggestions_with(vec![])).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No material records"), "got: {text}");
    }

    #[test]
    fn render_shows_records_in_order_with_image_state() {
        let mut with_image = MaterialRecord::new(
            "Aluminum".into(),
            "lightweight".into(),
            "corrosion resistant".into(),
            "costlier than steel".into(),
        );
        with_image.image = ImageRef::Url("https://img.example/al.png".into());
        let without_image =
            MaterialRecord::new("Steel".into(), "strong".into(), "cheap".into(), String::new());

        let mut out = Vec::new();
        render(&mut out, &suggestions_with(vec![with_image, without_image])).unwrap();
        let text = String::from_utf8(out).unwrap();

        let aluminum = text.find("## Aluminum").expect("aluminum section");
        let steel = text.find("## Steel").expect("steel section");
        assert!(aluminum < steel, "record order changed: {text}");
        assert!(text.contains("Image: https://img.example/al.png"));
        assert!(text.contains("Image: no image available"));
    }
}
