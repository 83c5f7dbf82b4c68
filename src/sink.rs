use anyhow::{Context, bail};
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::report::Annotation;

/// Destination for the annotations of a run
///
/// Called at most once per run, and only when flow reported errors.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn send(&self, title: &str, annotations: &[Annotation]) -> anyhow::Result<()>;
}

/// Prints a readable summary to stdout
pub struct ConsoleSink;

#[async_trait]
impl ReportSink for ConsoleSink {
    async fn send(&self, title: &str, annotations: &[Annotation]) -> anyhow::Result<()> {
        println!("{}", format_annotations(title, annotations));
        Ok(())
    }
}

/// Writes the title and annotations to a JSON file
pub struct JsonFileSink {
    path: PathBuf,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    annotations: &'a [Annotation],
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            bail!("Output file must end with .json: {}", path.display());
        }
        Ok(Self { path })
    }
}

#[async_trait]
impl ReportSink for JsonFileSink {
    async fn send(&self, title: &str, annotations: &[Annotation]) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(&JsonReport { title, annotations })?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write output file {}", self.path.display()))?;
        info!("Results written to {}", self.path.display());
        Ok(())
    }
}

/// Render annotations grouped by file, files in first-seen order
pub fn format_annotations(title: &str, annotations: &[Annotation]) -> String {
    let mut by_file: Vec<(&str, Vec<&Annotation>)> = Vec::new();
    for annotation in annotations {
        match by_file.iter_mut().find(|(path, _)| *path == annotation.path) {
            Some((_, group)) => group.push(annotation),
            None => by_file.push((annotation.path.as_str(), vec![annotation])),
        }
    }

    let mut output = format!("# {}\n\n", title);
    for (path, group) in by_file {
        output.push_str(&format!("## {}\n\n", path));
        for annotation in group {
            output.push_str(&format!(
                "- {}-{}: {}\n",
                annotation.start, annotation.end, annotation.message
            ));
        }
        output.push('\n');
    }
    let noun = if annotations.len() == 1 { "error" } else { "errors" };
    output.push_str(&format!("{} {}", annotations.len(), noun));
    output
}
