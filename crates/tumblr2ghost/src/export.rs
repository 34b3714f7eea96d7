use crate::prelude::{eprintln, println, *};
use crate::tumblr::{Fetcher, HttpTransport, Transport, TumblrConfig};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tumblr2ghost_core::ghost::{export_timestamp, ExportDocument};
use tumblr2ghost_core::transform::create_ghost_export;

#[derive(Debug, clap::Args, Clone)]
pub struct ExportOptions {
    #[clap(flatten)]
    pub tumblr: TumblrConfig,

    /// File to write the Ghost import JSON to (defaults to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Fetch all pages of posts concurrently
    #[arg(long, env = "TUMBLR2GHOST_CONCURRENT")]
    pub concurrent: bool,
}

pub async fn run(options: ExportOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Tumblr API Base: {}", options.tumblr.api_base);
        eprintln!("Exporting blog: {}", options.tumblr.blog);
    }

    let fetcher = Fetcher::new(HttpTransport::new(), options.tumblr.clone());
    let export = export_data(&fetcher, options.concurrent).await?;

    let json = format_export_json(&export, options.pretty)?;
    write_output(&json, options.output.as_deref())?;

    let destination = options
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    eprintln!(
        "{} {} posts and {} tags to {}",
        "Exported".green().bold(),
        export.data.posts.len().to_string().bright_cyan(),
        export.data.tags.len().to_string().bright_cyan(),
        destination.bright_white()
    );

    Ok(())
}

/// Fetches every post of the configured blog and builds the Ghost export
pub async fn export_data<T: Transport>(
    fetcher: &Fetcher<T>,
    concurrent: bool,
) -> Result<ExportDocument, Error> {
    let posts = if concurrent {
        fetcher.get_posts_concurrent().await?
    } else {
        fetcher.get_posts().await?
    };

    log::info!("Transforming {} posts", posts.len());
    let export = create_ghost_export(&posts, export_timestamp(chrono::Utc::now()))?;
    log::info!(
        "Built export with {} posts and {} tags",
        export.data.posts.len(),
        export.data.tags.len()
    );

    Ok(export)
}

/// Convert the export document to a JSON string
fn format_export_json(export: &ExportDocument, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(export)
    } else {
        serde_json::to_string(export)
    }
    .map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn write_output(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| f!("Failed to write export to {}", path.display())),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
