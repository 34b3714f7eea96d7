use crate::prelude::{println, *};
use crate::tumblr::{BlogInfo, Fetcher, HttpTransport, TumblrConfig};
use colored::Colorize;
use prettytable::row;
use tumblr2ghost_core::pagination::page_count;
use tumblr2ghost_core::tumblr::format_timestamp;

#[derive(Debug, clap::Args, Clone)]
pub struct InfoOptions {
    #[clap(flatten)]
    pub tumblr: TumblrConfig,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: InfoOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Tumblr API Base: {}", options.tumblr.api_base);
        println!();
    }

    let fetcher = Fetcher::new(HttpTransport::new(), options.tumblr.clone());
    let info = fetcher.get_blog_info().await?;

    if options.json {
        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        println!("{}", format_info_text(&info, &options.tumblr.blog));
    }

    Ok(())
}

/// Render blog info as a two-column table
fn format_info_text(info: &BlogInfo, blog: &str) -> String {
    let mut table = new_table();
    let missing = || "-".to_string();

    table.add_row(row!["Blog".green(), blog.bright_white().bold()]);
    table.add_row(row![
        "Title".green(),
        info.title.clone().unwrap_or_else(missing)
    ]);
    table.add_row(row!["URL".green(), info.url.clone().unwrap_or_else(missing)]);
    table.add_row(row!["Posts".green(), info.posts.to_string().bright_cyan()]);
    table.add_row(row![
        "Pages".green(),
        page_count(info.posts).to_string().bright_cyan()
    ]);
    table.add_row(row![
        "Updated".green(),
        format_timestamp(info.updated).unwrap_or_else(missing)
    ]);

    table.to_string()
}
