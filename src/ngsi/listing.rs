//! Paginated listing: page driver feeding the output renderer

use futures::{pin_mut, TryStreamExt};
use indicatif::ProgressBar;
use log::debug;
use std::io::Write;

use crate::error::Result;
use crate::ngsi::client::NgsiClient;
use crate::ngsi::pagination::{fetch_count, PageDriver, PageRequest};
use crate::output::{PageRenderer, RenderMode};
use crate::ui::{create_spinner, finish_spinner, set_spinner_message, suspend_spinner};

/// Print the total count, or every page in the selected mode
pub async fn run_listing<W: Write>(
    client: &NgsiClient,
    request: PageRequest,
    count_only: bool,
    mode: RenderMode,
    mut out: W,
    batch: bool,
) -> Result<()> {
    if count_only {
        let count = fetch_count(client, &request).await?;
        writeln!(out, "{}", count)?;
        out.flush()?;
        return Ok(());
    }

    let spinner = create_spinner(&format!("Fetching {}...", request.label), batch);
    let result = render_pages(client, request, mode, out, spinner.as_ref()).await;
    finish_spinner(spinner);
    result
}

async fn render_pages<W: Write>(
    client: &NgsiClient,
    request: PageRequest,
    mode: RenderMode,
    out: W,
    spinner: Option<&ProgressBar>,
) -> Result<()> {
    let label = request.label.clone();
    // Dropping the renderer on an error path still terminates the document
    let mut renderer = PageRenderer::new(out, mode);

    let pages = PageDriver::new(client, request).into_stream();
    pin_mut!(pages);

    let mut items = 0usize;
    while let Some(page) = pages.try_next().await? {
        items += page.item_count;
        set_spinner_message(
            spinner,
            format!(
                "Fetching {}... {}/{}",
                label,
                page.offset + page.item_count as u64,
                page.total_count
            ),
        );
        suspend_spinner(spinner, || renderer.render(&page))?;
    }

    debug!("Rendered {} {}", items, label);
    suspend_spinner(spinner, || renderer.finish())
}
