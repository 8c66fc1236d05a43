//! Glossary command implementation.

use anyhow::Result;
use console::style;

use quanta_client::glossary::{count_label, filter_terms, paginate, sort_terms};

use super::common::{ConnectionArgs, create_client, spinner};

/// Execute the glossary command.
///
/// Fetches every term, then sorts, filters and pages locally.
pub async fn execute(
    args: &ConnectionArgs,
    search: Option<&str>,
    page: u32,
    per_page: u32,
) -> Result<()> {
    let (client, _) = create_client(args)?;

    let progress = spinner("Loading glossary...");
    let listing = client.glossary(None).await;
    progress.finish_and_clear();
    let mut terms = listing?.terms;

    sort_terms(&mut terms);
    let matches = filter_terms(&terms, search.unwrap_or(""));
    println!("{}", style(count_label(matches.len())).dim());

    let page = paginate(&matches, page, per_page);
    for term in &page.items {
        println!("\n{}", style(&term.term).cyan().bold());
        println!("  {}", term.definition);
        for example in &term.examples {
            println!("  {} {}", style("e.g.").dim(), example);
        }
    }

    if page.total_pages > 1 {
        println!(
            "\nPage {} of {}",
            style(page.page).yellow(),
            page.total_pages
        );
    }
    Ok(())
}
