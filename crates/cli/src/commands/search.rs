use anyhow::Result;
use blogkit_generator::filter::{apply_filter, visible};
use blogkit_generator::listing::Listing;
use std::path::PathBuf;

use super::site::load_site;

/// Print the posts the blog search box would keep visible for `query`
pub async fn run(path: PathBuf, query: String) -> Result<()> {
    let site = load_site(&path)?;
    let listing = Listing::new(&site.posts);

    let mut items = listing.displayable_items();
    apply_filter(&mut items, &query);

    let matches: Vec<_> = visible(&items).collect();
    println!(
        "{} of {} posts match {:?}",
        matches.len(),
        items.len(),
        query
    );

    for item in matches {
        if let Some(post) = listing.find(&item.slug).map(|i| &listing.posts[i]) {
            println!(
                "  {}  {}  /blog/{}/",
                post.date.format("%Y-%m-%d"),
                post.item.display_title(),
                post.item.slug
            );
        }
    }

    Ok(())
}
