use anyhow::{bail, Result};
use forest_store::{page_stream, MongoStore};
use futures::TryStreamExt;

/// List the ids of all features of a forest type, page by page.
pub async fn run(store: &MongoStore, forest_type: &str, page_size: u32) -> Result<()> {
    if page_size == 0 {
        bail!("--page-size must be at least 1");
    }

    let pages = page_stream(store, forest_type, page_size);
    futures::pin_mut!(pages);

    let mut total = 0;
    let mut page_count = 0;
    while let Some(page) = pages.try_next().await? {
        page_count += 1;
        for feature in &page.features {
            println!("{}", feature.id);
        }
        total += page.features.len();
    }

    println!();
    println!("Summary:");
    println!("  Forest type: {}", forest_type);
    println!("  Features: {}", total);
    println!("  Pages: {}", page_count);
    Ok(())
}
