use blogkit_core::{ContentItem, DisplayableItem};
use chrono::{DateTime, Utc};

/// A published post with its parsed date
#[derive(Debug, Clone, Copy)]
pub struct ListedPost<'a> {
    pub item: &'a ContentItem,
    pub date: DateTime<Utc>,
}

impl ListedPost<'_> {
    pub fn url(&self) -> String {
        format!("/blog/{}/", self.item.slug)
    }
}

/// Published posts, newest first, as shown on the site
#[derive(Debug, Clone, Default)]
pub struct Listing<'a> {
    pub posts: Vec<ListedPost<'a>>,
    /// Slugs of non-draft posts left out because their date is missing or malformed
    pub skipped: Vec<String>,
}

impl<'a> Listing<'a> {
    pub fn new(items: &'a [ContentItem]) -> Self {
        let mut posts = Vec::new();
        let mut skipped = Vec::new();

        for item in items.iter().filter(|item| !item.draft) {
            match item.published() {
                Some(date) => posts.push(ListedPost { item, date }),
                None => {
                    tracing::warn!(
                        slug = %item.slug,
                        date = item.date.as_deref().unwrap_or(""),
                        "skipping post without a valid date"
                    );
                    skipped.push(item.slug.clone());
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts, skipped }
    }

    pub fn find(&self, slug: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.item.slug == slug)
    }

    /// The newer neighbour of the post at `index`
    pub fn newer(&self, index: usize) -> Option<&ListedPost<'a>> {
        index.checked_sub(1).and_then(|i| self.posts.get(i))
    }

    /// The older neighbour of the post at `index`
    pub fn older(&self, index: usize) -> Option<&ListedPost<'a>> {
        self.posts.get(index + 1)
    }

    /// Search box entries in listing order
    pub fn displayable_items(&self) -> Vec<DisplayableItem> {
        self.posts
            .iter()
            .map(|p| DisplayableItem::from(p.item))
            .collect()
    }
}
