/// A single entry parsed out of a feed document.
///
/// `enclosures` preserves document order; an item may carry any number
/// of attachment links, including none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub enclosures: Vec<String>,
}
