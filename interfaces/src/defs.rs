use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An article as handed over by the aggregation layer.
///
/// The ranking side only reads these records. Quality attributes are derived
/// on demand from the raw fields instead of being stored alongside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub source: String,
    pub category: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// When the fetcher first saw the item.
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
    /// Links attached by the dedup/related collaborator, passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_ids: Vec<String>,
}

impl Article {
    pub fn new(id: impl Into<String>, source: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: String::new(),
            title: String::new(),
            description: None,
            content: None,
            author: None,
            image_url: None,
            source: source.into(),
            category: category.into(),
            published_at: None,
            fetched_at: None,
            related_ids: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(fetched_at);
        self
    }

    /// Publication time, falling back to the discovery time and then to `now`.
    pub fn effective_published_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.published_at.or(self.fetched_at).unwrap_or(now)
    }

    pub fn has_image(&self) -> bool {
        if self.image_url.as_deref().is_some_and(|url| !url.trim().is_empty()) {
            return true;
        }
        [self.content.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .any(|body| {
                body.as_bytes()
                    .windows(4)
                    .any(|window| window.eq_ignore_ascii_case(b"<img"))
            })
    }

    /// Character count of the body text with markup removed, using the
    /// description when the content has no text of its own.
    pub fn content_length(&self) -> usize {
        let text_length = |body: &str| strip_tags(body).chars().count();
        self.content
            .as_deref()
            .map(text_length)
            .filter(|&length| length > 0)
            .or_else(|| self.description.as_deref().map(text_length))
            .unwrap_or(0)
    }

    pub fn has_author(&self) -> bool {
        self.author.as_deref().is_some_and(|author| !author.trim().is_empty())
    }

    pub fn title_length(&self) -> usize {
        self.title.trim().chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategorySpec {
    pub slug: String,
    pub name: String,
}

impl CategorySpec {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}

/// Drop everything between `<` and `>` and collapse the remaining whitespace.
fn strip_tags(html: &str) -> String {
    html.chars()
        .fold((String::new(), false), |(mut text, in_tag), c| match c {
            '<' => (text, true),
            '>' => (text, false),
            _ if !in_tag => {
                text.push(c);
                (text, in_tag)
            }
            _ => (text, in_tag),
        })
        .0
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// The category list is owned by whoever configures the deployment. Ranking
// code asks for it once per call and treats the order as significant.
pub trait KnownCategories: Send + Sync {
    fn categories(&self) -> Vec<CategorySpec>;
}
