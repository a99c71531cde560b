use crate::defs::CategorySpec;
use crate::defs::KnownCategories;

const REFERENCE_CATEGORIES: [(&str, &str); 8] = [
    ("world", "World"),
    ("politics", "Politics"),
    ("business", "Business"),
    ("technology", "Technology"),
    ("science", "Science"),
    ("health", "Health"),
    ("sports", "Sports"),
    ("entertainment", "Entertainment"),
];

/// Fixed category list, usually loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCategories {
    categories: Vec<CategorySpec>,
}

impl StaticCategories {
    pub fn new(categories: Vec<CategorySpec>) -> Self {
        Self { categories }
    }

    /// The eight categories the reference deployment ships with.
    pub fn reference() -> Self {
        Self::new(
            REFERENCE_CATEGORIES
                .iter()
                .map(|(slug, name)| CategorySpec::new(*slug, *name))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl KnownCategories for StaticCategories {
    fn categories(&self) -> Vec<CategorySpec> {
        self.categories.clone()
    }
}
