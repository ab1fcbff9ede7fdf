//! Per-category file slots submitted by the operator.
//!
//! A `FileSet` holds at most one file per [`Category`]. Setting a slot again
//! replaces the previous file, and a category is "ready" exactly when its slot
//! is filled. Readiness is never stored separately, it is always derived from
//! the slots so the two cannot disagree.

use std::collections::BTreeMap;

use serde::Serialize;

use super::category::Category;

/// A file chosen for one category.
///
/// `handle` is whatever the host environment uses to refer to the original
/// file (a `web_sys::File` in the browser). `text` holds the decoded content
/// when the JSON protocol is used; under the multipart protocol the content is
/// never read into memory and `text` stays `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFile<F> {
    pub name: String,
    pub handle: F,
    pub text: Option<String>,
}

impl<F> CategoryFile<F> {
    pub fn with_text(name: impl Into<String>, handle: F, text: String) -> Self {
        Self {
            name: name.into(),
            handle,
            text: Some(text),
        }
    }

    pub fn without_text(name: impl Into<String>, handle: F) -> Self {
        Self {
            name: name.into(),
            handle,
            text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileSet<F> {
    slots: BTreeMap<Category, CategoryFile<F>>,
}

impl<F> Default for FileSet<F> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<F> FileSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `file` for `category`, returning the file it replaced.
    pub fn set(&mut self, category: Category, file: CategoryFile<F>) -> Option<CategoryFile<F>> {
        self.slots.insert(category, file)
    }

    pub fn clear(&mut self, category: Category) -> Option<CategoryFile<F>> {
        self.slots.remove(&category)
    }

    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    pub fn get(&self, category: Category) -> Option<&CategoryFile<F>> {
        self.slots.get(&category)
    }

    pub fn is_ready(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    /// Upload is permitted once at least one category is ready.
    pub fn any_ready(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Ready categories with their files, in [`Category::ALL`] order.
    pub fn ready(&self) -> impl Iterator<Item = (Category, &CategoryFile<F>)> {
        self.slots.iter().map(|(category, file)| (*category, file))
    }

    /// Serializable view of the whole set as `category -> text`, `None` for
    /// empty slots and for slots whose content was never decoded.
    pub fn text_snapshot(&self) -> TextSnapshot<'_> {
        let text_of = |category| self.get(category).and_then(|f| f.text.as_deref());
        TextSnapshot {
            customers: text_of(Category::Customers),
            products: text_of(Category::Products),
            interactions: text_of(Category::Interactions),
        }
    }
}

/// JSON shape of the upload body under the JSON protocol.
#[derive(Debug, Serialize, PartialEq)]
pub struct TextSnapshot<'a> {
    pub customers: Option<&'a str>,
    pub products: Option<&'a str>,
    pub interactions: Option<&'a str>,
}
