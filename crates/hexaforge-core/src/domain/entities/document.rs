//! In-memory markup document tree.
//!
//! The tree is engine-agnostic: serialization and parsing live behind the
//! [`DocumentStore`](crate::application::ports::DocumentStore) port. Path
//! expressions are slash separated element names starting at the root
//! (`project/dependencies/dependency`); a leading `/` is accepted.
//!
//! Comments are anchored to elements: the ones just before an element belong
//! to it, the ones after a parent's last child are that parent's trailing
//! comments. Reordering children carries their comments along.

use crate::domain::error::DomainError;

/// One element: name, attributes, optional text and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
    comments: Vec<String>,
    trailing_comments: Vec<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            comments: Vec::new(),
            trailing_comments: Vec::new(),
        }
    }

    /// Element holding only text, e.g. `<groupId>com.acme</groupId>`.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.text = Some(text.into());
        element
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value for the same key.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Comments written immediately before this element.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Comments after the last child, before the closing tag.
    pub fn trailing_comments(&self) -> &[String] {
        &self.trailing_comments
    }

    pub fn add_trailing_comment(&mut self, comment: impl Into<String>) {
        self.trailing_comments.push(comment.into());
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    /// Append a new child and return a handle to it.
    pub fn append_child(&mut self, name: impl Into<String>, text: Option<&str>) -> &mut Element {
        let mut child = Self::new(name);
        child.text = text.map(str::to_string);
        self.push(child)
    }

    /// Append an already built child and return a handle to it.
    pub fn push(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Insert `child` at `index` (clamped to the child count).
    pub fn insert(&mut self, index: usize, child: Element) -> &mut Element {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
        &mut self.children[index]
    }

    /// Return the first child named `name`, appending it when missing.
    pub fn child_or_append(&mut self, name: &str) -> &mut Element {
        match self.children.iter().position(|c| c.name == name) {
            Some(index) => &mut self.children[index],
            None => self.append_child(name, None),
        }
    }
}

/// A document with at most one root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    root: Option<Element>,
    epilogue: Vec<String>,
}

impl Document {
    /// Empty document without a root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh document with a named root element.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DocumentCreation`] when `root` is not a legal
    /// element name.
    pub fn with_root(root: &str) -> Result<Self, DomainError> {
        if !is_valid_name(root) {
            return Err(DomainError::DocumentCreation {
                reason: format!("'{root}' is not a valid element name"),
            });
        }
        Ok(Self::from_root(Element::new(root)))
    }

    pub fn from_root(root: Element) -> Self {
        Self {
            root: Some(root),
            epilogue: Vec::new(),
        }
    }

    /// Comments after the root element.
    pub fn epilogue(&self) -> &[String] {
        &self.epilogue
    }

    pub fn add_epilogue_comment(&mut self, comment: impl Into<String>) {
        self.epilogue.push(comment.into());
    }

    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.root.as_mut()
    }

    /// All elements matching `path`, in document order.
    pub fn find_elements(&self, path: &str) -> Vec<&Element> {
        let segments = split_path(path);
        let Some((first, rest)) = segments.split_first() else {
            return Vec::new();
        };
        let Some(root) = self.root.as_ref().filter(|r| r.name == *first) else {
            return Vec::new();
        };

        let mut frontier = vec![root];
        for &segment in rest {
            frontier = frontier
                .into_iter()
                .flat_map(move |e| e.children.iter().filter(move |c| c.name == segment))
                .collect();
        }
        frontier
    }

    /// First element matching `path`.
    pub fn find_first_mut(&mut self, path: &str) -> Option<&mut Element> {
        let segments = split_path(path);
        let (first, rest) = segments.split_first()?;
        let mut current = self.root.as_mut().filter(|r| r.name == *first)?;
        for segment in rest {
            current = current.children.iter_mut().find(|c| c.name == *segment)?;
        }
        Some(current)
    }

    /// Append a `tag` child under the first element matching `parent_path`.
    ///
    /// Returns `None` when the parent does not exist.
    pub fn create_element(
        &mut self,
        parent_path: &str,
        tag: &str,
        text: Option<&str>,
    ) -> Option<&mut Element> {
        let parent = self.find_first_mut(parent_path)?;
        Some(parent.append_child(tag, text))
    }

    /// First element matching `path`, creating any missing link of the chain.
    ///
    /// Returns `None` only when the document has no root or the root name
    /// differs from the first path segment.
    pub fn ensure_element(&mut self, path: &str) -> Option<&mut Element> {
        let segments = split_path(path);
        let (first, rest) = segments.split_first()?;
        let mut current = self.root.as_mut().filter(|r| r.name == *first)?;
        for segment in rest {
            current = current.child_or_append(segment);
        }
        Some(current)
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Element names: a letter or `_` first, then letters, digits, `-`, `_`, `.`
/// or `:`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
