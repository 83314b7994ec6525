//! Breadcrumb paths recorded during a root-to-leaf descent.
//!
//! A path stores the child index taken at each level. Nodes are reached by
//! re-walking a prefix of the path from the root, so a path never holds a
//! reference into the tree. A repair step only changes the children of the
//! node it runs on, so the shallower part of the path stays valid.

/// The child indices taken from the root to the node an operation touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumbs {
    indices: Vec<usize>,
}

impl Breadcrumbs {
    /// An empty path, pointing at the root.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Record a step into `children[index]`.
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Append further steps below the current end of the path.
    pub fn extend(&mut self, trail: impl IntoIterator<Item = usize>) {
        self.indices.extend(trail);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Number of steps below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Parent/child steps from the deepest one up to the root.
    ///
    /// Each step yields the path to the parent and the index of the child
    /// within that parent. The root itself is never yielded as a child.
    pub fn ascending(&self) -> impl Iterator<Item = (&[usize], usize)> {
        (0..self.indices.len())
            .rev()
            .map(move |depth| (&self.indices[..depth], self.indices[depth]))
    }
}
