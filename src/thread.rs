//! Comment thread reconstruction.
//!
//! Comments are stored flat on each task; replies point at their parent via
//! `parentId`. [`CommentForest`] rebuilds the reply tree in two passes over an
//! index arena: first register every comment, then wire children to parents.
//! A comment whose parent is missing from the list is treated as a root
//! instead of being dropped, so a partially damaged thread still renders.

use crate::model::Comment;

/// One rendered comment with its nesting depth, roots at depth 0
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadedComment<'a> {
    pub comment: &'a Comment,
    pub depth: usize,
}

#[derive(Debug)]
struct Node {
    children: Vec<usize>,
}

/// A task's comments arranged as a reply forest.
///
/// Borrows the comment slice; indices into it are the arena handles. Sibling
/// order everywhere is stored order, which for append-only comment lists is
/// chronological.
#[derive(Debug)]
pub struct CommentForest<'a> {
    comments: &'a [Comment],
    nodes: Vec<Node>,
    roots: Vec<usize>,
}

impl<'a> CommentForest<'a> {
    pub fn build(comments: &'a [Comment]) -> Self {
        let mut nodes: Vec<Node> = comments
            .iter()
            .map(|_| Node {
                children: Vec::new(),
            })
            .collect();
        let mut roots = Vec::new();

        // Pass 1: index by id
        let mut by_id = std::collections::HashMap::with_capacity(comments.len());
        for (idx, comment) in comments.iter().enumerate() {
            by_id.insert(comment.id.as_str(), idx);
        }

        // Pass 2: attach each comment under its parent, or as a root when the
        // parent is absent or dangling
        for (idx, comment) in comments.iter().enumerate() {
            let parent = comment
                .parent_id
                .as_deref()
                .and_then(|pid| by_id.get(pid).copied())
                .filter(|&pidx| pidx != idx);
            match parent {
                Some(pidx) => nodes[pidx].children.push(idx),
                None => roots.push(idx),
            }
        }

        Self {
            comments,
            nodes,
            roots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Total number of comments in the forest
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Root comments in stored order
    pub fn roots(&self) -> impl Iterator<Item = &'a Comment> + '_ {
        self.roots.iter().map(|&idx| &self.comments[idx])
    }

    /// Direct replies to `comment_id` in stored order
    pub fn replies(&self, comment_id: &str) -> Vec<&'a Comment> {
        let Some(idx) = self.comments.iter().position(|c| c.id == comment_id) else {
            return Vec::new();
        };
        self.nodes[idx]
            .children
            .iter()
            .map(|&child| &self.comments[child])
            .collect()
    }

    /// Depth-first flattening: every comment exactly once, each root followed
    /// by its whole subtree before the next root starts.
    pub fn flatten(&self) -> Vec<ThreadedComment<'a>> {
        let mut out = Vec::with_capacity(self.comments.len());
        // Children pushed in reverse keeps sibling order on a stack walk
        let mut stack: Vec<(usize, usize)> =
            self.roots.iter().rev().map(|&idx| (idx, 0)).collect();
        while let Some((idx, depth)) = stack.pop() {
            out.push(ThreadedComment {
                comment: &self.comments[idx],
                depth,
            });
            for &child in self.nodes[idx].children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}
