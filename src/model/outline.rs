//! Heading hierarchy, the data side of the dashboard's structure diagram.

use super::Heading;
use serde::{Deserialize, Serialize};

/// A hierarchical view of the document headings.
///
/// Only levels 1 and 2 participate; deeper headings add noise to the diagram
/// without improving its structure. Level-2 headings attach to the most recent
/// level-1 heading, or directly to the root when none precedes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Root node carrying the document title
    pub root: OutlineNode,
}

impl Outline {
    /// Build an outline from the document title and its headings.
    pub fn from_headings(title: impl Into<String>, headings: &[Heading]) -> Self {
        let mut root = OutlineNode::new(title, 0);

        for heading in headings {
            let text = heading.text.trim();
            if text.is_empty() || heading.level > 2 {
                continue;
            }

            let node = OutlineNode::new(text, heading.level);
            if heading.level == 1 {
                root.children.push(node);
            } else {
                match root.children.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root.children.push(node),
                }
            }
        }

        Self { root }
    }

    /// Total number of nodes, including the root.
    pub fn total_nodes(&self) -> usize {
        fn count(node: &OutlineNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

/// A single node in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Heading text (document title for the root)
    pub text: String,

    /// Heading level; 0 for the root
    pub level: u8,

    /// Child nodes
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a new node without children.
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            level,
            children: Vec::new(),
        }
    }
}
