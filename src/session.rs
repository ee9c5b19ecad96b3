//! Input data model: items, grouping trees, sessions.
//!
//! A card-sorting study presents participants with a catalog of labeled
//! items ("cards") and asks them to arrange the items into named groups,
//! optionally nested. One participant's complete arrangement is a
//! [`Session`]: a forest of [`GroupNode`]s, each holding the items placed
//! directly in it plus any subgroups.
//!
//! The analysis pipeline only ever *reads* completed sessions — it treats
//! them as immutable evidence of which items a participant judged similar.
//! Editing operations (moving a card between groups, renaming, reordering)
//! belong to the data-entry layer upstream and are not modeled here.
//!
//! Well-formedness: a session is assumed to place each item id at most once
//! across its whole forest. The analysis does not verify this, but it is
//! robust to items that appear in no session at all.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item being sorted (a "card"): an opaque identifier plus display text.
///
/// Only the identifier participates in analysis; `label` and `description`
/// exist for the surrounding study manager to render.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Opaque identifier, unique within a catalog.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl Item {
    /// Create an item with a label and no description.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A node in a session's sorting hierarchy.
///
/// Holds the item ids placed *directly* in this node (its local items) and
/// an ordered list of subgroups. Local items do not include the items of
/// child nodes: each level of nesting is an independent grouping judgment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupNode {
    /// Participant-chosen group name (ignored by the analysis).
    pub name: String,
    /// Item ids placed directly in this node.
    pub items: Vec<String>,
    /// Nested subgroups, in participant order.
    pub children: Vec<GroupNode>,
}

impl GroupNode {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the local items.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// Set the subgroups.
    pub fn with_children(mut self, children: Vec<GroupNode>) -> Self {
        self.children = children;
        self
    }

    /// Visit this node and every descendant, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a GroupNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// One participant's complete sorting result: a forest of [`GroupNode`]s.
///
/// Demographic and timing fields recorded at entry time are irrelevant to
/// the analysis and deliberately not modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Session {
    /// Opaque session identifier.
    pub id: String,
    /// Top-level groups. A forest, not a single tree.
    pub groups: Vec<GroupNode>,
}

impl Session {
    /// Create a session from its top-level groups.
    pub fn new(id: impl Into<String>, groups: Vec<GroupNode>) -> Self {
        Self {
            id: id.into(),
            groups,
        }
    }

    /// Visit every node of the forest, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a GroupNode)) {
        for group in &self.groups {
            group.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_session() -> Session {
        Session::new(
            "s1",
            vec![
                GroupNode::new("clothing")
                    .with_items(["shirts", "hoodies"])
                    .with_children(vec![GroupNode::new("outerwear").with_items(["jackets"])]),
                GroupNode::new("help").with_items(["faq"]),
            ],
        )
    }

    #[test]
    fn test_item_builder() {
        let item = Item::new("c1", "Shirts").with_description("All shirt styles");
        assert_eq!(item.id, "c1");
        assert_eq!(item.label, "Shirts");
        assert_eq!(item.description.as_deref(), Some("All shirt styles"));
        assert_eq!(Item::new("c2", "Hoodies").description, None);
    }

    #[test]
    fn test_walk_visits_all_nodes() {
        let session = nested_session();
        let mut names = Vec::new();
        session.walk(&mut |g| names.push(g.name.as_str()));
        assert_eq!(names, ["clothing", "outerwear", "help"]);
    }

    #[test]
    fn test_walk_sees_local_items_only() {
        let session = nested_session();
        let mut locals = Vec::new();
        session.walk(&mut |g| locals.push(g.items.clone()));
        // Parent does not inherit the child's items.
        assert_eq!(locals[0], ["shirts", "hoodies"]);
        assert_eq!(locals[1], ["jackets"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_session_round_trips_through_json() {
        let session = nested_session();
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }
}
