// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cache::{ObjectCell, domain_object};
use crate::refs::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagData {
    /// Commit the tag points at, peeled through the tag object.
    pub target: ObjectId,
    /// The tag object itself, for annotated tags.
    pub tag_object: Option<ObjectId>,
}

/// Tag under `refs/tags/`.
pub struct Tag(ObjectCell<TagData>);

domain_object!(Tag, TagData, "tag");

impl Tag {
    #[must_use]
    pub fn target(&self) -> ObjectId {
        self.0.with(|data| data.target.clone())
    }

    #[must_use]
    pub fn tag_object(&self) -> Option<ObjectId> {
        self.0.with(|data| data.tag_object.clone())
    }

    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.0.with(|data| data.tag_object.is_some())
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("refs/tags/{}", self.0.lifetime().name())
    }
}
