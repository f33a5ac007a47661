//! Group resolution for fields and harvest events.

use std::collections::HashMap;

use crate::models::{Field, FieldGroup, FieldId, GroupId};

/// O(1) lookup of groups by id.
///
/// Built once per view over the fetched group list. Duplicate ids are not
/// expected; if they occur the last group wins.
#[derive(Debug, Clone, Default)]
pub struct GroupLookup<'a> {
    groups: HashMap<GroupId, &'a FieldGroup>,
}

impl<'a> GroupLookup<'a> {
    pub fn build(groups: &'a [FieldGroup]) -> Self {
        Self {
            groups: groups.iter().map(|g| (g.id, g)).collect(),
        }
    }

    /// Resolves a field's group id. `None` (ungrouped) never hits the map,
    /// and an unknown id resolves as ungrouped.
    pub fn resolve(&self, group_id: Option<GroupId>) -> Option<&'a FieldGroup> {
        group_id.and_then(|id| self.groups.get(&id).copied())
    }

    /// Group owning `field`, if any.
    pub fn group_of(&self, field: &Field) -> Option<&'a FieldGroup> {
        self.resolve(field.group_id)
    }

    /// Display color of a group, empty when ungrouped.
    pub fn color_of(&self, group_id: Option<GroupId>) -> &'a str {
        self.resolve(group_id)
            .map(|g| g.draw_color.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Free-function form of [`GroupLookup::build`].
pub fn build_lookup(groups: &[FieldGroup]) -> GroupLookup<'_> {
    GroupLookup::build(groups)
}

/// Free-function form of [`GroupLookup::resolve`].
pub fn resolve<'a>(group_id: Option<GroupId>, lookup: &GroupLookup<'a>) -> Option<&'a FieldGroup> {
    lookup.resolve(group_id)
}

/// Maps field ids to their owning group.
///
/// Harvest events only carry a field id, so statistics go through this
/// table to attribute an event to a group.
#[derive(Debug, Clone, Default)]
pub struct FieldMembership<'a> {
    owners: HashMap<FieldId, &'a FieldGroup>,
}

impl<'a> FieldMembership<'a> {
    /// Builds membership from the groups' own field references.
    pub fn from_groups(groups: &'a [FieldGroup]) -> Self {
        let owners = groups
            .iter()
            .flat_map(|g| g.fields.iter().map(move |f| (f.id(), g)))
            .collect();
        Self { owners }
    }

    /// Builds membership from the fields' group ids, which take precedence
    /// over the groups' field references. Fields whose group id is unknown
    /// or null are ungrouped.
    pub fn build(fields: &[Field], groups: &'a [FieldGroup]) -> Self {
        let mut membership = Self::from_groups(groups);
        let lookup = GroupLookup::build(groups);
        for field in fields {
            match lookup.group_of(field) {
                Some(group) => {
                    membership.owners.insert(field.id, group);
                }
                None => {
                    membership.owners.remove(&field.id);
                }
            }
        }
        membership
    }

    pub fn group_of(&self, field_id: FieldId) -> Option<&'a FieldGroup> {
        self.owners.get(&field_id).copied()
    }
}
