//! The impls and functions
//!
use std::{fmt, time::Instant};
use log::*;
use serde_json::Value;
use crate::coordinator::Coordinator;
use crate::error::{PrecheckError, Result};
use crate::groups::{
    Group, GroupFilter, GroupRole, Node, CATALOG_GROUP_NAME, COORD_GROUP_NAME,
    GROUP_STATUS_ACTIVE, SERVICE_TYPE_LOCAL, SPARE_GROUP_NAME,
};

impl From<i32> for GroupRole {
    fn from(role: i32) -> Self {
        match role {
            0 => GroupRole::Data,
            1 => GroupRole::Coord,
            2 => GroupRole::Catalog,
            other => GroupRole::Unknown(other),
        }
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GroupRole::Unknown(role) => write!(f, "Unknown({})", role),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Node {
    /// The svcname is the name of the local (type 0) service.
    pub fn svcname(&self) -> Option<&str> {
        self.service
            .iter()
            .find(|service| service.service_type == SERVICE_TYPE_LOCAL)
            .map(|service| service.name.as_str())
    }
    /// `hostname:svcname`, which is how the health snapshot names a node.
    pub fn address(&self) -> String {
        format!("{}:{}", self.hostname, self.svcname().unwrap_or("-"))
    }
}

impl Group {
    pub fn role(&self) -> GroupRole {
        GroupRole::from(self.role)
    }
    pub fn is_catalog(&self) -> bool {
        self.role() == GroupRole::Catalog || self.group_name == CATALOG_GROUP_NAME
    }
    pub fn is_coord(&self) -> bool {
        self.role() == GroupRole::Coord || self.group_name == COORD_GROUP_NAME
    }
    pub fn is_spare(&self) -> bool {
        self.group_name == SPARE_GROUP_NAME
    }
    pub fn is_data(&self) -> bool {
        self.role() == GroupRole::Data && !self.is_spare()
    }
    pub fn is_active(&self) -> bool {
        self.status.map_or(true, |status| status == GROUP_STATUS_ACTIVE)
    }
    /// Groups that replicate and therefore must have a primary.
    pub fn is_replicated(&self) -> bool {
        self.is_data() || self.is_catalog()
    }
}

impl GroupFilter {
    pub fn all() -> Self {
        GroupFilter {
            name: None,
            include_catalog: true,
            include_coord: true,
            include_spare: true,
            data_only: false,
            require_members: false,
            require_active: false,
        }
    }
    /// The groups that actually hold data: no catalog, coord or spare group, and only groups
    /// that are active and have members.
    pub fn data_groups() -> Self {
        GroupFilter {
            name: None,
            include_catalog: false,
            include_coord: false,
            include_spare: false,
            data_only: true,
            require_members: true,
            require_active: true,
        }
    }
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
    pub fn matches(&self, group: &Group) -> bool {
        if let Some(name) = &self.name {
            if &group.group_name != name {
                return false;
            }
        }
        if group.is_catalog() && !self.include_catalog {
            return false;
        }
        if group.is_coord() && !self.include_coord {
            return false;
        }
        if group.is_spare() && !self.include_spare {
            return false;
        }
        if self.data_only && !group.is_data() {
            return false;
        }
        if self.require_members && group.nodes.is_empty() {
            return false;
        }
        if self.require_active && !group.is_active() {
            return false;
        }
        true
    }
}

/// Fetch the groups from the coordinator and keep the ones matching `filter`.
pub fn list_groups<C: Coordinator + ?Sized>(
    coordinator: &C,
    filter: &GroupFilter,
) -> Result<Vec<Group>>
{
    info!("begin list groups");
    let timer = Instant::now();

    let groups: Vec<Group> = coordinator
        .list_groups()?
        .into_iter()
        .filter(|group| filter.matches(group))
        .collect();

    info!("end list groups: {} groups, {:?}", groups.len(), timer.elapsed());
    for group in &groups {
        debug!("group {} ({}) id {} with {} nodes", group.group_name, group.role(), group.group_id, group.nodes.len());
    }

    Ok(groups)
}

/// Turn the documents of a `list groups` reply into groups.
pub fn parse_groups(
    documents: Vec<Value>,
) -> Result<Vec<Group>>
{
    documents
        .into_iter()
        .map(|document| {
            serde_json::from_value::<Group>(document)
                .map_err(|e| {
                    debug!("could not parse list groups document, error: {}", e);
                    PrecheckError::Query(format!("list groups: unexpected group document: {}", e))
                })
        })
        .collect()
}
