//! The structs
//!
pub const CATALOG_GROUP_NAME: &str = "SYSCatalogGroup";
pub const COORD_GROUP_NAME: &str = "SYSCoord";
pub const SPARE_GROUP_NAME: &str = "SYSSpare";

/// Group status value for an active group.
pub const GROUP_STATUS_ACTIVE: i32 = 1;
/// Service type of the database service; its name is the svcname of the node.
pub const SERVICE_TYPE_LOCAL: i32 = 0;

/// One group from `list groups`:
/// ```json
/// {
///   "Group": [
///     {
///       "HostName": "sdbserver1",
///       "Status": 1,
///       "dbpath": "/opt/sequoiadb/database/data/11820/",
///       "Service": [
///         { "Type": 0, "Name": "11820" },
///         { "Type": 1, "Name": "11821" },
///         { "Type": 2, "Name": "11822" }
///       ],
///       "NodeID": 1000
///     }
///   ],
///   "GroupID": 1000,
///   "GroupName": "group1",
///   "PrimaryNode": 1000,
///   "Role": 0,
///   "Status": 1,
///   "Version": 2
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Group {
    #[serde(rename = "GroupName")]
    pub group_name: String,
    #[serde(rename = "GroupID", default)]
    pub group_id: i64,
    #[serde(rename = "Role", default)]
    pub role: i32,
    /// Older coordinators do not report a group status.
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(rename = "PrimaryNode", skip_serializing_if = "Option::is_none")]
    pub primary_node: Option<i64>,
    #[serde(rename = "Group", default)]
    pub nodes: Vec<Node>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Node {
    #[serde(rename = "HostName")]
    pub hostname: String,
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(rename = "dbpath", skip_serializing_if = "Option::is_none")]
    pub dbpath: Option<String>,
    #[serde(rename = "Service", default)]
    pub service: Vec<Service>,
    #[serde(rename = "NodeID", skip_serializing_if = "Option::is_none")]
    pub node_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Service {
    #[serde(rename = "Type")]
    pub service_type: i32,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    Data,
    Coord,
    Catalog,
    Unknown(i32),
}

/// Selects groups out of the full listing.
///
/// `GroupFilter::all()` lets everything through; `GroupFilter::data_groups()` keeps only
/// active, populated data groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFilter {
    /// Exact group name; `None` matches every name.
    pub name: Option<String>,
    pub include_catalog: bool,
    pub include_coord: bool,
    pub include_spare: bool,
    /// Only groups with the data role.
    pub data_only: bool,
    /// Only groups with at least one member node.
    pub require_members: bool,
    /// Only groups in active status.
    pub require_active: bool,
}
