//! The structs
//!
/// The status a healthy node reports.
pub const NODE_STATUS_NORMAL: &str = "Normal";

/// One document of `snapshot health`.
///
/// A reachable node:
/// ```json
/// {
///   "NodeName": "sdbserver1:11820",
///   "GroupName": "group1",
///   "IsPrimary": true,
///   "ServiceStatus": true,
///   "Status": "Normal",
///   "DataStatus": "Normal"
/// }
/// ```
/// The nodes the coordinator could not reach:
/// ```json
/// {
///   "ErrNodes": [
///     { "NodeName": "sdbserver2:11830", "GroupName": "group2", "Flag": -79 }
///   ]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum HealthRecord {
    Unreachable {
        #[serde(rename = "ErrNodes")]
        err_nodes: Vec<UnreachableNode>,
    },
    Node(NodeHealth),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NodeHealth {
    #[serde(rename = "NodeName")]
    pub node_name: String,
    #[serde(rename = "GroupName", skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(rename = "IsPrimary", skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(rename = "ServiceStatus", skip_serializing_if = "Option::is_none")]
    pub service_status: Option<bool>,
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "DataStatus", skip_serializing_if = "Option::is_none")]
    pub data_status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UnreachableNode {
    #[serde(rename = "NodeName")]
    pub node_name: String,
    #[serde(rename = "GroupName", skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// The error code the coordinator got when contacting the node.
    #[serde(rename = "Flag", skip_serializing_if = "Option::is_none")]
    pub flag: Option<i32>,
}

/// A node that failed the business check.
///
/// `address` is empty for a fault of the group as a whole, such as a missing primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNode {
    pub group_name: String,
    pub address: String,
    pub status: String,
}
