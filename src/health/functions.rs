//! The impls and functions
//!
use std::{collections::HashMap, fmt, io::Write, time::Instant};
use log::*;
use colored::*;
use serde_json::Value;
use crate::coordinator::Coordinator;
use crate::error::{PrecheckError, Result};
use crate::groups::{Group, Node};
use crate::health::{ErrorNode, HealthRecord, NodeHealth, NODE_STATUS_NORMAL};

impl fmt::Display for ErrorNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "group: {}, node: {}, status: {}",
               self.group_name,
               if self.address.is_empty() { "-" } else { self.address.as_str() },
               self.status
        )
    }
}

/// The health documents indexed by node name.
#[derive(Debug, Default)]
struct HealthIndex<'a> {
    reachable: HashMap<&'a str, &'a NodeHealth>,
    unreachable: HashMap<&'a str, Option<i32>>,
}

impl<'a> HealthIndex<'a> {
    fn new(records: &'a [HealthRecord]) -> Self {
        let mut index = HealthIndex::default();
        for record in records {
            match record {
                HealthRecord::Node(node_health) => {
                    index.reachable.insert(node_health.node_name.as_str(), node_health);
                }
                HealthRecord::Unreachable { err_nodes } => {
                    for err_node in err_nodes {
                        index.unreachable.insert(err_node.node_name.as_str(), err_node.flag);
                    }
                }
            }
        }
        index
    }
    /// `None` if the node is healthy, otherwise the status to report.
    fn fault(
        &self,
        group: &Group,
        node: &Node,
    ) -> Option<String>
    {
        let address = node.address();
        if let Some(flag) = self.unreachable.get(address.as_str()) {
            return Some(match flag {
                Some(flag) => format!("unreachable (flag {})", flag),
                None => "unreachable".to_string(),
            });
        }
        match self.reachable.get(address.as_str()) {
            // coordinator nodes do not report into the health snapshot.
            None if group.is_replicated() => Some("no health record".to_string()),
            None => None,
            Some(node_health) if node_health.service_status == Some(false) => Some("service unavailable".to_string()),
            Some(node_health) => match &node_health.status {
                Some(status) if status != NODE_STATUS_NORMAL => Some(status.to_string()),
                _ => None,
            },
        }
    }
    fn is_primary(
        &self,
        node: &Node,
    ) -> bool
    {
        self.reachable
            .get(node.address().as_str())
            .and_then(|node_health| node_health.is_primary)
            .unwrap_or(false)
    }
}

/// Take a health snapshot and return the nodes of `groups` that are not healthy.
///
/// With `strict` every faulty node is returned, and a replicated group without a healthy
/// primary is reported as a group fault. Without `strict` only the faulty nodes of groups
/// that lost the majority of their members are returned.
pub fn check_business<C: Coordinator + ?Sized>(
    coordinator: &C,
    groups: &[Group],
    strict: bool,
) -> Result<Vec<ErrorNode>>
{
    info!("begin check business");
    let timer = Instant::now();

    let records = coordinator.snapshot_health()?;
    let error_nodes = evaluate_business(groups, &records, strict);

    for error_node in &error_nodes {
        warn!("{}", error_node);
    }
    info!("end check business: {} error nodes, {:?}", error_nodes.len(), timer.elapsed());

    Ok(error_nodes)
}

pub fn evaluate_business(
    groups: &[Group],
    records: &[HealthRecord],
    strict: bool,
) -> Vec<ErrorNode>
{
    let index = HealthIndex::new(records);
    let mut error_nodes = Vec::new();

    for group in groups {
        let mut faults = Vec::new();
        let mut healthy = 0;
        let mut primary_found = false;

        for node in &group.nodes {
            match index.fault(group, node) {
                Some(status) => faults.push(ErrorNode {
                    group_name: group.group_name.clone(),
                    address: node.address(),
                    status,
                }),
                None => {
                    healthy += 1;
                    primary_found |= index.is_primary(node);
                }
            }
        }
        debug!("group {}: {} of {} nodes healthy, primary found: {}", group.group_name, healthy, group.nodes.len(), primary_found);

        if strict {
            error_nodes.append(&mut faults);
            if group.is_replicated() && healthy > 0 && !primary_found {
                error_nodes.push(ErrorNode {
                    group_name: group.group_name.clone(),
                    address: String::new(),
                    status: "no primary".to_string(),
                });
            }
        } else if healthy * 2 <= group.nodes.len() {
            error_nodes.append(&mut faults);
        }
    }

    error_nodes
}

/// Print one line per error node, in red if `colorize` is set.
pub fn print_nodes<W: Write>(
    out: &mut W,
    error_nodes: &[ErrorNode],
    colorize: bool,
) -> std::io::Result<()>
{
    for error_node in error_nodes {
        let line = format!("   {}", error_node);
        if colorize {
            writeln!(out, "{}", line.red())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Turn the documents of a `snapshot health` reply into health records.
pub fn parse_health(
    documents: Vec<Value>,
) -> Result<Vec<HealthRecord>>
{
    documents
        .into_iter()
        .map(|document| {
            serde_json::from_value::<HealthRecord>(document)
                .map_err(|e| {
                    debug!("could not parse snapshot health document, error: {}", e);
                    PrecheckError::Query(format!("snapshot health: unexpected health document: {}", e))
                })
        })
        .collect()
}
