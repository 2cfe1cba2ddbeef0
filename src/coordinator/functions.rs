//! The impls and functions
//!
use std::{net::{Ipv6Addr, TcpStream, ToSocketAddrs}, time::{Duration, Instant}};
use log::*;
use serde_json::Value;
use crate::coordinator::{Connection, Coordinator};
use crate::error::{PrecheckError, Result};
use crate::groups::{self, Group};
use crate::health::{self, HealthRecord};

/// The REST service listens on the database service port + 4.
pub const REST_PORT_OFFSET: u16 = 4;

pub const COMMAND_LIST_GROUPS: &str = "list groups";
pub const COMMAND_SNAPSHOT_HEALTH: &str = "snapshot health";

/// Derive the REST port from a numeric service name.
pub fn rest_port_for(
    svcname: &str,
) -> Result<u16>
{
    svcname
        .parse::<u16>()
        .ok()
        .and_then(|port| port.checked_add(REST_PORT_OFFSET))
        .ok_or_else(|| PrecheckError::Connection(format!("service name {} is not a port number, set the REST port explicitly", svcname)))
}

/// The REST url of `hostname`:`port`; an IPv6 literal goes between brackets.
pub fn rest_url(
    hostname: &str,
    port: u16,
) -> String
{
    if hostname.parse::<Ipv6Addr>().is_ok() {
        format!("http://[{}]:{}/", hostname, port)
    } else {
        format!("http://{}:{}/", hostname, port)
    }
}

// the same check as a port scan: can a TCP connection be made to host:port.
fn scan_host_port(
    hostname: &str,
    port: u16,
    timeout: Duration,
) -> bool
{
    let reachable = match (hostname, port).to_socket_addrs() {
        Ok(mut addresses) => addresses.any(|address| TcpStream::connect_timeout(&address, timeout).is_ok()),
        Err(e) => {
            debug!("cannot resolve {}:{}, error: {}", hostname, port, e);
            false
        }
    };
    if !reachable {
        warn!("hostname:port {}:{} cannot be reached", hostname, port);
    }
    reachable
}

impl Connection {
    /// Open a connection to the coordinator `hostname`:`svcname`.
    ///
    /// `rest_port` overrides the REST port derived from `svcname`. The coordinator must accept
    /// a TCP connection on the REST port, otherwise this fails with a connection error.
    pub fn connect(
        hostname: &str,
        svcname: &str,
        rest_port: Option<u16>,
        timeout: Duration,
    ) -> Result<Connection>
    {
        let rest_port = match rest_port {
            Some(rest_port) => rest_port,
            None => rest_port_for(svcname)?,
        };
        info!("connect to coordinator {}:{} (rest port {})", hostname, svcname, rest_port);

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| PrecheckError::Connection(format!("cannot create http client: {}", e)))?;

        if !scan_host_port(hostname, rest_port, timeout) {
            return Err(PrecheckError::Connection(format!("cannot connect to coordinator {}:{} (rest port {})", hostname, svcname, rest_port)));
        }

        Ok(Connection {
            hostname: hostname.to_string(),
            svcname: svcname.to_string(),
            rest_port,
            client,
        })
    }
    pub fn endpoint(&self) -> String {
        rest_url(&self.hostname, self.rest_port)
    }
    /// Send one REST command and return the documents after the reply header.
    fn rest_post(
        &self,
        command: &str,
    ) -> Result<Vec<Value>>
    {
        let response = self.client
            .post(self.endpoint())
            .form(&[("cmd", command)])
            .send()
            .map_err(|e| {
                debug!("Non-Ok response: {} cmd={}", self.endpoint(), command);
                PrecheckError::Query(format!("{}: request to {} failed: {}", command, self.endpoint(), e))
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Non success response: {} cmd={} = {}", self.endpoint(), command, status);
        } else {
            debug!("Success response: {} cmd={} = {}", self.endpoint(), command, status);
        }
        let http_data = response
            .text()
            .map_err(|e| PrecheckError::Query(format!("{}: cannot read reply ({}): {}", command, status, e)))?;

        parse_rest_reply(&http_data, command)
    }
}

impl Coordinator for Connection {
    fn list_groups(&self) -> Result<Vec<Group>> {
        groups::parse_groups(self.rest_post(COMMAND_LIST_GROUPS)?)
    }
    fn snapshot_health(&self) -> Result<Vec<HealthRecord>> {
        health::parse_health(self.rest_post(COMMAND_SNAPSHOT_HEALTH)?)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        info!("release connection to coordinator {}:{}", self.hostname, self.svcname);
    }
}

/// Split a REST reply into its documents.
///
/// The first document is the header; a non-zero `errno` turns into a query error carrying
/// the description and detail of the coordinator.
pub fn parse_rest_reply(
    http_data: &str,
    command: &str,
) -> Result<Vec<Value>>
{
    let timer = Instant::now();
    let mut documents = serde_json::Deserializer::from_str(http_data).into_iter::<Value>();

    let header = match documents.next() {
        Some(Ok(header)) => header,
        Some(Err(e)) => return Err(PrecheckError::Query(format!("{}: cannot parse reply: {}", command, e))),
        None => return Err(PrecheckError::Query(format!("{}: empty reply", command))),
    };
    let errno = header
        .get("errno")
        .and_then(Value::as_i64)
        .ok_or_else(|| PrecheckError::Query(format!("{}: reply has no errno header", command)))?;
    if errno != 0 {
        let description = header.get("description").and_then(Value::as_str).unwrap_or("unknown error");
        let detail = header.get("detail").and_then(Value::as_str).unwrap_or_default();
        return Err(PrecheckError::Query(
            if detail.is_empty() {
                format!("{} failed: errno {}: {}", command, errno, description)
            } else {
                format!("{} failed: errno {}: {}: {}", command, errno, description, detail)
            }
        ));
    }

    let documents = documents
        .collect::<std::result::Result<Vec<Value>, _>>()
        .map_err(|e| PrecheckError::Query(format!("{}: cannot parse reply: {}", command, e)))?;
    debug!("{}: {} documents parsed in {:?}", command, documents.len(), timer.elapsed());

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io::{Read, Write}, net::TcpListener, thread};

    #[test]
    fn unit_rest_port_for_svcname() {
        assert_eq!(rest_port_for("11810").unwrap(), 11814);
        assert!(matches!(rest_port_for("sdbcoord"), Err(PrecheckError::Connection(_))));
        assert!(matches!(rest_port_for("65534"), Err(PrecheckError::Connection(_))));
    }

    #[test]
    fn unit_rest_url() {
        assert_eq!(rest_url("sdb1", 11814), "http://sdb1:11814/");
        assert_eq!(rest_url("192.168.20.1", 11814), "http://192.168.20.1:11814/");
        assert_eq!(rest_url("::1", 11814), "http://[::1]:11814/");
        assert_eq!(rest_url("fe80::1:2", 11814), "http://[fe80::1:2]:11814/");
        assert!(reqwest::Url::parse(&rest_url("::1", 11814)).is_ok());
    }

    #[test]
    fn unit_parse_reply_with_documents() {
        let reply = r#"{ "errno": 0 }{ "GroupName": "group1" }
{ "GroupName": "group2" }"#;
        let documents = parse_rest_reply(reply, COMMAND_LIST_GROUPS).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1]["GroupName"], "group2");
    }

    #[test]
    fn unit_parse_reply_header_only() {
        let documents = parse_rest_reply(r#"{ "errno": 0 }"#, COMMAND_LIST_GROUPS).unwrap();
        assert!(documents.is_empty());
    }

    #[test]
    fn unit_parse_reply_errno() {
        let reply = r#"{ "errno": -154, "description": "The group does not exist", "detail": "" }"#;
        let result = parse_rest_reply(reply, COMMAND_LIST_GROUPS);
        assert_eq!(result, Err(PrecheckError::Query("list groups failed: errno -154: The group does not exist".to_string())));
    }

    #[test]
    fn unit_parse_reply_garbage() {
        assert!(matches!(parse_rest_reply("", COMMAND_LIST_GROUPS), Err(PrecheckError::Query(_))));
        assert!(matches!(parse_rest_reply("<html>", COMMAND_LIST_GROUPS), Err(PrecheckError::Query(_))));
        assert!(matches!(parse_rest_reply(r#"{ "GroupName": "group1" }"#, COMMAND_LIST_GROUPS), Err(PrecheckError::Query(_))));
        assert!(matches!(parse_rest_reply(r#"{ "errno": 0 }{ "GroupName": "#, COMMAND_LIST_GROUPS), Err(PrecheckError::Query(_))));
    }

    #[test]
    fn unit_connect_unreachable_coordinator() {
        // bind and drop to obtain a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let result = Connection::connect("127.0.0.1", "11810", Some(port), Duration::from_secs(2));
        assert!(matches!(result, Err(PrecheckError::Connection(_))));
    }

    // Serves `replies` one per request, skipping connections that send nothing (the reachability check in `connect`).
    fn serve_replies(
        listener: TcpListener,
        replies: Vec<&'static str>,
    ) -> thread::JoinHandle<Vec<String>>
    {
        thread::spawn(move || {
            let mut requests = Vec::new();
            let mut replies = replies.into_iter();
            for stream in listener.incoming() {
                let mut stream = stream.unwrap();
                let request = read_request(&mut stream);
                if request.is_empty() {
                    continue;
                }
                requests.push(request);
                let body = match replies.next() {
                    Some(body) => body,
                    None => break,
                };
                let response = format!("HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}", body.len(), body);
                stream.write_all(response.as_bytes()).unwrap();
                if replies.len() == 0 {
                    break;
                }
            }
            requests
        })
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buffer = [0_u8; 1024];
        loop {
            let read = stream.read(&mut buffer).unwrap_or(0);
            if read == 0 {
                break;
            }
            data.extend_from_slice(&buffer[..read]);
            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") { value.trim().parse::<usize>().ok() } else { None }
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    #[test]
    fn unit_connection_queries_rest_service() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = serve_replies(listener, vec![
            r#"{ "errno": 0 }{ "GroupName": "group1", "GroupID": 1000, "Role": 0, "Group": [ { "HostName": "sdb1", "Service": [ { "Type": 0, "Name": "11820" } ] } ] }"#,
            r#"{ "errno": 0 }{ "NodeName": "sdb1:11820", "IsPrimary": true, "ServiceStatus": true, "Status": "Normal" }"#,
        ]);

        let connection = Connection::connect("127.0.0.1", "11810", Some(port), Duration::from_secs(5)).unwrap();
        let groups = connection.list_groups().unwrap();
        let records = connection.snapshot_health().unwrap();
        drop(connection);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].nodes[0].address(), "sdb1:11820");
        assert_eq!(records.len(), 1);

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("POST / "));
        assert!(requests[0].ends_with("cmd=list+groups"));
        assert!(requests[1].ends_with("cmd=snapshot+health"));
    }
}
