use std::{
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Checks whether the `Todo` server can be reached at all
///
/// # Arguments
/// * `api_url` server address as `host:port`
pub fn has_network_path(api_url: &str) -> bool {
    let addrs = match api_url.to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            log::debug!("Could not resolve {}: {}", api_url, e);
            return false;
        }
    };

    addrs
        .into_iter()
        .any(|addr| TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT).is_ok())
}

pub fn make_api_url(api_url: &str, resource: &str) -> String {
    format!("http://{}/api/{}", api_url, resource)
}
