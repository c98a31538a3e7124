use anyhow::Context;
use iotap_core::{Config, DumpConfig};
use iotap_stream::{Direction, ReadWriteTap, TraceObserver};
use std::net::SocketAddr;
use tokio::io::copy_bidirectional;
use tokio::net::TcpStream;
use tracing::info;

/// Observers for the client side of a connection, per `dump.read` / `dump.write`.
pub fn client_observers(
    label: &str,
    dump: &DumpConfig,
) -> (Option<TraceObserver>, Option<TraceObserver>) {
    let read = dump
        .read
        .then(|| TraceObserver::new(label, Direction::Read, dump));
    let write = dump
        .write
        .then(|| TraceObserver::new(label, Direction::Write, dump));
    (read, write)
}

/// Relay one client to the configured upstream until either side closes.
///
/// Returns bytes moved client→upstream and upstream→client.
pub async fn relay(
    client: TcpStream,
    peer: SocketAddr,
    config: &Config,
) -> anyhow::Result<(u64, u64)> {
    let upstream_addr = &config.proxy.upstream;
    let mut upstream = TcpStream::connect(upstream_addr)
        .await
        .with_context(|| format!("Failed to connect to upstream {}", upstream_addr))?;
    info!(%peer, upstream = %upstream_addr, "connection opened");

    let (read, write) = client_observers(&peer.to_string(), &config.dump);
    let mut client = ReadWriteTap::new(client, read, write);

    let (from_client, from_upstream) = copy_bidirectional(&mut client, &mut upstream)
        .await
        .with_context(|| format!("Relay for {} failed", peer))?;

    info!(%peer, from_client, from_upstream, "connection closed");
    Ok((from_client, from_upstream))
}
