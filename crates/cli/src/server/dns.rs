use dnsrelay_domain::Config;
use dnsrelay_infrastructure::dns::{AnswerTable, RelayDispatcher, SystemClock, UdpTransport};
use std::sync::Arc;
use tracing::info;

pub fn build_dispatcher(config: &Config, table: AnswerTable) -> anyhow::Result<RelayDispatcher> {
    let bind_addr = config.server.socket_addr()?;
    let upstream = config.upstream.socket_addr()?;

    let transport = UdpTransport::bind(bind_addr)?;

    info!(
        bind_address = %bind_addr,
        upstream = %upstream,
        cache_capacity = table.capacity(),
        static_entries = table.static_len(),
        "DNS relay listening"
    );

    Ok(RelayDispatcher::new(
        Arc::new(transport),
        upstream,
        table,
        Arc::new(SystemClock),
    ))
}

pub async fn run_relay(mut dispatcher: RelayDispatcher) {
    dispatcher.run().await;
}
