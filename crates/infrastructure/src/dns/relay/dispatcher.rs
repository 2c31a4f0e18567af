use super::metrics::RelayMetrics;
use crate::dns::clock::Clock;
use crate::dns::multiplexer::QueryMultiplexer;
use crate::dns::table::{AnswerTable, Freshness, TableEntry};
use crate::dns::transport::DatagramTransport;
use crate::dns::wire::header::{clear_authoritative, set_id};
use crate::dns::wire::{decode_name, parse_question, Header};
use crate::dns::wire_response::build_cache_hit_response;
use dnsrelay_domain::{DomainError, Session};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The relay's event loop.
///
/// Owns the answer table and the id multiplexer; every datagram is handled
/// to completion before the next is read, so neither needs locking.
pub struct RelayDispatcher {
    transport: Arc<dyn DatagramTransport>,
    upstream: SocketAddr,
    table: AnswerTable,
    multiplexer: QueryMultiplexer,
    clock: Arc<dyn Clock>,
    metrics: Arc<RelayMetrics>,
}

impl RelayDispatcher {
    pub fn new(
        transport: Arc<dyn DatagramTransport>,
        upstream: SocketAddr,
        table: AnswerTable,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            upstream,
            table,
            multiplexer: QueryMultiplexer::new(),
            clock,
            metrics: Arc::new(RelayMetrics::default()),
        }
    }

    pub fn metrics(&self) -> Arc<RelayMetrics> {
        self.metrics.clone()
    }

    pub fn table(&self) -> &AnswerTable {
        &self.table
    }

    pub fn multiplexer(&self) -> &QueryMultiplexer {
        &self.multiplexer
    }

    pub fn upstream(&self) -> SocketAddr {
        self.upstream
    }

    /// Reads and handles datagrams forever. Failures are logged and the
    /// offending datagram dropped; the loop itself never stops.
    pub async fn run(&mut self) {
        loop {
            match self.transport.receive().await {
                Ok((datagram, from)) => {
                    if let Err(e) = self.handle_datagram(datagram, from).await {
                        warn!(client = %from, error = %e, "Dropped datagram");
                    }
                }
                Err(e) => error!(error = %e, "Failed to receive datagram"),
            }
        }
    }

    /// Routes one datagram by its QR bit.
    pub async fn handle_datagram(
        &mut self,
        datagram: Vec<u8>,
        from: SocketAddr,
    ) -> Result<(), DomainError> {
        let header = match Header::parse(&datagram) {
            Ok(header) => header,
            Err(e) => {
                RelayMetrics::incr(&self.metrics.malformed);
                return Err(e);
            }
        };

        if header.is_response() {
            if from != self.upstream {
                RelayMetrics::incr(&self.metrics.unexpected_source);
                return Err(DomainError::UnexpectedSource(from.to_string()));
            }
            self.handle_response(datagram, header).await
        } else {
            self.handle_query(datagram, from).await
        }
    }

    async fn handle_query(
        &mut self,
        mut datagram: Vec<u8>,
        from: SocketAddr,
    ) -> Result<(), DomainError> {
        RelayMetrics::incr(&self.metrics.queries);

        let parsed = match parse_question(&datagram) {
            Ok(parsed) => parsed,
            Err(e) => {
                RelayMetrics::incr(&self.metrics.malformed);
                return Err(e);
            }
        };
        let question = &parsed.question;
        let domain = decode_name(&question.name);
        let record_type = question.record_type();
        debug!(domain = %domain, record_type = %record_type, client = %from, "DNS query received");

        let now = self.clock.now_secs();
        let mut expired = false;
        let reply = match self.table.lookup(question) {
            Some(entry) => match entry.freshness_at(now) {
                Freshness::Permanent => {
                    info!(domain = %domain, record_type = %record_type, rcode = %entry.rcode, "Static answer");
                    Some(build_cache_hit_response(&datagram[..parsed.question_end], entry, None))
                }
                Freshness::Fresh { elapsed } => {
                    info!(domain = %domain, record_type = %record_type, age = elapsed, "Cache hit");
                    Some(build_cache_hit_response(
                        &datagram[..parsed.question_end],
                        entry,
                        Some(elapsed),
                    ))
                }
                Freshness::Expired => {
                    expired = true;
                    None
                }
            },
            None => None,
        };

        if expired {
            info!(domain = %domain, record_type = %record_type, "Cache entry expired");
            RelayMetrics::incr(&self.metrics.cache_outdated);
            self.table.delete(question);
        }

        if let Some(reply) = reply {
            RelayMetrics::incr(&self.metrics.cache_hits);
            return self.transport.send(&reply, from).await;
        }

        let id = self
            .multiplexer
            .allocate(Session::new(from, parsed.header.id));
        set_id(&mut datagram, id);
        info!(domain = %domain, record_type = %record_type, client_id = parsed.header.id, upstream_id = id, "Cache miss, forwarding upstream");

        RelayMetrics::incr(&self.metrics.remote_sent);
        self.transport.send(&datagram, self.upstream).await
    }

    async fn handle_response(
        &mut self,
        mut datagram: Vec<u8>,
        header: Header,
    ) -> Result<(), DomainError> {
        RelayMetrics::incr(&self.metrics.remote_received);

        if header.opcode() == 0 && header.response_code().is_cacheable() {
            self.cache_response(&datagram);
        } else {
            debug!(opcode = header.opcode(), rcode = %header.response_code(), "Response not cacheable");
        }

        let Some(session) = self.multiplexer.resolve(header.id) else {
            RelayMetrics::incr(&self.metrics.unknown_session);
            return Err(DomainError::UnknownSession(header.id));
        };

        set_id(&mut datagram, session.client_id);
        clear_authoritative(&mut datagram);
        debug!(
            upstream_id = header.id,
            client_id = session.client_id,
            client = %session.client_addr,
            "Relaying upstream response"
        );
        self.transport.send(&datagram, session.client_addr).await
    }

    fn cache_response(&mut self, datagram: &[u8]) {
        let entry = match TableEntry::from_response(datagram, self.clock.now_secs()) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Not caching upstream response");
                return;
            }
        };

        if self.table.has_static(&entry.question) {
            debug!(domain = %decode_name(&entry.question.name), "Static entry shadows response, not caching");
            return;
        }

        debug!(
            domain = %decode_name(&entry.question.name),
            records = entry.record_count(),
            "Caching upstream response"
        );
        if self.table.insert(entry).is_some() {
            RelayMetrics::incr(&self.metrics.evictions);
        }
        if self.table.capacity() > 0 {
            RelayMetrics::incr(&self.metrics.insertions);
        }
    }
}
