pub mod clock;
pub mod multiplexer;
pub mod relay;
pub mod table;
pub mod transport;
pub mod wire;
pub mod wire_response;

pub use clock::{Clock, ManualClock, SystemClock};
pub use multiplexer::QueryMultiplexer;
pub use relay::{RelayDispatcher, RelayMetrics, RelayMetricsSnapshot};
pub use table::{AnswerTable, TableEntry};
pub use transport::{DatagramTransport, UdpTransport};
