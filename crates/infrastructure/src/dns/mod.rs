pub mod exchanger;
pub mod nameservers;
pub mod server;
pub mod transport;
pub mod wire;

pub use exchanger::NetworkExchanger;
pub use nameservers::{exchange_timeout, resolve_nameservers, SystemResolverConfig};
pub use server::{serve_tcp, serve_udp, DnsRequestHandler};
