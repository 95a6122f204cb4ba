// vcair-api: Async Rust client for vCloud Air edge gateway services

pub mod client;
pub mod edge_gateway;
pub mod error;
pub mod observer;
pub mod task;
pub mod transport;
pub mod types;
pub mod xml;

pub use client::VcaClient;
pub use edge_gateway::{EdgeGateway, OneToOneMapping};
pub use error::Error;
pub use observer::{NoopObserver, PayloadObserver, TracingObserver};
pub use task::Task;
pub use transport::{TlsMode, TransportConfig};
