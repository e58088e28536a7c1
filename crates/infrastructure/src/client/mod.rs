mod assembler;
mod dns_adapter;
mod probe_client;
mod redirect;
mod transport;

pub use assembler::ClientAssembler;
pub use dns_adapter::ResolverDns;
pub use probe_client::{ProbeClient, MAX_REDIRECTS};
pub use transport::ReqwestTransport;
