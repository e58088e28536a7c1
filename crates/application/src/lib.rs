//! dnsprobe application layer: ports and the stateful resolver / interceptor.
pub mod ports;
pub mod use_cases;
