//! Concrete adapters behind the domain ports: the virtual clock used by
//! replays and tests, and the tokio-backed clock used by live sessions.

pub mod manual;
pub mod tokio_timer;
