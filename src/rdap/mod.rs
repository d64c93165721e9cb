//! RDAP endpoint knowledge used by the RDAP availability lookup.

pub mod registry;

pub use registry::{rdap_base_url, rdap_domain_url};
