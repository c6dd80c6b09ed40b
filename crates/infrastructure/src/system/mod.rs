pub mod interfaces;
pub mod resolv_conf;
pub mod token;

pub use interfaces::local_addresses;
pub use resolv_conf::{discover_upstreams, parse_nameservers, FALLBACK_UPSTREAMS};
pub use token::load_or_create_token;
