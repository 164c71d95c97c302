//! Configuration resolution for the search client.

mod environment;

pub use environment::{
    from_env, from_env_file, from_lookup, parse_hosts, parse_verify_certs, ELASTIC_API_KEY, ELASTIC_CLOUD_ID,
};

#[cfg(test)]
pub(crate) use environment::ENV_LOCK;
