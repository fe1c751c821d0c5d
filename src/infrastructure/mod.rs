// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_probe;
pub mod http_source;

#[cfg(test)]
pub mod test_support;
