//! Serve command - expose the push API over HTTP

use geopush::config::GeopushConfig;

/// Serve the push API until interrupted
#[cfg(feature = "server")]
pub fn serve(bind: Option<&str>, config: &GeopushConfig) -> anyhow::Result<()> {
    let store = super::open_store(config)?;
    let bind = bind.unwrap_or(&config.server.bind);
    crate::server::tiny_http::serve(bind, &store, config)
}

/// Serve the push API until interrupted
#[cfg(not(feature = "server"))]
pub fn serve(_bind: Option<&str>, _config: &GeopushConfig) -> anyhow::Result<()> {
    anyhow::bail!("geopush was built without the 'server' feature")
}
