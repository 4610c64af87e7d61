//! Upload-and-validate web server command

use super::{build_session, Outcome};
use crate::server::{self, ServerConfig};
use anyhow::{Context, Result};
use std::net::TcpListener;
use std::sync::Arc;

pub struct ServeArgs {
    pub port: u16,
    pub host: String,
    pub config: String,
}

pub fn run(args: ServeArgs) -> Result<Outcome> {
    let session = Arc::new(build_session(&args.config)?);

    let listener = TcpListener::bind((args.host.as_str(), args.port))
        .with_context(|| format!("Failed to bind {}:{}", args.host, args.port))?;

    log::info!("Starting validator server on {}:{}", args.host, args.port);
    println!("Server running at http://{}:{}/", args.host, args.port);

    server::serve(listener, session, ServerConfig::default())
        .context("Server stopped unexpectedly")?;
    Ok(Outcome::Success)
}
