//! iotap proxy
//!
//! Accepts TCP clients, relays each one to a fixed upstream, and traces the
//! bytes moving on the client socket through read/write taps.

use anyhow::Context;
use iotap_core::{logging, Config};
use serde::Serialize;
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod args;
mod relay;

use args::Args;

#[derive(Debug, Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    config.apply_env();
    apply_flags(&mut config, args);

    config.validate()?;
    Ok(config)
}

/// Command-line flags win over both the file and the environment.
fn apply_flags(config: &mut Config, args: &Args) {
    if let Some(listen) = &args.listen {
        config.proxy.listen = listen.clone();
    }
    if let Some(upstream) = &args.upstream {
        config.proxy.upstream = upstream.clone();
    }
    if args.json {
        config.logging.json = true;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            println!();
            args::print_usage();
            process::exit(2);
        }
    };

    if args.help {
        args::print_usage();
        return Ok(());
    }

    if args.version_json {
        let info = VersionInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        };
        println!("{}", serde_json::to_string(&info)?);
        return Ok(());
    }

    let config = load_config(&args)?;
    logging::init_with(&config.logging);

    let listener = TcpListener::bind(&config.proxy.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.proxy.listen))?;
    info!(
        listen = %config.proxy.listen,
        upstream = %config.proxy.upstream,
        dump_format = %config.dump.format,
        "iotap-proxy listening"
    );

    let config = Arc::new(config);
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (client, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "accept failed");
                        continue;
                    }
                };
                let config = Arc::clone(&config);
                tokio::spawn(async move {
                    if let Err(e) = relay::relay(client, peer, &config).await {
                        warn!(%peer, error = %format!("{:#}", e), "relay failed");
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args {
            listen: Some("127.0.0.1:17000".to_string()),
            json: true,
            ..Args::default()
        };

        let mut config = Config::default();
        apply_flags(&mut config, &args);

        assert_eq!(config.proxy.listen, "127.0.0.1:17000");
        assert_eq!(config.proxy.upstream, Config::default().proxy.upstream);
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_environment() {
        let args = Args {
            upstream: Some("10.0.0.2:6379".to_string()),
            ..Args::default()
        };

        let mut config = Config::default();
        config.proxy.upstream = "from-env:1".to_string();
        apply_flags(&mut config, &args);

        assert_eq!(config.proxy.upstream, "10.0.0.2:6379");
    }

    #[test]
    fn test_missing_config_file_reported() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/iotap.toml")),
            ..Args::default()
        };

        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/iotap.toml"));
    }

    #[test]
    fn test_empty_upstream_rejected() {
        let args = Args {
            upstream: Some(String::new()),
            ..Args::default()
        };

        assert!(load_config(&args).is_err());
    }
}
