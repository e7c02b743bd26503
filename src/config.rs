//! Environment configuration.
//!
//! The signing secret is read once at process start and never mutated. A
//! missing secret is a deployment misconfiguration and fails startup; there
//! is deliberately no unauthenticated pass-through mode.

use std::{net::SocketAddr, str::FromStr};

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared signing secret used to verify inbound request signatures.
    pub signing_secret: String,
    /// DynamoDB table receiving pending records.
    pub table_name: String,
    /// Address the intake server listens on.
    pub listen_addr: SocketAddr,
    /// Optional AWS region override for the DynamoDB client.
    pub aws_region: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let signing_secret = lookup("SLACK_SIGNING_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "missing SLACK_SIGNING_SECRET: refusing to start without request verification"
                )
            })?;

        let table_name = lookup("INTAKE_TABLE_NAME")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing INTAKE_TABLE_NAME"))?;

        let listen_addr = lookup("INTAKE_LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into());
        let listen_addr = SocketAddr::from_str(&listen_addr)
            .map_err(|err| anyhow::anyhow!("invalid INTAKE_LISTEN_ADDR ({listen_addr}): {err}"))?;

        let aws_region = lookup("AWS_REGION").filter(|s| !s.is_empty());

        Ok(Self {
            signing_secret,
            table_name,
            listen_addr,
            aws_region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn listen_addr_defaults() {
        let cfg = Config::from_lookup(env(&[
            ("SLACK_SIGNING_SECRET", "s3cret"),
            ("INTAKE_TABLE_NAME", "PendingRecords"),
        ]))
        .unwrap();

        assert_eq!(cfg.signing_secret, "s3cret");
        assert_eq!(cfg.table_name, "PendingRecords");
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(cfg.aws_region.is_none());
    }

    #[test]
    fn missing_secret_is_a_startup_error() {
        let err = Config::from_lookup(env(&[("INTAKE_TABLE_NAME", "PendingRecords")]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("SLACK_SIGNING_SECRET"));
    }

    #[test]
    fn empty_secret_is_a_startup_error() {
        let result = Config::from_lookup(env(&[
            ("SLACK_SIGNING_SECRET", ""),
            ("INTAKE_TABLE_NAME", "PendingRecords"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn missing_table_is_a_startup_error() {
        let err = Config::from_lookup(env(&[("SLACK_SIGNING_SECRET", "s3cret")]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("INTAKE_TABLE_NAME"));
    }

    #[test]
    fn invalid_listen_addr_is_rejected() {
        let result = Config::from_lookup(env(&[
            ("SLACK_SIGNING_SECRET", "s3cret"),
            ("INTAKE_TABLE_NAME", "PendingRecords"),
            ("INTAKE_LISTEN_ADDR", "not-an-addr"),
        ]));
        assert!(result.is_err());
    }
}
