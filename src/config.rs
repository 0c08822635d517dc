use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use tracing::Level;

use crate::domain::entity::Category;

/// Command line options. Every option can also be set through the
/// environment, including a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "arqueo", about = "Cash reconciliation ledgers with webhook dispatch", version)]
pub struct Config {
    #[arg(long, env = "ARQUEO_BIND", default_value = "127.0.0.1:3001")]
    pub bind: SocketAddr,

    /// Directory holding one JSON snapshot per ledger plus the cash count.
    #[arg(long, env = "ARQUEO_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(
        long,
        env = "ARQUEO_WEBHOOK_URL",
        default_value = "http://localhost:5678/webhook/arqueoN8N"
    )]
    pub webhook_url: String,

    /// Per-category endpoints as `category=url`, comma separated.
    #[arg(
        long = "category-webhook",
        env = "ARQUEO_CATEGORY_WEBHOOKS",
        value_delimiter = ',',
        value_parser = parse_category_webhook
    )]
    pub category_webhooks: Vec<(Category, String)>,

    /// Categories whose whole list is re-sent after every add, delete or clear.
    #[arg(long, env = "ARQUEO_AUTO_DISPATCH", value_delimiter = ',', value_enum)]
    pub auto_dispatch: Vec<Category>,

    #[arg(long, env = "ARQUEO_DISPATCH_TIMEOUT_SECS", default_value_t = 30)]
    pub dispatch_timeout_secs: u64,

    #[arg(long, env = "ARQUEO_LOG_LEVEL", default_value = "info")]
    pub log_level: Level,
}

impl Config {
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::parse()
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }
}

fn parse_category_webhook(value: &str) -> anyhow::Result<(Category, String)> {
    let (category, url) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected `category=url`, got `{value}`"))?;
    let url = url.trim();
    if url.is_empty() {
        return Err(anyhow!("Missing webhook url for `{category}`"));
    }
    Ok((category.trim().parse()?, url.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() -> anyhow::Result<()> {
        let config = Config::try_parse_from(["arqueo"])?;
        assert_eq!("127.0.0.1:3001".parse::<SocketAddr>()?, config.bind);
        assert_eq!(PathBuf::from("data"), config.data_dir);
        assert_eq!(Duration::from_secs(30), config.dispatch_timeout());
        assert_eq!(Level::INFO, config.log_level);
        assert!(config.auto_dispatch.is_empty());
        Ok(())
    }

    #[test]
    fn category_webhooks_and_auto_dispatch() -> anyhow::Result<()> {
        let config = Config::try_parse_from([
            "arqueo",
            "--category-webhook",
            "debitos=http://hooks/debitos,pagos_municipales=http://hooks/pagos",
            "--auto-dispatch",
            "debitos,qr",
            "--log-level",
            "debug",
        ])?;
        assert_eq!(
            vec![
                (Category::Debitos, "http://hooks/debitos".to_string()),
                (Category::PagosMunicipales, "http://hooks/pagos".to_string()),
            ],
            config.category_webhooks
        );
        assert_eq!(vec![Category::Debitos, Category::Qr], config.auto_dispatch);
        assert_eq!(Level::DEBUG, config.log_level);
        Ok(())
    }

    #[test]
    fn malformed_category_webhook_is_rejected() {
        assert!(parse_category_webhook("debitos").is_err());
        assert!(parse_category_webhook("debitos=").is_err());
        assert!(parse_category_webhook("efectivo=http://hooks").is_err());
    }
}
