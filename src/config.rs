use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;

const DEFAULT_HTTP_BIND: &str = "127.0.0.1:8000";
const DEFAULT_MAILBOX_CAPACITY: usize = 32;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http_bind_address: SocketAddr,
    pub mailbox_capacity: usize,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            http_bind,
            mailbox_capacity,
        } = args;

        let http_bind_address = match http_bind {
            Some(addr) => addr,
            None => DEFAULT_HTTP_BIND.parse()?,
        };

        let mailbox_capacity = mailbox_capacity.unwrap_or(DEFAULT_MAILBOX_CAPACITY);
        anyhow::ensure!(mailbox_capacity > 0, "mailbox capacity must be at least 1");

        Ok(Self {
            http_bind_address,
            mailbox_capacity,
        })
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "product-store", about = "Product store with optimistic concurrency", version)]
pub struct CliArgs {
    #[arg(
        long,
        env = "PRODUCTS_HTTP_BIND",
        value_name = "ADDR",
        help = "HTTP bind address"
    )]
    pub http_bind: Option<SocketAddr>,

    #[arg(
        long,
        env = "PRODUCTS_MAILBOX_CAPACITY",
        value_name = "N",
        help = "Pending requests buffered in front of the store actor",
        value_parser = clap::value_parser!(usize)
    )]
    pub mailbox_capacity: Option<usize>,
}
