//! Server command implementation

use anyhow::Result;

pub async fn cmd_serve(host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting SpendGuard web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    let config = spendguard_server::ServerConfig {
        host: host.to_string(),
        port,
    };
    spendguard_server::serve(config).await?;

    Ok(())
}
