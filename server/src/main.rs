use unity_material_mcp::{config::ServerConfig, mcp::service::McpService, observability};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    observability::init_tracing();

    let config = ServerConfig::load();
    tracing::info!(transport = %config.transport, "starting unity-material-mcp");

    McpService::new().run(&config).await
}
