use crate::{
    config::{ServerConfig, Transport},
    mcp::tools::register_material_tools,
};
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    model::*,
    tool_handler,
    transport::{
        stdio,
        streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
    },
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

const INSTRUCTIONS: &str = "Unity editor tools. Material tools such as set_material are \
kept for compatibility only and report that material support has been removed.";

#[derive(Debug, Clone)]
pub struct McpService {
    tool_router: ToolRouter<Self>,
}

impl Default for McpService {
    fn default() -> Self {
        Self::new()
    }
}

impl McpService {
    pub fn new() -> Self {
        Self {
            tool_router: register_material_tools(ToolRouter::new()),
        }
    }

    /// Serves on the transport selected by `config` until the peer goes away
    /// or, for HTTP, a shutdown signal arrives.
    pub async fn run(self, config: &ServerConfig) -> anyhow::Result<()> {
        match config.transport {
            Transport::Stdio => self.serve_stdio().await,
            Transport::Http => {
                let shutdown = CancellationToken::new();
                tokio::spawn(cancel_on_signal(shutdown.clone()));
                self.serve_http(config, shutdown).await
            }
        }
    }

    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        let reason = service.waiting().await?;
        tracing::info!(?reason, "stdio session ended");
        Ok(())
    }

    /// Binds `config.bind` and serves at `config.http_path` until `shutdown`
    /// is cancelled.
    pub async fn serve_http(
        self,
        config: &ServerConfig,
        shutdown: CancellationToken,
    ) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(config.bind).await?;
        self.serve_http_on(listener, &config.http_path, shutdown)
            .await
    }

    pub async fn serve_http_on(
        self,
        listener: tokio::net::TcpListener,
        path: &str,
        shutdown: CancellationToken,
    ) -> anyhow::Result<()> {
        tracing::info!(
            "serving MCP over streamable HTTP at http://{}{}",
            listener.local_addr()?,
            path
        );

        axum::serve(listener, self.http_router(path))
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await?;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Axum router exposing this service at `path`.
    pub fn http_router(self, path: &str) -> axum::Router {
        let mcp = StreamableHttpService::new(
            move || Ok(self.clone()),
            LocalSessionManager::default().into(),
            Default::default(),
        );
        let router = if path == "/" {
            axum::Router::new().fallback_service(mcp)
        } else {
            axum::Router::new().nest_service(path, mcp)
        };
        router.layer(CorsLayer::permissive())
    }
}

async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }
    token.cancel();
}

#[tool_handler]
impl ServerHandler for McpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}
