use std::sync::Arc;

use catdog_detector::{
    adapters::{
        http::{router, state::HttpState},
        onnx::{detector::OnnxDetector, model_catalog::OnnxModelCatalog},
    },
    application::{ports::ModelCatalogPort, services::DetectionService},
    config::AppConfig,
    logging::setup_logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    setup_logging(&config.environment);

    tracing::info!(
        environment = config.environment.as_str(),
        model = %config.model.name,
        model_path = %config.model.onnx_path,
        input_size = config.params.input_size,
        conf_threshold = config.params.conf_threshold,
        iou_threshold = config.params.iou_threshold,
        "🔧 Iniciando detector de gatos y perros"
    );

    // Validar el modelo antes de arrancar ONNX Runtime.
    OnnxModelCatalog::new().validate_model(&config.model).await?;

    let detector = {
        let model = config.model.clone();
        let params = config.params.clone();
        let threads = config.intra_threads;
        tokio::task::spawn_blocking(move || OnnxDetector::load(&model, params, threads)).await??
    };

    let detection = Arc::new(DetectionService::new(Arc::new(detector), config.max_upload_bytes));
    let app = router(HttpState { detection });

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Servidor escuchando en http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Servidor detenido");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("No se pudo escuchar ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("No se pudo escuchar SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Señal de apagado recibida");
}
