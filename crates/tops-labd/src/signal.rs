use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancel `token` on Ctrl+C or SIGTERM.
pub fn cancel_on_shutdown(token: CancellationToken) {
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown requested");
        token.cancel();
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
