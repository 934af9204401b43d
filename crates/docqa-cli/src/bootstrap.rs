use anyhow::Context;
use docqa_client::HttpAnalysisClient;
use docqa_config::DocqaConfig;
use docqa_session::SessionController;
use tokio::task::JoinHandle;

use crate::cli::GlobalFlags;

/// Load layered config (including `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DocqaConfig> {
    let mut config = DocqaConfig::load_with_dotenv().context("failed to load docqa config")?;
    if let Some(url) = &flags.service_url {
        config = config.with_service_url(url.clone());
        config
            .validate()
            .with_context(|| format!("invalid --service-url '{url}'"))?;
    }
    tracing::debug!(service = %config.service.base_url, "configuration loaded");
    Ok(config)
}

/// Build a controller talking to the configured service over HTTP.
pub fn controller(config: &DocqaConfig) -> anyhow::Result<SessionController<HttpAnalysisClient>> {
    let client = HttpAnalysisClient::new(&config.service)
        .context("failed to build document analysis client")?;
    Ok(SessionController::new(client, config.session.clone()))
}

/// Log every session change at debug level until the controller is dropped.
pub fn spawn_transition_logger<S>(controller: &SessionController<S>) -> JoinHandle<()>
where
    S: docqa_client::AnalysisService,
{
    let mut events = controller.subscribe();
    tokio::spawn(async move {
        use tokio::sync::broadcast::error::RecvError;

        loop {
            match events.recv().await {
                Ok(snapshot) => tracing::debug!(
                    revision = snapshot.revision,
                    phase = %snapshot.phase,
                    transcript = snapshot.transcript.len(),
                    error = snapshot.last_error.as_ref().map(|e| e.kind.as_str()),
                    "session changed"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "session observer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
