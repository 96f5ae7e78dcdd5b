use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct SubsEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> SubsEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Loading source configuration...");
        let data = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} inbounds and {} domain map tags",
            data.server_config.inbounds.len(),
            data.domain_map.len()
        );
        self.monitor.log_phase("extract");

        tracing::info!("Generating subscription links...");
        let subs = self.pipeline.transform(data).await?;
        tracing::info!("Generated bundles for {} clients", subs.len());
        self.monitor.log_phase("transform");

        tracing::info!("Writing subscription files...");
        let output_path = self.pipeline.load(subs).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_final();

        Ok(output_path)
    }
}
