use crate::config::domain_map::load_domain_map;
use crate::config::server_config::ServerConfig;
use crate::core::aggregate::generate_client_subs;
use crate::core::resolver::resolve;
use crate::core::{ConfigProvider, Pipeline, SourceData, Storage, SubscriptionSet};
use crate::utils::error::Result;

pub struct SubscribePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SubscribePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SubscribePipeline<S, C> {
    async fn extract(&self) -> Result<SourceData> {
        tracing::debug!("Reading server config from: {}", self.config.config_path());
        let raw = self.storage.read_file(self.config.config_path()).await?;
        let server_config: ServerConfig = serde_json::from_slice(&raw)?;

        tracing::debug!("Reading domain map from: {}", self.config.domain_map_path());
        let raw = self.storage.read_file(self.config.domain_map_path()).await?;
        let domain_map = load_domain_map(&raw)?;

        Ok(SourceData {
            server_config,
            domain_map,
        })
    }

    async fn transform(&self, data: SourceData) -> Result<SubscriptionSet> {
        let resolved = resolve(&data.server_config, &data.domain_map)?;
        tracing::debug!(
            "Resolved {} vmess / {} trojan inbound models",
            resolved.vmess.len(),
            resolved.trojan.len()
        );

        generate_client_subs(&resolved)
    }

    async fn load(&self, subs: SubscriptionSet) -> Result<String> {
        let output_path = self.config.output_path();

        // 重建輸出目錄，舊的訂閱檔案全部丟棄
        self.storage.remove_dir(output_path).await?;

        for (identity, bundle) in subs.iter() {
            let mut body = String::new();
            for link in &bundle.enc {
                body.push_str(link);
                body.push('\n');
            }
            let path = format!("{}/{}/subscribe", output_path, identity);
            tracing::debug!("Writing {} links to {}", bundle.enc.len(), path);
            self.storage.write_file(&path, body.as_bytes()).await?;
        }

        let mut meta = String::new();
        for (identity, bundle) in subs.iter() {
            meta.push_str(&format!("{}:{:?}\n", identity, bundle.verb));
        }
        self.storage
            .write_file(&format!("{}/meta", output_path), meta.as_bytes())
            .await?;

        Ok(output_path.to_string())
    }
}
