use regieleki_domain::Config;
use regieleki_infrastructure::repositories::TsvRecordStore;
use std::sync::Arc;

pub struct Repositories {
    pub records: Arc<TsvRecordStore>,
}

impl Repositories {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let records = Arc::new(TsvRecordStore::open(&config.store.path).await?);
        Ok(Self { records })
    }
}
