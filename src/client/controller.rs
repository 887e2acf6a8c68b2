use super::api::{ChunkApi, ChunkForm, SelectedFile};
use super::page::{Page, StrategyOption};
use super::ClientError;
use crate::dto::strategy::StrategyCatalog;

pub const UPLOAD_FAILED_ALERT: &str = "Failed to extract text from PDF.";
pub const CHUNK_FAILED_ALERT: &str = "Chunking failed.";

/// Receives blocking, user-facing alerts.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// What a handler did with the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do; no request was made.
    Skipped,
    /// The response was reflected into the page.
    Rendered,
    /// The response lacked the expected field and an alert was raised.
    Alerted,
}

pub struct Controller<A, N> {
    api: A,
    notifier: N,
    page: Page,
    strategies: StrategyCatalog,
    current_text: String,
}

impl<A: ChunkApi, N: Notifier> Controller<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            page: Page::new(),
            strategies: StrategyCatalog::new(),
            current_text: String::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn strategies(&self) -> &StrategyCatalog {
        &self.strategies
    }

    /// Text of the last successful extraction.
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    /// Fetches the catalog and fills the strategy select. A failed fetch is
    /// only logged and leaves the page without strategies.
    pub async fn load_strategies(&mut self) {
        let catalog = match self.api.strategies().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Failed to load strategies: {e}");
                return;
            }
        };

        self.page.strategy_options = catalog
            .iter()
            .map(|(key, descriptor)| StrategyOption {
                key: key.to_string(),
                label: descriptor.name.clone(),
            })
            .collect();
        self.page.selected_strategy = catalog.first_key().map(str::to_string);
        self.strategies = catalog;

        tracing::info!("Loaded {} strategies", self.strategies.len());
        self.render_params();
    }

    /// Changes the selected strategy and rebuilds the parameter form.
    /// A key with no matching option leaves nothing selected.
    pub fn select_strategy(&mut self, key: &str) {
        self.page.selected_strategy = self
            .page
            .strategy_options
            .iter()
            .any(|o| o.key == key)
            .then(|| key.to_string());
        self.render_params();
    }

    fn render_params(&mut self) {
        let descriptor = self
            .page
            .selected_strategy
            .as_deref()
            .and_then(|key| self.strategies.get(key));
        self.page.show_strategy(descriptor);
    }

    /// Overwrites a parameter input's value. Returns `false` if the form has
    /// no such input.
    pub fn set_param(&mut self, name: &str, value: &str) -> bool {
        match self.page.params.iter_mut().find(|p| p.name == name) {
            Some(input) => {
                input.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.page.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.page.file = None;
    }

    /// Posts the selected file for extraction. Without a file this is a no-op.
    pub async fn submit_upload(&mut self) -> Result<Outcome, ClientError> {
        let Some(file) = self.page.file.as_ref() else {
            return Ok(Outcome::Skipped);
        };

        tracing::info!("Uploading '{}' ({} bytes)", file.name, file.bytes.len());
        let reply = self.api.upload(file).await?;

        match reply.text.filter(|text| !text.is_empty()) {
            Some(text) => {
                self.page.show_extracted(&text);
                self.current_text = text;
                Ok(Outcome::Rendered)
            }
            None => {
                self.notifier.alert(UPLOAD_FAILED_ALERT);
                Ok(Outcome::Alerted)
            }
        }
    }

    /// Posts the stored text, the selected strategy and every parameter
    /// input's raw value for chunking.
    pub async fn click_chunk(&mut self) -> Result<Outcome, ClientError> {
        let form = ChunkForm {
            text: self.current_text.clone(),
            strategy: self.page.selected_strategy.clone().unwrap_or_default(),
            params: self
                .page
                .params
                .iter()
                .map(|p| (p.name.clone(), p.value.clone()))
                .collect(),
        };

        tracing::info!(
            "Chunking {} chars with '{}'",
            form.text.chars().count(),
            form.strategy
        );
        let reply = self.api.chunk(&form).await?;

        match reply.chunks {
            Some(chunks) => {
                self.page.show_chunks(&chunks);
                Ok(Outcome::Rendered)
            }
            None => {
                self.notifier.alert(CHUNK_FAILED_ALERT);
                Ok(Outcome::Alerted)
            }
        }
    }
}
