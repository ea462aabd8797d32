//! Generation use case.
//!
//! Owns the studio state, feeds events through the reducer, and executes the
//! resulting commands against the generation client and the history store.

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use harzo_core::history::{HistoryIdGenerator, now_millis};
use harzo_core::{
    BlobCodec, GenerationError, GenerationSettings, HistoryEntry, HistoryRepository,
    ImageGenerator, ImageHandle, Mode,
};
use harzo_infrastructure::DataUriCodec;
use tokio::sync::Mutex;

use crate::orchestrator::{
    AppState, Command, Event, GenerationRequest, Phase, history_entry, transition,
};

/// Use case driving every studio interaction.
///
/// # Concurrency
///
/// The state lock is held only while the reducer runs, never across a network
/// call. A second `Generate` dispatched while one is outstanding observes the
/// in-flight phase and is dropped by the reducer.
pub struct GenerationUseCase {
    generator: Arc<dyn ImageGenerator>,
    history: Arc<dyn HistoryRepository>,
    codec: Arc<dyn BlobCodec>,
    ids: HistoryIdGenerator,
    state: Mutex<AppState>,
}

impl GenerationUseCase {
    pub fn new(generator: Arc<dyn ImageGenerator>, history: Arc<dyn HistoryRepository>) -> Self {
        Self {
            generator,
            history,
            codec: Arc::new(DataUriCodec::new()),
            ids: HistoryIdGenerator::new(),
            state: Mutex::new(AppState::default()),
        }
    }

    /// Starts the session with the given settings instead of the built-in defaults.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.state = Mutex::new(AppState::with_settings(settings));
        self
    }

    pub fn with_codec(mut self, codec: Arc<dyn BlobCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Loads the persisted history into the state snapshot.
    pub async fn load_history(&self) -> AppState {
        self.dispatch(Event::HistoryRefreshed(self.history.list().await))
            .await
    }

    /// Applies an event and runs every command it transitively produces.
    pub async fn dispatch(&self, event: Event) -> AppState {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let commands = {
                let mut state = self.state.lock().await;
                let (next, commands) = transition(std::mem::take(&mut *state), event);
                *state = next;
                commands
            };

            for command in commands {
                if let Some(follow_up) = self.execute(command).await {
                    pending.push_back(follow_up);
                }
            }
        }

        self.snapshot().await
    }

    /// Encodes raw image bytes and makes them the uploaded source image.
    pub async fn upload_image(&self, bytes: &[u8], mime_type: &str) -> AppState {
        let handle = self.codec.encode(bytes, mime_type);
        self.dispatch(Event::UploadImage(handle)).await
    }

    /// Runs one generation in `mode` and returns the stored entry.
    ///
    /// Convenience for one-shot callers: sets up the inputs, triggers, and
    /// turns validation notices and failures into errors.
    pub async fn generate(
        &self,
        mode: Mode,
        prompt: Option<String>,
        image: Option<ImageHandle>,
    ) -> Result<HistoryEntry> {
        self.dispatch(Event::SwitchMode(mode)).await;
        if let Some(prompt) = prompt {
            self.dispatch(Event::EditPrompt(prompt)).await;
        }
        if let Some(image) = image {
            self.dispatch(Event::UploadImage(image)).await;
        }

        let state = self.dispatch(Event::Generate).await;
        match (state.phase, state.last_result) {
            (Phase::Succeeded, Some(entry)) => Ok(entry),
            (Phase::Failed, _) => Err(anyhow!(
                "{} ({})",
                state.notice.unwrap_or_default(),
                state.last_error.unwrap_or_default()
            )),
            _ => Err(anyhow!(
                state
                    .notice
                    .unwrap_or_else(|| format!("{mode} does not generate images"))
            )),
        }
    }

    async fn execute(&self, command: Command) -> Option<Event> {
        match command {
            Command::Generate(request) => Some(self.run_generation(request).await),
            Command::EnhancePrompt(prompt) => match self.generator.enhance_prompt(&prompt).await {
                Ok(enhanced) => Some(Event::PromptEnhanced(enhanced)),
                Err(e) => {
                    tracing::warn!("[Orchestrator] Prompt enhancement failed: {}", e);
                    Some(Event::EnhanceFailed(e.to_string()))
                }
            },
            Command::PersistEntry(entry) => {
                if let Err(e) = self.history.append(entry).await {
                    tracing::error!("[Orchestrator] Failed to persist history entry: {}", e);
                }
                None
            }
            Command::RemoveEntry(id) => {
                if let Err(e) = self.history.remove(&id).await {
                    tracing::error!("[Orchestrator] Failed to remove history entry {}: {}", id, e);
                }
                None
            }
            Command::ClearHistory => {
                if let Err(e) = self.history.clear().await {
                    tracing::error!("[Orchestrator] Failed to clear history: {}", e);
                }
                None
            }
            Command::RefreshHistory => Some(Event::HistoryRefreshed(self.history.list().await)),
        }
    }

    async fn run_generation(&self, request: GenerationRequest) -> Event {
        tracing::info!("[Orchestrator] Generating in {} mode", request.mode);

        match self.call_generator(&request).await {
            Ok(image) => {
                let timestamp = now_millis();
                let id = self.ids.next_id(timestamp);
                tracing::info!("[Orchestrator] Generation {} succeeded", id);
                Event::GenerationSucceeded(history_entry(id, &request, image, timestamp))
            }
            Err(e) => {
                tracing::error!("[Orchestrator] Generation failed: {}", e);
                Event::GenerationFailed(e.to_string())
            }
        }
    }

    async fn call_generator(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<ImageHandle, GenerationError> {
        let source = || {
            request
                .source
                .as_ref()
                .ok_or_else(|| GenerationError::InvalidImage("no source image".to_string()))
        };

        match request.mode {
            Mode::Create => {
                self.generator
                    .generate_image(&request.prompt, &request.settings)
                    .await
            }
            Mode::Transform | Mode::Expand => {
                self.generator
                    .transform_image(source()?, request.instruction(), &request.settings)
                    .await
            }
            Mode::Persona => {
                self.generator
                    .persona_transform(source()?, &request.prompt, &request.settings)
                    .await
            }
            Mode::History => Err(GenerationError::NoImage {
                operation: "history",
            }),
        }
    }
}
