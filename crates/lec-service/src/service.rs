use std::future::Future;

use lec_ai::{AiError, AnyTransport, ChatTransport, RemoteAiClient};
use lec_config::AiConfig;
use lec_core::entities::{Assessment, Insights, LessonPlan};
use lec_core::enums::GenerationState;
use lec_core::errors::CoreError;
use lec_core::requests::{AssessmentRequest, InsightsRequest, LessonPlanRequest};
use lec_core::responses::GenerationReport;
use tracing::{debug, warn};

use crate::route::Route;

/// Options injected at construction. Nothing is read from the environment
/// at call time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Attempt remote generation before falling back to local templates.
    pub remote_enabled: bool,
}

impl ServiceOptions {
    #[must_use]
    pub const fn from_config(config: &AiConfig) -> Self {
        Self {
            remote_enabled: config.enabled,
        }
    }
}

/// Single entry point for content generation.
///
/// Each call is independent: when remote generation is enabled it makes one
/// remote attempt, and any failure there is logged and absorbed by falling
/// back to the local generator. The only error a caller can see is a
/// validation failure on the request itself.
#[derive(Debug, Clone)]
pub struct ContentService<T> {
    remote: Option<RemoteAiClient<T>>,
    options: ServiceOptions,
}

impl<T: ChatTransport> ContentService<T> {
    pub const fn new(remote: Option<RemoteAiClient<T>>, options: ServiceOptions) -> Self {
        Self { remote, options }
    }

    /// A service that always generates locally.
    pub const fn local_only() -> Self {
        Self {
            remote: None,
            options: ServiceOptions {
                remote_enabled: false,
            },
        }
    }

    pub const fn options(&self) -> ServiceOptions {
        self.options
    }

    /// Whether calls will try the remote client first.
    pub const fn attempts_remote(&self) -> bool {
        self.options.remote_enabled && self.remote.is_some()
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the request fails its
    /// precondition checks. Remote failures are never returned.
    pub async fn generate_lesson_plan(
        &self,
        request: &LessonPlanRequest,
    ) -> Result<GenerationReport<LessonPlan>, CoreError> {
        request.validate()?;
        Ok(self
            .run(
                "lesson_plan",
                |remote| remote.generate_lesson_plan(request),
                || lec_generator::generate_lesson_plan(request),
            )
            .await)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the request fails its
    /// precondition checks. Remote failures are never returned.
    pub async fn generate_assessment(
        &self,
        request: &AssessmentRequest,
    ) -> Result<GenerationReport<Assessment>, CoreError> {
        request.validate()?;
        Ok(self
            .run(
                "assessment",
                |remote| remote.generate_assessment(request),
                || lec_generator::generate_assessment(request),
            )
            .await)
    }

    /// Insights requests are always valid; empty record lists produce the
    /// no-data objects.
    pub async fn generate_educational_insights(
        &self,
        request: &InsightsRequest,
    ) -> GenerationReport<Insights> {
        self.run(
            "insights",
            |remote| remote.generate_insights(request),
            || lec_generator::generate_insights(request),
        )
        .await
    }

    /// Content only, without the route diagnostic.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_lesson_plan`].
    pub async fn lesson_plan(&self, request: &LessonPlanRequest) -> Result<LessonPlan, CoreError> {
        self.generate_lesson_plan(request).await.map(|r| r.content)
    }

    /// Content only, without the route diagnostic.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_assessment`].
    pub async fn assessment(&self, request: &AssessmentRequest) -> Result<Assessment, CoreError> {
        self.generate_assessment(request).await.map(|r| r.content)
    }

    async fn run<'a, C, R, Fut>(
        &'a self,
        kind: &'static str,
        remote_call: R,
        local_call: impl FnOnce() -> C,
    ) -> GenerationReport<C>
    where
        R: FnOnce(&'a RemoteAiClient<T>) -> Fut,
        Fut: Future<Output = Result<C, AiError>>,
    {
        let mut route = Route::start();
        let mut fallback_reason = None;

        match self.remote.as_ref() {
            Some(remote) if self.options.remote_enabled => {
                route.advance(GenerationState::AttemptingRemote);
                match remote_call(remote).await {
                    Ok(content) => {
                        route.advance(GenerationState::Succeeded);
                        route.advance(GenerationState::Done);
                        debug!(kind, "remote generation succeeded");
                        return GenerationReport {
                            content,
                            route: route.into_states(),
                            fallback_reason: None,
                        };
                    }
                    Err(error) => {
                        warn!(kind, %error, "remote generation failed; using local templates");
                        fallback_reason = Some(error.to_string());
                    }
                }
            }
            None if self.options.remote_enabled => {
                debug!(kind, "remote generation enabled but no client is configured");
            }
            _ => debug!(kind, "remote generation disabled"),
        }

        route.advance(GenerationState::FallingBackLocal);
        let content = local_call();
        route.advance(GenerationState::Done);
        GenerationReport {
            content,
            route: route.into_states(),
            fallback_reason,
        }
    }
}

impl ContentService<AnyTransport> {
    /// Build the service from the `[ai]` section.
    ///
    /// A transport that cannot be built (for example, enabled without an API
    /// key) is logged and leaves the service generating locally.
    #[must_use]
    pub fn from_config(config: &AiConfig) -> Self {
        let options = ServiceOptions::from_config(config);
        if !options.remote_enabled {
            return Self::new(None, options);
        }
        match AnyTransport::from_config(config) {
            Ok(transport) => {
                debug!(transport = %config.transport, model = %config.model, "remote generation enabled");
                Self::new(Some(RemoteAiClient::new(transport)), options)
            }
            Err(error) => {
                warn!(%error, "remote generation enabled but transport could not be built");
                Self::new(None, options)
            }
        }
    }
}
