//! Request dispatch to answering backends

use std::sync::Arc;

use crate::backends::AnswerBackend;
use crate::context::ContextAssembler;
use crate::error::{Error, Result};
use crate::types::{Answer, AskRequest};

/// Routes ask requests to the configured backends
///
/// Backends are injected once at startup; the local backend is always
/// present, the remote one only when a credential was provisioned.
pub struct Dispatcher {
    local: Arc<dyn AnswerBackend>,
    remote: Option<Arc<dyn AnswerBackend>>,
}

impl Dispatcher {
    /// Create a dispatcher over the process-wide backends
    pub fn new(local: Arc<dyn AnswerBackend>, remote: Option<Arc<dyn AnswerBackend>>) -> Self {
        Self { local, remote }
    }

    /// Whether the remote backend is available for this process
    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Validate the request, assemble its context and delegate to a backend
    ///
    /// Requesting the remote backend without a configured credential fails;
    /// there is no silent fallback to the local backend.
    pub async fn dispatch(&self, request: &AskRequest) -> Result<Answer> {
        if !request.data_type.matches(&request.content) {
            return Err(Error::Validation(format!(
                "data_type '{}' does not match the content shape '{}'",
                request.data_type.as_str(),
                request.content.data_type().as_str(),
            )));
        }

        let context = ContextAssembler::assemble(&request.content);

        if request.use_remote {
            let remote = self.remote.as_ref().ok_or_else(|| {
                Error::BackendUnavailable(
                    "remote backend requested but not configured".to_string(),
                )
            })?;
            remote.answer(&request.question, &context).await
        } else {
            self.local.answer(&request.question, &context).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, NormalizedContent, Service};
    use async_trait::async_trait;
    use serde_json::json;

    struct StubBackend {
        service: Service,
        reply: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl AnswerBackend for StubBackend {
        async fn answer(&self, _question: &str, context: &str) -> Result<Answer> {
            if self.fail {
                return Err(Error::BackendFailure("stub failure".to_string()));
            }
            Ok(Answer {
                answer: format!("{}|{}", self.reply, context),
                confidence: 0.9,
                model: "stub".to_string(),
                service: self.service,
            })
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn local() -> Arc<dyn AnswerBackend> {
        Arc::new(StubBackend {
            service: Service::Local,
            reply: "local",
            fail: false,
        })
    }

    fn remote() -> Arc<dyn AnswerBackend> {
        Arc::new(StubBackend {
            service: Service::Remote,
            reply: "remote",
            fail: false,
        })
    }

    fn request(use_remote: bool) -> AskRequest {
        AskRequest {
            question: "what is a?".to_string(),
            filename: "data.csv".to_string(),
            data_type: DataType::Structured,
            content: NormalizedContent::json(json!([{"a": "1"}])),
            use_remote,
        }
    }

    #[tokio::test]
    async fn remote_requested_without_credential_fails() {
        let dispatcher = Dispatcher::new(local(), None);
        let result = dispatcher.dispatch(&request(true)).await;
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn local_path_is_independent_of_remote_presence() {
        for remote_backend in [None, Some(remote())] {
            let dispatcher = Dispatcher::new(local(), remote_backend);
            let answer = dispatcher.dispatch(&request(false)).await.unwrap();
            assert_eq!(answer.service, Service::Local);
            assert_eq!(answer.answer, "local|a: 1");
        }
    }

    #[tokio::test]
    async fn remote_requested_with_credential_uses_remote() {
        let dispatcher = Dispatcher::new(local(), Some(remote()));
        let answer = dispatcher.dispatch(&request(true)).await.unwrap();
        assert_eq!(answer.service, Service::Remote);
    }

    #[tokio::test]
    async fn tag_mismatch_is_rejected_before_any_backend() {
        let dispatcher = Dispatcher::new(
            Arc::new(StubBackend {
                service: Service::Local,
                reply: "local",
                fail: true,
            }),
            None,
        );
        let mut bad = request(false);
        bad.data_type = DataType::Unstructured;
        let result = dispatcher.dispatch(&bad).await;
        // validation error, not the stub's backend failure
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn backend_failures_surface_unchanged() {
        let dispatcher = Dispatcher::new(
            Arc::new(StubBackend {
                service: Service::Local,
                reply: "local",
                fail: true,
            }),
            None,
        );
        let result = dispatcher.dispatch(&request(false)).await;
        assert!(matches!(result, Err(Error::BackendFailure(_))));
    }
}
