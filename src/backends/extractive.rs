//! Local extractive backend: ONNX span-extraction over the context

use async_trait::async_trait;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;
use std::sync::Arc;
use tokenizers::Tokenizer;

use crate::config::ExtractiveConfig;
use crate::error::{Error, Result};
use crate::types::{Answer, Service};

use super::AnswerBackend;

/// Local span-extraction backend
///
/// The model is loaded once at process start and shared across requests.
/// `ort::Session::run` needs exclusive access, so inference is serialized
/// behind a mutex and executed on the blocking pool.
pub struct ExtractiveBackend {
    extractor: Arc<SpanExtractor>,
    model_id: String,
}

impl ExtractiveBackend {
    /// Load the model and tokenizer from the configured directory
    pub fn load(config: &ExtractiveConfig) -> Result<Self> {
        let model_path = config.model_dir.join("model.onnx");
        let tokenizer_path = config.model_dir.join("tokenizer.json");

        if !model_path.exists() || !tokenizer_path.exists() {
            return Err(Error::Config(format!(
                "extractive model files not found in {} (expected model.onnx and tokenizer.json)",
                config.model_dir.display()
            )));
        }

        tracing::info!("Loading extractive model from {}", config.model_dir.display());

        let session = Session::builder()
            .map_err(|e| Error::Config(format!("failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::Config(format!("failed to set optimization level: {e}")))?
            .with_intra_threads(config.intra_threads)
            .map_err(|e| Error::Config(format!("failed to set threads: {e}")))?
            .commit_from_file(&model_path)
            .map_err(|e| Error::Config(format!("failed to load model: {e}")))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::Config(format!("failed to load tokenizer: {e}")))?;

        tracing::info!("Extractive model loaded ({})", config.model_id);

        Ok(Self {
            extractor: Arc::new(SpanExtractor {
                session: Mutex::new(session),
                tokenizer,
                max_seq_len: config.max_seq_len,
                doc_stride: config.doc_stride,
                max_answer_len: config.max_answer_len,
            }),
            model_id: config.model_id.clone(),
        })
    }
}

#[async_trait]
impl AnswerBackend for ExtractiveBackend {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer> {
        let extractor = Arc::clone(&self.extractor);
        let question = question.to_string();
        let context = context.to_string();

        let (span, score) =
            tokio::task::spawn_blocking(move || extractor.best_span(&question, &context))
                .await
                .map_err(|e| Error::Internal(format!("inference task failed: {e}")))??;

        Ok(Answer {
            answer: span,
            confidence: score.clamp(0.0, 1.0),
            model: self.model_id.clone(),
            service: Service::Local,
        })
    }

    fn name(&self) -> &str {
        "local"
    }

    fn model(&self) -> &str {
        &self.model_id
    }
}

/// Tokenization, windowing and span search around the ONNX session
struct SpanExtractor {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    max_seq_len: usize,
    doc_stride: usize,
    max_answer_len: usize,
}

impl SpanExtractor {
    /// Highest-scoring answer span across all context windows
    ///
    /// Long contexts are windowed over the token budget left by the question
    /// with `doc_stride` overlap; the best span across windows wins.
    fn best_span(&self, question: &str, context: &str) -> Result<(String, f32)> {
        let q_enc = self
            .tokenizer
            .encode(question, false)
            .map_err(|e| Error::BackendFailure(format!("question tokenization failed: {e}")))?;
        let c_enc = self
            .tokenizer
            .encode(context, false)
            .map_err(|e| Error::BackendFailure(format!("context tokenization failed: {e}")))?;

        // leave room in the window for the context no matter how long the question is
        let q_budget = self.max_seq_len / 2;
        let q_ids = &q_enc.get_ids()[..q_enc.get_ids().len().min(q_budget)];
        let c_ids = c_enc.get_ids();

        if c_ids.is_empty() {
            return Ok((String::new(), 0.0));
        }

        let cls_id = self
            .tokenizer
            .token_to_id("<s>")
            .or_else(|| self.tokenizer.token_to_id("[CLS]"))
            .unwrap_or(0);
        let sep_id = self
            .tokenizer
            .token_to_id("</s>")
            .or_else(|| self.tokenizer.token_to_id("[SEP]"))
            .unwrap_or(2);

        // specials: <s> question </s> </s> context </s>
        let window = self.max_seq_len.saturating_sub(q_ids.len() + 4).max(1);
        let step = window.saturating_sub(self.doc_stride).max(1);

        let mut best_start = 0usize;
        let mut best_end = 0usize;
        let mut best_score = f32::NEG_INFINITY;

        let mut session = self.session.lock();

        for (win_start, win_end) in plan_windows(c_ids.len(), window, step) {
            let mut input_ids: Vec<u32> = Vec::with_capacity(self.max_seq_len);
            input_ids.push(cls_id);
            input_ids.extend_from_slice(q_ids);
            input_ids.push(sep_id);
            input_ids.push(sep_id);
            let ctx_start = input_ids.len();
            input_ids.extend_from_slice(&c_ids[win_start..win_end]);
            input_ids.push(sep_id);
            let ctx_end = input_ids.len() - 1;

            let (start_probs, end_probs) = run_window(&mut session, &input_ids)?;

            for s in ctx_start..ctx_end {
                let span_limit = (s + self.max_answer_len).min(ctx_end);
                for e in s..span_limit {
                    let score = start_probs[s] * end_probs[e];
                    if score > best_score {
                        best_score = score;
                        best_start = win_start + (s - ctx_start);
                        best_end = win_start + (e - ctx_start);
                    }
                }
            }
        }

        drop(session);

        let answer_ids = &c_ids[best_start..=best_end];
        let answer = self
            .tokenizer
            .decode(answer_ids, true)
            .map_err(|e| Error::BackendFailure(format!("answer decoding failed: {e}")))?;

        Ok((answer.trim().to_string(), best_score.max(0.0)))
    }
}

/// Run one window through the session, returning start/end probabilities
fn run_window(session: &mut Session, input_ids: &[u32]) -> Result<(Vec<f32>, Vec<f32>)> {
    let seq_len = input_ids.len();
    let ids_i64: Vec<i64> = input_ids.iter().map(|&id| id as i64).collect();
    let mask_i64: Vec<i64> = vec![1; seq_len];

    let input_ids_tensor = Tensor::from_array((vec![1, seq_len], ids_i64.into_boxed_slice()))
        .map_err(|e| Error::BackendFailure(format!("input tensor creation failed: {e}")))?;
    let attention_mask_tensor = Tensor::from_array((vec![1, seq_len], mask_i64.into_boxed_slice()))
        .map_err(|e| Error::BackendFailure(format!("mask tensor creation failed: {e}")))?;

    let inputs = vec![
        ("input_ids", input_ids_tensor.into_dyn()),
        ("attention_mask", attention_mask_tensor.into_dyn()),
    ];

    let outputs = session
        .run(inputs)
        .map_err(|e| Error::BackendFailure(format!("inference failed: {e}")))?;

    let output_iter: Vec<_> = outputs.iter().collect();

    let start_logits = extract_logits(&output_iter, "start_logits", 0)?;
    let end_logits = extract_logits(&output_iter, "end_logits", 1)?;

    Ok((softmax(&start_logits), softmax(&end_logits)))
}

/// Pull a named logits tensor out of the session outputs, by name then index
fn extract_logits(
    outputs: &[(&str, ort::value::ValueRef<'_>)],
    name: &str,
    index: usize,
) -> Result<Vec<f32>> {
    let value = outputs
        .iter()
        .find(|(output_name, _)| *output_name == name)
        .or_else(|| outputs.get(index))
        .map(|(_, value)| value)
        .ok_or_else(|| Error::BackendFailure(format!("missing model output: {name}")))?;

    let (_, data) = value
        .try_extract_tensor::<f32>()
        .map_err(|e| Error::BackendFailure(format!("failed to extract {name}: {e}")))?;

    Ok(data.to_vec())
}

/// Numerically stable softmax
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.iter().map(|&e| e / sum).collect()
}

/// Overlapping token windows covering `context_len` tokens
fn plan_windows(context_len: usize, window: usize, step: usize) -> Vec<(usize, usize)> {
    let mut windows = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + window).min(context_len);
        windows.push((start, end));
        if end == context_len {
            break;
        }
        start += step;
    }
    windows
}
