use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use kratko_core::{
    HfInferenceClient, InlineTranscriptSource, KratkoError, PipelineConfig, PipelinePath,
    SummarizationPipeline, SummarizeResponse, SummaryLength, TextChunker, TranscriptSource,
    remote::{InferenceRequest, InferenceTransport, RawResponse, TransportError},
    text::word_count,
};

/// Replays canned responses and records every request body.
struct Replay {
    responses: Mutex<Vec<RawResponse>>,
    requests: Mutex<Vec<InferenceRequest>>,
}

impl Replay {
    fn new(mut responses: Vec<RawResponse>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceTransport for Replay {
    async fn post(
        &self,
        request: &InferenceRequest,
        _timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| TransportError::Connection("connection refused".to_string()))
    }
}

fn lecture(sentences: usize) -> String {
    let subjects = [
        "The borrow checker",
        "Async runtimes",
        "Trait objects",
        "Pattern matching",
        "Cargo workspaces",
    ];
    let details = [
        "rejects dangling references before the program ever runs",
        "schedule thousands of lightweight tasks onto a few threads",
        "trade static dispatch for a vtable lookup at runtime",
        "forces every enum variant to be handled explicitly",
        "share one lockfile across many related packages",
    ];
    (0..sentences)
        .map(|i| {
            format!(
                "{} {} in example number {}.",
                subjects[i % subjects.len()],
                details[(i / subjects.len()) % details.len()],
                i
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

type ReplayPipeline = SummarizationPipeline<HfInferenceClient<Replay>>;

fn replay_pipeline(responses: Vec<RawResponse>) -> ReplayPipeline {
    let config = PipelineConfig::default();
    let client = HfInferenceClient::with_transport(Replay::new(responses), config.remote);
    SummarizationPipeline::new(config, client)
}

fn sent_requests(pipeline: &ReplayPipeline) -> Vec<InferenceRequest> {
    pipeline.remote().transport().requests()
}

#[tokio::test(start_paused = true)]
async fn long_lecture_survives_model_warmup() {
    let pipeline = replay_pipeline(vec![
        RawResponse::new(503, r#"{"error": "loading", "estimated_time": 3.0}"#),
        RawResponse::new(200, r#"[{"summary_text": "Rust is safe and fast."}]"#),
    ]);
    let transcript = InlineTranscriptSource::new(lecture(150)).fetch().await.unwrap();

    let output = pipeline
        .run(&transcript.text, SummaryLength::Medium)
        .await
        .unwrap();

    let requests = sent_requests(&pipeline);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
    assert_eq!(requests[0].parameters.max_length, 150);
    assert_eq!(requests[0].parameters.min_length, 75);
    assert!(word_count(&requests[0].inputs) <= 700);

    assert_eq!(output.summary, "Rust is safe and fast.");
    assert_eq!(output.metadata.path, PipelinePath::Long);
    assert_eq!(output.metadata.original_length, word_count(&transcript.text));
    assert_eq!(output.metadata.api_calls_made, 1);
    assert!(!output.metadata.used_fallback);

    let response = SummarizeResponse::new(output, transcript.source);
    assert_eq!(response.transcript_source, "inline");
}

#[tokio::test(start_paused = true)]
async fn outage_on_long_path_yields_extractive_summary() {
    let pipeline = replay_pipeline(Vec::new());
    let text = lecture(150);

    let output = pipeline.run(&text, SummaryLength::Long).await.unwrap();

    assert_eq!(sent_requests(&pipeline).len(), 5);
    assert!(output.metadata.used_fallback);
    assert!(!output.summary.is_empty());
    for sentence in output.summary.split_inclusive(". ") {
        assert!(text.contains(sentence.trim()));
    }
}

#[tokio::test(start_paused = true)]
async fn outage_on_short_path_is_an_error() {
    let pipeline = replay_pipeline(vec![RawResponse::new(401, "Invalid credentials")]);

    let err = pipeline
        .run(&lecture(10), SummaryLength::Short)
        .await
        .unwrap_err();

    assert!(matches!(err, KratkoError::RemoteUnavailable { .. }));
    assert_eq!(sent_requests(&pipeline).len(), 1);
}

#[test]
fn chunks_cover_a_long_lecture_with_bounded_overlap() {
    let text = lecture(400);
    let chunks = TextChunker::default().chunk_text(&text);

    assert!(chunks.len() > 1);
    let total: usize = chunks.iter().map(|c| word_count(c)).sum();
    assert!(total >= word_count(&text));
    assert!(total <= word_count(&text) + 100 * (chunks.len() - 1));
    assert!(chunks.last().unwrap().ends_with("example number 399."));
}
