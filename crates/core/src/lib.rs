pub mod cache;
pub mod chunker;
pub mod config;
pub mod error;
pub mod format;
pub mod lsa;
pub mod pipeline;
pub mod provider;
pub mod remote;
pub mod text;
pub mod transcript;
pub mod types;

pub use cache::{get_cache_dir, get_response_path, load_response, save_response};
pub use chunker::TextChunker;
pub use config::{ChunkingConfig, LengthTable, LsaConfig, PipelineConfig, RemotePolicy};
pub use error::{ErrorKind, KratkoError, Result};
pub use format::{format_duration, format_response_readable};
pub use lsa::LsaSummarizer;
pub use pipeline::SummarizationPipeline;
pub use provider::InferenceProvider;
pub use remote::{AbstractiveSummarizer, HfInferenceClient, ModelStatus};
pub use transcript::{
    FileTranscriptSource, InlineTranscriptSource, StdinTranscriptSource, TranscriptSource,
};
pub use types::{
    PipelineMetadata, PipelineOutput, PipelinePath, SummarizeResponse, SummaryLength, Transcript,
};
