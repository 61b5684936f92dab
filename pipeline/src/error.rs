/// Surfaced from [`Pipeline::run`](crate::pipeline::Pipeline::run): the
/// pipeline stops cooperatively at the first card that fails to start and
/// reports it, rather than aborting the whole process.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("card {index} ({label}) failed to start: {source}")]
    CardStartFailed {
        index: usize,
        label: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
