/// Seam for the work queue that will execute submitted prompts.
///
/// The server only needs the queue depth to report in status messages; a
/// scheduler plugs in by implementing this trait.
pub trait PromptQueue: Send + Sync {
    /// Number of prompts waiting or running.
    fn remaining(&self) -> usize;
}
