/// User-facing graphics options for the post-processing layer.
///
/// Owned by the game's settings screen; handed to the pass at creation.
/// The pass may still refuse to run (unsupported hardware, failed target
/// allocation) regardless of what the player selected.
#[derive(Debug, Clone)]
pub struct PostOptions {
    /// Master toggle for the post-processing pipeline.
    pub post_processing: bool,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            post_processing: true,
        }
    }
}
