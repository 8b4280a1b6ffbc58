/// What the frame loop should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Swapchain needs reconfiguring; retry next frame.
    Reconfigured,
    /// Transient hiccup; drop this frame and carry on racing.
    SkipFrame,
    /// Unrecoverable (out of memory); shut the game down cleanly.
    Fatal,
}

impl SurfaceErrorAction {
    /// Maps a wgpu surface error to the loop-level response.
    ///
    /// `Lost`/`Outdated` show up on every alt-tab out of exclusive
    /// fullscreen and on monitor changes, so they must not kill the race.
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_reconfigure() {
        let action = SurfaceErrorAction::classify(&wgpu::SurfaceError::Lost);
        assert_eq!(action, SurfaceErrorAction::Reconfigured);

        let action = SurfaceErrorAction::classify(&wgpu::SurfaceError::Outdated);
        assert_eq!(action, SurfaceErrorAction::Reconfigured);
    }

    #[test]
    fn out_of_memory_is_fatal() {
        let action = SurfaceErrorAction::classify(&wgpu::SurfaceError::OutOfMemory);
        assert_eq!(action, SurfaceErrorAction::Fatal);
    }

    #[test]
    fn timeout_only_skips_the_frame() {
        let action = SurfaceErrorAction::classify(&wgpu::SurfaceError::Timeout);
        assert_eq!(action, SurfaceErrorAction::SkipFrame);
    }
}
