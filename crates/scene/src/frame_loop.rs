/// Per-frame update loop of one viewer mount.
///
/// Runs from [`FrameLoop::start`] until the first [`FrameLoop::cancel`]. Each
/// start bumps the generation so a stale loop from an earlier mount can be
/// told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
    generation: u32,
}

impl FrameLoop {
    pub fn start(&mut self) {
        self.running = true;
        self.frames = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stop the loop. Returns `true` only for the call that actually stopped it.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Count one frame. Does nothing once cancelled.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.frames += 1;
        }
        self.running
    }

    /// Frames run since the last start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}
