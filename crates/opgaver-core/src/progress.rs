/// Receives progress from the download pipeline.
///
/// Purely observational: nothing a reporter does can affect the run. `start`
/// may be called with a total of zero.
pub trait ProgressReporter {
    fn start(&mut self, total: u64);
    fn increment(&mut self);
    fn stop(&mut self);
}

/// Reporter that ignores every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _total: u64) {}
    fn increment(&mut self) {}
    fn stop(&mut self) {}
}
