use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use opgaver_core::progress::ProgressReporter;

const PB_STYLE: &str = "Downloader opgaver: |{bar:40.cyan}| {percent}% || {pos}/{len}";

const PB_CHARS: &str = "█░";

/// Terminal progress bar for the download pipeline.
///
/// Wraps a bar created hidden in `main` and shared with the stderr log writer,
/// which suspends it around every log line. The bar only starts drawing once
/// the pipeline knows its length.
pub struct ProgressBarReporter {
    pb: ProgressBar,
    running: bool,
}

impl ProgressBarReporter {
    pub fn new(pb: ProgressBar) -> Self {
        Self { pb, running: false }
    }
}

impl ProgressReporter for ProgressBarReporter {
    fn start(&mut self, total: u64) {
        if let Ok(style) = ProgressStyle::with_template(PB_STYLE) {
            self.pb.set_style(style.progress_chars(PB_CHARS));
        }
        self.pb.set_length(total);
        self.pb.set_position(0);
        self.pb.set_draw_target(ProgressDrawTarget::stderr());
        self.running = true;
    }

    fn increment(&mut self) {
        if self.running {
            self.pb.inc(1);
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.pb.finish();
            self.running = false;
        }
    }
}

impl Drop for ProgressBarReporter {
    // A fatal error leaves the bar unfinished; keep it on screen as it was
    fn drop(&mut self) {
        if self.running {
            self.pb.abandon();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_template_is_valid() {
        assert!(ProgressStyle::with_template(PB_STYLE).is_ok());
    }

    #[test]
    fn test_counts_on_the_shared_bar() {
        let bar = ProgressBar::hidden();
        let mut reporter = ProgressBarReporter::new(bar.clone());

        reporter.start(3);
        reporter.increment();
        reporter.increment();

        assert_eq!(bar.length(), Some(3));
        assert_eq!(bar.position(), 2);

        reporter.stop();
        assert!(!reporter.running);
        assert!(bar.is_finished());
    }

    #[test]
    fn test_zero_total() {
        let mut reporter = ProgressBarReporter::new(ProgressBar::hidden());
        reporter.start(0);
        reporter.stop();
        assert!(!reporter.running);
    }

    #[test]
    fn test_increment_before_start_is_ignored() {
        let bar = ProgressBar::hidden();
        let mut reporter = ProgressBarReporter::new(bar.clone());
        reporter.increment();
        reporter.stop();
        assert_eq!(bar.position(), 0);
    }
}
