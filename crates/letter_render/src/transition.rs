use std::cell::{Cell, RefCell};
use std::time::Duration;

use log::debug;

use crate::sink::Sink;

/// Duration of a fade in either direction.
pub const FADE_TIME: Duration = Duration::from_millis(1200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Tracks whether the sink is faded in and holds callers for the fade.
///
/// The flag and the sink are updated in the same step, before the delay
/// starts, so the two never disagree.
#[derive(Debug)]
pub struct TransitionController {
    state: Cell<Visibility>,
    fade: Duration,
}

impl TransitionController {
    pub fn new(fade: Duration) -> Self {
        Self { state: Cell::new(Visibility::Hidden), fade }
    }

    pub fn state(&self) -> Visibility {
        self.state.get()
    }

    pub async fn fade_in<S: Sink>(&self, sink: &RefCell<S>) {
        self.transition(sink, Visibility::Visible).await
    }

    pub async fn fade_out<S: Sink>(&self, sink: &RefCell<S>) {
        self.transition(sink, Visibility::Hidden).await
    }

    async fn transition<S: Sink>(&self, sink: &RefCell<S>, target: Visibility) {
        if self.state.get() == target {
            return;
        }

        debug!("fading {:?} over {:?}", target, self.fade);
        self.state.set(target);
        sink.borrow_mut().set_visible(target == Visibility::Visible);
        tokio::time::sleep(self.fade).await;
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(FADE_TIME)
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::task::Poll;

    use tokio::time::Instant;

    use super::*;
    use crate::sink::{MemorySink, SinkEvent};

    // The paused clock lands on the timer's millisecond tick.
    fn assert_fade(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        let slack = Duration::from_millis(2);
        assert!(elapsed >= expected && elapsed < expected + slack, "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn fade_in_waits_once() {
        let sink = RefCell::new(MemorySink::new());
        let controller = TransitionController::default();

        let start = Instant::now();
        controller.fade_in(&sink).await;
        assert_fade(start, FADE_TIME);
        assert_eq!(controller.state(), Visibility::Visible);

        let start = Instant::now();
        controller.fade_in(&sink).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(sink.borrow().events, vec![SinkEvent::Visible(true)]);
    }

    #[tokio::test(start_paused = true)]
    async fn fade_out_waits_once() {
        let sink = RefCell::new(MemorySink::new());
        let controller = TransitionController::new(Duration::from_millis(300));

        // Already hidden.
        let start = Instant::now();
        controller.fade_out(&sink).await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        controller.fade_in(&sink).await;
        let start = Instant::now();
        controller.fade_out(&sink).await;
        assert_fade(start, Duration::from_millis(300));
        let start = Instant::now();
        controller.fade_out(&sink).await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        assert_eq!(sink.borrow().events, vec![SinkEvent::Visible(true), SinkEvent::Visible(false)]);
        assert!(!sink.borrow().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn flag_flips_before_delay() {
        let sink = RefCell::new(MemorySink::new());
        let controller = TransitionController::default();

        let fade = controller.fade_in(&sink);
        tokio::pin!(fade);
        let poll = std::future::poll_fn(|cx| Poll::Ready(fade.as_mut().poll(cx))).await;
        assert!(poll.is_pending());
        assert_eq!(controller.state(), Visibility::Visible);
        assert!(sink.borrow().visible);
        fade.await;
    }
}
