//! Debouncing of rapidly changing values.
//!
//! A debouncer observes a source value and publishes it only after the source
//! has held still for a quiet period. Each source change restarts the wait and
//! only the value present when the wait completes is published.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Derived value produced by [`spawn_debouncer`].
///
/// Dropping it stops the debouncer task; a pending wait is discarded and
/// nothing is published afterwards.
#[derive(Debug)]
pub struct Debounced<T> {
    receiver: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T: Clone> Debounced<T> {
    /// Most recently published value.
    pub fn get(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Receiver notified each time a new value is published.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.receiver.clone()
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a debouncer publishing `source` after it is stable for `quiet`.
///
/// The derived value starts out equal to the source's current value. Publishing
/// a value equal to the derived value does not notify observers. The task ends
/// when the source sender is dropped or the returned [`Debounced`] is dropped.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_debouncer<T>(mut source: watch::Receiver<T>, quiet: Duration) -> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let initial = source.borrow_and_update().clone();
    let (output, receiver) = watch::channel(initial);

    let task = tokio::spawn(async move {
        run_debounce_loop(source, output, quiet).await;
    });

    Debounced { receiver, task }
}

async fn run_debounce_loop<T>(
    mut source: watch::Receiver<T>,
    output: watch::Sender<T>,
    quiet: Duration,
) where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            changed = source.changed() => {
                if changed.is_err() {
                    break;
                }
                deadline = Some(Instant::now() + quiet);
            }
            () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                let settled = source.borrow_and_update().clone();
                output.send_if_modified(|current| {
                    if *current == settled {
                        false
                    } else {
                        *current = settled;
                        true
                    }
                });
            }
        }
    }

    if deadline.is_some() {
        tracing::trace!("Debouncer stopped with a pending value, discarding it");
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;
    use crate::input::SearchInput;

    const QUIET: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_burst_publishes_final_value_once() {
        let input = SearchInput::default();
        let debounced = spawn_debouncer(input.subscribe(), QUIET);
        let mut published = debounced.subscribe();

        input.set("b");
        sleep(Duration::from_millis(100)).await;
        input.set("ba");
        sleep(Duration::from_millis(100)).await;
        input.set("bat");

        sleep(Duration::from_millis(499)).await;
        assert!(!published.has_changed().unwrap());
        assert_eq!(debounced.get(), "");

        sleep(Duration::from_millis(2)).await;
        assert!(published.has_changed().unwrap());
        assert_eq!(*published.borrow_and_update(), "bat");

        sleep(Duration::from_secs(5)).await;
        assert!(!published.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_change_restarts_wait() {
        let input = SearchInput::default();
        let debounced = spawn_debouncer(input.subscribe(), QUIET);

        for text in ["d", "du", "dun", "dune"] {
            input.set(text);
            sleep(Duration::from_millis(400)).await;
            assert_eq!(debounced.get(), "");
        }

        sleep(Duration::from_millis(101)).await;
        assert_eq!(debounced.get(), "dune");
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_published_value_does_not_notify() {
        let input = SearchInput::new("heat");
        let debounced = spawn_debouncer(input.subscribe(), QUIET);
        let mut published = debounced.subscribe();
        assert_eq!(debounced.get(), "heat");

        input.set("heat 2");
        sleep(Duration::from_millis(50)).await;
        input.set("heat");

        sleep(Duration::from_secs(1)).await;
        assert!(!published.has_changed().unwrap());
        assert_eq!(*published.borrow_and_update(), "heat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_value() {
        let input = SearchInput::default();
        let debounced = spawn_debouncer(input.subscribe(), QUIET);
        let published = debounced.subscribe();

        input.set("late");
        sleep(Duration::from_millis(100)).await;
        drop(debounced);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(*published.borrow(), "");
        assert!(published.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_source_stops_debouncer() {
        let input = SearchInput::default();
        let debounced = spawn_debouncer(input.subscribe(), QUIET);
        let mut published = debounced.subscribe();

        input.set("orphan");
        drop(input);

        assert!(published.changed().await.is_err());
        assert_eq!(*published.borrow(), "");
    }
}
