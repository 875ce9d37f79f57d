// Debounce - Forward a watched value only after a quiet period
use std::time::Duration;
use tokio::sync::watch;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Returns a receiver that sees the latest value of `input` once `input` has
/// been quiet for `delay`. Intermediate values are dropped. The forwarding
/// task stops when either side of the channel pair is gone.
pub fn debounce<T>(mut input: watch::Receiver<T>, delay: Duration) -> watch::Receiver<T>
where
    T: Clone + Send + Sync + 'static,
{
    let initial = input.borrow_and_update().clone();
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        'outer: loop {
            tokio::select! {
                changed = input.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tx.closed() => break,
            }

            // Restart the quiet period on every further change
            loop {
                tokio::select! {
                    changed = input.changed() => {
                        if changed.is_err() {
                            break 'outer;
                        }
                    }
                    _ = tokio::time::sleep(delay) => break,
                }
            }

            let value = input.borrow_and_update().clone();
            if tx.send(value).is_err() {
                break;
            }
        }
        tracing::debug!("Debounce task finished");
    });

    rx
}
