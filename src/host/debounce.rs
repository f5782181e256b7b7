//! Input debouncing
//!
//! The host's only throttle: a query update is forwarded once no newer
//! update has arrived for a quiet period. Purely host-side, applied before
//! any message is sent to the engine.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Forward the latest value from `input` after `delay` of quiet.
///
/// Values superseded within the quiet period are dropped. The returned
/// receiver closes when the input side closes (after flushing any pending
/// value).
pub fn debounce(delay: Duration, mut input: mpsc::Receiver<String>) -> mpsc::Receiver<String> {
    let (output, rx) = mpsc::channel(8);

    tokio::spawn(async move {
        'outer: while let Some(first) = input.recv().await {
            let mut value = first;
            let sleep = tokio::time::sleep(delay);
            tokio::pin!(sleep);
            loop {
                tokio::select! {
                    _ = &mut sleep => {
                        if output.send(value).await.is_err() {
                            return;
                        }
                        continue 'outer;
                    }
                    next = input.recv() => match next {
                        Some(newer) => {
                            value = newer;
                            sleep.as_mut().reset(Instant::now() + delay);
                        }
                        None => {
                            let _ = output.send(value).await;
                            return;
                        }
                    }
                }
            }
        }
    });

    rx
}
