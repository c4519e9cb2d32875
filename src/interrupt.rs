use std::future::Future;

use tokio::sync::watch;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Operator interrupt for the whole session.
///
/// One Ctrl-C listener lives as long as the process; the flag it sets stays
/// set, so a signal that arrives between two guarded awaits is still seen by
/// the next one.
#[derive(Clone)]
pub struct Interrupt {
    rx: watch::Receiver<bool>,
}

pub struct InterruptTrigger {
    tx: watch::Sender<bool>,
}

impl InterruptTrigger {
    pub fn fire(&self) {
        self.tx.send_replace(true);
    }
}

impl Interrupt {
    pub fn channel() -> (InterruptTrigger, Self) {
        let (tx, rx) = watch::channel(false);
        (InterruptTrigger { tx }, Self { rx })
    }

    /// Installs the process-wide Ctrl-C listener. Must run inside the runtime.
    pub fn listen_for_ctrl_c() -> Self {
        let (trigger, interrupt) = Self::channel();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    debug!("received interrupt");
                    trigger.fire();
                }
                Err(err) => debug!(error = %err, "unable to listen for interrupts"),
            }
        });
        interrupt
    }

    /// Runs `work` unless the operator interrupts first.
    pub async fn guard<F, T>(&self, work: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        tokio::select! {
            biased;
            _ = fired(self.rx.clone()) => Err(AppError::Interrupted),
            result = work => result,
        }
    }
}

async fn fired(mut rx: watch::Receiver<bool>) {
    let closed = rx.wait_for(|fired| *fired).await.is_err();
    if closed && !*rx.borrow() {
        // Listener gone without firing; nothing can interrupt any more.
        std::future::pending::<()>().await;
    }
}
