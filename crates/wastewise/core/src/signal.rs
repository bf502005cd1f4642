use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{anyhow, Result};
use tokio::time::sleep;
use tracing::{error, info};

#[derive(Clone, Debug, Default)]
pub struct FunctionSignal {
    is_terminating: Arc<AtomicBool>,
    is_panicked: Arc<AtomicBool>,
}

impl FunctionSignal {
    pub fn trap_on_sigint(&self) -> Result<()> {
        let signal = self.clone();
        ::ctrlc::set_handler(move || signal.terminate())
            .map_err(|error| anyhow!("failed to set SIGINT handler: {error}"))
    }

    pub fn terminate(&self) {
        info!("Gracefully shutting down...");
        self.is_terminating.store(true, Ordering::SeqCst)
    }

    pub fn terminate_on_panic(&self) {
        error!("Panicked! Shutting down...");
        self.is_panicked.store(true, Ordering::SeqCst);
        self.is_terminating.store(true, Ordering::SeqCst)
    }

    pub fn is_terminating(&self) -> bool {
        self.is_terminating.load(Ordering::SeqCst)
    }

    pub fn is_panicked(&self) -> bool {
        self.is_panicked.load(Ordering::SeqCst)
    }

    pub async fn wait_to_terminate(&self) {
        while !self.is_terminating() {
            sleep(Duration::from_millis(100)).await;
        }
    }

    pub fn panic(&self, error: impl ::std::fmt::Display) -> ! {
        error!("{error}");
        self.terminate_on_panic();
        self.exit()
    }

    pub fn exit(&self) -> ! {
        let code = if self.is_panicked() { 1 } else { 0 };
        ::std::process::exit(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[::tokio::test]
    async fn wait_until_terminated() {
        let signal = FunctionSignal::default();
        let waiter = {
            let signal = signal.clone();
            ::tokio::spawn(async move { signal.wait_to_terminate().await })
        };

        assert!(!signal.is_terminating());
        signal.terminate();
        waiter.await.unwrap();
        assert!(signal.is_terminating());
        assert!(!signal.is_panicked());
    }

    #[test]
    fn panic_also_terminates() {
        let signal = FunctionSignal::default();
        signal.terminate_on_panic();
        assert!(signal.is_terminating());
        assert!(signal.is_panicked());
    }
}
