use std::sync::Arc;

use tokio::sync::mpsc;

use crate::clients::ClientError;

/// Completion messages posted by background tasks.
#[derive(Debug)]
pub enum AppEvent {
    WeatherReady {
        date: String,
        report: String,
    },
    AssistantReplied {
        request_id: u64,
        result: Result<String, ClientError>,
    },
}

type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::Sender<AppEvent>,
    waker: Option<Waker>,
}

impl EventBus {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx, waker: None }, rx)
    }

    /// `waker` runs after every emit, e.g. to request a repaint.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub async fn emit(&self, event: AppEvent) {
        let _ = self.tx.send(event).await;
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}
