use auditflow_core::LogEntry;
use auditflow_pipeline::{LogSink, RunOutcome};
use crossterm::event::{self, Event, KeyEvent};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// Event types for the TUI application
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// An entry was appended to the execution log
    Log(LogEntry),
    RunFinished(RunOutcome),
}

/// Event handler for managing user input, log updates, and periodic ticks
pub struct EventHandler {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
    handlers: Vec<tokio::task::JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::unbounded_channel();
        let input_sender = sender.clone();

        // crossterm polling blocks, so it gets its own thread; it exits once the receiver is gone
        let input = tokio::task::spawn_blocking(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or_else(|| Duration::from_secs(0));

                if let Ok(true) = event::poll(timeout) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == event::KeyEventKind::Press
                            && input_sender.send(AppEvent::Key(key)).is_err()
                        {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_sender.send(AppEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            sender,
            receiver,
            handlers: vec![input],
        }
    }

    /// Forward every new execution log entry as an `AppEvent::Log`
    pub fn follow_log(&mut self, log: &LogSink) {
        let mut feed = log.subscribe();
        let sender = self.sender.clone();

        let forwarder = tokio::spawn(async move {
            loop {
                match feed.recv().await {
                    Ok(entry) => {
                        if sender.send(AppEvent::Log(entry)).is_err() {
                            return;
                        }
                    }
                    // Missed entries are still in the sink; the next one triggers a redraw
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return,
                }
            }
        });
        self.handlers.push(forwarder);
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }

    pub fn sender(&self) -> &mpsc::UnboundedSender<AppEvent> {
        &self.sender
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        for handler in &self.handlers {
            handler.abort();
        }
    }
}
