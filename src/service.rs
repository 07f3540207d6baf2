//! Async shell around the controller.
//!
//! A spawned task owns the [`Carousel`] and is the only place it is touched.
//! Timer ticks and commands from [`CarouselHandle`]s are handled one at a
//! time on that task, so two transitions never race. Ticks that fell due
//! before a command arrived are applied before the command.
//!
//! # Example
//!
//! ```rust
//! use carousel::config::CarouselConfig;
//! use carousel::events::CarouselEvent;
//! use carousel::service::CarouselService;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), carousel::service::ServiceError> {
//! let config = CarouselConfig::builder().auto_rotate(false).build()?;
//! let (handle, mut events, task) = CarouselService::spawn(vec!["a", "b", "c"], config);
//!
//! assert_eq!(handle.next().await?, 1);
//! assert_eq!(events.recv().await, Some(CarouselEvent::IndexChanged(1)));
//!
//! handle.dispose().await?;
//! task.await.unwrap();
//! # Ok(())
//! # }
//! ```

use crate::clock::TokioClock;
use crate::config::{CarouselConfig, ConfigError};
use crate::controller::{Carousel, CarouselSnapshot};
use crate::events::CarouselEvent;
use std::ops::ControlFlow;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Commands buffered before senders wait.
pub const COMMAND_BUFFER: usize = 32;

/// Errors returned by [`CarouselHandle`] calls.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Carousel service has stopped")]
    Closed,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

enum Command<T> {
    Next(oneshot::Sender<usize>),
    Previous(oneshot::Sender<usize>),
    GoTo(i64, oneshot::Sender<usize>),
    Pause(oneshot::Sender<()>),
    Resume(oneshot::Sender<()>),
    Select(T, oneshot::Sender<()>),
    SelectCurrent(oneshot::Sender<bool>),
    ReplaceItems(Vec<T>, oneshot::Sender<()>),
    SetAutoRotate(bool, oneshot::Sender<()>),
    SetInterval(Duration, oneshot::Sender<Result<(), ConfigError>>),
    Snapshot(oneshot::Sender<CarouselSnapshot>),
    Dispose(oneshot::Sender<()>),
}

impl<T> Command<T> {
    fn name(&self) -> &'static str {
        match self {
            Self::Next(_) => "next",
            Self::Previous(_) => "previous",
            Self::GoTo(..) => "go_to",
            Self::Pause(_) => "pause",
            Self::Resume(_) => "resume",
            Self::Select(..) => "select",
            Self::SelectCurrent(_) => "select_current",
            Self::ReplaceItems(..) => "replace_items",
            Self::SetAutoRotate(..) => "set_auto_rotate",
            Self::SetInterval(..) => "set_interval",
            Self::Snapshot(_) => "snapshot",
            Self::Dispose(_) => "dispose",
        }
    }
}

/// Cloneable handle for driving a running carousel service.
///
/// Every call waits until the service has applied it. Once the service has
/// stopped, calls return [`ServiceError::Closed`].
pub struct CarouselHandle<T> {
    commands: mpsc::Sender<Command<T>>,
}

impl<T> Clone for CarouselHandle<T> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
        }
    }
}

impl<T: Send + 'static> CarouselHandle<T> {
    async fn request<R>(
        &self,
        command: impl FnOnce(oneshot::Sender<R>) -> Command<T>,
    ) -> Result<R, ServiceError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| ServiceError::Closed)?;
        response.await.map_err(|_| ServiceError::Closed)
    }

    /// Show the next item; returns the new index.
    pub async fn next(&self) -> Result<usize, ServiceError> {
        self.request(Command::Next).await
    }

    /// Show the previous item; returns the new index.
    pub async fn previous(&self) -> Result<usize, ServiceError> {
        self.request(Command::Previous).await
    }

    /// Jump to `index` (clamped); returns the new index.
    pub async fn go_to(&self, index: i64) -> Result<usize, ServiceError> {
        self.request(|reply| Command::GoTo(index, reply)).await
    }

    pub async fn pause(&self) -> Result<(), ServiceError> {
        self.request(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<(), ServiceError> {
        self.request(Command::Resume).await
    }

    pub async fn select(&self, item: T) -> Result<(), ServiceError> {
        self.request(|reply| Command::Select(item, reply)).await
    }

    /// Select the displayed item; `false` when the list is empty.
    pub async fn select_current(&self) -> Result<bool, ServiceError> {
        self.request(Command::SelectCurrent).await
    }

    pub async fn replace_items(&self, items: Vec<T>) -> Result<(), ServiceError> {
        self.request(|reply| Command::ReplaceItems(items, reply)).await
    }

    pub async fn set_auto_rotate(&self, enabled: bool) -> Result<(), ServiceError> {
        self.request(|reply| Command::SetAutoRotate(enabled, reply))
            .await
    }

    pub async fn set_interval(&self, interval: Duration) -> Result<(), ServiceError> {
        self.request(|reply| Command::SetInterval(interval, reply))
            .await?
            .map_err(ServiceError::from)
    }

    pub async fn snapshot(&self) -> Result<CarouselSnapshot, ServiceError> {
        self.request(Command::Snapshot).await
    }

    /// Cancel the timer and stop the service.
    pub async fn dispose(&self) -> Result<(), ServiceError> {
        self.request(Command::Dispose).await
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// Task that owns a carousel and serialises its timer with its commands.
pub struct CarouselService<T> {
    carousel: Carousel<T, TokioClock>,
    commands: mpsc::Receiver<Command<T>>,
}

impl<T: Clone + Send + 'static> CarouselService<T> {
    /// Spawn a service on the current tokio runtime.
    ///
    /// Returns the handle, the notification stream and the task. The task
    /// ends after [`CarouselHandle::dispose`] or once every handle is
    /// dropped.
    pub fn spawn(
        items: Vec<T>,
        config: CarouselConfig,
    ) -> (
        CarouselHandle<T>,
        mpsc::UnboundedReceiver<CarouselEvent<T>>,
        JoinHandle<()>,
    ) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);

        let service = Self {
            carousel: Carousel::new(items, config).with_sink(event_tx),
            commands: command_rx,
        };
        let task = tokio::spawn(service.run());

        (
            CarouselHandle {
                commands: command_tx,
            },
            event_rx,
            task,
        )
    }

    async fn run(mut self) {
        let id = self.carousel.id();
        info!(carousel = %id, len = self.carousel.len(), "carousel service started");

        loop {
            let deadline = self.carousel.next_deadline();
            tokio::select! {
                biased;

                _ = wait_until(deadline) => {
                    let fired = self.carousel.poll_timer();
                    debug!(carousel = %id, fired, "auto-advance tick");
                }
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!(carousel = %id, "all handles dropped");
                        break;
                    };
                    self.carousel.poll_timer();
                    if self.handle(command).is_break() {
                        break;
                    }
                }
            }
        }

        self.carousel.dispose();
        info!(carousel = %id, "carousel service stopped");
    }

    fn handle(&mut self, command: Command<T>) -> ControlFlow<()> {
        debug!(carousel = %self.carousel.id(), command = command.name(), "command received");

        // A dropped reply receiver only means the caller stopped waiting.
        match command {
            Command::Next(reply) => {
                self.carousel.go_to_next();
                let _ = reply.send(self.carousel.current_index());
            }
            Command::Previous(reply) => {
                self.carousel.go_to_previous();
                let _ = reply.send(self.carousel.current_index());
            }
            Command::GoTo(index, reply) => {
                self.carousel.go_to_index(index);
                let _ = reply.send(self.carousel.current_index());
            }
            Command::Pause(reply) => {
                self.carousel.pause();
                let _ = reply.send(());
            }
            Command::Resume(reply) => {
                self.carousel.resume();
                let _ = reply.send(());
            }
            Command::Select(item, reply) => {
                self.carousel.select(item);
                let _ = reply.send(());
            }
            Command::SelectCurrent(reply) => {
                let _ = reply.send(self.carousel.select_current());
            }
            Command::ReplaceItems(items, reply) => {
                self.carousel.replace_items(items);
                let _ = reply.send(());
            }
            Command::SetAutoRotate(enabled, reply) => {
                self.carousel.set_auto_rotate(enabled);
                let _ = reply.send(());
            }
            Command::SetInterval(interval, reply) => {
                let _ = reply.send(self.carousel.set_interval(interval));
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.carousel.snapshot());
            }
            Command::Dispose(reply) => {
                self.carousel.dispose();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
