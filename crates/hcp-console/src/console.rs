//! Line-oriented front end over the interaction store.
//!
//! Input is read one line at a time. Chat lines are spawned so a slow
//! agent never blocks typing; `/save` waits for its acknowledgement and
//! then for the user to press Enter. A renderer task follows the store
//! and prints new transcript entries and form changes as they land.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

use hcp_agent::{ChatSync, ChatTransport};
use hcp_core::models::record::InteractionRecord;
use hcp_core::models::state::InteractionState;
use hcp_store::InteractionStore;

use crate::command::{Command, HELP};
use crate::render::{render_field_changes, render_message, render_state};

pub const LOGGED_ACK: &str = "Interaction logged successfully!";
pub const FAILED_ACK: &str = "Error saving interaction.";

/// What has already been written, so each change is printed once.
struct Output<W> {
    writer: W,
    printed: usize,
    record: InteractionRecord,
}

impl<W: Write> Output<W> {
    fn line(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{text}")?;
        self.writer.flush()
    }

    fn catch_up(&mut self, state: &InteractionState) -> std::io::Result<()> {
        for change in render_field_changes(&self.record, &state.record) {
            writeln!(self.writer, "{change}")?;
        }
        self.record = state.record.clone();

        for message in state.transcript.iter().skip(self.printed) {
            writeln!(self.writer, "{}", render_message(message))?;
        }
        self.printed = self.printed.max(state.transcript.len());
        self.writer.flush()
    }
}

/// The application object: owns the store (through its [`ChatSync`]) and
/// the terminal output.
pub struct Console<T, W> {
    sync: ChatSync<T>,
    out: Arc<Mutex<Output<W>>>,
}

impl<T, W> Console<T, W>
where
    T: ChatTransport,
    W: Write + Send + 'static,
{
    pub fn new(transport: T, writer: W) -> Self {
        Self {
            sync: ChatSync::new(transport, InteractionStore::new()),
            out: Arc::new(Mutex::new(Output {
                writer,
                printed: 0,
                record: InteractionRecord::default(),
            })),
        }
    }

    pub fn store(&self) -> &InteractionStore {
        self.sync.store()
    }

    /// Process input until EOF or `/quit`, then wait for every chat
    /// request still in flight before returning.
    pub async fn run<R>(&self, input: R) -> eyre::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let renderer = self.spawn_renderer();
        let mut in_flight = JoinSet::new();

        self.write(HELP)?;

        while let Some(line) = lines.next_line().await? {
            match Command::parse(&line) {
                Command::Chat(text) => {
                    let sync = self.sync.clone();
                    in_flight.spawn(async move { sync.send_chat(text).await });
                }
                Command::Set(patch) => self.store().merge_fields(patch),
                Command::Save => {
                    let outcome = self.sync.log_interaction_direct().await;
                    let ack = if outcome.is_success() {
                        LOGGED_ACK
                    } else {
                        FAILED_ACK
                    };
                    self.write(&format!("{ack} [press Enter]"))?;
                    lines.next_line().await?;
                }
                Command::Show => {
                    let state = self.store().snapshot();
                    self.write(render_state(&state).trim_end())?;
                }
                Command::Help => self.write(HELP)?,
                Command::Quit => break,
                Command::Invalid(message) => self.write(&message)?,
            }

            while let Some(joined) = in_flight.try_join_next() {
                if let Err(e) = joined {
                    warn!(error = %e, "chat task did not complete");
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "chat task did not complete");
            }
        }

        renderer.abort();
        let state = self.store().snapshot();
        self.output().catch_up(&state)?;
        Ok(())
    }

    fn spawn_renderer(&self) -> JoinHandle<()> {
        let mut observer = self.store().subscribe();
        let out = Arc::clone(&self.out);
        tokio::spawn(async move {
            while observer.changed().await {
                let state = observer.snapshot();
                debug!(revision = observer.revision(), "rendering store change");
                let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
                if let Err(e) = out.catch_up(&state) {
                    warn!(error = %e, "failed to render conversation");
                    break;
                }
            }
        })
    }

    fn output(&self) -> MutexGuard<'_, Output<W>> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, text: &str) -> std::io::Result<()> {
        self.output().line(text)
    }
}
