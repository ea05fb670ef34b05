use std::{
    io::{self, BufRead, Write},
    sync::mpsc::{self, Receiver},
    thread,
};

use anyhow::Result;

use crate::{
    domain::{
        chat::{ChatId, ChatStatus},
        events::StoreEvent,
        expert::Expert,
    },
    usecases::{
        auto_reply::{apply_reply, AutoReplyScheduler, PendingReply, ReplyScheduler},
        context::AppContext,
        send_message::{send_message, SendMessageCommand, SendMessageError},
        store::AppStore,
    },
};

use super::render;

const QUIT_COMMAND: &str = "/quit";
const CONSOLE_STDIN_READ_FAILED: &str = "CONSOLE_STDIN_READ_FAILED";

/// Everything the chat loop reacts to, funnelled through one channel so the
/// store is only touched from the loop's thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Line(String),
    Reply(PendingReply),
    Closed,
}

impl From<PendingReply> for SessionInput {
    fn from(reply: PendingReply) -> Self {
        Self::Reply(reply)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

pub struct ChatSession {
    chat_id: ChatId,
    expert_name: String,
    shown: usize,
    events: Receiver<StoreEvent>,
}

impl ChatSession {
    pub fn open(store: &mut AppStore, expert: &Expert) -> Self {
        let events = store.subscribe();
        let chat_id = store.ensure_chat(expert);

        Self {
            chat_id,
            expert_name: expert.name.clone(),
            shown: 0,
            events,
        }
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn handle(
        &mut self,
        store: &mut AppStore,
        input: SessionInput,
        scheduler: &dyn ReplyScheduler,
        out: &mut dyn Write,
    ) -> Result<SessionControl> {
        match input {
            SessionInput::Line(line) if line.trim() == QUIT_COMMAND => Ok(SessionControl::Quit),
            SessionInput::Line(line) => {
                let command = SendMessageCommand {
                    chat_id: self.chat_id,
                    text: line,
                };

                match send_message(store, command) {
                    Ok(_) => {
                        scheduler.schedule(self.chat_id);
                        Ok(SessionControl::Continue)
                    }
                    Err(SendMessageError::EmptyMessage) => Ok(SessionControl::Continue),
                    Err(SendMessageError::ChatNotFound) => {
                        writeln!(out, "Chat unavailable")?;
                        Ok(SessionControl::Quit)
                    }
                }
            }
            SessionInput::Reply(reply) => {
                apply_reply(store, reply);
                Ok(SessionControl::Continue)
            }
            SessionInput::Closed => Ok(SessionControl::Quit),
        }
    }

    /// Drains change notifications and prints messages not shown yet.
    pub fn flush_updates(&mut self, store: &AppStore, out: &mut dyn Write) -> Result<()> {
        let chat_id = self.chat_id;
        let touched = self
            .events
            .try_iter()
            .filter(|event| event.chat_id() == chat_id)
            .count()
            > 0;

        if touched {
            self.print_unseen(store, out)?;
        }

        Ok(())
    }

    pub fn print_unseen(&mut self, store: &AppStore, out: &mut dyn Write) -> Result<()> {
        let chat = match store
            .chat_handle(self.chat_id)
            .and_then(|handle| store.read_chat(&handle))
        {
            Ok(chat) => chat,
            Err(_) => {
                writeln!(out, "Chat unavailable")?;
                return Ok(());
            }
        };

        if self.shown == 0 && chat.status() == ChatStatus::Empty {
            writeln!(out, "No messages yet. Say hello to {}.", self.expert_name)?;
        }

        for message in chat.messages.iter().skip(self.shown) {
            writeln!(out, "{}", render::transcript_line(message, &self.expert_name))?;
        }
        self.shown = chat.messages.len();
        out.flush()?;

        Ok(())
    }
}

/// Runs an interactive chat with `expert` on stdin/stdout until `/quit` or EOF.
pub fn run_chat_session(context: &mut AppContext, expert: &Expert) -> Result<()> {
    let (input_tx, input_rx) = mpsc::channel::<SessionInput>();
    let scheduler = AutoReplyScheduler::start(&context.config.chat, input_tx.clone())?;

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(SessionInput::Line(line)).is_err() {
                        return;
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        code = CONSOLE_STDIN_READ_FAILED,
                        error = %error,
                        "stdin read failed; closing chat session"
                    );
                    break;
                }
            }
        }
        let _ = input_tx.send(SessionInput::Closed);
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = ChatSession::open(&mut context.store, expert);

    tracing::info!(chat_id = %session.chat_id(), expert = %expert.name, "chat session opened");
    writeln!(out, "Chat with {} (type {QUIT_COMMAND} to leave)", expert.name)?;
    session.print_unseen(&context.store, &mut out)?;
    // The creation notice, if any, is already reflected in the transcript.
    let _ = session.events.try_iter().count();

    while let Ok(input) = input_rx.recv() {
        let control = session.handle(&mut context.store, input, &scheduler, &mut out)?;
        if control == SessionControl::Quit {
            break;
        }
        session.flush_updates(&context.store, &mut out)?;
    }

    Ok(())
}
