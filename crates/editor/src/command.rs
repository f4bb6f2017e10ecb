//! JSON command protocol for driving an editing session headless.
//!
//! Each command maps onto one session operation; the response carries
//! whatever the caller needs to continue (new ids, counts, the world).

use serde::{Deserialize, Serialize};
use shared::{Block, BlockId, BlockType, HexColor, Work};

use crate::ai::BlockGenerator;
use crate::error::Error;
use crate::state::session::{ConfirmReason, EditSession, PointerOutcome};
use crate::state::world::WorldState;
use crate::viewport::picking::PointerEvent;

/// A command the runner can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Choose the type of the next placed block
    SelectType { block_type: BlockType },
    /// Choose the color of the next placed block
    SelectColor { color: HexColor },
    /// Quarter-turn the next placed block
    Rotate,
    /// Place on the ground at a world-space x/z
    Place { x: f64, z: f64 },
    /// Stack on an existing block
    Stack { id: BlockId },
    Remove { id: BlockId },
    /// Raw viewport event (click/drag/double click)
    Pointer { event: PointerEvent },
    Undo,
    Redo,
    Clear,
    /// Start over; `confirm` answers the discard prompt
    New {
        #[serde(default)]
        confirm: bool,
    },
    /// Load a saved work; `confirm` answers the discard prompt
    LoadWork {
        work: Work,
        #[serde(default)]
        confirm: bool,
    },
    /// Replace the world with `blocks` as one undoable step
    Import { blocks: Vec<Block> },
    /// Generate blocks from a prompt
    Generate { prompt: String },
    /// Session summary
    Inspect,
    /// The current blocks as JSON
    ExportBlocks,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    /// Outcome of a discard prompt: `key` is the flag, `prompt` the question
    /// the user was asked (absent when there was nothing to lose).
    fn confirmed(key: &str, done: bool, asked: Option<ConfirmReason>) -> Self {
        let mut data = serde_json::json!({ key: done });
        if let Some(reason) = asked {
            data["prompt"] = reason.message().into();
        }
        Self::ok_with_data(data)
    }
}

impl From<Error> for CommandResponse {
    fn from(err: Error) -> Self {
        Self::err(err.to_string())
    }
}

/// Executes commands against one session.
pub struct CommandRunner {
    pub session: EditSession,
    generator: Option<Box<dyn BlockGenerator>>,
}

impl CommandRunner {
    pub fn new(session: EditSession) -> Self {
        Self {
            session,
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: Box<dyn BlockGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    fn inspect(&self) -> serde_json::Value {
        let s = &self.session;
        serde_json::json!({
            "block_count": s.block_count(),
            "history_len": s.history().len(),
            "cursor": s.history().cursor(),
            "can_undo": s.can_undo(),
            "can_redo": s.can_redo(),
            "unsaved": s.has_unsaved_changes(),
            "work": s.current_work().map(|w| &w.title),
            "selected_type": s.selected_type(),
            "selected_type_name": s.selected_type().display_name(),
            "selected_color": s.selected_color(),
            "selected_rotation": s.selected_rotation(),
        })
    }

    /// Execute a single command.
    pub async fn execute(&mut self, cmd: EditorCommand) -> CommandResponse {
        let session = &mut self.session;
        match cmd {
            EditorCommand::SelectType { block_type } => {
                session.select_type(block_type);
                CommandResponse::ok()
            }

            EditorCommand::SelectColor { color } => {
                session.select_color(color);
                CommandResponse::ok()
            }

            EditorCommand::Rotate => {
                let rotation = session.rotate_selection();
                CommandResponse::ok_with_data(serde_json::json!({ "rotation": rotation }))
            }

            EditorCommand::Place { x, z } => {
                let id = session.place_on_ground(x, z);
                CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
            }

            EditorCommand::Stack { id } => match session.stack_on(&id) {
                Some(new_id) => CommandResponse::ok_with_data(serde_json::json!({ "id": new_id })),
                None => CommandResponse::err(format!("No block with id {id}")),
            },

            EditorCommand::Remove { id } => {
                let existed = session.world().contains(&id);
                session.remove_block(&id);
                CommandResponse::ok_with_data(serde_json::json!({ "removed": existed }))
            }

            EditorCommand::Pointer { event } => {
                let data = match session.handle_pointer(&event) {
                    PointerOutcome::Placed(id) => serde_json::json!({ "placed": id }),
                    PointerOutcome::Removed(id) => serde_json::json!({ "removed": id }),
                    PointerOutcome::Ignored => serde_json::json!({ "ignored": true }),
                };
                CommandResponse::ok_with_data(data)
            }

            EditorCommand::Undo => {
                let undone = session.undo();
                CommandResponse::ok_with_data(serde_json::json!({ "undone": undone }))
            }

            EditorCommand::Redo => {
                let redone = session.redo();
                CommandResponse::ok_with_data(serde_json::json!({ "redone": redone }))
            }

            EditorCommand::Clear => {
                let cleared = session.clear();
                CommandResponse::ok_with_data(serde_json::json!({ "cleared": cleared }))
            }

            EditorCommand::New { confirm } => {
                let mut asked = None;
                let started = session.new_session(|reason| {
                    asked = Some(reason);
                    confirm
                });
                CommandResponse::confirmed("started", started, asked)
            }

            EditorCommand::LoadWork { work, confirm } => {
                let mut asked = None;
                let loaded = session.load_work(work, |reason| {
                    asked = Some(reason);
                    confirm
                });
                match loaded {
                    Ok(loaded) => CommandResponse::confirmed("loaded", loaded, asked),
                    Err(e) => e.into(),
                }
            }

            EditorCommand::Import { blocks } => {
                if let Err(e) = WorldState::check_unique_ids(&blocks) {
                    return e.into();
                }
                let count = blocks.len();
                session.bulk_replace(blocks);
                CommandResponse::ok_with_data(serde_json::json!({ "block_count": count }))
            }

            EditorCommand::Generate { prompt } => {
                let Some(generator) = self.generator.as_deref() else {
                    return CommandResponse::err("Assisted generation is not configured");
                };
                match session.generate(generator, &prompt).await {
                    Ok(count) => {
                        CommandResponse::ok_with_data(serde_json::json!({ "block_count": count }))
                    }
                    Err(e) => e.into(),
                }
            }

            EditorCommand::Inspect => CommandResponse::ok_with_data(self.inspect()),

            EditorCommand::ExportBlocks => {
                CommandResponse::ok_with_data(serde_json::json!({ "blocks": session.world().blocks() }))
            }
        }
    }

    /// Parse and execute a single JSON command string.
    pub async fn execute_json(&mut self, json: &str) -> Result<CommandResponse, String> {
        let cmd: EditorCommand =
            serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
        Ok(self.execute(cmd).await)
    }

    /// Parse and execute multiple JSON commands (array).
    pub async fn execute_json_batch(&mut self, json: &str) -> Result<Vec<CommandResponse>, String> {
        let cmds: Vec<EditorCommand> =
            serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
        let mut responses = Vec::with_capacity(cmds.len());
        for cmd in cmds {
            responses.push(self.execute(cmd).await);
        }
        Ok(responses)
    }
}
