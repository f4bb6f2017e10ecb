//! Factory functions for creating test data.
//!
//! Provides helpers to construct `Block`, `Work` and generation replies used
//! in tests and by the command runner.

use chrono::Utc;
use shared::*;

// ── Block factories ─────────────────────────────────────────────

/// Create a block of any type with the default color.
pub fn block(id: &str, block_type: BlockType, position: Position) -> Block {
    Block {
        id: id.to_string(),
        block_type,
        position,
        rotation: Rotation::Deg0,
        color: HexColor::default(),
    }
}

/// Create a cube resting on the ground at grid cell (x, z).
pub fn ground_cube(id: &str, x: f64, z: f64) -> Block {
    block(id, BlockType::Cube, [x, 0.5, z])
}

/// A column of `n` cubes at the origin, ids `t0..tn`.
pub fn cube_tower(n: usize) -> Vec<Block> {
    (0..n)
        .map(|i| block(&format!("t{i}"), BlockType::Cube, [0.0, 0.5 + i as f64, 0.0]))
        .collect()
}

/// A descriptor as the generator would return it.
pub fn descriptor(block_type: BlockType, color: &str, position: Position) -> BlockDescriptor {
    BlockDescriptor {
        block_type,
        color: HexColor::parse(color).unwrap_or_default(),
        position,
        rotation: Rotation::Deg0,
    }
}

// ── Work factories ──────────────────────────────────────────────

/// A saved work with both timestamps set to now.
pub fn work(id: &str, owner: &str, title: &str, blocks: Vec<Block>) -> Work {
    let now = Utc::now();
    Work {
        id: id.to_string(),
        owner_id: owner.to_string(),
        title: title.to_string(),
        blocks,
        is_public: false,
        created_at: now,
        updated_at: now,
    }
}

// ── Generation replies ──────────────────────────────────────────

/// Wrap `content` in a chat-completions response body.
pub fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

/// A small house as a model would describe it, wrapped in prose.
pub fn house_reply_text() -> &'static str {
    r##"Sure! Here is a little house:
```json
[
  {"type": "plate", "color": "#22C55E", "position": [0, 0.15, 0]},
  {"type": "cube", "color": "#F8FAFC", "position": [-0.5, 0.8, 0]},
  {"type": "cube", "color": "#F8FAFC", "position": [0.5, 0.8, 0]},
  {"type": "cube", "color": "#F8FAFC", "position": [-0.5, 1.8, 0]},
  {"type": "cube", "color": "#F8FAFC", "position": [0.5, 1.8, 0]},
  {"type": "arch", "color": "#92400E", "position": [0, 0.8, 1]},
  {"type": "triangle", "color": "#EF4444", "position": [-0.5, 2.8, 0]},
  {"type": "triangle", "color": "#EF4444", "position": [0.5, 2.8, 0]}
]
```
Have fun building!"##
}
