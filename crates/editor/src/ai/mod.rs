//! Assisted generation: prompt in, validated block batch out.

pub mod parse;

use async_trait::async_trait;
use shared::BlockDescriptor;

use crate::error::{Error, Result};
use crate::state::settings::{GenerationSettings, ENV_API_KEY};

pub const SYSTEM_PROMPT: &str = r#"
You are a designer of children's building-block models. The user tells you what to build and you answer with block data.

Block types:
- cube: 1x1x1 cube - bodies, heads, car cabins
- rectangular_prism: 2x1x1 bar - bodies, bases, wagons
- cylinder: diameter 1, height 1 - wheels, lamps, legs
- triangular_prism: base 1.2, height 1 - roofs, ears, decorations
- arch: 1.4 wide, height 1 - doorways, bridges
- plate: 2x0.3x2 slab - foundations, platforms

Colors are hex strings:
- red #EF4444, blue #3B82F6, green #22C55E
- yellow #FBBF24, purple #8B5CF6, orange #F97316
- brown #92400E, pink #EC4899, white #F8FAFC, black #1E293B

Position is [x, y, z] with y as height, measured at the block center. A block resting on the ground has:
- y = 0.5 for cube, rectangular_prism, cylinder, triangular_prism and arch
- y = 0.15 for plate

When stacking, upper y = lower y + lower height / 2 + upper height / 2.

Ideas:
- dog: rectangular_prism body, cube head, 4 cylinder legs, 2 triangular_prism ears, cylinder tail
- house: plate foundation, stacked cubes for walls, triangular_prism roof
- car: rectangular_prism body, cube cabin, 4 cylinder wheels
- robot: cubes for head and body, cylinders for arms and legs
- castle: stacked cubes for towers, rectangular_prism walls, triangular_prism spires

Rules:
1. Stack sensibly; nothing floats.
2. Keep the model simple and cute, like a toy.
3. Use 8-20 blocks.
4. Pick colors that suit the subject.

Reply with a bare JSON array of {"type", "color", "position"} objects and nothing else.
"#;

/// Source of generated block batches
#[async_trait]
pub trait BlockGenerator: Send + Sync {
    /// Turn `prompt` into a non-empty, fully validated batch
    async fn generate(&self, prompt: &str) -> Result<Vec<BlockDescriptor>>;
}

/// Client for an OpenAI-compatible chat completions endpoint
pub struct GenerationClient {
    http: reqwest::Client,
    settings: GenerationSettings,
}

impl GenerationClient {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Whether a credential is available
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Build this: {prompt}") }
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        })
    }
}

#[async_trait]
impl BlockGenerator for GenerationClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<BlockDescriptor>> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::Validation("prompt must not be empty".into()));
        }
        let api_key = self.api_key().ok_or_else(|| {
            Error::Validation(format!(
                "assisted generation is not configured, set {ENV_API_KEY}"
            ))
        })?;

        tracing::debug!("Requesting generation from {}", self.settings.endpoint);
        let response = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!("Inference service returned {status}");
            return Err(Error::Upstream(format!(
                "inference service returned {status}: {}",
                detail.chars().take(200).collect::<String>()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("unreadable reply: {e}")))?;

        // Извлекаем текст сообщения из ответа
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default();

        let blocks = parse::parse_batch(content)?;
        tracing::info!("Generated {} blocks for prompt {prompt:?}", blocks.len());
        Ok(blocks)
    }
}
