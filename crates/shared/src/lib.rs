use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod catalog;

pub use catalog::{BlockSpec, CATALOG};

/// Уникальный идентификатор блока в мире
pub type BlockId = String;

/// Идентификатор сохранённой работы
pub type WorkId = String;

/// Идентификатор владельца (пользователя)
pub type OwnerId = String;

/// Позиция центра блока [x, y, z], y — высота
pub type Position = [f64; 3];

/// Тип блока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    #[default]
    Cube,
    /// Старое имя "rectangle" принимается при чтении
    #[serde(alias = "rectangle")]
    RectangularPrism,
    Cylinder,
    /// Старое имя "triangle" принимается при чтении
    #[serde(alias = "triangle")]
    TriangularPrism,
    Arch,
    Plate,
}

impl BlockType {
    /// Все типы в порядке панели инструментов
    pub const ALL: [BlockType; 6] = [
        BlockType::Cube,
        BlockType::RectangularPrism,
        BlockType::Cylinder,
        BlockType::TriangularPrism,
        BlockType::Arch,
        BlockType::Plate,
    ];

    /// Имя типа в формате сериализации
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Cube => "cube",
            BlockType::RectangularPrism => "rectangular_prism",
            BlockType::Cylinder => "cylinder",
            BlockType::TriangularPrism => "triangular_prism",
            BlockType::Arch => "arch",
            BlockType::Plate => "plate",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Поворот вокруг вертикальной оси (градусы)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Следующий поворот по часовой стрелке (270 → 0)
    pub fn next(&self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(format!("rotation must be 0, 90, 180 or 270, got {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Палитра конструктора: (название, цвет)
pub const PALETTE: &[(&str, &str)] = &[
    ("Red", "#EF4444"),
    ("Orange", "#F97316"),
    ("Yellow", "#FACC15"),
    ("Green", "#22C55E"),
    ("Cyan", "#06B6D4"),
    ("Blue", "#3B82F6"),
    ("Purple", "#A855F7"),
    ("Pink", "#EC4899"),
    ("Brown", "#A78B71"),
    ("White", "#FFFFFF"),
];

/// Цвет по умолчанию (красный)
pub const DEFAULT_COLOR: &str = "#EF4444";

/// Ошибка разбора цвета
#[derive(Debug, Clone, PartialEq)]
pub struct ColorError(pub String);

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}': expected #RRGGBB", self.0)
    }
}

impl std::error::Error for ColorError {}

/// Цвет в формате #RRGGBB
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ColorError(value.to_string()))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_string())
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Размещённый блок
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
    pub color: HexColor,
}

/// Описание блока без идентификатора (результат AI-генерации)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub color: HexColor,
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
}

impl BlockDescriptor {
    /// Превратить описание в блок с заданным идентификатором
    pub fn into_block(self, id: BlockId) -> Block {
        Block {
            id,
            block_type: self.block_type,
            position: self.position,
            rotation: self.rotation,
            color: self.color,
        }
    }
}

/// Сохранённая работа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    pub owner_id: OwnerId,
    pub title: String,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Данные для создания новой работы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWork {
    pub title: String,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub is_public: bool,
}

/// Частичное обновление работы
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl WorkPatch {
    pub fn blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: Some(blocks),
            ..Default::default()
        }
    }
}

/// Запрос на AI-генерацию
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Ответ AI-генерации — проверенный набор блоков
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub blocks: Vec<BlockDescriptor>,
}

/// Тело ответа с ошибкой
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
