//! Каталог блоков: статические размеры каждого типа

use crate::BlockType;

/// Метаданные типа блока
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSpec {
    pub block_type: BlockType,
    /// Название для панели инструментов
    pub display_name: &'static str,
    /// Вертикальный размер, используемый при укладке
    pub stack_height: f64,
    /// Габариты [ширина, высота, глубина]
    pub footprint: [f64; 3],
}

/// Каталог в порядке `BlockType::ALL`
pub const CATALOG: [BlockSpec; 6] = [
    BlockSpec {
        block_type: BlockType::Cube,
        display_name: "Cube",
        stack_height: 1.0,
        footprint: [1.0, 1.0, 1.0],
    },
    BlockSpec {
        block_type: BlockType::RectangularPrism,
        display_name: "Rectangle",
        stack_height: 1.0,
        footprint: [2.0, 1.0, 1.0],
    },
    BlockSpec {
        block_type: BlockType::Cylinder,
        display_name: "Cylinder",
        stack_height: 1.0,
        footprint: [1.0, 1.0, 1.0],
    },
    BlockSpec {
        block_type: BlockType::TriangularPrism,
        display_name: "Triangle",
        stack_height: 1.0,
        footprint: [1.2, 1.0, 1.2],
    },
    BlockSpec {
        block_type: BlockType::Arch,
        display_name: "Arch",
        stack_height: 1.0,
        footprint: [1.4, 1.0, 0.4],
    },
    BlockSpec {
        block_type: BlockType::Plate,
        display_name: "Plate",
        stack_height: 0.3,
        footprint: [2.0, 0.3, 2.0],
    },
];

impl BlockType {
    /// Запись каталога для этого типа
    pub fn spec(&self) -> &'static BlockSpec {
        let index = match self {
            BlockType::Cube => 0,
            BlockType::RectangularPrism => 1,
            BlockType::Cylinder => 2,
            BlockType::TriangularPrism => 3,
            BlockType::Arch => 4,
            BlockType::Plate => 5,
        };
        &CATALOG[index]
    }

    /// Высота блока для расчёта укладки
    pub fn stack_height(&self) -> f64 {
        self.spec().stack_height
    }

    pub fn display_name(&self) -> &'static str {
        self.spec().display_name
    }
}
