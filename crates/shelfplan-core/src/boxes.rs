//! Box catalogue
//!
//! Goods stored on a shelf are one of a fixed set of variants: five rigid
//! container sizes and one rolled material. A box's display colour is a
//! static property of its variant and is never stored.

use serde::{Deserialize, Serialize};

/// Kind of goods occupying a shelf slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoxVariant {
    /// Rigid container, type A
    A,
    /// Rigid container, type B
    B,
    /// Rigid container, type C
    C,
    /// Rigid container, type D
    D,
    /// Rigid container, type E
    E,
    /// Rolled material (carpet, fabric, film)
    #[serde(rename = "roll")]
    Roll,
}

impl BoxVariant {
    /// Catalogue order, used for statistics and legends.
    pub const ALL: [BoxVariant; 6] = [Self::A, Self::B, Self::C, Self::D, Self::E, Self::Roll];

    pub fn color(self) -> &'static str {
        match self {
            Self::A => "red",
            Self::B => "green",
            Self::C => "blue",
            Self::D => "yellow",
            Self::E => "purple",
            Self::Roll => "orange",
        }
    }

    pub fn is_rigid(self) -> bool {
        !matches!(self, Self::Roll)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "ROLL" => Some(Self::Roll),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoxVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::E => write!(f, "E"),
            Self::Roll => write!(f, "Roll"),
        }
    }
}

/// A box placed in one shelf slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShelfBox {
    pub variant: BoxVariant,
}

impl ShelfBox {
    pub fn new(variant: BoxVariant) -> Self {
        Self { variant }
    }

    pub fn color(&self) -> &'static str {
        self.variant.color()
    }
}

impl From<BoxVariant> for ShelfBox {
    fn from(variant: BoxVariant) -> Self {
        Self::new(variant)
    }
}

/// Column-major slot table (`slots[column][row]`) in the shelf's local,
/// unrotated frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxTable {
    slots: Vec<Vec<Option<ShelfBox>>>,
}

impl BoxTable {
    /// An all-empty table of `columns x rows` slots.
    pub fn empty(columns: usize, rows: usize) -> Self {
        Self {
            slots: vec![vec![None; rows]; columns],
        }
    }

    /// Wrap existing column-major slots. Dimensions are not checked here.
    pub fn from_slots(slots: Vec<Vec<Option<ShelfBox>>>) -> Self {
        Self { slots }
    }

    pub fn columns(&self) -> usize {
        self.slots.len()
    }

    /// Row count of the first column; 0 for an empty table.
    pub fn rows(&self) -> usize {
        self.slots.first().map_or(0, Vec::len)
    }

    /// Whether every column holds exactly `rows` slots and there are `columns` columns.
    pub fn has_shape(&self, columns: usize, rows: usize) -> bool {
        self.slots.len() == columns && self.slots.iter().all(|col| col.len() == rows)
    }

    pub fn get(&self, column: usize, row: usize) -> Option<ShelfBox> {
        self.slots.get(column)?.get(row).copied().flatten()
    }

    pub(crate) fn slot_mut(&mut self, column: usize, row: usize) -> Option<&mut Option<ShelfBox>> {
        self.slots.get_mut(column)?.get_mut(row)
    }

    /// Iterate `(column, row, box)` for every filled slot.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, ShelfBox)> + '_ {
        self.slots.iter().enumerate().flat_map(|(c, col)| {
            col.iter()
                .enumerate()
                .filter_map(move |(r, slot)| slot.map(|b| (c, r, b)))
        })
    }

    pub fn filled(&self) -> usize {
        self.iter().count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn as_slots(&self) -> &[Vec<Option<ShelfBox>>] {
        &self.slots
    }
}
