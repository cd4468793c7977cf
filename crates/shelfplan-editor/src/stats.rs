//! Box statistics for the side panel.
//!
//! A read-only tally over every shelf's box table: count and share per box
//! variant, plus how full the shelving is overall.

use serde::Serialize;
use shelfplan_core::{BoxVariant, Shelf};

/// Count and share of one box variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantCount {
    pub variant: BoxVariant,
    pub color: &'static str,
    pub count: usize,
    /// Share of all boxes, rounded to two decimals
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStatistics {
    /// One entry per variant, in catalogue order, including zero counts
    pub variants: Vec<VariantCount>,
    pub total_boxes: usize,
    pub total_slots: usize,
}

impl BoxStatistics {
    pub fn collect<'a>(shelves: impl IntoIterator<Item = &'a Shelf>) -> Self {
        let mut counts = [0usize; BoxVariant::ALL.len()];
        let mut total_slots = 0;
        for shelf in shelves {
            total_slots += shelf.boxes().capacity();
            for (_, _, stored) in shelf.boxes().iter() {
                if let Some(i) = BoxVariant::ALL.iter().position(|v| *v == stored.variant) {
                    counts[i] += 1;
                }
            }
        }

        let total_boxes: usize = counts.iter().sum();
        let variants = BoxVariant::ALL
            .iter()
            .zip(counts)
            .map(|(&variant, count)| VariantCount {
                variant,
                color: variant.color(),
                count,
                percentage: percentage(count, total_boxes),
            })
            .collect();

        Self {
            variants,
            total_boxes,
            total_slots,
        }
    }

    pub fn count(&self, variant: BoxVariant) -> usize {
        self.variants
            .iter()
            .find(|v| v.variant == variant)
            .map_or(0, |v| v.count)
    }

    /// Filled slots over available slots, `0.0` when there are no shelves.
    pub fn fill_ratio(&self) -> f64 {
        if self.total_slots == 0 {
            0.0
        } else {
            self.total_boxes as f64 / self.total_slots as f64
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 100.0 / total as f64 * 100.0).round() / 100.0
}
