//! Slot table for automatic terminal placement.
//!
//! Each output owns an aligned block of [`SLOTS_PER_OUTPUT`] entries holding
//! its four quadrant rectangles.

use crate::backend::OutputHandle;
use crate::ids::{SlotIndex, N_SLOTS, SLOTS_PER_OUTPUT};
use stage_core::Rect;

const N_BLOCKS: usize = N_SLOTS / SLOTS_PER_OUTPUT;

/// Quadrant rectangles of `area` for terminals `terminal_width` pixels wide,
/// in scan order: bottom-right, bottom-left, top-right, top-left.
pub fn quadrants(area: Rect, terminal_width: i32) -> [Rect; SLOTS_PER_OUTPUT] {
    let half_w = area.width / 2;
    let half_h = area.height / 2;
    let w = terminal_width.min(half_w);
    let left_x = if terminal_width > half_w { 0 } else { half_w - terminal_width };
    let at = |x: i32, y: i32| Rect::new(area.x + x, area.y + y, w, half_h);
    [
        at(half_w, half_h),
        at(left_x, half_h),
        at(half_w, 0),
        at(left_x, 0),
    ]
}

#[derive(Debug, Clone, Copy)]
struct Block {
    output: OutputHandle,
    rects: [Rect; SLOTS_PER_OUTPUT],
}

#[derive(Debug, Default)]
pub struct SlotTable {
    blocks: [Option<Block>; N_BLOCKS],
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the first free block for `output`. Returns `false` when all
    /// blocks are taken.
    pub fn allocate(&mut self, output: OutputHandle, area: Rect, terminal_width: i32) -> bool {
        self.release(output);
        match self.blocks.iter_mut().find(|b| b.is_none()) {
            Some(free) => {
                *free = Some(Block {
                    output,
                    rects: quadrants(area, terminal_width),
                });
                true
            }
            None => false,
        }
    }

    pub fn release(&mut self, output: OutputHandle) {
        for block in self.blocks.iter_mut() {
            if block.map(|b| b.output) == Some(output) {
                *block = None;
            }
        }
    }

    /// Slots of `output` in scan order.
    pub fn slots_for(&self, output: OutputHandle) -> Vec<(SlotIndex, Rect)> {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.filter(|b| b.output == output).map(|b| (i, b)))
            .flat_map(|(i, b)| {
                b.rects.into_iter().enumerate().filter_map(move |(k, rect)| {
                    SlotIndex::new(i * SLOTS_PER_OUTPUT + k).ok().map(|idx| (idx, rect))
                })
            })
            .collect()
    }

    pub fn get(&self, index: SlotIndex) -> Option<Rect> {
        let block = self.blocks.get(index.get() / SLOTS_PER_OUTPUT)?.as_ref()?;
        block.rects.get(index.get() % SLOTS_PER_OUTPUT).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quadrants_on_wide_output() {
        let q = quadrants(Rect::new(0, 0, 3840, 2160), 1204);
        assert_eq!(q[0], Rect::new(1920, 1080, 1204, 1080));
        assert_eq!(q[1], Rect::new(716, 1080, 1204, 1080));
        assert_eq!(q[2], Rect::new(1920, 0, 1204, 1080));
        assert_eq!(q[3], Rect::new(716, 0, 1204, 1080));
    }

    #[test]
    fn quadrants_shrink_on_narrow_output() {
        let q = quadrants(Rect::new(1920, 0, 1920, 1080), 1204);
        assert_eq!(q[0], Rect::new(2880, 540, 960, 540));
        assert_eq!(q[1], Rect::new(1920, 540, 960, 540));
        assert_eq!(q[3], Rect::new(1920, 0, 960, 540));
    }

    #[test]
    fn quadrants_do_not_overlap() {
        let q = quadrants(Rect::new(0, 0, 3840, 2160), 1204);
        for (i, a) in q.iter().enumerate() {
            for b in q.iter().skip(i + 1) {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn blocks_are_allocated_per_output_and_released() {
        let mut table = SlotTable::new();
        let area = Rect::new(0, 0, 1920, 1080);
        for n in 1..=4 {
            assert!(table.allocate(OutputHandle(n), area, 1204));
        }
        assert!(!table.allocate(OutputHandle(5), area, 1204));

        let second: Vec<usize> = table
            .slots_for(OutputHandle(2))
            .into_iter()
            .map(|(i, _)| i.get())
            .collect();
        assert_eq!(second, vec![4, 5, 6, 7]);

        table.release(OutputHandle(2));
        assert!(table.slots_for(OutputHandle(2)).is_empty());
        assert_eq!(table.get(SlotIndex::new(4).unwrap()), None);
        assert!(table.allocate(OutputHandle(5), area, 1204));
        assert_eq!(table.slots_for(OutputHandle(5))[0].0.get(), 4);
    }
}
