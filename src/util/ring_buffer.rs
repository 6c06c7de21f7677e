/// Fixed-capacity ring of i64 samples. Oldest entry is overwritten when full.
///
/// The cursor only ever moves forward; the slot written is `cursor % cap`.
/// `occupied_mut` exposes `data[..len]` for in-place work, which means the
/// caller may reorder it. Once full, the window is still the last `cap`
/// pushes regardless of physical order.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: Vec<i64>,
    cursor: u64,
    len: usize,
    cap: usize,
}

impl RingBuffer {
    /// `None` for a zero capacity.
    pub fn new(cap: usize) -> Option<Self> {
        if cap == 0 {
            return None;
        }
        Some(Self { data: vec![0; cap], cursor: 0, len: 0, cap })
    }

    pub fn push(&mut self, val: i64) {
        let idx = (self.cursor % self.cap as u64) as usize;
        self.data[idx] = val;
        self.cursor = self.cursor.wrapping_add(1);
        if self.len < self.cap {
            self.len += 1;
        }
    }

    /// Occupied prefix, in whatever order it currently sits.
    pub fn occupied(&self) -> &[i64] {
        &self.data[..self.len]
    }

    pub fn occupied_mut(&mut self) -> &mut [i64] {
        &mut self.data[..self.len]
    }

    /// Forget every sample without touching the allocation.
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.len = 0;
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn capacity(&self) -> usize { self.cap }

    #[cfg(test)]
    fn cursor(&self) -> u64 { self.cursor }
}
