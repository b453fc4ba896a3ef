use terrace_blocks::BlockType;

/// Count of collected blocks per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: [u32; BlockType::COUNT],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one block. The `Empty` sentinel is not collectable.
    pub fn collect(&mut self, kind: BlockType) -> bool {
        match self.counts.get_mut(kind.index()) {
            Some(n) => {
                *n = n.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Removes one block if any is held.
    pub fn take(&mut self, kind: BlockType) -> bool {
        match self.counts.get_mut(kind.index()) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn count(&self, kind: BlockType) -> u32 {
        self.counts.get(kind.index()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|n| u64::from(*n)).sum()
    }
}

/// Kind the next placement uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSelector {
    current: BlockType,
}

impl Default for BlockSelector {
    fn default() -> Self {
        Self {
            current: BlockType::ALL[0],
        }
    }
}

impl BlockSelector {
    #[inline]
    pub fn current(&self) -> BlockType {
        self.current
    }

    pub fn select(&mut self, kind: BlockType) {
        if kind.is_material() {
            self.current = kind;
        }
    }

    /// Steps through the concrete kinds; scrolling up moves backwards.
    pub fn scroll(&mut self, delta: i32) -> BlockType {
        let count = BlockType::COUNT as i32;
        let next = (self.current.index() as i32 - delta).rem_euclid(count);
        self.current = BlockType::ALL[next as usize];
        self.current
    }
}
