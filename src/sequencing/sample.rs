//! Sample chain - append-only, index-linked gesture samples
//!
//! Recording order and playback order are the same (both follow time), so a
//! forward-linked chain is all the structure a track needs. Samples live in
//! an arena owned by the chain and point at their successor by id, which
//! keeps ownership flat: no `Rc`, no cycles.

use id_arena::{Arena, Id};

use super::error::SequencerError;
use crate::visual::Point;

/// Arena index of a sample within its track
pub type SampleId = Id<Sample>;

/// One timestamped gesture position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Offset from loop start in milliseconds
    pub time_ms: u32,
    /// Canvas coordinates
    pub x: f64,
    pub y: f64,
    next: Option<SampleId>,
}

impl Sample {
    fn new(x: f64, y: f64, time_ms: u32) -> Self {
        Self {
            time_ms,
            x,
            y,
            next: None,
        }
    }

    /// Successor in the chain, if one has been recorded.
    #[inline]
    pub fn next(&self) -> Option<SampleId> {
        self.next
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Time-ordered chain of samples with O(1) append
#[derive(Debug)]
pub struct SampleChain {
    arena: Arena<Sample>,
    first: SampleId,
    last: SampleId,
}

impl SampleChain {
    /// Start a chain with its first sample.
    pub fn new(x: f64, y: f64, at_ms: u32) -> Self {
        let mut arena = Arena::new();
        let first = arena.alloc(Sample::new(x, y, at_ms));

        Self {
            arena,
            first,
            last: first,
        }
    }

    /// Link a new tail sample.
    ///
    /// Fails with [`SequencerError::InvalidSequence`] if `at_ms` is earlier
    /// than the current tail. Equal timestamps are allowed.
    pub fn push(&mut self, x: f64, y: f64, at_ms: u32) -> Result<SampleId, SequencerError> {
        let tail_ms = self.arena[self.last].time_ms;
        if at_ms < tail_ms {
            return Err(SequencerError::InvalidSequence { at_ms, tail_ms });
        }

        let id = self.arena.alloc(Sample::new(x, y, at_ms));
        self.arena[self.last].next = Some(id);
        self.last = id;
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: SampleId) -> &Sample {
        &self.arena[id]
    }

    #[inline]
    pub fn first(&self) -> SampleId {
        self.first
    }

    #[inline]
    pub fn last(&self) -> SampleId {
        self.last
    }

    /// Number of samples (never zero).
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Walk the chain from first to last.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            next: Some(self.first),
        }
    }
}

/// Iterator over a [`SampleChain`] in time order
pub struct ChainIter<'a> {
    chain: &'a SampleChain,
    next: Option<SampleId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let sample = self.chain.get(id);
        self.next = sample.next;
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_links_new_tail() {
        let mut chain = SampleChain::new(1.0, 2.0, 0);
        let second = chain.push(3.0, 4.0, 10).unwrap();
        let third = chain.push(5.0, 6.0, 10).unwrap();

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.get(chain.first()).next(), Some(second));
        assert_eq!(chain.get(second).next(), Some(third));
        assert_eq!(chain.last(), third);
        assert_eq!(chain.get(third).next(), None);
    }

    #[test]
    fn push_rejects_time_going_backwards() {
        let mut chain = SampleChain::new(0.0, 0.0, 50);
        let result = chain.push(1.0, 1.0, 49);

        assert_eq!(
            result,
            Err(SequencerError::InvalidSequence {
                at_ms: 49,
                tail_ms: 50
            })
        );
        // Failed push leaves the chain untouched
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.first(), chain.last());
    }

    #[test]
    fn iter_follows_time_order() {
        let mut chain = SampleChain::new(0.0, 0.0, 0);
        chain.push(1.0, 0.0, 5).unwrap();
        chain.push(2.0, 0.0, 9).unwrap();

        let times: Vec<u32> = chain.iter().map(|s| s.time_ms).collect();
        assert_eq!(times, vec![0, 5, 9]);
    }
}
