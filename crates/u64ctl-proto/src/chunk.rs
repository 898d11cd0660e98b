//! Splitting large transfers into size-bounded chunks.
//!
//! Knows nothing about the wire protocol; the REU upload is the current
//! caller (at [`crate::command::REU_MAX_SIZE`] per chunk) but any bulk
//! command can reuse it.

/// Split `data` into `(offset, chunk)` pairs of at most `chunk_size` bytes.
///
/// `total_size`, if nonzero, overrides `data.len()` as the logical transfer
/// size; `offset` is where slicing (and offset numbering) starts. Emits all
/// full chunks, then the remainder chunk if there is one.
///
/// No bounds checking is done against `data.len()`: if `offset + size` runs
/// past the buffer, the trailing chunks come out short (or empty). That
/// mirrors the upload loop's contract, where the caller is responsible for
/// size consistency.
pub fn chunk_iter(
    data: &[u8],
    offset: usize,
    total_size: usize,
    chunk_size: usize,
) -> ChunkIter<'_> {
    ChunkIter::new(data, offset, total_size, chunk_size)
}

/// Lazy iterator over the chunks of a transfer. See [`chunk_iter`].
#[derive(Debug, Clone)]
pub struct ChunkIter<'a> {
    data: &'a [u8],
    offset: usize,
    chunk_size: usize,
    full_chunks: usize,
    remainder: usize,
}

impl<'a> ChunkIter<'a> {
    fn new(data: &'a [u8], offset: usize, total_size: usize, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be nonzero");
        let n = if total_size > 0 {
            total_size
        } else {
            data.len()
        };
        Self {
            data,
            offset,
            chunk_size,
            full_chunks: n / chunk_size,
            remainder: n % chunk_size,
        }
    }

    fn slice(&self, len: usize) -> (usize, &'a [u8]) {
        let start = self.offset.min(self.data.len());
        let end = (self.offset + len).min(self.data.len());
        (self.offset, &self.data[start..end])
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.full_chunks > 0 {
            self.full_chunks -= 1;
            let item = self.slice(self.chunk_size);
            self.offset += self.chunk_size;
            Some(item)
        } else if self.remainder > 0 {
            let item = self.slice(self.remainder);
            self.remainder = 0;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.full_chunks + usize::from(self.remainder > 0);
        (left, Some(left))
    }
}

impl ExactSizeIterator for ChunkIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_with_remainder() {
        let chunks: Vec<_> = chunk_iter(b"0123456789", 0, 10, 4).collect();
        assert_eq!(
            chunks,
            vec![
                (0, b"0123".as_ref()),
                (4, b"4567".as_ref()),
                (8, b"89".as_ref())
            ]
        );
    }

    #[test]
    fn exact_multiple_emits_no_remainder() {
        let chunks: Vec<_> = chunk_iter(b"01234567", 0, 0, 4).collect();
        assert_eq!(chunks, vec![(0, b"0123".as_ref()), (4, b"4567".as_ref())]);
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert_eq!(chunk_iter(b"", 0, 0, 16).count(), 0);
    }

    #[test]
    fn single_short_chunk() {
        let chunks: Vec<_> = chunk_iter(b"abc", 0, 0, 16).collect();
        assert_eq!(chunks, vec![(0, b"abc".as_ref())]);
    }

    #[test]
    fn total_size_overrides_buffer_length() {
        let chunks: Vec<_> = chunk_iter(b"0123456789", 0, 6, 4).collect();
        assert_eq!(chunks, vec![(0, b"0123".as_ref()), (4, b"45".as_ref())]);
    }

    #[test]
    fn offset_shifts_slices_and_numbering() {
        let chunks: Vec<_> = chunk_iter(b"0123456789", 2, 4, 4).collect();
        assert_eq!(chunks, vec![(2, b"2345".as_ref())]);
    }

    #[test]
    fn roundtrip_reconstructs_data() {
        let data: Vec<u8> = (0..=255).cycle().take(100_000).map(|b: u16| b as u8).collect();
        for k in [1usize, 7, 4096, 65532, 200_000] {
            let mut out = Vec::new();
            for (_, chunk) in chunk_iter(&data, 0, data.len(), k) {
                out.extend_from_slice(chunk);
            }
            assert_eq!(out, data, "chunk_size {k}");
        }
    }

    #[test]
    fn offsets_are_contiguous() {
        let data = vec![0u8; 300_000];
        let mut expected = 0usize;
        for (offset, chunk) in chunk_iter(&data, 0, 0, 65532) {
            assert_eq!(offset, expected);
            expected += chunk.len();
        }
        assert_eq!(expected, data.len());
    }

    #[test]
    fn chunk_counts_match_division() {
        let data = vec![0u8; 10_000];
        let k = 4096;
        let chunks: Vec<_> = chunk_iter(&data, 0, 0, k).collect();
        assert_eq!(chunks.len(), 10_000 / k + 1);
        assert!(chunks[..chunks.len() - 1].iter().all(|(_, c)| c.len() == k));
        assert_eq!(chunks.last().unwrap().1.len(), 10_000 % k);
    }

    // Documented sharp edge: sizes past the end of the buffer yield short
    // final chunks instead of panicking.
    #[test]
    fn oversized_total_yields_short_chunks() {
        let chunks: Vec<_> = chunk_iter(b"0123456789", 0, 16, 4).collect();
        assert_eq!(
            chunks,
            vec![
                (0, b"0123".as_ref()),
                (4, b"4567".as_ref()),
                (8, b"89".as_ref()),
                (12, b"".as_ref())
            ]
        );
    }

    #[test]
    fn size_hint_is_exact() {
        let it = chunk_iter(b"0123456789", 0, 10, 4);
        assert_eq!(it.len(), 3);
    }

    #[test]
    #[should_panic(expected = "chunk_size must be nonzero")]
    fn zero_chunk_size_panics() {
        let _ = chunk_iter(b"abc", 0, 0, 0);
    }
}
