//! Property-based tests for packed storage.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::compression::{CompressedBlob, Compressor, Decompressor};
    use crate::element::U4;
    use crate::sequence::PackedSequence;

    type Bytes6 = PackedSequence<u8, 6>;
    type Nibbles3 = PackedSequence<U4, 3>;

    fn byte_items() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(any::<u8>(), 0..40)
    }

    fn nibble_items() -> impl Strategy<Value = Vec<U4>> {
        proptest::collection::vec((0u8..=15).prop_map(U4::new), 0..40)
    }

    // Values valid for a compression slot
    fn slot_values() -> impl Strategy<Value = Vec<i32>> {
        proptest::collection::vec(1i32..=15, 0..12)
    }

    proptest! {
        #[test]
        fn push_get_matches_vec(items in byte_items()) {
            let seq = Bytes6::from_slice(&items);
            prop_assert_eq!(seq.len(), items.len());
            for (i, &item) in items.iter().enumerate() {
                prop_assert_eq!(seq.get(i), item);
            }
            prop_assert_eq!(seq.is_inline(), items.len() <= Bytes6::inline_capacity());
        }

        #[test]
        fn nibbles_match_vec(items in nibble_items()) {
            let seq = Nibbles3::from_slice(&items);
            prop_assert_eq!(seq.to_vec(), items);
        }

        #[test]
        fn order_matches_vec(a in byte_items(), b in byte_items()) {
            let pa = Bytes6::from_slice(&a);
            let pb = Bytes6::from_slice(&b);
            prop_assert_eq!(pa.cmp(&pb), a.cmp(&b));
            prop_assert_eq!(pa == pb, a == b);
        }

        #[test]
        fn shrunk_heap_equals_fresh(items in byte_items(), keep in 0usize..40) {
            // Build via a long sequence and shrink; compare with a direct build
            let mut long = items.clone();
            long.extend_from_slice(&[0xAB; 8]);
            let mut shrunk = Bytes6::from_slice(&long);
            let keep = keep.min(items.len());
            shrunk.resize(keep, 0);
            prop_assert_eq!(shrunk, Bytes6::from_slice(&items[..keep]));
        }

        #[test]
        fn compression_roundtrip(segments in proptest::collection::vec(slot_values(), 0..6)) {
            let mut compressor = Compressor::new();
            for segment in &segments {
                compressor.push_segment(segment);
            }
            let blob: CompressedBlob<()> = compressor.finish();
            let mut decompressor = Decompressor::new(&blob);
            for segment in &segments {
                prop_assert_eq!(&decompressor.pop_segment(), segment);
            }
            prop_assert!(decompressor.done());
        }
    }
}
