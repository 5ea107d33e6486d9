use signed_bitset::BitSet;

#[test]
fn test_slice_hex_window() {
    let bits = BitSet::from_str_radix("0xff900018283821283", 16).unwrap();
    assert_eq!(bits.slice(16, 32).to_string_radix(16), "8382");
    assert_eq!(bits.slice(0, 4).to_string_radix(16), "3");
    assert_eq!(bits.slice(60, 72).to_string_radix(16), "ff");
}

#[test]
fn test_slice_empty_and_reversed() {
    let bits = BitSet::from(-1);
    assert!(bits.slice(5, 5).is_empty());
    assert!(bits.slice(9, 3).is_empty());
    assert!(!bits.slice(0, 1).is_negative());
}

#[test]
fn test_slice_reads_tail_from_sign() {
    let neg = BitSet::from(4).complement();
    assert_eq!(neg.slice(1, 4).to_string(), "101");
    assert_eq!(neg.slice(100, 300).cardinality(), Some(200));
    assert_eq!(neg.slice(0, 64), BitSet::from(!4u64));

    let pos = BitSet::from(0xf0);
    assert!(pos.slice(100, 10_000).is_empty());
    assert_eq!(pos.slice(4, 1_000_000), BitSet::from(0xf));
}

#[test]
fn test_slice_crosses_word_boundary() {
    let bits: BitSet = [62, 63, 64, 65, 130].into_iter().collect();
    assert_eq!(bits.slice(62, 66), BitSet::from(0b1111));
    assert_eq!(bits.slice(63, 131).to_vec(), vec![0, 1, 2, 67]);
}

#[test]
fn test_slice_from_keeps_sign() {
    let neg = BitSet::from(4).complement();
    assert_eq!(neg.slice_from(1).to_string(), "...111101");
    assert_eq!(neg.slice_from(3), BitSet::from(-1));
    assert_eq!(neg.slice_from(10_000), BitSet::from(-1));
    assert!(BitSet::from(12).slice_from(500).is_empty());
}

#[test]
fn test_shift_right_is_arithmetic() {
    for v in [-1000i64, -5, -1, 0, 1, 5, 1000, i64::MIN, i64::MAX] {
        for n in [0, 1, 3, 63, 64, 65, 200] {
            let expected = if n >= 64 { v >> 63 } else { v >> n };
            assert_eq!(BitSet::from(v) >> n, BitSet::from(expected), "{v} >> {n}");
        }
    }
}

#[test]
fn test_shift_left() {
    assert_eq!(BitSet::from(1) << 100, [100].into_iter().collect::<BitSet>());
    assert_eq!(BitSet::from(-3) << 2, BitSet::from(-12));
    assert_eq!(BitSet::from(-1) << 64, BitSet::from(-(1i128 << 64)));
    assert_eq!((BitSet::from(-7) << 77) >> 77, BitSet::from(-7));
    assert_eq!(BitSet::new() << 500, BitSet::new());

    let mut bits = BitSet::from(0b101);
    bits <<= 63;
    assert_eq!(bits.to_vec(), vec![63, 65]);
}

#[test]
fn test_set_range() {
    let mut bits = BitSet::new();
    bits.set_range(10, 200, true);
    assert_eq!(bits.cardinality(), Some(190));
    assert_eq!(bits.ntz(), Some(10));
    assert_eq!(bits.msb(), Some(199));

    bits.clear_range(0, 100);
    assert_eq!(bits.ntz(), Some(100));
    assert_eq!(bits.cardinality(), Some(100));

    // Clearing past the prefix of a non-negative value is a no-op.
    bits.clear_range(300, 100_000);
    assert_eq!(bits.word_len(), 4);
}

#[test]
fn test_set_range_on_negative() {
    let mut bits = BitSet::from(-1);
    bits.clear_range(64, 128);
    assert_eq!(bits.count_zeros(), Some(64));
    assert!(bits.get(63));
    assert!(!bits.get(64));
    assert!(bits.get(128));

    bits.set_range(0, 1_000_000, true);
    assert_eq!(bits, BitSet::from(-1));
    assert_eq!(bits.word_len(), 1);
}

#[test]
fn test_flip_range() {
    let mut bits = BitSet::new();
    bits.flip_range(0, 130);
    assert_eq!(bits.cardinality(), Some(130));
    bits.flip_range(0, 130);
    assert!(bits.is_empty());
    assert_eq!(bits.word_len(), 1);

    let mut neg = BitSet::from(-1);
    neg.flip_range(3, 5);
    assert_eq!(neg, BitSet::from(!0b11000));
}

#[test]
fn test_ranges_inside_one_word() {
    let mut bits = BitSet::new();
    bits.set_range(3, 7, true);
    assert_eq!(bits, BitSet::from(0b111_1000));
    bits.set_range(4, 4, false);
    assert_eq!(bits, BitSet::from(0b111_1000));
    bits.set_range(63, 65, true);
    assert_eq!(bits.to_vec(), vec![3, 4, 5, 6, 63, 64]);
}
