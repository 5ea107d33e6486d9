//! Basic usage examples for `BitSet`

use signed_bitset::BitSet;

fn main() {
    println!("=== BitSet Basic Usage ===\n");

    let mut bits = BitSet::new();
    println!("Created new bitset: {bits}");
    println!("Stored words: {}\n", bits.word_len());

    // Writes grow the storage on demand.
    bits.insert(5).insert(10).insert(15).insert(100);
    println!("Set bits at positions: 5, 10, 15, 100");
    println!("Number of set bits: {:?}", bits.cardinality());
    println!("Stored words: {}\n", bits.word_len());

    println!("Checking individual bits:");
    for i in [0, 5, 10, 15, 20, 100, 150] {
        println!("  Bit {}: {}", i, if bits.get(i) { "set" } else { "unset" });
    }

    print!("\nSet bits: ");
    for bit in &bits {
        print!("{bit} ");
    }
    println!("\n");

    println!("Flipping bits at positions 5 and 25");
    bits.flip(5).flip(25);
    println!("Updated set bits: {:?}\n", bits.to_vec());

    println!("Lowest set bit: {:?}", bits.ntz());
    println!("Highest set bit: {:?}", bits.msb());
    println!("Binary: {bits}");
    println!("Hex: {bits:#x}\n");

    // Complement flips every bit, including the infinite run above the
    // stored words.
    let rest = bits.complement();
    println!("Complement: {rest}");
    println!("Complement has bit 1000000 set? {}", rest.get(1_000_000));
    println!("Complement cardinality: {:?}", rest.cardinality());
    println!("Complement unset bits: {:?}\n", rest.count_zeros());

    let window = rest.slice(0, 16);
    println!("Low 16 bits of the complement: {window}");

    println!("\nClearing all bits");
    bits.clear();
    println!("Is empty? {}", bits.is_empty());
}
