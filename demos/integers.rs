//! `BitSet` as an arbitrary-precision two's-complement integer

use signed_bitset::{BitSet, ParseBitSetError};

fn main() -> Result<(), ParseBitSetError> {
    println!("=== BitSet as an Integer ===\n");

    for value in [19219i64, -5, -1, 0] {
        let bits = BitSet::from(value);
        println!(
            "{value:>6}: bin {bits:<14} oct {:<10} dec {:<24} hex {bits:x}",
            bits.to_string_radix(8),
            bits.to_string_radix(10),
        );
    }
    println!();

    // Parsing accepts radix prefixes, separators and the `...` marker.
    let big = BitSet::from_str_radix("0xff90_0018_2838_21283", 16)?;
    println!("Parsed {big:#x}");
    println!("  bits 16..32: {:#x}", big.slice(16, 32));
    println!("  decimal: {}", big.to_string_radix(10));
    println!("  base 36: {}\n", big.to_string_radix(36));

    let neg: BitSet = "...1111011".parse()?;
    println!("...1111011 as i32: {:?}", i32::try_from(&neg));
    println!("  shifted left 4: {}", &neg << 4);
    println!("  shifted right 1: {}", &neg >> 1);
    println!("  lowest set bit: {:?}\n", neg.ntz());

    // Mixed-sign algebra follows two's-complement rules.
    let a = BitSet::from(0b1100);
    let b = BitSet::from(-0b1010);
    println!("{a} & {b} = {}", &a & &b);
    println!("{a} | {b} = {}", &a | &b);
    println!("{a} ^ {b} = {}", &a ^ &b);
    println!("!{a} = {}", !&a);

    let mut sorted: Vec<BitSet> = [7i32, -300, 0, 1 << 20, -1].map(BitSet::from).into();
    sorted.sort();
    println!(
        "\nSorted: {:?}",
        sorted
            .iter()
            .map(|bits| i64::try_from(bits).unwrap_or_default())
            .collect::<Vec<_>>()
    );

    Ok(())
}
