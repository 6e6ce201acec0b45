#![no_main]
use fse::{decode, encode, StatisticsTable};
use libfuzzer_sys::fuzz_target;
use num::BigUint;

fuzz_target!(|data: (Vec<u8>, Vec<u8>)| {
    let (counts, input_bytes) = data;
    if counts.is_empty() {
        return;
    }

    // Alphabet of up to 16 symbols with counts 1..=16
    let counts: Vec<u64> = counts.iter().take(16).map(|&c| (c % 16) as u64 + 1).collect();
    let table = match StatisticsTable::new(counts.iter().copied().enumerate()) {
        Ok(table) => table,
        Err(_) => return,
    };

    let input: Vec<usize> = input_bytes.iter().map(|&b| b as usize % counts.len()).collect();
    let value = encode(&table, &input).unwrap();
    assert_eq!(decode(&table, &value).unwrap(), input);

    // Any integer must decode and re-encode to itself.
    let arbitrary = BigUint::from_bytes_be(&input_bytes);
    let symbols = decode(&table, &arbitrary).unwrap();
    assert_eq!(encode(&table, &symbols).unwrap(), arbitrary);
});
