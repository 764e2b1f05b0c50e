use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PRINTABLE: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";
const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";

fn random_hex(rng: &mut StdRng, len: usize, table: &[u8; 16]) -> String {
    (0..len).map(|_| table[rng.gen_range(0..16)] as char).collect()
}

/// Seeded mix of normalizer inputs: roughly one in four is a 40-character hex
/// string in random case, the rest are printable passwords of 8-64 characters.
pub fn generate_inputs(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            if rng.gen_ratio(1, 4) {
                let table = if rng.gen_bool(0.5) { HEX_UPPER } else { HEX_LOWER };
                random_hex(&mut rng, 40, table)
            } else {
                let length = rng.gen_range(8..=64);
                (0..length)
                    .map(|_| PRINTABLE[rng.gen_range(0..PRINTABLE.len())] as char)
                    .collect()
            }
        })
        .collect()
}

/// Builds a CRLF-joined range body with `count` random `SUFFIX:COUNT` lines.
pub fn generate_range_body(count: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let lines: Vec<String> = (0..count)
        .map(|_| {
            let suffix = random_hex(&mut rng, 35, HEX_UPPER);
            format!("{}:{}", suffix, rng.gen_range(1..=5_000_000u64))
        })
        .collect();
    lines.join("\r\n")
}
