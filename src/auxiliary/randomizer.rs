/// Generate a pseudorandom seed for the grid's PRNG.
pub fn generate_seed() -> (u64, u64) {
    use byteorder::{ByteOrder, NativeEndian};
    use getrandom::getrandom;
    use log::warn;

    let mut seed = [0_u8; 16];

    // A fixed seed still gives a usable grid, just the same one every run.
    if let Err(e) = getrandom(&mut seed) {
        warn!("getrandom failed, falling back to a fixed seed: {}", e);
        seed = *b"pixel_automata!!";
    }

    (
        NativeEndian::read_u64(&seed[0..8]),
        NativeEndian::read_u64(&seed[8..16]),
    )
}
