#![no_main]
use libfuzzer_sys::fuzz_target;
use imgconv::bmp::{BmpDecoder, Validation};
use imgconv::Limits;

fuzz_target!(|data: &[u8]| {
    // Each decoder must never panic
    let _ = imgconv::bmp::decode_bmp(data, enough::Unstoppable);
    let _ = imgconv::bmp::read_bmp(data, enough::Unstoppable);
    let _ = imgconv::pnm::decode_ppm(data, enough::Unstoppable);

    // Reader path has no length hint; cap the allocation instead
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let _ = BmpDecoder::new()
        .with_validation(Validation::Standard)
        .with_limits(limits)
        .read(data, enough::Unstoppable);
});
