#![no_main]
use libfuzzer_sys::fuzz_target;
use imgconv::bmp::{BmpDecoder, Validation};
use imgconv::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let decoded = if data.starts_with(b"BM") {
        BmpDecoder::new()
            .with_validation(Validation::Standard)
            .decode(data, enough::Unstoppable)
    } else {
        pnm::decode_ppm(data, enough::Unstoppable)
    };
    let Ok(decoded) = decoded else {
        return;
    };

    let Ok(bmp_bytes) = bmp::encode_bmp(&decoded, enough::Unstoppable) else {
        return;
    };
    let Ok(from_bmp) = bmp::decode_bmp(&bmp_bytes, enough::Unstoppable) else {
        panic!("re-encoded BMP failed to decode");
    };
    assert_eq!(decoded, from_bmp, "BMP roundtrip pixel mismatch");

    let ppm = pnm::encode_ppm(&decoded, enough::Unstoppable).expect("PPM encode");
    let from_ppm = pnm::decode_ppm(&ppm, enough::Unstoppable).expect("PPM decode");
    assert_eq!(decoded, from_ppm, "PPM roundtrip pixel mismatch");
});
