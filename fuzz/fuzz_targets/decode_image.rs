#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoder = match tiff16::decoder::Decoder::new(std::io::Cursor::new(data)) {
        Ok(d) => d,
        Err(_) => return,
    };

    let limits = tiff16::decoder::Limits {
        decoding_buffer_size: 1_000_000,
    };

    let _ = decoder.with_limits(limits).read_image();
});
