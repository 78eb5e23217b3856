#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::new(data);
    if let Ok(result) = framewalk::identify_and_inspect(&mut cursor) {
        assert_eq!(result.kind(), framewalk::identify(&mut Cursor::new(data)).unwrap());
    }
});
