#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use stdext::encoding::{BaseEncoding, base16, base32, base64};
use stdext::value128::{Value128, convert};

#[derive(Arbitrary, Debug)]
enum CodecInput {
    Bytes { which: u8, data: Vec<u8> },
    Text { which: u8, text: String },
    Value { higher: u64, lower: u64 },
}

fn pick(which: u8) -> &'static BaseEncoding {
    match which % 6 {
        0 => &base16::HEX,
        1 => &base32::HEX,
        2 => &base32::CROCKFORD,
        3 => &base64::MIME,
        4 => &base64::URL,
        _ => &base64::LEX,
    }
}

fuzz_target!(|input: CodecInput| {
    match input {
        CodecInput::Bytes { which, data } => {
            let enc = pick(which);
            let text = enc.encode(&data);
            assert_eq!(text.len(), enc.encoded_len(data.len()));
            assert_eq!(enc.decode(&text), Ok(data));
        }
        CodecInput::Text { which, text } => {
            // Malformed text must be rejected, never panic; accepted text re-encodes to
            // something that decodes to the same bytes.
            let enc = pick(which);
            if let Ok(bytes) = enc.decode(&text) {
                assert_eq!(enc.decode(&enc.encode(&bytes)), Ok(bytes));
            }
        }
        CodecInput::Value { higher, lower } => {
            let v = Value128::new(higher, lower);
            let bytes = convert::to_byte_array(v);
            for enc in [&base32::HEX, &base32::CROCKFORD] {
                let text = convert::try_to_base32_string(v, enc);
                assert_eq!(text.as_deref(), Some(enc.encode(&bytes).as_str()));
                assert_eq!(convert::try_from_base32_string(&enc.encode(&bytes), enc), Some(v));
            }
            for enc in [&base64::MIME, &base64::URL, &base64::LEX] {
                let text = convert::try_to_base64_string(v, enc);
                assert_eq!(text.as_deref(), Some(enc.encode(&bytes).as_str()));
                assert_eq!(convert::try_from_base64_string(&enc.encode(&bytes), enc), Some(v));
            }
        }
    }
});
