#![no_main]

use dyncheck_core::{MapKey, Value, loose_equal, strict_equal};
use libfuzzer_sys::fuzz_target;

fn byte(data: &mut &[u8]) -> Option<u8> {
    let (&b, rest) = (*data).split_first()?;
    *data = rest;
    Some(b)
}

/// Decode a value from the front of `data`, consuming what it reads.
fn decode(data: &mut &[u8], depth: u8) -> Value {
    let Some(tag) = byte(data) else {
        return Value::Null;
    };
    match tag % 8 {
        0 => Value::Null,
        1 => Value::Bool(tag & 0x80 != 0),
        2 => Value::Int(i64::from(byte(data).unwrap_or(0) as i8)),
        3 => {
            let mut bytes = [0u8; 8];
            for b in &mut bytes {
                *b = byte(data).unwrap_or(0);
            }
            Value::Float(f64::from_le_bytes(bytes))
        }
        4 => {
            let len = usize::from(byte(data).unwrap_or(0) % 6);
            let text: String = (0..len)
                .filter_map(|_| byte(data))
                .map(|b| b"0123456789.-+e abc"[usize::from(b) % 18] as char)
                .collect();
            Value::String(text)
        }
        5 if depth < 4 => {
            let len = byte(data).unwrap_or(0) % 4;
            Value::list((0..len).map(|_| decode(data, depth + 1)).collect::<Vec<_>>())
        }
        6 if depth < 4 => {
            let len = byte(data).unwrap_or(0) % 4;
            let entries: Vec<(MapKey, Value)> = (0..len)
                .map(|_| {
                    let key = MapKey::Int(i64::from(byte(data).unwrap_or(0) % 4));
                    (key, decode(data, depth + 1))
                })
                .collect();
            Value::map(entries)
        }
        _ => Value::Int(i64::from(tag >> 3)),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut input = data;
    let a = decode(&mut input, 0);
    let b = decode(&mut input, 0);

    assert!(strict_equal(&a, &a));
    assert_eq!(strict_equal(&a, &b), strict_equal(&b, &a));
    assert_eq!(loose_equal(&a, &b), loose_equal(&b, &a));
    if strict_equal(&a, &b) {
        assert!(loose_equal(&a, &b));
    }
    let _ = a.render();
});
