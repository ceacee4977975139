#![no_main]
use crrt_core::FormatMode;
use crrt_core::stdio::{FormatArg, vsprintf};
use libfuzzer_sys::fuzz_target;

// Layout: [capacity][arg count][arg tags..][format bytes..]
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let capacity = usize::from(data[0]);
    let arg_count = usize::from(data[1] % 8).min(data.len() - 2);
    let (tags, fmt) = data[2..].split_at(arg_count);

    let args: Vec<FormatArg<'_>> = tags
        .iter()
        .enumerate()
        .map(|(i, &tag)| {
            let v = i64::from(tag) * 0x0101_0101_0101 * (i as i64 + 1);
            match tag % 4 {
                0 => FormatArg::Int(v as i32),
                1 => FormatArg::Long(-v),
                2 => FormatArg::ULong(v as u64),
                _ => FormatArg::Str(fmt),
            }
        })
        .collect();

    for mode in [FormatMode::Strict, FormatMode::Hardened] {
        let mut buf = vec![0xEEu8; capacity + 4];
        let out = &mut buf[..capacity];
        match vsprintf(out, fmt, &args, mode) {
            Ok(report) => {
                assert!(report.len < capacity.max(1));
                if capacity > 0 {
                    assert_eq!(buf[report.len], 0);
                }
                assert!(report.argc >= 1);
                if mode == FormatMode::Strict {
                    assert!(!report.truncated);
                    assert_eq!(report.repairs, 0);
                }
            }
            Err(_) => assert_eq!(mode, FormatMode::Strict),
        }
        // Nothing past the destination slice is ever written.
        assert!(buf[capacity..].iter().all(|&b| b == 0xEE));
    }
});
