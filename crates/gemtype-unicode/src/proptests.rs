use super::*;
use proptest::prelude::*;

// Property: the strict decoder accepts exactly what std accepts
proptest! {
    #[test]
    fn prop_agrees_with_std(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let ours = validate(&bytes);
        match std::str::from_utf8(&bytes) {
            Ok(s) => prop_assert_eq!(ours.unwrap(), s),
            Err(e) => match ours {
                Err(GemtypeError::InvalidEncoding { offset }) => {
                    prop_assert_eq!(offset, e.valid_up_to())
                },
                other => prop_assert!(false, "expected failure, got {:?}", other),
            },
        }
    }
}

// Property: walking valid text reproduces its chars and offsets
proptest! {
    #[test]
    fn prop_walk_matches_char_indices(s in "\\PC*") {
        let walked: Vec<(usize, char)> = codepoints(s.as_bytes())
            .collect::<Result<_>>()
            .unwrap();
        let expected: Vec<(usize, char)> = s.char_indices().collect();
        prop_assert_eq!(walked, expected);
    }
}

// Property: reported width matches the char's own UTF-8 length
proptest! {
    #[test]
    fn prop_width_matches_len_utf8(ch in any::<char>()) {
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        let (decoded, width) = decode(encoded.as_bytes(), 0).unwrap();
        prop_assert_eq!(decoded, ch);
        prop_assert_eq!(width, ch.len_utf8());
    }
}
