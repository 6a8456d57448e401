//! Session identifier codec.
//!
//! A session id packs 120 bits of stream randomness into 21 characters drawn
//! from the 64-character alphabet `0-9`, `:`, `@-Z`, `a-z`.

use super::entropy_stream;

/// Session ids are always exactly this long.
const SESSION_LEN: usize = 21;

/// Maps a six-bit value onto the session alphabet.
fn sextet_char(n: u8) -> u8 {
    match n {
        0..=10 => b'0' + n,
        11..=37 => b'@' + (n - 11),
        _ => b'a' + (n - 38),
    }
}

/// Creates a random session id from the next pair of stream limbs.
///
/// The 16 random bytes are consumed little-endian: every 3 bytes become 4
/// characters, and the low six bits of the last byte become the final one.
pub fn create_session() -> String {
    let (lo, hi) = entropy_stream().recv();
    let mut bytes = [0_u8; 16];
    bytes[..8].copy_from_slice(&lo.to_le_bytes());
    bytes[8..].copy_from_slice(&hi.to_le_bytes());

    let mut out = [0_u8; SESSION_LEN];
    let mut k = 0;
    for b in bytes[..15].chunks_exact(3) {
        out[k] = sextet_char(b[0] & 63);
        out[k + 1] = sextet_char((b[0] >> 6) | ((b[1] & 15) << 2));
        out[k + 2] = sextet_char((b[1] >> 4) | ((b[2] & 3) << 4));
        out[k + 3] = sextet_char(b[2] >> 2);
        k += 4;
    }
    out[SESSION_LEN - 1] = sextet_char(bytes[15] & 63);

    String::from_utf8_lossy(&out).into_owned()
}

/// Returns true if `sn` is a valid session id: exactly 21 bytes, all inside
/// the session alphabet.
pub fn valid_session(sn: &str) -> bool {
    sn.len() == SESSION_LEN
        && sn
            .bytes()
            .all(|c| matches!(c, b'0'..=b':' | b'@'..=b'Z' | b'a'..=b'z'))
}

#[cfg(test)]
mod tests {
    use super::{sextet_char, valid_session, SESSION_LEN};

    #[test]
    fn alphabet_covers_all_sextets_without_collisions() {
        let mut seen = [false; 256];
        for n in 0..64 {
            let c = sextet_char(n);
            assert!(
                matches!(c, b'0'..=b':' | b'@'..=b'Z' | b'a'..=b'z'),
                "sextet {} maps outside the alphabet",
                n
            );
            assert!(!seen[c as usize], "sextet {} collides", n);
            seen[c as usize] = true;
        }
    }

    #[test]
    fn validator_enforces_length() {
        assert!(valid_session(&"A".repeat(SESSION_LEN)));
        assert!(!valid_session(""));
        assert!(!valid_session(&"A".repeat(SESSION_LEN - 1)));
        assert!(!valid_session(&"A".repeat(SESSION_LEN + 1)));
    }

    #[test]
    fn validator_enforces_alphabet() {
        for good in ["0", ":", "@", "Z", "a", "z", "9", "A"] {
            assert!(valid_session(&good.repeat(SESSION_LEN)));
        }
        // neighbours of the accepted byte ranges
        for bad in ["/", ";", "?", "[", "`", "{", " ", "\n"] {
            assert!(!valid_session(&bad.repeat(SESSION_LEN)));
        }
        // multi-byte characters fail the byte-range check even at length 21
        let accented = format!("{}a", "\u{e9}".repeat(10));
        assert_eq!(accented.len(), SESSION_LEN);
        assert!(!valid_session(&accented));
    }
}
